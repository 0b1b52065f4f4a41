use c1_ast::{
  ASTNode, NodeId,
  expressions::{
    ASTExpression,
    binary::{ASTBinary, ASTBinaryOperator},
    condition::ASTRelationalOperator,
    literal::{ASTLiteral, ASTLiteralValue},
    lvalue::ASTLValue,
    unary::{ASTUnary, UnaryOperator},
  },
};
use c1_diagnostics::message::DiagnosticMessage;
use c1_ir::{BinaryOp, ComparePredicate, ConstValue, Instr, IrType, Operand, UnaryOp};

use crate::{
  CodeGenerator, CodegenResult,
  coerce::{NumKind, unify},
  const_eval::{Folded, fold_binary, fold_unary},
  context::{Access, Evaluated, GenContext},
};

impl<'a> CodeGenerator<'a> {
  pub(crate) fn visit_expression(
    &mut self,
    id: &NodeId,
    ctx: GenContext,
  ) -> CodegenResult<Evaluated> {
    let node = self.nodes.get(id);
    let ASTNode::Expression(expression) = node else {
      unreachable!("expected an expression node, found {:?}", node);
    };

    match expression {
      ASTExpression::Literal(literal) => Ok(self.visit_literal(literal, ctx)),
      ASTExpression::Binary(binary) => self.visit_binary(binary, ctx),
      ASTExpression::Unary(unary) => self.visit_unary(unary, ctx),
      ASTExpression::LValue(lvalue) => self.visit_lvalue(lvalue, ctx),
      ASTExpression::Condition(_) => unreachable!("relational test outside of a branch predicate"),
    }
  }

  /// Evaluates `id` at compile time.
  pub(crate) fn fold(
    &mut self,
    id: &NodeId,
    ctx: GenContext,
  ) -> CodegenResult<Folded> {
    match self.visit_expression(id, ctx.with_constant())? {
      Evaluated::Folded(folded) => Ok(folded),
      Evaluated::Runtime { .. } => unreachable!("constant context produced a runtime value"),
    }
  }

  /// Evaluates `id` as a runtime r-value.
  pub(crate) fn rvalue(
    &mut self,
    id: &NodeId,
    ctx: GenContext,
  ) -> CodegenResult<(Operand, NumKind)> {
    match self.visit_expression(id, ctx.read())? {
      Evaluated::Runtime { operand, kind } => Ok((operand, kind)),
      Evaluated::Folded(folded) => Ok((Operand::Const(folded.to_const_value()), folded.kind())),
    }
  }

  fn visit_literal(
    &mut self,
    literal: &ASTLiteral,
    ctx: GenContext,
  ) -> Evaluated {
    let folded = match literal.value {
      ASTLiteralValue::Int(value) => Folded::Int(value),
      ASTLiteralValue::Float(value) => Folded::Float(value),
    };

    if ctx.constant {
      Evaluated::Folded(folded)
    } else {
      Evaluated::Runtime {
        operand: Operand::Const(folded.to_const_value()),
        kind: folded.kind(),
      }
    }
  }

  fn visit_binary(
    &mut self,
    binary: &ASTBinary,
    ctx: GenContext,
  ) -> CodegenResult<Evaluated> {
    if ctx.constant {
      let left = self.fold(&binary.left, ctx)?;
      let right = self.fold(&binary.right, ctx)?;
      return fold_binary(binary.operator, left, right, &binary.span).map(Evaluated::Folded);
    }

    let (left, left_kind) = self.rvalue(&binary.left, ctx)?;
    let (right, right_kind) = self.rvalue(&binary.right, ctx)?;
    let kind = unify(left_kind, right_kind);

    if binary.operator == ASTBinaryOperator::Modulo && kind == NumKind::Float {
      return Err(DiagnosticMessage::ModuloOnFloat(binary.span.clone()));
    }

    let left = self.coerce(left, left_kind, kind);
    let right = self.coerce(right, right_kind, kind);

    let builder = self.builder();
    let dest = builder.alloc_temp(kind.ir_type());
    builder.emit(Instr::Binary {
      dest,
      op: binary_op(binary.operator, kind),
      left,
      right,
    });

    Ok(Evaluated::Runtime {
      operand: Operand::Temp(dest),
      kind,
    })
  }

  fn visit_unary(
    &mut self,
    unary: &ASTUnary,
    ctx: GenContext,
  ) -> CodegenResult<Evaluated> {
    if ctx.constant {
      let operand = self.fold(&unary.operand, ctx)?;
      return Ok(Evaluated::Folded(fold_unary(unary.operator, operand)));
    }

    let (operand, kind) = self.rvalue(&unary.operand, ctx)?;
    if unary.operator == UnaryOperator::Plus {
      return Ok(Evaluated::Runtime { operand, kind });
    }

    let op = match kind {
      NumKind::Int => UnaryOp::Neg,
      NumKind::Float => UnaryOp::FNeg,
    };

    let builder = self.builder();
    let dest = builder.alloc_temp(kind.ir_type());
    builder.emit(Instr::Unary { dest, op, operand });

    Ok(Evaluated::Runtime {
      operand: Operand::Temp(dest),
      kind,
    })
  }

  /// Loads the referenced value, or yields its address in [`Access::Address`]
  /// mode. The result is tagged with the declared kind of the variable.
  fn visit_lvalue(
    &mut self,
    lvalue: &ASTLValue,
    ctx: GenContext,
  ) -> CodegenResult<Evaluated> {
    let name = self.name(lvalue.name);
    let span = lvalue.span.clone();

    if ctx.constant {
      return Err(DiagnosticMessage::VariableInConstantExpression { name, span });
    }

    let binding = match self.scopes.lookup(&lvalue.name) {
      Ok(binding) => binding.clone(),
      Err(_) => return Err(DiagnosticMessage::UndeclaredVariable { name, span }),
    };

    if ctx.access == Access::Address && binding.is_constant {
      return Err(DiagnosticMessage::AssignToConstant { name, span });
    }

    let address = match (binding.is_array, &lvalue.index) {
      (false, None) => binding.storage.operand(),
      (false, Some(_)) => return Err(DiagnosticMessage::IndexOnNonArray { name, span }),
      (true, None) => return Err(DiagnosticMessage::MissingArrayIndex { name, span }),
      (true, Some(index)) => {
        let (index, index_kind) = self.rvalue(index, ctx)?;
        if index_kind != NumKind::Int {
          let span = lvalue.index.as_ref().map(|i| self.span_of(i)).unwrap_or(span);
          return Err(DiagnosticMessage::NonIntegerArrayIndex { name, span });
        }

        let builder = self.builder();
        let dest = builder.alloc_temp(IrType::pointer_to(binding.kind.ir_type()));
        builder.emit(Instr::ElementPtr {
          dest,
          base: binding.storage.operand(),
          index,
        });
        Operand::Temp(dest)
      },
    };

    if ctx.access == Access::Address {
      return Ok(Evaluated::Runtime {
        operand: address,
        kind: binding.kind,
      });
    }

    let builder = self.builder();
    let dest = builder.alloc_temp(binding.kind.ir_type());
    builder.emit(Instr::Load { dest, ptr: address });

    Ok(Evaluated::Runtime {
      operand: Operand::Temp(dest),
      kind: binding.kind,
    })
  }

  /// Lowers a relational test into an `i1` operand.
  pub(crate) fn visit_condition(
    &mut self,
    id: &NodeId,
    ctx: GenContext,
  ) -> CodegenResult<Operand> {
    let node = self.nodes.get(id);
    let ASTNode::Expression(ASTExpression::Condition(condition)) = node else {
      unreachable!("branch predicate is not a relational test: {:?}", node);
    };

    let (left, left_kind) = self.rvalue(&condition.left, ctx)?;
    let (right, right_kind) = self.rvalue(&condition.right, ctx)?;
    let kind = unify(left_kind, right_kind);

    let left = self.coerce(left, left_kind, kind);
    let right = self.coerce(right, right_kind, kind);

    let builder = self.builder();
    let dest = builder.alloc_temp(IrType::i1());
    builder.emit(Instr::Compare {
      dest,
      predicate: compare_predicate(condition.operator, kind),
      left,
      right,
    });

    Ok(Operand::Temp(dest))
  }

  /// Predicate of an `if` or `while`. A failed predicate is recorded and
  /// replaced by `false` so the bodies are still checked.
  pub(crate) fn branch_condition(
    &mut self,
    id: &NodeId,
    ctx: GenContext,
  ) -> Operand {
    match self.visit_condition(id, ctx) {
      Ok(operand) => operand,
      Err(diagnostic) => {
        self.diagnostics.push(diagnostic);
        Operand::Const(ConstValue::Bool(false))
      },
    }
  }
}

fn binary_op(
  operator: ASTBinaryOperator,
  kind: NumKind,
) -> BinaryOp {
  match (operator, kind) {
    (ASTBinaryOperator::Add, NumKind::Int) => BinaryOp::Add,
    (ASTBinaryOperator::Subtract, NumKind::Int) => BinaryOp::Sub,
    (ASTBinaryOperator::Multiply, NumKind::Int) => BinaryOp::Mul,
    (ASTBinaryOperator::Divide, NumKind::Int) => BinaryOp::SDiv,
    (ASTBinaryOperator::Modulo, NumKind::Int) => BinaryOp::SRem,
    (ASTBinaryOperator::Add, NumKind::Float) => BinaryOp::FAdd,
    (ASTBinaryOperator::Subtract, NumKind::Float) => BinaryOp::FSub,
    (ASTBinaryOperator::Multiply, NumKind::Float) => BinaryOp::FMul,
    (ASTBinaryOperator::Divide, NumKind::Float) => BinaryOp::FDiv,
    (ASTBinaryOperator::Modulo, NumKind::Float) => unreachable!("float modulo is rejected before lowering"),
  }
}

fn compare_predicate(
  operator: ASTRelationalOperator,
  kind: NumKind,
) -> ComparePredicate {
  match (operator, kind) {
    (ASTRelationalOperator::Equal, NumKind::Int) => ComparePredicate::Eq,
    (ASTRelationalOperator::NotEqual, NumKind::Int) => ComparePredicate::Ne,
    (ASTRelationalOperator::Greater, NumKind::Int) => ComparePredicate::Sgt,
    (ASTRelationalOperator::GreaterEqual, NumKind::Int) => ComparePredicate::Sge,
    (ASTRelationalOperator::Less, NumKind::Int) => ComparePredicate::Slt,
    (ASTRelationalOperator::LessEqual, NumKind::Int) => ComparePredicate::Sle,
    (ASTRelationalOperator::Equal, NumKind::Float) => ComparePredicate::Oeq,
    (ASTRelationalOperator::NotEqual, NumKind::Float) => ComparePredicate::One,
    (ASTRelationalOperator::Greater, NumKind::Float) => ComparePredicate::Ogt,
    (ASTRelationalOperator::GreaterEqual, NumKind::Float) => ComparePredicate::Oge,
    (ASTRelationalOperator::Less, NumKind::Float) => ComparePredicate::Olt,
    (ASTRelationalOperator::LessEqual, NumKind::Float) => ComparePredicate::Ole,
  }
}
