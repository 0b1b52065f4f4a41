use c1_ast::{
  ASTNode, NodeId,
  statements::{
    ASTStatement, assignment::ASTAssignment, block::ASTBlock, call::ASTCall, if_statement::ASTIf,
    while_statement::ASTWhile,
  },
};
use c1_diagnostics::message::DiagnosticMessage;
use c1_ir::{Instr, Terminator};

use crate::{
  CodeGenerator, CodegenResult,
  context::{Evaluated, GenContext},
  scope::ScopeKind,
};

impl<'a> CodeGenerator<'a> {
  pub(crate) fn visit_statement(
    &mut self,
    id: &NodeId,
    ctx: GenContext,
  ) -> CodegenResult<()> {
    let node = self.nodes.get(id);
    let ASTNode::Statement(statement) = node else {
      unreachable!("expected a statement node, found {:?}", node);
    };

    match statement {
      ASTStatement::Function(function) => self.visit_function(function),
      ASTStatement::Variable(variable) => self.visit_variable(variable, ctx),
      ASTStatement::Assignment(assignment) => self.visit_assignment(assignment, ctx),
      ASTStatement::Call(call) => self.visit_call(call),
      ASTStatement::Block(block) => {
        self.visit_block(block, ctx, ScopeKind::Block);
        Ok(())
      },
      ASTStatement::If(if_) => {
        self.visit_if(if_, ctx);
        Ok(())
      },
      ASTStatement::While(while_) => {
        self.visit_while(while_, ctx);
        Ok(())
      },
      ASTStatement::Empty(_) => Ok(()),
    }
  }

  /// A block is one lexical scope, not a basic block. Each statement
  /// reports its own error.
  pub(crate) fn visit_block(
    &mut self,
    block: &ASTBlock,
    ctx: GenContext,
    kind: ScopeKind,
  ) {
    self.scopes.enter_scope(kind);

    for statement in &block.statements {
      self.record(|this| this.visit_statement(statement, ctx));
    }

    self.scopes.exit_scope();
  }

  fn visit_assignment(
    &mut self,
    assignment: &ASTAssignment,
    ctx: GenContext,
  ) -> CodegenResult<()> {
    let (value, value_kind) = self.rvalue(&assignment.value, ctx)?;

    let Evaluated::Runtime { operand: ptr, kind } = self.visit_expression(&assignment.target, ctx.address())? else {
      unreachable!("assignment target folded to a constant");
    };

    let value = self.coerce(value, value_kind, kind);
    self.builder().emit(Instr::Store { ptr, value });
    Ok(())
  }

  fn visit_call(
    &mut self,
    call: &ASTCall,
  ) -> CodegenResult<()> {
    let Some(record) = self.functions.get(&call.name) else {
      return Err(DiagnosticMessage::UndefinedFunction {
        name: self.name(call.name),
        span: call.span.clone(),
      });
    };

    let callee = record.id;
    self.builder().emit(Instr::Call { callee });
    Ok(())
  }

  fn visit_if(
    &mut self,
    if_: &ASTIf,
    ctx: GenContext,
  ) {
    let condition = self.branch_condition(&if_.condition, ctx);

    let builder = self.builder();
    let then_block = builder.create_block();
    let else_block = if_.else_branch.as_ref().map(|_| builder.create_block());
    let next_block = builder.create_block();

    builder.terminate(Terminator::Branch {
      condition,
      then_block,
      else_block: else_block.unwrap_or(next_block),
    });

    self.builder().switch_to_block(then_block);
    self.record(|this| this.visit_statement(&if_.then_branch, ctx));
    self.builder().terminate(Terminator::Goto { target: next_block });

    if let (Some(else_block), Some(else_branch)) = (else_block, &if_.else_branch) {
      self.builder().switch_to_block(else_block);
      self.record(|this| this.visit_statement(else_branch, ctx));
      self.builder().terminate(Terminator::Goto { target: next_block });
    }

    self.builder().switch_to_block(next_block);
  }

  /// Pre-test loop: entry and every iteration go through the predicate block.
  fn visit_while(
    &mut self,
    while_: &ASTWhile,
    ctx: GenContext,
  ) {
    let builder = self.builder();
    let predicate_block = builder.create_block();
    let body_block = builder.create_block();
    let next_block = builder.create_block();

    builder.terminate(Terminator::Goto {
      target: predicate_block,
    });
    builder.switch_to_block(predicate_block);

    let condition = self.branch_condition(&while_.condition, ctx);
    self.builder().terminate(Terminator::Branch {
      condition,
      then_block: body_block,
      else_block: next_block,
    });

    self.builder().switch_to_block(body_block);
    self.record(|this| this.visit_statement(&while_.body, ctx));
    self.builder().terminate(Terminator::Goto {
      target: predicate_block,
    });

    self.builder().switch_to_block(next_block);
  }
}
