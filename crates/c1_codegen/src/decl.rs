use c1_ast::{
  ASTNode, NodeId,
  statements::{ASTStatement, function::ASTFunction, variable::ASTVariable},
};
use c1_diagnostics::message::DiagnosticMessage;
use c1_ir::{ConstValue, FunctionBuilder, GlobalData, GlobalInit, Instr, IrType, Operand, Terminator};

use crate::{
  CodeGenerator, CodegenResult, FunctionRecord,
  coerce::{NumKind, convert_const},
  const_eval::Folded,
  context::GenContext,
  scope::{ScopeKind, Storage, VariableBinding},
};

impl<'a> CodeGenerator<'a> {
  /// Lowers `void name() { ... }`. A redefinition, or a name already taken
  /// by a global, is reported and the body is skipped entirely.
  pub(crate) fn visit_function(
    &mut self,
    function: &ASTFunction,
  ) -> CodegenResult<()> {
    let name = self.name(function.name);

    if let Some(previous) = self.functions.get(&function.name) {
      return Err(DiagnosticMessage::FunctionAlreadyDefined {
        name,
        span: function.name_span.clone(),
        previous_span: previous.span.clone(),
      });
    }

    if let Some(global) = self.scopes.lookup_global(&function.name) {
      return Err(DiagnosticMessage::SymbolAlreadyDefined {
        name,
        span: function.name_span.clone(),
        previous_span: global.span.clone(),
      });
    }

    // Registered before the body so the function can call itself.
    let id = self.module.declare_function(&name);
    self.functions.insert(
      function.name,
      FunctionRecord {
        name: name.clone(),
        id,
        span: function.name_span.clone(),
      },
    );

    let body = self.nodes.get(&function.body);
    let ASTNode::Statement(ASTStatement::Block(body)) = body else {
      unreachable!("function body is not a block: {:?}", body);
    };

    self.builder = Some(FunctionBuilder::new(&name));
    self.visit_block(body, GenContext::local(), ScopeKind::Function);

    let Some(mut builder) = self.builder.take() else {
      unreachable!("function builder vanished while lowering '{}'", name);
    };
    if !builder.is_terminated() {
      builder.terminate(Terminator::Return);
    }

    self.module.define_function(id, builder.finish());
    Ok(())
  }

  pub(crate) fn visit_variable(
    &mut self,
    variable: &ASTVariable,
    ctx: GenContext,
  ) -> CodegenResult<()> {
    let name = self.name(variable.name);

    if let Some(previous) = self.scopes.lookup_current(&variable.name) {
      return Err(DiagnosticMessage::VariableAlreadyDefined {
        name,
        span: variable.name_span.clone(),
        previous_span: previous.span.clone(),
      });
    }

    if ctx.in_global_scope {
      if let Some(function) = self.functions.get(&variable.name) {
        return Err(DiagnosticMessage::SymbolAlreadyDefined {
          name,
          span: variable.name_span.clone(),
          previous_span: function.span.clone(),
        });
      }
    }

    let kind = NumKind::from(variable.base_type);

    match (&variable.array_length, ctx.in_global_scope) {
      (None, true) => self.define_global_scalar(variable, name, kind, ctx),
      (None, false) => self.define_local_scalar(variable, name, kind, ctx),
      (Some(length), true) => {
        let length = self.array_length(variable, &name, length, ctx)?;
        self.define_global_array(variable, name, kind, length, ctx)
      },
      (Some(length), false) => {
        let length = self.array_length(variable, &name, length, ctx)?;
        self.define_local_array(variable, name, kind, length, ctx)
      },
    }
  }

  /// The initializer is folded and becomes the initial value. Without one the
  /// global is left `undef`.
  fn define_global_scalar(
    &mut self,
    variable: &ASTVariable,
    name: String,
    kind: NumKind,
    ctx: GenContext,
  ) -> CodegenResult<()> {
    let init = match variable.initializers.first() {
      Some(value) => Some(GlobalInit::Scalar(self.constant_initializer(value, kind, ctx)?)),
      None => None,
    };

    let id = self.module.add_global(GlobalData {
      name,
      ty: kind.ir_type(),
      constant: variable.is_constant,
      init,
    });

    self.bind(variable, Storage::Global(id), kind);
    Ok(())
  }

  /// The slot is bound before the initializer runs, so the initializer
  /// already sees the new variable.
  fn define_local_scalar(
    &mut self,
    variable: &ASTVariable,
    name: String,
    kind: NumKind,
    ctx: GenContext,
  ) -> CodegenResult<()> {
    let slot = self.builder().alloc_local(&name, kind.ir_type());
    self.bind(variable, Storage::Local(slot), kind);

    if let Some(value) = variable.initializers.first() {
      let (value, value_kind) = self.rvalue(value, ctx)?;
      let value = self.coerce(value, value_kind, kind);
      self.builder().emit(Instr::Store {
        ptr: Operand::Local(slot),
        value,
      });
    }

    Ok(())
  }

  fn define_global_array(
    &mut self,
    variable: &ASTVariable,
    name: String,
    kind: NumKind,
    length: u32,
    ctx: GenContext,
  ) -> CodegenResult<()> {
    let mut elements = Vec::with_capacity(length as usize);
    for value in &variable.initializers {
      elements.push(self.constant_initializer(value, kind, ctx)?);
    }
    elements.resize(length as usize, ConstValue::zero(kind.scalar()));

    let id = self.module.add_global(GlobalData {
      name,
      ty: IrType::Array {
        element: kind.scalar(),
        len: length,
      },
      constant: variable.is_constant,
      init: Some(GlobalInit::Array(elements)),
    });

    self.bind(variable, Storage::Global(id), kind);
    Ok(())
  }

  /// Each element is stored through its own element address. Elements past
  /// the initializer list are zeroed, unless there is no list at all.
  fn define_local_array(
    &mut self,
    variable: &ASTVariable,
    name: String,
    kind: NumKind,
    length: u32,
    ctx: GenContext,
  ) -> CodegenResult<()> {
    let slot = self.builder().alloc_local(
      &name,
      IrType::Array {
        element: kind.scalar(),
        len: length,
      },
    );
    self.bind(variable, Storage::Local(slot), kind);

    if variable.initializers.is_empty() {
      return Ok(());
    }

    for index in 0..length {
      let value = match variable.initializers.get(index as usize) {
        Some(value) => {
          let (value, value_kind) = self.rvalue(value, ctx)?;
          self.coerce(value, value_kind, kind)
        },
        None => Operand::Const(ConstValue::zero(kind.scalar())),
      };

      let builder = self.builder();
      let element = builder.alloc_temp(IrType::pointer_to(kind.ir_type()));
      builder.emit(Instr::ElementPtr {
        dest: element,
        base: Operand::Local(slot),
        index: Operand::Const(ConstValue::Int(index as i32)),
      });
      builder.emit(Instr::Store {
        ptr: Operand::Temp(element),
        value,
      });
    }

    Ok(())
  }

  /// Folds the declared length. It must be a positive integer that covers
  /// every initializer.
  fn array_length(
    &mut self,
    variable: &ASTVariable,
    name: &str,
    length: &NodeId,
    ctx: GenContext,
  ) -> CodegenResult<u32> {
    let span = self.span_of(length);

    let Folded::Int(value) = self.fold(length, ctx)? else {
      return Err(DiagnosticMessage::NonIntegerArrayLength {
        name: name.to_string(),
        span,
      });
    };

    if value <= 0 {
      return Err(DiagnosticMessage::NonPositiveArrayLength {
        name: name.to_string(),
        length: value,
        span,
      });
    }

    let count = variable.initializers.len();
    if count > value as usize {
      return Err(DiagnosticMessage::TooManyArrayInitializers {
        name: name.to_string(),
        length: value,
        count,
        span: variable.span.clone(),
      });
    }

    Ok(value as u32)
  }

  /// Folds `value` and converts it to `kind`, warning when a float loses its
  /// fractional part or range.
  fn constant_initializer(
    &mut self,
    value: &NodeId,
    kind: NumKind,
    ctx: GenContext,
  ) -> CodegenResult<ConstValue> {
    let folded = self.fold(value, ctx)?;
    let (converted, lossy) = convert_const(folded, kind);

    if let (true, Folded::Int(truncated)) = (lossy, converted) {
      let span = self.span_of(value);
      self.diagnostics.push(DiagnosticMessage::LossyConstantConversion {
        value: folded.as_f64(),
        truncated,
        span,
      });
    }

    Ok(converted.to_const_value())
  }

  fn bind(
    &mut self,
    variable: &ASTVariable,
    storage: Storage,
    kind: NumKind,
  ) {
    let declared = self.scopes.declare(
      variable.name,
      VariableBinding {
        storage,
        is_constant: variable.is_constant,
        is_array: variable.is_array(),
        kind,
        span: variable.name_span.clone(),
      },
    );
    debug_assert!(declared, "redeclaration slipped past the scope check");
  }
}
