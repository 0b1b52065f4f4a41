use std::collections::{HashSet, VecDeque};
use std::fmt;

use crate::{
  BlockId, CastOp, FunctionId, FunctionIr, GlobalId, GlobalInit, Instr, IrModule, IrType, LocalId, Operand,
  ScalarType, TempId, Terminator, UnaryOp,
};

/// Errors found during IR verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
  /// A block was never given a terminator.
  MissingTerminator { function: String, block: String },

  /// A block cannot be reached from the entry block.
  UnreachableBlock { function: String, block: String },

  InvalidBlockRef {
    function: String,
    block: String,
    target: BlockId,
  },

  InvalidLocalRef {
    function: String,
    block: String,
    local: LocalId,
  },

  InvalidTempRef {
    function: String,
    block: String,
    temp: TempId,
  },

  InvalidGlobalRef {
    function: String,
    block: String,
    global: GlobalId,
  },

  InvalidCallee {
    function: String,
    block: String,
    callee: FunctionId,
  },

  TempUsedBeforeDef {
    function: String,
    block: String,
    temp: TempId,
  },

  NonBoolBranchCondition {
    function: String,
    block: String,
    actual: IrType,
  },

  /// Operand or result types of an instruction disagree.
  TypeMismatch {
    function: String,
    block: String,
    instruction: &'static str,
    expected: IrType,
    actual: IrType,
  },

  DuplicateFunction { name: String },

  DuplicateGlobal { name: String },

  /// A global and a function print as the same `@` symbol.
  DuplicateSymbol { name: String },

  /// A global's initializer does not fit its declared type.
  MalformedGlobalInit { global: String },
}

impl fmt::Display for VerifyError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      VerifyError::MissingTerminator { function, block } => {
        write!(f, "@{}: block {} has no terminator", function, block)
      },
      VerifyError::UnreachableBlock { function, block } => {
        write!(f, "@{}: block {} is unreachable from the entry block", function, block)
      },
      VerifyError::InvalidBlockRef {
        function,
        block,
        target,
      } => write!(f, "@{}: block {} branches to unknown block {}", function, block, target.index()),
      VerifyError::InvalidLocalRef { function, block, local } => {
        write!(f, "@{}: block {} uses unknown local %l{}", function, block, local.index())
      },
      VerifyError::InvalidTempRef { function, block, temp } => {
        write!(f, "@{}: block {} uses unknown temp %t{}", function, block, temp.index())
      },
      VerifyError::InvalidGlobalRef {
        function,
        block,
        global,
      } => write!(f, "@{}: block {} uses unknown global #{}", function, block, global.index()),
      VerifyError::InvalidCallee {
        function,
        block,
        callee,
      } => write!(f, "@{}: block {} calls unknown function #{}", function, block, callee.index()),
      VerifyError::TempUsedBeforeDef { function, block, temp } => {
        write!(f, "@{}: block {} uses %t{} before its definition", function, block, temp.index())
      },
      VerifyError::NonBoolBranchCondition {
        function,
        block,
        actual,
      } => write!(f, "@{}: block {} branches on a {} instead of i1", function, block, actual),
      VerifyError::TypeMismatch {
        function,
        block,
        instruction,
        expected,
        actual,
      } => write!(
        f,
        "@{}: block {}: {} expects {} but got {}",
        function, block, instruction, expected, actual
      ),
      VerifyError::DuplicateFunction { name } => write!(f, "function @{} is defined twice", name),
      VerifyError::DuplicateGlobal { name } => write!(f, "global @{} is defined twice", name),
      VerifyError::DuplicateSymbol { name } => write!(f, "@{} names both a global and a function", name),
      VerifyError::MalformedGlobalInit { global } => {
        write!(f, "initializer of global @{} does not match its type", global)
      },
    }
  }
}

/// IR verification result.
pub type VerifyResult = Result<(), Vec<VerifyError>>;

/// Structural and type checker for a finished module.
pub struct IrVerifier<'a> {
  module: &'a IrModule,
  errors: Vec<VerifyError>,
}

impl<'a> IrVerifier<'a> {
  pub fn new(module: &'a IrModule) -> Self {
    Self {
      module,
      errors: Vec::new(),
    }
  }

  pub fn verify(mut self) -> VerifyResult {
    self.verify_names();
    self.verify_globals();

    for func in self.module.functions.get_all() {
      if func.defined {
        self.verify_function(func);
      }
    }

    if self.errors.is_empty() {
      Ok(())
    } else {
      Err(self.errors)
    }
  }

  fn verify_names(&mut self) {
    let mut functions = HashSet::new();
    for func in self.module.functions.get_all() {
      if !functions.insert(func.name.as_str()) {
        self.errors.push(VerifyError::DuplicateFunction {
          name: func.name.clone(),
        });
      }
    }

    let mut globals = HashSet::new();
    for global in self.module.globals.get_all() {
      if !globals.insert(global.name.as_str()) {
        self.errors.push(VerifyError::DuplicateGlobal {
          name: global.name.clone(),
        });
      } else if functions.contains(global.name.as_str()) {
        self.errors.push(VerifyError::DuplicateSymbol {
          name: global.name.clone(),
        });
      }
    }
  }

  fn verify_globals(&mut self) {
    for global in self.module.globals.get_all() {
      let well_formed = match (&global.ty, &global.init) {
        (_, None) => true,
        (IrType::Scalar(ty), Some(GlobalInit::Scalar(value))) => value.scalar_type() == *ty,
        (IrType::Array { element, len }, Some(GlobalInit::Array(values))) => {
          values.len() == *len as usize && values.iter().all(|v| v.scalar_type() == *element)
        },
        _ => false,
      };

      if !well_formed {
        self.errors.push(VerifyError::MalformedGlobalInit {
          global: global.name.clone(),
        });
      }
    }
  }

  fn verify_function(
    &mut self,
    func: &FunctionIr,
  ) {
    let mut defined_temps: HashSet<TempId> = HashSet::new();

    for block in func.blocks.get_all() {
      let block_name = block.label.as_str();

      for instr in &block.instructions {
        self.verify_instr(func, block_name, instr, &mut defined_temps);
      }

      self.verify_terminator(func, block_name, &block.terminator, &defined_temps);
    }

    self.verify_reachability(func);
  }

  fn verify_reachability(
    &mut self,
    func: &FunctionIr,
  ) {
    let mut visited: HashSet<BlockId> = HashSet::new();
    let mut queue = VecDeque::from([func.entry_block]);

    while let Some(id) = queue.pop_front() {
      if !func.blocks.contains(&id) || !visited.insert(id) {
        continue;
      }
      queue.extend(func.blocks.get(&id).terminator.successors());
    }

    for (id, block) in func.blocks.iter() {
      if !visited.contains(&id) {
        self.errors.push(VerifyError::UnreachableBlock {
          function: func.name.clone(),
          block: block.label.clone(),
        });
      }
    }
  }

  fn verify_instr(
    &mut self,
    func: &FunctionIr,
    block_name: &str,
    instr: &Instr,
    defined_temps: &mut HashSet<TempId>,
  ) {
    match instr {
      Instr::Load { dest, ptr } => {
        self.check_operand(func, block_name, ptr, defined_temps);
        if let Some(ptr_ty) = self.operand_type(func, ptr) {
          let loaded = ptr_ty.pointee().cloned().unwrap_or(IrType::Void);
          self.expect_type(func, block_name, "load", &loaded, &self.dest_type(func, *dest));
        }
      },
      Instr::Store { ptr, value } => {
        self.check_operand(func, block_name, ptr, defined_temps);
        self.check_operand(func, block_name, value, defined_temps);
        if let (Some(ptr_ty), Some(value_ty)) = (self.operand_type(func, ptr), self.operand_type(func, value)) {
          let slot = ptr_ty.pointee().cloned().unwrap_or(IrType::Void);
          self.expect_type(func, block_name, "store", &slot, &value_ty);
        }
      },
      Instr::ElementPtr { dest, base, index } => {
        self.check_operand(func, block_name, base, defined_temps);
        self.check_operand(func, block_name, index, defined_temps);

        if let Some(index_ty) = self.operand_type(func, index) {
          self.expect_type(func, block_name, "getelementptr index", &IrType::i32(), &index_ty);
        }
        if let Some(base_ty) = self.operand_type(func, base) {
          match base_ty.pointee() {
            Some(IrType::Array { element, .. }) => {
              let expected = IrType::pointer_to(IrType::Scalar(*element));
              self.expect_type(func, block_name, "getelementptr", &expected, &self.dest_type(func, *dest));
            },
            _ => {
              let expected = IrType::pointer_to(IrType::Array {
                element: ScalarType::I32,
                len: 0,
              });
              self.expect_type(func, block_name, "getelementptr base", &expected, &base_ty);
            },
          }
        }
      },
      Instr::Binary { dest, op, left, right } => {
        self.check_operand(func, block_name, left, defined_temps);
        self.check_operand(func, block_name, right, defined_temps);

        let expected = if op.is_float() { IrType::f64() } else { IrType::i32() };
        for operand in [left, right] {
          if let Some(ty) = self.operand_type(func, operand) {
            self.expect_type(func, block_name, op.mnemonic(), &expected, &ty);
          }
        }
        self.expect_type(func, block_name, op.mnemonic(), &expected, &self.dest_type(func, *dest));
      },
      Instr::Unary { dest, op, operand } => {
        self.check_operand(func, block_name, operand, defined_temps);

        let (name, expected) = match op {
          UnaryOp::Neg => ("neg", IrType::i32()),
          UnaryOp::FNeg => ("fneg", IrType::f64()),
        };
        if let Some(ty) = self.operand_type(func, operand) {
          self.expect_type(func, block_name, name, &expected, &ty);
        }
        self.expect_type(func, block_name, name, &expected, &self.dest_type(func, *dest));
      },
      Instr::Compare {
        dest,
        predicate,
        left,
        right,
      } => {
        self.check_operand(func, block_name, left, defined_temps);
        self.check_operand(func, block_name, right, defined_temps);

        let (name, expected) = if predicate.is_float() {
          ("fcmp", IrType::f64())
        } else {
          ("icmp", IrType::i32())
        };
        for operand in [left, right] {
          if let Some(ty) = self.operand_type(func, operand) {
            self.expect_type(func, block_name, name, &expected, &ty);
          }
        }
        self.expect_type(func, block_name, name, &IrType::i1(), &self.dest_type(func, *dest));
      },
      Instr::Cast { dest, op, source } => {
        self.check_operand(func, block_name, source, defined_temps);

        let (from, to) = match op {
          CastOp::SiToFp => (IrType::i32(), IrType::f64()),
          CastOp::FpToSi => (IrType::f64(), IrType::i32()),
        };
        if let Some(ty) = self.operand_type(func, source) {
          self.expect_type(func, block_name, op.mnemonic(), &from, &ty);
        }
        self.expect_type(func, block_name, op.mnemonic(), &to, &self.dest_type(func, *dest));
      },
      Instr::Call { callee } => {
        if !self.module.functions.contains(callee) {
          self.errors.push(VerifyError::InvalidCallee {
            function: func.name.clone(),
            block: block_name.to_string(),
            callee: *callee,
          });
        }
      },
    }

    if let Some(dest) = instr.dest() {
      self.check_temp_exists(func, block_name, dest);
      defined_temps.insert(dest);
    }
  }

  fn verify_terminator(
    &mut self,
    func: &FunctionIr,
    block_name: &str,
    term: &Terminator,
    defined_temps: &HashSet<TempId>,
  ) {
    match term {
      Terminator::Goto { target } => {
        self.check_block_exists(func, block_name, *target);
      },
      Terminator::Branch {
        condition,
        then_block,
        else_block,
      } => {
        self.check_operand(func, block_name, condition, defined_temps);
        self.check_block_exists(func, block_name, *then_block);
        self.check_block_exists(func, block_name, *else_block);

        if let Some(ty) = self.operand_type(func, condition) {
          if ty != IrType::i1() {
            self.errors.push(VerifyError::NonBoolBranchCondition {
              function: func.name.clone(),
              block: block_name.to_string(),
              actual: ty,
            });
          }
        }
      },
      Terminator::Return => {},
      Terminator::Unreachable => {
        self.errors.push(VerifyError::MissingTerminator {
          function: func.name.clone(),
          block: block_name.to_string(),
        });
      },
    }
  }

  fn check_operand(
    &mut self,
    func: &FunctionIr,
    block_name: &str,
    operand: &Operand,
    defined_temps: &HashSet<TempId>,
  ) {
    match operand {
      Operand::Temp(temp) => {
        self.check_temp_exists(func, block_name, *temp);
        if !defined_temps.contains(temp) {
          self.errors.push(VerifyError::TempUsedBeforeDef {
            function: func.name.clone(),
            block: block_name.to_string(),
            temp: *temp,
          });
        }
      },
      Operand::Local(local) => {
        if !func.locals.contains(local) {
          self.errors.push(VerifyError::InvalidLocalRef {
            function: func.name.clone(),
            block: block_name.to_string(),
            local: *local,
          });
        }
      },
      Operand::Global(global) => {
        if !self.module.globals.contains(global) {
          self.errors.push(VerifyError::InvalidGlobalRef {
            function: func.name.clone(),
            block: block_name.to_string(),
            global: *global,
          });
        }
      },
      Operand::Const(_) => {},
    }
  }

  fn check_block_exists(
    &mut self,
    func: &FunctionIr,
    block_name: &str,
    block_id: BlockId,
  ) {
    if !func.blocks.contains(&block_id) {
      self.errors.push(VerifyError::InvalidBlockRef {
        function: func.name.clone(),
        block: block_name.to_string(),
        target: block_id,
      });
    }
  }

  fn check_temp_exists(
    &mut self,
    func: &FunctionIr,
    block_name: &str,
    temp_id: TempId,
  ) {
    if !func.temps.contains(&temp_id) {
      self.errors.push(VerifyError::InvalidTempRef {
        function: func.name.clone(),
        block: block_name.to_string(),
        temp: temp_id,
      });
    }
  }

  fn expect_type(
    &mut self,
    func: &FunctionIr,
    block_name: &str,
    instruction: &'static str,
    expected: &IrType,
    actual: &IrType,
  ) {
    if expected != actual {
      self.errors.push(VerifyError::TypeMismatch {
        function: func.name.clone(),
        block: block_name.to_string(),
        instruction,
        expected: expected.clone(),
        actual: actual.clone(),
      });
    }
  }

  fn dest_type(
    &self,
    func: &FunctionIr,
    dest: TempId,
  ) -> IrType {
    func.temps.try_get(&dest).map(|t| t.ty.clone()).unwrap_or(IrType::Void)
  }

  fn operand_type(
    &self,
    func: &FunctionIr,
    operand: &Operand,
  ) -> Option<IrType> {
    match operand {
      Operand::Temp(temp) => func.temps.try_get(temp).map(|t| t.ty.clone()),
      Operand::Local(local) => func.locals.try_get(local).map(|l| IrType::pointer_to(l.ty.clone())),
      Operand::Global(global) => self
        .module
        .globals
        .try_get(global)
        .map(|g| IrType::pointer_to(g.ty.clone())),
      Operand::Const(value) => Some(IrType::Scalar(value.scalar_type())),
    }
  }
}

/// Verify an IR module.
pub fn verify_module(module: &IrModule) -> VerifyResult {
  IrVerifier::new(module).verify()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{BinaryOp, ConstValue, FunctionBuilder, GlobalData};

  fn module_with(func: FunctionIr) -> IrModule {
    let mut module = IrModule::new("test");
    let id = module.declare_function(&func.name.clone());
    module.define_function(id, func);
    module
  }

  #[test]
  fn accepts_minimal_function() {
    let mut builder = FunctionBuilder::new("main");
    builder.terminate(Terminator::Return);

    assert_eq!(verify_module(&module_with(builder.finish())), Ok(()));
  }

  #[test]
  fn reports_missing_terminator_and_unreachable_block() {
    let mut builder = FunctionBuilder::new("main");
    builder.create_block();
    builder.terminate(Terminator::Return);

    let errors = verify_module(&module_with(builder.finish())).unwrap_err();
    assert_eq!(
      errors,
      vec![
        VerifyError::MissingTerminator {
          function: "main".to_string(),
          block: "BB1".to_string(),
        },
        VerifyError::UnreachableBlock {
          function: "main".to_string(),
          block: "BB1".to_string(),
        },
      ]
    );
  }

  #[test]
  fn rejects_mixed_kind_arithmetic() {
    let mut builder = FunctionBuilder::new("main");
    let dest = builder.alloc_temp(IrType::i32());
    builder.emit(Instr::Binary {
      dest,
      op: BinaryOp::Add,
      left: Operand::Const(ConstValue::Int(1)),
      right: Operand::Const(ConstValue::float(2.0)),
    });
    builder.terminate(Terminator::Return);

    let errors = verify_module(&module_with(builder.finish())).unwrap_err();
    assert!(matches!(
      errors[..],
      [VerifyError::TypeMismatch {
        instruction: "add nsw",
        ..
      }]
    ));
  }

  #[test]
  fn rejects_non_bool_branch() {
    let mut builder = FunctionBuilder::new("main");
    let exit = builder.create_block();
    builder.terminate(Terminator::Branch {
      condition: Operand::Const(ConstValue::Int(1)),
      then_block: exit,
      else_block: exit,
    });
    builder.switch_to_block(exit);
    builder.terminate(Terminator::Return);

    let errors = verify_module(&module_with(builder.finish())).unwrap_err();
    assert!(matches!(errors[..], [VerifyError::NonBoolBranchCondition { .. }]));
  }

  #[test]
  fn rejects_temp_used_before_definition() {
    let mut builder = FunctionBuilder::new("main");
    let slot = builder.alloc_local("x", IrType::i32());
    let late = builder.alloc_temp(IrType::i32());
    builder.emit(Instr::Store {
      ptr: Operand::Local(slot),
      value: Operand::Temp(late),
    });
    builder.emit(Instr::Load {
      dest: late,
      ptr: Operand::Local(slot),
    });
    builder.terminate(Terminator::Return);

    let errors = verify_module(&module_with(builder.finish())).unwrap_err();
    assert!(matches!(errors[..], [VerifyError::TempUsedBeforeDef { .. }]));
  }

  #[test]
  fn rejects_short_global_array_initializer() {
    let mut module = IrModule::new("test");
    module.add_global(GlobalData {
      name: "a".to_string(),
      ty: IrType::Array {
        element: ScalarType::I32,
        len: 3,
      },
      constant: false,
      init: Some(GlobalInit::Array(vec![ConstValue::Int(1)])),
    });

    let errors = verify_module(&module).unwrap_err();
    assert_eq!(
      errors,
      vec![VerifyError::MalformedGlobalInit {
        global: "a".to_string()
      }]
    );
  }

  #[test]
  fn rejects_global_sharing_a_function_name() {
    let mut module = IrModule::new("test");
    module.add_global(GlobalData {
      name: "f".to_string(),
      ty: IrType::i32(),
      constant: false,
      init: None,
    });
    module.declare_function("f");

    assert_eq!(
      verify_module(&module),
      Err(vec![VerifyError::DuplicateSymbol {
        name: "f".to_string()
      }])
    );
  }
}
