use c1_type::Store;
use serde::Serialize;

use crate::{Block, BlockId, ConstValue, FunctionId, GlobalId, IrType, LocalId, TempId};

/// A compilation unit: module-level variables and functions.
#[derive(Debug, Clone, Serialize)]
pub struct IrModule {
  pub name: String,
  pub globals: Store<GlobalData>,
  pub functions: Store<FunctionIr>,
}

impl IrModule {
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      globals: Store::new(),
      functions: Store::new(),
    }
  }

  pub fn add_global(
    &mut self,
    data: GlobalData,
  ) -> GlobalId {
    self.globals.alloc(data)
  }

  /// Register a function without a body. It prints as a `declare` until
  /// [`IrModule::define_function`] installs the body.
  pub fn declare_function(
    &mut self,
    name: &str,
  ) -> FunctionId {
    self.functions.alloc(FunctionIr::declaration(name))
  }

  pub fn define_function(
    &mut self,
    id: FunctionId,
    function: FunctionIr,
  ) {
    *self.functions.get_mut(&id) = function;
  }

  pub fn global_type(
    &self,
    id: GlobalId,
  ) -> &IrType {
    &self.globals.get(&id).ty
  }

  pub fn function_by_name(
    &self,
    name: &str,
  ) -> Option<FunctionId> {
    self.functions.iter().find(|(_, f)| f.name == name).map(|(id, _)| id)
  }

  pub fn global_by_name(
    &self,
    name: &str,
  ) -> Option<GlobalId> {
    self.globals.iter().find(|(_, g)| g.name == name).map(|(id, _)| id)
  }

  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string_pretty(self)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalData {
  pub name: String,
  pub ty: IrType,
  /// Emitted as `constant` instead of `global`.
  pub constant: bool,
  /// `None` prints as `undef`.
  pub init: Option<GlobalInit>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GlobalInit {
  Scalar(ConstValue),
  Array(Vec<ConstValue>),
}

/// A single function in IR form.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionIr {
  pub name: String,
  /// Stack slots, all allocated in the entry block.
  pub locals: Store<LocalData>,
  pub temps: Store<TempData>,
  pub blocks: Store<Block>,
  pub entry_block: BlockId,
  /// False for a declaration without a body.
  pub defined: bool,
}

impl FunctionIr {
  pub fn declaration(name: &str) -> Self {
    Self {
      name: name.to_string(),
      locals: Store::new(),
      temps: Store::new(),
      blocks: Store::new(),
      entry_block: BlockId::new(0),
      defined: false,
    }
  }

  pub fn local_type(
    &self,
    local: LocalId,
  ) -> &IrType {
    &self.locals.get(&local).ty
  }

  pub fn temp_type(
    &self,
    temp: TempId,
  ) -> &IrType {
    &self.temps.get(&temp).ty
  }
}

/// A stack slot. `ty` is the allocated type, not the pointer to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalData {
  pub name: String,
  pub ty: IrType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TempData {
  pub ty: IrType,
}
