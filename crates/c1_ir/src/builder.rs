use c1_type::Store;

use crate::{Block, BlockId, FunctionIr, Instr, IrType, LocalData, LocalId, TempData, TempId, Terminator};

/// Builder for constructing a single function's IR.
///
/// Blocks are labelled `BB0`, `BB1`, ... in creation order; `BB0` is the
/// entry block and is current right after construction.
pub struct FunctionBuilder {
  name: String,

  locals: Store<LocalData>,
  temps: Store<TempData>,
  blocks: Store<Block>,

  /// Currently active block being built.
  current_block: BlockId,
}

impl FunctionBuilder {
  pub fn new(name: &str) -> Self {
    let mut builder = Self {
      name: name.to_string(),
      locals: Store::new(),
      temps: Store::new(),
      blocks: Store::new(),
      current_block: BlockId::new(0),
    };

    let entry = builder.create_block();
    builder.switch_to_block(entry);

    builder
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn create_block(&mut self) -> BlockId {
    let label = format!("BB{}", self.blocks.len());
    self.blocks.alloc(Block::new(label))
  }

  pub fn switch_to_block(
    &mut self,
    block: BlockId,
  ) {
    self.current_block = block;
  }

  pub fn current_block(&self) -> BlockId {
    self.current_block
  }

  pub fn block_count(&self) -> usize {
    self.blocks.len()
  }

  /// Allocate a stack slot of type `ty`.
  pub fn alloc_local(
    &mut self,
    name: &str,
    ty: IrType,
  ) -> LocalId {
    self.locals.alloc(LocalData {
      name: name.to_string(),
      ty,
    })
  }

  pub fn alloc_temp(
    &mut self,
    ty: IrType,
  ) -> TempId {
    self.temps.alloc(TempData { ty })
  }

  pub fn temp_type(
    &self,
    temp: TempId,
  ) -> &IrType {
    &self.temps.get(&temp).ty
  }

  pub fn local_type(
    &self,
    local: LocalId,
  ) -> &IrType {
    &self.locals.get(&local).ty
  }

  /// Emit an instruction to the current block.
  pub fn emit(
    &mut self,
    instr: Instr,
  ) {
    let block = self.blocks.get_mut(&self.current_block);
    block.instructions.push(instr);
  }

  /// Set the terminator for the current block.
  pub fn terminate(
    &mut self,
    term: Terminator,
  ) {
    let block = self.blocks.get_mut(&self.current_block);
    block.terminator = term;
  }

  pub fn is_terminated(&self) -> bool {
    let block = self.blocks.get(&self.current_block);
    !matches!(block.terminator, Terminator::Unreachable)
  }

  /// Finish building and return the completed function.
  pub fn finish(self) -> FunctionIr {
    FunctionIr {
      name: self.name,
      locals: self.locals,
      temps: self.temps,
      blocks: self.blocks,
      entry_block: BlockId::new(0),
      defined: true,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{ConstValue, Operand};

  #[test]
  fn entry_block_is_current_after_new() {
    let builder = FunctionBuilder::new("main");
    assert_eq!(builder.current_block(), BlockId::new(0));
    assert!(!builder.is_terminated());
  }

  #[test]
  fn labels_blocks_in_creation_order() {
    let mut builder = FunctionBuilder::new("main");
    let then_block = builder.create_block();
    let next_block = builder.create_block();

    builder.terminate(Terminator::Branch {
      condition: Operand::Const(ConstValue::Bool(true)),
      then_block,
      else_block: next_block,
    });

    let func = builder.finish();
    let labels: Vec<&str> = func.blocks.get_all().iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["BB0", "BB1", "BB2"]);
    assert!(func.defined);
  }
}
