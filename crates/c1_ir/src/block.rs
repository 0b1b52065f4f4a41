use serde::Serialize;

use crate::{BlockId, Instr, Operand};

/// A basic block: a sequence of instructions ending with a terminator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
  /// `BB{n}`, unique within the function.
  pub label: String,
  pub instructions: Vec<Instr>,
  pub terminator: Terminator,
}

impl Block {
  pub fn new(label: String) -> Self {
    Self {
      label,
      instructions: Vec::new(),
      terminator: Terminator::Unreachable,
    }
  }
}

/// How control exits a basic block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Terminator {
  Goto { target: BlockId },

  Branch {
    condition: Operand,
    then_block: BlockId,
    else_block: BlockId,
  },

  /// `ret void`
  Return,

  /// Not yet terminated.
  Unreachable,
}

impl Terminator {
  pub fn successors(&self) -> Vec<BlockId> {
    match self {
      Terminator::Goto { target } => vec![*target],
      Terminator::Branch {
        then_block, else_block, ..
      } => vec![*then_block, *else_block],
      Terminator::Return | Terminator::Unreachable => vec![],
    }
  }
}
