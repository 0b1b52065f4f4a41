use c1_type::{span::Span, symbol::SymbolId};

use crate::NodeId;

/// A named storage reference, optionally indexed: `x` or `x[i]`.
#[derive(Debug, PartialEq, Clone)]
pub struct ASTLValue {
  pub name: SymbolId,
  pub index: Option<NodeId>,
  pub span: Span,
}

impl ASTLValue {
  pub fn new(
    name: SymbolId,
    index: Option<NodeId>,
    span: Span,
  ) -> Self {
    Self { name, index, span }
  }
}
