use c1_type::{span::Span, symbol::SymbolId};

use crate::NodeId;

/// `void name() { ... }`. C1 functions take no parameters and return nothing.
#[derive(Debug, PartialEq, Clone)]
pub struct ASTFunction {
  pub name: SymbolId,
  pub name_span: Span,
  pub body: NodeId,
  pub span: Span,
}

impl ASTFunction {
  pub fn new(
    name: SymbolId,
    name_span: Span,
    body: NodeId,
    span: Span,
  ) -> Self {
    Self {
      name,
      name_span,
      body,
      span,
    }
  }
}
