use c1_type::span::Span;

use crate::NodeId;

#[derive(Debug, PartialEq, Clone)]
pub struct ASTBlock {
  pub statements: Vec<NodeId>,
  pub span: Span,
}

impl ASTBlock {
  pub fn new(
    statements: Vec<NodeId>,
    span: Span,
  ) -> Self {
    Self { statements, span }
  }
}
