use c1_type::span::Span;

use crate::NodeId;

#[derive(Debug, PartialEq, Clone)]
pub struct ASTAssignment {
  /// Always an `ASTExpression::LValue` node.
  pub target: NodeId,
  pub value: NodeId,
  pub span: Span,
}

impl ASTAssignment {
  pub fn new(
    target: NodeId,
    value: NodeId,
    span: Span,
  ) -> Self {
    Self { target, value, span }
  }
}
