use c1_type::span::Span;

use crate::NodeId;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum UnaryOperator {
  Plus,
  Negate,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ASTUnary {
  pub operator: UnaryOperator,
  pub operand: NodeId,
  pub span: Span,
}

impl ASTUnary {
  pub fn new(
    operator: UnaryOperator,
    operand: NodeId,
    span: Span,
  ) -> Self {
    Self { operator, operand, span }
  }
}
