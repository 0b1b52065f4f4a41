use c1_type::span::Span;

use crate::NodeId;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ASTBinaryOperator {
  Add,
  Subtract,
  Multiply,
  Divide,
  Modulo,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ASTBinary {
  pub left: NodeId,
  pub right: NodeId,
  pub operator: ASTBinaryOperator,
  pub span: Span,
}

impl ASTBinary {
  pub fn new(
    left: NodeId,
    operator: ASTBinaryOperator,
    right: NodeId,
    span: Span,
  ) -> Self {
    Self {
      left,
      right,
      operator,
      span,
    }
  }
}
