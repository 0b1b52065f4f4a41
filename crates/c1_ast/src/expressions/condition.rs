use c1_type::span::Span;

use crate::NodeId;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ASTRelationalOperator {
  Equal,
  NotEqual,
  Greater,
  GreaterEqual,
  Less,
  LessEqual,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ASTCondition {
  pub left: NodeId,
  pub operator: ASTRelationalOperator,
  pub right: NodeId,
  pub span: Span,
}

impl ASTCondition {
  pub fn new(
    left: NodeId,
    operator: ASTRelationalOperator,
    right: NodeId,
    span: Span,
  ) -> Self {
    Self {
      left,
      operator,
      right,
      span,
    }
  }
}
