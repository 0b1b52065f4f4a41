pub mod binary;
pub mod condition;
pub mod literal;
pub mod lvalue;
pub mod unary;

use c1_type::span::Span;

use binary::ASTBinary;
use condition::ASTCondition;
use literal::ASTLiteral;
use lvalue::ASTLValue;
use unary::ASTUnary;

#[derive(Debug, PartialEq, Clone)]
pub enum ASTExpression {
  Literal(ASTLiteral),
  Binary(ASTBinary),
  Unary(ASTUnary),
  LValue(ASTLValue),
  /// Relational test. Only appears as the predicate of `if` and `while`.
  Condition(ASTCondition),
}

impl ASTExpression {
  pub fn span(&self) -> &Span {
    match self {
      ASTExpression::Literal(lit) => &lit.span,
      ASTExpression::Binary(bin) => &bin.span,
      ASTExpression::Unary(un) => &un.span,
      ASTExpression::LValue(lval) => &lval.span,
      ASTExpression::Condition(cond) => &cond.span,
    }
  }
}
