use c1_type::span::Span;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ASTLiteralValue {
  Int(i32),
  Float(f64),
}

#[derive(Debug, PartialEq, Clone)]
pub struct ASTLiteral {
  pub value: ASTLiteralValue,
  pub span: Span,
}

impl ASTLiteral {
  pub fn new(
    value: ASTLiteralValue,
    span: Span,
  ) -> Self {
    Self { value, span }
  }
}
