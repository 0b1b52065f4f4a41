use c1_type::{span::Span, symbol::SymbolId};

#[derive(Debug, PartialEq, Clone)]
pub struct ASTCall {
  pub name: SymbolId,
  pub span: Span,
}

impl ASTCall {
  pub fn new(
    name: SymbolId,
    span: Span,
  ) -> Self {
    Self { name, span }
  }
}
