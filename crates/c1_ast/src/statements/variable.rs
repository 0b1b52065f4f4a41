use c1_type::{span::Span, symbol::SymbolId};

use crate::NodeId;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ASTBaseType {
  Int,
  Float,
}

/// One declarator of a variable definition.
///
/// `array_length` is `Some` for arrays; `int a[] = {..}` gets a synthesized
/// length literal from the parser. A scalar has at most one initializer.
#[derive(Debug, PartialEq, Clone)]
pub struct ASTVariable {
  pub name: SymbolId,
  pub name_span: Span,
  pub base_type: ASTBaseType,
  pub is_constant: bool,
  pub array_length: Option<NodeId>,
  pub initializers: Vec<NodeId>,
  pub span: Span,
}

impl ASTVariable {
  pub fn new(
    name: SymbolId,
    name_span: Span,
    base_type: ASTBaseType,
    is_constant: bool,
    array_length: Option<NodeId>,
    initializers: Vec<NodeId>,
    span: Span,
  ) -> Self {
    Self {
      name,
      name_span,
      base_type,
      is_constant,
      array_length,
      initializers,
      span,
    }
  }

  pub fn is_array(&self) -> bool {
    self.array_length.is_some()
  }
}
