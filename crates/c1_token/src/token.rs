use ascii_table::AsciiTable;
use c1_type::{file::SourceMap, span::Span};

use crate::token_types::TokenType;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
  pub type_: TokenType,
  pub lexeme: String,
  pub span: Span,
}

impl Default for Token {
  fn default() -> Self {
    Self {
      type_: TokenType::Eof,
      lexeme: String::new(),
      span: Span::default(),
    }
  }
}

impl Token {
  pub fn new(
    type_: TokenType,
    lexeme: String,
    span: Span,
  ) -> Self {
    Self { type_, lexeme, span }
  }

  fn to_ascii_table_row(
    &self,
    sm: &SourceMap,
  ) -> Vec<String> {
    let lexeme = self.lexeme.replace('\n', "\\n").replace('\r', "\\r").replace('\t', "\\t");
    let (line, column) = sm.line_col(&self.span.file, self.span.start);

    vec![format!("{:?}", self.type_), lexeme, line.to_string(), column.to_string()]
  }

  /// Renders the token stream as an ASCII table for `--dump lexer`.
  pub fn format_ascii_table(
    tokens: &[Token],
    sm: &SourceMap,
  ) -> String {
    let mut ascii_table = AsciiTable::default();
    ascii_table.column(0).set_header("Type");
    ascii_table.column(1).set_header("Lexeme");
    ascii_table.column(2).set_header("Line");
    ascii_table.column(3).set_header("Column");

    let rows: Vec<Vec<String>> = tokens.iter().map(|t| t.to_ascii_table_row(sm)).collect();
    ascii_table.format(rows)
  }
}

impl std::fmt::Display for Token {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>,
  ) -> std::fmt::Result {
    write!(f, "(token type: {:?} lexeme: {} span: {})", self.type_, self.lexeme, self.span)
  }
}
