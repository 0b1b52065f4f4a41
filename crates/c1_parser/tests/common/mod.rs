#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use c1_ast::display::format_ast_nodes;
use c1_diagnostics::message::DiagnosticMessage;
use c1_parser::{C1Lexer, C1Parser};
use c1_type::{file::SourceMap, symbol::SymbolTable};

/// Lex and parse `src`, returning the Lisp dump of the AST.
pub fn dump_ast(src: &str) -> String {
  let mut sm = SourceMap::new();
  let file_id = sm.add_file("test.c1", src.to_string());

  let mut lexer = C1Lexer::new(file_id, sm.get(&file_id).text.as_str());
  lexer.scan_tokens();
  assert!(lexer.diagnostics.is_empty(), "Lexer errors: {:?}", lexer.diagnostics);

  let symbols = Rc::new(RefCell::new(SymbolTable::new()));
  let mut parser = C1Parser::new(lexer.tokens, symbols.clone());
  let (nodes, roots) = parser.parse().expect("Parse failed");

  let symbols = symbols.borrow();
  format_ast_nodes(&nodes, &symbols, &roots)
}

/// Lex and parse `src`, returning every lexer and parser diagnostic.
pub fn parse_errors(src: &str) -> Vec<DiagnosticMessage> {
  let mut sm = SourceMap::new();
  let file_id = sm.add_file("test.c1", src.to_string());

  let mut lexer = C1Lexer::new(file_id, sm.get(&file_id).text.as_str());
  lexer.scan_tokens();
  let mut errors = lexer.diagnostics.clone();

  let symbols = Rc::new(RefCell::new(SymbolTable::new()));
  let mut parser = C1Parser::new(lexer.tokens, symbols);
  if let Err(diagnostics) = parser.parse() {
    errors.extend(diagnostics);
  }

  errors
}

pub fn codes(errors: &[DiagnosticMessage]) -> Vec<String> {
  errors.iter().map(|e| e.code()).collect()
}
