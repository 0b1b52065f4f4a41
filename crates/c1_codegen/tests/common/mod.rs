#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use c1_codegen::{CodegenOutput, generate};
use c1_ir::{FunctionIr, display::print_module};
use c1_parser::{C1Lexer, C1Parser};
use c1_type::{file::SourceMap, symbol::SymbolTable};

pub struct Generated {
  pub output: CodegenOutput,
  pub sm: SourceMap,
}

impl Generated {
  pub fn codes(&self) -> Vec<String> {
    self.output.diagnostics.messages().iter().map(|m| m.code()).collect()
  }

  pub fn function(
    &self,
    name: &str,
  ) -> &FunctionIr {
    let id = self
      .output
      .module
      .function_by_name(name)
      .unwrap_or_else(|| panic!("no function named '{}'", name));
    self.output.module.functions.get(&id)
  }
}

/// Lex, parse and lower `src`. The front end must accept the input.
pub fn generate_src(src: &str) -> Generated {
  let mut sm = SourceMap::new();
  let file_id = sm.add_file("test.c1", src.to_string());

  let mut lexer = C1Lexer::new(file_id, sm.get(&file_id).text.as_str());
  lexer.scan_tokens();
  assert!(lexer.diagnostics.is_empty(), "Lexer errors: {:?}", lexer.diagnostics);

  let symbols = Rc::new(RefCell::new(SymbolTable::new()));
  let mut parser = C1Parser::new(lexer.tokens, symbols.clone());
  let (nodes, roots) = parser.parse().expect("Parse failed");

  let symbols = symbols.borrow();
  let output = generate(&nodes, &roots, &symbols, "test");

  Generated { output, sm }
}

/// Textual IR of `src`, which must lower cleanly into a well-formed module.
pub fn format_ir(src: &str) -> String {
  let generated = generate_src(src);
  assert!(
    generated.output.diagnostics.is_empty(),
    "Unexpected diagnostics: {:?}",
    generated.output.diagnostics.messages()
  );
  assert_verifies(&generated);

  print_module(&generated.output.module)
}

pub fn assert_verifies(generated: &Generated) {
  if let Err(errors) = generated.output.verify() {
    let lines: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    panic!("IR verification failed:\n{}", lines.join("\n"));
  }
}

/// Error codes reported for `src`, in order.
pub fn codes(src: &str) -> Vec<String> {
  generate_src(src).codes()
}

pub fn assert_diagnostic_at_line(
  src: &str,
  code: &str,
  line: u32,
) {
  let generated = generate_src(src);
  let located = generated.output.diagnostics.located(&generated.sm);

  let found = generated
    .output
    .diagnostics
    .messages()
    .iter()
    .zip(located.iter())
    .any(|(message, (l, _, _))| message.code() == code && *l == line);

  assert!(
    found,
    "Expected {} at line {}, got: {:?}",
    code,
    line,
    generated
      .output
      .diagnostics
      .messages()
      .iter()
      .zip(located.iter())
      .map(|(m, (l, c, text))| format!("{}@{}:{} {}", m.code(), l, c, text))
      .collect::<Vec<_>>()
  );
}
