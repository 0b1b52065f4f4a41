use std::sync::Arc;
use std::{cell::RefCell, rc::Rc};

use colored::*;
use c1_ast::{ASTNode, NodeId, display::format_ast_nodes};
use c1_codegen::{CodegenOutput, generate};
use c1_config::{C1Config, DebugTrace, DumpKind};
use c1_diagnostics::{diagnostic_line, message::DiagnosticMessage};
use c1_ir::{IrModule, VerifyError, display::print_module, verify_module};
use c1_log::{log_dbg, log_info, log_trc, phase_log, phase_ok, phase_warn, trace_dbg};
use c1_parser::{C1Lexer, C1Parser};
use c1_token::token::Token;
use c1_type::{
  Store,
  file::{FileId, SourceMap},
  symbol::SymbolTable,
};

use crate::output::{dump_requested, emit_module, module_name, write_dump_output};

/// Result of compiling one source text without touching the filesystem.
pub struct CompileOutput {
  pub sm: SourceMap,
  /// Present only when no error was reported and the module verified.
  pub module: Option<IrModule>,
  /// Lexer, parser or codegen messages, warnings included.
  pub diagnostics: Vec<DiagnosticMessage>,
  pub verify_errors: Vec<VerifyError>,
}

impl CompileOutput {
  fn failed(
    sm: SourceMap,
    diagnostics: Vec<DiagnosticMessage>,
  ) -> Self {
    Self {
      sm,
      module: None,
      diagnostics,
      verify_errors: Vec::new(),
    }
  }

  pub fn is_ok(&self) -> bool {
    self.module.is_some()
  }

  pub fn codes(&self) -> Vec<String> {
    self.diagnostics.iter().map(|m| m.code()).collect()
  }

  /// One `file:line:col: severity[code]: message` line per diagnostic.
  pub fn diagnostic_lines(&self) -> Vec<String> {
    self
      .diagnostics
      .iter()
      .map(|m| diagnostic_line(&m.report(), &self.sm))
      .collect()
  }

  /// Textual IR of the module, if compilation succeeded.
  pub fn ir_text(&self) -> Option<String> {
    self.module.as_ref().map(print_module)
  }
}

fn lex(
  sm: &SourceMap,
  file_id: FileId,
) -> Result<Vec<Token>, Vec<DiagnosticMessage>> {
  let mut lexer = C1Lexer::new(file_id, sm.get(&file_id).text.as_str());
  lexer.scan_tokens();

  if lexer.diagnostics.is_empty() {
    Ok(lexer.tokens)
  } else {
    Err(lexer.diagnostics)
  }
}

fn lower(
  nodes: &Store<ASTNode>,
  roots: &[NodeId],
  symbols: &Rc<RefCell<SymbolTable>>,
  name: &str,
) -> CodegenOutput {
  let symbols = symbols.borrow();
  generate(nodes, roots, &symbols, name)
}

/// Runs lexer, parser and code generator over `text`. With `verify` the
/// module also has to pass the IR verifier to be returned.
pub fn compile_source(
  file_path: &str,
  text: &str,
  verify: bool,
) -> CompileOutput {
  let mut sm = SourceMap::new();
  let file_id = sm.add_file(file_path, text.to_string());

  let tokens = match lex(&sm, file_id) {
    Ok(tokens) => tokens,
    Err(diagnostics) => return CompileOutput::failed(sm, diagnostics),
  };

  let symbols = Rc::new(RefCell::new(SymbolTable::new()));
  let (nodes, roots) = match C1Parser::new(tokens, symbols.clone()).parse() {
    Ok(parsed) => parsed,
    Err(diagnostics) => return CompileOutput::failed(sm, diagnostics),
  };

  let output = lower(&nodes, &roots, &symbols, &module_name(file_path));
  let valid = output.is_valid();

  let verify_errors = if valid && verify {
    output.verify().err().unwrap_or_default()
  } else {
    Vec::new()
  };

  let CodegenOutput { module, diagnostics } = output;
  let module = (valid && verify_errors.is_empty()).then_some(module);

  CompileOutput {
    sm,
    module,
    diagnostics: diagnostics.into_messages(),
    verify_errors,
  }
}

/// Compile a single file, reporting diagnostics on stderr and writing the
/// requested output.
pub fn compile_file(
  config: Arc<C1Config>,
  file_path: &str,
) -> Result<(), ()> {
  let mut sm = SourceMap::new();

  let text = match std::fs::read_to_string(file_path) {
    Ok(content) => content,
    Err(e) => {
      eprintln!("{} Failed to read file '{}': {}", "Error:".red().bold(), file_path, e);
      return Err(());
    },
  };

  phase_log!(&config, "Scanning... {}", file_path);

  let file_id = sm.add_file(file_path, text);
  let tokens = match lex(&sm, file_id) {
    Ok(tokens) => tokens,
    Err(diagnostics) => {
      render_messages(&diagnostics, &sm);
      return Err(());
    },
  };

  if dump_requested(&config, DumpKind::Lexer) {
    write_dump_output(&config, "dump-lexer.txt", &Token::format_ascii_table(&tokens, &sm))?;
  }

  trace_dbg!(&config, DebugTrace::Lexer, "lexer produced {} tokens", tokens.len());

  phase_log!(&config, "Parsing... {}", file_path);
  log_dbg!(&config, "parsing {}", file_path);

  let symbols = Rc::new(RefCell::new(SymbolTable::new()));
  let (nodes, roots) = match C1Parser::new(tokens, symbols.clone()).parse() {
    Ok(parsed) => parsed,
    Err(diagnostics) => {
      render_messages(&diagnostics, &sm);
      return Err(());
    },
  };

  if dump_requested(&config, DumpKind::Ast) {
    let ast_lisp = format_ast_nodes(&nodes, &symbols.borrow(), &roots);
    write_dump_output(&config, "dump-ast.txt", &ast_lisp)?;
  }

  trace_dbg!(&config, DebugTrace::Parser, "parser produced {} nodes", nodes.len());

  phase_log!(&config, "Generating IR... {}", file_path);

  let name = module_name(file_path);
  let output = lower(&nodes, &roots, &symbols, &name);

  trace_dbg!(
    &config,
    DebugTrace::Codegen,
    "codegen recorded {} diagnostics",
    output.diagnostics.len()
  );

  if !config.quiet {
    c1_diagnostics::render_batch(&output.diagnostics.reports(), &sm);
  }

  if !output.is_valid() {
    return Err(());
  }

  let module = output.module;

  for (_, function) in module.functions.iter() {
    log_trc!(
      &config,
      "function '{}': {} blocks, {} locals",
      function.name,
      function.blocks.len(),
      function.locals.len()
    );
  }

  if dump_requested(&config, DumpKind::Ir) {
    write_dump_output(&config, "dump-ir.ll", &print_module(&module))?;
  }

  let build_config = config.build_config.as_ref();
  let verify = build_config.map(|bc| bc.verify).unwrap_or(true);

  if verify {
    phase_log!(&config, "Verifying IR... {}", name);

    if let Err(errors) = verify_module(&module) {
      trace_dbg!(&config, DebugTrace::Verify, "verifier found {} problems", errors.len());
      for error in &errors {
        eprintln!("{} {}", "Error:".red().bold(), error);
      }
      return Err(());
    }
  } else {
    phase_warn!(&config, "IR verification skipped");
  }

  log_info!(
    &config,
    "module '{}': {} functions, {} globals",
    module.name,
    module.functions.len(),
    module.globals.len()
  );

  if build_config.map(|bc| bc.check_mode).unwrap_or(false) {
    phase_ok!(&config, "Check passed: {}", file_path);
    return Ok(());
  }

  let emit = build_config.map(|bc| bc.emit).unwrap_or_default();
  let output_dir = build_config.map(|bc| bc.output_dir.as_str()).unwrap_or("build");

  match emit_module(&module, emit, output_dir)? {
    Some(path) => phase_ok!(&config, "Wrote {}", path.display()),
    None => phase_ok!(&config, "Compiled {}", file_path),
  }

  Ok(())
}

fn render_messages(
  messages: &[DiagnosticMessage],
  sm: &SourceMap,
) {
  for message in messages {
    c1_diagnostics::render(&message.report(), sm);
  }
}
