mod coerce;
mod const_eval;
mod context;
mod decl;
mod expr;
mod scope;
mod stmt;

use std::collections::HashMap;

use c1_ast::{ASTNode, NodeId};
use c1_diagnostics::{collector::DiagnosticCollector, message::DiagnosticMessage};
use c1_ir::{FunctionBuilder, FunctionId, IrModule, VerifyResult, verify_module};
use c1_type::{
  Store,
  span::Span,
  symbol::{SymbolId, SymbolTable},
};

pub use coerce::{NumKind, convert_const, unify};
pub use const_eval::{Folded, fold_binary, fold_unary};
pub use context::{Access, Evaluated, GenContext};
pub use scope::{ScopeKind, ScopeStack, Storage, UnboundName, VariableBinding};

pub type CodegenResult<T> = Result<T, DiagnosticMessage>;

/// A zero-argument void function known to the module.
#[derive(Debug, Clone)]
pub struct FunctionRecord {
  pub name: String,
  pub id: FunctionId,
  pub span: Span,
}

/// Single-pass AST to IR lowering.
///
/// Errors are recorded and generation carries on with the next statement
/// or declaration. The produced module must be discarded unless
/// [`CodegenOutput::is_valid`] holds.
pub struct CodeGenerator<'a> {
  nodes: &'a Store<ASTNode>,
  symbols: &'a SymbolTable,
  module: IrModule,
  scopes: ScopeStack,
  functions: HashMap<SymbolId, FunctionRecord>,
  /// Function currently being lowered.
  builder: Option<FunctionBuilder>,
  diagnostics: DiagnosticCollector,
}

pub struct CodegenOutput {
  pub module: IrModule,
  pub diagnostics: DiagnosticCollector,
}

impl CodegenOutput {
  pub fn is_valid(&self) -> bool {
    self.diagnostics.is_valid()
  }

  /// Structural checks over the produced module.
  pub fn verify(&self) -> VerifyResult {
    verify_module(&self.module)
  }
}

impl<'a> CodeGenerator<'a> {
  pub fn new(
    nodes: &'a Store<ASTNode>,
    symbols: &'a SymbolTable,
    module_name: &str,
  ) -> Self {
    Self {
      nodes,
      symbols,
      module: IrModule::new(module_name),
      scopes: ScopeStack::new(),
      functions: HashMap::new(),
      builder: None,
      diagnostics: DiagnosticCollector::new(),
    }
  }

  pub fn generate(
    mut self,
    roots: &[NodeId],
  ) -> CodegenOutput {
    let ctx = GenContext::global();

    for root in roots {
      self.record(|this| this.visit_statement(root, ctx));
    }

    CodegenOutput {
      module: self.module,
      diagnostics: self.diagnostics,
    }
  }

  /// Runs one statement-level step and keeps its error, if any.
  fn record<F>(
    &mut self,
    step: F,
  ) where
    F: FnOnce(&mut Self) -> CodegenResult<()>,
  {
    if let Err(diagnostic) = step(self) {
      self.diagnostics.push(diagnostic);
    }
  }

  fn builder(&mut self) -> &mut FunctionBuilder {
    match self.builder.as_mut() {
      Some(builder) => builder,
      None => unreachable!("runtime code requested outside of a function body"),
    }
  }

  fn name(
    &self,
    symbol: SymbolId,
  ) -> String {
    self.symbols.get(&symbol).to_string()
  }

  fn span_of(
    &self,
    node: &NodeId,
  ) -> Span {
    self.nodes.get(node).span().clone()
  }
}

/// Lowers a parsed compilation unit into an IR module named `module_name`.
pub fn generate(
  nodes: &Store<ASTNode>,
  roots: &[NodeId],
  symbols: &SymbolTable,
  module_name: &str,
) -> CodegenOutput {
  CodeGenerator::new(nodes, symbols, module_name).generate(roots)
}
