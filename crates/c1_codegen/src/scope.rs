use std::collections::HashMap;

use c1_ir::{GlobalId, LocalId, Operand};
use c1_type::{span::Span, symbol::SymbolId};

use crate::coerce::NumKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
  Global,
  Function,
  Block,
}

/// Where a variable lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
  Global(GlobalId),
  Local(LocalId),
}

impl Storage {
  /// The address of the storage as an operand.
  pub fn operand(&self) -> Operand {
    match self {
      Storage::Global(id) => Operand::Global(*id),
      Storage::Local(id) => Operand::Local(*id),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableBinding {
  pub storage: Storage,
  pub is_constant: bool,
  pub is_array: bool,
  pub kind: NumKind,
  /// Span of the declaring name.
  pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnboundName(pub SymbolId);

#[derive(Debug, Clone)]
struct Scope {
  kind: ScopeKind,
  bindings: HashMap<SymbolId, VariableBinding>,
}

impl Scope {
  fn new(kind: ScopeKind) -> Self {
    Self {
      kind,
      bindings: HashMap::new(),
    }
  }
}

/// Stack of lexical scopes. The global scope sits at the bottom and is never
/// popped.
#[derive(Debug, Clone)]
pub struct ScopeStack {
  scopes: Vec<Scope>,
}

impl Default for ScopeStack {
  fn default() -> Self {
    Self::new()
  }
}

impl ScopeStack {
  pub fn new() -> Self {
    Self {
      scopes: vec![Scope::new(ScopeKind::Global)],
    }
  }

  pub fn enter_scope(
    &mut self,
    kind: ScopeKind,
  ) {
    self.scopes.push(Scope::new(kind));
  }

  pub fn exit_scope(&mut self) {
    if self.scopes.len() > 1 {
      self.scopes.pop();
    }
  }

  pub fn depth(&self) -> usize {
    self.scopes.len()
  }

  pub fn current_kind(&self) -> ScopeKind {
    self.scopes.last().map(|s| s.kind).unwrap_or(ScopeKind::Global)
  }

  /// Binds `name` in the innermost scope. Returns false, leaving the scope
  /// untouched, when the name is already bound there.
  pub fn declare(
    &mut self,
    name: SymbolId,
    binding: VariableBinding,
  ) -> bool {
    let Some(scope) = self.scopes.last_mut() else {
      return false;
    };

    if scope.bindings.contains_key(&name) {
      return false;
    }

    scope.bindings.insert(name, binding);
    true
  }

  /// The binding of `name` in the innermost scope only.
  pub fn lookup_current(
    &self,
    name: &SymbolId,
  ) -> Option<&VariableBinding> {
    self.scopes.last().and_then(|s| s.bindings.get(name))
  }

  /// The binding of `name` in the global scope only.
  pub fn lookup_global(
    &self,
    name: &SymbolId,
  ) -> Option<&VariableBinding> {
    self.scopes.first().and_then(|s| s.bindings.get(name))
  }

  /// Innermost-to-outermost lookup.
  pub fn lookup(
    &self,
    name: &SymbolId,
  ) -> Result<&VariableBinding, UnboundName> {
    self
      .scopes
      .iter()
      .rev()
      .find_map(|s| s.bindings.get(name))
      .ok_or(UnboundName(*name))
  }
}
