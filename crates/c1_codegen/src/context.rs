use c1_ir::Operand;

use crate::{coerce::NumKind, const_eval::Folded};

/// How an l-value is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
  /// Load the stored value.
  Read,
  /// Produce the storage address, for assignment targets.
  Address,
}

/// Generation context handed down to every visit by value, so a child can
/// never leak a changed flag into its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenContext {
  pub in_global_scope: bool,
  /// Everything must fold at compile time; no IR may be emitted.
  pub constant: bool,
  pub access: Access,
}

impl GenContext {
  pub fn global() -> Self {
    Self {
      in_global_scope: true,
      constant: false,
      access: Access::Read,
    }
  }

  pub fn local() -> Self {
    Self {
      in_global_scope: false,
      constant: false,
      access: Access::Read,
    }
  }

  pub fn with_constant(self) -> Self {
    Self { constant: true, ..self }
  }

  /// Runtime r-value evaluation.
  pub fn read(self) -> Self {
    Self {
      constant: false,
      access: Access::Read,
      ..self
    }
  }

  pub fn address(self) -> Self {
    Self {
      constant: false,
      access: Access::Address,
      ..self
    }
  }
}

/// Result of visiting an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluated {
  /// A value (or, in address mode, a pointer) available at run time.
  Runtime { operand: Operand, kind: NumKind },
  Folded(Folded),
}

impl Evaluated {
  pub fn kind(&self) -> NumKind {
    match self {
      Evaluated::Runtime { kind, .. } => *kind,
      Evaluated::Folded(folded) => folded.kind(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn derived_contexts_keep_scope() {
    let ctx = GenContext::global().with_constant();
    assert!(ctx.constant);
    assert!(ctx.in_global_scope);

    let read = ctx.read();
    assert!(!read.constant);
    assert!(read.in_global_scope);

    let address = GenContext::local().address();
    assert_eq!(address.access, Access::Address);
    assert_eq!(address.read().access, Access::Read);
  }
}
