use serde::Serialize;

use crate::{FunctionId, Operand, TempId};

/// Two-operand arithmetic. Integer forms are signed and `nsw` where that
/// applies; float forms are IEEE double.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  SDiv,
  SRem,
  FAdd,
  FSub,
  FMul,
  FDiv,
}

impl BinaryOp {
  pub fn is_float(&self) -> bool {
    matches!(self, BinaryOp::FAdd | BinaryOp::FSub | BinaryOp::FMul | BinaryOp::FDiv)
  }

  pub fn mnemonic(&self) -> &'static str {
    match self {
      BinaryOp::Add => "add nsw",
      BinaryOp::Sub => "sub nsw",
      BinaryOp::Mul => "mul nsw",
      BinaryOp::SDiv => "sdiv",
      BinaryOp::SRem => "srem",
      BinaryOp::FAdd => "fadd",
      BinaryOp::FSub => "fsub",
      BinaryOp::FMul => "fmul",
      BinaryOp::FDiv => "fdiv",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnaryOp {
  /// Integer negation, printed as `sub nsw 0, x`.
  Neg,
  FNeg,
}

/// Signed integer (`icmp`) and ordered float (`fcmp`) predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparePredicate {
  Eq,
  Ne,
  Sgt,
  Sge,
  Slt,
  Sle,
  Oeq,
  One,
  Ogt,
  Oge,
  Olt,
  Ole,
}

impl ComparePredicate {
  pub fn is_float(&self) -> bool {
    matches!(
      self,
      ComparePredicate::Oeq
        | ComparePredicate::One
        | ComparePredicate::Ogt
        | ComparePredicate::Oge
        | ComparePredicate::Olt
        | ComparePredicate::Ole
    )
  }

  pub fn mnemonic(&self) -> &'static str {
    match self {
      ComparePredicate::Eq => "eq",
      ComparePredicate::Ne => "ne",
      ComparePredicate::Sgt => "sgt",
      ComparePredicate::Sge => "sge",
      ComparePredicate::Slt => "slt",
      ComparePredicate::Sle => "sle",
      ComparePredicate::Oeq => "oeq",
      ComparePredicate::One => "one",
      ComparePredicate::Ogt => "ogt",
      ComparePredicate::Oge => "oge",
      ComparePredicate::Olt => "olt",
      ComparePredicate::Ole => "ole",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CastOp {
  SiToFp,
  /// Truncates toward zero.
  FpToSi,
}

impl CastOp {
  pub fn mnemonic(&self) -> &'static str {
    match self {
      CastOp::SiToFp => "sitofp",
      CastOp::FpToSi => "fptosi",
    }
  }
}

/// A single IR instruction. Every value-producing form writes one fresh temp.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "instr", rename_all = "snake_case")]
pub enum Instr {
  /// `dest = *ptr`
  Load { dest: TempId, ptr: Operand },

  /// `*ptr = value`
  Store { ptr: Operand, value: Operand },

  /// Address of element `index` of the array behind `base`.
  /// `dest = &base[0][index]`
  ElementPtr {
    dest: TempId,
    base: Operand,
    index: Operand,
  },

  /// `dest = left op right`
  Binary {
    dest: TempId,
    op: BinaryOp,
    left: Operand,
    right: Operand,
  },

  /// `dest = op operand`
  Unary {
    dest: TempId,
    op: UnaryOp,
    operand: Operand,
  },

  /// `dest = left pred right`, an `i1`.
  Compare {
    dest: TempId,
    predicate: ComparePredicate,
    left: Operand,
    right: Operand,
  },

  /// `dest = op source`
  Cast {
    dest: TempId,
    op: CastOp,
    source: Operand,
  },

  /// Call of a zero-argument void function.
  Call { callee: FunctionId },
}

impl Instr {
  pub fn dest(&self) -> Option<TempId> {
    match self {
      Instr::Load { dest, .. }
      | Instr::ElementPtr { dest, .. }
      | Instr::Binary { dest, .. }
      | Instr::Unary { dest, .. }
      | Instr::Compare { dest, .. }
      | Instr::Cast { dest, .. } => Some(*dest),
      Instr::Store { .. } | Instr::Call { .. } => None,
    }
  }
}
