use c1_ast::statements::variable::ASTBaseType;
use c1_ir::{CastOp, ConstValue, Instr, IrType, Operand, ScalarType};

use crate::{CodeGenerator, const_eval::Folded};

/// Integer-or-floating classification of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumKind {
  Int,
  Float,
}

impl NumKind {
  pub fn scalar(&self) -> ScalarType {
    match self {
      NumKind::Int => ScalarType::I32,
      NumKind::Float => ScalarType::F64,
    }
  }

  pub fn ir_type(&self) -> IrType {
    IrType::Scalar(self.scalar())
  }
}

impl From<ASTBaseType> for NumKind {
  fn from(base: ASTBaseType) -> Self {
    match base {
      ASTBaseType::Int => NumKind::Int,
      ASTBaseType::Float => NumKind::Float,
    }
  }
}

/// Kind of a binary or relational combination.
pub fn unify(
  left: NumKind,
  right: NumKind,
) -> NumKind {
  if left == NumKind::Float || right == NumKind::Float {
    NumKind::Float
  } else {
    NumKind::Int
  }
}

/// Converts a folded constant to `target`. The flag is set when a float did
/// not survive the trip to `i32` unchanged.
pub fn convert_const(
  value: Folded,
  target: NumKind,
) -> (Folded, bool) {
  match (value, target) {
    (Folded::Int(v), NumKind::Float) => (Folded::Float(v as f64), false),
    (Folded::Float(v), NumKind::Int) => {
      // `as` truncates toward zero and saturates, NaN becomes 0.
      let truncated = v as i32;
      (Folded::Int(truncated), truncated as f64 != v)
    },
    (value, _) => (value, false),
  }
}

impl<'a> CodeGenerator<'a> {
  /// Converts a runtime value of kind `from` into `to`. Immediate operands
  /// are converted in place, everything else gets one cast instruction.
  pub(crate) fn coerce(
    &mut self,
    operand: Operand,
    from: NumKind,
    to: NumKind,
  ) -> Operand {
    if from == to {
      return operand;
    }

    match operand {
      Operand::Const(ConstValue::Int(v)) => {
        let (folded, _) = convert_const(Folded::Int(v), to);
        Operand::Const(folded.to_const_value())
      },
      Operand::Const(ConstValue::Float(v)) => {
        let (folded, _) = convert_const(Folded::Float(v.into_inner()), to);
        Operand::Const(folded.to_const_value())
      },
      source => {
        let op = match to {
          NumKind::Float => CastOp::SiToFp,
          NumKind::Int => CastOp::FpToSi,
        };

        let builder = self.builder();
        let dest = builder.alloc_temp(to.ir_type());
        builder.emit(Instr::Cast { dest, op, source });
        Operand::Temp(dest)
      },
    }
  }
}
