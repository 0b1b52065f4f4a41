use c1_ast::expressions::{binary::ASTBinaryOperator, unary::UnaryOperator};
use c1_diagnostics::message::DiagnosticMessage;
use c1_ir::ConstValue;
use c1_type::span::Span;

use crate::{CodegenResult, coerce::NumKind};

/// A compile-time value. Integers follow 32-bit two's-complement wrapping
/// semantics, floats follow IEEE-754 double precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Folded {
  Int(i32),
  Float(f64),
}

impl Folded {
  pub fn kind(&self) -> NumKind {
    match self {
      Folded::Int(_) => NumKind::Int,
      Folded::Float(_) => NumKind::Float,
    }
  }

  /// Exact for every `i32`.
  pub fn as_f64(&self) -> f64 {
    match self {
      Folded::Int(value) => *value as f64,
      Folded::Float(value) => *value,
    }
  }

  pub fn to_const_value(&self) -> ConstValue {
    match self {
      Folded::Int(value) => ConstValue::Int(*value),
      Folded::Float(value) => ConstValue::float(*value),
    }
  }
}

pub fn fold_binary(
  operator: ASTBinaryOperator,
  left: Folded,
  right: Folded,
  span: &Span,
) -> CodegenResult<Folded> {
  match (left, right) {
    (Folded::Int(l), Folded::Int(r)) => fold_int(operator, l, r, span).map(Folded::Int),
    _ => {
      if operator == ASTBinaryOperator::Modulo {
        return Err(DiagnosticMessage::ModuloOnFloat(span.clone()));
      }

      let (l, r) = (left.as_f64(), right.as_f64());
      let value = match operator {
        ASTBinaryOperator::Add => l + r,
        ASTBinaryOperator::Subtract => l - r,
        ASTBinaryOperator::Multiply => l * r,
        ASTBinaryOperator::Divide => l / r,
        ASTBinaryOperator::Modulo => unreachable!("float modulo rejected above"),
      };
      Ok(Folded::Float(value))
    },
  }
}

fn fold_int(
  operator: ASTBinaryOperator,
  left: i32,
  right: i32,
  span: &Span,
) -> CodegenResult<i32> {
  match operator {
    ASTBinaryOperator::Add => Ok(left.wrapping_add(right)),
    ASTBinaryOperator::Subtract => Ok(left.wrapping_sub(right)),
    ASTBinaryOperator::Multiply => Ok(left.wrapping_mul(right)),
    ASTBinaryOperator::Divide | ASTBinaryOperator::Modulo if right == 0 => {
      Err(DiagnosticMessage::ConstantDivisionByZero(span.clone()))
    },
    ASTBinaryOperator::Divide => Ok(left.wrapping_div(right)),
    ASTBinaryOperator::Modulo => Ok(left.wrapping_rem(right)),
  }
}

pub fn fold_unary(
  operator: UnaryOperator,
  operand: Folded,
) -> Folded {
  match (operator, operand) {
    (UnaryOperator::Plus, value) => value,
    (UnaryOperator::Negate, Folded::Int(value)) => Folded::Int(value.wrapping_neg()),
    (UnaryOperator::Negate, Folded::Float(value)) => Folded::Float(-value),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fold(
    operator: ASTBinaryOperator,
    left: Folded,
    right: Folded,
  ) -> CodegenResult<Folded> {
    fold_binary(operator, left, right, &Span::default())
  }

  #[test]
  fn folds_integer_arithmetic() {
    assert_eq!(fold(ASTBinaryOperator::Add, Folded::Int(2), Folded::Int(3)), Ok(Folded::Int(5)));
    assert_eq!(fold(ASTBinaryOperator::Divide, Folded::Int(-7), Folded::Int(2)), Ok(Folded::Int(-3)));
    assert_eq!(fold(ASTBinaryOperator::Modulo, Folded::Int(-7), Folded::Int(2)), Ok(Folded::Int(-1)));
  }

  #[test]
  fn integer_overflow_wraps() {
    assert_eq!(
      fold(ASTBinaryOperator::Add, Folded::Int(i32::MAX), Folded::Int(1)),
      Ok(Folded::Int(i32::MIN))
    );
    assert_eq!(
      fold(ASTBinaryOperator::Divide, Folded::Int(i32::MIN), Folded::Int(-1)),
      Ok(Folded::Int(i32::MIN))
    );
    assert_eq!(fold_unary(UnaryOperator::Negate, Folded::Int(i32::MIN)), Folded::Int(i32::MIN));
  }

  #[test]
  fn mixed_operands_widen_to_float() {
    assert_eq!(fold(ASTBinaryOperator::Multiply, Folded::Int(3), Folded::Float(0.5)), Ok(Folded::Float(1.5)));
    assert_eq!(fold(ASTBinaryOperator::Divide, Folded::Float(1.0), Folded::Int(4)), Ok(Folded::Float(0.25)));
  }

  #[test]
  fn modulo_with_float_operand_is_rejected() {
    assert!(matches!(
      fold(ASTBinaryOperator::Modulo, Folded::Int(1), Folded::Float(1.0)),
      Err(DiagnosticMessage::ModuloOnFloat(_))
    ));
  }

  #[test]
  fn integer_division_by_zero_is_rejected() {
    for operator in [ASTBinaryOperator::Divide, ASTBinaryOperator::Modulo] {
      assert!(matches!(
        fold(operator, Folded::Int(1), Folded::Int(0)),
        Err(DiagnosticMessage::ConstantDivisionByZero(_))
      ));
    }
  }

  #[test]
  fn float_division_by_zero_is_infinite() {
    assert_eq!(
      fold(ASTBinaryOperator::Divide, Folded::Float(1.0), Folded::Int(0)),
      Ok(Folded::Float(f64::INFINITY))
    );
  }
}
