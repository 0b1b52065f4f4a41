use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::{GlobalId, LocalId, ScalarType, TempId};

/// A value an instruction can consume.
///
/// `Local` and `Global` denote the address of the slot, so their type is a
/// pointer to the slot's type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Operand {
  Temp(TempId),
  Local(LocalId),
  Global(GlobalId),
  Const(ConstValue),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ConstValue {
  Int(i32),
  Float(OrderedFloat<f64>),
  Bool(bool),
}

impl ConstValue {
  pub fn float(value: f64) -> Self {
    ConstValue::Float(OrderedFloat(value))
  }

  pub fn scalar_type(&self) -> ScalarType {
    match self {
      ConstValue::Int(_) => ScalarType::I32,
      ConstValue::Float(_) => ScalarType::F64,
      ConstValue::Bool(_) => ScalarType::I1,
    }
  }

  /// The all-zero value of `ty`.
  pub fn zero(ty: ScalarType) -> Self {
    match ty {
      ScalarType::I1 => ConstValue::Bool(false),
      ScalarType::I32 => ConstValue::Int(0),
      ScalarType::F64 => ConstValue::float(0.0),
    }
  }
}
