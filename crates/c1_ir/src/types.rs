use std::fmt;

use serde::Serialize;

/// First-class value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
  I1,
  I32,
  F64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IrType {
  Void,
  Scalar(ScalarType),
  Array { element: ScalarType, len: u32 },
  Pointer(Box<IrType>),
}

impl IrType {
  pub fn i1() -> Self {
    IrType::Scalar(ScalarType::I1)
  }

  pub fn i32() -> Self {
    IrType::Scalar(ScalarType::I32)
  }

  pub fn f64() -> Self {
    IrType::Scalar(ScalarType::F64)
  }

  pub fn pointer_to(pointee: IrType) -> Self {
    IrType::Pointer(Box::new(pointee))
  }

  pub fn pointee(&self) -> Option<&IrType> {
    match self {
      IrType::Pointer(inner) => Some(inner),
      _ => None,
    }
  }

  pub fn as_scalar(&self) -> Option<ScalarType> {
    match self {
      IrType::Scalar(scalar) => Some(*scalar),
      _ => None,
    }
  }
}

impl fmt::Display for ScalarType {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      ScalarType::I1 => write!(f, "i1"),
      ScalarType::I32 => write!(f, "i32"),
      ScalarType::F64 => write!(f, "double"),
    }
  }
}

impl fmt::Display for IrType {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      IrType::Void => write!(f, "void"),
      IrType::Scalar(scalar) => write!(f, "{}", scalar),
      IrType::Array { element, len } => write!(f, "[{} x {}]", len, element),
      IrType::Pointer(inner) => write!(f, "{}*", inner),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn prints_llvm_type_syntax() {
    let array = IrType::Array {
      element: ScalarType::F64,
      len: 4,
    };

    assert_eq!(IrType::i1().to_string(), "i1");
    assert_eq!(array.to_string(), "[4 x double]");
    assert_eq!(IrType::pointer_to(array).to_string(), "[4 x double]*");
  }
}
