use crate::{BytePosition, file::FileId};

/// Half-open byte range `[start, end)` inside one source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Span {
  pub start: BytePosition,
  pub end: BytePosition,
  pub file: FileId,
}

impl Span {
  pub fn new(
    file: FileId,
    start: BytePosition,
    end: BytePosition,
  ) -> Self {
    debug_assert!(start <= end, "inverted span {}..{}", start, end);
    Self { file, start, end }
  }

  /// Smallest span covering both operands, e.g. a binary expression from its
  /// left operand to its right one.
  pub fn merge(
    a: &Self,
    b: &Self,
  ) -> Self {
    debug_assert_eq!(a.file, b.file, "spans of an expression come from one file");
    Self {
      file: a.file,
      start: a.start.min(b.start),
      end: a.end.max(b.end),
    }
  }
}

impl std::fmt::Display for Span {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>,
  ) -> std::fmt::Result {
    write!(f, "{}..{}", self.start, self.end)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn merge_covers_both_operands_in_any_order() {
    let file = FileId::new(0);
    let left = Span::new(file, BytePosition(4), BytePosition(5));
    let right = Span::new(file, BytePosition(8), BytePosition(11));

    assert_eq!(Span::merge(&left, &right), Span::new(file, BytePosition(4), BytePosition(11)));
    assert_eq!(Span::merge(&right, &left).to_string(), "4..11");
  }
}
