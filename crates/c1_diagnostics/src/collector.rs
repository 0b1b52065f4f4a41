use c1_type::file::SourceMap;

use crate::diagnostic_report::{Diagnostic, Severity};
use crate::message::{DiagnosticMessage, ErrorKind};

/// Sink for the diagnostics of one compilation pass.
///
/// Recording never aborts the pass. Once any error-level message has been
/// pushed, `is_valid()` reports false and the pass output must be discarded.
#[derive(Debug, Default, Clone)]
pub struct DiagnosticCollector {
  messages: Vec<DiagnosticMessage>,
}

impl DiagnosticCollector {
  pub fn new() -> Self {
    Self { messages: Vec::new() }
  }

  pub fn push(
    &mut self,
    message: DiagnosticMessage,
  ) {
    self.messages.push(message);
  }

  pub fn is_valid(&self) -> bool {
    !self.messages.iter().any(|m| m.level() == Severity::Error)
  }

  pub fn len(&self) -> usize {
    self.messages.len()
  }

  pub fn is_empty(&self) -> bool {
    self.messages.is_empty()
  }

  pub fn messages(&self) -> &[DiagnosticMessage] {
    &self.messages
  }

  pub fn kinds(&self) -> Vec<ErrorKind> {
    self.messages.iter().map(|m| m.kind()).collect()
  }

  pub fn reports(&self) -> Vec<Diagnostic> {
    self.messages.iter().map(|m| m.report()).collect()
  }

  /// `(line, column, message)` triples, 1-based, in recording order.
  pub fn located(
    &self,
    sm: &SourceMap,
  ) -> Vec<(u32, u32, String)> {
    self
      .messages
      .iter()
      .map(|m| {
        let span = m.primary_span();
        let (line, col) = sm.line_col(&span.file, span.start);
        (line, col, m.to_string())
      })
      .collect()
  }

  pub fn into_messages(self) -> Vec<DiagnosticMessage> {
    self.messages
  }
}
