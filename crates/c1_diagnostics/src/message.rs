use std::fmt;

use c1_token::token_types::TokenType;
use c1_type::span::Span;

use super::diagnostic_report::{Diagnostic, Severity};

#[derive(Clone, Debug, PartialEq)]
pub enum Expected {
  Token(TokenType),
  Thing(&'static str),
}

impl fmt::Display for Expected {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      Expected::Token(t) => write!(f, "{}", t),
      Expected::Thing(t) => write!(f, "{}", t),
    }
  }
}

/// Broad class of a diagnostic, used by callers that only care about what
/// went wrong and not about the exact message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
  Lexical,
  Syntax,
  Redefinition,
  UnboundName,
  ConstKindViolation,
  ArrayUsage,
  UnsupportedOperation,
  Conversion,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticMessage {
  // #region Lexer
  InvalidCharacter(Span),
  UnterminatedComment(Span),
  IntegerLiteralOutOfRange(Span),
  MalformedNumber(Span),
  // #endregion Lexer
  // #region Parser
  ExpectedToken {
    expected: Expected,
    at: Span,
  },
  ExpectedExpression(Span),
  ExpectedStatement(Span),
  ExpectedDeclaration(Span),
  ExpectedRelationalOperator(Span),
  UninitializedConstant(Span),
  ArrayRequiresBraceInitializer(Span),
  ScalarBraceInitializer(Span),
  MissingArrayLength(Span),
  RecursionLimitExceeded(Span),
  // #endregion Parser
  // #region Codegen
  FunctionAlreadyDefined {
    name: String,
    span: Span,
    previous_span: Span,
  },
  VariableAlreadyDefined {
    name: String,
    span: Span,
    previous_span: Span,
  },
  /// A global variable and a function claim the same module-level name.
  SymbolAlreadyDefined {
    name: String,
    span: Span,
    previous_span: Span,
  },
  UndeclaredVariable {
    name: String,
    span: Span,
  },
  UndefinedFunction {
    name: String,
    span: Span,
  },
  VariableInConstantExpression {
    name: String,
    span: Span,
  },
  AssignToConstant {
    name: String,
    span: Span,
  },
  MissingArrayIndex {
    name: String,
    span: Span,
  },
  NonIntegerArrayIndex {
    name: String,
    span: Span,
  },
  IndexOnNonArray {
    name: String,
    span: Span,
  },
  NonIntegerArrayLength {
    name: String,
    span: Span,
  },
  NonPositiveArrayLength {
    name: String,
    length: i32,
    span: Span,
  },
  TooManyArrayInitializers {
    name: String,
    length: i32,
    count: usize,
    span: Span,
  },
  ModuloOnFloat(Span),
  ConstantDivisionByZero(Span),
  LossyConstantConversion {
    value: f64,
    truncated: i32,
    span: Span,
  },
  // #endregion Codegen
}

impl fmt::Display for DiagnosticMessage {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      // Lexer
      DiagnosticMessage::InvalidCharacter(_) => write!(f, "Invalid character"),
      DiagnosticMessage::UnterminatedComment(_) => write!(f, "Unterminated comment"),
      DiagnosticMessage::IntegerLiteralOutOfRange(_) => write!(f, "Integer literal does not fit in 32 bits"),
      DiagnosticMessage::MalformedNumber(_) => write!(f, "Malformed number literal"),

      // Parser
      DiagnosticMessage::ExpectedToken { expected, .. } => write!(f, "Expected {}", expected),
      DiagnosticMessage::ExpectedExpression(_) => write!(f, "Expected expression"),
      DiagnosticMessage::ExpectedStatement(_) => write!(f, "Expected statement"),
      DiagnosticMessage::ExpectedDeclaration(_) => {
        write!(f, "Expected a function or variable declaration")
      },
      DiagnosticMessage::ExpectedRelationalOperator(_) => {
        write!(f, "Expected one of '==', '!=', '<', '<=', '>', '>=' in condition")
      },
      DiagnosticMessage::UninitializedConstant(_) => write!(f, "Constant must be initialized with a value"),
      DiagnosticMessage::ArrayRequiresBraceInitializer(_) => {
        write!(f, "Array must be initialized with a brace-enclosed list")
      },
      DiagnosticMessage::ScalarBraceInitializer(_) => {
        write!(f, "Scalar variable cannot be initialized with a brace-enclosed list")
      },
      DiagnosticMessage::MissingArrayLength(_) => {
        write!(f, "Array without a length must have an initializer list")
      },
      DiagnosticMessage::RecursionLimitExceeded(_) => write!(f, "Expression is nested too deeply"),

      // Codegen
      DiagnosticMessage::FunctionAlreadyDefined { name, .. } => write!(f, "Function '{}' is already defined", name),
      DiagnosticMessage::VariableAlreadyDefined { name, .. } => {
        write!(f, "Variable '{}' is already defined in this scope", name)
      },
      DiagnosticMessage::SymbolAlreadyDefined { name, .. } => {
        write!(f, "'{}' is already defined at module level", name)
      },
      DiagnosticMessage::UndeclaredVariable { name, .. } => write!(f, "Undeclared variable '{}'", name),
      DiagnosticMessage::UndefinedFunction { name, .. } => write!(f, "Undefined function '{}'", name),
      DiagnosticMessage::VariableInConstantExpression { name, .. } => {
        write!(f, "Variable '{}' cannot be used in a constant expression", name)
      },
      DiagnosticMessage::AssignToConstant { name, .. } => write!(f, "Cannot assign to constant '{}'", name),
      DiagnosticMessage::MissingArrayIndex { name, .. } => {
        write!(f, "Array '{}' used without an index: expected index but not found", name)
      },
      DiagnosticMessage::NonIntegerArrayIndex { name, .. } => {
        write!(f, "Index into array '{}' must be an integer", name)
      },
      DiagnosticMessage::IndexOnNonArray { name, .. } => write!(f, "'{}' is not an array and cannot be indexed", name),
      DiagnosticMessage::NonIntegerArrayLength { name, .. } => {
        write!(f, "Length of array '{}' must be an integer constant", name)
      },
      DiagnosticMessage::NonPositiveArrayLength { name, length, .. } => {
        write!(f, "Length of array '{}' must be positive, but is {}", name, length)
      },
      DiagnosticMessage::TooManyArrayInitializers {
        name, length, count, ..
      } => {
        write!(
          f,
          "Array '{}' has length {}, but {} initializers were given",
          name, length, count
        )
      },
      DiagnosticMessage::ModuloOnFloat(_) => write!(f, "Modulo is not supported on float operands"),
      DiagnosticMessage::ConstantDivisionByZero(_) => write!(f, "Division by zero in constant expression"),
      DiagnosticMessage::LossyConstantConversion { value, truncated, .. } => {
        write!(f, "Float constant {} is truncated to {} in integer context", value, truncated)
      },
    }
  }
}

impl DiagnosticMessage {
  pub fn primary_span(&self) -> Span {
    match self {
      DiagnosticMessage::InvalidCharacter(at)
      | DiagnosticMessage::UnterminatedComment(at)
      | DiagnosticMessage::IntegerLiteralOutOfRange(at)
      | DiagnosticMessage::MalformedNumber(at)
      | DiagnosticMessage::ExpectedToken { at, .. }
      | DiagnosticMessage::ExpectedExpression(at)
      | DiagnosticMessage::ExpectedStatement(at)
      | DiagnosticMessage::ExpectedDeclaration(at)
      | DiagnosticMessage::ExpectedRelationalOperator(at)
      | DiagnosticMessage::UninitializedConstant(at)
      | DiagnosticMessage::ArrayRequiresBraceInitializer(at)
      | DiagnosticMessage::ScalarBraceInitializer(at)
      | DiagnosticMessage::MissingArrayLength(at)
      | DiagnosticMessage::RecursionLimitExceeded(at)
      | DiagnosticMessage::ModuloOnFloat(at)
      | DiagnosticMessage::ConstantDivisionByZero(at) => at.clone(),
      DiagnosticMessage::FunctionAlreadyDefined { span, .. }
      | DiagnosticMessage::VariableAlreadyDefined { span, .. }
      | DiagnosticMessage::SymbolAlreadyDefined { span, .. }
      | DiagnosticMessage::UndeclaredVariable { span, .. }
      | DiagnosticMessage::UndefinedFunction { span, .. }
      | DiagnosticMessage::VariableInConstantExpression { span, .. }
      | DiagnosticMessage::AssignToConstant { span, .. }
      | DiagnosticMessage::MissingArrayIndex { span, .. }
      | DiagnosticMessage::NonIntegerArrayIndex { span, .. }
      | DiagnosticMessage::IndexOnNonArray { span, .. }
      | DiagnosticMessage::NonIntegerArrayLength { span, .. }
      | DiagnosticMessage::NonPositiveArrayLength { span, .. }
      | DiagnosticMessage::TooManyArrayInitializers { span, .. }
      | DiagnosticMessage::LossyConstantConversion { span, .. } => span.clone(),
    }
  }

  pub fn code(&self) -> String {
    match self {
      DiagnosticMessage::InvalidCharacter(_) => "I0001",
      DiagnosticMessage::UnterminatedComment(_) => "I0002",
      DiagnosticMessage::IntegerLiteralOutOfRange(_) => "I0003",
      DiagnosticMessage::MalformedNumber(_) => "I0004",
      DiagnosticMessage::ExpectedToken { .. } => "I0010",
      DiagnosticMessage::ExpectedExpression(_) => "I0011",
      DiagnosticMessage::ExpectedStatement(_) => "I0012",
      DiagnosticMessage::ExpectedDeclaration(_) => "I0013",
      DiagnosticMessage::ExpectedRelationalOperator(_) => "I0014",
      DiagnosticMessage::UninitializedConstant(_) => "I0015",
      DiagnosticMessage::ArrayRequiresBraceInitializer(_) => "I0016",
      DiagnosticMessage::ScalarBraceInitializer(_) => "I0017",
      DiagnosticMessage::MissingArrayLength(_) => "I0018",
      DiagnosticMessage::RecursionLimitExceeded(_) => "I0019",
      DiagnosticMessage::FunctionAlreadyDefined { .. } => "C0001",
      DiagnosticMessage::VariableAlreadyDefined { .. } => "C0002",
      DiagnosticMessage::SymbolAlreadyDefined { .. } => "C0003",
      DiagnosticMessage::UndeclaredVariable { .. } => "C0010",
      DiagnosticMessage::UndefinedFunction { .. } => "C0011",
      DiagnosticMessage::VariableInConstantExpression { .. } => "C0020",
      DiagnosticMessage::AssignToConstant { .. } => "C0021",
      DiagnosticMessage::MissingArrayIndex { .. } => "C0030",
      DiagnosticMessage::NonIntegerArrayIndex { .. } => "C0031",
      DiagnosticMessage::IndexOnNonArray { .. } => "C0032",
      DiagnosticMessage::NonIntegerArrayLength { .. } => "C0033",
      DiagnosticMessage::NonPositiveArrayLength { .. } => "C0034",
      DiagnosticMessage::TooManyArrayInitializers { .. } => "C0035",
      DiagnosticMessage::ModuloOnFloat(_) => "C0040",
      DiagnosticMessage::ConstantDivisionByZero(_) => "C0041",
      DiagnosticMessage::LossyConstantConversion { .. } => "C0050",
    }
    .to_string()
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      DiagnosticMessage::InvalidCharacter(_)
      | DiagnosticMessage::UnterminatedComment(_)
      | DiagnosticMessage::IntegerLiteralOutOfRange(_)
      | DiagnosticMessage::MalformedNumber(_) => ErrorKind::Lexical,
      DiagnosticMessage::ExpectedToken { .. }
      | DiagnosticMessage::ExpectedExpression(_)
      | DiagnosticMessage::ExpectedStatement(_)
      | DiagnosticMessage::ExpectedDeclaration(_)
      | DiagnosticMessage::ExpectedRelationalOperator(_)
      | DiagnosticMessage::UninitializedConstant(_)
      | DiagnosticMessage::ArrayRequiresBraceInitializer(_)
      | DiagnosticMessage::ScalarBraceInitializer(_)
      | DiagnosticMessage::MissingArrayLength(_)
      | DiagnosticMessage::RecursionLimitExceeded(_) => ErrorKind::Syntax,
      DiagnosticMessage::FunctionAlreadyDefined { .. }
      | DiagnosticMessage::VariableAlreadyDefined { .. }
      | DiagnosticMessage::SymbolAlreadyDefined { .. } => ErrorKind::Redefinition,
      DiagnosticMessage::UndeclaredVariable { .. } | DiagnosticMessage::UndefinedFunction { .. } => {
        ErrorKind::UnboundName
      },
      DiagnosticMessage::VariableInConstantExpression { .. } | DiagnosticMessage::AssignToConstant { .. } => {
        ErrorKind::ConstKindViolation
      },
      DiagnosticMessage::MissingArrayIndex { .. }
      | DiagnosticMessage::NonIntegerArrayIndex { .. }
      | DiagnosticMessage::IndexOnNonArray { .. }
      | DiagnosticMessage::NonIntegerArrayLength { .. }
      | DiagnosticMessage::NonPositiveArrayLength { .. }
      | DiagnosticMessage::TooManyArrayInitializers { .. } => ErrorKind::ArrayUsage,
      DiagnosticMessage::ModuloOnFloat(_) | DiagnosticMessage::ConstantDivisionByZero(_) => {
        ErrorKind::UnsupportedOperation
      },
      DiagnosticMessage::LossyConstantConversion { .. } => ErrorKind::Conversion,
    }
  }

  pub fn level(&self) -> Severity {
    match self {
      DiagnosticMessage::LossyConstantConversion { .. } => Severity::Warning,
      _ => Severity::Error,
    }
  }

  fn secondary_labels(&self) -> Vec<(Span, String)> {
    match self {
      DiagnosticMessage::FunctionAlreadyDefined { previous_span, .. }
      | DiagnosticMessage::VariableAlreadyDefined { previous_span, .. }
      | DiagnosticMessage::SymbolAlreadyDefined { previous_span, .. } => {
        vec![(previous_span.clone(), "Previous definition here".to_string())]
      },
      _ => vec![],
    }
  }

  fn notes(&self) -> Vec<String> {
    match self {
      DiagnosticMessage::ModuloOnFloat(_) => vec!["use integer operands with '%'".to_string()],
      DiagnosticMessage::UninitializedConstant(_) => vec!["add an initializer, e.g. `const int n = 1;`".to_string()],
      _ => vec![],
    }
  }

  pub fn report(&self) -> Diagnostic {
    let mut diagnostic = Diagnostic::new(self.level(), self.to_string(), self.code(), self.primary_span());
    for (span, message) in self.secondary_labels() {
      diagnostic = diagnostic.with_label(span, message);
    }
    for note in self.notes() {
      diagnostic = diagnostic.with_note(note);
    }
    diagnostic
  }
}
