use c1_diagnostics::message::DiagnosticMessage;
use c1_token::{token::Token, token_types::TokenType};
use c1_type::{BytePosition, file::FileId, span::Span};

pub struct C1Lexer<'a> {
  file: FileId,
  source: &'a str,
  chars: std::str::Chars<'a>,
  pub tokens: Vec<Token>,
  start: usize,
  current: usize,
  pub diagnostics: Vec<DiagnosticMessage>,
}

impl<'a> C1Lexer<'a> {
  pub fn new(
    file: FileId,
    source: &'a str,
  ) -> Self {
    Self {
      file,
      chars: source.chars(),
      source,
      tokens: vec![],
      start: 0,
      current: 0,
      diagnostics: vec![],
    }
  }

  pub fn scan_tokens(&mut self) {
    while !self.is_at_end() {
      self.start = self.current;
      self.scan_token();
    }

    self.start = self.current;
    self.tokens.push(Token::new(TokenType::Eof, String::new(), self.span()));
  }

  fn is_at_end(&self) -> bool {
    self.chars.as_str().is_empty()
  }

  fn scan_token(&mut self) {
    let c = self.advance();

    match c {
      ' ' | '\r' | '\t' | '\n' => {},
      '(' => self.add_token(TokenType::LeftParen),
      ')' => self.add_token(TokenType::RightParen),
      '{' => self.add_token(TokenType::LeftBrace),
      '}' => self.add_token(TokenType::RightBrace),
      '[' => self.add_token(TokenType::LeftBrack),
      ']' => self.add_token(TokenType::RightBrack),
      ',' => self.add_token(TokenType::Comma),
      ';' => self.add_token(TokenType::SemiColon),
      '+' => self.add_token(TokenType::Plus),
      '-' => self.add_token(TokenType::Minus),
      '*' => self.add_token(TokenType::Asterisk),
      '%' => self.add_token(TokenType::Mod),
      '/' if self.match_char('/') => self.line_comment(),
      '/' if self.match_char('*') => self.block_comment(),
      '/' => self.add_token(TokenType::Slash),
      '=' if self.match_char('=') => self.add_token(TokenType::EqualEqual),
      '=' => self.add_token(TokenType::Equal),
      '!' if self.match_char('=') => self.add_token(TokenType::BangEqual),
      '<' if self.match_char('=') => self.add_token(TokenType::LessEqual),
      '<' => self.add_token(TokenType::Less),
      '>' if self.match_char('=') => self.add_token(TokenType::GreaterEqual),
      '>' => self.add_token(TokenType::Greater),
      '.' if self.peek().is_ascii_digit() => self.number(c),
      c if c.is_ascii_digit() => self.number(c),
      c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),
      _ => self.diagnostics.push(DiagnosticMessage::InvalidCharacter(self.span())),
    }
  }

  fn line_comment(&mut self) {
    while self.peek() != '\n' && !self.is_at_end() {
      self.advance();
    }

    self.add_token(TokenType::Comment);
  }

  fn block_comment(&mut self) {
    loop {
      if self.is_at_end() {
        self.diagnostics.push(DiagnosticMessage::UnterminatedComment(self.span()));
        return;
      }

      if self.advance() == '*' && self.match_char('/') {
        break;
      }
    }

    self.add_token(TokenType::MultiLineComment);
  }

  fn identifier(&mut self) {
    while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
      self.advance();
    }

    let text = &self.source[self.start..self.current];
    self.add_token(TokenType::keyword(text).unwrap_or(TokenType::Identifier));
  }

  fn number(
    &mut self,
    first: char,
  ) {
    if first == '0' && (self.peek() == 'x' || self.peek() == 'X') {
      self.advance();
      while self.peek().is_ascii_hexdigit() {
        self.advance();
      }

      if self.current - self.start == 2 {
        self.diagnostics.push(DiagnosticMessage::MalformedNumber(self.span()));
        return;
      }

      return self.integer(TokenType::Hex);
    }

    let mut is_float = first == '.';

    while self.peek().is_ascii_digit() {
      self.advance();
    }

    if !is_float && self.peek() == '.' {
      is_float = true;
      self.advance();
      while self.peek().is_ascii_digit() {
        self.advance();
      }
    }

    if self.peek() == 'e' || self.peek() == 'E' {
      is_float = true;
      self.advance();
      if self.peek() == '+' || self.peek() == '-' {
        self.advance();
      }

      if !self.peek().is_ascii_digit() {
        self.diagnostics.push(DiagnosticMessage::MalformedNumber(self.span()));
        return;
      }

      while self.peek().is_ascii_digit() {
        self.advance();
      }
    }

    if is_float {
      self.add_token(TokenType::Float);
    } else {
      self.integer(TokenType::Int);
    }
  }

  fn integer(
    &mut self,
    type_: TokenType,
  ) {
    if int_literal_value(&self.source[self.start..self.current]).is_none() {
      self.diagnostics.push(DiagnosticMessage::IntegerLiteralOutOfRange(self.span()));
      return;
    }

    self.add_token(type_);
  }

  fn peek(&self) -> char {
    self.chars.clone().next().unwrap_or('\0')
  }

  fn match_char(
    &mut self,
    expected: char,
  ) -> bool {
    let mut lookahead = self.chars.clone();

    if let Some(next_char) = lookahead.next() {
      if next_char == expected {
        self.chars = lookahead;
        self.current += next_char.len_utf8();
        return true;
      }
    }

    false
  }

  fn advance(&mut self) -> char {
    let next_char = self.chars.next();

    if let Some(c) = next_char {
      self.current += c.len_utf8();
    }

    next_char.unwrap_or('\0')
  }

  fn span(&self) -> Span {
    Span::new(self.file, BytePosition(self.start as u32), BytePosition(self.current as u32))
  }

  fn add_token(
    &mut self,
    type_: TokenType,
  ) {
    let lexeme = self.source[self.start..self.current].to_string();
    self.tokens.push(Token::new(type_, lexeme, self.span()));
  }
}

/// Value of an integer literal as a 32-bit int.
///
/// Decimal literals go up to 2147483648 so that `-2147483648` is writable;
/// the parser accepts that magnitude only right after a unary minus.
/// Hexadecimal literals cover the full 32-bit pattern range and wrap into
/// `i32` the way a C compiler reinterprets them.
pub fn int_literal_value(lexeme: &str) -> Option<i32> {
  let value = if let Some(hex) = lexeme.strip_prefix("0x").or_else(|| lexeme.strip_prefix("0X")) {
    u32::from_str_radix(hex, 16).ok()?
  } else {
    let value: u64 = lexeme.parse().ok()?;
    if value > (i32::MAX as u64) + 1 {
      return None;
    }
    value as u32
  };

  Some(value as i32)
}

/// True for the decimal literal 2147483648, which only fits in `i32` as the
/// operand of a unary minus.
pub fn is_min_int_magnitude(lexeme: &str) -> bool {
  lexeme.parse::<u64>() == Ok(1 << 31)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn scan(src: &str) -> C1Lexer<'_> {
    let mut lexer = C1Lexer::new(FileId::new(0), src);
    lexer.scan_tokens();
    lexer
  }

  fn types(src: &str) -> Vec<TokenType> {
    scan(src).tokens.iter().map(|t| t.type_).collect()
  }

  #[test]
  fn scans_declaration() {
    assert_eq!(
      types("const int a[2] = {1, 0x1F};"),
      vec![
        TokenType::Const,
        TokenType::IntType,
        TokenType::Identifier,
        TokenType::LeftBrack,
        TokenType::Int,
        TokenType::RightBrack,
        TokenType::Equal,
        TokenType::LeftBrace,
        TokenType::Int,
        TokenType::Comma,
        TokenType::Hex,
        TokenType::RightBrace,
        TokenType::SemiColon,
        TokenType::Eof,
      ]
    );
  }

  #[test]
  fn scans_relational_operators() {
    assert_eq!(
      types("== != < <= > >="),
      vec![
        TokenType::EqualEqual,
        TokenType::BangEqual,
        TokenType::Less,
        TokenType::LessEqual,
        TokenType::Greater,
        TokenType::GreaterEqual,
        TokenType::Eof,
      ]
    );
  }

  #[test]
  fn scans_float_forms() {
    assert_eq!(
      types("1.5 .5 2. 1e3 2.5E-2"),
      vec![
        TokenType::Float,
        TokenType::Float,
        TokenType::Float,
        TokenType::Float,
        TokenType::Float,
        TokenType::Eof,
      ]
    );
  }

  #[test]
  fn comments_become_comment_tokens() {
    assert_eq!(
      types("a // line\n/* block\n */ b"),
      vec![
        TokenType::Identifier,
        TokenType::Comment,
        TokenType::MultiLineComment,
        TokenType::Identifier,
        TokenType::Eof,
      ]
    );
  }

  #[test]
  fn reports_unterminated_comment() {
    let lexer = scan("int a; /* never closed");
    assert!(matches!(lexer.diagnostics[..], [DiagnosticMessage::UnterminatedComment(_)]));
  }

  #[test]
  fn reports_invalid_character_and_keeps_going() {
    let lexer = scan("int a$ = 1;");
    assert!(matches!(lexer.diagnostics[..], [DiagnosticMessage::InvalidCharacter(_)]));
    assert_eq!(lexer.tokens.len(), 6);
  }

  #[test]
  fn reports_malformed_exponent() {
    let lexer = scan("1e+;");
    assert!(matches!(lexer.diagnostics[..], [DiagnosticMessage::MalformedNumber(_)]));
  }

  #[test]
  fn integer_literal_range() {
    assert_eq!(int_literal_value("2147483647"), Some(i32::MAX));
    assert_eq!(int_literal_value("2147483648"), Some(i32::MIN));
    assert_eq!(int_literal_value("2147483649"), None);
    assert_eq!(int_literal_value("0xFFFFFFFF"), Some(-1));
    assert_eq!(int_literal_value("0x100000000"), None);
  }

  #[test]
  fn only_the_decimal_min_magnitude_needs_a_sign() {
    assert!(is_min_int_magnitude("2147483648"));
    assert!(!is_min_int_magnitude("2147483647"));
    assert!(!is_min_int_magnitude("0x80000000"));
  }
}
