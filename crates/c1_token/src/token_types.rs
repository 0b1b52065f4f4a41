use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
  // Single-character tokens
  Plus,       // +
  Minus,      // -
  Asterisk,   // *
  Slash,      // /
  Mod,        // %
  LeftParen,  // (
  RightParen, // )
  LeftBrace,  // {
  RightBrace, // }
  LeftBrack,  // [
  RightBrack, // ]
  Comma,      // ,
  SemiColon,  // ;

  // One or two character tokens
  Equal,        // =
  EqualEqual,   // ==
  BangEqual,    // !=
  Greater,      // >
  GreaterEqual, // >=
  Less,         // <
  LessEqual,    // <=

  // Literals
  Identifier,
  Int,
  Hex,
  Float,

  // Keywords
  IntType,
  FloatType,
  Const,
  Void,
  If,
  Else,
  While,

  Comment,
  MultiLineComment,
  Eof,
}

impl TokenType {
  pub fn keyword(ident: &str) -> Option<TokenType> {
    match ident {
      "int" => Some(TokenType::IntType),
      "float" => Some(TokenType::FloatType),
      "const" => Some(TokenType::Const),
      "void" => Some(TokenType::Void),
      "if" => Some(TokenType::If),
      "else" => Some(TokenType::Else),
      "while" => Some(TokenType::While),
      _ => None,
    }
  }

  pub fn is_relational(&self) -> bool {
    matches!(
      self,
      TokenType::EqualEqual
        | TokenType::BangEqual
        | TokenType::Greater
        | TokenType::GreaterEqual
        | TokenType::Less
        | TokenType::LessEqual
    )
  }
}

impl Display for TokenType {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>,
  ) -> std::fmt::Result {
    let text = match self {
      TokenType::Plus => "'+'",
      TokenType::Minus => "'-'",
      TokenType::Asterisk => "'*'",
      TokenType::Slash => "'/'",
      TokenType::Mod => "'%'",
      TokenType::LeftParen => "'('",
      TokenType::RightParen => "')'",
      TokenType::LeftBrace => "'{'",
      TokenType::RightBrace => "'}'",
      TokenType::LeftBrack => "'['",
      TokenType::RightBrack => "']'",
      TokenType::Comma => "','",
      TokenType::SemiColon => "';'",
      TokenType::Equal => "'='",
      TokenType::EqualEqual => "'=='",
      TokenType::BangEqual => "'!='",
      TokenType::Greater => "'>'",
      TokenType::GreaterEqual => "'>='",
      TokenType::Less => "'<'",
      TokenType::LessEqual => "'<='",
      TokenType::Identifier => "identifier",
      TokenType::Int => "integer literal",
      TokenType::Hex => "hexadecimal literal",
      TokenType::Float => "float literal",
      TokenType::IntType => "'int'",
      TokenType::FloatType => "'float'",
      TokenType::Const => "'const'",
      TokenType::Void => "'void'",
      TokenType::If => "'if'",
      TokenType::Else => "'else'",
      TokenType::While => "'while'",
      TokenType::Comment => "comment",
      TokenType::MultiLineComment => "comment",
      TokenType::Eof => "end of file",
    };

    write!(f, "{}", text)
  }
}
