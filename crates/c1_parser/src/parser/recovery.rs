use c1_token::token_types::TokenType;

use crate::parser::C1Parser;

impl C1Parser {
  /// FIRST(<decl>) = { void, const, int, float }
  pub(crate) fn is_declaration_start(
    &self,
    token_type: TokenType,
  ) -> bool {
    matches!(
      token_type,
      TokenType::Void | TokenType::Const | TokenType::IntType | TokenType::FloatType
    )
  }

  /// Keywords that can only begin a new statement or local declaration.
  pub(crate) fn is_statement_keyword(
    &self,
    token_type: TokenType,
  ) -> bool {
    matches!(
      token_type,
      TokenType::If | TokenType::While | TokenType::Const | TokenType::IntType | TokenType::FloatType
    )
  }

  pub(crate) fn is_block_end(
    &self,
    token_type: TokenType,
  ) -> bool {
    matches!(token_type, TokenType::RightBrace | TokenType::Eof)
  }

  /// Make sure a failed parse consumed at least one token.
  fn ensure_progress(
    &mut self,
    before: usize,
  ) {
    if self.cursor == before && !self.at(TokenType::Eof) {
      self.bump();
    }
  }

  /// Synchronize after a failed top-level declaration.
  /// Stop after `;` or before the start of the next declaration.
  pub(crate) fn recover_top_level(
    &mut self,
    before: usize,
  ) {
    self.ensure_progress(before);

    loop {
      let current_token = self.peek().type_;

      if current_token == TokenType::Eof || self.is_declaration_start(current_token) {
        break;
      }

      self.bump();
      if current_token == TokenType::SemiColon {
        break;
      }
    }
  }

  /// Synchronize after a failed statement inside a block.
  /// Stop after `;`, or before `}` or a statement keyword.
  pub(crate) fn recover_statement(
    &mut self,
    before: usize,
  ) {
    if self.cursor == before && !self.is_block_end(self.peek().type_) {
      self.bump();
    }

    loop {
      let current_token = self.peek().type_;

      if self.is_block_end(current_token) || self.is_statement_keyword(current_token) {
        break;
      }

      self.bump();
      if current_token == TokenType::SemiColon {
        break;
      }
    }
  }
}
