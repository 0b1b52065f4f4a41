use std::{cell::RefCell, rc::Rc};

mod declarations;
mod expression;
mod recovery;
mod statement;

use c1_ast::{ASTNode, NodeId, expressions::ASTExpression, statements::ASTStatement};
use c1_diagnostics::message::{DiagnosticMessage, Expected};
use c1_token::{token::Token, token_types::TokenType};
use c1_type::{
  Store,
  span::Span,
  symbol::{SymbolId, SymbolTable},
};

pub type ParserResult<T> = Result<T, DiagnosticMessage>;

type BindingPower = (u16, u16);

pub struct C1Parser {
  diagnostics: Vec<DiagnosticMessage>,
  tokens: Vec<Token>,
  cursor: usize,

  nodes: Store<ASTNode>,
  symbols: Rc<RefCell<SymbolTable>>,

  recursion_depth: usize,
}

pub(crate) const MAX_RECURSION_DEPTH: usize = 500;

impl C1Parser {
  pub fn new(
    tokens: Vec<Token>,
    symbols: Rc<RefCell<SymbolTable>>,
  ) -> Self {
    let mut tokens = tokens;
    if tokens.last().map(|t| t.type_) != Some(TokenType::Eof) {
      let span = tokens.last().map(|t| t.span.clone()).unwrap_or_default();
      tokens.push(Token::new(TokenType::Eof, String::new(), span));
    }

    let mut parser = C1Parser {
      tokens,
      cursor: 0,
      nodes: Store::new(),
      diagnostics: Vec::new(),
      symbols,
      recursion_depth: 0,
    };

    parser.skip_comments();
    parser
  }

  /// Parse a comma-separated list between delimiters, e.g. `{1, 2, 3}`.
  pub(crate) fn parse_delimited_list<T, F>(
    &mut self,
    opening: TokenType,
    closing: TokenType,
    separator: TokenType,
    mut parse_item: F,
  ) -> ParserResult<Vec<T>>
  where
    F: FnMut(&mut Self) -> ParserResult<T>,
  {
    self.expect(opening)?;
    let mut items = Vec::new();

    if self.eat(closing) {
      return Ok(items);
    }

    items.push(parse_item(self)?);

    while self.eat(separator) {
      if self.at(closing) {
        break;
      }
      items.push(parse_item(self)?);
    }

    self.expect(closing)?;
    Ok(items)
  }

  /// Parses a whole compilation unit. All syntax errors are collected; the
  /// AST is only returned when there were none.
  pub fn parse(&mut self) -> Result<(Store<ASTNode>, Vec<NodeId>), Vec<DiagnosticMessage>> {
    let roots = self.parse_program();

    if self.diagnostics.is_empty() {
      Ok((self.nodes.clone(), roots))
    } else {
      Err(self.diagnostics.clone())
    }
  }

  fn parse_program(&mut self) -> Vec<NodeId> {
    let mut roots = Vec::new();

    while !self.at(TokenType::Eof) {
      let before = self.cursor;

      match self.parse_top_level() {
        Ok(nodes) => roots.extend(nodes),
        Err(diagnostic) => {
          self.diagnostics.push(diagnostic);
          self.recover_top_level(before);
        },
      }
    }

    roots
  }

  fn parse_top_level(&mut self) -> ParserResult<Vec<NodeId>> {
    match self.peek().type_ {
      TokenType::Void => Ok(vec![self.parse_function()?]),
      TokenType::Const | TokenType::IntType | TokenType::FloatType => self.parse_variable_declaration(),
      _ => Err(DiagnosticMessage::ExpectedDeclaration(self.peek().span.clone())),
    }
  }

  fn peek(&self) -> &Token {
    &self.tokens[self.cursor.min(self.tokens.len() - 1)]
  }

  fn peek_nth(
    &self,
    n: usize,
  ) -> &Token {
    let mut index = self.cursor;
    let mut remaining = n;

    while remaining > 0 && index + 1 < self.tokens.len() {
      index += 1;
      if !is_comment(self.tokens[index].type_) {
        remaining -= 1;
      }
    }

    &self.tokens[index]
  }

  fn previous(&self) -> &Token {
    let mut index = self.cursor.saturating_sub(1);
    while index > 0 && is_comment(self.tokens[index].type_) {
      index -= 1;
    }
    &self.tokens[index]
  }

  fn at(
    &self,
    token_type: TokenType,
  ) -> bool {
    self.peek().type_ == token_type
  }

  fn eat(
    &mut self,
    token_type: TokenType,
  ) -> bool {
    if self.at(token_type) {
      self.bump();
      true
    } else {
      false
    }
  }

  fn expect(
    &mut self,
    token_type: TokenType,
  ) -> ParserResult<Token> {
    if self.at(token_type) {
      return Ok(self.bump());
    }

    Err(DiagnosticMessage::ExpectedToken {
      expected: Expected::Token(token_type),
      at: self.peek().span.clone(),
    })
  }

  fn expect_identifier(&mut self) -> ParserResult<(SymbolId, Span)> {
    let token = self.expect(TokenType::Identifier)?;
    let symbol = self.symbols.borrow_mut().intern(&token.lexeme);
    Ok((symbol, token.span))
  }

  /// Advances past the current token and any comments after it.
  fn bump(&mut self) -> Token {
    let token = self.peek().clone();
    if self.cursor < self.tokens.len() - 1 {
      self.cursor += 1;
    }

    self.skip_comments();
    token
  }

  fn skip_comments(&mut self) {
    while self.cursor < self.tokens.len() - 1 && is_comment(self.tokens[self.cursor].type_) {
      self.cursor += 1;
    }
  }

  fn allocate_expression(
    &mut self,
    expression: ASTExpression,
  ) -> NodeId {
    self.nodes.alloc(ASTNode::Expression(expression))
  }

  fn allocate_statement(
    &mut self,
    statement: ASTStatement,
  ) -> NodeId {
    self.nodes.alloc(ASTNode::Statement(statement))
  }

  fn get_span(
    &self,
    node: &NodeId,
  ) -> &Span {
    self.nodes.get(node).span()
  }
}

fn is_comment(token_type: TokenType) -> bool {
  matches!(token_type, TokenType::Comment | TokenType::MultiLineComment)
}
