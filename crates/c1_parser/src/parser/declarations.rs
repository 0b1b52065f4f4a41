use c1_ast::{
  NodeId,
  expressions::{
    ASTExpression,
    literal::{ASTLiteral, ASTLiteralValue},
  },
  statements::{
    ASTStatement,
    block::ASTBlock,
    function::ASTFunction,
    variable::{ASTBaseType, ASTVariable},
  },
};
use c1_diagnostics::message::{DiagnosticMessage, Expected};
use c1_token::token_types::TokenType;
use c1_type::span::Span;

use super::{C1Parser, ParserResult};

impl C1Parser {
  /// `void <identifier> ( ) <block>`
  pub(crate) fn parse_function(&mut self) -> ParserResult<NodeId> {
    let keyword = self.expect(TokenType::Void)?;
    let (name, name_span) = self.expect_identifier()?;
    self.expect(TokenType::LeftParen)?;
    self.expect(TokenType::RightParen)?;

    let body = self.parse_block()?;
    let span = Span::merge(&keyword.span, self.get_span(&body));

    Ok(self.allocate_statement(ASTStatement::Function(ASTFunction::new(name, name_span, body, span))))
  }

  /// `[const] (int | float) <declarator> {, <declarator>} ;`
  ///
  /// Every declarator becomes its own variable node so later stages never
  /// see a multi-name definition.
  pub(crate) fn parse_variable_declaration(&mut self) -> ParserResult<Vec<NodeId>> {
    let start = self.peek().span.clone();
    let is_constant = self.eat(TokenType::Const);

    let base_type = match self.peek().type_ {
      TokenType::IntType => ASTBaseType::Int,
      TokenType::FloatType => ASTBaseType::Float,
      _ => {
        return Err(DiagnosticMessage::ExpectedToken {
          expected: Expected::Thing("'int' or 'float'"),
          at: self.peek().span.clone(),
        });
      },
    };
    self.bump();

    let mut declarators = vec![self.parse_declarator(&start, base_type, is_constant)?];
    while self.eat(TokenType::Comma) {
      declarators.push(self.parse_declarator(&start, base_type, is_constant)?);
    }

    self.expect(TokenType::SemiColon)?;
    Ok(declarators)
  }

  fn parse_declarator(
    &mut self,
    declaration_start: &Span,
    base_type: ASTBaseType,
    is_constant: bool,
  ) -> ParserResult<NodeId> {
    let (name, name_span) = self.expect_identifier()?;

    let mut array_length: Option<NodeId> = None;
    let mut open_length = false;
    let mut bracket_span = name_span.clone();

    if self.eat(TokenType::LeftBrack) {
      if self.at(TokenType::RightBrack) {
        open_length = true;
      } else {
        array_length = Some(self.parse_expression(0)?);
      }
      bracket_span = self.expect(TokenType::RightBrack)?.span;
    }

    let is_array = open_length || array_length.is_some();
    let mut initializers = Vec::new();
    let mut end_span = bracket_span.clone();

    if self.eat(TokenType::Equal) {
      if self.at(TokenType::LeftBrace) {
        if !is_array {
          return Err(DiagnosticMessage::ScalarBraceInitializer(self.peek().span.clone()));
        }

        initializers = self.parse_delimited_list(
          TokenType::LeftBrace,
          TokenType::RightBrace,
          TokenType::Comma,
          |parser| parser.parse_expression(0),
        )?;
        end_span = self.previous().span.clone();
      } else {
        if is_array {
          return Err(DiagnosticMessage::ArrayRequiresBraceInitializer(self.peek().span.clone()));
        }

        let value = self.parse_expression(0)?;
        end_span = self.get_span(&value).clone();
        initializers.push(value);
      }
    } else if is_constant {
      return Err(DiagnosticMessage::UninitializedConstant(Span::merge(declaration_start, &end_span)));
    } else if open_length {
      return Err(DiagnosticMessage::MissingArrayLength(bracket_span));
    }

    if open_length {
      let length = ASTLiteral::new(ASTLiteralValue::Int(initializers.len() as i32), bracket_span.clone());
      array_length = Some(self.allocate_expression(ASTExpression::Literal(length)));
    }

    let span = Span::merge(&name_span, &end_span);
    Ok(self.allocate_statement(ASTStatement::Variable(ASTVariable::new(
      name,
      name_span,
      base_type,
      is_constant,
      array_length,
      initializers,
      span,
    ))))
  }

  /// `{ {<declaration> | <statement>} }`
  pub(crate) fn parse_block(&mut self) -> ParserResult<NodeId> {
    let open = self.expect(TokenType::LeftBrace)?;
    let mut statements = Vec::new();

    while !self.is_block_end(self.peek().type_) {
      let before = self.cursor;

      match self.parse_block_item() {
        Ok(nodes) => statements.extend(nodes),
        Err(diagnostic) => {
          self.diagnostics.push(diagnostic);
          self.recover_statement(before);
        },
      }
    }

    let close = self.expect(TokenType::RightBrace)?;
    let span = Span::merge(&open.span, &close.span);

    Ok(self.allocate_statement(ASTStatement::Block(ASTBlock::new(statements, span))))
  }

  fn parse_block_item(&mut self) -> ParserResult<Vec<NodeId>> {
    match self.peek().type_ {
      TokenType::Const | TokenType::IntType | TokenType::FloatType => self.parse_variable_declaration(),
      _ => Ok(vec![self.parse_statement()?]),
    }
  }
}
