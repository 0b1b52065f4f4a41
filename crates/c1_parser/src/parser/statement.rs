use c1_ast::{
  NodeId,
  expressions::{
    ASTExpression,
    condition::{ASTCondition, ASTRelationalOperator},
    lvalue::ASTLValue,
  },
  statements::{
    ASTStatement, assignment::ASTAssignment, call::ASTCall, if_statement::ASTIf, while_statement::ASTWhile,
  },
};
use c1_diagnostics::message::DiagnosticMessage;
use c1_token::token_types::TokenType;
use c1_type::span::Span;

use super::{C1Parser, ParserResult};

impl C1Parser {
  pub(crate) fn parse_statement(&mut self) -> ParserResult<NodeId> {
    match self.peek().type_ {
      TokenType::LeftBrace => self.parse_block(),
      TokenType::If => self.parse_if(),
      TokenType::While => self.parse_while(),
      TokenType::SemiColon => {
        let token = self.bump();
        Ok(self.allocate_statement(ASTStatement::Empty(token.span)))
      },
      TokenType::Identifier if self.peek_nth(1).type_ == TokenType::LeftParen => self.parse_call(),
      TokenType::Identifier => self.parse_assignment(),
      _ => Err(DiagnosticMessage::ExpectedStatement(self.peek().span.clone())),
    }
  }

  /// `if ( <cond> ) <stmt> [else <stmt>]`
  fn parse_if(&mut self) -> ParserResult<NodeId> {
    let keyword = self.expect(TokenType::If)?;
    let condition = self.parse_parenthesized_condition()?;
    let then_branch = self.parse_statement()?;

    let else_branch = if self.eat(TokenType::Else) {
      Some(self.parse_statement()?)
    } else {
      None
    };

    let last = else_branch.as_ref().unwrap_or(&then_branch);
    let span = Span::merge(&keyword.span, self.get_span(last));

    Ok(self.allocate_statement(ASTStatement::If(ASTIf::new(condition, then_branch, else_branch, span))))
  }

  /// `while ( <cond> ) <stmt>`
  fn parse_while(&mut self) -> ParserResult<NodeId> {
    let keyword = self.expect(TokenType::While)?;
    let condition = self.parse_parenthesized_condition()?;
    let body = self.parse_statement()?;
    let span = Span::merge(&keyword.span, self.get_span(&body));

    Ok(self.allocate_statement(ASTStatement::While(ASTWhile::new(condition, body, span))))
  }

  /// `<identifier> ( ) ;`
  fn parse_call(&mut self) -> ParserResult<NodeId> {
    let (name, name_span) = self.expect_identifier()?;
    self.expect(TokenType::LeftParen)?;
    self.expect(TokenType::RightParen)?;
    let semi = self.expect(TokenType::SemiColon)?;
    let span = Span::merge(&name_span, &semi.span);

    Ok(self.allocate_statement(ASTStatement::Call(ASTCall::new(name, span))))
  }

  /// `<lval> = <exp> ;`
  fn parse_assignment(&mut self) -> ParserResult<NodeId> {
    let target = self.parse_lvalue()?;
    self.expect(TokenType::Equal)?;
    let value = self.parse_expression(0)?;
    let semi = self.expect(TokenType::SemiColon)?;
    let span = Span::merge(self.get_span(&target), &semi.span);

    Ok(self.allocate_statement(ASTStatement::Assignment(ASTAssignment::new(target, value, span))))
  }

  /// `<identifier> [ '[' <exp> ']' ]`
  pub(crate) fn parse_lvalue(&mut self) -> ParserResult<NodeId> {
    let (name, name_span) = self.expect_identifier()?;

    let (index, span) = if self.eat(TokenType::LeftBrack) {
      let index = self.parse_expression(0)?;
      let close = self.expect(TokenType::RightBrack)?;
      (Some(index), Span::merge(&name_span, &close.span))
    } else {
      (None, name_span)
    };

    Ok(self.allocate_expression(ASTExpression::LValue(ASTLValue::new(name, index, span))))
  }

  fn parse_parenthesized_condition(&mut self) -> ParserResult<NodeId> {
    self.expect(TokenType::LeftParen)?;
    let condition = self.parse_condition()?;
    self.expect(TokenType::RightParen)?;
    Ok(condition)
  }

  /// `<exp> <relop> <exp>`
  fn parse_condition(&mut self) -> ParserResult<NodeId> {
    let left = self.parse_expression(0)?;

    let operator = match self.peek().type_ {
      TokenType::EqualEqual => ASTRelationalOperator::Equal,
      TokenType::BangEqual => ASTRelationalOperator::NotEqual,
      TokenType::Greater => ASTRelationalOperator::Greater,
      TokenType::GreaterEqual => ASTRelationalOperator::GreaterEqual,
      TokenType::Less => ASTRelationalOperator::Less,
      TokenType::LessEqual => ASTRelationalOperator::LessEqual,
      _ => return Err(DiagnosticMessage::ExpectedRelationalOperator(self.peek().span.clone())),
    };
    self.bump();

    let right = self.parse_expression(0)?;
    let span = Span::merge(self.get_span(&left), self.get_span(&right));

    Ok(self.allocate_expression(ASTExpression::Condition(ASTCondition::new(left, operator, right, span))))
  }
}
