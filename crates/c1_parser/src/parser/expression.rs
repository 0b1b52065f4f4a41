use c1_ast::{
  NodeId,
  expressions::{
    ASTExpression,
    binary::{ASTBinary, ASTBinaryOperator},
    literal::{ASTLiteral, ASTLiteralValue},
    unary::{ASTUnary, UnaryOperator},
  },
};
use c1_diagnostics::message::DiagnosticMessage;
use c1_token::token_types::TokenType;
use c1_type::span::Span;

use super::{BindingPower, C1Parser, ParserResult};
use crate::lexer::{int_literal_value, is_min_int_magnitude};

const PREFIX_BP: u16 = 30;

impl C1Parser {
  pub(crate) fn parse_expression(
    &mut self,
    min_bp: u16,
  ) -> ParserResult<NodeId> {
    self.recursion_depth += 1;
    if self.recursion_depth > super::MAX_RECURSION_DEPTH {
      self.recursion_depth -= 1;
      return Err(DiagnosticMessage::RecursionLimitExceeded(self.peek().span.clone()));
    }

    let result = self.parse_expression_inner(min_bp);
    self.recursion_depth -= 1;
    result
  }

  fn parse_expression_inner(
    &mut self,
    min_bp: u16,
  ) -> ParserResult<NodeId> {
    let mut left = self.parse_prefix()?;

    loop {
      let op = self.peek().type_;
      let Some((lbp, rbp)) = self.binding_powers(&op) else {
        break;
      };
      if lbp < min_bp {
        break;
      }

      self.bump();

      let right = self.parse_expression(rbp)?;
      let span = Span::merge(self.get_span(&left), self.get_span(&right));
      left = self.allocate_expression(ASTExpression::Binary(ASTBinary::new(
        left,
        binary_operator(op),
        right,
        span,
      )));
    }

    Ok(left)
  }

  fn parse_prefix(&mut self) -> ParserResult<NodeId> {
    let token = self.peek().clone();

    match token.type_ {
      TokenType::Minus
        if self.peek_nth(1).type_ == TokenType::Int && is_min_int_magnitude(&self.peek_nth(1).lexeme) =>
      {
        self.bump();
        let literal = self.bump();
        let span = Span::merge(&token.span, &literal.span);
        Ok(self.allocate_expression(ASTExpression::Literal(ASTLiteral::new(ASTLiteralValue::Int(i32::MIN), span))))
      },
      TokenType::Plus | TokenType::Minus => {
        self.bump();
        let operator = if token.type_ == TokenType::Minus {
          UnaryOperator::Negate
        } else {
          UnaryOperator::Plus
        };

        let operand = self.parse_expression(PREFIX_BP)?;
        let span = Span::merge(&token.span, self.get_span(&operand));
        Ok(self.allocate_expression(ASTExpression::Unary(ASTUnary::new(operator, operand, span))))
      },
      TokenType::LeftParen => {
        self.bump();
        let inner = self.parse_expression(0)?;
        self.expect(TokenType::RightParen)?;
        Ok(inner)
      },
      TokenType::Int if is_min_int_magnitude(&token.lexeme) => {
        Err(DiagnosticMessage::IntegerLiteralOutOfRange(token.span))
      },
      TokenType::Int | TokenType::Hex => {
        self.bump();
        let value = int_literal_value(&token.lexeme)
          .ok_or_else(|| DiagnosticMessage::IntegerLiteralOutOfRange(token.span.clone()))?;
        Ok(self.allocate_expression(ASTExpression::Literal(ASTLiteral::new(ASTLiteralValue::Int(value), token.span))))
      },
      TokenType::Float => {
        self.bump();
        let value: f64 = token
          .lexeme
          .parse()
          .map_err(|_| DiagnosticMessage::MalformedNumber(token.span.clone()))?;
        Ok(self.allocate_expression(ASTExpression::Literal(ASTLiteral::new(ASTLiteralValue::Float(value), token.span))))
      },
      TokenType::Identifier => self.parse_lvalue(),
      _ => Err(DiagnosticMessage::ExpectedExpression(token.span)),
    }
  }

  fn binding_powers(
    &self,
    op: &TokenType,
  ) -> Option<BindingPower> {
    match op {
      TokenType::Plus | TokenType::Minus => Some((10, 11)),
      TokenType::Asterisk | TokenType::Slash | TokenType::Mod => Some((20, 21)),
      _ => None,
    }
  }
}

fn binary_operator(op: TokenType) -> ASTBinaryOperator {
  match op {
    TokenType::Plus => ASTBinaryOperator::Add,
    TokenType::Minus => ASTBinaryOperator::Subtract,
    TokenType::Asterisk => ASTBinaryOperator::Multiply,
    TokenType::Slash => ASTBinaryOperator::Divide,
    TokenType::Mod => ASTBinaryOperator::Modulo,
    _ => unreachable!("no binding power for {:?}", op),
  }
}
