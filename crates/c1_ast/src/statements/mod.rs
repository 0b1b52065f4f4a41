pub mod assignment;
pub mod block;
pub mod call;
pub mod function;
pub mod if_statement;
pub mod variable;
pub mod while_statement;

use c1_type::span::Span;

use assignment::ASTAssignment;
use block::ASTBlock;
use call::ASTCall;
use function::ASTFunction;
use if_statement::ASTIf;
use variable::ASTVariable;
use while_statement::ASTWhile;

#[derive(Debug, PartialEq, Clone)]
pub enum ASTStatement {
  Function(ASTFunction),
  Variable(ASTVariable),
  Assignment(ASTAssignment),
  Call(ASTCall),
  Block(ASTBlock),
  If(ASTIf),
  While(ASTWhile),
  Empty(Span),
}

impl ASTStatement {
  pub fn span(&self) -> &Span {
    match self {
      ASTStatement::Function(func) => &func.span,
      ASTStatement::Variable(var) => &var.span,
      ASTStatement::Assignment(assign) => &assign.span,
      ASTStatement::Call(call) => &call.span,
      ASTStatement::Block(block) => &block.span,
      ASTStatement::If(if_) => &if_.span,
      ASTStatement::While(while_) => &while_.span,
      ASTStatement::Empty(span) => span,
    }
  }
}
