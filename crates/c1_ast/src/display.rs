//! Lisp-style S-expression dump of the AST, used by `--dump ast`.
//!
//! ```lisp
//! (Program
//!   (Var int "n" = 10)
//!   (Function "main"
//!     (Block
//!       (While (< (LValue "n") 20)
//!         (Block
//!           (Assign (LValue "n") (+ (LValue "n") 1)))))))
//! ```

use std::cell::Cell;

use c1_type::{Store, symbol::SymbolTable};

use crate::{
  ASTNode, NodeId,
  expressions::{
    ASTExpression,
    binary::{ASTBinary, ASTBinaryOperator},
    condition::{ASTCondition, ASTRelationalOperator},
    literal::{ASTLiteral, ASTLiteralValue},
    lvalue::ASTLValue,
    unary::{ASTUnary, UnaryOperator},
  },
  statements::{
    ASTStatement,
    block::ASTBlock,
    function::ASTFunction,
    if_statement::ASTIf,
    variable::{ASTBaseType, ASTVariable},
    while_statement::ASTWhile,
  },
};

pub trait DisplayLisp {
  fn to_lisp(
    &self,
    formatter: &ASTFormatter,
  ) -> String;
}

pub struct ASTFormatter<'a> {
  nodes: &'a Store<ASTNode>,
  symbols: &'a SymbolTable,
  indent_level: Cell<usize>,
}

impl<'a> ASTFormatter<'a> {
  pub fn new(
    nodes: &'a Store<ASTNode>,
    symbols: &'a SymbolTable,
  ) -> Self {
    Self {
      nodes,
      symbols,
      indent_level: Cell::new(0),
    }
  }

  pub fn resolve_symbol(
    &self,
    symbol_id: &c1_type::symbol::SymbolId,
  ) -> &str {
    self.symbols.get(symbol_id)
  }

  pub fn indent(&self) -> String {
    "  ".repeat(self.indent_level.get())
  }

  pub fn format_node(
    &self,
    node_id: &NodeId,
  ) -> String {
    self.nodes.get(node_id).to_lisp(self)
  }

  /// Formats `node_id` on its own line one level deeper than the caller.
  fn format_nested(
    &self,
    node_id: &NodeId,
  ) -> String {
    self.indent_level.set(self.indent_level.get() + 1);
    let text = format!("\n{}{}", self.indent(), self.format_node(node_id));
    self.indent_level.set(self.indent_level.get() - 1);
    text
  }
}

pub fn format_ast_nodes(
  nodes: &Store<ASTNode>,
  symbols: &SymbolTable,
  roots: &[NodeId],
) -> String {
  if roots.is_empty() {
    return "(Program)".to_string();
  }

  let formatter = ASTFormatter::new(nodes, symbols);
  let formatted: String = roots.iter().map(|id| formatter.format_nested(id)).collect();

  format!("(Program{})", formatted)
}

impl DisplayLisp for ASTNode {
  fn to_lisp(
    &self,
    formatter: &ASTFormatter,
  ) -> String {
    match self {
      ASTNode::Expression(expr) => expr.to_lisp(formatter),
      ASTNode::Statement(stmt) => stmt.to_lisp(formatter),
    }
  }
}

impl DisplayLisp for ASTExpression {
  fn to_lisp(
    &self,
    formatter: &ASTFormatter,
  ) -> String {
    match self {
      ASTExpression::Literal(lit) => lit.to_lisp(formatter),
      ASTExpression::Binary(bin) => bin.to_lisp(formatter),
      ASTExpression::Unary(un) => un.to_lisp(formatter),
      ASTExpression::LValue(lval) => lval.to_lisp(formatter),
      ASTExpression::Condition(cond) => cond.to_lisp(formatter),
    }
  }
}

impl DisplayLisp for ASTStatement {
  fn to_lisp(
    &self,
    formatter: &ASTFormatter,
  ) -> String {
    match self {
      ASTStatement::Function(func) => func.to_lisp(formatter),
      ASTStatement::Variable(var) => var.to_lisp(formatter),
      ASTStatement::Assignment(assign) => {
        format!(
          "(Assign {} {})",
          formatter.format_node(&assign.target),
          formatter.format_node(&assign.value)
        )
      },
      ASTStatement::Call(call) => format!("(Call \"{}\")", formatter.resolve_symbol(&call.name)),
      ASTStatement::Block(block) => block.to_lisp(formatter),
      ASTStatement::If(if_) => if_.to_lisp(formatter),
      ASTStatement::While(while_) => while_.to_lisp(formatter),
      ASTStatement::Empty(_) => "(Empty)".to_string(),
    }
  }
}

impl DisplayLisp for ASTLiteral {
  fn to_lisp(
    &self,
    _formatter: &ASTFormatter,
  ) -> String {
    match self.value {
      ASTLiteralValue::Int(v) => v.to_string(),
      ASTLiteralValue::Float(v) => format!("{:?}", v),
    }
  }
}

impl DisplayLisp for ASTBinary {
  fn to_lisp(
    &self,
    formatter: &ASTFormatter,
  ) -> String {
    let op = match self.operator {
      ASTBinaryOperator::Add => "+",
      ASTBinaryOperator::Subtract => "-",
      ASTBinaryOperator::Multiply => "*",
      ASTBinaryOperator::Divide => "/",
      ASTBinaryOperator::Modulo => "%",
    };

    format!(
      "({} {} {})",
      op,
      formatter.format_node(&self.left),
      formatter.format_node(&self.right)
    )
  }
}

impl DisplayLisp for ASTUnary {
  fn to_lisp(
    &self,
    formatter: &ASTFormatter,
  ) -> String {
    let op = match self.operator {
      UnaryOperator::Plus => "+",
      UnaryOperator::Negate => "-",
    };

    format!("({} {})", op, formatter.format_node(&self.operand))
  }
}

impl DisplayLisp for ASTLValue {
  fn to_lisp(
    &self,
    formatter: &ASTFormatter,
  ) -> String {
    let name = formatter.resolve_symbol(&self.name);
    match &self.index {
      Some(index) => format!("(Index \"{}\" {})", name, formatter.format_node(index)),
      None => format!("(LValue \"{}\")", name),
    }
  }
}

impl DisplayLisp for ASTCondition {
  fn to_lisp(
    &self,
    formatter: &ASTFormatter,
  ) -> String {
    let op = match self.operator {
      ASTRelationalOperator::Equal => "==",
      ASTRelationalOperator::NotEqual => "!=",
      ASTRelationalOperator::Greater => ">",
      ASTRelationalOperator::GreaterEqual => ">=",
      ASTRelationalOperator::Less => "<",
      ASTRelationalOperator::LessEqual => "<=",
    };

    format!(
      "({} {} {})",
      op,
      formatter.format_node(&self.left),
      formatter.format_node(&self.right)
    )
  }
}

impl DisplayLisp for ASTFunction {
  fn to_lisp(
    &self,
    formatter: &ASTFormatter,
  ) -> String {
    format!(
      "(Function \"{}\"{})",
      formatter.resolve_symbol(&self.name),
      formatter.format_nested(&self.body)
    )
  }
}

impl DisplayLisp for ASTVariable {
  fn to_lisp(
    &self,
    formatter: &ASTFormatter,
  ) -> String {
    let mut text = String::from("(Var ");
    if self.is_constant {
      text.push_str("const ");
    }

    text.push_str(match self.base_type {
      ASTBaseType::Int => "int",
      ASTBaseType::Float => "float",
    });
    text.push_str(&format!(" \"{}\"", formatter.resolve_symbol(&self.name)));

    if let Some(length) = &self.array_length {
      text.push_str(&format!("[{}]", formatter.format_node(length)));
    }

    if !self.initializers.is_empty() {
      let inits: Vec<String> = self.initializers.iter().map(|i| formatter.format_node(i)).collect();
      if self.is_array() {
        text.push_str(&format!(" = {{{}}}", inits.join(" ")));
      } else {
        text.push_str(&format!(" = {}", inits.join(" ")));
      }
    }

    text.push(')');
    text
  }
}

impl DisplayLisp for ASTBlock {
  fn to_lisp(
    &self,
    formatter: &ASTFormatter,
  ) -> String {
    let body: String = self.statements.iter().map(|s| formatter.format_nested(s)).collect();
    format!("(Block{})", body)
  }
}

impl DisplayLisp for ASTIf {
  fn to_lisp(
    &self,
    formatter: &ASTFormatter,
  ) -> String {
    let condition = formatter.format_node(&self.condition);
    let then_branch = formatter.format_nested(&self.then_branch);

    match &self.else_branch {
      Some(else_branch) => format!("(If {}{}{})", condition, then_branch, formatter.format_nested(else_branch)),
      None => format!("(If {}{})", condition, then_branch),
    }
  }
}

impl DisplayLisp for ASTWhile {
  fn to_lisp(
    &self,
    formatter: &ASTFormatter,
  ) -> String {
    let condition = formatter.format_node(&self.condition);
    let body = formatter.format_nested(&self.body);

    format!("(While {}{})", condition, body)
  }
}
