mod lexer;
mod parser;

pub use lexer::{C1Lexer, int_literal_value};
pub use parser::{C1Parser, ParserResult};
