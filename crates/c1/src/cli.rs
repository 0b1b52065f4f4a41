use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use c1_config::{DebugTrace, DumpKind, EmitKind};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum DumpKindCli {
  /// Dump the lexer output
  Lexer,
  /// Dump the AST arena
  Ast,
  /// Dump the generated IR
  Ir,
}

impl From<DumpKindCli> for DumpKind {
  fn from(value: DumpKindCli) -> DumpKind {
    match value {
      DumpKindCli::Lexer => DumpKind::Lexer,
      DumpKindCli::Ast => DumpKind::Ast,
      DumpKindCli::Ir => DumpKind::Ir,
    }
  }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum DebugTraceCli {
  Lexer,
  Parser,
  Codegen,
  Verify,
}

impl From<DebugTraceCli> for DebugTrace {
  fn from(value: DebugTraceCli) -> DebugTrace {
    match value {
      DebugTraceCli::Lexer => DebugTrace::Lexer,
      DebugTraceCli::Parser => DebugTrace::Parser,
      DebugTraceCli::Codegen => DebugTrace::Codegen,
      DebugTraceCli::Verify => DebugTrace::Verify,
    }
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum EmitCli {
  /// Textual IR (.ll)
  Ir,
  /// IR module as JSON (.json)
  Json,
  /// Compile without writing anything
  None,
}

impl From<EmitCli> for EmitKind {
  fn from(value: EmitCli) -> EmitKind {
    match value {
      EmitCli::Ir => EmitKind::Ir,
      EmitCli::Json => EmitKind::Json,
      EmitCli::None => EmitKind::None,
    }
  }
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct BuildCommand {
  /// File to build, or nothing to use `c1.toml`
  pub file_path: Option<String>,

  /// Output directory
  #[arg(short = 'o', long)]
  pub output_dir: Option<String>,

  /// Artifact to write
  #[arg(long, value_enum)]
  pub emit: Option<EmitCli>,

  /// Skip verification of the generated module
  #[arg(long)]
  pub no_verify: bool,
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct CheckCommand {
  /// File to check, or nothing to use `c1.toml`
  pub file_path: Option<String>,
}

#[derive(Subcommand, Clone, PartialEq)]
pub enum SubCommand {
  /// Compile a file to IR
  Build(BuildCommand),
  /// Run every phase and verify, without writing artifacts
  Check(CheckCommand),
}

#[derive(Parser)]
#[command(author, version, about = "The C1 compiler", long_about = None)]
#[command(propagate_version = true)]
#[command(color = ColorChoice::Always)]
pub struct Cli {
  #[command(subcommand)]
  pub subcommand: SubCommand,

  /// Dump internal compiler representations
  #[arg(long, value_enum, value_delimiter = ',', action = clap::ArgAction::Append, global = true)]
  pub dump: Vec<DumpKindCli>,

  /// Write dumps to this directory (otherwise stdout)
  #[arg(long, global = true)]
  pub dump_dir: Option<String>,

  /// Enable internal debug mode
  #[arg(long, default_value = "false", global = true)]
  pub debug: bool,

  /// Enable debug tracing for subsystems
  #[arg(long, value_enum, action = clap::ArgAction::Append, global = true)]
  pub debug_trace: Vec<DebugTraceCli>,

  /// Don't print any output
  #[arg(long, short = 'q', default_value = "false", global = true)]
  pub quiet: bool,

  /// Use verbose output
  #[arg(long, short, action = clap::ArgAction::Count, global = true)]
  pub verbose: u8,
}
