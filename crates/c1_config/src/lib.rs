use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DumpKind {
  Lexer,
  Ast,
  Ir,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugTrace {
  Lexer,
  Parser,
  Codegen,
  Verify,
}

/// What `build` writes to the output directory.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitKind {
  /// Textual IR (`.ll`).
  #[default]
  Ir,
  /// The IR module serialized as JSON (`.json`).
  Json,
  /// Compile only.
  None,
}

fn default_output_dir() -> String {
  "build".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct C1ProjectBuildConfig {
  pub main_file: String,
  #[serde(default = "default_output_dir")]
  pub output_dir: String,
  #[serde(default)]
  pub emit: EmitKind,
}

/// Contents of a `c1.toml` project file.
///
/// ```toml
/// name = "fib"
/// version = "0.1.0"
///
/// [build]
/// main_file = "src/main.c1"
/// output_dir = "build"
/// emit = "ir"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct C1ProjectConfig {
  pub name: String,
  #[serde(default)]
  pub version: String,
  pub build: C1ProjectBuildConfig,
}

impl C1ProjectConfig {
  pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(content)
  }
}

#[derive(Debug, Clone)]
pub struct C1BuildConfig {
  pub file: String,
  pub output_dir: String,
  pub emit: EmitKind,
  pub dump: Vec<DumpKind>,
  pub dump_dir: Option<String>,
  pub verify: bool,
  pub check_mode: bool,
}

impl C1BuildConfig {
  pub fn new(
    file: String,
    output_dir: String,
    emit: EmitKind,
    dump: Vec<DumpKind>,
    dump_dir: Option<String>,
    verify: bool,
    check_mode: bool,
  ) -> Self {
    Self {
      file,
      output_dir,
      emit,
      dump,
      dump_dir,
      verify,
      check_mode,
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct C1Config {
  pub project_config: Option<C1ProjectConfig>,
  pub build_config: Option<C1BuildConfig>,
  pub debug: bool,
  pub debug_trace: Vec<DebugTrace>,
  pub quiet: bool,
  pub verbose: u8,
}

impl C1Config {
  pub fn new_basic(
    debug: bool,
    debug_trace: Vec<DebugTrace>,
    quiet: bool,
    verbose: u8,
  ) -> Self {
    Self {
      debug,
      debug_trace,
      quiet,
      verbose,
      ..Default::default()
    }
  }
}
