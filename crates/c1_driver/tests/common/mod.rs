#![allow(dead_code)]

use c1_driver::{CompileOutput, compile_source};
use tempfile::TempDir;

pub fn compile(src: &str) -> CompileOutput {
  compile_source("test.c1", src, true)
}

/// Textual IR of a program that must compile cleanly.
pub fn compile_ok(src: &str) -> String {
  let output = compile(src);
  assert!(
    output.is_ok(),
    "Compilation failed:\n{}\n{:?}",
    output.diagnostic_lines().join("\n"),
    output.verify_errors
  );
  output.ir_text().unwrap_or_default()
}

/// Diagnostic lines of a program that must fail.
pub fn compile_err(src: &str) -> Vec<String> {
  let output = compile(src);
  assert!(!output.is_ok(), "Expected compilation to fail");
  output.diagnostic_lines()
}

/// Scratch directory for tests that write files, removed on drop.
pub fn scratch_dir() -> TempDir {
  TempDir::new().expect("create scratch dir")
}
