mod common;

use std::sync::Arc;

use c1_config::C1Config;

#[test]
fn lexer_errors_stop_the_pipeline() {
  let output = common::compile("int a = 1 @ 2;");

  assert!(!output.is_ok());
  assert_eq!(output.codes(), vec!["I0001"]);
}

#[test]
fn parser_errors_are_all_reported() {
  let lines = common::compile_err("void main() {\n  a = ;\n  b = 2 +;\n}");

  assert_eq!(lines.len(), 2);
  assert_eq!(lines[0], "test.c1:2:7: error[I0011]: Expected expression");
  assert!(lines[1].starts_with("test.c1:3:10: error[I0011]"), "{}", lines[1]);
}

#[test]
fn codegen_errors_carry_positions() {
  let lines = common::compile_err("void main() {\n  int a;\n  int a;\n  b();\n}");

  assert_eq!(
    lines,
    vec![
      "test.c1:3:7: error[C0002]: Variable 'a' is already defined in this scope",
      "test.c1:4:3: error[C0011]: Undefined function 'b'",
    ]
  );
}

#[test]
fn invalid_module_is_not_returned() {
  let output = common::compile("int a[2] = {1 % 1.0};");

  assert!(output.module.is_none());
  assert!(output.ir_text().is_none());
  assert_eq!(output.codes(), vec!["C0040"]);
}

#[test]
fn missing_file_fails() {
  let config = Arc::new(C1Config::new_basic(false, vec![], true, 0));
  assert_eq!(c1_driver::compile_file(config, "does/not/exist.c1"), Err(()));
}
