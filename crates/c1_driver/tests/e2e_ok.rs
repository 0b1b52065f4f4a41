mod common;

use std::sync::Arc;

use c1_config::{C1BuildConfig, C1Config, EmitKind};
use insta::assert_snapshot;

const FIBONACCI: &str = r#"
/* Iterative Fibonacci over globals. */
const int limit = 10;
int fib[11];
int i;

void fill() {
  fib[0] = 0;
  fib[1] = 1;
  i = 2;
  while (i <= limit) {
    fib[i] = fib[i - 1] + fib[i - 2];
    i = i + 1;
  }
}

void main() {
  fill();
}
"#;

#[test]
fn fibonacci_compiles() {
  assert_snapshot!(common::compile_ok(FIBONACCI), @r"
  ; ModuleID = 'test'

  @limit = constant i32 10
  @fib = global [11 x i32] [i32 0, i32 0, i32 0, i32 0, i32 0, i32 0, i32 0, i32 0, i32 0, i32 0, i32 0]
  @i = global i32 undef

  define void @fill() {
  BB0:
    %t0 = getelementptr [11 x i32], [11 x i32]* @fib, i32 0, i32 0
    store i32 0, i32* %t0
    %t1 = getelementptr [11 x i32], [11 x i32]* @fib, i32 0, i32 1
    store i32 1, i32* %t1
    store i32 2, i32* @i
    br label %BB1
  BB1:
    %t2 = load i32, i32* @i
    %t3 = load i32, i32* @limit
    %t4 = icmp sle i32 %t2, %t3
    br i1 %t4, label %BB2, label %BB3
  BB2:
    %t5 = load i32, i32* @i
    %t6 = sub nsw i32 %t5, 1
    %t7 = getelementptr [11 x i32], [11 x i32]* @fib, i32 0, i32 %t6
    %t8 = load i32, i32* %t7
    %t9 = load i32, i32* @i
    %t10 = sub nsw i32 %t9, 2
    %t11 = getelementptr [11 x i32], [11 x i32]* @fib, i32 0, i32 %t10
    %t12 = load i32, i32* %t11
    %t13 = add nsw i32 %t8, %t12
    %t14 = load i32, i32* @i
    %t15 = getelementptr [11 x i32], [11 x i32]* @fib, i32 0, i32 %t14
    store i32 %t13, i32* %t15
    %t16 = load i32, i32* @i
    %t17 = add nsw i32 %t16, 1
    store i32 %t17, i32* @i
    br label %BB1
  BB3:
    ret void
  }

  define void @main() {
  BB0:
    call void @fill()
    ret void
  }
  ");
}

#[test]
fn warnings_do_not_fail_the_build() {
  let output = common::compile("int truncated = 2.5;");

  assert!(output.is_ok());
  assert_eq!(output.codes(), vec!["C0050"]);
  assert_eq!(
    output.diagnostic_lines(),
    vec!["test.c1:1:17: warning[C0050]: Float constant 2.5 is truncated to 2 in integer context"]
  );
}

#[test]
fn json_export_round_trips_through_serde() {
  let output = common::compile("float g = 0.5; void main() { g = g * 2; }");
  let module = output.module.expect("compiles");

  let value: serde_json::Value = serde_json::from_str(&module.to_json().expect("serializable")).expect("valid json");
  assert_eq!(value["name"], "test");
  assert_eq!(value["globals"][0]["name"], "g");
  assert_eq!(value["functions"][0]["blocks"][0]["terminator"]["kind"], "return");
}

#[test]
fn compile_file_writes_textual_ir() {
  let dir = common::scratch_dir();
  let source = dir.path().join("count.c1");
  std::fs::write(&source, "int n; void main() { while (n < 3) n = n + 1; }").expect("write source");

  let out_dir = dir.path().join("out");
  let mut config = C1Config::new_basic(false, vec![], true, 0);
  config.build_config = Some(C1BuildConfig::new(
    source.display().to_string(),
    out_dir.display().to_string(),
    EmitKind::Ir,
    vec![],
    None,
    true,
    false,
  ));

  let result = c1_driver::compile_file(Arc::new(config), &source.display().to_string());
  assert_eq!(result, Ok(()));

  let text = std::fs::read_to_string(out_dir.join("count.ll")).expect("output written");
  assert!(text.starts_with("; ModuleID = 'count'"));
  assert!(text.contains("define void @main()"));
}

#[test]
fn check_mode_writes_nothing() {
  let dir = common::scratch_dir();
  let source = dir.path().join("check.c1");
  std::fs::write(&source, "void main() { }").expect("write source");

  let out_dir = dir.path().join("out");
  let mut config = C1Config::new_basic(false, vec![], true, 0);
  config.build_config = Some(C1BuildConfig::new(
    source.display().to_string(),
    out_dir.display().to_string(),
    EmitKind::Json,
    vec![],
    None,
    true,
    true,
  ));

  assert_eq!(c1_driver::compile_file(Arc::new(config), &source.display().to_string()), Ok(()));
  assert!(!out_dir.exists());
}
