mod common;

use c1_ir::{ConstValue, GlobalInit, IrType};
use insta::assert_snapshot;

#[test]
fn folded_constant_global() {
  let generated = common::generate_src("const int a = 2 + 3;");
  assert!(generated.output.is_valid());

  let global = generated.output.module.globals.get_all()[0].clone();
  assert_eq!(global.name, "a");
  assert_eq!(global.ty, IrType::i32());
  assert!(global.constant);
  assert_eq!(global.init, Some(GlobalInit::Scalar(ConstValue::Int(5))));

  assert_snapshot!(common::format_ir("const int a = 2 + 3;"), @r"
  ; ModuleID = 'test'

  @a = constant i32 5
  ");
}

#[test]
fn local_scalar_and_padded_array() {
  assert_snapshot!(common::format_ir("void main() { int a; int b[3] = {1, 2}; }"), @r"
  ; ModuleID = 'test'

  define void @main() {
  BB0:
    %l0 = alloca i32 ; a
    %l1 = alloca [3 x i32] ; b
    %t0 = getelementptr [3 x i32], [3 x i32]* %l1, i32 0, i32 0
    store i32 1, i32* %t0
    %t1 = getelementptr [3 x i32], [3 x i32]* %l1, i32 0, i32 1
    store i32 2, i32* %t1
    %t2 = getelementptr [3 x i32], [3 x i32]* %l1, i32 0, i32 2
    store i32 0, i32* %t2
    ret void
  }
  ");
}

#[test]
fn float_modulo_in_global_array_creates_nothing() {
  let generated = common::generate_src("int a[2] = {1 % 1.0};");

  assert_eq!(generated.codes(), vec!["C0040"]);
  assert!(!generated.output.is_valid());
  assert!(generated.output.module.globals.is_empty());
}

#[test]
fn indexing_a_scalar_is_an_array_usage_error() {
  assert_eq!(common::codes("void main() { int x; x[0] = 1; }"), vec!["C0032"]);
  assert_eq!(common::codes("int a[2]; void main() { a = 1; }"), vec!["C0030"]);
}

#[test]
fn globals_of_every_shape() {
  let src = r#"
int a;
float b = 1;
const float c = 1 / 4.0;
int d[4] = {1, -2};
float e[2];
const int f[] = {0x10, 7 % 3};
"#;

  assert_snapshot!(common::format_ir(src), @r"
  ; ModuleID = 'test'

  @a = global i32 undef
  @b = global double 1.0
  @c = constant double 0.25
  @d = global [4 x i32] [i32 1, i32 -2, i32 0, i32 0]
  @e = global [2 x double] [double 0.0, double 0.0]
  @f = constant [2 x i32] [i32 16, i32 1]
  ");
}

#[test]
fn global_array_without_initializer_is_zeroed() {
  assert_snapshot!(common::format_ir("int g[3];\nfloat h[1 + 1];\n"), @r"
  ; ModuleID = 'test'

  @g = global [3 x i32] [i32 0, i32 0, i32 0]
  @h = global [2 x double] [double 0.0, double 0.0]
  ");
}

#[test]
fn mixed_arithmetic_widens_to_double() {
  let src = r#"
float f;
void main() {
  int i = 3;
  f = i * 2.5;
}
"#;

  assert_snapshot!(common::format_ir(src), @r"
  ; ModuleID = 'test'

  @f = global double undef

  define void @main() {
  BB0:
    %l0 = alloca i32 ; i
    store i32 3, i32* %l0
    %t0 = load i32, i32* %l0
    %t1 = sitofp i32 %t0 to double
    %t2 = fmul double %t1, 2.5
    store double %t2, double* @f
    ret void
  }
  ");
}

#[test]
fn assignment_truncates_to_integer_target() {
  let src = r#"
void main() {
  float x = 1.5;
  int y;
  y = -x;
}
"#;

  assert_snapshot!(common::format_ir(src), @r"
  ; ModuleID = 'test'

  define void @main() {
  BB0:
    %l0 = alloca double ; x
    %l1 = alloca i32 ; y
    store double 1.5, double* %l0
    %t0 = load double, double* %l0
    %t1 = fneg double %t0
    %t2 = fptosi double %t1 to i32
    store i32 %t2, i32* %l1
    ret void
  }
  ");
}

#[test]
fn immediate_operands_are_converted_in_place() {
  let src = r#"
void main() {
  float x = 2;
  int y = 2.9;
}
"#;

  assert_snapshot!(common::format_ir(src), @r"
  ; ModuleID = 'test'

  define void @main() {
  BB0:
    %l0 = alloca double ; x
    %l1 = alloca i32 ; y
    store double 2.0, double* %l0
    store i32 2, i32* %l1
    ret void
  }
  ");
}

#[test]
fn if_else_with_calls() {
  let src = r#"
int x;
void f() { }
void main() {
  if (x > 0) f(); else x = 1;
}
"#;

  assert_snapshot!(common::format_ir(src), @r"
  ; ModuleID = 'test'

  @x = global i32 undef

  define void @f() {
  BB0:
    ret void
  }

  define void @main() {
  BB0:
    %t0 = load i32, i32* @x
    %t1 = icmp sgt i32 %t0, 0
    br i1 %t1, label %BB1, label %BB2
  BB1:
    call void @f()
    br label %BB3
  BB2:
    store i32 1, i32* @x
    br label %BB3
  BB3:
    ret void
  }
  ");
}

#[test]
fn while_loop_over_global_array() {
  let src = r#"
int a[2] = {1, 2};
void main() {
  int i = 0;
  while (i < 2) {
    a[i] = a[i] * 2;
    i = i + 1;
  }
}
"#;

  assert_snapshot!(common::format_ir(src), @r"
  ; ModuleID = 'test'

  @a = global [2 x i32] [i32 1, i32 2]

  define void @main() {
  BB0:
    %l0 = alloca i32 ; i
    store i32 0, i32* %l0
    br label %BB1
  BB1:
    %t0 = load i32, i32* %l0
    %t1 = icmp slt i32 %t0, 2
    br i1 %t1, label %BB2, label %BB3
  BB2:
    %t2 = load i32, i32* %l0
    %t3 = getelementptr [2 x i32], [2 x i32]* @a, i32 0, i32 %t2
    %t4 = load i32, i32* %t3
    %t5 = mul nsw i32 %t4, 2
    %t6 = load i32, i32* %l0
    %t7 = getelementptr [2 x i32], [2 x i32]* @a, i32 0, i32 %t6
    store i32 %t5, i32* %t7
    %t8 = load i32, i32* %l0
    %t9 = add nsw i32 %t8, 1
    store i32 %t9, i32* %l0
    br label %BB1
  BB3:
    ret void
  }
  ");
}

#[test]
fn float_comparison_is_ordered() {
  let src = r#"
float r;
void main() {
  int n = 4;
  if (r <= n) r = r % 1 + 0.0; else ;
}
"#;

  let generated = common::generate_src(src);
  assert_eq!(generated.codes(), vec!["C0040"]);

  let text = c1_ir::display::print_module(&generated.output.module);
  assert!(text.contains("fcmp ole double %t0, %t2"), "{}", text);
}
