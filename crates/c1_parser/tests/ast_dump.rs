mod common;

use insta::assert_snapshot;

#[test]
fn ast_globals() {
  let ast = common::dump_ast(
    r#"
const int n = 10;
float scale = -0.5, v[] = {1.0, 2.5};
"#,
  );

  assert_snapshot!(ast, @r#"
  (Program
    (Var const int "n" = 10)
    (Var float "scale" = (- 0.5))
    (Var float "v"[2] = {1.0 2.5}))
  "#);
}

#[test]
fn ast_loop_with_condition() {
  let ast = common::dump_ast(
    r#"
int n = 10;
void main() {
  while (n < 20) {
    n = n + 1;
  }
}
"#,
  );

  assert_snapshot!(ast, @r#"
  (Program
    (Var int "n" = 10)
    (Function "main"
      (Block
        (While (< (LValue "n") 20)
          (Block
            (Assign (LValue "n") (+ (LValue "n") 1)))))))
  "#);
}

#[test]
fn ast_if_else_and_calls() {
  let ast = common::dump_ast(
    r#"
int a[4];
void f() { }
void main() {
  if (a[0] != 0x10) f(); else { a[1] = (2 + 3) * 4; }
  ;
}
"#,
  );

  assert_snapshot!(ast, @r#"
  (Program
    (Var int "a"[4])
    (Function "f"
      (Block))
    (Function "main"
      (Block
        (If (!= (Index "a" 0) 16)
          (Call "f")
          (Block
            (Assign (Index "a" 1) (* (+ 2 3) 4))))
        (Empty))))
  "#);
}
