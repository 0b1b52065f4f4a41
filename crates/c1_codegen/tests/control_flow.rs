mod common;

use c1_ir::{BlockId, ConstValue, Operand, Terminator};

#[test]
fn if_without_else_adds_then_and_next() {
  let generated = common::generate_src("void main() { int a; if (a < 1) a = 2; }");
  common::assert_verifies(&generated);

  let main = generated.function("main");
  assert_eq!(main.blocks.len(), 3);
  assert!(matches!(
    main.blocks.get(&BlockId::new(0)).terminator,
    Terminator::Branch { then_block, else_block, .. } if then_block == BlockId::new(1) && else_block == BlockId::new(2)
  ));
}

#[test]
fn if_with_else_adds_three_blocks() {
  let generated = common::generate_src("void main() { int a; if (a < 1) a = 2; else a = 3; }");
  common::assert_verifies(&generated);

  let main = generated.function("main");
  assert_eq!(main.blocks.len(), 4);
  for then_or_else in [1, 2] {
    assert_eq!(
      main.blocks.get(&BlockId::new(then_or_else)).terminator,
      Terminator::Goto { target: BlockId::new(3) }
    );
  }
}

#[test]
fn while_enters_through_predicate() {
  let generated = common::generate_src("void main() { int i; while (i != 0) i = i - 1; }");
  common::assert_verifies(&generated);

  let main = generated.function("main");
  let terminator = |index: u32| main.blocks.get(&BlockId::new(index)).terminator.clone();

  assert_eq!(main.blocks.len(), 4);
  assert_eq!(terminator(0), Terminator::Goto { target: BlockId::new(1) });
  assert!(matches!(
    terminator(1),
    Terminator::Branch { then_block, else_block, .. } if then_block == BlockId::new(2) && else_block == BlockId::new(3)
  ));
  assert_eq!(terminator(2), Terminator::Goto { target: BlockId::new(1) });
  assert_eq!(terminator(3), Terminator::Return);
}

#[test]
fn loop_with_false_condition_keeps_its_body() {
  let generated = common::generate_src("void main() { int i; while (1 > 2) i = 1; }");
  common::assert_verifies(&generated);

  let main = generated.function("main");
  assert_eq!(main.blocks.len(), 4);
  assert_eq!(main.blocks.get(&BlockId::new(2)).instructions.len(), 1);
}

#[test]
fn nested_control_flow_is_well_formed() {
  let src = r#"
int n = 10;
float acc;
void step() { acc = acc + 0.5; }
void main() {
  int i = 0;
  while (i < n) {
    if (i % 2 == 0) {
      step();
      if (acc > 100) { acc = 0; }
    } else {
      while (acc < i) step();
    }
    i = i + 1;
  }
  { ; }
}
"#;

  let generated = common::generate_src(src);
  assert!(generated.output.is_valid(), "{:?}", generated.output.diagnostics.messages());
  common::assert_verifies(&generated);

  let main = generated.function("main");
  assert!(
    main
      .blocks
      .get_all()
      .iter()
      .all(|b| !matches!(b.terminator, Terminator::Unreachable))
  );
}

#[test]
fn function_can_call_itself() {
  let generated = common::generate_src("int depth; void f() { if (depth > 0) { depth = depth - 1; f(); } }");
  assert!(generated.output.is_valid());
  common::assert_verifies(&generated);
}

#[test]
fn failed_predicate_still_lays_out_blocks() {
  let generated = common::generate_src("void main() { int a; if (b < 1) a = c; else a = 2; }");

  assert_eq!(generated.codes(), vec!["C0010", "C0010"]);
  assert!(!generated.output.is_valid());
  common::assert_verifies(&generated);

  let main = generated.function("main");
  assert_eq!(main.blocks.len(), 4);
  assert!(matches!(
    &main.blocks.get(&BlockId::new(0)).terminator,
    Terminator::Branch { condition: Operand::Const(ConstValue::Bool(false)), .. }
  ));
}

#[test]
fn every_function_returns() {
  let generated = common::generate_src("void a() { } void b() { a(); } void main() { b(); }");
  common::assert_verifies(&generated);

  for function in generated.output.module.functions.get_all() {
    assert!(function.defined);
    let last = function.blocks.get_all().last().map(|b| b.terminator.clone());
    assert_eq!(last, Some(Terminator::Return), "{}", function.name);
  }
}
