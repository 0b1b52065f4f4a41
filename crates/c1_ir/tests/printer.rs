use c1_ir::{
  BinaryOp, ComparePredicate, ConstValue, FunctionBuilder, GlobalData, GlobalInit, Instr, IrModule, IrType, Operand,
  ScalarType, Terminator, display::print_module, verify_module,
};
use insta::assert_snapshot;

/// `int a[2] = {1, 2}; void main() { int i = 0; while (i < 2) { a[i] = a[i] * 2; i = i + 1; } }`
fn counting_loop() -> IrModule {
  let mut module = IrModule::new("loop");
  let array = module.add_global(GlobalData {
    name: "a".to_string(),
    ty: IrType::Array {
      element: ScalarType::I32,
      len: 2,
    },
    constant: false,
    init: Some(GlobalInit::Array(vec![ConstValue::Int(1), ConstValue::Int(2)])),
  });

  let main = module.declare_function("main");
  let mut b = FunctionBuilder::new("main");
  let i = b.alloc_local("i", IrType::i32());
  b.emit(Instr::Store {
    ptr: Operand::Local(i),
    value: Operand::Const(ConstValue::Int(0)),
  });

  let pred = b.create_block();
  let body = b.create_block();
  let next = b.create_block();
  b.terminate(Terminator::Goto { target: pred });

  b.switch_to_block(pred);
  let t0 = b.alloc_temp(IrType::i32());
  b.emit(Instr::Load {
    dest: t0,
    ptr: Operand::Local(i),
  });
  let t1 = b.alloc_temp(IrType::i1());
  b.emit(Instr::Compare {
    dest: t1,
    predicate: ComparePredicate::Slt,
    left: Operand::Temp(t0),
    right: Operand::Const(ConstValue::Int(2)),
  });
  b.terminate(Terminator::Branch {
    condition: Operand::Temp(t1),
    then_block: body,
    else_block: next,
  });

  b.switch_to_block(body);
  let t2 = b.alloc_temp(IrType::i32());
  b.emit(Instr::Load {
    dest: t2,
    ptr: Operand::Local(i),
  });
  let t3 = b.alloc_temp(IrType::pointer_to(IrType::i32()));
  b.emit(Instr::ElementPtr {
    dest: t3,
    base: Operand::Global(array),
    index: Operand::Temp(t2),
  });
  let t4 = b.alloc_temp(IrType::i32());
  b.emit(Instr::Load {
    dest: t4,
    ptr: Operand::Temp(t3),
  });
  let t5 = b.alloc_temp(IrType::i32());
  b.emit(Instr::Binary {
    dest: t5,
    op: BinaryOp::Mul,
    left: Operand::Temp(t4),
    right: Operand::Const(ConstValue::Int(2)),
  });
  b.emit(Instr::Store {
    ptr: Operand::Temp(t3),
    value: Operand::Temp(t5),
  });
  let t6 = b.alloc_temp(IrType::i32());
  b.emit(Instr::Load {
    dest: t6,
    ptr: Operand::Local(i),
  });
  let t7 = b.alloc_temp(IrType::i32());
  b.emit(Instr::Binary {
    dest: t7,
    op: BinaryOp::Add,
    left: Operand::Temp(t6),
    right: Operand::Const(ConstValue::Int(1)),
  });
  b.emit(Instr::Store {
    ptr: Operand::Local(i),
    value: Operand::Temp(t7),
  });
  b.terminate(Terminator::Goto { target: pred });

  b.switch_to_block(next);
  b.terminate(Terminator::Return);

  module.define_function(main, b.finish());
  module
}

#[test]
fn hand_built_loop_verifies() {
  assert_eq!(verify_module(&counting_loop()), Ok(()));
}

#[test]
fn hand_built_loop_text() {
  assert_snapshot!(print_module(&counting_loop()), @r"
  ; ModuleID = 'loop'

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
    store i32 %t5, i32* %t3
    %t6 = load i32, i32* %l0
    %t7 = add nsw i32 %t6, 1
    store i32 %t7, i32* %l0
    br label %BB1
  BB3:
    ret void
  }
  ");
}

#[test]
fn json_export_names_every_function() {
  let json = counting_loop().to_json().expect("serializable");
  let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

  assert_eq!(value["name"], "loop");
  assert_eq!(value["functions"][0]["name"], "main");
  assert_eq!(value["functions"][0]["blocks"].as_array().map(|b| b.len()), Some(4));
  assert_eq!(value["globals"][0]["init"]["array"][1]["value"], 2);
}

#[test]
fn json_export_tags_instructions_apart_from_their_operator() {
  let json = counting_loop().to_json().expect("serializable");
  let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
  let body = &value["functions"][0]["blocks"][2]["instructions"];

  assert_eq!(value["functions"][0]["blocks"][0]["instructions"][0]["instr"], "store");
  assert_eq!(body[3]["instr"], "binary");
  assert_eq!(body[3]["op"], "mul");
}
