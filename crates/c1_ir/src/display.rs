use std::fmt::Write;

use crate::{
  Block, ConstValue, FunctionIr, GlobalData, GlobalInit, Instr, IrModule, IrType, Operand, Terminator, UnaryOp,
};

/// Pretty printer producing LLVM-flavoured assembly text.
pub struct IrPrinter<'a> {
  module: &'a IrModule,
  output: String,
}

impl<'a> IrPrinter<'a> {
  pub fn new(module: &'a IrModule) -> Self {
    Self {
      module,
      output: String::new(),
    }
  }

  pub fn print(mut self) -> String {
    writeln!(self.output, "; ModuleID = '{}'", self.module.name).unwrap();

    if !self.module.globals.is_empty() {
      writeln!(self.output).unwrap();
    }
    for global in self.module.globals.get_all() {
      self.print_global(global);
    }

    for func in self.module.functions.get_all() {
      writeln!(self.output).unwrap();
      self.print_function(func);
    }

    self.output
  }

  fn print_global(
    &mut self,
    global: &GlobalData,
  ) {
    let linkage = if global.constant { "constant" } else { "global" };
    let init = match &global.init {
      None => "undef".to_string(),
      Some(GlobalInit::Scalar(value)) => format_const(value),
      Some(GlobalInit::Array(values)) => {
        let elements: Vec<String> = values
          .iter()
          .map(|v| format!("{} {}", v.scalar_type(), format_const(v)))
          .collect();
        format!("[{}]", elements.join(", "))
      },
    };

    writeln!(self.output, "@{} = {} {} {}", global.name, linkage, global.ty, init).unwrap();
  }

  fn print_function(
    &mut self,
    func: &FunctionIr,
  ) {
    if !func.defined {
      writeln!(self.output, "declare void @{}()", func.name).unwrap();
      return;
    }

    writeln!(self.output, "define void @{}() {{", func.name).unwrap();

    for (id, block) in func.blocks.iter() {
      writeln!(self.output, "{}:", block.label).unwrap();

      if id == func.entry_block {
        for (local_id, local) in func.locals.iter() {
          writeln!(self.output, "  %l{} = alloca {} ; {}", local_id.index(), local.ty, local.name).unwrap();
        }
      }

      self.print_block(func, block);
    }

    writeln!(self.output, "}}").unwrap();
  }

  fn print_block(
    &mut self,
    func: &FunctionIr,
    block: &Block,
  ) {
    for instr in &block.instructions {
      write!(self.output, "  ").unwrap();
      self.print_instr(func, instr);
    }

    write!(self.output, "  ").unwrap();
    self.print_terminator(func, &block.terminator);
  }

  fn print_instr(
    &mut self,
    func: &FunctionIr,
    instr: &Instr,
  ) {
    match instr {
      Instr::Load { dest, ptr } => {
        let ty = func.temp_type(*dest);
        writeln!(
          self.output,
          "%t{} = load {}, {}* {}",
          dest.index(),
          ty,
          ty,
          self.format_operand(ptr)
        )
        .unwrap();
      },
      Instr::Store { ptr, value } => {
        let ty = self.operand_type(func, value);
        writeln!(
          self.output,
          "store {} {}, {}* {}",
          ty,
          self.format_operand(value),
          ty,
          self.format_operand(ptr)
        )
        .unwrap();
      },
      Instr::ElementPtr { dest, base, index } => {
        let base_ty = self.operand_type(func, base);
        let array_ty = base_ty.pointee().cloned().unwrap_or(IrType::Void);
        writeln!(
          self.output,
          "%t{} = getelementptr {}, {} {}, i32 0, i32 {}",
          dest.index(),
          array_ty,
          base_ty,
          self.format_operand(base),
          self.format_operand(index)
        )
        .unwrap();
      },
      Instr::Binary { dest, op, left, right } => {
        writeln!(
          self.output,
          "%t{} = {} {} {}, {}",
          dest.index(),
          op.mnemonic(),
          func.temp_type(*dest),
          self.format_operand(left),
          self.format_operand(right)
        )
        .unwrap();
      },
      Instr::Unary { dest, op, operand } => {
        let ty = func.temp_type(*dest);
        match op {
          UnaryOp::Neg => {
            writeln!(self.output, "%t{} = sub nsw {} 0, {}", dest.index(), ty, self.format_operand(operand)).unwrap()
          },
          UnaryOp::FNeg => {
            writeln!(self.output, "%t{} = fneg {} {}", dest.index(), ty, self.format_operand(operand)).unwrap()
          },
        }
      },
      Instr::Compare {
        dest,
        predicate,
        left,
        right,
      } => {
        let instruction = if predicate.is_float() { "fcmp" } else { "icmp" };
        writeln!(
          self.output,
          "%t{} = {} {} {} {}, {}",
          dest.index(),
          instruction,
          predicate.mnemonic(),
          self.operand_type(func, left),
          self.format_operand(left),
          self.format_operand(right)
        )
        .unwrap();
      },
      Instr::Cast { dest, op, source } => {
        writeln!(
          self.output,
          "%t{} = {} {} {} to {}",
          dest.index(),
          op.mnemonic(),
          self.operand_type(func, source),
          self.format_operand(source),
          func.temp_type(*dest)
        )
        .unwrap();
      },
      Instr::Call { callee } => {
        let name = self
          .module
          .functions
          .try_get(callee)
          .map(|f| f.name.as_str())
          .unwrap_or("<invalid>");
        writeln!(self.output, "call void @{}()", name).unwrap();
      },
    }
  }

  fn print_terminator(
    &mut self,
    func: &FunctionIr,
    term: &Terminator,
  ) {
    match term {
      Terminator::Goto { target } => {
        writeln!(self.output, "br label %{}", block_label(func, target.index())).unwrap();
      },
      Terminator::Branch {
        condition,
        then_block,
        else_block,
      } => {
        writeln!(
          self.output,
          "br i1 {}, label %{}, label %{}",
          self.format_operand(condition),
          block_label(func, then_block.index()),
          block_label(func, else_block.index())
        )
        .unwrap();
      },
      Terminator::Return => writeln!(self.output, "ret void").unwrap(),
      Terminator::Unreachable => writeln!(self.output, "unreachable").unwrap(),
    }
  }

  fn format_operand(
    &self,
    operand: &Operand,
  ) -> String {
    match operand {
      Operand::Temp(temp) => format!("%t{}", temp.index()),
      Operand::Local(local) => format!("%l{}", local.index()),
      Operand::Global(global) => match self.module.globals.try_get(global) {
        Some(data) => format!("@{}", data.name),
        None => format!("@<invalid {}>", global.index()),
      },
      Operand::Const(value) => format_const(value),
    }
  }

  fn operand_type(
    &self,
    func: &FunctionIr,
    operand: &Operand,
  ) -> IrType {
    match operand {
      Operand::Temp(temp) => func
        .temps
        .try_get(temp)
        .map(|t| t.ty.clone())
        .unwrap_or(IrType::Void),
      Operand::Local(local) => func
        .locals
        .try_get(local)
        .map(|l| IrType::pointer_to(l.ty.clone()))
        .unwrap_or(IrType::Void),
      Operand::Global(global) => self
        .module
        .globals
        .try_get(global)
        .map(|g| IrType::pointer_to(g.ty.clone()))
        .unwrap_or(IrType::Void),
      Operand::Const(value) => IrType::Scalar(value.scalar_type()),
    }
  }
}

fn block_label(
  func: &FunctionIr,
  index: u32,
) -> String {
  func
    .blocks
    .get_all()
    .get(index as usize)
    .map(|b| b.label.clone())
    .unwrap_or_else(|| format!("<invalid {}>", index))
}

/// Constant in assembly syntax. Doubles always carry a decimal point;
/// non-finite values use the exact hexadecimal form.
pub fn format_const(value: &ConstValue) -> String {
  match value {
    ConstValue::Int(v) => v.to_string(),
    ConstValue::Bool(v) => v.to_string(),
    ConstValue::Float(v) => format_double(v.into_inner()),
  }
}

fn format_double(value: f64) -> String {
  if !value.is_finite() {
    return format!("0x{:016X}", value.to_bits());
  }

  let text = format!("{:?}", value);
  if text.contains('.') {
    text
  } else if let Some(pos) = text.find('e') {
    format!("{}.0{}", &text[..pos], &text[pos..])
  } else {
    format!("{}.0", text)
  }
}

pub fn print_module(module: &IrModule) -> String {
  IrPrinter::new(module).print()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn doubles_always_have_a_decimal_point() {
    assert_eq!(format_double(1.0), "1.0");
    assert_eq!(format_double(2.5), "2.5");
    assert_eq!(format_double(1e300), "1.0e300");
    assert_eq!(format_double(f64::INFINITY), "0x7FF0000000000000");
  }

  #[test]
  fn prints_globals_and_declarations() {
    let mut module = IrModule::new("demo");
    module.add_global(GlobalData {
      name: "n".to_string(),
      ty: IrType::i32(),
      constant: true,
      init: Some(GlobalInit::Scalar(ConstValue::Int(10))),
    });
    module.add_global(GlobalData {
      name: "u".to_string(),
      ty: IrType::f64(),
      constant: false,
      init: None,
    });
    module.declare_function("f");

    assert_eq!(
      print_module(&module),
      "; ModuleID = 'demo'\n\n@n = constant i32 10\n@u = global double undef\n\ndeclare void @f()\n"
    );
  }
}
