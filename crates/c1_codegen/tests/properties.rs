mod common;

use c1_ast::expressions::binary::ASTBinaryOperator;
use c1_codegen::{Folded, NumKind, fold_binary};
use c1_ir::{ConstValue, GlobalInit};
use c1_type::span::Span;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Expr {
  Lit(i32),
  Neg(Box<Expr>),
  Bin(Box<Expr>, char, Box<Expr>),
}

impl Expr {
  fn render(&self) -> String {
    match self {
      Expr::Lit(value) => value.to_string(),
      Expr::Neg(inner) => format!("-({})", inner.render()),
      Expr::Bin(left, op, right) => format!("({} {} {})", left.render(), op, right.render()),
    }
  }

  /// Native fixed-width evaluation; `None` on division by zero.
  fn eval(&self) -> Option<i32> {
    match self {
      Expr::Lit(value) => Some(*value),
      Expr::Neg(inner) => inner.eval().map(i32::wrapping_neg),
      Expr::Bin(left, op, right) => {
        let (l, r) = (left.eval()?, right.eval()?);
        match op {
          '+' => Some(l.wrapping_add(r)),
          '-' => Some(l.wrapping_sub(r)),
          '*' => Some(l.wrapping_mul(r)),
          '/' | '%' if r == 0 => None,
          '/' => Some(l.wrapping_div(r)),
          '%' => Some(l.wrapping_rem(r)),
          _ => unreachable!(),
        }
      },
    }
  }
}

fn expr() -> impl Strategy<Value = Expr> {
  let leaf = prop_oneof![(0i32..100_000).prop_map(Expr::Lit), Just(Expr::Lit(i32::MAX))];

  leaf.prop_recursive(5, 48, 2, |inner| {
    prop_oneof![
      inner.clone().prop_map(|e| Expr::Neg(Box::new(e))),
      (inner.clone(), prop::sample::select(vec!['+', '-', '*', '/', '%']), inner)
        .prop_map(|(l, op, r)| Expr::Bin(Box::new(l), op, Box::new(r))),
    ]
  })
}

proptest! {
    /// Folding a global initializer matches native wrapping arithmetic
    #[test]
    fn folding_matches_native_arithmetic(e in expr()) {
        let generated = common::generate_src(&format!("const int r = {};", e.render()));

        match e.eval() {
            Some(expected) => {
                prop_assert!(generated.output.diagnostics.is_empty());
                let init = generated.output.module.globals.get_all()[0].init.clone();
                prop_assert_eq!(init, Some(GlobalInit::Scalar(ConstValue::Int(expected))));
            },
            None => {
                prop_assert_eq!(generated.codes(), vec!["C0041".to_string()]);
            },
        }
    }

    /// Mixed operands always fold to a float holding the exact widened integer
    #[test]
    fn mixed_operands_fold_to_float(a in any::<i32>(), b in -1.0e6f64..1.0e6) {
        let folded = fold_binary(ASTBinaryOperator::Add, Folded::Int(a), Folded::Float(b), &Span::default());
        prop_assert_eq!(folded.map(|f| f.kind()), Ok(NumKind::Float));

        let widened = fold_binary(ASTBinaryOperator::Multiply, Folded::Int(a), Folded::Float(1.0), &Span::default());
        prop_assert_eq!(widened, Ok(Folded::Float(a as f64)));
    }

    /// Lowering is a pure function of the source
    #[test]
    fn generation_is_deterministic(e in expr(), depth in 0usize..4) {
        let mut body = format!("x = {};", e.render());
        for _ in 0..depth {
            body = format!("if (x < 1) {{ {} }} else while (x > 2) {{ {} }}", body, body);
        }
        let src = format!("int x;\nvoid main() {{ {} }}", body);

        let first = common::generate_src(&src);
        let second = common::generate_src(&src);
        common::assert_verifies(&first);
        prop_assert_eq!(
            c1_ir::display::print_module(&first.output.module),
            c1_ir::display::print_module(&second.output.module)
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A name can be declared once per scope but shadowed in any nested one
    #[test]
    fn redeclaration_versus_shadowing(depth in 1usize..6, clash in any::<bool>()) {
        let mut body = String::from("int v;");
        if clash {
            body.push_str(" float v;");
        }
        for _ in 0..depth {
            body = format!("int v; {{ {} }}", body);
        }
        let src = format!("void main() {{ {} }}", body);

        let codes = common::codes(&src);
        if clash {
            prop_assert_eq!(codes, vec!["C0002".to_string()]);
        } else {
            prop_assert!(codes.is_empty());
        }
    }
}
