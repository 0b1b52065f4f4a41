mod common;

use proptest::prelude::*;

fn expression() -> impl Strategy<Value = String> {
  let leaf = prop_oneof![
    (0i32..1000).prop_map(|n| n.to_string()),
    Just("x".to_string()),
    Just("1.5".to_string()),
  ];

  leaf.prop_recursive(4, 32, 2, |inner| {
    prop_oneof![
      (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{} + {}", a, b)),
      (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{} * {}", a, b)),
      (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{} - {}", a, b)),
      inner.clone().prop_map(|a| format!("-({})", a)),
      inner.prop_map(|a| format!("({})", a)),
    ]
  })
}

proptest! {
    /// Well-formed expressions always parse
    #[test]
    fn generated_expressions_parse(exp in expression()) {
        let src = format!("int x;\nvoid main() {{ x = {}; }}", exp);
        prop_assert!(common::parse_errors(&src).is_empty());
    }

    /// The AST dump is a pure function of the input
    #[test]
    fn dump_is_deterministic(exp in expression()) {
        let src = format!("int x;\nvoid main() {{ x = {}; }}", exp);
        prop_assert_eq!(common::dump_ast(&src), common::dump_ast(&src));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Arbitrary token soup yields diagnostics, never a panic
    #[test]
    fn parser_handles_arbitrary_input(src in "[a-z0-9_{}()\\[\\];,=<>!+\\-*/% \n]*") {
        let _ = common::parse_errors(&src);
    }
}
