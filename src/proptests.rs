//! Property-based tests for the compiler and the integrator.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::expression::compiler::compile;
    use crate::expression::expr::{
        BinaryOp,
        Constant,
        Expr,
        Function
    };
    use crate::expression::formatter::to_text;
    use crate::expression::parser::parse;
    use crate::expression::symboltable::symbol_table;
    use crate::integration::integrationerror::IntegrationError;
    use crate::integration::trapezoid::integrate;

    fn bound() -> impl Strategy<Value = f64> {
        -100.0..100.0f64
    }

    fn subdivisions() -> impl Strategy<Value = usize> {
        1usize..=200
    }

    // 非負且能以十進位精確表示的常數，讓文字輸出可以原樣解析回來
    fn literal() -> impl Strategy<Value = Expr> {
        (0u32..=64).prop_map(|v| Expr::Number(v as f64 / 4.0))
    }

    fn leaf() -> impl Strategy<Value = Expr> {
        prop_oneof![
            literal(),
            Just(Expr::Variable),
            Just(Expr::Constant(Constant::Pi)),
            Just(Expr::Constant(Constant::E)),
        ]
    }

    fn binary_op() -> impl Strategy<Value = BinaryOp> {
        prop_oneof![
            Just(BinaryOp::Add),
            Just(BinaryOp::Sub),
            Just(BinaryOp::Mul),
            Just(BinaryOp::Div),
            Just(BinaryOp::Pow),
        ]
    }

    fn unary_function() -> impl Strategy<Value = Function> {
        prop_oneof![
            Just(Function::Sin),
            Just(Function::Exp),
            Just(Function::Ln),
            Just(Function::Sqrt),
            Just(Function::Abs),
        ]
    }

    fn expr_tree() -> impl Strategy<Value = Expr> {
        leaf().prop_recursive(4, 32, 2, |inner| {
            prop_oneof![
                inner.clone().prop_map(Expr::neg),
                (binary_op(), inner.clone(), inner.clone())
                    .prop_map(|(op, lhs, rhs)| Expr::binary(op, lhs, rhs)),
                (unary_function(), inner.clone())
                    .prop_map(|(function, arg)| Expr::Call(function, vec![arg])),
                (inner.clone(), inner)
                    .prop_map(|(base, exponent)| Expr::Call(Function::Pow, vec![base, exponent])),
            ]
        })
    }

    proptest! {
        // Sampling grid

        #[test]
        fn samples_include_both_endpoints(a in bound(), b in bound(), n in subdivisions()) {
            let estimate = integrate(&|x: f64| x.sin(), a, b, n).unwrap();
            prop_assert_eq!(estimate.sample_xs().len(), n + 1);
            prop_assert_eq!(estimate.sample_ys().len(), n + 1);
            prop_assert_eq!(estimate.sample_xs()[0], a);
            prop_assert_eq!(estimate.sample_xs()[n], b);
        }

        #[test]
        fn samples_are_monotonic(a in bound(), b in bound(), n in subdivisions()) {
            prop_assume!((a - b).abs() > 1e-6);
            let estimate = integrate(&|x: f64| x, a, b, n).unwrap();
            let xs = estimate.sample_xs();
            for i in 0..n {
                if a < b {
                    prop_assert!(xs[i] < xs[i + 1]);
                } else {
                    prop_assert!(xs[i] > xs[i + 1]);
                }
            }
        }

        // Exactness on polynomials of degree <= 1

        #[test]
        fn constant_integrand_is_exact(c in -50.0..50.0f64, a in bound(), b in bound(), n in subdivisions()) {
            let estimate = integrate(&move |_x: f64| c, a, b, n).unwrap();
            let expected = c * (b - a);
            prop_assert!((estimate.area() - expected).abs() <= 1e-9 * (1.0 + expected.abs()));
        }

        #[test]
        fn linear_integrand_is_exact(a in bound(), b in bound(), n in subdivisions()) {
            let compiled = compile("x").unwrap();
            let estimate = integrate(compiled.function(), a, b, n).unwrap();
            let expected = (b * b - a * a) / 2.0;
            prop_assert!((estimate.area() - expected).abs() <= 1e-9 * (1.0 + a * a + b * b));
        }

        #[test]
        fn reversed_interval_negates_area(a in bound(), b in bound(), n in subdivisions()) {
            let f = |x: f64| x * x;
            let forward = integrate(&f, a, b, n).unwrap().area();
            let backward = integrate(&f, b, a, n).unwrap().area();
            prop_assert!((forward + backward).abs() <= 1e-8 * (1.0 + a * a + b * b));
        }

        #[test]
        fn zero_subdivisions_are_rejected(a in bound(), b in bound()) {
            prop_assert_eq!(
                integrate(&|x: f64| x, a, b, 0).unwrap_err(),
                IntegrationError::InvalidSubdivision { n: 0 }
            );
        }

        // Restricted language

        #[test]
        fn unknown_names_never_compile(name in "[a-z_][a-z0-9_]{0,10}") {
            prop_assume!(symbol_table().lookup(&name).is_none());
            prop_assert!(compile(&name).is_err());
            let call = format!("{}(x)", name);
            prop_assert!(compile(&call).is_err());
            let qualified = format!("np.{}(x) + 1", name);
            prop_assert!(compile(&qualified).is_err());
        }

        #[test]
        fn statement_syntax_never_compiles(
            prefix in "[x0-9+*/ ]{0,6}",
            symbol in prop::sample::select(vec!["=", ";", "'", "\"", "[", "]", "{", "}", ":", "#", "@", "!", "<"]),
            suffix in "[x0-9+*/ ]{0,6}",
        ) {
            let text = format!("{}{}{}", prefix, symbol, suffix);
            prop_assert!(compile(&text).is_err());
        }

        // Formatter

        #[test]
        fn text_rendering_parses_back(expr in expr_tree()) {
            let text = to_text(&expr);
            prop_assert_eq!(parse(&text).unwrap(), expr, "rendered as {}", text);
        }

        #[test]
        fn display_never_changes_evaluation(expr in expr_tree(), x in -3.0..3.0f64) {
            let text = to_text(&expr);
            let compiled = compile(&text).unwrap();
            let expected = expr.eval(x);
            let actual = compiled.function().eval(x);
            prop_assert!(
                expected.to_bits() == actual.to_bits() || (expected.is_nan() && actual.is_nan()),
                "{} at {}: {} vs {}", text, x, expected, actual
            );
        }
    }
}
