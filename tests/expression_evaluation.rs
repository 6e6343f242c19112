//! End-to-end evaluation through the public entry points

use popo_utility::{
    ErrorCategory, EvaluatorConfig, ExpressionError, ExpressionResult, MathExpressionEngine,
    evaluate, try_evaluate,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::f64::consts::PI;

fn assert_close(actual: (i64, f64), expected: (i64, f64)) {
    assert_eq!(actual.0, expected.0, "int part of {actual:?}");
    assert!(
        (actual.1 - expected.1).abs() < 1e-9,
        "float part of {actual:?}, expected {expected:?}"
    );
}

#[rstest]
#[case(10.0, 5.0, 3.0, "a + b + c", (18, 18.0))]
#[case(10.0, 5.0, 3.0, "a - b - c", (2, 2.0))]
#[case(2.0, 3.0, 4.0, "a * b * c", (24, 24.0))]
#[case(20.0, 4.0, 2.0, "a / b / c", (2, 2.5))]
#[case(1.5, 1.25, 0.0, "a + b + c", (2, 2.75))]
#[case(-1.5, -1.25, 0.0, "a + b + c", (-2, -2.75))]
fn test_basic_arithmetic(
    #[case] a: f64,
    #[case] b: f64,
    #[case] c: f64,
    #[case] expression: &str,
    #[case] expected: (i64, f64),
) {
    assert_eq!(evaluate(a, b, c, expression), expected);
}

#[rstest]
#[case("sqrt(16)", (4, 4.0))]
#[case("pow(2, 3)", (8, 8.0))]
#[case("abs(-5)", (5, 5.0))]
#[case("max(10, 5, 15)", (15, 15.0))]
#[case("min(10, 5, 15)", (5, 5.0))]
#[case("ceil(3.2)", (4, 4.0))]
#[case("floor(3.8)", (3, 3.0))]
#[case("round(3.6)", (4, 4.0))]
#[case("round(3.4)", (3, 3.0))]
#[case("round(2.5)", (2, 2.0))]
#[case("factorial(5)", (120, 120.0))]
#[case("gcd(12, 18)", (6, 6.0))]
#[case("lcm(4, 6)", (12, 12.0))]
#[case("hypot(3, 4)", (5, 5.0))]
#[case("log(8, 2)", (3, 3.0))]
#[case("cos(0)", (1, 1.0))]
fn test_whitelisted_functions(#[case] expression: &str, #[case] expected: (i64, f64)) {
    assert_close(evaluate(0.0, 0.0, 0.0, expression), expected);
}

#[test]
fn test_trigonometry_and_constants() {
    assert_close(evaluate(0.0, 0.0, 0.0, "sin(pi/2)"), (1, 1.0));
    assert_close(evaluate(1.0, 0.0, 0.0, "a * pi"), (3, PI));
    assert_close(evaluate(0.0, 0.0, 0.0, "e"), (2, std::f64::consts::E));
    assert_close(evaluate(0.0, 0.0, 0.0, "tau / 2"), (3, PI));
}

#[rstest]
#[case(3.0, 4.0, 0.0, "sqrt(a*a + b*b)", (5, 5.0))]
#[case(8.0, 2.0, 3.0, "pow(sqrt(a), b) + c", (11, 11.0))]
#[case(7.0, 2.0, 0.0, "a // b", (3, 3.0))]
#[case(-7.0, 2.0, 0.0, "a // b", (-4, -4.0))]
#[case(-7.0, 3.0, 0.0, "a % b", (2, 2.0))]
#[case(2.0, 10.0, 0.0, "a ** b", (1024, 1024.0))]
#[case(2.0, 0.0, 0.0, "-a ** 2", (-4, -4.0))]
#[case(5.0, 3.0, 0.0, "a if a > b else b", (5, 5.0))]
#[case(1.0, 2.0, 3.0, "a < b < c", (1, 1.0))]
#[case(3.0, 2.0, 1.0, "a < b < c", (0, 0.0))]
#[case(0.0, 7.0, 0.0, "a or b", (7, 7.0))]
#[case(0.0, 7.0, 0.0, "not a", (1, 1.0))]
#[case(0.0, 0.0, 0.0, "1j * 1j", (-1, -1.0))]
#[case(0.0, 0.0, 0.0, "True + 1", (2, 2.0))]
fn test_composite_expressions(
    #[case] a: f64,
    #[case] b: f64,
    #[case] c: f64,
    #[case] expression: &str,
    #[case] expected: (i64, f64),
) {
    assert_close(evaluate(a, b, c, expression), expected);
}

#[rstest]
#[case("inf", (999_999, 999_999.0))]
#[case("-inf", (-999_999, -999_999.0))]
#[case("1e308 * 10", (999_999, 999_999.0))]
#[case("nan", (0, 0.0))]
#[case("inf - inf", (0, 0.0))]
fn test_non_finite_results_are_normalised(#[case] expression: &str, #[case] expected: (i64, f64)) {
    assert_eq!(evaluate(0.0, 0.0, 0.0, expression), expected);
}

#[rstest]
#[case("3**40 % 7", (4, 4.0))]
#[case("factorial(23) % 1000", (0, 0.0))]
#[case("factorial(23) // 10**19", (2585, 2585.0))]
#[case("2**64 + 1 - 2**64", (1, 1.0))]
#[case("(2**100 + 1) % 2", (1, 1.0))]
#[case("99999999999999999999 % 10", (9, 9.0))]
#[case("10**400 // 10**399", (10, 10.0))]
#[case("-(2**63) // -1 - 2**63 + 1", (1, 1.0))]
#[case("2**70", (i64::MAX, 1_180_591_620_717_411_303_424.0))]
fn test_integers_stay_exact(#[case] expression: &str, #[case] expected: (i64, f64)) {
    assert_eq!(evaluate(0.0, 0.0, 0.0, expression), expected);
}

#[rstest]
#[case("10**400")]
#[case("10**400 + 1.0")]
#[case("sqrt(10**400)")]
#[case("9**9**9")]
fn test_integers_beyond_float_range_overflow(#[case] expression: &str) {
    let err = try_evaluate(0.0, 0.0, 0.0, expression).unwrap_err();
    assert!(
        matches!(err, ExpressionError::Evaluation(ref e) if e.is_overflow()),
        "{expression}: {err}"
    );
    assert_eq!(evaluate(0.0, 0.0, 0.0, expression), (0, 0.0));
}

#[test]
fn test_long_sums_evaluate() {
    let sum = vec!["1"; 1500].join("+");
    assert_eq!(evaluate(0.0, 0.0, 0.0, &sum), (1500, 1500.0));
    let sum = vec!["a"; 1000].join(" + ");
    assert_eq!(evaluate(0.5, 0.0, 0.0, &sum), (500, 500.0));
}

#[rstest]
#[case(1.0, 0.0, "a / b")]
#[case(1.0, 0.0, "a // b")]
#[case(1.0, 0.0, "a % b")]
#[case(-1.0, 0.0, "sqrt(a)")]
#[case(0.0, 0.0, "log(a)")]
#[case(1000.0, 0.0, "exp(a)")]
#[case(-8.0, 0.0, "a ** (1/3)")]
#[case(1.0, 0.0, "invalid_function(a)")]
#[case(1.0, 0.0, "d + a")]
#[case(1.0, 0.0, "pi(a)")]
#[case(1.0, 0.0, "sqrt")]
#[case(1.0, 0.0, "sqrt(a, b)")]
#[case(171.0, 0.0, "factorial(a)")]
#[case(1.0, 2.0, "a +* b")]
#[case(1.0, 2.0, "")]
fn test_failures_yield_zero(#[case] a: f64, #[case] b: f64, #[case] expression: &str) {
    assert_eq!(evaluate(a, b, 0.0, expression), (0, 0.0));
}

#[test]
fn test_failure_categories() {
    let err = try_evaluate(1.0, 0.0, 0.0, "a / b").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::EvaluationError);
    assert!(matches!(err, ExpressionError::Evaluation(ref e) if e.is_division_by_zero()));

    let err = try_evaluate(0.0, 0.0, 0.0, "import os").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::RejectedSyntax);

    let err = try_evaluate(0.0, 0.0, 0.0, "sqrt(-1)").unwrap_err();
    assert!(matches!(err, ExpressionError::Evaluation(ref e) if e.is_domain_error()));
}

#[test]
fn test_operands_shadow_nothing_between_calls() {
    assert_eq!(evaluate(1.0, 2.0, 3.0, "a + b + c"), (6, 6.0));
    assert_eq!(evaluate(4.0, 5.0, 6.0, "a + b + c"), (15, 15.0));
    assert_eq!(evaluate(1.0, 2.0, 3.0, "a + b + c"), (6, 6.0));
}

#[test]
fn test_idempotent_across_engines() {
    let cached = MathExpressionEngine::new();
    let uncached = MathExpressionEngine::with_config(EvaluatorConfig::no_cache());
    let expression = "round(a / b, 2) + floor(c) * pi";
    let first = cached.evaluate(7.0, 3.0, 2.5, expression);
    assert_eq!(cached.evaluate(7.0, 3.0, 2.5, expression), first);
    assert_eq!(uncached.evaluate(7.0, 3.0, 2.5, expression), first);
    assert_eq!(cached.cached_expressions(), 1);
}

#[test]
fn test_limits_from_config() {
    let engine = MathExpressionEngine::with_config(EvaluatorConfig::strict());
    let nested = format!("{}a{}", "(".repeat(64), ")".repeat(64));
    assert_eq!(engine.evaluate(1.0, 0.0, 0.0, &nested), ExpressionResult::ZERO);
    assert_eq!(engine.evaluate(1.0, 0.0, 0.0, "factorial(21)"), ExpressionResult::ZERO);
    assert_eq!(
        engine.evaluate(1.0, 0.0, 0.0, "factorial(20)").int,
        2_432_902_008_176_640_000
    );

    let long = "a + ".repeat(2000) + "a";
    assert!(matches!(
        try_evaluate(1.0, 0.0, 0.0, &long),
        Err(ExpressionError::TooLong { .. })
    ));
}
