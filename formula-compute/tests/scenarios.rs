use assert_float_eq::{
    afe_abs,
    afe_relative_error_msg,
    afe_is_relative_eq,
    assert_float_relative_eq,
};
use formula_compute::similarity::{compare, CompareOptions, ComparisonResult, Error};
use formula_compute::symbolic::{
    expr::{Assumption, Assumptions},
    CasEngine,
};
use pretty_assertions::assert_eq;
use test_log::test;

fn compare_default(formula1: &str, formula2: &str) -> ComparisonResult {
    compare(&CasEngine::default(), formula1, formula2, &CompareOptions::default()).unwrap()
}

#[test]
fn reordered_sum() {
    let result = compare_default("a+b", "b+a");
    assert!(result.equivalent);
    assert_eq!(result.similarity, 100.0);
    assert_eq!(result.simplified1, result.simplified2);
}

#[test]
fn same_shape_different_last_variable() {
    // `c` and `d` are both the third symbol in sorted order, so both become `x_{2}`
    let result = compare_default("a*b+c", "a*b+d");
    assert!(result.equivalent);
    assert_eq!(result.similarity, 100.0);
    assert_eq!(result.simplified2, "x_{0} x_{1} + x_{2}");
}

#[test]
fn tangent_identity_under_assumptions() {
    let options = CompareOptions::default()
        .with_assumptions("x", Assumptions::new().with(Assumption::Real));
    let result = compare(
        &CasEngine::default(),
        "\\frac{\\sin(x)}{\\cos(x)}",
        "\\tan(x)",
        &options,
    ).unwrap();
    assert!(result.equivalent);
    assert_eq!(result.similarity, 100.0);
    assert_eq!(result.simplified1, "\\tan\\left(x_{0}\\right)");
}

#[test]
fn sum_and_difference_share_only_atoms() {
    let result = compare_default("a+b", "a-b");
    assert!(!result.equivalent);
    assert_eq!(result.similarity, 0.0);

    // the shared atoms are still reported for highlighting
    // `a - b` sorts as `-x_{1} + x_{0}`
    assert_eq!(result.common_subexpressions, ["x_{1}", "x_{0}"]);

    // atoms count when the minimum match size is lowered: 200 * 1 / (3 + 5)
    let options = CompareOptions::default().with_min_match_size(1);
    let result = compare(&CasEngine::default(), "a+b", "a-b", &options).unwrap();
    assert_float_relative_eq!(result.similarity, 25.0);
}

#[test]
fn shared_product_with_extra_variable() {
    let result = compare_default("a*b+c", "a*b+c*d");
    assert!(!result.equivalent);
    assert_float_relative_eq!(result.similarity, 50.0);
    assert_eq!(result.simplified2, "a b + c d");
    assert_eq!(result.common_subexpressions, ["a b", "a", "b", "c"]);
    assert_eq!(result.indices_in_expr2["a b"], [1]);
    assert_eq!(result.indices_in_expr2["c"], [5]);
    assert_eq!(result.occurrences_in_simplified2["a b"], [(0, 3)]);
    assert_eq!(result.occurrences_in_simplified2["c"], [(6, 1)]);
}

#[test]
fn factored_and_expanded_polynomials() {
    let result = compare_default("x^2 + 5x + 6", "(x+2)(x+3)");
    assert!(result.equivalent);
    assert_eq!(result.simplified1, result.simplified2);
}

#[test]
fn renamed_relation() {
    let result = compare_default("E = m c^2", "F = p a^2");
    assert!(result.equivalent);
}

#[test]
fn identical_formula() {
    let result = compare_default("\\sqrt{x^2 + y^2}", "\\sqrt{x^2 + y^2}");
    assert!(result.equivalent);
    assert_eq!(result.similarity, 100.0);
    assert_eq!(result.common_subexpressions[0], result.simplified2);
    assert_eq!(result.indices_in_expr2[&result.simplified2], [0]);
}

#[test]
fn unrelated_formulas() {
    let result = compare_default("\\sin(x)", "y^3 + 1");
    assert!(!result.equivalent);
    assert_eq!(result.similarity, 0.0);
    assert_eq!(result.common_subexpressions, ["x_{0}"]);
}

#[test]
fn malformed_formula() {
    let err = compare(&CasEngine::default(), "\\frac{1}{", "x", &CompareOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::Parse { ref input, .. } if input == "\\frac{1}{"));
    assert!(err.to_string().starts_with("could not parse `\\frac{1}{`: "));
}
