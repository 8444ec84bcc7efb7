use formula_compute::similarity::{canonicalize, compare, CompareOptions};
use formula_compute::symbolic::{CasEngine, Engine};
use proptest::prelude::*;

/// Small polynomial-like formulas in LaTeX, without division, so that every formula simplifies.
fn arb_formula() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        "[a-c]",
        (1u32..5).prop_map(|n| n.to_string()),
    ];

    leaf.prop_recursive(3, 16, 2, |inner| prop_oneof![
        (inner.clone(), inner.clone()).prop_map(|(lhs, rhs)| format!("{} + {}", lhs, rhs)),
        (inner.clone(), inner.clone()).prop_map(|(lhs, rhs)| format!("{} - ({})", lhs, rhs)),
        (inner.clone(), inner.clone()).prop_map(|(lhs, rhs)| format!("({})({})", lhs, rhs)),
        inner.clone().prop_map(|expr| format!("({})^{{2}}", expr)),
        inner.prop_map(|expr| format!("\\sin({})", expr)),
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn canonicalize_is_idempotent(formula in arb_formula()) {
        let engine = CasEngine::default();
        let expr = engine.parse(&formula).unwrap().into_zeroed();
        let once = canonicalize(&engine, &expr).unwrap();
        let twice = canonicalize(&engine, &once).unwrap();
        prop_assert_eq!(once.structural_key(), twice.structural_key());
    }

    #[test]
    fn self_comparison_is_equivalent(formula in arb_formula()) {
        let result = compare(&CasEngine::default(), &formula, &formula, &CompareOptions::default())
            .unwrap();
        prop_assert!(result.equivalent);
        prop_assert_eq!(result.similarity, 100.0);
    }

    #[test]
    fn equivalence_is_symmetric(a in arb_formula(), b in arb_formula()) {
        let engine = CasEngine::default();
        let options = CompareOptions::default();
        let forward = compare(&engine, &a, &b, &options).unwrap();
        let backward = compare(&engine, &b, &a, &options).unwrap();
        prop_assert_eq!(forward.equivalent, backward.equivalent);
    }

    #[test]
    fn similarity_is_bounded(a in arb_formula(), b in arb_formula()) {
        let result = compare(&CasEngine::default(), &a, &b, &CompareOptions::default()).unwrap();
        prop_assert!((0.0..=100.0).contains(&result.similarity));
        if result.equivalent {
            prop_assert_eq!(result.similarity, 100.0);
        }
    }
}
