//! The comparison pipeline.

use crate::deadline::Deadline;
use crate::similarity::{
    align::align_within,
    canonical::canonicalize_within,
    error::Error,
    index::{locate_occurrences, SubexpressionIndex},
    score::score_within,
    CompareOptions,
    ComparisonResult,
};
use crate::symbolic::{
    expr::{Assumptions, Formula, Symbol, SymExpr},
    Engine,
};
use log::debug;
use std::collections::{BTreeMap, HashMap};

/// Parses a formula into a single expression, reducing a relation `lhs op rhs` to `lhs - rhs`.
pub fn parse_formula<E: Engine + ?Sized>(engine: &E, input: &str) -> Result<SymExpr, Error> {
    engine.parse(input)
        .map(Formula::into_zeroed)
        .map_err(|error| Error::Parse { input: input.to_string(), error })
}

/// Gives the symbols of `expr` the assumptions listed for their names, in addition to the ones
/// they already have.
fn with_assumptions<E: Engine + ?Sized>(
    engine: &E,
    expr: &SymExpr,
    assumptions: &HashMap<String, Assumptions>,
) -> SymExpr {
    if assumptions.is_empty() {
        return expr.clone();
    }

    let substitutions = expr.free_symbols()
        .into_iter()
        .filter_map(|sym| {
            let extra = assumptions.get(&sym.name)?;
            let mut merged = sym.assumptions.clone();
            extra.iter().for_each(|assumption| merged.insert(assumption));
            let assumed = Symbol::with_assumptions(sym.name.clone(), merged);
            Some((sym.clone(), SymExpr::from(assumed)))
        })
        .collect::<HashMap<_, _>>();
    engine.substitute(expr, &substitutions)
}

/// Compares two formulas written in LaTeX.
///
/// See the [module-level documentation](super) for the steps involved.
pub fn compare<E: Engine + ?Sized>(
    engine: &E,
    formula1: &str,
    formula2: &str,
    options: &CompareOptions,
) -> Result<ComparisonResult, Error> {
    let deadline = Deadline::new(options.timeout);
    let expr1 = parse_formula(engine, formula1)?;
    let expr2 = parse_formula(engine, formula2)?;
    run(engine, &expr1, &expr2, options, &deadline)
}

/// Compares two expressions that were already parsed, such as a search query parsed once and
/// compared against many stored formulas.
pub fn compare_exprs<E: Engine + ?Sized>(
    engine: &E,
    expr1: &SymExpr,
    expr2: &SymExpr,
    options: &CompareOptions,
) -> Result<ComparisonResult, Error> {
    run(engine, expr1, expr2, options, &Deadline::new(options.timeout))
}

fn run<E: Engine + ?Sized>(
    engine: &E,
    expr1: &SymExpr,
    expr2: &SymExpr,
    options: &CompareOptions,
    deadline: &Deadline,
) -> Result<ComparisonResult, Error> {
    let assumed1 = with_assumptions(engine, expr1, &options.assumptions);
    let assumed2 = with_assumptions(engine, expr2, &options.assumptions);
    let simplified1 = engine.simplify_within(&assumed1, deadline)?;
    let simplified2 = engine.simplify_within(&assumed2, deadline)?;

    deadline.check("alignment")?;
    let alignment = align_within(engine, &simplified1, &simplified2, deadline)?;

    let canonical1 = canonicalize_within(engine, &alignment.lhs, deadline)?;
    let canonical2 = canonicalize_within(engine, &alignment.rhs, deadline)?;

    deadline.check("scoring")?;
    let score = score_within(
        engine,
        &canonical1,
        &canonical2,
        alignment.comparable,
        options.min_match_size,
        deadline,
    )?;

    deadline.check("indexing")?;
    let rendered1 = engine.render(&canonical1);
    let rendered2 = engine.render(&canonical2);
    let index1 = SubexpressionIndex::build(&canonical1);
    let index2 = SubexpressionIndex::build(&canonical2);

    let mut common_subexpressions = Vec::new();
    let mut indices_in_expr2 = BTreeMap::<String, Vec<usize>>::new();
    let mut occurrences_in_simplified2 = BTreeMap::new();
    for key in index1.intersect(&index2) {
        let Some(entry) = index2.get(key) else {
            continue;
        };

        // distinct subtrees can render the same way
        let rendered = engine.render(entry.node);
        if let Some(positions) = indices_in_expr2.get_mut(&rendered) {
            positions.extend_from_slice(&entry.positions);
            positions.sort_unstable();
            continue;
        }

        occurrences_in_simplified2.insert(rendered.clone(), locate_occurrences(&rendered2, &rendered));
        indices_in_expr2.insert(rendered.clone(), entry.positions.clone());
        common_subexpressions.push(rendered);
    }

    debug!(
        "compared `{}` with `{}`: equivalent = {}, similarity = {:.2}, {} shared subexpressions",
        rendered1,
        rendered2,
        score.equivalent,
        score.similarity,
        common_subexpressions.len(),
    );

    Ok(ComparisonResult {
        equivalent: score.equivalent,
        similarity: score.similarity,
        simplified1: rendered1,
        simplified2: rendered2,
        common_subexpressions,
        indices_in_expr2,
        occurrences_in_simplified2,
    })
}

#[cfg(test)]
mod tests {
    use crate::error::kind::{DivisionByZero, Timeout};
    use crate::similarity::fake::StructuralEngine;
    use crate::symbolic::{expr::Assumption, CasEngine, EngineConfig};
    use formula_parser::parser::error::kind::UnexpectedEof;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use test_log::test;
    use super::*;

    #[test]
    fn structural_result() {
        let engine = StructuralEngine;
        let result = compare(&engine, "x y + 1", "a b + 2", &CompareOptions::default()).unwrap();
        assert!(!result.equivalent);
        // Mul(x_{0}, x_{1}) matches, out of 5 nodes on each side
        assert_eq!(result.similarity, 60.0);
        assert_eq!(result.simplified1, "1 + x_{0} * x_{1}");
        assert_eq!(result.simplified2, "2 + x_{0} * x_{1}");
        assert_eq!(result.common_subexpressions, ["x_{0} * x_{1}", "x_{0}", "x_{1}"]);
        assert_eq!(result.indices_in_expr2["x_{0} * x_{1}"], [2]);
        assert_eq!(result.indices_in_expr2["x_{0}"], [3]);
        assert_eq!(result.occurrences_in_simplified2["x_{0}"], [(4, 5)]);
        assert_eq!(result.occurrences_in_simplified2["x_{1}"], [(12, 5)]);
    }

    #[test]
    fn relations_are_zeroed() {
        let engine = CasEngine::default();
        let result = compare(&engine, "y = 2x", "y - 2x = 0", &CompareOptions::default()).unwrap();
        assert!(result.equivalent);
        assert_eq!(result.similarity, 100.0);
    }

    #[test]
    fn parse_error() {
        let engine = CasEngine::default();
        let err = compare(&engine, "x^2 +", "x", &CompareOptions::default()).unwrap_err();
        match err {
            Error::Parse { input, error } => {
                assert_eq!(input, "x^2 +");
                assert!(error.is::<UnexpectedEof>());
            },
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn simplification_error() {
        let engine = CasEngine::default();
        let err = compare(&engine, "\\frac{1}{0}", "x", &CompareOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Simplification(ref error) if error.is::<DivisionByZero>()));
    }

    #[test]
    fn timeout() {
        let engine = CasEngine::default();
        let options = CompareOptions::default().with_timeout(Duration::ZERO);
        let err = compare(&engine, "x", "x", &options).unwrap_err();
        assert!(matches!(err, Error::Timeout(ref error) if error.is::<Timeout>()));
        assert_eq!(
            err.to_string(),
            "comparison exceeded its time limit of 0ns during simplification",
        );
    }

    #[test]
    fn long_expansion_times_out() {
        // no step limit, so only the deadline can stop the expansion
        let engine = CasEngine::new(EngineConfig { max_steps: usize::MAX, ..EngineConfig::default() });
        let options = CompareOptions::default().with_timeout(Duration::from_millis(200));
        let heavy = "(a+b+c+d+e+f+g+h)^{4} (i+j+k+l+m+n+o+p)^{4}";
        let err = compare(&engine, heavy, "x", &options).unwrap_err();
        assert!(matches!(err, Error::Timeout(ref error) if error.is::<Timeout>()));
        assert_eq!(
            err.to_string(),
            "comparison exceeded its time limit of 200ms during expansion",
        );
    }

    #[test]
    fn assumptions_enable_rewrites() {
        let engine = CasEngine::default();
        let plain = compare(&engine, "\\left|x\\right|", "x", &CompareOptions::default()).unwrap();
        assert!(!plain.equivalent);

        let options = CompareOptions::default()
            .with_assumptions("x", Assumptions::new().with(Assumption::Positive));
        let assumed = compare(&engine, "\\left|x\\right|", "x", &options).unwrap();
        assert!(assumed.equivalent);
    }

    #[test]
    fn preparsed_query() {
        let engine = CasEngine::default();
        let query = parse_formula(&engine, "(x+1)^2").unwrap();
        let stored = parse_formula(&engine, "t^2 + 2t + 1").unwrap();
        let result = compare_exprs(&engine, &query, &stored, &CompareOptions::default()).unwrap();
        assert!(result.equivalent);
    }
}
