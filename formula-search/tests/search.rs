use formula_compute::similarity::{CompareOptions, Error};
use formula_compute::symbolic::{CasEngine, EngineConfig};
use formula_search::{find_similar, FormulaStore, NewFormula, SearchOptions};
use pretty_assertions::assert_eq;
use std::time::Duration;
use test_log::test;

fn store(formulas: &[&str]) -> FormulaStore {
    let mut store = FormulaStore::new();
    for (idx, latex) in formulas.iter().enumerate() {
        store.create(
            NewFormula::new(*latex, 1)
                .with_legend(format!("formula {}", idx + 1))
                .with_description("test formula"),
        ).unwrap();
    }
    store
}

fn ids_and_scores(results: &[formula_search::SimilarFormula]) -> Vec<(u64, f64)> {
    results.iter().map(|result| (result.record.id, result.similarity())).collect()
}

#[test]
fn ranked_by_similarity() {
    let store = store(&[
        "\\sin(x) + 1",
        "t^2 + 5t + 6",
        "a b + c d",
        "(y+1)(y+5)",
    ]);
    let results = find_similar(&CasEngine::default(), &store, "(x+2)(x+3)", &SearchOptions::default())
        .unwrap();

    assert_eq!(results.len(), 4);
    assert_eq!(results[0].record.id, 2);
    assert!(results[0].result.equivalent);
    assert_eq!(results[0].similarity(), 100.0);
    assert!(results.windows(2).all(|pair| pair[0].similarity() >= pair[1].similarity()));
}

#[test]
fn failures_are_skipped() {
    let store = store(&["x + 1", "\\frac{1}{", "\\frac{x}{0}", "x + 2"]);
    let results = find_similar(&CasEngine::default(), &store, "x + 1", &SearchOptions::default())
        .unwrap();
    let ids = results.iter().map(|result| result.record.id).collect::<Vec<_>>();
    assert_eq!(ids, [1, 4]);
}

#[test]
fn slow_formula_times_out() {
    let engine = CasEngine::new(EngineConfig { max_steps: usize::MAX, ..EngineConfig::default() });
    let store = store(&[
        "x + 1",
        "(a+b+c+d+e+f+g+h)^{4} (i+j+k+l+m+n+o+p)^{4}",
        "x + 2",
        "y + 1",
    ]);
    let options = SearchOptions::default()
        .with_compare(CompareOptions::default().with_timeout(Duration::from_millis(200)));
    let results = find_similar(&engine, &store, "x + 1", &options).unwrap();
    let mut ids = results.iter().map(|result| result.record.id).collect::<Vec<_>>();
    ids.sort_unstable();
    assert_eq!(ids, [1, 3, 4]);
    assert_eq!(results[0].similarity(), 100.0);
}

#[test]
fn malformed_query() {
    let store = store(&["x + 1"]);
    let err = find_similar(&CasEngine::default(), &store, "x +", &SearchOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn top_k_and_ties() {
    let formulas = (0..12).map(|n| format!("x + {}", n + 2)).collect::<Vec<_>>();
    let formulas = formulas.iter().map(String::as_str).collect::<Vec<_>>();
    let store = store(&formulas);

    let results = find_similar(&CasEngine::default(), &store, "y + 1", &SearchOptions::default())
        .unwrap();
    assert_eq!(results.len(), 10);
    let ids = results.iter().map(|result| result.record.id).collect::<Vec<_>>();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());

    let options = SearchOptions::default().with_top_k(3);
    let results = find_similar(&CasEngine::default(), &store, "y + 1", &options).unwrap();
    assert_eq!(results.len(), 3);
}

#[test]
fn parallel_matches_sequential() {
    let store = store(&[
        "E = m c^2",
        "F = m a",
        "p = m v",
        "K = \\frac{1}{2} m v^2",
        "\\sin^2 x + \\cos^2 x",
    ]);
    let engine = CasEngine::default();
    let parallel = find_similar(&engine, &store, "U = \\frac{1}{2} k x^2", &SearchOptions::default())
        .unwrap();
    let sequential = find_similar(
        &engine,
        &store,
        "U = \\frac{1}{2} k x^2",
        &SearchOptions::default().sequential(),
    ).unwrap();
    assert_eq!(ids_and_scores(&parallel), ids_and_scores(&sequential));
    assert_eq!(parallel[0].record.id, 4);
}

#[test]
fn common_subexpression_details() {
    let store = store(&["a b + c d"]);
    let options = SearchOptions::default().with_compare(CompareOptions::default());
    let results = find_similar(&CasEngine::default(), &store, "a b + c", &options).unwrap();

    let common = results[0].common_subexpressions();
    assert_eq!(common[0].subexpression, "a b");
    assert_eq!(common[0].indices_in_expr2, [1]);
    assert_eq!(common[0].occurrences_in_simplified2, [(0, 3)]);
}

#[test]
fn empty_store() {
    let results = find_similar(&CasEngine::default(), &FormulaStore::new(), "x", &SearchOptions::default())
        .unwrap();
    assert!(results.is_empty());
}
