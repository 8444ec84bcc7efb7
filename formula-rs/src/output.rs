//! Plain-text rendering of comparisons and search results.

use formula_compute::similarity::ComparisonResult;
use formula_search::{FormulaRecord, SimilarFormula};
use std::fmt::Write;

/// Formats the shared subexpressions of a comparison, one per line, with their positions in the
/// second formula.
fn write_common(out: &mut String, result: &ComparisonResult, indent: &str) {
    if result.common_subexpressions.is_empty() {
        let _ = writeln!(out, "{}no common subexpressions", indent);
        return;
    }

    for subexpression in &result.common_subexpressions {
        let indices = result.indices_in_expr2.get(subexpression).map(Vec::as_slice).unwrap_or_default();
        let occurrences = result.occurrences_in_simplified2
            .get(subexpression)
            .map(|occurrences| {
                occurrences.iter()
                    .map(|(start, len)| format!("{}..{}", start, start + len))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{}{}  (nodes {:?}; text {})",
            indent,
            subexpression,
            indices,
            if occurrences.is_empty() { "not found" } else { occurrences.as_str() },
        );
    }
}

/// Formats the result of comparing two formulas.
pub fn comparison(result: &ComparisonResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "equivalent: {}", if result.equivalent { "yes" } else { "no" });
    let _ = writeln!(out, "similarity: {:.2}", result.similarity);
    let _ = writeln!(out, "first:      {}", result.simplified1);
    let _ = writeln!(out, "second:     {}", result.simplified2);
    let _ = writeln!(out, "common subexpressions:");
    write_common(&mut out, result, "  ");
    out
}

/// Formats a stored formula on one line.
pub fn record(record: &FormulaRecord) -> String {
    format!("#{} {}: {} ({})", record.id, record.legend, record.latex, record.description)
}

/// Formats ranked search results, most similar first. `stored` is the number of formulas the
/// query was compared against.
pub fn ranking(results: &[SimilarFormula], stored: usize) -> String {
    if stored == 0 {
        return "no formulas to compare against\n".to_string();
    }
    if results.is_empty() {
        return "no stored formula could be compared\n".to_string();
    }

    let mut out = String::new();
    for (rank, similar) in results.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. [{:6.2}{}] {}",
            rank + 1,
            similar.similarity(),
            if similar.result.equivalent { ", equivalent" } else { "" },
            record(&similar.record),
        );
        write_common(&mut out, &similar.result, "     ");
    }
    out
}
