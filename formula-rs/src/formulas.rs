//! Formula lists, the plain-text files that the `find` subcommand searches.
//!
//! Each line holds one formula, optionally followed by `#` and a legend:
//!
//! ```text
//! # kinematics
//! E = m c^2        # energy
//! F = m a          # force
//! p = m v
//! ```
//!
//! Blank lines and lines that start with `#` are skipped.

use crate::error::Error;
use formula_search::{FormulaStore, NewFormula};
use std::{fs, path::Path};

/// The author recorded for formulas loaded from a file.
const FILE_AUTHOR: i64 = 1;

/// One formula read from a formula list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedFormula {
    /// The 1-based line the formula is on.
    pub line: usize,

    /// The formula.
    pub latex: String,

    /// The legend written after the formula, if any.
    pub legend: Option<String>,
}

/// Parses the contents of a formula list.
pub fn parse_list(source: &str) -> Vec<ListedFormula> {
    source.lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }

            let (latex, legend) = match line.split_once('#') {
                Some((latex, legend)) => (latex.trim(), Some(legend.trim())),
                None => (line, None),
            };
            Some(ListedFormula {
                line: line_no,
                latex: latex.to_string(),
                legend: legend.filter(|legend| !legend.is_empty()).map(str::to_string),
            })
        })
        .collect()
}

/// Reads a formula list into a new store. Formulas without a legend are named after their line.
pub fn load_store(path: &Path) -> Result<FormulaStore, Error> {
    let source = fs::read_to_string(path)
        .map_err(|error| Error::Io { path: path.to_path_buf(), error })?;
    let listed = parse_list(&source);
    log::debug!("read {} formulas from `{}`", listed.len(), path.display());

    let mut store = FormulaStore::new();
    for formula in listed {
        let legend = formula.legend.unwrap_or_else(|| format!("line {}", formula.line));
        let new = NewFormula::new(formula.latex, FILE_AUTHOR)
            .with_legend(legend)
            .with_description(format!("{}:{}", path.display(), formula.line));
        store.create(new).map_err(Error::Store)?;
    }
    Ok(store)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn comments_and_legends() {
        let source = "# mechanics\n\nE = m c^2   # energy\n  F = m a\np = m v #\n";
        assert_eq!(parse_list(source), vec![
            ListedFormula { line: 3, latex: "E = m c^2".to_string(), legend: Some("energy".to_string()) },
            ListedFormula { line: 4, latex: "F = m a".to_string(), legend: None },
            ListedFormula { line: 5, latex: "p = m v".to_string(), legend: None },
        ]);
    }

    #[test]
    fn empty_list() {
        assert!(parse_list("\n# nothing here\n   \n").is_empty());
    }

    #[test]
    fn load_into_store() {
        let path = std::env::temp_dir().join(format!("formula-list-{}.txt", std::process::id()));
        fs::write(&path, "x^2 + 1 # parabola\n\\sin x\n").unwrap();
        let store = load_store(&path);
        fs::remove_file(&path).unwrap();

        let store = store.unwrap();
        let records = store.list().collect::<Vec<_>>();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].legend, "parabola");
        assert_eq!(records[1].legend, "line 2");
        assert_eq!(records[1].latex, "\\sin x");
    }

    #[test]
    fn missing_file() {
        let err = load_store(Path::new("/nonexistent/formulas.txt")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
