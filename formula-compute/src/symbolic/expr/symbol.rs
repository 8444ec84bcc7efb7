use crate::error::{kind::UnknownAssumption, Error};
use std::{collections::BTreeSet, fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A property that a symbol is assumed to have.
///
/// Assumptions let the simplifier apply rewrites that are only valid for some values, such as
/// `|x| = x` when `x` is nonnegative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Assumption {
    Real,
    Positive,
    Negative,
    Nonnegative,
    Integer,
    Nonzero,
}

impl Assumption {
    /// Every assumption, in declaration order.
    pub const ALL: [Assumption; 6] = [
        Self::Real,
        Self::Positive,
        Self::Negative,
        Self::Nonnegative,
        Self::Integer,
        Self::Nonzero,
    ];

    /// Returns the name of the assumption, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Real => "real",
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Nonnegative => "nonnegative",
            Self::Integer => "integer",
            Self::Nonzero => "nonzero",
        }
    }
}

impl FromStr for Assumption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL.into_iter()
            .find(|assumption| assumption.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::spanless(UnknownAssumption { name: name.to_string() }))
    }
}

impl fmt::Display for Assumption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The set of assumptions attached to a symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assumptions(BTreeSet<Assumption>);

impl Assumptions {
    /// Creates an empty set of assumptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma-separated list of assumptions, such as `real,positive`.
    pub fn parse_list(list: &str) -> Result<Self, Error> {
        list.split(',')
            .filter(|name| !name.trim().is_empty())
            .map(Assumption::from_str)
            .collect()
    }

    /// Adds an assumption, returning the updated set.
    pub fn with(mut self, assumption: Assumption) -> Self {
        self.0.insert(assumption);
        self
    }

    /// Adds an assumption to the set.
    pub fn insert(&mut self, assumption: Assumption) {
        self.0.insert(assumption);
    }

    /// Returns true if the assumption was given explicitly.
    pub fn contains(&self, assumption: Assumption) -> bool {
        self.0.contains(&assumption)
    }

    /// Returns true if no assumptions were given.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the assumptions in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = Assumption> + '_ {
        self.0.iter().copied()
    }

    pub fn is_positive(&self) -> bool {
        self.contains(Assumption::Positive)
    }

    pub fn is_negative(&self) -> bool {
        self.contains(Assumption::Negative)
    }

    /// Returns true if the symbol is known to be `>= 0`.
    pub fn is_nonnegative(&self) -> bool {
        self.contains(Assumption::Nonnegative) || self.is_positive()
    }

    /// Returns true if the symbol is known to be real, either directly or because it was given a
    /// sign or is an integer.
    pub fn is_real(&self) -> bool {
        self.0.iter().any(|assumption| !matches!(assumption, Assumption::Nonzero))
    }
}

impl FromIterator<Assumption> for Assumptions {
    fn from_iter<T: IntoIterator<Item = Assumption>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A variable, such as `x` or `\alpha_{1}`, with the assumptions made about it.
///
/// Two symbols are the same symbol only if both their names and their assumptions match. Symbols
/// order by name first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Symbol {
    /// The name of the symbol, in normalized LaTeX form.
    pub name: String,

    /// The assumptions made about the symbol.
    pub assumptions: Assumptions,
}

impl Symbol {
    /// Creates a symbol with no assumptions.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), assumptions: Assumptions::new() }
    }

    /// Creates a symbol with the given assumptions.
    pub fn with_assumptions(name: impl Into<String>, assumptions: Assumptions) -> Self {
        Self { name: name.into(), assumptions }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_assumption_list() {
        let assumptions = Assumptions::parse_list("real, Positive").unwrap();
        assert!(assumptions.contains(Assumption::Real));
        assert!(assumptions.is_positive());
        assert!(assumptions.is_nonnegative());
        assert!(!assumptions.is_negative());
    }

    #[test]
    fn unknown_assumption() {
        let err = Assumptions::parse_list("real,complex").unwrap_err();
        assert!(err.is::<UnknownAssumption>());
        assert_eq!(err.to_string(), "unknown assumption `complex`");
    }

    #[test]
    fn symbols_order_by_name() {
        let mut symbols = vec![
            Symbol::new("y"),
            Symbol::with_assumptions("x", Assumptions::new().with(Assumption::Real)),
            Symbol::new("b"),
        ];
        symbols.sort();
        let names = symbols.iter().map(|sym| sym.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["b", "x", "y"]);
    }
}
