//! Structural matching of expressions up to a consistent renaming of variables.

use crate::symbolic::{expr::{Symbol, SymExpr}, Engine};
use std::collections::HashMap;

/// A one-to-one mapping from the symbols of one expression to the symbols of another, built up
/// while matching.
///
/// Once a symbol is mapped, it always maps to the same target, and no two symbols share a target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableMapping {
    forward: HashMap<Symbol, Symbol>,
    reverse: HashMap<Symbol, Symbol>,
}

impl VariableMapping {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the symbol that `source` is mapped to.
    pub fn get(&self, source: &Symbol) -> Option<&Symbol> {
        self.forward.get(source)
    }

    /// Returns the number of mapped symbols.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns true if no symbols are mapped.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterates over the `(source, target)` pairs of the mapping, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &Symbol)> {
        self.forward.iter()
    }

    /// Maps `source` to `target` if that is consistent with the mapping so far. Returns false if
    /// `source` is mapped elsewhere, or `target` is already the image of another symbol.
    pub fn bind(&mut self, source: &Symbol, target: &Symbol) -> bool {
        match (self.forward.get(source), self.reverse.contains_key(target)) {
            (Some(existing), _) => existing == target,
            (None, true) => false,
            (None, false) => {
                self.forward.insert(source.clone(), target.clone());
                self.reverse.insert(target.clone(), source.clone());
                true
            },
        }
    }
}

/// Returns true if `a` and `b` are identical up to a consistent renaming of their symbols,
/// extending `mapping` with the renaming that was used.
///
/// Children are compared pairwise in their current order, so sums and products only match if
/// their terms line up after canonicalization. If the expressions do not match, `mapping` is left
/// as it was before the call.
pub fn matches<E: Engine + ?Sized>(
    engine: &E,
    a: &SymExpr,
    b: &SymExpr,
    mapping: &mut VariableMapping,
) -> bool {
    let snapshot = mapping.clone();
    if match_nodes(engine, a, b, mapping) {
        true
    } else {
        *mapping = snapshot;
        false
    }
}

fn match_nodes<E: Engine + ?Sized>(
    engine: &E,
    a: &SymExpr,
    b: &SymExpr,
    mapping: &mut VariableMapping,
) -> bool {
    match (a.as_symbol(), b.as_symbol()) {
        (Some(source), Some(target)) => return mapping.bind(source, target),
        (Some(_), None) | (None, Some(_)) => return false,
        (None, None) => (),
    }

    if a.is_atom() && b.is_atom() {
        return engine.equals(a, b);
    }

    if a.kind() != b.kind() {
        return false;
    }

    let (a_children, b_children) = (a.children(), b.children());
    a_children.len() == b_children.len()
        && a_children.into_iter()
            .zip(b_children)
            .all(|(a_child, b_child)| match_nodes(engine, a_child, b_child, mapping))
}

#[cfg(test)]
mod tests {
    use crate::primitive::{float, int};
    use crate::similarity::fake::StructuralEngine;
    use crate::symbolic::CasEngine;
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> SymExpr {
        SymExpr::from(Symbol::new(name))
    }

    #[test]
    fn consistent_renaming() {
        let engine = StructuralEngine;
        let mut mapping = VariableMapping::new();
        assert!(matches(&engine, &engine.expr("x^2 + y"), &engine.expr("a^2 + b"), &mut mapping));
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get(&Symbol::new("x")), Some(&Symbol::new("a")));
        assert_eq!(mapping.get(&Symbol::new("y")), Some(&Symbol::new("b")));
    }

    #[test]
    fn one_to_many_fails() {
        let engine = StructuralEngine;
        let mut mapping = VariableMapping::new();
        assert!(!matches(&engine, &engine.expr("x + x"), &engine.expr("a + b"), &mut mapping));
        assert!(mapping.is_empty());
    }

    #[test]
    fn many_to_one_fails() {
        let engine = StructuralEngine;
        let mut mapping = VariableMapping::new();
        assert!(!matches(&engine, &engine.expr("x + y"), &engine.expr("a + a"), &mut mapping));
        assert!(mapping.is_empty());
    }

    #[test]
    fn failure_restores_existing_mapping() {
        let engine = StructuralEngine;
        let mut mapping = VariableMapping::new();
        assert!(mapping.bind(&Symbol::new("x"), &Symbol::new("a")));
        let before = mapping.clone();

        // `y -> b` would be bound before `x -> c` fails
        let a = SymExpr::Mul(vec![sym("y"), sym("x")]);
        let b = SymExpr::Mul(vec![sym("b"), sym("c")]);
        assert!(!matches(&engine, &a, &b, &mut mapping));
        assert_eq!(mapping, before);

        let b = SymExpr::Mul(vec![sym("b"), sym("a")]);
        assert!(matches(&engine, &a, &b, &mut mapping));
        assert_eq!(mapping.get(&Symbol::new("y")), Some(&Symbol::new("b")));
    }

    #[test]
    fn kinds_and_arities() {
        let engine = StructuralEngine;
        let mut mapping = VariableMapping::new();
        assert!(!matches(&engine, &engine.expr("\\sin x"), &engine.expr("\\cos x"), &mut mapping));
        assert!(!matches(&engine, &engine.expr("x + y"), &engine.expr("x y"), &mut mapping));
        assert!(!matches(&engine, &engine.expr("x + y"), &engine.expr("x + y + z"), &mut mapping));
        assert!(!matches(&engine, &sym("x"), &SymExpr::from(int(2)), &mut mapping));
        assert!(!matches(&engine, &sym("x"), &engine.expr("x + 1"), &mut mapping));
        assert!(mapping.is_empty());
    }

    #[test]
    fn atoms_use_engine_equality() {
        let mut mapping = VariableMapping::new();
        let two = SymExpr::from(int(2));
        let two_point_oh = SymExpr::from(float(2));
        assert!(!matches(&StructuralEngine, &two, &two_point_oh, &mut mapping));
        assert!(matches(&CasEngine::default(), &two, &two_point_oh, &mut mapping));
        assert!(!matches(&CasEngine::default(), &two, &SymExpr::from(int(3)), &mut mapping));
    }
}
