use super::{Primary, SymExpr};

/// An iterator that traverses the tree of expressions in left-to-right pre-order: each node is
/// visited before its children, and children are visited left to right, depth-first.
///
/// The position of a node in this traversal is its preorder position. This iterator is created
/// by [`SymExpr::pre_order_iter`].
pub struct PreOrderIter<'a> {
    stack: Vec<&'a SymExpr>,
}

impl<'a> PreOrderIter<'a> {
    /// Creates a new iterator that starts at the given root.
    pub fn new(expr: &'a SymExpr) -> Self {
        Self { stack: vec![expr] }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a SymExpr;

    fn next(&mut self) -> Option<Self::Item> {
        let expr = self.stack.pop()?;
        match expr {
            SymExpr::Primary(Primary::Call(_, args)) => self.stack.extend(args.iter().rev()),
            SymExpr::Primary(_) => (),
            SymExpr::Add(terms) => self.stack.extend(terms.iter().rev()),
            SymExpr::Mul(factors) => self.stack.extend(factors.iter().rev()),
            SymExpr::Exp(base, exp) => {
                self.stack.push(exp);
                self.stack.push(base);
            },
        }
        Some(expr)
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::int;
    use crate::symbolic::expr::Symbol;
    use super::*;

    #[test]
    fn visits_parents_first() {
        // x^2 + sin(y)
        let expr = SymExpr::Add(vec![
            SymExpr::pow(SymExpr::from(Symbol::new("x")), SymExpr::from(int(2))),
            SymExpr::call("sin", vec![SymExpr::from(Symbol::new("y"))]),
        ]);
        let visited = expr.pre_order_iter().map(|node| node.to_string()).collect::<Vec<_>>();
        assert_eq!(visited, ["x^2 + sin(y)", "x^2", "x", "2", "sin(y)", "y"]);
    }
}
