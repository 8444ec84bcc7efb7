//! The structural key of an expression: a string that spells out its exact structure.
//!
//! Keys look like `Add(Mul(Integer(2), Symbol('x')), Pow(Symbol('y'), Integer(-1)))`. Two
//! expressions have the same key only if they have the same node kinds, the same atoms, and the
//! same children **in the same order**, so keys give a total order that sorting can rely on.

use super::{Constant, Primary, SymExpr};
use std::fmt::Write;

impl SymExpr {
    /// Returns the structural key of the expression.
    pub fn structural_key(&self) -> String {
        let mut key = String::new();
        self.write_key(&mut key);
        key
    }

    fn write_key(&self, out: &mut String) {
        match self {
            Self::Primary(primary) => primary.write_key(out),
            Self::Add(terms) => write_compound(out, "Add", terms.iter()),
            Self::Mul(factors) => write_compound(out, "Mul", factors.iter()),
            Self::Exp(base, exp) => write_compound(out, "Pow", [&**base, &**exp].into_iter()),
        }
    }
}

impl Primary {
    fn write_key(&self, out: &mut String) {
        // writing to a `String` cannot fail
        let _ = match self {
            Self::Integer(n) => write!(out, "Integer({})", n),
            Self::Float(n) => write!(out, "Float('{}')", n.to_f64()),
            Self::Symbol(sym) => {
                let _ = write!(out, "Symbol('{}'", sym.name);
                for assumption in sym.assumptions.iter() {
                    let _ = write!(out, ", {}=True", assumption);
                }
                write!(out, ")")
            },
            Self::Constant(Constant::Pi) => write!(out, "pi"),
            Self::Constant(Constant::E) => write!(out, "E"),
            Self::Constant(Constant::Infinity) => write!(out, "oo"),
            Self::Call(name, args) => {
                write_compound(out, name, args.iter());
                Ok(())
            },
        };
    }
}

fn write_compound<'a>(out: &mut String, head: &str, children: impl Iterator<Item = &'a SymExpr>) {
    out.push_str(head);
    out.push('(');
    for (idx, child) in children.enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        child.write_key(out);
    }
    out.push(')');
}

#[cfg(test)]
mod tests {
    use crate::primitive::int;
    use crate::symbolic::expr::{Assumption, Assumptions, Symbol};
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn key_of_fraction() {
        let expr = SymExpr::Mul(vec![
            SymExpr::from(Symbol::new("x")),
            SymExpr::pow(SymExpr::from(int(2)), SymExpr::from(int(-1))),
        ]);
        assert_eq!(expr.structural_key(), "Mul(Symbol('x'), Pow(Integer(2), Integer(-1)))");
    }

    #[test]
    fn key_includes_assumptions() {
        let sym = Symbol::with_assumptions(
            "x",
            Assumptions::new().with(Assumption::Positive).with(Assumption::Real),
        );
        assert_eq!(
            SymExpr::from(sym).structural_key(),
            "Symbol('x', real=True, positive=True)",
        );
    }

    #[test]
    fn key_is_order_sensitive() {
        let a = SymExpr::Add(vec![SymExpr::from(Symbol::new("a")), SymExpr::from(Symbol::new("b"))]);
        let b = SymExpr::Add(vec![SymExpr::from(Symbol::new("b")), SymExpr::from(Symbol::new("a"))]);
        assert_eq!(a, b);
        assert_ne!(a.structural_key(), b.structural_key());
        assert_eq!(
            SymExpr::call("sin", vec![SymExpr::from(Constant::Pi)]).structural_key(),
            "sin(pi)",
        );
    }
}
