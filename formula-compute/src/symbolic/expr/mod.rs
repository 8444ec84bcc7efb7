//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](formula_parser::parser::ast::Expr) type from `formula_parser` records how a
//! formula was written, down to its parentheses and spans. That is convenient for reporting
//! errors, but not for algebra. This module defines [`SymExpr`], which flattens sums and
//! products into lists of terms and factors and represents every operation with four node types.
//!
//! # Strict equality
//!
//! Deciding whether two expressions are mathematically equal is hard in general: `x^2 + 2x + 1`
//! and `(x + 1)^2` are equal, but only after expansion. The [`PartialEq`] implementation for
//! [`SymExpr`] therefore implements a subset of mathematical equality called **strict
//! equality**. Two expressions are strictly equal if:
//!
//! - They are the same type of expression (i.e. both [`SymExpr::Primary`], both
//!   [`SymExpr::Add`], etc.).
//! - If both are [`SymExpr::Primary`], both expressions must have strictly equal values.
//! - If both are [`SymExpr::Add`] or [`SymExpr::Mul`], both expressions must have strictly equal
//!   terms / factors, in any order, with the same multiplicities.
//! - If both are [`SymExpr::Exp`], both expressions must have strictly equal base and exponent.
//!
//! Strict equality never reports false positives, and it does not depend on simplification, which
//! makes it usable by the simplification rules themselves.

mod convert;
mod iter;
mod key;
mod latex;
mod symbol;

pub use convert::{expr_from_ast, Formula};
pub use iter::PreOrderIter;
pub use symbol::{Assumption, Assumptions, Symbol};

use crate::primitive::int;
use formula_parser::parser::{token::op::BinOpKind, Precedence};
use rug::{Float, Integer};
use std::{
    cmp::Ordering,
    collections::{BTreeSet, HashMap},
    fmt,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named mathematical constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Constant {
    /// The ratio of a circle's circumference to its diameter.
    Pi,

    /// Euler's number, the base of the natural logarithm.
    E,

    /// Positive infinity.
    Infinity,
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pi => write!(f, "pi"),
            Self::E => write!(f, "e"),
            Self::Infinity => write!(f, "oo"),
        }
    }
}

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primary {
    /// An integer, such as `2` or `144`.
    Integer(Integer),

    /// A floating-point number, such as `3.14` or `0.5`.
    Float(Float),

    /// A variable, such as `x` or `y`.
    Symbol(Symbol),

    /// A named constant, such as `pi`.
    Constant(Constant),

    /// A function call, such as `sin(x)`. The arguments are order-significant.
    Call(String, Vec<SymExpr>),
}

/// [`Eq`] is implemented manually to allow comparing [`Primary::Float`]s. This module **must
/// never** produce non-normal [`Float`]s (such as `NaN`).
impl Eq for Primary {}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(num) => write!(f, "{}", num),
            Self::Float(num) => write!(f, "{}", num.to_f64()),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Constant(constant) => write!(f, "{}", constant),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
        }
    }
}

/// Adds two [`Primary`]s together. If both are the **same numeric type**, the numbers are added
/// together. Otherwise, the two [`Primary`]s are wrapped in a [`SymExpr::Add`].
impl Add<Primary> for Primary {
    type Output = SymExpr;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Integer(lhs), Primary::Integer(rhs)) => {
                SymExpr::Primary(Primary::Integer(lhs + rhs))
            },
            (Primary::Float(lhs), Primary::Float(rhs)) => {
                SymExpr::Primary(Primary::Float(lhs + rhs))
            },
            (lhs, rhs) => SymExpr::Add(vec![
                SymExpr::Primary(lhs),
                SymExpr::Primary(rhs),
            ]),
        }
    }
}

/// Multiplies two [`Primary`]s together. If both are the **same numeric type**, the numbers are
/// multiplied together. Otherwise, the two [`Primary`]s are wrapped in a [`SymExpr::Mul`].
impl Mul<Primary> for Primary {
    type Output = SymExpr;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Integer(lhs), Primary::Integer(rhs)) => {
                SymExpr::Primary(Primary::Integer(lhs * rhs))
            },
            (Primary::Float(lhs), Primary::Float(rhs)) => {
                SymExpr::Primary(Primary::Float(lhs * rhs))
            },
            (lhs, rhs) => SymExpr::Mul(vec![
                SymExpr::Primary(lhs),
                SymExpr::Primary(rhs),
            ]),
        }
    }
}

/// A mathematical expression with information about its terms and factors.
///
/// Sums and products are n-ary and commutative. Powers and function calls are order-significant.
/// A rational number is represented as an integer multiplied by an integer raised to `-1`, and a
/// quotient `a / b` as `a * b^-1`.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

/// The kind of an expression node, ignoring its children.
///
/// Function calls with different names are different kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind<'a> {
    Integer,
    Float,
    Symbol,
    Constant,
    Add,
    Mul,
    Exp,
    Call(&'a str),
}

impl From<Integer> for SymExpr {
    fn from(n: Integer) -> Self {
        Self::Primary(Primary::Integer(n))
    }
}

impl From<Float> for SymExpr {
    fn from(n: Float) -> Self {
        Self::Primary(Primary::Float(n))
    }
}

impl From<Symbol> for SymExpr {
    fn from(sym: Symbol) -> Self {
        Self::Primary(Primary::Symbol(sym))
    }
}

impl From<Constant> for SymExpr {
    fn from(constant: Constant) -> Self {
        Self::Primary(Primary::Constant(constant))
    }
}

impl fmt::Display for SymExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    write!(f, "{}", term)?;
                    for term in iter {
                        write!(f, " + {}", term)?;
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                let mut iter = factors.iter();
                if let Some(factor) = iter.next() {
                    if factor.cmp_precedence(self) == Ordering::Less {
                        write!(f, "({})", factor)?;
                    } else {
                        write!(f, "{}", factor)?;
                    }
                    for factor in iter {
                        if factor.cmp_precedence(self) == Ordering::Less {
                            write!(f, " * ({})", factor)?;
                        } else {
                            write!(f, " * {}", factor)?;
                        }
                    }
                }
                Ok(())
            },
            Self::Exp(base, exp) => {
                if base.cmp_precedence(self) != Ordering::Greater {
                    write!(f, "({})", base)?;
                } else {
                    write!(f, "{}", base)?;
                }
                write!(f, "^")?;
                if exp.cmp_precedence(self) != Ordering::Greater {
                    write!(f, "({})", exp)
                } else {
                    write!(f, "{}", exp)
                }
            },
        }
    }
}

impl SymExpr {
    /// Creates a call to the function with the given name.
    pub fn call(name: impl Into<String>, args: Vec<SymExpr>) -> Self {
        Self::Primary(Primary::Call(name.into(), args))
    }

    /// Creates the expression `base^exp`.
    pub fn pow(base: SymExpr, exp: SymExpr) -> Self {
        Self::Exp(Box::new(base), Box::new(exp))
    }

    /// Returns the precedence of the expression.
    fn precedence(&self) -> Option<Precedence> {
        match self {
            Self::Primary(Primary::Integer(n)) if *n < 0 => Some(Precedence::Neg),
            Self::Primary(Primary::Float(n)) if n.is_sign_negative() => Some(Precedence::Neg),
            Self::Primary(_) => None,
            Self::Add(_) => Some(BinOpKind::Add.precedence()),
            Self::Mul(_) => Some(BinOpKind::Mul.precedence()),
            Self::Exp(_, _) => Some(BinOpKind::Exp.precedence()),
        }
    }

    /// Compares the precedence of this expression to another one.
    ///
    /// This is used to determine if parentheses are needed around the given expression when
    /// printing.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        match (self.precedence(), other.precedence()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(lhs), Some(rhs)) => lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal),
        }
    }

    /// Returns the kind of this node.
    pub fn kind(&self) -> NodeKind<'_> {
        match self {
            Self::Primary(Primary::Integer(_)) => NodeKind::Integer,
            Self::Primary(Primary::Float(_)) => NodeKind::Float,
            Self::Primary(Primary::Symbol(_)) => NodeKind::Symbol,
            Self::Primary(Primary::Constant(_)) => NodeKind::Constant,
            Self::Primary(Primary::Call(name, _)) => NodeKind::Call(name),
            Self::Add(_) => NodeKind::Add,
            Self::Mul(_) => NodeKind::Mul,
            Self::Exp(_, _) => NodeKind::Exp,
        }
    }

    /// Returns true if the node has no children: a number, a symbol, or a constant.
    pub fn is_atom(&self) -> bool {
        matches!(self, Self::Primary(primary) if !matches!(primary, Primary::Call(..)))
    }

    /// Returns true if the node is a sum or a product, whose children can be reordered.
    pub fn is_commutative(&self) -> bool {
        matches!(self, Self::Add(_) | Self::Mul(_))
    }

    /// Returns the children of the node, in order.
    pub fn children(&self) -> Vec<&SymExpr> {
        match self {
            Self::Primary(Primary::Call(_, args)) => args.iter().collect(),
            Self::Primary(_) => Vec::new(),
            Self::Add(terms) => terms.iter().collect(),
            Self::Mul(factors) => factors.iter().collect(),
            Self::Exp(base, exp) => vec![&**base, &**exp],
        }
    }

    /// Rebuilds the node with each child replaced by the output of `f`, in order.
    ///
    /// The node keeps its kind; no flattening or simplification is done.
    pub fn try_map_children<E>(
        self,
        mut f: impl FnMut(SymExpr) -> Result<SymExpr, E>,
    ) -> Result<SymExpr, E> {
        Ok(match self {
            Self::Primary(Primary::Call(name, args)) => Self::Primary(Primary::Call(
                name,
                args.into_iter().map(&mut f).collect::<Result<_, _>>()?,
            )),
            Self::Primary(primary) => Self::Primary(primary),
            Self::Add(terms) => Self::Add(terms.into_iter().map(&mut f).collect::<Result<_, _>>()?),
            Self::Mul(factors) => Self::Mul(factors.into_iter().map(&mut f).collect::<Result<_, _>>()?),
            Self::Exp(base, exp) => {
                let base = f(*base)?;
                let exp = f(*exp)?;
                Self::pow(base, exp)
            },
        })
    }

    /// Returns the number of nodes in the tree. Atoms count as one node, and a compound node
    /// counts as one plus the sizes of its children.
    pub fn size(&self) -> usize {
        self.pre_order_iter().count()
    }

    /// Returns an iterator that traverses the tree in left-to-right pre-order, visiting each node
    /// before its children.
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }

    /// Returns the free symbols of the expression, sorted by name.
    pub fn free_symbols(&self) -> BTreeSet<&Symbol> {
        self.pre_order_iter()
            .filter_map(SymExpr::as_symbol)
            .collect()
    }

    /// Replaces every symbol that is a key of `substitutions` with its value.
    ///
    /// The replacement is simultaneous: the substituted values are not searched again, so
    /// `{x: y, y: x}` swaps the two symbols.
    pub fn substitute(&self, substitutions: &HashMap<Symbol, SymExpr>) -> SymExpr {
        match self {
            Self::Primary(Primary::Symbol(sym)) => substitutions.get(sym)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            Self::Primary(Primary::Call(name, args)) => Self::call(
                name.clone(),
                args.iter().map(|arg| arg.substitute(substitutions)).collect(),
            ),
            Self::Primary(_) => self.clone(),
            Self::Add(terms) => Self::Add(terms.iter().map(|term| term.substitute(substitutions)).collect()),
            Self::Mul(factors) => Self::Mul(factors.iter().map(|factor| factor.substitute(substitutions)).collect()),
            Self::Exp(base, exp) => Self::pow(base.substitute(substitutions), exp.substitute(substitutions)),
        }
    }

    /// If the expression is a [`Primary::Integer`], returns a reference to the contained integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Integer`], returns the contained integer.
    pub fn into_integer(self) -> Option<Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Integer`].
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Primary(Primary::Integer(_)))
    }

    /// If the expression is a [`Primary::Integer`] raised to the power of -1, returns a reference
    /// to the contained integer (the denominator of the fraction).
    pub fn as_integer_recip(&self) -> Option<&Integer> {
        match self {
            Self::Exp(base, exp) if exp.as_integer().map_or(false, |n| *n == -1) => base.as_integer(),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Integer`] raised to the power of -1.
    pub fn is_integer_recip(&self) -> bool {
        self.as_integer_recip().is_some()
    }

    /// Returns true if the expression is a [`Primary::Float`].
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Primary(Primary::Float(_)))
    }

    /// Returns true if the expression is a [`Primary::Integer`] or a [`Primary::Float`].
    pub fn is_number(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Returns true if the expression is the number zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Primary(Primary::Integer(n)) => n.is_zero(),
            Self::Primary(Primary::Float(n)) => n.is_zero(),
            _ => false,
        }
    }

    /// Returns true if the expression is the integer one.
    pub fn is_one(&self) -> bool {
        self.as_integer().map_or(false, |n| *n == 1)
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// If the expression is a call to the function `name`, returns its arguments.
    pub fn as_call(&self, name: &str) -> Option<&[SymExpr]> {
        match self {
            Self::Primary(Primary::Call(target, args)) if target == name => Some(args),
            _ => None,
        }
    }

    /// Returns true if the expression is known to be strictly positive.
    pub fn is_positive(&self) -> bool {
        match self {
            Self::Primary(Primary::Integer(n)) => *n > 0,
            Self::Primary(Primary::Float(n)) => n.is_sign_positive() && !n.is_zero(),
            Self::Primary(Primary::Symbol(sym)) => sym.assumptions.is_positive(),
            Self::Primary(Primary::Constant(_)) => true,
            Self::Mul(factors) => factors.iter().all(SymExpr::is_positive),
            Self::Exp(base, _) => base.is_positive(),
            _ => false,
        }
    }

    /// Returns true if the expression is known to be `>= 0`.
    pub fn is_nonnegative(&self) -> bool {
        match self {
            Self::Primary(Primary::Integer(n)) => *n >= 0,
            Self::Primary(Primary::Float(n)) => n.is_sign_positive() || n.is_zero(),
            Self::Primary(Primary::Symbol(sym)) => sym.assumptions.is_nonnegative(),
            Self::Primary(Primary::Call(name, _)) => name == "abs",
            expr => expr.is_positive(),
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in a [`SymExpr::Add`] with zero / one term, or a
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or the integer 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => match terms.len() {
                0 => Self::from(int(0)),
                1 => terms.remove(0),
                _ => Self::Add(terms),
            },
            Self::Mul(mut factors) => match factors.len() {
                0 => Self::from(int(1)),
                1 => factors.remove(0),
                _ => Self::Mul(factors),
            },
            _ => self,
        }
    }
}

/// Returns true if `lhs` and `rhs` hold strictly equal expressions with the same multiplicities,
/// in any order.
fn same_multiset(lhs: &[SymExpr], rhs: &[SymExpr]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut used = vec![false; rhs.len()];
    lhs.iter().all(|item| {
        let found = rhs.iter()
            .enumerate()
            .position(|(idx, candidate)| !used[idx] && candidate == item);
        match found {
            Some(idx) => {
                used[idx] = true;
                true
            },
            None => false,
        }
    })
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                same_multiset(lhs, rhs)
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

/// Adds two [`SymExpr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`SymExpr::Add`], in which case both are combined
/// in one list of terms (flattening).
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs + rhs,
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) => {
                terms.push(other);
                Self::Add(terms)
            },
            (other, Self::Add(mut terms)) => {
                terms.insert(0, other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Adds two [`SymExpr`]s together, reusing the allocation of `self` where possible.
impl AddAssign for SymExpr {
    fn add_assign(&mut self, rhs: Self) {
        if let Self::Add(terms) = self {
            match rhs {
                Self::Add(rhs_terms) => terms.extend(rhs_terms),
                other => terms.push(other),
            }
            return;
        }

        let lhs = std::mem::replace(self, Self::Add(Vec::new()));
        *self = lhs + rhs;
    }
}

/// Subtracts `rhs` from `self`, as `self + -1 * rhs`.
impl Sub for SymExpr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + rhs.neg()
    }
}

/// Multiplies two [`SymExpr`]s together. No simplification is done, except for the case where
/// the operands are a mix of [`Primary`] and / or [`SymExpr::Mul`], in which case both are
/// combined in one list of factors (flattening).
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs * rhs,
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (other, Self::Mul(mut factors)) => {
                factors.insert(0, other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

/// Multiplies two [`SymExpr`]s together, reusing the allocation of `self` where possible.
impl MulAssign for SymExpr {
    fn mul_assign(&mut self, rhs: Self) {
        if let Self::Mul(factors) = self {
            match rhs {
                Self::Mul(rhs_factors) => factors.extend(rhs_factors),
                other => factors.push(other),
            }
            return;
        }

        let lhs = std::mem::replace(self, Self::Mul(Vec::new()));
        *self = lhs * rhs;
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a numeric [`Primary`], in which case the number is negated.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Integer(int)) => Self::Primary(Primary::Integer(-int)),
            Self::Primary(Primary::Float(float)) => Self::Primary(Primary::Float(-float)),
            expr => Self::from(int(-1)) * expr,
        }
    }
}

/// Builds a fraction `numerator / denominator`, represented as `numerator * denominator^-1`.
pub(crate) fn make_fraction(numerator: SymExpr, denominator: SymExpr) -> SymExpr {
    numerator * SymExpr::pow(denominator, SymExpr::from(int(-1)))
}

/// NOTE: strict equality ignores the order of terms and factors, but `pretty_assertions` does
/// not, so a failing diff may show reordered children that are in fact equal.
#[cfg(test)]
mod tests {
    use formula_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> SymExpr {
        SymExpr::from(Symbol::new(name))
    }

    /// Parse the given formula and return the [`SymExpr`] representation.
    fn parse_expr(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        expr_from_ast(expr).unwrap()
    }

    #[test]
    fn strict_equality() {
        let a = parse_expr("2(x + (y - 5))");
        let b = parse_expr("(y - 5 + x) \\cdot 2");
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_is_not_semantic() {
        let a = parse_expr("2(x + (y - 5))");
        let b = parse_expr("2x + 2y - 10");
        assert_ne!(a, b);
    }

    #[test]
    fn strict_equality_counts_multiplicity() {
        let a = SymExpr::Add(vec![sym("a"), sym("a"), sym("b")]);
        let b = SymExpr::Add(vec![sym("a"), sym("b"), sym("b")]);
        assert_ne!(a, b);
    }

    #[test]
    fn flattening_operators() {
        let expr = (sym("a") + sym("b")) + (sym("c") + sym("d"));
        assert_eq!(expr, SymExpr::Add(vec![sym("a"), sym("b"), sym("c"), sym("d")]));

        let mut product = sym("a");
        product *= sym("b");
        product *= SymExpr::Mul(vec![sym("c"), sym("d")]);
        assert_eq!(product, SymExpr::Mul(vec![sym("a"), sym("b"), sym("c"), sym("d")]));
    }

    #[test]
    fn negation() {
        assert_eq!(-SymExpr::from(int(3)), SymExpr::from(int(-3)));
        assert_eq!(-sym("x"), SymExpr::Mul(vec![SymExpr::from(int(-1)), sym("x")]));
    }

    #[test]
    fn size_counts_nodes() {
        // Add(Mul(a, b), c)
        assert_eq!(parse_expr("ab + c").size(), 5);
        assert_eq!(sym("x").size(), 1);
        // sin(Mul(2, x))
        assert_eq!(parse_expr("\\sin(2x)").size(), 4);
    }

    #[test]
    fn free_symbols_are_sorted() {
        let expr = parse_expr("z + y \\sin(a)");
        let names = expr.free_symbols()
            .into_iter()
            .map(|sym| sym.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["a", "y", "z"]);
    }

    #[test]
    fn substitution_is_simultaneous() {
        let expr = SymExpr::pow(sym("x"), sym("y"));
        let swap = HashMap::from([
            (Symbol::new("x"), sym("y")),
            (Symbol::new("y"), sym("x")),
        ]);
        assert_eq!(expr.substitute(&swap), SymExpr::pow(sym("y"), sym("x")));
    }

    #[test]
    fn children_and_kind() {
        let expr = parse_expr("\\cos(x)^2");
        assert_eq!(expr.kind(), NodeKind::Exp);
        let children = expr.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].kind(), NodeKind::Call("cos"));
        assert!(!children[0].is_atom());
        assert!(children[1].is_atom());
    }

    #[test]
    fn fmt_expr() {
        let expr = parse_expr("(a + b) c^{x + 1}");
        assert_eq!(expr.to_string(), "(a + b) * c^(x + 1)");
    }
}
