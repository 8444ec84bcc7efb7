//! Tools to help manipulate numeric coefficients.
//!
//! Exact numbers are represented in [`SymExpr`]s as an integer, an integer raised to `-1`, or the
//! product of both. [`Number`] reads any of these forms (or a float) into a single value that can
//! be added and multiplied, and writes it back out in normalized form.

use crate::primitive::{float, int};
use crate::symbolic::expr::{Primary, SymExpr};
use rug::{Float, Rational};
use std::ops::{Add, Mul};

/// A numeric coefficient, either exact or floating-point.
///
/// Arithmetic between an exact and a floating-point number produces a floating-point number.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Number {
    Rational(Rational),
    Float(Float),
}

impl Number {
    /// The number one.
    pub(crate) fn one() -> Self {
        Self::Rational(Rational::from(1))
    }

    /// Reads a number from an expression in any of the forms the simplifier produces.
    ///
    /// - `5` -> `5`
    /// - `2.5` -> `2.5`
    /// - `4^-1` -> `1/4`
    /// - `3*4^-1` -> `3/4`
    ///
    /// Returns [`None`] if the expression is not purely numeric, or if it contains the reciprocal
    /// of zero.
    pub(crate) fn from_expr(expr: &SymExpr) -> Option<Self> {
        match expr {
            SymExpr::Primary(Primary::Integer(n)) => Some(Self::Rational(Rational::from(n))),
            SymExpr::Primary(Primary::Float(n)) => Some(Self::Float(n.clone())),
            SymExpr::Exp(..) => expr.as_integer_recip()
                .filter(|denominator| !denominator.is_zero())
                .map(|denominator| Self::Rational(Rational::from((int(1), denominator.clone())))),
            SymExpr::Mul(factors) => factors.iter()
                .try_fold(Self::one(), |product, factor| Some(product * Self::from_expr(factor)?)),
            _ => None,
        }
    }

    /// Returns true if the number is zero.
    pub(crate) fn is_zero(&self) -> bool {
        match self {
            Self::Rational(r) => r.is_zero(),
            Self::Float(f) => f.is_zero(),
        }
    }

    /// Returns true if the number is exactly one.
    pub(crate) fn is_one(&self) -> bool {
        matches!(self, Self::Rational(r) if *r == 1)
    }

    fn into_float(self) -> Float {
        match self {
            Self::Rational(r) => float(r),
            Self::Float(f) => f,
        }
    }

    /// Writes the number as a normalized expression: an integer, `d^-1`, `n * d^-1`, or a float.
    pub(crate) fn into_expr(self) -> SymExpr {
        match self {
            Self::Rational(r) => {
                let (numerator, denominator) = r.into_numer_denom();
                if denominator == 1 {
                    SymExpr::from(numerator)
                } else {
                    let recip = SymExpr::pow(SymExpr::from(denominator), SymExpr::from(int(-1)));
                    if numerator == 1 {
                        recip
                    } else {
                        SymExpr::Mul(vec![SymExpr::from(numerator), recip])
                    }
                }
            },
            Self::Float(f) => SymExpr::from(f),
        }
    }
}

impl Add for Number {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Rational(lhs), Self::Rational(rhs)) => Self::Rational(lhs + rhs),
            (lhs, rhs) => Self::Float(lhs.into_float() + rhs.into_float()),
        }
    }
}

impl Mul for Number {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Rational(lhs), Self::Rational(rhs)) => Self::Rational(lhs * rhs),
            (lhs, rhs) => Self::Float(lhs.into_float() * rhs.into_float()),
        }
    }
}

/// Splits an expression into its numeric coefficient and the product of its other factors. If the
/// expression has no numeric factors, the coefficient is 1.
///
/// - `5` -> `(5, 1)`
/// - `3*a` -> `(3, a)`
/// - `1/4*a*b` -> `(1/4, a*b)`
/// - `a` -> `(1, a)`
pub(crate) fn split_coefficient(expr: &SymExpr) -> (Number, SymExpr) {
    if let Some(number) = Number::from_expr(expr) {
        return (number, SymExpr::from(int(1)));
    }

    match expr {
        SymExpr::Mul(factors) => {
            let mut coefficient = Number::one();
            let mut rest = Vec::with_capacity(factors.len());
            for factor in factors {
                match Number::from_expr(factor) {
                    Some(number) => coefficient = coefficient * number,
                    None => rest.push(factor.clone()),
                }
            }
            (coefficient, SymExpr::Mul(rest).downgrade())
        },
        expr => (Number::one(), expr.clone()),
    }
}

/// If the expression is an exact number, returns it as a [`Rational`].
pub(crate) fn as_rational(expr: &SymExpr) -> Option<Rational> {
    match Number::from_expr(expr)? {
        Number::Rational(r) => Some(r),
        Number::Float(_) => None,
    }
}
