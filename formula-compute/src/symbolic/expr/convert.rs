//! Conversion from the parser's AST to [`SymExpr`].
//!
//! Conversion is lossy: spans and grouping are dropped, sums and products are flattened, and
//! notation is normalized. `a - b` becomes `a + -1*b`, `\frac{a}{b}` becomes `a * b^-1`,
//! `\sqrt[n]{x}` becomes `x^(n^-1)`, `\ln` becomes `log`, and `\log_b x` becomes
//! `log(x) * log(b)^-1`.

use crate::error::{kind, Error};
use crate::primitive::{float_from_str, int, int_from_str};
use formula_parser::parser::{
    ast::{Binary, Call, ConstantKind, Expr as AstExpr, Literal, ParenKind},
    token::op::{BinOpKind, UnaryOpKind},
};
use super::{make_fraction, Constant, Primary, Symbol, SymExpr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parsed formula: either a plain expression, or a relation between two expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Formula {
    /// An expression, such as `x^2 + 1`.
    Expr(SymExpr),

    /// A relation, such as `E = mc^2` or `a \leq b`.
    Relation {
        /// The relational operator.
        op: BinOpKind,

        /// The left-hand side.
        lhs: SymExpr,

        /// The right-hand side.
        rhs: SymExpr,
    },
}

impl Formula {
    /// Returns true if the formula is a relation.
    pub fn is_relation(&self) -> bool {
        matches!(self, Self::Relation { .. })
    }

    /// Reduces the formula to a single expression. A relation `lhs op rhs` becomes `lhs - rhs`,
    /// discarding the operator.
    pub fn into_zeroed(self) -> SymExpr {
        match self {
            Self::Expr(expr) => expr,
            Self::Relation { lhs, rhs, .. } => lhs - rhs,
        }
    }
}

impl TryFrom<AstExpr> for Formula {
    type Error = Error;

    fn try_from(expr: AstExpr) -> Result<Self, Self::Error> {
        match expr.innermost() {
            AstExpr::Binary(bin) if bin.op.kind.is_relation() => Ok(Self::Relation {
                op: bin.op.kind,
                lhs: expr_from_ast((*bin.lhs).clone())?,
                rhs: expr_from_ast((*bin.rhs).clone())?,
            }),
            _ => expr_from_ast(expr).map(Self::Expr),
        }
    }
}

/// Returns true if the expression is written as `-1`.
fn is_minus_one(expr: &AstExpr) -> bool {
    match expr.innermost() {
        AstExpr::Unary(unary) if unary.op.kind == UnaryOpKind::Neg => matches!(
            unary.operand.innermost(),
            AstExpr::Literal(Literal::Integer(n)) if n.value == "1"
        ),
        _ => false,
    }
}

/// Converts a function call, normalizing the function's name and notation.
fn call_from_ast(call: Call) -> Result<SymExpr, Error> {
    let arg = expr_from_ast(*call.arg)?;
    let inverse = match call.name.as_str() {
        "sin" => Some("arcsin"),
        "cos" => Some("arccos"),
        "tan" => Some("arctan"),
        _ => None,
    };

    // `\sin^{-1} x` is the inverse function, not a reciprocal
    let mut power = call.power;
    let name = match (inverse, &power) {
        (Some(inverse), Some(p)) if is_minus_one(p) => {
            power = None;
            inverse.to_string()
        },
        _ => call.name,
    };

    let applied = match name.as_str() {
        "exp" => SymExpr::pow(SymExpr::from(Constant::E), arg),
        "ln" => SymExpr::call("log", vec![arg]),
        "log" => match call.base {
            Some(base) => make_fraction(
                SymExpr::call("log", vec![arg]),
                SymExpr::call("log", vec![expr_from_ast(*base)?]),
            ),
            None => SymExpr::call("log", vec![arg]),
        },
        _ => SymExpr::call(name, vec![arg]),
    };

    match power {
        Some(power) => Ok(SymExpr::pow(applied, expr_from_ast(*power)?)),
        None => Ok(applied),
    }
}

/// Iteratively flattens a chain of the same binary operator into a list of operands, in
/// left-to-right order.
fn flatten_chain(bin: Binary, op: BinOpKind) -> Vec<AstExpr> {
    let mut operands = Vec::new();
    let mut stack = vec![AstExpr::Binary(bin)];
    while let Some(expr) = stack.pop() {
        match expr {
            AstExpr::Binary(bin) if bin.op.kind == op => {
                stack.push(*bin.rhs);
                stack.push(*bin.lhs);
            },
            expr => operands.push(expr),
        }
    }
    operands
}

/// Converts an AST expression into a [`SymExpr`].
///
/// Relations are only valid at the top level of a formula, which is handled by
/// [`Formula::try_from`]; a relation found here is a [`kind::NestedRelation`] error.
pub fn expr_from_ast(expr: AstExpr) -> Result<SymExpr, Error> {
    match expr {
        AstExpr::Literal(literal) => match literal {
            Literal::Integer(lit) => int_from_str(&lit.value)
                .map(SymExpr::from)
                .ok_or_else(|| Error::new(vec![lit.span], kind::InvalidNumber { literal: lit.value })),
            Literal::Float(lit) => float_from_str(&lit.value)
                .map(SymExpr::from)
                .ok_or_else(|| Error::new(vec![lit.span], kind::InvalidNumber { literal: lit.value })),
            Literal::Symbol(sym) if sym.name == "e" => Ok(SymExpr::from(Constant::E)),
            Literal::Symbol(sym) => Ok(SymExpr::from(Symbol::new(sym.name))),
            Literal::Constant(constant) => Ok(SymExpr::from(match constant.kind {
                ConstantKind::Pi => Constant::Pi,
                ConstantKind::Infinity => Constant::Infinity,
            })),
        },
        AstExpr::Paren(paren) => match paren.kind {
            ParenKind::Abs => Ok(SymExpr::call("abs", vec![expr_from_ast(*paren.expr)?])),
            _ => expr_from_ast(*paren.expr),
        },
        AstExpr::Call(call) => call_from_ast(call),
        AstExpr::Frac(frac) => Ok(make_fraction(
            expr_from_ast(*frac.numerator)?,
            expr_from_ast(*frac.denominator)?,
        )),
        AstExpr::Root(root) => {
            let index = match root.index {
                Some(index) => expr_from_ast(*index)?,
                None => SymExpr::from(int(2)),
            };
            let exp = match index {
                SymExpr::Primary(Primary::Integer(n)) => SymExpr::pow(SymExpr::from(n), SymExpr::from(int(-1))),
                index => make_fraction(SymExpr::from(int(1)), index),
            };
            Ok(SymExpr::pow(expr_from_ast(*root.radicand)?, exp))
        },
        AstExpr::Unary(unary) => {
            let operand = expr_from_ast(*unary.operand)?;
            match unary.op.kind {
                UnaryOpKind::Neg => Ok(-operand),
                UnaryOpKind::Pos => Ok(operand),
            }
        },
        AstExpr::Binary(bin) => match bin.op.kind {
            BinOpKind::Exp => Ok(SymExpr::pow(expr_from_ast(*bin.lhs)?, expr_from_ast(*bin.rhs)?)),
            BinOpKind::Mul => {
                let mut factors = SymExpr::Mul(Vec::new());
                for operand in flatten_chain(bin, BinOpKind::Mul) {
                    factors *= expr_from_ast(operand)?;
                }
                Ok(factors)
            },
            BinOpKind::Div => Ok(make_fraction(expr_from_ast(*bin.lhs)?, expr_from_ast(*bin.rhs)?)),
            BinOpKind::Add => {
                let mut terms = SymExpr::Add(Vec::new());
                for operand in flatten_chain(bin, BinOpKind::Add) {
                    terms += expr_from_ast(operand)?;
                }
                Ok(terms)
            },
            BinOpKind::Sub => Ok(expr_from_ast(*bin.lhs)? - expr_from_ast(*bin.rhs)?),
            BinOpKind::Greater
                | BinOpKind::GreaterEq
                | BinOpKind::Less
                | BinOpKind::LessEq
                | BinOpKind::Eq
                | BinOpKind::NotEq => Err(Error::new(vec![bin.span], kind::NestedRelation)),
        },
    }
}
