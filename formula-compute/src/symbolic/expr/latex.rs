//! Rendering of [`SymExpr`]s as LaTeX.
//!
//! The expression is first turned back into a parser AST, inserting the groups, fractions,
//! roots, and signs that the flattened representation does not record, and the AST is then
//! written out with its [`Latex`] implementation.

use formula_parser::parser::{
    ast::{
        Binary,
        Call,
        ConstantKind,
        Expr as AstExpr,
        Frac,
        LitConst,
        LitFloat,
        LitInt,
        LitSym,
        Literal,
        Paren,
        ParenKind,
        Root,
        Unary,
    },
    fmt::Latex,
    token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind},
};
use rug::{Float, Integer};
use std::fmt;
use super::{Constant, Primary, SymExpr};

fn lit_int(value: &Integer) -> AstExpr {
    AstExpr::Literal(Literal::Integer(LitInt { value: value.to_string(), span: 0..0 }))
}

fn lit_float(value: &Float) -> AstExpr {
    let mut text = value.to_f64().to_string();
    if !text.contains(['.', 'e', 'i', 'N']) {
        text.push_str(".0");
    }
    AstExpr::Literal(Literal::Float(LitFloat { value: text, span: 0..0 }))
}

fn lit_sym(name: &str) -> AstExpr {
    AstExpr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span: 0..0 }))
}

fn group(expr: AstExpr, kind: ParenKind) -> AstExpr {
    AstExpr::Paren(Paren { expr: Box::new(expr), kind, sized: true, span: 0..0 })
}

fn binary(lhs: AstExpr, kind: BinOpKind, implicit: bool, rhs: AstExpr) -> AstExpr {
    AstExpr::Binary(Binary {
        lhs: Box::new(lhs),
        op: BinOp { kind, implicit, span: 0..0 },
        rhs: Box::new(rhs),
        span: 0..0,
    })
}

/// Negates the AST, grouping it first if it is a sum or difference.
fn negate(expr: AstExpr) -> AstExpr {
    let operand = match expr {
        AstExpr::Binary(ref bin) if matches!(bin.op.kind, BinOpKind::Add | BinOpKind::Sub) => {
            group(expr, ParenKind::Round)
        },
        expr => expr,
    };
    AstExpr::Unary(Unary {
        operand: Box::new(operand),
        op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..0 },
        span: 0..0,
    })
}

/// Returns true if the expression is a negative number.
fn is_negative_number(expr: &SymExpr) -> bool {
    match expr {
        SymExpr::Primary(Primary::Integer(n)) => *n < 0,
        SymExpr::Primary(Primary::Float(n)) => n.is_sign_negative() && !n.is_zero(),
        _ => false,
    }
}

/// If the exponent is a negative integer, returns its magnitude.
fn negative_exponent(exp: &SymExpr) -> Option<Integer> {
    exp.as_integer()
        .filter(|n| **n < 0)
        .map(|n| Integer::from(-n))
}

/// Splits the sign off of an expression, returning whether it was negative and its magnitude.
fn split_sign(expr: &SymExpr) -> (bool, SymExpr) {
    match expr {
        expr if is_negative_number(expr) => (true, -expr.clone()),
        SymExpr::Mul(factors) => match factors.iter().position(is_negative_number) {
            Some(idx) => {
                let mut factors = factors.clone();
                if factors[idx].as_integer().map_or(false, |n| *n == -1) {
                    factors.remove(idx);
                } else {
                    let negated = -factors[idx].clone();
                    factors[idx] = negated;
                }
                (true, SymExpr::Mul(factors).downgrade())
            },
            None => (false, expr.clone()),
        },
        expr => (false, expr.clone()),
    }
}

/// Returns true if the LaTeX of the expression starts with a digit, so that implicit
/// multiplication in front of it would read as one number.
fn starts_with_digit(expr: &SymExpr) -> bool {
    match expr {
        SymExpr::Primary(Primary::Integer(_) | Primary::Float(_)) => !is_negative_number(expr),
        SymExpr::Exp(base, exp) => negative_exponent(exp).is_none() && starts_with_digit(base),
        _ => false,
    }
}

/// Converts one factor of a product, grouping it if needed.
fn factor_to_ast(factor: &SymExpr) -> AstExpr {
    let ast = AstExpr::from(factor);
    if matches!(factor, SymExpr::Add(_)) || split_sign(factor).0 {
        group(ast, ParenKind::Round)
    } else {
        ast
    }
}

/// Joins factors with implicit multiplication, or with `\cdot` before a factor that starts with
/// a digit.
fn join_factors(factors: &[SymExpr]) -> AstExpr {
    let mut iter = factors.iter();
    let Some(first) = iter.next() else {
        return lit_int(&Integer::from(1));
    };

    iter.fold(factor_to_ast(first), |lhs, factor| {
        binary(lhs, BinOpKind::Mul, !starts_with_digit(factor), factor_to_ast(factor))
    })
}

/// Converts a product of nonnegative sign, moving factors with negative integer exponents into
/// the denominator of a fraction.
fn product_to_ast(factors: &[SymExpr]) -> AstExpr {
    let mut numerator = Vec::new();
    let mut denominator = Vec::new();
    for factor in factors {
        match factor {
            SymExpr::Exp(base, exp) => match negative_exponent(exp) {
                Some(k) if k == 1 => denominator.push((**base).clone()),
                Some(k) => denominator.push(SymExpr::pow((**base).clone(), SymExpr::from(k))),
                None => numerator.push(factor.clone()),
            },
            factor => numerator.push(factor.clone()),
        }
    }

    if denominator.is_empty() {
        join_factors(&numerator)
    } else {
        AstExpr::Frac(Frac {
            numerator: Box::new(join_factors(&numerator)),
            denominator: Box::new(join_factors(&denominator)),
            span: 0..0,
        })
    }
}

fn sum_to_ast(terms: &[SymExpr]) -> AstExpr {
    let mut iter = terms.iter();
    let Some(first) = iter.next() else {
        return lit_int(&Integer::new());
    };

    let (negative, magnitude) = split_sign(first);
    let first = AstExpr::from(&magnitude);
    let first = if negative { negate(first) } else { first };

    iter.fold(first, |lhs, term| {
        let (negative, magnitude) = split_sign(term);
        let rhs = AstExpr::from(&magnitude);
        let rhs = if matches!(magnitude, SymExpr::Add(_)) {
            group(rhs, ParenKind::Round)
        } else {
            rhs
        };
        let op = if negative { BinOpKind::Sub } else { BinOpKind::Add };
        binary(lhs, op, false, rhs)
    })
}

fn power_to_ast(base: &SymExpr, exp: &SymExpr) -> AstExpr {
    if let Some(k) = negative_exponent(exp) {
        let denominator = if k == 1 {
            base.clone()
        } else {
            SymExpr::pow(base.clone(), SymExpr::from(k))
        };
        return AstExpr::Frac(Frac {
            numerator: Box::new(lit_int(&Integer::from(1))),
            denominator: Box::new(AstExpr::from(&denominator)),
            span: 0..0,
        });
    }

    if let Some(index) = exp.as_integer_recip().filter(|n| **n >= 2) {
        return AstExpr::Root(Root {
            radicand: Box::new(AstExpr::from(base)),
            index: (*index != 2).then(|| Box::new(lit_int(index))),
            span: 0..0,
        });
    }

    let base_ast = AstExpr::from(base);
    let grouped = matches!(base, SymExpr::Add(_) | SymExpr::Mul(_) | SymExpr::Exp(..))
        || is_negative_number(base);
    let base_ast = if grouped { group(base_ast, ParenKind::Round) } else { base_ast };
    binary(base_ast, BinOpKind::Exp, false, AstExpr::from(exp))
}

impl From<&SymExpr> for AstExpr {
    fn from(expr: &SymExpr) -> Self {
        match expr {
            SymExpr::Primary(primary) => match primary {
                Primary::Integer(n) if *n < 0 => negate(lit_int(&Integer::from(-n))),
                Primary::Integer(n) => lit_int(n),
                Primary::Float(n) if is_negative_number(expr) => negate(lit_float(&Float::with_val(n.prec(), -n))),
                Primary::Float(n) => lit_float(n),
                Primary::Symbol(sym) => lit_sym(&sym.name),
                Primary::Constant(Constant::E) => lit_sym("e"),
                Primary::Constant(Constant::Pi) => AstExpr::Literal(Literal::Constant(LitConst {
                    kind: ConstantKind::Pi,
                    span: 0..0,
                })),
                Primary::Constant(Constant::Infinity) => AstExpr::Literal(Literal::Constant(LitConst {
                    kind: ConstantKind::Infinity,
                    span: 0..0,
                })),
                Primary::Call(name, args) if name == "abs" && args.len() == 1 => {
                    group(AstExpr::from(&args[0]), ParenKind::Abs)
                },
                Primary::Call(name, args) => {
                    // the LaTeX subset only has functions of one argument; extra arguments are
                    // written as a product so that nothing is dropped
                    let arg = match args.as_slice() {
                        [arg] => AstExpr::from(arg),
                        args => join_factors(args),
                    };
                    AstExpr::Call(Call {
                        name: name.clone(),
                        power: None,
                        base: None,
                        arg: Box::new(arg),
                        span: 0..0,
                    })
                },
            },
            SymExpr::Add(terms) => sum_to_ast(terms),
            SymExpr::Mul(_) => {
                let (negative, magnitude) = split_sign(expr);
                let ast = match &magnitude {
                    SymExpr::Mul(factors) => product_to_ast(factors),
                    other => AstExpr::from(other),
                };
                if negative { negate(ast) } else { ast }
            },
            SymExpr::Exp(base, exp) => power_to_ast(base, exp),
        }
    }
}

impl Latex for SymExpr {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        AstExpr::from(self).fmt_latex(f)
    }
}

impl SymExpr {
    /// Renders the expression as LaTeX.
    pub fn to_latex(&self) -> String {
        self.as_display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::int;
    use crate::symbolic::expr::Symbol;
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> SymExpr {
        SymExpr::from(Symbol::new(name))
    }

    fn num(n: i32) -> SymExpr {
        SymExpr::from(int(n))
    }

    #[test]
    fn sum_of_products() {
        let expr = SymExpr::Add(vec![SymExpr::Mul(vec![sym("a"), sym("b")]), sym("c")]);
        assert_eq!(expr.to_latex(), "a b + c");
    }

    #[test]
    fn subtraction_and_negation() {
        let expr = SymExpr::Add(vec![
            SymExpr::Mul(vec![num(-2), sym("x")]),
            SymExpr::Mul(vec![num(-1), sym("y")]),
            num(-3),
        ]);
        assert_eq!(expr.to_latex(), "-2 x - y - 3");
    }

    #[test]
    fn fractions() {
        let half_x = SymExpr::Mul(vec![sym("x"), SymExpr::pow(num(2), num(-1))]);
        assert_eq!(half_x.to_latex(), "\\frac{x}{2}");

        let recip = SymExpr::pow(sym("y"), num(-2));
        assert_eq!(recip.to_latex(), "\\frac{1}{y^{2}}");
    }

    #[test]
    fn roots_and_powers() {
        let sqrt = SymExpr::pow(sym("x"), SymExpr::pow(num(2), num(-1)));
        assert_eq!(sqrt.to_latex(), "\\sqrt{x}");

        let cbrt = SymExpr::pow(sym("x"), SymExpr::pow(num(3), num(-1)));
        assert_eq!(cbrt.to_latex(), "\\sqrt[3]{x}");

        let square = SymExpr::pow(SymExpr::Add(vec![sym("a"), sym("b")]), num(2));
        assert_eq!(square.to_latex(), "\\left(a + b\\right)^{2}");
    }

    #[test]
    fn calls_and_digits() {
        let expr = SymExpr::Mul(vec![sym("x"), num(2), SymExpr::call("sin", vec![sym("x")])]);
        assert_eq!(expr.to_latex(), "x \\cdot 2 \\sin\\left(x\\right)");

        let abs = SymExpr::call("abs", vec![sym("x_{1}")]);
        assert_eq!(abs.to_latex(), "\\left|x_{1}\\right|");
    }
}
