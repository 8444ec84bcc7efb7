use crate::parser::{
    ast::{expr::{Expr, Primary}, unary::Unary},
    error::{kind, Error},
    fmt::{fmt_group, Latex},
    token::op::{BinOp, BinOpKind},
    Associativity,
    Parser,
    Precedence,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary operator, including implicit multiplication.
#[derive(Debug, Clone, PartialEq)]
enum BinOpExt {
    /// A binary operator, such as `+` or `\cdot`.
    Op(BinOp),

    /// Implicit multiplication, such as `2x` or `x(x + 1)`.
    ///
    /// This is not a real operator, but it is treated as one for the purposes of parsing.
    ImplicitMultiplication,
}

impl BinOpExt {
    /// Returns the precedence of the binary operator.
    fn precedence(&self) -> Precedence {
        match self {
            BinOpExt::Op(op) => op.precedence(),
            BinOpExt::ImplicitMultiplication => Precedence::Factor,
        }
    }
}

impl From<BinOp> for BinOpExt {
    fn from(op: BinOp) -> Self {
        BinOpExt::Op(op)
    }
}

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Builds the implicit multiplication `lhs rhs`.
    pub fn implicit(lhs: Expr, rhs: Expr) -> Expr {
        let (start_span, end_span) = (lhs.span().start, rhs.span().end);
        let op_span = lhs.span().end..rhs.span().start;
        Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op: BinOp {
                kind: BinOpKind::Mul,
                implicit: true,
                span: op_span,
            },
            rhs: Box::new(rhs),
            span: start_span..end_span,
        })
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    fn complete_rhs(
        input: &mut Parser,
        lhs: Expr,
        op: BinOpExt,
        mut rhs: Expr,
    ) -> Result<Expr, Error> {
        let precedence = op.precedence();

        loop {
            // before creating the `lhs op rhs` node, we should check the precedence of the
            // following operator, if any
            // this is because we can't parse an expression like `3 + 4 * 5`, as (3 + 4) * 5

            // clone the input stream to emulate peeking
            let mut input_ahead = input.clone();
            if let Ok(next_op) = input_ahead.try_parse::<BinOp>() {
                if next_op.precedence() > precedence || next_op.associativity() == Associativity::Right {
                    // this operator has a higher precedence or it is right associative, so we
                    // should parse its expression starting with `rhs` first
                    rhs = Self::parse_expr(input, rhs, next_op.precedence())?.0;
                } else {
                    // this operator has lower precedence, or equal precedence and
                    // left-associativity; we will parse it on the next iteration of the outside
                    // loop
                    break;
                }
            } else {
                // there is no operator; check if there is a primary expression instead
                // if there is, this is implicit multiplication
                //
                // first, check if the previous operator has higher or equal precedence; if so, we
                // cannot give priority to implicit multiplication
                if precedence >= Precedence::Factor {
                    break;
                }

                let (expr, changed) = Self::parse_expr(input, rhs, Precedence::Factor)?;
                rhs = expr;
                if !changed {
                    break;
                }
            }
        }

        // create the binary node representing `lhs op rhs`
        match op {
            BinOpExt::Op(op) => {
                let (start_span, end_span) = (lhs.span().start, rhs.span().end);
                Ok(Expr::Binary(Binary {
                    lhs: Box::new(lhs),
                    op,
                    rhs: Box::new(rhs),
                    span: start_span..end_span,
                }))
            },
            BinOpExt::ImplicitMultiplication => Ok(Self::implicit(lhs, rhs)),
        }
    }

    /// Parses a primary expression that is implicitly multiplied with the previous expression.
    /// Unknown commands are reported immediately instead of ending the expression.
    fn parse_implicit_operand(input: &mut Parser) -> Result<Option<Expr>, Error> {
        match input.try_parse_with_fn(Primary::parse) {
            Ok(expr) => Ok(Some(expr)),
            Err(err) if err.is::<kind::UnknownCommand>() => Err(err),
            Err(_) => Ok(None),
        }
    }

    /// Parses a binary expression with the given left-hand-side, consuming operators with at
    /// least the given precedence. Returns the expression and whether any operator was consumed.
    pub fn parse_expr(
        input: &mut Parser,
        mut lhs: Expr,
        precedence: Precedence,
    ) -> Result<(Expr, bool), Error> {
        let mut changed = false;

        loop {
            let mut input_ahead = input.clone();
            if let Ok(op) = input_ahead.try_parse_then::<BinOp, _>(|bin_op, input| {
                if bin_op.precedence() >= precedence {
                    Ok(())
                } else {
                    Err(input.error(kind::NonFatal))
                }
            }) {
                input.set_cursor(&input_ahead);
                let rhs = Unary::parse_or_lower(input)?;
                lhs = Self::complete_rhs(input, lhs, op.into(), rhs)?;
            } else if Precedence::Factor >= precedence {
                // a lower-precedence operator ends the implicit product
                if input_ahead.try_parse::<BinOp>().is_ok() {
                    break;
                }

                let Some(rhs) = Self::parse_implicit_operand(input)? else {
                    break;
                };
                lhs = Self::complete_rhs(input, lhs, BinOpExt::ImplicitMultiplication, rhs)?;
            } else {
                break;
            }

            changed = true;
        }

        Ok((lhs, changed))
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.op.implicit {
            write!(f, "{}{}", self.lhs, self.rhs)
        } else if self.op.kind == BinOpKind::Exp {
            write!(f, "{}^{}", self.lhs, self.rhs)
        } else {
            write!(f, "{} {} {}", self.lhs, self.op.kind, self.rhs)
        }
    }
}

impl Latex for Binary {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.lhs.fmt_latex(f)?;
        if self.op.implicit {
            write!(f, " ")?;
            self.rhs.fmt_latex(f)
        } else if self.op.kind == BinOpKind::Exp {
            write!(f, "^")?;
            fmt_group(f, self.rhs.innermost())
        } else {
            write!(f, " {} ", self.op.kind.latex())?;
            self.rhs.fmt_latex(f)
        }
    }
}
