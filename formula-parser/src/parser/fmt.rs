use std::fmt::{Display, Formatter, Result};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// Writes `value` surrounded by sized parentheses.
pub fn fmt_paren(f: &mut Formatter, value: &impl Latex) -> Result {
    write!(f, "\\left(")?;
    value.fmt_latex(f)?;
    write!(f, "\\right)")
}

/// Writes `value` as a braced group, such as the exponent in `x^{2}`.
pub fn fmt_group(f: &mut Formatter, value: &impl Latex) -> Result {
    write!(f, "{{")?;
    value.fmt_latex(f)?;
    write!(f, "}}")
}
