use std::fmt;

/// A rewrite rule that was applied during simplification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// `a+0 = a`
    AddZero,

    /// `2a+3a = 5a`
    CombineLikeTerms,

    /// `a+(b+c) = a+b+c`, `a*(b*c) = a*b*c`
    Flatten,

    /// `a*0 = 0`
    MultiplyZero,

    /// `a*1 = a`
    MultiplyOne,

    /// `2*3*4^-1 = 3/2`
    FoldNumbers,

    /// `a^b*a^c = a^(b+c)`
    CombineLikeFactors,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `1^a = 1`
    OnePower,

    /// `0^a = 0`, `a > 0`
    ZeroPower,

    /// `2^3 = 8`
    NumericPower,

    /// `8^(1/3) = 2`
    ExactRoot,

    /// `(a^b)^c = a^(b*c)`
    PowerOfPower,

    /// `(a*b)^c = a^c * b^c`
    DistributePower,

    /// `sin(0) = 0`, `cos(pi) = -1`
    TrigValue,

    /// `sin(x)/cos(x) = tan(x)`
    TrigQuotient,

    /// `sin(x)^2 + cos(x)^2 = 1`
    Pythagorean,

    /// `log(1) = 0`, `log(e^x) = x`
    Logarithm,

    /// `|-3| = 3`, `|x| = x`, `x >= 0`
    AbsoluteValue,

    /// `a*(b+c) = a*b + a*c`
    DistributiveProperty,

    /// `(a+b)^2 = a^2 + 2ab + b^2`
    ExpandPower,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            Self::AddZero => "remove zero terms",
            Self::CombineLikeTerms => "combine like terms",
            Self::Flatten => "flatten nested sums and products",
            Self::MultiplyZero => "multiply by zero",
            Self::MultiplyOne => "remove factors of one",
            Self::FoldNumbers => "multiply numbers",
            Self::CombineLikeFactors => "combine like factors",
            Self::PowerZero => "raise to the power of zero",
            Self::PowerOne => "raise to the power of one",
            Self::OnePower => "raise one to a power",
            Self::ZeroPower => "raise zero to a positive power",
            Self::NumericPower => "evaluate a numeric power",
            Self::ExactRoot => "evaluate an exact root",
            Self::PowerOfPower => "multiply exponents of a nested power",
            Self::DistributePower => "distribute a power over a product",
            Self::TrigValue => "evaluate a trigonometric function",
            Self::TrigQuotient => "rewrite a quotient of sine and cosine",
            Self::Pythagorean => "apply the Pythagorean identity",
            Self::Logarithm => "evaluate a logarithm",
            Self::AbsoluteValue => "evaluate an absolute value",
            Self::DistributiveProperty => "apply the distributive property",
            Self::ExpandPower => "expand a power of a sum",
        };
        write!(f, "{}", description)
    }
}
