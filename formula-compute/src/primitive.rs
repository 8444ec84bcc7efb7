//! Functions to construct [`Integer`]s, [`Float`]s, and [`Rational`]s from various types.

use rug::{Assign, Float, Integer, Rational};

/// The number of digits of precision to use when computing values.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates an [`Integer`] from a string slice of decimal digits.
pub fn int_from_str(s: &str) -> Option<Integer> {
    Integer::from_str_radix(s, 10).ok()
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates a [`Float`] from a string slice, such as `3.14` or `.5`.
pub fn float_from_str(s: &str) -> Option<Float> {
    Float::parse(s).ok().map(|parsed| Float::with_val(PRECISION, parsed))
}

/// Creates a [`Rational`] from a numerator and denominator.
pub fn rational<N, D>(numerator: N, denominator: D) -> Rational
where
    Rational: From<(N, D)>,
{
    Rational::from((numerator, denominator))
}
