//! Approximate comparison functions that automatically use [`EPSILON`].

pub use approx::AbsDiffEq;

use crate::{EPSILON, Float};

/// Compares two numbers, but considers them equal if they are separated by less
/// than `EPSILON`.
///
/// Handles infinity specially.
pub fn approx_eq<T: AbsDiffEq<Epsilon = Float>>(a: &T, b: &T) -> bool {
    // use native float equality to handle infinities
    a == b || approx::abs_diff_eq!(a, b, epsilon = EPSILON)
}

/// Returns `f` as an integer if it is approximately equal to one.
pub fn to_approx_integer(f: Float) -> Option<i32> {
    let rounded = f.round();
    approx_eq(&f, &rounded).then_some(rounded as i32)
}

/// Returns whether `f` is approximately an integer multiple of `unit`.
pub fn is_approx_multiple_of(f: Float, unit: Float) -> bool {
    to_approx_integer(f / unit).is_some()
}
