//! Sign enum.

use std::ops::{Mul, Neg};

/// Positive, negative, or zero.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sign {
    /// Negative.
    Neg = -1,
    /// Zero.
    #[default]
    Zero = 0,
    /// Positive.
    Pos = 1,
}
impl Neg for Sign {
    type Output = Sign;
    fn neg(self) -> Sign {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Zero => Sign::Zero,
            Sign::Pos => Sign::Neg,
        }
    }
}
impl Mul<Sign> for Sign {
    type Output = Sign;
    fn mul(self, rhs: Sign) -> Sign {
        match self {
            Sign::Neg => -rhs,
            Sign::Zero => Sign::Zero,
            Sign::Pos => rhs,
        }
    }
}
impl Sign {
    /// Returns the sign of a number. `0.0`, `-0.0`, and NaN are all
    /// [`Sign::Zero`].
    pub fn of(x: f32) -> Sign {
        if x > 0.0 {
            Sign::Pos
        } else if x < 0.0 {
            Sign::Neg
        } else {
            Sign::Zero
        }
    }
    /// Returns the sign of a number, treating zero as positive.
    pub fn of_nonzero(x: f32) -> Sign {
        match Sign::of(x) {
            Sign::Zero => Sign::Pos,
            s => s,
        }
    }

    /// Returns an integer representation of the sign (either -1, 0, or 1).
    pub const fn int(self) -> i32 {
        match self {
            Sign::Neg => -1,
            Sign::Zero => 0,
            Sign::Pos => 1,
        }
    }
    /// Returns a floating-point representation of the sign (either -1.0, 0.0,
    /// or 1.0).
    pub const fn float(self) -> f32 {
        self.int() as f32
    }

    /// Returns an iterator over all signs.
    pub fn iter() -> impl Clone + Iterator<Item = Sign> {
        [Sign::Neg, Sign::Zero, Sign::Pos].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_of() {
        assert_eq!(Sign::of(3.5), Sign::Pos);
        assert_eq!(Sign::of(-0.1), Sign::Neg);
        assert_eq!(Sign::of(-0.0), Sign::Zero);
        assert_eq!(Sign::of_nonzero(0.0), Sign::Pos);
        assert_eq!(Sign::of_nonzero(-2.0), Sign::Neg);
        for s in Sign::iter() {
            assert_eq!(-(-s), s);
            assert_eq!(s * Sign::Pos, s);
        }
    }
}
