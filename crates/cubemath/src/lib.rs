//! Axis, lattice, ray, and quarter-turn rotation primitives for a cube of
//! cubelets.

pub use {approx, cgmath};

/// Floating-point type used for geometry.
pub type Float = f32;

/// Small floating-point value used for comparisons and tiny offsets.
pub const EPSILON: Float = 0.0001;

/// Asserts that both arguments are approximately equal.
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::approx::assert_abs_diff_eq!($a, $b, epsilon = $crate::EPSILON)
    };
}

pub mod approx_cmp;
pub mod axis;
pub mod lattice;
pub mod plane;
pub mod ray;
pub mod sign;

pub use axis::Axis;
pub use sign::Sign;

/// Structs, traits, and constants.
pub mod prelude {
    pub use cgmath::{
        EuclideanSpace, InnerSpace, Matrix, Matrix3, Point3, SquareMatrix, Vector3, point3,
        vec3,
    };

    pub use crate::approx_cmp::*;
    pub use crate::axis::Axis;
    pub use crate::lattice::*;
    pub use crate::plane::*;
    pub use crate::ray::*;
    pub use crate::sign::Sign;
    pub use crate::{EPSILON, Float};
}
