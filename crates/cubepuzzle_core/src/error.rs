use cubemath::Float;

use crate::MAX_CUBE_SIZE;

/// Error constructing or manipulating a [`crate::Cube`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CubeError {
    /// Cube size is zero or too large.
    #[error("cube size must be between 1 and {max}; got {0}", max = MAX_CUBE_SIZE)]
    InvalidSize(usize),
    /// Cubelet edge length is not positive.
    #[error("cubelet size must be positive and finite; got {0}")]
    InvalidCubeletSize(Float),
    /// Gap between cubelets is negative.
    #[error("gap must be non-negative and finite; got {0}")]
    InvalidGap(Float),
    /// A rotation was requested while another layer is on the pivot.
    #[error("a layer is already attached to the pivot")]
    PivotBusy,
    /// A pivot operation was requested with no layer attached.
    #[error("no layer is attached to the pivot")]
    NoPivot,
}
