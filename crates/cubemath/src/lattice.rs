//! Snapping positions, angles, and orientations onto the cube's grid.

use std::f32::consts::FRAC_PI_2;

use cgmath::{Matrix, Matrix3, SquareMatrix, Vector3};

use crate::Float;

/// Angle of one quarter turn, in radians.
pub const QUARTER_TURN: Float = FRAC_PI_2;

/// Returns the offset of lattice points from the origin, in units of one
/// step, for a cube with `size` layers along each axis.
///
/// Odd cubes have a layer through the origin. Even cubes have their layers
/// centered half a step away from it.
pub fn lattice_offset(size: usize) -> Float {
    if size % 2 == 0 { 0.5 } else { 0.0 }
}

/// Returns the coordinate of the outermost layer on the positive side of a
/// cube with `size` layers spaced `step` apart.
pub fn outer_layer(size: usize, step: Float) -> Float {
    (size as Float - 1.0) / 2.0 * step
}

/// Snaps `x` to the nearest value of the form `(k + offset) * step` for some
/// integer `k`.
///
/// The result is a fixed point: snapping it again returns the same value.
pub fn snap_coord(x: Float, step: Float, offset: Float) -> Float {
    ((x / step - offset).round() + offset) * step
}

/// Snaps each component of `v` using [`snap_coord()`].
pub fn snap_vector(v: Vector3<Float>, step: Float, offset: Float) -> Vector3<Float> {
    v.map(|x| snap_coord(x, step, offset))
}

/// Returns the integer lattice index of `x`, counting from `0` at the most
/// negative layer of a cube with `size` layers.
pub fn layer_index(x: Float, step: Float, size: usize) -> i32 {
    ((x + outer_layer(size, step)) / step).round() as i32
}

/// Snaps an angle to the nearest multiple of a quarter turn.
pub fn snap_angle(angle: Float) -> Float {
    (angle / QUARTER_TURN).round() * QUARTER_TURN
}

/// Rounds each entry of an orientation matrix to the nearest integer and
/// returns the result if it is a proper rotation that permutes the axes
/// (a signed permutation matrix with determinant `+1`).
///
/// Returns `None` if the rounded matrix is not such a rotation, which happens
/// when the input is more than about 45 degrees away from every grid-aligned
/// orientation.
pub fn snap_orientation(m: Matrix3<Float>) -> Option<Matrix3<Float>> {
    // `+ 0.0` turns `-0.0` into `0.0`
    let round = |col: Vector3<Float>| col.map(|x| x.round() + 0.0);
    let rounded = Matrix3::from_cols(round(m.x), round(m.y), round(m.z));
    let is_orthogonal = rounded.transpose() * rounded == Matrix3::identity();
    (is_orthogonal && rounded.determinant() == 1.0).then_some(rounded)
}
