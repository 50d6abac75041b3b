//! Coordinate axes of 3D space.

use cgmath::{Matrix3, Rad, Vector3};
use strum::{EnumIter, IntoEnumIterator};

use crate::{Float, Sign};

/// Axis in 3D space.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    /// X axis (right).
    X = 0,
    /// Y axis (up).
    Y = 1,
    /// Z axis (toward the viewer).
    Z = 2,
}
impl Axis {
    /// Returns the unit vector along this axis.
    pub fn unit_vec3(self) -> Vector3<Float> {
        match self {
            Axis::X => Vector3::unit_x(),
            Axis::Y => Vector3::unit_y(),
            Axis::Z => Vector3::unit_z(),
        }
    }
    /// Returns the signed unit vector along this axis.
    pub fn signed_vec3(self, sign: Sign) -> Vector3<Float> {
        self.unit_vec3() * sign.float()
    }

    /// Returns the component of `v` along this axis.
    pub fn component(self, v: Vector3<Float>) -> Float {
        v[self as usize]
    }

    /// Returns the two axes perpendicular to this one, in cyclic order so that
    /// `a × b` points along `self`.
    pub fn perpendiculars(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::Z, Axis::X],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }

    /// Returns an iterator over all axes.
    pub fn iter() -> impl Clone + Iterator<Item = Axis> {
        <Self as IntoEnumIterator>::iter()
    }

    /// Returns the axis whose component of `v` has the largest magnitude,
    /// along with the sign of that component. Zero counts as positive.
    ///
    /// Ties are broken toward the later axis, except that an X/Y tie with no
    /// larger Z component resolves to Y.
    pub fn dominant(v: Vector3<Float>) -> (Axis, Sign) {
        let (ax, ay, az) = (v.x.abs(), v.y.abs(), v.z.abs());
        let axis = if ax > ay {
            if ax > az { Axis::X } else { Axis::Z }
        } else if ay > az {
            Axis::Y
        } else {
            Axis::Z
        };
        (axis, Sign::of_nonzero(axis.component(v)))
    }

    /// Returns the rotation matrix for a right-handed rotation of `angle`
    /// radians around this axis.
    pub fn rotation(self, angle: Float) -> Matrix3<Float> {
        match self {
            Axis::X => Matrix3::from_angle_x(Rad(angle)),
            Axis::Y => Matrix3::from_angle_y(Rad(angle)),
            Axis::Z => Matrix3::from_angle_z(Rad(angle)),
        }
    }
}
