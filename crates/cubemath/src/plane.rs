//! Planes and tangent directions on them.

use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3};

use crate::Float;

/// Plane in 3D space, consisting of all points `p` where
/// `normal · p + constant = 0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Plane {
    /// Unit normal vector.
    pub normal: Vector3<Float>,
    /// Negated distance of the plane from the origin along `normal`.
    pub constant: Float,
}
impl Plane {
    /// Constructs the plane with normal `normal` passing through `point`.
    ///
    /// `normal` is normalized.
    pub fn from_normal_and_coplanar_point(normal: Vector3<Float>, point: Point3<Float>) -> Self {
        let normal = normal.normalize();
        Self {
            normal,
            constant: -point.to_vec().dot(normal),
        }
    }

    /// Returns the signed distance from the plane to `point`, positive on the
    /// side that `normal` points toward.
    pub fn signed_distance(&self, point: Point3<Float>) -> Float {
        self.normal.dot(point.to_vec()) + self.constant
    }
}

/// Returns two orthonormal directions perpendicular to `normal`, forming a
/// right-handed frame `(t1, t2, normal)`.
///
/// The helper axis is world up, unless `normal` is within `fallback_cos`
/// (cosine of the angle) of vertical, in which case world X is used instead.
pub fn tangent_basis(normal: Vector3<Float>, fallback_cos: Float) -> [Vector3<Float>; 2] {
    let normal = normal.normalize();
    let up = Vector3::unit_y();
    let helper = if normal.dot(up).abs() > fallback_cos {
        Vector3::unit_x()
    } else {
        up
    };
    let t1 = helper.cross(normal).normalize();
    let t2 = normal.cross(t1).normalize();
    [t1, t2]
}
