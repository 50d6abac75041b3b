//! Rays and ray intersection tests.

use cgmath::{EuclideanSpace, InnerSpace, Matrix, Matrix3, Point3, Vector3};

use crate::plane::Plane;
use crate::{Axis, EPSILON, Float, Sign};

/// Half-line starting at `origin` and extending along `direction`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Point3<Float>,
    /// Unit direction vector.
    pub direction: Vector3<Float>,
}

/// Point where a ray enters a box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoxHit {
    /// Distance along the ray.
    pub distance: Float,
    /// Intersection point in world space.
    pub point: Point3<Float>,
    /// Outward unit normal of the box face that was hit, in world space.
    pub normal: Vector3<Float>,
}

impl Ray {
    /// Constructs a ray, normalizing `direction`. Returns `None` if
    /// `direction` is zero or not finite.
    pub fn new(origin: Point3<Float>, direction: Vector3<Float>) -> Option<Self> {
        let len = direction.magnitude();
        (len > EPSILON && len.is_finite()).then(|| Self {
            origin,
            direction: direction / len,
        })
    }

    /// Returns the point at distance `t` along the ray.
    pub fn at(&self, t: Float) -> Point3<Float> {
        self.origin + self.direction * t
    }

    /// Returns the point where the ray crosses `plane`, or `None` if it never
    /// does.
    ///
    /// A ray lying inside the plane hits it at its origin.
    pub fn intersect_plane(&self, plane: &Plane) -> Option<Point3<Float>> {
        let denominator = plane.normal.dot(self.direction);
        if denominator.abs() < Float::EPSILON {
            let d = plane.signed_distance(self.origin);
            return (d.abs() < Float::EPSILON).then_some(self.origin);
        }
        let t = -(self.origin.to_vec().dot(plane.normal) + plane.constant) / denominator;
        (t >= 0.0).then(|| self.at(t))
    }

    /// Intersects the ray with a cube centered at `center`, with half-width
    /// `half_extent` and orientation `orientation` (whose columns are the
    /// cube's local axes in world space).
    ///
    /// Returns `None` if the ray misses or starts inside the cube.
    pub fn intersect_cube(
        &self,
        center: Point3<Float>,
        orientation: Matrix3<Float>,
        half_extent: Float,
    ) -> Option<BoxHit> {
        let inverse = orientation.transpose();
        let o = inverse * (self.origin - center);
        let d = inverse * self.direction;

        let mut t_enter = Float::NEG_INFINITY;
        let mut t_exit = Float::INFINITY;
        let mut entry_face = None;
        for axis in Axis::iter() {
            let (oi, di) = (axis.component(o), axis.component(d));
            if di.abs() < Float::EPSILON {
                if oi.abs() > half_extent {
                    return None;
                }
                continue;
            }
            let t1 = (-half_extent - oi) / di;
            let t2 = (half_extent - oi) / di;
            let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
            if near > t_enter {
                t_enter = near;
                // The ray enters through the face opposite its direction.
                entry_face = Some((axis, -Sign::of(di)));
            }
            t_exit = t_exit.min(far);
        }

        if t_enter > t_exit || t_enter < 0.0 {
            return None;
        }
        let (axis, sign) = entry_face?;
        Some(BoxHit {
            distance: t_enter,
            point: self.at(t_enter),
            normal: orientation * axis.signed_vec3(sign),
        })
    }
}
