use std::f32::consts::FRAC_PI_2;

use cubemath::cgmath::{self, Deg, Matrix4, Rad, Vector4};
use cubemath::prelude::*;

const DEFAULT_EYE: [Float; 3] = [4.5, 4.5, 6.5];
const DEFAULT_FOV: Deg<Float> = Deg(60.0);
const NEAR_PLANE: Float = 0.1;
const FAR_PLANE: Float = 100.0;

/// Keeps the orbit away from the poles, where the up vector degenerates.
const MAX_PITCH: Float = FRAC_PI_2 - 0.01;

/// Perspective camera orbiting the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Position of the eye.
    pub eye: Point3<Float>,
    /// Point the camera looks at.
    pub target: Point3<Float>,
    /// Vertical field of view.
    pub fov: Deg<Float>,
    /// Width divided by height of the viewport.
    pub aspect: Float,

    /// Whether orbit controls may move the camera. Suspended during drags.
    orbit_enabled: bool,
}
impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Point3::from(DEFAULT_EYE),
            target: Point3::origin(),
            fov: DEFAULT_FOV,
            aspect: 1.0,
            orbit_enabled: true,
        }
    }
}
impl Camera {
    /// Resets the camera to its default pose, keeping the aspect ratio.
    pub fn reset(&mut self) {
        *self = Self {
            aspect: self.aspect,
            orbit_enabled: self.orbit_enabled,
            ..Self::default()
        };
    }

    /// Returns whether orbit controls may move the camera.
    pub fn orbit_enabled(&self) -> bool {
        self.orbit_enabled
    }
    /// Enables or suspends orbit controls.
    pub fn set_orbit_enabled(&mut self, enabled: bool) {
        self.orbit_enabled = enabled;
    }

    /// Orbits the eye around the target by `yaw` radians around world up and
    /// `pitch` radians toward it. Returns `false` without moving if orbit
    /// controls are suspended.
    pub fn orbit(&mut self, yaw: Float, pitch: Float) -> bool {
        if !self.orbit_enabled {
            return false;
        }
        let offset = self.eye - self.target;
        let radius = offset.magnitude();
        let old_pitch = (offset.y / radius).asin();
        let new_pitch = (old_pitch + pitch).clamp(-MAX_PITCH, MAX_PITCH);
        let old_yaw = offset.x.atan2(offset.z);
        let new_yaw = old_yaw + yaw;
        let horizontal = radius * new_pitch.cos();
        self.eye = self.target
            + vec3(
                horizontal * new_yaw.sin(),
                radius * new_pitch.sin(),
                horizontal * new_yaw.cos(),
            );
        true
    }

    /// Returns the world-to-camera matrix.
    pub fn view_matrix(&self) -> Matrix4<Float> {
        Matrix4::look_at_rh(self.eye, self.target, Vector3::unit_y())
    }
    /// Returns the camera-to-clip-space matrix.
    pub fn projection_matrix(&self) -> Matrix4<Float> {
        cgmath::perspective(Rad::from(self.fov), self.aspect, NEAR_PLANE, FAR_PLANE)
    }

    /// Returns the ray from the eye through a point in normalized device
    /// coordinates, where `[-1, -1]` is the bottom left of the viewport and
    /// `[1, 1]` is the top right.
    pub fn ray_from_ndc(&self, [x, y]: [Float; 2]) -> Option<Ray> {
        let inverse = (self.projection_matrix() * self.view_matrix()).invert()?;
        let p = inverse * Vector4::new(x, y, 0.5, 1.0);
        if p.w.abs() < Float::EPSILON {
            return None;
        }
        let point = Point3::from_vec(p.truncate() / p.w);
        Ray::new(self.eye, point - self.eye)
    }

    /// Returns the normalized device coordinates of a point in world space.
    pub fn project(&self, point: Point3<Float>) -> Option<[Float; 2]> {
        let p = self.projection_matrix() * self.view_matrix() * point.to_homogeneous();
        (p.w > Float::EPSILON).then(|| [p.x / p.w, p.y / p.w])
    }
}

#[cfg(test)]
mod tests {
    use cubemath::assert_approx_eq;

    use super::*;

    const EYE: Point3<Float> = Point3 {
        x: DEFAULT_EYE[0],
        y: DEFAULT_EYE[1],
        z: DEFAULT_EYE[2],
    };

    #[test]
    fn test_center_ray_hits_target() {
        let camera = Camera::default();
        let ray = camera.ray_from_ndc([0.0, 0.0]).expect("valid ray");
        assert_approx_eq!(ray.origin, EYE);
        let expected = (Point3::origin() - EYE).normalize();
        assert!((ray.direction - expected).magnitude() < 0.001);
    }

    #[test]
    fn test_project_inverts_ray() {
        let camera = Camera::default();
        let ndc = camera.project(point3(0.5, 1.5, 1.5)).expect("in front of camera");
        let ray = camera.ray_from_ndc(ndc).expect("valid ray");
        let expected = (point3(0.5, 1.5, 1.5) - EYE).normalize();
        assert!((ray.direction - expected).magnitude() < 0.001);
    }

    #[test]
    fn test_orbit_suspension() {
        let mut camera = Camera::default();
        camera.set_orbit_enabled(false);
        assert!(!camera.orbit(0.3, 0.1));
        assert_eq!(camera.eye, EYE);

        camera.set_orbit_enabled(true);
        assert!(camera.orbit(0.3, 0.1));
        assert_ne!(camera.eye, EYE);
        let radius = (EYE - Point3::origin()).magnitude();
        assert_approx_eq!((camera.eye - camera.target).magnitude(), radius);

        camera.reset();
        assert_eq!(camera.eye, EYE);
    }
}
