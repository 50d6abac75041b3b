use serde::{Deserialize, Serialize};

pub use interpolation::InterpolateFn;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Whether to speed up twists exponentially as the queue grows.
    pub dynamic_twist_speed: bool,
    /// Duration of one quarter turn, in seconds.
    pub twist_duration: f32,
    pub twist_interpolation: InterpolateFn,
}
impl Default for AnimationPreferences {
    fn default() -> Self {
        Self {
            dynamic_twist_speed: false,
            twist_duration: 0.14,
            twist_interpolation: InterpolateFn::default(),
        }
    }
}

pub mod interpolation {
    //! Interpolation functions.

    use std::f32::consts::PI;

    use serde::{Deserialize, Serialize};
    use strum::VariantArray;

    /// Function that maps a float from the range 0.0 to 1.0 to another float
    /// from 0.0 to 1.0.
    #[derive(
        Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, VariantArray,
    )]
    #[serde(rename_all = "snake_case")]
    pub enum InterpolateFn {
        Lerp,
        /// Quadratic ease-in for the first half and ease-out for the second.
        #[default]
        QuadInOut,
        Cosine,
        /// Smoothstep.
        Cubic,
        /// Overshoots the target slightly, then settles back.
        Overshoot,
        CriticallyDamped,
    }

    impl InterpolateFn {
        /// Returns the interpolated progress for `t` in the range [0, 1]. The
        /// result is `0` at `t = 0` and (nearly) `1` at `t = 1`.
        pub fn interpolate(self, t: f32) -> f32 {
            match self {
                Self::Lerp => t,

                Self::QuadInOut => {
                    if t < 0.5 {
                        2.0 * t * t
                    } else {
                        -1.0 + (4.0 - 2.0 * t) * t
                    }
                }

                Self::Cosine => (1.0 - (t * PI).cos()) / 2.0,

                Self::Cubic => (3.0 - 2.0 * t) * t * t,

                Self::Overshoot => {
                    // ease-out-back
                    const C1: f32 = 1.70158;
                    let u = t - 1.0;
                    1.0 + (C1 + 1.0) * u * u * u + C1 * u * u
                }
                Self::CriticallyDamped => (-5.0 * t - 1.0) * (-8.0 * t).exp() + 1.0,
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_interpolate_endpoints() {
            for &f in InterpolateFn::VARIANTS {
                assert!(f.interpolate(0.0).abs() < 0.001, "{f:?} at 0");
                // Critically damped approaches 1 but never quite reaches it.
                assert!((f.interpolate(1.0) - 1.0).abs() < 0.01, "{f:?} at 1");
            }
        }

        #[test]
        fn test_quad_in_out_is_symmetric() {
            let f = InterpolateFn::QuadInOut;
            assert_eq!(f.interpolate(0.5), 0.5);
            assert_eq!(f.interpolate(0.25), 0.125);
            for i in 0..=20 {
                let t = i as f32 / 20.0;
                let mirrored = 1.0 - f.interpolate(1.0 - t);
                assert!((f.interpolate(t) - mirrored).abs() < 1e-6);
            }
        }
    }
}
