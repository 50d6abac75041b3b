use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InteractionPreferences {
    /// Fraction of one step within which a piece counts as part of a layer.
    /// Must be less than `0.5`.
    pub layer_eps_ratio: f32,
    /// Fraction of one step a drag must travel before it picks a layer.
    pub drag_threshold_ratio: f32,
    /// Cosine of the angle to vertical below which the drag tangent basis
    /// switches from world up to world X.
    pub tangent_fallback_cos: f32,
    /// Number of moves in a scramble.
    pub scramble_length: usize,
}
impl Default for InteractionPreferences {
    fn default() -> Self {
        Self {
            layer_eps_ratio: 0.3,
            drag_threshold_ratio: 0.05,
            tangent_fallback_cos: 0.9,
            scramble_length: 20,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HighlightPreferences {
    /// Tone blended into highlighted pieces.
    pub color: cubepuzzle_core::Rgb,
    /// Amount of `color` in the blend, from 0 to 1.
    pub blend: f32,
}
impl Default for HighlightPreferences {
    fn default() -> Self {
        Self {
            color: cubepuzzle_core::Rgb::from_u32(0xffe066),
            blend: 0.4,
        }
    }
}
