use cubemath::prelude::*;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Keys that scrambles draw from.
pub const SCRAMBLE_KEYS: [char; 3] = ['U', 'R', 'F'];

/// Request to rotate one layer. Immutable once queued.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    /// Axis of rotation.
    pub axis: Axis,
    /// World-space coordinate of the layer along `axis`.
    pub layer: Float,
    /// Angle of rotation, in radians.
    pub angle: Float,
}
impl Move {
    /// Returns the move that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self {
            angle: -self.angle,
            ..self
        }
    }
}

/// Layer and direction named by a move key.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayerMove {
    /// Axis of rotation.
    pub axis: Axis,
    /// World-space coordinate of the layer along `axis`.
    pub layer: Float,
    /// Direction of rotation for the unprimed move.
    pub direction: Sign,
}
impl LayerMove {
    /// Returns the quarter-turn move, reversed if `prime` is set.
    pub fn to_move(self, prime: bool) -> Move {
        let sign = if prime { -self.direction } else { self.direction };
        Move {
            axis: self.axis,
            layer: self.layer,
            angle: sign.float() * QUARTER_TURN,
        }
    }
}

/// Returns the layer named by a move key (`U D L R F B M`, case-insensitive)
/// on a cube with `size` layers and spacing `step`.
///
/// `M` only exists on cubes with a middle layer. Unknown keys return `None`.
pub fn map_move(key: char, step: Float, size: usize) -> Option<LayerMove> {
    let outer = outer_layer(size, step);
    let (axis, layer) = match key.to_ascii_uppercase() {
        'U' => (Axis::Y, outer),
        'D' => (Axis::Y, -outer),
        'L' => (Axis::X, -outer),
        'R' => (Axis::X, outer),
        'F' => (Axis::Z, outer),
        'B' => (Axis::Z, -outer),
        'M' if size % 2 == 1 => (Axis::X, 0.0),
        _ => return None,
    };
    Some(LayerMove {
        axis,
        layer,
        direction: Sign::Pos,
    })
}

/// Returns `n` random moves drawn from [`SCRAMBLE_KEYS`], each reversed with
/// probability ½.
pub fn scramble_moves(rng: &mut impl Rng, n: usize, step: Float, size: usize) -> Vec<Move> {
    (0..n)
        .filter_map(|_| {
            let &key = SCRAMBLE_KEYS.choose(rng)?;
            let prime = rng.random_bool(0.5);
            Some(map_move(key, step, size)?.to_move(prime))
        })
        .collect()
}
