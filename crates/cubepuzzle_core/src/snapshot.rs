use cubemath::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{Cube, GridCoord, PieceId, Rgb};

/// Serializable summary of the state of a cube.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CubeSnapshot {
    /// Number of layers along each axis.
    pub size: usize,
    /// Spacing between adjacent layers.
    pub step: Float,
    /// Whether every piece is back where it started.
    pub solved: bool,
    /// Per-piece state, in ID order.
    pub pieces: Vec<PieceSnapshot>,
}

/// Serializable state of one piece.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PieceSnapshot {
    /// ID of the piece.
    pub id: PieceId,
    /// Grid coordinate assigned at construction, as layer indices from `0`
    /// (most negative layer) to `size - 1`. The centered coordinate is
    /// `index - (size - 1) / 2`, so on a 3x3 index `0` is coordinate `-1`.
    pub grid: GridCoord,
    /// Layer index of the current position along each axis, counted the same
    /// way as `grid`. A piece is home along an axis when the two match.
    pub layer: [i32; 3],
    /// World-space position.
    pub position: [Float; 3],
    /// World-space orientation, as columns.
    pub orientation: [[Float; 3]; 3],
    /// Material colors, ordered +X, −X, +Y, −Y, +Z, −Z in the piece's local
    /// frame.
    pub colors: [Rgb; 6],
}

impl Cube {
    /// Returns whether every piece is at its original position and
    /// orientation.
    pub fn is_solved(&self) -> bool {
        let step = self.step();
        self.pieces().iter().all(|piece| {
            let home = piece.grid().centered(self.size()) * step;
            self.world_position(piece.id()).is_some_and(|pos| approx_eq(&pos, &home))
                && self
                    .world_orientation(piece.id())
                    .is_some_and(|rot| approx_eq(&rot, &Matrix3::identity()))
        })
    }

    /// Returns a serializable snapshot of the cube.
    pub fn snapshot(&self) -> CubeSnapshot {
        let step = self.step();
        let pieces = self
            .pieces()
            .iter()
            .map(|piece| {
                let id = piece.id();
                let position = self.world_position(id).unwrap_or(piece.position());
                let orientation = self.world_orientation(id).unwrap_or(piece.orientation());
                PieceSnapshot {
                    id,
                    grid: piece.grid(),
                    layer: [Axis::X, Axis::Y, Axis::Z]
                        .map(|axis| layer_index(axis.component(position), step, self.size())),
                    position: position.into(),
                    orientation: orientation.into(),
                    colors: piece.materials().map(|m| m.color),
                }
            })
            .collect();
        CubeSnapshot {
            size: self.size(),
            step,
            solved: self.is_solved(),
            pieces,
        }
    }
}
