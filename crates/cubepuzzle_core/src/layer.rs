use cubemath::prelude::*;
use smallvec::SmallVec;

use crate::{Cube, PieceId};

/// Pieces in one layer. A 3x3x3 layer fits without allocating.
pub type LayerPieces = SmallVec<[PieceId; 9]>;

impl Cube {
    /// Returns every piece whose world-space coordinate along `axis` is within
    /// `step * eps_ratio` of `layer`.
    ///
    /// `eps_ratio` should be less than `0.5` so that adjacent layers are never
    /// captured. Returns an empty list if nothing matches.
    pub fn select_layer(&self, axis: Axis, layer: Float, eps_ratio: Float) -> LayerPieces {
        let tolerance = self.step() * eps_ratio;
        self.pieces()
            .iter()
            .map(|piece| piece.id())
            .filter(|&id| {
                self.world_position(id)
                    .is_some_and(|pos| (axis.component(pos) - layer).abs() < tolerance)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{CubeParams, GridCoord};

    fn grids_of(cube: &Cube, pieces: &[PieceId]) -> Vec<GridCoord> {
        let mut grids: Vec<GridCoord> = pieces
            .iter()
            .filter_map(|&id| Some(cube.piece(id)?.grid()))
            .collect();
        grids.sort();
        grids
    }

    #[test]
    fn test_select_layer_solved() {
        let params = CubeParams {
            size: 3,
            cubelet: 0.9,
            gap: 0.2,
        };
        let cube = Cube::new(params).expect("valid cube");
        let s = cube.step();

        let top = cube.select_layer(Axis::Y, s, 0.3);
        assert_eq!(top.len(), 9);
        assert!(grids_of(&cube, &top).iter().all(|g| g.index(Axis::Y) == 2));

        let middle = cube.select_layer(Axis::Y, 0.0, 0.3);
        assert_eq!(middle.len(), 9);
        assert!(grids_of(&cube, &middle).iter().all(|g| g.index(Axis::Y) == 1));

        assert!(cube.select_layer(Axis::Y, 0.5 * s, 0.3).is_empty());
        assert!(cube.select_layer(Axis::Z, 5.0 * s, 0.3).is_empty());
    }

    #[test]
    fn test_select_layer_sees_pivot() {
        let mut cube = Cube::new(CubeParams::default()).expect("valid cube");
        let s = cube.step();
        let right = cube.select_layer(Axis::X, s, 0.3);
        cube.attach_pivot(Axis::Z, right.clone()).expect("pivot is free");
        cube.set_pivot_angle(QUARTER_TURN).expect("pivot is active");

        // Rotating the right layer a quarter turn around Z moves it onto the
        // top layer, next to the six top pieces that stayed put.
        let top = cube.select_layer(Axis::Y, s, 0.3);
        assert_eq!(top.len(), 15);
        assert!(right.iter().all(|id| top.contains(id)));
        assert!(cube.select_layer(Axis::X, s, 0.3).len() == 3);
    }
}
