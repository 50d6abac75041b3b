use cubemath::prelude::*;

use crate::{Cube, Parent};

impl Cube {
    /// Snaps every piece attached to the cube onto the nearest lattice point
    /// and its orientation onto the nearest quarter-turn orientation.
    ///
    /// Pieces on an active pivot are left alone. Calling this twice in a row
    /// has the same effect as calling it once.
    pub fn normalize(&mut self) {
        let step = self.step();
        let offset = self.params().lattice_offset();
        for piece in &mut self.pieces {
            if piece.parent != Parent::Cube {
                log::trace!("skipping {} during normalization; it is on the pivot", piece.id);
                continue;
            }
            piece.position = snap_vector(piece.position, step, offset);
            match snap_orientation(piece.orientation) {
                Some(orientation) => piece.orientation = orientation,
                None => log::warn!(
                    "orientation of {} is not near a quarter turn: {:?}",
                    piece.id,
                    piece.orientation,
                ),
            }
        }
    }
}
