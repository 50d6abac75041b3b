use cubemath::prelude::*;
use itertools::Itertools;

use crate::{Cube, CubeError, LayerPieces, Move, Parent};

/// Temporary rotating node that a layer is attached to while it turns.
#[derive(Debug, Clone, PartialEq)]
pub struct Pivot {
    axis: Axis,
    angle: Float,
    pieces: LayerPieces,
}
impl Pivot {
    /// Returns the axis of rotation.
    pub fn axis(&self) -> Axis {
        self.axis
    }
    /// Returns the current angle of rotation, in radians.
    pub fn angle(&self) -> Float {
        self.angle
    }
    /// Returns the pieces attached to the pivot.
    pub fn pieces(&self) -> &LayerPieces {
        &self.pieces
    }
    /// Returns the rotation matrix of the pivot.
    pub fn rotation(&self) -> Matrix3<Float> {
        self.axis.rotation(self.angle)
    }
}

impl Cube {
    /// Creates a pivot at the cube's center and attaches `pieces` to it,
    /// preserving their world transforms.
    ///
    /// Returns [`CubeError::PivotBusy`] if another pivot is active. Unknown
    /// and duplicate IDs are ignored.
    pub fn attach_pivot(&mut self, axis: Axis, pieces: LayerPieces) -> Result<(), CubeError> {
        if self.pivot.is_some() {
            return Err(CubeError::PivotBusy);
        }
        let pieces: LayerPieces = pieces
            .into_iter()
            .unique()
            .filter(|id| (id.0 as usize) < self.pieces.len())
            .collect();
        // The new pivot has no rotation, so local transforms are unchanged.
        for id in &pieces {
            self.pieces[id.0 as usize].parent = Parent::Pivot;
        }
        log::trace!("attached {} pieces to pivot around {axis}", pieces.len());
        self.pivot = Some(Pivot {
            axis,
            angle: 0.0,
            pieces,
        });
        Ok(())
    }

    /// Sets the rotation of the active pivot, in radians.
    pub fn set_pivot_angle(&mut self, angle: Float) -> Result<(), CubeError> {
        let pivot = self.pivot.as_mut().ok_or(CubeError::NoPivot)?;
        pivot.angle = angle;
        Ok(())
    }

    /// Reattaches every piece on the pivot to the cube with its world
    /// transform baked in, then discards the pivot and returns it.
    pub fn detach_pivot(&mut self) -> Result<Pivot, CubeError> {
        let pivot = self.pivot.take().ok_or(CubeError::NoPivot)?;
        let rotation = pivot.rotation();
        for id in &pivot.pieces {
            let piece = &mut self.pieces[id.0 as usize];
            piece.position = rotation * piece.position;
            piece.orientation = rotation * piece.orientation;
            piece.parent = Parent::Cube;
        }
        log::trace!(
            "detached {} pieces from pivot at {} degrees",
            pivot.pieces.len(),
            pivot.angle.to_degrees(),
        );
        Ok(pivot)
    }

    /// Instantly rotates the layer at `layer` along `axis` by `angle`
    /// radians, without normalizing. Returns the pieces that moved.
    pub fn rotate_layer(
        &mut self,
        axis: Axis,
        layer: Float,
        angle: Float,
        eps_ratio: Float,
    ) -> Result<LayerPieces, CubeError> {
        if self.pivot.is_some() {
            return Err(CubeError::PivotBusy);
        }
        let pieces = self.select_layer(axis, layer, eps_ratio);
        if pieces.is_empty() {
            log::trace!("no pieces in layer {layer} along {axis}");
            return Ok(pieces);
        }
        self.attach_pivot(axis, pieces)?;
        self.set_pivot_angle(angle)?;
        Ok(self.detach_pivot()?.pieces)
    }

    /// Instantly applies a move and normalizes the cube. Returns the pieces
    /// that moved.
    pub fn apply_move(&mut self, mv: Move, eps_ratio: Float) -> Result<LayerPieces, CubeError> {
        let pieces = self.rotate_layer(mv.axis, mv.layer, mv.angle, eps_ratio)?;
        self.normalize();
        Ok(pieces)
    }
}

#[cfg(test)]
mod tests {
    use cubemath::assert_approx_eq;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::CubeParams;

    #[test]
    fn test_single_pivot() {
        let mut cube = Cube::new(CubeParams::default()).expect("valid cube");
        let layer = cube.select_layer(Axis::Y, 1.0, 0.3);
        assert_eq!(cube.set_pivot_angle(1.0), Err(CubeError::NoPivot));
        cube.attach_pivot(Axis::Y, layer.clone()).expect("pivot is free");
        assert_eq!(cube.attach_pivot(Axis::X, layer.clone()), Err(CubeError::PivotBusy));
        assert_eq!(
            cube.rotate_layer(Axis::X, 1.0, QUARTER_TURN, 0.3),
            Err(CubeError::PivotBusy),
        );

        let pivot = cube.detach_pivot().expect("pivot is active");
        assert_eq!(pivot.pieces().len(), layer.len());
        assert!(cube.pieces().iter().all(|p| p.parent() == Parent::Cube));
        assert_eq!(cube.detach_pivot(), Err(CubeError::NoPivot));
    }

    #[test]
    fn test_detach_preserves_world_transform() {
        let mut cube = Cube::new(CubeParams::default()).expect("valid cube");
        let layer = cube.select_layer(Axis::X, -1.0, 0.3);
        cube.attach_pivot(Axis::X, layer.clone()).expect("pivot is free");
        cube.set_pivot_angle(0.3).expect("pivot is active");
        let before: Vec<_> = layer
            .iter()
            .map(|&id| (cube.world_position(id), cube.world_orientation(id)))
            .collect();
        cube.detach_pivot().expect("pivot is active");
        for (&id, (pos, rot)) in layer.iter().zip(before) {
            assert_approx_eq!(cube.world_position(id).expect("piece exists"), pos.expect("piece exists"));
            assert_approx_eq!(cube.world_orientation(id).expect("piece exists"), rot.expect("piece exists"));
        }
    }

    #[test]
    fn test_rotate_layer_moves_corner() {
        let mut cube = Cube::new(CubeParams::default()).expect("valid cube");
        let corner = cube
            .pieces()
            .iter()
            .find(|p| p.position() == vec3(1.0, 1.0, 1.0))
            .map(|p| p.id())
            .expect("corner exists");
        let moved = cube
            .rotate_layer(Axis::Y, 1.0, QUARTER_TURN, 0.3)
            .expect("no pivot is active");
        assert_eq!(moved.len(), 9);
        assert_approx_eq!(cube.world_position(corner).expect("piece exists"), vec3(1.0, 1.0, -1.0));

        let empty = cube
            .rotate_layer(Axis::Y, 0.5, QUARTER_TURN, 0.3)
            .expect("no pivot is active");
        assert!(empty.is_empty());
        assert!(cube.pivot().is_none());
    }
}
