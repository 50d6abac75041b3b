use cubemath::prelude::*;
use cubepuzzle_core::{Cube, PieceId};
use float_ord::FloatOrd;

/// Nearest piece under a ray.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    /// Piece that was hit.
    pub piece: PieceId,
    /// World-space point on the surface of the piece.
    pub point: Point3<Float>,
    /// World-space outward normal of the face that was hit.
    pub normal: Vector3<Float>,
    /// Distance along the ray.
    pub distance: Float,
}

/// Casts `ray` against every piece of the cube, treating each as a box with
/// edge length equal to the cubelet size, and returns the nearest hit.
pub fn pick_piece(cube: &Cube, ray: &Ray) -> Option<PickHit> {
    let half_extent = cube.params().cubelet / 2.0;
    cube.pieces()
        .iter()
        .filter_map(|piece| {
            let id = piece.id();
            let center = Point3::from_vec(cube.world_position(id)?);
            let hit = ray.intersect_cube(center, cube.world_orientation(id)?, half_extent)?;
            Some(PickHit {
                piece: id,
                point: hit.point,
                normal: hit.normal,
                distance: hit.distance,
            })
        })
        .min_by_key(|hit| FloatOrd(hit.distance))
}
