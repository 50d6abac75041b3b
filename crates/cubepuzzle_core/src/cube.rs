use std::fmt;

use cubemath::prelude::*;
use itertools::iproduct;
use serde::{Deserialize, Serialize};

use crate::{CubeError, Face, FaceMaterial, INNER_COLOR, MaterialId, Pivot, Rgb};

/// Largest supported number of layers along each axis.
pub const MAX_CUBE_SIZE: usize = 32;

/// Construction parameters of a cube.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeParams {
    /// Number of layers along each axis.
    pub size: usize,
    /// Edge length of one cubelet.
    pub cubelet: Float,
    /// Space between adjacent cubelets.
    pub gap: Float,
}
impl Default for CubeParams {
    fn default() -> Self {
        Self {
            size: 3,
            cubelet: 0.95,
            gap: 0.05,
        }
    }
}
impl CubeParams {
    /// Returns an error if the parameters do not describe a valid cube.
    pub fn validate(&self) -> Result<(), CubeError> {
        if !(1..=MAX_CUBE_SIZE).contains(&self.size) {
            return Err(CubeError::InvalidSize(self.size));
        }
        if !(self.cubelet.is_finite() && self.cubelet > 0.0) {
            return Err(CubeError::InvalidCubeletSize(self.cubelet));
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            return Err(CubeError::InvalidGap(self.gap));
        }
        Ok(())
    }

    /// Returns the center-to-center spacing between adjacent layers.
    pub fn step(&self) -> Float {
        self.cubelet + self.gap
    }
    /// Returns the lattice offset in units of one step (`0.5` for even
    /// sizes).
    pub fn lattice_offset(&self) -> Float {
        lattice_offset(self.size)
    }
}

/// Index of a piece in a [`Cube`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);
impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "piece #{}", self.0)
    }
}

/// Logical grid coordinate assigned to a piece when the cube is built.
///
/// Each component is a layer index from `0` (most negative layer) to
/// `size - 1`. This never changes after construction; layer membership is
/// always computed from the current position instead.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord(pub [i32; 3]);
impl GridCoord {
    /// Returns the index along `axis`.
    pub fn index(self, axis: Axis) -> i32 {
        self.0[axis as usize]
    }
    /// Returns the coordinate relative to the center of the cube, in units of
    /// one step. These are half-integers for even sizes.
    pub fn centered(self, size: usize) -> Vector3<Float> {
        let half = (size as Float - 1.0) / 2.0;
        Vector3::from(self.0.map(|i| i as Float - half))
    }
}

/// Node that a piece's transform is relative to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Parent {
    /// The cube itself, whose frame is the world frame.
    Cube,
    /// The active pivot.
    Pivot,
}

/// One cubelet.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub(crate) id: PieceId,
    pub(crate) grid: GridCoord,
    pub(crate) position: Vector3<Float>,
    pub(crate) orientation: Matrix3<Float>,
    pub(crate) materials: [FaceMaterial; MaterialId::PER_PIECE],
    pub(crate) parent: Parent,
}
impl Piece {
    /// Returns the ID of the piece.
    pub fn id(&self) -> PieceId {
        self.id
    }
    /// Returns the grid coordinate assigned at construction.
    pub fn grid(&self) -> GridCoord {
        self.grid
    }
    /// Returns the position relative to the parent.
    pub fn position(&self) -> Vector3<Float> {
        self.position
    }
    /// Returns the orientation relative to the parent. Its columns are the
    /// piece's local axes.
    pub fn orientation(&self) -> Matrix3<Float> {
        self.orientation
    }
    /// Returns the materials, ordered +X, −X, +Y, −Y, +Z, −Z in the piece's
    /// local frame.
    pub fn materials(&self) -> &[FaceMaterial; MaterialId::PER_PIECE] {
        &self.materials
    }
    /// Returns the node the piece is currently attached to.
    pub fn parent(&self) -> Parent {
        self.parent
    }
}

/// Cube of `size³` pieces, centered at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    params: CubeParams,
    pub(crate) pieces: Vec<Piece>,
    pub(crate) pivot: Option<Pivot>,
}
impl Cube {
    /// Constructs a solved cube.
    pub fn new(params: CubeParams) -> Result<Self, CubeError> {
        params.validate()?;
        let n = params.size as i32;
        let step = params.step();
        let pieces = iproduct!(0..n, 0..n, 0..n)
            .enumerate()
            .map(|(i, (x, y, z))| {
                let grid = GridCoord([x, y, z]);
                Piece {
                    id: PieceId(i as u32),
                    grid,
                    position: grid.centered(params.size) * step,
                    orientation: Matrix3::identity(),
                    materials: Face::ALL.map(|face| FaceMaterial {
                        id: MaterialId::new(i, face),
                        color: initial_face_color(grid, face, n),
                    }),
                    parent: Parent::Cube,
                }
            })
            .collect();

        log::debug!("built {0}x{0}x{0} cube with step {step}", params.size);
        Ok(Self {
            params,
            pieces,
            pivot: None,
        })
    }

    /// Returns the construction parameters.
    pub fn params(&self) -> &CubeParams {
        &self.params
    }
    /// Returns the number of layers along each axis.
    pub fn size(&self) -> usize {
        self.params.size
    }
    /// Returns the center-to-center spacing between adjacent layers.
    pub fn step(&self) -> Float {
        self.params.step()
    }

    /// Returns all pieces in ID order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }
    /// Returns a piece by ID.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0 as usize)
    }
    /// Returns the active pivot, if any.
    pub fn pivot(&self) -> Option<&Pivot> {
        self.pivot.as_ref()
    }

    /// Returns the world-space position of a piece, taking the pivot into
    /// account.
    pub fn world_position(&self, id: PieceId) -> Option<Vector3<Float>> {
        let piece = self.piece(id)?;
        Some(self.parent_rotation(piece.parent) * piece.position)
    }
    /// Returns the world-space orientation of a piece, taking the pivot into
    /// account.
    pub fn world_orientation(&self, id: PieceId) -> Option<Matrix3<Float>> {
        let piece = self.piece(id)?;
        Some(self.parent_rotation(piece.parent) * piece.orientation)
    }
    fn parent_rotation(&self, parent: Parent) -> Matrix3<Float> {
        match (parent, &self.pivot) {
            (Parent::Pivot, Some(pivot)) => pivot.rotation(),
            _ => Matrix3::identity(),
        }
    }

    /// Returns the current color of a material.
    pub fn material_color(&self, id: MaterialId) -> Option<Rgb> {
        let piece = self.pieces.get(id.piece_index())?;
        Some(piece.materials[id.slot()].color)
    }
    /// Sets the color of a material. Returns `false` if the material does not
    /// exist.
    pub fn set_material_color(&mut self, id: MaterialId, color: Rgb) -> bool {
        match self.pieces.get_mut(id.piece_index()) {
            Some(piece) => {
                piece.materials[id.slot()].color = color;
                true
            }
            None => false,
        }
    }
}

fn initial_face_color(grid: GridCoord, face: Face, size: i32) -> Rgb {
    let outer_index = match face.sign() {
        Sign::Pos => size - 1,
        _ => 0,
    };
    if grid.index(face.axis()) == outer_index {
        face.color()
    } else {
        INNER_COLOR
    }
}

#[cfg(test)]
mod tests {
    use cubemath::assert_approx_eq;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cube_construction() {
        let cube = Cube::new(CubeParams::default()).expect("valid cube");
        assert_eq!(cube.pieces().len(), 27);
        assert_approx_eq!(cube.step(), 1.0);

        let corner = cube
            .pieces()
            .iter()
            .find(|p| p.grid() == GridCoord([2, 2, 2]))
            .expect("corner exists");
        assert_approx_eq!(corner.position(), vec3(1.0, 1.0, 1.0));
        let colors = corner.materials().map(|m| m.color);
        assert_eq!(
            colors,
            [
                Face::R.color(),
                INNER_COLOR,
                Face::U.color(),
                INNER_COLOR,
                Face::F.color(),
                INNER_COLOR,
            ],
        );

        let core = cube
            .pieces()
            .iter()
            .find(|p| p.grid() == GridCoord([1, 1, 1]))
            .expect("core exists");
        assert!(core.materials().iter().all(|m| m.color == INNER_COLOR));
    }

    #[test]
    fn test_material_ids_are_unique() {
        let cube = Cube::new(CubeParams::default()).expect("valid cube");
        let mut ids: Vec<MaterialId> = cube
            .pieces()
            .iter()
            .flat_map(|p| p.materials().map(|m| m.id))
            .collect();
        let n = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), n);
        for &id in &ids {
            let piece = &cube.pieces()[id.piece_index()];
            assert_eq!(piece.materials()[id.slot()].id, id);
        }
    }

    #[test]
    fn test_even_cube_positions() {
        let params = CubeParams {
            size: 2,
            cubelet: 1.0,
            gap: 0.0,
        };
        let cube = Cube::new(params).expect("valid cube");
        assert_eq!(cube.pieces().len(), 8);
        for piece in cube.pieces() {
            assert!(piece.position().map(|x| x.abs()) == vec3(0.5, 0.5, 0.5));
        }
    }

    #[test]
    fn test_invalid_params() {
        let p = |size, cubelet, gap| CubeParams { size, cubelet, gap };
        assert_eq!(Cube::new(p(0, 1.0, 0.0)), Err(CubeError::InvalidSize(0)));
        assert_eq!(Cube::new(p(3, 0.0, 0.0)), Err(CubeError::InvalidCubeletSize(0.0)));
        assert_eq!(Cube::new(p(3, 1.0, -0.1)), Err(CubeError::InvalidGap(-0.1)));
        assert!(Cube::new(p(1, 1.0, 0.0)).is_ok());
    }
}
