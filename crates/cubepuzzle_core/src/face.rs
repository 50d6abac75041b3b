use cubemath::{Axis, Sign};
use serde::{Deserialize, Serialize};

use crate::Rgb;

/// Color of faces that are hidden inside the cube.
pub const INNER_COLOR: Rgb = Rgb::from_u32(0x151515);

/// Face of the whole cube, in the same order as the materials on each piece.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display, Serialize, Deserialize)]
pub enum Face {
    /// +X
    R = 0,
    /// −X
    L = 1,
    /// +Y
    U = 2,
    /// −Y
    D = 3,
    /// +Z
    F = 4,
    /// −Z
    B = 5,
}
impl Face {
    /// All faces, in material order.
    pub const ALL: [Face; 6] = [Face::R, Face::L, Face::U, Face::D, Face::F, Face::B];

    /// Returns the axis perpendicular to the face.
    pub fn axis(self) -> Axis {
        match self {
            Face::R | Face::L => Axis::X,
            Face::U | Face::D => Axis::Y,
            Face::F | Face::B => Axis::Z,
        }
    }
    /// Returns which side of the cube the face is on.
    pub fn sign(self) -> Sign {
        match self {
            Face::R | Face::U | Face::F => Sign::Pos,
            Face::L | Face::D | Face::B => Sign::Neg,
        }
    }
    /// Returns the sticker color of the face.
    pub fn color(self) -> Rgb {
        match self {
            Face::R => Rgb::from_u32(0xe74c3c),
            Face::L => Rgb::from_u32(0xe67e22),
            Face::U => Rgb::from_u32(0xffffff),
            Face::D => Rgb::from_u32(0xffea00),
            Face::F => Rgb::from_u32(0x2ecc71),
            Face::B => Rgb::from_u32(0x3498db),
        }
    }
}

/// Cube-unique identity of a piece material.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialId(pub u32);
impl MaterialId {
    /// Number of materials on each piece.
    pub const PER_PIECE: usize = 6;

    pub(crate) fn new(piece_index: usize, face: Face) -> Self {
        Self((piece_index * Self::PER_PIECE + face as usize) as u32)
    }
    /// Returns the index of the piece that owns the material.
    pub fn piece_index(self) -> usize {
        self.0 as usize / Self::PER_PIECE
    }
    /// Returns the index of the material within its piece.
    pub fn slot(self) -> usize {
        self.0 as usize % Self::PER_PIECE
    }
}

/// Colored material on one side of a piece.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FaceMaterial {
    /// Identity of the material.
    pub id: MaterialId,
    /// Current color.
    pub color: Rgb,
}
