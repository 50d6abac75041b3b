//! Cube-of-cubelets puzzle state.
//!
//! A [`Cube`] owns `size³` [`Piece`]s laid out on a lattice with spacing
//! [`CubeParams::step()`]. Layers are selected by world-space coordinate,
//! attached to a temporary [`Pivot`], rotated, and detached again with the
//! rotation baked into each piece. [`Cube::normalize()`] snaps everything back
//! onto the lattice afterward.

mod cube;
mod error;
mod face;
mod layer;
mod moves;
mod normalize;
mod rgb;
mod rotation;
mod snapshot;

pub use cube::{Cube, CubeParams, GridCoord, MAX_CUBE_SIZE, Parent, Piece, PieceId};
pub use error::CubeError;
pub use face::{Face, FaceMaterial, INNER_COLOR, MaterialId};
pub use layer::LayerPieces;
pub use moves::{LayerMove, Move, SCRAMBLE_KEYS, map_move, scramble_moves};
pub use rgb::Rgb;
pub use rotation::Pivot;
pub use snapshot::{CubeSnapshot, PieceSnapshot};
