//! Interactive layer of a cube puzzle: camera, pointer picking, drag-to-twist,
//! animated move queue, highlighting, and the simulation that routes keyboard
//! and pointer input between them.

mod camera;
mod drag;
mod error;
mod highlight;
mod input;
mod pick;
mod queue;
mod simulation;

pub use camera::Camera;
pub use drag::{ArmedDrag, CommittedDrag, DragEvent, DragInterpreter, DragState};
pub use error::SimulationError;
pub use highlight::HighlightManager;
pub use input::{KeyPress, PointerButton, PointerId};
pub use pick::{PickHit, pick_piece};
pub use queue::{MoveQueue, QueueEvent};
pub use simulation::{CubeSimulation, SimEvent};
