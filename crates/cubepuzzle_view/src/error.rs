use cubepuzzle_core::CubeError;

/// Error driving a [`crate::CubeSimulation`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// The cube cannot be replaced while moves are pending or animating.
    #[error("cannot replace the cube while the move queue is busy")]
    QueueBusy,
    /// The cube cannot be replaced while a drag gesture is in progress.
    #[error("cannot replace the cube while a drag is in progress")]
    DragActive,
    /// Error from the cube itself.
    #[error(transparent)]
    Cube(#[from] CubeError),
}
