use std::time::Duration;

use cubemath::prelude::*;
use cubeprefs::Preferences;
use cubepuzzle_core::{Cube, CubeSnapshot, Move, PieceId, map_move, scramble_moves};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use web_time::Instant;

use crate::{
    Camera, DragEvent, DragInterpreter, DragState, HighlightManager, KeyPress, MoveQueue,
    PointerButton, PointerId, QueueEvent, SimulationError,
};

const ASSUMED_FPS: f32 = 120.0;

/// Something that happened in a [`CubeSimulation`].
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    /// A queued move began animating.
    MoveStarted {
        /// Move that started.
        mv: Move,
        /// Number of pieces in the layer.
        piece_count: usize,
    },
    /// A queued move finished animating.
    MoveCompleted {
        /// Move that finished.
        mv: Move,
    },
    /// A drag chose a layer.
    LayerStart {
        /// Axis of rotation.
        axis: Axis,
        /// Coordinate of the layer along `axis`.
        layer: Float,
        /// Pieces in the layer.
        pieces: Vec<PieceId>,
    },
    /// A drag changed the live angle of its layer.
    Angle {
        /// Axis of rotation.
        axis: Axis,
        /// Angle in radians.
        angle: Float,
    },
    /// A drag ended and snapped its layer.
    Snap {
        /// Axis of rotation.
        axis: Axis,
        /// Coordinate of the layer along `axis`.
        layer: Float,
        /// Final angle, a multiple of a quarter turn.
        angle: Float,
        /// Pieces in the layer.
        pieces: Vec<PieceId>,
    },
    /// The cube was scrambled.
    Scrambled {
        /// Moves that were applied.
        moves: Vec<Move>,
    },
    /// The cube and camera were reset.
    Reset,
    /// The diagnostic overlay was toggled.
    OverlayToggled {
        /// Whether the overlay is now visible.
        visible: bool,
    },
}
impl From<DragEvent> for SimEvent {
    fn from(event: DragEvent) -> Self {
        match event {
            DragEvent::LayerStart {
                axis,
                layer,
                pieces,
            } => SimEvent::LayerStart {
                axis,
                layer,
                pieces,
            },
            DragEvent::Angle { axis, angle } => SimEvent::Angle { axis, angle },
            DragEvent::Snap {
                axis,
                layer,
                angle,
                pieces,
            } => SimEvent::Snap {
                axis,
                layer,
                angle,
                pieces,
            },
        }
    }
}
impl From<QueueEvent> for SimEvent {
    fn from(event: QueueEvent) -> Self {
        match event {
            QueueEvent::Started { mv, piece_count } => SimEvent::MoveStarted { mv, piece_count },
            QueueEvent::Completed(mv) => SimEvent::MoveCompleted { mv },
        }
    }
}

/// Cube simulation, which routes keyboard and pointer input to the move queue
/// and drag interpreter and drives animations frame by frame.
///
/// Keyboard moves, scrambles, and resets are ignored while a drag is in
/// progress, and drags cannot start while queued moves are pending or
/// animating, so at most one of them manipulates the cube at a time.
#[derive(Debug)]
pub struct CubeSimulation {
    cube: Cube,
    camera: Camera,
    queue: MoveQueue,
    drag: DragInterpreter,
    highlight: HighlightManager,
    rng: ChaCha8Rng,

    /// Whether the diagnostic overlay (axes and grid) is visible.
    overlay_visible: bool,
    /// Events that have not been drained yet.
    events: Vec<SimEvent>,

    /// Time of last frame, or `None` if we are not in the middle of an
    /// animation.
    last_frame_time: Option<Instant>,
}
impl CubeSimulation {
    /// Constructs a simulation with a solved cube. If `seed` is `None`, the
    /// scramble generator is seeded randomly.
    pub fn new(prefs: &Preferences, seed: Option<u64>) -> Result<Self, SimulationError> {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Ok(Self {
            cube: Cube::new(prefs.cube)?,
            camera: Camera::default(),
            queue: MoveQueue::new(),
            drag: DragInterpreter::new(),
            highlight: HighlightManager::new(),
            rng,

            overlay_visible: false,
            events: vec![],

            last_frame_time: None,
        })
    }

    /// Returns the cube.
    pub fn cube(&self) -> &Cube {
        &self.cube
    }
    /// Returns the camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }
    /// Returns the camera mutably, for orbit controls and resizing.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }
    /// Returns the move queue.
    pub fn queue(&self) -> &MoveQueue {
        &self.queue
    }
    /// Returns the state of the drag gesture.
    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }
    /// Returns the highlight manager.
    pub fn highlight(&self) -> &HighlightManager {
        &self.highlight
    }
    /// Returns whether the diagnostic overlay is visible.
    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }
    /// Returns a serializable snapshot of the cube.
    pub fn snapshot(&self) -> CubeSnapshot {
        self.cube.snapshot()
    }

    /// Returns and clears the events since the last call.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
    fn push_event(&mut self, event: impl Into<SimEvent>) {
        let event = event.into();
        log::debug!("{event:?}");
        self.events.push(event);
    }

    /// Replaces the cube. Only allowed while the move queue is idle and no
    /// drag is in progress.
    pub fn set_cube(&mut self, cube: Cube) -> Result<(), SimulationError> {
        if !self.queue.is_idle() {
            return Err(SimulationError::QueueBusy);
        }
        if self.drag.is_active() {
            return Err(SimulationError::DragActive);
        }
        self.cube = cube;
        self.highlight = HighlightManager::new();
        Ok(())
    }

    /// Handles a key press. Returns whether the key did anything.
    pub fn handle_key(&mut self, key: KeyPress, prefs: &Preferences) -> Result<bool, SimulationError> {
        if key.in_text_field {
            log::trace!("ignoring {:?} typed into a text field", key.key);
            return Ok(false);
        }
        let c = key.key.to_ascii_uppercase();
        if c == 'T' {
            self.overlay_visible = !self.overlay_visible;
            self.push_event(SimEvent::OverlayToggled {
                visible: self.overlay_visible,
            });
            return Ok(true);
        }
        if self.drag.is_active() {
            log::trace!("ignoring {c:?} during a drag");
            return Ok(false);
        }
        match c {
            'S' => {
                self.scramble(prefs)?;
                Ok(true)
            }
            '0' => {
                self.reset(prefs)?;
                Ok(true)
            }
            _ => match map_move(c, self.cube.step(), self.cube.size()) {
                Some(layer_move) => {
                    self.queue.enqueue(layer_move.to_move(key.shift));
                    Ok(true)
                }
                None => {
                    log::trace!("ignoring unknown key {c:?}");
                    Ok(false)
                }
            },
        }
    }

    /// Discards pending moves, finishes the current animation, and instantly
    /// applies a random scramble. Returns the scramble.
    pub fn scramble(&mut self, prefs: &Preferences) -> Result<Vec<Move>, SimulationError> {
        self.finish_in_flight(prefs)?;
        let eps_ratio = prefs.interaction.layer_eps_ratio;
        let moves = scramble_moves(
            &mut self.rng,
            prefs.interaction.scramble_length,
            self.cube.step(),
            self.cube.size(),
        );
        for &mv in &moves {
            self.cube.apply_move(mv, eps_ratio)?;
        }
        self.push_event(SimEvent::Scrambled {
            moves: moves.clone(),
        });
        Ok(moves)
    }

    /// Discards pending moves, finishes the current animation, replaces the
    /// cube with a solved one, and resets the camera.
    pub fn reset(&mut self, prefs: &Preferences) -> Result<(), SimulationError> {
        self.finish_in_flight(prefs)?;
        self.set_cube(Cube::new(prefs.cube)?)?;
        self.camera.reset();
        self.push_event(SimEvent::Reset);
        Ok(())
    }

    fn finish_in_flight(&mut self, prefs: &Preferences) -> Result<(), SimulationError> {
        self.queue.clear();
        self.catch_up(prefs)
    }

    /// Begins a drag if the primary button was pressed over a piece and no
    /// queued move is pending or animating. Returns whether a drag began.
    pub fn pointer_down(
        &mut self,
        pointer: PointerId,
        button: PointerButton,
        ndc: [Float; 2],
        prefs: &Preferences,
    ) -> bool {
        if button != PointerButton::Primary {
            return false;
        }
        if !self.queue.is_idle() {
            log::trace!("ignoring {pointer} down while moves are queued");
            return false;
        }
        let Some(ray) = self.camera.ray_from_ndc(ndc) else {
            return false;
        };
        self.drag
            .pointer_down(&self.cube, &mut self.camera, pointer, &ray, &prefs.interaction)
    }

    /// Continues a drag.
    pub fn pointer_move(
        &mut self,
        pointer: PointerId,
        ndc: [Float; 2],
        prefs: &Preferences,
    ) -> Result<(), SimulationError> {
        if !self.drag.is_active() {
            return Ok(());
        }
        let Some(ray) = self.camera.ray_from_ndc(ndc) else {
            return Ok(());
        };
        let events =
            self.drag
                .pointer_move(&mut self.cube, &mut self.highlight, pointer, &ray, prefs)?;
        for e in events {
            self.push_event(e);
        }
        Ok(())
    }

    /// Ends a drag.
    pub fn pointer_up(&mut self, pointer: PointerId, prefs: &Preferences) -> Result<(), SimulationError> {
        let event = self.drag.pointer_up(
            &mut self.cube,
            &mut self.camera,
            &mut self.highlight,
            pointer,
            prefs,
        )?;
        if let Some(e) = event {
            self.push_event(e);
        }
        Ok(())
    }

    /// Advances animations to the current time. Returns whether the cube must
    /// be redrawn.
    pub fn step(&mut self, prefs: &Preferences) -> Result<bool, SimulationError> {
        let now = Instant::now();
        let delta = match self.last_frame_time {
            Some(then) => now - then,
            None => Duration::from_secs_f32(1.0 / ASSUMED_FPS),
        };

        let needs_redraw = self.step_by(delta, prefs)?;

        if needs_redraw {
            self.last_frame_time = Some(now);
        } else {
            self.last_frame_time = None;
        }

        Ok(needs_redraw)
    }

    /// Advances animations by `delta`. Returns whether the cube must be
    /// redrawn.
    pub fn step_by(&mut self, delta: Duration, prefs: &Preferences) -> Result<bool, SimulationError> {
        if self.queue.is_idle() {
            return Ok(false);
        }
        let events = self.queue.step(
            &mut self.cube,
            delta,
            &prefs.animation,
            prefs.interaction.layer_eps_ratio,
        )?;
        for e in events {
            self.push_event(e);
        }
        Ok(true)
    }

    /// Instantly completes every queued move.
    pub fn catch_up(&mut self, prefs: &Preferences) -> Result<(), SimulationError> {
        let events = self
            .queue
            .catch_up(&mut self.cube, prefs.interaction.layer_eps_ratio)?;
        for e in events {
            self.push_event(e);
        }
        self.last_frame_time = None;
        Ok(())
    }
}
