//! Drag-to-twist gesture recognition.
//!
//! A drag starts on the face of a piece, stays [`DragState::Armed`] until the
//! pointer has moved far enough across the face plane to pick a direction,
//! then attaches a layer to the pivot and rotates it live
//! ([`DragState::Committed`]). Releasing the pointer snaps the layer to the
//! nearest quarter turn.

use cubemath::prelude::*;
use cubeprefs::{InteractionPreferences, Preferences};
use cubepuzzle_core::{Cube, CubeError, LayerPieces, PieceId};

use crate::{Camera, HighlightManager, PointerId, pick_piece};

/// Gesture captured on pointer-down, before a layer has been chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct ArmedDrag {
    /// Pointer that owns the gesture.
    pub pointer: PointerId,
    /// Piece under the pointer when the gesture began.
    pub piece: PieceId,
    /// Plane of the face that was grabbed.
    pub plane: Plane,
    /// Orthonormal directions in the plane of the face.
    pub tangents: [Vector3<Float>; 2],
    /// Point where the gesture began.
    pub start: Point3<Float>,
    /// Most recent point on the face plane under the pointer.
    pub last: Point3<Float>,
}
impl ArmedDrag {
    /// Returns the displacement from `start` to `last` projected onto each
    /// tangent.
    pub fn offsets(&self) -> [Float; 2] {
        let delta = self.last - self.start;
        self.tangents.map(|t| delta.dot(t))
    }
    /// Returns the outward normal of the face that was grabbed.
    pub fn normal(&self) -> Vector3<Float> {
        self.plane.normal
    }
}

/// Gesture that has chosen a layer and is rotating it live.
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedDrag {
    /// Gesture data from pointer-down.
    pub gesture: ArmedDrag,
    /// Axis of rotation.
    pub axis: Axis,
    /// Coordinate of the layer along `axis`.
    pub layer: Float,
    /// Sign relating displacement along the drive tangent to angle around
    /// `axis`.
    pub direction: Sign,
    /// Index of the tangent that drives the rotation.
    pub drive: usize,
    /// Current angle of the layer, in radians.
    pub angle: Float,
    /// Pieces attached to the pivot.
    pub pieces: LayerPieces,
}

/// State of a drag gesture.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum DragState {
    /// No gesture.
    #[default]
    Idle,
    /// Piece picked; pointer has not moved far enough to choose a layer.
    Armed(ArmedDrag),
    /// Layer chosen and rotating with the pointer.
    Committed(CommittedDrag),
}

/// Observable step of a drag gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    /// A layer was chosen and attached to the pivot.
    LayerStart {
        /// Axis of rotation.
        axis: Axis,
        /// Coordinate of the layer along `axis`.
        layer: Float,
        /// Pieces in the layer.
        pieces: Vec<PieceId>,
    },
    /// The live angle changed.
    Angle {
        /// Axis of rotation.
        axis: Axis,
        /// Angle in radians.
        angle: Float,
    },
    /// The gesture ended and the layer was snapped to a quarter turn.
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
}

/// Converts pointer events into layer rotations.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DragInterpreter {
    state: DragState,
}
impl DragInterpreter {
    /// Constructs an idle drag interpreter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the state of the current gesture.
    pub fn state(&self) -> &DragState {
        &self.state
    }
    /// Returns whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.state != DragState::Idle
    }

    /// Begins a gesture if `ray` hits a piece. Returns whether a gesture
    /// began.
    ///
    /// Orbit controls on `camera` are suspended until the gesture ends.
    pub fn pointer_down(
        &mut self,
        cube: &Cube,
        camera: &mut Camera,
        pointer: PointerId,
        ray: &Ray,
        prefs: &InteractionPreferences,
    ) -> bool {
        if self.is_active() {
            log::trace!("ignoring {pointer} down; a drag is already in progress");
            return false;
        }
        if cube.pivot().is_some() {
            log::trace!("ignoring {pointer} down; a layer is already turning");
            return false;
        }
        let Some(hit) = pick_piece(cube, ray) else {
            log::trace!("no piece under {pointer}");
            return false;
        };

        let plane = Plane::from_normal_and_coplanar_point(hit.normal, hit.point);
        let tangents = tangent_basis(plane.normal, prefs.tangent_fallback_cos);
        log::trace!(
            "{pointer} grabbed {} at {:?} with normal {:?}",
            hit.piece,
            hit.point,
            plane.normal,
        );

        camera.set_orbit_enabled(false);
        self.state = DragState::Armed(ArmedDrag {
            pointer,
            piece: hit.piece,
            plane,
            tangents,
            start: hit.point,
            last: hit.point,
        });
        true
    }

    /// Updates the gesture from a new pointer ray.
    ///
    /// Moves from other pointers, and rays that miss the face plane, are
    /// skipped without changing anything.
    pub fn pointer_move(
        &mut self,
        cube: &mut Cube,
        highlight: &mut HighlightManager,
        pointer: PointerId,
        ray: &Ray,
        prefs: &Preferences,
    ) -> Result<Vec<DragEvent>, CubeError> {
        let mut events = vec![];

        let Some(gesture) = self.gesture_mut() else {
            return Ok(events);
        };
        if gesture.pointer != pointer {
            log::trace!("ignoring move from {pointer}; drag belongs to {}", gesture.pointer);
            return Ok(events);
        }
        let Some(point) = ray.intersect_plane(&gesture.plane) else {
            log::trace!("{pointer} ray missed the face plane");
            return Ok(events);
        };
        gesture.last = point;
        let offsets = gesture.offsets();
        let step = cube.step();

        if let DragState::Armed(armed) = &self.state {
            let magnitude = offsets[0].hypot(offsets[1]);
            if magnitude <= step * prefs.interaction.drag_threshold_ratio {
                return Ok(events);
            }
            let Some(committed) = commit(cube, armed, offsets, &prefs.interaction)? else {
                return Ok(events);
            };
            events.push(DragEvent::LayerStart {
                axis: committed.axis,
                layer: committed.layer,
                pieces: committed.pieces.to_vec(),
            });
            highlight.set_highlighted(cube, &committed.pieces, true, &prefs.highlight);
            self.state = DragState::Committed(committed);
        }

        if let DragState::Committed(c) = &mut self.state {
            let angle = offsets[c.drive] / step * QUARTER_TURN * c.direction.float();
            cube.set_pivot_angle(angle)?;
            c.angle = angle;
            events.push(DragEvent::Angle {
                axis: c.axis,
                angle,
            });
        }

        Ok(events)
    }

    /// Ends the gesture. If a layer was turning, snaps it to the nearest
    /// quarter turn, unhighlights it, reattaches it to the cube, and
    /// normalizes the cube.
    ///
    /// Orbit controls on `camera` are restored. Releases from other pointers
    /// are ignored.
    pub fn pointer_up(
        &mut self,
        cube: &mut Cube,
        camera: &mut Camera,
        highlight: &mut HighlightManager,
        pointer: PointerId,
        prefs: &Preferences,
    ) -> Result<Option<DragEvent>, CubeError> {
        match self.gesture_mut() {
            None => return Ok(None),
            Some(g) if g.pointer != pointer => {
                log::trace!("ignoring release of {pointer}; drag belongs to {}", g.pointer);
                return Ok(None);
            }
            Some(_) => (),
        }

        let state = std::mem::take(&mut self.state);
        camera.set_orbit_enabled(true);

        match state {
            DragState::Idle => Ok(None),
            DragState::Armed(_) => {
                log::trace!("{pointer} released before choosing a layer");
                Ok(None)
            }
            DragState::Committed(c) => {
                let angle = snap_angle(c.angle);
                cube.set_pivot_angle(angle)?;
                highlight.set_highlighted(cube, &c.pieces, false, &prefs.highlight);
                cube.detach_pivot()?;
                cube.normalize();
                log::debug!(
                    "drag snapped layer {} along {} to {} degrees",
                    c.layer,
                    c.axis,
                    angle.to_degrees(),
                );
                Ok(Some(DragEvent::Snap {
                    axis: c.axis,
                    layer: c.layer,
                    angle,
                    pieces: c.pieces.into_vec(),
                }))
            }
        }
    }

    fn gesture_mut(&mut self) -> Option<&mut ArmedDrag> {
        match &mut self.state {
            DragState::Idle => None,
            DragState::Armed(armed) => Some(armed),
            DragState::Committed(c) => Some(&mut c.gesture),
        }
    }
}

/// Chooses the axis and layer for a drag that has crossed the threshold, and
/// attaches the layer to the pivot.
fn commit(
    cube: &mut Cube,
    armed: &ArmedDrag,
    offsets: [Float; 2],
    prefs: &InteractionPreferences,
) -> Result<Option<CommittedDrag>, CubeError> {
    let drive = if offsets[0].abs() >= offsets[1].abs() { 0 } else { 1 };
    let axis_vector = armed.normal().cross(armed.tangents[drive]);
    let (axis, direction) = Axis::dominant(axis_vector);

    let Some(piece_position) = cube.world_position(armed.piece) else {
        log::warn!("grabbed {} no longer exists", armed.piece);
        return Ok(None);
    };
    let step = cube.step();
    let layer = snap_coord(
        axis.component(piece_position),
        step,
        cube.params().lattice_offset(),
    );

    let pieces = cube.select_layer(axis, layer, prefs.layer_eps_ratio);
    cube.attach_pivot(axis, pieces.clone())?;
    log::debug!(
        "drag chose layer {layer} along {axis} ({} pieces)",
        pieces.len(),
    );

    Ok(Some(CommittedDrag {
        gesture: armed.clone(),
        axis,
        layer,
        direction,
        drive,
        angle: 0.0,
        pieces,
    }))
}
