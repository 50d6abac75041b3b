use std::collections::VecDeque;
use std::time::Duration;

use cubemath::Float;
use cubeprefs::AnimationPreferences;
use cubepuzzle_core::{Cube, CubeError, Move};

/// If at least this much of a twist is animated in one frame, just skip the
/// animation to reduce unnecessary flashing.
const MIN_TWIST_DELTA: f32 = 1.0 / 3.0;

/// Higher number means faster exponential increase in twist speed.
const EXP_TWIST_FACTOR: f32 = 0.5;

/// Change reported by [`MoveQueue::step()`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum QueueEvent {
    /// A move attached its layer to the pivot and began animating.
    Started {
        /// Move that started.
        mv: Move,
        /// Number of pieces in the layer.
        piece_count: usize,
    },
    /// A move finished, and its pieces were reattached and normalized.
    Completed(Move),
}

/// Move that is currently animating.
#[derive(Debug, Copy, Clone, PartialEq)]
struct InFlight {
    mv: Move,
    /// Progress of the animation, from 0.0 to 1.0.
    progress: f32,
}

/// FIFO queue of moves that animates one move at a time.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MoveQueue {
    /// Moves that have not started yet.
    pending: VecDeque<Move>,
    /// Move being animated right now.
    in_flight: Option<InFlight>,
    /// Maximum number of moves in the queue (reset when queue is empty).
    queue_max: usize,
}
impl MoveQueue {
    /// Constructs an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a move to the end of the queue.
    pub fn enqueue(&mut self, mv: Move) {
        self.pending.push_back(mv);
        self.queue_max = std::cmp::max(self.queue_max, self.len());
        log::trace!("queued {mv:?}; {} in queue", self.len());
    }

    /// Discards every move that has not started animating yet and returns how
    /// many were discarded. A move that is already animating is kept.
    pub fn clear(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        if n > 0 {
            log::trace!("discarded {n} pending moves");
        }
        n
    }

    /// Returns whether no move is pending or animating.
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none() && self.pending.is_empty()
    }
    /// Returns the number of moves pending or animating.
    pub fn len(&self) -> usize {
        self.pending.len() + usize::from(self.in_flight.is_some())
    }

    /// Steps the animation forward by `delta`. Starts the next move if none is
    /// animating, and completes the current one once its progress reaches
    /// 1.0. At most one move completes per step.
    pub fn step(
        &mut self,
        cube: &mut Cube,
        delta: Duration,
        prefs: &AnimationPreferences,
        eps_ratio: Float,
    ) -> Result<Vec<QueueEvent>, CubeError> {
        let mut events = vec![];

        if self.in_flight.is_none() {
            match self.start_next(cube, eps_ratio)? {
                Some(e) => events.push(e),
                None => {
                    self.queue_max = 0;
                    return Ok(events);
                }
            }
        }
        let Some(in_flight) = &mut self.in_flight else {
            return Ok(events);
        };

        // `twist_duration` is in seconds (per one twist); `base_speed` is
        // fraction of twist per frame.
        let base_speed = delta.as_secs_f32() / prefs.twist_duration;

        // Twist exponentially faster if there are/were more twists in the
        // queue.
        let speed_mod = match prefs.dynamic_twist_speed {
            true => ((self.queue_max.max(1) - 1) as f32 * EXP_TWIST_FACTOR).exp(),
            false => 1.0,
        };
        let mut twist_delta = base_speed * speed_mod;
        // Cap the twist delta at 1.0, and also handle the case where
        // something went wrong with the calculation (e.g., division by zero).
        if !(0.0..MIN_TWIST_DELTA).contains(&twist_delta) {
            twist_delta = 1.0; // Instantly complete the twist.
        }

        in_flight.progress += twist_delta;
        if in_flight.progress >= 1.0 {
            events.push(self.finish_current(cube)?);
        } else {
            let t = prefs.twist_interpolation.interpolate(in_flight.progress);
            cube.set_pivot_angle(in_flight.mv.angle * t)?;
        }

        Ok(events)
    }

    /// Instantly completes every move in the queue, in order.
    pub fn catch_up(&mut self, cube: &mut Cube, eps_ratio: Float) -> Result<Vec<QueueEvent>, CubeError> {
        let mut events = vec![];
        if self.in_flight.is_some() {
            events.push(self.finish_current(cube)?);
        }
        while let Some(e) = self.start_next(cube, eps_ratio)? {
            events.push(e);
            events.push(self.finish_current(cube)?);
        }
        self.queue_max = 0;
        Ok(events)
    }

    fn start_next(&mut self, cube: &mut Cube, eps_ratio: Float) -> Result<Option<QueueEvent>, CubeError> {
        let Some(mv) = self.pending.front().copied() else {
            return Ok(None);
        };
        let pieces = cube.select_layer(mv.axis, mv.layer, eps_ratio);
        let piece_count = pieces.len();
        cube.attach_pivot(mv.axis, pieces)?;
        self.pending.pop_front();
        self.in_flight = Some(InFlight { mv, progress: 0.0 });
        log::trace!("started {mv:?} with {piece_count} pieces");
        Ok(Some(QueueEvent::Started { mv, piece_count }))
    }

    fn finish_current(&mut self, cube: &mut Cube) -> Result<QueueEvent, CubeError> {
        let in_flight = self.in_flight.take().ok_or(CubeError::NoPivot)?;
        let mv = in_flight.mv;
        cube.set_pivot_angle(mv.angle)?;
        cube.detach_pivot()?;
        cube.normalize();
        log::trace!("completed {mv:?}");
        Ok(QueueEvent::Completed(mv))
    }
}
