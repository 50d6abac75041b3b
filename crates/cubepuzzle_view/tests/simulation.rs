use std::time::Duration;

use cubemath::assert_approx_eq;
use cubemath::prelude::*;
use cubeprefs::Preferences;
use cubepuzzle_core::{Cube, Move, map_move};
use cubepuzzle_view::{
    CubeSimulation, DragState, KeyPress, PointerButton, PointerId, SimEvent, SimulationError,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const FRAME: Duration = Duration::from_millis(8);
const MOUSE: PointerId = PointerId(1);

fn new_sim(prefs: &Preferences) -> CubeSimulation {
    CubeSimulation::new(prefs, Some(42)).expect("valid preferences")
}

/// Runs frames until the queue is idle, returning every event.
fn run_until_idle(sim: &mut CubeSimulation, prefs: &Preferences) -> Vec<SimEvent> {
    for _ in 0..10_000 {
        if sim.queue().is_idle() {
            break;
        }
        sim.step_by(FRAME, prefs).expect("step");
    }
    assert!(sim.queue().is_idle());
    sim.drain_events()
}

fn key_move(key: char, prime: bool) -> Move {
    map_move(key, 1.0, 3).expect("valid key").to_move(prime)
}

/// Returns normalized device coordinates of a point on the front face.
fn front_face_ndc(sim: &CubeSimulation, x: Float, y: Float) -> [Float; 2] {
    sim.camera()
        .project(point3(x, y, 1.475))
        .expect("point is in front of the camera")
}

#[test]
fn test_queue_runs_moves_in_order() {
    let prefs = Preferences::default();
    let mut sim = new_sim(&prefs);
    assert!(sim.handle_key(KeyPress::new('U'), &prefs).expect("key"));
    assert!(sim.handle_key(KeyPress::shifted('R'), &prefs).expect("key"));
    assert!(sim.handle_key(KeyPress::new('f'), &prefs).expect("key"));
    assert_eq!(sim.queue().len(), 3);

    let mut log = vec![];
    for _ in 0..10_000 {
        if sim.queue().is_idle() {
            break;
        }
        sim.step_by(FRAME, &prefs).expect("step");
        for e in sim.drain_events() {
            match &e {
                // A move only starts once the previous one has been fully
                // reattached to the cube.
                SimEvent::MoveStarted { piece_count, .. } => {
                    let pivot = sim.cube().pivot().expect("started move has a pivot");
                    assert_eq!(pivot.pieces().len(), *piece_count);
                }
                SimEvent::MoveCompleted { .. } => assert!(sim.cube().pivot().is_none()),
                _ => (),
            }
            log.push(e);
        }
    }

    let (u, r, f) = (key_move('U', false), key_move('R', true), key_move('F', false));
    assert_eq!(
        log,
        vec![
            SimEvent::MoveStarted { mv: u, piece_count: 9 },
            SimEvent::MoveCompleted { mv: u },
            SimEvent::MoveStarted { mv: r, piece_count: 9 },
            SimEvent::MoveCompleted { mv: r },
            SimEvent::MoveStarted { mv: f, piece_count: 9 },
            SimEvent::MoveCompleted { mv: f },
        ],
    );

    let mut expected = Cube::new(prefs.cube).expect("valid cube");
    for mv in [u, r, f] {
        expected.apply_move(mv, 0.3).expect("no pivot");
    }
    assert_eq!(sim.cube(), &expected);
}

#[test]
fn test_move_then_prime_restores_cube() {
    let prefs = Preferences::default();
    let mut sim = new_sim(&prefs);
    let solved = sim.cube().clone();
    for key in "URFDLBM".chars() {
        sim.handle_key(KeyPress::new(key), &prefs).expect("key");
        sim.handle_key(KeyPress::shifted(key), &prefs).expect("key");
    }
    run_until_idle(&mut sim, &prefs);
    assert_eq!(sim.cube(), &solved);
    assert!(sim.snapshot().solved);
}

#[test]
fn test_drag_through_camera() {
    let prefs = Preferences::default();
    let mut sim = new_sim(&prefs);

    let start = front_face_ndc(&sim, 1.0, 1.0);
    assert!(sim.pointer_down(MOUSE, PointerButton::Primary, start, &prefs));
    assert!(!sim.camera().orbit_enabled());

    sim.pointer_move(MOUSE, front_face_ndc(&sim, 1.3, 1.0), &prefs)
        .expect("drag");
    sim.pointer_move(MOUSE, front_face_ndc(&sim, 1.7, 1.0), &prefs)
        .expect("drag");
    assert!(matches!(sim.drag_state(), DragState::Committed(_)));
    assert_eq!(sim.highlight().len(), 9 * 6);

    sim.pointer_up(MOUSE, &prefs).expect("release");
    assert!(sim.camera().orbit_enabled());
    assert!(sim.highlight().is_empty());

    let events = sim.drain_events();
    assert!(matches!(
        events.first(),
        Some(SimEvent::LayerStart { axis: Axis::Y, .. }),
    ));
    let Some(SimEvent::Snap { axis, layer, angle, pieces }) = events.last() else {
        panic!("expected snap, got {events:?}");
    };
    assert_eq!(*axis, Axis::Y);
    assert_approx_eq!(*layer, 1.0);
    assert_approx_eq!(*angle, QUARTER_TURN);
    assert_eq!(pieces.len(), 9);

    let mut expected = Cube::new(prefs.cube).expect("valid cube");
    let mv = Move {
        axis: Axis::Y,
        layer: 1.0,
        angle: QUARTER_TURN,
    };
    expected.apply_move(mv, 0.3).expect("no pivot");
    assert_eq!(sim.cube(), &expected);
}

#[test]
fn test_secondary_button_and_background_are_ignored() {
    let prefs = Preferences::default();
    let mut sim = new_sim(&prefs);
    let on_cube = front_face_ndc(&sim, 0.0, 0.0);
    assert!(!sim.pointer_down(MOUSE, PointerButton::Secondary, on_cube, &prefs));
    assert!(!sim.pointer_down(MOUSE, PointerButton::Primary, [0.95, -0.95], &prefs));
    assert_eq!(sim.drag_state(), &DragState::Idle);
    assert!(sim.camera().orbit_enabled());
}

#[test]
fn test_keyboard_and_drag_exclude_each_other() {
    let prefs = Preferences::default();
    let mut sim = new_sim(&prefs);
    let solved = sim.cube().clone();

    // Keys are ignored during a drag, except for the overlay toggle.
    assert!(sim.pointer_down(MOUSE, PointerButton::Primary, front_face_ndc(&sim, 0.0, 0.0), &prefs));
    assert!(!sim.handle_key(KeyPress::new('U'), &prefs).expect("key"));
    assert!(!sim.handle_key(KeyPress::new('S'), &prefs).expect("key"));
    assert!(!sim.handle_key(KeyPress::new('0'), &prefs).expect("key"));
    assert!(sim.handle_key(KeyPress::new('t'), &prefs).expect("key"));
    assert!(sim.overlay_visible());
    assert!(sim.queue().is_idle());
    assert_eq!(
        sim.set_cube(solved.clone()),
        Err(SimulationError::DragActive),
    );
    sim.pointer_up(MOUSE, &prefs).expect("release");

    // Drags are ignored while moves are queued.
    sim.handle_key(KeyPress::new('R'), &prefs).expect("key");
    sim.step_by(FRAME, &prefs).expect("step");
    let ndc = front_face_ndc(&sim, 0.0, 0.0);
    assert!(!sim.pointer_down(MOUSE, PointerButton::Primary, ndc, &prefs));
    assert_eq!(sim.set_cube(solved.clone()), Err(SimulationError::QueueBusy));

    run_until_idle(&mut sim, &prefs);
    assert!(sim.pointer_down(MOUSE, PointerButton::Primary, ndc, &prefs));
}

#[test]
fn test_text_field_and_unknown_keys() {
    let prefs = Preferences::default();
    let mut sim = new_sim(&prefs);
    let typed = KeyPress {
        in_text_field: true,
        ..KeyPress::new('U')
    };
    assert!(!sim.handle_key(typed, &prefs).expect("key"));
    assert!(!sim.handle_key(KeyPress::new('Q'), &prefs).expect("key"));
    assert!(!sim.handle_key(KeyPress::new('9'), &prefs).expect("key"));
    assert!(sim.queue().is_idle());
    assert!(sim.drain_events().is_empty());
}

#[test]
fn test_scramble_and_reset() {
    let prefs = Preferences::default();
    let mut a = new_sim(&prefs);
    let mut b = new_sim(&prefs);

    // Pending moves are discarded by a scramble.
    a.handle_key(KeyPress::new('U'), &prefs).expect("key");
    a.handle_key(KeyPress::new('R'), &prefs).expect("key");
    a.step_by(FRAME, &prefs).expect("step");
    a.handle_key(KeyPress::new('S'), &prefs).expect("key");
    assert!(a.queue().is_idle());

    b.handle_key(KeyPress::new('U'), &prefs).expect("key");
    b.catch_up(&prefs).expect("catch up");
    let moves = b.scramble(&prefs).expect("scramble");
    assert_eq!(moves.len(), prefs.interaction.scramble_length);
    assert_eq!(a.cube(), b.cube());

    a.camera_mut().orbit(1.0, 0.2);
    a.handle_key(KeyPress::new('0'), &prefs).expect("key");
    assert!(a.cube().is_solved());
    assert_eq!(a.camera(), &cubepuzzle_view::Camera::default());
    assert!(matches!(a.drain_events().last(), Some(SimEvent::Reset)));
}

#[test]
fn test_step_reports_redraw() {
    let prefs = Preferences::default();
    let mut sim = new_sim(&prefs);
    assert!(!sim.step(&prefs).expect("step"));
    sim.handle_key(KeyPress::new('F'), &prefs).expect("key");
    assert!(sim.step(&prefs).expect("step"));
    sim.catch_up(&prefs).expect("catch up");
    assert!(!sim.step(&prefs).expect("step"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn proptest_tiny_drags_change_nothing(
        column in -1_i32..=1,
        row in -1_i32..=1,
        u in -0.4_f32..0.4,
        v in -0.4_f32..0.4,
        path in proptest::collection::vec((-1.0_f32..1.0, -1.0_f32..1.0), 1..8),
    ) {
        let prefs = Preferences::default();
        let mut sim = new_sim(&prefs);
        let before = sim.cube().clone();
        let threshold = sim.cube().step() * prefs.interaction.drag_threshold_ratio;
        let (x, y) = (column as f32 + u, row as f32 + v);

        prop_assert!(sim.pointer_down(MOUSE, PointerButton::Primary, front_face_ndc(&sim, x, y), &prefs));
        for (dx, dy) in path {
            // Stay well inside the threshold circle.
            let ndc = front_face_ndc(&sim, x + dx * threshold * 0.5, y + dy * threshold * 0.5);
            sim.pointer_move(MOUSE, ndc, &prefs).expect("drag");
            prop_assert!(matches!(sim.drag_state(), DragState::Armed(_)));
        }
        sim.pointer_up(MOUSE, &prefs).expect("release");

        prop_assert_eq!(sim.cube(), &before);
        prop_assert!(sim.drain_events().is_empty());
        prop_assert!(sim.highlight().is_empty());
        prop_assert!(sim.camera().orbit_enabled());
    }
}
