//! Line-oriented input scripts.
//!
//! Each non-empty line is one event. `#` starts a comment.
//!
//! ```text
//! key U shift
//! down 0.1 0.2
//! move 0.4 0.2
//! up
//! tick 250
//! idle
//! ```

use std::time::Duration;

use cubeprefs::Preferences;
use cubepuzzle_view::{CubeSimulation, KeyPress, PointerButton, PointerId};
use eyre::{OptionExt, Result, WrapErr, bail, eyre};

/// Longest simulated frame when a `tick` is split up.
const FRAME: Duration = Duration::from_micros(8_333);

/// Pointer used for every scripted pointer event.
const SCRIPT_POINTER: PointerId = PointerId(0);

/// One scripted event.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum ScriptEvent {
    Key(KeyPress),
    Down([f32; 2]),
    Move([f32; 2]),
    Up,
    Tick(Duration),
    Idle,
}

impl ScriptEvent {
    /// Sends the event to the simulation.
    pub(crate) fn apply(self, sim: &mut CubeSimulation, prefs: &Preferences) -> Result<()> {
        match self {
            ScriptEvent::Key(key) => {
                if !sim.handle_key(key, prefs)? {
                    log::debug!("key {:?} had no effect", key.key);
                }
            }
            ScriptEvent::Down(ndc) => {
                if !sim.pointer_down(SCRIPT_POINTER, PointerButton::Primary, ndc, prefs) {
                    log::debug!("pointer down at {ndc:?} did not start a drag");
                }
            }
            ScriptEvent::Move(ndc) => sim.pointer_move(SCRIPT_POINTER, ndc, prefs)?,
            ScriptEvent::Up => sim.pointer_up(SCRIPT_POINTER, prefs)?,
            ScriptEvent::Tick(mut remaining) => {
                while !remaining.is_zero() {
                    let delta = remaining.min(FRAME);
                    sim.step_by(delta, prefs)?;
                    remaining -= delta;
                }
            }
            ScriptEvent::Idle => sim.catch_up(prefs)?,
        }
        Ok(())
    }
}

/// Parses a whole script. Errors name the offending line.
pub(crate) fn parse_script(source: &str) -> Result<Vec<ScriptEvent>> {
    let mut events = vec![];
    for (i, line) in source.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let event = parse_line(line).wrap_err_with(|| format!("line {}: {line:?}", i + 1))?;
        events.push(event);
    }
    Ok(events)
}

fn parse_line(line: &str) -> Result<ScriptEvent> {
    let mut words = line.split_whitespace();
    let command = words.next().ok_or_eyre("empty line")?;
    let args: Vec<&str> = words.collect();

    let event = match (command, args.as_slice()) {
        ("key", [key]) => ScriptEvent::Key(KeyPress::new(single_char(key)?)),
        ("key", [key, "shift"]) => ScriptEvent::Key(KeyPress::shifted(single_char(key)?)),
        ("down", [x, y]) => ScriptEvent::Down(parse_ndc(x, y)?),
        ("move", [x, y]) => ScriptEvent::Move(parse_ndc(x, y)?),
        ("up", []) => ScriptEvent::Up,
        ("tick", [ms]) => {
            let ms: u64 = ms.parse().wrap_err("invalid tick duration")?;
            ScriptEvent::Tick(Duration::from_millis(ms))
        }
        ("idle", []) => ScriptEvent::Idle,
        ("key" | "down" | "move" | "up" | "tick" | "idle", _) => {
            bail!("wrong arguments for {command:?}")
        }
        _ => bail!("unknown command {command:?}"),
    };
    Ok(event)
}

/// Parses a keyboard token such as `U`, `r'`, `S`, or `0`.
pub(crate) fn parse_key_token(token: &str) -> Result<KeyPress> {
    match token.strip_suffix('\'') {
        Some(key) => Ok(KeyPress::shifted(single_char(key)?)),
        None => Ok(KeyPress::new(single_char(token)?)),
    }
}

fn single_char(s: &str) -> Result<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(eyre!("expected a single key, got {s:?}")),
    }
}

fn parse_ndc(x: &str, y: &str) -> Result<[f32; 2]> {
    let x: f32 = x.parse().wrap_err("invalid x coordinate")?;
    let y: f32 = y.parse().wrap_err("invalid y coordinate")?;
    Ok([x, y])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_script() {
        let source = "
            # turn the top layer
            key U
            key r shift
            down 0.1 -0.2
            move 0.35 -0.2   # drag right
            up
            tick 250
            idle
        ";
        assert_eq!(
            parse_script(source).expect("valid script"),
            vec![
                ScriptEvent::Key(KeyPress::new('U')),
                ScriptEvent::Key(KeyPress::shifted('r')),
                ScriptEvent::Down([0.1, -0.2]),
                ScriptEvent::Move([0.35, -0.2]),
                ScriptEvent::Up,
                ScriptEvent::Tick(Duration::from_millis(250)),
                ScriptEvent::Idle,
            ],
        );
    }

    #[test]
    fn test_script_errors_name_the_line() {
        for (source, line) in [
            ("key U\nkey UU", "line 2"),
            ("up\n\nwiggle", "line 3"),
            ("down 0.1", "line 1"),
            ("key U\ntick -5", "line 2"),
            ("idle now", "line 1"),
        ] {
            let e = parse_script(source).expect_err("malformed script");
            let message = format!("{e:#}");
            assert!(message.starts_with(line), "{source:?} gave {message:?}");
        }
    }

    #[test]
    fn test_parse_key_token() {
        assert_eq!(parse_key_token("U").expect("valid"), KeyPress::new('U'));
        assert_eq!(parse_key_token("f'").expect("valid"), KeyPress::shifted('f'));
        assert_eq!(parse_key_token("0").expect("valid"), KeyPress::new('0'));
        assert!(parse_key_token("").is_err());
        assert!(parse_key_token("'").is_err());
        assert!(parse_key_token("UR").is_err());
    }
}
