use std::io::Read;
use std::path::PathBuf;

use cubeprefs::Preferences;
use cubepuzzle_view::CubeSimulation;
use eyre::{Context, Result};
use serde::Serialize;

use crate::script;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub(crate) struct Args {
    /// Preferences file layered over the defaults
    #[arg(long, value_name = "FILE")]
    pub prefs: Option<PathBuf>,
    /// Log everything the simulation does
    #[arg(long)]
    pub debug: bool,
    /// Seed for scrambles
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Press keys, then finish every queued move
    ///
    /// Tokens are `U D L R F B M` (append `'` for prime), `S` to scramble,
    /// `0` to reset, and `T` to toggle the overlay.
    Play {
        #[arg(required = true)]
        tokens: Vec<String>,
    },
    /// Replay an input script
    Script {
        /// Script file, or `-` for stdin
        #[arg(value_parser)]
        input: clio::Input,
    },
    /// Print the solved cube
    State,
}

pub(crate) fn exec(args: Args, prefs: &Preferences) -> Result<()> {
    let mut sim =
        CubeSimulation::new(prefs, args.seed).context("error constructing simulation")?;

    match args.subcommand {
        Subcommand::Play { tokens } => {
            for token in &tokens {
                let key = script::parse_key_token(token)
                    .wrap_err_with(|| format!("invalid token {token:?}"))?;
                if !sim.handle_key(key, prefs)? {
                    log::warn!("token {token:?} had no effect");
                }
            }
            sim.catch_up(prefs)?;
        }

        Subcommand::Script { mut input } => {
            let mut buffer = String::new();
            input
                .read_to_string(&mut buffer)
                .context("error reading script")?;
            for event in script::parse_script(&buffer)? {
                event.apply(&mut sim, prefs)?;
            }
        }

        Subcommand::State => (),
    }

    let verbose = args.debug || prefs.debug;
    for event in sim.drain_events() {
        let line = serde_json::to_string(&event)?;
        if verbose {
            eprintln!("{line}");
        } else {
            log::debug!("{line}");
        }
    }

    write_json_output(&sim.snapshot())
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}
