//! Command-line driver for the interactive cube puzzle.

use clap::Parser;

mod cli;
mod script;

fn main() -> eyre::Result<()> {
    let args = cli::Args::parse();

    color_eyre::install().expect("error initializing panic handler");

    // Initialize logging. Preferences load afterward so their warnings show.
    let mut logger = env_logger::Builder::new();
    logger.filter_level(log::LevelFilter::Warn).parse_default_env();
    if args.debug {
        for module in ["cubeprefs", "cubepuzzle_core", "cubepuzzle_view", "cubeview"] {
            logger.filter_module(module, log::LevelFilter::Trace);
        }
    }
    logger.init();

    let prefs = cubeprefs::Preferences::load(args.prefs.as_deref());

    cli::exec(args, &prefs)
}
