//! The `drillcard play` command.

use std::io;

use anyhow::{Context, Result};

use drillcard_core::config::load_config_from;
use drillcard_core::{RngDraws, Session};

use crate::repl::run;
use crate::summary::print_summary;
use crate::DrillArgs;

pub fn execute(args: &DrillArgs, seed: Option<u64>) -> Result<()> {
    let loaded = load_config_from(args.config.as_deref(), &args.settings(), args.no_focus)?;
    for w in &loaded.warnings {
        eprintln!("warning: {w}");
    }

    let draws = match seed {
        Some(seed) => RngDraws::seeded(seed),
        None => RngDraws::from_entropy(),
    };
    let mut session = Session::new(loaded.config, draws);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    run(&mut session, stdin.lock(), &mut stdout).context("drill interrupted")?;
    print_summary(&session, &mut stdout).context("failed to write summary")?;

    tracing::info!(session = %session.id(), score = %session.score(), "session finished");
    Ok(())
}
