//! drillcard CLI — multiplication and division drills in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use drillcard_core::config::DrillSettings;
use drillcard_core::Operation;

mod commands;
mod repl;
mod summary;

#[derive(Parser)]
#[command(name = "drillcard", version, about = "Multiplication and division drills")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Drill settings shared by `play` and `validate`.
#[derive(Args, Debug, Clone, Default)]
pub struct DrillArgs {
    /// Largest operand to practise (clamped to 1-15)
    #[arg(long = "max", allow_negative_numbers = true)]
    pub max_operand: Option<i64>,

    /// Pin one operand: the first factor, or the divisor
    #[arg(long, allow_negative_numbers = true, conflicts_with = "no_focus")]
    pub focus: Option<i64>,

    /// Drop any focus number set by the config file or environment
    #[arg(long)]
    pub no_focus: bool,

    /// Operation: multiplication (mul) or division (div)
    #[arg(long, short = 'o')]
    pub operation: Option<Operation>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl DrillArgs {
    fn settings(&self) -> DrillSettings {
        DrillSettings {
            max_operand: self.max_operand,
            focus: self.focus,
            operation: self.operation,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive drill on stdin/stdout
    Play {
        #[command(flatten)]
        drill: DrillArgs,

        /// Seed for a reproducible sequence of problems
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Resolve the configuration and report clamped values
    Validate {
        #[command(flatten)]
        drill: DrillArgs,
    },

    /// Create a starter drillcard.toml
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("drillcard=warn".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { drill, seed } => commands::play::execute(&drill, seed),
        Commands::Validate { drill } => commands::validate::execute(&drill),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
