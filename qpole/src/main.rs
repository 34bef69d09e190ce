//! # qpole
//!
//! Command-line front end. Trains a batch of independent Q-learning attempts
//! on the bundled tilt task, prints the scoreboard and optionally exports
//! the best table, a JSON summary and per-attempt step logs.

mod app;
mod tilt;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "qpole", version, about = "Tabular Q-learning on a pole-balancing task")]
pub struct Cli {
    /// JSON trainer configuration; missing fields take their defaults
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of independent attempts
    #[arg(long, short = 'n', default_value_t = 1)]
    pub attempts: usize,

    /// Worker threads (defaults to the available cores)
    #[arg(long, short = 'j')]
    pub workers: Option<usize>,

    /// Base seed; attempt `i` runs with `seed + i`
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub max_episodes: Option<usize>,

    #[arg(long)]
    pub goal_streak: Option<usize>,

    /// Decay schedule. Without --config this also selects the rate
    /// parameters tuned for it.
    #[arg(long, value_enum)]
    pub schedule: Option<ScheduleArg>,

    /// Write the best table as JSON
    #[arg(long)]
    pub table_out: Option<PathBuf>,

    /// Write the best table as CSV
    #[arg(long)]
    pub table_csv: Option<PathBuf>,

    /// Directory for per-attempt CSV step logs
    #[arg(long)]
    pub step_log_dir: Option<PathBuf>,

    /// Write the batch summary as JSON
    #[arg(long)]
    pub summary_json: Option<PathBuf>,

    /// Replay the best table greedily next to a random-action baseline
    #[arg(long)]
    pub trials: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScheduleArg {
    Linear,
    Logarithmic,
}

impl From<ScheduleArg> for qlearn::Schedule {
    fn from(arg: ScheduleArg) -> Self {
        match arg {
            ScheduleArg::Linear => Self::Linear,
            ScheduleArg::Logarithmic => Self::Logarithmic,
        }
    }
}

fn main() -> Result<()> {
    app::run(Cli::parse())
}
