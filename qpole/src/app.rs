//! # Application
//!
//! Builds the trainer configuration from the command line, runs the batch
//! and writes whatever outputs were requested.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use anyhow::{bail, Context, Result};
use batch::{BatchReport, BatchRunner};
use qlearn::{run_greedy_trial, run_random_trial, TrainerConfig, TrainingOutcome};
use tracing_subscriber::EnvFilter;

use crate::tilt::TiltEnv;
use crate::Cli;

const ENV_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Runs the command described by `cli`.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or is invalid, the
/// batch cannot start, or an output file cannot be written.
pub fn run(cli: Cli) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = build_config(&cli)?;
    config.validate().context("invalid trainer configuration")?;

    let mut runner = BatchRunner::new(cli.attempts);
    if let Some(workers) = cli.workers {
        runner = runner.with_workers(workers);
    }
    if let Some(seed) = cli.seed {
        runner = runner.with_seed(seed);
    }
    if let Some(dir) = &cli.step_log_dir {
        runner = runner.with_step_logs(dir);
    }

    let report = runner
        .run(&config, |index| {
            TiltEnv::new(runner.attempt_seed(&config, index).map(env_seed))
        })
        .context("batch failed to start")?;
    print_report(&report);

    if let Some(path) = &cli.summary_json {
        let json = serde_json::to_string_pretty(&report.summary())?;
        fs::write(path, json)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
    }

    let Some(best) = pick_table(&report) else {
        bail!("every attempt failed; no table to export");
    };
    if let Some(path) = &cli.table_out {
        fs::write(path, best.table.to_json()?)
            .with_context(|| format!("failed to write table to {}", path.display()))?;
        tracing::info!("table written to {}", path.display());
    }
    if let Some(path) = &cli.table_csv {
        write_table_csv(best, path)?;
        tracing::info!("table written to {}", path.display());
    }
    if cli.trials {
        run_trials(&config, best, cli.seed)?;
    }
    Ok(())
}

/// Seed for the environment's reset noise, kept apart from the trainer's
/// exploration stream so the two never draw the same sequence.
fn env_seed(seed: u64) -> u64 {
    seed ^ ENV_SEED_SALT
}

/// Loads the configuration file, if any, and applies the flag overrides.
fn build_config(cli: &Cli) -> Result<TrainerConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => match cli.schedule.map(qlearn::Schedule::from) {
            Some(qlearn::Schedule::Logarithmic) => TrainerConfig::logarithmic(),
            _ => TrainerConfig::default(),
        },
    };
    if let Some(schedule) = cli.schedule {
        config.schedule = schedule.into();
    }
    if let Some(max_episodes) = cli.max_episodes {
        config.max_episodes = max_episodes;
    }
    if let Some(goal_streak) = cli.goal_streak {
        config.goal_streak = goal_streak;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    Ok(config)
}

fn load_config(path: &Path) -> Result<TrainerConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))
}

/// Best solved table, or the first completed one when nothing solved.
fn pick_table(report: &BatchReport) -> Option<&TrainingOutcome> {
    report.best().or_else(|| {
        let fallback = report.outcomes().next();
        if fallback.is_some() {
            tracing::warn!("no attempt reached the goal streak; exporting the first completed table");
        }
        fallback
    })
}

fn write_table_csv(outcome: &TrainingOutcome, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    outcome
        .table
        .write_csv(BufWriter::new(file))
        .with_context(|| format!("failed to write table to {}", path.display()))
}

fn print_report(report: &BatchReport) {
    println!("attempt  seed        episodes  solved");
    for attempt in report.attempts() {
        let seed = attempt
            .seed
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        match &attempt.outcome {
            Ok(outcome) => println!(
                "{:>7}  {:<10}  {:>8}  {}",
                attempt.index, seed, outcome.episodes_to_solve, outcome.solved
            ),
            Err(e) => println!("{:>7}  {:<10}  failed: {e}", attempt.index, seed),
        }
    }

    let summary = report.summary();
    println!();
    println!("scoreboard:   {:?}", summary.scoreboard);
    if let (Some(mean), Some(std_dev)) = (summary.mean, summary.std_dev) {
        println!("mean:         {mean:.2}");
        println!("std dev:      {std_dev:.2}");
    }
    println!("success rate: {:.1}%", summary.success_rate);
    println!("elapsed:      {:.2}s", summary.elapsed_secs);
}

fn run_trials(config: &TrainerConfig, best: &TrainingOutcome, seed: Option<u64>) -> Result<()> {
    let greedy = run_greedy_trial(
        &mut TiltEnv::new(seed.map(env_seed)),
        &config.bin_edges,
        &best.table,
        config.max_steps,
    )?;
    let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    let random = run_random_trial(
        &mut TiltEnv::new(seed.map(env_seed)),
        config.max_steps,
        &mut rng,
    )?;

    println!();
    println!(
        "greedy trial: {} steps, reward {}, {}",
        greedy.steps,
        greedy.total_reward,
        if greedy.terminated { "fell" } else { "balanced" }
    );
    println!(
        "random trial: {} steps, reward {}, {}",
        random.steps,
        random.total_reward,
        if random.terminated { "fell" } else { "balanced" }
    );
    Ok(())
}
