//! # Batch Runner
//!
//! Repeats independent training attempts on a bounded worker pool. Every
//! attempt builds its own environment and trainer inside its worker and
//! returns its result by value; the pool collects the results in attempt
//! order. Attempts share nothing, so one attempt failing leaves the others
//! untouched.

use std::path::{Path, PathBuf};
use std::time::Instant;

use qlearn::{Env, NoopObserver, QLearnError, StepObserver, Trainer, TrainerConfig, TrainingOutcome};
use rayon::prelude::*;
use tracing::{error, info, info_span, warn};

use crate::error::{BatchError, Result};
use crate::stats::BatchReport;
use crate::step_log::CsvStepLog;

/// Result of one attempt within a batch.
#[derive(Debug)]
pub struct AttemptResult {
    pub index: usize,
    /// Seed the attempt ran with, if any.
    pub seed: Option<u64>,
    pub outcome: std::result::Result<TrainingOutcome, QLearnError>,
}

#[derive(Clone, Debug)]
pub struct BatchRunner {
    attempts: usize,
    workers: usize,
    base_seed: Option<u64>,
    step_log_dir: Option<PathBuf>,
}

impl BatchRunner {
    /// Runner for `attempts` attempts using one worker per available core.
    #[must_use]
    pub fn new(attempts: usize) -> Self {
        Self {
            attempts,
            workers: std::thread::available_parallelism().map_or(1, usize::from),
            base_seed: None,
            step_log_dir: None,
        }
    }

    /// Caps the worker pool at `workers` threads (at least one).
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Seeds attempt `i` with `seed + i`, overriding the configured seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.base_seed = Some(seed);
        self
    }

    /// Writes one CSV step log per attempt into `dir`.
    #[must_use]
    pub fn with_step_logs(mut self, dir: impl Into<PathBuf>) -> Self {
        self.step_log_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Seed used by attempt `index`: the runner seed if set, else the
    /// configured one, offset by the index so attempts differ.
    #[must_use]
    pub fn attempt_seed(&self, config: &TrainerConfig, index: usize) -> Option<u64> {
        self.base_seed
            .or(config.seed)
            .map(|seed| seed.wrapping_add(index as u64))
    }

    /// Runs every attempt and collects the results.
    ///
    /// `make_env` is called once per attempt, on the worker that runs it,
    /// with the attempt index.
    ///
    /// # Errors
    ///
    /// Returns an error only for batch-level problems: no attempts, a worker
    /// pool that cannot be built, or an unusable step log directory.
    /// Configuration and environment errors are reported per attempt.
    pub fn run<E, F>(&self, config: &TrainerConfig, make_env: F) -> Result<BatchReport>
    where
        E: Env,
        F: Fn(usize) -> E + Sync,
    {
        if self.attempts == 0 {
            return Err(BatchError::NoAttempts);
        }
        if let Some(dir) = &self.step_log_dir {
            std::fs::create_dir_all(dir).map_err(|source| BatchError::LogDirectory {
                path: dir.clone(),
                source,
            })?;
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()?;
        info!(
            attempts = self.attempts,
            workers = self.workers,
            "starting batch"
        );

        let start = Instant::now();
        let results: Vec<AttemptResult> = pool.install(|| {
            (0..self.attempts)
                .into_par_iter()
                .map(|index| self.run_attempt(index, config, &make_env))
                .collect()
        });
        let report = BatchReport::new(results, start.elapsed());

        info!(
            completed = report.completed(),
            failed = report.failures().count(),
            elapsed_ms = report.elapsed().as_millis(),
            "batch finished"
        );
        Ok(report)
    }

    fn run_attempt<E, F>(&self, index: usize, config: &TrainerConfig, make_env: &F) -> AttemptResult
    where
        E: Env,
        F: Fn(usize) -> E,
    {
        let _span = info_span!("attempt", index).entered();

        let seed = self.attempt_seed(config, index);
        let config = TrainerConfig {
            seed,
            ..config.clone()
        };
        let outcome =
            Trainer::new(config, make_env(index)).and_then(|trainer| match &self.step_log_dir {
                Some(dir) => {
                    let mut log = open_step_log(dir, index);
                    trainer.run_observed(log.as_mut())
                }
                None => trainer.run(),
            });

        if let Err(e) = &outcome {
            error!("attempt failed: {e}");
        }
        AttemptResult {
            index,
            seed,
            outcome,
        }
    }
}

/// Opens the step log for attempt `index`, falling back to a no-op sink.
fn open_step_log(dir: &Path, index: usize) -> Box<dyn StepObserver> {
    let path = dir.join(format!("attempt-{index}.csv"));
    match CsvStepLog::create(&path) {
        Ok(log) => Box::new(log),
        Err(e) => {
            warn!("step log {} unavailable, training without it: {e}", path.display());
            Box::new(NoopObserver)
        }
    }
}
