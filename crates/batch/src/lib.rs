#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Batch Training
//!
//! Runs many independent [`qlearn::Trainer`] attempts in parallel and
//! summarises how quickly each one reached its goal streak.
//!
//! -   [`BatchRunner`] owns the worker pool configuration and seeds.
//! -   [`BatchReport`] keeps every attempt's result and derives the
//!     scoreboard, mean, standard deviation and success rate.
//! -   [`CsvStepLog`] records raw environment output, one file per attempt.

pub mod error;
pub mod runner;
pub mod stats;
pub mod step_log;

pub use error::{BatchError, Result};
pub use runner::{AttemptResult, BatchRunner};
pub use stats::{BatchReport, Summary};
pub use step_log::CsvStepLog;
