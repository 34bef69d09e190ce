#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Tabular Q-learning
//!
//! Learning core for balancing a pole with a discretized action-value table.
//!
//! ## Key Components
//!
//! -   **Discretizer:** [`BinEdges`] maps the trailing dimensions of a
//!     continuous observation onto a [`DiscreteState`].
//! -   **Value Table:** [`QTable`] is a dense array indexed by discrete state
//!     and action, updated in place by the one-step Q-learning rule.
//! -   **Policy:** [`select_action`] is epsilon-greedy with lowest-index tie
//!     breaking.
//! -   **Rate Schedules:** [`Schedule`] decays the learning and exploration
//!     rates per episode, linearly or logarithmically.
//! -   **Trainer:** [`Trainer`] runs episodes against any [`Env`] until the
//!     success streak exceeds the goal or the episode budget runs out.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use qlearn::{Trainer, TrainerConfig};
//!
//! let config = TrainerConfig { seed: Some(7), ..TrainerConfig::default() };
//! let outcome = Trainer::new(config, MyCartPole::new())?.run()?;
//! println!("solved after {} episodes", outcome.episodes_to_solve);
//! ```

pub mod config;
pub mod discretize;
pub mod env;
pub mod error;
pub mod evaluate;
pub mod export;
pub mod observer;
pub mod policy;
pub mod schedule;
pub mod table;
pub mod trainer;

pub use config::TrainerConfig;
pub use discretize::{BinEdges, DiscreteState};
pub use env::{Env, Transition};
pub use error::{QLearnError, Result};
pub use evaluate::{run_greedy_trial, run_random_trial, TrialReport};
pub use observer::{
    NoopObserver, RecordedStep, RecordingObserver, StepObserver, StepRecord, StepTag,
};
pub use policy::select_action;
pub use schedule::{RateParams, Schedule};
pub use table::QTable;
pub use trainer::{EpisodeEnd, EpisodeSummary, Trainer, TrainingOutcome};
