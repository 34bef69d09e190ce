//! # Trainer
//!
//! Drives one training attempt: episodes of discretize → select → step →
//! update against a private environment, streak tracking, rate decay and
//! termination.
//!
//! An episode ends in one of three ways:
//!
//! - **Terminal**: the environment reports failure. The streak resets to 0.
//! - **Solved**: the episode is still running at step
//!   `solved_step_threshold`. The streak grows by one.
//! - **Exhausted**: `max_steps` ran out before either of the above, which
//!   only happens when the threshold equals `max_steps`. The streak is kept.
//!
//! Terminal wins when a step is both terminal and past the threshold. The run
//! stops once the streak exceeds `goal_streak` or the last episode finishes.

use tracing::{debug, info, warn};

use crate::config::TrainerConfig;
use crate::discretize::DiscreteState;
use crate::env::{Env, Transition};
use crate::error::{QLearnError, Result};
use crate::observer::{NoopObserver, StepObserver, StepRecord, StepTag};
use crate::policy::select_action;
use crate::table::QTable;

/// How an episode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EpisodeEnd {
    Terminal,
    Solved,
    Exhausted,
}

/// Per-episode record kept in the [`TrainingOutcome`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpisodeSummary {
    pub episode: usize,
    /// Steps taken, including the final one.
    pub steps: usize,
    pub end: EpisodeEnd,
    /// Streak after this episode.
    pub streak: usize,
    pub learning_rate: f64,
    pub exploration_rate: f64,
}

/// Result of a finished attempt.
#[derive(Clone, Debug)]
pub struct TrainingOutcome {
    pub table: QTable,
    /// Index of the episode at which the run stopped.
    pub episodes_to_solve: usize,
    /// Whether the streak exceeded `goal_streak` within the episode budget.
    pub solved: bool,
    pub episodes: Vec<EpisodeSummary>,
}

impl TrainingOutcome {
    /// `(learning_rate, exploration_rate)` used by each episode, in order.
    pub fn rate_history(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.episodes
            .iter()
            .map(|e| (e.learning_rate, e.exploration_rate))
    }
}

/// One training attempt over an owned environment.
pub struct Trainer<E: Env> {
    config: TrainerConfig,
    env: E,
    table: QTable,
    rng: fastrand::Rng,
    learning_rate: f64,
    exploration_rate: f64,
    streak: usize,
}

impl<E: Env> Trainer<E> {
    /// Creates a trainer with a zeroed value table sized for `config` and
    /// `env`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` is invalid or does not fit
    /// the environment's declared sizes.
    pub fn new(config: TrainerConfig, env: E) -> Result<Self> {
        let table = QTable::for_bins(&config.bin_edges, env.action_size());
        Self::with_table(config, env, table)
    }

    /// Creates a trainer that starts from an existing value table.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` is invalid, does not fit the
    /// environment, or `table` has the wrong shape.
    pub fn with_table(config: TrainerConfig, env: E, table: QTable) -> Result<Self> {
        config.validate_for(env.obs_size(), env.action_size())?;

        let mut expected = config.bin_edges.bucket_counts();
        expected.push(env.action_size());
        if table.shape() != expected {
            return Err(QLearnError::TableShapeMismatch {
                shape: table.shape(),
                expected,
            });
        }

        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let learning_rate = config.schedule.rate(0, &config.learning_rate);
        let exploration_rate = config.schedule.rate(0, &config.exploration_rate);

        Ok(Self {
            config,
            env,
            table,
            rng,
            learning_rate,
            exploration_rate,
            streak: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    #[must_use]
    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// Runs the attempt to completion.
    ///
    /// # Errors
    ///
    /// Returns a protocol violation if the environment misbehaves; the
    /// partially trained table is dropped.
    pub fn run(self) -> Result<TrainingOutcome> {
        self.run_observed(&mut NoopObserver)
    }

    /// Runs the attempt, reporting every reset and step to `observer`.
    /// Observer failures are logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns a protocol violation if the environment misbehaves; the
    /// partially trained table is dropped.
    pub fn run_observed(mut self, observer: &mut dyn StepObserver) -> Result<TrainingOutcome> {
        let result = self.run_episodes(observer);
        if let Err(e) = observer.finish() {
            warn!("step observer failed to finish: {e}");
        }
        let (episodes_to_solve, episodes) = result?;

        let solved = self.streak > self.config.goal_streak;
        info!(
            episodes_to_solve,
            solved,
            streak = self.streak,
            "training finished"
        );
        Ok(TrainingOutcome {
            table: self.table,
            episodes_to_solve,
            solved,
            episodes,
        })
    }

    fn run_episodes(
        &mut self,
        observer: &mut dyn StepObserver,
    ) -> Result<(usize, Vec<EpisodeSummary>)> {
        let last_episode = self.config.max_episodes - 1;
        let mut summaries = Vec::new();

        for episode in 0..self.config.max_episodes {
            let (end, steps) = self.run_episode(episode, observer)?;
            match end {
                EpisodeEnd::Terminal => self.streak = 0,
                EpisodeEnd::Solved => self.streak += 1,
                EpisodeEnd::Exhausted => {}
            }
            debug!(
                episode,
                steps,
                ?end,
                streak = self.streak,
                learning_rate = self.learning_rate,
                exploration_rate = self.exploration_rate,
                "episode finished"
            );
            summaries.push(EpisodeSummary {
                episode,
                steps,
                end,
                streak: self.streak,
                learning_rate: self.learning_rate,
                exploration_rate: self.exploration_rate,
            });

            if self.streak > self.config.goal_streak || episode >= last_episode {
                return Ok((episode, summaries));
            }

            let next = episode + 1;
            self.learning_rate = self.config.schedule.rate(next, &self.config.learning_rate);
            self.exploration_rate = self
                .config
                .schedule
                .rate(next, &self.config.exploration_rate);
        }

        // max_episodes is validated positive, so the loop always returns.
        Ok((last_episode, summaries))
    }

    fn run_episode(
        &mut self,
        episode: usize,
        observer: &mut dyn StepObserver,
    ) -> Result<(EpisodeEnd, usize)> {
        let observation = self.env.reset();
        self.check_observation(&observation)?;
        notify(
            observer,
            &StepRecord {
                episode,
                step: None,
                tag: StepTag::Reset,
                observation: &observation,
                reward: 0.0,
                terminal: false,
            },
        );
        let mut prev_state = self.config.bin_edges.discretize(&observation)?;

        for t in 0..self.config.max_steps {
            let action = select_action(
                &self.table,
                &prev_state,
                self.exploration_rate,
                &mut self.rng,
            )?;
            let Transition {
                observation,
                reward,
                terminal,
            } = self.env.step(action);
            self.check_observation(&observation)?;
            notify(
                observer,
                &StepRecord {
                    episode,
                    step: Some(t),
                    tag: StepTag::Step,
                    observation: &observation,
                    reward,
                    terminal,
                },
            );

            let state = self.config.bin_edges.discretize(&observation)?;
            self.update(&prev_state, action, reward, &state)?;
            prev_state = state;

            if terminal {
                return Ok((EpisodeEnd::Terminal, t + 1));
            }
            if t >= self.config.solved_step_threshold {
                return Ok((EpisodeEnd::Solved, t + 1));
            }
        }
        Ok((EpisodeEnd::Exhausted, self.config.max_steps))
    }

    fn update(
        &mut self,
        prev_state: &DiscreteState,
        action: usize,
        reward: f64,
        state: &DiscreteState,
    ) -> Result<()> {
        self.table.update(
            prev_state,
            action,
            reward,
            state,
            self.learning_rate,
            self.config.discount_factor,
        )?;
        Ok(())
    }

    fn check_observation(&self, observation: &[f64]) -> Result<()> {
        let expected = self.env.obs_size();
        if observation.len() == expected {
            Ok(())
        } else {
            Err(QLearnError::ObservationShape {
                expected,
                actual: observation.len(),
            })
        }
    }
}

fn notify(observer: &mut dyn StepObserver, record: &StepRecord<'_>) {
    if let Err(e) = observer.record(record) {
        warn!(
            episode = record.episode,
            tag = record.tag.as_str(),
            "step observer failed: {e}"
        );
    }
}
