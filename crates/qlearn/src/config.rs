//! # Trainer Configuration
//!
//! Everything a training attempt needs before its first episode. The record
//! deserializes from JSON with every field optional; missing fields take the
//! cart-pole tuning returned by [`TrainerConfig::default`].

use serde::{Deserialize, Serialize};

use crate::discretize::BinEdges;
use crate::error::{QLearnError, Result};
use crate::schedule::{RateParams, Schedule};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainerConfig {
    /// Edges for the trailing observation dimensions.
    pub bin_edges: BinEdges,
    /// Upper bound on episodes per attempt.
    pub max_episodes: usize,
    /// Upper bound on steps per episode.
    pub max_steps: usize,
    /// Consecutive solved episodes required; the run stops once the streak
    /// exceeds this value.
    pub goal_streak: usize,
    /// Step index at which a still-running episode counts as solved.
    pub solved_step_threshold: usize,
    pub learning_rate: RateParams,
    pub exploration_rate: RateParams,
    pub schedule: Schedule,
    /// Weight of future rewards, in `[0, 1]`.
    pub discount_factor: f64,
    /// Expected action-space size; checked against the environment when set.
    pub action_count: Option<usize>,
    /// Seed for the attempt's random stream. Unseeded attempts draw from
    /// entropy and are not reproducible.
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        let rate = RateParams::new(0.5, 0.005, 0.01);
        Self {
            bin_edges: BinEdges::cart_pole(),
            max_episodes: 300,
            max_steps: 200,
            goal_streak: 100,
            solved_step_threshold: 199,
            learning_rate: rate,
            exploration_rate: rate,
            schedule: Schedule::Linear,
            discount_factor: 0.99,
            action_count: None,
            seed: None,
        }
    }
}

impl TrainerConfig {
    /// Default configuration switched to the logarithmic schedule with rate
    /// parameters tuned for it.
    #[must_use]
    pub fn logarithmic() -> Self {
        Self {
            learning_rate: RateParams::new(0.5, 27.0, 0.1),
            exploration_rate: RateParams::new(0.4, 27.0, 0.005),
            schedule: Schedule::Logarithmic,
            ..Self::default()
        }
    }

    /// Checks the configuration on its own, without an environment.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error found.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("max_episodes", self.max_episodes),
            ("max_steps", self.max_steps),
            ("goal_streak", self.goal_streak),
        ] {
            if value == 0 {
                return Err(QLearnError::NonPositiveBound { name });
            }
        }
        if self.solved_step_threshold > self.max_steps {
            return Err(QLearnError::ThresholdExceedsMaxSteps {
                threshold: self.solved_step_threshold,
                max_steps: self.max_steps,
            });
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(QLearnError::InvalidDiscount(self.discount_factor));
        }
        self.schedule.validate("learning_rate", &self.learning_rate)?;
        self.schedule
            .validate("exploration_rate", &self.exploration_rate)?;
        if self.exploration_rate.initial > 1.0 {
            return Err(QLearnError::InvalidRate {
                name: "exploration_rate",
                reason: "initial rate must not exceed 1".to_string(),
            });
        }
        if self.action_count == Some(0) {
            return Err(QLearnError::EmptyActionSpace);
        }
        Ok(())
    }

    /// Checks the configuration against an environment's declared sizes.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error found, including action-space
    /// mismatches and observations too narrow for the bin edges.
    pub fn validate_for(&self, obs_size: usize, action_size: usize) -> Result<()> {
        self.validate()?;
        if action_size == 0 {
            return Err(QLearnError::EmptyActionSpace);
        }
        if let Some(expected) = self.action_count {
            if expected != action_size {
                return Err(QLearnError::ActionSpaceMismatch {
                    expected,
                    actual: action_size,
                });
            }
        }
        let consumed = self.bin_edges.dims();
        if obs_size < consumed {
            return Err(QLearnError::ObservationTooNarrow { obs_size, consumed });
        }
        Ok(())
    }
}
