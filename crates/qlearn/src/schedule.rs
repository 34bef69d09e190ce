//! # Rate Schedules
//!
//! Learning and exploration rates decay with the episode index. Both rates
//! share one [`Schedule`] variant but carry their own [`RateParams`].
//!
//! - [`Schedule::Linear`]: `max(floor, initial − decay · episode)`
//! - [`Schedule::Logarithmic`]:
//!   `initial · clamp(1 − log10((episode + 1) / decay), floor, 1)`, where
//!   `decay` is the episode count at which the decay starts to bite.

use serde::{Deserialize, Serialize};

use crate::error::{QLearnError, Result};

/// Immutable parameters of one decaying rate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateParams {
    pub initial: f64,
    pub decay: f64,
    #[serde(alias = "min")]
    pub floor: f64,
}

impl RateParams {
    #[must_use]
    pub const fn new(initial: f64, decay: f64, floor: f64) -> Self {
        Self {
            initial,
            decay,
            floor,
        }
    }

    /// A rate that never changes.
    #[must_use]
    pub const fn constant(value: f64) -> Self {
        Self::new(value, 0.0, value)
    }
}

/// Decay law shared by the learning and exploration rates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    #[default]
    Linear,
    Logarithmic,
}

impl Schedule {
    /// Rate for `episode` under this schedule.
    #[must_use]
    pub fn rate(self, episode: usize, params: &RateParams) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let t = episode as f64;
        match self {
            Self::Linear => params.floor.max(params.initial - params.decay * t),
            Self::Logarithmic => {
                let scale = 1.0 - ((t + 1.0) / params.decay).log10();
                params.initial * scale.max(params.floor).min(1.0)
            }
        }
    }

    /// Checks `params` for use with this schedule.
    ///
    /// # Errors
    ///
    /// Returns [`QLearnError::InvalidRate`] naming `name` when a parameter is
    /// non-finite or negative, or when a logarithmic decay is not positive.
    pub fn validate(self, name: &'static str, params: &RateParams) -> Result<()> {
        let invalid = |reason: &str| QLearnError::InvalidRate {
            name,
            reason: reason.to_string(),
        };
        let RateParams {
            initial,
            decay,
            floor,
        } = *params;
        if !(initial.is_finite() && decay.is_finite() && floor.is_finite()) {
            return Err(invalid("values must be finite"));
        }
        if initial < 0.0 || floor < 0.0 || decay < 0.0 {
            return Err(invalid("values must be non-negative"));
        }
        match self {
            Self::Linear if floor > initial => Err(invalid("floor exceeds the initial rate")),
            Self::Logarithmic if decay <= 0.0 => Err(invalid("logarithmic decay must be positive")),
            Self::Logarithmic if floor > 1.0 => Err(invalid("logarithmic floor must not exceed 1")),
            _ => Ok(()),
        }
    }
}
