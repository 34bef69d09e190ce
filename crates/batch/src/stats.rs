use std::time::Duration;

use qlearn::{QLearnError, TrainingOutcome};
use serde::Serialize;

use crate::runner::AttemptResult;

/// Results of a finished batch, in attempt order.
#[derive(Debug)]
pub struct BatchReport {
    attempts: Vec<AttemptResult>,
    elapsed: Duration,
}

/// Serializable digest of a [`BatchReport`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub attempts: usize,
    pub completed: usize,
    pub failed: usize,
    pub solved: usize,
    /// Episodes-to-solve of every completed attempt, in attempt order.
    pub scoreboard: Vec<usize>,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    /// Percentage of all attempts that reached the goal streak.
    pub success_rate: f64,
    pub elapsed_secs: f64,
}

impl BatchReport {
    #[must_use]
    pub fn new(attempts: Vec<AttemptResult>, elapsed: Duration) -> Self {
        Self { attempts, elapsed }
    }

    #[must_use]
    pub fn attempts(&self) -> &[AttemptResult] {
        &self.attempts
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Outcomes of attempts that ran to completion.
    pub fn outcomes(&self) -> impl Iterator<Item = &TrainingOutcome> {
        self.attempts.iter().filter_map(|a| a.outcome.as_ref().ok())
    }

    /// `(attempt index, error)` for every failed attempt.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &QLearnError)> {
        self.attempts
            .iter()
            .filter_map(|a| a.outcome.as_ref().err().map(|e| (a.index, e)))
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.outcomes().count()
    }

    /// Episodes-to-solve of every completed attempt.
    #[must_use]
    pub fn scoreboard(&self) -> Vec<usize> {
        self.outcomes().map(|o| o.episodes_to_solve).collect()
    }

    /// Completed outcome with the fewest episodes-to-solve among solved
    /// attempts.
    #[must_use]
    pub fn best(&self) -> Option<&TrainingOutcome> {
        self.outcomes()
            .filter(|o| o.solved)
            .min_by_key(|o| o.episodes_to_solve)
    }

    /// Arithmetic mean of the scoreboard.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        mean(&self.scoreboard())
    }

    /// Population standard deviation of the scoreboard.
    #[must_use]
    pub fn std_dev(&self) -> Option<f64> {
        std_dev(&self.scoreboard())
    }

    /// Percentage of attempts that reached the goal streak. Failed attempts
    /// count as unsolved.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        if self.attempts.is_empty() {
            return 0.0;
        }
        let solved = self.outcomes().filter(|o| o.solved).count();
        100.0 * solved as f64 / self.attempts.len() as f64
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary {
            attempts: self.attempts.len(),
            completed: self.completed(),
            failed: self.failures().count(),
            solved: self.outcomes().filter(|o| o.solved).count(),
            scoreboard: self.scoreboard(),
            mean: self.mean(),
            std_dev: self.std_dev(),
            success_rate: self.success_rate(),
            elapsed_secs: self.elapsed.as_secs_f64(),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[usize]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64)
}

#[allow(clippy::cast_precision_loss)]
fn std_dev(values: &[usize]) -> Option<f64> {
    let mean = mean(values)?;
    let variance = values
        .iter()
        .map(|&v| (v as f64 - mean).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn population_statistics() {
        let values = [2, 4, 4, 4, 5, 5, 7, 9];
        assert_eq!(mean(&values), Some(5.0));
        assert_eq!(std_dev(&values), Some(2.0));
    }

    #[test]
    fn empty_scoreboard_has_no_statistics() {
        assert_eq!(mean(&[]), None);
        assert_eq!(std_dev(&[]), None);
    }
}
