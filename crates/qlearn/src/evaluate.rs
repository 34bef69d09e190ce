//! # Trials
//!
//! Single-episode runs that do not learn: one follows a trained table
//! greedily, the other picks uniformly random actions as a baseline.

use crate::discretize::BinEdges;
use crate::env::{Env, Transition};
use crate::error::{QLearnError, Result};
use crate::table::QTable;

/// Outcome of a single trial episode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrialReport {
    /// Steps taken before the episode ended or `max_steps` ran out.
    pub steps: usize,
    pub total_reward: f64,
    /// Whether the environment reported failure.
    pub terminated: bool,
}

/// Plays one episode with the greedy policy of `table`.
///
/// # Errors
///
/// Returns a configuration error when `table` does not match `bins` and the
/// environment, and a protocol violation when an observation cannot be
/// discretized.
pub fn run_greedy_trial<E: Env>(
    env: &mut E,
    bins: &BinEdges,
    table: &QTable,
    max_steps: usize,
) -> Result<TrialReport> {
    let mut expected = bins.bucket_counts();
    expected.push(env.action_size());
    if table.shape() != expected {
        return Err(QLearnError::TableShapeMismatch {
            shape: table.shape(),
            expected,
        });
    }

    play(env, max_steps, |observation| {
        let state = bins.discretize(observation)?;
        table.greedy_action(&state)
    })
}

/// Plays one episode choosing actions uniformly at random.
///
/// # Errors
///
/// Returns [`QLearnError::EmptyActionSpace`] for an environment without
/// actions.
pub fn run_random_trial<E: Env>(
    env: &mut E,
    max_steps: usize,
    rng: &mut fastrand::Rng,
) -> Result<TrialReport> {
    let actions = env.action_size();
    if actions == 0 {
        return Err(QLearnError::EmptyActionSpace);
    }
    play(env, max_steps, |_| Ok(rng.usize(..actions)))
}

fn play<E: Env>(
    env: &mut E,
    max_steps: usize,
    mut choose: impl FnMut(&[f64]) -> Result<usize>,
) -> Result<TrialReport> {
    let mut report = TrialReport {
        steps: 0,
        total_reward: 0.0,
        terminated: false,
    };
    let mut observation = env.reset();
    for t in 0..max_steps {
        let action = choose(&observation)?;
        let Transition {
            observation: next,
            reward,
            terminal,
        } = env.step(action);
        report.steps = t + 1;
        report.total_reward += reward;
        if terminal {
            report.terminated = true;
            break;
        }
        observation = next;
    }
    Ok(report)
}
