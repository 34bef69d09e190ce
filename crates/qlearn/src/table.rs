//! # Value Table
//!
//! Dense action-value table `Q(state, action)` with shape
//! `(bucket_count_0, …, bucket_count_k, action_count)`, stored row-major so
//! that the actions of one discrete state are contiguous.

use serde::{Deserialize, Serialize};

use crate::discretize::{BinEdges, DiscreteState};
use crate::error::{QLearnError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct QTable {
    buckets: Vec<usize>,
    actions: usize,
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct RawTable {
    buckets: Vec<usize>,
    actions: usize,
    values: Vec<f64>,
}

impl TryFrom<RawTable> for QTable {
    type Error = QLearnError;

    fn try_from(raw: RawTable) -> Result<Self> {
        let expected = raw
            .buckets
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .and_then(|rows| rows.checked_mul(raw.actions))
            .filter(|&len| len > 0);
        if expected != Some(raw.values.len()) {
            let mut shape = raw.buckets;
            shape.push(raw.actions);
            return Err(QLearnError::InvalidTableShape {
                shape,
                values: raw.values.len(),
            });
        }
        Ok(Self {
            buckets: raw.buckets,
            actions: raw.actions,
            values: raw.values,
        })
    }
}

impl QTable {
    /// Zero-initialised table for the given bucket counts and action count.
    #[must_use]
    pub fn zeros(buckets: &[usize], actions: usize) -> Self {
        let rows: usize = buckets.iter().product();
        Self {
            buckets: buckets.to_vec(),
            actions,
            values: vec![0.0; rows * actions],
        }
    }

    /// Zero-initialised table sized for `bins`.
    #[must_use]
    pub fn for_bins(bins: &BinEdges, actions: usize) -> Self {
        Self::zeros(&bins.bucket_counts(), actions)
    }

    /// Full shape, bucket counts followed by the action count.
    #[must_use]
    pub fn shape(&self) -> Vec<usize> {
        let mut shape = self.buckets.clone();
        shape.push(self.actions);
        shape
    }

    #[must_use]
    pub fn bucket_counts(&self) -> &[usize] {
        &self.buckets
    }

    #[must_use]
    pub fn action_count(&self) -> usize {
        self.actions
    }

    /// Flat row-major view of every entry.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of discrete states (rows).
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.buckets.iter().product()
    }

    /// `true` while every entry is a finite number. Diverging updates are not
    /// clamped, so callers check this after training.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    fn row_offset(&self, state: &DiscreteState) -> Result<usize> {
        let indices = state.indices();
        let in_range = indices.len() == self.buckets.len()
            && indices.iter().zip(&self.buckets).all(|(i, n)| i < n);
        if !in_range {
            return Err(QLearnError::StateOutOfRange {
                state: indices.to_vec(),
                shape: self.shape(),
            });
        }
        let row = indices
            .iter()
            .zip(&self.buckets)
            .fold(0, |acc, (&i, &n)| acc * n + i);
        Ok(row * self.actions)
    }

    fn check_action(&self, action: usize) -> Result<()> {
        if action < self.actions {
            Ok(())
        } else {
            Err(QLearnError::ActionOutOfRange {
                action,
                action_count: self.actions,
            })
        }
    }

    /// Action values for one discrete state.
    ///
    /// # Errors
    ///
    /// Returns [`QLearnError::StateOutOfRange`] if `state` does not index
    /// this table.
    pub fn row(&self, state: &DiscreteState) -> Result<&[f64]> {
        let start = self.row_offset(state)?;
        Ok(&self.values[start..start + self.actions])
    }

    /// # Errors
    ///
    /// Returns an error if `state` or `action` is out of range.
    pub fn get(&self, state: &DiscreteState, action: usize) -> Result<f64> {
        self.check_action(action)?;
        Ok(self.row(state)?[action])
    }

    /// # Errors
    ///
    /// Returns an error if `state` or `action` is out of range.
    pub fn set(&mut self, state: &DiscreteState, action: usize, value: f64) -> Result<()> {
        self.check_action(action)?;
        let start = self.row_offset(state)?;
        self.values[start + action] = value;
        Ok(())
    }

    /// Largest action value in `state`.
    ///
    /// # Errors
    ///
    /// Returns [`QLearnError::StateOutOfRange`] if `state` does not index
    /// this table.
    pub fn max_value(&self, state: &DiscreteState) -> Result<f64> {
        let row = self.row(state)?;
        Ok(row.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }

    /// Action with the highest value in `state`; ties go to the lowest index.
    ///
    /// # Errors
    ///
    /// Returns [`QLearnError::StateOutOfRange`] if `state` does not index
    /// this table.
    pub fn greedy_action(&self, state: &DiscreteState) -> Result<usize> {
        let row = self.row(state)?;
        let mut best = 0;
        for (action, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = action;
            }
        }
        Ok(best)
    }

    /// One-step Q-learning update:
    ///
    /// `Q(s,a) ← Q(s,a) + α [r + γ max_a' Q(s',a') − Q(s,a)]`
    ///
    /// Returns the temporal-difference error `target − Q(s,a)` measured
    /// before the update.
    ///
    /// # Errors
    ///
    /// Returns an error if either state or the action is out of range. The
    /// table is left untouched in that case.
    pub fn update(
        &mut self,
        prev_state: &DiscreteState,
        action: usize,
        reward: f64,
        next_state: &DiscreteState,
        learning_rate: f64,
        discount_factor: f64,
    ) -> Result<f64> {
        self.check_action(action)?;
        let max_next = self.max_value(next_state)?;
        let index = self.row_offset(prev_state)? + action;

        let target = reward + discount_factor * max_next;
        let old = self.values[index];
        let td_error = target - old;
        self.values[index] = old + learning_rate * td_error;
        Ok(td_error)
    }

    /// Every discrete state of the table in row-major order.
    pub fn states(&self) -> impl Iterator<Item = DiscreteState> + '_ {
        (0..self.state_count()).map(move |mut row| {
            let mut indices = vec![0; self.buckets.len()];
            for (slot, &n) in indices.iter_mut().zip(&self.buckets).rev() {
                *slot = row % n;
                row /= n;
            }
            DiscreteState::new(indices)
        })
    }
}
