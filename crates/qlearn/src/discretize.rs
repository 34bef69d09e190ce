//! # Observation Discretizer
//!
//! Maps continuous observations onto bucket indices. Each binned dimension has
//! a strictly increasing list of edges; `N` edges produce `N + 1` buckets.
//! Bins are right-open, so a value equal to an edge belongs to the bucket
//! above it. This matches the "count of edges less than or equal to the value"
//! rule, which also sends `+inf` to the last bucket and `-inf` to bucket 0.
//!
//! Only the trailing dimensions of an observation are binned: with two edge
//! lists, a four-dimensional cart-pole observation contributes its angle and
//! angular velocity.

use serde::{Deserialize, Serialize};

use crate::error::{QLearnError, Result};

/// Bucket indices for one observation, one entry per binned dimension.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DiscreteState(Vec<usize>);

impl DiscreteState {
    #[must_use]
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<usize>> for DiscreteState {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

/// Validated per-dimension bin edges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct BinEdges {
    edges: Vec<Vec<f64>>,
}

impl BinEdges {
    /// Builds bin edges, checking that every dimension is finite and strictly
    /// increasing.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no dimension is given or an edge
    /// list is unsorted or contains a non-finite value.
    pub fn new(edges: Vec<Vec<f64>>) -> Result<Self> {
        if edges.is_empty() {
            return Err(QLearnError::NoBinDimensions);
        }
        for (dim, dim_edges) in edges.iter().enumerate() {
            if let Some(index) = dim_edges.iter().position(|e| !e.is_finite()) {
                return Err(QLearnError::NonFiniteBinEdge { dim, index });
            }
            if let Some(index) = dim_edges.windows(2).position(|w| w[0] >= w[1]) {
                return Err(QLearnError::UnsortedBinEdges {
                    dim,
                    index: index + 1,
                });
            }
        }
        Ok(Self { edges })
    }

    /// Pole angle and angular velocity edges for cart-pole, the last two
    /// dimensions of its observation.
    #[must_use]
    pub fn cart_pole() -> Self {
        Self {
            edges: vec![vec![-0.2, -0.1, 0.0, 0.1, 0.2], vec![-0.5, 0.5]],
        }
    }

    /// Number of binned observation dimensions.
    #[must_use]
    pub fn dims(&self) -> usize {
        self.edges.len()
    }

    /// Bucket count per binned dimension (`edges + 1`).
    #[must_use]
    pub fn bucket_counts(&self) -> Vec<usize> {
        self.edges.iter().map(|e| e.len() + 1).collect()
    }

    #[must_use]
    pub fn edges(&self) -> &[Vec<f64>] {
        &self.edges
    }

    /// Discretizes the trailing [`dims`](Self::dims) values of `observation`.
    ///
    /// # Errors
    ///
    /// Returns [`QLearnError::ObservationShape`] when the observation is
    /// shorter than the number of binned dimensions and
    /// [`QLearnError::NanObservation`] when a binned value is NaN.
    pub fn discretize(&self, observation: &[f64]) -> Result<DiscreteState> {
        let dims = self.dims();
        if observation.len() < dims {
            return Err(QLearnError::ObservationShape {
                expected: dims,
                actual: observation.len(),
            });
        }
        let offset = observation.len() - dims;
        let consumed = &observation[offset..];

        let mut indices = Vec::with_capacity(dims);
        for (dim, (&value, dim_edges)) in consumed.iter().zip(&self.edges).enumerate() {
            if value.is_nan() {
                return Err(QLearnError::NanObservation { dim: offset + dim });
            }
            indices.push(bucket_index(value, dim_edges));
        }
        Ok(DiscreteState(indices))
    }
}

impl TryFrom<Vec<Vec<f64>>> for BinEdges {
    type Error = QLearnError;

    fn try_from(edges: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(edges)
    }
}

impl From<BinEdges> for Vec<Vec<f64>> {
    fn from(bins: BinEdges) -> Self {
        bins.edges
    }
}

/// Number of edges less than or equal to `value`.
fn bucket_index(value: f64, edges: &[f64]) -> usize {
    edges.partition_point(|&edge| edge <= value)
}
