use thiserror::Error;

/// Errors raised while configuring or running a training attempt.
///
/// Variants fall into two groups. Configuration errors are returned before
/// the first environment call; protocol violations abort an attempt that is
/// already running.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum QLearnError {
    #[error("bin edges must describe at least one observation dimension")]
    NoBinDimensions,

    #[error("bin edges for dimension {dim} are not strictly increasing at index {index}")]
    UnsortedBinEdges { dim: usize, index: usize },

    #[error("bin edge {index} of dimension {dim} is not finite")]
    NonFiniteBinEdge { dim: usize, index: usize },

    #[error("{name} must be positive")]
    NonPositiveBound { name: &'static str },

    #[error("solved step threshold {threshold} exceeds max steps {max_steps}")]
    ThresholdExceedsMaxSteps { threshold: usize, max_steps: usize },

    #[error("discount factor {0} must lie in [0, 1]")]
    InvalidDiscount(f64),

    #[error("invalid {name} parameters: {reason}")]
    InvalidRate { name: &'static str, reason: String },

    #[error("environment exposes {actual} actions but {expected} were configured")]
    ActionSpaceMismatch { expected: usize, actual: usize },

    #[error("environment has an empty action space")]
    EmptyActionSpace,

    #[error("observations have {obs_size} dimensions but {consumed} are binned")]
    ObservationTooNarrow { obs_size: usize, consumed: usize },

    #[error("value table shape {shape:?} does not match bucket counts {expected:?}")]
    TableShapeMismatch {
        shape: Vec<usize>,
        expected: Vec<usize>,
    },

    #[error("value table shape {shape:?} cannot hold {values} values")]
    InvalidTableShape { shape: Vec<usize>, values: usize },

    #[error("environment returned an observation of length {actual}, expected {expected}")]
    ObservationShape { expected: usize, actual: usize },

    #[error("observation dimension {dim} is NaN")]
    NanObservation { dim: usize },

    #[error("state {state:?} is outside the table shape {shape:?}")]
    StateOutOfRange { state: Vec<usize>, shape: Vec<usize> },

    #[error("action {action} is outside the action space of size {action_count}")]
    ActionOutOfRange { action: usize, action_count: usize },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl QLearnError {
    /// Whether the error was detected before any environment interaction.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::NoBinDimensions
                | Self::UnsortedBinEdges { .. }
                | Self::NonFiniteBinEdge { .. }
                | Self::NonPositiveBound { .. }
                | Self::ThresholdExceedsMaxSteps { .. }
                | Self::InvalidDiscount(_)
                | Self::InvalidRate { .. }
                | Self::ActionSpaceMismatch { .. }
                | Self::EmptyActionSpace
                | Self::ObservationTooNarrow { .. }
                | Self::TableShapeMismatch { .. }
                | Self::InvalidTableShape { .. }
        )
    }
}

/// Convenience alias for results carrying a [`QLearnError`].
pub type Result<T> = std::result::Result<T, QLearnError>;
