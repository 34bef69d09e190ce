use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a whole batch. Failures inside a single attempt are
/// reported per attempt instead.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("a batch needs at least one attempt")]
    NoAttempts,

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to create step log directory {}: {source}", path.display())]
    LogDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, BatchError>;
