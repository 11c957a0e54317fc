use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failures reading from a [`ConditionStore`](super::ConditionStore).
///
/// These never leave the repository: every variant ends in the built-in
/// fallback set.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read condition store at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse condition store at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("condition store unavailable: {0}")]
    Unavailable(String),

    #[error("condition store read timed out after {0:?}")]
    Timeout(Duration),
}

pub type StoreResult<T> = Result<T, StoreError>;
