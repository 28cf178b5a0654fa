//! Error types for the Engine layer.
//!
//! The Clients-bundle layer keeps its own [`crate::errors::DockerError`];
//! `EngineError` sits above it and covers the construction, plan, and state
//! failures the Engine itself can produce.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors the Engine facade can return.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Blueprint parsing or reference resolution failed at construction.
    #[error("config error: {0}")]
    Config(String),

    /// The state file was missing or malformed during `NewFromState`.
    #[error("state load error at {path}: {source}")]
    StateLoad {
        /// Path of the state file that failed to load.
        path: PathBuf,
        /// Underlying I/O or decode failure.
        #[source]
        source: StateLoadSource,
    },

    /// A provider's `Create()` returned an error; terminates `Apply` at the
    /// current group. State is still persisted.
    #[error("provider create failed: {0}")]
    ProviderCreate(String),

    /// Failure to open or write the state file.
    #[error("state persist error at {path}: {source}")]
    StatePersist {
        /// Path the state file was being written to.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Underlying causes of a [`EngineError::StateLoad`].
#[derive(Debug, Error)]
pub enum StateLoadSource {
    /// Reading the file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The file contents were not valid JSON / did not match the expected shape.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}
