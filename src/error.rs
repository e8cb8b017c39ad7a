//! Error types.
//!
//! Controller actions never fail: a rejected jump or crouch is simply not
//! performed. Errors only arise when loading configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to read, parse or write a [`ControllerConfig`](crate::config::ControllerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read controller config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse controller config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize controller config: {0}")]
    Serialize(#[from] ron::Error),
}
