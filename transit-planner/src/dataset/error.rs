//! Dataset loading error types.

use std::path::PathBuf;

/// Errors that can occur when reading a dataset snapshot.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// File could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON of the expected shape
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// File parsed but carried no usable rows
    #[error("dataset is empty")]
    Empty,

    /// Reload requested for a network that was not loaded from a file
    #[error("network has no dataset source to reload from")]
    NoSource,
}
