//! Error types for markup handling.

use std::path::PathBuf;

/// Result type alias for markup operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Markup could not be tokenized.
    #[error("Markup parse error at byte {position}: {message}")]
    Parse { position: u64, message: String },

    /// The document could not be written back.
    #[error("Failed to serialize markup: {0}")]
    Serialize(String),

    /// File I/O error.
    #[error("Failed to read document '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a parse error.
    pub fn parse(position: u64, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    /// Create a serialization error.
    pub fn serialize(message: impl Into<String>) -> Self {
        Self::Serialize(message.into())
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
