//! Error types for the classfold pipeline.

use std::path::PathBuf;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from the cover engine.
    #[error(transparent)]
    Core(#[from] classfold_core::Error),

    /// Error from the stylesheet collaborator.
    #[error(transparent)]
    Style(#[from] classfold_style::Error),

    /// Error from the markup collaborator.
    #[error(transparent)]
    Markup(#[from] classfold_markup::Error),

    /// File I/O error.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid or unreadable configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A generated class name is already used by the document.
    #[error("Generated class '{class}' is already used outside the {namespace} namespace")]
    NameCollision { class: String, namespace: String },
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
