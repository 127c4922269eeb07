//! Error types for textpost library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for textpost operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types surfaced by the collaborators around the parse pipeline.
///
/// Parsing, segmentation, layout resolution and highlighting never fail;
/// only I/O, import, export and rasterization steps return these.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A markdown file could not be imported into the document.
    #[error("Failed to import '{}': {reason}", path.display())]
    ImportFailed {
        /// Path of the file being imported
        path: PathBuf,
        /// Human-readable cause
        reason: String,
    },

    /// The rasterizer could not produce an image for a post.
    #[error("Rasterization of post {} failed: {reason}", index + 1)]
    RasterizationFailed {
        /// Zero-based post index
        index: usize,
        /// Human-readable cause
        reason: String,
    },

    /// An export event arrived in a state that cannot accept it.
    #[error("Invalid export transition: {event} while {state}")]
    InvalidTransition {
        /// State the session was in
        state: String,
        /// Event that was rejected
        event: String,
    },

    /// Post index is out of range.
    #[error("Post {0} is out of range (document has {1} posts)")]
    PostOutOfRange(usize, usize),

    /// Error during rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build an [`Error::ImportFailed`] for `path`.
    pub fn import_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::ImportFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the caller can retry or continue after this error.
    ///
    /// Every error kind leaves the in-memory document untouched, so only
    /// transition errors (a driver bug) are considered unrecoverable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::InvalidTransition { .. })
    }
}
