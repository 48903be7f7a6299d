//! Error types for techspec library.

use std::io;
use thiserror::Error;

/// Result type alias for techspec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while assembling or writing a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error writing or reading the OOXML zip container.
    #[error("Package error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error decoding a request payload.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Embedded image data could not be recognised.
    #[error("Image error: {0}")]
    Image(String),

    /// A document builder was driven out of order or after it was finalized.
    #[error("Invalid builder state: {0}")]
    InvalidState(String),

    /// The diagram collaborator failed to produce an image.
    #[error("Diagram rendering failed: {0}")]
    Diagram(String),

    /// Field/page-number resolution failed after all retries.
    #[error("Field update failed after {attempts} attempt(s): {message}")]
    FieldUpdate {
        /// Number of attempts made
        attempts: u32,
        /// Last failure reported by the resolver
        message: String,
    },

    /// Error during rendering (docx, Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// The request payload is structurally unusable.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::Render(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}
