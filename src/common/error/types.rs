use std::path::PathBuf;
use thiserror::Error;

/// Main error type for slidesmith operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Content table could not be read or parsed
    #[error("Content error: {0}")]
    Content(String),

    /// Output file exists and the overwrite policy forbids replacing it
    #[error("Output file already exists: {}", .0.display())]
    OutputExists(PathBuf),

    /// Requested slide layout does not exist
    #[error("Slide layout {index} not found ({available} layouts available)")]
    LayoutNotFound { index: usize, available: usize },

    /// Slide has no placeholder matching the request
    #[error("Placeholder not found: {0}")]
    PlaceholderNotFound(String),

    /// Invalid file format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Package part or relationship not found
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    XmlError(String),

    /// Invalid content type
    #[error("Invalid content type: expected {expected}, got {got}")]
    InvalidContentType { expected: String, got: String },

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for slidesmith operations.
pub type Result<T> = std::result::Result<T, Error>;
