//! Error types for lecture deck extraction.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur around slide deck extraction.
///
/// Block extraction and grouping themselves never fail; these cover reading
/// input and validating caller-supplied configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read the input document.
    #[error("Failed to read document: {0}")]
    IoError(#[from] std::io::Error),

    /// Grouping options are inconsistent (e.g. minimum above maximum).
    #[error("Invalid grouping options: {0}")]
    InvalidOptions(String),

    /// A layout selector could not be compiled.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}
