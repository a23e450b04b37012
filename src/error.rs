//! Error types for catalog and generation operations

use thiserror::Error;

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type surfaced to the user as a notice.
///
/// Every variant is terminal to the single intent that raised it; none of
/// them abort the process.
#[derive(Error, Debug)]
pub enum Error {
    /// A required form field was left empty
    #[error("Please provide a URL, an output directory, and a file name")]
    MissingInput,

    /// An action that needs a selected catalog entry had none
    #[error("No file is selected")]
    NoSelection,

    /// QR code encoding failed (e.g. text too long for the symbol)
    #[error("Failed to encode QR code: {0}")]
    Encode(String),

    /// Image processing error
    #[error("Image error: {0}")]
    Image(String),

    /// Catalog database error
    #[error("Catalog database error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The platform could not open a file with its default handler
    #[error("Could not open file: {0}")]
    Open(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}
