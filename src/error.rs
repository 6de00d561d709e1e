//! Error types for asset generation

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for QR asset generation
#[derive(Error, Debug)]
pub enum Error {
    /// Logo asset could not be read or decoded
    #[error("Failed to load logo {}: {reason}", .path.display())]
    Logo {
        /// Path the logo was read from
        path: PathBuf,
        /// Underlying failure
        reason: String,
    },

    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// A written asset did not decode to the expected payload
    #[error("Verification of {} failed: expected {expected:?}, found {found:?}", .path.display())]
    Verification {
        /// Asset that was checked
        path: PathBuf,
        /// Payload the asset should carry
        expected: String,
        /// Payload actually decoded, if any text was found
        found: Option<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<qrcode::types::QrError> for Error {
    fn from(e: qrcode::types::QrError) -> Self {
        Error::QrEncode(e.to_string())
    }
}
