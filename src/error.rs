//! Error types for card_price_checker

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for collection and pricing operations
#[derive(Debug, Error)]
pub enum CheckerError {
    /// Input collection file does not exist
    #[error("File \"{}\" could not be found", .0.display())]
    NotFound(PathBuf),

    /// A line did not match the expected record layout
    #[error("Wrong text format (line: {line}): \"{raw}\"")]
    MalformedLine { line: usize, raw: String },

    /// Quantity is all digits but too large to count
    #[error("Quantity out of range (line: {line}): \"{raw}\"")]
    QuantityOutOfRange { line: usize, raw: String },

    /// A line or collection total does not fit the amount type
    #[error("Amount too large while pricing \"{0}\"")]
    AmountOverflow(String),

    /// Refusing to overwrite an existing output file
    #[error("File {} already exists", .0.display())]
    AlreadyExists(PathBuf),

    /// Card not found on Scryfall
    #[error("Card \"{0}\" could not be found")]
    CardNotFound(String),

    /// Scryfall returned a price that is not a decimal number
    #[error("Invalid price \"{raw}\" for card \"{name}\"")]
    InvalidPrice { name: String, raw: String },

    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// Failed to parse JSON response
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CheckerError {
    /// Whether a failed lookup is worth repeating (network trouble, throttling, server errors).
    ///
    /// Responses that cannot be decoded fail the same way every time and are not repeated.
    pub fn is_transient(&self) -> bool {
        match self {
            CheckerError::Network(e) => !e.is_decode(),
            CheckerError::HttpStatus(status) => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

/// Result alias for card_price_checker operations
pub type Result<T> = std::result::Result<T, CheckerError>;
