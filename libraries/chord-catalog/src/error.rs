//! Error types for the catalog client.

use thiserror::Error;

/// Errors that can occur when talking to the catalog service.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Catalog returned an error response
    #[error("Catalog error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Invalid catalog URL
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a catalog response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Catalog is offline or unreachable
    #[error("Catalog unreachable: {0}")]
    Unreachable(String),
}

/// Result type for catalog client operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

impl From<CatalogError> for chord_core::ChordError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Request(e) => chord_core::ChordError::network(e.to_string()),
            CatalogError::Unreachable(msg) => chord_core::ChordError::network(msg),
            CatalogError::InvalidUrl(msg) => chord_core::ChordError::invalid_input(msg),
            CatalogError::Server { .. } | CatalogError::Parse(_) => {
                chord_core::ChordError::catalog(err.to_string())
            }
        }
    }
}
