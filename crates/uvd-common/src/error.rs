//! Error types for sundose services.

use thiserror::Error;

/// Result type alias using UvdError.
pub type UvdResult<T> = Result<T, UvdError>;

/// Primary error type for tile and estimate operations.
#[derive(Debug, Error)]
pub enum UvdError {
    // === Request validation errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Tile out of range: {0}")]
    TileOutOfRange(String),

    #[error("Unknown dataset: {0}")]
    DatasetNotFound(String),

    #[error("Requested format not supported: {0}")]
    UnsupportedFormat(String),

    // === Data errors ===
    #[error("Invalid NetCDF data: {0}")]
    NetCdfError(String),

    #[error("Provider not initialized: {0}")]
    ProviderUnavailable(String),

    // === Storage errors ===
    #[error("Storage error: {0}")]
    StorageError(String),

    // === Infrastructure errors ===
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl UvdError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            UvdError::InvalidParameter { .. }
            | UvdError::TileOutOfRange(_)
            | UvdError::UnsupportedFormat(_) => 400,

            UvdError::DatasetNotFound(_) => 404,

            UvdError::ProviderUnavailable(_) => 503,

            _ => 500,
        }
    }

    /// Short machine-readable code used in the JSON error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            UvdError::InvalidParameter { .. } => "InvalidParameter",
            UvdError::TileOutOfRange(_) => "TileOutOfRange",
            UvdError::DatasetNotFound(_) => "DatasetNotFound",
            UvdError::UnsupportedFormat(_) => "UnsupportedFormat",
            UvdError::NetCdfError(_) => "NetCdfError",
            UvdError::ProviderUnavailable(_) => "ProviderUnavailable",
            UvdError::StorageError(_) => "StorageError",
            UvdError::InternalError(_) => "InternalError",
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for UvdError {
    fn from(err: std::io::Error) -> Self {
        UvdError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for UvdError {
    fn from(err: serde_json::Error) -> Self {
        UvdError::InternalError(format!("JSON error: {}", err))
    }
}
