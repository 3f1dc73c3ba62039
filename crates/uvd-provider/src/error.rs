//! Provider error types.

use thiserror::Error;
use uvd_common::UvdError;

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors raised while opening or reading a climatology archive.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Archive not found: {0}")]
    NotFound(String),

    #[error("Invalid NetCDF format: {0}")]
    InvalidFormat(String),

    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ProviderError> for UvdError {
    fn from(err: ProviderError) -> Self {
        UvdError::NetCdfError(err.to_string())
    }
}
