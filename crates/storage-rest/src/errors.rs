//! Storage-specific error types for the data API.
//!
//! Errors raised while talking to the API are converted to the
//! transport-agnostic error types defined in `billfold_core`.

use billfold_core::errors::{DatabaseError, Error};
use thiserror::Error;

/// PostgREST code for "the result contains 0 rows" on single-object requests.
pub const NO_ROWS_CODE: &str = "PGRST116";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl StorageError {
    /// True when the API reported that a single-object request matched no row.
    pub fn is_no_rows(&self) -> bool {
        matches!(self, StorageError::Api { code: Some(code), .. } if code == NO_ROWS_CODE)
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Request(e) if e.is_connect() || e.is_timeout() => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::Request(e) => Error::Database(DatabaseError::QueryFailed(e.to_string())),
            StorageError::Api {
                status,
                code,
                message,
            } => {
                let detail = format!("API error {}: {}", status, message);
                if status == 404 || code.as_deref() == Some(NO_ROWS_CODE) {
                    Error::Database(DatabaseError::NotFound(detail))
                } else {
                    Error::Database(DatabaseError::QueryFailed(detail))
                }
            }
            StorageError::Decode(e) => Error::Database(DatabaseError::Decode(e)),
            StorageError::InvalidConfig(e) => Error::Database(DatabaseError::Internal(e)),
        }
    }
}
