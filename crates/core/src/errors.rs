//! Core error types for the Billfold application.
//!
//! This module defines storage-agnostic error types. Transport-specific errors
//! (HTTP, JSON decoding, etc.) are converted to these types by the storage layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the planning application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Saving the plan failed: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Storage-agnostic error type for a single repository round-trip.
///
/// Every detail is carried as a `String` so that the storage layer can map
/// its own errors (HTTP status, response bodies, decoding failures) into it.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The data API could not be reached.
    #[error("Failed to connect to the data API: {0}")]
    ConnectionFailed(String),

    /// A request was rejected or failed to execute.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found (or no longer belongs to the user).
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A row returned by the data API could not be decoded into a domain value.
    #[error("Failed to decode row: {0}")]
    Decode(String),

    /// Internal/unexpected storage error.
    #[error("Internal storage error: {0}")]
    Internal(String),
}

/// Aggregate failure of a plan save.
///
/// Sub-operations that completed before or alongside the failing ones stay
/// applied; only the count and the messages of the failures are reported.
#[derive(Error, Debug)]
#[error("{failed} of {attempted} operations failed: {}", .messages.join("; "))]
pub struct PersistenceError {
    pub failed: usize,
    pub attempted: usize,
    pub messages: Vec<String>,
}

/// Validation errors for user input and record invariants.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Field '{field}' is out of range: {value}")]
    OutOfRange { field: String, value: String },
}

impl ValidationError {
    pub(crate) fn out_of_range(field: &str, value: impl ToString) -> Self {
        ValidationError::OutOfRange {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}
