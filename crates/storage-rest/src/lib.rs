//! Hosted data API storage implementation for Billfold.
//!
//! This crate implements the repository traits defined in `billfold-core`
//! against a PostgREST-style relational API over HTTPS. It contains:
//! - A shared HTTP client with the filter/query conventions of the API
//! - Row types in the snake_case shape of the remote tables
//! - The encode/decode pair between rows and domain values
//!
//! ```text
//!       core (domain)
//!            │
//!            ▼
//!   storage-rest (this crate)
//!            │  HTTPS + JSON
//!            ▼
//!        data API
//! ```

pub mod client;
mod codes;
pub mod errors;

// Repository implementations
pub mod balances;
pub mod bills;
pub mod expenses;

pub use client::{Order, Query, RestClient, DEFAULT_TIMEOUT};
pub use errors::StorageError;

// Re-export from billfold-core for convenience
pub use billfold_core::errors::{DatabaseError, Error, Result};
