//! Billfold Core - Domain entities, services, and traits.
//!
//! This crate contains the planning logic for Billfold: annual expense
//! records, their valuation, the yearly plan reconciler and the expansion
//! of decided expenses into monthly bills. It is storage-agnostic and
//! defines traits that are implemented by the `storage-rest` crate.

pub mod balances;
pub mod bills;
pub mod constants;
pub mod errors;
pub mod expenses;
pub mod money;
pub mod plans;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
