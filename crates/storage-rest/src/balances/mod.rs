//! Data API storage for bank balances.

mod model;
mod repository;

pub use model::BalanceRow;
pub use repository::BalanceRepository;
