//! Data API storage for expense records.

mod model;
mod repository;

pub use model::ExpenseRow;
pub use repository::ExpenseRepository;
