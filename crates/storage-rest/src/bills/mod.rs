//! Data API storage for bills.

mod model;
mod repository;

pub use model::BillRow;
pub use repository::BillRepository;
