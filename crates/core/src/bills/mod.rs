//! Bills module - monthly payables generated from decided expenses, manual
//! income entries and the month overview.

mod bills_model;
mod bills_service;
mod bills_traits;
mod expansion;

#[cfg(test)]
mod bills_service_tests;
#[cfg(test)]
mod expansion_tests;

pub use bills_model::{
    income_kinds_for_month, Bill, BillCategory, BillLineItem, DestinationTotal, MonthOverview,
};
pub use bills_service::BillService;
pub use bills_traits::{BillRepositoryTrait, BillServiceTrait};
pub use expansion::expand_to_bills;
