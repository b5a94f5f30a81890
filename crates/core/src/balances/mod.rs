//! Balances module - per-month bank account balances.

mod balances_model;
mod balances_service;
mod balances_traits;

#[cfg(test)]
mod balances_service_tests;

pub(crate) use balances_model::validate_month;
pub use balances_model::{BankAccount, BankBalance};
pub use balances_service::BalanceService;
pub use balances_traits::{BalanceRepositoryTrait, BalanceServiceTrait};
