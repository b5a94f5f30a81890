use async_trait::async_trait;

use super::balances_model::{BankAccount, BankBalance};
use crate::errors::Result;

/// Repository trait for stored bank balances, keyed by
/// `(user_id, year, month, account)`.
#[async_trait]
pub trait BalanceRepositoryTrait: Send + Sync {
    /// Stored balance of the period, `None` when no row exists.
    async fn get(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
        account: BankAccount,
    ) -> Result<Option<BankBalance>>;

    /// Inserts or replaces the balance of its period.
    async fn upsert(&self, user_id: &str, balance: BankBalance) -> Result<BankBalance>;

    async fn list_for_month(&self, user_id: &str, year: i32, month: u32)
        -> Result<Vec<BankBalance>>;
}

#[async_trait]
pub trait BalanceServiceTrait: Send + Sync {
    async fn get_balance(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
        account: BankAccount,
    ) -> Result<BankBalance>;

    async fn update_balance(&self, user_id: &str, balance: BankBalance) -> Result<BankBalance>;

    /// One balance per account, in `BankAccount::ALL` order.
    async fn month_balances(&self, user_id: &str, year: i32, month: u32)
        -> Result<Vec<BankBalance>>;
}
