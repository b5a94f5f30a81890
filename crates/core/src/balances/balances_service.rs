use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::balances_model::{validate_month, BankAccount, BankBalance};
use super::balances_traits::{BalanceRepositoryTrait, BalanceServiceTrait};
use crate::errors::Result;

pub struct BalanceService {
    repository: Arc<dyn BalanceRepositoryTrait>,
}

impl BalanceService {
    pub fn new(repository: Arc<dyn BalanceRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl BalanceServiceTrait for BalanceService {
    async fn get_balance(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
        account: BankAccount,
    ) -> Result<BankBalance> {
        validate_month(month)?;
        let stored = self.repository.get(user_id, year, month, account).await?;
        Ok(stored.unwrap_or_else(|| BankBalance::zero(year, month, account)))
    }

    async fn update_balance(&self, user_id: &str, balance: BankBalance) -> Result<BankBalance> {
        balance.validate()?;
        debug!(
            "Updating {} balance of {}-{:02} for user {}",
            balance.account, balance.year, balance.month, user_id
        );
        self.repository.upsert(user_id, balance).await
    }

    async fn month_balances(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<BankBalance>> {
        validate_month(month)?;
        let stored = self.repository.list_for_month(user_id, year, month).await?;
        Ok(BankAccount::ALL
            .iter()
            .map(|account| {
                stored
                    .iter()
                    .find(|b| b.account == *account)
                    .copied()
                    .unwrap_or_else(|| BankBalance::zero(year, month, *account))
            })
            .collect())
    }
}
