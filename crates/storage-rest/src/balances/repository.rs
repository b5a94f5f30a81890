use std::sync::Arc;

use async_trait::async_trait;

use billfold_core::balances::{BalanceRepositoryTrait, BankAccount, BankBalance};
use billfold_core::errors::{DatabaseError, Result};

use super::model::{BalanceRow, BALANCE_KEY};
use crate::client::{Query, RestClient};
use crate::errors::StorageError;

const TABLE: &str = "bank_balances";

pub struct BalanceRepository {
    client: Arc<RestClient>,
}

impl BalanceRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        BalanceRepository { client }
    }
}

#[async_trait]
impl BalanceRepositoryTrait for BalanceRepository {
    async fn get(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
        account: BankAccount,
    ) -> Result<Option<BankBalance>> {
        let query = Query::new()
            .select("*")
            .eq("user_id", user_id)
            .eq("year", year)
            .eq("month", month)
            .eq("account", account);
        let row: Option<BalanceRow> = self.client.select_single(TABLE, &query).await?;
        Ok(row.map(BalanceRow::decode).transpose()?)
    }

    async fn upsert(&self, user_id: &str, balance: BankBalance) -> Result<BankBalance> {
        let row = BalanceRow::encode(user_id, &balance);
        let stored: Vec<BalanceRow> = self
            .client
            .upsert(TABLE, BALANCE_KEY, std::slice::from_ref(&row))
            .await?;
        match stored.into_iter().next() {
            Some(row) => Ok(row.decode()?),
            None => Err(DatabaseError::QueryFailed(
                "upsert returned no balance row".to_string(),
            )
            .into()),
        }
    }

    async fn list_for_month(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<BankBalance>> {
        let query = Query::new()
            .select("*")
            .eq("user_id", user_id)
            .eq("year", year)
            .eq("month", month);
        let rows: Vec<BalanceRow> = self.client.select(TABLE, &query).await?;
        rows.into_iter()
            .map(|row| row.decode().map_err(StorageError::into))
            .collect()
    }
}
