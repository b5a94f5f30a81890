use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use billfold_core::bills::{Bill, BillRepositoryTrait};
use billfold_core::errors::{DatabaseError, Result};

use super::model::BillRow;
use crate::client::{Order, Query, RestClient};
use crate::errors::StorageError;

const TABLE: &str = "bills";

#[derive(Deserialize)]
struct MonthRow {
    month: u32,
}

pub struct BillRepository {
    client: Arc<RestClient>,
}

impl BillRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        BillRepository { client }
    }

    fn decode_rows(rows: Vec<BillRow>) -> Result<Vec<Bill>> {
        rows.into_iter()
            .map(|row| row.decode().map_err(StorageError::into))
            .collect()
    }
}

#[async_trait]
impl BillRepositoryTrait for BillRepository {
    async fn list_month(&self, user_id: &str, year: i32, month: u32) -> Result<Vec<Bill>> {
        let query = Query::new()
            .select("*")
            .eq("user_id", user_id)
            .eq("year", year)
            .eq("month", month)
            .order("due_date", Order::Asc);
        let rows: Vec<BillRow> = self.client.select(TABLE, &query).await?;
        Self::decode_rows(rows)
    }

    async fn list_months(&self, user_id: &str, year: i32) -> Result<Vec<u32>> {
        let query = Query::new()
            .select("month")
            .eq("user_id", user_id)
            .eq("year", year)
            .order("month", Order::Asc);
        let rows: Vec<MonthRow> = self.client.select(TABLE, &query).await?;
        let mut months: Vec<u32> = rows.into_iter().map(|r| r.month).collect();
        months.dedup();
        Ok(months)
    }

    async fn insert_batch(&self, user_id: &str, bills: Vec<Bill>) -> Result<Vec<Bill>> {
        let rows: Vec<BillRow> = bills
            .iter()
            .map(|bill| BillRow::encode(user_id, bill))
            .collect();
        debug!("Inserting {} bills for user {}", rows.len(), user_id);
        let stored: Vec<BillRow> = self.client.insert(TABLE, &rows).await?;
        Self::decode_rows(stored)
    }

    async fn update_one(&self, user_id: &str, bill: Bill) -> Result<Bill> {
        let id = bill
            .id
            .clone()
            .ok_or_else(|| DatabaseError::NotFound("bill without id".to_string()))?;
        let mut patch = BillRow::encode(user_id, &bill);
        patch.id = None;

        let query = Query::new().eq("id", &id).eq("user_id", user_id);
        let updated: Vec<BillRow> = self.client.update(TABLE, &query, &patch).await?;
        match updated.into_iter().next() {
            Some(row) => Ok(row.decode()?),
            None => Err(DatabaseError::NotFound(format!("bill {}", id)).into()),
        }
    }

    async fn delete_one(&self, user_id: &str, bill_id: &str) -> Result<()> {
        let query = Query::new().eq("id", bill_id).eq("user_id", user_id);
        let deleted = self.client.delete(TABLE, &query).await?;
        if deleted == 0 {
            return Err(DatabaseError::NotFound(format!("bill {}", bill_id)).into());
        }
        Ok(())
    }

    async fn delete_generated_for_plan_year(
        &self,
        user_id: &str,
        plan_year: i32,
    ) -> Result<usize> {
        let query = Query::new()
            .eq("user_id", user_id)
            .eq("plan_year", plan_year);
        Ok(self.client.delete(TABLE, &query).await?)
    }
}
