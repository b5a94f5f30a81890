use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use serde::Deserialize;

use billfold_core::errors::{DatabaseError, Result};
use billfold_core::expenses::{ExpenseRecord, ExpenseRepositoryTrait};

use super::model::ExpenseRow;
use crate::client::{Order, Query, RestClient};
use crate::errors::StorageError;

const TABLE: &str = "expense_records";

#[derive(Deserialize)]
struct IdRow {
    id: String,
}

#[derive(Deserialize)]
struct YearRow {
    year: i32,
}

pub struct ExpenseRepository {
    client: Arc<RestClient>,
}

impl ExpenseRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        ExpenseRepository { client }
    }

    fn decode_rows(rows: Vec<ExpenseRow>) -> Result<Vec<ExpenseRecord>> {
        rows.into_iter()
            .map(|row| row.decode().map_err(StorageError::into))
            .collect()
    }
}

#[async_trait]
impl ExpenseRepositoryTrait for ExpenseRepository {
    async fn list_for_year(&self, user_id: &str, year: i32) -> Result<Vec<ExpenseRecord>> {
        let query = Query::new()
            .select("*")
            .eq("user_id", user_id)
            .eq("year", year)
            .order("created_at", Order::Desc);
        let rows: Vec<ExpenseRow> = self.client.select(TABLE, &query).await?;
        Self::decode_rows(rows)
    }

    async fn list_ids_for_year(&self, user_id: &str, year: i32) -> Result<Vec<String>> {
        let query = Query::new()
            .select("id")
            .eq("user_id", user_id)
            .eq("year", year);
        let rows: Vec<IdRow> = self.client.select(TABLE, &query).await?;
        Ok(rows.into_iter().map(|r| r.id).collect())
    }

    async fn list_years(&self, user_id: &str) -> Result<Vec<i32>> {
        let query = Query::new()
            .select("year")
            .eq("user_id", user_id)
            .order("year", Order::Desc);
        let rows: Vec<YearRow> = self.client.select(TABLE, &query).await?;
        let mut years: Vec<i32> = rows.into_iter().map(|r| r.year).collect();
        years.dedup();
        Ok(years)
    }

    async fn insert_batch(
        &self,
        user_id: &str,
        records: Vec<ExpenseRecord>,
    ) -> Result<Vec<ExpenseRecord>> {
        // A bulk insert requires every row to carry the same keys.
        let now = Utc::now();
        let rows: Vec<ExpenseRow> = records
            .iter()
            .map(|record| {
                let mut row = ExpenseRow::encode(user_id, record);
                row.id = None;
                row.created_at = Some(row.created_at.unwrap_or(now));
                row
            })
            .collect();
        debug!("Inserting {} expense records for user {}", rows.len(), user_id);
        let stored: Vec<ExpenseRow> = self.client.insert(TABLE, &rows).await?;
        Self::decode_rows(stored)
    }

    async fn update_one(&self, user_id: &str, record: ExpenseRecord) -> Result<()> {
        let id = record
            .id
            .as_persisted()
            .ok_or_else(|| DatabaseError::NotFound(format!("expense record {}", record.id)))?
            .to_string();
        let mut patch = ExpenseRow::encode(user_id, &record);
        patch.id = None;
        patch.created_at = None;

        let query = Query::new().eq("id", &id).eq("user_id", user_id);
        let updated: Vec<ExpenseRow> = self.client.update(TABLE, &query, &patch).await?;
        if updated.is_empty() {
            return Err(DatabaseError::NotFound(format!("expense record {}", id)).into());
        }
        Ok(())
    }

    async fn delete_batch(&self, user_id: &str, ids: Vec<String>) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }
        let query = Query::new().in_list("id", &ids).eq("user_id", user_id);
        Ok(self.client.delete(TABLE, &query).await?)
    }

    async fn delete_years_before(&self, user_id: &str, year: i32) -> Result<usize> {
        let query = Query::new().eq("user_id", user_id).lt("year", year);
        Ok(self.client.delete(TABLE, &query).await?)
    }
}
