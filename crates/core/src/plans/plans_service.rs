use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, error, info, warn};

use super::plans_model::{diff_plan, RetentionPolicy, SaveOutcome};
use super::plans_traits::PlanServiceTrait;
use crate::errors::{PersistenceError, Result};
use crate::expenses::{validate_record, ExpenseRecord, ExpenseRepositoryTrait};

/// Service reconciling in-memory plans with the persisted ones.
pub struct PlanService {
    repository: Arc<dyn ExpenseRepositoryTrait>,
    retention: RetentionPolicy,
}

impl PlanService {
    pub fn new(repository: Arc<dyn ExpenseRepositoryTrait>, retention: RetentionPolicy) -> Self {
        PlanService {
            repository,
            retention,
        }
    }

    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    /// Removes every year older than the retention window. Failures are
    /// logged and reported as nothing purged.
    async fn purge_expired_years(&self, user_id: &str, saved_year: i32) -> usize {
        let cutoff = self.retention.oldest_retained_year(saved_year);
        match self.repository.delete_years_before(user_id, cutoff).await {
            Ok(purged) => {
                if purged > 0 {
                    debug!(
                        "Purged {} expense records older than {} for user {}",
                        purged, cutoff, user_id
                    );
                }
                purged
            }
            Err(e) => {
                warn!(
                    "Retention purge of years before {} failed for user {}: {}",
                    cutoff, user_id, e
                );
                0
            }
        }
    }
}

#[async_trait]
impl PlanServiceTrait for PlanService {
    async fn load_plan(&self, user_id: &str, year: i32) -> Result<Vec<ExpenseRecord>> {
        self.repository.list_for_year(user_id, year).await
    }

    async fn save_plan(
        &self,
        user_id: &str,
        year: i32,
        records: Vec<ExpenseRecord>,
    ) -> Result<SaveOutcome> {
        let records: Vec<ExpenseRecord> = records
            .into_iter()
            .map(|record| {
                let mut record = record.normalized();
                record.year = year;
                record
            })
            .collect();
        for record in &records {
            validate_record(record)?;
        }

        let persisted_ids = self.repository.list_ids_for_year(user_id, year).await?;
        let diff = diff_plan(&persisted_ids, records);
        debug!(
            "Saving plan {} for user {}: {} inserts, {} updates, {} deletes",
            year,
            user_id,
            diff.to_insert.len(),
            diff.to_update.len(),
            diff.to_delete.len()
        );

        let repository = &self.repository;
        let attempted = usize::from(!diff.to_insert.is_empty())
            + diff.to_update.len()
            + usize::from(!diff.to_delete.is_empty());

        let to_insert = diff.to_insert;
        let insert = async move {
            if to_insert.is_empty() {
                return Ok(0);
            }
            repository
                .insert_batch(user_id, to_insert)
                .await
                .map(|inserted| inserted.len())
        };
        let updates = join_all(
            diff.to_update
                .into_iter()
                .map(|record| repository.update_one(user_id, record)),
        );
        let to_delete = diff.to_delete;
        let delete = async move {
            if to_delete.is_empty() {
                return Ok(0);
            }
            repository.delete_batch(user_id, to_delete).await
        };

        let (inserted, updated, deleted) = futures::join!(insert, updates, delete);

        let mut messages = Vec::new();
        let inserted = inserted.unwrap_or_else(|e| {
            messages.push(format!("insert: {}", e));
            0
        });
        let mut updated_count = 0;
        for result in updated {
            match result {
                Ok(()) => updated_count += 1,
                Err(e) => messages.push(format!("update: {}", e)),
            }
        }
        let deleted = deleted.unwrap_or_else(|e| {
            messages.push(format!("delete: {}", e));
            0
        });

        if !messages.is_empty() {
            error!(
                "Saving plan {} for user {} failed: {} of {} operations failed",
                year,
                user_id,
                messages.len(),
                attempted
            );
            return Err(PersistenceError {
                failed: messages.len(),
                attempted,
                messages,
            }
            .into());
        }

        let purged = self.purge_expired_years(user_id, year).await;
        let outcome = SaveOutcome {
            inserted,
            updated: updated_count,
            deleted,
            purged,
        };
        info!(
            "Saved plan {} for user {}: {:?}",
            year, user_id, outcome
        );
        Ok(outcome)
    }

    async fn list_available_years(&self, user_id: &str) -> Result<Vec<i32>> {
        let mut years = self.repository.list_years(user_id).await?;
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        Ok(years)
    }
}
