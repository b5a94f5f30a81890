use async_trait::async_trait;

use crate::errors::Result;
use crate::expenses::expenses_model::ExpenseRecord;

/// Repository trait for persisted expense records.
///
/// Every operation is scoped to `user_id`; implementations must never read or
/// mutate rows of another user.
#[async_trait]
pub trait ExpenseRepositoryTrait: Send + Sync {
    /// Records of one plan year, most recently created first.
    async fn list_for_year(&self, user_id: &str, year: i32) -> Result<Vec<ExpenseRecord>>;

    /// Stable identifiers of the records of one plan year.
    async fn list_ids_for_year(&self, user_id: &str, year: i32) -> Result<Vec<String>>;

    /// Distinct plan years holding at least one record.
    async fn list_years(&self, user_id: &str) -> Result<Vec<i32>>;

    /// Inserts the records as one batch and returns them with their stable ids.
    async fn insert_batch(
        &self,
        user_id: &str,
        records: Vec<ExpenseRecord>,
    ) -> Result<Vec<ExpenseRecord>>;

    /// Updates one persisted record. Fails with `DatabaseError::NotFound` when
    /// the id no longer exists for this user.
    async fn update_one(&self, user_id: &str, record: ExpenseRecord) -> Result<()>;

    /// Deletes the given ids as one batch.
    async fn delete_batch(&self, user_id: &str, ids: Vec<String>) -> Result<usize>;

    /// Deletes every record whose year is strictly less than `year`.
    async fn delete_years_before(&self, user_id: &str, year: i32) -> Result<usize>;
}
