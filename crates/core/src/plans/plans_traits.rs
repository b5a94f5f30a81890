use async_trait::async_trait;

use crate::errors::Result;
use crate::expenses::ExpenseRecord;
use crate::plans::plans_model::SaveOutcome;

/// Trait for plan service operations
#[async_trait]
pub trait PlanServiceTrait: Send + Sync {
    /// Persisted records of one plan year, most recently created first.
    async fn load_plan(&self, user_id: &str, year: i32) -> Result<Vec<ExpenseRecord>>;

    /// Synchronizes the persisted plan of `year` with `records`, then purges
    /// years that fall outside the retention window.
    async fn save_plan(
        &self,
        user_id: &str,
        year: i32,
        records: Vec<ExpenseRecord>,
    ) -> Result<SaveOutcome>;

    /// Plan years holding records, most recent first.
    async fn list_available_years(&self, user_id: &str) -> Result<Vec<i32>>;
}
