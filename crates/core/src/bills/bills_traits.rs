use async_trait::async_trait;
use chrono::NaiveDate;

use super::bills_model::{Bill, MonthOverview};
use crate::errors::Result;

/// Repository trait for stored bills. Every operation is scoped to `user_id`.
#[async_trait]
pub trait BillRepositoryTrait: Send + Sync {
    /// Bills of one month, ordered by due date.
    async fn list_month(&self, user_id: &str, year: i32, month: u32) -> Result<Vec<Bill>>;

    /// Months of `year` holding at least one bill.
    async fn list_months(&self, user_id: &str, year: i32) -> Result<Vec<u32>>;

    async fn insert_batch(&self, user_id: &str, bills: Vec<Bill>) -> Result<Vec<Bill>>;

    /// Fails with `DatabaseError::NotFound` when the bill does not exist for this user.
    async fn update_one(&self, user_id: &str, bill: Bill) -> Result<Bill>;

    /// Fails with `DatabaseError::NotFound` when the bill does not exist for this user.
    async fn delete_one(&self, user_id: &str, bill_id: &str) -> Result<()>;

    /// Deletes the bills generated by a plan year, leaving manual entries untouched.
    async fn delete_generated_for_plan_year(&self, user_id: &str, plan_year: i32)
        -> Result<usize>;
}

#[async_trait]
pub trait BillServiceTrait: Send + Sync {
    /// Replaces the bills generated from the plan of `year`. Returns the number of
    /// generated bills.
    async fn regenerate_bills(&self, user_id: &str, year: i32) -> Result<usize>;

    async fn load_month_bills(&self, user_id: &str, year: i32, month: u32) -> Result<Vec<Bill>>;

    /// Inserts a bill without id, updates it otherwise.
    async fn save_bill(&self, user_id: &str, bill: Bill) -> Result<Bill>;

    async fn delete_bill(&self, user_id: &str, bill_id: &str) -> Result<()>;

    /// Months with bills merged with the months of `year` already started at `today`.
    async fn available_months(&self, user_id: &str, year: i32, today: NaiveDate)
        -> Result<Vec<u32>>;

    async fn month_overview(&self, user_id: &str, year: i32, month: u32)
        -> Result<MonthOverview>;
}
