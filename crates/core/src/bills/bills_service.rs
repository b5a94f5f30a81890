use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info};

use super::bills_model::{Bill, MonthOverview};
use super::bills_traits::{BillRepositoryTrait, BillServiceTrait};
use super::expansion::expand_to_bills;
use crate::balances::{validate_month, BalanceServiceTrait};
use crate::errors::{Error, Result};
use crate::plans::PlanServiceTrait;
use crate::utils::time_utils::elapsed_months;

pub struct BillService {
    repository: Arc<dyn BillRepositoryTrait>,
    plan_service: Arc<dyn PlanServiceTrait>,
    balance_service: Arc<dyn BalanceServiceTrait>,
}

impl BillService {
    pub fn new(
        repository: Arc<dyn BillRepositoryTrait>,
        plan_service: Arc<dyn PlanServiceTrait>,
        balance_service: Arc<dyn BalanceServiceTrait>,
    ) -> Self {
        Self {
            repository,
            plan_service,
            balance_service,
        }
    }
}

#[async_trait]
impl BillServiceTrait for BillService {
    async fn regenerate_bills(&self, user_id: &str, year: i32) -> Result<usize> {
        let records = self.plan_service.load_plan(user_id, year).await?;
        let mut bills = Vec::new();
        for record in records.iter().filter(|r| r.is_decided()) {
            bills.extend(
                expand_to_bills(record)?
                    .into_iter()
                    .map(|item| Bill::from_line_item(item, year)),
            );
        }

        let removed = self
            .repository
            .delete_generated_for_plan_year(user_id, year)
            .await?;
        debug!(
            "Removed {} bills previously generated from plan {} for user {}",
            removed, year, user_id
        );

        let count = bills.len();
        if count > 0 {
            self.repository.insert_batch(user_id, bills).await?;
        }
        info!(
            "Generated {} bills from {} expense records of plan {} for user {}",
            count,
            records.len(),
            year,
            user_id
        );
        Ok(count)
    }

    async fn load_month_bills(&self, user_id: &str, year: i32, month: u32) -> Result<Vec<Bill>> {
        validate_month(month)?;
        let mut bills = self.repository.list_month(user_id, year, month).await?;
        // Undated entries last.
        bills.sort_by_key(|b| (b.due_date.is_none(), b.due_date));
        Ok(bills)
    }

    async fn save_bill(&self, user_id: &str, bill: Bill) -> Result<Bill> {
        bill.validate()?;
        if bill.id.is_some() {
            self.repository.update_one(user_id, bill).await
        } else {
            self.repository
                .insert_batch(user_id, vec![bill])
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| Error::Unexpected("Insert returned no bill".to_string()))
        }
    }

    async fn delete_bill(&self, user_id: &str, bill_id: &str) -> Result<()> {
        self.repository.delete_one(user_id, bill_id).await
    }

    async fn available_months(
        &self,
        user_id: &str,
        year: i32,
        today: NaiveDate,
    ) -> Result<Vec<u32>> {
        let mut months = self.repository.list_months(user_id, year).await?;
        months.extend(elapsed_months(year, today));
        months.sort_unstable();
        months.dedup();
        Ok(months)
    }

    async fn month_overview(&self, user_id: &str, year: i32, month: u32) -> Result<MonthOverview> {
        let (bills, balances) = futures::try_join!(
            self.load_month_bills(user_id, year, month),
            self.balance_service.month_balances(user_id, year, month),
        )?;
        Ok(MonthOverview::build(year, month, bills, balances))
    }
}
