//! Bill domain models.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::balances::{validate_month, BankBalance};
use crate::constants::MAX_MONEY_VALUE;
use crate::errors::{Result, ValidationError};
use crate::expenses::{Destination, RecordId};
use crate::money::to_amount;

/// One dated, month-bucketed payable derived from a decided expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLineItem {
    pub source_expense_id: RecordId,
    /// Calendar bucket of `due_date`.
    pub year: i32,
    pub month: u32,
    pub description: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub destination: Destination,
    /// Set only on lines that are one of several installments.
    pub installment_number: Option<u32>,
    pub total_installments: Option<u32>,
}

impl BillLineItem {
    pub fn new(
        source_expense_id: RecordId,
        description: String,
        amount: f64,
        due_date: NaiveDate,
        destination: Destination,
    ) -> Self {
        Self {
            source_expense_id,
            year: due_date.year(),
            month: due_date.month(),
            description,
            amount,
            due_date,
            destination,
            installment_number: None,
            total_installments: None,
        }
    }

    pub fn with_installment(mut self, number: u32, total: u32) -> Self {
        self.installment_number = Some(number);
        self.total_installments = Some(total);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BillCategory {
    /// Generated from a decided expense record.
    Expense,
    Salary,
    Advance,
    Vacation,
    /// Year-end bonus salary.
    Thirteenth,
}

impl BillCategory {
    pub fn is_income(&self) -> bool {
        !matches!(self, BillCategory::Expense)
    }
}

/// Income kinds that can be entered in `month`.
pub fn income_kinds_for_month(month: u32) -> Vec<BillCategory> {
    let mut kinds = vec![BillCategory::Salary, BillCategory::Advance];
    if month == 1 || month == 7 {
        kinds.push(BillCategory::Vacation);
    }
    if month == 11 || month == 12 {
        kinds.push(BillCategory::Thirteenth);
    }
    kinds
}

/// A stored entry of the monthly view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// `None` until stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub year: i32,
    pub month: u32,
    pub category: BillCategory,
    pub description: String,
    pub amount: f64,
    pub due_date: Option<NaiveDate>,
    pub destination: Option<Destination>,
    /// Back-reference to the expense a generated bill came from.
    pub source_expense_id: Option<String>,
    /// Plan year whose regeneration owns this bill.
    pub plan_year: Option<i32>,
    pub installment_number: Option<u32>,
    pub total_installments: Option<u32>,
}

impl Bill {
    /// Stored form of a generated line item.
    pub fn from_line_item(item: BillLineItem, plan_year: i32) -> Self {
        Self {
            id: None,
            year: item.year,
            month: item.month,
            category: BillCategory::Expense,
            description: item.description,
            amount: item.amount,
            due_date: Some(item.due_date),
            destination: Some(item.destination),
            source_expense_id: item.source_expense_id.as_persisted().map(str::to_string),
            plan_year: Some(plan_year),
            installment_number: item.installment_number,
            total_installments: item.total_installments,
        }
    }

    pub fn is_generated(&self) -> bool {
        self.plan_year.is_some()
    }

    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingField("description".to_string()).into());
        }
        validate_month(self.month)?;
        if !self.amount.is_finite() || !(0.0..=MAX_MONEY_VALUE).contains(&self.amount) {
            return Err(ValidationError::out_of_range("amount", self.amount).into());
        }
        if self.category.is_income() && !income_kinds_for_month(self.month).contains(&self.category)
        {
            return Err(ValidationError::InvalidInput(format!(
                "{:?} income cannot be entered in month {}",
                self.category, self.month
            ))
            .into());
        }
        if let Some(due_date) = self.due_date {
            if (due_date.year(), due_date.month()) != (self.year, self.month) {
                return Err(ValidationError::InvalidInput(format!(
                    "Due date {} is outside {}-{:02}",
                    due_date, self.year, self.month
                ))
                .into());
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationTotal {
    pub destination: Destination,
    pub total: f64,
}

/// Everything the monthly view shows for one `(year, month)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthOverview {
    pub year: i32,
    pub month: u32,
    pub bills: Vec<Bill>,
    pub balances: Vec<BankBalance>,
    pub income_kinds: Vec<BillCategory>,
    pub income_total: f64,
    pub expense_total: f64,
    /// Expense totals per destination, in `Destination::ALL` order, zero totals omitted.
    pub destination_totals: Vec<DestinationTotal>,
    /// Sum of the balances plus income minus expenses.
    pub projected_balance: f64,
}

impl MonthOverview {
    pub fn build(year: i32, month: u32, bills: Vec<Bill>, balances: Vec<BankBalance>) -> Self {
        let income_total = to_amount(
            bills
                .iter()
                .filter(|b| b.category.is_income())
                .map(|b| b.amount)
                .sum::<f64>(),
        );
        let expense_total = to_amount(
            bills
                .iter()
                .filter(|b| !b.category.is_income())
                .map(|b| b.amount)
                .sum::<f64>(),
        );
        let destination_totals = Destination::ALL
            .iter()
            .filter_map(|destination| {
                let total: f64 = bills
                    .iter()
                    .filter(|b| !b.category.is_income() && b.destination == Some(*destination))
                    .map(|b| b.amount)
                    .sum();
                (total != 0.0).then(|| DestinationTotal {
                    destination: *destination,
                    total: to_amount(total),
                })
            })
            .collect();
        let balance_total: f64 = balances.iter().map(|b| b.balance).sum();
        let projected_balance = to_amount(balance_total + income_total - expense_total);

        Self {
            year,
            month,
            bills,
            balances,
            income_kinds: income_kinds_for_month(month),
            income_total,
            expense_total,
            destination_totals,
            projected_balance,
        }
    }
}
