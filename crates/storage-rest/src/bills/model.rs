//! Row model for the `bills` table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use billfold_core::bills::{Bill, BillCategory};

use crate::codes::{destination_code, parse_destination, unknown};
use crate::errors::StorageError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub year: i32,
    pub month: u32,
    pub category: String,
    pub description: String,
    pub value: f64,
    pub due_date: Option<NaiveDate>,
    pub destination: Option<String>,
    pub expense_id: Option<String>,
    pub plan_year: Option<i32>,
    pub installment_number: Option<u32>,
    pub total_installments: Option<u32>,
}

fn category_code(category: BillCategory) -> &'static str {
    match category {
        BillCategory::Expense => "expense",
        BillCategory::Salary => "salary",
        BillCategory::Advance => "advance",
        BillCategory::Vacation => "vacation",
        BillCategory::Thirteenth => "thirteenth",
    }
}

fn parse_category(code: &str) -> Result<BillCategory, StorageError> {
    match code {
        "expense" => Ok(BillCategory::Expense),
        "salary" => Ok(BillCategory::Salary),
        "advance" => Ok(BillCategory::Advance),
        "vacation" => Ok(BillCategory::Vacation),
        "thirteenth" => Ok(BillCategory::Thirteenth),
        _ => Err(unknown("category", code)),
    }
}

impl BillRow {
    pub fn encode(user_id: &str, bill: &Bill) -> Self {
        BillRow {
            id: bill.id.clone(),
            user_id: user_id.to_string(),
            year: bill.year,
            month: bill.month,
            category: category_code(bill.category).to_string(),
            description: bill.description.clone(),
            value: bill.amount,
            due_date: bill.due_date,
            destination: bill.destination.map(|d| destination_code(d).to_string()),
            expense_id: bill.source_expense_id.clone(),
            plan_year: bill.plan_year,
            installment_number: bill.installment_number,
            total_installments: bill.total_installments,
        }
    }

    pub fn decode(self) -> Result<Bill, StorageError> {
        Ok(Bill {
            id: self.id,
            year: self.year,
            month: self.month,
            category: parse_category(&self.category)?,
            description: self.description,
            amount: self.value,
            due_date: self.due_date,
            destination: self.destination.as_deref().map(parse_destination).transpose()?,
            source_expense_id: self.expense_id,
            plan_year: self.plan_year,
            installment_number: self.installment_number,
            total_installments: self.total_installments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billfold_core::expenses::Destination;

    #[test]
    fn test_generated_bill_row() {
        let bill = Bill {
            id: None,
            year: 2025,
            month: 2,
            category: BillCategory::Expense,
            description: "Insurance - Installment 2/4".to_string(),
            amount: 300.0,
            due_date: NaiveDate::from_ymd_opt(2025, 2, 15),
            destination: Some(Destination::FixedSecondHalf),
            source_expense_id: Some("exp-1".to_string()),
            plan_year: Some(2024),
            installment_number: Some(2),
            total_installments: Some(4),
        };
        let json = serde_json::to_value(BillRow::encode("u1", &bill)).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["category"], "expense");
        assert_eq!(json["destination"], "fixed_second");
        assert_eq!(json["expense_id"], "exp-1");
        assert_eq!(json["value"], 300.0);

        let mut row: BillRow = serde_json::from_value(json).unwrap();
        row.id = Some("b1".to_string());
        let decoded = row.decode().unwrap();
        assert_eq!(decoded.id.as_deref(), Some("b1"));
        assert_eq!(decoded.plan_year, Some(2024));
        assert_eq!(decoded.destination, Some(Destination::FixedSecondHalf));
    }

    #[test]
    fn test_income_row_without_destination() {
        let row: BillRow = serde_json::from_str(
            r#"{"id":"b2","user_id":"u1","year":2025,"month":12,"category":"thirteenth",
                "description":"Bonus","value":4200.0,"due_date":null,"destination":null,
                "expense_id":null,"plan_year":null,"installment_number":null,
                "total_installments":null}"#,
        )
        .unwrap();
        let bill = row.decode().unwrap();
        assert_eq!(bill.category, BillCategory::Thirteenth);
        assert!(bill.category.is_income());
        assert_eq!(bill.destination, None);
    }
}
