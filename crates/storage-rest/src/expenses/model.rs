//! Row model for the `expense_records` table.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use billfold_core::expenses::{
    CashTerms, Decision, ExpenseDetails, ExpenseRecord, Fee, InstallmentTerms, InsuranceDetails,
    OtherDetails, PropertyTaxDetails, RecordId, VehicleTaxDetails,
};

use crate::codes::{
    destination_code, parse_destination, parse_payment_choice, payment_choice_code, unknown,
};
use crate::errors::StorageError;

/// Flat snake_case row. Columns that do not apply to the category are null.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpenseRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub year: i32,
    pub category: String,
    pub description: String,
    pub payment_choice: Option<String>,
    pub destination: Option<String>,
    pub cash_value: Option<f64>,
    pub cash_due_date: Option<NaiveDate>,
    pub installment_value: Option<f64>,
    pub installment_count: Option<u32>,
    pub first_installment_date: Option<NaiveDate>,
    pub garbage_tax_cash: Option<f64>,
    pub garbage_tax_installment: Option<f64>,
    pub dpvat_value: Option<f64>,
    pub dpvat_due_date: Option<NaiveDate>,
    pub licensing_value: Option<f64>,
    pub licensing_due_date: Option<NaiveDate>,
    pub value: Option<f64>,
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ExpenseRow {
    /// Row for `record`, owned by `user_id`. Draft ids are not sent.
    pub fn encode(user_id: &str, record: &ExpenseRecord) -> Self {
        let mut row = ExpenseRow {
            id: record.id.as_persisted().map(str::to_string),
            user_id: user_id.to_string(),
            year: record.year,
            description: record.description.clone(),
            payment_choice: record
                .payment_choice()
                .map(|c| payment_choice_code(c).to_string()),
            destination: record
                .destination()
                .map(|d| destination_code(d).to_string()),
            created_at: record.created_at,
            ..Default::default()
        };

        match &record.details {
            ExpenseDetails::PropertyTax(d) => {
                row.category = "property_tax".to_string();
                row.set_terms(&d.cash, &d.installment);
                row.garbage_tax_cash = Some(d.garbage_tax_cash);
                row.garbage_tax_installment = Some(d.garbage_tax_installment);
            }
            ExpenseDetails::VehicleTax(d) => {
                row.category = "vehicle_tax".to_string();
                row.set_terms(&d.cash, &d.installment);
                row.dpvat_value = Some(d.dpvat.value);
                row.dpvat_due_date = d.dpvat.due_date;
                row.licensing_value = Some(d.licensing.value);
                row.licensing_due_date = d.licensing.due_date;
            }
            ExpenseDetails::Insurance(d) => {
                row.category = "insurance".to_string();
                row.set_terms(&d.cash, &d.installment);
            }
            ExpenseDetails::Other(d) => {
                row.category = "other".to_string();
                row.value = Some(d.value);
                row.installment_count = Some(d.installment_count);
                row.due_date = d.due_date;
            }
        }
        row
    }

    fn set_terms(&mut self, cash: &CashTerms, installment: &InstallmentTerms) {
        self.cash_value = Some(cash.value);
        self.cash_due_date = cash.due_date;
        self.installment_value = Some(installment.value);
        self.installment_count = Some(installment.count);
        self.first_installment_date = installment.first_date;
    }

    fn cash(&self) -> CashTerms {
        CashTerms {
            value: self.cash_value.unwrap_or_default(),
            due_date: self.cash_due_date,
        }
    }

    fn installment(&self) -> InstallmentTerms {
        InstallmentTerms {
            value: self.installment_value.unwrap_or_default(),
            count: self.installment_count.unwrap_or(1),
            first_date: self.first_installment_date,
        }
    }

    /// Domain record of a stored row. Rows lacking an id are rejected.
    pub fn decode(self) -> Result<ExpenseRecord, StorageError> {
        let id = self
            .id
            .clone()
            .ok_or_else(|| StorageError::Decode("expense row without id".to_string()))?;

        let details = match self.category.as_str() {
            "property_tax" => ExpenseDetails::PropertyTax(PropertyTaxDetails {
                cash: self.cash(),
                installment: self.installment(),
                garbage_tax_cash: self.garbage_tax_cash.unwrap_or_default(),
                garbage_tax_installment: self.garbage_tax_installment.unwrap_or_default(),
            }),
            "vehicle_tax" => ExpenseDetails::VehicleTax(VehicleTaxDetails {
                cash: self.cash(),
                installment: self.installment(),
                dpvat: Fee {
                    value: self.dpvat_value.unwrap_or_default(),
                    due_date: self.dpvat_due_date,
                },
                licensing: Fee {
                    value: self.licensing_value.unwrap_or_default(),
                    due_date: self.licensing_due_date,
                },
            }),
            "insurance" => ExpenseDetails::Insurance(InsuranceDetails {
                cash: self.cash(),
                installment: self.installment(),
            }),
            "other" => ExpenseDetails::Other(OtherDetails {
                value: self.value.unwrap_or_default(),
                installment_count: self.installment_count.unwrap_or(1),
                due_date: self.due_date,
            }),
            code => return Err(unknown("category", code)),
        };

        // A half-set decision is treated as undecided.
        let decision = match (self.payment_choice.as_deref(), self.destination.as_deref()) {
            (Some(choice), Some(destination)) => Some(Decision {
                payment_choice: parse_payment_choice(choice)?,
                destination: parse_destination(destination)?,
            }),
            _ => None,
        };

        let mut record = ExpenseRecord {
            id: RecordId::persisted(id),
            year: self.year,
            description: self.description,
            decision,
            details,
            created_at: self.created_at,
        };
        record.normalize();
        Ok(record)
    }
}
