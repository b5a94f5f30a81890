//! Record builders shared by the unit tests of this crate.

use chrono::NaiveDate;

use crate::expenses::{
    CashTerms, ExpenseDetails, ExpenseRecord, Fee, InstallmentTerms, InsuranceDetails,
    OtherDetails, PropertyTaxDetails, RecordId, VehicleTaxDetails,
};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn property_tax(
    cash_value: f64,
    garbage_tax_cash: f64,
    installment_value: f64,
    garbage_tax_installment: f64,
    count: u32,
) -> ExpenseRecord {
    ExpenseRecord::new(
        2025,
        "House",
        ExpenseDetails::PropertyTax(PropertyTaxDetails {
            cash: CashTerms {
                value: cash_value,
                due_date: Some(date(2025, 2, 10)),
            },
            installment: InstallmentTerms {
                value: installment_value,
                count,
                first_date: Some(date(2025, 2, 10)),
            },
            garbage_tax_cash,
            garbage_tax_installment,
        }),
    )
}

pub fn vehicle_tax(cash_value: f64, installment_value: f64, count: u32) -> ExpenseRecord {
    ExpenseRecord::new(
        2025,
        "Car",
        ExpenseDetails::VehicleTax(VehicleTaxDetails {
            cash: CashTerms {
                value: cash_value,
                due_date: Some(date(2025, 1, 20)),
            },
            installment: InstallmentTerms {
                value: installment_value,
                count,
                first_date: Some(date(2025, 1, 20)),
            },
            dpvat: Fee::default(),
            licensing: Fee::default(),
        }),
    )
}

pub fn insurance(cash_value: f64, installment_value: f64, count: u32) -> ExpenseRecord {
    ExpenseRecord::new(
        2025,
        "Insurance",
        ExpenseDetails::Insurance(InsuranceDetails {
            cash: CashTerms {
                value: cash_value,
                due_date: Some(date(2025, 3, 5)),
            },
            installment: InstallmentTerms {
                value: installment_value,
                count,
                first_date: Some(date(2025, 3, 5)),
            },
        }),
    )
}

pub fn other(value: f64, installment_count: u32, due_date: NaiveDate) -> ExpenseRecord {
    ExpenseRecord::new(
        2025,
        "Gym",
        ExpenseDetails::Other(OtherDetails {
            value,
            installment_count,
            due_date: Some(due_date),
        }),
    )
}

pub fn persisted(mut record: ExpenseRecord, id: &str) -> ExpenseRecord {
    record.id = RecordId::persisted(id);
    record
}
