//! Editing-boundary checks for expense records.

use chrono::NaiveDate;

use super::expenses_model::{
    CashTerms, ExpenseDetails, ExpenseRecord, Fee, InstallmentTerms, PaymentChoice,
};
use crate::constants::{
    MAX_INSTALLMENTS, MAX_MONEY_VALUE, MAX_YEARS_AHEAD, MIN_INSTALLMENTS, MIN_PAYABLE_VALUE,
};
use crate::errors::{Result, ValidationError};

/// Checks the required-field and cross-field invariants of a record.
///
/// The record is expected to be normalized already, so zero amounts carry no date.
pub fn validate_record(record: &ExpenseRecord) -> Result<()> {
    if record.description.trim().is_empty() {
        return Err(ValidationError::MissingField("description".to_string()).into());
    }

    match &record.details {
        ExpenseDetails::PropertyTax(d) => {
            check_cash(&d.cash)?;
            check_installment(&d.installment)?;
            check_money("garbageTaxCash", d.garbage_tax_cash)?;
            check_money("garbageTaxInstallment", d.garbage_tax_installment)?;
        }
        ExpenseDetails::VehicleTax(d) => {
            check_cash(&d.cash)?;
            check_installment(&d.installment)?;
            check_fee("dpvatValue", "dpvatDueDate", &d.dpvat)?;
            check_fee("licensingValue", "licensingDueDate", &d.licensing)?;
        }
        ExpenseDetails::Insurance(d) => {
            check_cash(&d.cash)?;
            check_installment(&d.installment)?;
        }
        ExpenseDetails::Other(d) => {
            check_count("installmentCount", d.installment_count)?;
            check_money("value", d.value)?;
            check_dated("dueDate", d.value, d.due_date)?;
        }
    }

    if let Some(choice) = record.payment_choice() {
        check_chosen_path(record, choice)?;
    }
    Ok(())
}

/// Checks that a plan year is inside the editable window around `current_year`.
pub fn validate_plan_year(year: i32, current_year: i32, retention_years: u32) -> Result<()> {
    let window = i32::try_from(retention_years).unwrap_or(i32::MAX);
    let min = current_year.saturating_sub(window).saturating_add(1);
    let max = current_year.saturating_add(MAX_YEARS_AHEAD);
    if year < min || year > max {
        return Err(ValidationError::out_of_range("year", year).into());
    }
    Ok(())
}

fn check_chosen_path(record: &ExpenseRecord, choice: PaymentChoice) -> Result<()> {
    let (field, amount) = match (&record.details, choice) {
        (ExpenseDetails::Other(d), _) => ("value", d.value),
        (details, PaymentChoice::Cash) => (
            "cashValue",
            details.payment_terms().map_or(0.0, |(cash, _)| cash.value),
        ),
        (details, PaymentChoice::Installment) => (
            "installmentValue",
            details.payment_terms().map_or(0.0, |(_, inst)| inst.value),
        ),
    };
    if amount < MIN_PAYABLE_VALUE {
        return Err(ValidationError::out_of_range(field, amount).into());
    }
    Ok(())
}

fn check_cash(cash: &CashTerms) -> Result<()> {
    check_money("cashValue", cash.value)?;
    check_dated("cashDueDate", cash.value, cash.due_date)
}

fn check_installment(installment: &InstallmentTerms) -> Result<()> {
    check_count("installmentCount", installment.count)?;
    check_money("installmentValue", installment.value)?;
    check_dated("firstInstallmentDate", installment.value, installment.first_date)
}

fn check_fee(value_field: &str, date_field: &str, fee: &Fee) -> Result<()> {
    check_money(value_field, fee.value)?;
    check_dated(date_field, fee.value, fee.due_date)
}

fn check_money(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=MAX_MONEY_VALUE).contains(&value) {
        return Err(ValidationError::out_of_range(field, value).into());
    }
    Ok(())
}

fn check_count(field: &str, count: u32) -> Result<()> {
    if !(MIN_INSTALLMENTS..=MAX_INSTALLMENTS).contains(&count) {
        return Err(ValidationError::out_of_range(field, count).into());
    }
    Ok(())
}

fn check_dated(date_field: &str, value: f64, date: Option<NaiveDate>) -> Result<()> {
    if value != 0.0 && date.is_none() {
        return Err(ValidationError::MissingField(date_field.to_string()).into());
    }
    Ok(())
}
