//! Expansion of decided expense records into monthly bill line items.

use chrono::NaiveDate;

use super::bills_model::BillLineItem;
use crate::errors::{Result, ValidationError};
use crate::expenses::{
    CashTerms, Destination, ExpenseDetails, ExpenseRecord, Fee, FeeKind, InstallmentTerms,
    PaymentChoice,
};
use crate::utils::time_utils::add_months;

/// Produces the bill line items of one record.
///
/// Undecided records produce nothing. Each line is bucketed by its own due
/// date, so an installment plan can spill into the following calendar year.
pub fn expand_to_bills(record: &ExpenseRecord) -> Result<Vec<BillLineItem>> {
    let Some(decision) = record.decision else {
        return Ok(Vec::new());
    };
    let expander = Expander {
        record,
        destination: decision.destination,
    };
    let is_cash = decision.payment_choice == PaymentChoice::Cash;
    let mut items = Vec::new();

    match &record.details {
        ExpenseDetails::PropertyTax(d) => {
            if is_cash {
                let label = record.category().label();
                let due = expander.cash_line(&mut items, &d.cash, Some(label))?;
                items.push(expander.line("Garbage Tax", d.garbage_tax_cash, due));
            } else {
                let first = expander.installment_lines(&mut items, &d.installment)?;
                if d.garbage_tax_installment != 0.0 {
                    items.push(expander.line("Garbage Tax", d.garbage_tax_installment, first));
                }
            }
        }
        ExpenseDetails::VehicleTax(d) => {
            if is_cash {
                expander.cash_line(&mut items, &d.cash, Some(record.category().label()))?;
            } else {
                expander.installment_lines(&mut items, &d.installment)?;
            }
            expander.fee_line(&mut items, FeeKind::Dpvat, "dpvatDueDate", &d.dpvat)?;
            expander.fee_line(&mut items, FeeKind::Licensing, "licensingDueDate", &d.licensing)?;
        }
        ExpenseDetails::Insurance(d) => {
            if is_cash {
                expander.cash_line(&mut items, &d.cash, None)?;
            } else {
                expander.installment_lines(&mut items, &d.installment)?;
            }
        }
        ExpenseDetails::Other(d) => {
            let due = d
                .due_date
                .ok_or_else(|| ValidationError::MissingField("dueDate".to_string()))?;
            if d.installment_count <= 1 {
                items.push(BillLineItem::new(
                    record.id.clone(),
                    record.description.clone(),
                    d.value,
                    due,
                    decision.destination,
                ));
            } else {
                expander.installment_lines(
                    &mut items,
                    &InstallmentTerms {
                        value: d.value,
                        count: d.installment_count,
                        first_date: Some(due),
                    },
                )?;
            }
        }
    }
    Ok(items)
}

struct Expander<'a> {
    record: &'a ExpenseRecord,
    destination: Destination,
}

impl Expander<'_> {
    fn line(&self, label: &str, amount: f64, due: NaiveDate) -> BillLineItem {
        BillLineItem::new(
            self.record.id.clone(),
            format!("{} - {}", self.record.description, label),
            amount,
            due,
            self.destination,
        )
    }

    /// Pushes the single cash line and returns its due date.
    fn cash_line(
        &self,
        items: &mut Vec<BillLineItem>,
        cash: &CashTerms,
        label: Option<&str>,
    ) -> Result<NaiveDate> {
        let due = cash
            .due_date
            .ok_or_else(|| ValidationError::MissingField("cashDueDate".to_string()))?;
        items.push(match label {
            Some(label) => self.line(label, cash.value, due),
            None => BillLineItem::new(
                self.record.id.clone(),
                self.record.description.clone(),
                cash.value,
                due,
                self.destination,
            ),
        });
        Ok(due)
    }

    /// Pushes one line per installment, a calendar month apart, and returns
    /// the first due date.
    fn installment_lines(
        &self,
        items: &mut Vec<BillLineItem>,
        terms: &InstallmentTerms,
    ) -> Result<NaiveDate> {
        let first = terms
            .first_date
            .ok_or_else(|| ValidationError::MissingField("firstInstallmentDate".to_string()))?;
        for offset in 0..terms.count {
            let due = add_months(first, offset).ok_or_else(|| {
                ValidationError::out_of_range("firstInstallmentDate", first)
            })?;
            let number = offset + 1;
            let label = format!("Installment {}/{}", number, terms.count);
            items.push(
                self.line(&label, terms.value, due)
                    .with_installment(number, terms.count),
            );
        }
        Ok(first)
    }

    fn fee_line(
        &self,
        items: &mut Vec<BillLineItem>,
        kind: FeeKind,
        date_field: &str,
        fee: &Fee,
    ) -> Result<()> {
        if !fee.is_applicable() {
            return Ok(());
        }
        let due = fee
            .due_date
            .ok_or_else(|| ValidationError::MissingField(date_field.to_string()))?;
        items.push(self.line(kind.label(), fee.value, due));
        Ok(())
    }
}
