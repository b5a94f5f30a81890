//! Valuation of expense records: totals, per-installment amounts, due dates
//! and the cash-vs-installment comparison.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::expenses_model::{ExpenseDetails, ExpenseRecord, PaymentChoice};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeeKind {
    Dpvat,
    Licensing,
}

impl FeeKind {
    pub fn label(&self) -> &'static str {
        match self {
            FeeKind::Dpvat => "DPVAT",
            FeeKind::Licensing => "Licensing",
        }
    }
}

/// Extra fee reported next to, not inside, a record's total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeLine {
    pub kind: FeeKind,
    pub value: f64,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Valuation {
    pub payment_choice: PaymentChoice,
    pub total_amount: f64,
    pub per_installment_amount: Option<f64>,
    pub effective_due_date: Option<NaiveDate>,
    pub is_installment_plan: bool,
    pub extra_fees: Vec<FeeLine>,
}

/// How a payment choice fares against the alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChoiceAssessment {
    Economical,
    ExtraCost,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentComparison {
    pub cash_total: f64,
    pub installment_total: f64,
    pub difference: f64,
    /// Difference as a percentage of the installment total, one decimal place.
    pub difference_percent: f64,
    /// `None` when both totals are equal.
    pub cheaper: Option<PaymentChoice>,
}

impl PaymentComparison {
    pub fn assess(&self, choice: PaymentChoice) -> ChoiceAssessment {
        match self.cheaper {
            None => ChoiceAssessment::Neutral,
            Some(cheaper) if cheaper == choice => ChoiceAssessment::Economical,
            Some(_) => ChoiceAssessment::ExtraCost,
        }
    }
}

/// Valuation plus, when the record offers two payment modes, the comparison
/// between them and the assessment of the current choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationReport {
    pub valuation: Valuation,
    pub comparison: Option<PaymentComparison>,
    pub assessment: Option<ChoiceAssessment>,
}

/// Payment mode used to value a record: its single mode if it has one, the
/// decided choice otherwise, and cash for undecided records.
pub fn effective_choice(record: &ExpenseRecord) -> PaymentChoice {
    record
        .single_payment_mode()
        .or_else(|| record.payment_choice())
        .unwrap_or(PaymentChoice::Cash)
}

/// Values a record using its effective payment choice.
pub fn valuate(record: &ExpenseRecord) -> Valuation {
    valuate_as(record, effective_choice(record))
}

/// Values a record as if it were paid with `choice`.
///
/// `Other` records always use their single payment mode.
pub fn valuate_as(record: &ExpenseRecord, choice: PaymentChoice) -> Valuation {
    let extra_fees = extra_fees(record);

    if let ExpenseDetails::Other(d) = &record.details {
        let is_installment_plan = d.installment_count > 1;
        return Valuation {
            payment_choice: if is_installment_plan {
                PaymentChoice::Installment
            } else {
                PaymentChoice::Cash
            },
            total_amount: d.value * f64::from(d.installment_count.max(1)),
            per_installment_amount: is_installment_plan.then_some(d.value),
            effective_due_date: d.due_date,
            is_installment_plan,
            extra_fees,
        };
    }

    match choice {
        PaymentChoice::Cash => Valuation {
            payment_choice: PaymentChoice::Cash,
            total_amount: cash_total(record).unwrap_or(0.0),
            per_installment_amount: None,
            effective_due_date: record
                .details
                .payment_terms()
                .and_then(|(cash, _)| cash.due_date),
            is_installment_plan: false,
            extra_fees,
        },
        PaymentChoice::Installment => Valuation {
            payment_choice: PaymentChoice::Installment,
            total_amount: installment_total(record).unwrap_or(0.0),
            per_installment_amount: per_installment_amount(record),
            effective_due_date: record
                .details
                .payment_terms()
                .and_then(|(_, installment)| installment.first_date),
            is_installment_plan: true,
            extra_fees,
        },
    }
}

/// Total when paid at once. `None` for records that can only be paid in installments.
pub fn cash_total(record: &ExpenseRecord) -> Option<f64> {
    match &record.details {
        ExpenseDetails::PropertyTax(d) => Some(d.cash.value + d.garbage_tax_cash),
        ExpenseDetails::VehicleTax(d) => Some(d.cash.value),
        ExpenseDetails::Insurance(d) => Some(d.cash.value),
        ExpenseDetails::Other(d) if d.installment_count <= 1 => Some(d.value),
        ExpenseDetails::Other(_) => None,
    }
}

/// Total when paid in installments. `None` for one-time `Other` records.
pub fn installment_total(record: &ExpenseRecord) -> Option<f64> {
    let per_installment = per_installment_amount(record)?;
    let count = match &record.details {
        ExpenseDetails::Other(d) => d.installment_count,
        details => details
            .payment_terms()
            .map_or(0, |(_, installment)| installment.count),
    };
    Some(per_installment * f64::from(count))
}

fn per_installment_amount(record: &ExpenseRecord) -> Option<f64> {
    match &record.details {
        ExpenseDetails::PropertyTax(d) => Some(d.installment.value + d.garbage_tax_installment),
        ExpenseDetails::VehicleTax(d) => Some(d.installment.value),
        ExpenseDetails::Insurance(d) => Some(d.installment.value),
        ExpenseDetails::Other(d) if d.installment_count > 1 => Some(d.value),
        ExpenseDetails::Other(_) => None,
    }
}

fn extra_fees(record: &ExpenseRecord) -> Vec<FeeLine> {
    let ExpenseDetails::VehicleTax(d) = &record.details else {
        return Vec::new();
    };
    [(FeeKind::Dpvat, &d.dpvat), (FeeKind::Licensing, &d.licensing)]
        .into_iter()
        .filter(|(_, fee)| fee.is_applicable())
        .map(|(kind, fee)| FeeLine {
            kind,
            value: fee.value,
            due_date: fee.due_date,
        })
        .collect()
}

/// Compares both payment modes. Records with a single payment mode are not compared.
pub fn compare(record: &ExpenseRecord) -> Option<PaymentComparison> {
    if record.single_payment_mode().is_some() {
        return None;
    }
    let cash_total = cash_total(record)?;
    let installment_total = installment_total(record)?;
    let difference = (cash_total - installment_total).abs();
    let difference_percent = if installment_total > 0.0 {
        (difference / installment_total * 1000.0).round() / 10.0
    } else {
        0.0
    };
    let cheaper = if installment_total > cash_total {
        Some(PaymentChoice::Cash)
    } else if cash_total > installment_total {
        Some(PaymentChoice::Installment)
    } else {
        None
    };

    Some(PaymentComparison {
        cash_total,
        installment_total,
        difference,
        difference_percent,
        cheaper,
    })
}

pub fn valuation_report(record: &ExpenseRecord) -> ValuationReport {
    let comparison = compare(record);
    let assessment = match (&comparison, record.payment_choice()) {
        (Some(comparison), Some(choice)) => Some(comparison.assess(choice)),
        _ => None,
    };
    ValuationReport {
        valuation: valuate(record),
        comparison,
        assessment,
    }
}
