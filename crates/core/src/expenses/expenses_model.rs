//! Expense domain models.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Result, ValidationError};

/// Identifier of an expense record.
///
/// Records created in memory carry a `Draft` token until the data API assigns
/// them a stable identifier on insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum RecordId {
    Draft(String),
    Persisted(String),
}

impl RecordId {
    /// Creates a fresh local identifier for a record that was never saved.
    pub fn draft() -> Self {
        RecordId::Draft(Uuid::new_v4().to_string())
    }

    pub fn persisted(id: impl Into<String>) -> Self {
        RecordId::Persisted(id.into())
    }

    /// Returns the stable identifier, if the record was ever persisted.
    pub fn as_persisted(&self) -> Option<&str> {
        match self {
            RecordId::Persisted(id) => Some(id.as_str()),
            RecordId::Draft(_) => None,
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, RecordId::Draft(_))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Draft(token) => write!(f, "draft:{}", token),
            RecordId::Persisted(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpenseCategory {
    PropertyTax,
    VehicleTax,
    Insurance,
    Other,
}

impl ExpenseCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::PropertyTax => "Property Tax",
            ExpenseCategory::VehicleTax => "Vehicle Tax",
            ExpenseCategory::Insurance => "Insurance",
            ExpenseCategory::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentChoice {
    Cash,
    Installment,
}

/// Budget bucket a decided expense is paid from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Destination {
    FixedFirstHalf,
    FixedSecondHalf,
    CreditCardA,
    CreditCardB,
}

impl Destination {
    pub const ALL: [Destination; 4] = [
        Destination::FixedFirstHalf,
        Destination::FixedSecondHalf,
        Destination::CreditCardA,
        Destination::CreditCardB,
    ];
}

/// Payment choice and destination of a decided record. Both are set together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub payment_choice: PaymentChoice,
    pub destination: Destination,
}

/// One-time payment terms.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashTerms {
    pub value: f64,
    pub due_date: Option<NaiveDate>,
}

/// Monthly installment terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentTerms {
    pub value: f64,
    pub count: u32,
    pub first_date: Option<NaiveDate>,
}

impl Default for InstallmentTerms {
    fn default() -> Self {
        Self {
            value: 0.0,
            count: 1,
            first_date: None,
        }
    }
}

/// Independently valued and dated extra fee.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    pub value: f64,
    pub due_date: Option<NaiveDate>,
}

impl Fee {
    pub fn is_applicable(&self) -> bool {
        self.value != 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyTaxDetails {
    pub cash: CashTerms,
    pub installment: InstallmentTerms,
    /// Garbage collection surcharge added to the cash amount.
    pub garbage_tax_cash: f64,
    /// Garbage collection surcharge added to every installment.
    pub garbage_tax_installment: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleTaxDetails {
    pub cash: CashTerms,
    pub installment: InstallmentTerms,
    /// Mandatory insurance fee.
    pub dpvat: Fee,
    /// Registration fee.
    pub licensing: Fee,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceDetails {
    pub cash: CashTerms,
    pub installment: InstallmentTerms,
}

/// Free-form expense: `value` per payment, `installment_count` payments
/// starting at `due_date`. A count of one is a one-time payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherDetails {
    pub value: f64,
    pub installment_count: u32,
    pub due_date: Option<NaiveDate>,
}

impl Default for OtherDetails {
    fn default() -> Self {
        Self {
            value: 0.0,
            installment_count: 1,
            due_date: None,
        }
    }
}

/// Category-specific fields of an expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "camelCase")]
pub enum ExpenseDetails {
    PropertyTax(PropertyTaxDetails),
    VehicleTax(VehicleTaxDetails),
    Insurance(InsuranceDetails),
    Other(OtherDetails),
}

impl ExpenseDetails {
    pub fn category(&self) -> ExpenseCategory {
        match self {
            ExpenseDetails::PropertyTax(_) => ExpenseCategory::PropertyTax,
            ExpenseDetails::VehicleTax(_) => ExpenseCategory::VehicleTax,
            ExpenseDetails::Insurance(_) => ExpenseCategory::Insurance,
            ExpenseDetails::Other(_) => ExpenseCategory::Other,
        }
    }

    /// Cash and installment terms, for the categories that offer both.
    pub fn payment_terms(&self) -> Option<(&CashTerms, &InstallmentTerms)> {
        match self {
            ExpenseDetails::PropertyTax(d) => Some((&d.cash, &d.installment)),
            ExpenseDetails::VehicleTax(d) => Some((&d.cash, &d.installment)),
            ExpenseDetails::Insurance(d) => Some((&d.cash, &d.installment)),
            ExpenseDetails::Other(_) => None,
        }
    }

    /// Clears every date whose paired amount is zero.
    pub fn normalize(&mut self) {
        fn clear_cash(cash: &mut CashTerms) {
            if cash.value == 0.0 {
                cash.due_date = None;
            }
        }
        fn clear_installment(installment: &mut InstallmentTerms) {
            if installment.value == 0.0 {
                installment.first_date = None;
            }
        }
        fn clear_fee(fee: &mut Fee) {
            if !fee.is_applicable() {
                fee.due_date = None;
            }
        }

        match self {
            ExpenseDetails::PropertyTax(d) => {
                clear_cash(&mut d.cash);
                clear_installment(&mut d.installment);
            }
            ExpenseDetails::VehicleTax(d) => {
                clear_cash(&mut d.cash);
                clear_installment(&mut d.installment);
                clear_fee(&mut d.dpvat);
                clear_fee(&mut d.licensing);
            }
            ExpenseDetails::Insurance(d) => {
                clear_cash(&mut d.cash);
                clear_installment(&mut d.installment);
            }
            ExpenseDetails::Other(d) => {
                if d.value == 0.0 {
                    d.due_date = None;
                }
            }
        }
    }
}

/// One annual planned expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub id: RecordId,
    pub year: i32,
    pub description: String,
    /// `None` until the user decides how and from where to pay.
    pub decision: Option<Decision>,
    pub details: ExpenseDetails,
    pub created_at: Option<DateTime<Utc>>,
}

impl ExpenseRecord {
    /// Creates an undecided, not yet persisted record.
    pub fn new(year: i32, description: impl Into<String>, details: ExpenseDetails) -> Self {
        let mut record = Self {
            id: RecordId::draft(),
            year,
            description: description.into(),
            decision: None,
            details,
            created_at: Some(Utc::now()),
        };
        record.normalize();
        record
    }

    pub fn category(&self) -> ExpenseCategory {
        self.details.category()
    }

    pub fn is_decided(&self) -> bool {
        self.decision.is_some()
    }

    pub fn payment_choice(&self) -> Option<PaymentChoice> {
        self.decision.map(|d| d.payment_choice)
    }

    pub fn destination(&self) -> Option<Destination> {
        self.decision.map(|d| d.destination)
    }

    /// The only payment mode a record supports, when it supports just one.
    ///
    /// `Other` records are paid the way they were entered: once when the
    /// installment count is one, in installments otherwise.
    pub fn single_payment_mode(&self) -> Option<PaymentChoice> {
        match &self.details {
            ExpenseDetails::Other(d) if d.installment_count <= 1 => Some(PaymentChoice::Cash),
            ExpenseDetails::Other(_) => Some(PaymentChoice::Installment),
            _ => None,
        }
    }

    pub fn normalize(&mut self) {
        self.details.normalize();
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Records the user's decision.
    ///
    /// Records with a single payment mode ignore `choice` and take that mode;
    /// every other record requires an explicit choice.
    pub fn decide(mut self, choice: Option<PaymentChoice>, destination: Destination) -> Result<Self> {
        let payment_choice = match self.single_payment_mode() {
            Some(mode) => mode,
            None => choice
                .ok_or_else(|| ValidationError::MissingField("paymentChoice".to_string()))?,
        };
        self.decision = Some(Decision {
            payment_choice,
            destination,
        });
        Ok(self)
    }

    pub fn undecide(mut self) -> Self {
        self.decision = None;
        self
    }
}
