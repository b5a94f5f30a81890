//! Expenses module - annual expense records, their validation and valuation.

mod expenses_model;
mod expenses_traits;
mod expenses_validation;
mod valuation;


pub use expenses_model::{
    CashTerms, Decision, Destination, ExpenseCategory, ExpenseDetails, ExpenseRecord, Fee,
    InstallmentTerms, InsuranceDetails, OtherDetails, PaymentChoice, PropertyTaxDetails, RecordId,
    VehicleTaxDetails,
};
pub use expenses_traits::ExpenseRepositoryTrait;
pub use expenses_validation::{validate_plan_year, validate_record};
pub use valuation::{
    cash_total, compare, effective_choice, installment_total, valuate, valuate_as,
    valuation_report, ChoiceAssessment, FeeKind, FeeLine, PaymentComparison, Valuation,
    ValuationReport,
};
