//! Column codes shared by the row models.

use billfold_core::expenses::{Destination, PaymentChoice};

use crate::errors::StorageError;

pub(crate) fn destination_code(destination: Destination) -> &'static str {
    match destination {
        Destination::FixedFirstHalf => "fixed_first",
        Destination::FixedSecondHalf => "fixed_second",
        Destination::CreditCardA => "credit_card_1",
        Destination::CreditCardB => "credit_card_2",
    }
}

pub(crate) fn parse_destination(code: &str) -> Result<Destination, StorageError> {
    match code {
        "fixed_first" => Ok(Destination::FixedFirstHalf),
        "fixed_second" => Ok(Destination::FixedSecondHalf),
        "credit_card_1" => Ok(Destination::CreditCardA),
        "credit_card_2" => Ok(Destination::CreditCardB),
        _ => Err(unknown("destination", code)),
    }
}

pub(crate) fn payment_choice_code(choice: PaymentChoice) -> &'static str {
    match choice {
        PaymentChoice::Cash => "cash",
        PaymentChoice::Installment => "installment",
    }
}

pub(crate) fn parse_payment_choice(code: &str) -> Result<PaymentChoice, StorageError> {
    match code {
        "cash" => Ok(PaymentChoice::Cash),
        "installment" => Ok(PaymentChoice::Installment),
        _ => Err(unknown("payment_choice", code)),
    }
}

pub(crate) fn unknown(column: &str, code: &str) -> StorageError {
    StorageError::Decode(format!("unknown {} '{}'", column, code))
}
