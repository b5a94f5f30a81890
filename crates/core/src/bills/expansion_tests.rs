//! Tests for bill expansion.

#[cfg(test)]
mod tests {
    use crate::bills::expand_to_bills;
    use crate::errors::{Error, ValidationError};
    use crate::expenses::{Destination, ExpenseDetails, ExpenseRecord, Fee, PaymentChoice};
    use crate::test_utils::{date, insurance, other, persisted, property_tax, vehicle_tax};

    fn decided(record: ExpenseRecord, choice: PaymentChoice) -> ExpenseRecord {
        record.decide(Some(choice), Destination::CreditCardA).unwrap()
    }

    #[test]
    fn test_undecided_records_produce_no_bills() {
        assert!(expand_to_bills(&insurance(1000.0, 90.0, 12))
            .unwrap()
            .is_empty());
        assert!(expand_to_bills(&other(80.0, 3, date(2025, 6, 1)))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_installments_roll_over_the_year() {
        let mut record = insurance(1200.0, 300.0, 4);
        if let ExpenseDetails::Insurance(d) = &mut record.details {
            d.installment.first_date = Some(date(2024, 11, 15));
        }
        let items = expand_to_bills(&decided(record, PaymentChoice::Installment)).unwrap();

        let buckets: Vec<(i32, u32)> = items.iter().map(|i| (i.year, i.month)).collect();
        assert_eq!(buckets, vec![(2024, 11), (2024, 12), (2025, 1), (2025, 2)]);
        assert_eq!(items[3].due_date, date(2025, 2, 15));
        assert_eq!(items[2].description, "Insurance - Installment 3/4");
        assert_eq!(items[2].installment_number, Some(3));
        assert_eq!(items[2].total_installments, Some(4));
        assert!(items.iter().all(|i| i.amount == 300.0));
        assert!(items.iter().all(|i| i.destination == Destination::CreditCardA));
    }

    #[test]
    fn test_property_tax_cash_adds_garbage_line() {
        let record = decided(
            persisted(property_tax(1000.0, 50.0, 100.0, 5.0, 10), "iptu-1"),
            PaymentChoice::Cash,
        );
        let items = expand_to_bills(&record).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].description, "House - Property Tax");
        assert_eq!(items[0].amount, 1000.0);
        assert_eq!(items[1].description, "House - Garbage Tax");
        assert_eq!(items[1].amount, 50.0);
        assert!(items.iter().all(|i| i.due_date == date(2025, 2, 10)));
        assert!(items.iter().all(|i| i.installment_number.is_none()));
        assert_eq!(items[0].source_expense_id, record.id);
        let total: f64 = items.iter().map(|i| i.amount).sum();
        assert_eq!(total, 1050.0);
    }

    #[test]
    fn test_property_tax_installments_add_one_garbage_line() {
        let record = decided(
            property_tax(1000.0, 50.0, 100.0, 5.0, 10),
            PaymentChoice::Installment,
        );
        let items = expand_to_bills(&record).unwrap();

        assert_eq!(items.len(), 11);
        let garbage = items.last().unwrap();
        assert_eq!(garbage.description, "House - Garbage Tax");
        assert_eq!(garbage.amount, 5.0);
        assert_eq!(garbage.due_date, date(2025, 2, 10));
        assert_eq!(garbage.installment_number, None);
        assert_eq!(items[9].due_date, date(2025, 11, 10));
    }

    #[test]
    fn test_zero_installment_surcharge_adds_no_line() {
        let record = decided(
            property_tax(1000.0, 0.0, 100.0, 0.0, 10),
            PaymentChoice::Installment,
        );
        let items = expand_to_bills(&record).unwrap();

        assert_eq!(items.len(), 10);
        assert!(items.iter().all(|i| i.installment_number.is_some()));

        // The cash path always carries its surcharge line.
        let record = decided(
            property_tax(1000.0, 0.0, 100.0, 0.0, 10),
            PaymentChoice::Cash,
        );
        let items = expand_to_bills(&record).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].amount, 0.0);
    }

    #[test]
    fn test_vehicle_tax_adds_nonzero_fees() {
        let mut record = vehicle_tax(1200.0, 130.0, 10);
        if let ExpenseDetails::VehicleTax(d) = &mut record.details {
            d.dpvat = Fee::default();
            d.licensing = Fee {
                value: 160.0,
                due_date: Some(date(2025, 4, 1)),
            };
        }
        let items = expand_to_bills(&decided(record, PaymentChoice::Cash)).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].description, "Car - Vehicle Tax");
        assert_eq!(items[1].description, "Car - Licensing");
        assert_eq!((items[1].year, items[1].month), (2025, 4));
    }

    #[test]
    fn test_other_single_payment_keeps_plain_description() {
        let record = other(80.0, 1, date(2025, 6, 1))
            .decide(None, Destination::FixedFirstHalf)
            .unwrap();
        let items = expand_to_bills(&record).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Gym");
        assert_eq!(items[0].amount, 80.0);
        assert_eq!(items[0].total_installments, None);
    }

    #[test]
    fn test_other_monthly_payments() {
        let record = other(80.0, 3, date(2025, 12, 5))
            .decide(None, Destination::FixedSecondHalf)
            .unwrap();
        let items = expand_to_bills(&record).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].description, "Gym - Installment 1/3");
        assert_eq!((items[2].year, items[2].month), (2026, 2));
    }

    #[test]
    fn test_missing_date_is_reported() {
        let mut record = insurance(1000.0, 90.0, 12);
        if let ExpenseDetails::Insurance(d) = &mut record.details {
            d.cash.due_date = None;
        }
        let result = expand_to_bills(&decided(record, PaymentChoice::Cash));
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::MissingField(ref f))) if f == "cashDueDate"
        ));
    }
}
