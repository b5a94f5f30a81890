#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::balances::{BalanceServiceTrait, BankAccount, BankBalance};
    use crate::bills::{
        Bill, BillCategory, BillRepositoryTrait, BillService, BillServiceTrait, DestinationTotal,
    };
    use crate::errors::{DatabaseError, Error, Result};
    use crate::expenses::{Destination, ExpenseRecord, PaymentChoice};
    use crate::plans::{PlanServiceTrait, SaveOutcome};
    use crate::test_utils::{date, insurance, other, persisted};

    // ==================== Mocks ====================

    #[derive(Clone, Default)]
    struct MockBillRepository {
        rows: Arc<Mutex<Vec<(String, Bill)>>>,
        next_id: Arc<Mutex<u32>>,
    }

    impl MockBillRepository {
        fn bills_of(&self, user_id: &str) -> Vec<Bill> {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .filter(|(u, _)| u == user_id)
                .map(|(_, b)| b.clone())
                .collect()
        }
    }

    #[async_trait]
    impl BillRepositoryTrait for MockBillRepository {
        async fn list_month(&self, user_id: &str, year: i32, month: u32) -> Result<Vec<Bill>> {
            Ok(self
                .bills_of(user_id)
                .into_iter()
                .filter(|b| b.year == year && b.month == month)
                .collect())
        }

        async fn list_months(&self, user_id: &str, year: i32) -> Result<Vec<u32>> {
            Ok(self
                .bills_of(user_id)
                .into_iter()
                .filter(|b| b.year == year)
                .map(|b| b.month)
                .collect())
        }

        async fn insert_batch(&self, user_id: &str, bills: Vec<Bill>) -> Result<Vec<Bill>> {
            let mut rows = self.rows.lock().unwrap();
            let mut next_id = self.next_id.lock().unwrap();
            let mut inserted = Vec::new();
            for mut bill in bills {
                *next_id += 1;
                bill.id = Some(format!("bill-{}", *next_id));
                rows.push((user_id.to_string(), bill.clone()));
                inserted.push(bill);
            }
            Ok(inserted)
        }

        async fn update_one(&self, user_id: &str, bill: Bill) -> Result<Bill> {
            let mut rows = self.rows.lock().unwrap();
            match rows
                .iter_mut()
                .find(|(u, b)| u == user_id && b.id == bill.id)
            {
                Some((_, row)) => {
                    *row = bill.clone();
                    Ok(bill)
                }
                None => Err(DatabaseError::NotFound(format!("{:?}", bill.id)).into()),
            }
        }

        async fn delete_one(&self, user_id: &str, bill_id: &str) -> Result<()> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|(u, b)| u != user_id || b.id.as_deref() != Some(bill_id));
            if rows.len() == before {
                return Err(DatabaseError::NotFound(bill_id.to_string()).into());
            }
            Ok(())
        }

        async fn delete_generated_for_plan_year(
            &self,
            user_id: &str,
            plan_year: i32,
        ) -> Result<usize> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|(u, b)| u != user_id || b.plan_year != Some(plan_year));
            Ok(before - rows.len())
        }
    }

    struct StubPlanService {
        records: Vec<ExpenseRecord>,
    }

    #[async_trait]
    impl PlanServiceTrait for StubPlanService {
        async fn load_plan(&self, _user_id: &str, year: i32) -> Result<Vec<ExpenseRecord>> {
            Ok(self
                .records
                .iter()
                .filter(|r| r.year == year)
                .cloned()
                .collect())
        }

        async fn save_plan(
            &self,
            _user_id: &str,
            _year: i32,
            _records: Vec<ExpenseRecord>,
        ) -> Result<SaveOutcome> {
            unimplemented!()
        }

        async fn list_available_years(&self, _user_id: &str) -> Result<Vec<i32>> {
            unimplemented!()
        }
    }

    struct StubBalanceService {
        primary: f64,
        secondary: f64,
    }

    #[async_trait]
    impl BalanceServiceTrait for StubBalanceService {
        async fn get_balance(
            &self,
            _user_id: &str,
            _year: i32,
            _month: u32,
            _account: BankAccount,
        ) -> Result<BankBalance> {
            unimplemented!()
        }

        async fn update_balance(
            &self,
            _user_id: &str,
            _balance: BankBalance,
        ) -> Result<BankBalance> {
            unimplemented!()
        }

        async fn month_balances(
            &self,
            _user_id: &str,
            year: i32,
            month: u32,
        ) -> Result<Vec<BankBalance>> {
            Ok(vec![
                BankBalance {
                    year,
                    month,
                    account: BankAccount::Primary,
                    balance: self.primary,
                },
                BankBalance {
                    year,
                    month,
                    account: BankAccount::Secondary,
                    balance: self.secondary,
                },
            ])
        }
    }

    fn service(repo: &MockBillRepository, records: Vec<ExpenseRecord>) -> BillService {
        BillService::new(
            Arc::new(repo.clone()),
            Arc::new(StubPlanService { records }),
            Arc::new(StubBalanceService {
                primary: 1000.0,
                secondary: 250.5,
            }),
        )
    }

    fn income(category: BillCategory, month: u32, amount: f64) -> Bill {
        Bill {
            id: None,
            year: 2025,
            month,
            category,
            description: "Paycheck".to_string(),
            amount,
            due_date: Some(date(2025, month, 5)),
            destination: None,
            source_expense_id: None,
            plan_year: None,
            installment_number: None,
            total_installments: None,
        }
    }

    fn plan() -> Vec<ExpenseRecord> {
        vec![
            persisted(insurance(1200.0, 110.0, 3), "ins")
                .decide(Some(PaymentChoice::Installment), Destination::CreditCardA)
                .unwrap(),
            persisted(other(80.0, 1, date(2025, 3, 20)), "gym")
                .decide(None, Destination::FixedSecondHalf)
                .unwrap(),
            persisted(insurance(500.0, 50.0, 10), "undecided"),
        ]
    }

    // ==================== Regeneration ====================

    #[tokio::test]
    async fn test_regenerate_replaces_generated_bills_only() {
        let repo = MockBillRepository::default();
        let service = service(&repo, plan());
        service
            .save_bill("u1", income(BillCategory::Salary, 3, 5000.0))
            .await
            .unwrap();

        assert_eq!(service.regenerate_bills("u1", 2025).await.unwrap(), 4);
        assert_eq!(service.regenerate_bills("u1", 2025).await.unwrap(), 4);

        let bills = repo.bills_of("u1");
        assert_eq!(bills.len(), 5);
        assert_eq!(
            bills
                .iter()
                .filter(|b| b.category == BillCategory::Salary)
                .count(),
            1
        );
        let generated: Vec<&Bill> = bills.iter().filter(|b| b.is_generated()).collect();
        assert!(generated
            .iter()
            .all(|b| b.category == BillCategory::Expense && b.plan_year == Some(2025)));
        assert!(generated
            .iter()
            .any(|b| b.source_expense_id.as_deref() == Some("gym")));
        assert!(!generated
            .iter()
            .any(|b| b.source_expense_id.as_deref() == Some("undecided")));
    }

    // ==================== Manual bills ====================

    #[tokio::test]
    async fn test_save_bill_inserts_then_updates() {
        let repo = MockBillRepository::default();
        let service = service(&repo, Vec::new());

        let mut saved = service
            .save_bill("u1", income(BillCategory::Advance, 4, 1500.0))
            .await
            .unwrap();
        assert!(saved.id.is_some());

        saved.amount = 1750.0;
        service.save_bill("u1", saved).await.unwrap();

        let bills = repo.bills_of("u1");
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].amount, 1750.0);
    }

    #[tokio::test]
    async fn test_update_of_another_users_bill_is_not_found() {
        let repo = MockBillRepository::default();
        let service = service(&repo, Vec::new());
        let saved = service
            .save_bill("u1", income(BillCategory::Salary, 4, 1500.0))
            .await
            .unwrap();

        let result = service.save_bill("u2", saved).await;
        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_income_kinds_are_restricted_by_month() {
        let repo = MockBillRepository::default();
        let service = service(&repo, Vec::new());

        let result = service
            .save_bill("u1", income(BillCategory::Vacation, 3, 900.0))
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(service
            .save_bill("u1", income(BillCategory::Vacation, 7, 900.0))
            .await
            .is_ok());
        assert!(service
            .save_bill("u1", income(BillCategory::Thirteenth, 12, 900.0))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_delete_bill() {
        let repo = MockBillRepository::default();
        let service = service(&repo, Vec::new());
        let saved = service
            .save_bill("u1", income(BillCategory::Salary, 2, 10.0))
            .await
            .unwrap();
        let id = saved.id.unwrap();

        service.delete_bill("u1", &id).await.unwrap();
        assert!(repo.bills_of("u1").is_empty());
        assert!(service.delete_bill("u1", &id).await.is_err());
    }

    // ==================== Months and overview ====================

    #[tokio::test]
    async fn test_available_months_merge_bills_with_elapsed_months() {
        let repo = MockBillRepository::default();
        let service = service(&repo, plan());
        service.regenerate_bills("u1", 2025).await.unwrap();

        let months = service
            .available_months("u1", 2025, date(2025, 2, 14))
            .await
            .unwrap();
        assert_eq!(months, vec![1, 2, 3, 4, 5]);

        let months = service
            .available_months("u1", 2026, date(2025, 2, 14))
            .await
            .unwrap();
        assert!(months.is_empty());
    }

    #[tokio::test]
    async fn test_month_overview_totals() {
        let repo = MockBillRepository::default();
        let service = service(&repo, plan());
        service.regenerate_bills("u1", 2025).await.unwrap();
        service
            .save_bill("u1", income(BillCategory::Salary, 3, 3000.0))
            .await
            .unwrap();

        let overview = service.month_overview("u1", 2025, 3).await.unwrap();

        // Insurance installment 1/3 on the 5th and the gym on the 20th.
        assert_eq!(overview.bills.len(), 3);
        assert_eq!(overview.bills[0].due_date, Some(date(2025, 3, 5)));
        assert_eq!(overview.bills[2].due_date, Some(date(2025, 3, 20)));
        assert_eq!(overview.income_total, 3000.0);
        assert_eq!(overview.expense_total, 190.0);
        assert_eq!(
            overview.destination_totals,
            vec![
                DestinationTotal {
                    destination: Destination::FixedSecondHalf,
                    total: 80.0,
                },
                DestinationTotal {
                    destination: Destination::CreditCardA,
                    total: 110.0,
                },
            ]
        );
        assert_eq!(overview.projected_balance, 1000.0 + 250.5 + 3000.0 - 190.0);
        assert_eq!(
            overview.income_kinds,
            vec![BillCategory::Salary, BillCategory::Advance]
        );
    }

    #[tokio::test]
    async fn test_month_must_be_in_range() {
        let repo = MockBillRepository::default();
        let service = service(&repo, Vec::new());
        assert!(matches!(
            service.load_month_bills("u1", 2025, 0).await,
            Err(Error::Validation(_))
        ));
    }
}
