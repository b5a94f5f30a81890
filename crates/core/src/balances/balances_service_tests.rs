#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::balances::{
        BalanceRepositoryTrait, BalanceService, BalanceServiceTrait, BankAccount, BankBalance,
    };
    use crate::errors::{Error, Result};

    type Key = (String, i32, u32, BankAccount);

    #[derive(Clone, Default)]
    struct MockBalanceRepository {
        rows: Arc<Mutex<HashMap<Key, BankBalance>>>,
    }

    #[async_trait]
    impl BalanceRepositoryTrait for MockBalanceRepository {
        async fn get(
            &self,
            user_id: &str,
            year: i32,
            month: u32,
            account: BankAccount,
        ) -> Result<Option<BankBalance>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .get(&(user_id.to_string(), year, month, account))
                .copied())
        }

        async fn upsert(&self, user_id: &str, balance: BankBalance) -> Result<BankBalance> {
            let mut rows = self.rows.lock().unwrap();
            rows.insert(
                (
                    user_id.to_string(),
                    balance.year,
                    balance.month,
                    balance.account,
                ),
                balance,
            );
            Ok(balance)
        }

        async fn list_for_month(
            &self,
            user_id: &str,
            year: i32,
            month: u32,
        ) -> Result<Vec<BankBalance>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .filter(|((u, y, m, _), _)| u == user_id && *y == year && *m == month)
                .map(|(_, b)| *b)
                .collect())
        }
    }

    fn balance(month: u32, account: BankAccount, value: f64) -> BankBalance {
        BankBalance {
            year: 2025,
            month,
            account,
            balance: value,
        }
    }

    #[tokio::test]
    async fn test_missing_balance_defaults_to_zero() {
        let service = BalanceService::new(Arc::new(MockBalanceRepository::default()));
        let result = service
            .get_balance("u1", 2025, 3, BankAccount::Primary)
            .await
            .unwrap();
        assert_eq!(result, BankBalance::zero(2025, 3, BankAccount::Primary));
    }

    #[tokio::test]
    async fn test_update_replaces_the_period_balance() {
        let repo = MockBalanceRepository::default();
        let service = BalanceService::new(Arc::new(repo.clone()));

        service
            .update_balance("u1", balance(3, BankAccount::Primary, 100.0))
            .await
            .unwrap();
        service
            .update_balance("u1", balance(3, BankAccount::Primary, -25.5))
            .await
            .unwrap();

        assert_eq!(repo.rows.lock().unwrap().len(), 1);
        let stored = service
            .get_balance("u1", 2025, 3, BankAccount::Primary)
            .await
            .unwrap();
        assert_eq!(stored.balance, -25.5);

        let other_user = service
            .get_balance("u2", 2025, 3, BankAccount::Primary)
            .await
            .unwrap();
        assert_eq!(other_user.balance, 0.0);
    }

    #[tokio::test]
    async fn test_month_balances_cover_both_accounts() {
        let repo = MockBalanceRepository::default();
        let service = BalanceService::new(Arc::new(repo.clone()));
        service
            .update_balance("u1", balance(5, BankAccount::Secondary, 40.0))
            .await
            .unwrap();

        let balances = service.month_balances("u1", 2025, 5).await.unwrap();
        assert_eq!(
            balances,
            vec![
                BankBalance::zero(2025, 5, BankAccount::Primary),
                balance(5, BankAccount::Secondary, 40.0),
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_month_is_rejected() {
        let service = BalanceService::new(Arc::new(MockBalanceRepository::default()));
        let result = service
            .update_balance("u1", balance(13, BankAccount::Primary, 1.0))
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));

        let result = service
            .update_balance("u1", balance(1, BankAccount::Primary, f64::INFINITY))
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_account_parsing() {
        assert_eq!("secondary".parse::<BankAccount>().unwrap(), BankAccount::Secondary);
        assert!("savings".parse::<BankAccount>().is_err());
        assert_eq!(
            serde_json::to_string(&BankAccount::Primary).unwrap(),
            "\"primary\""
        );
    }
}
