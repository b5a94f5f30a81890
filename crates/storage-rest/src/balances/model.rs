//! Row model for the `bank_balances` table.

use serde::{Deserialize, Serialize};

use billfold_core::balances::{BankAccount, BankBalance};

use crate::codes::unknown;
use crate::errors::StorageError;

/// Conflict target of balance upserts.
pub(crate) const BALANCE_KEY: &str = "user_id,year,month,account";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRow {
    pub user_id: String,
    pub year: i32,
    pub month: u32,
    pub account: String,
    pub balance: f64,
}

impl BalanceRow {
    pub fn encode(user_id: &str, balance: &BankBalance) -> Self {
        BalanceRow {
            user_id: user_id.to_string(),
            year: balance.year,
            month: balance.month,
            account: balance.account.as_str().to_string(),
            balance: balance.balance,
        }
    }

    pub fn decode(self) -> Result<BankBalance, StorageError> {
        let account: BankAccount = self
            .account
            .parse()
            .map_err(|_| unknown("account", &self.account))?;
        Ok(BankBalance {
            year: self.year,
            month: self.month,
            account,
            balance: self.balance,
        })
    }
}
