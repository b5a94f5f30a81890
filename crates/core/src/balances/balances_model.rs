//! Bank balance domain models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_MONEY_VALUE;
use crate::errors::{Error, Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BankAccount {
    Primary,
    Secondary,
}

impl BankAccount {
    pub const ALL: [BankAccount; 2] = [BankAccount::Primary, BankAccount::Secondary];

    pub fn as_str(&self) -> &'static str {
        match self {
            BankAccount::Primary => "primary",
            BankAccount::Secondary => "secondary",
        }
    }
}

impl fmt::Display for BankAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BankAccount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "primary" => Ok(BankAccount::Primary),
            "secondary" => Ok(BankAccount::Secondary),
            _ => Err(ValidationError::InvalidInput(format!("Unknown bank account '{}'", s)).into()),
        }
    }
}

/// Balance of one account at one `(year, month)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankBalance {
    pub year: i32,
    pub month: u32,
    pub account: BankAccount,
    /// May be negative (overdraft).
    pub balance: f64,
}

impl BankBalance {
    /// Balance reported for a period that was never recorded.
    pub fn zero(year: i32, month: u32, account: BankAccount) -> Self {
        Self {
            year,
            month,
            account,
            balance: 0.0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_month(self.month)?;
        if !self.balance.is_finite() || self.balance.abs() > MAX_MONEY_VALUE {
            return Err(ValidationError::out_of_range("balance", self.balance).into());
        }
        Ok(())
    }
}

pub(crate) fn validate_month(month: u32) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::out_of_range("month", month).into());
    }
    Ok(())
}
