/// Number of most recent planning years kept when no explicit policy is configured
pub const DEFAULT_RETENTION_YEARS: u32 = 6;

/// How many years ahead of the current one a plan may be created for
pub const MAX_YEARS_AHEAD: i32 = 10;

/// Installment plans are limited to two years of monthly payments
pub const MIN_INSTALLMENTS: u32 = 1;
pub const MAX_INSTALLMENTS: u32 = 24;

/// Largest accepted monetary value for a single field
pub const MAX_MONEY_VALUE: f64 = 9_999_999.99;

/// Smallest accepted value for the main amount of a chosen payment path
pub const MIN_PAYABLE_VALUE: f64 = 0.01;

/// Currency prefix used by the display codec (pt-BR, BRL)
pub const CURRENCY_PREFIX: &str = "R$";

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
