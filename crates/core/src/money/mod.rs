//! Money module - conversion between user-facing currency text and stored amounts.

mod money_codec;


pub use money_codec::{format_amount, to_amount, to_display, MoneyInput};
