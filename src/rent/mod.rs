pub mod calculator;
pub mod format;

pub use calculator::{compute_rent, PaymentBalance, ReconciledAmount, RentCalculator};
pub use format::{format_amount, format_currency, AmountFormat};
