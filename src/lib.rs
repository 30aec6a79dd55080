pub mod amount;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod matching;
pub mod receipt;
pub mod reconciliation;
pub mod rent;
pub mod types;

// re-export key types
pub use amount::{extract_amount, AmountSource, ExtractedAmount};
pub use config::{DepositConfig, MatchingConfig, ReceiptConfig, ReconciliationConfig};
pub use decimal::Money;
pub use errors::{ReconciliationError, RenderError, Result};
pub use events::{Event, EventStore};
pub use matching::{find_matching_contract, ContractMatcher, TieBreak};
pub use receipt::{
    compose_receipt, BillingPeriod, DocumentRenderer, JsonRenderer, PaymentData, PeriodLanguage,
    Receipt, ReceiptEmitter, ReceiptId, RenderedDocument, TenantDetails,
};
pub use reconciliation::{IssuedReceipt, Reconciler, Reconciliation, Severity};
pub use rent::{
    compute_rent, format_amount, format_currency, AmountFormat, PaymentBalance, ReconciledAmount,
    RentCalculator,
};
pub use types::{
    ContractId, ContractRecord, ContractStatus, PaymentRecord, PaymentStatus, RawAmount,
    TenantType,
};

// re-export external dependencies that users will need
pub use async_trait::async_trait;
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
