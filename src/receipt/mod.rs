pub mod composer;
pub mod emitter;
pub mod model;
pub mod period;

pub use composer::{compose_receipt, PaymentData, TenantDetails};
pub use emitter::{DocumentRenderer, JsonRenderer, ReceiptEmitter, RenderedDocument};
pub use model::{Receipt, ReceiptId, ReceiptPayment, ReceiptProperty, ReceiptTenant};
pub use period::{BillingPeriod, PeriodLanguage};
