use chrono::{Datelike, NaiveDate};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::receipt::model::{Receipt, ReceiptPayment, ReceiptProperty, ReceiptTenant};
use crate::receipt::period::BillingPeriod;
use crate::types::TenantType;

/// who the receipt is issued to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDetails {
    pub name: String,
    pub tenant_type: TenantType,
    /// required, there is no placeholder address
    pub email: String,
}

impl TenantDetails {
    pub fn new(name: impl Into<String>, tenant_type: TenantType, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tenant_type,
            email: email.into(),
        }
    }
}

/// confirmed payment for one billed month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentData {
    /// `"<MonthName> <Year>"`, year optional
    pub month: String,
    pub rent_amount: Money,
    pub charges: Money,
    pub payment_date: NaiveDate,
    pub payment_method: String,
}

/// assemble a receipt; pure apart from reading the clock for the issue time
pub fn compose_receipt(
    tenant: TenantDetails,
    property_address: &str,
    payment: PaymentData,
    time_provider: &SafeTimeProvider,
) -> Result<Receipt> {
    let issued_at = time_provider.now();
    let period = BillingPeriod::parse(&payment.month, issued_at.year())?;

    let receipt = Receipt::new(
        issued_at,
        ReceiptTenant {
            name: tenant.name,
            tenant_type: tenant.tenant_type,
            address: property_address.to_string(),
            email: tenant.email,
        },
        ReceiptProperty {
            address: property_address.to_string(),
            rent: payment.rent_amount,
            charges: payment.charges,
        },
        ReceiptPayment {
            amount: payment.rent_amount + payment.charges,
            date: payment.payment_date,
            method: payment.payment_method,
            reference: String::new(),
            period,
        },
    );

    tracing::debug!(
        receipt_id = %receipt.id(),
        period = %receipt.payment().period,
        amount = %receipt.payment().amount,
        "receipt composed"
    );
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ReconciliationError;
    use chrono::{Month, TimeZone, Utc};
    use hourglass_rs::TimeSource;

    fn time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2026, 4, 2, 8, 0, 0).unwrap()))
    }

    fn tenant() -> TenantDetails {
        TenantDetails::new("Marie Dubois", TenantType::Tenant, "marie.dubois@example.fr")
    }

    fn payment(month: &str) -> PaymentData {
        PaymentData {
            month: month.to_string(),
            rent_amount: Money::from_major(900),
            charges: Money::from_major(40),
            payment_date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            payment_method: "Virement".to_string(),
        }
    }

    #[test]
    fn test_period_and_amount() {
        let receipt = compose_receipt(tenant(), "8 quai Saint-Vincent, Lyon", payment("March 2025"), &time()).unwrap();
        assert_eq!(receipt.payment().period.to_string(), "March 2025");
        assert_eq!(receipt.payment().amount, Money::from_major(940));
        assert_eq!(receipt.property().rent, Money::from_major(900));
        assert_eq!(receipt.property().charges, Money::from_major(40));
        assert!(receipt.payment().reference.is_empty());
    }

    #[test]
    fn test_missing_year_defaults_to_current_year() {
        let receipt = compose_receipt(tenant(), "8 quai Saint-Vincent, Lyon", payment("March"), &time()).unwrap();
        assert_eq!(receipt.payment().period, BillingPeriod::new(Month::March, 2026));
        assert_eq!(receipt.payment().period.to_string(), "March 2026");
    }

    #[test]
    fn test_tenant_email_and_address_are_carried() {
        let receipt = compose_receipt(tenant(), "8 quai Saint-Vincent, Lyon", payment("Mars 2025"), &time()).unwrap();
        assert_eq!(receipt.tenant().email, "marie.dubois@example.fr");
        assert_eq!(receipt.tenant().address, "8 quai Saint-Vincent, Lyon");
        assert_eq!(receipt.property().address, "8 quai Saint-Vincent, Lyon");
        assert_eq!(receipt.payment().period.to_string(), "Mars 2025");
        assert!(receipt.validate().is_ok());
    }

    #[test]
    fn test_malformed_month_is_an_error() {
        let err = compose_receipt(tenant(), "8 quai Saint-Vincent, Lyon", payment("2025-03"), &time()).unwrap_err();
        assert_eq!(err, ReconciliationError::InvalidPeriod { input: "2025-03".to_string() });
    }

    #[test]
    fn test_idempotent() {
        let t = time();
        let a = compose_receipt(tenant(), "8 quai Saint-Vincent, Lyon", payment("March 2025"), &t).unwrap();
        let b = compose_receipt(tenant(), "8 quai Saint-Vincent, Lyon", payment("March 2025"), &t).unwrap();
        assert_eq!(a, b);
    }
}
