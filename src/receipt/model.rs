use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{ReconciliationError, Result};
use crate::receipt::period::BillingPeriod;
use crate::types::TenantType;

/// unique identifier for a receipt
pub type ReceiptId = Uuid;

/// tenant section of a receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptTenant {
    pub name: String,
    pub tenant_type: TenantType,
    pub address: String,
    pub email: String,
}

/// property section of a receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptProperty {
    pub address: String,
    pub rent: Money,
    pub charges: Money,
}

/// payment section of a receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptPayment {
    /// rent + charges
    pub amount: Money,
    pub date: NaiveDate,
    pub method: String,
    /// assigned by the renderer, empty at composition
    pub reference: String,
    pub period: BillingPeriod,
}

/// immutable confirmation of one payment event
///
/// Fields are only reachable through getters; a correction means composing a
/// new receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    id: ReceiptId,
    issued_at: DateTime<Utc>,
    tenant: ReceiptTenant,
    property: ReceiptProperty,
    payment: ReceiptPayment,
}

impl Receipt {
    pub(crate) fn new(
        issued_at: DateTime<Utc>,
        tenant: ReceiptTenant,
        property: ReceiptProperty,
        payment: ReceiptPayment,
    ) -> Self {
        let id = content_id(&issued_at, &tenant, &property, &payment);
        Self {
            id,
            issued_at,
            tenant,
            property,
            payment,
        }
    }

    pub fn id(&self) -> ReceiptId {
        self.id
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn tenant(&self) -> &ReceiptTenant {
        &self.tenant
    }

    pub fn property(&self) -> &ReceiptProperty {
        &self.property
    }

    pub fn payment(&self) -> &ReceiptPayment {
        &self.payment
    }

    /// conventional artifact name, `<kind>-<ISO-date>.<ext>`
    pub fn artifact_name(&self, kind: &str, extension: &str) -> String {
        format!("{}-{}.{}", kind, self.issued_at.date_naive().format("%Y-%m-%d"), extension)
    }

    /// pre-flight check before handing the receipt to a renderer
    pub fn validate(&self) -> Result<()> {
        if self.id != content_id(&self.issued_at, &self.tenant, &self.property, &self.payment) {
            return Err(ReconciliationError::InvalidReceipt {
                field: "id",
                reason: format!("{} does not match the receipt content", self.id),
            });
        }
        require("tenant.name", &self.tenant.name)?;
        require("tenant.address", &self.tenant.address)?;
        require("tenant.email", &self.tenant.email)?;
        if !is_plausible_email(&self.tenant.email) {
            return Err(ReconciliationError::InvalidReceipt {
                field: "tenant.email",
                reason: format!("{:?} is not an email address", self.tenant.email),
            });
        }
        require("property.address", &self.property.address)?;
        require("payment.method", &self.payment.method)?;

        for amount in [self.payment.amount, self.property.rent, self.property.charges] {
            if amount.is_negative() {
                return Err(ReconciliationError::NegativeAmount { amount });
            }
        }
        if self.payment.amount != self.property.rent + self.property.charges {
            return Err(ReconciliationError::InvalidReceipt {
                field: "payment.amount",
                reason: format!(
                    "{} does not equal rent {} plus charges {}",
                    self.payment.amount, self.property.rent, self.property.charges
                ),
            });
        }
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReconciliationError::InvalidReceipt {
            field,
            reason: "is required".to_string(),
        });
    }
    Ok(())
}

fn is_plausible_email(email: &str) -> bool {
    match email.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
        None => false,
    }
}

fn content_id(
    issued_at: &DateTime<Utc>,
    tenant: &ReceiptTenant,
    property: &ReceiptProperty,
    payment: &ReceiptPayment,
) -> ReceiptId {
    let key = format!(
        "{}|{}|{}|{}|{}|{}|{}|{}",
        issued_at.to_rfc3339(),
        tenant.name,
        tenant.email,
        property.address,
        payment.period,
        payment.amount,
        payment.date,
        payment.method,
    );
    Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes())
}
