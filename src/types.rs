use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::Money;

/// identifier of a contract document in the application's store
pub type ContractId = String;

/// category of rent-paying occupant, display only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TenantType {
    #[default]
    Tenant,
    Roommate,
}

/// payment status as recorded by the billing workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
    Partial,
    Cancelled,
    /// any label this crate does not know about
    #[serde(other)]
    Unknown,
}

/// contract status, keeps the stored label verbatim when it is not one of the known ones
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContractStatus {
    Draft,
    Active,
    Signed,
    Expired,
    Terminated,
    Other(String),
}

impl ContractStatus {
    /// contract-in-force: exactly "Active" or "Signed"
    pub fn is_in_force(&self) -> bool {
        matches!(self, ContractStatus::Active | ContractStatus::Signed)
    }

    pub fn label(&self) -> &str {
        match self {
            ContractStatus::Draft => "Draft",
            ContractStatus::Active => "Active",
            ContractStatus::Signed => "Signed",
            ContractStatus::Expired => "Expired",
            ContractStatus::Terminated => "Terminated",
            ContractStatus::Other(label) => label,
        }
    }
}

impl From<String> for ContractStatus {
    fn from(label: String) -> Self {
        // case sensitive on purpose, "active" is not a contract in force
        match label.as_str() {
            "Draft" => ContractStatus::Draft,
            "Active" => ContractStatus::Active,
            "Signed" => ContractStatus::Signed,
            "Expired" => ContractStatus::Expired,
            "Terminated" => ContractStatus::Terminated,
            _ => ContractStatus::Other(label),
        }
    }
}

impl From<&str> for ContractStatus {
    fn from(label: &str) -> Self {
        ContractStatus::from(label.to_string())
    }
}

impl From<ContractStatus> for String {
    fn from(status: ContractStatus) -> Self {
        status.label().to_string()
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// contract amount as stored: a number, a formatted string, or anything else
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
    #[default]
    Missing,
    Other(serde_json::Value),
}

impl From<f64> for RawAmount {
    fn from(n: f64) -> Self {
        RawAmount::Number(n)
    }
}

impl From<i64> for RawAmount {
    fn from(n: i64) -> Self {
        RawAmount::Number(n as f64)
    }
}

impl From<&str> for RawAmount {
    fn from(s: &str) -> Self {
        RawAmount::Text(s.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(s: String) -> Self {
        RawAmount::Text(s)
    }
}

/// one rent period of one occupant, consumed read-only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub tenant_name: String,
    #[serde(default)]
    pub tenant_type: TenantType,
    pub property: String,
    pub rent_amount: Money,
    #[serde(default)]
    pub contract_rent_amount: Option<Money>,
    #[serde(default)]
    pub paid_amount: Option<Money>,
    pub due_date: NaiveDate,
    pub status: PaymentStatus,
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PaymentRecord {
    pub fn new(
        tenant_name: impl Into<String>,
        property: impl Into<String>,
        rent_amount: Money,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            tenant_name: tenant_name.into(),
            tenant_type: TenantType::Tenant,
            property: property.into(),
            rent_amount,
            contract_rent_amount: None,
            paid_amount: None,
            due_date,
            status: PaymentStatus::Pending,
            payment_date: None,
            payment_method: None,
            notes: None,
        }
    }

    /// amount to bill when no contract backs this payment
    pub fn recorded_rent(&self) -> Money {
        self.contract_rent_amount.unwrap_or(self.rent_amount)
    }
}

/// lease contract as stored by the application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRecord {
    pub id: ContractId,
    pub tenant: String,
    pub property: String,
    #[serde(default)]
    pub amount: RawAmount,
    pub status: ContractStatus,
    #[serde(rename = "type", default)]
    pub contract_type: String,
    #[serde(default)]
    pub signed_at: Option<DateTime<Utc>>,
}

impl ContractRecord {
    pub fn new(
        id: impl Into<ContractId>,
        tenant: impl Into<String>,
        property: impl Into<String>,
        amount: impl Into<RawAmount>,
        status: impl Into<ContractStatus>,
    ) -> Self {
        Self {
            id: id.into(),
            tenant: tenant.into(),
            property: property.into(),
            amount: amount.into(),
            status: status.into(),
            contract_type: "lease".to_string(),
            signed_at: None,
        }
    }

    pub fn signed_at(mut self, at: DateTime<Utc>) -> Self {
        self.signed_at = Some(at);
        self
    }
}
