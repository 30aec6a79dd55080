use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{ReconciliationError, Result};
use crate::matching::TieBreak;
use crate::rent::AmountFormat;

/// reconciliation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationConfig {
    pub matching: MatchingConfig,
    pub deposit: DepositConfig,
    pub receipt: ReceiptConfig,
    pub amount_format: AmountFormat,
}

/// contract matching policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub tie_break: TieBreak,
}

/// security deposit policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositConfig {
    /// months of all-in rent held as deposit, not prorated, not capped
    pub months: u32,
}

/// receipt issuance and rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptConfig {
    /// artifact kind used in `<kind>-<date>.<ext>` file names
    pub kind: String,
    pub extension: String,
    pub render_timeout_ms: u64,
}

impl ReceiptConfig {
    pub fn render_timeout(&self) -> Duration {
        Duration::from_millis(self.render_timeout_ms)
    }
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            matching: MatchingConfig {
                tie_break: TieBreak::FirstInList,
            },
            deposit: DepositConfig { months: 1 },
            receipt: ReceiptConfig {
                kind: "receipt".to_string(),
                extension: "pdf".to_string(),
                render_timeout_ms: 10_000,
            },
            amount_format: AmountFormat::english(),
        }
    }
}

impl ReconciliationConfig {
    /// french residential leases: "quittance" receipts, euro formatting
    pub fn french_residential() -> Self {
        Self {
            receipt: ReceiptConfig {
                kind: "quittance".to_string(),
                extension: "pdf".to_string(),
                render_timeout_ms: 15_000,
            },
            amount_format: AmountFormat::french(),
            ..Self::default()
        }
    }

    /// load from a json document and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            ReconciliationError::InvalidConfiguration {
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.deposit.months == 0 {
            return Err(ReconciliationError::InvalidConfiguration {
                message: "deposit must cover at least one month".to_string(),
            });
        }
        if self.receipt.render_timeout_ms == 0 {
            return Err(ReconciliationError::InvalidConfiguration {
                message: "render timeout must be positive".to_string(),
            });
        }
        if self.receipt.kind.trim().is_empty() || self.receipt.extension.trim().is_empty() {
            return Err(ReconciliationError::InvalidConfiguration {
                message: "receipt kind and extension are required".to_string(),
            });
        }
        Ok(())
    }
}
