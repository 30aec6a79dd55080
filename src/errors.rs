use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReconciliationError {
    #[error("invalid receipt: {field} {reason}")]
    InvalidReceipt {
        field: &'static str,
        reason: String,
    },

    #[error("negative amount: {amount}")]
    NegativeAmount {
        amount: Money,
    },

    #[error("invalid billing period: {input:?}")]
    InvalidPeriod {
        input: String,
    },

    #[error("receipt rendering failed: {reason}")]
    RenderFailure {
        reason: String,
    },

    #[error("receipt rendering timed out after {timeout_ms}ms")]
    RenderTimeout {
        timeout_ms: u64,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

impl ReconciliationError {
    /// whether a fresh attempt with a recomposed receipt could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ReconciliationError::RenderFailure { .. } | ReconciliationError::RenderTimeout { .. }
        )
    }
}

/// error reported by a document renderer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("renderer rejected the receipt: {0}")]
    Rejected(String),

    #[error("renderer quota exceeded")]
    QuotaExceeded,

    #[error("renderer unavailable: {0}")]
    Unavailable(String),
}

impl From<RenderError> for ReconciliationError {
    fn from(err: RenderError) -> Self {
        ReconciliationError::RenderFailure {
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReconciliationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_keeps_reason() {
        let err: ReconciliationError = RenderError::Unavailable("503 from pdf service".to_string()).into();
        assert_eq!(
            err,
            ReconciliationError::RenderFailure {
                reason: "renderer unavailable: 503 from pdf service".to_string(),
            }
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn test_validation_errors_are_not_retryable() {
        let err = ReconciliationError::NegativeAmount { amount: Money::from_major(-5) };
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "negative amount: -5");
    }
}
