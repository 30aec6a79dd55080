use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ReceiptConfig;
use crate::errors::{ReconciliationError, RenderError, Result};
use crate::receipt::model::Receipt;

/// artifact produced by a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub file_name: String,
    pub content_type: String,
    /// reference the renderer assigned to this receipt
    pub reference: String,
    pub bytes: Vec<u8>,
}

/// external document rendering service
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    async fn render(
        &self,
        receipt: &Receipt,
        file_name: &str,
    ) -> std::result::Result<RenderedDocument, RenderError>;
}

/// renders receipts as pretty printed json
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

#[async_trait]
impl DocumentRenderer for JsonRenderer {
    async fn render(
        &self,
        receipt: &Receipt,
        file_name: &str,
    ) -> std::result::Result<RenderedDocument, RenderError> {
        let bytes = serde_json::to_vec_pretty(receipt)
            .map_err(|e| RenderError::Rejected(e.to_string()))?;
        let mut reference = receipt.id().simple().to_string();
        reference.truncate(12);

        Ok(RenderedDocument {
            file_name: file_name.to_string(),
            content_type: "application/json".to_string(),
            reference: reference.to_uppercase(),
            bytes,
        })
    }
}

/// validates receipts and hands them to a renderer, once, within a timeout
pub struct ReceiptEmitter<R> {
    renderer: R,
    config: ReceiptConfig,
}

impl<R: DocumentRenderer> ReceiptEmitter<R> {
    pub fn new(renderer: R, config: ReceiptConfig) -> Self {
        Self { renderer, config }
    }

    pub fn config(&self) -> &ReceiptConfig {
        &self.config
    }

    #[tracing::instrument(skip_all, fields(receipt_id = %receipt.id()))]
    pub async fn emit(&self, receipt: &Receipt) -> Result<RenderedDocument> {
        receipt.validate()?;

        let file_name = receipt.artifact_name(&self.config.kind, &self.config.extension);
        let rendered = tokio::time::timeout(
            self.config.render_timeout(),
            self.renderer.render(receipt, &file_name),
        )
        .await;

        match rendered {
            Ok(Ok(document)) => {
                tracing::info!(file_name = %document.file_name, reference = %document.reference, "receipt rendered");
                Ok(document)
            }
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "receipt rendering failed");
                Err(err.into())
            }
            Err(_) => {
                tracing::warn!(timeout_ms = self.config.render_timeout_ms, "receipt rendering timed out");
                Err(ReconciliationError::RenderTimeout {
                    timeout_ms: self.config.render_timeout_ms,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use crate::receipt::composer::{compose_receipt, PaymentData, TenantDetails};
    use crate::types::TenantType;
    use chrono::{NaiveDate, TimeZone, Utc};
    use hourglass_rs::{SafeTimeProvider, TimeSource};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn receipt(email: &str) -> Receipt {
        let time = SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2025, 3, 6, 9, 0, 0).unwrap()));
        compose_receipt(
            TenantDetails::new("Marie Dubois", TenantType::Tenant, email),
            "8 quai Saint-Vincent, Lyon",
            PaymentData {
                month: "March 2025".to_string(),
                rent_amount: Money::from_major(900),
                charges: Money::from_major(40),
                payment_date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
                payment_method: "Virement".to_string(),
            },
            &time,
        )
        .unwrap()
    }

    fn config(timeout_ms: u64) -> ReceiptConfig {
        ReceiptConfig {
            kind: "quittance".to_string(),
            extension: "json".to_string(),
            render_timeout_ms: timeout_ms,
        }
    }

    /// counts calls and answers with a fixed outcome
    struct StubRenderer {
        calls: Arc<AtomicUsize>,
        outcome: std::result::Result<(), RenderError>,
        delay: Option<Duration>,
    }

    impl StubRenderer {
        fn new(outcome: std::result::Result<(), RenderError>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (Self { calls: calls.clone(), outcome, delay: None }, calls)
        }
    }

    #[async_trait]
    impl DocumentRenderer for StubRenderer {
        async fn render(
            &self,
            _receipt: &Receipt,
            file_name: &str,
        ) -> std::result::Result<RenderedDocument, RenderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.outcome.clone().map(|_| RenderedDocument {
                file_name: file_name.to_string(),
                content_type: "application/pdf".to_string(),
                reference: "Q-2025-0042".to_string(),
                bytes: vec![0x25, 0x50, 0x44, 0x46],
            })
        }
    }

    #[tokio::test]
    async fn test_emit_success() {
        let (renderer, calls) = StubRenderer::new(Ok(()));
        let emitter = ReceiptEmitter::new(renderer, config(1_000));
        let document = emitter.emit(&receipt("marie.dubois@example.fr")).await.unwrap();
        assert_eq!(document.file_name, "quittance-2025-03-06.json");
        assert_eq!(document.reference, "Q-2025-0042");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_receipt_never_reaches_renderer() {
        let (renderer, calls) = StubRenderer::new(Ok(()));
        let emitter = ReceiptEmitter::new(renderer, config(1_000));
        let err = emitter.emit(&receipt("")).await.unwrap_err();
        assert!(matches!(err, ReconciliationError::InvalidReceipt { field: "tenant.email", .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_render_failure_is_surfaced_without_retry() {
        let (renderer, calls) = StubRenderer::new(Err(RenderError::QuotaExceeded));
        let emitter = ReceiptEmitter::new(renderer, config(1_000));
        let err = emitter.emit(&receipt("marie.dubois@example.fr")).await.unwrap_err();
        assert_eq!(
            err,
            ReconciliationError::RenderFailure { reason: "renderer quota exceeded".to_string() }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_renderer_times_out() {
        let (mut renderer, calls) = StubRenderer::new(Ok(()));
        renderer.delay = Some(Duration::from_secs(60));
        let emitter = ReceiptEmitter::new(renderer, config(50));
        let err = emitter.emit(&receipt("marie.dubois@example.fr")).await.unwrap_err();
        assert_eq!(err, ReconciliationError::RenderTimeout { timeout_ms: 50 });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_json_renderer() {
        let emitter = ReceiptEmitter::new(JsonRenderer, config(1_000));
        let receipt = receipt("marie.dubois@example.fr");
        let document = emitter.emit(&receipt).await.unwrap();
        assert_eq!(document.content_type, "application/json");
        assert_eq!(document.reference.len(), 12);

        let back: Receipt = serde_json::from_slice(&document.bytes).unwrap();
        assert_eq!(back, receipt);
    }
}
