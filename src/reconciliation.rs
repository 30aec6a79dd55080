use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::amount::{extract_amount, AmountSource, ExtractedAmount};
use crate::config::ReconciliationConfig;
use crate::decimal::Money;
use crate::errors::Result;
use crate::events::{Event, EventStore};
use crate::matching::ContractMatcher;
use crate::receipt::{
    compose_receipt, DocumentRenderer, PaymentData, Receipt, ReceiptEmitter, RenderedDocument,
    TenantDetails,
};
use crate::rent::{PaymentBalance, ReconciledAmount, RentCalculator};
use crate::types::{ContractId, ContractRecord, PaymentRecord};

/// how much attention a reconciliation needs from the person reading it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// backed by a contract with a readable amount
    Ok,
    /// contract found but its amount was unreadable, recorded amount used
    AmountDefaulted,
    /// no active contract found, using last recorded amount
    NoActiveContract,
}

/// outcome of matching one payment against the contracts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub contract_id: Option<ContractId>,
    pub amount: ExtractedAmount,
    pub rent: ReconciledAmount,
    pub balance: PaymentBalance,
    pub severity: Severity,
}

impl Reconciliation {
    /// payment data for the receipt of this reconciliation
    pub fn payment_data(
        &self,
        month: impl Into<String>,
        payment_date: NaiveDate,
        payment_method: impl Into<String>,
    ) -> PaymentData {
        PaymentData {
            month: month.into(),
            rent_amount: self.rent.base_rent,
            charges: self.rent.charges,
            payment_date,
            payment_method: payment_method.into(),
        }
    }
}

/// receipt together with the rendered artifact
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedReceipt {
    pub receipt: Receipt,
    pub document: RenderedDocument,
}

/// drives matching, amount extraction, rent computation and receipt issuance
#[derive(Debug, Clone)]
pub struct Reconciler {
    config: ReconciliationConfig,
    matcher: ContractMatcher,
    calculator: RentCalculator,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::from_validated(ReconciliationConfig::default())
    }
}

impl Reconciler {
    pub fn new(config: ReconciliationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: ReconciliationConfig) -> Self {
        Self {
            matcher: ContractMatcher::new(config.matching.tie_break),
            calculator: RentCalculator::with_deposit_months(config.deposit.months),
            config,
        }
    }

    pub fn config(&self) -> &ReconciliationConfig {
        &self.config
    }

    pub fn calculator(&self) -> &RentCalculator {
        &self.calculator
    }

    /// reconcile a payment that carries no separate charges
    pub fn reconcile(
        &self,
        payment: &PaymentRecord,
        contracts: &[ContractRecord],
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Reconciliation {
        self.reconcile_with_charges(payment, contracts, Money::ZERO, time_provider, events)
    }

    /// never fails: missing contracts and unreadable amounts degrade to the
    /// payment's recorded rent and are reported through `severity`
    #[tracing::instrument(
        skip_all,
        fields(tenant = %payment.tenant_name, property = %payment.property)
    )]
    pub fn reconcile_with_charges(
        &self,
        payment: &PaymentRecord,
        contracts: &[ContractRecord],
        charges: Money,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Reconciliation {
        let now = time_provider.now();
        let fallback = payment.recorded_rent();

        let (contract_id, amount, severity) = match self.matcher.find(payment, contracts) {
            Some(contract) => {
                let candidates = self.matcher.find_all(payment, contracts).len();
                if candidates > 1 {
                    tracing::warn!(
                        candidates,
                        chosen = %contract.id,
                        tie_break = ?self.matcher.tie_break(),
                        "several contracts in force for one payment"
                    );
                }
                events.emit(Event::ContractMatched {
                    contract_id: contract.id.clone(),
                    tenant: payment.tenant_name.clone(),
                    property: payment.property.clone(),
                    candidates,
                    timestamp: now,
                });

                let amount = extract_amount(&contract.amount, fallback);
                let severity = if amount.source == AmountSource::Fallback {
                    events.emit(Event::ContractAmountDefaulted {
                        contract_id: contract.id.clone(),
                        fallback_amount: fallback,
                        timestamp: now,
                    });
                    Severity::AmountDefaulted
                } else {
                    Severity::Ok
                };
                (Some(contract.id.clone()), amount, severity)
            }
            None => {
                tracing::info!(%fallback, "no active contract, using recorded amount");
                events.emit(Event::ContractNotFound {
                    tenant: payment.tenant_name.clone(),
                    property: payment.property.clone(),
                    fallback_amount: fallback,
                    timestamp: now,
                });
                let amount = ExtractedAmount {
                    value: fallback,
                    source: AmountSource::Fallback,
                };
                (None, amount, Severity::NoActiveContract)
            }
        };

        let rent = self.calculator.compute(amount.value, charges);
        let balance = self.calculator.reconcile_payment(rent.total_rent, payment.paid_amount);

        events.emit(Event::RentReconciled {
            tenant: payment.tenant_name.clone(),
            property: payment.property.clone(),
            total_rent: rent.total_rent,
            balance,
            timestamp: now,
        });
        tracing::debug!(total_rent = %rent.total_rent, ?balance, ?severity, "payment reconciled");

        Reconciliation {
            contract_id,
            amount,
            rent,
            balance,
            severity,
        }
    }

    /// compose a receipt and hand it to the emitter; emitter failures are returned as-is
    pub async fn issue_receipt<R: DocumentRenderer>(
        &self,
        emitter: &ReceiptEmitter<R>,
        tenant: TenantDetails,
        property_address: &str,
        payment: PaymentData,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<IssuedReceipt> {
        let receipt = compose_receipt(tenant, property_address, payment, time_provider)?;
        events.emit(Event::ReceiptComposed {
            receipt_id: receipt.id(),
            amount: receipt.payment().amount,
            period: receipt.payment().period.to_string(),
            timestamp: time_provider.now(),
        });

        match emitter.emit(&receipt).await {
            Ok(document) => {
                events.emit(Event::ReceiptEmitted {
                    receipt_id: receipt.id(),
                    reference: document.reference.clone(),
                    file_name: document.file_name.clone(),
                    timestamp: time_provider.now(),
                });
                Ok(IssuedReceipt { receipt, document })
            }
            Err(err) => {
                events.emit(Event::ReceiptEmissionFailed {
                    receipt_id: receipt.id(),
                    reason: err.to_string(),
                    retryable: err.is_retryable(),
                    timestamp: time_provider.now(),
                });
                Err(err)
            }
        }
    }
}
