use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::receipt::ReceiptId;
use crate::rent::PaymentBalance;
use crate::types::ContractId;

/// all events emitted while reconciling payments and issuing receipts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // matching events
    ContractMatched {
        contract_id: ContractId,
        tenant: String,
        property: String,
        candidates: usize,
        timestamp: DateTime<Utc>,
    },
    ContractNotFound {
        tenant: String,
        property: String,
        fallback_amount: Money,
        timestamp: DateTime<Utc>,
    },
    ContractAmountDefaulted {
        contract_id: ContractId,
        fallback_amount: Money,
        timestamp: DateTime<Utc>,
    },

    // amount events
    RentReconciled {
        tenant: String,
        property: String,
        total_rent: Money,
        balance: PaymentBalance,
        timestamp: DateTime<Utc>,
    },

    // receipt events
    ReceiptComposed {
        receipt_id: ReceiptId,
        amount: Money,
        period: String,
        timestamp: DateTime<Utc>,
    },
    ReceiptEmitted {
        receipt_id: ReceiptId,
        reference: String,
        file_name: String,
        timestamp: DateTime<Utc>,
    },
    ReceiptEmissionFailed {
        receipt_id: ReceiptId,
        reason: String,
        retryable: bool,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
