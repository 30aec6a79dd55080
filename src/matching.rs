use serde::{Deserialize, Serialize};

use crate::types::{ContractRecord, PaymentRecord};

/// how to choose between several contracts in force for the same payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TieBreak {
    /// first qualifying contract in input order
    #[default]
    FirstInList,
    /// latest `signed_at`, contracts without a signing date rank last
    MostRecentlySigned,
}

/// finds the contract backing a payment
#[derive(Debug, Clone, Copy, Default)]
pub struct ContractMatcher {
    tie_break: TieBreak,
}

impl ContractMatcher {
    pub fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// exact tenant, exact property, status in force
    pub fn matches(payment: &PaymentRecord, contract: &ContractRecord) -> bool {
        contract.tenant == payment.tenant_name
            && contract.property == payment.property
            && contract.status.is_in_force()
    }

    /// every qualifying contract, in input order
    pub fn find_all<'a>(
        &self,
        payment: &PaymentRecord,
        contracts: &'a [ContractRecord],
    ) -> Vec<&'a ContractRecord> {
        contracts
            .iter()
            .filter(|c| Self::matches(payment, c))
            .collect()
    }

    /// the contract backing `payment`, `None` when nothing qualifies
    pub fn find<'a>(
        &self,
        payment: &PaymentRecord,
        contracts: &'a [ContractRecord],
    ) -> Option<&'a ContractRecord> {
        let mut candidates = contracts.iter().filter(|c| Self::matches(payment, c));

        match self.tie_break {
            TieBreak::FirstInList => candidates.next(),
            TieBreak::MostRecentlySigned => {
                let first = candidates.next()?;
                // strict comparison keeps the earlier contract on equal dates
                Some(candidates.fold(first, |best, c| {
                    if c.signed_at > best.signed_at {
                        c
                    } else {
                        best
                    }
                }))
            }
        }
    }
}

/// first-match lookup with the default policy
pub fn find_matching_contract<'a>(
    payment: &PaymentRecord,
    contracts: &'a [ContractRecord],
) -> Option<&'a ContractRecord> {
    ContractMatcher::default().find(payment, contracts)
}
