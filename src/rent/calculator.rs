use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, MONEY_SCALE};

/// authoritative amounts for one rent period, derived on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledAmount {
    pub base_rent: Money,
    pub charges: Money,
    /// base_rent + charges
    pub total_rent: Money,
    /// total_rent times the deposit months of the calculator
    pub security_deposit: Money,
}

/// what was paid compared with what was due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentBalance {
    /// nothing recorded as paid
    Unpaid,
    Settled,
    Underpaid { shortfall: Money },
    Overpaid { excess: Money },
}

/// rent and deposit calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentCalculator {
    deposit_months: u32,
}

impl Default for RentCalculator {
    fn default() -> Self {
        Self { deposit_months: 1 }
    }
}

impl RentCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// deposit held as `months` of all-in rent
    pub fn with_deposit_months(months: u32) -> Self {
        Self {
            deposit_months: months,
        }
    }

    pub fn deposit_months(&self) -> u32 {
        self.deposit_months
    }

    /// amounts are rounded to cents; results beyond the range of `Money`
    /// clamp to `Money::MAX` instead of overflowing
    pub fn compute(&self, base_rent: Money, charges: Money) -> ReconciledAmount {
        let base_rent = base_rent.round_dp(MONEY_SCALE);
        let charges = charges.round_dp(MONEY_SCALE);
        let total_rent = base_rent.checked_add(charges).unwrap_or_else(|| {
            tracing::warn!(%base_rent, %charges, "total rent out of range, clamped");
            saturated(base_rent)
        });
        let security_deposit = total_rent
            .checked_mul(Decimal::from(self.deposit_months))
            .unwrap_or_else(|| saturated(total_rent));

        ReconciledAmount {
            base_rent,
            charges,
            total_rent,
            security_deposit,
        }
    }

    /// compute from untyped figures, NaN and infinities count as zero
    pub fn compute_lossy(&self, base_rent: f64, charges: f64) -> ReconciledAmount {
        self.compute(Money::from_f64_lossy(base_rent), Money::from_f64_lossy(charges))
    }

    /// compare the amount actually paid against the total due
    pub fn reconcile_payment(&self, due: Money, paid: Option<Money>) -> PaymentBalance {
        let paid = match paid {
            Some(p) if !p.is_zero() => p,
            _ => return PaymentBalance::Unpaid,
        };

        if paid == due {
            PaymentBalance::Settled
        } else if paid < due {
            PaymentBalance::Underpaid { shortfall: due - paid }
        } else {
            PaymentBalance::Overpaid { excess: paid - due }
        }
    }
}

fn saturated(sign_of: Money) -> Money {
    if sign_of.is_negative() {
        Money::MIN
    } else {
        Money::MAX
    }
}

/// compute rent with the one-month deposit policy
pub fn compute_rent(base_rent: f64, charges: f64) -> ReconciledAmount {
    RentCalculator::default().compute_lossy(base_rent, charges)
}
