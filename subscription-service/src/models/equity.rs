//! Derived financial views. Never persisted.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Recurring payment schedule for a contract.
///
/// Amounts carry full decimal precision so the schedule sums back to the
/// financed amount without drift; use [`PaymentPlan::rounded`] for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPlan {
    pub periods_total: u32,
    pub base_payment: Decimal,
    pub platform_fee: Decimal,
    pub total_per_payment: Decimal,
}

impl PaymentPlan {
    /// Display view with every amount rounded to cents.
    pub fn rounded(&self) -> PaymentPlan {
        let round = |d: Decimal| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        PaymentPlan {
            periods_total: self.periods_total,
            base_payment: round(self.base_payment),
            platform_fee: round(self.platform_fee),
            total_per_payment: round(self.total_per_payment),
        }
    }
}

/// Ownership position at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquitySnapshot {
    pub vehicle_price: Decimal,
    pub total_paid: Decimal,
    /// Raw ratio as a percentage; deliberately not capped at 100 so
    /// overpayment is visible to callers, who decide display clamping.
    pub ownership_percent: Decimal,
    pub remaining_balance: Decimal,
}
