//! Equity calculator.
//!
//! Pure contract arithmetic: recurring payment amount, platform fee,
//! ownership progress, and early-buyout pricing.

use crate::models::{EquitySnapshot, PaymentFrequency, PaymentPlan};
use rust_decimal::Decimal;
use service_core::config::Config;
use service_core::error::AppError;
use tracing::instrument;

/// Weekly contracts bill 4 times per contract month. This is a deliberate
/// business simplification, not calendar-exact weeks: changing it changes
/// customer-facing payment amounts.
pub const WEEKS_PER_MONTH: u32 = 4;

pub const MIN_CONTRACT_MONTHS: u32 = 3;
pub const MAX_CONTRACT_MONTHS: u32 = 6;
const PERCENT: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone)]
pub struct EquityCalculator {
    platform_fee_rate: Decimal,
}

impl EquityCalculator {
    pub fn new(platform_fee_rate: Decimal) -> Self {
        Self { platform_fee_rate }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.platform_fee_rate)
    }

    /// Recurring payment schedule for a contract.
    #[instrument(skip(self), fields(
        vehicle_price = %vehicle_price,
        down_payment = %down_payment,
        contract_months = contract_months,
        frequency = frequency.as_str()
    ))]
    pub fn compute_payment_plan(
        &self,
        vehicle_price: Decimal,
        down_payment: Decimal,
        contract_months: u32,
        frequency: PaymentFrequency,
    ) -> Result<PaymentPlan, AppError> {
        if vehicle_price <= Decimal::ZERO {
            return Err(AppError::InvalidAmount(format!(
                "vehicle price must be positive, got {}",
                vehicle_price
            )));
        }
        if down_payment < Decimal::ZERO {
            return Err(AppError::InvalidAmount(format!(
                "down payment must be non-negative, got {}",
                down_payment
            )));
        }
        if !(MIN_CONTRACT_MONTHS..=MAX_CONTRACT_MONTHS).contains(&contract_months) {
            return Err(AppError::InvalidContract(format!(
                "contract length must be {}-{} months, got {}",
                MIN_CONTRACT_MONTHS, MAX_CONTRACT_MONTHS, contract_months
            )));
        }
        if down_payment >= vehicle_price {
            return Err(AppError::InvalidContract(format!(
                "down payment {} must be below vehicle price {}",
                down_payment, vehicle_price
            )));
        }

        let periods_total = contract_months * frequency.periods_per_month();
        if periods_total == 0 {
            return Err(AppError::InvalidContract(
                "contract yields no payment periods".to_string(),
            ));
        }

        let base_payment = (vehicle_price - down_payment) / Decimal::from(periods_total);
        let platform_fee = base_payment * self.platform_fee_rate;
        let total_per_payment = base_payment + platform_fee;

        Ok(PaymentPlan {
            periods_total,
            base_payment,
            platform_fee,
            total_per_payment,
        })
    }

    /// Ownership position for a contract. The percentage is the raw ratio;
    /// overpayment shows as > 100 rather than being hidden here.
    pub fn compute_equity(
        &self,
        vehicle_price: Decimal,
        total_paid: Decimal,
    ) -> Result<EquitySnapshot, AppError> {
        if vehicle_price <= Decimal::ZERO {
            return Err(AppError::InvalidAmount(format!(
                "vehicle price must be positive, got {}",
                vehicle_price
            )));
        }
        if total_paid < Decimal::ZERO {
            return Err(AppError::InvalidAmount(format!(
                "total paid must be non-negative, got {}",
                total_paid
            )));
        }

        Ok(EquitySnapshot {
            vehicle_price,
            total_paid,
            ownership_percent: total_paid / vehicle_price * PERCENT,
            remaining_balance: vehicle_price - total_paid,
        })
    }

    /// Early-buyout price: the remaining balance discounted by a rate the
    /// caller supplies (tier schedules live with the caller, e.g.
    /// `Tier::buyout_discount_rate`).
    pub fn compute_early_buyout(
        &self,
        remaining_balance: Decimal,
        discount_rate: Decimal,
    ) -> Result<Decimal, AppError> {
        if !(Decimal::ZERO..=Decimal::ONE).contains(&discount_rate) {
            return Err(AppError::InvalidAmount(format!(
                "discount rate must be within [0, 1], got {}",
                discount_rate
            )));
        }
        Ok(remaining_balance * (Decimal::ONE - discount_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator() -> EquityCalculator {
        // Default platform fee: 0.6%.
        EquityCalculator::new(Decimal::new(6, 3))
    }

    fn money(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn weekly_plan_matches_reference_figures() {
        let plan = calculator()
            .compute_payment_plan(
                Decimal::from(20_000),
                Decimal::from(2_000),
                3,
                PaymentFrequency::Weekly,
            )
            .unwrap();

        assert_eq!(plan.periods_total, 12);
        assert_eq!(plan.base_payment, money("1500.00"));
        assert_eq!(plan.platform_fee, money("9.00"));
        assert_eq!(plan.total_per_payment, money("1509.00"));
    }

    #[test]
    fn biweekly_and_monthly_period_counts() {
        let calc = calculator();
        let biweekly = calc
            .compute_payment_plan(
                Decimal::from(12_000),
                Decimal::ZERO,
                6,
                PaymentFrequency::Biweekly,
            )
            .unwrap();
        assert_eq!(biweekly.periods_total, 12);

        let monthly = calc
            .compute_payment_plan(
                Decimal::from(12_000),
                Decimal::ZERO,
                6,
                PaymentFrequency::Monthly,
            )
            .unwrap();
        assert_eq!(monthly.periods_total, 6);
        assert_eq!(monthly.base_payment, Decimal::from(2_000));
    }

    #[test]
    fn schedule_sums_back_to_vehicle_price() {
        let calc = calculator();
        let one_cent = Decimal::new(1, 2);
        let cases = [
            (money("20000"), money("2000"), 3, PaymentFrequency::Weekly),
            (money("18999.99"), money("1234.56"), 5, PaymentFrequency::Weekly),
            (money("9500.50"), money("500.50"), 4, PaymentFrequency::Biweekly),
            (money("31000"), money("0"), 6, PaymentFrequency::Monthly),
            (money("10000"), money("1"), 3, PaymentFrequency::Weekly),
        ];

        for (price, down, months, frequency) in cases {
            let plan = calc
                .compute_payment_plan(price, down, months, frequency)
                .unwrap();
            let total = plan.base_payment * Decimal::from(plan.periods_total) + down;
            assert!(
                (total - price).abs() <= one_cent,
                "schedule drifted: {} vs {}",
                total,
                price
            );
        }
    }

    #[test]
    fn rounded_plan_displays_cents() {
        // 10000 / 12 repeats, so the plan itself carries full precision.
        let plan = calculator()
            .compute_payment_plan(
                Decimal::from(10_000),
                Decimal::ZERO,
                3,
                PaymentFrequency::Weekly,
            )
            .unwrap();
        assert_ne!(plan.base_payment, money("833.33"));

        let display = plan.rounded();
        assert_eq!(display.periods_total, 12);
        assert_eq!(display.base_payment, money("833.33"));
        assert_eq!(display.platform_fee, money("5.00"));
        assert_eq!(display.total_per_payment, money("838.33"));
    }

    #[test]
    fn rounded_plan_rounds_midpoints_away_from_zero() {
        let display = PaymentPlan {
            periods_total: 1,
            base_payment: money("100.005"),
            platform_fee: money("0.005"),
            total_per_payment: money("100.010"),
        }
        .rounded();

        assert_eq!(display.base_payment, money("100.01"));
        assert_eq!(display.platform_fee, money("0.01"));
        assert_eq!(display.total_per_payment, money("100.01"));
    }

    #[test]
    fn down_payment_at_or_above_price_is_invalid() {
        let calc = calculator();
        let result = calc.compute_payment_plan(
            Decimal::from(10_000),
            Decimal::from(10_000),
            3,
            PaymentFrequency::Monthly,
        );
        assert!(matches!(result, Err(AppError::InvalidContract(_))));
    }

    #[test]
    fn contract_length_outside_3_to_6_is_invalid() {
        let calc = calculator();
        for months in [0, 2, 7, 12] {
            let result = calc.compute_payment_plan(
                Decimal::from(10_000),
                Decimal::from(1_000),
                months,
                PaymentFrequency::Monthly,
            );
            assert!(
                matches!(result, Err(AppError::InvalidContract(_))),
                "{} months should be rejected",
                months
            );
        }
    }

    #[test]
    fn equity_matches_reference_figures() {
        let snapshot = calculator()
            .compute_equity(Decimal::from(20_000), Decimal::from(7_000))
            .unwrap();

        assert_eq!(snapshot.ownership_percent, Decimal::from(35));
        assert_eq!(snapshot.remaining_balance, Decimal::from(13_000));
    }

    #[test]
    fn overpayment_is_visible_not_clamped() {
        let snapshot = calculator()
            .compute_equity(Decimal::from(10_000), Decimal::from(11_000))
            .unwrap();

        assert_eq!(snapshot.ownership_percent, Decimal::from(110));
        assert_eq!(snapshot.remaining_balance, Decimal::from(-1_000));
    }

    #[test]
    fn equity_rejects_non_positive_price() {
        let calc = calculator();
        assert!(matches!(
            calc.compute_equity(Decimal::ZERO, Decimal::from(1)),
            Err(AppError::InvalidAmount(_))
        ));
        assert!(matches!(
            calc.compute_equity(Decimal::from(-5), Decimal::from(1)),
            Err(AppError::InvalidAmount(_))
        ));
    }

    #[test]
    fn early_buyout_matches_reference_figures() {
        let buyout = calculator()
            .compute_early_buyout(Decimal::from(13_000), money("0.25"))
            .unwrap();
        assert_eq!(buyout, Decimal::from(9_750));
    }

    #[test]
    fn early_buyout_rejects_out_of_range_discount() {
        let calc = calculator();
        assert!(matches!(
            calc.compute_early_buyout(Decimal::from(1_000), money("1.5")),
            Err(AppError::InvalidAmount(_))
        ));
        assert!(matches!(
            calc.compute_early_buyout(Decimal::from(1_000), money("-0.1")),
            Err(AppError::InvalidAmount(_))
        ));
    }
}
