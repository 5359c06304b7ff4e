//! Subscription lifecycle service.
//!
//! Applies manually reconciled payments to a contract and drives the status
//! state machine. Persistence of the mutated record is the caller's job.

use crate::models::{CreateSubscription, Subscription, SubscriptionStatus};
use crate::services::equity::{MAX_CONTRACT_MONTHS, MIN_CONTRACT_MONTHS};
use rust_decimal::Decimal;
use service_core::clock::Clock;
use service_core::error::AppError;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

pub struct LifecycleService;

impl LifecycleService {
    /// Build a new pending subscription from validated contract terms.
    #[instrument(skip(input, clock), fields(customer_id = %input.customer_id, vehicle_id = %input.vehicle_id))]
    pub fn open(input: CreateSubscription, clock: &dyn Clock) -> Result<Subscription, AppError> {
        // Contract-term violations surface as InvalidContract, matching the
        // equity calculator, before the field-level validator runs.
        if !(MIN_CONTRACT_MONTHS..=MAX_CONTRACT_MONTHS).contains(&input.contract_months) {
            return Err(AppError::InvalidContract(format!(
                "contract length must be {}-{} months, got {}",
                MIN_CONTRACT_MONTHS, MAX_CONTRACT_MONTHS, input.contract_months
            )));
        }
        input.validate()?;
        if input.vehicle_price <= Decimal::ZERO {
            return Err(AppError::InvalidAmount(format!(
                "vehicle price must be positive, got {}",
                input.vehicle_price
            )));
        }
        if input.down_payment < Decimal::ZERO || input.financing_fee < Decimal::ZERO {
            return Err(AppError::InvalidAmount(
                "down payment and financing fee must be non-negative".to_string(),
            ));
        }
        if input.down_payment >= input.vehicle_price {
            return Err(AppError::InvalidContract(format!(
                "down payment {} must be below vehicle price {}",
                input.down_payment, input.vehicle_price
            )));
        }

        let now = clock.now_utc();
        let subscription = Subscription {
            subscription_id: Uuid::new_v4(),
            customer_id: input.customer_id,
            vehicle_id: input.vehicle_id,
            tier: input.tier,
            contract_months: input.contract_months,
            payment_frequency: input.payment_frequency,
            vehicle_price: input.vehicle_price,
            down_payment: input.down_payment,
            financing_fee: input.financing_fee,
            total_paid: Decimal::ZERO,
            status: SubscriptionStatus::Pending,
            metadata: input.metadata,
            created_utc: now,
            updated_utc: now,
        };
        info!(subscription_id = %subscription.subscription_id, "Subscription opened");
        Ok(subscription)
    }

    /// Apply one accepted payment.
    ///
    /// First payment activates a pending contract; covering the vehicle price
    /// completes it. `total_paid` only ever grows.
    #[instrument(skip(subscription, clock), fields(subscription_id = %subscription.subscription_id, amount = %amount))]
    pub fn record_payment(
        subscription: &mut Subscription,
        amount: Decimal,
        clock: &dyn Clock,
    ) -> Result<SubscriptionStatus, AppError> {
        if amount <= Decimal::ZERO {
            return Err(AppError::InvalidAmount(format!(
                "payment amount must be positive, got {}",
                amount
            )));
        }
        match subscription.status {
            SubscriptionStatus::Pending | SubscriptionStatus::Active => {}
            status => {
                return Err(AppError::InvalidContract(format!(
                    "cannot accept payment on a {} subscription",
                    status.as_str()
                )));
            }
        }

        if subscription.status == SubscriptionStatus::Pending {
            subscription.status = SubscriptionStatus::Active;
            info!(subscription_id = %subscription.subscription_id, "Subscription activated");
        }

        subscription.total_paid += amount;
        if subscription.total_paid >= subscription.vehicle_price {
            subscription.status = SubscriptionStatus::Completed;
            info!(
                subscription_id = %subscription.subscription_id,
                total_paid = %subscription.total_paid,
                "Contract terms satisfied, subscription completed"
            );
        }
        subscription.updated_utc = clock.now_utc();
        Ok(subscription.status)
    }

    /// Cancel a pending or active subscription. Terminal states stay put.
    #[instrument(skip(subscription, clock), fields(subscription_id = %subscription.subscription_id))]
    pub fn cancel(subscription: &mut Subscription, clock: &dyn Clock) -> Result<(), AppError> {
        if subscription.status.is_terminal() {
            return Err(AppError::InvalidContract(format!(
                "cannot cancel a {} subscription",
                subscription.status.as_str()
            )));
        }
        subscription.status = SubscriptionStatus::Cancelled;
        subscription.updated_utc = clock.now_utc();
        info!(subscription_id = %subscription.subscription_id, "Subscription cancelled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaymentFrequency, Tier};
    use chrono::NaiveDate;
    use service_core::clock::FixedClock;

    fn test_clock() -> FixedClock {
        FixedClock::at_date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap())
    }

    fn contract() -> CreateSubscription {
        CreateSubscription {
            customer_id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            tier: Tier::Standard,
            contract_months: 3,
            payment_frequency: PaymentFrequency::Weekly,
            vehicle_price: Decimal::from(20_000),
            down_payment: Decimal::from(2_000),
            financing_fee: Decimal::from(150),
            metadata: None,
        }
    }

    #[test]
    fn first_payment_activates() {
        let clock = test_clock();
        let mut sub = LifecycleService::open(contract(), &clock).unwrap();
        assert_eq!(sub.status, SubscriptionStatus::Pending);

        let status =
            LifecycleService::record_payment(&mut sub, Decimal::from(1509), &clock).unwrap();
        assert_eq!(status, SubscriptionStatus::Active);
        assert_eq!(sub.total_paid, Decimal::from(1509));
    }

    #[test]
    fn covering_price_completes() {
        let clock = test_clock();
        let mut sub = LifecycleService::open(contract(), &clock).unwrap();

        LifecycleService::record_payment(&mut sub, Decimal::from(19_000), &clock).unwrap();
        assert_eq!(sub.status, SubscriptionStatus::Active);

        let status =
            LifecycleService::record_payment(&mut sub, Decimal::from(1_000), &clock).unwrap();
        assert_eq!(status, SubscriptionStatus::Completed);
    }

    #[test]
    fn total_paid_is_monotonic() {
        let clock = test_clock();
        let mut sub = LifecycleService::open(contract(), &clock).unwrap();

        let mut last = sub.total_paid;
        for _ in 0..5 {
            LifecycleService::record_payment(&mut sub, Decimal::from(100), &clock).unwrap();
            assert!(sub.total_paid > last);
            last = sub.total_paid;
        }

        // Rejected payments leave the total untouched.
        let before = sub.total_paid;
        assert!(LifecycleService::record_payment(&mut sub, Decimal::from(-5), &clock).is_err());
        assert_eq!(sub.total_paid, before);
    }

    #[test]
    fn completed_is_terminal() {
        let clock = test_clock();
        let mut sub = LifecycleService::open(contract(), &clock).unwrap();
        LifecycleService::record_payment(&mut sub, Decimal::from(20_000), &clock).unwrap();
        assert_eq!(sub.status, SubscriptionStatus::Completed);

        assert!(matches!(
            LifecycleService::record_payment(&mut sub, Decimal::from(1), &clock),
            Err(AppError::InvalidContract(_))
        ));
        assert!(matches!(
            LifecycleService::cancel(&mut sub, &clock),
            Err(AppError::InvalidContract(_))
        ));
    }

    #[test]
    fn cancelled_is_terminal() {
        let clock = test_clock();
        let mut sub = LifecycleService::open(contract(), &clock).unwrap();
        LifecycleService::cancel(&mut sub, &clock).unwrap();
        assert_eq!(sub.status, SubscriptionStatus::Cancelled);

        assert!(matches!(
            LifecycleService::record_payment(&mut sub, Decimal::from(100), &clock),
            Err(AppError::InvalidContract(_))
        ));
    }

    #[test]
    fn open_rejects_short_and_long_contracts() {
        let clock = test_clock();
        for months in [2, 7] {
            let mut input = contract();
            input.contract_months = months;
            // Same error kind as the equity calculator's range check.
            assert!(matches!(
                LifecycleService::open(input, &clock),
                Err(AppError::InvalidContract(_))
            ));
        }
    }
}
