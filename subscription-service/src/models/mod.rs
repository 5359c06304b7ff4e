//! Domain models for subscription-service.

mod equity;
mod subscription;

pub use equity::{EquitySnapshot, PaymentPlan};
pub use subscription::{
    CreateSubscription, PaymentFrequency, Subscription, SubscriptionStatus, Tier,
};
