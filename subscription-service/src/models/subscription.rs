//! Subscription model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service_core::store::Record;
use uuid::Uuid;
use validator::Validate;

/// Subscription financial status.
///
/// `pending → active` on the first accepted payment; `active → completed`
/// once `total_paid` covers the vehicle price; `active → cancelled` by admin
/// or customer action. `completed` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Pending => "pending",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Completed => "completed",
            SubscriptionStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "active" => SubscriptionStatus::Active,
            "completed" => SubscriptionStatus::Completed,
            "cancelled" => SubscriptionStatus::Cancelled,
            _ => SubscriptionStatus::Pending,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubscriptionStatus::Completed | SubscriptionStatus::Cancelled
        )
    }
}

/// How often a recurring payment falls due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    Weekly,
    Biweekly,
    Monthly,
}

impl PaymentFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentFrequency::Weekly => "weekly",
            PaymentFrequency::Biweekly => "biweekly",
            PaymentFrequency::Monthly => "monthly",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "weekly" => PaymentFrequency::Weekly,
            "biweekly" => PaymentFrequency::Biweekly,
            _ => PaymentFrequency::Monthly,
        }
    }

    /// Payments per contract month. Weekly uses the fixed 4-weeks-per-month
    /// approximation; see `services::equity::WEEKS_PER_MONTH`.
    pub fn periods_per_month(&self) -> u32 {
        match self {
            PaymentFrequency::Weekly => crate::services::equity::WEEKS_PER_MONTH,
            PaymentFrequency::Biweekly => 2,
            PaymentFrequency::Monthly => 1,
        }
    }
}

/// Subscription tier, which sets the early-buyout discount schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Standard,
    Premium,
    Military,
    PremiumPlus,
    Lifetime,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Standard => "standard",
            Tier::Premium => "premium",
            Tier::Military => "military",
            Tier::PremiumPlus => "premium_plus",
            Tier::Lifetime => "lifetime",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "premium" => Tier::Premium,
            "military" => Tier::Military,
            "premium_plus" => Tier::PremiumPlus,
            "lifetime" => Tier::Lifetime,
            _ => Tier::Standard,
        }
    }

    /// Early-buyout discount applied to the remaining balance, as a fraction.
    /// The buyout calculation itself is tier-agnostic; callers pass this in.
    pub fn buyout_discount_rate(&self) -> Decimal {
        match self {
            Tier::Standard | Tier::Premium => Decimal::new(25, 2), // 25%
            Tier::Military | Tier::PremiumPlus => Decimal::new(30, 2), // 30%
            Tier::Lifetime => Decimal::new(50, 2),                 // 50%
        }
    }
}

/// A subscription-to-own contract between one customer and one vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub subscription_id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub tier: Tier,
    /// Contract length in months, 3 to 6.
    pub contract_months: u32,
    pub payment_frequency: PaymentFrequency,
    pub vehicle_price: Decimal,
    pub down_payment: Decimal,
    pub financing_fee: Decimal,
    /// Monotonically non-decreasing while the subscription is active.
    pub total_paid: Decimal,
    pub status: SubscriptionStatus,
    pub metadata: Option<serde_json::Value>,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

impl Record for Subscription {
    fn record_id(&self) -> Uuid {
        self.subscription_id
    }
}

/// Input for creating a subscription.
#[derive(Debug, Clone, Validate)]
pub struct CreateSubscription {
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub tier: Tier,
    #[validate(range(min = 3, max = 6))]
    pub contract_months: u32,
    pub payment_frequency: PaymentFrequency,
    pub vehicle_price: Decimal,
    pub down_payment: Decimal,
    pub financing_fee: Decimal,
    pub metadata: Option<serde_json::Value>,
}
