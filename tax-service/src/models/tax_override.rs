//! Tax override model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service_core::store::Record;
use uuid::Uuid;

/// What an override attaches to.
///
/// Kept as a tagged sum type so the precedence match in the calculation
/// service is exhaustive rather than driven by optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", content = "target", rename_all = "snake_case")]
pub enum OverrideScope {
    Product(Uuid),
    Shipping(Uuid),
    Customer(Uuid),
    Category(String),
}

impl OverrideScope {
    pub fn kind(&self) -> &'static str {
        match self {
            OverrideScope::Product(_) => "product",
            OverrideScope::Shipping(_) => "shipping",
            OverrideScope::Customer(_) => "customer",
            OverrideScope::Category(_) => "category",
        }
    }
}

impl std::fmt::Display for OverrideScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverrideScope::Product(id) => write!(f, "product:{}", id),
            OverrideScope::Shipping(id) => write!(f, "shipping:{}", id),
            OverrideScope::Customer(id) => write!(f, "customer:{}", id),
            OverrideScope::Category(code) => write!(f, "category:{}", code),
        }
    }
}

/// A rule superseding the default tax treatment for its scope target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxOverride {
    pub override_id: Uuid,
    pub scope: OverrideScope,
    /// When true the effective rate is 0 regardless of `custom_rate`.
    pub exempt: bool,
    /// Decimal percentage; meaningless when `exempt` is set.
    pub custom_rate: Decimal,
    pub reason: Option<String>,
    pub created_utc: DateTime<Utc>,
}

impl Record for TaxOverride {
    fn record_id(&self) -> Uuid {
        self.override_id
    }
}

/// Input for creating a tax override.
#[derive(Debug, Clone)]
pub struct CreateTaxOverride {
    pub scope: OverrideScope,
    pub exempt: bool,
    pub custom_rate: Decimal,
    pub reason: Option<String>,
}
