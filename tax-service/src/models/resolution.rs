//! Resolution inputs and output.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether an item is a sellable product or a shipping charge. Determines
/// which override scope an item-level lookup uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Product,
    Shipping,
}

/// Item descriptor handed in by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxableItem {
    pub id: Uuid,
    pub kind: ItemKind,
    /// Category code into the product tax category catalog, if assigned.
    pub category_code: Option<String>,
}

impl TaxableItem {
    pub fn product(id: Uuid, category_code: Option<String>) -> Self {
        Self {
            id,
            kind: ItemKind::Product,
            category_code,
        }
    }

    pub fn shipping(id: Uuid) -> Self {
        Self {
            id,
            kind: ItemKind::Shipping,
            category_code: None,
        }
    }
}

/// Customer descriptor handed in by the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TaxCustomer {
    pub customer_id: Uuid,
}

/// Outcome of a tax resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxResolution {
    /// Effective rate as a decimal percentage.
    pub effective_rate_percent: Decimal,
    /// Tax owed on the taxable base, rounded to cents.
    pub tax_amount: Decimal,
    /// True when an exemption (override or non-taxable category) applied.
    pub exempt: bool,
}

impl TaxResolution {
    /// Zero-rate resolution for regions that do not collect tax.
    pub fn not_collected() -> Self {
        Self {
            effective_rate_percent: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            exempt: false,
        }
    }
}
