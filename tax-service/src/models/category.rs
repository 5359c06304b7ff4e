//! Product tax category model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use service_core::store::Record;
use uuid::Uuid;
use validator::Validate;

/// Default taxability class for sellable items.
///
/// The linked item count is derived from catalog assignments and is not a
/// field here; see `CategoryCatalog::linked_item_count`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductTaxCategory {
    pub category_id: Uuid,
    /// Short unique code, e.g. "VEH" or "ACC".
    pub code: String,
    pub name: String,
    pub taxable_by_default: bool,
    pub created_utc: DateTime<Utc>,
}

impl Record for ProductTaxCategory {
    fn record_id(&self) -> Uuid {
        self.category_id
    }
}

/// Input for creating a product tax category.
#[derive(Debug, Clone, Validate)]
pub struct CreateProductTaxCategory {
    #[validate(length(min = 1, max = 16))]
    pub code: String,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub taxable_by_default: bool,
}
