//! Tax region model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service_core::store::Record;
use uuid::Uuid;
use validator::Validate;

/// Cadence at which collected tax is remitted to a jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingFrequency {
    Monthly,
    Quarterly,
    Annual,
}

impl FilingFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilingFrequency::Monthly => "monthly",
            FilingFrequency::Quarterly => "quarterly",
            FilingFrequency::Annual => "annual",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "monthly" => FilingFrequency::Monthly,
            "annual" => FilingFrequency::Annual,
            _ => FilingFrequency::Quarterly,
        }
    }

    /// Months between filing boundaries.
    pub fn months(&self) -> u32 {
        match self {
            FilingFrequency::Monthly => 1,
            FilingFrequency::Quarterly => 3,
            FilingFrequency::Annual => 12,
        }
    }
}

/// A jurisdiction the business collects (or may soon collect) tax in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRegion {
    pub region_id: Uuid,
    pub name: String,
    /// Two-letter jurisdiction code.
    pub code: String,
    pub country: String,
    /// Base tax rate as a decimal percentage (8.25 = 8.25%).
    pub base_rate: Decimal,
    pub collect_tax: bool,
    pub registered: bool,
    pub registration_number: Option<String>,
    /// Cumulative taxable sales attributed to this region.
    pub current_sales: Decimal,
    /// Nexus trigger: sales level above which registration becomes mandatory.
    pub threshold_amount: Decimal,
    /// Derived from `current_sales >= threshold_amount`; kept in sync by
    /// [`TaxRegion::recompute_threshold`] after every mutation, never set
    /// independently.
    pub threshold_met: bool,
    pub filing_frequency: FilingFrequency,
    pub next_filing_date: NaiveDate,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

impl TaxRegion {
    pub fn recompute_threshold(&mut self) {
        self.threshold_met = self.current_sales >= self.threshold_amount;
    }
}

impl Record for TaxRegion {
    fn record_id(&self) -> Uuid {
        self.region_id
    }
}

/// Input for creating a tax region.
#[derive(Debug, Clone, Validate)]
pub struct CreateTaxRegion {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(equal = 2))]
    pub code: String,
    #[validate(length(min = 2, max = 64))]
    pub country: String,
    pub base_rate: Decimal,
    pub collect_tax: bool,
    pub registered: bool,
    pub registration_number: Option<String>,
    pub threshold_amount: Decimal,
    pub filing_frequency: FilingFrequency,
    pub next_filing_date: NaiveDate,
}

/// Filter parameters for listing regions.
#[derive(Debug, Clone, Default)]
pub struct ListTaxRegionsFilter {
    pub country: Option<String>,
    pub collect_tax: Option<bool>,
    pub threshold_met: Option<bool>,
}
