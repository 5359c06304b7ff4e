//! Cross-crate workflow integration tests library.
//!
//! Fixtures shared by the tests in `tests/`: a wired-up tax engine backed by
//! a buffered notification sink and a fixed clock, plus contract builders.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use service_core::auth::AllowAll;
use service_core::clock::FixedClock;
use service_core::notify::BufferedSink;
use std::sync::{Arc, Once};
use subscription_service::models::{CreateSubscription, PaymentFrequency, Tier};
use tax_service::models::{CreateProductTaxCategory, CreateTaxRegion, FilingFrequency, TaxRegion};
use tax_service::services::{
    CategoryCatalog, OverrideResolver, TaxCalculationService, TaxRegionRegistry,
};
use uuid::Uuid;

pub const VEHICLE_CATEGORY: &str = "VEH";
pub const SERVICE_CATEGORY: &str = "SVC";

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,workflow_tests=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Fully wired engine for workflow tests.
pub struct TestEngine {
    pub registry: Arc<TaxRegionRegistry>,
    pub resolver: Arc<OverrideResolver>,
    pub catalog: Arc<CategoryCatalog>,
    pub sink: Arc<BufferedSink>,
    pub calculation: TaxCalculationService,
    pub clock: FixedClock,
}

impl TestEngine {
    pub fn new() -> Self {
        init_tracing();
        let clock = FixedClock::at_date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        let registry = Arc::new(TaxRegionRegistry::new());
        let resolver = Arc::new(OverrideResolver::new());
        let catalog = Arc::new(CategoryCatalog::new());
        let sink = Arc::new(BufferedSink::new());

        catalog
            .add_category(
                CreateProductTaxCategory {
                    code: VEHICLE_CATEGORY.to_string(),
                    name: "Vehicles".to_string(),
                    taxable_by_default: true,
                },
                &clock,
            )
            .expect("Failed to seed vehicle category");
        catalog
            .add_category(
                CreateProductTaxCategory {
                    code: SERVICE_CATEGORY.to_string(),
                    name: "Service plans".to_string(),
                    taxable_by_default: false,
                },
                &clock,
            )
            .expect("Failed to seed service category");

        let calculation = TaxCalculationService::new(
            registry.clone(),
            resolver.clone(),
            catalog.clone(),
            sink.clone(),
        );

        Self {
            registry,
            resolver,
            catalog,
            sink,
            calculation,
            clock,
        }
    }

    /// Seed a collecting region and return it.
    pub fn seed_region(&self, code: &str, base_rate: Decimal, threshold: Decimal) -> TaxRegion {
        self.registry
            .create_region(
                &AllowAll,
                Uuid::new_v4(),
                CreateTaxRegion {
                    name: format!("Region {}", code),
                    code: code.to_string(),
                    country: "US".to_string(),
                    base_rate,
                    collect_tax: true,
                    registered: true,
                    registration_number: Some(format!("{}-0001", code)),
                    threshold_amount: threshold,
                    filing_frequency: FilingFrequency::Quarterly,
                    next_filing_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
                },
                &self.clock,
            )
            .expect("Failed to seed region")
    }
}

impl Default for TestEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Standard three-month weekly contract on a 20k vehicle.
pub fn standard_contract() -> CreateSubscription {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_wires_up() {
        let engine = TestEngine::new();
        assert!(engine.catalog.get(VEHICLE_CATEGORY).is_ok());
        assert!(engine.sink.events().is_empty());
    }
}
