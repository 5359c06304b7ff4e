//! Tax region registry.
//!
//! Holds per-jurisdiction rate, registration status, accumulated revenue, and
//! filing cadence. `current_sales` is the one shared mutable counter in the
//! engine; all read-increment-write cycles go through [`DashMap::get_mut`],
//! which holds the shard write lock, so concurrent attributions to the same
//! region serialize. Regions are independent of each other.

use crate::models::{CreateTaxRegion, FilingFrequency, ListTaxRegionsFilter, TaxRegion};
use crate::services::filing::advance_filing_period;
use chrono::NaiveDate;
use dashmap::DashMap;
use rust_decimal::Decimal;
use service_core::auth::Authorizer;
use service_core::clock::Clock;
use service_core::error::AppError;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

/// Result of attributing a completed sale to a region.
#[derive(Debug, Clone)]
pub struct SaleOutcome {
    pub region: TaxRegion,
    /// True only on the call that moved `threshold_met` from false to true.
    pub crossed_threshold: bool,
}

#[derive(Debug, Default)]
pub struct TaxRegionRegistry {
    regions: DashMap<Uuid, TaxRegion>,
}

impl TaxRegionRegistry {
    pub fn new() -> Self {
        Self {
            regions: DashMap::new(),
        }
    }

    /// Hydrate the registry from records supplied by the record store.
    pub fn from_records(records: impl IntoIterator<Item = TaxRegion>) -> Self {
        let registry = Self::new();
        for mut region in records {
            region.recompute_threshold();
            registry.regions.insert(region.region_id, region);
        }
        registry
    }

    /// Create a region. Expanding into a jurisdiction is an admin action.
    #[instrument(skip(self, authorizer, clock, input), fields(code = %input.code))]
    pub fn create_region(
        &self,
        authorizer: &dyn Authorizer,
        actor_id: Uuid,
        input: CreateTaxRegion,
        clock: &dyn Clock,
    ) -> Result<TaxRegion, AppError> {
        if !authorizer.can_administer(actor_id) {
            warn!(actor_id = %actor_id, "Region creation denied");
            return Err(AppError::Forbidden(
                "actor may not manage tax regions".to_string(),
            ));
        }
        input.validate()?;
        if input.base_rate < Decimal::ZERO {
            return Err(AppError::InvalidAmount(format!(
                "base rate must be non-negative, got {}",
                input.base_rate
            )));
        }
        if input.threshold_amount < Decimal::ZERO {
            return Err(AppError::InvalidAmount(format!(
                "threshold amount must be non-negative, got {}",
                input.threshold_amount
            )));
        }

        let now = clock.now_utc();
        let mut region = TaxRegion {
            region_id: Uuid::new_v4(),
            name: input.name,
            code: input.code.to_uppercase(),
            country: input.country,
            base_rate: input.base_rate,
            collect_tax: input.collect_tax,
            registered: input.registered,
            registration_number: input.registration_number,
            current_sales: Decimal::ZERO,
            threshold_amount: input.threshold_amount,
            threshold_met: false,
            filing_frequency: input.filing_frequency,
            next_filing_date: input.next_filing_date,
            created_utc: now,
            updated_utc: now,
        };
        region.recompute_threshold();

        info!(region_id = %region.region_id, code = %region.code, "Tax region created");
        self.regions.insert(region.region_id, region.clone());
        Ok(region)
    }

    pub fn get(&self, region_id: Uuid) -> Result<TaxRegion, AppError> {
        self.regions
            .get(&region_id)
            .map(|r| r.value().clone())
            .ok_or(AppError::RegionNotFound(region_id))
    }

    pub fn list(&self, filter: &ListTaxRegionsFilter) -> Vec<TaxRegion> {
        let mut regions: Vec<TaxRegion> = self
            .regions
            .iter()
            .filter(|r| {
                filter
                    .country
                    .as_ref()
                    .is_none_or(|c| r.country.eq_ignore_ascii_case(c.as_str()))
                    && filter.collect_tax.is_none_or(|c| r.collect_tax == c)
                    && filter.threshold_met.is_none_or(|m| r.threshold_met == m)
            })
            .map(|r| r.value().clone())
            .collect();
        regions.sort_by(|a, b| a.code.cmp(&b.code));
        regions
    }

    /// Attribute a completed sale's taxable base to a region.
    ///
    /// Serialized per region via the shard write lock. Returns whether this
    /// call crossed the nexus threshold so the caller can notify exactly once.
    #[instrument(skip(self, clock), fields(region_id = %region_id, amount = %amount))]
    pub fn record_sale(
        &self,
        region_id: Uuid,
        amount: Decimal,
        clock: &dyn Clock,
    ) -> Result<SaleOutcome, AppError> {
        if amount < Decimal::ZERO {
            return Err(AppError::InvalidAmount(format!(
                "sale amount must be non-negative, got {}",
                amount
            )));
        }

        let mut region = self
            .regions
            .get_mut(&region_id)
            .ok_or(AppError::RegionNotFound(region_id))?;

        let was_met = region.threshold_met;
        region.current_sales += amount;
        region.recompute_threshold();
        region.updated_utc = clock.now_utc();
        let crossed_threshold = !was_met && region.threshold_met;

        if crossed_threshold {
            info!(
                region_id = %region.region_id,
                code = %region.code,
                current_sales = %region.current_sales,
                "Region crossed its nexus threshold"
            );
        }

        Ok(SaleOutcome {
            region: region.value().clone(),
            crossed_threshold,
        })
    }

    /// Roll a region's filing date forward one period after a filed return.
    #[instrument(skip(self, clock), fields(region_id = %region_id))]
    pub fn advance_filing(
        &self,
        region_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<NaiveDate, AppError> {
        let mut region = self
            .regions
            .get_mut(&region_id)
            .ok_or(AppError::RegionNotFound(region_id))?;

        let next = advance_filing_period(region.filing_frequency, region.next_filing_date);
        region.next_filing_date = next;
        region.updated_utc = clock.now_utc();
        info!(region_id = %region_id, next_filing_date = %next, "Filing period advanced");
        Ok(next)
    }

    pub fn set_registration(
        &self,
        region_id: Uuid,
        registered: bool,
        registration_number: Option<String>,
        clock: &dyn Clock,
    ) -> Result<TaxRegion, AppError> {
        let mut region = self
            .regions
            .get_mut(&region_id)
            .ok_or(AppError::RegionNotFound(region_id))?;
        region.registered = registered;
        region.registration_number = registration_number;
        region.updated_utc = clock.now_utc();
        Ok(region.value().clone())
    }

    pub fn set_filing_frequency(
        &self,
        region_id: Uuid,
        frequency: FilingFrequency,
        clock: &dyn Clock,
    ) -> Result<TaxRegion, AppError> {
        let mut region = self
            .regions
            .get_mut(&region_id)
            .ok_or(AppError::RegionNotFound(region_id))?;
        region.filing_frequency = frequency;
        region.updated_utc = clock.now_utc();
        Ok(region.value().clone())
    }

    /// Remove a region. Fails while the region still collects tax.
    #[instrument(skip(self, authorizer), fields(region_id = %region_id))]
    pub fn remove_region(
        &self,
        authorizer: &dyn Authorizer,
        actor_id: Uuid,
        region_id: Uuid,
    ) -> Result<(), AppError> {
        if !authorizer.can_administer(actor_id) {
            return Err(AppError::Forbidden(
                "actor may not manage tax regions".to_string(),
            ));
        }
        let region = self.get(region_id)?;
        if region.collect_tax {
            return Err(AppError::Conflict(format!(
                "region {} still collects tax and cannot be removed",
                region.code
            )));
        }
        self.regions.remove(&region_id);
        info!(region_id = %region_id, "Tax region removed");
        Ok(())
    }
}
