//! Tax calculation service.
//!
//! Composes registry, resolver, and catalog into an effective rate for a
//! (jurisdiction, item, customer) triple. Precedence, highest first:
//!
//! 1. item-level override (product or shipping scope);
//! 2. customer-level override;
//! 3. category default taxability combined with the region base rate;
//! 4. region base rate when the item has neither category nor override.
//!
//! A resolution that cannot determine an unambiguous rate fails rather than
//! defaulting to 0% or the base rate.

use crate::models::{ItemKind, OverrideScope, TaxCustomer, TaxResolution, TaxableItem};
use crate::services::{CategoryCatalog, OverrideResolver, TaxRegionRegistry};
use rust_decimal::{Decimal, RoundingStrategy};
use service_core::clock::Clock;
use service_core::error::AppError;
use service_core::notify::{Notification, NotificationSink};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

const PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// Effective rate and how it was reached.
#[derive(Debug, Clone, Copy)]
enum ResolvedRate {
    Taxed(Decimal),
    Exempt,
}

pub struct TaxCalculationService {
    registry: Arc<TaxRegionRegistry>,
    resolver: Arc<OverrideResolver>,
    catalog: Arc<CategoryCatalog>,
    sink: Arc<dyn NotificationSink>,
}

impl TaxCalculationService {
    pub fn new(
        registry: Arc<TaxRegionRegistry>,
        resolver: Arc<OverrideResolver>,
        catalog: Arc<CategoryCatalog>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            registry,
            resolver,
            catalog,
            sink,
        }
    }

    pub fn registry(&self) -> &TaxRegionRegistry {
        &self.registry
    }

    /// Resolve the effective tax for one taxable event.
    ///
    /// On a successful non-exempt resolution the taxable base (not the tax
    /// amount) is added to the region's cumulative sales, and a
    /// threshold-crossed notification fires if this call moved the region
    /// over its nexus threshold. Callers must resolve each taxable event at
    /// most once; the engine does not deduplicate.
    #[instrument(
        skip(self, item, customer, clock),
        fields(region_id = %region_id, item_id = %item.id, taxable_base = %taxable_base)
    )]
    pub fn resolve_tax(
        &self,
        region_id: Uuid,
        item: &TaxableItem,
        customer: &TaxCustomer,
        taxable_base: Decimal,
        clock: &dyn Clock,
    ) -> Result<TaxResolution, AppError> {
        if taxable_base < Decimal::ZERO {
            return Err(AppError::InvalidAmount(format!(
                "taxable base must be non-negative, got {}",
                taxable_base
            )));
        }

        let region = self.registry.get(region_id)?;
        if !region.collect_tax {
            // Short-circuit: no rate, and threshold tracking is untouched.
            return Ok(TaxResolution::not_collected());
        }

        let resolved = self.resolve_rate(&region.base_rate, item, customer)?;
        let (effective_rate_percent, exempt) = match resolved {
            ResolvedRate::Taxed(rate) => (rate, false),
            ResolvedRate::Exempt => (Decimal::ZERO, true),
        };

        let tax_amount = (taxable_base * effective_rate_percent / PERCENT)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        if !exempt {
            let outcome = self.registry.record_sale(region_id, taxable_base, clock)?;
            if outcome.crossed_threshold {
                self.sink.notify(Notification::ThresholdCrossed {
                    region_id: outcome.region.region_id,
                    region_code: outcome.region.code.clone(),
                    current_sales: outcome.region.current_sales,
                    threshold_amount: outcome.region.threshold_amount,
                });
            }
        }

        info!(
            effective_rate_percent = %effective_rate_percent,
            tax_amount = %tax_amount,
            exempt = exempt,
            "Tax resolved"
        );

        Ok(TaxResolution {
            effective_rate_percent,
            tax_amount,
            exempt,
        })
    }

    fn resolve_rate(
        &self,
        base_rate: &Decimal,
        item: &TaxableItem,
        customer: &TaxCustomer,
    ) -> Result<ResolvedRate, AppError> {
        let item_scope = match item.kind {
            ItemKind::Product => OverrideScope::Product(item.id),
            ItemKind::Shipping => OverrideScope::Shipping(item.id),
        };

        // 1. Exact override for this item wins outright.
        if let Some(rule) = self.resolver.resolve(&item_scope)? {
            return Ok(Self::override_rate(rule.exempt, rule.custom_rate));
        }

        // 2. Customer-level override.
        let customer_scope = OverrideScope::Customer(customer.customer_id);
        if let Some(rule) = self.resolver.resolve(&customer_scope)? {
            return Ok(Self::override_rate(rule.exempt, rule.custom_rate));
        }

        // 3. Category default taxability, never a silent fallback when the
        //    code is dangling.
        if let Some(code) = &item.category_code {
            if let Some(rule) = self.resolver.resolve(&OverrideScope::Category(code.clone()))? {
                return Ok(Self::override_rate(rule.exempt, rule.custom_rate));
            }
            let category = self.catalog.get(code)?;
            return if category.taxable_by_default {
                Ok(ResolvedRate::Taxed(*base_rate))
            } else {
                Ok(ResolvedRate::Exempt)
            };
        }

        // 4. Region base rate.
        Ok(ResolvedRate::Taxed(*base_rate))
    }

    fn override_rate(exempt: bool, custom_rate: Decimal) -> ResolvedRate {
        if exempt {
            ResolvedRate::Exempt
        } else {
            ResolvedRate::Taxed(custom_rate)
        }
    }
}
