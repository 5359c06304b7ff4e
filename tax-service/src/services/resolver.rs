//! Tax override resolver.
//!
//! Pure lookup: at most one active override per scope target. Two or more
//! matching rules is a configuration error and fails loudly rather than
//! picking one arbitrarily.

use crate::models::{CreateTaxOverride, OverrideScope, TaxOverride};
use dashmap::DashMap;
use service_core::clock::Clock;
use service_core::error::AppError;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct OverrideResolver {
    overrides: DashMap<Uuid, TaxOverride>,
}

impl OverrideResolver {
    pub fn new() -> Self {
        Self {
            overrides: DashMap::new(),
        }
    }

    /// Hydrate the resolver from records supplied by the record store.
    pub fn from_records(records: impl IntoIterator<Item = TaxOverride>) -> Self {
        let resolver = Self::new();
        for record in records {
            resolver.overrides.insert(record.override_id, record);
        }
        resolver
    }

    #[instrument(skip(self, clock, input), fields(scope = %input.scope))]
    pub fn add_override(
        &self,
        input: CreateTaxOverride,
        clock: &dyn Clock,
    ) -> Result<TaxOverride, AppError> {
        if !input.exempt && input.custom_rate < rust_decimal::Decimal::ZERO {
            return Err(AppError::InvalidAmount(format!(
                "custom rate must be non-negative, got {}",
                input.custom_rate
            )));
        }

        let record = TaxOverride {
            override_id: Uuid::new_v4(),
            scope: input.scope,
            exempt: input.exempt,
            custom_rate: input.custom_rate,
            reason: input.reason,
            created_utc: clock.now_utc(),
        };
        info!(override_id = %record.override_id, scope = %record.scope, "Tax override added");
        self.overrides.insert(record.override_id, record.clone());
        Ok(record)
    }

    pub fn remove_override(&self, override_id: Uuid) -> Result<(), AppError> {
        self.overrides
            .remove(&override_id)
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("override {} not found", override_id)))?;
        Ok(())
    }

    /// Find the active override for a scope target, if any.
    ///
    /// Returns `AmbiguousOverride` when more than one rule matches; the
    /// precedence between duplicate rules is undefined and silently picking
    /// one would misstate collected tax.
    pub fn resolve(&self, scope: &OverrideScope) -> Result<Option<TaxOverride>, AppError> {
        let mut matches = self
            .overrides
            .iter()
            .filter(|o| o.scope == *scope)
            .map(|o| o.value().clone());

        let first = matches.next();
        let rest = matches.count();
        if rest > 0 {
            return Err(AppError::AmbiguousOverride {
                scope: scope.to_string(),
                count: rest + 1,
            });
        }
        Ok(first)
    }
}
