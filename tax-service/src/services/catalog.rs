//! Product tax category catalog.
//!
//! Maps a sellable item to its default taxability class. Item assignments are
//! held here so the linked item count is always recomputed, never stored.

use crate::models::{CreateProductTaxCategory, ProductTaxCategory};
use dashmap::DashMap;
use service_core::clock::Clock;
use service_core::error::AppError;
use std::collections::HashSet;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Default)]
pub struct CategoryCatalog {
    categories: DashMap<String, ProductTaxCategory>,
    assignments: DashMap<String, HashSet<Uuid>>,
}

impl CategoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate the catalog from records supplied by the record store.
    pub fn from_records(records: impl IntoIterator<Item = ProductTaxCategory>) -> Self {
        let catalog = Self::new();
        for record in records {
            catalog.categories.insert(record.code.clone(), record);
        }
        catalog
    }

    #[instrument(skip(self, clock, input), fields(code = %input.code))]
    pub fn add_category(
        &self,
        input: CreateProductTaxCategory,
        clock: &dyn Clock,
    ) -> Result<ProductTaxCategory, AppError> {
        input.validate()?;
        let code = input.code.to_uppercase();
        if self.categories.contains_key(&code) {
            return Err(AppError::Conflict(format!(
                "category code {} already exists",
                code
            )));
        }

        let category = ProductTaxCategory {
            category_id: Uuid::new_v4(),
            code: code.clone(),
            name: input.name,
            taxable_by_default: input.taxable_by_default,
            created_utc: clock.now_utc(),
        };
        info!(category_id = %category.category_id, code = %code, "Tax category added");
        self.categories.insert(code, category.clone());
        Ok(category)
    }

    /// Look up a category by code. A dangling code is an error, not a silent
    /// fallback to the region base rate.
    pub fn get(&self, code: &str) -> Result<ProductTaxCategory, AppError> {
        self.categories
            .get(&code.to_uppercase())
            .map(|c| c.value().clone())
            .ok_or_else(|| AppError::CategoryNotFound(code.to_string()))
    }

    pub fn list(&self) -> Vec<ProductTaxCategory> {
        let mut categories: Vec<ProductTaxCategory> =
            self.categories.iter().map(|c| c.value().clone()).collect();
        categories.sort_by(|a, b| a.code.cmp(&b.code));
        categories
    }

    pub fn assign_item(&self, code: &str, item_id: Uuid) -> Result<(), AppError> {
        let code = code.to_uppercase();
        if !self.categories.contains_key(&code) {
            return Err(AppError::CategoryNotFound(code));
        }
        self.assignments.entry(code).or_default().insert(item_id);
        Ok(())
    }

    pub fn unassign_item(&self, code: &str, item_id: Uuid) {
        if let Some(mut items) = self.assignments.get_mut(&code.to_uppercase()) {
            items.remove(&item_id);
        }
    }

    /// Derived count of items assigned to a category.
    pub fn linked_item_count(&self, code: &str) -> usize {
        self.assignments
            .get(&code.to_uppercase())
            .map(|items| items.len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use service_core::clock::FixedClock;

    fn test_clock() -> FixedClock {
        FixedClock::at_date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap())
    }

    fn vehicles() -> CreateProductTaxCategory {
        CreateProductTaxCategory {
            code: "veh".to_string(),
            name: "Vehicles".to_string(),
            taxable_by_default: true,
        }
    }

    #[test]
    fn codes_are_unique_and_case_insensitive() {
        let catalog = CategoryCatalog::new();
        let clock = test_clock();
        catalog.add_category(vehicles(), &clock).unwrap();

        let mut dup = vehicles();
        dup.code = "VEH".to_string();
        assert!(matches!(
            catalog.add_category(dup, &clock),
            Err(AppError::Conflict(_))
        ));

        assert!(catalog.get("veh").is_ok());
        assert!(catalog.get("VEH").is_ok());
    }

    #[test]
    fn missing_category_is_an_error() {
        let catalog = CategoryCatalog::new();
        assert!(matches!(
            catalog.get("ACC"),
            Err(AppError::CategoryNotFound(code)) if code == "ACC"
        ));
    }

    #[test]
    fn linked_item_count_is_recomputed() {
        let catalog = CategoryCatalog::new();
        let clock = test_clock();
        catalog.add_category(vehicles(), &clock).unwrap();

        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        catalog.assign_item("VEH", a).unwrap();
        catalog.assign_item("VEH", b).unwrap();
        catalog.assign_item("VEH", b).unwrap(); // re-assignment is not double-counted
        assert_eq!(catalog.linked_item_count("VEH"), 2);

        catalog.unassign_item("VEH", a);
        assert_eq!(catalog.linked_item_count("VEH"), 1);
    }

    #[test]
    fn assigning_to_missing_category_fails() {
        let catalog = CategoryCatalog::new();
        assert!(matches!(
            catalog.assign_item("ACC", Uuid::new_v4()),
            Err(AppError::CategoryNotFound(_))
        ));
    }
}
