//! Domain models for tax-service.

mod category;
mod region;
mod resolution;
mod tax_override;

pub use category::{CreateProductTaxCategory, ProductTaxCategory};
pub use region::{
    CreateTaxRegion, FilingFrequency, ListTaxRegionsFilter, TaxRegion,
};
pub use resolution::{ItemKind, TaxCustomer, TaxResolution, TaxableItem};
pub use tax_override::{CreateTaxOverride, OverrideScope, TaxOverride};
