//! Services for tax-service.

pub mod calculation;
pub mod catalog;
pub mod filing;
pub mod registry;
pub mod resolver;

pub use calculation::TaxCalculationService;
pub use catalog::CategoryCatalog;
pub use filing::{advance_filing_period, days_until_filing, FilingScheduler, FilingStatus};
pub use registry::{SaleOutcome, TaxRegionRegistry};
pub use resolver::OverrideResolver;
