//! Services for subscription-service.

pub mod equity;
pub mod lifecycle;

pub use equity::{EquityCalculator, WEEKS_PER_MONTH};
pub use lifecycle::LifecycleService;
