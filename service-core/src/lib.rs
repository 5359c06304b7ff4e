//! service-core: Shared infrastructure for the tax and subscription engine crates.
pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod notify;
pub mod observability;
pub mod store;

pub use rust_decimal;
pub use serde;
pub use serde_json;
pub use tracing;
pub use uuid;
pub use validator;
