use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Tax region not found: {0}")]
    RegionNotFound(Uuid),

    #[error("Product tax category not found: {0}")]
    CategoryNotFound(String),

    #[error("Conflicting tax overrides for {scope}: {count} active rules match")]
    AmbiguousOverride { scope: String, count: usize },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid contract: {0}")]
    InvalidContract(String),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}
