use crate::error::AppError;
use config::{Config as Cfg, File};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Platform fee applied to each recurring payment, as a fraction of the
    /// base payment (0.006 = 0.6%).
    #[serde(default = "default_platform_fee_rate")]
    pub platform_fee_rate: Decimal,

    /// Regions within this many days of their next filing date are reported
    /// as due and notified.
    #[serde(default = "default_filing_due_soon_days")]
    pub filing_due_soon_days: i64,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_platform_fee_rate() -> Decimal {
    // 0.006
    Decimal::new(6, 3)
}

fn default_filing_due_soon_days() -> i64 {
    14
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform_fee_rate: default_platform_fee_rate(),
            filing_due_soon_days: default_filing_due_soon_days(),
            log_level: default_log_level(),
        }
    }
}
