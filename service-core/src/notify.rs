//! Notification sink collaborator seam.
//!
//! The engine emits domain events; delivery (email, SMS, admin banners) is
//! owned by the hosting application.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    /// A region's cumulative sales crossed its nexus threshold. Fired exactly
    /// once per crossing.
    ThresholdCrossed {
        region_id: Uuid,
        region_code: String,
        current_sales: Decimal,
        threshold_amount: Decimal,
    },
    /// A region's filing date is inside the due window, or already past.
    FilingDue {
        region_id: Uuid,
        region_code: String,
        next_filing_date: NaiveDate,
        days_until: i64,
    },
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, event: Notification);
}

/// Sink that records events to the structured log only.
#[derive(Debug, Clone, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, event: Notification) {
        match &event {
            Notification::ThresholdCrossed {
                region_code,
                current_sales,
                threshold_amount,
                ..
            } => {
                tracing::info!(
                    region_code = %region_code,
                    current_sales = %current_sales,
                    threshold_amount = %threshold_amount,
                    "Nexus threshold crossed"
                );
            }
            Notification::FilingDue {
                region_code,
                next_filing_date,
                days_until,
                ..
            } => {
                tracing::info!(
                    region_code = %region_code,
                    next_filing_date = %next_filing_date,
                    days_until = days_until,
                    "Tax filing due"
                );
            }
        }
    }
}

/// Sink that buffers events for assertions in tests.
#[derive(Debug, Default)]
pub struct BufferedSink {
    events: Mutex<Vec<Notification>>,
}

impl BufferedSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Notification> {
        self.events.lock().unwrap().clone()
    }

    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

impl NotificationSink for BufferedSink {
    fn notify(&self, event: Notification) {
        self.events.lock().unwrap().push(event);
    }
}
