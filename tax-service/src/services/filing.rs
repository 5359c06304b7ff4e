//! Filing scheduler.
//!
//! Derives next-filing boundaries from the filing frequency and surfaces
//! overdue state to admins. Month arithmetic clamps to end-of-month
//! (Jan 31 + 1 month = Feb 28/29).

use crate::models::{FilingFrequency, TaxRegion};
use chrono::{Months, NaiveDate};
use service_core::clock::Clock;
use service_core::notify::{Notification, NotificationSink};
use tracing::instrument;

/// Filing position of a region relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilingStatus {
    /// Days remaining until the next filing date (0 = due today).
    DueIn(i64),
    /// Days past the filing date. Overdue is reported as overdue, never
    /// clamped to zero.
    Overdue(i64),
}

/// Next filing boundary after `last_filing` for the given cadence.
pub fn advance_filing_period(frequency: FilingFrequency, last_filing: NaiveDate) -> NaiveDate {
    last_filing + Months::new(frequency.months())
}

/// Days until the region's next filing date; negative when overdue.
pub fn days_until_filing(region: &TaxRegion, as_of: NaiveDate) -> i64 {
    (region.next_filing_date - as_of).num_days()
}

pub struct FilingScheduler<'a> {
    sink: &'a dyn NotificationSink,
    /// Regions within this many days of filing are notified.
    due_soon_days: i64,
}

impl<'a> FilingScheduler<'a> {
    pub fn new(sink: &'a dyn NotificationSink, due_soon_days: i64) -> Self {
        Self {
            sink,
            due_soon_days,
        }
    }

    /// Classify a region's filing position and notify when it is inside the
    /// due window or overdue.
    #[instrument(skip(self, region, clock), fields(region_id = %region.region_id))]
    pub fn check_region(&self, region: &TaxRegion, clock: &dyn Clock) -> FilingStatus {
        let days = days_until_filing(region, clock.today());
        let status = if days < 0 {
            FilingStatus::Overdue(-days)
        } else {
            FilingStatus::DueIn(days)
        };

        if days <= self.due_soon_days {
            self.sink.notify(Notification::FilingDue {
                region_id: region.region_id,
                region_code: region.code.clone(),
                next_filing_date: region.next_filing_date,
                days_until: days,
            });
        }
        status
    }

    /// Check every supplied region, returning the ones due or overdue.
    pub fn due_regions(
        &self,
        regions: &[TaxRegion],
        clock: &dyn Clock,
    ) -> Vec<(TaxRegion, FilingStatus)> {
        regions
            .iter()
            .filter_map(|region| {
                let status = self.check_region(region, clock);
                match status {
                    FilingStatus::Overdue(_) => Some((region.clone(), status)),
                    FilingStatus::DueIn(days) if days <= self.due_soon_days => {
                        Some((region.clone(), status))
                    }
                    FilingStatus::DueIn(_) => None,
                }
            })
            .collect()
    }
}
