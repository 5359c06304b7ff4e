//! Threshold-crossing and filing-schedule workflow tests.
//! A region accumulates sales through tax resolution, crosses its nexus
//! threshold exactly once, and then moves through filing periods.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use service_core::notify::Notification;
use tax_service::models::{TaxCustomer, TaxableItem};
use tax_service::services::{FilingScheduler, FilingStatus};
use uuid::Uuid;
use workflow_tests::{TestEngine, VEHICLE_CATEGORY};

fn customer() -> TaxCustomer {
    TaxCustomer {
        customer_id: Uuid::new_v4(),
    }
}

#[test]
fn threshold_crossing_fires_exactly_once() {
    let engine = TestEngine::new();
    let region = engine.seed_region("TX", Decimal::new(625, 2), Decimal::from(50_000));

    // Three 20k sales: the second crosses the 50k threshold.
    for _ in 0..3 {
        let item = TaxableItem::product(Uuid::new_v4(), Some(VEHICLE_CATEGORY.to_string()));
        engine
            .calculation
            .resolve_tax(
                region.region_id,
                &item,
                &customer(),
                Decimal::from(20_000),
                &engine.clock,
            )
            .expect("resolution should succeed");
    }

    let crossings: Vec<_> = engine
        .sink
        .events()
        .into_iter()
        .filter(|e| matches!(e, Notification::ThresholdCrossed { .. }))
        .collect();
    assert_eq!(crossings.len(), 1);

    match &crossings[0] {
        Notification::ThresholdCrossed {
            region_id,
            current_sales,
            ..
        } => {
            assert_eq!(*region_id, region.region_id);
            assert_eq!(*current_sales, Decimal::from(40_000));
        }
        other => panic!("unexpected event {:?}", other),
    }

    let after = engine.registry.get(region.region_id).unwrap();
    assert_eq!(after.current_sales, Decimal::from(60_000));
    assert!(after.threshold_met);
}

#[test]
fn exempt_sales_never_cross_threshold() {
    let engine = TestEngine::new();
    let region = engine.seed_region("CA", Decimal::new(725, 2), Decimal::from(1_000));

    // Service plans are non-taxable by default; no revenue is attributed.
    for _ in 0..5 {
        let item = TaxableItem::product(Uuid::new_v4(), Some("SVC".to_string()));
        let resolution = engine
            .calculation
            .resolve_tax(
                region.region_id,
                &item,
                &customer(),
                Decimal::from(10_000),
                &engine.clock,
            )
            .unwrap();
        assert!(resolution.exempt);
    }

    assert!(engine.sink.events().is_empty());
    let after = engine.registry.get(region.region_id).unwrap();
    assert_eq!(after.current_sales, Decimal::ZERO);
}

#[test]
fn filing_rolls_forward_after_each_return() {
    let engine = TestEngine::new();
    let region = engine.seed_region("TX", Decimal::new(625, 2), Decimal::from(500_000));
    assert_eq!(
        region.next_filing_date,
        NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()
    );

    // Quarterly cadence: two rollovers land on Jul 1 then Oct 1.
    let next = engine
        .registry
        .advance_filing(region.region_id, &engine.clock)
        .unwrap();
    assert_eq!(next, NaiveDate::from_ymd_opt(2026, 7, 1).unwrap());

    let next = engine
        .registry
        .advance_filing(region.region_id, &engine.clock)
        .unwrap();
    assert_eq!(next, NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
}

#[test]
fn overdue_region_is_flagged_and_notified() {
    let engine = TestEngine::new();
    let region = engine.seed_region("TX", Decimal::new(625, 2), Decimal::from(500_000));

    // Move well past the Apr 1 filing date.
    engine.clock.advance(chrono::Duration::days(120));

    let scheduler = FilingScheduler::new(engine.sink.as_ref(), 14);
    let regions = vec![engine.registry.get(region.region_id).unwrap()];
    let due = scheduler.due_regions(&regions, &engine.clock);

    assert_eq!(due.len(), 1);
    assert!(matches!(due[0].1, FilingStatus::Overdue(days) if days > 0));
    assert!(engine
        .sink
        .events()
        .iter()
        .any(|e| matches!(e, Notification::FilingDue { days_until, .. } if *days_until < 0)));
}
