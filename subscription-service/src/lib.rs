//! Subscription financial lifecycle.
//!
//! Recurring payment schedules, cumulative ownership-equity accrual, and
//! early-buyout pricing for subscription-to-own vehicle contracts. Payments
//! are reconciled by the hosting application; this crate owns the arithmetic
//! and the status state machine.

pub mod models;
pub mod services;
