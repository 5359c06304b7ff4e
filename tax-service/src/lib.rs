//! Jurisdictional tax resolution engine.
//!
//! Composes the region registry, override resolver, and category catalog into
//! an effective tax rate for a (jurisdiction, item, customer) triple, tracks
//! nexus-threshold crossings, and derives filing schedules per region.

pub mod models;
pub mod services;
