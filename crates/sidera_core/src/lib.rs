//! Core types for the sidera event-detection engine.
//!
//! This crate defines:
//! - The tracked [`Body`] set and [`BodySet`] inclusion filters
//! - [`Chart`] snapshots ([`BodyState`] per body plus chart-level angles)
//! - Calendar moments and event times
//! - The [`ChartSource`] trait, the seam to the external ephemeris engine

pub mod body;
pub mod chart;
pub mod moment;
pub mod source;

pub use body::{ALL_BODIES, Body, BodySet};
pub use chart::{BodyState, Chart};
pub use moment::{Axis, CastMoment, EventTime, ScanDate, days_in_month, is_leap_year};
pub use source::{CastError, ChartSource};
