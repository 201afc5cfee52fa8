//! Celestial event scanning over charts cast by an external collaborator:
//! aspects, ingresses, stations, voids, transits, and horizon crossings.
//!
//! This crate provides:
//! - Daily event scan over the moving bodies (aspects and parallels,
//!   sign/band/decan ingresses, stations, node crossings, latitude and
//!   distance extrema, equidistance), with void-of-course lookahead
//! - Transit scan of the moving bodies against a fixed natal chart,
//!   including natal house ingresses and progressed boundary crossings
//! - Horizon scan for local rise, set, culmination, and anticulmination
//!
//! Every scan shares one shape: cut the period into segments, cast a chart
//! at each boundary, run crossing detectors over each segment, and place
//! hits by linear interpolation inside it. Charts come from a
//! [`ChartSource`](sidera_core::ChartSource) implementation; exactly two
//! boundary charts are alive at any time.

pub mod buffer;
pub mod config;
pub mod daily;
pub(crate) mod detect;
pub mod error;
pub mod event;
pub mod horizon;
pub(crate) mod sampler;
pub mod transit;

pub use buffer::{EventBuffer, insertion_sort_by};
pub use config::{
    BandStrategy, HorizonMask, ParallelFrame, ScanConfig, ScanHooks, default_aspect_angles,
    default_void_start, default_void_stop,
};
pub use daily::{search_daily_events, stream_daily_events};
pub use error::ScanError;
pub use event::{
    ALL_ASPECTS, Aspect, Event, EventKind, HorizonEvent, HorizonKind, MotionSign, NodeDirection,
    PeakKind, ScanSummary, StationDirection,
};
pub use horizon::{search_horizon_events, stream_horizon_events};
pub use transit::{search_transit_events, stream_transit_events};
