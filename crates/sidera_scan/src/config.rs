//! Scan configuration and injected per-scan predicates.

use std::fmt;

use sidera_core::{Axis, Body, BodySet};
use sidera_zodiac::DecanMode;

use crate::event::{Aspect, Event, EventKind, HorizonEvent};

/// How boundary-crossing events subdivide the circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandStrategy {
    /// No boundary events.
    Off,
    /// Whole signs when `subdiv == 1`, else `subdiv` equal slices per sign.
    Signs { subdiv: usize },
    /// Terms/decans from a table, reporting rulers or derived signs.
    Decans(DecanMode),
}

impl BandStrategy {
    pub const fn is_off(self) -> bool {
        matches!(self, Self::Off)
    }
}

/// Frame of the chart's stored latitude values and of the parallel-aspect
/// comparison. A conversion runs only when the two disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParallelFrame {
    /// Charts carry declination rather than ecliptic latitude.
    pub charts_equatorial: bool,
    /// Compare ecliptic latitude rather than declination.
    pub compare_latitude: bool,
}

/// Which horizon sub-kinds a horizon scan reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorizonMask {
    pub rise: bool,
    pub culminate: bool,
    pub set: bool,
    pub anticulminate: bool,
}

impl Default for HorizonMask {
    fn default() -> Self {
        Self {
            rise: true,
            culminate: true,
            set: true,
            anticulminate: true,
        }
    }
}

impl HorizonMask {
    pub const fn includes(self, kind: crate::event::HorizonKind) -> bool {
        use crate::event::HorizonKind::*;
        match kind {
            Rise => self.rise,
            Culminate => self.culminate,
            Set => self.set,
            Anticulminate => self.anticulminate,
        }
    }
}

/// The classical aspect-angle table.
pub const fn default_aspect_angles() -> [f64; Aspect::COUNT] {
    [
        0.0, 180.0, 90.0, 120.0, 60.0, 150.0, 30.0, 45.0, 135.0, 72.0, 144.0,
    ]
}

/// Configuration consumed read-only by every scan driver.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// Segments per scanned period: per day for daily and horizon scans,
    /// per month for transit scans. Year-long and progressed daily scans
    /// coarsen this tenfold; transit scans with house ingress enabled
    /// floor it at 96.
    pub division: usize,
    /// Event buffer capacity per period.
    pub capacity: usize,
    /// Bodies whose motion is scanned.
    pub moving: BodySet,
    /// The natal side of transit scans. Daily scans ignore it.
    pub natal: BodySet,
    /// Number of leading aspect-table entries in play.
    pub aspect_count: usize,
    /// Aspect angles by table index.
    pub aspect_angles: [f64; Aspect::COUNT],
    /// Longitude aspects scanned.
    pub aspects: bool,
    /// Declination/latitude parallels scanned instead of longitude
    /// aspects. Only the first two table entries (parallel and
    /// contraparallel) apply.
    pub parallel: bool,
    pub parallel_frame: ParallelFrame,
    /// Sign/band boundary crossings.
    pub bands: BandStrategy,
    /// Longitudinal stations.
    pub stations: bool,
    /// Latitude extremum events.
    pub latitude_peaks: bool,
    /// Distance extremum events.
    pub distance_peaks: bool,
    /// Zero-latitude crossings.
    pub node_crossings: bool,
    /// Pairwise equidistance crossings.
    pub equidistance: bool,
    /// Natal house ingress events (transit scans only).
    pub house_ingress: bool,
    /// Master switch for void lookahead. Retention across periods still
    /// requires the Moon in `moving`, boundary events on, and a multi-day
    /// range.
    pub void_lookahead: bool,
    /// Observer geographic latitude for horizon scans, degrees.
    pub latitude_deg: f64,
    /// Horizon sub-kinds included.
    pub horizon: HorizonMask,
    /// Flushed batches never straddle a day boundary (for consumers that
    /// render one day at a time).
    pub day_aligned_chunks: bool,
    /// Time axis daily scans cast on.
    pub axis: Axis,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            division: 48,
            capacity: 150,
            moving: BodySet::ALL,
            natal: BodySet::ALL,
            aspect_count: Aspect::MAJORS,
            aspect_angles: default_aspect_angles(),
            aspects: true,
            parallel: false,
            parallel_frame: ParallelFrame::default(),
            bands: BandStrategy::Signs { subdiv: 1 },
            stations: true,
            latitude_peaks: false,
            distance_peaks: false,
            node_crossings: false,
            equidistance: false,
            house_ingress: false,
            void_lookahead: true,
            latitude_deg: 0.0,
            horizon: HorizonMask::default(),
            day_aligned_chunks: false,
            axis: Axis::Calendar,
        }
    }
}

impl ScanConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.division == 0 {
            return Err("division must be positive");
        }
        if self.capacity < 4 {
            return Err("capacity must be at least 4");
        }
        if self.aspect_count > Aspect::COUNT {
            return Err("aspect_count exceeds the aspect table");
        }
        for angle in self.aspect_angles {
            if !angle.is_finite() || !(0.0..360.0).contains(&angle) {
                return Err("aspect angles must lie in [0, 360)");
            }
        }
        if let BandStrategy::Signs { subdiv } = self.bands {
            if subdiv == 0 {
                return Err("band subdivision must be positive");
            }
        }
        if !self.latitude_deg.is_finite() || self.latitude_deg.abs() > 90.0 {
            return Err("latitude_deg must lie in [-90, 90]");
        }
        Ok(())
    }
}

/// Injected per-scan predicates, consumed rather than reimplemented by the
/// drivers. Every hook is optional; `None` keeps the built-in rule.
#[derive(Default)]
pub struct ScanHooks {
    /// Which (body, aspect, body) combinations are scanned at all.
    pub accept_aspect: Option<Box<dyn Fn(Body, Aspect, Body) -> bool>>,
    /// Which events start a void interval (replaces
    /// [`default_void_start`]).
    pub void_start: Option<Box<dyn Fn(&Event) -> bool>>,
    /// Which events end a void interval (replaces [`default_void_stop`]).
    pub void_stop: Option<Box<dyn Fn(&Event) -> bool>>,
    /// Return `false` to drop an event just before emission; the scan
    /// itself continues.
    pub event_filter: Option<Box<dyn Fn(&Event) -> bool>>,
    /// Return `false` to drop a horizon event just before emission.
    pub horizon_filter: Option<Box<dyn Fn(&HorizonEvent) -> bool>>,
}

impl fmt::Debug for ScanHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanHooks")
            .field("accept_aspect", &self.accept_aspect.is_some())
            .field("void_start", &self.void_start.is_some())
            .field("void_stop", &self.void_stop.is_some())
            .field("event_filter", &self.event_filter.is_some())
            .field("horizon_filter", &self.horizon_filter.is_some())
            .finish()
    }
}

impl ScanHooks {
    pub(crate) fn accepts(&self, a: Body, aspect: Aspect, b: Body) -> bool {
        match &self.accept_aspect {
            Some(f) => f(a, aspect, b),
            None => true,
        }
    }

    pub(crate) fn starts_void(&self, event: &Event) -> bool {
        match &self.void_start {
            Some(f) => f(event),
            None => default_void_start(event),
        }
    }

    pub(crate) fn stops_void(&self, event: &Event) -> bool {
        match &self.void_stop {
            Some(f) => f(event),
            None => default_void_stop(event),
        }
    }

    pub(crate) fn keeps(&self, event: &Event) -> bool {
        match &self.event_filter {
            Some(f) => f(event),
            None => true,
        }
    }

    pub(crate) fn keeps_horizon(&self, event: &HorizonEvent) -> bool {
        match &self.horizon_filter {
            Some(f) => f(event),
            None => true,
        }
    }
}

/// Built-in rule for the start of a void interval: a major-kind longitude
/// aspect between the Moon and any other single body.
pub fn default_void_start(event: &Event) -> bool {
    match event.kind {
        EventKind::Aspect { with, aspect } => {
            aspect.index() < Aspect::MAJORS
                && (event.body == Body::Moon) != (with == Body::Moon)
        }
        _ => false,
    }
}

/// Built-in rule for the end of a void interval: the Moon crossing any
/// sign, band, or decan boundary.
pub fn default_void_stop(event: &Event) -> bool {
    event.body == Body::Moon
        && matches!(
            event.kind,
            EventKind::SignIngress { .. }
                | EventKind::BandIngress { .. }
                | EventKind::DecanIngress { .. }
        )
}
