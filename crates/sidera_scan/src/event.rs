//! Event records produced by the scanners.
//!
//! Every detected crossing becomes an [`Event`] with a tagged [`EventKind`];
//! the kind fixes the meaning of the shared `pos1`/`pos2`/`speed1`/`speed2`
//! fields, documented per variant. Horizon scans produce the separate
//! [`HorizonEvent`] record, which carries azimuth/altitude context instead.

use sidera_core::{Body, EventTime};
use sidera_zodiac::{DecanDest, Sign};

/// Named aspect angles, in the classical ordering used by the aspect table.
///
/// The first five are the major aspects; a scan's `aspect_count` selects a
/// leading prefix of this ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aspect {
    Conjunction,
    Opposition,
    Square,
    Trine,
    Sextile,
    Inconjunct,
    SemiSextile,
    SemiSquare,
    Sesquiquadrate,
    Quintile,
    BiQuintile,
}

/// All aspects in table order.
pub const ALL_ASPECTS: [Aspect; 11] = [
    Aspect::Conjunction,
    Aspect::Opposition,
    Aspect::Square,
    Aspect::Trine,
    Aspect::Sextile,
    Aspect::Inconjunct,
    Aspect::SemiSextile,
    Aspect::SemiSquare,
    Aspect::Sesquiquadrate,
    Aspect::Quintile,
    Aspect::BiQuintile,
];

impl Aspect {
    /// Number of aspects in the table.
    pub const COUNT: usize = 11;

    /// How many leading table entries are major aspects.
    pub const MAJORS: usize = 5;

    /// 0-based table index.
    pub const fn index(self) -> usize {
        match self {
            Self::Conjunction => 0,
            Self::Opposition => 1,
            Self::Square => 2,
            Self::Trine => 3,
            Self::Sextile => 4,
            Self::Inconjunct => 5,
            Self::SemiSextile => 6,
            Self::SemiSquare => 7,
            Self::Sesquiquadrate => 8,
            Self::Quintile => 9,
            Self::BiQuintile => 10,
        }
    }

    /// Convert a table index back into an [`Aspect`].
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(ALL_ASPECTS[index])
        } else {
            None
        }
    }

    /// The aspect's exact angular separation in degrees.
    pub const fn angle_deg(self) -> f64 {
        match self {
            Self::Conjunction => 0.0,
            Self::Opposition => 180.0,
            Self::Square => 90.0,
            Self::Trine => 120.0,
            Self::Sextile => 60.0,
            Self::Inconjunct => 150.0,
            Self::SemiSextile => 30.0,
            Self::SemiSquare => 45.0,
            Self::Sesquiquadrate => 135.0,
            Self::Quintile => 72.0,
            Self::BiQuintile => 144.0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "Conjunction",
            Self::Opposition => "Opposition",
            Self::Square => "Square",
            Self::Trine => "Trine",
            Self::Sextile => "Sextile",
            Self::Inconjunct => "Inconjunct",
            Self::SemiSextile => "SemiSextile",
            Self::SemiSquare => "SemiSquare",
            Self::Sesquiquadrate => "Sesquiquadrate",
            Self::Quintile => "Quintile",
            Self::BiQuintile => "BiQuintile",
        }
    }
}

/// Which way a station turns the body's motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationDirection {
    /// Velocity crossed from positive to negative.
    Retrograde,
    /// Velocity crossed from negative to positive.
    Direct,
}

/// Whether an extremum is a peak or a trough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeakKind {
    Maximum,
    Minimum,
}

/// Which node a zero-latitude crossing passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeDirection {
    /// Latitude crossing from south to north.
    Ascending,
    /// Latitude crossing from north to south.
    Descending,
}

/// What crossed, and into what. Fixes the meaning of the shared position
/// and speed fields of [`Event`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    /// Longitude alignment at a named angle with another body.
    ///
    /// `pos1`/`pos2` are the interpolated longitudes of the event body and
    /// of `with`; `speed1`/`speed2` are each body's mean longitude speed
    /// across the segment. In transit scans `with` is the natal body,
    /// `pos1` is the exact aspect point, `pos2` the natal longitude, and
    /// `speed2` is zero.
    Aspect { with: Body, aspect: Aspect },
    /// Declination or latitude parallel ([`Aspect::Conjunction`]) or
    /// contraparallel ([`Aspect::Opposition`]) with another body.
    ///
    /// `pos1`/`pos2` are the interpolated declination/latitude values in
    /// the compared frame; `speed1`/`speed2` are mean latitude speeds.
    Parallel { with: Body, aspect: Aspect },
    /// Entry into a sign. `pos1 == pos2` is the crossed sign boundary;
    /// speeds are the segment's endpoint longitude speeds.
    SignIngress { sign: Sign },
    /// Crossing of a uniform degree-band edge; `band` is the index entered
    /// on the subdivided circle. `pos1 == pos2` is the crossed edge;
    /// speeds are the endpoint longitude speeds.
    BandIngress { band: usize, retrograde: bool },
    /// Crossing of a term/decan table boundary into the slice assigned
    /// `dest`. `pos1 == pos2` is the crossed boundary; speeds are the
    /// endpoint longitude speeds.
    DecanIngress { dest: DecanDest, retrograde: bool },
    /// Longitudinal station. `pos1 == pos2` is the interpolated longitude;
    /// speeds are the endpoint longitude speeds (opposite signs).
    Station { direction: StationDirection },
    /// Extremum of ecliptic latitude. `pos1 == pos2` is the extremal
    /// latitude reached; speeds are the endpoint longitude speeds.
    LatitudePeak { kind: PeakKind },
    /// Extremum of geocentric distance. `pos1 == pos2` is the longitude at
    /// the extremum; speeds are the endpoint longitude speeds.
    DistancePeak { kind: PeakKind },
    /// Zero-latitude crossing. `pos1 == pos2` is the interpolated
    /// longitude; speeds are the endpoint longitude speeds.
    NodeCrossing { node: NodeDirection },
    /// The two bodies pass equal geocentric distance. `pos1`/`pos2` are
    /// interpolated longitudes; speeds are mean longitude speeds (in
    /// transit scans `pos2` is the natal longitude and `speed2` is zero).
    Equidistance { with: Body },
    /// Transit scans only: the moving body enters a natal house (1-based).
    /// `pos1` is the interpolated moving longitude, `pos2` the body's natal
    /// longitude; `speed1` is the mean moving longitude speed.
    HouseIngress { house: usize },
}

/// A detected crossing within a scanned period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// The moving body the crossing belongs to.
    pub body: Body,
    /// What crossed, and into what.
    pub kind: EventKind,
    /// Interpolated clock time of the crossing.
    pub when: EventTime,
    /// First interpolated value at the crossing; meaning fixed by `kind`.
    pub pos1: f64,
    /// Second interpolated value at the crossing; meaning fixed by `kind`.
    pub pos2: f64,
    /// First motion value; meaning fixed by `kind`.
    pub speed1: f64,
    /// Second motion value; meaning fixed by `kind`.
    pub speed2: f64,
    /// Minutes until the condition this event starts is broken, filled by
    /// the lookahead pass for qualifying events. `None` when the event
    /// does not start a void interval or no stop event was in reach.
    pub void_minutes: Option<f64>,
}

/// Sense of a body's longitudinal motion across a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionSign {
    Direct,
    Retrograde,
    /// The motion reversed (or was zero) somewhere inside the segment.
    Mixed,
}

impl MotionSign {
    /// Classify from the segment's endpoint speeds.
    pub fn from_speeds(v1: f64, v2: f64) -> Self {
        let s = sgn(v1) + sgn(v2);
        if s > 0 {
            Self::Direct
        } else if s < 0 {
            Self::Retrograde
        } else {
            Self::Mixed
        }
    }
}

fn sgn(v: f64) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// The four local-frame crossings a horizon scan reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizonKind {
    /// Altitude crosses zero on the eastern half of the horizon.
    Rise,
    /// Meridian crossing above the horizon.
    Culminate,
    /// Altitude crosses zero on the western half of the horizon.
    Set,
    /// Meridian crossing below the horizon.
    Anticulminate,
}

/// A rise/set or meridian crossing detected by the horizon scanner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonEvent {
    pub body: Body,
    pub kind: HorizonKind,
    /// Interpolated clock time of the crossing.
    pub when: EventTime,
    /// Interpolated ecliptic longitude at the crossing.
    pub lon_deg: f64,
    /// Compass azimuth of the crossing point for rise/set events;
    /// interpolated altitude for meridian events.
    pub azialt_deg: f64,
    /// Longitudinal motion across the segment.
    pub motion: MotionSign,
}

/// Totals describing one completed scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanSummary {
    /// Events handed to the consumer.
    pub total_events: usize,
    /// Crossings detected, including any refused by a full buffer or
    /// dropped by an emission filter.
    pub offered_events: usize,
    /// Whether any period's buffer refused writes.
    pub saturated: bool,
    /// Boundary charts requested from the source.
    pub charts_cast: usize,
}
