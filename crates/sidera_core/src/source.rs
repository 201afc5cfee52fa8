//! The chart-casting collaborator seam.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::chart::Chart;
use crate::moment::CastMoment;

/// Errors a casting collaborator may surface.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CastError {
    InvalidMoment(&'static str),
    EpochOutOfRange { year: i32 },
    Ephemeris(String),
}

impl Display for CastError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMoment(msg) => write!(f, "invalid moment: {msg}"),
            Self::EpochOutOfRange { year } => write!(f, "epoch out of range: year {year}"),
            Self::Ephemeris(msg) => write!(f, "ephemeris error: {msg}"),
        }
    }
}

impl Error for CastError {}

/// The external chart-casting collaborator.
///
/// `cast` must be deterministic and pure given the moment: the scanners call
/// it once per segment boundary and hold at most two charts at a time, so no
/// state needs saving or restoring around nested casts.
pub trait ChartSource: Send + Sync {
    /// Produce the full-system snapshot for one moment.
    fn cast(&self, moment: &CastMoment) -> Result<Chart, CastError>;

    /// 3D house position angle in `[0, 360)` of an ecliptic point within the
    /// natal chart's house frame; `angle / 30` floors to the 0-based house
    /// index. Used only by the transit scan's house-ingress detector.
    fn house_place_3d(&self, natal: &Chart, lon_deg: f64, lat_deg: f64) -> f64;
}
