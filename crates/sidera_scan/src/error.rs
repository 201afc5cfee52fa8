//! Error type shared by the scan drivers.

use std::error::Error;
use std::fmt;

use sidera_core::CastError;

/// Errors surfaced by the event scanners.
#[derive(Debug)]
#[non_exhaustive]
pub enum ScanError {
    /// A configuration field failed validation.
    InvalidConfig(&'static str),
    /// The chart source failed to produce a boundary chart.
    Cast(CastError),
    /// A detector fired on a sign change whose interpolation has equal
    /// slopes. Cannot happen for a true crossing; surfacing it beats
    /// emitting a NaN event time.
    DegenerateCrossing,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid scan configuration: {msg}"),
            Self::Cast(err) => write!(f, "chart cast failed: {err}"),
            Self::DegenerateCrossing => {
                write!(f, "degenerate crossing: equal slopes in interpolation")
            }
        }
    }
}

impl Error for ScanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Cast(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CastError> for ScanError {
    fn from(err: CastError) -> Self {
        Self::Cast(err)
    }
}
