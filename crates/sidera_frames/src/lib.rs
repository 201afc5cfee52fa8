//! Angular math and frame conversions for the sidera scanners.
//!
//! Provides shortest-arc circle arithmetic, the linear crossing solves all
//! detectors share, and ecliptic ↔ equatorial ↔ horizontal transforms.

pub mod angles;
pub mod crossing;
pub mod transform;

pub use angles::{arc_distance, lerp_angle, midpoint_deg, normalize_pm180, signed_arc, wrap360};
pub use crossing::{lerp, speed_zero_fraction, two_line_fraction, zero_fraction};
pub use transform::{
    OBLIQUITY_J2000_DEG, ecliptic_to_equatorial, ecliptic_to_horizontal, equatorial_to_ecliptic,
};
