//! Zodiac geometry: signs, uniform degree bands, and classical
//! subdivisions (terms, decans, navamsas, dwads) with their rulership
//! tables.
//!
//! Everything here is pure longitude arithmetic; the event scanners in
//! `sidera_scan` consult this crate to classify segment endpoints and to
//! locate the boundary a crossing passed through.

pub mod bands;
pub mod sign;
pub mod terms;

pub use bands::{
    band_count, band_of, band_start_deg, band_width_deg, bands_adjacent, following_band,
};
pub use sign::{ALL_SIGNS, SIGN_WIDTH_DEG, Sign, degrees_in_sign, sign_of};
pub use terms::{DecanDest, DecanMode};
