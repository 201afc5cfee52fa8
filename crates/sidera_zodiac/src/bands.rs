//! Uniform subdivision of the zodiac into equal degree bands.
//!
//! A band grid with `subdiv` slices per sign partitions the circle into
//! `12 * subdiv` equal bands. The boundary-crossing detector works purely on
//! band indices: it compares the band at the two ends of a segment and fires
//! only when the indices are circularly adjacent, which filters out the
//! multi-band jumps a coarse sampling step can produce.

use crate::sign::SIGN_WIDTH_DEG;

/// Total number of bands for a per-sign subdivision count.
pub const fn band_count(subdiv: usize) -> usize {
    12 * subdiv
}

/// Width of one band in degrees.
pub fn band_width_deg(subdiv: usize) -> f64 {
    SIGN_WIDTH_DEG / subdiv as f64
}

/// Normalize longitude to [0, 360).
fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

/// Index of the band holding a longitude, in `0..band_count(subdiv)`.
pub fn band_of(lon_deg: f64, subdiv: usize) -> usize {
    let total = band_count(subdiv);
    let idx = (normalize_360(lon_deg) / band_width_deg(subdiv)).floor() as usize;
    idx.min(total - 1)
}

/// Longitude of a band's leading edge in degrees.
pub fn band_start_deg(index: usize, subdiv: usize) -> f64 {
    index as f64 * band_width_deg(subdiv)
}

/// Whether two band indices are circularly adjacent on a grid of `total`
/// bands. Equal indices are not adjacent.
pub const fn bands_adjacent(j: usize, k: usize, total: usize) -> bool {
    let diff = if j > k { j - k } else { k - j };
    diff == 1 || diff == total - 1
}

/// Of two adjacent band indices, the one that circularly follows the other.
///
/// For a forward step `j -> j+1` this is `k`; for a retrograde step
/// `j -> j-1` it is `j` itself. The boundary between the two bands is the
/// leading edge of the returned index in either case.
pub const fn following_band(j: usize, k: usize, total: usize) -> usize {
    if (j + 1) % total == k { k } else { j }
}
