//! Circular angle arithmetic on degree values.
//!
//! All positions in the scanners are degrees on a 360° circle. These helpers
//! implement the shortest-arc convention: a raw difference whose magnitude
//! exceeds 180° is folded by a full turn in the direction of its sign.

/// Normalize an angle to `[0, 360)`.
pub fn wrap360(deg: f64) -> f64 {
    let v = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if v >= 360.0 { v - 360.0 } else { v }
}

/// Fold an angle to `(-180, 180]`.
pub fn normalize_pm180(deg: f64) -> f64 {
    let v = wrap360(deg);
    if v > 180.0 { v - 360.0 } else { v }
}

/// Signed shortest arc from `from` to `to`, in `(-180, 180]`.
///
/// Positive means the short way from `from` to `to` runs forward (increasing
/// longitude).
pub fn signed_arc(from: f64, to: f64) -> f64 {
    normalize_pm180(to - from)
}

/// Unsigned shortest arc between two angles, in `[0, 180]`.
pub fn arc_distance(a: f64, b: f64) -> f64 {
    let d = wrap360(a - b);
    d.min(360.0 - d)
}

/// Circular midpoint of two angles, on the short side between them.
pub fn midpoint_deg(a: f64, b: f64) -> f64 {
    let mid = wrap360((a + b) / 2.0);
    // The naive average of wrapped angles lands on the short side or exactly
    // opposite it; flip by a half turn when it landed on the far side.
    if arc_distance(a, mid) <= 90.0 {
        mid
    } else {
        wrap360(mid + 180.0)
    }
}

/// Interpolate between two angles along their shortest arc.
///
/// `frac` of 0 returns `a`, 1 returns the short-arc image of `b`; values
/// outside `[0, 1]` extrapolate along the same arc. Never blends raw angle
/// values across the 0°/360° seam.
pub fn lerp_angle(a: f64, b: f64, frac: f64) -> f64 {
    wrap360(a + frac * signed_arc(a, b))
}
