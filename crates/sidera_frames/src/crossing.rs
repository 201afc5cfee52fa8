//! Linear root solves for segment-local crossings.
//!
//! Every detector reduces its condition to scalars that are assumed locally
//! linear across one segment; these helpers invert that line (or pair of
//! lines) for the fractional position of the crossing within the segment.

/// Fraction in `[0, 1]` at which a linear scalar running `a` → `b` reaches
/// zero. Meaningful when the endpoint signs differ; for opposite-signed
/// endpoints this equals `|a| / (|a| + |b|)`.
///
/// Returns `None` when `a == b` (the line is level, so no zero exists
/// between distinct-signed endpoints — a contradiction of the caller's
/// sign-change gate).
pub fn zero_fraction(a: f64, b: f64) -> Option<f64> {
    let denom = a - b;
    if denom == 0.0 {
        return None;
    }
    Some(a / denom)
}

/// Fraction at which a speed-like quantity passes through zero, from the
/// endpoint magnitudes: `|v1| / (|v1| + |v2|)`.
///
/// Used by station and extremum detectors, which gate on a rate sign change
/// first. Returns `None` when both endpoint speeds are exactly zero.
pub fn speed_zero_fraction(v1: f64, v2: f64) -> Option<f64> {
    let denom = v1.abs() + v2.abs();
    if denom == 0.0 {
        return None;
    }
    Some(v1.abs() / denom)
}

/// Fraction at which two lines meet, given both lines' values at the
/// segment's two endpoints (`a` runs `a0` → `a1`, `b` runs `b0` → `b1`).
///
/// Returns `None` when the slopes are equal (parallel lines, no single
/// meeting point). After a genuine sign change of `b - a` that case cannot
/// occur; callers treat it as a logic error rather than a quiet miss.
///
/// Circular callers must linearize first: fold both lines into one branch
/// of the circle (shortest-arc differences from a common origin) before
/// passing values here.
pub fn two_line_fraction(a0: f64, a1: f64, b0: f64, b1: f64) -> Option<f64> {
    let denom = (b1 - b0) - (a1 - a0);
    if denom == 0.0 {
        return None;
    }
    Some((a0 - b0) / denom)
}

/// Interpolate a plain (non-circular) scalar at a solved fraction.
pub fn lerp(a: f64, b: f64, frac: f64) -> f64 {
    a + (b - a) * frac
}
