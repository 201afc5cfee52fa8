//! Crossing detectors: pure functions over one sampled segment.
//!
//! Each detector inspects the two boundary states of a segment and returns
//! at most one [`Hit`]: the segment fraction at which the monitored
//! quantity crosses, plus the interpolated event fields. Drivers translate
//! fractions into clock times and wrap hits into events.
//!
//! Firing gates use a three-way sign so an exact boundary value paired
//! with a nonzero one still fires, while two exact zeros do not.

use sidera_core::{Body, BodyState};
use sidera_frames::{
    arc_distance, lerp, lerp_angle, midpoint_deg, signed_arc, speed_zero_fraction,
    two_line_fraction, wrap360, zero_fraction,
};
use sidera_zodiac::{ALL_SIGNS, SIGN_WIDTH_DEG, bands, terms::DecanMode};

use crate::config::BandStrategy;
use crate::error::ScanError;
use crate::event::{Aspect, EventKind, NodeDirection, PeakKind, StationDirection};

/// A crossing located within one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Hit {
    pub kind: EventKind,
    /// Fraction of the segment elapsed at the crossing.
    pub frac: f64,
    pub pos1: f64,
    pub pos2: f64,
    pub speed1: f64,
    pub speed2: f64,
}

pub(crate) fn sgn(v: f64) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

// ---------------------------------------------------------------------------
// Per-body detectors
// ---------------------------------------------------------------------------

/// Longitudinal station: velocity sign change across the segment.
pub(crate) fn station(s1: &BodyState, s2: &BodyState) -> Option<Hit> {
    if (s1.lon_speed < 0.0) == (s2.lon_speed < 0.0) {
        return None;
    }
    let frac = speed_zero_fraction(s1.lon_speed, s2.lon_speed)?;
    let direction = if s2.lon_speed < 0.0 {
        StationDirection::Retrograde
    } else {
        StationDirection::Direct
    };
    let pos = lerp_angle(s1.lon_deg, s2.lon_deg, frac);
    Some(Hit {
        kind: EventKind::Station { direction },
        frac,
        pos1: pos,
        pos2: pos,
        speed1: s1.lon_speed,
        speed2: s2.lon_speed,
    })
}

/// Latitude extremum: latitude-velocity sign change. The event position is
/// the extremal latitude itself.
pub(crate) fn latitude_peak(s1: &BodyState, s2: &BodyState) -> Option<Hit> {
    if (s1.lat_speed < 0.0) == (s2.lat_speed < 0.0) {
        return None;
    }
    let frac = speed_zero_fraction(s1.lat_speed, s2.lat_speed)?;
    let kind = if s2.lat_speed < 0.0 {
        PeakKind::Maximum
    } else {
        PeakKind::Minimum
    };
    let pos = lerp(s1.lat_deg, s2.lat_deg, frac);
    Some(Hit {
        kind: EventKind::LatitudePeak { kind },
        frac,
        pos1: pos,
        pos2: pos,
        speed1: s1.lon_speed,
        speed2: s2.lon_speed,
    })
}

/// Distance extremum: distance-velocity sign change. The event position is
/// the longitude at which the extremum occurs.
pub(crate) fn distance_peak(s1: &BodyState, s2: &BodyState) -> Option<Hit> {
    if (s1.dist_speed < 0.0) == (s2.dist_speed < 0.0) {
        return None;
    }
    let frac = speed_zero_fraction(s1.dist_speed, s2.dist_speed)?;
    let kind = if s2.dist_speed < 0.0 {
        PeakKind::Maximum
    } else {
        PeakKind::Minimum
    };
    let pos = lerp_angle(s1.lon_deg, s2.lon_deg, frac);
    Some(Hit {
        kind: EventKind::DistancePeak { kind },
        frac,
        pos1: pos,
        pos2: pos,
        speed1: s1.lon_speed,
        speed2: s2.lon_speed,
    })
}

/// Zero-latitude crossing through a node.
pub(crate) fn node_crossing(s1: &BodyState, s2: &BodyState) -> Option<Hit> {
    if (s1.lat_deg < 0.0) == (s2.lat_deg < 0.0) {
        return None;
    }
    let frac = zero_fraction(s1.lat_deg, s2.lat_deg)?;
    let node = if s1.lat_deg >= 0.0 {
        NodeDirection::Descending
    } else {
        NodeDirection::Ascending
    };
    let pos = lerp_angle(s1.lon_deg, s2.lon_deg, frac);
    Some(Hit {
        kind: EventKind::NodeCrossing { node },
        frac,
        pos1: pos,
        pos2: pos,
        speed1: s1.lon_speed,
        speed2: s2.lon_speed,
    })
}

// ---------------------------------------------------------------------------
// Boundary crossings (signs, uniform bands, term tables)
// ---------------------------------------------------------------------------

/// Boundary crossing under the configured band strategy.
///
/// Fires only when the endpoint band indices are circularly adjacent; a
/// jump of two or more bands means the sampling step outran the motion and
/// is dropped rather than guessed at.
pub(crate) fn band_crossing(strategy: BandStrategy, s1: &BodyState, s2: &BodyState) -> Option<Hit> {
    match strategy {
        BandStrategy::Off => None,
        BandStrategy::Signs { subdiv: 1 } => sign_crossing(s1, s2),
        BandStrategy::Signs { subdiv } => uniform_band_crossing(subdiv, s1, s2),
        BandStrategy::Decans(mode) => decan_crossing(mode, s1, s2),
    }
}

fn sign_crossing(s1: &BodyState, s2: &BodyState) -> Option<Hit> {
    let j = sidera_zodiac::sign_of(s1.lon_deg).index();
    let k = sidera_zodiac::sign_of(s2.lon_deg).index();
    if j == k || !bands::bands_adjacent(j, k, 12) {
        return None;
    }
    let l = bands::following_band(j, k, 12);
    let boundary = l as f64 * SIGN_WIDTH_DEG;
    // The crossing time is measured to the edge lying ahead of the start
    // velocity, which may differ from the reported boundary right at a
    // station.
    let time_edge = if s1.lon_speed >= 0.0 { k } else { j } as f64 * SIGN_WIDTH_DEG;
    let frac = arc_distance(s1.lon_deg, time_edge) / arc_distance(s1.lon_deg, s2.lon_deg);
    Some(Hit {
        kind: EventKind::SignIngress { sign: ALL_SIGNS[k] },
        frac,
        pos1: boundary,
        pos2: boundary,
        speed1: s1.lon_speed,
        speed2: s2.lon_speed,
    })
}

fn uniform_band_crossing(subdiv: usize, s1: &BodyState, s2: &BodyState) -> Option<Hit> {
    let total = bands::band_count(subdiv);
    let j = bands::band_of(s1.lon_deg, subdiv);
    let k = bands::band_of(s2.lon_deg, subdiv);
    if j == k || !bands::bands_adjacent(j, k, total) {
        return None;
    }
    let l = bands::following_band(j, k, total);
    let boundary = bands::band_start_deg(l, subdiv);
    let frac = arc_distance(s1.lon_deg, boundary) / arc_distance(s1.lon_deg, s2.lon_deg);
    Some(Hit {
        kind: EventKind::BandIngress {
            band: k,
            retrograde: l != k,
        },
        frac,
        pos1: boundary,
        pos2: boundary,
        speed1: s1.lon_speed,
        speed2: s2.lon_speed,
    })
}

fn decan_crossing(mode: DecanMode, s1: &BodyState, s2: &BodyState) -> Option<Hit> {
    let total = mode.band_count();
    let j = mode.band_of(s1.lon_deg);
    let k = mode.band_of(s2.lon_deg);
    if j == k || !bands::bands_adjacent(j, k, total) {
        return None;
    }
    let l = bands::following_band(j, k, total);
    let boundary = mode.band_lower_deg(l);
    let frac = arc_distance(s1.lon_deg, boundary) / arc_distance(s1.lon_deg, s2.lon_deg);
    Some(Hit {
        kind: EventKind::DecanIngress {
            dest: mode.dest(k),
            retrograde: l != k,
        },
        frac,
        pos1: boundary,
        pos2: boundary,
        speed1: s1.lon_speed,
        speed2: s2.lon_speed,
    })
}

// ---------------------------------------------------------------------------
// Pairwise detectors
// ---------------------------------------------------------------------------

/// Longitude aspect between two moving bodies.
///
/// The offset `angle` is applied to whichever body covers the smaller arc,
/// on the side that keeps it nearest the other body's motion; a sign change
/// of the wraparound-corrected difference then pins the crossing. The
/// midpoint guard rejects far-side matches where the corrected difference
/// flips sign across the antipode instead of zero.
pub(crate) fn longitude_aspect(
    a1: &BodyState,
    a2: &BodyState,
    b1: &BodyState,
    b2: &BodyState,
    with: Body,
    aspect: Aspect,
    angle: f64,
) -> Result<Option<Hit>, ScanError> {
    let (mut d1, mut d2) = (a1.lon_deg, a2.lon_deg);
    let (mut e1, mut e2) = (b1.lon_deg, b2.lon_deg);
    if arc_distance(d1, d2) < arc_distance(e1, e2) {
        std::mem::swap(&mut d1, &mut e1);
        std::mem::swap(&mut d2, &mut e2);
    }
    if arc_distance(e1, wrap360(d1 - angle)) < arc_distance(e2, wrap360(d2 + angle)) {
        e1 = wrap360(e1 + angle);
        e2 = wrap360(e2 + angle);
    } else {
        e1 = wrap360(e1 - angle);
        e2 = wrap360(e2 - angle);
    }
    let f1 = signed_arc(d1, e1);
    let f2 = signed_arc(d2, e2);
    if arc_distance(midpoint_deg(d1, d2), midpoint_deg(e1, e2)) >= 90.0 || sgn(f1) == sgn(f2) {
        return Ok(None);
    }
    let slope_d = signed_arc(d1, d2);
    let slope_e = signed_arc(e1, e2);
    let frac = two_line_fraction(0.0, slope_d, f1, f1 + slope_e)
        .ok_or(ScanError::DegenerateCrossing)?;
    let g = frac.abs();
    Ok(Some(Hit {
        kind: EventKind::Aspect { with, aspect },
        frac,
        pos1: lerp_angle(a1.lon_deg, a2.lon_deg, g),
        pos2: lerp_angle(b1.lon_deg, b2.lon_deg, g),
        speed1: (a1.lon_speed + a2.lon_speed) / 2.0,
        speed2: (b1.lon_speed + b2.lon_speed) / 2.0,
    }))
}

/// Declination/latitude parallel between two moving bodies.
///
/// `a1..b2` are the compared values after any frame conversion; mean
/// latitude speeds come from the caller since conversion does not touch
/// them. Contraparallel negates the second body before comparing but
/// reports the un-negated interpolated values.
pub(crate) fn parallel_aspect(
    a1: f64,
    a2: f64,
    b1: f64,
    b2: f64,
    a_speed: f64,
    b_speed: f64,
    with: Body,
    aspect: Aspect,
) -> Result<Option<Hit>, ScanError> {
    let (e1, e2) = if aspect == Aspect::Opposition {
        (-b1, -b2)
    } else {
        (b1, b2)
    };
    let f1 = e1 - a1;
    let f2 = e2 - a2;
    if sgn(f1) == sgn(f2) {
        return Ok(None);
    }
    let frac = two_line_fraction(a1, a2, e1, e2).ok_or(ScanError::DegenerateCrossing)?;
    let g = frac.abs();
    Ok(Some(Hit {
        kind: EventKind::Parallel { with, aspect },
        frac,
        pos1: lerp(a1, a2, g),
        pos2: lerp(b1, b2, g),
        speed1: a_speed,
        speed2: b_speed,
    }))
}

/// Equal geocentric distance between two moving bodies.
pub(crate) fn equidistance(
    a1: &BodyState,
    a2: &BodyState,
    b1: &BodyState,
    b2: &BodyState,
    with: Body,
) -> Result<Option<Hit>, ScanError> {
    let f1 = b1.dist_au - a1.dist_au;
    let f2 = b2.dist_au - a2.dist_au;
    if sgn(f1) == sgn(f2) {
        return Ok(None);
    }
    let frac = two_line_fraction(a1.dist_au, a2.dist_au, b1.dist_au, b2.dist_au)
        .ok_or(ScanError::DegenerateCrossing)?;
    let g = frac.abs();
    Ok(Some(Hit {
        kind: EventKind::Equidistance { with },
        frac,
        pos1: lerp_angle(a1.lon_deg, a2.lon_deg, g),
        pos2: lerp_angle(b1.lon_deg, b2.lon_deg, g),
        speed1: (a1.lon_speed + a2.lon_speed) / 2.0,
        speed2: (b1.lon_speed + b2.lon_speed) / 2.0,
    }))
}

// ---------------------------------------------------------------------------
// Transit detectors (one side static)
// ---------------------------------------------------------------------------

/// Longitude aspect of a moving body to a fixed natal position.
///
/// At the crossing the moving body sits exactly on the offset natal point,
/// so `pos1` is that point and no interpolation error accrues.
pub(crate) fn transit_aspect(
    natal_lon: f64,
    b1: &BodyState,
    b2: &BodyState,
    with: Body,
    aspect: Aspect,
    angle: f64,
) -> Option<Hit> {
    let e1 = b1.lon_deg;
    let e2 = b2.lon_deg;
    let minus = wrap360(natal_lon - angle);
    let plus = wrap360(natal_lon + angle);
    let target = if arc_distance(e1, minus) < arc_distance(e2, plus) {
        minus
    } else {
        plus
    };
    if arc_distance(target, midpoint_deg(e1, e2)) >= 90.0 {
        return None;
    }
    let f1 = signed_arc(target, e1);
    let f2 = signed_arc(target, e2);
    if sgn(f1) == sgn(f2) {
        return None;
    }
    let frac = zero_fraction(f1, f2)?;
    Some(Hit {
        kind: EventKind::Aspect { with, aspect },
        frac,
        pos1: target,
        pos2: natal_lon,
        speed1: (b1.lon_speed + b2.lon_speed) / 2.0,
        speed2: 0.0,
    })
}

/// Declination/latitude parallel of a moving body to a fixed natal value.
pub(crate) fn transit_parallel(
    natal_value: f64,
    b1: f64,
    b2: f64,
    b_speed: f64,
    with: Body,
    aspect: Aspect,
) -> Option<Hit> {
    let (e1, e2) = if aspect == Aspect::Opposition {
        (-b1, -b2)
    } else {
        (b1, b2)
    };
    let f1 = e1 - natal_value;
    let f2 = e2 - natal_value;
    if sgn(f1) == sgn(f2) {
        return None;
    }
    let frac = zero_fraction(f1, f2)?;
    Some(Hit {
        kind: EventKind::Parallel { with, aspect },
        frac,
        pos1: lerp(b1, b2, frac),
        pos2: natal_value,
        speed1: b_speed,
        speed2: 0.0,
    })
}

/// A moving body passing the geocentric distance of a natal position.
pub(crate) fn transit_equidistance(
    natal_dist: f64,
    natal_lon: f64,
    b1: &BodyState,
    b2: &BodyState,
    with: Body,
) -> Option<Hit> {
    let e1 = b1.dist_au;
    let e2 = b2.dist_au;
    if !((natal_dist > e1 && natal_dist < e2) || (natal_dist > e2 && natal_dist < e1)) {
        return None;
    }
    let f1 = natal_dist - e1;
    let f2 = e2 - natal_dist;
    let frac = f1.abs() / (f1.abs() + f2.abs());
    Some(Hit {
        kind: EventKind::Equidistance { with },
        frac,
        pos1: lerp_angle(b1.lon_deg, b2.lon_deg, frac),
        pos2: natal_lon,
        speed1: (b1.lon_speed + b2.lon_speed) / 2.0,
        speed2: 0.0,
    })
}

/// Natal house ingress, on degree-scaled 3D house positions (house `h`
/// occupies `[h*30, (h+1)*30)` in the collaborator's scale).
pub(crate) fn house_crossing(
    f1: f64,
    f2: f64,
    lon1: f64,
    lon2: f64,
    natal_lon: f64,
    moving_speed: f64,
) -> Option<Hit> {
    let j = ((wrap360(f1) / SIGN_WIDTH_DEG).floor() as usize).min(11);
    let k = ((wrap360(f2) / SIGN_WIDTH_DEG).floor() as usize).min(11);
    if j == k || !bands::bands_adjacent(j, k, 12) {
        return None;
    }
    let edge = if signed_arc(f1, f2) >= 0.0 { k } else { j } as f64 * SIGN_WIDTH_DEG;
    let frac = arc_distance(f1, edge) / arc_distance(f1, f2);
    Some(Hit {
        kind: EventKind::HouseIngress { house: k + 1 },
        frac,
        pos1: lerp_angle(lon1, lon2, frac),
        pos2: natal_lon,
        speed1: moving_speed,
        speed2: 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidera_core::Body;
    use sidera_zodiac::{DecanDest, Sign};

    fn state(lon: f64, speed: f64) -> BodyState {
        BodyState {
            lon_deg: lon,
            lat_deg: 0.0,
            dist_au: 1.0,
            lon_speed: speed,
            lat_speed: 0.0,
            dist_speed: 0.0,
        }
    }

    const EPS: f64 = 1e-9;

    #[test]
    fn station_fires_on_reversal() {
        let hit = station(&state(100.0, 0.3), &state(100.1, -0.1)).unwrap();
        assert_eq!(
            hit.kind,
            EventKind::Station {
                direction: StationDirection::Retrograde
            }
        );
        assert!((hit.frac - 0.75).abs() < EPS);
        assert!((hit.pos1 - 100.075).abs() < EPS);
    }

    #[test]
    fn station_ignores_steady_motion() {
        assert!(station(&state(100.0, 0.3), &state(100.3, 0.2)).is_none());
        assert!(station(&state(100.0, -0.3), &state(99.7, -0.2)).is_none());
    }

    #[test]
    fn station_direct_from_retrograde() {
        let hit = station(&state(200.0, -0.2), &state(199.9, 0.2)).unwrap();
        assert_eq!(
            hit.kind,
            EventKind::Station {
                direction: StationDirection::Direct
            }
        );
        assert!((hit.frac - 0.5).abs() < EPS);
    }

    #[test]
    fn latitude_peak_reports_extreme_value() {
        let mut s1 = state(10.0, 1.0);
        let mut s2 = state(11.0, 1.0);
        s1.lat_deg = 4.9;
        s1.lat_speed = 0.2;
        s2.lat_deg = 5.0;
        s2.lat_speed = -0.2;
        let hit = latitude_peak(&s1, &s2).unwrap();
        assert_eq!(
            hit.kind,
            EventKind::LatitudePeak {
                kind: PeakKind::Maximum
            }
        );
        assert!((hit.frac - 0.5).abs() < EPS);
        assert!((hit.pos1 - 4.95).abs() < EPS);
        assert!((hit.speed1 - 1.0).abs() < EPS);
    }

    #[test]
    fn distance_peak_reports_longitude() {
        let mut s1 = state(120.0, 1.0);
        let mut s2 = state(121.0, 1.0);
        s1.dist_speed = -0.01;
        s2.dist_speed = 0.03;
        let hit = distance_peak(&s1, &s2).unwrap();
        assert_eq!(
            hit.kind,
            EventKind::DistancePeak {
                kind: PeakKind::Minimum
            }
        );
        assert!((hit.frac - 0.25).abs() < EPS);
        assert!((hit.pos1 - 120.25).abs() < EPS);
    }

    #[test]
    fn node_crossing_directions() {
        let mut s1 = state(30.0, 1.0);
        let mut s2 = state(31.0, 1.0);
        s1.lat_deg = 0.2;
        s2.lat_deg = -0.6;
        let hit = node_crossing(&s1, &s2).unwrap();
        assert_eq!(
            hit.kind,
            EventKind::NodeCrossing {
                node: NodeDirection::Descending
            }
        );
        assert!((hit.frac - 0.25).abs() < EPS);
        assert!((hit.pos1 - 30.25).abs() < EPS);

        s1.lat_deg = -0.3;
        s2.lat_deg = 0.3;
        let hit = node_crossing(&s1, &s2).unwrap();
        assert_eq!(
            hit.kind,
            EventKind::NodeCrossing {
                node: NodeDirection::Ascending
            }
        );
    }

    #[test]
    fn sign_crossing_forward() {
        let strategy = BandStrategy::Signs { subdiv: 1 };
        let hit = band_crossing(strategy, &state(29.5, 1.0), &state(30.5, 1.0)).unwrap();
        assert_eq!(hit.kind, EventKind::SignIngress { sign: Sign::Taurus });
        assert!((hit.frac - 0.5).abs() < EPS);
        assert!((hit.pos1 - 30.0).abs() < EPS);
    }

    #[test]
    fn sign_crossing_retrograde() {
        let strategy = BandStrategy::Signs { subdiv: 1 };
        let hit = band_crossing(strategy, &state(30.2, -0.8), &state(29.8, -0.8)).unwrap();
        assert_eq!(hit.kind, EventKind::SignIngress { sign: Sign::Aries });
        assert!((hit.frac - 0.5).abs() < EPS);
        assert!((hit.pos1 - 30.0).abs() < EPS);
    }

    #[test]
    fn sign_crossing_wraps_pisces_to_aries() {
        let strategy = BandStrategy::Signs { subdiv: 1 };
        let hit = band_crossing(strategy, &state(359.5, 1.0), &state(0.5, 1.0)).unwrap();
        assert_eq!(hit.kind, EventKind::SignIngress { sign: Sign::Aries });
        assert!((hit.frac - 0.5).abs() < EPS);
        assert!(hit.pos1.abs() < EPS || (hit.pos1 - 360.0).abs() < EPS);
    }

    #[test]
    fn sign_crossing_rejects_band_skip() {
        let strategy = BandStrategy::Signs { subdiv: 1 };
        assert!(band_crossing(strategy, &state(29.0, 1.0), &state(61.0, 1.0)).is_none());
        assert!(band_crossing(strategy, &state(10.0, 1.0), &state(11.0, 1.0)).is_none());
    }

    #[test]
    fn uniform_band_crossing_subdivided() {
        let strategy = BandStrategy::Signs { subdiv: 3 };
        let hit = band_crossing(strategy, &state(9.8, 1.0), &state(10.2, 1.0)).unwrap();
        assert_eq!(
            hit.kind,
            EventKind::BandIngress {
                band: 1,
                retrograde: false
            }
        );
        assert!((hit.pos1 - 10.0).abs() < EPS);
        assert!((hit.frac - 0.5).abs() < EPS);
    }

    #[test]
    fn decan_crossing_egyptian_term() {
        let strategy = BandStrategy::Decans(DecanMode::EgyptianTerms);
        // Aries: Jupiter's 6 degrees end, Venus's term begins.
        let hit = band_crossing(strategy, &state(5.9, 1.0), &state(6.1, 1.0)).unwrap();
        assert_eq!(
            hit.kind,
            EventKind::DecanIngress {
                dest: DecanDest::Ruler(Body::Venus),
                retrograde: false
            }
        );
        assert!((hit.pos1 - 6.0).abs() < EPS);
    }

    #[test]
    fn decan_crossing_retrograde_boundary() {
        let strategy = BandStrategy::Decans(DecanMode::EgyptianTerms);
        let hit = band_crossing(strategy, &state(6.1, -1.0), &state(5.9, -1.0)).unwrap();
        assert_eq!(
            hit.kind,
            EventKind::DecanIngress {
                dest: DecanDest::Ruler(Body::Jupiter),
                retrograde: true
            }
        );
        // Same boundary from the other side.
        assert!((hit.pos1 - 6.0).abs() < EPS);
    }

    #[test]
    fn conjunction_across_the_seam() {
        let a1 = state(359.9, 0.0);
        let a2 = state(359.9, 0.0);
        let b1 = state(357.0, 5.0);
        let b2 = state(2.0, 5.0);
        let hit = longitude_aspect(&a1, &a2, &b1, &b2, Body::Moon, Aspect::Conjunction, 0.0)
            .unwrap()
            .unwrap();
        assert!((hit.frac - 0.58).abs() < 1e-12);
        assert!((hit.pos1 - 359.9).abs() < 1e-9);
        assert!((hit.pos2 - 359.9).abs() < 1e-9);
    }

    #[test]
    fn aspect_far_side_rejected_by_midpoint_guard() {
        let a1 = state(10.0, 0.0);
        let a2 = state(10.0, 0.0);
        let b1 = state(190.0, 4.0);
        let b2 = state(194.0, 4.0);
        let hit = longitude_aspect(&a1, &a2, &b1, &b2, Body::Moon, Aspect::Conjunction, 0.0)
            .unwrap();
        assert!(hit.is_none());
    }

    #[test]
    fn square_aspect_exact_fraction() {
        // Body A fixed at 0; body B moves 88 -> 92, squaring at 90.
        let a1 = state(0.0, 0.0);
        let a2 = state(0.0, 0.0);
        let b1 = state(88.0, 4.0);
        let b2 = state(92.0, 4.0);
        let hit = longitude_aspect(&a1, &a2, &b1, &b2, Body::Mars, Aspect::Square, 90.0)
            .unwrap()
            .unwrap();
        assert!((hit.frac - 0.5).abs() < 1e-9);
        assert!((hit.pos2 - 90.0).abs() < 1e-9);
    }

    #[test]
    fn parallel_and_contraparallel() {
        let hit = parallel_aspect(
            10.0, 10.0, 9.0, 11.0, 0.01, 0.2, Body::Venus, Aspect::Conjunction,
        )
        .unwrap()
        .unwrap();
        assert!((hit.frac - 0.5).abs() < EPS);
        assert!((hit.pos1 - 10.0).abs() < EPS);
        assert!((hit.pos2 - 10.0).abs() < EPS);

        // Contraparallel: +10 against a body moving -9 -> -11.
        let hit = parallel_aspect(
            10.0, 10.0, -9.0, -11.0, 0.01, -0.2, Body::Venus, Aspect::Opposition,
        )
        .unwrap()
        .unwrap();
        assert!((hit.frac - 0.5).abs() < EPS);
        // Reported values are the un-negated originals.
        assert!((hit.pos2 + 10.0).abs() < EPS);
    }

    #[test]
    fn parallel_no_crossing_same_side() {
        let hit = parallel_aspect(
            10.0, 10.0, 8.0, 9.0, 0.0, 0.1, Body::Venus, Aspect::Conjunction,
        )
        .unwrap();
        assert!(hit.is_none());
    }

    #[test]
    fn equidistance_crossing() {
        let mut a1 = state(40.0, 1.0);
        let mut a2 = state(41.0, 1.0);
        let mut b1 = state(200.0, 2.0);
        let mut b2 = state(202.0, 2.0);
        a1.dist_au = 1.0;
        a2.dist_au = 1.0;
        b1.dist_au = 0.9;
        b2.dist_au = 1.2;
        let hit = equidistance(&a1, &a2, &b1, &b2, Body::Jupiter)
            .unwrap()
            .unwrap();
        assert!((hit.frac - (0.1 / 0.3)).abs() < 1e-12);
        assert!((hit.pos1 - (40.0 + 0.1 / 0.3)).abs() < 1e-9);
    }

    #[test]
    fn transit_aspect_hits_natal_point() {
        let b1 = state(95.0, 0.5);
        let b2 = state(105.0, 0.5);
        let hit = transit_aspect(100.0, &b1, &b2, Body::Sun, Aspect::Conjunction, 0.0).unwrap();
        assert!((hit.frac - 0.5).abs() < EPS);
        assert!((hit.pos1 - 100.0).abs() < EPS);
        assert!((hit.pos2 - 100.0).abs() < EPS);
        assert_eq!(hit.speed2, 0.0);
    }

    #[test]
    fn transit_aspect_picks_near_offset_side() {
        // Square of natal 100: targets at 10 and 190; motion 5 -> 15 takes
        // the 10-degree side.
        let b1 = state(5.0, 10.0);
        let b2 = state(15.0, 10.0);
        let hit = transit_aspect(100.0, &b1, &b2, Body::Sun, Aspect::Square, 90.0).unwrap();
        assert!((hit.pos1 - 10.0).abs() < EPS);
        assert!((hit.frac - 0.5).abs() < EPS);
    }

    #[test]
    fn transit_equidistance_between_bounds_only() {
        let mut b1 = state(10.0, 1.0);
        let mut b2 = state(11.0, 1.0);
        b1.dist_au = 0.8;
        b2.dist_au = 1.1;
        let hit = transit_equidistance(1.0, 250.0, &b1, &b2, Body::Saturn).unwrap();
        assert!((hit.frac - (0.2 / 0.3)).abs() < 1e-12);
        assert!((hit.pos2 - 250.0).abs() < EPS);

        b2.dist_au = 0.9;
        assert!(transit_equidistance(1.0, 250.0, &b1, &b2, Body::Saturn).is_none());
    }

    #[test]
    fn house_crossing_enters_next_house() {
        let hit = house_crossing(119.0, 121.0, 200.0, 202.0, 97.0, 1.0).unwrap();
        assert_eq!(hit.kind, EventKind::HouseIngress { house: 5 });
        assert!((hit.frac - 0.5).abs() < EPS);
        assert!((hit.pos1 - 201.0).abs() < EPS);
        assert!((hit.pos2 - 97.0).abs() < EPS);
    }
}
