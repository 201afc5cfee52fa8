//! The horizon scan: local rising, setting, and meridian crossings.
//!
//! Positions are taken into the observer's horizontal frame at every
//! segment boundary; a sign change of altitude marks a rise or set, and a
//! sign change of the meridian offset marks a culmination. Azimuth runs
//! compass-style: north 0, east 90, south 180, west 270.

use sidera_core::{ChartSource, EventTime, ScanDate};
use sidera_frames::{arc_distance, ecliptic_to_horizontal, lerp_angle, signed_arc, zero_fraction};

use crate::buffer::insertion_sort_by;
use crate::config::{ScanConfig, ScanHooks};
use crate::detect::sgn;
use crate::error::ScanError;
use crate::event::{HorizonEvent, HorizonKind, MotionSign, ScanSummary};
use crate::sampler::SegmentCursor;

/// Scan `days` calendar days of horizon crossings and collect every
/// emitted event. Convenience wrapper over [`stream_horizon_events`].
pub fn search_horizon_events(
    source: &dyn ChartSource,
    config: &ScanConfig,
    hooks: &ScanHooks,
    start: ScanDate,
    days: u32,
) -> Result<(Vec<HorizonEvent>, ScanSummary), ScanError> {
    let mut events = Vec::new();
    let summary = stream_horizon_events(source, config, hooks, start, days, &mut |batch| {
        events.extend_from_slice(batch);
    })?;
    Ok((events, summary))
}

/// Scan `days` calendar days starting at `start`, handing each day's
/// horizon events to `sink` sorted by time.
pub fn stream_horizon_events(
    source: &dyn ChartSource,
    config: &ScanConfig,
    hooks: &ScanHooks,
    start: ScanDate,
    days: u32,
    sink: &mut dyn FnMut(&[HorizonEvent]),
) -> Result<ScanSummary, ScanError> {
    config.validate().map_err(ScanError::InvalidConfig)?;
    if days == 0 {
        return Err(ScanError::InvalidConfig("day count must be positive"));
    }

    let division = config.division;
    let divsiz = 1440.0 / division as f64;

    let mut found: Vec<HorizonEvent> = Vec::new();
    let mut offered = 0usize;
    let mut saturated = false;
    let mut total_events = 0usize;
    let mut cursor = SegmentCursor::begin(source, config.axis, start, 0.0)?;

    let mut date = start;
    for _ in 0..days {
        found.clear();
        for div in 1..=division {
            cursor.advance(date, 24.0 * div as f64 / division as f64)?;
            let (c1, c2) = cursor.segment();

            for body in config.moving.iter() {
                let s1 = c1.state(body);
                let s2 = c2.state(body);
                let (az1, alt1) = ecliptic_to_horizontal(
                    s1.lon_deg,
                    s1.lat_deg,
                    c1.mc_deg,
                    c1.obliquity_deg,
                    config.latitude_deg,
                );
                let (az2, alt2) = ecliptic_to_horizontal(
                    s2.lon_deg,
                    s2.lat_deg,
                    c2.mc_deg,
                    c2.obliquity_deg,
                    config.latitude_deg,
                );

                // Altitude zero: rising on the eastern half of the sky,
                // setting on the western.
                if (alt1 > 0.0) != (alt2 > 0.0) {
                    if let Some(d) = zero_fraction(alt1, alt2) {
                        let az = lerp_angle(az1, az2, d);
                        let kind = if arc_distance(az, 270.0) < 90.0 {
                            HorizonKind::Set
                        } else {
                            HorizonKind::Rise
                        };
                        record(
                            config,
                            &mut found,
                            &mut offered,
                            &mut saturated,
                            HorizonEvent {
                                body,
                                kind,
                                when: EventTime::new(date, ((div - 1) as f64 + d) * divsiz),
                                lon_deg: lerp_angle(s1.lon_deg, s2.lon_deg, d),
                                azialt_deg: az,
                                motion: MotionSign::from_speeds(s1.lon_speed, s2.lon_speed),
                            },
                        );
                    }
                }

                // Meridian offset zero. The signed arc flips at the
                // antipode too, so the gate catches the north crossing
                // through the azimuth seam as well as the south one.
                let g1 = signed_arc(az1, 180.0);
                let g2 = signed_arc(az2, 180.0);
                if sgn(g1) != sgn(g2) {
                    let span = arc_distance(az1, az2);
                    if span > 0.0 {
                        let kind = if alt1 + alt2 >= 0.0 {
                            HorizonKind::Culminate
                        } else {
                            HorizonKind::Anticulminate
                        };
                        let boundary = if arc_distance(az1, 180.0) < 90.0 { 180.0 } else { 0.0 };
                        let d = arc_distance(az1, boundary) / span;
                        record(
                            config,
                            &mut found,
                            &mut offered,
                            &mut saturated,
                            HorizonEvent {
                                body,
                                kind,
                                when: EventTime::new(date, ((div - 1) as f64 + d) * divsiz),
                                lon_deg: lerp_angle(s1.lon_deg, s2.lon_deg, d),
                                azialt_deg: alt1 + d * (alt2 - alt1),
                                motion: MotionSign::from_speeds(s1.lon_speed, s2.lon_speed),
                            },
                        );
                    }
                }
            }
        }

        insertion_sort_by(&mut found, |a, b| a.when.minutes > b.when.minutes);
        total_events += emit_day(hooks, &found, sink);
        date = date.next_day();
    }

    Ok(ScanSummary {
        total_events,
        offered_events: offered,
        saturated,
        charts_cast: cursor.charts_cast(),
    })
}

/// Keep a detected crossing if its kind is unmasked and the day's buffer
/// has room.
fn record(
    config: &ScanConfig,
    found: &mut Vec<HorizonEvent>,
    offered: &mut usize,
    saturated: &mut bool,
    event: HorizonEvent,
) {
    if !config.horizon.includes(event.kind) {
        return;
    }
    *offered += 1;
    if found.len() < config.capacity {
        found.push(event);
    } else {
        *saturated = true;
    }
}

fn emit_day(
    hooks: &ScanHooks,
    found: &[HorizonEvent],
    sink: &mut dyn FnMut(&[HorizonEvent]),
) -> usize {
    let kept: Vec<HorizonEvent> = found
        .iter()
        .filter(|e| hooks.keeps_horizon(e))
        .copied()
        .collect();
    if !kept.is_empty() {
        sink(&kept);
    }
    kept.len()
}
