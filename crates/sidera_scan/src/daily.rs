//! The daily event scan: crossings among the moving bodies over a run of
//! calendar days.
//!
//! Each day is cut into `division` segments whose boundary charts come from
//! the casting collaborator; every enabled detector inspects every segment.
//! Hits land in the bounded per-scan buffer, are sorted within their day,
//! and leave through the sink either at once or, when void lookahead holds
//! events back, in chunks that trail the scan by enough days for the
//! lookahead to resolve.

use sidera_core::{Axis, Body, Chart, ChartSource, EventTime, ScanDate};
use sidera_frames::{ecliptic_to_equatorial, equatorial_to_ecliptic};

use crate::buffer::EventBuffer;
use crate::config::{ParallelFrame, ScanConfig, ScanHooks};
use crate::detect::{self, Hit};
use crate::error::ScanError;
use crate::event::{ALL_ASPECTS, Event, ScanSummary};
use crate::sampler::SegmentCursor;

/// Scan `days` calendar days starting at `start` and collect every emitted
/// event. Convenience wrapper over [`stream_daily_events`].
pub fn search_daily_events(
    source: &dyn ChartSource,
    config: &ScanConfig,
    hooks: &ScanHooks,
    start: ScanDate,
    days: u32,
) -> Result<(Vec<Event>, ScanSummary), ScanError> {
    let mut events = Vec::new();
    let summary = stream_daily_events(source, config, hooks, start, days, &mut |batch| {
        events.extend_from_slice(batch);
    })?;
    Ok((events, summary))
}

/// Scan `days` calendar days starting at `start`, handing finished events
/// to `sink` in nondecreasing time order.
///
/// Without void lookahead every day flushes as soon as it is scanned. With
/// lookahead in effect (Moon moving, boundary events on, more than one
/// day), events are held until the buffer passes its high-water mark, then
/// released a quarter-capacity chunk at a time so the retained tail can
/// still answer how long a void interval lasts.
pub fn stream_daily_events(
    source: &dyn ChartSource,
    config: &ScanConfig,
    hooks: &ScanHooks,
    start: ScanDate,
    days: u32,
    sink: &mut dyn FnMut(&[Event]),
) -> Result<ScanSummary, ScanError> {
    config.validate().map_err(ScanError::InvalidConfig)?;
    if days == 0 {
        return Err(ScanError::InvalidConfig("day count must be positive"));
    }

    // Progressed axes and year-scale ranges move slowly enough that the
    // fine per-day step only burns casts.
    let division = if config.axis == Axis::Progressed || days >= 365 {
        (config.division + 9) / 10
    } else {
        config.division
    };
    let divsiz = 1440.0 / division as f64;

    let lookahead = config.void_lookahead
        && config.moving.contains(Body::Moon)
        && !config.bands.is_off()
        && days > 1;
    let quarter = config.capacity / 4;

    let mut buffer = EventBuffer::new(config.capacity);
    let mut total_events = 0usize;
    let mut cursor = SegmentCursor::begin(source, config.axis, start, 0.0)?;

    let mut date = start;
    for day_index in 0..days {
        let day_start = buffer.len();
        for div in 1..=division {
            cursor.advance(date, 24.0 * div as f64 / division as f64)?;
            let (c1, c2) = cursor.segment();
            let base = (div - 1) as f64 * divsiz;
            collect_segment_hits(config, hooks, c1, c2, &mut |body, hit| {
                buffer.push(Event {
                    body,
                    kind: hit.kind,
                    when: EventTime::new(date, base + hit.frac * divsiz),
                    pos1: hit.pos1,
                    pos2: hit.pos2,
                    speed1: hit.speed1,
                    speed2: hit.speed2,
                    void_minutes: None,
                });
            })?;
        }
        buffer.sort_suffix(day_start);

        let last_day = day_index + 1 == days;
        if !lookahead || last_day {
            let n = buffer.len();
            annotate_void(hooks, buffer.events_mut(), n);
            total_events += emit_prefix(hooks, &buffer, n, sink);
            buffer.clear();
        } else if buffer.len() > 2 * quarter {
            let mut n = quarter;
            if config.day_aligned_chunks {
                let events = buffer.events();
                while n > 0 && events[n].when.date == events[n - 1].when.date {
                    n -= 1;
                }
            }
            if n > 0 {
                annotate_void(hooks, buffer.events_mut(), n);
                total_events += emit_prefix(hooks, &buffer, n, sink);
                buffer.discard_prefix(n);
            }
        }

        date = date.next_day();
    }

    Ok(ScanSummary {
        total_events,
        offered_events: buffer.offered(),
        saturated: buffer.saturated(),
        charts_cast: cursor.charts_cast(),
    })
}

// ---- segment detection ----

fn collect_segment_hits(
    config: &ScanConfig,
    hooks: &ScanHooks,
    c1: &Chart,
    c2: &Chart,
    out: &mut dyn FnMut(Body, Hit),
) -> Result<(), ScanError> {
    for body in config.moving.iter() {
        let s1 = c1.state(body);
        let s2 = c2.state(body);
        if let Some(hit) = detect::band_crossing(config.bands, s1, s2) {
            out(body, hit);
        }
        if config.stations {
            if let Some(hit) = detect::station(s1, s2) {
                out(body, hit);
            }
        }
        if config.node_crossings {
            if let Some(hit) = detect::node_crossing(s1, s2) {
                out(body, hit);
            }
        }
        if config.latitude_peaks {
            if let Some(hit) = detect::latitude_peak(s1, s2) {
                out(body, hit);
            }
        }
        if config.distance_peaks {
            if let Some(hit) = detect::distance_peak(s1, s2) {
                out(body, hit);
            }
        }
    }

    let moving: Vec<Body> = config.moving.iter().collect();
    for (i, &a) in moving.iter().enumerate() {
        for &b in &moving[i + 1..] {
            let a1 = c1.state(a);
            let a2 = c2.state(a);
            let b1 = c1.state(b);
            let b2 = c2.state(b);

            if config.parallel {
                // Only the parallel and contraparallel table slots apply.
                for &aspect in &ALL_ASPECTS[..config.aspect_count.min(2)] {
                    if !hooks.accepts(a, aspect, b) {
                        continue;
                    }
                    let hit = detect::parallel_aspect(
                        parallel_value(config.parallel_frame, a1.lon_deg, a1.lat_deg, c1),
                        parallel_value(config.parallel_frame, a2.lon_deg, a2.lat_deg, c2),
                        parallel_value(config.parallel_frame, b1.lon_deg, b1.lat_deg, c1),
                        parallel_value(config.parallel_frame, b2.lon_deg, b2.lat_deg, c2),
                        (a1.lat_speed + a2.lat_speed) / 2.0,
                        (b1.lat_speed + b2.lat_speed) / 2.0,
                        b,
                        aspect,
                    )?;
                    if let Some(hit) = hit {
                        out(a, hit);
                    }
                }
            } else if config.aspects {
                for &aspect in &ALL_ASPECTS[..config.aspect_count] {
                    if !hooks.accepts(a, aspect, b) {
                        continue;
                    }
                    let angle = config.aspect_angles[aspect.index()];
                    if let Some(hit) = detect::longitude_aspect(a1, a2, b1, b2, b, aspect, angle)? {
                        out(a, hit);
                    }
                }
            }

            if config.equidistance {
                if let Some(hit) = detect::equidistance(a1, a2, b1, b2, b)? {
                    out(a, hit);
                }
            }
        }
    }
    Ok(())
}

/// The compared value for a parallel aspect: the chart's stored latitude
/// value, converted when the stored and compared frames disagree.
pub(crate) fn parallel_value(
    frame: ParallelFrame,
    lon_deg: f64,
    lat_deg: f64,
    chart: &Chart,
) -> f64 {
    if !frame.charts_equatorial && !frame.compare_latitude {
        ecliptic_to_equatorial(lon_deg, lat_deg, chart.obliquity_deg).1
    } else if frame.charts_equatorial && frame.compare_latitude {
        equatorial_to_ecliptic(lon_deg, lat_deg, chart.obliquity_deg).1
    } else {
        lat_deg
    }
}

// ---- lookahead and emission ----

/// Fill `void_minutes` for void-starting events in the first `prefix`
/// entries, scanning the whole (sorted) buffer forward. A later
/// void-starting event supersedes the candidate before any stop arrives,
/// leaving the earlier one unresolved.
fn annotate_void(hooks: &ScanHooks, events: &mut [Event], prefix: usize) {
    for i in 0..prefix {
        if !hooks.starts_void(&events[i]) {
            continue;
        }
        let mut minutes = None;
        for j in i + 1..events.len() {
            if hooks.starts_void(&events[j]) {
                break;
            }
            if hooks.stops_void(&events[j]) {
                let start = events[i].when;
                let stop = events[j].when;
                let days = (stop.date.day_number() - start.date.day_number()) as f64;
                minutes = Some(days * 1440.0 + stop.minutes - start.minutes);
                break;
            }
        }
        events[i].void_minutes = minutes;
    }
}

/// Emit the first `n` buffered events through the filter hook; returns how
/// many survived.
fn emit_prefix(
    hooks: &ScanHooks,
    buffer: &EventBuffer,
    n: usize,
    sink: &mut dyn FnMut(&[Event]),
) -> usize {
    let kept: Vec<Event> = buffer.events()[..n]
        .iter()
        .filter(|e| hooks.keeps(e))
        .copied()
        .collect();
    if !kept.is_empty() {
        sink(&kept);
    }
    kept.len()
}
