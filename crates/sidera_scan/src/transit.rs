//! The transit scan: moving bodies against a fixed natal chart, month by
//! month.
//!
//! The natal chart is cast once; only the moving side is re-cast per
//! segment boundary. A month is cut into `division` segments spanning the
//! whole month, and each segment's finds are sorted and emitted before the
//! next is scanned, so the sink sees nondecreasing times without any
//! retention.

use sidera_core::{
    Axis, Body, CastMoment, Chart, ChartSource, EventTime, ScanDate, days_in_month,
};

use crate::buffer::EventBuffer;
use crate::config::{ScanConfig, ScanHooks};
use crate::daily::parallel_value;
use crate::detect::{self, Hit};
use crate::error::ScanError;
use crate::event::{ALL_ASPECTS, Event, ScanSummary};
use crate::sampler::SegmentCursor;

/// Scan `months` calendar months against the natal chart and collect every
/// emitted event. Convenience wrapper over [`stream_transit_events`].
pub fn search_transit_events(
    source: &dyn ChartSource,
    config: &ScanConfig,
    hooks: &ScanHooks,
    natal_moment: &CastMoment,
    start: ScanDate,
    months: u32,
) -> Result<(Vec<Event>, ScanSummary), ScanError> {
    let mut events = Vec::new();
    let summary =
        stream_transit_events(source, config, hooks, natal_moment, start, months, &mut |batch| {
            events.extend_from_slice(batch);
        })?;
    Ok((events, summary))
}

/// Scan `months` calendar months beginning with `start`'s month, handing
/// finished events to `sink` one sorted segment at a time.
///
/// Event times carry the event's civil day plus minutes from the month's
/// first midnight. With house ingress enabled the division is floored at
/// 96 so house boundaries, which sweep the whole circle daily, cannot
/// outrun the sampling.
pub fn stream_transit_events(
    source: &dyn ChartSource,
    config: &ScanConfig,
    hooks: &ScanHooks,
    natal_moment: &CastMoment,
    start: ScanDate,
    months: u32,
    sink: &mut dyn FnMut(&[Event]),
) -> Result<ScanSummary, ScanError> {
    config.validate().map_err(ScanError::InvalidConfig)?;
    if months == 0 {
        return Err(ScanError::InvalidConfig("month count must be positive"));
    }

    let division = if config.house_ingress {
        config.division.max(96)
    } else {
        config.division
    };

    let natal = source.cast(natal_moment)?;
    let mut buffer = EventBuffer::new(config.capacity);
    let mut total_events = 0usize;

    let mut month_start = ScanDate::new(start.year, start.month, 1);
    let mut cursor = SegmentCursor::begin(source, config.axis, month_start, 0.0)?;

    for _ in 0..months {
        let days = days_in_month(month_start.year, month_start.month);
        let divsiz = days as f64 * 1440.0 / division as f64;

        for div in 1..=division {
            cursor.advance(month_start, div as f64 * divsiz / 60.0)?;
            let (c1, c2) = cursor.segment();
            let base = (div - 1) as f64 * divsiz;

            buffer.clear();
            collect_transit_hits(source, config, hooks, &natal, c1, c2, &mut |body, hit| {
                let minutes = base + hit.frac * divsiz;
                let day0 = ((minutes / 1440.0).floor() as u32).min(days - 1);
                buffer.push(Event {
                    body,
                    kind: hit.kind,
                    when: EventTime::new(
                        ScanDate::new(month_start.year, month_start.month, day0 + 1),
                        minutes,
                    ),
                    pos1: hit.pos1,
                    pos2: hit.pos2,
                    speed1: hit.speed1,
                    speed2: hit.speed2,
                    void_minutes: None,
                });
            })?;

            buffer.sort_suffix(0);
            total_events += emit_all(hooks, &buffer, sink);
        }

        month_start = month_start.next_month();
    }

    Ok(ScanSummary {
        total_events,
        offered_events: buffer.offered(),
        saturated: buffer.saturated(),
        charts_cast: cursor.charts_cast() + 1,
    })
}

// ---- segment detection ----

fn collect_transit_hits(
    source: &dyn ChartSource,
    config: &ScanConfig,
    hooks: &ScanHooks,
    natal: &Chart,
    c1: &Chart,
    c2: &Chart,
    out: &mut dyn FnMut(Body, Hit),
) -> Result<(), ScanError> {
    for body in config.moving.iter() {
        let s1 = c1.state(body);
        let s2 = c2.state(body);

        // Progressed positions creep; their boundary crossings are events
        // in their own right alongside the transits.
        if config.axis == Axis::Progressed {
            if let Some(hit) = detect::band_crossing(config.bands, s1, s2) {
                out(body, hit);
            }
        }

        if config.house_ingress {
            let f1 = source.house_place_3d(natal, s1.lon_deg, s1.lat_deg);
            let f2 = source.house_place_3d(natal, s2.lon_deg, s2.lat_deg);
            if let Some(hit) = detect::house_crossing(
                f1,
                f2,
                s1.lon_deg,
                s2.lon_deg,
                natal.lon(body),
                (s1.lon_speed + s2.lon_speed) / 2.0,
            ) {
                out(body, hit);
            }
        }
    }

    for natal_body in config.natal.iter() {
        for moving in config.moving.iter() {
            let b1 = c1.state(moving);
            let b2 = c2.state(moving);

            if config.parallel {
                for &aspect in &ALL_ASPECTS[..config.aspect_count.min(2)] {
                    if !hooks.accepts(moving, aspect, natal_body) {
                        continue;
                    }
                    let n = natal.state(natal_body);
                    let hit = detect::transit_parallel(
                        parallel_value(config.parallel_frame, n.lon_deg, n.lat_deg, natal),
                        parallel_value(config.parallel_frame, b1.lon_deg, b1.lat_deg, c1),
                        parallel_value(config.parallel_frame, b2.lon_deg, b2.lat_deg, c2),
                        (b1.lat_speed + b2.lat_speed) / 2.0,
                        natal_body,
                        aspect,
                    );
                    if let Some(hit) = hit {
                        out(moving, hit);
                    }
                }
            } else if config.aspects {
                for &aspect in &ALL_ASPECTS[..config.aspect_count] {
                    if !hooks.accepts(moving, aspect, natal_body) {
                        continue;
                    }
                    let angle = config.aspect_angles[aspect.index()];
                    if let Some(hit) = detect::transit_aspect(
                        natal.lon(natal_body),
                        b1,
                        b2,
                        natal_body,
                        aspect,
                        angle,
                    ) {
                        out(moving, hit);
                    }
                }
            }

            if config.equidistance {
                if let Some(hit) = detect::transit_equidistance(
                    natal.dist(natal_body),
                    natal.lon(natal_body),
                    b1,
                    b2,
                    natal_body,
                ) {
                    out(moving, hit);
                }
            }
        }
    }
    Ok(())
}

fn emit_all(hooks: &ScanHooks, buffer: &EventBuffer, sink: &mut dyn FnMut(&[Event])) -> usize {
    let kept: Vec<Event> = buffer
        .events()
        .iter()
        .filter(|e| hooks.keeps(e))
        .copied()
        .collect();
    if !kept.is_empty() {
        sink(&kept);
    }
    kept.len()
}
