//! Integration tests for void-of-course annotation: the lookahead that
//! stamps qualifying aspects with the minutes until the next boundary
//! crossing breaks the condition.

use sidera_core::{
    Body, BodySet, BodyState, CastError, CastMoment, Chart, ChartSource, ScanDate,
};
use sidera_scan::{
    BandStrategy, Event, EventKind, ScanConfig, ScanHooks, search_daily_events,
    stream_daily_events,
};

/// Quadratic per-body motion anchored at a chosen date's midnight.
struct PolySource {
    anchor: ScanDate,
    base: [f64; Body::COUNT],
    rate: [f64; Body::COUNT],
    accel: [f64; Body::COUNT],
}

impl PolySource {
    fn new(anchor: ScanDate) -> Self {
        Self {
            anchor,
            base: [0.0; Body::COUNT],
            rate: [0.0; Body::COUNT],
            accel: [0.0; Body::COUNT],
        }
    }

    fn linear(mut self, body: Body, base: f64, rate: f64) -> Self {
        self.base[body.index()] = base;
        self.rate[body.index()] = rate;
        self
    }

    fn accelerated(mut self, body: Body, base: f64, rate: f64, accel: f64) -> Self {
        self.base[body.index()] = base;
        self.rate[body.index()] = rate;
        self.accel[body.index()] = accel;
        self
    }
}

impl ChartSource for PolySource {
    fn cast(&self, moment: &CastMoment) -> Result<Chart, CastError> {
        let t = (moment.date.day_number() - self.anchor.day_number()) as f64
            + moment.hours / 24.0;
        let mut states = [BodyState::ZERO; Body::COUNT];
        for i in 0..Body::COUNT {
            let lon = self.base[i] + self.rate[i] * t + self.accel[i] * t * t / 2.0;
            states[i].lon_deg = lon.rem_euclid(360.0);
            states[i].lon_speed = self.rate[i] + self.accel[i] * t;
            states[i].dist_au = 1.0;
        }
        Ok(Chart::new(states, 0.0, 23.44))
    }

    fn house_place_3d(&self, _natal: &Chart, lon_deg: f64, _lat_deg: f64) -> f64 {
        lon_deg
    }
}

fn lunar_config(moving: BodySet) -> ScanConfig {
    let mut config = ScanConfig::default();
    config.moving = moving;
    config.aspect_count = 1;
    config.stations = false;
    config.bands = BandStrategy::Signs { subdiv: 1 };
    config
}

fn find<'a>(events: &'a [Event], pred: impl Fn(&Event) -> bool) -> &'a Event {
    events.iter().find(|e| pred(e)).expect("expected event missing")
}

/// The Moon's last aspect before leaving a sign is stamped with the void
/// interval; the ingress itself is not.
#[test]
fn last_lunar_aspect_carries_void_minutes() {
    let start = ScanDate::new(2024, 3, 7);
    // Moon from 4.75 at one degree per hour: conjunct the Sun at minute
    // 315 of day one, into Taurus at minute 75 of day two.
    let source = PolySource::new(start)
        .linear(Body::Sun, 10.0, 0.0)
        .linear(Body::Moon, 4.75, 24.0);
    let config = lunar_config(BodySet::of(&[Body::Sun, Body::Moon]));

    let (events, summary) =
        search_daily_events(&source, &config, &ScanHooks::default(), start, 2).unwrap();

    assert_eq!(events.len(), 2, "events: {events:?}");
    let conj = find(&events, |e| matches!(e.kind, EventKind::Aspect { .. }));
    let ingress = find(&events, |e| matches!(e.kind, EventKind::SignIngress { .. }));

    assert!((conj.when.minutes - 315.0).abs() < 1e-6, "conj at {}", conj.when.minutes);
    assert_eq!(ingress.when.date, ScanDate::new(2024, 3, 8));
    assert!((ingress.when.minutes - 75.0).abs() < 1e-6);

    // 1125 minutes left in day one plus 75 in day two.
    let void = conj.void_minutes.expect("conjunction not annotated");
    assert!((void - 1200.0).abs() < 1e-6, "void interval {void}");
    assert_eq!(ingress.void_minutes, None);
    assert_eq!(summary.total_events, 2);
}

/// A later lunar aspect supersedes an earlier one: only the aspect
/// closest to the ingress carries the void interval.
#[test]
fn later_aspect_supersedes_earlier_candidate() {
    let start = ScanDate::new(2024, 3, 7);
    // Conjunct the Sun at minute 315 and Mercury at minute 915; into
    // Taurus at minute 75 of day two.
    let source = PolySource::new(start)
        .linear(Body::Sun, 10.0, 0.0)
        .linear(Body::Mercury, 20.0, 0.0)
        .linear(Body::Moon, 4.75, 24.0);
    let config = lunar_config(BodySet::of(&[Body::Sun, Body::Moon, Body::Mercury]));

    let (events, _) =
        search_daily_events(&source, &config, &ScanHooks::default(), start, 2).unwrap();

    assert_eq!(events.len(), 3, "events: {events:?}");
    let with_sun = find(&events, |e| {
        matches!(e.kind, EventKind::Aspect { with: Body::Moon, .. }) && e.body == Body::Sun
    });
    let with_mercury = find(&events, |e| {
        matches!(e.kind, EventKind::Aspect { with: Body::Mercury, .. })
    });

    assert_eq!(with_sun.void_minutes, None, "superseded aspect must stay blank");
    let void = with_mercury.void_minutes.expect("final aspect not annotated");
    assert!((void - 600.0).abs() < 1e-6, "void interval {void}");
}

/// Custom hook predicates redefine both ends of the interval; annotation
/// still runs when the built-in lunar conditions never could.
#[test]
fn custom_hooks_redefine_the_interval() {
    let start = ScanDate::new(2024, 3, 7);
    // Mars conjunct Jupiter at minute 72 of day two; Mercury stations
    // retrograde at noon the same day.
    let source = PolySource::new(start)
        .linear(Body::Mars, 97.9, 2.0)
        .linear(Body::Jupiter, 100.0, 0.0)
        .accelerated(Body::Mercury, 200.0, 3.0, -2.0);
    let mut config = lunar_config(BodySet::of(&[Body::Mars, Body::Jupiter, Body::Mercury]));
    config.stations = true;
    config.bands = BandStrategy::Off;

    let mut hooks = ScanHooks::default();
    hooks.void_start = Some(Box::new(|e: &Event| {
        matches!(e.kind, EventKind::Aspect { .. })
    }));
    hooks.void_stop = Some(Box::new(|e: &Event| {
        matches!(e.kind, EventKind::Station { .. })
    }));

    let (events, _) = search_daily_events(&source, &config, &hooks, start, 3).unwrap();

    assert_eq!(events.len(), 2, "events: {events:?}");
    let conj = find(&events, |e| matches!(e.kind, EventKind::Aspect { .. }));
    let station = find(&events, |e| matches!(e.kind, EventKind::Station { .. }));
    assert_eq!(conj.when.date, ScanDate::new(2024, 3, 8));
    assert!((conj.when.minutes - 72.0).abs() < 1e-6);
    assert_eq!(station.when.date, ScanDate::new(2024, 3, 8));
    assert!((station.when.minutes - 720.0).abs() < 1e-6);

    let void = conj.void_minutes.expect("conjunction not annotated");
    assert!((void - 648.0).abs() < 1e-6, "void interval {void}");
    assert_eq!(station.void_minutes, None);
}

/// With a small buffer the lookahead flushes in chunks; chunk boundaries
/// never split the stream out of order and every event still arrives
/// exactly once, annotated.
#[test]
fn chunked_flushes_preserve_order_and_annotations() {
    let start = ScanDate::new(2024, 3, 7);
    // The Moon sweeps a sign every 1.25 days and aspects the static Sun
    // on the way; five days produce a steady trickle of events.
    let source = PolySource::new(start)
        .linear(Body::Sun, 100.0, 0.0)
        .linear(Body::Moon, 19.25, 24.0);
    let mut config = lunar_config(BodySet::of(&[Body::Sun, Body::Moon]));
    config.aspect_count = 5;
    config.capacity = 8;

    let mut batches = 0usize;
    let mut collected: Vec<Event> = Vec::new();
    let summary = stream_daily_events(
        &source,
        &config,
        &ScanHooks::default(),
        start,
        5,
        &mut |batch| {
            batches += 1;
            collected.extend_from_slice(batch);
        },
    )
    .unwrap();

    assert!(batches >= 2, "expected multiple flushes, got {batches}");
    assert_eq!(collected.len(), summary.total_events);
    assert_eq!(collected.len(), 6, "events: {collected:?}");
    assert!(!summary.saturated);
    for pair in collected.windows(2) {
        let a = (pair[0].when.date, pair[0].when.minutes);
        let b = (pair[1].when.date, pair[1].when.minutes);
        assert!(a <= b, "out of order: {a:?} then {b:?}");
    }

    // Both lunar aspects are followed by an ingress before any other
    // aspect, so both carry an interval; nothing else does.
    let annotated: Vec<&Event> = collected
        .iter()
        .filter(|e| e.void_minutes.is_some())
        .collect();
    assert_eq!(annotated.len(), 2, "events: {collected:?}");
    for e in annotated {
        assert!(matches!(e.kind, EventKind::Aspect { .. }));
        let void = e.void_minutes.unwrap();
        assert!((void - 1200.0).abs() < 1e-6, "void interval {void}");
    }
}
