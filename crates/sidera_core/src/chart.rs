//! Chart snapshots: the full state of all tracked bodies at one instant.

use crate::body::{ALL_BODIES, Body};

/// State of one body at one instant.
///
/// Rates are per-day signed values; a negative `lon_speed` means apparent
/// retrograde motion. Many detectors act only on the sign of a rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    /// Ecliptic longitude in degrees, `[0, 360)`.
    pub lon_deg: f64,
    /// Ecliptic latitude in degrees.
    pub lat_deg: f64,
    /// Distance from the observer in AU.
    pub dist_au: f64,
    /// Longitude rate in degrees/day.
    pub lon_speed: f64,
    /// Latitude rate in degrees/day.
    pub lat_speed: f64,
    /// Distance rate in AU/day.
    pub dist_speed: f64,
}

impl BodyState {
    /// A zeroed state, useful as an array seed before filling a chart.
    pub const ZERO: Self = Self {
        lon_deg: 0.0,
        lat_deg: 0.0,
        dist_au: 0.0,
        lon_speed: 0.0,
        lat_speed: 0.0,
        dist_speed: 0.0,
    };
}

/// Snapshot of the whole moving system at one instant.
///
/// Exactly two charts are alive during a scan: the current segment's start
/// and end. The end chart becomes the next segment's start by move, so the
/// casting collaborator is invoked once per boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    states: [BodyState; Body::COUNT],
    /// Midheaven ecliptic longitude in degrees, `[0, 360)`.
    pub mc_deg: f64,
    /// Mean obliquity of the ecliptic in degrees.
    pub obliquity_deg: f64,
}

impl Chart {
    pub fn new(states: [BodyState; Body::COUNT], mc_deg: f64, obliquity_deg: f64) -> Self {
        Self {
            states,
            mc_deg,
            obliquity_deg,
        }
    }

    pub fn state(&self, body: Body) -> &BodyState {
        &self.states[body.index()]
    }

    pub fn lon(&self, body: Body) -> f64 {
        self.states[body.index()].lon_deg
    }

    pub fn lat(&self, body: Body) -> f64 {
        self.states[body.index()].lat_deg
    }

    pub fn dist(&self, body: Body) -> f64 {
        self.states[body.index()].dist_au
    }

    pub fn lon_speed(&self, body: Body) -> f64 {
        self.states[body.index()].lon_speed
    }

    /// Iterate `(body, state)` in chart-index order.
    pub fn iter(&self) -> impl Iterator<Item = (Body, &BodyState)> {
        ALL_BODIES.iter().map(move |b| (*b, self.state(*b)))
    }
}
