//! Segment sampling: walking a scan period as pairs of adjacent charts.

use sidera_core::{Axis, CastMoment, Chart, ChartSource, ScanDate};

use crate::error::ScanError;

/// Walks a scan period one cast at a time, holding exactly the two charts
/// that bound the current segment.
///
/// `advance` casts only the leading boundary; the previous leading chart
/// becomes the trailing one by move. Casts are tallied for the summary.
pub(crate) struct SegmentCursor<'a> {
    source: &'a dyn ChartSource,
    axis: Axis,
    charts_cast: usize,
    start: Chart,
    end: Chart,
}

impl<'a> SegmentCursor<'a> {
    /// Cast the opening boundary; both segment edges start there.
    pub fn begin(
        source: &'a dyn ChartSource,
        axis: Axis,
        date: ScanDate,
        hours: f64,
    ) -> Result<Self, ScanError> {
        let moment = normalize_moment(date, hours, axis);
        let chart = source.cast(&moment)?;
        Ok(Self {
            source,
            axis,
            charts_cast: 1,
            start: chart.clone(),
            end: chart,
        })
    }

    pub fn advance(&mut self, date: ScanDate, hours: f64) -> Result<(), ScanError> {
        let moment = normalize_moment(date, hours, self.axis);
        let chart = self.source.cast(&moment)?;
        self.start = std::mem::replace(&mut self.end, chart);
        self.charts_cast += 1;
        Ok(())
    }

    /// The trailing and leading charts of the current segment.
    pub fn segment(&self) -> (&Chart, &Chart) {
        (&self.start, &self.end)
    }

    pub fn charts_cast(&self) -> usize {
        self.charts_cast
    }
}

/// Roll whole days out of an hour offset so collaborators only ever see
/// hours within a single day. Month-period scans address boundaries as
/// hours past the first midnight, which can run to several hundred.
pub(crate) fn normalize_moment(mut date: ScanDate, mut hours: f64, axis: Axis) -> CastMoment {
    while hours >= 24.0 {
        hours -= 24.0;
        date = date.next_day();
    }
    CastMoment::new(date, hours, axis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidera_core::{Body, BodyState, CastError};

    /// Sun longitude equals days since the epoch; everything else zeroed.
    struct ClockSource;

    impl ChartSource for ClockSource {
        fn cast(&self, moment: &CastMoment) -> Result<Chart, CastError> {
            let t = moment.date.day_number() as f64 + moment.hours / 24.0;
            let mut states = [BodyState::ZERO; Body::COUNT];
            states[Body::Sun.index()].lon_deg = t.rem_euclid(360.0);
            Ok(Chart::new(states, 0.0, 23.44))
        }

        fn house_place_3d(&self, _natal: &Chart, lon_deg: f64, _lat_deg: f64) -> f64 {
            lon_deg
        }
    }

    #[test]
    fn advance_shifts_leading_chart_back() {
        let src = ClockSource;
        let day = ScanDate::new(1970, 1, 10);
        let mut cursor = SegmentCursor::begin(&src, Axis::Calendar, day, 0.0).unwrap();
        assert_eq!(cursor.charts_cast(), 1);
        let (s, e) = cursor.segment();
        assert_eq!(s.lon(Body::Sun), e.lon(Body::Sun));

        cursor.advance(day, 12.0).unwrap();
        let (s, e) = cursor.segment();
        assert!((e.lon(Body::Sun) - s.lon(Body::Sun) - 0.5).abs() < 1e-12);
        assert_eq!(cursor.charts_cast(), 2);

        // Hour 24 is the same instant as the next midnight.
        cursor.advance(day, 24.0).unwrap();
        let (s, e) = cursor.segment();
        assert!((e.lon(Body::Sun) - s.lon(Body::Sun) - 0.5).abs() < 1e-12);
        assert_eq!(cursor.charts_cast(), 3);
    }

    #[test]
    fn moments_roll_whole_days() {
        let m = normalize_moment(ScanDate::new(2024, 2, 28), 50.0, Axis::Calendar);
        assert_eq!(m.date, ScanDate::new(2024, 3, 1));
        assert!((m.hours - 2.0).abs() < 1e-12);

        let m = normalize_moment(ScanDate::new(2024, 1, 1), 23.5, Axis::Progressed);
        assert_eq!(m.date, ScanDate::new(2024, 1, 1));
        assert!((m.hours - 23.5).abs() < 1e-12);
        assert_eq!(m.axis, Axis::Progressed);
    }
}
