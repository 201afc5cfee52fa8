//! Calendar dates, event times, and cast moments.
//!
//! Scans iterate civil (Gregorian) calendar periods; event times are stored
//! as minute offsets within the scanned period so they sort cheaply.

/// Civil calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScanDate {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
    /// 1-based day of month.
    pub day: u32,
}

impl ScanDate {
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// The day after this one, rolling month and year boundaries.
    #[must_use]
    pub fn next_day(self) -> Self {
        if self.day < days_in_month(self.year, self.month) {
            Self::new(self.year, self.month, self.day + 1)
        } else if self.month < 12 {
            Self::new(self.year, self.month + 1, 1)
        } else {
            Self::new(self.year + 1, 1, 1)
        }
    }

    /// The first day of the month after this one's.
    #[must_use]
    pub const fn next_month(self) -> Self {
        if self.month < 12 {
            Self::new(self.year, self.month + 1, 1)
        } else {
            Self::new(self.year + 1, 1, 1)
        }
    }

    /// Continuous civil day count (days since 1970-01-01), so durations
    /// spanning month and year boundaries reduce to a subtraction.
    pub const fn day_number(self) -> i64 {
        let y = if self.month <= 2 {
            self.year as i64 - 1
        } else {
            self.year as i64
        };
        let era = if y >= 0 { y } else { y - 399 } / 400;
        let yoe = y - era * 400;
        let m = self.month as i64;
        let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + self.day as i64 - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        era * 146_097 + doe - 719_468
    }
}

impl std::fmt::Display for ScanDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// When an event occurs: a date plus a minute offset within the scanned
/// period (`[0, 1440]` for day-period scans, `[0, days * 1440]` for
/// month-period scans; a crossing on the final segment boundary lands
/// exactly on the period end). Events sort by `minutes` within one period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventTime {
    pub date: ScanDate,
    pub minutes: f64,
}

impl EventTime {
    pub const fn new(date: ScanDate, minutes: f64) -> Self {
        Self { date, minutes }
    }
}

/// Time axis a chart is cast on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Cast for the calendar moment itself.
    #[default]
    Calendar,
    /// Map the calendar moment through the collaborator's progression
    /// before casting (secondary progressions or equivalent).
    Progressed,
}

/// A single moment the casting collaborator must produce a chart for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastMoment {
    pub date: ScanDate,
    /// Hours past local midnight, fractional.
    pub hours: f64,
    pub axis: Axis,
}

impl CastMoment {
    pub const fn new(date: ScanDate, hours: f64, axis: Axis) -> Self {
        Self { date, hours, axis }
    }
}

pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Days in a civil month. `month` outside `1..=12` returns 30.
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}
