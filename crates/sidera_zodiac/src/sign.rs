//! Zodiac signs.
//!
//! The ecliptic circle is divided into 12 equal signs of 30 degrees each,
//! starting from Aries at 0 degrees. Sign identity is a pure function of
//! longitude; the scanners only ever compare sign indices across a segment,
//! so everything here is table-free arithmetic.

/// Width of one sign in degrees.
pub const SIGN_WIDTH_DEG: f64 = 30.0;

/// The 12 zodiac signs starting from Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// All 12 signs in zodiacal order (0 = Aries, 11 = Pisces).
pub const ALL_SIGNS: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

impl Sign {
    /// Number of signs.
    pub const COUNT: usize = 12;

    /// 0-based index (Aries=0 .. Pisces=11).
    pub const fn index(self) -> usize {
        match self {
            Self::Aries => 0,
            Self::Taurus => 1,
            Self::Gemini => 2,
            Self::Cancer => 3,
            Self::Leo => 4,
            Self::Virgo => 5,
            Self::Libra => 6,
            Self::Scorpio => 7,
            Self::Sagittarius => 8,
            Self::Capricorn => 9,
            Self::Aquarius => 10,
            Self::Pisces => 11,
        }
    }

    /// Convert a 0-based index back into a [`Sign`], wrapping modulo 12.
    ///
    /// Wrapping keeps derived-sign arithmetic (decan walks, dwad offsets)
    /// free of range bookkeeping at the call sites.
    pub const fn from_index_wrapped(index: usize) -> Self {
        ALL_SIGNS[index % 12]
    }

    /// English name of the sign.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// Longitude of the sign's leading edge in degrees.
    pub const fn start_deg(self) -> f64 {
        self.index() as f64 * SIGN_WIDTH_DEG
    }

    /// The next sign in zodiacal order, wrapping Pisces back to Aries.
    pub const fn next(self) -> Self {
        Self::from_index_wrapped(self.index() + 1)
    }

    /// The previous sign in zodiacal order, wrapping Aries back to Pisces.
    pub const fn prev(self) -> Self {
        Self::from_index_wrapped(self.index() + 11)
    }
}

/// Normalize longitude to [0, 360).
fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

/// Determine the sign holding an ecliptic longitude.
///
/// Each sign spans exactly 30 degrees: Aries = [0, 30), Taurus = [30, 60),
/// and so on. The index is clamped for the floating point edge at 360.0.
pub fn sign_of(lon_deg: f64) -> Sign {
    let lon = normalize_360(lon_deg);
    let idx = ((lon / SIGN_WIDTH_DEG).floor() as usize).min(11);
    ALL_SIGNS[idx]
}

/// Degrees into the containing sign, in [0, 30).
pub fn degrees_in_sign(lon_deg: f64) -> f64 {
    let lon = normalize_360(lon_deg);
    lon - sign_of(lon_deg).start_deg()
}
