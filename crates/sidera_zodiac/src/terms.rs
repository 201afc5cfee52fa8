//! Irregular and derived sign subdivisions: terms, decans, navamsas, dwads.
//!
//! Unlike the uniform grids in [`bands`](crate::bands), these subdivisions
//! carry a meaning per slice: each term or decan is assigned either a ruling
//! planet or a derived sign, and a boundary crossing reports that assignment
//! as the destination. The Egyptian and Ptolemaic term schemes additionally
//! have irregular slice widths, so boundary longitudes must be accumulated
//! from the tables rather than computed by division.
//!
//! All tables are per classical convention; each row of widths sums to
//! exactly 30 degrees, which the tests assert.

use sidera_core::Body;

use crate::sign::{ALL_SIGNS, SIGN_WIDTH_DEG, Sign, degrees_in_sign, sign_of};

/// Egyptian term rulers and widths, indexed by sign.
const EGYPTIAN_TERMS: [[(Body, f64); 5]; 12] = [
    // Aries
    [
        (Body::Jupiter, 6.0),
        (Body::Venus, 6.0),
        (Body::Mercury, 8.0),
        (Body::Mars, 5.0),
        (Body::Saturn, 5.0),
    ],
    // Taurus
    [
        (Body::Venus, 8.0),
        (Body::Mercury, 6.0),
        (Body::Jupiter, 8.0),
        (Body::Saturn, 5.0),
        (Body::Mars, 3.0),
    ],
    // Gemini
    [
        (Body::Mercury, 6.0),
        (Body::Jupiter, 6.0),
        (Body::Venus, 5.0),
        (Body::Mars, 7.0),
        (Body::Saturn, 6.0),
    ],
    // Cancer
    [
        (Body::Mars, 7.0),
        (Body::Venus, 6.0),
        (Body::Mercury, 6.0),
        (Body::Jupiter, 7.0),
        (Body::Saturn, 4.0),
    ],
    // Leo
    [
        (Body::Jupiter, 6.0),
        (Body::Venus, 5.0),
        (Body::Saturn, 7.0),
        (Body::Mercury, 6.0),
        (Body::Mars, 6.0),
    ],
    // Virgo
    [
        (Body::Mercury, 7.0),
        (Body::Venus, 10.0),
        (Body::Jupiter, 4.0),
        (Body::Mars, 7.0),
        (Body::Saturn, 2.0),
    ],
    // Libra
    [
        (Body::Saturn, 6.0),
        (Body::Mercury, 8.0),
        (Body::Jupiter, 7.0),
        (Body::Venus, 7.0),
        (Body::Mars, 2.0),
    ],
    // Scorpio
    [
        (Body::Mars, 7.0),
        (Body::Venus, 4.0),
        (Body::Mercury, 8.0),
        (Body::Jupiter, 5.0),
        (Body::Saturn, 6.0),
    ],
    // Sagittarius
    [
        (Body::Jupiter, 12.0),
        (Body::Venus, 5.0),
        (Body::Mercury, 4.0),
        (Body::Saturn, 5.0),
        (Body::Mars, 4.0),
    ],
    // Capricorn
    [
        (Body::Mercury, 7.0),
        (Body::Jupiter, 7.0),
        (Body::Venus, 8.0),
        (Body::Saturn, 4.0),
        (Body::Mars, 4.0),
    ],
    // Aquarius
    [
        (Body::Mercury, 7.0),
        (Body::Venus, 6.0),
        (Body::Jupiter, 7.0),
        (Body::Mars, 5.0),
        (Body::Saturn, 5.0),
    ],
    // Pisces
    [
        (Body::Venus, 12.0),
        (Body::Jupiter, 4.0),
        (Body::Mercury, 3.0),
        (Body::Mars, 9.0),
        (Body::Saturn, 2.0),
    ],
];

/// Ptolemaic term rulers and widths, indexed by sign.
const PTOLEMAIC_TERMS: [[(Body, f64); 5]; 12] = [
    // Aries
    [
        (Body::Jupiter, 6.0),
        (Body::Venus, 8.0),
        (Body::Mercury, 7.0),
        (Body::Mars, 5.0),
        (Body::Saturn, 4.0),
    ],
    // Taurus
    [
        (Body::Venus, 8.0),
        (Body::Mercury, 7.0),
        (Body::Jupiter, 7.0),
        (Body::Saturn, 2.0),
        (Body::Mars, 6.0),
    ],
    // Gemini
    [
        (Body::Mercury, 7.0),
        (Body::Jupiter, 6.0),
        (Body::Venus, 7.0),
        (Body::Mars, 6.0),
        (Body::Saturn, 4.0),
    ],
    // Cancer
    [
        (Body::Mars, 6.0),
        (Body::Jupiter, 7.0),
        (Body::Mercury, 7.0),
        (Body::Venus, 7.0),
        (Body::Saturn, 3.0),
    ],
    // Leo
    [
        (Body::Jupiter, 6.0),
        (Body::Mercury, 7.0),
        (Body::Saturn, 6.0),
        (Body::Venus, 6.0),
        (Body::Mars, 5.0),
    ],
    // Virgo
    [
        (Body::Mercury, 7.0),
        (Body::Venus, 6.0),
        (Body::Jupiter, 5.0),
        (Body::Saturn, 6.0),
        (Body::Mars, 6.0),
    ],
    // Libra
    [
        (Body::Saturn, 6.0),
        (Body::Venus, 5.0),
        (Body::Mercury, 5.0),
        (Body::Jupiter, 8.0),
        (Body::Mars, 6.0),
    ],
    // Scorpio
    [
        (Body::Mars, 6.0),
        (Body::Jupiter, 8.0),
        (Body::Venus, 7.0),
        (Body::Mercury, 6.0),
        (Body::Saturn, 3.0),
    ],
    // Sagittarius
    [
        (Body::Jupiter, 8.0),
        (Body::Venus, 6.0),
        (Body::Mercury, 5.0),
        (Body::Saturn, 6.0),
        (Body::Mars, 5.0),
    ],
    // Capricorn
    [
        (Body::Venus, 6.0),
        (Body::Mercury, 6.0),
        (Body::Jupiter, 7.0),
        (Body::Saturn, 6.0),
        (Body::Mars, 5.0),
    ],
    // Aquarius
    [
        (Body::Saturn, 6.0),
        (Body::Mercury, 6.0),
        (Body::Venus, 8.0),
        (Body::Jupiter, 5.0),
        (Body::Mars, 5.0),
    ],
    // Pisces
    [
        (Body::Venus, 8.0),
        (Body::Jupiter, 6.0),
        (Body::Mercury, 6.0),
        (Body::Mars, 5.0),
        (Body::Saturn, 5.0),
    ],
];

/// Chaldean decan rulers: the planets in descending sphere order, cycled
/// over the 36 decans starting from Mars at the head of Aries.
const CHALDEAN_CYCLE: [Body; 7] = [
    Body::Mars,
    Body::Sun,
    Body::Venus,
    Body::Mercury,
    Body::Moon,
    Body::Saturn,
    Body::Jupiter,
];

/// Modern sign rulership, indexed by sign.
const MODERN_RULERS: [Body; 12] = [
    Body::Mars,    // Aries
    Body::Venus,   // Taurus
    Body::Mercury, // Gemini
    Body::Moon,    // Cancer
    Body::Sun,     // Leo
    Body::Mercury, // Virgo
    Body::Venus,   // Libra
    Body::Pluto,   // Scorpio
    Body::Jupiter, // Sagittarius
    Body::Saturn,  // Capricorn
    Body::Uranus,  // Aquarius
    Body::Neptune, // Pisces
];

/// A sign-subdivision scheme with per-slice assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecanMode {
    /// Egyptian terms: 5 irregular slices per sign, each ruled by a planet.
    EgyptianTerms,
    /// Ptolemaic terms: 5 irregular slices per sign, each ruled by a planet.
    PtolemaicTerms,
    /// Decans assigned the modern ruler of their triplicity sign.
    DecanRulers,
    /// Decans assigned their triplicity sign itself.
    DecanSigns,
    /// Decans ruled by the descending-sphere planet cycle.
    ChaldeanDecans,
    /// Ninths of a sign, each a derived sign continuing around the zodiac.
    Navamsas,
    /// Twelfths of a sign, counted from Aries in every sign.
    Twelfths,
    /// Twelfths of a sign, counted from the sign itself.
    Dwads,
}

/// What a subdivision slice is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecanDest {
    /// The slice's ruling planet.
    Ruler(Body),
    /// The slice's derived sign.
    Sign(Sign),
}

/// Triplicity walk: decan `index` belongs to its own sign, then the signs
/// 4 and 8 further along (the other two signs of the same element).
const fn decan_sign_walk(index: usize) -> usize {
    (index / 3 + (index % 3) * 4) % 12
}

/// Index of the term containing `offset_deg` degrees into a sign.
fn term_index_in_sign(row: &[(Body, f64); 5], offset_deg: f64) -> usize {
    let mut acc = 0.0;
    for (i, &(_, width)) in row.iter().enumerate().take(4) {
        acc += width;
        if offset_deg < acc {
            return i;
        }
    }
    4
}

impl DecanMode {
    /// Number of slices per sign.
    pub const fn bands_per_sign(self) -> usize {
        match self {
            Self::EgyptianTerms | Self::PtolemaicTerms => 5,
            Self::DecanRulers | Self::DecanSigns | Self::ChaldeanDecans => 3,
            Self::Navamsas => 9,
            Self::Twelfths | Self::Dwads => 12,
        }
    }

    /// Total number of slices on the circle.
    pub const fn band_count(self) -> usize {
        12 * self.bands_per_sign()
    }

    const fn term_table(self) -> Option<&'static [[(Body, f64); 5]; 12]> {
        match self {
            Self::EgyptianTerms => Some(&EGYPTIAN_TERMS),
            Self::PtolemaicTerms => Some(&PTOLEMAIC_TERMS),
            _ => None,
        }
    }

    /// Index of the slice holding an ecliptic longitude, in
    /// `0..band_count()`. Slices count from the head of Aries.
    pub fn band_of(self, lon_deg: f64) -> usize {
        let sign = sign_of(lon_deg).index();
        let offset = degrees_in_sign(lon_deg);
        match self.term_table() {
            Some(table) => sign * 5 + term_index_in_sign(&table[sign], offset),
            None => {
                let per = self.bands_per_sign();
                let width = SIGN_WIDTH_DEG / per as f64;
                let t = ((offset / width).floor() as usize).min(per - 1);
                sign * per + t
            }
        }
    }

    /// Longitude of a slice's leading edge in degrees.
    ///
    /// For the irregular term schemes the edge is accumulated from the
    /// width tables; for the uniform schemes it is a multiple of the slice
    /// width.
    pub fn band_lower_deg(self, index: usize) -> f64 {
        let per = self.bands_per_sign();
        let sign = index / per;
        let slice = index % per;
        match self.term_table() {
            Some(table) => {
                let mut deg = sign as f64 * SIGN_WIDTH_DEG;
                for &(_, width) in table[sign].iter().take(slice) {
                    deg += width;
                }
                deg
            }
            None => index as f64 * (SIGN_WIDTH_DEG / per as f64),
        }
    }

    /// Width of a slice in degrees.
    pub fn band_width_deg(self, index: usize) -> f64 {
        let per = self.bands_per_sign();
        match self.term_table() {
            Some(table) => table[index / per][index % per].1,
            None => SIGN_WIDTH_DEG / per as f64,
        }
    }

    /// The planet or derived sign assigned to a slice.
    pub fn dest(self, index: usize) -> DecanDest {
        let per = self.bands_per_sign();
        match self {
            Self::EgyptianTerms => DecanDest::Ruler(EGYPTIAN_TERMS[index / per][index % per].0),
            Self::PtolemaicTerms => DecanDest::Ruler(PTOLEMAIC_TERMS[index / per][index % per].0),
            Self::DecanRulers => DecanDest::Ruler(MODERN_RULERS[decan_sign_walk(index)]),
            Self::DecanSigns => DecanDest::Sign(ALL_SIGNS[decan_sign_walk(index)]),
            Self::ChaldeanDecans => DecanDest::Ruler(CHALDEAN_CYCLE[index % 7]),
            Self::Navamsas | Self::Twelfths => DecanDest::Sign(Sign::from_index_wrapped(index)),
            Self::Dwads => DecanDest::Sign(Sign::from_index_wrapped(index / 12 + index % 12)),
        }
    }
}
