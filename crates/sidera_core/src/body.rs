//! Tracked bodies and body-inclusion sets.

/// Bodies tracked by the event scanners.
///
/// These are the classical chart points that carry a full position/velocity
/// state in a [`Chart`](crate::Chart). Derived points (nodes, house cusps,
/// fixed stars) are chart-list concerns and are NOT included here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// All tracked bodies in scan iteration order.
pub const ALL_BODIES: [Body; 10] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
];

impl Body {
    /// Number of tracked bodies.
    pub const COUNT: usize = 10;

    /// Zero-based chart index; pairwise detectors iterate `index` order.
    pub const fn index(self) -> usize {
        match self {
            Self::Sun => 0,
            Self::Moon => 1,
            Self::Mercury => 2,
            Self::Venus => 3,
            Self::Mars => 4,
            Self::Jupiter => 5,
            Self::Saturn => 6,
            Self::Uranus => 7,
            Self::Neptune => 8,
            Self::Pluto => 9,
        }
    }

    /// Convert a chart index back into a [`Body`].
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Sun),
            1 => Some(Self::Moon),
            2 => Some(Self::Mercury),
            3 => Some(Self::Venus),
            4 => Some(Self::Mars),
            5 => Some(Self::Jupiter),
            6 => Some(Self::Saturn),
            7 => Some(Self::Uranus),
            8 => Some(Self::Neptune),
            9 => Some(Self::Pluto),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
        }
    }
}

/// Set of tracked bodies, used for the moving and natal inclusion filters.
///
/// A scan consults its sets directly; there is no process-wide restriction
/// state to save and restore around chart casts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodySet(u16);

impl BodySet {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self((1 << Body::COUNT as u16) - 1);

    /// Build a set from a slice of bodies.
    pub const fn of(bodies: &[Body]) -> Self {
        let mut bits = 0u16;
        let mut i = 0;
        while i < bodies.len() {
            bits |= 1 << bodies[i].index();
            i += 1;
        }
        Self(bits)
    }

    pub const fn contains(self, body: Body) -> bool {
        self.0 & (1 << body.index()) != 0
    }

    #[must_use]
    pub const fn with(self, body: Body) -> Self {
        Self(self.0 | (1 << body.index()))
    }

    #[must_use]
    pub const fn without(self, body: Body) -> Self {
        Self(self.0 & !(1 << body.index()))
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate the contained bodies in chart-index order.
    pub fn iter(self) -> impl Iterator<Item = Body> {
        ALL_BODIES.into_iter().filter(move |b| self.contains(*b))
    }
}

impl Default for BodySet {
    fn default() -> Self {
        Self::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip() {
        for body in ALL_BODIES {
            assert_eq!(Body::from_index(body.index()), Some(body));
        }
        assert_eq!(Body::from_index(10), None);
    }

    #[test]
    fn indices_are_dense_and_ordered() {
        for (i, body) in ALL_BODIES.iter().enumerate() {
            assert_eq!(body.index(), i);
        }
    }

    #[test]
    fn set_membership() {
        let set = BodySet::of(&[Body::Moon, Body::Saturn]);
        assert!(set.contains(Body::Moon));
        assert!(set.contains(Body::Saturn));
        assert!(!set.contains(Body::Sun));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn set_with_without() {
        let set = BodySet::EMPTY.with(Body::Mars);
        assert!(set.contains(Body::Mars));
        assert!(set.without(Body::Mars).is_empty());
    }

    #[test]
    fn all_contains_every_body() {
        for body in ALL_BODIES {
            assert!(BodySet::ALL.contains(body));
        }
        assert_eq!(BodySet::ALL.len(), Body::COUNT);
    }

    #[test]
    fn iter_follows_index_order() {
        let set = BodySet::of(&[Body::Pluto, Body::Sun, Body::Venus]);
        let bodies: Vec<Body> = set.iter().collect();
        assert_eq!(bodies, vec![Body::Sun, Body::Venus, Body::Pluto]);
    }
}
