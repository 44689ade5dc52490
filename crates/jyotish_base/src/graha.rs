//! Vedic planet (graha) enum and its chart-data keys.
//!
//! Chart datasets key their planet records by two-letter codes (`SU`, `MO`,
//! ... `RA`, `KE`). The enum order is the traditional weekday-lord order
//! followed by the two nodes, and doubles as the fixed priority used when two
//! grahas have to be ordered without any other distinguishing value.

/// The 9 Vedic grahas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Graha {
    Surya,
    Chandra,
    Mangal,
    Buddh,
    Guru,
    Shukra,
    Shani,
    Rahu,
    Ketu,
}

/// All 9 grahas in traditional order.
pub const ALL_GRAHAS: [Graha; 9] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
    Graha::Rahu,
    Graha::Ketu,
];

/// Key of the ascendant (lagna) among a dataset's extra points.
pub const LAGNA_KEY: &str = "LG";

impl Graha {
    /// 0-based index into ALL_GRAHAS.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Two-letter key used in chart datasets.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Surya => "SU",
            Self::Chandra => "MO",
            Self::Mangal => "MA",
            Self::Buddh => "ME",
            Self::Guru => "JU",
            Self::Shukra => "VE",
            Self::Shani => "SA",
            Self::Rahu => "RA",
            Self::Ketu => "KE",
        }
    }

    /// Reverse lookup from a dataset key. Case-sensitive.
    pub fn from_key(key: &str) -> Option<Graha> {
        ALL_GRAHAS.into_iter().find(|g| g.key() == key)
    }
}
