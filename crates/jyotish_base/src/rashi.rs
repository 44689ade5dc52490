//! Rashi (zodiac sign) numbering and placement.
//!
//! The ecliptic circle is divided into 12 equal signs of 30 degrees each,
//! starting from Mesha (Aries) at 0 deg. Chart datasets number the rashis
//! 1..=12 (Mesha = 1); [`Rashi::index`] gives the 0-based position used in
//! arithmetic.

/// The 12 rashis starting from Mesha (Aries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

/// All 12 rashis in order (index 0 = Mesha, 11 = Meena).
pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

impl Rashi {
    /// Sanskrit name of the rashi.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    /// Western (English) name of the rashi.
    pub const fn western_name(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrischika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    /// 0-based index (Mesha=0 .. Meena=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// 1-based number as stored in chart datasets (Mesha=1 .. Meena=12).
    pub const fn number(self) -> u8 {
        self.index() + 1
    }

    /// Lookup by 1-based number. Returns None outside 1..=12.
    pub fn from_number(number: u8) -> Option<Rashi> {
        if (1..=12).contains(&number) {
            Some(ALL_RASHIS[(number - 1) as usize])
        } else {
            None
        }
    }
}

/// Wrap an angle into [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if r >= 360.0 { 0.0 } else { r }
}

/// Placement of a longitude within the zodiac.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RashiPosition {
    pub rashi: Rashi,
    /// Decimal degrees within the rashi [0.0, 30.0).
    pub degrees_in_rashi: f64,
}

/// Rashi and in-sign degree of a sidereal longitude (any range, wrapped first).
pub fn rashi_from_longitude(sidereal_lon: f64) -> RashiPosition {
    let lon = normalize_360(sidereal_lon);
    let idx = ((lon / 30.0) as usize).min(ALL_RASHIS.len() - 1);
    RashiPosition {
        rashi: ALL_RASHIS[idx],
        degrees_in_rashi: lon - 30.0 * idx as f64,
    }
}
