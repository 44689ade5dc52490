//! Amsha (divisional chart / varga) arithmetic.
//!
//! Each amsha divides the 30-degree rashi span into N equal parts and maps
//! each part to a target rashi. The position inside the part is stretched
//! back to a full 30 degrees, so every divisional chart is again a set of
//! longitudes in [0, 360).
//!
//! Covers the 16 Shodashavarga charts of BPHS.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::rashi::{RashiPosition, normalize_360, rashi_from_longitude};

// ---------------------------------------------------------------------------
// Amsha enum
// ---------------------------------------------------------------------------

/// The 16 Shodashavarga divisional charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Amsha {
    D1,
    D2,
    D3,
    D4,
    D7,
    D9,
    D10,
    D12,
    D16,
    D20,
    D24,
    D27,
    D30,
    D40,
    D45,
    D60,
}

/// All supported amshas in order.
pub const ALL_AMSHAS: [Amsha; 16] = [
    Amsha::D1,
    Amsha::D2,
    Amsha::D3,
    Amsha::D4,
    Amsha::D7,
    Amsha::D9,
    Amsha::D10,
    Amsha::D12,
    Amsha::D16,
    Amsha::D20,
    Amsha::D24,
    Amsha::D27,
    Amsha::D30,
    Amsha::D40,
    Amsha::D45,
    Amsha::D60,
];

impl Amsha {
    /// Number of divisions per rashi.
    pub const fn divisions(self) -> u16 {
        match self {
            Self::D1 => 1,
            Self::D2 => 2,
            Self::D3 => 3,
            Self::D4 => 4,
            Self::D7 => 7,
            Self::D9 => 9,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D16 => 16,
            Self::D20 => 20,
            Self::D24 => 24,
            Self::D27 => 27,
            Self::D30 => 30,
            Self::D40 => 40,
            Self::D45 => 45,
            Self::D60 => 60,
        }
    }

    /// Sanskrit name.
    pub const fn sanskrit_name(self) -> &'static str {
        match self {
            Self::D1 => "Rashi",
            Self::D2 => "Hora",
            Self::D3 => "Drekkana",
            Self::D4 => "Chaturthamsha",
            Self::D7 => "Saptamsha",
            Self::D9 => "Navamsha",
            Self::D10 => "Dashamsha",
            Self::D12 => "Dwadashamsha",
            Self::D16 => "Shodashamsha",
            Self::D20 => "Vimshamsha",
            Self::D24 => "Chaturvimshamsha",
            Self::D27 => "Bhamsha",
            Self::D30 => "Trimshamsha",
            Self::D40 => "Khavedamsha",
            Self::D45 => "Akshavedamsha",
            Self::D60 => "Shashtiamsha",
        }
    }

    /// Reverse lookup from D-number code.
    pub fn from_code(code: u16) -> Option<Amsha> {
        ALL_AMSHAS.into_iter().find(|a| a.divisions() == code)
    }

    /// Canonical identifier, e.g. `"D9"`.
    pub fn identifier(self) -> String {
        format!("D{}", self.divisions())
    }
}

impl Display for Amsha {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "D{}", self.divisions())
    }
}

impl FromStr for Amsha {
    type Err = String;

    /// Parses `"D9"` / `"d9"`. Surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .strip_prefix(['D', 'd'])
            .and_then(|code| code.parse::<u16>().ok())
            .and_then(Amsha::from_code)
            .ok_or_else(|| trimmed.to_string())
    }
}

// ---------------------------------------------------------------------------
// Variation
// ---------------------------------------------------------------------------

/// Alternate rule sets for individual amshas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AmshaVariation {
    /// Parashari rules for every amsha.
    #[default]
    TraditionalParashari,
    /// Hora with only Karka and Simha as targets; ignored outside D2.
    HoraCancerLeoOnly,
}

impl AmshaVariation {
    /// Whether this variation changes `amsha` at all.
    pub fn is_applicable_to(self, amsha: Amsha) -> bool {
        match self {
            Self::TraditionalParashari => true,
            Self::HoraCancerLeoOnly => amsha == Amsha::D2,
        }
    }
}

// ---------------------------------------------------------------------------
// Division rules
// ---------------------------------------------------------------------------

/// Rashi (0-based) from which the parts of a sign are counted.
///
/// Mesha has index 0 and is an odd sign, so even indices are odd signs.
#[derive(Debug, Clone, Copy)]
enum PartStart {
    /// The natal sign itself.
    Natal,
    /// Continue around the zodiac: sign `n` starts at `n * divisions`.
    Cyclic,
    /// Natal sign for odd signs, `offset` signs further for even signs.
    EvenOffset(u8),
    /// Fixed starts for odd and even signs.
    OddEven(u8, u8),
    /// Fixed starts per element: fire, earth, air, water.
    Element([u8; 4]),
    /// Fixed starts per modality: movable, fixed, dual.
    Modality([u8; 3]),
}

impl PartStart {
    fn rashi(self, natal: u8, divisions: u16) -> u8 {
        let odd_sign = natal % 2 == 0;
        match self {
            Self::Natal => natal,
            Self::Cyclic => ((u16::from(natal) * divisions) % 12) as u8,
            Self::EvenOffset(_) if odd_sign => natal,
            Self::EvenOffset(offset) => (natal + offset) % 12,
            Self::OddEven(odd, _) if odd_sign => odd,
            Self::OddEven(_, even) => even,
            Self::Element(starts) => starts[usize::from(natal % 4)],
            Self::Modality(starts) => starts[usize::from(natal % 3)],
        }
    }
}

/// Start rule and the number of signs advanced per part.
fn division_rule(amsha: Amsha) -> (PartStart, u16) {
    use PartStart::*;
    match amsha {
        Amsha::D1 | Amsha::D12 | Amsha::D60 => (Natal, 1),
        Amsha::D2 => (Cyclic, 1),
        Amsha::D3 => (Natal, 4),
        Amsha::D4 => (Natal, 3),
        Amsha::D7 => (EvenOffset(6), 1),
        Amsha::D10 => (EvenOffset(8), 1),
        Amsha::D9 => (Element([0, 9, 6, 3]), 1),
        Amsha::D27 => (Element([0, 3, 6, 9]), 1),
        Amsha::D16 | Amsha::D45 => (Modality([0, 4, 8]), 1),
        Amsha::D20 => (Modality([0, 8, 4]), 1),
        Amsha::D24 => (OddEven(4, 3), 1),
        Amsha::D30 => (OddEven(0, 11), 1),
        Amsha::D40 => (OddEven(0, 6), 1),
    }
}

/// 0-based target rashi of part `part` of natal sign `natal`.
fn target_rashi(amsha: Amsha, variation: AmshaVariation, natal: u8, part: u16) -> u8 {
    if amsha == Amsha::D2 && variation == AmshaVariation::HoraCancerLeoOnly {
        // first hora of odd signs and second hora of even signs → Karka
        let odd_sign = natal % 2 == 0;
        return if odd_sign == (part == 0) { 3 } else { 4 };
    }
    let (start, step) = division_rule(amsha);
    let first = u16::from(start.rashi(natal, amsha.divisions()));
    ((first + part * step) % 12) as u8
}

// ---------------------------------------------------------------------------
// Core transformation
// ---------------------------------------------------------------------------

/// Map a sidereal longitude into the amsha chart.
///
/// The longitude is wrapped first; the result lies in [0, 360). A variation
/// that does not apply to `amsha` falls back to the traditional rule.
pub fn amsha_longitude(sidereal_lon: f64, amsha: Amsha, variation: AmshaVariation) -> f64 {
    let natal = rashi_from_longitude(sidereal_lon);
    let parts = amsha.divisions();
    let span = 30.0 / f64::from(parts);
    let part = ((natal.degrees_in_rashi / span) as u16).min(parts - 1);

    let variation = if variation.is_applicable_to(amsha) {
        variation
    } else {
        AmshaVariation::TraditionalParashari
    };
    let target = target_rashi(amsha, variation, natal.rashi.index(), part);
    let within = (natal.degrees_in_rashi - f64::from(part) * span) * f64::from(parts);

    normalize_360(f64::from(target) * 30.0 + within)
}

/// Amsha rashi and in-sign degree of a sidereal longitude.
pub fn amsha_position(sidereal_lon: f64, amsha: Amsha, variation: AmshaVariation) -> RashiPosition {
    rashi_from_longitude(amsha_longitude(sidereal_lon, amsha, variation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rashi::Rashi;

    const TRAD: AmshaVariation = AmshaVariation::TraditionalParashari;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    fn rashi_of(lon: f64, amsha: Amsha) -> Rashi {
        amsha_position(lon, amsha, TRAD).rashi
    }

    #[test]
    fn codes_cover_shodashavarga() {
        let codes: Vec<u16> = ALL_AMSHAS.iter().map(|a| a.divisions()).collect();
        assert_eq!(codes, [1, 2, 3, 4, 7, 9, 10, 12, 16, 20, 24, 27, 30, 40, 45, 60]);
        assert_eq!(Amsha::from_code(5), None);
    }

    #[test]
    fn parse_identifiers() {
        assert_eq!("D9".parse::<Amsha>(), Ok(Amsha::D9));
        assert_eq!("d60".parse::<Amsha>(), Ok(Amsha::D60));
        assert_eq!(" d1 ".parse::<Amsha>(), Ok(Amsha::D1));
        assert_eq!("D5".parse::<Amsha>(), Err("D5".to_string()));
        assert!("9".parse::<Amsha>().is_err());
        assert!("DX".parse::<Amsha>().is_err());
    }

    #[test]
    fn identifier_round_trip() {
        for a in ALL_AMSHAS {
            assert_eq!(a.identifier().parse::<Amsha>(), Ok(a));
            assert_eq!(a.to_string(), a.identifier());
        }
    }

    #[test]
    fn rashi_chart_is_unchanged() {
        for lon in [0.0, 17.25, 133.0, 359.5] {
            assert!(close(amsha_longitude(lon, Amsha::D1, TRAD), lon));
        }
    }

    #[test]
    fn navamsha_starts_by_element() {
        // one sign of each element at 0 deg
        assert_eq!(rashi_of(0.0, Amsha::D9), Rashi::Mesha);
        assert_eq!(rashi_of(30.0, Amsha::D9), Rashi::Makara);
        assert_eq!(rashi_of(60.0, Amsha::D9), Rashi::Tula);
        assert_eq!(rashi_of(90.0, Amsha::D9), Rashi::Karka);
    }

    #[test]
    fn navamsha_scales_degree() {
        // Mesha 5 deg: second part → Vrishabha 15 deg
        assert!(close(amsha_longitude(5.0, Amsha::D9, TRAD), 45.0));
        // Vrishabha 15.5 deg: fifth part from Makara → Vrishabha 19.5 deg
        assert!(close(amsha_longitude(45.5, Amsha::D9, TRAD), 49.5));
        // Mesha 13.5 deg: fifth part from Mesha
        assert_eq!(rashi_of(13.5, Amsha::D9), Rashi::Simha);
    }

    #[test]
    fn modality_starts() {
        // D16: fixed from Simha, dual from Dhanu
        assert_eq!(rashi_of(30.0, Amsha::D16), Rashi::Simha);
        assert_eq!(rashi_of(60.0, Amsha::D16), Rashi::Dhanu);
        // D20 swaps the fixed and dual starts
        assert_eq!(rashi_of(30.0, Amsha::D20), Rashi::Dhanu);
        assert_eq!(rashi_of(60.0, Amsha::D20), Rashi::Simha);
    }

    #[test]
    fn odd_even_starts() {
        // D7 even sign starts from the 7th: Vrishabha → Vrischika
        assert_eq!(rashi_of(30.0, Amsha::D7), Rashi::Vrischika);
        // D10 even sign starts from the 9th: Vrishabha → Makara
        assert_eq!(rashi_of(30.0, Amsha::D10), Rashi::Makara);
        // D24 odd from Simha, even from Karka
        assert_eq!(rashi_of(0.0, Amsha::D24), Rashi::Simha);
        assert_eq!(rashi_of(30.0, Amsha::D24), Rashi::Karka);
        // D40 odd from Mesha, even from Tula
        assert_eq!(rashi_of(60.0, Amsha::D40), Rashi::Mesha);
        assert_eq!(rashi_of(90.0, Amsha::D40), Rashi::Tula);
    }

    #[test]
    fn hora_cycles_through_zodiac() {
        // Vrishabha 15.5 deg: second hora from Mithuna → Karka 1 deg
        assert!(close(amsha_longitude(45.5, Amsha::D2, TRAD), 91.0));
    }

    #[test]
    fn hora_cancer_leo_only() {
        let v = AmshaVariation::HoraCancerLeoOnly;
        // odd sign, first half → Karka; even sign, first half → Simha
        assert!(close(amsha_longitude(10.0, Amsha::D2, v), 110.0));
        assert!(close(amsha_longitude(40.0, Amsha::D2, v), 140.0));
        assert_eq!(amsha_position(20.0, Amsha::D2, v).rashi, Rashi::Simha);
        assert_eq!(amsha_position(50.0, Amsha::D2, v).rashi, Rashi::Karka);
    }

    #[test]
    fn variation_only_affects_hora() {
        let v = AmshaVariation::HoraCancerLeoOnly;
        assert!(!v.is_applicable_to(Amsha::D9));
        for amsha in ALL_AMSHAS.into_iter().filter(|a| *a != Amsha::D2) {
            assert!(close(amsha_longitude(45.5, amsha, v), amsha_longitude(45.5, amsha, TRAD)));
        }
    }

    #[test]
    fn drekkana_and_chaturthamsha_steps() {
        // Vrishabha 15.5 deg: second drekkana, four signs on → Kanya 16.5 deg
        assert!(close(amsha_longitude(45.5, Amsha::D3, TRAD), 166.5));
        // Mesha 22.5 deg: fourth part, nine signs on → Makara
        assert_eq!(rashi_of(22.5, Amsha::D4), Rashi::Makara);
    }

    #[test]
    fn trimshamsha_odd_even() {
        assert!(close(amsha_longitude(1.5, Amsha::D30, TRAD), 45.0));
        assert!(close(amsha_longitude(31.5, Amsha::D30, TRAD), 15.0));
    }

    #[test]
    fn dwadashamsha_counts_from_sign() {
        // Simha 27.5 deg: last part → Karka
        assert_eq!(rashi_of(147.5, Amsha::D12), Rashi::Karka);
    }

    #[test]
    fn results_stay_in_range() {
        for lon in [-10.0, 0.0, 15.0, 29.999_999, 30.0, 45.5, 180.0, 359.999_999, 725.0] {
            for amsha in ALL_AMSHAS {
                let out = amsha_longitude(lon, amsha, TRAD);
                assert!((0.0..360.0).contains(&out), "{amsha} at {lon}: {out}");
            }
        }
    }
}
