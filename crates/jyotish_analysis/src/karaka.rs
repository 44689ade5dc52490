//! Chara karaka names, ranking systems and karaka tables.
//!
//! The chara ("movable") karakas are the significator roles handed out to
//! grahas by their degree within the sign. Which grahas take part, and how
//! many roles exist, depends on the ranking system:
//!
//! - Parashara (BPHS 32.13-17): eight karakas; Rahu takes part with its
//!   degree counted backwards from the end of the sign.
//! - Jaimini (Upadesha Sutras 1.1.11-18): seven karakas; both nodes are left
//!   out and Pitri is folded into Matri.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The eight chara karakas, best rank first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Karaka {
    Atma,
    Amatya,
    Bhratri,
    Matri,
    Pitri,
    Putra,
    Jnati,
    Dara,
}

/// All eight karakas in rank order.
pub const ALL_KARAKAS: [Karaka; 8] = [
    Karaka::Atma,
    Karaka::Amatya,
    Karaka::Bhratri,
    Karaka::Matri,
    Karaka::Pitri,
    Karaka::Putra,
    Karaka::Jnati,
    Karaka::Dara,
];

/// Seven-karaka scheme (Pitri omitted).
pub const SAPTA_KARAKAS: [Karaka; 7] = [
    Karaka::Atma,
    Karaka::Amatya,
    Karaka::Bhratri,
    Karaka::Matri,
    Karaka::Putra,
    Karaka::Jnati,
    Karaka::Dara,
];

impl Karaka {
    /// Sanskrit name with the -karaka suffix.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Atma => "Atmakaraka",
            Self::Amatya => "Amatyakaraka",
            Self::Bhratri => "Bhratrikaraka",
            Self::Matri => "Matrikaraka",
            Self::Pitri => "Pitrikaraka",
            Self::Putra => "Putrakaraka",
            Self::Jnati => "Jnatikaraka",
            Self::Dara => "Darakaraka",
        }
    }

    /// What the karaka signifies.
    pub const fn signification(self) -> &'static str {
        match self {
            Self::Atma => "self",
            Self::Amatya => "minister",
            Self::Bhratri => "siblings",
            Self::Matri => "mother",
            Self::Pitri => "father",
            Self::Putra => "children",
            Self::Jnati => "kinsmen",
            Self::Dara => "spouse",
        }
    }

    /// Short key used in serialized output (`"atma"`, ...).
    pub const fn key(self) -> &'static str {
        match self {
            Self::Atma => "atma",
            Self::Amatya => "amatya",
            Self::Bhratri => "bhratri",
            Self::Matri => "matri",
            Self::Pitri => "pitri",
            Self::Putra => "putra",
            Self::Jnati => "jnati",
            Self::Dara => "dara",
        }
    }
}

impl Display for Karaka {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Ranking system
// ---------------------------------------------------------------------------

/// Rule set used to rank grahas into chara karakas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingSystem {
    #[default]
    Parashara,
    Jaimini,
}

impl RankingSystem {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Parashara => "parashara",
            Self::Jaimini => "jaimini",
        }
    }
}

impl Display for RankingSystem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RankingSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parashara" => Ok(Self::Parashara),
            "jaimini" => Ok(Self::Jaimini),
            other => Err(format!("unknown ranking system: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Karaka tables
// ---------------------------------------------------------------------------

/// Source of the ordered karaka list for a ranking system.
///
/// Implementations must be deterministic: the same system always yields the
/// same list, best rank first.
pub trait KarakaTable: Send + Sync {
    fn karaka_list(&self, system: RankingSystem) -> &[Karaka];
}

/// Classical tables: eight karakas for Parashara, seven for Jaimini.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicalKarakas;

impl KarakaTable for ClassicalKarakas {
    fn karaka_list(&self, system: RankingSystem) -> &[Karaka] {
        match system {
            RankingSystem::Parashara => &ALL_KARAKAS,
            RankingSystem::Jaimini => &SAPTA_KARAKAS,
        }
    }
}
