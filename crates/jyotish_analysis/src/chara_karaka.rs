//! Chara karaka ranking.
//!
//! Grahas are ranked by degree within their sign, highest first, and the
//! karaka list of the ranking system is handed out in that order:
//!
//! 1. Ketu never takes part.
//! 2. Jaimini drops Rahu as well. Parashara keeps Rahu but counts its degree
//!    backwards (`30 - degree`) since the node moves retrograde.
//! 3. Sort by effective degree, descending. Exactly equal degrees fall back
//!    to the traditional graha order SU, MO, MA, ME, JU, VE, SA, RA, KE, then
//!    to key text for keys outside that set.
//! 4. The karaka list must be exactly as long as the surviving graha set.
//!
//! Pure functions over the graha map; the engine in `analysis` wraps them.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use jyotish_base::{Graha, GrahaData};

use crate::error::AnalysisError;
use crate::karaka::{Karaka, RankingSystem};

/// A graha with the degree it is ranked on.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedGraha {
    pub key: String,
    /// Degree after system-specific adjustment.
    pub effective_degree: f64,
}

/// Sort key for exactly equal degrees.
fn tie_priority(key: &str) -> (u8, &str) {
    match Graha::from_key(key) {
        Some(g) => (g.index(), ""),
        None => (u8::MAX, key),
    }
}

fn by_degree_desc(a: &RankedGraha, b: &RankedGraha) -> Ordering {
    b.effective_degree
        .total_cmp(&a.effective_degree)
        .then_with(|| tie_priority(&a.key).cmp(&tie_priority(&b.key)))
}

/// Rank the grahas taking part under `system`, best first.
pub fn rank_grahas(
    grahas: &BTreeMap<String, GrahaData>,
    system: RankingSystem,
) -> Vec<RankedGraha> {
    let rahu = Graha::Rahu.key();
    let ketu = Graha::Ketu.key();

    let mut ranked: Vec<RankedGraha> = grahas
        .iter()
        .filter(|(key, _)| key.as_str() != ketu)
        .filter(|(key, _)| !(system == RankingSystem::Jaimini && key.as_str() == rahu))
        .map(|(key, data)| {
            let effective_degree = if key.as_str() == rahu {
                30.0 - data.degree
            } else {
                data.degree
            };
            RankedGraha {
                key: key.clone(),
                effective_degree,
            }
        })
        .collect();

    ranked.sort_by(by_degree_desc);
    ranked
}

/// Pair ranked grahas with karakas positionally.
///
/// Fails when the two sequences differ in length.
pub fn assign_karakas(
    ranked: &[RankedGraha],
    karakas: &[Karaka],
    system: RankingSystem,
) -> Result<Vec<(String, Karaka)>, AnalysisError> {
    if ranked.len() != karakas.len() {
        return Err(AnalysisError::Configuration(format!(
            "{system} karaka list has {} entries but {} grahas are ranked",
            karakas.len(),
            ranked.len()
        )));
    }
    Ok(ranked
        .iter()
        .zip(karakas)
        .map(|(g, &k)| (g.key.clone(), k))
        .collect())
}

/// Invert a graha → karaka assignment.
///
/// Fails if any karaka is assigned twice.
pub fn invert_assignment(
    assignment: &[(String, Karaka)],
) -> Result<BTreeMap<Karaka, String>, AnalysisError> {
    let mut reversed = BTreeMap::new();
    for (key, karaka) in assignment {
        if let Some(previous) = reversed.insert(*karaka, key.clone()) {
            return Err(AnalysisError::Configuration(format!(
                "karaka {karaka} assigned to both {previous} and {key}"
            )));
        }
    }
    Ok(reversed)
}
