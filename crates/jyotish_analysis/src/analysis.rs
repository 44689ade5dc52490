//! The analysis engine.
//!
//! An [`Analysis`] wraps one natal dataset for its whole lifetime. Ranking
//! queries are pure functions of that dataset; varga queries go through the
//! injected [`VargaProvider`] and are memoized per engine.
//!
//! ```rust,ignore
//! use jyotish_analysis::*;
//!
//! let analysis = Analysis::new(serde_json::from_str::<serde_json::Value>(json)?)?;
//! let karakas = analysis.chara_karaka(RankingSystem::Parashara)?;
//! let karakamsha = analysis.karakamsha()?;
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use jyotish_base::{ChartData, GanitaData, LAGNA_KEY, VargaData};
use log::trace;
use serde_json::Value;

use crate::chara_karaka::{assign_karakas, invert_assignment, rank_grahas};
use crate::error::AnalysisError;
use crate::karaka::{ClassicalKarakas, Karaka, KarakaTable, RankingSystem};
use crate::varga::{AmshaVargaProvider, VargaCache, VargaProvider};

/// Varga used when none is named.
pub const DEFAULT_VARGA: &str = "d9";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Ranking system used by [`Analysis::karakamsha`].
    pub default_system: RankingSystem,
    /// Varga used by [`Analysis::karakamsha`] and [`Analysis::lagnamsha`].
    pub navamsha_varga: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_system: RankingSystem::Parashara,
            navamsha_varga: "D9".to_string(),
        }
    }
}

impl AnalysisConfig {
    fn validate(&self) -> Result<(), AnalysisError> {
        if self.navamsha_varga.trim().is_empty() {
            return Err(AnalysisError::Configuration(
                "navamsha_varga must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Accepted construction inputs.
///
/// Everything is resolved to a [`GanitaData`] in [`Analysis::with_providers`];
/// the engine never looks at the input shape again.
pub enum ChartInput<'a> {
    /// Raw mapping. Must be a JSON object.
    Value(Value),
    /// Already-typed dataset.
    Data(GanitaData),
    /// Container exposing the dataset through [`ChartData`].
    Chart(&'a dyn ChartData),
}

impl ChartInput<'_> {
    fn resolve(self) -> Result<GanitaData, AnalysisError> {
        match self {
            Self::Value(value) => Ok(GanitaData::from_value(value)?),
            Self::Data(data) => Ok(data),
            Self::Chart(chart) => Ok(chart.ganita_data()),
        }
    }
}

impl From<Value> for ChartInput<'_> {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<GanitaData> for ChartInput<'_> {
    fn from(data: GanitaData) -> Self {
        Self::Data(data)
    }
}

impl<'a, T: ChartData> From<&'a T> for ChartInput<'a> {
    fn from(chart: &'a T) -> Self {
        Self::Chart(chart)
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Chart analysis over one natal dataset.
///
/// `Analysis` is [`Send`] + [`Sync`] when its collaborators are, so it can be
/// shared through `Arc<Analysis>`; the varga cache is internally locked.
pub struct Analysis<V = AmshaVargaProvider, K = ClassicalKarakas> {
    ganita: GanitaData,
    config: AnalysisConfig,
    varga_provider: V,
    karaka_table: K,
    varga_cache: VargaCache,
}

impl<V, K> std::fmt::Debug for Analysis<V, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analysis")
            .field("graha_count", &self.ganita.graha.len())
            .field("config", &self.config)
            .field("cached_vargas", &self.varga_cache.keys())
            .finish()
    }
}

impl Analysis {
    /// Create an engine with the default collaborators.
    pub fn new<'a>(input: impl Into<ChartInput<'a>>) -> Result<Self, AnalysisError> {
        Self::with_providers(input, AmshaVargaProvider::default(), ClassicalKarakas)
    }
}

impl<V: VargaProvider, K: KarakaTable> Analysis<V, K> {
    /// Create an engine with injected collaborators.
    pub fn with_providers<'a>(
        input: impl Into<ChartInput<'a>>,
        varga_provider: V,
        karaka_table: K,
    ) -> Result<Self, AnalysisError> {
        Ok(Self {
            ganita: input.into().resolve()?,
            config: AnalysisConfig::default(),
            varga_provider,
            karaka_table,
            varga_cache: VargaCache::new(),
        })
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// The active configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The natal dataset this engine was built from.
    pub fn ganita_data(&self) -> &GanitaData {
        &self.ganita
    }

    // -- Chara karaka ------------------------------------------------------

    /// Chara karaka assignment in rank order (Atma first).
    pub fn chara_karaka_ranking(
        &self,
        system: RankingSystem,
    ) -> Result<Vec<(String, Karaka)>, AnalysisError> {
        let ranked = rank_grahas(&self.ganita.graha, system);
        let assignment =
            assign_karakas(&ranked, self.karaka_table.karaka_list(system), system)?;
        trace!("{system} chara karakas: {assignment:?}");
        Ok(assignment)
    }

    /// Chara karakas keyed by graha.
    pub fn chara_karaka(
        &self,
        system: RankingSystem,
    ) -> Result<BTreeMap<String, Karaka>, AnalysisError> {
        Ok(self.chara_karaka_ranking(system)?.into_iter().collect())
    }

    /// Chara karakas keyed by karaka; the exact inverse of [`Self::chara_karaka`].
    pub fn chara_karaka_reversed(
        &self,
        system: RankingSystem,
    ) -> Result<BTreeMap<Karaka, String>, AnalysisError> {
        invert_assignment(&self.chara_karaka_ranking(system)?)
    }

    // -- Derived points ----------------------------------------------------

    /// Rashi (1-based) of the Atmakaraka in the navamsha (BPHS 33.1).
    pub fn karakamsha(&self) -> Result<u8, AnalysisError> {
        let varga = self.varga_data(&self.config.navamsha_varga)?;
        let atma = self
            .chara_karaka_reversed(self.config.default_system)?
            .remove(&Karaka::Atma)
            .ok_or_else(|| AnalysisError::Lookup("no graha ranked as atmakaraka".to_string()))?;

        varga.graha.get(&atma).map(|p| p.rashi).ok_or_else(|| {
            AnalysisError::Lookup(format!(
                "atmakaraka {atma} missing from {} graha data",
                self.config.navamsha_varga
            ))
        })
    }

    /// Rashi (1-based) of the lagna in the navamsha.
    pub fn lagnamsha(&self) -> Result<u8, AnalysisError> {
        let varga = self.varga_data(&self.config.navamsha_varga)?;
        varga.extra.get(LAGNA_KEY).map(|p| p.rashi).ok_or_else(|| {
            AnalysisError::Lookup(format!(
                "{LAGNA_KEY} missing from {} extra data",
                self.config.navamsha_varga
            ))
        })
    }

    // -- Varga data --------------------------------------------------------

    /// Divisional chart data, memoized per case-insensitive identifier.
    pub fn varga_data(&self, varga: &str) -> Result<Arc<VargaData>, AnalysisError> {
        self.varga_cache.get_or_compute(varga, |key| {
            self.varga_provider.varga_data(key, &self.ganita)
        })
    }

    /// Navamsha (`"d9"`) data.
    pub fn varga_data_default(&self) -> Result<Arc<VargaData>, AnalysisError> {
        self.varga_data(DEFAULT_VARGA)
    }

    /// Canonical identifiers computed so far, sorted.
    pub fn cached_vargas(&self) -> Vec<String> {
        self.varga_cache.keys()
    }
}
