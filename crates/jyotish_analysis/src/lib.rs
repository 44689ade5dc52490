//! Chart analysis on top of already-calculated natal data.
//!
//! This crate provides:
//! - Chara karaka ranking under the Parashara and Jaimini rule sets
//! - Karakamsha and lagnamsha (navamsha rashis of the Atmakaraka and lagna)
//! - Lazily computed, per-engine memoized varga (divisional chart) data
//!
//! Karaka lists and varga computations are injected collaborators
//! ([`KarakaTable`], [`VargaProvider`]); [`Analysis::new`] wires in the
//! classical tables and the Shodashavarga amsha provider.

pub mod analysis;
pub mod chara_karaka;
pub mod error;
pub mod karaka;
pub mod varga;

pub use analysis::{Analysis, AnalysisConfig, ChartInput, DEFAULT_VARGA};
pub use chara_karaka::{RankedGraha, assign_karakas, invert_assignment, rank_grahas};
pub use error::AnalysisError;
pub use karaka::{
    ALL_KARAKAS, ClassicalKarakas, Karaka, KarakaTable, RankingSystem, SAPTA_KARAKAS,
};
pub use varga::{AmshaVargaProvider, VargaCache, VargaProvider, canonical_varga};

// Re-export the data model so callers don't need to depend on jyotish_base directly.
pub use jyotish_base::{
    AmshaVariation, ChartData, ChartError, GanitaData, GrahaData, NatalChart, Rashi, VargaData,
    VargaPoint,
};
