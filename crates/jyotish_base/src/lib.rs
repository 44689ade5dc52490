//! Shared Jyotish vocabulary and the natal chart data model.
//!
//! This crate provides:
//! - The 9 grahas and their chart-data keys (`SU`, `MO`, ... `KE`)
//! - Rashi numbering and longitude → rashi placement
//! - Amsha (divisional chart) arithmetic for the 16 Shodashavarga charts
//! - `GanitaData` / `VargaData`, the serde-backed chart datasets consumed and
//!   produced by the analysis layer, and the `ChartData` capability
//!
//! Nothing here computes ephemerides: positions arrive already calculated.

pub mod amsha;
pub mod data;
pub mod error;
pub mod graha;
pub mod rashi;

pub use amsha::{ALL_AMSHAS, Amsha, AmshaVariation, amsha_longitude, amsha_position};
pub use data::{ChartData, GanitaData, GrahaData, NatalChart, VargaData, VargaPoint};
pub use error::ChartError;
pub use graha::{ALL_GRAHAS, Graha, LAGNA_KEY};
pub use rashi::{ALL_RASHIS, Rashi, RashiPosition, normalize_360, rashi_from_longitude};
