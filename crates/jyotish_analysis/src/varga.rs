//! Varga (divisional chart) providers and the per-engine varga cache.

use std::collections::HashMap;
use std::sync::Arc;

use jyotish_base::{
    Amsha, AmshaVariation, GanitaData, GrahaData, Rashi, VargaData, VargaPoint, amsha_position,
};
use log::{debug, trace};
use parking_lot::Mutex;

use crate::error::AnalysisError;

/// Computes divisional chart data from a natal dataset.
///
/// `varga` arrives in canonical (uppercase) form. Implementations must be
/// deterministic and must not depend on anything but their inputs.
pub trait VargaProvider: Send + Sync {
    fn varga_data(&self, varga: &str, ganita: &GanitaData) -> Result<VargaData, AnalysisError>;
}

/// Canonical cache key for a varga identifier.
pub fn canonical_varga(varga: &str) -> String {
    varga.to_uppercase()
}

// ---------------------------------------------------------------------------
// Amsha-based provider
// ---------------------------------------------------------------------------

/// Default provider: the Shodashavarga amsha divisions.
///
/// Every natal graha and extra point is moved through the amsha division
/// of its sidereal longitude. A point without `longitude` or `rashi` cannot be
/// placed and fails the whole computation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmshaVargaProvider {
    variation: AmshaVariation,
}

impl AmshaVargaProvider {
    pub fn new(variation: AmshaVariation) -> Self {
        Self { variation }
    }

    /// Sidereal longitude of one record, with every field it relies on
    /// range-checked.
    ///
    /// `longitude` wins when present; otherwise the 1-based `rashi` and the
    /// in-sign `degree` are combined.
    fn longitude_of(key: &str, data: &GrahaData) -> Result<f64, AnalysisError> {
        match (data.longitude, data.rashi) {
            (Some(lon), _) if !(0.0..360.0).contains(&lon) => {
                return Err(AnalysisError::Lookup(format!(
                    "{key} has longitude {lon} outside [0, 360)"
                )));
            }
            (Some(_), _) => {}
            (None, None) => {
                return Err(AnalysisError::Lookup(format!(
                    "{key} has neither longitude nor rashi"
                )));
            }
            (None, Some(number)) if Rashi::from_number(number).is_none() => {
                return Err(AnalysisError::Lookup(format!(
                    "{key} has rashi {number} outside 1..=12"
                )));
            }
            (None, Some(_)) if !(0.0..30.0).contains(&data.degree) => {
                return Err(AnalysisError::Lookup(format!(
                    "{key} has degree {} outside [0, 30)",
                    data.degree
                )));
            }
            (None, Some(_)) => {}
        }
        data.sidereal_longitude()
            .ok_or_else(|| AnalysisError::Lookup(format!("{key} cannot be placed")))
    }

    fn place(
        &self,
        key: &str,
        data: &GrahaData,
        amsha: Amsha,
    ) -> Result<VargaPoint, AnalysisError> {
        let lon = Self::longitude_of(key, data)?;
        let pos = amsha_position(lon, amsha, self.variation);
        Ok(VargaPoint {
            rashi: pos.rashi.number(),
            degree: pos.degrees_in_rashi,
        })
    }
}

impl VargaProvider for AmshaVargaProvider {
    fn varga_data(&self, varga: &str, ganita: &GanitaData) -> Result<VargaData, AnalysisError> {
        let amsha: Amsha = varga.parse().map_err(AnalysisError::UnknownVarga)?;

        let mut out = VargaData::default();
        for (key, data) in &ganita.graha {
            out.graha.insert(key.clone(), self.place(key, data, amsha)?);
        }
        for (key, data) in &ganita.extra {
            out.extra.insert(key.clone(), self.place(key, data, amsha)?);
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// Lazily filled varga cache, keyed by canonical identifier.
///
/// The lock is held across lookup, computation and insert, so each
/// identifier is computed at most once even under concurrent callers.
/// Failed computations are not stored.
#[derive(Debug, Default)]
pub struct VargaCache {
    entries: Mutex<HashMap<String, Arc<VargaData>>>,
}

impl VargaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `varga`, computing it on first access.
    pub fn get_or_compute<F>(&self, varga: &str, compute: F) -> Result<Arc<VargaData>, AnalysisError>
    where
        F: FnOnce(&str) -> Result<VargaData, AnalysisError>,
    {
        let key = canonical_varga(varga);
        let mut entries = self.entries.lock();
        if let Some(hit) = entries.get(&key) {
            trace!("varga cache hit: {key}");
            return Ok(Arc::clone(hit));
        }

        debug!("varga cache miss, computing {key}");
        let data = Arc::new(compute(&key)?);
        entries.insert(key, Arc::clone(&data));
        Ok(data)
    }

    /// Canonical identifiers computed so far, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn sample() -> GanitaData {
        GanitaData::default()
            .with_graha("SU", GrahaData::new(5.0).with_rashi(1))
            .with_graha("MO", GrahaData::new(15.5).with_longitude(45.5))
            .with_extra("LG", GrahaData::new(0.0).with_rashi(4))
    }

    #[test]
    fn amsha_provider_d9() {
        let d9 = AmshaVargaProvider::default().varga_data("D9", &sample()).unwrap();
        // Mesha 5 deg → Vrishabha 15 deg
        assert_eq!(d9.graha["SU"].rashi, 2);
        assert!((d9.graha["SU"].degree - 15.0).abs() < 0.01);
        // Vrishabha 15.5 deg → Vrishabha 19.5 deg
        assert_eq!(d9.graha["MO"].rashi, 2);
        // Karka 0 deg → Karka
        assert_eq!(d9.extra["LG"].rashi, 4);
    }

    #[test]
    fn amsha_provider_d1_is_natal_rashi() {
        let d1 = AmshaVargaProvider::default().varga_data("D1", &sample()).unwrap();
        assert_eq!(d1.graha["SU"].rashi, 1);
        assert_eq!(d1.graha["MO"].rashi, 2);
    }

    #[test]
    fn amsha_provider_unknown_varga() {
        let err = AmshaVargaProvider::default()
            .varga_data("D5", &sample())
            .unwrap_err();
        assert_eq!(err, AnalysisError::UnknownVarga("D5".into()));
    }

    #[test]
    fn amsha_provider_unplaceable_point() {
        let data = GanitaData::default().with_graha("MA", GrahaData::new(3.0));
        let err = AmshaVargaProvider::default().varga_data("D9", &data).unwrap_err();
        assert!(matches!(err, AnalysisError::Lookup(_)));
    }

    #[test]
    fn amsha_provider_rejects_rashi_out_of_range() {
        for bad in [0, 13] {
            let data = GanitaData::default().with_graha("SU", GrahaData::new(5.0).with_rashi(bad));
            let err = AmshaVargaProvider::default().varga_data("D1", &data).unwrap_err();
            assert_eq!(
                err,
                AnalysisError::Lookup(format!("SU has rashi {bad} outside 1..=12"))
            );
        }
    }

    #[test]
    fn amsha_provider_rejects_degree_out_of_range() {
        for bad in [-0.5, 30.0, 42.0] {
            let data = GanitaData::default().with_extra("LG", GrahaData::new(bad).with_rashi(3));
            let err = AmshaVargaProvider::default().varga_data("D9", &data).unwrap_err();
            assert!(matches!(err, AnalysisError::Lookup(ref m) if m.starts_with("LG has degree")));
        }
    }

    #[test]
    fn amsha_provider_rejects_longitude_out_of_range() {
        let data = GanitaData::default().with_graha("MO", GrahaData::new(5.0).with_longitude(365.0));
        let err = AmshaVargaProvider::default().varga_data("D9", &data).unwrap_err();
        assert!(matches!(err, AnalysisError::Lookup(_)));
    }

    #[test]
    fn raw_mapping_with_bad_rashi_fails_varga_lookup() {
        let analysis = crate::Analysis::new(serde_json::json!({
            "graha": {
                "SU": {"degree": 5, "rashi": 13},
                "MO": {"degree": 5, "rashi": 0}
            }
        }))
        .unwrap();
        assert!(matches!(analysis.varga_data("d1"), Err(AnalysisError::Lookup(_))));
        assert!(analysis.cached_vargas().is_empty());
    }

    #[test]
    fn hora_variation_reaches_d2() {
        let data = GanitaData::default().with_graha("SU", GrahaData::new(10.0).with_rashi(1));
        let d2 = AmshaVargaProvider::new(AmshaVariation::HoraCancerLeoOnly)
            .varga_data("D2", &data)
            .unwrap();
        assert_eq!(d2.graha["SU"].rashi, 4); // Karka
    }

    #[test]
    fn cache_computes_once_per_identifier() {
        let cache = VargaCache::new();
        let calls = Cell::new(0);
        let compute = |_: &str| {
            calls.set(calls.get() + 1);
            Ok(VargaData::default())
        };

        let a = cache.get_or_compute("d9", compute).unwrap();
        let b = cache.get_or_compute("D9", compute).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.keys(), vec!["D9".to_string()]);
    }

    #[test]
    fn cache_passes_canonical_key() {
        let cache = VargaCache::new();
        cache
            .get_or_compute("d12", |key| {
                assert_eq!(key, "D12");
                Ok(VargaData::default())
            })
            .unwrap();
    }

    #[test]
    fn cache_does_not_store_failures() {
        let cache = VargaCache::new();
        let err = cache
            .get_or_compute("d9", |key| Err(AnalysisError::UnknownVarga(key.into())))
            .unwrap_err();
        assert_eq!(err, AnalysisError::UnknownVarga("D9".into()));
        assert!(cache.is_empty());
    }
}
