//! Natal and divisional chart datasets.
//!
//! A natal dataset (`GanitaData`) is the already-calculated chart handed to
//! the analysis layer: planet records under `graha`, special points such as
//! the ascendant under `extra`, and any other categories carried through
//! untouched. A divisional dataset (`VargaData`) has the same outline but only
//! records the rashi and degree each point lands on.
//!
//! Both are plain serde types so they can be read from and written to JSON
//! in the same layout the upstream chart builders produce.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ChartError;
use crate::rashi::Rashi;

// ---------------------------------------------------------------------------
// Natal dataset
// ---------------------------------------------------------------------------

/// Position record of one graha or extra point in the natal chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrahaData {
    /// Degrees within the rashi, [0, 30).
    pub degree: f64,
    /// 1-based rashi number (Mesha = 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rashi: Option<u8>,
    /// Absolute sidereal longitude in degrees, [0, 360).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Fields not interpreted here (speed, nakshatra, ...).
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl GrahaData {
    pub fn new(degree: f64) -> Self {
        Self {
            degree,
            rashi: None,
            longitude: None,
            other: BTreeMap::new(),
        }
    }

    pub fn with_rashi(mut self, rashi: u8) -> Self {
        self.rashi = Some(rashi);
        self
    }

    pub fn with_longitude(mut self, longitude: f64) -> Self {
        self.longitude = Some(longitude);
        self
    }

    /// Absolute sidereal longitude.
    ///
    /// Uses `longitude` when present, otherwise rebuilds it from `rashi` and
    /// `degree`. None when neither is available or `rashi` is not in 1..=12.
    pub fn sidereal_longitude(&self) -> Option<f64> {
        self.longitude.or_else(|| {
            self.rashi
                .and_then(Rashi::from_number)
                .map(|r| f64::from(r.index()) * 30.0 + self.degree)
        })
    }

    fn validate(&self, key: &str) -> Result<(), ChartError> {
        if !(0.0..30.0).contains(&self.degree) {
            return Err(ChartError::OutOfRange {
                key: key.to_string(),
                field: "degree",
                value: self.degree,
            });
        }
        if let Some(r) = self.rashi {
            if Rashi::from_number(r).is_none() {
                return Err(ChartError::OutOfRange {
                    key: key.to_string(),
                    field: "rashi",
                    value: f64::from(r),
                });
            }
        }
        if let Some(lon) = self.longitude {
            if !(0.0..360.0).contains(&lon) {
                return Err(ChartError::OutOfRange {
                    key: key.to_string(),
                    field: "longitude",
                    value: lon,
                });
            }
        }
        Ok(())
    }
}

/// Natal chart dataset keyed by data category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GanitaData {
    /// Planet key (`SU`, `MO`, ...) → position.
    #[serde(default)]
    pub graha: BTreeMap<String, GrahaData>,
    /// Special point key (`LG`, ...) → position.
    #[serde(default)]
    pub extra: BTreeMap<String, GrahaData>,
    /// Remaining categories (bhava, user, ...), carried but not interpreted.
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl GanitaData {
    /// Resolve a raw JSON value into a dataset.
    ///
    /// Only objects are accepted. The object is shape-checked (`graha` and
    /// `extra` must be maps of records with a numeric `degree`); values are
    /// not range-checked, see [`NatalChart`] for that.
    pub fn from_value(value: Value) -> Result<Self, ChartError> {
        match value {
            Value::Object(_) => {
                serde_json::from_value(value).map_err(|e| ChartError::Shape(e.to_string()))
            }
            other => Err(ChartError::NotAMapping(value_kind(&other))),
        }
    }

    /// Parse JSON text into a dataset.
    pub fn from_json_str(text: &str) -> Result<Self, ChartError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| ChartError::Parse(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn with_graha(mut self, key: impl Into<String>, data: GrahaData) -> Self {
        self.graha.insert(key.into(), data);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, data: GrahaData) -> Self {
        self.extra.insert(key.into(), data);
        self
    }
}

/// Human-readable kind of a JSON value, for error messages.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Chart data capability
// ---------------------------------------------------------------------------

/// Anything that can hand out a natal dataset.
pub trait ChartData {
    /// Extract the natal dataset.
    fn ganita_data(&self) -> GanitaData;
}

impl ChartData for GanitaData {
    fn ganita_data(&self) -> GanitaData {
        self.clone()
    }
}

/// Range-validated, read-only natal chart.
#[derive(Debug, Clone, PartialEq)]
pub struct NatalChart {
    data: GanitaData,
}

impl NatalChart {
    /// Wrap a dataset after checking every position is in range.
    pub fn new(data: GanitaData) -> Result<Self, ChartError> {
        for (key, record) in data.graha.iter().chain(data.extra.iter()) {
            record.validate(key)?;
        }
        Ok(Self { data })
    }

    pub fn from_json_str(text: &str) -> Result<Self, ChartError> {
        Self::new(GanitaData::from_json_str(text)?)
    }

    pub fn data(&self) -> &GanitaData {
        &self.data
    }
}

impl ChartData for NatalChart {
    fn ganita_data(&self) -> GanitaData {
        self.data.clone()
    }
}

// ---------------------------------------------------------------------------
// Divisional dataset
// ---------------------------------------------------------------------------

/// Placement of one point in a divisional chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VargaPoint {
    /// 1-based rashi number (Mesha = 1).
    pub rashi: u8,
    /// Degrees within the rashi, [0, 30).
    pub degree: f64,
}

/// Divisional chart dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VargaData {
    #[serde(default)]
    pub graha: BTreeMap<String, VargaPoint>,
    #[serde(default)]
    pub extra: BTreeMap<String, VargaPoint>,
}
