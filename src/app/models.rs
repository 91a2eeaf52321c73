//! Data models for WOSPi normalization
//!
//! This module contains the core data structures shared across the pipeline:
//! the typed value union produced by feed classification, the ordered field
//! set, the minmax report extract and the final reply envelope.

use serde::Serialize;
use serde_json::Value;

// =============================================================================
// Typed Feed Values
// =============================================================================

/// A classified raw feed token.
///
/// Classification is total: every token is exactly one of these variants.
/// The unsigned integer and `digits.digits` float patterns mirror the feed's
/// own conventions; anything else stays an opaque string.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl TypedValue {
    /// Borrow the raw text if this value stayed an opaque string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TypedValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Borrow the integer if the token was classified as one
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            TypedValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Convert into a JSON value, preserving the classified type
    pub fn to_json(&self) -> Value {
        match self {
            TypedValue::Integer(i) => Value::from(*i),
            TypedValue::Float(f) => Value::from(*f),
            TypedValue::Text(s) => Value::from(s.as_str()),
        }
    }
}

// =============================================================================
// Ordered Field Set
// =============================================================================

/// Ordered mapping of feed field name to classified value.
///
/// Entries keep the feed's element order; the set is only mutated during
/// initial classification and never re-ordered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    entries: Vec<(String, TypedValue)>,
}

impl FieldSet {
    /// Create an empty field set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a classified field, preserving insertion order
    pub fn insert(&mut self, name: impl Into<String>, value: TypedValue) {
        self.entries.push((name.into(), value));
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.entries
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Iterate fields in feed order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Number of classified fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no field was classified
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Minmax Report Extract
// =============================================================================

/// Station metadata and daily temperature extremes scanned from the
/// minmax report.
///
/// Fields default to empty/zero when their pattern never matches, which is
/// also the documented degraded result when the report fetch fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationReport {
    /// WOSPi software version token
    pub software_version: String,

    /// Station location name (city)
    pub location: String,

    /// Raw latitude DMS string as captured, e.g. `N 48*33.82`
    pub latitude_dms: String,

    /// Raw longitude DMS string as captured, e.g. `E 016*05.504`
    pub longitude_dms: String,

    /// Today's minimum outdoor temperature in Celsius
    pub temp_min_c: f64,

    /// Today's maximum outdoor temperature in Celsius
    pub temp_max_c: f64,
}

// =============================================================================
// Reply Envelope
// =============================================================================

/// Final reply envelope for the metrics pipeline.
///
/// Serialized as one element of a JSON array; the normalized record sits
/// under `v` with its keys in feed order followed by the derived keys.
#[derive(Debug, Clone, Serialize)]
pub struct StationReply {
    /// Fixed country code from configuration
    pub country: String,

    /// Location name from the minmax report
    pub city: String,

    /// The normalized record
    pub v: serde_json::Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_set_preserves_insertion_order() {
        let mut fields = FieldSet::new();
        fields.insert("outtemp", TypedValue::Float(21.5));
        fields.insert("humidity", TypedValue::Integer(63));
        fields.insert("windchill", TypedValue::Float(21.5));

        let names: Vec<&str> = fields.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["outtemp", "humidity", "windchill"]);
    }

    #[test]
    fn test_field_set_lookup() {
        let mut fields = FieldSet::new();
        fields.insert("timestamp", TypedValue::Text("18.07.2024 13:37:39".into()));

        assert_eq!(
            fields.get("timestamp").and_then(TypedValue::as_text),
            Some("18.07.2024 13:37:39")
        );
        assert!(fields.get("missing").is_none());
    }

    #[test]
    fn test_typed_value_to_json() {
        assert_eq!(TypedValue::Integer(42).to_json(), serde_json::json!(42));
        assert_eq!(TypedValue::Float(12.5).to_json(), serde_json::json!(12.5));
        assert_eq!(
            TypedValue::Text("N".into()).to_json(),
            serde_json::json!("N")
        );
    }

    #[test]
    fn test_station_report_default_is_degraded_result() {
        let report = StationReport::default();
        assert_eq!(report.software_version, "");
        assert_eq!(report.location, "");
        assert_eq!(report.latitude_dms, "");
        assert_eq!(report.temp_min_c, 0.0);
        assert_eq!(report.temp_max_c, 0.0);
    }
}
