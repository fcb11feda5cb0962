//! # Input Payloads
//!
//! Inbound payloads arrive in two shapes: a flat field-name map, or a map of
//! section id to field map (the shape the manifest-driven UI produces).
//! The shape is normalized exactly once, before dispatch, so strategies
//! only ever see [`FlatInputs`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{CalcError, CalcResult};

/// JSON object alias used throughout the crate.
pub type ValueMap = Map<String, Value>;

/// Raw inbound payload, flat or section-grouped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputPayload(pub ValueMap);

impl InputPayload {
    /// Build from an arbitrary JSON value; anything but an object is rejected.
    pub fn from_value(value: Value) -> CalcResult<Self> {
        match value {
            Value::Object(map) => Ok(InputPayload(map)),
            other => Err(CalcError::SerializationError {
                reason: format!("inputs must be a JSON object, got {}", type_name(&other)),
            }),
        }
    }

    /// Raw value for a top-level key, before flattening.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Collapse to the canonical flat shape.
    ///
    /// Scalar top-level entries are copied first, then every object-valued
    /// entry (a section) is merged over them, so section-shaped input takes
    /// precedence when both could match.
    pub fn flatten(&self) -> FlatInputs {
        let mut flat = ValueMap::new();
        for (key, value) in &self.0 {
            if !value.is_object() {
                flat.insert(key.clone(), value.clone());
            }
        }
        for value in self.0.values() {
            if let Value::Object(section) = value {
                for (field, field_value) in section {
                    flat.insert(field.clone(), field_value.clone());
                }
            }
        }
        FlatInputs(flat)
    }
}

/// Canonical flat field-name → value map handed to strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct FlatInputs(pub ValueMap);

impl FlatInputs {
    pub fn new() -> Self {
        FlatInputs(ValueMap::new())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    /// True when a field is present with a non-null, non-empty value.
    pub fn has_value(&self, name: &str) -> bool {
        matches!(self.get(name), Some(value) if !is_blank(value))
    }

    /// Numeric value, coercing numeric strings (form inputs arrive as text).
    /// Non-finite values are treated as absent.
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Required finite number: missing/blank yields `MissingField`,
    /// anything non-numeric yields `InvalidInput`.
    pub fn require_f64(&self, name: &str) -> CalcResult<f64> {
        match self.get(name) {
            None => Err(CalcError::missing_field(name)),
            Some(value) if is_blank(value) => Err(CalcError::missing_field(name)),
            Some(value) => self.get_f64(name).ok_or_else(|| {
                CalcError::invalid_input(name, render(value), "must be a valid number")
            }),
        }
    }

    /// String value, if present.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Required non-empty string.
    pub fn require_str(&self, name: &str) -> CalcResult<&str> {
        match self.get_str(name) {
            Some(s) if !s.is_empty() => Ok(s),
            _ => Err(CalcError::missing_field(name)),
        }
    }
}

/// Null, absent-equivalent empty string, or nothing to compute with.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> InputPayload {
        InputPayload::from_value(value).unwrap()
    }

    #[test]
    fn test_flat_passthrough() {
        let flat = payload(json!({"x1": 0, "y1": 0, "x2": 4, "y2": 6})).flatten();
        assert_eq!(flat.get_f64("x2"), Some(4.0));
        assert_eq!(flat.get_f64("missing"), None);
    }

    #[test]
    fn test_sections_are_merged() {
        let flat = payload(json!({
            "point-coordinates": {"x1": 1, "y1": 2, "x2": 5, "y2": 8}
        }))
        .flatten();
        assert_eq!(flat.get_f64("x1"), Some(1.0));
        assert_eq!(flat.get_f64("y2"), Some(8.0));
    }

    #[test]
    fn test_section_values_take_precedence() {
        let flat = payload(json!({
            "principal": 1.0,
            "loan-details": {"principal": 1000.0}
        }))
        .flatten();
        assert_eq!(flat.get_f64("principal"), Some(1000.0));
    }

    #[test]
    fn test_numeric_string_coercion() {
        let flat = payload(json!({"rate": "4.5"})).flatten();
        assert_eq!(flat.get_f64("rate"), Some(4.5));
    }

    #[test]
    fn test_require_f64_errors() {
        let flat = payload(json!({"a": null, "b": "abc"})).flatten();
        assert!(matches!(
            flat.require_f64("a"),
            Err(CalcError::MissingField { .. })
        ));
        assert!(matches!(
            flat.require_f64("b"),
            Err(CalcError::InvalidInput { .. })
        ));
        assert!(matches!(
            flat.require_f64("c"),
            Err(CalcError::MissingField { .. })
        ));
    }

    #[test]
    fn test_non_object_payload_rejected() {
        assert!(InputPayload::from_value(json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_has_value() {
        let flat = payload(json!({"a": "", "b": 0})).flatten();
        assert!(!flat.has_value("a"));
        assert!(flat.has_value("b"));
    }
}
