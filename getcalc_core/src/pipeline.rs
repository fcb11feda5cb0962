//! # Execution Pipeline
//!
//! The shared lifecycle every calculator strategy runs through:
//! validate → normalize units → calculate → format. Strategies only
//! implement the formula; everything else lives here.
//!
//! Failure semantics: validation problems accumulate into an error list and
//! short-circuit with an error-shaped [`Outcome`]; calculation-time errors
//! are caught at the execute boundary and converted into the same shape.
//! Nothing here panics or propagates an error past the pipeline — registry
//! resolution, which happens before a pipeline exists, is the only fatal
//! path.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::CalcResult;
use crate::format::round_to_precision;
use crate::inputs::{is_blank, FlatInputs, InputPayload, ValueMap};
use crate::manifest::{FieldType, FieldUnits, Manifest};
use crate::registry::Calculator;
use crate::units;

// ============================================================================
// Result Types
// ============================================================================

/// Metadata attached to every outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub has_errors: bool,
    pub has_warnings: bool,
    /// ISO-8601 timestamp of when the calculation finished
    pub timestamp: String,
    /// Tool name from the manifest, or the strategy's own name
    pub calculator: String,
}

/// Successful calculation: named outputs plus metadata.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessReport {
    #[serde(flatten)]
    pub outputs: ValueMap,
    pub metadata: Metadata,
}

/// Failed calculation: a joined message, the individual errors, and any
/// warnings gathered along the way.
#[derive(Debug, Clone, Serialize)]
pub struct FailureReport {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub metadata: Metadata,
}

/// Result of one calculation request. Same JSON shape either way: callers
/// check for the `error` key (or use the accessors here).
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Success(SuccessReport),
    Failure(FailureReport),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Named output value, if the calculation succeeded.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Outcome::Success(report) => report.outputs.get(name),
            Outcome::Failure(_) => None,
        }
    }

    /// Convenience accessor for numeric outputs.
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name)?.as_f64()
    }

    /// The joined error message, if the calculation failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(report) => Some(&report.error),
        }
    }

    pub fn metadata(&self) -> &Metadata {
        match self {
            Outcome::Success(report) => &report.metadata,
            Outcome::Failure(report) => &report.metadata,
        }
    }
}

// ============================================================================
// Execution
// ============================================================================

/// One calculation in flight: raw payload, optional manifest, and the
/// accumulated error/warning lists.
pub struct Execution<'a> {
    calculator: &'a dyn Calculator,
    payload: &'a InputPayload,
    manifest: Option<&'a Manifest>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl<'a> Execution<'a> {
    pub fn new(
        calculator: &'a dyn Calculator,
        payload: &'a InputPayload,
        manifest: Option<&'a Manifest>,
    ) -> Self {
        Self {
            calculator,
            payload,
            manifest,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Run the full workflow and always produce an [`Outcome`].
    pub fn run(mut self) -> Outcome {
        if !self.validate_inputs() {
            return self.failure();
        }

        let normalized = match self.normalize_inputs() {
            Ok(inputs) => inputs,
            Err(error) => {
                self.errors.push(error.to_string());
                return self.failure();
            }
        };

        tracing::debug!(calculator = self.calculator.key(), "dispatching calculation");

        match self.calculator.calculate(&normalized) {
            Ok(raw) => match self.format_results(raw) {
                Ok(outputs) => self.success(outputs),
                Err(error) => {
                    self.errors.push(error.to_string());
                    self.failure()
                }
            },
            Err(error) => {
                self.errors.push(error.to_string());
                self.failure()
            }
        }
    }

    /// Manifest-driven validation with accumulate-then-report semantics:
    /// every problem is recorded, nothing throws. Returns true iff the
    /// error list stayed empty. Without a manifest the strategy's own
    /// extraction checks are the only validation.
    fn validate_inputs(&mut self) -> bool {
        let Some(manifest) = self.manifest else {
            return true;
        };

        let flat = self.payload.flatten();

        for section in &manifest.sections {
            let has_data = section.fields.iter().any(|f| flat.has_value(&f.name));
            if section.required && !has_data {
                self.errors
                    .push(format!("Section \"{}\" is required", section.title));
                continue;
            }

            for field in &section.fields {
                if let Some(condition) = &field.show_when {
                    if !condition.matches(flat.get(&condition.field)) {
                        continue;
                    }
                }
                let value = match flat.get(&field.name) {
                    Some(value) if !is_blank(value) => value,
                    _ => {
                        if field.required {
                            self.errors.push(format!("{} is required", field.label));
                        }
                        continue;
                    }
                };

                let mut valid = true;
                if field.field_type == FieldType::Number {
                    match flat.get_f64(&field.name) {
                        Some(number) => {
                            if field.min.map_or(false, |min| number < min)
                                || field.max.map_or(false, |max| number > max)
                            {
                                valid = false;
                            }
                        }
                        None => valid = false,
                    }
                }
                if valid && !field.rules.iter().all(|rule| rule.check(value)) {
                    valid = false;
                }
                if !valid {
                    self.errors
                        .push(format!("Invalid value for {}", field.label));
                }
            }
        }

        self.errors.is_empty()
    }

    /// Collapse the payload to the canonical flat shape, then convert every
    /// unit-tagged field (`<name>Unit` companion present) to its category's
    /// standard unit.
    fn normalize_inputs(&self) -> CalcResult<FlatInputs> {
        let mut flat = self.payload.flatten();

        let Some(manifest) = self.manifest else {
            return Ok(flat);
        };

        for section in &manifest.sections {
            for field in &section.fields {
                let Some(config) = &field.units else { continue };
                let unit_field = format!("{}Unit", field.name);
                let Some(unit) = flat.get_str(&unit_field).map(str::to_owned) else {
                    continue;
                };
                let Some(value) = flat.get_f64(&field.name) else {
                    continue;
                };

                let standard = units::standard_unit(config.category);
                let converted = units::convert(value, &unit, standard, config.category)?;
                flat.insert(field.name.clone(), json!(converted));
                flat.insert(unit_field, json!(standard));
            }
        }

        Ok(flat)
    }

    /// Apply declared output precision and attach `<name>Conversions` maps
    /// for outputs carrying a unit set.
    fn format_results(&self, raw: ValueMap) -> CalcResult<ValueMap> {
        let Some(manifest) = self.manifest else {
            return Ok(raw);
        };

        let mut formatted = raw;
        for output in &manifest.outputs {
            let Some(value) = formatted.get(&output.name).and_then(Value::as_f64) else {
                continue;
            };

            let value = match output.precision {
                Some(precision) => {
                    let rounded = round_to_precision(value, precision);
                    formatted.insert(output.name.clone(), json!(rounded));
                    rounded
                }
                None => value,
            };

            if let Some(config) = &output.units {
                let conversions = output_conversions(value, config)?;
                formatted.insert(format!("{}Conversions", output.name), conversions);
            }
        }

        Ok(formatted)
    }

    fn metadata(&self) -> Metadata {
        Metadata {
            has_errors: !self.errors.is_empty(),
            has_warnings: !self.warnings.is_empty(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            calculator: self
                .manifest
                .map(|m| m.tool_name.clone())
                .unwrap_or_else(|| self.calculator.name().to_string()),
        }
    }

    fn success(&self, outputs: ValueMap) -> Outcome {
        Outcome::Success(SuccessReport {
            outputs,
            metadata: self.metadata(),
        })
    }

    fn failure(&self) -> Outcome {
        Outcome::Failure(FailureReport {
            error: self.errors.join(", "),
            errors: self.errors.clone(),
            warnings: self.warnings.clone(),
            metadata: self.metadata(),
        })
    }
}

/// Express a value in every available unit other than the base it is
/// already in.
fn output_conversions(value: f64, config: &FieldUnits) -> CalcResult<Value> {
    let base = config
        .default
        .as_deref()
        .or_else(|| config.available.first().map(String::as_str))
        .unwrap_or_else(|| units::standard_unit(config.category));

    let mut conversions = ValueMap::new();
    for unit in &config.available {
        if unit != base {
            let converted = units::convert(value, base, unit, config.category)?;
            conversions.insert(unit.clone(), json!(converted));
        }
    }
    Ok(Value::Object(conversions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;
    use serde_json::json;

    struct Echo;

    impl Calculator for Echo {
        fn key(&self) -> &'static str {
            "ECHO"
        }

        fn name(&self) -> &'static str {
            "Echo Calculator"
        }

        fn calculate(&self, inputs: &FlatInputs) -> CalcResult<ValueMap> {
            let mut outputs = ValueMap::new();
            if let Some(span) = inputs.get_f64("span") {
                outputs.insert("span".to_string(), json!(span));
            }
            if let Some(unit) = inputs.get_str("spanUnit") {
                outputs.insert("spanUnit".to_string(), json!(unit));
            }
            Ok(outputs)
        }
    }

    struct Failing;

    impl Calculator for Failing {
        fn key(&self) -> &'static str {
            "FAILING"
        }

        fn name(&self) -> &'static str {
            "Failing Calculator"
        }

        fn calculate(&self, _inputs: &FlatInputs) -> CalcResult<ValueMap> {
            Err(CalcError::domain("failing", "always fails"))
        }
    }

    fn manifest_with_units() -> Manifest {
        serde_json::from_value(json!({
            "toolName": "Span Tool",
            "toolSlug": "span-tool",
            "categorySlug": "test",
            "calculationLogic": "ECHO",
            "sections": [{
                "id": "dims",
                "title": "Dimensions",
                "required": true,
                "fields": [{
                    "name": "span",
                    "label": "Span",
                    "type": "number",
                    "required": true,
                    "min": 0.0,
                    "units": {
                        "category": "length",
                        "available": ["m", "cm", "ft"],
                        "default": "m"
                    }
                }]
            }],
            "outputs": [{
                "name": "span",
                "label": "Span",
                "precision": 2,
                "units": {
                    "category": "length",
                    "available": ["m", "cm"],
                    "default": "m"
                }
            }]
        }))
        .unwrap()
    }

    fn run(calculator: &dyn Calculator, payload: Value, manifest: Option<&Manifest>) -> Outcome {
        let payload = InputPayload::from_value(payload).unwrap();
        Execution::new(calculator, &payload, manifest).run()
    }

    #[test]
    fn test_unit_normalization_to_standard() {
        let manifest = manifest_with_units();
        let outcome = run(
            &Echo,
            json!({"dims": {"span": 250.0, "spanUnit": "cm"}}),
            Some(&manifest),
        );
        assert!(outcome.is_success());
        assert!((outcome.get_f64("span").unwrap() - 2.5).abs() < 1e-9);
        assert_eq!(outcome.get("spanUnit"), Some(&json!("m")));
    }

    #[test]
    fn test_output_conversions_attached() {
        let manifest = manifest_with_units();
        let outcome = run(&Echo, json!({"dims": {"span": 2.0}}), Some(&manifest));
        let conversions = outcome.get("spanConversions").unwrap();
        assert!((conversions["cm"].as_f64().unwrap() - 200.0).abs() < 1e-9);
        assert!(conversions.get("m").is_none());
    }

    #[test]
    fn test_required_field_accumulates_error() {
        let manifest = manifest_with_units();
        let outcome = run(&Echo, json!({"dims": {}}), Some(&manifest));
        assert!(!outcome.is_success());
        assert!(outcome.error().unwrap().contains("is required"));
        assert!(outcome.metadata().has_errors);
    }

    #[test]
    fn test_range_violation_rejected_before_calculation() {
        let manifest = manifest_with_units();
        let outcome = run(&Echo, json!({"dims": {"span": -4.0}}), Some(&manifest));
        assert!(!outcome.is_success());
        assert!(outcome.error().unwrap().contains("Invalid value for Span"));
    }

    #[test]
    fn test_hidden_required_field_is_not_enforced() {
        let manifest: Manifest = serde_json::from_value(json!({
            "toolName": "Shape Tool",
            "toolSlug": "shape-tool",
            "categorySlug": "test",
            "calculationLogic": "ECHO",
            "sections": [{
                "id": "shape-inputs",
                "title": "Shape",
                "required": true,
                "fields": [
                    { "name": "shape", "label": "Shape", "type": "select", "required": true },
                    {
                        "name": "radius",
                        "label": "Radius",
                        "type": "number",
                        "required": true,
                        "showWhen": { "field": "shape", "equals": "circle" }
                    },
                    {
                        "name": "side",
                        "label": "Side",
                        "type": "number",
                        "required": true,
                        "showWhen": { "field": "shape", "equals": "square" }
                    }
                ]
            }],
            "outputs": []
        }))
        .unwrap();

        let outcome = run(&Echo, json!({"shape": "square", "side": 2.0}), Some(&manifest));
        assert!(outcome.is_success(), "error: {:?}", outcome.error());

        let outcome = run(&Echo, json!({"shape": "circle"}), Some(&manifest));
        assert_eq!(outcome.error(), Some("Radius is required"));
    }

    #[test]
    fn test_calculation_error_becomes_failure_outcome() {
        let outcome = run(&Failing, json!({}), None);
        assert_eq!(outcome.error(), Some("always fails"));
        assert!(outcome.metadata().has_errors);
    }

    #[test]
    fn test_success_serializes_flat_with_metadata() {
        let outcome = run(&Echo, json!({"span": 3.0}), None);
        let serialized = serde_json::to_value(&outcome).unwrap();
        assert_eq!(serialized["span"], json!(3.0));
        assert_eq!(serialized["metadata"]["hasErrors"], json!(false));
        assert_eq!(serialized["metadata"]["calculator"], json!("Echo Calculator"));
    }

    #[test]
    fn test_failure_serializes_error_shape() {
        let outcome = run(&Failing, json!({}), None);
        let serialized = serde_json::to_value(&outcome).unwrap();
        assert_eq!(serialized["error"], json!("always fails"));
        assert_eq!(serialized["errors"], json!(["always fails"]));
    }
}
