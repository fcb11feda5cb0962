//! # Tool Manifests
//!
//! A manifest describes one calculator tool: identity, grouped input
//! sections with typed fields, declared outputs, and the logic key binding
//! it to a registered strategy. Manifests are consumed, never produced,
//! by this crate; the content layer loads them from storage.
//!
//! Field-level custom validation is a closed set of declarative
//! [`FieldRule`] predicates interpreted by fixed logic; manifests cannot
//! carry executable validation code.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "toolName": "Midpoint Calculator",
//!   "toolSlug": "midpoint",
//!   "categorySlug": "math",
//!   "description": "Midpoint between two points",
//!   "calculationLogic": "MIDPOINT",
//!   "sections": [
//!     {
//!       "id": "point-coordinates",
//!       "title": "Point Coordinates",
//!       "required": true,
//!       "fields": [
//!         { "name": "x1", "label": "x₁", "type": "number", "required": true }
//!       ]
//!     }
//!   ],
//!   "outputs": [
//!     { "name": "midpointX", "label": "Midpoint X", "precision": 6 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::units::UnitCategory;

// ============================================================================
// Manifest Structure
// ============================================================================

/// Descriptor for one calculator tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub tool_name: String,
    pub tool_slug: String,
    pub category_slug: String,
    #[serde(default)]
    pub description: String,
    /// Logic key binding this manifest to a registered strategy
    pub calculation_logic: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub outputs: Vec<OutputSpec>,
}

/// Named group of related input fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub required: bool,
    pub fields: Vec<Field>,
}

/// Input field types supported by the form layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Number,
    Text,
    Select,
    Checkbox,
    Radio,
}

/// A single named, typed input descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub step: Option<f64>,
    #[serde(default)]
    pub units: Option<FieldUnits>,
    #[serde(default)]
    pub rules: Vec<FieldRule>,
    /// Field only participates when the controlling field holds the value
    #[serde(default)]
    pub show_when: Option<ShowWhen>,
}

/// Declarative visibility condition. Shape-dispatch calculators use this to
/// tie per-shape fields to the discriminator (e.g. `radius` only when
/// `shape` is `circle`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowWhen {
    pub field: String,
    pub equals: Value,
}

impl ShowWhen {
    pub fn matches(&self, value: Option<&Value>) -> bool {
        value == Some(&self.equals)
    }
}

/// Unit configuration for a field or output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldUnits {
    pub category: UnitCategory,
    pub available: Vec<String>,
    #[serde(default)]
    pub default: Option<String>,
}

/// Declarative validation predicates interpreted by fixed logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldRule {
    /// Value must lie within the (inclusive) bounds that are present
    Range { min: Option<f64>, max: Option<f64> },
    /// Value must be strictly greater than zero
    Positive,
    /// Value must be greater than or equal to zero
    NonNegative,
    /// Value must be a whole number
    Integer,
    /// Value must equal one of the listed strings
    OneOf { values: Vec<String> },
}

impl FieldRule {
    /// Evaluate the predicate against a JSON value. Non-numeric values fail
    /// numeric rules; non-string values fail `OneOf`.
    pub fn check(&self, value: &Value) -> bool {
        match self {
            FieldRule::Range { min, max } => match as_f64(value) {
                Some(v) => min.map_or(true, |m| v >= m) && max.map_or(true, |m| v <= m),
                None => false,
            },
            FieldRule::Positive => as_f64(value).map_or(false, |v| v > 0.0),
            FieldRule::NonNegative => as_f64(value).map_or(false, |v| v >= 0.0),
            FieldRule::Integer => as_f64(value).map_or(false, |v| v.fract() == 0.0),
            FieldRule::OneOf { values } => match value.as_str() {
                Some(s) => values.iter().any(|v| v == s),
                None => false,
            },
        }
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Declared output: name, label, display precision, optional unit set used
/// to attach a `<name>Conversions` map to results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSpec {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub precision: Option<u8>,
    #[serde(default)]
    pub units: Option<FieldUnits>,
}

// ============================================================================
// Manifest Validation
// ============================================================================

/// Structural validation report for a manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ManifestReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

fn is_slug(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn is_logic_key(text: &str) -> bool {
    !text.is_empty()
        && text.chars().all(|c| c.is_ascii_uppercase() || c == '_')
}

impl Manifest {
    /// Validate structure and invariants: identity fields, slug formats,
    /// unique section ids, unique field names per section, unit configs,
    /// unique output names, and numeric constraints.
    pub fn validate(&self) -> ManifestReport {
        let mut report = ManifestReport::default();

        if self.tool_name.trim().is_empty() {
            report.error("Required field missing: toolName");
        }
        if self.tool_slug.trim().is_empty() {
            report.error("Required field missing: toolSlug");
        } else if !is_slug(&self.tool_slug) {
            report.error("toolSlug must contain only lowercase letters, numbers, and hyphens");
        }
        if self.category_slug.trim().is_empty() {
            report.error("Required field missing: categorySlug");
        } else if !is_slug(&self.category_slug) {
            report.error("categorySlug must contain only lowercase letters, numbers, and hyphens");
        }
        if self.calculation_logic.trim().is_empty() {
            report.error("Required field missing: calculationLogic");
        } else if !is_logic_key(&self.calculation_logic) {
            report.warning("calculationLogic should use UPPER_CASE_WITH_UNDERSCORES format");
        }

        if self.sections.is_empty() {
            report.error("At least one section is required");
        }

        let mut section_ids = std::collections::HashSet::new();
        for (i, section) in self.sections.iter().enumerate() {
            let path = format!("sections[{}]", i);
            if section.id.is_empty() {
                report.error(format!("{}: Missing required field \"id\"", path));
            } else if !section_ids.insert(section.id.as_str()) {
                report.error(format!("{}: Duplicate section ID \"{}\"", path, section.id));
            }
            if section.title.is_empty() {
                report.error(format!("{}: Missing required field \"title\"", path));
            }
            if section.fields.is_empty() {
                report.warning(format!("{}: Section has no fields", path));
            }

            let mut field_names = std::collections::HashSet::new();
            for (j, field) in section.fields.iter().enumerate() {
                let field_path = format!("{}.fields[{}]", path, j);
                if field.name.is_empty() {
                    report.error(format!("{}: Missing required field \"name\"", field_path));
                } else if !field_names.insert(field.name.as_str()) {
                    report.error(format!(
                        "{}: Duplicate field name \"{}\"",
                        field_path, field.name
                    ));
                }
                if field.label.is_empty() {
                    report.error(format!("{}: Missing required field \"label\"", field_path));
                }
                if let (Some(min), Some(max)) = (field.min, field.max) {
                    if min > max {
                        report.error(format!("{}: \"min\" cannot be greater than \"max\"", field_path));
                    }
                }
                if let Some(step) = field.step {
                    if step <= 0.0 {
                        report.error(format!("{}: \"step\" must be a positive number", field_path));
                    }
                }
                if let Some(units) = &field.units {
                    validate_units(units, &format!("{}.units", field_path), &mut report);
                }
            }
        }

        if self.outputs.is_empty() {
            report.warning("No outputs defined. Results may not display properly.");
        }
        let mut output_names = std::collections::HashSet::new();
        for (i, output) in self.outputs.iter().enumerate() {
            let path = format!("outputs[{}]", i);
            if output.name.is_empty() {
                report.error(format!("{}: Missing required field \"name\"", path));
            } else if !output_names.insert(output.name.as_str()) {
                report.error(format!("{}: Duplicate output name \"{}\"", path, output.name));
            }
            if output.label.is_empty() {
                report.error(format!("{}: Missing required field \"label\"", path));
            }
            if let Some(units) = &output.units {
                validate_units(units, &format!("{}.units", path), &mut report);
            }
        }

        report
    }
}

fn validate_units(units: &FieldUnits, path: &str, report: &mut ManifestReport) {
    if units.available.is_empty() {
        report.error(format!("{}: \"available\" array cannot be empty", path));
    }
    for unit in &units.available {
        if !crate::units::is_valid_unit(unit, units.category) {
            report.error(format!(
                "{}: Unit \"{}\" not found in category \"{}\"",
                path, unit, units.category
            ));
        }
    }
    match &units.default {
        None => report.warning(format!("{}: No default unit specified", path)),
        Some(default) => {
            if !units.available.iter().any(|u| u == default) {
                report.error(format!(
                    "{}: Default unit \"{}\" not found in available units",
                    path, default
                ));
            }
        }
    }
}
