//! # Unit Conversion
//!
//! Static conversion tables and the `convert` operation used for input
//! normalization and output conversion maps.
//!
//! ## Design
//!
//! Every category pivots through an implicit base unit whose factor is 1
//! (meters, kilograms, Celsius, square meters, liters, years, US dollars).
//! Non-temperature conversion is linear: `value * (to_factor / from_factor)`.
//! Temperature is offset-aware and always converts through Celsius.
//!
//! The tables are plain `const` data; every operation here is a pure
//! function over them.
//!
//! ## Example
//!
//! ```rust
//! use getcalc_core::units::{convert, UnitCategory};
//!
//! let feet = convert(2.0, "m", "ft", UnitCategory::Length).unwrap();
//! assert!((feet - 6.56168).abs() < 1e-5);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Categories
// ============================================================================

/// Unit categories supported by the conversion tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    Length,
    Weight,
    Temperature,
    Area,
    Volume,
    Time,
    Currency,
}

impl UnitCategory {
    /// All categories, in table order.
    pub const ALL: [UnitCategory; 7] = [
        UnitCategory::Length,
        UnitCategory::Weight,
        UnitCategory::Temperature,
        UnitCategory::Area,
        UnitCategory::Volume,
        UnitCategory::Time,
        UnitCategory::Currency,
    ];

    /// Lowercase key used in manifests and payloads.
    pub fn key(&self) -> &'static str {
        match self {
            UnitCategory::Length => "length",
            UnitCategory::Weight => "weight",
            UnitCategory::Temperature => "temperature",
            UnitCategory::Area => "area",
            UnitCategory::Volume => "volume",
            UnitCategory::Time => "time",
            UnitCategory::Currency => "currency",
        }
    }

    /// Parse a category key (as found in manifest JSON).
    pub fn parse(key: &str) -> Option<UnitCategory> {
        UnitCategory::ALL.iter().copied().find(|c| c.key() == key)
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ============================================================================
// Unit Definitions
// ============================================================================

/// One entry in a category's conversion table.
#[derive(Debug, Clone, Serialize)]
pub struct UnitDef {
    /// Unit key used in payloads (e.g. "cm")
    pub unit: &'static str,
    /// Factor relative to the category's base unit (base has factor 1)
    pub factor: f64,
    /// Additive offset, only meaningful for temperature
    pub offset: f64,
    /// Human-readable label
    pub label: &'static str,
    /// Display symbol
    pub symbol: &'static str,
    /// Suggested display precision
    pub precision: u8,
    /// Suggested input step
    pub step: f64,
}

impl UnitDef {
    const fn new(
        unit: &'static str,
        factor: f64,
        offset: f64,
        label: &'static str,
        symbol: &'static str,
        precision: u8,
        step: f64,
    ) -> Self {
        Self {
            unit,
            factor,
            offset,
            label,
            symbol,
            precision,
            step,
        }
    }
}

// Base unit: meters
const LENGTH_UNITS: &[UnitDef] = &[
    UnitDef::new("m", 1.0, 0.0, "Meters", "m", 2, 0.01),
    UnitDef::new("cm", 100.0, 0.0, "Centimeters", "cm", 0, 1.0),
    UnitDef::new("mm", 1000.0, 0.0, "Millimeters", "mm", 0, 1.0),
    UnitDef::new("km", 0.001, 0.0, "Kilometers", "km", 3, 0.001),
    UnitDef::new("ft", 3.28084, 0.0, "Feet", "ft", 2, 0.01),
    UnitDef::new("in", 39.3701, 0.0, "Inches", "in", 1, 0.1),
    UnitDef::new("yd", 1.09361, 0.0, "Yards", "yd", 2, 0.01),
    UnitDef::new("mi", 0.000621371, 0.0, "Miles", "mi", 4, 0.0001),
];

// Base unit: kilograms
const WEIGHT_UNITS: &[UnitDef] = &[
    UnitDef::new("kg", 1.0, 0.0, "Kilograms", "kg", 2, 0.01),
    UnitDef::new("g", 1000.0, 0.0, "Grams", "g", 0, 1.0),
    UnitDef::new("lb", 2.20462, 0.0, "Pounds", "lb", 2, 0.01),
    UnitDef::new("oz", 35.274, 0.0, "Ounces", "oz", 1, 0.1),
    UnitDef::new("ton", 0.001, 0.0, "Metric Tons", "t", 3, 0.001),
];

// Base unit: Celsius. Factors/offsets describe the forward transform
// from Celsius; conversion always pivots through Celsius.
const TEMPERATURE_UNITS: &[UnitDef] = &[
    UnitDef::new("c", 1.0, 0.0, "Celsius", "°C", 1, 0.1),
    UnitDef::new("f", 9.0 / 5.0, 32.0, "Fahrenheit", "°F", 1, 0.1),
    UnitDef::new("k", 1.0, 273.15, "Kelvin", "K", 1, 0.1),
];

// Base unit: square meters
const AREA_UNITS: &[UnitDef] = &[
    UnitDef::new("m2", 1.0, 0.0, "Square Meters", "m²", 2, 0.01),
    UnitDef::new("cm2", 10000.0, 0.0, "Square Centimeters", "cm²", 0, 1.0),
    UnitDef::new("ft2", 10.7639, 0.0, "Square Feet", "ft²", 2, 0.01),
    UnitDef::new("in2", 1550.0, 0.0, "Square Inches", "in²", 1, 0.1),
    UnitDef::new("acre", 0.000247105, 0.0, "Acres", "acre", 4, 0.0001),
];

// Base unit: liters
const VOLUME_UNITS: &[UnitDef] = &[
    UnitDef::new("l", 1.0, 0.0, "Liters", "L", 2, 0.01),
    UnitDef::new("ml", 1000.0, 0.0, "Milliliters", "mL", 0, 1.0),
    UnitDef::new("gal", 0.264172, 0.0, "Gallons (US)", "gal", 3, 0.001),
    UnitDef::new("qt", 1.05669, 0.0, "Quarts (US)", "qt", 3, 0.001),
    UnitDef::new("cup", 4.22675, 0.0, "Cups (US)", "cup", 2, 0.01),
];

// Base unit: years (financial convention)
const TIME_UNITS: &[UnitDef] = &[
    UnitDef::new("year", 1.0, 0.0, "Years", "years", 2, 0.01),
    UnitDef::new("month", 12.0, 0.0, "Months", "months", 1, 0.1),
    UnitDef::new("week", 52.0, 0.0, "Weeks", "weeks", 1, 0.1),
    UnitDef::new("day", 365.0, 0.0, "Days", "days", 0, 1.0),
    UnitDef::new("s", 31556952.0, 0.0, "Seconds", "s", 0, 1.0),
    UnitDef::new("min", 525949.2, 0.0, "Minutes", "min", 0, 1.0),
    UnitDef::new("h", 8765.82, 0.0, "Hours", "h", 1, 0.1),
];

// Base unit: US dollars (static reference rates)
const CURRENCY_UNITS: &[UnitDef] = &[
    UnitDef::new("usd", 1.0, 0.0, "US Dollar", "$", 2, 0.01),
    UnitDef::new("eur", 0.85, 0.0, "Euro", "€", 2, 0.01),
    UnitDef::new("gbp", 0.73, 0.0, "British Pound", "£", 2, 0.01),
    UnitDef::new("jpy", 110.0, 0.0, "Japanese Yen", "¥", 0, 1.0),
];

/// Conversion table for a category.
pub fn table(category: UnitCategory) -> &'static [UnitDef] {
    match category {
        UnitCategory::Length => LENGTH_UNITS,
        UnitCategory::Weight => WEIGHT_UNITS,
        UnitCategory::Temperature => TEMPERATURE_UNITS,
        UnitCategory::Area => AREA_UNITS,
        UnitCategory::Volume => VOLUME_UNITS,
        UnitCategory::Time => TIME_UNITS,
        UnitCategory::Currency => CURRENCY_UNITS,
    }
}

// ============================================================================
// Operations
// ============================================================================

/// Look up a unit's metadata within a category.
pub fn unit_info(unit: &str, category: UnitCategory) -> Option<&'static UnitDef> {
    table(category).iter().find(|def| def.unit == unit)
}

/// True if the unit exists in the category's table.
pub fn is_valid_unit(unit: &str, category: UnitCategory) -> bool {
    unit_info(unit, category).is_some()
}

/// Keys of all units available in a category, in table order.
pub fn available_units(category: UnitCategory) -> Vec<&'static str> {
    table(category).iter().map(|def| def.unit).collect()
}

/// The category's base unit (the single entry with factor 1 and no offset).
pub fn standard_unit(category: UnitCategory) -> &'static str {
    // First entry of every table is the base unit by construction.
    table(category)[0].unit
}

fn require_unit(unit: &str, category: UnitCategory) -> CalcResult<&'static UnitDef> {
    unit_info(unit, category)
        .ok_or_else(|| CalcError::unknown_unit(unit, category.key()))
}

/// Convert a value between two units of the same category.
///
/// Same-unit conversion is an identity short-circuit so no floating-point
/// drift is introduced. Temperature conversion pivots through Celsius.
pub fn convert(value: f64, from: &str, to: &str, category: UnitCategory) -> CalcResult<f64> {
    if from == to {
        return Ok(value);
    }

    let from_def = require_unit(from, category)?;
    let to_def = require_unit(to, category)?;

    if category == UnitCategory::Temperature {
        return Ok(convert_temperature(value, from_def, to_def));
    }

    Ok(value * (to_def.factor / from_def.factor))
}

/// Offset-aware temperature conversion: undo the source transform to reach
/// Celsius, then apply the target's forward transform.
fn convert_temperature(value: f64, from: &UnitDef, to: &UnitDef) -> f64 {
    let celsius = (value - from.offset) / from.factor;
    celsius * to.factor + to.offset
}

/// A named value paired with its unit, used by the batch-convert helper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub unit: String,
}

impl Measurement {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

/// Convert a set of named measurements to one common unit.
pub fn convert_batch(
    values: &BTreeMap<String, Measurement>,
    target: &str,
    category: UnitCategory,
) -> CalcResult<BTreeMap<String, Measurement>> {
    let mut converted = BTreeMap::new();
    for (name, measurement) in values {
        let value = convert(measurement.value, &measurement.unit, target, category)?;
        converted.insert(name.clone(), Measurement::new(value, target));
    }
    Ok(converted)
}
