//! # Standard Form to Slope-Intercept Conversion
//!
//! Converts a line `Ax + By = C` to `y = mx + b`, reporting the slope and
//! both intercepts. `B = 0` is a vertical line with no slope-intercept
//! form and is rejected.

use serde::Serialize;

use crate::calculators::to_outputs;
use crate::errors::{CalcError, CalcResult};
use crate::format::{format_number, round_to_precision, GEOMETRY_PRECISION};
use crate::inputs::{FlatInputs, ValueMap};
use crate::registry::Calculator;

#[derive(Debug, Clone)]
pub struct StandardFormInput {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

// Coefficients arrive uppercase (Ax + By = C) or lowercase depending on
// the manifest vintage.
fn coefficient(inputs: &FlatInputs, upper: &str, lower: &str) -> CalcResult<f64> {
    match inputs.get_f64(upper).or_else(|| inputs.get_f64(lower)) {
        Some(value) => Ok(value),
        None => Err(CalcError::missing_field(upper)),
    }
}

impl StandardFormInput {
    pub fn from_inputs(inputs: &FlatInputs) -> CalcResult<Self> {
        Ok(Self {
            a: coefficient(inputs, "A", "a")?,
            b: coefficient(inputs, "B", "b")?,
            c: coefficient(inputs, "C", "c")?,
        })
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.b == 0.0 {
            return Err(CalcError::domain(
                "standard-form",
                "Coefficient B cannot be zero (equation would be vertical line)",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardFormResult {
    pub slope: f64,
    pub y_intercept: f64,
    /// None for horizontal lines (A = 0)
    pub x_intercept: Option<f64>,
    pub standard_form: String,
    pub slope_intercept_form: String,
}

fn standard_form_display(a: f64, b: f64, c: f64) -> String {
    let b_sign = if b >= 0.0 { "+" } else { "-" };
    format!(
        "{}x {} {}y = {}",
        format_number(a),
        b_sign,
        format_number(b.abs()),
        format_number(c)
    )
}

fn slope_intercept_display(slope: f64, y_intercept: f64) -> String {
    let sign = if y_intercept >= 0.0 { "+" } else { "-" };
    format!(
        "y = {}x {} {}",
        format_number(slope),
        sign,
        format_number(y_intercept.abs())
    )
}

pub fn calculate(input: &StandardFormInput) -> CalcResult<StandardFormResult> {
    input.validate()?;

    let slope = round_to_precision(-input.a / input.b, GEOMETRY_PRECISION);
    let y_intercept = round_to_precision(input.c / input.b, GEOMETRY_PRECISION);
    let x_intercept = if input.a == 0.0 {
        None
    } else {
        Some(round_to_precision(input.c / input.a, GEOMETRY_PRECISION))
    };

    Ok(StandardFormResult {
        slope,
        y_intercept,
        x_intercept,
        standard_form: standard_form_display(input.a, input.b, input.c),
        slope_intercept_form: slope_intercept_display(slope, y_intercept),
    })
}

pub struct StandardFormCalculator;

impl Calculator for StandardFormCalculator {
    fn key(&self) -> &'static str {
        "STANDARD_FORM_TO_SLOPE_INTERCEPT"
    }

    fn name(&self) -> &'static str {
        "Standard Form to Slope Intercept Calculator"
    }

    fn calculate(&self, inputs: &FlatInputs) -> CalcResult<ValueMap> {
        let input = StandardFormInput::from_inputs(inputs)?;
        to_outputs(&calculate(&input)?)
    }
}
