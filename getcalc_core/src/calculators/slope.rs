//! # Slope Calculation
//!
//! Slope of the line through two points, with the rise/run ratio, the
//! inclination angle, and a qualitative line type. Vertical lines have no
//! slope; the numeric outputs go null rather than infinite.

use serde::Serialize;

use crate::calculators::to_outputs;
use crate::errors::{CalcError, CalcResult};
use crate::format::{format_number, format_point, gcd, round_to_precision, GEOMETRY_PRECISION};
use crate::inputs::{FlatInputs, ValueMap};
use crate::registry::Calculator;

#[derive(Debug, Clone)]
pub struct SlopeInput {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl SlopeInput {
    pub fn from_inputs(inputs: &FlatInputs) -> CalcResult<Self> {
        Ok(Self {
            x1: inputs.require_f64("x1")?,
            y1: inputs.require_f64("y1")?,
            x2: inputs.require_f64("x2")?,
            y2: inputs.require_f64("y2")?,
        })
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.x1 == self.x2 && self.y1 == self.y2 {
            return Err(CalcError::domain(
                "slope",
                "The two points must be distinct",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlopeResult {
    /// None for vertical lines
    pub slope: Option<f64>,
    pub slope_as_ratio: String,
    pub angle_in_degrees: Option<f64>,
    pub angle_in_radians: Option<f64>,
    pub rise: f64,
    pub run: f64,
    pub line_type: String,
    pub points_display: String,
}

/// Reduced rise/run ratio when both legs land on integers, otherwise the
/// decimal slope over 1.
fn slope_as_ratio(rise: f64, run: f64, slope: f64) -> String {
    let rise_int = rise.round();
    let run_int = run.round();
    let integral = (rise - rise_int).abs() < 1e-9 && (run - run_int).abs() < 1e-9;
    if !integral {
        return format!("{}/1", format_number(round_to_precision(slope, GEOMETRY_PRECISION)));
    }

    let divisor = gcd(rise_int.abs() as i64, run_int.abs() as i64).max(1);
    let mut numerator = rise_int as i64 / divisor;
    let mut denominator = run_int as i64 / divisor;
    if denominator < 0 {
        numerator = -numerator;
        denominator = -denominator;
    }
    format!("{}/{}", numerator, denominator)
}

pub fn calculate(input: &SlopeInput) -> CalcResult<SlopeResult> {
    input.validate()?;

    let rise = input.y2 - input.y1;
    let run = input.x2 - input.x1;
    let points_display = format!(
        "{} and {}",
        format_point(input.x1, input.y1),
        format_point(input.x2, input.y2)
    );

    if run == 0.0 {
        return Ok(SlopeResult {
            slope: None,
            slope_as_ratio: "undefined (vertical line)".to_string(),
            angle_in_degrees: None,
            angle_in_radians: None,
            rise,
            run,
            line_type: "vertical".to_string(),
            points_display,
        });
    }

    let slope = rise / run;
    let (line_type, ratio) = if rise == 0.0 {
        ("horizontal", "0/1 (horizontal line)".to_string())
    } else if slope > 0.0 {
        ("increasing", slope_as_ratio(rise, run, slope))
    } else {
        ("decreasing", slope_as_ratio(rise, run, slope))
    };

    let radians = slope.atan();

    Ok(SlopeResult {
        slope: Some(round_to_precision(slope, GEOMETRY_PRECISION)),
        slope_as_ratio: ratio,
        angle_in_degrees: Some(round_to_precision(radians.to_degrees(), GEOMETRY_PRECISION)),
        angle_in_radians: Some(round_to_precision(radians, GEOMETRY_PRECISION)),
        rise,
        run,
        line_type: line_type.to_string(),
        points_display,
    })
}

pub struct SlopeCalculator;

impl Calculator for SlopeCalculator {
    fn key(&self) -> &'static str {
        "SLOPE_CALCULATOR"
    }

    fn name(&self) -> &'static str {
        "Slope Calculator"
    }

    fn calculate(&self, inputs: &FlatInputs) -> CalcResult<ValueMap> {
        let input = SlopeInput::from_inputs(inputs)?;
        to_outputs(&calculate(&input)?)
    }
}
