//! # Line Segment Length Calculation
//!
//! Euclidean distance between two endpoints, with the horizontal and
//! vertical legs reported separately.

use serde::Serialize;

use crate::calculators::to_outputs;
use crate::errors::CalcResult;
use crate::format::{format_point, round_to_precision, GEOMETRY_PRECISION};
use crate::inputs::{FlatInputs, ValueMap};
use crate::registry::Calculator;

#[derive(Debug, Clone)]
pub struct LineSegmentInput {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LineSegmentInput {
    pub fn from_inputs(inputs: &FlatInputs) -> CalcResult<Self> {
        Ok(Self {
            x1: inputs.require_f64("x1")?,
            y1: inputs.require_f64("y1")?,
            x2: inputs.require_f64("x2")?,
            y2: inputs.require_f64("y2")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSegmentResult {
    pub line_segment_length: f64,
    pub horizontal_distance: f64,
    pub vertical_distance: f64,
    pub coordinate_display: String,
}

pub fn calculate(input: &LineSegmentInput) -> CalcResult<LineSegmentResult> {
    let dx = input.x2 - input.x1;
    let dy = input.y2 - input.y1;
    let length = (dx * dx + dy * dy).sqrt();

    Ok(LineSegmentResult {
        line_segment_length: round_to_precision(length, GEOMETRY_PRECISION),
        horizontal_distance: round_to_precision(dx.abs(), GEOMETRY_PRECISION),
        vertical_distance: round_to_precision(dy.abs(), GEOMETRY_PRECISION),
        coordinate_display: format!(
            "{} to {}",
            format_point(input.x1, input.y1),
            format_point(input.x2, input.y2)
        ),
    })
}

pub struct LineSegmentCalculator;

impl Calculator for LineSegmentCalculator {
    fn key(&self) -> &'static str {
        "LENGTH_OF_A_LINE_SEGMENT"
    }

    fn name(&self) -> &'static str {
        "Length of a Line Segment Calculator"
    }

    fn calculate(&self, inputs: &FlatInputs) -> CalcResult<ValueMap> {
        let input = LineSegmentInput::from_inputs(inputs)?;
        to_outputs(&calculate(&input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_segment() {
        let result = calculate(&LineSegmentInput {
            x1: -2.0,
            y1: 3.0,
            x2: 2.0,
            y2: 7.0,
        })
        .unwrap();
        assert!((result.line_segment_length - 5.656854).abs() < 1e-6);
        assert_eq!(result.horizontal_distance, 4.0);
        assert_eq!(result.vertical_distance, 4.0);
        assert_eq!(result.coordinate_display, "(-2, 3) to (2, 7)");
    }

    #[test]
    fn test_pythagorean_triple() {
        let result = calculate(&LineSegmentInput {
            x1: 0.0,
            y1: 0.0,
            x2: 3.0,
            y2: 4.0,
        })
        .unwrap();
        assert_eq!(result.line_segment_length, 5.0);
    }

    #[test]
    fn test_degenerate_segment_is_zero() {
        let result = calculate(&LineSegmentInput {
            x1: 1.0,
            y1: 1.0,
            x2: 1.0,
            y2: 1.0,
        })
        .unwrap();
        assert_eq!(result.line_segment_length, 0.0);
    }

    #[test]
    fn test_section_shaped_request() {
        use crate::inputs::InputPayload;
        use serde_json::json;

        let payload = InputPayload::from_value(json!({
            "point-coordinates": {"x1": 0, "y1": 0, "x2": 3, "y2": 4}
        }))
        .unwrap();
        let outputs = LineSegmentCalculator.calculate(&payload.flatten()).unwrap();
        assert_eq!(outputs["lineSegmentLength"], json!(5.0));
    }
}
