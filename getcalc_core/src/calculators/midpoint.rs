//! # Midpoint Calculation
//!
//! Midpoint of the segment between two points, plus the distance between
//! them as a convenience output.

use serde::Serialize;

use crate::calculators::to_outputs;
use crate::errors::CalcResult;
use crate::format::{format_point, round_to_precision, GEOMETRY_PRECISION};
use crate::inputs::{FlatInputs, ValueMap};
use crate::registry::Calculator;

#[derive(Debug, Clone)]
pub struct MidpointInput {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl MidpointInput {
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
pub struct MidpointResult {
    pub midpoint_x: f64,
    pub midpoint_y: f64,
    pub midpoint_coordinates: String,
    pub distance_between_points: f64,
}

pub fn calculate(input: &MidpointInput) -> CalcResult<MidpointResult> {
    let midpoint_x = round_to_precision((input.x1 + input.x2) / 2.0, GEOMETRY_PRECISION);
    let midpoint_y = round_to_precision((input.y1 + input.y2) / 2.0, GEOMETRY_PRECISION);
    let distance = ((input.x2 - input.x1).powi(2) + (input.y2 - input.y1).powi(2)).sqrt();

    Ok(MidpointResult {
        midpoint_x,
        midpoint_y,
        midpoint_coordinates: format_point(midpoint_x, midpoint_y),
        distance_between_points: round_to_precision(distance, GEOMETRY_PRECISION),
    })
}

pub struct MidpointCalculator;

impl Calculator for MidpointCalculator {
    fn key(&self) -> &'static str {
        "MIDPOINT"
    }

    fn name(&self) -> &'static str {
        "Midpoint Calculator"
    }

    fn calculate(&self, inputs: &FlatInputs) -> CalcResult<ValueMap> {
        let input = MidpointInput::from_inputs(inputs)?;
        to_outputs(&calculate(&input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_to_4_6() {
        let result = calculate(&MidpointInput {
            x1: 0.0,
            y1: 0.0,
            x2: 4.0,
            y2: 6.0,
        })
        .unwrap();
        assert_eq!(result.midpoint_x, 2.0);
        assert_eq!(result.midpoint_y, 3.0);
        assert_eq!(result.midpoint_coordinates, "(2, 3)");
        assert!((result.distance_between_points - 7.211103).abs() < 1e-6);
    }

    #[test]
    fn test_negative_coordinates() {
        let result = calculate(&MidpointInput {
            x1: -3.0,
            y1: -5.0,
            x2: 3.0,
            y2: 5.0,
        })
        .unwrap();
        assert_eq!(result.midpoint_x, 0.0);
        assert_eq!(result.midpoint_y, 0.0);
    }

    #[test]
    fn test_symmetric_under_point_swap() {
        let forward = calculate(&MidpointInput {
            x1: 1.0,
            y1: 7.0,
            x2: -4.0,
            y2: 2.0,
        })
        .unwrap();
        let reversed = calculate(&MidpointInput {
            x1: -4.0,
            y1: 2.0,
            x2: 1.0,
            y2: 7.0,
        })
        .unwrap();
        assert_eq!(forward.midpoint_x, reversed.midpoint_x);
        assert_eq!(forward.midpoint_y, reversed.midpoint_y);
        assert_eq!(forward.distance_between_points, reversed.distance_between_points);
    }

    #[test]
    fn test_identical_points() {
        let result = calculate(&MidpointInput {
            x1: 1.5,
            y1: 2.5,
            x2: 1.5,
            y2: 2.5,
        })
        .unwrap();
        assert_eq!(result.midpoint_coordinates, "(1.5, 2.5)");
        assert_eq!(result.distance_between_points, 0.0);
    }

    #[test]
    fn test_missing_coordinate_is_an_error() {
        let mut inputs = FlatInputs::new();
        inputs.insert("x1", serde_json::json!(0));
        inputs.insert("y1", serde_json::json!(0));
        inputs.insert("x2", serde_json::json!(4));
        assert!(MidpointCalculator.calculate(&inputs).is_err());
    }
}
