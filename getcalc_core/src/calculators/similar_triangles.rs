//! # Similar Triangles Calculation
//!
//! Three modes selected by `calculationType`:
//!
//! - `find-missing-side` (default): two full corresponding pairs plus one
//!   known side, solve for its counterpart. Mismatched ratios are a hard
//!   error here because the answer would be meaningless.
//! - `find-scale-factor`: ratio of one corresponding pair, cross-checked
//!   against a second pair when given.
//! - `verify-similarity`: all six sides, report whether the ratios agree.
//!
//! Triangle one sides are `sideA`/`sideB`/`sideC` (aliases `side1`..`side3`),
//! triangle two sides are `correspondingSide1`..`correspondingSide3`
//! (aliases `sideD`/`sideE`/`sideF`).

use serde::Serialize;

use crate::calculators::to_outputs;
use crate::errors::{CalcError, CalcResult};
use crate::format::{format_number, round_to_precision, GEOMETRY_PRECISION};
use crate::inputs::{FlatInputs, ValueMap};
use crate::registry::Calculator;

/// Ratio mismatch beyond this is a hard error when solving for a side.
const MISSING_SIDE_TOLERANCE: f64 = 0.001;
/// Ratio mismatch beyond this flips the similarity verdict.
const SIMILARITY_TOLERANCE: f64 = 0.0001;

#[derive(Debug, Clone)]
pub enum SimilarTrianglesInput {
    FindMissingSide {
        side_a: f64,
        side_b: f64,
        side_c: f64,
        side_d: f64,
        side_e: f64,
    },
    FindScaleFactor {
        side_a: f64,
        side_d: f64,
        check_pair: Option<(f64, f64)>,
    },
    VerifySimilarity {
        triangle1: [f64; 3],
        triangle2: [f64; 3],
    },
}

fn side(inputs: &FlatInputs, names: &[&str]) -> CalcResult<f64> {
    let value = match names.iter().find_map(|name| inputs.get_f64(name)) {
        Some(value) => value,
        None => return Err(CalcError::missing_field(names[0])),
    };
    if value <= 0.0 {
        return Err(CalcError::invalid_input(
            names[0],
            value.to_string(),
            "Side lengths must be positive",
        ));
    }
    Ok(value)
}

fn side_opt(inputs: &FlatInputs, names: &[&str]) -> Option<f64> {
    names
        .iter()
        .find_map(|name| inputs.get_f64(name))
        .filter(|v| *v > 0.0)
}

const SIDE_A: &[&str] = &["sideA", "side1"];
const SIDE_B: &[&str] = &["sideB", "side2"];
const SIDE_C: &[&str] = &["sideC", "side3"];
const SIDE_D: &[&str] = &["correspondingSide1", "sideD"];
const SIDE_E: &[&str] = &["correspondingSide2", "sideE"];
const SIDE_F: &[&str] = &["correspondingSide3", "sideF"];

impl SimilarTrianglesInput {
    pub fn from_inputs(inputs: &FlatInputs) -> CalcResult<Self> {
        let calculation_type = inputs
            .get_str("calculationType")
            .unwrap_or("find-missing-side");
        match calculation_type {
            "find-missing-side" => Ok(SimilarTrianglesInput::FindMissingSide {
                side_a: side(inputs, SIDE_A)?,
                side_b: side(inputs, SIDE_B)?,
                side_c: side(inputs, SIDE_C)?,
                side_d: side(inputs, SIDE_D)?,
                side_e: side(inputs, SIDE_E)?,
            }),
            "find-scale-factor" => Ok(SimilarTrianglesInput::FindScaleFactor {
                side_a: side(inputs, SIDE_A)?,
                side_d: side(inputs, SIDE_D)?,
                check_pair: side_opt(inputs, SIDE_B).zip(side_opt(inputs, SIDE_E)),
            }),
            "verify-similarity" => Ok(SimilarTrianglesInput::VerifySimilarity {
                triangle1: [
                    side(inputs, SIDE_A)?,
                    side(inputs, SIDE_B)?,
                    side(inputs, SIDE_C)?,
                ],
                triangle2: [
                    side(inputs, SIDE_D)?,
                    side(inputs, SIDE_E)?,
                    side(inputs, SIDE_F)?,
                ],
            }),
            other => Err(CalcError::invalid_input(
                "calculationType",
                other,
                "must be one of: find-missing-side, find-scale-factor, verify-similarity",
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarTrianglesResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_side: Option<f64>,
    pub scale_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proportion: Option<String>,
    pub similarity_status: String,
    /// 1 when similar, 0 when not
    pub result: u8,
    pub is_similar: bool,
}

pub fn calculate(input: &SimilarTrianglesInput) -> CalcResult<SimilarTrianglesResult> {
    match *input {
        SimilarTrianglesInput::FindMissingSide {
            side_a,
            side_b,
            side_c,
            side_d,
            side_e,
        } => {
            let scale = side_d / side_a;
            if (side_e / side_b - scale).abs() > MISSING_SIDE_TOLERANCE {
                return Err(CalcError::domain(
                    "similar-triangles",
                    "Triangles are not similar: corresponding side ratios do not match",
                ));
            }
            let missing = round_to_precision(side_c * scale, GEOMETRY_PRECISION);
            Ok(SimilarTrianglesResult {
                missing_side: Some(missing),
                scale_factor: Some(round_to_precision(scale, GEOMETRY_PRECISION)),
                proportion: Some(format!(
                    "{}:{} = {}:{} = {}:{}",
                    format_number(side_a),
                    format_number(side_d),
                    format_number(side_b),
                    format_number(side_e),
                    format_number(side_c),
                    format_number(missing)
                )),
                similarity_status: "similar".to_string(),
                result: 1,
                is_similar: true,
            })
        }
        SimilarTrianglesInput::FindScaleFactor {
            side_a,
            side_d,
            check_pair,
        } => {
            let scale = side_d / side_a;
            let consistent = match check_pair {
                Some((side_b, side_e)) => (side_e / side_b - scale).abs() <= SIMILARITY_TOLERANCE,
                None => true,
            };
            let status = if consistent { "similar" } else { "not similar" };
            Ok(SimilarTrianglesResult {
                missing_side: None,
                scale_factor: Some(round_to_precision(scale, GEOMETRY_PRECISION)),
                proportion: Some(format!(
                    "{}:{}",
                    format_number(side_a),
                    format_number(side_d)
                )),
                similarity_status: status.to_string(),
                result: consistent as u8,
                is_similar: consistent,
            })
        }
        SimilarTrianglesInput::VerifySimilarity {
            triangle1,
            triangle2,
        } => {
            let ratios = [
                triangle2[0] / triangle1[0],
                triangle2[1] / triangle1[1],
                triangle2[2] / triangle1[2],
            ];
            let min = ratios.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = ratios.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let similar = max - min <= SIMILARITY_TOLERANCE;
            Ok(SimilarTrianglesResult {
                missing_side: None,
                scale_factor: if similar {
                    Some(round_to_precision(ratios[0], GEOMETRY_PRECISION))
                } else {
                    None
                },
                proportion: None,
                similarity_status: if similar { "similar" } else { "not similar" }.to_string(),
                result: similar as u8,
                is_similar: similar,
            })
        }
    }
}

pub struct SimilarTrianglesCalculator;

impl Calculator for SimilarTrianglesCalculator {
    fn key(&self) -> &'static str {
        "SIMILAR_TRIANGLES_CALCULATOR"
    }

    fn name(&self) -> &'static str {
        "Similar Triangles Calculator"
    }

    fn calculate(&self, inputs: &FlatInputs) -> CalcResult<ValueMap> {
        let input = SimilarTrianglesInput::from_inputs(inputs)?;
        to_outputs(&calculate(&input)?)
    }
}
