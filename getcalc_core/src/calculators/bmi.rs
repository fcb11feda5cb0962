//! # BMI Calculation
//!
//! Body mass index from weight and height, with the WHO category bands.
//! Inputs are expected in standard units (kilograms, meters); the
//! execution pipeline converts unit-tagged requests before dispatch.

use serde::Serialize;

use crate::calculators::to_outputs;
use crate::errors::{CalcError, CalcResult};
use crate::format::{format_number, round_to_precision};
use crate::inputs::{FlatInputs, ValueMap};
use crate::registry::Calculator;

#[derive(Debug, Clone)]
pub struct BmiInput {
    /// Weight in kilograms
    pub weight: f64,
    /// Height in meters
    pub height: f64,
}

impl BmiInput {
    pub fn from_inputs(inputs: &FlatInputs) -> CalcResult<Self> {
        Ok(Self {
            weight: inputs.require_f64("weight")?,
            height: inputs.require_f64("height")?,
        })
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.weight <= 0.0 {
            return Err(CalcError::invalid_input(
                "weight",
                self.weight.to_string(),
                "Weight must be positive",
            ));
        }
        if self.height <= 0.0 {
            return Err(CalcError::invalid_input(
                "height",
                self.height.to_string(),
                "Height must be positive",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiResult {
    pub weight: f64,
    pub height: f64,
    pub bmi: f64,
    pub category: String,
    pub formula: String,
    pub calculation: String,
}

fn category(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Normal weight"
    } else if bmi < 30.0 {
        "Overweight"
    } else {
        "Obese"
    }
}

pub fn calculate(input: &BmiInput) -> CalcResult<BmiResult> {
    input.validate()?;

    let bmi = round_to_precision(input.weight / (input.height * input.height), 1);

    Ok(BmiResult {
        weight: input.weight,
        height: input.height,
        bmi,
        category: category(bmi).to_string(),
        formula: "BMI = weight / height²".to_string(),
        calculation: format!(
            "BMI = {} / {}² = {}",
            format_number(input.weight),
            format_number(input.height),
            format_number(bmi)
        ),
    })
}

pub struct BmiCalculator;

impl Calculator for BmiCalculator {
    fn key(&self) -> &'static str {
        "BMI_CALCULATOR"
    }

    fn name(&self) -> &'static str {
        "BMI Calculator"
    }

    fn calculate(&self, inputs: &FlatInputs) -> CalcResult<ValueMap> {
        let input = BmiInput::from_inputs(inputs)?;
        to_outputs(&calculate(&input)?)
    }
}
