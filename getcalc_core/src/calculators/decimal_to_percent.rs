//! # Decimal to Percent Conversion

use serde::Serialize;

use crate::calculators::to_outputs;
use crate::errors::CalcResult;
use crate::format::{format_number, round_to_precision, GEOMETRY_PRECISION};
use crate::inputs::{FlatInputs, ValueMap};
use crate::registry::Calculator;

#[derive(Debug, Clone)]
pub struct DecimalToPercentInput {
    pub decimal: f64,
}

impl DecimalToPercentInput {
    pub fn from_inputs(inputs: &FlatInputs) -> CalcResult<Self> {
        Ok(Self {
            decimal: inputs.require_f64("decimal")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecimalToPercentResult {
    pub decimal: f64,
    pub percent: f64,
    pub formula: String,
    pub calculation: String,
}

pub fn calculate(input: &DecimalToPercentInput) -> CalcResult<DecimalToPercentResult> {
    let percent = round_to_precision(input.decimal * 100.0, GEOMETRY_PRECISION);

    Ok(DecimalToPercentResult {
        decimal: input.decimal,
        percent,
        formula: "percent = decimal × 100".to_string(),
        calculation: format!(
            "{} × 100 = {}%",
            format_number(input.decimal),
            format_number(percent)
        ),
    })
}

pub struct DecimalToPercentCalculator;

impl Calculator for DecimalToPercentCalculator {
    fn key(&self) -> &'static str {
        "DECIMAL_TO_PERCENT"
    }

    fn name(&self) -> &'static str {
        "Decimal to Percent Calculator"
    }

    fn calculate(&self, inputs: &FlatInputs) -> CalcResult<ValueMap> {
        let input = DecimalToPercentInput::from_inputs(inputs)?;
        to_outputs(&calculate(&input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter() {
        let result = calculate(&DecimalToPercentInput { decimal: 0.25 }).unwrap();
        assert_eq!(result.percent, 25.0);
        assert_eq!(result.calculation, "0.25 × 100 = 25%");
    }

    #[test]
    fn test_negative_and_above_one() {
        assert_eq!(
            calculate(&DecimalToPercentInput { decimal: -0.5 })
                .unwrap()
                .percent,
            -50.0
        );
        assert_eq!(
            calculate(&DecimalToPercentInput { decimal: 1.5 })
                .unwrap()
                .percent,
            150.0
        );
    }

    #[test]
    fn test_repeating_decimal_rounds() {
        let result = calculate(&DecimalToPercentInput {
            decimal: 1.0 / 3.0,
        })
        .unwrap();
        assert!((result.percent - 33.333333).abs() < 1e-6);
    }

    #[test]
    fn test_missing_decimal_rejected() {
        assert!(DecimalToPercentCalculator
            .calculate(&FlatInputs::new())
            .is_err());
    }
}
