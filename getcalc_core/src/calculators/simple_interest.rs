//! # Simple Interest Calculation
//!
//! Computes interest earned on a principal with the classic
//! `I = P × R × T / 100` formula. Time can be entered in years, months,
//! weeks, or days and is converted to years before the formula runs.

use serde::{Deserialize, Serialize};

use crate::calculators::to_outputs;
use crate::errors::{CalcError, CalcResult};
use crate::format::{format_number, round_to_precision};
use crate::inputs::{FlatInputs, ValueMap};
use crate::registry::Calculator;

/// Time unit for the loan period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Years,
    Months,
    Weeks,
    Days,
}

impl TimeUnit {
    fn parse(raw: &str) -> CalcResult<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "years" | "year" => Ok(TimeUnit::Years),
            "months" | "month" => Ok(TimeUnit::Months),
            "weeks" | "week" => Ok(TimeUnit::Weeks),
            "days" | "day" => Ok(TimeUnit::Days),
            other => Err(CalcError::invalid_input(
                "timeUnit",
                other,
                "must be one of: years, months, weeks, days",
            )),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            TimeUnit::Years => "years",
            TimeUnit::Months => "months",
            TimeUnit::Weeks => "weeks",
            TimeUnit::Days => "days",
        }
    }

    /// Convert a duration in this unit to years.
    fn to_years(&self, time: f64) -> f64 {
        match self {
            TimeUnit::Years => time,
            TimeUnit::Months => time / 12.0,
            TimeUnit::Weeks => time / 52.0,
            TimeUnit::Days => time / 365.25,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimpleInterestInput {
    pub principal: f64,
    /// Annual rate as a percentage (5 means 5%)
    pub rate: f64,
    pub time: f64,
    pub time_unit: TimeUnit,
}

impl SimpleInterestInput {
    pub fn from_inputs(inputs: &FlatInputs) -> CalcResult<Self> {
        let time_unit = match inputs.get_str("timeUnit") {
            Some(raw) => TimeUnit::parse(raw)?,
            None => TimeUnit::Years,
        };
        Ok(Self {
            principal: inputs.require_f64("principal")?,
            rate: inputs.require_f64("rate")?,
            time: inputs.require_f64("time")?,
            time_unit,
        })
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.principal <= 0.0 {
            return Err(CalcError::invalid_input(
                "principal",
                self.principal.to_string(),
                "Principal must be positive",
            ));
        }
        if self.rate < 0.0 {
            return Err(CalcError::invalid_input(
                "rate",
                self.rate.to_string(),
                "Rate cannot be negative",
            ));
        }
        if self.time <= 0.0 {
            return Err(CalcError::invalid_input(
                "time",
                self.time.to_string(),
                "Time must be positive",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleInterestResult {
    pub principal: f64,
    pub rate: f64,
    pub time: f64,
    pub time_unit: String,
    pub time_in_years: f64,
    pub interest: f64,
    pub total_amount: f64,
    pub formula: String,
    pub calculation: String,
    pub total_calculation: String,
}

pub fn calculate(input: &SimpleInterestInput) -> CalcResult<SimpleInterestResult> {
    input.validate()?;

    let time_in_years = input.time_unit.to_years(input.time);
    let interest = round_to_precision(input.principal * input.rate * time_in_years / 100.0, 2);
    let total_amount = round_to_precision(input.principal + interest, 2);

    Ok(SimpleInterestResult {
        principal: input.principal,
        rate: input.rate,
        time: input.time,
        time_unit: input.time_unit.label().to_string(),
        time_in_years: round_to_precision(time_in_years, 6),
        interest,
        total_amount,
        formula: "I = P × R × T / 100".to_string(),
        calculation: format!(
            "I = {} × {} × {} / 100 = {}",
            format_number(input.principal),
            format_number(input.rate),
            format_number(round_to_precision(time_in_years, 6)),
            format_number(interest)
        ),
        total_calculation: format!(
            "{} + {} = {}",
            format_number(input.principal),
            format_number(interest),
            format_number(total_amount)
        ),
    })
}

pub struct SimpleInterestCalculator;

impl Calculator for SimpleInterestCalculator {
    fn key(&self) -> &'static str {
        "SIMPLE_INTEREST"
    }

    fn name(&self) -> &'static str {
        "Simple Interest Calculator"
    }

    fn calculate(&self, inputs: &FlatInputs) -> CalcResult<ValueMap> {
        let input = SimpleInterestInput::from_inputs(inputs)?;
        to_outputs(&calculate(&input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(principal: f64, rate: f64, time: f64, time_unit: TimeUnit) -> SimpleInterestInput {
        SimpleInterestInput {
            principal,
            rate,
            time,
            time_unit,
        }
    }

    #[test]
    fn test_interest_in_years() {
        let result = calculate(&input(1000.0, 5.0, 2.0, TimeUnit::Years)).unwrap();
        assert!((result.interest - 100.0).abs() < 1e-9);
        assert!((result.total_amount - 1100.0).abs() < 1e-9);
        assert_eq!(result.time_unit, "years");
    }

    #[test]
    fn test_months_convert_to_years() {
        let result = calculate(&input(1200.0, 10.0, 6.0, TimeUnit::Months)).unwrap();
        assert!((result.time_in_years - 0.5).abs() < 1e-9);
        assert!((result.interest - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_days_use_solar_year() {
        let result = calculate(&input(1000.0, 5.0, 365.25, TimeUnit::Days)).unwrap();
        assert!((result.time_in_years - 1.0).abs() < 1e-9);
        assert!((result.interest - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_rate_earns_nothing() {
        let result = calculate(&input(1000.0, 0.0, 3.0, TimeUnit::Years)).unwrap();
        assert_eq!(result.interest, 0.0);
        assert_eq!(result.total_amount, 1000.0);
    }

    #[test]
    fn test_nonpositive_principal_rejected() {
        assert!(calculate(&input(0.0, 5.0, 1.0, TimeUnit::Years)).is_err());
        assert!(calculate(&input(-100.0, 5.0, 1.0, TimeUnit::Years)).is_err());
    }

    #[test]
    fn test_flat_extraction_with_string_numbers() {
        use serde_json::json;

        let mut inputs = FlatInputs::new();
        inputs.insert("principal", json!("1000"));
        inputs.insert("rate", json!("5"));
        inputs.insert("time", json!(2));
        inputs.insert("timeUnit", json!("years"));

        let outputs = SimpleInterestCalculator.calculate(&inputs).unwrap();
        assert_eq!(outputs["interest"], json!(100.0));
        assert_eq!(outputs["formula"], json!("I = P × R × T / 100"));
    }

    #[test]
    fn test_bad_time_unit_rejected() {
        let mut inputs = FlatInputs::new();
        inputs.insert("principal", serde_json::json!(1000));
        inputs.insert("rate", serde_json::json!(5));
        inputs.insert("time", serde_json::json!(2));
        inputs.insert("timeUnit", serde_json::json!("fortnights"));
        assert!(SimpleInterestCalculator.calculate(&inputs).is_err());
    }
}
