//! # Mortgage Payment Calculation
//!
//! Standard amortization formula over monthly periods:
//!
//! ```text
//! M = P · r(1 + r)^n / ((1 + r)^n − 1)
//! ```
//!
//! where `P` is the financed principal (loan amount minus down payment),
//! `r` the monthly rate, and `n` the number of monthly payments. A 0% rate
//! degenerates to straight division instead of the 0/0 the formula would
//! produce.

use serde::Serialize;

use crate::calculators::to_outputs;
use crate::errors::{CalcError, CalcResult};
use crate::format::round_to_precision;
use crate::inputs::{FlatInputs, ValueMap};
use crate::registry::Calculator;

#[derive(Debug, Clone)]
pub struct MortgageInput {
    pub loan_amount: f64,
    pub down_payment: f64,
    /// Annual rate as a percentage (4.5 means 4.5%)
    pub interest_rate: f64,
    /// Term in years
    pub loan_term: f64,
}

impl MortgageInput {
    pub fn from_inputs(inputs: &FlatInputs) -> CalcResult<Self> {
        Ok(Self {
            loan_amount: inputs.require_f64("loanAmount")?,
            down_payment: inputs.get_f64("downPayment").unwrap_or(0.0),
            interest_rate: inputs.require_f64("interestRate")?,
            loan_term: inputs.require_f64("loanTerm")?,
        })
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.loan_amount <= 0.0 {
            return Err(CalcError::invalid_input(
                "loanAmount",
                self.loan_amount.to_string(),
                "Loan amount must be positive",
            ));
        }
        if self.down_payment < 0.0 {
            return Err(CalcError::invalid_input(
                "downPayment",
                self.down_payment.to_string(),
                "Down payment cannot be negative",
            ));
        }
        if self.interest_rate < 0.0 {
            return Err(CalcError::invalid_input(
                "interestRate",
                self.interest_rate.to_string(),
                "Interest rate cannot be negative",
            ));
        }
        if self.loan_term <= 0.0 {
            return Err(CalcError::invalid_input(
                "loanTerm",
                self.loan_term.to_string(),
                "Loan term must be positive",
            ));
        }
        if self.down_payment >= self.loan_amount {
            return Err(CalcError::domain(
                "mortgage",
                "Down payment cannot be greater than or equal to loan amount.",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageResult {
    pub loan_amount: f64,
    pub down_payment: f64,
    /// Amount actually financed
    pub principal: f64,
    pub interest_rate: f64,
    pub loan_term: f64,
    pub number_of_payments: f64,
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

pub fn calculate(input: &MortgageInput) -> CalcResult<MortgageResult> {
    input.validate()?;

    let principal = input.loan_amount - input.down_payment;
    let monthly_rate = input.interest_rate / 100.0 / 12.0;
    let payments = input.loan_term * 12.0;

    let monthly_payment = if monthly_rate == 0.0 {
        principal / payments
    } else {
        let growth = (1.0 + monthly_rate).powf(payments);
        principal * (monthly_rate * growth) / (growth - 1.0)
    };

    let monthly_payment = round_to_precision(monthly_payment, 2);
    let total_payment = round_to_precision(monthly_payment * payments, 2);
    let total_interest = round_to_precision(total_payment - principal, 2);

    Ok(MortgageResult {
        loan_amount: input.loan_amount,
        down_payment: input.down_payment,
        principal,
        interest_rate: input.interest_rate,
        loan_term: input.loan_term,
        number_of_payments: payments,
        monthly_payment,
        total_payment,
        total_interest,
    })
}

pub struct MortgageCalculator;

impl Calculator for MortgageCalculator {
    fn key(&self) -> &'static str {
        "MORTGAGE_CALCULATOR"
    }

    fn name(&self) -> &'static str {
        "Mortgage Calculator"
    }

    fn calculate(&self, inputs: &FlatInputs) -> CalcResult<ValueMap> {
        let input = MortgageInput::from_inputs(inputs)?;
        to_outputs(&calculate(&input)?)
    }
}
