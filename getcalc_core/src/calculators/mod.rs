//! # Calculator Strategies
//!
//! One module per calculator. Each module exposes a typed input struct with
//! a `validate()` method, a pure `calculate` function, and a unit struct
//! implementing [`Calculator`] that adapts flat request inputs to the typed
//! form. The pure functions are the tested surface; the trait impls are
//! thin extraction shims.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::errors::{CalcError, CalcResult};
use crate::inputs::ValueMap;
use crate::registry::Calculator;

pub mod bmi;
pub mod decimal_to_percent;
pub mod line_segment;
pub mod midpoint;
pub mod mortgage;
pub mod parabola;
pub mod perimeter;
pub mod similar_triangles;
pub mod simple_interest;
pub mod slope;
pub mod standard_form;
pub mod volume;

/// Every built-in strategy, in registration order.
pub fn builtins() -> Vec<Arc<dyn Calculator>> {
    vec![
        Arc::new(simple_interest::SimpleInterestCalculator),
        Arc::new(mortgage::MortgageCalculator),
        Arc::new(midpoint::MidpointCalculator),
        Arc::new(slope::SlopeCalculator),
        Arc::new(line_segment::LineSegmentCalculator),
        Arc::new(parabola::ParabolaCalculator),
        Arc::new(perimeter::PerimeterCalculator),
        Arc::new(volume::VolumeCalculator),
        Arc::new(similar_triangles::SimilarTrianglesCalculator),
        Arc::new(standard_form::StandardFormCalculator),
        Arc::new(decimal_to_percent::DecimalToPercentCalculator),
        Arc::new(bmi::BmiCalculator),
    ]
}

/// Serialize a typed result struct into the named-output map the pipeline
/// expects.
pub(crate) fn to_outputs<T: Serialize>(result: &T) -> CalcResult<ValueMap> {
    match serde_json::to_value(result) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(CalcError::Internal {
            message: "calculator result did not serialize to an object".to_string(),
        }),
        Err(err) => Err(CalcError::SerializationError {
            reason: err.to_string(),
        }),
    }
}
