//! # Calculation Engine
//!
//! Top-level entry point tying registry, pipeline, and strategies
//! together. One engine instance serves all requests; it holds the
//! immutable registry and nothing else.
//!
//! Two failure channels, deliberately distinct: an unknown logic key (or a
//! malformed payload) is a `CalcResult` error, because the caller asked for
//! a tool that does not exist; everything after dispatch resolves to an
//! [`Outcome`], so a bad input never takes the server down with it.
//!
//! ## Usage
//!
//! ```rust
//! use getcalc_core::engine::CalculationEngine;
//! use serde_json::json;
//!
//! let engine = CalculationEngine::new();
//! let outcome = engine
//!     .calculate("MIDPOINT", json!({"x1": 0, "y1": 0, "x2": 4, "y2": 6}))
//!     .unwrap();
//! assert_eq!(outcome.get_f64("midpointX"), Some(2.0));
//! ```

use serde_json::Value;

use crate::errors::CalcResult;
use crate::inputs::InputPayload;
use crate::manifest::Manifest;
use crate::pipeline::{Execution, Outcome};
use crate::registry::CalculatorRegistry;

pub struct CalculationEngine {
    registry: CalculatorRegistry,
}

impl Default for CalculationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculationEngine {
    /// Engine with the built-in calculator set.
    pub fn new() -> Self {
        Self {
            registry: CalculatorRegistry::with_builtins(),
        }
    }

    /// Engine over a caller-assembled registry.
    pub fn with_registry(registry: CalculatorRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CalculatorRegistry {
        &self.registry
    }

    /// Run a calculation without manifest-driven validation. Strategies
    /// still enforce their own domain checks.
    pub fn calculate(&self, key: &str, inputs: Value) -> CalcResult<Outcome> {
        let calculator = self.registry.get(key)?;
        let payload = InputPayload::from_value(inputs)?;
        Ok(Execution::new(calculator.as_ref(), &payload, None).run())
    }

    /// Run the full manifest-driven workflow: validation, unit
    /// normalization, calculation, and output formatting.
    pub fn calculate_with_manifest(&self, manifest: &Manifest, inputs: Value) -> CalcResult<Outcome> {
        let calculator = self.registry.get(&manifest.calculation_logic)?;
        let payload = InputPayload::from_value(inputs)?;
        Ok(Execution::new(calculator.as_ref(), &payload, Some(manifest)).run())
    }
}
