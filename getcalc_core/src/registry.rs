//! # Calculator Registry
//!
//! Maps a logic key (e.g. `MIDPOINT`) to a strategy implementing the
//! [`Calculator`] trait. The key decouples the manifest's
//! `calculationLogic` binding from the concrete implementation.
//!
//! All built-in strategies are registered eagerly at construction through
//! one uniform interface; the registry is immutable after setup and shared
//! read-only across requests.
//!
//! ## Usage
//!
//! ```rust
//! use getcalc_core::registry::CalculatorRegistry;
//!
//! let registry = CalculatorRegistry::with_builtins();
//! assert!(registry.has_calculator("MIDPOINT"));
//! assert!(registry.get("NOT_A_CALCULATOR").is_err());
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::calculators;
use crate::errors::{CalcError, CalcResult};
use crate::inputs::{FlatInputs, ValueMap};

/// A single calculator strategy: a pure, synchronous computation over
/// canonical flat inputs.
pub trait Calculator: Send + Sync {
    /// Logic key this strategy registers under (UPPER_SNAKE_CASE).
    fn key(&self) -> &'static str;

    /// Human-readable name used in result metadata.
    fn name(&self) -> &'static str;

    /// Compute named outputs from validated, shape-normalized inputs.
    fn calculate(&self, inputs: &FlatInputs) -> CalcResult<ValueMap>;
}

/// Adapter for manually registered closures, the fallback path for
/// strategies that are not part of the built-in set.
struct FnCalculator {
    key: &'static str,
    name: &'static str,
    func: Box<dyn Fn(&FlatInputs) -> CalcResult<ValueMap> + Send + Sync>,
}

impl Calculator for FnCalculator {
    fn key(&self) -> &'static str {
        self.key
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn calculate(&self, inputs: &FlatInputs) -> CalcResult<ValueMap> {
        (self.func)(inputs)
    }
}

/// Registry of calculator strategies keyed by logic key.
#[derive(Default)]
pub struct CalculatorRegistry {
    entries: HashMap<String, Arc<dyn Calculator>>,
}

impl CalculatorRegistry {
    /// Empty registry (useful for tests and custom deployments).
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry populated with every built-in strategy.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for calculator in calculators::builtins() {
            registry.register(calculator);
        }
        tracing::info!(
            calculators = registry.entries.len(),
            "calculator registry initialized"
        );
        registry
    }

    /// Register a strategy under its own key. Last registration for a key
    /// wins, so explicit registrations can override built-ins.
    pub fn register(&mut self, calculator: Arc<dyn Calculator>) {
        let key = calculator.key().to_string();
        if self.entries.insert(key.clone(), calculator).is_some() {
            tracing::debug!(key = %key, "replaced existing calculator registration");
        } else {
            tracing::debug!(key = %key, "registered calculator");
        }
    }

    /// Manually register a bare function as a strategy.
    pub fn register_fn<F>(&mut self, key: &'static str, name: &'static str, func: F)
    where
        F: Fn(&FlatInputs) -> CalcResult<ValueMap> + Send + Sync + 'static,
    {
        self.register(Arc::new(FnCalculator {
            key,
            name,
            func: Box::new(func),
        }));
    }

    /// True if a strategy is registered under the key.
    pub fn has_calculator(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All registered logic keys, sorted.
    pub fn available_calculators(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Resolve a logic key to its strategy. An unknown key is a hard error
    /// ("tool unavailable"), never silently substituted.
    pub fn get(&self, key: &str) -> CalcResult<&Arc<dyn Calculator>> {
        self.entries
            .get(key)
            .ok_or_else(|| CalcError::calculator_not_found(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtins_are_registered() {
        let registry = CalculatorRegistry::with_builtins();
        for key in [
            "SIMPLE_INTEREST",
            "MORTGAGE_CALCULATOR",
            "MIDPOINT",
            "SLOPE_CALCULATOR",
            "LENGTH_OF_A_LINE_SEGMENT",
            "PARABOLA_CALCULATOR",
            "PERIMETER_CALCULATOR",
            "VOLUME_CALCULATOR",
            "SIMILAR_TRIANGLES_CALCULATOR",
            "STANDARD_FORM_TO_SLOPE_INTERCEPT",
            "DECIMAL_TO_PERCENT",
            "BMI_CALCULATOR",
        ] {
            assert!(registry.has_calculator(key), "missing {}", key);
        }
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let registry = CalculatorRegistry::with_builtins();
        let result = registry.get("NOT_A_CALCULATOR");
        assert!(matches!(result, Err(CalcError::CalculatorNotFound { .. })));
    }

    #[test]
    fn test_has_calculator_matches_available() {
        let registry = CalculatorRegistry::with_builtins();
        for key in registry.available_calculators() {
            assert!(registry.has_calculator(key));
        }
        assert!(!registry
            .available_calculators()
            .contains(&"NOT_A_CALCULATOR"));
    }

    #[test]
    fn test_manual_registration_wins() {
        let mut registry = CalculatorRegistry::with_builtins();
        registry.register_fn("MIDPOINT", "Stub Midpoint", |_inputs| {
            let mut outputs = ValueMap::new();
            outputs.insert("stub".to_string(), json!(true));
            Ok(outputs)
        });

        let calculator = registry.get("MIDPOINT").unwrap();
        assert_eq!(calculator.name(), "Stub Midpoint");
        let outputs = calculator.calculate(&FlatInputs::new()).unwrap();
        assert_eq!(outputs.get("stub"), Some(&json!(true)));
    }

    #[test]
    fn test_available_is_sorted() {
        let registry = CalculatorRegistry::with_builtins();
        let keys = registry.available_calculators();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }
}
