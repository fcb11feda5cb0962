//! # getcalc_core - Calculator Catalog Calculation Engine
//!
//! `getcalc_core` is the computational heart of getcalculation, executing
//! the calculator strategies behind the tool catalog. All inputs and
//! outputs are JSON-serializable, so the engine drops straight behind an
//! HTTP handler or a CLI without an adapter layer.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure strategies that take inputs and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Never Panic on Input**: Bad requests become error-shaped outcomes
//!
//! ## Quick Start
//!
//! ```rust
//! use getcalc_core::engine::CalculationEngine;
//! use serde_json::json;
//!
//! let engine = CalculationEngine::new();
//! let outcome = engine
//!     .calculate("DECIMAL_TO_PERCENT", json!({"decimal": 0.25}))
//!     .unwrap();
//! assert_eq!(outcome.get_f64("percent"), Some(25.0));
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - Top-level entry point for running calculations
//! - [`registry`] - Logic-key to strategy mapping
//! - [`pipeline`] - Validate / normalize / calculate / format workflow
//! - [`calculators`] - The calculator strategies themselves
//! - [`manifest`] - Tool manifest schema and validation
//! - [`units`] - Unit tables and conversion
//! - [`inputs`] - Request payload shapes
//! - [`format`] - Numeric rounding and display formatting
//! - [`errors`] - Structured error types

pub mod calculators;
pub mod engine;
pub mod errors;
pub mod format;
pub mod inputs;
pub mod manifest;
pub mod pipeline;
pub mod registry;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use engine::CalculationEngine;
pub use errors::{CalcError, CalcResult};
pub use inputs::{FlatInputs, InputPayload};
pub use manifest::Manifest;
pub use pipeline::Outcome;
pub use registry::{Calculator, CalculatorRegistry};
