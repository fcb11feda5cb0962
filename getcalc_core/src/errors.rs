//! # Error Types
//!
//! Structured error types for getcalc_core. Every variant carries enough
//! context for a caller (or a UI layer) to explain the failure without
//! parsing message strings.
//!
//! Two families matter to callers:
//!
//! - Registry resolution errors ([`CalcError::CalculatorNotFound`]) are
//!   fatal to the request and surface as `Err` from the engine.
//! - Everything else (validation, domain constraints, unit lookups,
//!   calculation failures) is captured by the execution pipeline and
//!   converted into an error-shaped [`Outcome`](crate::pipeline::Outcome).
//!
//! ## Example
//!
//! ```rust
//! use getcalc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_radius(radius: f64) -> CalcResult<()> {
//!     if radius <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "radius",
//!             radius.to_string(),
//!             "Radius must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for getcalc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// `DomainConstraint` messages render verbatim because they are part of the
/// observable contract (e.g. the triangle-inequality message shown to users).
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A documented edge-case policy rejected the inputs
    /// (degenerate triangle, vertical line, a = 0 parabola, ...)
    #[error("{reason}")]
    DomainConstraint { calculator: String, reason: String },

    /// No strategy registered under the requested logic key
    #[error("Calculator not found: {key}")]
    CalculatorNotFound { key: String },

    /// A unit is absent from its category's conversion table
    #[error("Unknown unit '{unit}' in category '{category}'")]
    UnknownUnit { unit: String, category: String },

    /// Calculation failed for a reason not covered by a specific variant
    #[error("Calculation failed: {calculator} - {reason}")]
    CalculationFailed { calculator: String, reason: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a DomainConstraint error
    pub fn domain(calculator: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DomainConstraint {
            calculator: calculator.into(),
            reason: reason.into(),
        }
    }

    /// Create a CalculatorNotFound error
    pub fn calculator_not_found(key: impl Into<String>) -> Self {
        CalcError::CalculatorNotFound { key: key.into() }
    }

    /// Create an UnknownUnit error
    pub fn unknown_unit(unit: impl Into<String>, category: impl Into<String>) -> Self {
        CalcError::UnknownUnit {
            unit: unit.into(),
            category: category.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(
        calculator: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::CalculationFailed {
            calculator: calculator.into(),
            reason: reason.into(),
        }
    }

    /// True for errors the pipeline converts into an error-shaped result.
    /// Registry misses stay fatal and must not be absorbed.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, CalcError::CalculatorNotFound { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::DomainConstraint { .. } => "DOMAIN_CONSTRAINT",
            CalcError::CalculatorNotFound { .. } => "CALCULATOR_NOT_FOUND",
            CalcError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
