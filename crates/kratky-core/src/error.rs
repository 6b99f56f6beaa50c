//! Error types for model registration and evaluation.

use thiserror::Error;

/// A specialized Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur registering or evaluating models.
#[derive(Error, Debug, Clone)]
pub enum ModelError {
    /// Requested model is not in the registry.
    #[error("Unknown model: {name}")]
    UnknownModel {
        /// The requested model name.
        name: String,
    },

    /// A model name was registered twice.
    #[error("Duplicate model registration: {name}")]
    DuplicateModel {
        /// The colliding model name.
        name: String,
    },

    /// Parameter name does not appear in the model's table.
    #[error("Model '{model}' has no parameter '{name}'")]
    UnknownParameter {
        /// The model being bound.
        model: String,
        /// The unknown parameter name.
        name: String,
    },

    /// A bound parameter value lies outside its declared range.
    #[error("Parameter '{name}' = {value} outside [{lower}, {upper}]")]
    OutOfBounds {
        /// Parameter name.
        name: String,
        /// The offending value.
        value: f64,
        /// Declared lower bound.
        lower: f64,
        /// Declared upper bound.
        upper: f64,
    },

    /// A parameter table violates its own invariants.
    #[error("Invalid parameter table for '{model}': {reason}")]
    InvalidTable {
        /// The model whose table is invalid.
        model: String,
        /// Description of the violation.
        reason: String,
    },

    /// The model does not define an oriented (2-D) kernel.
    #[error("Model '{model}' has no 2-D kernel")]
    NoOrientedKernel {
        /// The model name.
        model: String,
    },
}

impl ModelError {
    /// Creates an unknown-model error.
    #[must_use]
    pub fn unknown_model(name: impl Into<String>) -> Self {
        Self::UnknownModel { name: name.into() }
    }

    /// Creates an unknown-parameter error.
    #[must_use]
    pub fn unknown_parameter(model: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownParameter {
            model: model.into(),
            name: name.into(),
        }
    }

    /// Creates an invalid-table error.
    #[must_use]
    pub fn invalid_table(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTable {
            model: model.into(),
            reason: reason.into(),
        }
    }
}
