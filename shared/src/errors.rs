//! Error types for the BMI calculator

use thiserror::Error;

/// Errors surfaced by the calculation engine and the form controller.
///
/// None of these are fatal: the caller clears the displayed result,
/// shows the matching notification and lets the user retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BmiError {
    /// Height or weight missing, zero, negative or not a number
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The engine produced a non-finite value from validated input
    #[error("Calculation error: {0}")]
    CalculationError(String),

    /// A configuration document could not be parsed or is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BmiError {
    /// Stable machine-readable code, used across the WASM boundary
    pub fn code(&self) -> &'static str {
        match self {
            BmiError::InvalidInput(_) => "INVALID_INPUT",
            BmiError::CalculationError(_) => "CALCULATION_ERROR",
            BmiError::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }
}

impl From<serde_json::Error> for BmiError {
    fn from(err: serde_json::Error) -> Self {
        BmiError::InvalidConfig(err.to_string())
    }
}
