//! BMI Calculator Shared Library
//!
//! This crate contains the BMI calculation engine, unit handling, the
//! form controller and display types used by the WASM front end.

pub mod bmi;
pub mod config;
pub mod errors;
pub mod form;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use bmi::*;
pub use config::{CalculatorConfig, InputLimits};
pub use errors::*;
pub use form::BmiForm;
pub use types::*;
pub use units::*;
pub use validation::FieldLimit;
