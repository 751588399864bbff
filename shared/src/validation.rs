//! Input validation and form clamping
//!
//! The engine only requires positive, finite values. Per-field ranges are
//! advisory UI limits applied by clamping while the user types, never by
//! rejecting a calculation.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::BmiError;
use crate::units::Measurement;

/// Validate a height value (any unit)
pub fn validate_height(height: f64) -> Result<(), BmiError> {
    validate_positive("Height", height)
}

/// Validate a weight value (any unit)
pub fn validate_weight(weight: f64) -> Result<(), BmiError> {
    validate_positive("Weight", weight)
}

/// Validate both sides of a measurement before calculating
pub fn validate_measurement(measurement: &Measurement) -> Result<(), BmiError> {
    let result = validate_height(measurement.height).and_then(|_| validate_weight(measurement.weight));
    if let Err(ref err) = result {
        warn!(system = %measurement.system, error = %err, "Rejected measurement");
    }
    result
}

fn validate_positive(field: &str, value: f64) -> Result<(), BmiError> {
    if value.is_nan() || value.is_infinite() {
        return Err(BmiError::InvalidInput(format!("{} must be a valid number", field)));
    }
    if value <= 0.0 {
        return Err(BmiError::InvalidInput(format!("{} must be greater than zero", field)));
    }
    Ok(())
}

// ============================================================================
// Field Limits
// ============================================================================

/// Advisory range for a single form field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldLimit {
    pub min: f64,
    pub max: f64,
}

impl FieldLimit {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Clamp a raw field entry the way the form does while typing
///
/// Zero or non-numeric entries clear the field (`None`). Entries above
/// the maximum are pulled down to it. Anything else is kept as typed,
/// including negatives, so that validation can report them.
pub fn clamp_field(value: f64, limit: &FieldLimit) -> Option<f64> {
    if !value.is_finite() || value == 0.0 {
        return None;
    }
    Some(value.min(limit.max))
}
