//! Calculator configuration
//!
//! Configuration is layered:
//! 1. Default values (in code)
//! 2. A JSON document supplied by the host page, overriding any subset of
//!    fields

use serde::{Deserialize, Serialize};

use crate::errors::BmiError;
use crate::units::UnitSystem;
use crate::validation::FieldLimit;

/// Calculator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub limits: InputLimits,
    /// When false, reports carry no milestones
    pub show_milestones: bool,
    /// Unit system selected when the form is created
    pub default_system: UnitSystem,
}

/// Advisory limits for each form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    pub height_cm: FieldLimit,
    pub weight_kg: FieldLimit,
    pub height_feet: FieldLimit,
    pub height_inches: FieldLimit,
    pub weight_lbs: FieldLimit,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            height_cm: FieldLimit::new(1.0, 300.0),
            weight_kg: FieldLimit::new(1.0, 650.0),
            height_feet: FieldLimit::new(1.0, 10.0),
            height_inches: FieldLimit::new(0.0, 11.0),
            weight_lbs: FieldLimit::new(1.0, 1400.0),
        }
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            limits: InputLimits::default(),
            show_milestones: true,
            default_system: UnitSystem::Metric,
        }
    }
}

impl InputLimits {
    fn fields(&self) -> [(&'static str, &FieldLimit); 5] {
        [
            ("height_cm", &self.height_cm),
            ("weight_kg", &self.weight_kg),
            ("height_feet", &self.height_feet),
            ("height_inches", &self.height_inches),
            ("weight_lbs", &self.weight_lbs),
        ]
    }
}

impl CalculatorConfig {
    /// Parse a JSON override document on top of the defaults and validate it
    pub fn from_json(json: &str) -> Result<Self, BmiError> {
        let config: CalculatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field limit is finite, ordered and has a positive maximum
    pub fn validate(&self) -> Result<(), BmiError> {
        for (name, limit) in self.limits.fields() {
            if !limit.min.is_finite() || !limit.max.is_finite() {
                return Err(BmiError::InvalidConfig(format!("{} limits must be finite", name)));
            }
            if limit.min > limit.max {
                return Err(BmiError::InvalidConfig(format!(
                    "{} minimum {} exceeds maximum {}",
                    name, limit.min, limit.max
                )));
            }
            if limit.max <= 0.0 {
                return Err(BmiError::InvalidConfig(format!("{} maximum must be positive", name)));
            }
        }
        Ok(())
    }
}
