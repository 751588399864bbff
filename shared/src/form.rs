//! BMI form controller
//!
//! Holds the values currently typed into the calculator form, the active
//! unit-system tab and the last successful result. Rendering is left to
//! the host; this type only decides what there is to render.

use tracing::{debug, info};

use crate::bmi::evaluate;
use crate::config::CalculatorConfig;
use crate::errors::BmiError;
use crate::types::{BmiReport, Notification};
use crate::units::{Measurement, UnitSystem};
use crate::validation::clamp_field;

/// Form state for both unit-system tabs
#[derive(Debug, Clone, Default)]
pub struct BmiForm {
    config: CalculatorConfig,
    system: UnitSystem,
    height_cm: Option<f64>,
    weight_kg: Option<f64>,
    height_feet: Option<f64>,
    height_inches: Option<f64>,
    weight_lbs: Option<f64>,
    result: Option<BmiReport>,
}

impl BmiForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CalculatorConfig) -> Self {
        Self {
            system: config.default_system,
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn system(&self) -> UnitSystem {
        self.system
    }

    /// Switch tabs. Typed values are kept, the shown result is not.
    pub fn set_system(&mut self, system: UnitSystem) {
        if self.system != system {
            debug!(from = %self.system, to = %system, "Switching unit system");
            self.system = system;
            self.result = None;
        }
    }

    // ------------------------------------------------------------------------
    // Field setters (clamped as typed)
    // ------------------------------------------------------------------------

    pub fn set_height_cm(&mut self, value: f64) {
        self.height_cm = clamp_field(value, &self.config.limits.height_cm);
    }

    pub fn set_weight_kg(&mut self, value: f64) {
        self.weight_kg = clamp_field(value, &self.config.limits.weight_kg);
    }

    pub fn set_height_feet(&mut self, value: f64) {
        self.height_feet = clamp_field(value, &self.config.limits.height_feet);
    }

    pub fn set_height_inches(&mut self, value: f64) {
        self.height_inches = clamp_field(value, &self.config.limits.height_inches);
    }

    pub fn set_weight_lbs(&mut self, value: f64) {
        self.weight_lbs = clamp_field(value, &self.config.limits.weight_lbs);
    }

    pub fn height_cm(&self) -> Option<f64> {
        self.height_cm
    }

    pub fn weight_kg(&self) -> Option<f64> {
        self.weight_kg
    }

    pub fn height_feet(&self) -> Option<f64> {
        self.height_feet
    }

    pub fn height_inches(&self) -> Option<f64> {
        self.height_inches
    }

    pub fn weight_lbs(&self) -> Option<f64> {
        self.weight_lbs
    }

    // ------------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------------

    /// Whether every required field of the active tab has a value.
    /// Inches are optional; an empty inches field counts as zero.
    pub fn can_calculate(&self) -> bool {
        match self.system {
            UnitSystem::Metric => self.height_cm.is_some() && self.weight_kg.is_some(),
            UnitSystem::Imperial => self.height_feet.is_some() && self.weight_lbs.is_some(),
        }
    }

    /// Measurement for the active tab, or `InvalidInput` if a required
    /// field is empty
    pub fn measurement(&self) -> Result<Measurement, BmiError> {
        match self.system {
            UnitSystem::Metric => {
                let height = self.height_cm.ok_or_else(|| missing("Height"))?;
                let weight = self.weight_kg.ok_or_else(|| missing("Weight"))?;
                Ok(Measurement::metric(height, weight))
            }
            UnitSystem::Imperial => {
                let feet = self.height_feet.ok_or_else(|| missing("Height (feet)"))?;
                let weight = self.weight_lbs.ok_or_else(|| missing("Weight"))?;
                let inches = self.height_inches.unwrap_or(0.0);
                let min_inches = self.config.limits.height_inches.min;
                if inches < min_inches {
                    return Err(BmiError::InvalidInput(format!(
                        "Height (inches) must be at least {}",
                        min_inches
                    )));
                }
                Ok(Measurement::imperial_feet_inches(feet, inches, weight))
            }
        }
    }

    /// Run the calculation for the active tab
    ///
    /// On success the report is stored and returned. On failure the
    /// stored report is cleared and the error returned for the caller to
    /// show via [`BmiForm::notification_for`].
    pub fn calculate(&mut self) -> Result<&BmiReport, BmiError> {
        let outcome = self.measurement().and_then(|m| evaluate(&m));

        match outcome {
            Ok(report) => {
                let report = if self.config.show_milestones {
                    report
                } else {
                    report.without_milestones()
                };
                let stored = self.result.insert(report);
                Ok(&*stored)
            }
            Err(err) => {
                self.result = None;
                Err(err)
            }
        }
    }

    /// Reset every field and the result
    pub fn clear(&mut self) {
        info!(system = %self.system, "Clearing BMI form");
        *self = Self {
            system: self.system,
            config: self.config.clone(),
            ..Self::default()
        };
    }

    /// Last successful report, if still shown
    pub fn result(&self) -> Option<&BmiReport> {
        self.result.as_ref()
    }

    pub fn notification_for(err: &BmiError) -> Notification {
        Notification::from(err)
    }
}

fn missing(field: &str) -> BmiError {
    BmiError::InvalidInput(format!("{} is required", field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmi::Classification;

    fn metric_form(height: f64, weight: f64) -> BmiForm {
        let mut form = BmiForm::new();
        form.set_height_cm(height);
        form.set_weight_kg(weight);
        form
    }

    #[test]
    fn test_metric_calculation() {
        let mut form = metric_form(180.0, 75.0);
        assert!(form.can_calculate());
        let report = form.calculate().unwrap();
        assert_eq!(report.bmi, 23.1);
        assert_eq!(report.classification, Classification::NormalWeight);
        assert!(form.result().is_some());
    }

    #[test]
    fn test_imperial_calculation() {
        let mut form = BmiForm::new();
        form.set_system(UnitSystem::Imperial);
        form.set_height_feet(5.0);
        form.set_height_inches(10.0);
        form.set_weight_lbs(250.0);

        let report = form.calculate().unwrap();
        assert_eq!(report.bmi, 35.9);
        assert_eq!(report.milestones.len(), 3);
    }

    #[test]
    fn test_imperial_inches_optional() {
        let mut form = BmiForm::new();
        form.set_system(UnitSystem::Imperial);
        form.set_height_feet(6.0);
        form.set_height_inches(0.0);
        form.set_weight_lbs(180.0);

        assert_eq!(form.height_inches(), None);
        assert!(form.can_calculate());
        assert_eq!(form.measurement().unwrap().height, 72.0);
    }

    #[test]
    fn test_zero_entry_clears_field() {
        let form = metric_form(0.0, 75.0);
        assert_eq!(form.height_cm(), None);
        assert!(!form.can_calculate());
    }

    #[test]
    fn test_values_clamped_to_limits() {
        let mut form = metric_form(450.0, 900.0);
        form.set_height_feet(12.0);
        form.set_height_inches(14.0);
        form.set_weight_lbs(2000.0);
        assert_eq!(form.height_cm(), Some(300.0));
        assert_eq!(form.weight_kg(), Some(650.0));
        assert_eq!(form.height_feet(), Some(10.0));
        assert_eq!(form.height_inches(), Some(11.0));
        assert_eq!(form.weight_lbs(), Some(1400.0));
    }

    #[test]
    fn test_invalid_input_clears_result() {
        let mut form = metric_form(180.0, 75.0);
        form.calculate().unwrap();

        form.set_weight_kg(-10.0);
        let err = form.calculate().unwrap_err();
        assert!(matches!(err, BmiError::InvalidInput(_)));
        assert!(form.result().is_none());
        assert_eq!(BmiForm::notification_for(&err).title, "Invalid Input");
    }

    #[test]
    fn test_missing_field_is_invalid_input() {
        let mut form = BmiForm::new();
        form.set_height_cm(180.0);
        let err = form.calculate().unwrap_err();
        assert!(matches!(err, BmiError::InvalidInput(_)));
    }

    #[test]
    fn test_imperial_missing_feet_is_invalid_input() {
        let mut form = BmiForm::new();
        form.set_system(UnitSystem::Imperial);
        form.set_height_feet(5.0);
        form.set_height_inches(10.0);
        form.set_weight_lbs(180.0);
        form.calculate().unwrap();

        form.set_height_feet(0.0);
        assert_eq!(form.height_feet(), None);
        assert_eq!(form.weight_lbs(), Some(180.0));
        let err = form.calculate().unwrap_err();
        assert!(matches!(err, BmiError::InvalidInput(_)));
        assert!(form.result().is_none());
    }

    #[test]
    fn test_negative_inches_rejected() {
        let mut form = BmiForm::new();
        form.set_system(UnitSystem::Imperial);
        form.set_height_feet(5.0);
        form.set_height_inches(-3.0);
        form.set_weight_lbs(180.0);

        let err = form.calculate().unwrap_err();
        assert!(matches!(err, BmiError::InvalidInput(_)));
        assert!(form.result().is_none());
    }

    #[test]
    fn test_switching_system_keeps_values_and_drops_result() {
        let mut form = metric_form(180.0, 75.0);
        form.calculate().unwrap();
        form.set_system(UnitSystem::Imperial);

        assert!(form.result().is_none());
        assert_eq!(form.height_cm(), Some(180.0));
        assert!(!form.can_calculate());
    }

    #[test]
    fn test_clear_resets_fields() {
        let mut form = metric_form(180.0, 75.0);
        form.set_system(UnitSystem::Imperial);
        form.set_weight_lbs(200.0);
        form.clear();

        assert_eq!(form.system(), UnitSystem::Imperial);
        assert_eq!(form.height_cm(), None);
        assert_eq!(form.weight_lbs(), None);
        assert!(form.result().is_none());
    }

    #[test]
    fn test_milestones_hidden_by_config() {
        let config = CalculatorConfig {
            show_milestones: false,
            ..CalculatorConfig::default()
        };
        let mut form = BmiForm::with_config(config);
        form.set_height_cm(180.0);
        form.set_weight_kg(50.0);

        let report = form.calculate().unwrap();
        assert_eq!(report.classification, Classification::SeverelyUnderweight);
        assert!(report.milestones.is_empty());
    }

    #[test]
    fn test_default_system_from_config() {
        let config = CalculatorConfig {
            default_system: UnitSystem::Imperial,
            ..CalculatorConfig::default()
        };
        assert_eq!(BmiForm::with_config(config).system(), UnitSystem::Imperial);
    }
}
