//! BMI Calculator WASM Module
//!
//! This crate provides WebAssembly bindings so the browser form can run
//! the shared calculation engine client-side. Structured values cross the
//! boundary as JSON strings; failures become a `JsValue` carrying a
//! notification document the page can show as a toast.

use bmi_calculator_shared::{
    self as shared, BmiError, BmiForm, CalculatorConfig, Measurement, Notification, UnitSystem,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "BMI calculator module loaded");
}

// ============================================================================
// Engine functions
// ============================================================================

/// Calculate BMI rounded to one decimal; `NaN` when the input is invalid
#[wasm_bindgen(js_name = calculateBmi)]
pub fn calculate_bmi(height: f64, weight: f64, system: &str) -> f64 {
    match system.parse::<UnitSystem>() {
        Ok(system) => shared::calculate_bmi(height, weight, system),
        Err(_) => f64::NAN,
    }
}

/// Classification label for a BMI value
#[wasm_bindgen(js_name = classifyBmi)]
pub fn classify_bmi(bmi: f64) -> String {
    shared::classify(bmi).label().to_string()
}

/// Severity ordinal 0–7 for a BMI value
#[wasm_bindgen(js_name = bmiSeverity)]
pub fn bmi_severity(bmi: f64) -> u8 {
    shared::severity(bmi)
}

/// Badge color class for a BMI value
#[wasm_bindgen(js_name = bmiColor)]
pub fn bmi_color(bmi: f64) -> String {
    shared::classify(bmi).color().to_string()
}

/// Weight that yields `target_bmi`; `NaN` for an unknown system
#[wasm_bindgen(js_name = weightForBmi)]
pub fn weight_for_bmi(target_bmi: f64, height: f64, system: &str) -> f64 {
    match system.parse::<UnitSystem>() {
        Ok(system) => shared::weight_for_bmi(target_bmi, height, system),
        Err(_) => f64::NAN,
    }
}

/// Milestones toward normal weight as a JSON array
#[wasm_bindgen(js_name = bmiMilestones)]
pub fn bmi_milestones(bmi: f64, height: f64, system: &str) -> Result<String, JsValue> {
    milestones_json(bmi, height, system).map_err(to_js_error)
}

/// Full report for one measurement as JSON
#[wasm_bindgen(js_name = evaluateBmi)]
pub fn evaluate_bmi(height: f64, weight: f64, system: &str) -> Result<String, JsValue> {
    evaluate_json(height, weight, system).map_err(to_js_error)
}

/// Default configuration as JSON, for hosts that want to tweak it
#[wasm_bindgen(js_name = defaultConfig)]
pub fn default_config() -> Result<String, JsValue> {
    to_json(&CalculatorConfig::default()).map_err(to_js_error)
}

// ============================================================================
// Form controller
// ============================================================================

/// Stateful calculator backing one form on the page
#[wasm_bindgen]
pub struct BmiCalculator {
    form: BmiForm,
}

#[wasm_bindgen]
impl BmiCalculator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> BmiCalculator {
        BmiCalculator { form: BmiForm::new() }
    }

    /// Create a calculator from a JSON configuration override
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str) -> Result<BmiCalculator, JsValue> {
        calculator_from_config(config_json).map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn system(&self) -> String {
        self.form.system().to_string()
    }

    #[wasm_bindgen(js_name = setSystem)]
    pub fn set_system(&mut self, system: &str) -> Result<(), JsValue> {
        let system = parse_system(system).map_err(to_js_error)?;
        self.form.set_system(system);
        Ok(())
    }

    #[wasm_bindgen(js_name = setHeightCm)]
    pub fn set_height_cm(&mut self, value: f64) {
        self.form.set_height_cm(value);
    }

    #[wasm_bindgen(js_name = setWeightKg)]
    pub fn set_weight_kg(&mut self, value: f64) {
        self.form.set_weight_kg(value);
    }

    #[wasm_bindgen(js_name = setHeightFeet)]
    pub fn set_height_feet(&mut self, value: f64) {
        self.form.set_height_feet(value);
    }

    #[wasm_bindgen(js_name = setHeightInches)]
    pub fn set_height_inches(&mut self, value: f64) {
        self.form.set_height_inches(value);
    }

    #[wasm_bindgen(js_name = setWeightLbs)]
    pub fn set_weight_lbs(&mut self, value: f64) {
        self.form.set_weight_lbs(value);
    }

    /// Current field values as JSON (`null` for empty fields)
    #[wasm_bindgen(js_name = fieldsJson)]
    pub fn fields_json(&self) -> Result<String, JsValue> {
        to_json(&FormFields::from(&self.form)).map_err(to_js_error)
    }

    /// Whether the Calculate button should be enabled
    #[wasm_bindgen(js_name = canCalculate)]
    pub fn can_calculate(&self) -> bool {
        self.form.can_calculate()
    }

    /// Calculate for the active tab and return the report as JSON
    pub fn calculate(&mut self) -> Result<String, JsValue> {
        calculate_form(&mut self.form).map_err(to_js_error)
    }

    /// Last report as JSON, or `None` when no result is shown
    #[wasm_bindgen(js_name = resultJson)]
    pub fn result_json(&self) -> Result<Option<String>, JsValue> {
        self.form
            .result()
            .map(to_json)
            .transpose()
            .map_err(to_js_error)
    }

    pub fn clear(&mut self) {
        self.form.clear();
    }
}

impl Default for BmiCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Field values as the page sees them
#[derive(Debug, Serialize)]
struct FormFields {
    system: UnitSystem,
    height_cm: Option<f64>,
    weight_kg: Option<f64>,
    height_feet: Option<f64>,
    height_inches: Option<f64>,
    weight_lbs: Option<f64>,
}

impl From<&BmiForm> for FormFields {
    fn from(form: &BmiForm) -> Self {
        Self {
            system: form.system(),
            height_cm: form.height_cm(),
            weight_kg: form.weight_kg(),
            height_feet: form.height_feet(),
            height_inches: form.height_inches(),
            weight_lbs: form.weight_lbs(),
        }
    }
}

// ============================================================================
// Helpers (plain Rust so they can be tested off the browser)
// ============================================================================

fn parse_system(system: &str) -> Result<UnitSystem, BmiError> {
    system.parse::<UnitSystem>().map_err(BmiError::InvalidInput)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, BmiError> {
    serde_json::to_string(value).map_err(|e| BmiError::CalculationError(e.to_string()))
}

fn milestones_json(bmi: f64, height: f64, system: &str) -> Result<String, BmiError> {
    let system = parse_system(system)?;
    to_json(&shared::milestones(bmi, height, system))
}

fn evaluate_json(height: f64, weight: f64, system: &str) -> Result<String, BmiError> {
    let system = parse_system(system)?;
    let report = shared::evaluate(&Measurement::new(height, weight, system))?;
    to_json(&report)
}

fn calculator_from_config(config_json: &str) -> Result<BmiCalculator, BmiError> {
    let config = CalculatorConfig::from_json(config_json)?;
    Ok(BmiCalculator {
        form: BmiForm::with_config(config),
    })
}

fn calculate_form(form: &mut BmiForm) -> Result<String, BmiError> {
    let report = form.calculate()?;
    to_json(report)
}

/// Notification document for an error
fn notification_json(err: &BmiError) -> String {
    serde_json::to_string(&Notification::from(err)).unwrap_or_else(|_| err.to_string())
}

fn to_js_error(err: BmiError) -> JsValue {
    JsValue::from_str(&notification_json(&err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_bmi() {
        assert_eq!(calculate_bmi(180.0, 75.0, "metric"), 23.1);
        assert_eq!(calculate_bmi(70.0, 250.0, "imperial"), 35.9);
        assert!(calculate_bmi(180.0, 75.0, "cubits").is_nan());
    }

    #[test]
    fn test_classification_helpers() {
        assert_eq!(classify_bmi(23.1), "Normal Weight");
        assert_eq!(classify_bmi(35.9), "Obesity Class II");
        assert_eq!(bmi_severity(15.4), 0);
        assert_eq!(bmi_color(27.0), "bg-yellow-500");
    }

    #[test]
    fn test_weight_for_bmi() {
        let kg = weight_for_bmi(22.5, 180.0, "metric");
        assert!((kg - 72.9).abs() < 1e-9);
    }

    #[test]
    fn test_milestones_json() {
        let json = milestones_json(32.0, 180.0, "metric").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["target_bmi"], 29.9);
        assert_eq!(value[0]["category"], "overweight");
        assert_eq!(value[1]["target_bmi"], 24.9);
    }

    #[test]
    fn test_evaluate_json() {
        let json = evaluate_json(180.0, 50.0, "metric").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["bmi"], 15.4);
        assert_eq!(value["label"], "Severely Underweight");
        assert_eq!(value["milestones"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_evaluate_json_rejects_zero_weight() {
        let err = evaluate_json(180.0, 0.0, "metric").unwrap_err();
        let value: serde_json::Value = serde_json::from_str(&notification_json(&err)).unwrap();
        assert_eq!(value["title"], "Invalid Input");
        assert_eq!(value["variant"], "destructive");
    }

    #[test]
    fn test_unknown_system_rejected() {
        assert!(matches!(parse_system("cubits"), Err(BmiError::InvalidInput(_))));
    }

    #[test]
    fn test_calculator_flow() {
        let mut calc = BmiCalculator::new();
        calc.set_height_cm(180.0);
        calc.set_weight_kg(75.0);
        assert!(calc.can_calculate());

        let json = calculate_form(&mut calc.form).unwrap();
        assert!(json.contains("\"normal_weight\""));
        assert!(calc.form.result().is_some());

        calc.clear();
        assert!(calc.form.result().is_none());
        assert!(!calc.can_calculate());
    }

    #[test]
    fn test_calculator_from_config() {
        let calc = calculator_from_config(r#"{"default_system": "imperial"}"#).unwrap();
        assert_eq!(calc.system(), "imperial");
        assert!(calculator_from_config("[1, 2]").is_err());
    }

    #[test]
    fn test_form_fields() {
        let mut calc = BmiCalculator::new();
        calc.set_height_feet(5.0);
        let fields = FormFields::from(&calc.form);
        assert_eq!(fields.height_feet, Some(5.0));
        assert_eq!(fields.weight_lbs, None);
        assert_eq!(fields.system, UnitSystem::Metric);
    }
}
