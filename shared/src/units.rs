//! Unit systems and conversions
//!
//! Height and weight are always entered in one consistent system. The BMI
//! formula differs between systems only by its conversion constant, so the
//! engine never needs to normalize to SI before calculating. Conversions
//! here exist for switching a measurement between systems.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;

/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

// ============================================================================
// Unit System
// ============================================================================

/// Unit system used for a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Height in centimeters, weight in kilograms
    #[default]
    Metric,
    /// Height in total inches, weight in pounds
    Imperial,
}

impl UnitSystem {
    /// Constant `k` in `bmi = weight / height² × k`
    pub fn conversion_factor(&self) -> f64 {
        match self {
            UnitSystem::Metric => 10_000.0,
            UnitSystem::Imperial => 703.0,
        }
    }

    /// Unit that weights are expressed in
    pub fn weight_unit(&self) -> WeightUnit {
        match self {
            UnitSystem::Metric => WeightUnit::Kg,
            UnitSystem::Imperial => WeightUnit::Lbs,
        }
    }

    /// Unit that heights are expressed in
    pub fn height_unit(&self) -> HeightUnit {
        match self {
            UnitSystem::Metric => HeightUnit::Cm,
            UnitSystem::Imperial => HeightUnit::Inches,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "si" => Ok(UnitSystem::Metric),
            "imperial" | "us" => Ok(UnitSystem::Imperial),
            _ => Err(format!("Unknown unit system: {}", s)),
        }
    }
}

// ============================================================================
// Weight Units
// ============================================================================

/// Weight unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    /// Convert from this unit to kilograms
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => value * KG_PER_LB,
        }
    }

    /// Convert from kilograms to this unit
    pub fn from_kg(&self, kg: f64) -> f64 {
        match self {
            WeightUnit::Kg => kg,
            WeightUnit::Lbs => kg / KG_PER_LB,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

// ============================================================================
// Height Units
// ============================================================================

/// Height unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    #[default]
    Cm,
    Inches,
}

impl HeightUnit {
    /// Convert from this unit to centimeters
    pub fn to_cm(&self, value: f64) -> f64 {
        match self {
            HeightUnit::Cm => value,
            HeightUnit::Inches => value * CM_PER_INCH,
        }
    }

    /// Convert from centimeters to this unit
    pub fn from_cm(&self, cm: f64) -> f64 {
        match self {
            HeightUnit::Cm => cm,
            HeightUnit::Inches => cm / CM_PER_INCH,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            HeightUnit::Cm => "cm",
            HeightUnit::Inches => "in",
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Combine a feet + inches entry into total inches
pub fn feet_inches_to_inches(feet: f64, inches: f64) -> f64 {
    feet * INCHES_PER_FOOT + inches
}

// ============================================================================
// Measurement
// ============================================================================

/// Height and weight in a single unit system
///
/// Imperial height is total inches; use [`feet_inches_to_inches`] or
/// [`Measurement::imperial_feet_inches`] for a split entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub height: f64,
    pub weight: f64,
    pub system: UnitSystem,
}

impl Measurement {
    pub fn new(height: f64, weight: f64, system: UnitSystem) -> Self {
        Self {
            height,
            weight,
            system,
        }
    }

    /// Height in centimeters, weight in kilograms
    pub fn metric(height_cm: f64, weight_kg: f64) -> Self {
        Self::new(height_cm, weight_kg, UnitSystem::Metric)
    }

    /// Height in total inches, weight in pounds
    pub fn imperial(height_in: f64, weight_lbs: f64) -> Self {
        Self::new(height_in, weight_lbs, UnitSystem::Imperial)
    }

    pub fn imperial_feet_inches(feet: f64, inches: f64, weight_lbs: f64) -> Self {
        Self::imperial(feet_inches_to_inches(feet, inches), weight_lbs)
    }

    /// Express this measurement in `system`
    pub fn convert_to(&self, system: UnitSystem) -> Self {
        if self.system == system {
            return *self;
        }
        let height_cm = self.system.height_unit().to_cm(self.height);
        let weight_kg = self.system.weight_unit().to_kg(self.weight);
        Self {
            height: system.height_unit().from_cm(height_cm),
            weight: system.weight_unit().from_kg(weight_kg),
            system,
        }
    }

    pub fn to_metric(&self) -> Self {
        self.convert_to(UnitSystem::Metric)
    }

    pub fn to_imperial(&self) -> Self {
        self.convert_to(UnitSystem::Imperial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("metric", UnitSystem::Metric)]
    #[case("Metric", UnitSystem::Metric)]
    #[case(" si ", UnitSystem::Metric)]
    #[case("imperial", UnitSystem::Imperial)]
    #[case("US", UnitSystem::Imperial)]
    fn test_parse_unit_system(#[case] input: &str, #[case] expected: UnitSystem) {
        assert_eq!(input.parse::<UnitSystem>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_unit_system() {
        assert!("stones".parse::<UnitSystem>().is_err());
    }

    #[test]
    fn test_conversion_factors() {
        assert_eq!(UnitSystem::Metric.conversion_factor(), 10_000.0);
        assert_eq!(UnitSystem::Imperial.conversion_factor(), 703.0);
        assert_eq!(UnitSystem::Imperial.weight_unit(), WeightUnit::Lbs);
        assert_eq!(UnitSystem::Metric.height_unit(), HeightUnit::Cm);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&UnitSystem::Imperial).unwrap();
        assert_eq!(json, "\"imperial\"");
        let parsed: UnitSystem = serde_json::from_str("\"metric\"").unwrap();
        assert_eq!(parsed, UnitSystem::Metric);
    }

    #[test]
    fn test_feet_inches() {
        assert_eq!(feet_inches_to_inches(5.0, 10.0), 70.0);
        assert_eq!(feet_inches_to_inches(6.0, 0.0), 72.0);
        let m = Measurement::imperial_feet_inches(5.0, 10.0, 250.0);
        assert_eq!(m.height, 70.0);
        assert_eq!(m.system, UnitSystem::Imperial);
    }

    #[test]
    fn test_known_conversions() {
        // 70 in = 177.8 cm, 250 lbs = 113.398 kg
        let metric = Measurement::imperial(70.0, 250.0).to_metric();
        assert!((metric.height - 177.8).abs() < 0.001);
        assert!((metric.weight - 113.398).abs() < 0.001);
        assert_eq!(metric.system, UnitSystem::Metric);
    }

    #[test]
    fn test_convert_same_system_is_identity() {
        let m = Measurement::metric(180.0, 75.0);
        assert_eq!(m.to_metric(), m);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: Converting there and back preserves the measurement
        #[test]
        fn prop_measurement_roundtrip(height in 50.0f64..300.0, weight in 1.0f64..650.0) {
            let m = Measurement::metric(height, weight);
            let back = m.to_imperial().to_metric();
            prop_assert!((back.height - height).abs() < 1e-9);
            prop_assert!((back.weight - weight).abs() < 1e-9);
        }
    }
}
