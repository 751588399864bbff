//! BMI calculation engine
//!
//! Pure functions for BMI arithmetic, classification banding and
//! weight milestones toward the normal-weight band.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: No state, no I/O; safe to call from any thread
//! 2. **Explicit Units**: Every function takes the [`UnitSystem`] it works in
//! 3. **Display Rounding**: BMI values and weight deltas are rounded to one
//!    decimal place, the precision users see

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::errors::BmiError;
use crate::types::BmiReport;
use crate::units::{Measurement, UnitSystem};
use crate::validation::validate_measurement;

/// Lower edge of the normal-weight band (inclusive)
pub const NORMAL_MIN_BMI: f64 = 18.5;

/// Upper edge of the normal-weight band (inclusive)
pub const NORMAL_MAX_BMI: f64 = 24.9;

/// Gain targets, ascending
const UNDERWEIGHT_TARGETS: [(f64, Classification); 3] = [
    (16.0, Classification::ModeratelyUnderweight),
    (17.0, Classification::MildlyUnderweight),
    (NORMAL_MIN_BMI, Classification::NormalWeight),
];

/// Loss targets, farthest first
const OVERWEIGHT_TARGETS: [(f64, Classification); 4] = [
    (NORMAL_MAX_BMI, Classification::NormalWeight),
    (29.9, Classification::Overweight),
    (34.9, Classification::ObesityClass1),
    (39.9, Classification::ObesityClass2),
];

// ============================================================================
// Classification
// ============================================================================

/// BMI classification band, ordered from lowest to highest BMI
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// BMI < 16
    SeverelyUnderweight,
    /// 16 ≤ BMI < 17
    ModeratelyUnderweight,
    /// 17 ≤ BMI < 18.5
    MildlyUnderweight,
    /// 18.5 ≤ BMI ≤ 24.9
    NormalWeight,
    /// 24.9 < BMI ≤ 29.9
    Overweight,
    /// 29.9 < BMI ≤ 34.9
    ObesityClass1,
    /// 34.9 < BMI ≤ 39.9
    ObesityClass2,
    /// BMI > 39.9
    ObesityClass3,
}

impl Classification {
    /// All bands in ascending BMI order
    pub const ALL: [Classification; 8] = [
        Classification::SeverelyUnderweight,
        Classification::ModeratelyUnderweight,
        Classification::MildlyUnderweight,
        Classification::NormalWeight,
        Classification::Overweight,
        Classification::ObesityClass1,
        Classification::ObesityClass2,
        Classification::ObesityClass3,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Classification::SeverelyUnderweight => "Severely Underweight",
            Classification::ModeratelyUnderweight => "Moderately Underweight",
            Classification::MildlyUnderweight => "Mildly Underweight",
            Classification::NormalWeight => "Normal Weight",
            Classification::Overweight => "Overweight",
            Classification::ObesityClass1 => "Obesity Class I",
            Classification::ObesityClass2 => "Obesity Class II",
            Classification::ObesityClass3 => "Obesity Class III",
        }
    }

    /// Severity ordinal, 0 (severely underweight) to 7 (obesity class III)
    pub fn severity(&self) -> u8 {
        *self as u8
    }

    /// Badge color class for the band
    pub fn color(&self) -> &'static str {
        match self {
            Classification::SeverelyUnderweight => "bg-indigo-700",
            Classification::ModeratelyUnderweight => "bg-indigo-500",
            Classification::MildlyUnderweight => "bg-blue-500",
            Classification::NormalWeight => "bg-green-500",
            Classification::Overweight => "bg-yellow-500",
            Classification::ObesityClass1 => "bg-orange-500",
            Classification::ObesityClass2 => "bg-red-500",
            Classification::ObesityClass3 => "bg-red-700",
        }
    }

    pub fn is_underweight(&self) -> bool {
        *self < Classification::NormalWeight
    }

    pub fn is_overweight(&self) -> bool {
        *self > Classification::NormalWeight
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which way the weight needs to move to reach the normal band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Gain,
    Lose,
    Maintain,
}

impl Direction {
    pub fn for_classification(classification: Classification) -> Self {
        if classification.is_underweight() {
            Direction::Gain
        } else if classification.is_overweight() {
            Direction::Lose
        } else {
            Direction::Maintain
        }
    }

    /// Imperative verb for display ("Gain", "Lose", "Maintain")
    pub fn verb(&self) -> &'static str {
        match self {
            Direction::Gain => "Gain",
            Direction::Lose => "Lose",
            Direction::Maintain => "Maintain",
        }
    }
}

// ============================================================================
// BMI Arithmetic
// ============================================================================

/// Round to one decimal place
///
/// Rounds the exact binary value, so a stored 0.35 (really 0.34999…)
/// becomes 0.3. Exact ties (x.25, x.75) round away from zero.
pub fn round_to_tenth(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let magnitude = value.abs();
    // x.25 and x.75 are the only one-decimal ties a binary float can hold
    let is_tie = (magnitude * 4.0).fract() == 0.0 && (magnitude * 2.0).fract() != 0.0;
    let rounded = if is_tie {
        (magnitude * 10.0 + 0.5).floor() / 10.0
    } else {
        format!("{:.1}", magnitude).parse().unwrap_or(magnitude)
    };
    rounded.copysign(value)
}

/// Calculate BMI, rounded to one decimal
///
/// Metric: `weight(kg) / height(cm)² × 10000`
/// Imperial: `weight(lbs) / height(in)² × 703`
///
/// Non-positive input is not rejected here; the result may be infinite or
/// NaN and callers must check [`f64::is_finite`].
pub fn calculate_bmi(height: f64, weight: f64, system: UnitSystem) -> f64 {
    round_to_tenth(weight / (height * height) * system.conversion_factor())
}

/// Classify a BMI value into its band
///
/// Each boundary value belongs to the lower band: 18.5 and 24.9 are both
/// Normal Weight, 29.9 is Overweight.
pub fn classify(bmi: f64) -> Classification {
    if bmi < 16.0 {
        Classification::SeverelyUnderweight
    } else if bmi < 17.0 {
        Classification::ModeratelyUnderweight
    } else if bmi < NORMAL_MIN_BMI {
        Classification::MildlyUnderweight
    } else if bmi <= NORMAL_MAX_BMI {
        Classification::NormalWeight
    } else if bmi <= 29.9 {
        Classification::Overweight
    } else if bmi <= 34.9 {
        Classification::ObesityClass1
    } else if bmi <= 39.9 {
        Classification::ObesityClass2
    } else {
        Classification::ObesityClass3
    }
}

/// Severity ordinal (0–7) of a BMI value
pub fn severity(bmi: f64) -> u8 {
    classify(bmi).severity()
}

/// Weight that yields `target_bmi` at `height`
///
/// Inverse of [`calculate_bmi`] without rounding: `target × height² / k`.
pub fn weight_for_bmi(target_bmi: f64, height: f64, system: UnitSystem) -> f64 {
    target_bmi * (height * height) / system.conversion_factor()
}

/// Absolute weight change between two BMI values at `height`, rounded to
/// one decimal. Direction is not encoded; see [`Direction`].
pub fn weight_delta(current_bmi: f64, target_bmi: f64, height: f64, system: UnitSystem) -> f64 {
    let current = weight_for_bmi(current_bmi, height, system);
    let target = weight_for_bmi(target_bmi, height, system);
    round_to_tenth((current - target).abs())
}

// ============================================================================
// Milestones
// ============================================================================

/// Weight change needed to reach the edge of a neighboring band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Band reached at `target_bmi`
    pub category: Classification,
    pub target_bmi: f64,
    /// Non-negative, in the measurement's weight unit
    pub weight_delta: f64,
}

/// Milestones from `bmi` toward the normal-weight band
///
/// Underweight values get one milestone per band boundary up to 18.5, in
/// ascending order. Overweight values get one per boundary down to 24.9,
/// nearest first. Normal weight gets none.
pub fn milestones(bmi: f64, height: f64, system: UnitSystem) -> Vec<Milestone> {
    let to_milestone = |&(target_bmi, category): &(f64, Classification)| Milestone {
        category,
        target_bmi,
        weight_delta: weight_delta(bmi, target_bmi, height, system),
    };

    if bmi < NORMAL_MIN_BMI {
        UNDERWEIGHT_TARGETS
            .iter()
            .filter(|(target, _)| *target > bmi)
            .map(to_milestone)
            .collect()
    } else if bmi > NORMAL_MAX_BMI {
        let mut steps: Vec<Milestone> = OVERWEIGHT_TARGETS
            .iter()
            .filter(|(target, _)| bmi > *target)
            .map(to_milestone)
            .collect();
        steps.reverse();
        steps
    } else {
        Vec::new()
    }
}

// ============================================================================
// Full Evaluation
// ============================================================================

/// BMI value with its band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    pub value: f64,
    pub classification: Classification,
    pub system: UnitSystem,
}

/// Validate and calculate BMI for a measurement
pub fn calculate(measurement: &Measurement) -> Result<BmiResult, BmiError> {
    validate_measurement(measurement)?;

    let value = calculate_bmi(measurement.height, measurement.weight, measurement.system);
    if !value.is_finite() {
        warn!(
            system = %measurement.system,
            height = measurement.height,
            weight = measurement.weight,
            "BMI calculation produced a non-finite value"
        );
        return Err(BmiError::CalculationError(
            "Unable to calculate BMI from the given height and weight".to_string(),
        ));
    }

    Ok(BmiResult {
        value,
        classification: classify(value),
        system: measurement.system,
    })
}

/// Calculate, classify and build milestones in one step
pub fn evaluate(measurement: &Measurement) -> Result<BmiReport, BmiError> {
    let result = calculate(measurement)?;
    let steps = milestones(result.value, measurement.height, measurement.system);

    debug!(
        system = %result.system,
        bmi = result.value,
        classification = %result.classification,
        milestones = steps.len(),
        "BMI evaluated"
    );

    Ok(BmiReport::new(&result, &steps))
}
