//! Display-ready result and notification types

use serde::{Deserialize, Serialize};

use crate::bmi::{BmiResult, Classification, Direction, Milestone};
use crate::errors::BmiError;
use crate::units::{UnitSystem, WeightUnit};

/// Everything the result panel shows for one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiReport {
    pub bmi: f64,
    pub classification: Classification,
    pub label: String,
    pub severity: u8,
    pub color: String,
    pub system: UnitSystem,
    pub weight_unit: WeightUnit,
    pub direction: Direction,
    pub milestones: Vec<MilestoneView>,
}

impl BmiReport {
    pub fn new(result: &BmiResult, milestones: &[Milestone]) -> Self {
        let direction = Direction::for_classification(result.classification);
        let weight_unit = result.system.weight_unit();

        Self {
            bmi: result.value,
            classification: result.classification,
            label: result.classification.label().to_string(),
            severity: result.classification.severity(),
            color: result.classification.color().to_string(),
            system: result.system,
            weight_unit,
            direction,
            milestones: milestones
                .iter()
                .map(|m| MilestoneView::new(m, direction, weight_unit))
                .collect(),
        }
    }

    /// Drop the milestone list, e.g. when the host disabled it
    pub fn without_milestones(mut self) -> Self {
        self.milestones.clear();
        self
    }
}

/// One row of the "Weight goals" list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneView {
    pub category: Classification,
    pub label: String,
    pub target_bmi: f64,
    pub weight_delta: f64,
    pub color: String,
    /// e.g. "Lose 12.3 lbs to reach Overweight"
    pub message: String,
}

impl MilestoneView {
    pub fn new(milestone: &Milestone, direction: Direction, unit: WeightUnit) -> Self {
        Self {
            category: milestone.category,
            label: milestone.category.label().to_string(),
            target_bmi: milestone.target_bmi,
            weight_delta: milestone.weight_delta,
            color: milestone.category.color().to_string(),
            message: format!(
                "{} {:.1} {} to reach {}",
                direction.verb(),
                milestone.weight_delta,
                unit,
                milestone.category
            ),
        }
    }
}

/// Notification style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Destructive,
}

/// Toast shown to the user when a calculation fails
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub code: String,
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl From<&BmiError> for Notification {
    fn from(err: &BmiError) -> Self {
        let (title, description) = match err {
            BmiError::InvalidInput(_) => (
                "Invalid Input",
                "Please enter valid values for height and weight.",
            ),
            BmiError::CalculationError(_) => (
                "Calculation Error",
                "Unable to calculate BMI. Please check your inputs.",
            ),
            BmiError::InvalidConfig(_) => (
                "Configuration Error",
                "The calculator settings could not be loaded.",
            ),
        };

        Self {
            code: err.code().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            variant: NotificationVariant::Destructive,
        }
    }
}
