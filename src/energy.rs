//! Daily calorie estimation
//!
//! Uses the Mifflin-St Jeor equation for the basal metabolic rate, an
//! activity factor and a goal adjustment.

use serde::{Deserialize, Serialize};

/// Used when the profile is missing some measure
pub const DEFAULT_DAILY_CALORIES: u32 = 2000;

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

/// Physical activity
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Light,
    Moderate,
    High,
    Extreme,
}

impl ActivityLevel {
    pub fn factor(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::High => 1.725,
            ActivityLevel::Extreme => 1.9,
        }
    }
}

/// What the person wants to achieve
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Goal {
    /// 20% deficit
    Loss,
    #[default]
    Maintenance,
    /// 10% surplus
    Gain,
}

impl Goal {
    pub fn factor(self) -> f64 {
        match self {
            Goal::Loss => 0.8,
            Goal::Maintenance => 1.0,
            Goal::Gain => 1.1,
        }
    }
}

/// Body measures and habits
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub sex: Sex,
    /// Years
    pub age: Option<u32>,
    /// Kilograms
    pub weight: Option<f64>,
    /// Centimeters
    pub height: Option<f64>,
    #[serde(default)]
    pub activity: ActivityLevel,
    #[serde(default)]
    pub goal: Goal,
}

impl Profile {
    /// Basal metabolic rate, if all measures are known
    ///
    /// A zero or non finite measure counts as unknown.
    pub fn basal_metabolic_rate(&self) -> Option<f64> {
        let known = |m: f64| m.is_finite() && m > 0.0;
        let age = self.age.filter(|&a| a > 0)?;
        let weight = self.weight.filter(|&w| known(w))?;
        let height = self.height.filter(|&h| known(h))?;
        let base = 10.0 * weight + 6.25 * height - 5.0 * age as f64;
        Some(match self.sex {
            Sex::Male => base + 5.0,
            Sex::Female => base - 161.0,
        })
    }

    /// Calories needed per day
    ///
    /// Falls back to [`DEFAULT_DAILY_CALORIES`] when some measure is missing.
    ///
    /// ```
    /// # use meal_planner::energy::*;
    /// let profile = Profile {
    ///     sex: Sex::Female,
    ///     age: Some(30),
    ///     weight: Some(60.0),
    ///     height: Some(165.0),
    ///     activity: ActivityLevel::Light,
    ///     goal: Goal::Loss,
    /// };
    /// // (600 + 1031.25 - 150 - 161) * 1.375 * 0.8
    /// assert_eq!(profile.daily_calories(), 1452);
    /// assert_eq!(Profile::default().daily_calories(), DEFAULT_DAILY_CALORIES);
    /// ```
    pub fn daily_calories(&self) -> u32 {
        let Some(bmr) = self.basal_metabolic_rate() else {
            return DEFAULT_DAILY_CALORIES;
        };
        let calories = bmr * self.activity.factor() * self.goal.factor();
        calories.max(0.0).round_ties_even() as u32
    }
}
