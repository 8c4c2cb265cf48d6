//! Planner configuration
//!
//! All the tolerances and limits used while planning. Designed for
//! deserializing [TOML](https://toml.io/en/), missing keys take the default
//! value:
//!
//! ```toml
//! max_attempts = 50
//! fine_tolerance = 0.01
//!
//! [[distributions]]
//! breakfast = 0.3
//! lunch = 0.4
//! snack = 0.1
//! dinner = 0.2
//! ```
//!
//! With the `bundled_config` feature (enabled by default) the defaults are
//! also available as a TOML file with [`PlannerConfig::bundled`].

use enum_map::EnumMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::MealType;

const SHARE_EPSILON: f64 = 1e-6;

/// Tolerances and limits of the planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    /// Coarse search attempts per day
    pub max_attempts: u32,
    /// Accept a selection as is when the total is this close to the target
    pub accept_tolerance: f64,
    /// Accept a deficit corrected selection when this close to the target
    pub corrected_tolerance: f64,
    /// Skip the final correction when this close to the target
    pub fine_tolerance: f64,
    /// A recipe is a near match when its calories are this close to the meal target
    pub near_match_tolerance: f64,
    /// How many of the closest recipes to choose from without a near match
    pub closest_candidates: usize,
    /// Max portion multiplier when correcting a deficit
    pub max_portion: f64,
    /// Lower bound of the final correction factor
    pub correction_min: f64,
    /// Upper bound of the final correction factor
    pub correction_max: f64,
    /// Calorie distributions between meals, rotated day by day
    pub distributions: Vec<Distribution>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            accept_tolerance: 0.05,
            corrected_tolerance: 0.10,
            fine_tolerance: 0.02,
            near_match_tolerance: 0.10,
            closest_candidates: 3,
            max_portion: 2.0,
            correction_min: 0.8,
            correction_max: 1.5,
            distributions: vec![
                Distribution::STANDARD,
                // bigger breakfast
                Distribution::new(0.30, 0.30, 0.15, 0.25),
                // bigger lunch
                Distribution::new(0.25, 0.40, 0.10, 0.25),
                // more snacking
                Distribution::new(0.20, 0.35, 0.20, 0.25),
            ],
        }
    }
}

/// Fraction of the daily calories that goes to each meal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Distribution {
    pub breakfast: f64,
    pub lunch: f64,
    pub snack: f64,
    pub dinner: f64,
}

impl Distribution {
    pub const STANDARD: Self = Self::new(0.25, 0.35, 0.15, 0.25);

    pub const fn new(breakfast: f64, lunch: f64, snack: f64, dinner: f64) -> Self {
        Self {
            breakfast,
            lunch,
            snack,
            dinner,
        }
    }

    /// Share of a meal
    pub fn share(&self, meal: MealType) -> f64 {
        match meal {
            MealType::Breakfast => self.breakfast,
            MealType::Lunch => self.lunch,
            MealType::Snack => self.snack,
            MealType::Dinner => self.dinner,
        }
    }

    /// Sum of all the shares
    pub fn total(&self) -> f64 {
        MealType::ALL.iter().map(|&m| self.share(m)).sum()
    }

    /// Calorie target of every meal, rounded down
    ///
    /// ```
    /// # use meal_planner::config::Distribution;
    /// # use meal_planner::MealType;
    /// let targets = Distribution::new(0.25, 0.35, 0.15, 0.25).targets(2000);
    /// assert_eq!(targets[MealType::Breakfast], 500);
    /// assert_eq!(targets[MealType::Lunch], 700);
    /// assert_eq!(targets[MealType::Snack], 300);
    /// assert_eq!(targets[MealType::Dinner], 500);
    /// ```
    pub fn targets(&self, daily_calories: u32) -> EnumMap<MealType, u32> {
        EnumMap::from_fn(|meal| (daily_calories as f64 * self.share(meal)).floor() as u32)
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        for meal in MealType::ALL {
            let share = self.share(meal);
            if !share.is_finite() || share < 0.0 {
                return Err(ConfigError::InvalidDistribution {
                    index,
                    reason: format!("{meal} share is {share}"),
                });
            }
        }
        let total = self.total();
        if (total - 1.0).abs() > SHARE_EPSILON {
            return Err(ConfigError::InvalidDistribution {
                index,
                reason: format!("shares add up to {total}, expected 1"),
            });
        }
        Ok(())
    }
}

/// Errors loading a [`PlannerConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error parsing planner config")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid distribution #{index}: {reason}")]
    InvalidDistribution { index: usize, reason: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

impl PlannerConfig {
    /// Default configuration loaded from the bundled `planner.toml`
    ///
    /// This is only available with the `bundled_config` feature.
    #[cfg(feature = "bundled_config")]
    pub fn bundled() -> Self {
        Self::from_toml(include_str!("../planner.toml")).expect("bundled planner.toml is valid")
    }

    /// Parse and validate a TOML configuration
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values make sense
    pub fn validate(&self) -> Result<(), ConfigError> {
        macro_rules! ensure {
            ($cond:expr, $field:literal, $reason:literal) => {
                if !$cond {
                    return Err(ConfigError::InvalidValue {
                        field: $field,
                        reason: $reason,
                    });
                }
            };
        }

        ensure!(self.max_attempts >= 1, "max_attempts", "must be at least 1");
        ensure!(
            self.closest_candidates >= 1,
            "closest_candidates",
            "must be at least 1"
        );
        for (field, tolerance) in [
            ("accept_tolerance", self.accept_tolerance),
            ("corrected_tolerance", self.corrected_tolerance),
            ("fine_tolerance", self.fine_tolerance),
            ("near_match_tolerance", self.near_match_tolerance),
        ] {
            if !(tolerance.is_finite() && tolerance >= 0.0) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be a non negative number",
                });
            }
        }
        ensure!(
            self.max_portion.is_finite() && self.max_portion >= 1.0,
            "max_portion",
            "must be at least 1"
        );
        ensure!(
            self.correction_min > 0.0 && self.correction_min <= 1.0,
            "correction_min",
            "must be in (0, 1]"
        );
        ensure!(
            self.correction_max.is_finite() && self.correction_max >= 1.0,
            "correction_max",
            "must be at least 1"
        );
        ensure!(
            !self.distributions.is_empty(),
            "distributions",
            "at least one is needed"
        );
        for (index, distribution) in self.distributions.iter().enumerate() {
            distribution.validate(index)?;
        }
        Ok(())
    }

    /// Distribution used for the day with the given index
    ///
    /// Distributions rotate, day `i` uses `i % len`. Without distributions
    /// every day uses [`Distribution::STANDARD`].
    pub fn distribution_for_day(&self, day_index: usize) -> Distribution {
        match self.distributions.len() {
            0 => Distribution::STANDARD,
            len => self.distributions[day_index % len],
        }
    }
}
