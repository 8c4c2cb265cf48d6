//! A weekly meal planner that matches a daily calorie target.
//!
//! Given a [catalog](RecipeCatalog) of recipes, each with its calories and a
//! [meal type](MealType), the planner picks a breakfast, lunch, snack and
//! dinner for every day of the week and adjusts the portions so the day gets
//! close to the target.
//!
//! Also includes:
//! - Portion scaling of recipes, including the amounts in the ingredient
//!   lines.
//! - A parser for the quantities in ingredient lines.
//! - Estimation of the daily calories from body measures.
//!
//! # Basic usage
//! If you just want **to plan a single** week, see [`generate_week_plan`].
//!
//! To plan more than once, or to change the configuration, construct a
//! [`MealPlanner`] yourself.
//!
//! ```rust
//! # use meal_planner::{InMemoryCatalog, MealPlanner, PlannerConfig, Weekday};
//! let catalog = InMemoryCatalog::from_toml(r#"
//!     [[recipe]]
//!     id = 1
//!     name = "Овсянка"
//!     meal_type = "breakfast"
//!     calories = 500
//!     protein = 15.0
//!     fat = 10.0
//!     carbs = 80.0
//!     ingredients = "80г овсяных хлопьев\n200мл молока"
//! "#)?;
//! let planner = MealPlanner::with_config(catalog, PlannerConfig::default());
//! let plan = planner.generate_week_plan(2000);
//! // only a breakfast, every day is partial
//! assert_eq!(plan.iter().count(), 7);
//! assert!(plan[Weekday::Monday].total_calories > 0.0);
//! # Ok::<(), meal_planner::error::PlannerError>(())
//! ```
//!
//! Plans only store recipe ids and portion multipliers. To get the scaled
//! recipes back use [`MealPlanner::resolve_day`].

#![warn(rustdoc::broken_intra_doc_links, clippy::doc_markdown)]

#[cfg(doc)]
pub mod _features {
    //! This lib has 1 feature, enabled by default:
    //! - `bundled_config`. Includes the default planner configuration file.
    //!   [`PlannerConfig::bundled`](crate::PlannerConfig::bundled) loads it
    //!   without the need to read a file.
}

pub mod catalog;
pub mod config;
pub mod energy;
pub mod error;
pub mod model;
pub mod optimize;
pub mod plan;
pub mod quantity;
pub mod scale;
pub mod select;
pub mod span;

#[cfg(test)]
mod testing;

pub use catalog::{InMemoryCatalog, RecipeCatalog};
pub use config::{Distribution, PlannerConfig};
pub use error::PlannerError;
pub use model::*;
pub use plan::{DayPlan, DayStatus, ResolvedDay, WeekPlan, Weekday};
pub use quantity::{parse_quantity, QuantityMatch};
pub use scale::adjust_portion;
pub use select::{Chooser, FirstChooser, RandomChooser, SeededChooser};
pub use span::Span;

/// A meal planner
///
/// Owns a recipe catalog and the configuration. The catalog can also be a
/// reference, as `&C` is a [`RecipeCatalog`] too.
#[derive(Debug, Clone)]
pub struct MealPlanner<C> {
    catalog: C,
    config: PlannerConfig,
}

impl<C: RecipeCatalog> MealPlanner<C> {
    /// Creates a new planner with the default configuration
    ///
    /// With the `bundled_config` feature the bundled configuration is used.
    pub fn new(catalog: C) -> Self {
        Self::with_config(catalog, default_config())
    }

    /// Creates a new planner
    pub fn with_config(catalog: C, config: PlannerConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan a week with random recipe choices
    ///
    /// This never fails. Days that can't be completed are reported in their
    /// [`DayPlan::status`].
    pub fn generate_week_plan(&self, daily_calories: u32) -> WeekPlan {
        self.generate_week_plan_with(&mut RandomChooser::new(), daily_calories)
    }

    /// Same as [`Self::generate_week_plan`] but with a given [`Chooser`]
    #[tracing::instrument(level = "debug", name = "week_plan", skip(self, chooser))]
    pub fn generate_week_plan_with(
        &self,
        chooser: &mut impl Chooser,
        daily_calories: u32,
    ) -> WeekPlan {
        plan::plan_week(&self.catalog, &self.config, chooser, daily_calories)
    }

    /// Get the scaled recipes of a planned day
    pub fn resolve_day(&self, day: &DayPlan) -> Result<ResolvedDay, PlannerError> {
        day.resolve(&self.catalog)
    }
}

impl MealPlanner<InMemoryCatalog> {
    /// Creates a planner from a TOML catalog and an optional TOML
    /// configuration
    pub fn from_toml(catalog: &str, config: Option<&str>) -> Result<Self, PlannerError> {
        let catalog = InMemoryCatalog::from_toml(catalog)?;
        let config = match config {
            Some(config) => PlannerConfig::from_toml(config)?,
            None => default_config(),
        };
        Ok(Self::with_config(catalog, config))
    }
}

fn default_config() -> PlannerConfig {
    #[cfg(feature = "bundled_config")]
    {
        PlannerConfig::bundled()
    }
    #[cfg(not(feature = "bundled_config"))]
    {
        PlannerConfig::default()
    }
}

/// Plan a week with a default [`MealPlanner`]
///
/// **IMPORTANT:** If you are going to plan more than once, create a
/// [`MealPlanner`] and reuse it.
pub fn generate_week_plan(catalog: impl RecipeCatalog, daily_calories: u32) -> WeekPlan {
    MealPlanner::new(catalog).generate_week_plan(daily_calories)
}
