//! Week planning
//!
//! A week plan has exactly one [`DayPlan`] for every [`Weekday`]. Every day
//! is optimized with [`DayOptimizer`] for the same daily calories, but the
//! split between meals rotates through the configured
//! [`distributions`](PlannerConfig::distributions), so days have different
//! shapes.

use chrono::{Datelike, Duration, NaiveDate};
use enum_map::EnumMap;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::RecipeCatalog,
    config::PlannerConfig,
    error::PlannerError,
    model::{AdjustedRecipe, MealType, NutritionTotals, RecipeId},
    optimize::{DayOptimizer, DayOutcome},
    scale::adjust_portion,
    select::Chooser,
};

/// Day of the week
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    enum_map::Enum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All days, starting on monday
    pub const ALL: [Weekday; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Days since monday
    pub fn index(self) -> usize {
        self as usize
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
            Weekday::Sunday => chrono::Weekday::Sun,
        }
    }
}

/// A recipe assigned to a meal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MealAssignment {
    pub recipe_id: RecipeId,
    /// Portion multiplier relative to the catalog recipe
    pub multiplier: f64,
}

/// How complete a day is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum DayStatus {
    /// Every meal has a recipe
    Complete,
    /// Some meal is missing a recipe
    Partial,
    /// The catalog failed while planning this day
    CatalogUnavailable,
}

/// Plan for a single day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Recipe of every meal, if one was found
    pub meals: EnumMap<MealType, Option<MealAssignment>>,
    /// Calories of all the meals
    pub total_calories: f64,
    /// Daily calories asked for
    pub target_calories: u32,
    pub status: DayStatus,
}

impl DayPlan {
    fn from_outcome(outcome: &DayOutcome, target_calories: u32) -> Self {
        let meals = EnumMap::from_fn(|meal| {
            outcome.slots[meal].as_ref().map(|recipe| MealAssignment {
                recipe_id: recipe.id,
                multiplier: recipe.multiplier,
            })
        });
        let status = if outcome.is_complete() {
            DayStatus::Complete
        } else {
            DayStatus::Partial
        };
        Self {
            meals,
            total_calories: outcome.total_calories,
            target_calories,
            status,
        }
    }

    /// Empty day for when the catalog can't be used
    pub fn unavailable(target_calories: u32) -> Self {
        Self {
            meals: EnumMap::default(),
            total_calories: 0.0,
            target_calories,
            status: DayStatus::CatalogUnavailable,
        }
    }

    /// Recipe id of a meal
    pub fn recipe_id(&self, meal: MealType) -> Option<RecipeId> {
        self.meals[meal].map(|m| m.recipe_id)
    }

    /// Portion multiplier of a meal, 1 if the meal has no recipe
    pub fn multiplier(&self, meal: MealType) -> f64 {
        self.meals[meal].map_or(1.0, |m| m.multiplier)
    }

    /// Total over target, in percent. 0 if the target is 0.
    pub fn accuracy(&self) -> f64 {
        if self.target_calories > 0 {
            self.total_calories / self.target_calories as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Total minus target
    pub fn deviation(&self) -> f64 {
        self.total_calories - self.target_calories as f64
    }

    /// Get the recipes of the day from the catalog, with their portions
    ///
    /// A recipe no longer in the catalog is `None`.
    pub fn resolve(&self, catalog: &impl RecipeCatalog) -> Result<ResolvedDay, PlannerError> {
        let mut meals: EnumMap<MealType, Option<AdjustedRecipe>> = EnumMap::default();
        for (meal, assignment) in &self.meals {
            let Some(assignment) = assignment else {
                continue;
            };
            match catalog.get(assignment.recipe_id)? {
                Some(recipe) => meals[meal] = Some(adjust_portion(&recipe, assignment.multiplier)?),
                None => tracing::warn!(id = %assignment.recipe_id, %meal, "planned recipe not found"),
            }
        }
        let nutrition = meals.values().flatten().map(|r| r.nutrition()).sum();
        Ok(ResolvedDay { meals, nutrition })
    }
}

/// A [`DayPlan`] with the full recipes
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDay {
    pub meals: EnumMap<MealType, Option<AdjustedRecipe>>,
    /// Sum of the resolved meals
    pub nutrition: NutritionTotals,
}

/// Plan for a week
///
/// Serializes as a map from the lowercase weekday name to the [`DayPlan`], in
/// week order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekPlan {
    days: EnumMap<Weekday, DayPlan>,
}

/// A meal of the plan fixed to a date, ready to be stored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommittedMeal {
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub recipe_id: RecipeId,
    pub multiplier: f64,
}

impl WeekPlan {
    pub fn day(&self, day: Weekday) -> &DayPlan {
        &self.days[day]
    }

    /// Iterate the days in week order
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DayPlan)> {
        self.days.iter()
    }

    /// Average total of the days with calories over the daily target, in
    /// percent
    ///
    /// 0 if no day has calories.
    pub fn accuracy(&self) -> f64 {
        let totals: Vec<&DayPlan> = self
            .days
            .values()
            .filter(|d| d.total_calories > 0.0)
            .collect();
        if totals.is_empty() {
            return 0.0;
        }
        let average = totals.iter().map(|d| d.total_calories).sum::<f64>() / totals.len() as f64;
        let target = totals[0].target_calories;
        if target > 0 {
            average / target as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Fix the plan to the week containing `date`
    ///
    /// Monday is the monday of that week. Returns one record per meal with a
    /// recipe, ordered by date and meal.
    pub fn commit(&self, date: NaiveDate) -> Vec<CommittedMeal> {
        let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
        let mut records = Vec::new();
        for (day, plan) in self.iter() {
            let date = monday + Duration::days(day.index() as i64);
            for meal in MealType::ALL {
                if let Some(assignment) = plan.meals[meal] {
                    records.push(CommittedMeal {
                        date,
                        meal_type: meal,
                        recipe_id: assignment.recipe_id,
                        multiplier: assignment.multiplier,
                    });
                }
            }
        }
        records
    }
}

impl std::ops::Index<Weekday> for WeekPlan {
    type Output = DayPlan;

    fn index(&self, index: Weekday) -> &Self::Output {
        self.day(index)
    }
}

/// Plan a week
///
/// A catalog error only affects the day where it happens, that day is
/// reported as [`DayStatus::CatalogUnavailable`] and planning goes on.
#[tracing::instrument(level = "debug", skip(catalog, config, chooser))]
pub fn plan_week(
    catalog: &impl RecipeCatalog,
    config: &PlannerConfig,
    chooser: &mut impl Chooser,
    daily_calories: u32,
) -> WeekPlan {
    let optimizer = DayOptimizer::new(config);
    let days = EnumMap::from_fn(|day: Weekday| {
        let distribution = config.distribution_for_day(day.index());
        let targets = distribution.targets(daily_calories);
        match optimizer.optimize(catalog, chooser, &targets) {
            Ok(outcome) => {
                let plan = DayPlan::from_outcome(&outcome, daily_calories);
                if plan.status != DayStatus::Complete || plan.total_calories == 0.0 {
                    tracing::warn!(%day, phase = %outcome.phase, "day not fulfilled");
                }
                plan
            }
            Err(err) => {
                tracing::error!(%day, "Error planning day: {err}");
                DayPlan::unavailable(daily_calories)
            }
        }
    });
    WeekPlan { days }
}
