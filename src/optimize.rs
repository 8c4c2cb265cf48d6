//! Day optimization
//!
//! Picks a recipe for every meal of a day and scales the portions so the
//! total calories get close to a target. This is a bounded local search, it
//! does not look for the best combination in the catalog.
//!
//! It works in two phases:
//! - **Coarse search.** Up to [`max_attempts`](PlannerConfig::max_attempts)
//!   times, select a recipe per meal. Accept the selection if it's close
//!   enough. If it's short on calories, grow the portions proportionally to
//!   each meal target and accept if that's close enough. A selection with too
//!   many calories is never scaled down here, it's just retried.
//! - **Fine correction.** Scale every meal by the same factor, clamped, to
//!   get closer to the target.

use enum_map::EnumMap;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{CatalogError, RecipeCatalog},
    config::PlannerConfig,
    model::{AdjustedRecipe, MealType, Recipe},
    scale::scaled_view,
    select::{Chooser, RecipeSelector, UsedRecipes},
};

/// One optional recipe per meal
pub type Slots = EnumMap<MealType, Option<AdjustedRecipe>>;

/// How the coarse search ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Phase {
    /// A selection was close enough without scaling
    Accepted,
    /// A selection was close enough after growing the portions
    Corrected,
    /// No selection was close enough, the last one is used
    Fallback,
    /// Some meal never had a candidate
    Unfulfilled,
}

/// Result of optimizing a day
#[derive(Debug, Clone, PartialEq)]
pub struct DayOutcome {
    /// Selected recipes, scaled
    pub slots: Slots,
    /// Calories of all the selected recipes
    pub total_calories: f64,
    /// Sum of the meal targets
    pub target_calories: f64,
    /// How the coarse search ended
    pub phase: Phase,
    /// Coarse search attempts used
    pub attempts: u32,
}

impl DayOutcome {
    /// Check if every meal has a recipe
    pub fn is_complete(&self) -> bool {
        self.slots.values().all(Option::is_some)
    }
}

/// Optimizes the recipes of a day
#[derive(Debug, Clone, Copy)]
pub struct DayOptimizer<'c> {
    config: &'c PlannerConfig,
    selector: RecipeSelector,
}

impl<'c> DayOptimizer<'c> {
    pub fn new(config: &'c PlannerConfig) -> Self {
        Self {
            config,
            selector: RecipeSelector::new(config),
        }
    }

    /// Run both phases for a day
    ///
    /// `targets` are the calories of every meal. The day target is their sum.
    #[tracing::instrument(level = "debug", skip_all, fields(target = targets.values().map(|&t| u64::from(t)).sum::<u64>()))]
    pub fn optimize(
        &self,
        catalog: &impl RecipeCatalog,
        chooser: &mut impl Chooser,
        targets: &EnumMap<MealType, u32>,
    ) -> Result<DayOutcome, CatalogError> {
        let coarse = self.coarse_search(catalog, chooser, targets)?;
        Ok(self.fine_correction(coarse))
    }

    /// First phase, see the [module docs](self)
    pub fn coarse_search(
        &self,
        catalog: &impl RecipeCatalog,
        chooser: &mut impl Chooser,
        targets: &EnumMap<MealType, u32>,
    ) -> Result<DayOutcome, CatalogError> {
        let total_target: f64 = targets.values().map(|&t| t as f64).sum();
        let outcome = |slots: Slots, total_calories, phase, attempts| DayOutcome {
            slots,
            total_calories,
            target_calories: total_target,
            phase,
            attempts,
        };

        let mut last: EnumMap<MealType, Option<Recipe>> = EnumMap::default();
        let mut attempts = 0;

        while attempts < self.config.max_attempts {
            attempts += 1;
            last = self.select_day(catalog, chooser, targets)?;

            let Some(picks) = complete(&last) else {
                tracing::trace!(attempt = attempts, "a meal has no candidate, retrying");
                continue;
            };

            let current: f64 = picks.values().map(|r| r.calories as f64).sum();
            if (current - total_target).abs() <= total_target * self.config.accept_tolerance {
                tracing::debug!(attempt = attempts, current, "selection accepted");
                return Ok(outcome(unscaled(picks), current, Phase::Accepted, attempts));
            }

            if current < total_target {
                let deficit = total_target - current;
                let slots = self.cover_deficit(picks, targets, total_target, deficit);
                let corrected = slots_calories(&slots);
                if (corrected - total_target).abs()
                    <= total_target * self.config.corrected_tolerance
                {
                    tracing::debug!(attempt = attempts, current, corrected, "deficit corrected");
                    return Ok(outcome(slots, corrected, Phase::Corrected, attempts));
                }
                tracing::trace!(attempt = attempts, current, corrected, "deficit correction not enough");
            } else {
                tracing::trace!(attempt = attempts, current, "surplus, retrying");
            }
        }

        let phase = if last.values().all(Option::is_some) {
            Phase::Fallback
        } else {
            Phase::Unfulfilled
        };
        let slots = last.map(|_, recipe| recipe.map(AdjustedRecipe::unscaled));
        let total = slots_calories(&slots);
        tracing::debug!(attempts, total, %phase, "no acceptable selection, using the last one");
        Ok(outcome(slots, total, phase, attempts))
    }

    /// Select a recipe for every meal, without repeating recipes
    fn select_day(
        &self,
        catalog: &impl RecipeCatalog,
        chooser: &mut impl Chooser,
        targets: &EnumMap<MealType, u32>,
    ) -> Result<EnumMap<MealType, Option<Recipe>>, CatalogError> {
        let mut used = UsedRecipes::new();
        let mut picks = EnumMap::default();
        for meal in MealType::ALL {
            let (recipe, next) = self
                .selector
                .select(catalog, chooser, meal, targets[meal], used)?;
            used = next;
            picks[meal] = recipe;
        }
        Ok(picks)
    }

    /// Grow every portion to cover its share of the deficit
    ///
    /// The share of a meal is its target over the sum of targets.
    fn cover_deficit(
        &self,
        picks: EnumMap<MealType, &Recipe>,
        targets: &EnumMap<MealType, u32>,
        total_target: f64,
        deficit: f64,
    ) -> Slots {
        EnumMap::from_fn(|meal| {
            let recipe = picks[meal];
            let target = targets[meal] as f64;
            let calories = recipe.calories as f64;
            if target > 0.0 && calories > 0.0 {
                let share = target / total_target;
                let multiplier = (1.0 + deficit * share / calories).min(self.config.max_portion);
                Some(scaled_view(recipe, multiplier))
            } else {
                Some(AdjustedRecipe::unscaled(recipe.clone()))
            }
        })
    }

    /// Second phase, see the [module docs](self)
    ///
    /// Empty slots stay empty. A day without calories is not scaled.
    pub fn fine_correction(&self, mut day: DayOutcome) -> DayOutcome {
        let target = day.target_calories;
        let current = slots_calories(&day.slots);
        day.total_calories = current;
        if (current - target).abs() <= target * self.config.fine_tolerance {
            return day;
        }

        // max then min instead of clamp, bounds may come from an unvalidated config
        let factor = if current > 0.0 {
            (target / current)
                .max(self.config.correction_min)
                .min(self.config.correction_max)
        } else {
            1.0
        };
        if factor == 1.0 || !(factor.is_finite() && factor > 0.0) {
            return day;
        }

        for slot in day.slots.values_mut().flatten() {
            *slot = slot.rescaled(factor);
        }
        day.total_calories = slots_calories(&day.slots);
        tracing::debug!(factor, before = current, after = day.total_calories, "portions corrected");
        day
    }
}

/// All four recipes, if there are
fn complete(picks: &EnumMap<MealType, Option<Recipe>>) -> Option<EnumMap<MealType, &Recipe>> {
    let [breakfast, lunch, snack, dinner] = MealType::ALL.map(|meal| picks[meal].as_ref());
    Some(EnumMap::from_array([breakfast?, lunch?, snack?, dinner?]))
}

fn unscaled(picks: EnumMap<MealType, &Recipe>) -> Slots {
    picks.map(|_, r| Some(AdjustedRecipe::unscaled(r.clone())))
}

pub(crate) fn slots_calories(slots: &Slots) -> f64 {
    slots.values().flatten().map(|r| r.calories as f64).sum()
}
