//! Support for portion scaling
//!
//! Scaling a recipe multiplies its calories and macros and rewrites the
//! amounts in the ingredient lines. The catalog recipe is never modified, the
//! result is an [`AdjustedRecipe`] view with the same id.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    model::{AdjustedRecipe, Recipe, BASE_PORTION_LABEL},
    quantity::parse_quantity,
};

/// Possible outcomes from scaling an ingredient line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleOutcome {
    /// Success
    Scaled,
    /// Not changed because the multiplier is 1
    Fixed,
    /// It has no recognisable quantity, so it can't be scaled
    NoQuantity,
}

/// Possible errors during scaling process
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScaleError {
    #[error("Invalid portion multiplier: {0}, it has to be a positive number")]
    InvalidMultiplier(f64),
}

/// Scale a recipe by a portion multiplier
///
/// A multiplier of exactly 1 leaves the ingredient text untouched.
///
/// ```
/// # use meal_planner::{adjust_portion, Recipe, RecipeId, MealType, Difficulty};
/// let recipe = Recipe {
///     id: RecipeId(1),
///     name: "Курица с рисом".into(),
///     meal_type: MealType::Lunch,
///     calories: 500,
///     protein: 40.0,
///     fat: 12.5,
///     carbs: 55.0,
///     ingredients: "200г куриной грудки\n80г риса\nсоль по вкусу".into(),
///     instructions: String::new(),
///     cooking_time: 30,
///     difficulty: Difficulty::Easy,
///     base_portion: "1 порция".into(),
/// };
/// let adjusted = adjust_portion(&recipe, 1.5)?;
/// assert_eq!(adjusted.id, recipe.id);
/// assert_eq!(adjusted.calories, 750);
/// assert_eq!(adjusted.ingredients, "300г куриной грудки\n120г риса\nсоль по вкусу");
/// assert_eq!(adjusted.base_portion, "1.5 порции");
/// # Ok::<(), meal_planner::scale::ScaleError>(())
/// ```
pub fn adjust_portion(recipe: &Recipe, multiplier: f64) -> Result<AdjustedRecipe, ScaleError> {
    check_multiplier(multiplier)?;
    Ok(scaled_view(recipe, multiplier))
}

fn check_multiplier(multiplier: f64) -> Result<(), ScaleError> {
    if multiplier.is_finite() && multiplier > 0.0 {
        Ok(())
    } else {
        Err(ScaleError::InvalidMultiplier(multiplier))
    }
}

/// [`adjust_portion`] for multipliers already known to be valid
pub(crate) fn scaled_view(recipe: &Recipe, multiplier: f64) -> AdjustedRecipe {
    let ingredients = scale_ingredients(&recipe.ingredients, multiplier);
    let scaled = Recipe {
        id: recipe.id,
        name: recipe.name.clone(),
        meal_type: recipe.meal_type,
        calories: scale_calories(recipe.calories, multiplier),
        protein: round_to(recipe.protein * multiplier, 1),
        fat: round_to(recipe.fat * multiplier, 1),
        carbs: round_to(recipe.carbs * multiplier, 1),
        ingredients,
        instructions: recipe.instructions.clone(),
        cooking_time: recipe.cooking_time,
        difficulty: recipe.difficulty,
        base_portion: portion_label(multiplier),
    };
    AdjustedRecipe {
        recipe: scaled,
        multiplier,
        original_calories: recipe.calories,
        original_ingredients: recipe.ingredients.clone(),
    }
}

impl AdjustedRecipe {
    /// Scale the view again
    ///
    /// The current view is scaled by `factor` and the multiplier is composed,
    /// so [`AdjustedRecipe::multiplier`] stays relative to the catalog recipe.
    /// The original calories and ingredients are kept.
    pub fn rescale(&self, factor: f64) -> Result<AdjustedRecipe, ScaleError> {
        check_multiplier(factor)?;
        Ok(self.rescaled(factor))
    }

    pub(crate) fn rescaled(&self, factor: f64) -> AdjustedRecipe {
        let mut view = scaled_view(&self.recipe, factor);
        view.multiplier = self.multiplier * factor;
        view.recipe.base_portion = portion_label(view.multiplier);
        view.original_calories = self.original_calories;
        view.original_ingredients.clone_from(&self.original_ingredients);
        view
    }
}

/// Scale all the ingredient lines of a recipe
///
/// When the multiplier is not 1 the lines are trimmed and blank ones are
/// dropped.
pub fn scale_ingredients(ingredients: &str, multiplier: f64) -> String {
    if multiplier == 1.0 {
        return ingredients.to_string();
    }

    let mut lines = Vec::new();
    for line in ingredients.split('\n').map(str::trim) {
        if line.is_empty() {
            continue;
        }
        let (scaled, outcome) = scale_ingredient_line(line, multiplier);
        if outcome == ScaleOutcome::NoQuantity {
            tracing::trace!(line, "ingredient without quantity left as is");
        }
        lines.push(scaled);
    }
    lines.join("\n")
}

/// Scale the first quantity of a single ingredient line
///
/// The matched amount and unit are replaced, everything around them is kept
/// verbatim. Whitespace between the number and the unit is removed.
pub fn scale_ingredient_line(line: &str, multiplier: f64) -> (Cow<'_, str>, ScaleOutcome) {
    if multiplier == 1.0 {
        return (Cow::Borrowed(line), ScaleOutcome::Fixed);
    }
    let Some(q) = parse_quantity(line) else {
        return (Cow::Borrowed(line), ScaleOutcome::NoQuantity);
    };

    let amount = round_amount(q.amount * multiplier);
    let range = q.span.range();
    let mut out = String::with_capacity(line.len() + 4);
    out.push_str(&line[..range.start]);
    out.push_str(&format_amount(amount));
    out.push_str(q.unit);
    out.push_str(&line[range.end..]);
    (Cow::Owned(out), ScaleOutcome::Scaled)
}

/// Label for the base portion field
pub fn portion_label(multiplier: f64) -> String {
    if multiplier == 1.0 {
        BASE_PORTION_LABEL.to_string()
    } else {
        format!("{multiplier:.1} порции")
    }
}

fn scale_calories(calories: u32, multiplier: f64) -> u32 {
    // `as` saturates, huge multipliers end at u32::MAX
    (calories as f64 * multiplier).round_ties_even() as u32
}

/// Precision depends on the magnitude
fn round_amount(amount: f64) -> f64 {
    if amount < 1.0 {
        round_to(amount, 2)
    } else if amount < 10.0 {
        round_to(amount, 1)
    } else {
        amount.round_ties_even()
    }
}

pub(crate) fn round_to(n: f64, places: i32) -> f64 {
    let p = 10f64.powi(places);
    (n * p).round_ties_even() / p
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < i64::MAX as f64 {
        format!("{}", amount as i64)
    } else {
        format!("{amount}")
    }
}
