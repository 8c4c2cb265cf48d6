//! Recipe and meal representation

use std::{fmt::Display, iter::Sum, ops::Add, ops::Deref};

use serde::{Deserialize, Serialize};

/// Label of a recipe at its base portion
pub const BASE_PORTION_LABEL: &str = "1 порция";

/// Identifier of a recipe in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub u64);

impl Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for RecipeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// One of the four meals of a day
///
/// The declaration order is the order of the meals in a day.
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
pub enum MealType {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

impl MealType {
    /// All meals in the order they are eaten
    pub const ALL: [MealType; 4] = [Self::Breakfast, Self::Lunch, Self::Snack, Self::Dinner];
}

/// How hard a recipe is to cook
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
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// A recipe from the catalog
///
/// Macros are in grams with one fraction digit. Ingredients are free text,
/// one ingredient per line, see [`crate::quantity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub meal_type: MealType,
    /// Kilocalories of one base portion
    pub calories: u32,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub instructions: String,
    /// Minutes
    #[serde(default = "default_cooking_time")]
    pub cooking_time: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_base_portion")]
    pub base_portion: String,
}

fn default_cooking_time() -> u32 {
    15
}

fn default_base_portion() -> String {
    BASE_PORTION_LABEL.to_string()
}

impl Recipe {
    /// Non empty ingredient lines, trimmed
    pub fn ingredient_lines(&self) -> impl Iterator<Item = &str> {
        self.ingredients
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    /// Nutrition of one base portion
    pub fn nutrition(&self) -> NutritionTotals {
        NutritionTotals {
            calories: self.calories,
            protein: self.protein,
            fat: self.fat,
            carbs: self.carbs,
        }
    }
}

/// A recipe scaled by a portion multiplier
///
/// This is a view of a catalog [`Recipe`]: the inner recipe keeps the same
/// [`id`](Recipe::id) and has its calories, macros, ingredients and portion
/// label scaled. It derefs to the scaled [`Recipe`].
///
/// Created with [`adjust_portion`](crate::scale::adjust_portion).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedRecipe {
    /// Scaled view
    pub recipe: Recipe,
    /// Multiplier relative to the catalog recipe
    pub multiplier: f64,
    /// Calories of the catalog recipe
    pub original_calories: u32,
    /// Ingredients text of the catalog recipe
    pub original_ingredients: String,
}

impl AdjustedRecipe {
    /// View of a recipe at its base portion, without touching anything
    pub fn unscaled(recipe: Recipe) -> Self {
        Self {
            original_calories: recipe.calories,
            original_ingredients: recipe.ingredients.clone(),
            multiplier: 1.0,
            recipe,
        }
    }

    /// Check if the multiplier is exactly 1
    pub fn is_base_portion(&self) -> bool {
        self.multiplier == 1.0
    }

    pub fn into_inner(self) -> Recipe {
        self.recipe
    }
}

impl Deref for AdjustedRecipe {
    type Target = Recipe;

    fn deref(&self) -> &Self::Target {
        &self.recipe
    }
}

/// Sum of calories and macros
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: u32,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl Add for NutritionTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            calories: self.calories.saturating_add(rhs.calories),
            protein: self.protein + rhs.protein,
            fat: self.fat + rhs.fat,
            carbs: self.carbs + rhs.carbs,
        }
    }
}

impl Sum for NutritionTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a Recipe> for NutritionTotals {
    fn sum<I: Iterator<Item = &'a Recipe>>(iter: I) -> Self {
        iter.map(Recipe::nutrition).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::recipe;
    use std::str::FromStr;

    #[test]
    fn meal_type_names() {
        assert_eq!(MealType::Snack.to_string(), "snack");
        assert_eq!(MealType::from_str("dinner").unwrap(), MealType::Dinner);
        assert!(MealType::from_str("brunch").is_err());
    }

    #[test]
    fn ingredient_lines_skip_blank() {
        let mut r = recipe(1, MealType::Lunch, 400);
        r.ingredients = "  200г риса \n\n 1 шт морковь\n   ".into();
        let lines: Vec<_> = r.ingredient_lines().collect();
        assert_eq!(lines, ["200г риса", "1 шт морковь"]);
    }

    #[test]
    fn totals_sum() {
        let a = recipe(1, MealType::Breakfast, 300);
        let b = recipe(2, MealType::Lunch, 500);
        let total: NutritionTotals = [&a, &b].into_iter().sum();
        assert_eq!(total.calories, 800);
        assert_eq!(total.fat, 11.0);
    }

    #[test]
    fn unscaled_view_keeps_identity() {
        let r = recipe(7, MealType::Dinner, 450);
        let view = AdjustedRecipe::unscaled(r.clone());
        assert_eq!(view.id, r.id);
        assert_eq!(view.original_calories, 450);
        assert!(view.is_base_portion());
        assert_eq!(view.into_inner(), r);
    }
}
