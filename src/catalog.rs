//! Recipe catalog
//!
//! The planner only reads from the catalog. Anything able to list recipes of
//! a meal type can be plugged in implementing [`RecipeCatalog`]. An
//! [`InMemoryCatalog`] is included, it can also be loaded from TOML:
//!
//! ```toml
//! [[recipe]]
//! id = 1
//! name = "Овсянка с ягодами"
//! meal_type = "breakfast"
//! calories = 350
//! protein = 12.0
//! fat = 7.5
//! carbs = 58.0
//! ingredients = """
//! 60г овсяных хлопьев
//! 200мл молока
//! 50г ягод
//! """
//! ```

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::model::{MealType, Recipe, RecipeId};

/// Source of recipes for the planner
pub trait RecipeCatalog {
    /// All the recipes of a meal type except the excluded ids
    ///
    /// No particular order is required.
    fn find(&self, meal_type: MealType, excluding: &[RecipeId])
        -> Result<Vec<Recipe>, CatalogError>;

    /// Get a single recipe
    fn get(&self, id: RecipeId) -> Result<Option<Recipe>, CatalogError>;
}

impl<C: RecipeCatalog + ?Sized> RecipeCatalog for &C {
    fn find(
        &self,
        meal_type: MealType,
        excluding: &[RecipeId],
    ) -> Result<Vec<Recipe>, CatalogError> {
        (**self).find(meal_type, excluding)
    }

    fn get(&self, id: RecipeId) -> Result<Option<Recipe>, CatalogError> {
        (**self).get(id)
    }
}

/// Errors from a [`RecipeCatalog`]
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backing store can't be reached
    #[error("Recipe catalog unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Error parsing catalog file")]
    Toml(#[from] toml::de::Error),

    #[error("Duplicate recipe id {0} in catalog")]
    DuplicateId(RecipeId),
}

impl CatalogError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

/// Catalog kept in memory
///
/// Recipes are kept in insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct InMemoryCatalog {
    recipes: IndexMap<RecipeId, Recipe>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default, rename = "recipe")]
    recipes: Vec<Recipe>,
}

impl InMemoryCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a list of recipes
    ///
    /// Ids have to be unique.
    pub fn from_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for recipe in recipes {
            if catalog.recipes.contains_key(&recipe.id) {
                return Err(CatalogError::DuplicateId(recipe.id));
            }
            catalog.insert(recipe);
        }
        Ok(catalog)
    }

    /// Parse a TOML catalog file
    ///
    /// See the [module docs](self) for the format.
    pub fn from_toml(input: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(input)?;
        Self::from_recipes(file.recipes)
    }

    /// Add or replace a recipe. Returns the replaced one.
    pub fn insert(&mut self, recipe: Recipe) -> Option<Recipe> {
        self.recipes.insert(recipe.id, recipe)
    }

    /// Number of recipes
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Iterate the recipes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }
}

impl RecipeCatalog for InMemoryCatalog {
    fn find(
        &self,
        meal_type: MealType,
        excluding: &[RecipeId],
    ) -> Result<Vec<Recipe>, CatalogError> {
        Ok(self
            .recipes
            .values()
            .filter(|r| r.meal_type == meal_type && !excluding.contains(&r.id))
            .cloned()
            .collect())
    }

    fn get(&self, id: RecipeId) -> Result<Option<Recipe>, CatalogError> {
        Ok(self.recipes.get(&id).cloned())
    }
}
