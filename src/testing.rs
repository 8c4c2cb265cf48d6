//! Fixtures shared by the unit tests

use std::cell::Cell;

use crate::{
    catalog::{CatalogError, InMemoryCatalog, RecipeCatalog},
    model::{Difficulty, MealType, Recipe, RecipeId, BASE_PORTION_LABEL},
};

pub(crate) fn recipe(id: u64, meal_type: MealType, calories: u32) -> Recipe {
    Recipe {
        id: RecipeId(id),
        name: format!("recipe {id}"),
        meal_type,
        calories,
        protein: 10.0,
        fat: 5.5,
        carbs: 20.2,
        ingredients: String::new(),
        instructions: String::new(),
        cooking_time: 15,
        difficulty: Difficulty::Easy,
        base_portion: BASE_PORTION_LABEL.into(),
    }
}

/// Catalog from `(id, meal, calories)` triples
pub(crate) fn catalog(entries: &[(u64, MealType, u32)]) -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new();
    for &(id, meal, calories) in entries {
        catalog.insert(recipe(id, meal, calories));
    }
    catalog
}

/// Catalog that fails a single [`find`](RecipeCatalog::find) call
///
/// Calls are counted from 0, the one at `fail_at` is an error.
pub(crate) struct FlakyCatalog {
    pub inner: InMemoryCatalog,
    pub fail_at: usize,
    pub calls: Cell<usize>,
}

impl RecipeCatalog for FlakyCatalog {
    fn find(
        &self,
        meal_type: MealType,
        excluding: &[RecipeId],
    ) -> Result<Vec<Recipe>, CatalogError> {
        let call = self.calls.get();
        self.calls.set(call + 1);
        if call == self.fail_at {
            return Err(CatalogError::unavailable("timeout"));
        }
        self.inner.find(meal_type, excluding)
    }

    fn get(&self, id: RecipeId) -> Result<Option<Recipe>, CatalogError> {
        self.inner.get(id)
    }
}

/// Catalog that is always down
pub(crate) struct DownCatalog;

impl RecipeCatalog for DownCatalog {
    fn find(&self, _: MealType, _: &[RecipeId]) -> Result<Vec<Recipe>, CatalogError> {
        Err(CatalogError::unavailable("connection refused"))
    }

    fn get(&self, _: RecipeId) -> Result<Option<Recipe>, CatalogError> {
        Err(CatalogError::unavailable("connection refused"))
    }
}
