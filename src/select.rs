//! Recipe selection for a single meal

use std::ops::Deref;

use rand::{rngs::StdRng, rngs::ThreadRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    catalog::{CatalogError, RecipeCatalog},
    config::PlannerConfig,
    model::{MealType, Recipe, RecipeId},
};

/// Uniform choice among candidates
///
/// The selector only requires that every index is equally likely. Tests can
/// plug in a deterministic implementation.
pub trait Chooser {
    /// Pick an index in `0..len`. `len` is never 0.
    fn choose(&mut self, len: usize) -> usize;
}

impl<C: Chooser + ?Sized> Chooser for &mut C {
    fn choose(&mut self, len: usize) -> usize {
        (**self).choose(len)
    }
}

/// [`Chooser`] backed by a [`rand`] generator
#[derive(Debug, Clone)]
pub struct RandomChooser<R = ThreadRng>(R);

/// Reproducible [`RandomChooser`]
pub type SeededChooser = RandomChooser<StdRng>;

impl RandomChooser<ThreadRng> {
    /// Chooser using the thread local generator
    pub fn new() -> Self {
        Self(rand::thread_rng())
    }
}

impl Default for RandomChooser<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomChooser<StdRng> {
    /// Same seed, same choices
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomChooser<R> {
    pub fn from_rng(rng: R) -> Self {
        Self(rng)
    }
}

impl<R: Rng> Chooser for RandomChooser<R> {
    fn choose(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Always picks the first candidate
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstChooser;

impl Chooser for FirstChooser {
    fn choose(&mut self, _len: usize) -> usize {
        0
    }
}

/// Recipes already used in a day
///
/// A day has four meals, so this never allocates in practice.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsedRecipes(SmallVec<[RecipeId; 4]>);

impl UsedRecipes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an id, returns `false` if it was already there
    pub fn insert(&mut self, id: RecipeId) -> bool {
        if self.0.contains(&id) {
            false
        } else {
            self.0.push(id);
            true
        }
    }

    /// Same set plus `id`
    pub fn with(mut self, id: RecipeId) -> Self {
        self.insert(id);
        self
    }
}

impl Deref for UsedRecipes {
    type Target = [RecipeId];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<RecipeId> for UsedRecipes {
    fn from_iter<T: IntoIterator<Item = RecipeId>>(iter: T) -> Self {
        let mut used = Self::new();
        for id in iter {
            used.insert(id);
        }
        used
    }
}

/// Picks a recipe for a meal close to a calorie target
///
/// Selection has two tiers:
/// 1. If any candidate is within the near match tolerance of the target, one
///    of those is picked.
/// 2. Otherwise, one of the closest candidates is picked.
///
/// Recipes already used are never candidates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecipeSelector {
    near_match_tolerance: f64,
    closest_candidates: usize,
}

impl Default for RecipeSelector {
    fn default() -> Self {
        Self::new(&PlannerConfig::default())
    }
}

impl RecipeSelector {
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            near_match_tolerance: config.near_match_tolerance,
            closest_candidates: config.closest_candidates.max(1),
        }
    }

    /// Select a recipe
    ///
    /// Returns the recipe, if any candidate exists, and the used set with
    /// the selected id added.
    pub fn select(
        &self,
        catalog: &impl RecipeCatalog,
        chooser: &mut impl Chooser,
        meal_type: MealType,
        target_calories: u32,
        mut used: UsedRecipes,
    ) -> Result<(Option<Recipe>, UsedRecipes), CatalogError> {
        let candidates = catalog.find(meal_type, &used)?;
        let selected = self.pick(candidates, chooser, target_calories);
        if let Some(recipe) = &selected {
            used.insert(recipe.id);
        }
        tracing::trace!(
            %meal_type,
            target_calories,
            selected = ?selected.as_ref().map(|r| r.id),
            "recipe selected"
        );
        Ok((selected, used))
    }

    fn pick(
        &self,
        mut candidates: Vec<Recipe>,
        chooser: &mut impl Chooser,
        target_calories: u32,
    ) -> Option<Recipe> {
        if candidates.is_empty() {
            return None;
        }

        let target = target_calories as f64;
        let margin = target * self.near_match_tolerance;
        let mut near: Vec<Recipe> = candidates
            .iter()
            .filter(|r| (r.calories as f64 - target).abs() <= margin)
            .cloned()
            .collect();
        if !near.is_empty() {
            let index = chooser.choose(near.len());
            return Some(near.swap_remove(index));
        }

        // stable, so ties keep the catalog order
        candidates.sort_by_key(|r| r.calories.abs_diff(target_calories));
        candidates.truncate(self.closest_candidates);
        let index = chooser.choose(candidates.len());
        Some(candidates.swap_remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{catalog, DownCatalog};

    /// Records the lengths it was asked to choose from
    #[derive(Default)]
    struct Recording {
        lens: Vec<usize>,
        pick: usize,
    }

    impl Chooser for Recording {
        fn choose(&mut self, len: usize) -> usize {
            self.lens.push(len);
            self.pick.min(len - 1)
        }
    }

    #[test]
    fn near_matches_first() {
        let catalog = catalog(&[
            (1, MealType::Lunch, 300),
            (2, MealType::Lunch, 680),
            (3, MealType::Lunch, 760),
            (4, MealType::Lunch, 1000),
        ]);
        let mut chooser = Recording {
            pick: 1,
            ..Default::default()
        };
        let (recipe, used) = RecipeSelector::default()
            .select(&catalog, &mut chooser, MealType::Lunch, 700, UsedRecipes::new())
            .unwrap();
        // 680 and 760 are within 70 of 700
        assert_eq!(chooser.lens, [2]);
        assert_eq!(recipe.unwrap().id, RecipeId(3));
        assert_eq!(&*used, &[RecipeId(3)]);
    }

    #[test]
    fn closest_three_without_near_match() {
        let catalog = catalog(&[
            (1, MealType::Dinner, 100),
            (2, MealType::Dinner, 900),
            (3, MealType::Dinner, 200),
            (4, MealType::Dinner, 850),
            (5, MealType::Dinner, 1500),
        ]);
        let mut chooser = Recording {
            pick: 2,
            ..Default::default()
        };
        let (recipe, _) = RecipeSelector::default()
            .select(&catalog, &mut chooser, MealType::Dinner, 500, UsedRecipes::new())
            .unwrap();
        // distances 400, 400, 300, 350, 1000 -> 3, 4, 1
        assert_eq!(chooser.lens, [3]);
        assert_eq!(recipe.unwrap().id, RecipeId(1));
    }

    #[test]
    fn excludes_used() {
        let catalog = catalog(&[(1, MealType::Snack, 200), (2, MealType::Snack, 400)]);
        let used = UsedRecipes::new().with(RecipeId(1));
        let (recipe, used) = RecipeSelector::default()
            .select(&catalog, &mut FirstChooser, MealType::Snack, 200, used)
            .unwrap();
        assert_eq!(recipe.unwrap().id, RecipeId(2));
        assert_eq!(&*used, &[RecipeId(1), RecipeId(2)]);

        let (recipe, same) = RecipeSelector::default()
            .select(&catalog, &mut FirstChooser, MealType::Snack, 200, used.clone())
            .unwrap();
        assert!(recipe.is_none());
        assert_eq!(same, used);
    }

    #[test]
    fn zero_target() {
        let catalog = catalog(&[(1, MealType::Snack, 150), (2, MealType::Snack, 0)]);
        let (recipe, _) = RecipeSelector::default()
            .select(&catalog, &mut FirstChooser, MealType::Snack, 0, UsedRecipes::new())
            .unwrap();
        assert_eq!(recipe.unwrap().id, RecipeId(2));
    }

    #[test]
    fn catalog_down() {
        let result = RecipeSelector::default().select(
            &DownCatalog,
            &mut FirstChooser,
            MealType::Snack,
            200,
            UsedRecipes::new(),
        );
        assert!(matches!(result, Err(CatalogError::Unavailable { .. })));
    }

    #[test]
    fn seeded_is_reproducible() {
        let mut a = RandomChooser::seeded(7);
        let mut b = SeededChooser::seeded(7);
        let xs: Vec<_> = (0..20).map(|_| a.choose(5)).collect();
        let ys: Vec<_> = (0..20).map(|_| b.choose(5)).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|&i| i < 5));
    }

    #[test]
    fn used_set_dedup() {
        let used: UsedRecipes = [RecipeId(1), RecipeId(2), RecipeId(1)].into_iter().collect();
        assert_eq!(used.len(), 2);
    }
}
