use meal_planner::{
    optimize::DayOptimizer, Difficulty, DayStatus, InMemoryCatalog, MealPlanner, MealType,
    PlannerConfig, Recipe, RecipeId, SeededChooser, Weekday,
};
use test_case::test_case;

fn recipe(id: u64, meal_type: MealType, calories: u32) -> Recipe {
    Recipe {
        id: RecipeId(id),
        name: format!("{meal_type} {calories}"),
        meal_type,
        calories,
        protein: calories as f64 / 20.0,
        fat: calories as f64 / 40.0,
        carbs: calories as f64 / 8.0,
        ingredients: format!("{}г основы\nсоль по вкусу", calories / 2),
        instructions: String::new(),
        cooking_time: 20,
        difficulty: Difficulty::Easy,
        base_portion: "1 порция".into(),
    }
}

/// Every meal type from 100 to 1000 kcal in steps of 50
fn rich_catalog() -> InMemoryCatalog {
    let mut id = 0;
    let mut recipes = Vec::new();
    for meal in MealType::ALL {
        for calories in (100..=1000).step_by(50) {
            id += 1;
            recipes.push(recipe(id, meal, calories));
        }
    }
    InMemoryCatalog::from_recipes(recipes).unwrap()
}

#[test_case(0; "zero")]
#[test_case(1; "one")]
#[test_case(2000; "usual")]
#[test_case(u32::MAX; "huge")]
fn always_seven_days(daily: u32) {
    let planner = MealPlanner::with_config(rich_catalog(), PlannerConfig::default());
    let plan = planner.generate_week_plan_with(&mut SeededChooser::seeded(1), daily);
    let days: Vec<_> = plan.iter().map(|(day, _)| day).collect();
    assert_eq!(days, Weekday::ALL);
    for (_, day) in plan.iter() {
        assert_eq!(day.target_calories, daily);
        assert_eq!(day.status, DayStatus::Complete);
    }
}

#[test]
fn close_to_target() {
    let planner = MealPlanner::with_config(rich_catalog(), PlannerConfig::default());
    for seed in 0..5 {
        let plan = planner.generate_week_plan_with(&mut SeededChooser::seeded(seed), 2000);
        for (day, plan) in plan.iter() {
            // fine tolerance plus rounding of every meal
            assert!(
                plan.deviation().abs() <= 2000.0 * 0.02 + 4.0,
                "{day}: {}",
                plan.total_calories
            );
            let mut ids: Vec<_> = MealType::ALL
                .iter()
                .filter_map(|&m| plan.recipe_id(m))
                .collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), 4);
        }
        assert!((plan.accuracy() - 100.0).abs() <= 2.2);
    }
}

#[test]
fn same_seed_same_plan() {
    let planner = MealPlanner::with_config(rich_catalog(), PlannerConfig::default());
    let a = planner.generate_week_plan_with(&mut SeededChooser::seeded(99), 1800);
    let b = planner.generate_week_plan_with(&mut SeededChooser::seeded(99), 1800);
    assert_eq!(a, b);
}

#[test]
fn fine_correction_is_bounded() {
    let catalog = rich_catalog();
    let config = PlannerConfig::default();
    let optimizer = DayOptimizer::new(&config);
    let mut chooser = SeededChooser::seeded(5);
    for (i, daily) in [300, 900, 2000, 3500, 6000].into_iter().enumerate() {
        let targets = config.distribution_for_day(i).targets(daily);
        let coarse = optimizer
            .coarse_search(&catalog, &mut chooser, &targets)
            .unwrap();
        let before = coarse.total_calories;
        let fine = optimizer.fine_correction(coarse);
        // every meal is rounded on its own
        assert!(fine.total_calories >= before * config.correction_min - 2.0);
        assert!(fine.total_calories <= before * config.correction_max + 2.0);
        for recipe in fine.slots.values().flatten() {
            assert!(recipe.multiplier > 0.0);
            assert!(recipe.multiplier <= config.max_portion * config.correction_max);
        }
    }
}

#[test]
fn resolve_planned_day() {
    let planner = MealPlanner::with_config(rich_catalog(), PlannerConfig::default());
    let plan = planner.generate_week_plan_with(&mut SeededChooser::seeded(3), 2000);
    let day = &plan[Weekday::Friday];
    let resolved = planner.resolve_day(day).unwrap();
    for meal in MealType::ALL {
        let recipe = resolved.meals[meal].as_ref().unwrap();
        assert_eq!(Some(recipe.id), day.recipe_id(meal));
        assert_eq!(recipe.meal_type, meal);
        assert_eq!(recipe.multiplier, day.multiplier(meal));
    }
    assert!((resolved.nutrition.calories as f64 - day.total_calories).abs() <= 4.0);
}

#[test]
fn json_shape() {
    let planner = MealPlanner::with_config(rich_catalog(), PlannerConfig::default());
    let plan = planner.generate_week_plan_with(&mut SeededChooser::seeded(8), 2000);
    let json = serde_json::to_string(&plan).unwrap();

    let positions: Vec<_> = Weekday::ALL
        .iter()
        .map(|day| json.find(&format!("\"{day}\":")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let days = value.as_object().unwrap();
    assert_eq!(days.len(), 7);
    let monday = &days["monday"];
    assert_eq!(monday["target_calories"], 2000);
    assert_eq!(monday["status"], "complete");
    for meal in ["breakfast", "lunch", "snack", "dinner"] {
        assert!(monday["meals"][meal]["recipe_id"].is_u64());
        assert!(monday["meals"][meal]["multiplier"].is_f64());
    }

    let back: meal_planner::WeekPlan = serde_json::from_str(&json).unwrap();
    assert_eq!(back, plan);
}

#[test]
fn missing_meal_type_gives_partial_days() {
    let catalog = InMemoryCatalog::from_recipes(
        [
            recipe(1, MealType::Breakfast, 500),
            recipe(2, MealType::Lunch, 700),
            recipe(3, MealType::Dinner, 500),
        ],
    )
    .unwrap();
    let config = PlannerConfig {
        max_attempts: 2,
        ..Default::default()
    };
    let plan = MealPlanner::with_config(catalog, config)
        .generate_week_plan_with(&mut SeededChooser::seeded(0), 2000);
    for (_, day) in plan.iter() {
        assert_eq!(day.status, DayStatus::Partial);
        assert_eq!(day.recipe_id(MealType::Snack), None);
        assert_eq!(day.multiplier(MealType::Snack), 1.0);
        assert!(day.total_calories > 0.0);
    }
}
