use indoc::indoc;
use meal_planner::{adjust_portion, scale::scale_ingredients, Difficulty, MealType, Recipe, RecipeId};
use test_case::test_case;

fn chicken() -> Recipe {
    Recipe {
        id: RecipeId(42),
        name: "Курица с гречкой".into(),
        meal_type: MealType::Lunch,
        calories: 520,
        protein: 45.0,
        fat: 12.4,
        carbs: 55.0,
        ingredients: indoc! {"
            200г куриной грудки
            80г гречки
            1 ст.л оливкового масла
            соль по вкусу
        "}
        .into(),
        instructions: "Отварить гречку, обжарить курицу.".into(),
        cooking_time: 35,
        difficulty: Difficulty::Medium,
        base_portion: "1 порция".into(),
    }
}

#[test_case("200г куриной грудки", 1.5 => "300г куриной грудки")]
#[test_case("соль по вкусу", 1.5 => "соль по вкусу")]
#[test_case("150 г творога", 2.0 => "300г творога"; "space is removed")]
#[test_case("2 шт яйца", 1.25 => "2.5шт яйца")]
#[test_case("0.3 ч.л соли", 0.5 => "0.15ч.л соли")]
#[test_case("1 кг картофеля", 0.8 => "0.8кг картофеля")]
#[test_case("250 грамм муки", 1.2 => "300грамм муки")]
fn single_line(line: &str, multiplier: f64) -> String {
    scale_ingredients(line, multiplier)
}

#[test]
fn scaled_recipe() {
    let recipe = chicken();
    let adjusted = adjust_portion(&recipe, 1.5).unwrap();

    assert_eq!(adjusted.id, recipe.id);
    assert_eq!(adjusted.calories, 780);
    assert_eq!(adjusted.protein, 67.5);
    assert_eq!(adjusted.fat, 18.6);
    assert_eq!(adjusted.carbs, 82.5);
    assert_eq!(
        adjusted.ingredients,
        indoc! {"
            300г куриной грудки
            120г гречки
            1.5ст.л оливкового масла
            соль по вкусу"}
    );
    assert_eq!(adjusted.base_portion, "1.5 порции");
    assert_eq!(adjusted.multiplier, 1.5);
    assert_eq!(adjusted.original_calories, 520);
    assert_eq!(adjusted.original_ingredients, recipe.ingredients);

    assert_eq!(adjusted.name, recipe.name);
    assert_eq!(adjusted.instructions, recipe.instructions);
    assert_eq!(adjusted.cooking_time, recipe.cooking_time);
    assert_eq!(adjusted.difficulty, recipe.difficulty);
    assert_eq!(adjusted.meal_type, recipe.meal_type);
}

#[test]
fn identity() {
    let recipe = chicken();
    let adjusted = adjust_portion(&recipe, 1.0).unwrap();
    assert!(adjusted.is_base_portion());
    assert_eq!(adjusted.clone().into_inner(), recipe);
}

#[test_case(0.5)]
#[test_case(0.8)]
#[test_case(1.25)]
#[test_case(2.0)]
fn calories_are_proportional(multiplier: f64) {
    let recipe = chicken();
    let adjusted = adjust_portion(&recipe, multiplier).unwrap();
    let expected = recipe.calories as f64 * multiplier;
    assert!((adjusted.calories as f64 - expected).abs() <= 0.5);
    assert!((adjusted.protein - recipe.protein * multiplier).abs() <= 0.05);
}

#[test]
fn original_is_untouched() {
    let recipe = chicken();
    let before = recipe.clone();
    let _ = adjust_portion(&recipe, 2.0).unwrap();
    assert_eq!(recipe, before);
}
