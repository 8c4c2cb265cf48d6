use anyhow::Context;
use meal_planner::{MealPlanner, MealType};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().without_time().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args();
    let bin = args.next().unwrap_or_else(|| "plan".into());
    let Some(catalog_file) = args.next() else {
        anyhow::bail!("Usage: {bin} <catalog.toml> [daily_calories] [planner.toml]");
    };
    let daily_calories = match args.next() {
        Some(s) => s.parse::<u32>().context("daily calories must be a number")?,
        None => 2000,
    };
    let config = args
        .next()
        .map(std::fs::read_to_string)
        .transpose()
        .context("reading planner config")?;

    let catalog = std::fs::read_to_string(&catalog_file)
        .with_context(|| format!("reading {catalog_file}"))?;
    let planner = MealPlanner::from_toml(&catalog, config.as_deref())?;

    let plan = planner.generate_week_plan(daily_calories);
    for (day, day_plan) in plan.iter() {
        println!(
            "{day}: {:.0} / {} kcal ({:.1}%) {}",
            day_plan.total_calories,
            day_plan.target_calories,
            day_plan.accuracy(),
            day_plan.status
        );
        let resolved = planner.resolve_day(day_plan)?;
        for meal in MealType::ALL {
            match &resolved.meals[meal] {
                Some(recipe) => println!(
                    "  {meal:<9} {} ({} kcal, {})",
                    recipe.name, recipe.calories, recipe.base_portion
                ),
                None => println!("  {meal:<9} -"),
            }
        }
    }
    println!("week accuracy: {:.1}%", plan.accuracy());

    if std::env::var_os("PLAN_JSON").is_some() {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    }
    Ok(())
}
