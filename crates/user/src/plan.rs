use moodmeal_shared::user::{CookedRecipe, User};
use time::{Duration, OffsetDateTime, Weekday};

#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan<'a> {
    pub weekday: Weekday,
    pub recipes: Vec<&'a CookedRecipe>,
}

/// What the user cooked during the seven days before `now`, grouped by
/// weekday from Monday to Sunday. Days without entries are left out and
/// each day keeps the history order (newest first).
pub fn weekly_plan(user: &User, now: OffsetDateTime) -> Vec<DayPlan<'_>> {
    let since = now - Duration::days(7);
    let recent: Vec<&CookedRecipe> = user
        .cooked_recipes
        .iter()
        .filter(|c| c.cooking_date >= since)
        .collect();

    let mut plan = Vec::new();
    let mut weekday = Weekday::Monday;
    for _ in 0..7 {
        let recipes: Vec<&CookedRecipe> = recent
            .iter()
            .copied()
            .filter(|c| c.day_of_week() == weekday)
            .collect();

        if !recipes.is_empty() {
            plan.push(DayPlan { weekday, recipes });
        }

        weekday = weekday.next();
    }

    plan
}

#[cfg(test)]
mod tests {
    use moodmeal_shared::recipe::Recipe;
    use time::macros::datetime;

    use super::*;

    fn cooked(id: &str, date: OffsetDateTime) -> CookedRecipe {
        CookedRecipe::new(
            &Recipe {
                id: id.to_owned(),
                name: id.to_owned(),
                ..Default::default()
            },
            date,
        )
    }

    #[test]
    fn test_weekly_plan_window_and_order() {
        // Wednesday
        let now = datetime!(2025-04-23 18:00 UTC);
        let mut user = User::default();
        for entry in [
            cooked("too-old", now - Duration::days(8)),
            cooked("thu", datetime!(2025-04-17 19:00 UTC)),
            cooked("mon-late", datetime!(2025-04-21 20:00 UTC)),
            cooked("mon-early", datetime!(2025-04-21 08:00 UTC)),
            cooked("sun", datetime!(2025-04-20 12:00 UTC)),
            cooked("wed", datetime!(2025-04-23 12:00 UTC)),
        ] {
            user.record_cooked(entry);
        }

        let plan = weekly_plan(&user, now);
        let days: Vec<_> = plan
            .iter()
            .map(|day| {
                (
                    day.weekday,
                    day.recipes
                        .iter()
                        .map(|c| c.recipe_id.as_str())
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        assert_eq!(
            days,
            vec![
                (Weekday::Monday, vec!["mon-late", "mon-early"]),
                (Weekday::Wednesday, vec!["wed"]),
                (Weekday::Thursday, vec!["thu"]),
                (Weekday::Sunday, vec!["sun"]),
            ]
        );
    }

    #[test]
    fn test_empty_history() {
        assert!(weekly_plan(&User::default(), OffsetDateTime::now_utc()).is_empty());
    }
}
