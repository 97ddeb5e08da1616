mod recipe_create_table;
mod recipe_mood_create_table;
mod recipe_mood_create_unique_idx;
mod user_create_email_idx;
mod user_create_table;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "main",
    "m0001",
    vec_box![],
    vec_box![
        recipe_create_table::Operation,
        recipe_mood_create_table::Operation,
        recipe_mood_create_unique_idx::Operation,
        user_create_table::Operation,
        user_create_email_idx::Operation,
    ]
);
