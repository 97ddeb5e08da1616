use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Recipe {
    Table,
    Id,
    Name,
    CreatorId,
    Body,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum RecipeMood {
    Table,
    RecipeId,
    Mood,
}

#[derive(Iden, Clone)]
pub enum User {
    Table,
    Id,
    Email,
    Body,
    CreatedAt,
}
