use serde::{Deserialize, Serialize};

/// A recipe as the rest of the application consumes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub cuisine: Option<String>,
    pub difficulty: Option<String>,
    pub image: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub meal_type: Vec<String>,
    pub tags: Vec<String>,
    pub prep_time_minutes: Option<i64>,
    pub cook_time_minutes: Option<i64>,
    pub calories_per_serving: Option<i64>,
    pub servings: Option<i64>,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub user_id: Option<i64>,
}

impl Recipe {
    pub fn total_time_minutes(&self) -> i64 {
        self.prep_time_minutes.unwrap_or(0) + self.cook_time_minutes.unwrap_or(0)
    }
}

/// Wire shape of a single recipe.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDto {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub cuisine: Option<String>,
    pub difficulty: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub meal_type: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub prep_time_minutes: Option<i64>,
    pub cook_time_minutes: Option<i64>,
    pub calories_per_serving: Option<i64>,
    pub servings: Option<i64>,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub user_id: Option<i64>,
}

impl RecipeDto {
    pub fn to_recipe(&self) -> Recipe {
        Recipe {
            id: self.id,
            name: self.name.clone(),
            cuisine: self.cuisine.clone(),
            difficulty: self.difficulty.clone(),
            image: self.image.clone(),
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
            meal_type: self.meal_type.clone(),
            tags: self.tags.clone(),
            prep_time_minutes: self.prep_time_minutes,
            cook_time_minutes: self.cook_time_minutes,
            calories_per_serving: self.calories_per_serving,
            servings: self.servings,
            rating: self.rating,
            review_count: self.review_count,
            user_id: self.user_id,
        }
    }
}

/// Paged recipe listing as returned by the listing, search and filter
/// endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipesResponse {
    #[serde(default)]
    pub recipes: Vec<RecipeDto>,
    pub total: Option<i64>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl RecipesResponse {
    pub fn to_recipes(&self) -> Vec<Recipe> {
        self.recipes.iter().map(|r| r.to_recipe()).collect()
    }
}
