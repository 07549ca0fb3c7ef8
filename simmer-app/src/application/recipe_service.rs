use crate::domain::{
    IngredientLine, InstructionStep, NewRecipe, RatingStatistics, RecipeDetails, RecipeSummary,
    RecipeUpdate, SearchResults,
};
use crate::infrastructure::db::entities::recipe;
use crate::infrastructure::db::{
    CategoryRepository, RatingRepository, RecipeRepository, UserRepository,
};
use simmer_errors::AppError;
use std::collections::HashMap;

/// Produces the recipe listings that depend on rating state. Every public
/// listing excludes recipes whose author is suspended.
pub struct RecipeService {
    recipes: RecipeRepository,
    ratings: RatingRepository,
    categories: CategoryRepository,
    users: UserRepository,
}

impl RecipeService {
    pub fn new(
        recipes: RecipeRepository,
        ratings: RatingRepository,
        categories: CategoryRepository,
        users: UserRepository,
    ) -> Self {
        Self {
            recipes,
            ratings,
            categories,
            users,
        }
    }

    /// Active-author recipes ranked by mean rating, descending. Unrated
    /// recipes rank as mean 0 and so sort below any rated recipe; ties break
    /// by rating count, then recency.
    pub async fn get_top_rated_recipes(&self, count: usize) -> Result<Vec<RecipeSummary>, AppError> {
        let mut recipes = self.recipes.list_by_active_authors().await?;
        let values = self.values_by_recipe().await?;

        let score = |recipe: &recipe::Model| -> (f64, usize) {
            match values.get(&recipe.id) {
                Some(v) if !v.is_empty() => {
                    let sum: i64 = v.iter().map(|&x| i64::from(x)).sum();
                    (sum as f64 / v.len() as f64, v.len())
                }
                _ => (0.0, 0),
            }
        };

        // Input is newest-first; the stable sort keeps recency as the final
        // tiebreak.
        recipes.sort_by(|a, b| {
            let (mean_a, count_a) = score(a);
            let (mean_b, count_b) = score(b);
            mean_b
                .partial_cmp(&mean_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(count_b.cmp(&count_a))
        });
        recipes.truncate(count);

        Ok(self.summarize(&recipes, &values).await?)
    }

    pub async fn get_latest_recipes(&self, count: usize) -> Result<Vec<RecipeSummary>, AppError> {
        let mut recipes = self.recipes.list_by_active_authors().await?;
        recipes.truncate(count);
        let values = self.values_by_recipe().await?;
        Ok(self.summarize(&recipes, &values).await?)
    }

    /// Case-insensitive substring search over title, description, and
    /// ingredient names, newest first, 1-based pages.
    pub async fn search_recipes(
        &self,
        term: &str,
        page: u64,
        page_size: u64,
    ) -> Result<SearchResults, AppError> {
        let recipes = self.recipes.list_by_active_authors().await?;
        let ingredients = self.recipes.load_ingredients(&recipes).await?;

        let needle = term.trim().to_lowercase();
        let matches: Vec<recipe::Model> = recipes
            .into_iter()
            .zip(ingredients)
            .filter(|(recipe, ingredients)| {
                needle.is_empty()
                    || recipe.title.to_lowercase().contains(&needle)
                    || recipe.description.to_lowercase().contains(&needle)
                    || ingredients
                        .iter()
                        .any(|i| i.name.to_lowercase().contains(&needle))
            })
            .map(|(recipe, _)| recipe)
            .collect();

        self.paginate(matches, term.to_string(), page, page_size)
            .await
    }

    pub async fn get_all_recipes_with_details(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<SearchResults, AppError> {
        let recipes = self.recipes.list_by_active_authors().await?;
        self.paginate(recipes, String::new(), page, page_size).await
    }

    pub async fn get_recipe_details(&self, id: i32) -> Result<Option<RecipeDetails>, AppError> {
        let Some((recipe, ingredients, instructions)) =
            self.recipes.find_with_children(id).await?
        else {
            return Ok(None);
        };

        let category_name = self
            .categories
            .find_by_id(recipe.category_id)
            .await?
            .map(|c| c.name);
        let author_name = self
            .users
            .find_by_id(&recipe.author_id)
            .await?
            .map(|u| u.display_name);
        let values = self.ratings.values_for_recipe(id).await?;

        Ok(Some(RecipeDetails {
            id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            prep_time_minutes: recipe.prep_time_minutes,
            cook_time_minutes: recipe.cook_time_minutes,
            servings: recipe.servings,
            difficulty: recipe.difficulty,
            category_id: recipe.category_id,
            category_name,
            author_id: recipe.author_id,
            author_name,
            created_at: recipe.created_at,
            ingredients: ingredients
                .into_iter()
                .map(|i| IngredientLine {
                    name: i.name,
                    quantity: i.quantity,
                    position: i.position,
                })
                .collect(),
            instructions: instructions
                .into_iter()
                .map(|i| InstructionStep {
                    step_number: i.step_number,
                    description: i.description,
                })
                .collect(),
            statistics: RatingStatistics::from_values(&values),
        }))
    }

    /// The author's own view of their recipes; includes recipes even while
    /// the author is suspended.
    pub async fn get_recipes_by_user(&self, user_id: &str) -> Result<Vec<RecipeSummary>, AppError> {
        let recipes = self.recipes.list_by_author(user_id).await?;
        let values = self.values_by_recipe().await?;
        Ok(self.summarize(&recipes, &values).await?)
    }

    /// The public profile view: empty while the author is suspended.
    pub async fn get_public_recipes_by_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<RecipeSummary>, AppError> {
        match self.users.find_by_id(user_id).await? {
            Some(user) if user.is_active => self.get_recipes_by_user(user_id).await,
            _ => Ok(Vec::new()),
        }
    }

    pub async fn create_recipe(&self, new: &NewRecipe) -> Result<recipe::Model, AppError> {
        if new.title.trim().is_empty() {
            return Err(AppError::Validation("recipe title cannot be empty".into()));
        }

        let author = self
            .users
            .find_by_id(&new.author_id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(new.author_id.clone()))?;
        if !author.is_active {
            return Err(AppError::AuthorSuspended(new.author_id.clone()));
        }

        if self.categories.find_by_id(new.category_id).await?.is_none() {
            return Err(AppError::CategoryNotFound(new.category_id));
        }

        tracing::info!(author_id = %new.author_id, title = %new.title, "creating recipe");
        Ok(self.recipes.create(new).await?)
    }

    pub async fn update_recipe(
        &self,
        id: i32,
        update: &RecipeUpdate,
    ) -> Result<recipe::Model, AppError> {
        if update.title.trim().is_empty() {
            return Err(AppError::Validation("recipe title cannot be empty".into()));
        }
        if !self.recipes.exists(id).await? {
            return Err(AppError::RecipeNotFound(id));
        }
        if self
            .categories
            .find_by_id(update.category_id)
            .await?
            .is_none()
        {
            return Err(AppError::CategoryNotFound(update.category_id));
        }

        tracing::info!(recipe_id = id, "updating recipe");
        Ok(self.recipes.update(id, update).await?)
    }

    pub async fn delete_recipe(&self, id: i32) -> Result<bool, AppError> {
        let deleted = self.recipes.delete(id).await?;
        if deleted {
            tracing::info!(recipe_id = id, "recipe deleted");
        }
        Ok(deleted)
    }

    async fn values_by_recipe(&self) -> Result<HashMap<i32, Vec<i32>>, sea_orm::DbErr> {
        let mut grouped: HashMap<i32, Vec<i32>> = HashMap::new();
        for rating in self.ratings.find_all().await? {
            grouped.entry(rating.recipe_id).or_default().push(rating.value);
        }
        Ok(grouped)
    }

    async fn paginate(
        &self,
        matches: Vec<recipe::Model>,
        query: String,
        page: u64,
        page_size: u64,
    ) -> Result<SearchResults, AppError> {
        let total_recipes = matches.len() as u64;
        let total_pages = SearchResults::page_count(total_recipes, page_size);
        let page = page.max(1);

        let slice: Vec<recipe::Model> = matches
            .into_iter()
            .skip(((page - 1) * page_size) as usize)
            .take(page_size as usize)
            .collect();

        let values = self.values_by_recipe().await?;
        let recipes = self.summarize(&slice, &values).await?;

        Ok(SearchResults {
            recipes,
            query,
            current_page: page,
            total_pages,
            total_recipes,
        })
    }

    async fn summarize(
        &self,
        recipes: &[recipe::Model],
        values: &HashMap<i32, Vec<i32>>,
    ) -> Result<Vec<RecipeSummary>, sea_orm::DbErr> {
        let mut category_names: HashMap<i32, Option<String>> = HashMap::new();
        let mut author_names: HashMap<String, Option<String>> = HashMap::new();

        let mut summaries = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            if !category_names.contains_key(&recipe.category_id) {
                let name = self
                    .categories
                    .find_by_id(recipe.category_id)
                    .await?
                    .map(|c| c.name);
                category_names.insert(recipe.category_id, name);
            }
            if !author_names.contains_key(&recipe.author_id) {
                let name = self
                    .users
                    .find_by_id(&recipe.author_id)
                    .await?
                    .map(|u| u.display_name);
                author_names.insert(recipe.author_id.clone(), name);
            }

            let stats = RatingStatistics::from_values(
                values.get(&recipe.id).map(Vec::as_slice).unwrap_or(&[]),
            );

            summaries.push(RecipeSummary {
                id: recipe.id,
                title: recipe.title.clone(),
                description: recipe.description.clone(),
                difficulty: recipe.difficulty,
                category_id: recipe.category_id,
                category_name: category_names[&recipe.category_id].clone(),
                author_id: recipe.author_id.clone(),
                author_name: author_names[&recipe.author_id].clone(),
                created_at: recipe.created_at,
                average_rating: stats.average,
                total_ratings: stats.total,
            });
        }

        Ok(summaries)
    }
}
