use axum::extract::{Path, Query, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use simmer_app::domain::{NewRecipe, RecipeDetails, RecipeSummary, RecipeUpdate, SearchResults};
use simmer_app::infrastructure::db::entities::{category, rating, recipe, user};
use simmer_app::AppContext;
use simmer_errors::AppError;
use std::collections::BTreeMap;

const DEFAULT_PAGE_SIZE: u64 = 12;
const DEFAULT_LISTING_COUNT: usize = 10;

pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/api/recipes", get(list_recipes).post(create_recipe))
        .route("/api/recipes/top-rated", get(top_rated_recipes))
        .route("/api/recipes/latest", get(latest_recipes))
        .route(
            "/api/recipes/{id}",
            get(recipe_details).put(update_recipe).delete(delete_recipe),
        )
        .route("/api/recipes/{id}/ratings", get(rating_summary))
        .route(
            "/api/recipes/{id}/ratings/{user_id}",
            put(upsert_rating).delete(remove_rating),
        )
        .route("/api/users", post(register_user))
        .route(
            "/api/users/{id}",
            get(get_user).delete(delete_user),
        )
        .route("/api/users/{id}/active", put(set_user_active))
        .route("/api/users/{id}/recipes", get(user_recipes))
        .route("/api/categories", get(list_categories).post(add_category))
        .route(
            "/api/categories/{id}",
            put(rename_category).delete(delete_category),
        )
        .with_state(ctx)
}

#[derive(Deserialize)]
struct ListQuery {
    query: Option<String>,
    page: Option<u64>,
    page_size: Option<u64>,
}

#[derive(Deserialize)]
struct CountQuery {
    count: Option<usize>,
}

async fn list_recipes(
    State(ctx): State<AppContext>,
    Query(params): Query<ListQuery>,
) -> Result<Json<SearchResults>, AppError> {
    let page = params.page.unwrap_or(1);
    let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

    let results = match params.query.as_deref().map(str::trim) {
        Some(term) if !term.is_empty() => ctx.recipes.search_recipes(term, page, page_size).await?,
        _ => {
            ctx.recipes
                .get_all_recipes_with_details(page, page_size)
                .await?
        }
    };
    Ok(Json(results))
}

async fn top_rated_recipes(
    State(ctx): State<AppContext>,
    Query(params): Query<CountQuery>,
) -> Result<Json<Vec<RecipeSummary>>, AppError> {
    let count = params.count.unwrap_or(DEFAULT_LISTING_COUNT);
    Ok(Json(ctx.recipes.get_top_rated_recipes(count).await?))
}

async fn latest_recipes(
    State(ctx): State<AppContext>,
    Query(params): Query<CountQuery>,
) -> Result<Json<Vec<RecipeSummary>>, AppError> {
    let count = params.count.unwrap_or(DEFAULT_LISTING_COUNT);
    Ok(Json(ctx.recipes.get_latest_recipes(count).await?))
}

async fn recipe_details(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeDetails>, AppError> {
    ctx.recipes
        .get_recipe_details(id)
        .await?
        .map(Json)
        .ok_or(AppError::RecipeNotFound(id))
}

async fn create_recipe(
    State(ctx): State<AppContext>,
    Json(new): Json<NewRecipe>,
) -> Result<Json<recipe::Model>, AppError> {
    Ok(Json(ctx.recipes.create_recipe(&new).await?))
}

async fn update_recipe(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
    Json(update): Json<RecipeUpdate>,
) -> Result<Json<recipe::Model>, AppError> {
    Ok(Json(ctx.recipes.update_recipe(id, &update).await?))
}

#[derive(Serialize)]
struct DeleteResponse {
    deleted: bool,
}

async fn delete_recipe(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = ctx.recipes.delete_recipe(id).await?;
    Ok(Json(DeleteResponse { deleted }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RatingSummary {
    average_rating: f64,
    total_ratings: u64,
    distribution: BTreeMap<i32, u64>,
    ratings: Vec<rating::Model>,
}

async fn rating_summary(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
) -> Json<RatingSummary> {
    let stats = ctx.ratings.get_statistics(id).await;
    let ratings = ctx.ratings.list_ratings(id).await;
    Json(RatingSummary {
        average_rating: stats.average,
        total_ratings: stats.total,
        distribution: stats.distribution,
        ratings,
    })
}

#[derive(Deserialize)]
struct RatingBody {
    value: i32,
}

/// Refresh payload the star widget consumes after a vote.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RatingResponse {
    success: bool,
    message: String,
    average_rating: f64,
    total_ratings: u64,
    user_rating: Option<i32>,
}

async fn upsert_rating(
    State(ctx): State<AppContext>,
    Path((id, user_id)): Path<(i32, String)>,
    Json(body): Json<RatingBody>,
) -> Result<Json<RatingResponse>, AppError> {
    // Eligibility (recipe exists, not the author) is checked up front; the
    // aggregator's write path only validates value and id shape.
    if !ctx.ratings.can_user_rate_recipe(id, &user_id).await {
        return Err(AppError::Validation(
            "you cannot rate this recipe".to_string(),
        ));
    }

    let rating = ctx.ratings.add_or_update_rating(id, &user_id, body.value).await?;
    let stats = ctx.ratings.get_statistics(id).await;

    Ok(Json(RatingResponse {
        success: true,
        message: format!("rating saved: {} stars", rating.value),
        average_rating: stats.average,
        total_ratings: stats.total,
        user_rating: Some(rating.value),
    }))
}

async fn remove_rating(
    State(ctx): State<AppContext>,
    Path((id, user_id)): Path<(i32, String)>,
) -> Result<Json<RatingResponse>, AppError> {
    let removed = ctx.ratings.remove_rating(id, &user_id).await?;
    let stats = ctx.ratings.get_statistics(id).await;

    Ok(Json(RatingResponse {
        success: removed,
        message: if removed {
            "your rating has been removed".to_string()
        } else {
            "you haven't rated this recipe yet".to_string()
        },
        average_rating: stats.average,
        total_ratings: stats.total,
        user_rating: None,
    }))
}

#[derive(Deserialize)]
struct RegisterBody {
    display_name: String,
}

async fn register_user(
    State(ctx): State<AppContext>,
    Json(body): Json<RegisterBody>,
) -> Result<Json<user::Model>, AppError> {
    Ok(Json(ctx.moderation.register_user(&body.display_name).await?))
}

async fn get_user(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<user::Model>, AppError> {
    ctx.moderation
        .get_user(&id)
        .await?
        .map(Json)
        .ok_or(AppError::UserNotFound(id))
}

async fn delete_user(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = ctx.moderation.delete_user(&id).await?;
    Ok(Json(DeleteResponse { deleted }))
}

#[derive(Deserialize)]
struct ActiveBody {
    is_active: bool,
}

async fn set_user_active(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(body): Json<ActiveBody>,
) -> Result<Json<user::Model>, AppError> {
    Ok(Json(
        ctx.moderation.set_user_active(&id, body.is_active).await?,
    ))
}

async fn user_recipes(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<Vec<RecipeSummary>>, AppError> {
    Ok(Json(ctx.recipes.get_public_recipes_by_user(&id).await?))
}

async fn list_categories(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<category::Model>>, AppError> {
    Ok(Json(ctx.moderation.list_categories().await?))
}

#[derive(Deserialize)]
struct CategoryBody {
    name: String,
}

async fn add_category(
    State(ctx): State<AppContext>,
    Json(body): Json<CategoryBody>,
) -> Result<Json<category::Model>, AppError> {
    Ok(Json(ctx.moderation.add_category(&body.name).await?))
}

async fn rename_category(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
    Json(body): Json<CategoryBody>,
) -> Result<Json<category::Model>, AppError> {
    Ok(Json(ctx.moderation.rename_category(id, &body.name).await?))
}

async fn delete_category(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, AppError> {
    ctx.moderation.delete_category(id).await?;
    Ok(Json(DeleteResponse { deleted: true }))
}
