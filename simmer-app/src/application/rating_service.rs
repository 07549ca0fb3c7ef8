use crate::domain::RatingStatistics;
use crate::infrastructure::db::entities::rating;
use crate::infrastructure::db::{RatingRepository, RecipeRepository};
use simmer_errors::AppError;
use std::collections::{BTreeMap, HashMap};

/// Recipes need at least this many ratings to appear in the top-rated
/// sample.
pub const MIN_RATINGS_FOR_TOP_SAMPLE: u64 = 5;

/// Single source of truth for a recipe's aggregate rating state. Statistics
/// are recomputed from the raw rating rows on every read instead of being
/// kept as counters, so they can never drift from the persisted ratings.
pub struct RatingService {
    ratings: RatingRepository,
    recipes: RecipeRepository,
}

impl RatingService {
    pub fn new(ratings: RatingRepository, recipes: RecipeRepository) -> Self {
        Self { ratings, recipes }
    }

    /// Create the rating for (recipe, user), or overwrite its value and
    /// timestamp if one already exists. Self-rating is not re-checked here;
    /// user-facing callers go through [`Self::can_user_rate_recipe`] first,
    /// which keeps this write path usable for administrative overrides.
    pub async fn add_or_update_rating(
        &self,
        recipe_id: i32,
        user_id: &str,
        value: i32,
    ) -> Result<rating::Model, AppError> {
        if !(1..=5).contains(&value) {
            return Err(AppError::InvalidRatingValue(value));
        }
        if user_id.trim().is_empty() {
            return Err(AppError::MissingUserId);
        }
        if recipe_id <= 0 {
            return Err(AppError::InvalidRecipeId(recipe_id));
        }
        if !self.recipes.exists(recipe_id).await? {
            return Err(AppError::RecipeNotFound(recipe_id));
        }

        tracing::info!(recipe_id, user_id, value, "adding or updating rating");
        Ok(self.ratings.upsert(recipe_id, user_id, value).await?)
    }

    /// Eligibility check for end-user rating paths. Never raises: an empty
    /// user id, a missing recipe, the recipe's own author, or a gateway
    /// failure all answer false.
    pub async fn can_user_rate_recipe(&self, recipe_id: i32, user_id: &str) -> bool {
        if user_id.trim().is_empty() {
            return false;
        }
        match self.recipes.find_by_id(recipe_id).await {
            Ok(Some(recipe)) => recipe.author_id != user_id,
            Ok(None) => false,
            Err(err) => {
                tracing::error!(error = %err, recipe_id, "rating eligibility check failed");
                false
            }
        }
    }

    /// True if a matching rating existed and was deleted; false when there
    /// was nothing to remove.
    pub async fn remove_rating(&self, recipe_id: i32, user_id: &str) -> Result<bool, AppError> {
        let removed = self
            .ratings
            .delete_by_recipe_and_user(recipe_id, user_id)
            .await?;
        if removed {
            tracing::info!(recipe_id, user_id, "rating removed");
        }
        Ok(removed)
    }

    /// Mean rating rounded to one decimal place; 0.0 for an unrated recipe.
    /// Statistics reads degrade to defaults on gateway failure so a broken
    /// statistics query never takes down page rendering.
    pub async fn get_average_rating(&self, recipe_id: i32) -> f64 {
        self.statistics_or_default(recipe_id).await.average
    }

    pub async fn get_total_ratings(&self, recipe_id: i32) -> u64 {
        match self.ratings.count_for_recipe(recipe_id).await {
            Ok(count) => count,
            Err(err) => {
                tracing::error!(error = %err, recipe_id, "failed to count ratings");
                0
            }
        }
    }

    /// Star value 1..=5 to count; all five keys always present.
    pub async fn get_rating_distribution(&self, recipe_id: i32) -> BTreeMap<i32, u64> {
        self.statistics_or_default(recipe_id).await.distribution
    }

    pub async fn get_statistics(&self, recipe_id: i32) -> RatingStatistics {
        self.statistics_or_default(recipe_id).await
    }

    pub async fn get_user_rating(&self, recipe_id: i32, user_id: &str) -> Option<rating::Model> {
        if user_id.trim().is_empty() {
            return None;
        }
        match self.ratings.find_by_recipe_and_user(recipe_id, user_id).await {
            Ok(rating) => rating,
            Err(err) => {
                tracing::error!(error = %err, recipe_id, user_id, "failed to look up user rating");
                None
            }
        }
    }

    pub async fn has_user_rated(&self, recipe_id: i32, user_id: &str) -> bool {
        self.get_user_rating(recipe_id, user_id).await.is_some()
    }

    /// All ratings for a recipe, newest first.
    pub async fn list_ratings(&self, recipe_id: i32) -> Vec<rating::Model> {
        match self.ratings.list_for_recipe(recipe_id).await {
            Ok(ratings) => ratings,
            Err(err) => {
                tracing::error!(error = %err, recipe_id, "failed to list ratings");
                Vec::new()
            }
        }
    }

    /// One representative (newest) rating per recipe that has at least
    /// [`MIN_RATINGS_FOR_TOP_SAMPLE`] ratings, ordered by average rating
    /// descending then rating count descending. Reporting path only.
    pub async fn top_rated_sample(&self, count: usize) -> Vec<rating::Model> {
        let all = match self.ratings.find_all().await {
            Ok(ratings) => ratings,
            Err(err) => {
                tracing::error!(error = %err, "failed to load ratings for top-rated sample");
                return Vec::new();
            }
        };

        // find_all is newest-first, so the first rating seen per recipe is
        // the representative.
        let mut groups: HashMap<i32, (Vec<i32>, rating::Model)> = HashMap::new();
        for rating in all {
            match groups.entry(rating.recipe_id) {
                std::collections::hash_map::Entry::Occupied(mut entry) => {
                    entry.get_mut().0.push(rating.value);
                }
                std::collections::hash_map::Entry::Vacant(entry) => {
                    let value = rating.value;
                    entry.insert((vec![value], rating));
                }
            }
        }

        let mut ranked: Vec<(f64, usize, rating::Model)> = groups
            .into_values()
            .filter(|(values, _)| values.len() as u64 >= MIN_RATINGS_FOR_TOP_SAMPLE)
            .map(|(values, representative)| {
                let sum: i64 = values.iter().map(|&v| i64::from(v)).sum();
                let mean = sum as f64 / values.len() as f64;
                (mean, values.len(), representative)
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.1.cmp(&a.1))
        });

        ranked
            .into_iter()
            .take(count)
            .map(|(_, _, representative)| representative)
            .collect()
    }

    async fn statistics_or_default(&self, recipe_id: i32) -> RatingStatistics {
        match self.ratings.values_for_recipe(recipe_id).await {
            Ok(values) => RatingStatistics::from_values(&values),
            Err(err) => {
                tracing::error!(error = %err, recipe_id, "failed to compute rating statistics");
                RatingStatistics::empty()
            }
        }
    }
}
