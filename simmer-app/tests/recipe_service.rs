mod common;

use common::{recipe_input, seed_category, seed_recipe, seed_user, setup};
use simmer_app::domain::{IngredientInput, RecipeUpdate};
use simmer_errors::AppError;

#[tokio::test]
async fn search_matches_title_description_and_ingredients() {
    let ctx = setup().await;
    let alice = seed_user(&ctx, "alice").await;
    let cat = seed_category(&ctx, "Desserts").await;

    seed_recipe(&ctx, "Chocolate Cake", cat.id, &alice.id).await;
    seed_recipe(&ctx, "Chocolate Mousse", cat.id, &alice.id).await;
    seed_recipe(&ctx, "Lemon Tart", cat.id, &alice.id).await;

    // Matches only through an ingredient name.
    let mut input = recipe_input("Secret Pudding", cat.id, &alice.id);
    input.ingredients.push(IngredientInput {
        name: "dark chocolate".to_string(),
        quantity: Some("80 g".to_string()),
    });
    ctx.recipes.create_recipe(&input).await.unwrap();

    let results = ctx.recipes.search_recipes("choc", 1, 12).await.unwrap();
    assert_eq!(results.total_recipes, 3);
    assert_eq!(results.total_pages, 1);
    assert_eq!(results.recipes.len(), 3);
    assert_eq!(results.query, "choc");

    // Case-insensitive.
    let shouting = ctx.recipes.search_recipes("CHOC", 1, 12).await.unwrap();
    assert_eq!(shouting.total_recipes, 3);

    let none = ctx.recipes.search_recipes("paprika", 1, 12).await.unwrap();
    assert_eq!(none.total_recipes, 0);
    assert_eq!(none.total_pages, 0);
    assert!(none.recipes.is_empty());
}

#[tokio::test]
async fn pagination_slices_and_counts_pages() {
    let ctx = setup().await;
    let alice = seed_user(&ctx, "alice").await;
    let cat = seed_category(&ctx, "Mains").await;

    for i in 0..13 {
        seed_recipe(&ctx, &format!("Stew {i}"), cat.id, &alice.id).await;
    }

    let page1 = ctx.recipes.get_all_recipes_with_details(1, 5).await.unwrap();
    assert_eq!(page1.total_recipes, 13);
    assert_eq!(page1.total_pages, 3);
    assert_eq!(page1.recipes.len(), 5);
    assert_eq!(page1.query, "");
    assert!(!page1.has_previous());
    assert!(page1.has_next());

    let page3 = ctx.recipes.get_all_recipes_with_details(3, 5).await.unwrap();
    assert_eq!(page3.recipes.len(), 3);
    assert!(page3.has_previous());
    assert!(!page3.has_next());
}

#[tokio::test]
async fn suspended_authors_disappear_from_all_listings() {
    let ctx = setup().await;
    let alice = seed_user(&ctx, "alice").await;
    let mallory = seed_user(&ctx, "mallory").await;
    let cat = seed_category(&ctx, "Desserts").await;

    seed_recipe(&ctx, "Chocolate Cake", cat.id, &alice.id).await;
    seed_recipe(&ctx, "Chocolate Surprise", cat.id, &mallory.id).await;

    ctx.moderation
        .set_user_active(&mallory.id, false)
        .await
        .unwrap();

    let latest = ctx.recipes.get_latest_recipes(10).await.unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].author_id, alice.id);

    let search = ctx.recipes.search_recipes("choc", 1, 12).await.unwrap();
    assert_eq!(search.total_recipes, 1);

    let all = ctx.recipes.get_all_recipes_with_details(1, 12).await.unwrap();
    assert_eq!(all.total_recipes, 1);

    let top = ctx.recipes.get_top_rated_recipes(10).await.unwrap();
    assert_eq!(top.len(), 1);

    assert!(ctx
        .recipes
        .get_public_recipes_by_user(&mallory.id)
        .await
        .unwrap()
        .is_empty());
    // The author still sees their own recipes.
    assert_eq!(
        ctx.recipes.get_recipes_by_user(&mallory.id).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn top_rated_ranks_by_mean_with_unrated_last() {
    let ctx = setup().await;
    let alice = seed_user(&ctx, "alice").await;
    let bob = seed_user(&ctx, "bob").await;
    let carol = seed_user(&ctx, "carol").await;
    let cat = seed_category(&ctx, "Desserts").await;

    let good = seed_recipe(&ctx, "Good Cake", cat.id, &alice.id).await;
    let great = seed_recipe(&ctx, "Great Cake", cat.id, &alice.id).await;
    let unrated = seed_recipe(&ctx, "Unrated Cake", cat.id, &alice.id).await;

    for (recipe_id, rater, value) in [
        (good.id, &bob, 3),
        (good.id, &carol, 3),
        (great.id, &bob, 5),
        (great.id, &carol, 4),
    ] {
        ctx.ratings
            .add_or_update_rating(recipe_id, &rater.id, value)
            .await
            .unwrap();
    }

    let top = ctx.recipes.get_top_rated_recipes(10).await.unwrap();
    assert_eq!(top.len(), 3);
    assert_eq!(top[0].id, great.id);
    assert_eq!(top[0].average_rating, 4.5);
    assert_eq!(top[1].id, good.id);
    assert_eq!(top[1].average_rating, 3.0);
    assert_eq!(top[2].id, unrated.id);
    assert_eq!(top[2].average_rating, 0.0);
    assert_eq!(top[2].total_ratings, 0);
}

#[tokio::test]
async fn editing_replaces_ingredients_and_instructions() {
    let ctx = setup().await;
    let alice = seed_user(&ctx, "alice").await;
    let cat = seed_category(&ctx, "Desserts").await;
    let recipe = seed_recipe(&ctx, "Brownies", cat.id, &alice.id).await;

    let update = RecipeUpdate {
        title: "Fudgy Brownies".to_string(),
        description: "Now fudgier.".to_string(),
        prep_time_minutes: Some(15),
        cook_time_minutes: Some(30),
        servings: Some(8),
        difficulty: simmer_app::domain::Difficulty::Hard,
        category_id: cat.id,
        ingredients: vec![IngredientInput {
            name: "cocoa".to_string(),
            quantity: Some("50 g".to_string()),
        }],
        instructions: vec![
            "Melt the butter.".to_string(),
            "Fold in the cocoa.".to_string(),
            "Bake.".to_string(),
        ],
    };
    ctx.recipes.update_recipe(recipe.id, &update).await.unwrap();

    let details = ctx
        .recipes
        .get_recipe_details(recipe.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(details.title, "Fudgy Brownies");
    assert_eq!(details.ingredients.len(), 1);
    assert_eq!(details.ingredients[0].name, "cocoa");
    assert_eq!(details.ingredients[0].position, 1);
    assert_eq!(details.instructions.len(), 3);
    assert_eq!(
        details
            .instructions
            .iter()
            .map(|s| s.step_number)
            .collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[tokio::test]
async fn deleting_a_recipe_takes_its_ratings_along() {
    let ctx = setup().await;
    let alice = seed_user(&ctx, "alice").await;
    let bob = seed_user(&ctx, "bob").await;
    let cat = seed_category(&ctx, "Desserts").await;
    let recipe = seed_recipe(&ctx, "Brownies", cat.id, &alice.id).await;

    ctx.ratings
        .add_or_update_rating(recipe.id, &bob.id, 5)
        .await
        .unwrap();

    assert!(ctx.recipes.delete_recipe(recipe.id).await.unwrap());
    assert!(ctx.recipes.get_recipe_details(recipe.id).await.unwrap().is_none());
    assert_eq!(ctx.ratings.get_total_ratings(recipe.id).await, 0);

    // Second delete is a no-op.
    assert!(!ctx.recipes.delete_recipe(recipe.id).await.unwrap());
}

#[tokio::test]
async fn create_recipe_validates_its_references() {
    let ctx = setup().await;
    let alice = seed_user(&ctx, "alice").await;
    let cat = seed_category(&ctx, "Desserts").await;

    let err = ctx
        .recipes
        .create_recipe(&recipe_input("Cake", 9999, &alice.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::CategoryNotFound(9999)));

    let err = ctx
        .recipes
        .create_recipe(&recipe_input("Cake", cat.id, "nobody"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UserNotFound(_)));

    ctx.moderation
        .set_user_active(&alice.id, false)
        .await
        .unwrap();
    let err = ctx
        .recipes
        .create_recipe(&recipe_input("Cake", cat.id, &alice.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AuthorSuspended(_)));
}

#[tokio::test]
async fn details_carry_names_and_statistics() {
    let ctx = setup().await;
    let alice = seed_user(&ctx, "alice").await;
    let bob = seed_user(&ctx, "bob").await;
    let cat = seed_category(&ctx, "Desserts").await;
    let recipe = seed_recipe(&ctx, "Brownies", cat.id, &alice.id).await;

    ctx.ratings
        .add_or_update_rating(recipe.id, &bob.id, 4)
        .await
        .unwrap();

    let details = ctx
        .recipes
        .get_recipe_details(recipe.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(details.category_name.as_deref(), Some("Desserts"));
    assert_eq!(details.author_name.as_deref(), Some("alice"));
    assert_eq!(details.statistics.average, 4.0);
    assert_eq!(details.statistics.total, 1);
    assert_eq!(details.statistics.distribution[&4], 1);
}
