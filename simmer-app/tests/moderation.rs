mod common;

use common::{seed_category, seed_recipe, seed_user, setup};
use simmer_errors::AppError;

#[tokio::test]
async fn category_names_are_unique() {
    let ctx = setup().await;
    seed_category(&ctx, "Desserts").await;

    let err = ctx.moderation.add_category("Desserts").await.unwrap_err();
    assert!(matches!(err, AppError::CategoryNameTaken(_)));

    let err = ctx.moderation.add_category("   ").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn category_delete_is_restricted_while_recipes_reference_it() {
    let ctx = setup().await;
    let alice = seed_user(&ctx, "alice").await;
    let cat = seed_category(&ctx, "Desserts").await;
    let recipe = seed_recipe(&ctx, "Brownies", cat.id, &alice.id).await;

    let err = ctx.moderation.delete_category(cat.id).await.unwrap_err();
    assert!(matches!(err, AppError::CategoryInUse(_)));

    ctx.recipes.delete_recipe(recipe.id).await.unwrap();
    ctx.moderation.delete_category(cat.id).await.unwrap();

    let categories = ctx.moderation.list_categories().await.unwrap();
    assert!(categories.is_empty());

    let err = ctx.moderation.delete_category(cat.id).await.unwrap_err();
    assert!(matches!(err, AppError::CategoryNotFound(_)));
}

#[tokio::test]
async fn rename_category_checks_for_collisions() {
    let ctx = setup().await;
    let desserts = seed_category(&ctx, "Desserts").await;
    seed_category(&ctx, "Mains").await;

    let err = ctx
        .moderation
        .rename_category(desserts.id, "Mains")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::CategoryNameTaken(_)));

    // Renaming to its own name is fine.
    let renamed = ctx
        .moderation
        .rename_category(desserts.id, "Desserts")
        .await
        .unwrap();
    assert_eq!(renamed.name, "Desserts");

    let renamed = ctx
        .moderation
        .rename_category(desserts.id, "Baking")
        .await
        .unwrap();
    assert_eq!(renamed.name, "Baking");
}

#[tokio::test]
async fn deleting_a_user_cascades_recipes_but_keeps_their_votes() {
    let ctx = setup().await;
    let alice = seed_user(&ctx, "alice").await;
    let bob = seed_user(&ctx, "bob").await;
    let cat = seed_category(&ctx, "Desserts").await;

    let alices = seed_recipe(&ctx, "Alice's Cake", cat.id, &alice.id).await;
    let bobs = seed_recipe(&ctx, "Bob's Cake", cat.id, &bob.id).await;

    // bob votes on alice's recipe, alice votes on bob's.
    ctx.ratings
        .add_or_update_rating(alices.id, &bob.id, 5)
        .await
        .unwrap();
    ctx.ratings
        .add_or_update_rating(bobs.id, &alice.id, 4)
        .await
        .unwrap();

    assert!(ctx.moderation.delete_user(&bob.id).await.unwrap());
    assert!(ctx.moderation.get_user(&bob.id).await.unwrap().is_none());

    // bob's recipe (and the ratings on it) are gone...
    assert!(ctx.recipes.get_recipe_details(bobs.id).await.unwrap().is_none());
    assert_eq!(ctx.ratings.get_total_ratings(bobs.id).await, 0);

    // ...but the vote bob cast on alice's recipe survives.
    assert_eq!(ctx.ratings.get_total_ratings(alices.id).await, 1);
    assert_eq!(ctx.ratings.get_average_rating(alices.id).await, 5.0);
}

#[tokio::test]
async fn suspend_and_reinstate_users() {
    let ctx = setup().await;
    let alice = seed_user(&ctx, "alice").await;

    let suspended = ctx
        .moderation
        .set_user_active(&alice.id, false)
        .await
        .unwrap();
    assert!(!suspended.is_active);

    let restored = ctx
        .moderation
        .set_user_active(&alice.id, true)
        .await
        .unwrap();
    assert!(restored.is_active);

    let err = ctx
        .moderation
        .set_user_active("nobody", true)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UserNotFound(_)));

    assert!(!ctx.moderation.delete_user("nobody").await.unwrap());
}

#[tokio::test]
async fn registration_validates_display_name() {
    let ctx = setup().await;

    let err = ctx.moderation.register_user("  ").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let user = ctx.moderation.register_user("alice").await.unwrap();
    assert!(user.is_active);
    assert!(!user.id.is_empty());
}
