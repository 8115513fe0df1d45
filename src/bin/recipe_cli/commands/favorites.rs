// ABOUTME: Favorites commands for recipe-finder-cli
// ABOUTME: Lists, toggles and removes saved recipes in the configured state store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use recipe_finder::{models::Favorite, services::RecipeService, store::ClientStore};

use crate::helpers::display::display_favorites;

type Result<T> = anyhow::Result<T>;

/// List saved favorites
pub async fn list(store: &ClientStore) -> Result<()> {
    display_favorites(&store.favorites().await?);
    Ok(())
}

/// Save a recipe, or unsave it when already saved
///
/// The recipe is looked up first so the saved entry carries its title and image.
pub async fn toggle(
    recipes: &RecipeService,
    store: &ClientStore,
    source: &str,
    id: &str,
) -> Result<()> {
    let detail = recipes.recipe_detail(source, id).await?;
    let favorite = Favorite::from(&detail);

    if store.toggle_favorite(&favorite).await? {
        println!("Saved {} ({})", favorite.title, favorite.key());
    } else {
        println!("Removed {} ({})", favorite.title, favorite.key());
    }
    Ok(())
}

/// Remove a favorite by its `source:id` key
pub async fn remove(store: &ClientStore, key: &str) -> Result<()> {
    if store.remove_favorite(key).await? {
        println!("Removed {key}");
    } else {
        println!("{key} is not a favorite");
    }
    Ok(())
}
