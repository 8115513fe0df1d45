// ABOUTME: Shopping list commands for recipe-finder-cli
// ABOUTME: Adds entries directly or from a recipe's ingredients, removes and clears entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use recipe_finder::{models::RecipeCard, services::RecipeService, store::ClientStore};

use crate::helpers::display::{display_added, display_list};

type Result<T> = anyhow::Result<T>;

/// Show the shopping list
pub async fn list(store: &ClientStore) -> Result<()> {
    display_list(
        "Shopping list",
        &store.shopping_list().await?,
        "The shopping list is empty.",
    );
    Ok(())
}

/// Add entries
pub async fn add(store: &ClientStore, items: &[String]) -> Result<()> {
    let added = store.add_to_shopping_list(items).await?;
    display_added("shopping list", &added);
    Ok(())
}

/// Add the ingredients of a recipe that are not already in the pantry
pub async fn add_recipe(
    recipes: &RecipeService,
    store: &ClientStore,
    source: &str,
    id: &str,
) -> Result<()> {
    let detail = recipes.recipe_detail(source, id).await?;
    let card = RecipeCard {
        id: detail.id.clone(),
        title: detail.title.clone(),
        image: detail.image.clone(),
        source: detail.source,
        source_url: detail.source_url.clone(),
        ready_in_minutes: detail.ready_in_minutes,
        servings: detail.servings,
        used_ingredients: Vec::new(),
        missed_ingredients: detail.ingredients.iter().map(|i| i.name.clone()).collect(),
        unused_ingredients: Vec::new(),
    };

    let added = store.add_missing_to_shopping_list(&card).await?;
    println!("{}", detail.title);
    display_added("shopping list", &added);
    Ok(())
}

/// Remove an entry
pub async fn remove(store: &ClientStore, item: &str) -> Result<()> {
    if store.remove_from_shopping_list(item).await? {
        println!("Removed {}", item.trim());
    } else {
        println!("{} is not on the shopping list", item.trim());
    }
    Ok(())
}

/// Remove every entry
pub async fn clear(store: &ClientStore) -> Result<()> {
    store.clear_shopping_list().await?;
    println!("Shopping list cleared");
    Ok(())
}
