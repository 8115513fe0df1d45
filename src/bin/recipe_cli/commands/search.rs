// ABOUTME: Ingredient search command for recipe-finder-cli
// ABOUTME: Queries both providers directly, defaulting to the saved pantry as the ingredient list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use recipe_finder::{errors::AppError, services::RecipeService, store::ClientStore};
use tracing::info;

use crate::helpers::display::display_search_results;

type Result<T> = anyhow::Result<T>;

/// Search by the given ingredients, or by the pantry when none are given
pub async fn run(
    recipes: &RecipeService,
    store: &ClientStore,
    ingredients: Option<String>,
    diet: Option<&str>,
    cuisine: Option<&str>,
    number: Option<u32>,
) -> Result<()> {
    let ingredients = match ingredients {
        Some(ingredients) => ingredients,
        None => {
            let pantry = store.pantry().await?;
            if pantry.is_empty() {
                return Err(AppError::missing_field("ingredients").into());
            }
            info!("Searching with {} pantry items", pantry.len());
            pantry.join(",")
        }
    };

    let results = recipes.search(&ingredients, diet, cuisine, number).await?;
    display_search_results(&results);
    Ok(())
}
