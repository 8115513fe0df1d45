// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors
// ABOUTME: Output formatting helpers for recipe-finder-cli
// ABOUTME: Provides consistent display functions for recipe cards and saved collections

use recipe_finder::models::{Favorite, RecipeCard, SearchResults};

/// Display one provider's cards under a heading
fn display_cards(heading: &str, cards: &[RecipeCard]) {
    if cards.is_empty() {
        return;
    }
    println!("\n{heading} ({})", cards.len());
    println!("{}", "=".repeat(60));
    for card in cards {
        println!("   {:<40} {}", card.title, card.key());
        if let Some(minutes) = card.ready_in_minutes {
            println!("      Ready in {minutes} min");
        }
        if !card.missed_ingredients.is_empty() {
            println!("      Missing: {}", card.missed_ingredients.join(", "));
        }
    }
}

/// Display merged search results including per-provider failures
pub fn display_search_results(results: &SearchResults) {
    println!("Ingredients: {}", results.ingredients);
    display_cards("TheMealDB", &results.mealdb);
    display_cards("Spoonacular", &results.spoonacular);

    if !results.errors.is_empty() {
        println!("\nProvider errors:");
        for (source, message) in &results.errors {
            println!("   {source}: {message}");
        }
    }
}

/// Display saved favorites
pub fn display_favorites(favorites: &[Favorite]) {
    if favorites.is_empty() {
        println!("No favorites saved.");
        return;
    }
    println!("Favorites ({})", favorites.len());
    println!("{}", "=".repeat(60));
    for favorite in favorites {
        println!("   {:<40} {}", favorite.title, favorite.key());
        println!("      {}", favorite.source_url);
    }
}

/// Display a plain list with a heading and an empty-state message
pub fn display_list(heading: &str, items: &[String], empty: &str) {
    if items.is_empty() {
        println!("{empty}");
        return;
    }
    println!("{heading} ({})", items.len());
    println!("{}", "=".repeat(40));
    for item in items {
        println!("   - {item}");
    }
}

/// Report which entries were added
pub fn display_added(what: &str, added: &[String]) {
    if added.is_empty() {
        println!("Nothing new added to the {what}.");
    } else {
        println!("Added to the {what}: {}", added.join(", "));
    }
}
