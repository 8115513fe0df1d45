// ABOUTME: Pantry commands for recipe-finder-cli
// ABOUTME: Lists, toggles, bulk-adds and removes pantry items
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use recipe_finder::store::ClientStore;

use crate::helpers::display::{display_added, display_list};

type Result<T> = anyhow::Result<T>;

/// List pantry items
pub async fn list(store: &ClientStore) -> Result<()> {
    display_list("Pantry", &store.pantry().await?, "The pantry is empty.");
    Ok(())
}

/// Add the item, or remove it when already present
pub async fn toggle(store: &ClientStore, name: &str) -> Result<()> {
    if store.toggle_pantry_item(name).await? {
        println!("Added {} to the pantry", name.trim());
    } else {
        println!("Removed {} from the pantry", name.trim());
    }
    Ok(())
}

/// Add several items; comma-separated arguments are split
pub async fn add(store: &ClientStore, names: &[String]) -> Result<()> {
    let names: Vec<&str> = names.iter().flat_map(|name| name.split(',')).collect();
    let added = store.add_pantry_items(&names).await?;
    display_added("pantry", &added);
    Ok(())
}

/// Remove an item
pub async fn remove(store: &ClientStore, name: &str) -> Result<()> {
    if store.remove_pantry_item(name).await? {
        println!("Removed {} from the pantry", name.trim());
    } else {
        println!("{} is not in the pantry", name.trim());
    }
    Ok(())
}
