// ABOUTME: Client state store for favorites, pantry items and the shopping list
// ABOUTME: Collection rules live in ClientStore, persistence behind the StateBackend trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! # Client State Store
//!
//! [`ClientStore`] implements the user-facing operations (toggle, add many,
//! remove, clear) on top of a [`StateBackend`]. Two backends exist:
//!
//! - [`local::LocalStore`]: one JSON document on disk, used when nobody is signed in
//! - [`remote::RemoteStore`]: Supabase tables scoped to the signed-in user
//!
//! [`factory::open_store`] picks one at startup.
//!
//! Favorites are unique by `source:id`. Pantry items are unique by
//! case-insensitive name. Shopping list entries are unique by exact text. All
//! collections keep insertion order.

pub mod factory;
pub mod local;
pub mod remote;

pub use factory::open_store;
pub use local::LocalStore;
pub use remote::{RemoteSession, RemoteStore};

use crate::errors::AppResult;
use crate::models::{pantry_key, Favorite, RecipeCard};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Persistence for the three client collections
///
/// Backends store what they are given. Uniqueness and normalization are
/// enforced by [`ClientStore`] before calling in.
#[async_trait]
pub trait StateBackend: Send + Sync {
    /// Short description for logs and the CLI
    fn backend_info(&self) -> &'static str;

    /// Favorites in insertion order
    async fn list_favorites(&self) -> AppResult<Vec<Favorite>>;
    /// Append a favorite
    async fn insert_favorite(&self, favorite: &Favorite) -> AppResult<()>;
    /// Delete the favorite with this `source:id` key
    async fn delete_favorite(&self, favorite: &Favorite) -> AppResult<()>;

    /// Pantry items in insertion order
    async fn list_pantry(&self) -> AppResult<Vec<String>>;
    /// Append pantry items
    async fn insert_pantry(&self, items: &[String]) -> AppResult<()>;
    /// Delete the pantry item with exactly this stored name
    async fn delete_pantry(&self, item: &str) -> AppResult<()>;

    /// Shopping list in insertion order
    async fn list_shopping(&self) -> AppResult<Vec<String>>;
    /// Append shopping list entries
    async fn insert_shopping(&self, items: &[String]) -> AppResult<()>;
    /// Delete this shopping list entry
    async fn delete_shopping(&self, item: &str) -> AppResult<()>;
    /// Delete every shopping list entry
    async fn clear_shopping(&self) -> AppResult<()>;
}

/// Trim, drop blanks and keep the first of each key
fn unique_items<'a>(
    items: impl IntoIterator<Item = &'a str>,
    key: impl Fn(&str) -> String,
    existing: &[String],
) -> Vec<String> {
    let mut seen: HashSet<String> = existing.iter().map(|item| key(item)).collect();
    items
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(key(item)))
        .map(str::to_owned)
        .collect()
}

/// User-facing collection operations over a backend
#[derive(Clone)]
pub struct ClientStore {
    backend: Arc<dyn StateBackend>,
}

impl ClientStore {
    #[must_use]
    pub fn new(backend: Arc<dyn StateBackend>) -> Self {
        Self { backend }
    }

    /// Which backend is in use
    #[must_use]
    pub fn backend_info(&self) -> &'static str {
        self.backend.backend_info()
    }

    /// Saved favorites
    ///
    /// # Errors
    ///
    /// Returns the backend's storage error
    pub async fn favorites(&self) -> AppResult<Vec<Favorite>> {
        self.backend.list_favorites().await
    }

    /// Add the favorite if absent, remove it if present
    ///
    /// Returns `true` when the favorite is saved afterwards.
    ///
    /// # Errors
    ///
    /// Returns the backend's storage error
    pub async fn toggle_favorite(&self, favorite: &Favorite) -> AppResult<bool> {
        let key = favorite.key();
        let existing = self
            .backend
            .list_favorites()
            .await?
            .into_iter()
            .find(|saved| saved.key() == key);

        if let Some(saved) = existing {
            self.backend.delete_favorite(&saved).await?;
            debug!(key = %key, "Favorite removed");
            Ok(false)
        } else {
            self.backend.insert_favorite(favorite).await?;
            debug!(key = %key, "Favorite added");
            Ok(true)
        }
    }

    /// Remove a favorite by `source:id` key
    ///
    /// Returns `false` when no such favorite was saved.
    ///
    /// # Errors
    ///
    /// Returns the backend's storage error
    pub async fn remove_favorite(&self, key: &str) -> AppResult<bool> {
        let existing = self
            .backend
            .list_favorites()
            .await?
            .into_iter()
            .find(|saved| saved.key() == key);
        match existing {
            Some(saved) => {
                self.backend.delete_favorite(&saved).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Pantry items
    ///
    /// # Errors
    ///
    /// Returns the backend's storage error
    pub async fn pantry(&self) -> AppResult<Vec<String>> {
        self.backend.list_pantry().await
    }

    /// Add the item if absent (case-insensitive), remove it if present
    ///
    /// Returns `true` when the item is in the pantry afterwards. A blank name
    /// is ignored and returns `false`.
    ///
    /// # Errors
    ///
    /// Returns the backend's storage error
    pub async fn toggle_pantry_item(&self, name: &str) -> AppResult<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }
        let key = pantry_key(name);
        let existing = self
            .backend
            .list_pantry()
            .await?
            .into_iter()
            .find(|item| pantry_key(item) == key);

        if let Some(stored) = existing {
            self.backend.delete_pantry(&stored).await?;
            Ok(false)
        } else {
            self.backend.insert_pantry(&[name.to_owned()]).await?;
            Ok(true)
        }
    }

    /// Add several pantry items, skipping blanks and ones already present
    ///
    /// Returns the items actually added.
    ///
    /// # Errors
    ///
    /// Returns the backend's storage error
    pub async fn add_pantry_items<S: AsRef<str>>(&self, names: &[S]) -> AppResult<Vec<String>> {
        let existing = self.backend.list_pantry().await?;
        let added = unique_items(names.iter().map(AsRef::as_ref), pantry_key, &existing);
        if !added.is_empty() {
            self.backend.insert_pantry(&added).await?;
        }
        Ok(added)
    }

    /// Remove a pantry item (case-insensitive)
    ///
    /// Returns `false` when no such item was stored.
    ///
    /// # Errors
    ///
    /// Returns the backend's storage error
    pub async fn remove_pantry_item(&self, name: &str) -> AppResult<bool> {
        let key = pantry_key(name);
        let existing = self
            .backend
            .list_pantry()
            .await?
            .into_iter()
            .find(|item| pantry_key(item) == key);
        match existing {
            Some(stored) => {
                self.backend.delete_pantry(&stored).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Shopping list entries
    ///
    /// # Errors
    ///
    /// Returns the backend's storage error
    pub async fn shopping_list(&self) -> AppResult<Vec<String>> {
        self.backend.list_shopping().await
    }

    /// Add entries, skipping blanks and exact duplicates
    ///
    /// Returns the entries actually added.
    ///
    /// # Errors
    ///
    /// Returns the backend's storage error
    pub async fn add_to_shopping_list<S: AsRef<str>>(&self, items: &[S]) -> AppResult<Vec<String>> {
        let existing = self.backend.list_shopping().await?;
        let added = unique_items(items.iter().map(AsRef::as_ref), str::to_owned, &existing);
        if !added.is_empty() {
            self.backend.insert_shopping(&added).await?;
        }
        Ok(added)
    }

    /// Remove one entry
    ///
    /// Returns `false` when the entry was not on the list.
    ///
    /// # Errors
    ///
    /// Returns the backend's storage error
    pub async fn remove_from_shopping_list(&self, item: &str) -> AppResult<bool> {
        let item = item.trim();
        if !self.backend.list_shopping().await?.iter().any(|i| i == item) {
            return Ok(false);
        }
        self.backend.delete_shopping(item).await?;
        Ok(true)
    }

    /// Empty the shopping list
    ///
    /// # Errors
    ///
    /// Returns the backend's storage error
    pub async fn clear_shopping_list(&self) -> AppResult<()> {
        self.backend.clear_shopping().await
    }

    /// Add a recipe's missed ingredients that are not already in the pantry
    ///
    /// Returns the entries actually added.
    ///
    /// # Errors
    ///
    /// Returns the backend's storage error
    pub async fn add_missing_to_shopping_list(&self, card: &RecipeCard) -> AppResult<Vec<String>> {
        let pantry: HashSet<String> = self
            .backend
            .list_pantry()
            .await?
            .iter()
            .map(|item| pantry_key(item))
            .collect();
        let missing: Vec<&str> = card
            .missed_ingredients
            .iter()
            .map(String::as_str)
            .filter(|ingredient| !pantry.contains(&pantry_key(ingredient)))
            .collect();
        self.add_to_shopping_list(&missing).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_items_is_case_insensitive_for_pantry_keys() {
        let existing = vec!["Garlic".to_owned()];
        let added = unique_items(
            ["garlic", " Onion ", "", "onion", "Basil"],
            pantry_key,
            &existing,
        );
        assert_eq!(added, vec!["Onion", "Basil"]);
    }

    #[test]
    fn test_unique_items_exact_text() {
        let added = unique_items(["Milk", "milk", "Milk"], str::to_owned, &[]);
        assert_eq!(added, vec!["Milk", "milk"]);
    }
}
