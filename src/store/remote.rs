// ABOUTME: Remote storage backend using Supabase PostgREST tables scoped to the signed-in user
// ABOUTME: Sends the project anon key plus the user's access token on every request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! Supabase backend
//!
//! Table layout (every row carries `user_id`, reads and deletes filter on it):
//!
//! | table | columns |
//! |---|---|
//! | `favorites` | `recipe_id`, `source`, `title`, `image`, `source_url` |
//! | `pantry_items` | `name` |
//! | `shopping_list` | `item` |
//!
//! Rows are listed in `created_at` order.

use super::StateBackend;
use crate::constants::{provider_names::SUPABASE, remote_tables};
use crate::errors::AppResult;
use crate::models::{Favorite, RecipeSource};
use crate::providers::{fetch_json, send_checked};
use async_trait::async_trait;
use futures_util::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Project endpoint plus the signed-in user's credentials
#[derive(Debug, Clone)]
pub struct RemoteSession {
    /// Project URL without trailing slash
    pub url: String,
    pub anon_key: String,
    pub access_token: String,
    pub user_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct FavoriteRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    recipe_id: String,
    source: RecipeSource,
    #[serde(default)]
    title: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    source_url: String,
}

impl From<FavoriteRow> for Favorite {
    fn from(row: FavoriteRow) -> Self {
        Self {
            id: row.recipe_id,
            title: row.title,
            image: row.image,
            source: row.source,
            source_url: row.source_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PantryRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ShoppingRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    item: String,
}

/// Supabase-backed store for one user
pub struct RemoteStore {
    http_client: reqwest::Client,
    session: RemoteSession,
}

impl RemoteStore {
    #[must_use]
    pub const fn new(http_client: reqwest::Client, session: RemoteSession) -> Self {
        Self {
            http_client,
            session,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.session.url)
    }

    fn user_filter(&self) -> (&'static str, String) {
        ("user_id", format!("eq.{}", self.session.user_id))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.session.anon_key)
            .header(
                "Authorization",
                format!("Bearer {}", self.session.access_token),
            )
    }

    async fn select<T: serde::de::DeserializeOwned>(
        &self,
        table: &str,
        columns: &str,
    ) -> AppResult<Vec<T>> {
        let (filter, value) = self.user_filter();
        let request = self.authorize(self.http_client.get(self.table_url(table)).query(&[
            ("select", columns),
            (filter, value.as_str()),
            ("order", "created_at.asc"),
        ]));
        let rows: Vec<T> = fetch_json(SUPABASE, request).await?;
        debug!(table, count = rows.len(), "Remote rows loaded");
        Ok(rows)
    }

    async fn insert<T: Serialize + Sync>(&self, table: &str, row: &T) -> AppResult<()> {
        let request = self.authorize(
            self.http_client
                .post(self.table_url(table))
                .header("Prefer", "return=minimal")
                .json(row),
        );
        send_checked(SUPABASE, request).await
    }

    async fn delete(&self, table: &str, filters: &[(&str, String)]) -> AppResult<()> {
        let (filter, value) = self.user_filter();
        let mut query = vec![(filter, value)];
        query.extend(filters.iter().map(|(k, v)| (*k, v.clone())));
        let request = self.authorize(self.http_client.delete(self.table_url(table)).query(&query));
        send_checked(SUPABASE, request).await
    }

    fn user_id(&self) -> Option<String> {
        Some(self.session.user_id.clone())
    }
}

#[async_trait]
impl StateBackend for RemoteStore {
    fn backend_info(&self) -> &'static str {
        "Remote (Supabase)"
    }

    #[instrument(skip(self))]
    async fn list_favorites(&self) -> AppResult<Vec<Favorite>> {
        let rows: Vec<FavoriteRow> = self
            .select(
                remote_tables::FAVORITES,
                "recipe_id,source,title,image,source_url",
            )
            .await?;
        Ok(rows.into_iter().map(Favorite::from).collect())
    }

    async fn insert_favorite(&self, favorite: &Favorite) -> AppResult<()> {
        let row = FavoriteRow {
            user_id: self.user_id(),
            recipe_id: favorite.id.clone(),
            source: favorite.source,
            title: favorite.title.clone(),
            image: favorite.image.clone(),
            source_url: favorite.source_url.clone(),
        };
        self.insert(remote_tables::FAVORITES, &row).await
    }

    async fn delete_favorite(&self, favorite: &Favorite) -> AppResult<()> {
        self.delete(
            remote_tables::FAVORITES,
            &[
                ("recipe_id", format!("eq.{}", favorite.id)),
                ("source", format!("eq.{}", favorite.source)),
            ],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn list_pantry(&self) -> AppResult<Vec<String>> {
        let rows: Vec<PantryRow> = self.select(remote_tables::PANTRY, "name").await?;
        Ok(rows.into_iter().map(|row| row.name).collect())
    }

    /// One insert per item, issued concurrently
    async fn insert_pantry(&self, items: &[String]) -> AppResult<()> {
        let rows: Vec<PantryRow> = items
            .iter()
            .map(|name| PantryRow {
                user_id: self.user_id(),
                name: name.clone(),
            })
            .collect();
        try_join_all(
            rows.iter()
                .map(|row| self.insert(remote_tables::PANTRY, row)),
        )
        .await?;
        Ok(())
    }

    async fn delete_pantry(&self, item: &str) -> AppResult<()> {
        self.delete(remote_tables::PANTRY, &[("name", format!("eq.{item}"))])
            .await
    }

    #[instrument(skip(self))]
    async fn list_shopping(&self) -> AppResult<Vec<String>> {
        let rows: Vec<ShoppingRow> = self.select(remote_tables::SHOPPING_LIST, "item").await?;
        Ok(rows.into_iter().map(|row| row.item).collect())
    }

    async fn insert_shopping(&self, items: &[String]) -> AppResult<()> {
        let rows: Vec<ShoppingRow> = items
            .iter()
            .map(|item| ShoppingRow {
                user_id: self.user_id(),
                item: item.clone(),
            })
            .collect();
        let request = self.authorize(
            self.http_client
                .post(self.table_url(remote_tables::SHOPPING_LIST))
                .header("Prefer", "return=minimal")
                .json(&rows),
        );
        send_checked(SUPABASE, request).await
    }

    async fn delete_shopping(&self, item: &str) -> AppResult<()> {
        self.delete(
            remote_tables::SHOPPING_LIST,
            &[("item", format!("eq.{item}"))],
        )
        .await
    }

    async fn clear_shopping(&self) -> AppResult<()> {
        self.delete(remote_tables::SHOPPING_LIST, &[]).await
    }
}
