// ABOUTME: Local storage backend keeping every collection in one JSON document on disk
// ABOUTME: Collections live under fixed keys, access is serialized through an async mutex
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use super::StateBackend;
use crate::constants::storage_keys;
use crate::errors::{AppError, AppResult};
use crate::models::Favorite;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// JSON document store, the on-disk analogue of browser local storage
///
/// The document is a flat object. Each collection is a JSON array under its
/// own key, and unknown keys are preserved on write.
pub struct LocalStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LocalStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_document(&self) -> AppResult<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(AppError::storage(format!(
                    "Failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(document)) => Ok(document),
            Ok(_) | Err(_) => {
                warn!(
                    path = %self.path.display(),
                    "State document is not a JSON object, starting empty"
                );
                Ok(Map::new())
            }
        }
    }

    async fn write_document(&self, document: &Map<String, Value>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::storage(format!("Failed to create {}: {e}", parent.display()))
                })?;
            }
        }
        let body = serde_json::to_vec_pretty(document)
            .map_err(|e| AppError::serialization(format!("Failed to encode state: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body)
            .await
            .map_err(|e| AppError::storage(format!("Failed to write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path).await.map_err(|e| {
            AppError::storage(format!("Failed to replace {}: {e}", self.path.display()))
        })?;
        Ok(())
    }

    /// Decode one collection, treating a missing or malformed entry as empty
    fn collection<T: DeserializeOwned>(document: &Map<String, Value>, key: &str) -> Vec<T> {
        let Some(value) = document.get(key) else {
            return Vec::new();
        };
        serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            warn!(key, "Ignoring malformed collection: {}", e);
            Vec::new()
        })
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> AppResult<Vec<T>> {
        let _guard = self.lock.lock().await;
        let document = self.read_document().await?;
        Ok(Self::collection(&document, key))
    }

    /// Read-modify-write one collection under the lock
    async fn update<T, F>(&self, key: &str, change: F) -> AppResult<()>
    where
        T: DeserializeOwned + Serialize + Send,
        F: FnOnce(&mut Vec<T>) + Send,
    {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        let mut items: Vec<T> = Self::collection(&document, key);
        change(&mut items);
        let value = serde_json::to_value(&items)
            .map_err(|e| AppError::serialization(format!("Failed to encode {key}: {e}")))?;
        document.insert(key.to_owned(), value);
        self.write_document(&document).await?;
        debug!(key, count = items.len(), "Local collection saved");
        Ok(())
    }
}

#[async_trait]
impl StateBackend for LocalStore {
    fn backend_info(&self) -> &'static str {
        "Local (JSON document)"
    }

    async fn list_favorites(&self) -> AppResult<Vec<Favorite>> {
        self.read(storage_keys::FAVORITES).await
    }

    async fn insert_favorite(&self, favorite: &Favorite) -> AppResult<()> {
        let favorite = favorite.clone();
        self.update(storage_keys::FAVORITES, move |items: &mut Vec<Favorite>| {
            items.push(favorite);
        })
        .await
    }

    async fn delete_favorite(&self, favorite: &Favorite) -> AppResult<()> {
        let key = favorite.key();
        self.update(storage_keys::FAVORITES, move |items: &mut Vec<Favorite>| {
            items.retain(|saved| saved.key() != key);
        })
        .await
    }

    async fn list_pantry(&self) -> AppResult<Vec<String>> {
        self.read(storage_keys::PANTRY).await
    }

    async fn insert_pantry(&self, new_items: &[String]) -> AppResult<()> {
        let new_items = new_items.to_vec();
        self.update(storage_keys::PANTRY, move |items: &mut Vec<String>| {
            items.extend(new_items);
        })
        .await
    }

    async fn delete_pantry(&self, item: &str) -> AppResult<()> {
        let item = item.to_owned();
        self.update(storage_keys::PANTRY, move |items: &mut Vec<String>| {
            items.retain(|stored| *stored != item);
        })
        .await
    }

    async fn list_shopping(&self) -> AppResult<Vec<String>> {
        self.read(storage_keys::SHOPPING_LIST).await
    }

    async fn insert_shopping(&self, new_items: &[String]) -> AppResult<()> {
        let new_items = new_items.to_vec();
        self.update(storage_keys::SHOPPING_LIST, move |items: &mut Vec<String>| {
            items.extend(new_items);
        })
        .await
    }

    async fn delete_shopping(&self, item: &str) -> AppResult<()> {
        let item = item.to_owned();
        self.update(storage_keys::SHOPPING_LIST, move |items: &mut Vec<String>| {
            items.retain(|stored| *stored != item);
        })
        .await
    }

    async fn clear_shopping(&self) -> AppResult<()> {
        self.update(storage_keys::SHOPPING_LIST, |items: &mut Vec<String>| {
            items.clear();
        })
        .await
    }
}
