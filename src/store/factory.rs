// ABOUTME: Store factory selecting the local or remote backend once at startup
// ABOUTME: A complete Supabase session selects the remote tables, anything less uses the local file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use super::{ClientStore, LocalStore, RemoteSession, RemoteStore, StateBackend};
use crate::config::environment::StoreConfig;
use crate::errors::AppResult;
use crate::providers::build_http_client;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Remote session from configuration, `None` unless every part is present
#[must_use]
pub fn remote_session(config: &StoreConfig) -> Option<RemoteSession> {
    Some(RemoteSession {
        url: config.supabase_url.clone()?,
        anon_key: config.supabase_anon_key.clone()?,
        access_token: config.access_token.clone()?,
        user_id: config.user_id.clone()?,
    })
}

/// Open the client store for this configuration
///
/// # Errors
///
/// Returns an error if the HTTP client for the remote backend cannot be built
pub fn open_store(config: &StoreConfig, timeout: Duration) -> AppResult<ClientStore> {
    let backend: Arc<dyn StateBackend> = match remote_session(config) {
        Some(session) => {
            info!(user_id = %session.user_id, "Using Supabase state store");
            Arc::new(RemoteStore::new(build_http_client(timeout)?, session))
        }
        None => {
            info!(path = %config.state_path.display(), "Using local state store");
            Arc::new(LocalStore::new(config.state_path.clone()))
        }
    };
    Ok(ClientStore::new(backend))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_session_falls_back_to_local() {
        let config = StoreConfig {
            supabase_url: Some("https://project.supabase.co".to_owned()),
            supabase_anon_key: Some("anon".to_owned()),
            access_token: None,
            user_id: Some("user-1".to_owned()),
            state_path: std::env::temp_dir().join("recipe-finder-factory-test.json"),
        };
        assert!(remote_session(&config).is_none());
        let store = open_store(&config, Duration::from_secs(5)).unwrap();
        assert_eq!(store.backend_info(), "Local (JSON document)");
    }

    #[test]
    fn test_full_session_selects_remote() {
        let config = StoreConfig {
            supabase_url: Some("https://project.supabase.co".to_owned()),
            supabase_anon_key: Some("anon".to_owned()),
            access_token: Some("jwt".to_owned()),
            user_id: Some("user-1".to_owned()),
            state_path: std::env::temp_dir().join("unused.json"),
        };
        let store = open_store(&config, Duration::from_secs(5)).unwrap();
        assert_eq!(store.backend_info(), "Remote (Supabase)");
    }
}
