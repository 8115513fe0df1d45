// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Loads listening address, provider credentials and store selection from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! Environment-based configuration management
//!
//! Configuration comes exclusively from environment variables. Optional
//! credentials never fail startup: a missing Spoonacular key surfaces as a
//! per-provider search error, a missing USDA key as a 502 on the nutrition
//! endpoint, and a missing video key switches the video endpoint to preview mode.

use crate::constants::{defaults, env_vars, upstream};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Environment type for logging and other configurations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Base URL plus optional credential for one upstream API
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// API key, `None` when not configured
    pub api_key: Option<String>,
    /// Base URL without trailing slash
    pub base_url: String,
}

impl UpstreamConfig {
    fn from_env(key_var: &str, url_var: &str, default_url: &str) -> Self {
        Self {
            api_key: non_empty_var(key_var),
            base_url: trim_base_url(&env_var_or(url_var, default_url)),
        }
    }

    /// Whether a credential is present
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Video generation API settings
#[derive(Debug, Clone)]
pub struct VideoApiConfig {
    /// Bearer token; `None` means preview mode
    pub api_key: Option<String>,
    /// Generation endpoint
    pub url: String,
    /// Model name sent with each prompt
    pub model: String,
}

/// CORS settings
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Comma-separated origins, or `*`
    pub allowed_origins: String,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// TheMealDB settings (the key is always present, defaulting to the public test key)
    pub mealdb: UpstreamConfig,
    /// Spoonacular settings
    pub spoonacular: UpstreamConfig,
    /// USDA `FoodData` Central settings
    pub usda: UpstreamConfig,
    /// Video generation settings
    pub video: VideoApiConfig,
    /// Per-request timeout for upstream calls
    pub http_client_timeout_secs: u64,
    /// CORS settings
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::HOST.to_owned(),
            http_port: defaults::HTTP_PORT,
            environment: Environment::Development,
            mealdb: UpstreamConfig {
                api_key: Some(defaults::MEALDB_API_KEY.to_owned()),
                base_url: upstream::MEALDB_BASE_URL.to_owned(),
            },
            spoonacular: UpstreamConfig {
                api_key: None,
                base_url: upstream::SPOONACULAR_BASE_URL.to_owned(),
            },
            usda: UpstreamConfig {
                api_key: None,
                base_url: upstream::USDA_BASE_URL.to_owned(),
            },
            video: VideoApiConfig {
                api_key: None,
                url: upstream::VIDEO_API_URL.to_owned(),
                model: defaults::VIDEO_MODEL.to_owned(),
            },
            http_client_timeout_secs: defaults::HTTP_CLIENT_TIMEOUT_SECS,
            cors: CorsConfig {
                allowed_origins: "*".to_owned(),
            },
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is present but cannot be parsed
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut mealdb = UpstreamConfig::from_env(
            env_vars::MEALDB_API_KEY,
            env_vars::MEALDB_BASE_URL,
            upstream::MEALDB_BASE_URL,
        );
        mealdb
            .api_key
            .get_or_insert_with(|| defaults::MEALDB_API_KEY.to_owned());

        let config = Self {
            host: env_var_or(env_vars::HOST, defaults::HOST),
            http_port: env_var_or(env_vars::HTTP_PORT, &defaults::HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            mealdb,
            spoonacular: UpstreamConfig::from_env(
                env_vars::SPOONACULAR_API_KEY,
                env_vars::SPOONACULAR_BASE_URL,
                upstream::SPOONACULAR_BASE_URL,
            ),
            usda: UpstreamConfig::from_env(
                env_vars::USDA_API_KEY,
                env_vars::USDA_BASE_URL,
                upstream::USDA_BASE_URL,
            ),
            video: VideoApiConfig {
                api_key: non_empty_var(env_vars::VIDEO_API_KEY),
                url: env_var_or(env_vars::VIDEO_API_URL, upstream::VIDEO_API_URL),
                model: env_var_or(env_vars::VIDEO_MODEL, defaults::VIDEO_MODEL),
            },
            http_client_timeout_secs: env_var_or(
                env_vars::HTTP_CLIENT_TIMEOUT_SECS,
                &defaults::HTTP_CLIENT_TIMEOUT_SECS.to_string(),
            )
            .parse()
            .context("Invalid HTTP_CLIENT_TIMEOUT_SECS value")?,
            cors: CorsConfig {
                allowed_origins: env_var_or(env_vars::CORS_ALLOWED_ORIGINS, "*"),
            },
        };

        Ok(config)
    }

    /// Upstream request timeout
    #[must_use]
    pub const fn http_client_timeout(&self) -> Duration {
        Duration::from_secs(self.http_client_timeout_secs)
    }

    /// Human-readable configuration summary with credentials redacted
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Recipe Finder Configuration:\n\
             - Listen: {}:{}\n\
             - Environment: {}\n\
             - TheMealDB: {}\n\
             - Spoonacular: {}\n\
             - USDA Nutrition: {}\n\
             - Video Generation: {}\n\
             - Upstream Timeout: {}s\n\
             - CORS Origins: {}",
            self.host,
            self.http_port,
            self.environment,
            self.mealdb.base_url,
            enabled_label(self.spoonacular.is_configured()),
            enabled_label(self.usda.is_configured()),
            if self.video.api_key.is_some() {
                "Enabled"
            } else {
                "Preview only"
            },
            self.http_client_timeout_secs,
            self.cors.allowed_origins,
        )
    }
}

/// Supabase project settings plus an optional authenticated session
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub supabase_url: Option<String>,
    /// Public anon key sent as `apikey`
    pub supabase_anon_key: Option<String>,
    /// User access token (JWT) of the signed-in user
    pub access_token: Option<String>,
    /// Id of the signed-in user
    pub user_id: Option<String>,
    /// Local storage file, used when no session is present
    pub state_path: PathBuf,
}

impl StoreConfig {
    /// Load store settings from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            supabase_url: non_empty_var(env_vars::SUPABASE_URL).map(|url| trim_base_url(&url)),
            supabase_anon_key: non_empty_var(env_vars::SUPABASE_ANON_KEY),
            access_token: non_empty_var(env_vars::SUPABASE_ACCESS_TOKEN),
            user_id: non_empty_var(env_vars::SUPABASE_USER_ID),
            state_path: non_empty_var(env_vars::STATE_PATH)
                .map_or_else(default_state_path, PathBuf::from),
        }
    }
}

/// Default local storage file under the platform data directory
#[must_use]
pub fn default_state_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(defaults::STATE_DIR_NAME)
        .join(defaults::STATE_FILE_NAME)
}

const fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "Enabled"
    } else {
        "Disabled"
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Environment variable that is set and not blank
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_owned()
}
