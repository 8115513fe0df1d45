// ABOUTME: Main library entry point for the Recipe Finder API
// ABOUTME: Ingredient-driven recipe discovery proxy plus the client state store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

#![deny(unsafe_code)]

//! # Recipe Finder
//!
//! A thin REST proxy that searches TheMealDB and Spoonacular by ingredient,
//! normalizes both catalogs into one recipe card shape, looks up nutrition in
//! USDA `FoodData` Central, and builds cooking video prompts. A separate
//! client state store keeps favorites, pantry items and a shopping list either
//! in a local JSON document or in Supabase tables.
//!
//! ## Architecture
//!
//! - **Providers**: TheMealDB and Spoonacular clients with their schema mapping
//! - **Services**: fan-out search with per-source error isolation
//! - **Routes**: axum handlers delegating to services
//! - **Store**: favorites/pantry/shopping list behind a backend trait
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use recipe_finder::config::environment::ServerConfig;
//! use recipe_finder::server::{RecipeFinderServer, ServerResources};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = Arc::new(ServerResources::new(config)?);
//!     RecipeFinderServer::new(resources).run().await
//! }
//! ```

/// Environment configuration
pub mod config;

/// Application constants
pub mod constants;

/// Error types and HTTP error rendering
pub mod errors;

/// USDA `FoodData` Central client
pub mod external;

/// Logging setup
pub mod logging;

/// HTTP middleware (CORS, tracing, request ids)
pub mod middleware;

/// Provider-neutral data models
pub mod models;

/// Recipe provider clients
pub mod providers;

/// HTTP route handlers
pub mod routes;

/// Server resources, router and serve loop
pub mod server;

/// Business logic behind the routes
pub mod services;

/// Favorites, pantry and shopping list persistence
pub mod store;

/// Video prompt builder and generation client
pub mod video;
