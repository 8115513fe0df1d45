// ABOUTME: HTTP server assembly: shared resources, router composition and the serve loop
// ABOUTME: Wires provider clients into the routes and applies CORS, tracing and request ids
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use crate::config::environment::ServerConfig;
use crate::errors::AppResult;
use crate::external::UsdaClient;
use crate::middleware::{propagate_request_id_layer, set_request_id_layer, setup_cors, trace_layer};
use crate::providers::{build_http_client, MealDbClient, SpoonacularClient};
use crate::routes::{HealthRoutes, NutritionRoutes, RecipeRoutes, VideoRoutes};
use crate::services::RecipeService;
use crate::video::VideoClient;
use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tracing::info;

/// Centralized resource container shared by every handler
///
/// Built once at startup and never mutated, so handlers need no locking.
#[derive(Clone)]
pub struct ServerResources {
    pub config: Arc<ServerConfig>,
    pub recipes: RecipeService,
}

impl ServerResources {
    /// Create the provider clients around one pooled HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: ServerConfig) -> AppResult<Self> {
        let http_client = build_http_client(config.http_client_timeout())?;

        let recipes = RecipeService::new(
            MealDbClient::new(http_client.clone(), &config.mealdb),
            SpoonacularClient::new(http_client.clone(), &config.spoonacular),
            UsdaClient::new(http_client.clone(), &config.usda),
            VideoClient::new(http_client, &config.video),
        );

        Ok(Self {
            config: Arc::new(config),
            recipes,
        })
    }
}

/// Compose every route group with the shared middleware stack
#[must_use]
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config);

    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(RecipeRoutes::routes(resources.clone()))
        .merge(NutritionRoutes::routes(resources.clone()))
        .merge(VideoRoutes::routes(resources.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(trace_layer())
                .layer(propagate_request_id_layer())
                .layer(cors),
        )
}

/// Recipe Finder HTTP proxy
pub struct RecipeFinderServer {
    resources: Arc<ServerResources>,
}

impl RecipeFinderServer {
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Bind the configured address and serve until the process is stopped
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid, cannot be bound, or the server fails
    pub async fn run(self) -> Result<()> {
        let config = &self.resources.config;
        let addr: SocketAddr = format!("{}:{}", config.host, config.http_port)
            .parse()
            .with_context(|| {
                format!(
                    "Invalid listen address {}:{}",
                    config.host, config.http_port
                )
            })?;

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        info!("HTTP server listening on http://{}", addr);

        let router = build_router(&self.resources);
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server failed")?;

        info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
