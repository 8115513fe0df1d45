// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides liveness and readiness endpoints including which upstreams are configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! Health check routes for service monitoring
//!
//! `/health` only proves the process is serving. `/ready` additionally reports
//! which optional upstream credentials are configured.

use crate::server::ServerResources;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        async fn health_handler() -> Json<Value> {
            Json(json!({
                "status": "healthy",
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        async fn ready_handler(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
            let config = &resources.config;
            Json(json!({
                "status": "ready",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "version": env!("CARGO_PKG_VERSION"),
                "providers": {
                    "mealdb": true,
                    "spoonacular": config.spoonacular.is_configured(),
                    "usda": config.usda.is_configured(),
                    "video": config.video.api_key.is_some()
                }
            }))
        }

        Router::new()
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .with_state(resources)
    }
}
