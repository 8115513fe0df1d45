// ABOUTME: Video prompt route handler
// ABOUTME: Builds a cooking video prompt and submits it when a video API key is configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use crate::{errors::AppError, server::ServerResources, video::VideoRequest};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;

/// Video prompt routes
pub struct VideoRoutes;

impl VideoRoutes {
    /// Create video routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/video", post(Self::handle_video))
            .with_state(resources)
    }

    async fn handle_video(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<VideoRequest>,
    ) -> Result<Response, AppError> {
        let response = resources.recipes.video(&request).await?;
        Ok(Json(response).into_response())
    }
}
