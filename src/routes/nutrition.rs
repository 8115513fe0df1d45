// ABOUTME: Nutrition lookup route backed by USDA FoodData Central
// ABOUTME: Returns the nutrient summary of the best food match for a query
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use crate::{errors::AppError, server::ServerResources};
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize, Default)]
struct NutritionQuery {
    #[serde(default)]
    query: Option<String>,
}

/// Nutrition routes
pub struct NutritionRoutes;

impl NutritionRoutes {
    /// Create nutrition routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/nutrition", get(Self::handle_nutrition))
            .with_state(resources)
    }

    async fn handle_nutrition(
        State(resources): State<Arc<ServerResources>>,
        Query(params): Query<NutritionQuery>,
    ) -> Result<Response, AppError> {
        let query = params
            .query
            .as_deref()
            .ok_or_else(|| AppError::missing_field("query"))?;
        let summary = resources.recipes.nutrition(query).await?;
        Ok(Json(summary).into_response())
    }
}
