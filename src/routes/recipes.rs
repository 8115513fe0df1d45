// ABOUTME: Recipe proxy route handlers for search, detail, cuisines, random and passthroughs
// ABOUTME: Thin axum handlers that parse query parameters and delegate to the recipe service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! Recipe discovery routes
//!
//! All handlers return JSON. Failures are rendered by [`AppError`] as
//! `{error, code}` with a 400, 404 or 502 status.

use crate::{errors::AppError, server::ServerResources};
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Query parameters for `/api/search`
#[derive(Deserialize, Default)]
struct SearchQuery {
    #[serde(default)]
    ingredients: Option<String>,
    #[serde(default)]
    diet: Option<String>,
    #[serde(default)]
    cuisine: Option<String>,
    #[serde(default)]
    number: Option<String>,
}

/// Query parameters for `/api/mealdb/search`
#[derive(Deserialize, Default)]
struct NameSearchQuery {
    #[serde(default)]
    q: Option<String>,
}

/// Query parameters for `/api/spoonacular/autocomplete`
#[derive(Deserialize, Default)]
struct AutocompleteQuery {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    number: Option<String>,
}

/// Parse an optional positive count parameter
fn parse_number(raw: Option<&str>) -> Result<Option<u32>, AppError> {
    match raw.map(str::trim).filter(|n| !n.is_empty()) {
        None => Ok(None),
        Some(n) => n
            .parse::<u32>()
            .map(Some)
            .map_err(|_| AppError::invalid_input(format!("Invalid number parameter: {n}"))),
    }
}

/// Recipe routes
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/search", get(Self::handle_search))
            .route("/api/recipes/:source/:id", get(Self::handle_detail))
            .route("/api/cuisines", get(Self::handle_cuisines))
            .route("/api/cuisines/:area", get(Self::handle_cuisine_recipes))
            .route("/api/random", get(Self::handle_random))
            .route("/api/mealdb/search", get(Self::handle_mealdb_search))
            .route(
                "/api/spoonacular/autocomplete",
                get(Self::handle_autocomplete),
            )
            .with_state(resources)
    }

    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        Query(params): Query<SearchQuery>,
    ) -> Result<Response, AppError> {
        let ingredients = params
            .ingredients
            .as_deref()
            .ok_or_else(|| AppError::missing_field("ingredients"))?;
        let number = parse_number(params.number.as_deref())?;

        let results = resources
            .recipes
            .search(
                ingredients,
                params.diet.as_deref(),
                params.cuisine.as_deref(),
                number,
            )
            .await?;

        Ok(Json(results).into_response())
    }

    async fn handle_detail(
        State(resources): State<Arc<ServerResources>>,
        Path((source, id)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        let detail = resources.recipes.recipe_detail(&source, &id).await?;
        Ok(Json(detail).into_response())
    }

    async fn handle_cuisines(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let cuisines = resources.recipes.cuisines().await?;
        Ok(Json(json!({ "cuisines": cuisines })).into_response())
    }

    async fn handle_cuisine_recipes(
        State(resources): State<Arc<ServerResources>>,
        Path(area): Path<String>,
    ) -> Result<Response, AppError> {
        let recipes = resources.recipes.recipes_by_area(&area).await?;
        Ok(Json(json!({ "area": area, "recipes": recipes })).into_response())
    }

    async fn handle_random(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let random = resources.recipes.random().await?;
        Ok(Json(random).into_response())
    }

    async fn handle_mealdb_search(
        State(resources): State<Arc<ServerResources>>,
        Query(params): Query<NameSearchQuery>,
    ) -> Result<Response, AppError> {
        let query = params.q.as_deref().ok_or_else(|| AppError::missing_field("q"))?;
        let recipes = resources.recipes.search_mealdb(query).await?;
        Ok(Json(json!({ "recipes": recipes })).into_response())
    }

    async fn handle_autocomplete(
        State(resources): State<Arc<ServerResources>>,
        Query(params): Query<AutocompleteQuery>,
    ) -> Result<Response, AppError> {
        let query = params
            .query
            .as_deref()
            .ok_or_else(|| AppError::missing_field("query"))?;
        let number = parse_number(params.number.as_deref())?;
        let suggestions = resources.recipes.autocomplete(query, number).await?;
        Ok(Json(json!({ "suggestions": suggestions })).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(None).unwrap(), None);
        assert_eq!(parse_number(Some(" ")).unwrap(), None);
        assert_eq!(parse_number(Some("5")).unwrap(), Some(5));
        assert_eq!(parse_number(Some("five")).unwrap_err().http_status(), 400);
    }
}
