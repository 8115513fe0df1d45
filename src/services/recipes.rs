// ABOUTME: Recipe discovery business logic extracted from route handlers
// ABOUTME: Ingredient sanitizing, provider fan-out with per-source error isolation, and lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use crate::constants::{defaults, messages};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::external::UsdaClient;
use crate::models::{
    NutritionSummary, RandomRecipes, RecipeCard, RecipeDetail, RecipeSource, RecipeSuggestion,
    SearchResults,
};
use crate::providers::spoonacular::SearchFilters;
use crate::providers::{MealDbClient, SpoonacularClient};
use crate::video::{VideoClient, VideoPromptResponse, VideoRequest};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Normalize a comma-separated ingredient list
///
/// Splits on commas, trims each entry, drops empty entries and re-joins with `,`.
#[must_use]
pub fn sanitize_ingredients(raw: &str) -> String {
    raw.split(',')
        .map(str::trim)
        .filter(|ingredient| !ingredient.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Blank filter values count as absent
fn normalize_filter(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Record a provider failure under its source name
fn record_failure(errors: &mut BTreeMap<String, String>, source: RecipeSource, error: &AppError) {
    warn!(source = %source, code = ?error.code, "Provider failed: {}", error.message);
    errors.insert(source.as_str().to_owned(), error.message.clone());
}

/// Provider clients used by the proxy endpoints
#[derive(Clone)]
pub struct RecipeService {
    mealdb: MealDbClient,
    spoonacular: SpoonacularClient,
    usda: UsdaClient,
    video: VideoClient,
}

impl RecipeService {
    #[must_use]
    pub const fn new(
        mealdb: MealDbClient,
        spoonacular: SpoonacularClient,
        usda: UsdaClient,
        video: VideoClient,
    ) -> Self {
        Self {
            mealdb,
            spoonacular,
            usda,
            video,
        }
    }

    /// Search both providers concurrently
    ///
    /// A failing provider is reported under `errors` and does not fail the
    /// other one.
    ///
    /// # Errors
    ///
    /// - `MissingRequiredField` when no ingredient remains after sanitizing
    /// - `ExternalServiceError` (with `errors`) when both sides are empty and a provider failed
    /// - `ResourceNotFound` when both sides are empty without failures
    pub async fn search(
        &self,
        raw_ingredients: &str,
        diet: Option<&str>,
        cuisine: Option<&str>,
        number: Option<u32>,
    ) -> AppResult<SearchResults> {
        let ingredients = sanitize_ingredients(raw_ingredients);
        if ingredients.is_empty() {
            return Err(AppError::missing_field("ingredients"));
        }

        let filters = SearchFilters {
            diet: normalize_filter(diet),
            cuisine: normalize_filter(cuisine),
        };
        let number = number
            .unwrap_or(defaults::SEARCH_RESULT_COUNT)
            .clamp(1, defaults::MAX_SEARCH_RESULT_COUNT);

        let (mealdb, spoonacular) = tokio::join!(
            self.mealdb.filter_by_ingredients(&ingredients),
            self.spoonacular
                .search_by_ingredients(&ingredients, &filters, number)
        );

        let mut results = SearchResults {
            ingredients,
            ..SearchResults::default()
        };
        match mealdb {
            Ok(cards) => results.mealdb = cards,
            Err(e) => record_failure(&mut results.errors, RecipeSource::Mealdb, &e),
        }
        match spoonacular {
            Ok(cards) => results.spoonacular = cards,
            Err(e) => record_failure(&mut results.errors, RecipeSource::Spoonacular, &e),
        }

        info!(
            ingredients = %results.ingredients,
            mealdb = results.mealdb.len(),
            spoonacular = results.spoonacular.len(),
            failures = results.errors.len(),
            "Ingredient search completed"
        );

        if results.is_empty() {
            if results.errors.is_empty() {
                return Err(AppError::new(
                    ErrorCode::ResourceNotFound,
                    messages::NO_RECIPES_FOUND,
                ));
            }
            return Err(
                AppError::new(ErrorCode::ExternalServiceError, messages::ALL_PROVIDERS_FAILED)
                    .with_details(json!({ "errors": results.errors })),
            );
        }

        Ok(results)
    }

    /// Full recipe from the named source
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` ("Recipe not found") for an unknown source or id,
    /// otherwise the provider's upstream error
    pub async fn recipe_detail(&self, source: &str, id: &str) -> AppResult<RecipeDetail> {
        let not_found = || AppError::new(ErrorCode::ResourceNotFound, messages::RECIPE_NOT_FOUND);

        let Ok(source) = source.parse::<RecipeSource>() else {
            return Err(not_found());
        };
        let id = id.trim();
        if id.is_empty() {
            return Err(not_found());
        }

        let detail = match source {
            RecipeSource::Mealdb => self.mealdb.lookup(id).await,
            RecipeSource::Spoonacular => self.spoonacular.information(id).await,
        };
        match detail {
            Ok(Some(detail)) => Ok(detail),
            Ok(None) => Err(not_found()),
            Err(e) if e.is_not_found() => Err(not_found()),
            Err(e) => Err(e),
        }
    }

    /// Cuisine areas known to TheMealDB
    ///
    /// # Errors
    ///
    /// Returns the upstream error when TheMealDB fails
    pub async fn cuisines(&self) -> AppResult<Vec<String>> {
        self.mealdb.list_areas().await
    }

    /// Meals of one cuisine area
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` when the area has no meals, otherwise the upstream error
    pub async fn recipes_by_area(&self, area: &str) -> AppResult<Vec<RecipeCard>> {
        let area = area.trim();
        if area.is_empty() {
            return Err(AppError::missing_field("area"));
        }
        let recipes = self.mealdb.filter_by_area(area).await?;
        if recipes.is_empty() {
            return Err(AppError::not_found(format!("Cuisine '{area}'")));
        }
        Ok(recipes)
    }

    /// One random recipe per provider
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` when both providers answered with nothing, and
    /// `ExternalServiceError` (with `errors`) when neither produced a recipe
    /// and at least one failed
    pub async fn random(&self) -> AppResult<RandomRecipes> {
        let (mealdb, spoonacular) = tokio::join!(self.mealdb.random(), self.spoonacular.random());

        let mut random = RandomRecipes::default();
        match mealdb {
            Ok(card) => random.mealdb = card,
            Err(e) => record_failure(&mut random.errors, RecipeSource::Mealdb, &e),
        }
        match spoonacular {
            Ok(card) => random.spoonacular = card,
            Err(e) => record_failure(&mut random.errors, RecipeSource::Spoonacular, &e),
        }

        if random.is_empty() {
            if random.errors.is_empty() {
                return Err(AppError::new(
                    ErrorCode::ResourceNotFound,
                    messages::NO_RECIPES_FOUND,
                ));
            }
            return Err(
                AppError::new(ErrorCode::ExternalServiceError, messages::ALL_PROVIDERS_FAILED)
                    .with_details(json!({ "errors": random.errors })),
            );
        }
        Ok(random)
    }

    /// TheMealDB name search passthrough
    ///
    /// # Errors
    ///
    /// `MissingRequiredField` for a blank query, otherwise the upstream error
    pub async fn search_mealdb(&self, query: &str) -> AppResult<Vec<RecipeCard>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::missing_field("q"));
        }
        self.mealdb.search_by_name(query).await
    }

    /// Spoonacular autocomplete passthrough
    ///
    /// # Errors
    ///
    /// `MissingRequiredField` for a blank query, otherwise the upstream error
    pub async fn autocomplete(
        &self,
        query: &str,
        number: Option<u32>,
    ) -> AppResult<Vec<RecipeSuggestion>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::missing_field("query"));
        }
        let number = number
            .unwrap_or(defaults::AUTOCOMPLETE_COUNT)
            .clamp(1, defaults::MAX_SEARCH_RESULT_COUNT);
        self.spoonacular.autocomplete(query, number).await
    }

    /// Nutrient summary for an ingredient
    ///
    /// # Errors
    ///
    /// `MissingRequiredField` for a blank query, `ResourceNotFound` without a
    /// match, otherwise the upstream error
    pub async fn nutrition(&self, query: &str) -> AppResult<NutritionSummary> {
        if query.trim().is_empty() {
            return Err(AppError::missing_field("query"));
        }
        self.usda.nutrition_summary(query).await
    }

    /// Video prompt, submitted when a video key is configured
    ///
    /// # Errors
    ///
    /// `MissingRequiredField` for a blank name, otherwise the upstream error
    pub async fn video(&self, request: &VideoRequest) -> AppResult<VideoPromptResponse> {
        self.video.generate(request).await
    }
}
