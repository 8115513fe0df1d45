// ABOUTME: USDA FoodData Central API client for nutritional data retrieval
// ABOUTME: Searches foods and reduces the best match to a fixed nutrient subset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! USDA `FoodData` Central API Client
//!
//! The API is free and requires an API key passed as the `api_key` query
//! parameter. Search results already carry an abridged nutrient list, so the
//! nutrition summary is built from the first search hit without a second
//! `/food/{fdcId}` call.
//!
//! # API Reference
//! USDA `FoodData` Central API: <https://fdc.nal.usda.gov/api-guide.html>

use crate::config::environment::UpstreamConfig;
use crate::constants::{env_vars, messages, nutrients, provider_names::USDA};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{NutrientAmount, NutritionSummary};
use crate::providers::fetch_json;
use serde::Deserialize;
use tracing::{debug, instrument};

/// One hit from `/foods/search`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearchResult {
    pub fdc_id: u64,
    pub description: String,
    /// "Foundation", "SR Legacy", "Branded" and so on
    #[serde(default)]
    pub data_type: String,
    #[serde(default)]
    pub food_nutrients: Vec<FoodNutrient>,
}

/// Abridged nutrient entry attached to a search hit
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodNutrient {
    pub nutrient_id: u32,
    pub nutrient_name: String,
    /// `G`, `KCAL`, `MG`
    #[serde(default)]
    pub unit_name: String,
    /// Per 100 g of food
    #[serde(default)]
    pub value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct FoodSearchEnvelope {
    #[serde(default)]
    foods: Vec<FoodSearchResult>,
}

/// Client for the nutrition lookup
#[derive(Clone)]
pub struct UsdaClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl UsdaClient {
    #[must_use]
    pub fn new(http: reqwest::Client, config: &UpstreamConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Foods matching `query`, at most `page_size` (1 to 200) of them
    ///
    /// # Errors
    /// Fails without a configured key, on a blank query or bad page size, and on upstream errors
    #[instrument(skip(self))]
    pub async fn search_foods(
        &self,
        query: &str,
        page_size: u32,
    ) -> AppResult<Vec<FoodSearchResult>> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(AppError::missing_credential(USDA, env_vars::USDA_API_KEY));
        };
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::invalid_input("Nutrition query must not be blank"));
        }
        if !(1..=200).contains(&page_size) {
            return Err(AppError::invalid_input(format!(
                "pageSize {page_size} is outside 1..=200"
            )));
        }

        let page_size = page_size.to_string();
        let request = self
            .http
            .get(format!("{}/foods/search", self.base_url))
            .query(&[
                ("query", query),
                ("pageSize", page_size.as_str()),
                ("api_key", key),
            ]);

        let envelope: FoodSearchEnvelope = fetch_json(USDA, request).await?;
        debug!(count = envelope.foods.len(), "USDA food search");
        Ok(envelope.foods)
    }

    /// Nutrient summary for the best match of `query`
    ///
    /// # Errors
    /// Returns `ResourceNotFound` when nothing matches, otherwise the errors of
    /// [`Self::search_foods`]
    pub async fn nutrition_summary(&self, query: &str) -> AppResult<NutritionSummary> {
        let food = self
            .search_foods(query, 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::new(ErrorCode::ResourceNotFound, messages::NO_NUTRITION_DATA)
            })?;

        Ok(summarize(query.trim(), food))
    }
}

/// Keep the summary nutrients, in display order
fn summarize(query: &str, food: FoodSearchResult) -> NutritionSummary {
    let nutrients = nutrients::SUMMARY_IDS
        .iter()
        .filter_map(|ids| {
            ids.iter()
                .find_map(|id| food.food_nutrients.iter().find(|n| n.nutrient_id == *id))
                .map(|n| NutrientAmount {
                    name: n.nutrient_name.clone(),
                    amount: n.value.unwrap_or(0.0),
                    unit: n.unit_name.to_lowercase(),
                })
        })
        .collect();

    NutritionSummary {
        query: query.to_owned(),
        fdc_id: food.fdc_id,
        description: food.description,
        data_type: food.data_type,
        nutrients,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_keeps_known_nutrients_in_order() {
        let food: FoodSearchResult = serde_json::from_value(json!({
            "fdcId": 171_477,
            "description": "Chicken, breast, meat only, cooked, roasted",
            "dataType": "SR Legacy",
            "foodNutrients": [
                {"nutrientId": 1003, "nutrientName": "Protein", "unitName": "G", "value": 31.02},
                {"nutrientId": 1008, "nutrientName": "Energy", "unitName": "KCAL", "value": 165.0},
                {"nutrientId": 1087, "nutrientName": "Calcium, Ca", "unitName": "MG", "value": 15.0},
                {"nutrientId": 1004, "nutrientName": "Total lipid (fat)", "unitName": "G", "value": 3.57}
            ]
        }))
        .unwrap();

        let summary = summarize("chicken breast", food);
        let names: Vec<&str> = summary.nutrients.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Energy", "Protein", "Total lipid (fat)"]);
        assert_eq!(summary.nutrients[0].unit, "kcal");
        assert_eq!(summary.fdc_id, 171_477);
    }

    #[test]
    fn test_summary_falls_back_to_atwater_energy() {
        let food: FoodSearchResult = serde_json::from_value(json!({
            "fdcId": 2_346_404,
            "description": "Apples, fuji, with skin, raw",
            "dataType": "Foundation",
            "foodNutrients": [
                {"nutrientId": 1003, "nutrientName": "Protein", "unitName": "G", "value": 0.15},
                {"nutrientId": 2048, "nutrientName": "Energy (Atwater Specific Factors)", "unitName": "KCAL", "value": 63.0},
                {"nutrientId": 2047, "nutrientName": "Energy (Atwater General Factors)", "unitName": "KCAL", "value": 64.7},
                {"nutrientId": 1050, "nutrientName": "Carbohydrate, by summation", "unitName": "G", "value": 15.7}
            ]
        }))
        .unwrap();

        let summary = summarize("apple", food);
        let names: Vec<&str> = summary.nutrients.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Energy (Atwater General Factors)",
                "Protein",
                "Carbohydrate, by summation"
            ]
        );
        assert!((summary.nutrients[0].amount - 64.7).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_missing_key_is_unavailable() {
        let client = UsdaClient::new(
            reqwest::Client::new(),
            &UpstreamConfig {
                api_key: None,
                base_url: "http://127.0.0.1:9".to_owned(),
            },
        );
        let err = client.nutrition_summary("apple").await.unwrap_err();
        assert_eq!(err.http_status(), 502);
    }
}
