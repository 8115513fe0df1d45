// ABOUTME: TheMealDB client for ingredient filters, lookups, areas, random meals and name search
// ABOUTME: Maps TheMealDB's flat strIngredientN/strMeasureN schema into cards and details
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! TheMealDB API client
//!
//! TheMealDB answers "no results" with `{"meals": null}` rather than an empty
//! array or a 404, so list endpoints decode leniently and lookups treat a null
//! list as "not found".
//!
//! API reference: <https://www.themealdb.com/api.php>

use super::{fetch_json, split_steps};
use crate::config::environment::UpstreamConfig;
use crate::constants::{defaults, provider_names::MEALDB, upstream};
use crate::errors::AppResult;
use crate::models::{IngredientLine, RecipeCard, RecipeDetail, RecipeSource};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// TheMealDB stores up to 20 ingredient/measure pairs per meal
const MAX_INGREDIENT_SLOTS: usize = 20;

/// `{"meals": [...] | null}` envelope
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
struct MealsEnvelope<T> {
    #[serde(default = "Vec::new", deserialize_with = "lenient_list")]
    meals: Vec<T>,
}

/// Entry returned by the filter endpoints
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MealSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumb: Option<String>,
}

/// Full meal record returned by lookup, search and random
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MealRecord {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumb: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(rename = "strTags", default)]
    pub tags: Option<String>,
    #[serde(rename = "strYoutube", default)]
    pub youtube: Option<String>,
    #[serde(rename = "strSource", default)]
    pub source: Option<String>,
    /// `strIngredient1..20`, `strMeasure1..20` and anything else
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct AreaEntry {
    #[serde(rename = "strArea")]
    area: String,
}

/// Decode a list that may be `null` or a non-array sentinel string
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(serde::de::Error::custom))
            .collect(),
        _ => Ok(Vec::new()),
    }
}

/// TheMealDB API client
#[derive(Clone)]
pub struct MealDbClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MealDbClient {
    /// Create a client from configuration, falling back to the public test key
    #[must_use]
    pub fn new(http_client: reqwest::Client, config: &UpstreamConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url.clone(),
            api_key: config
                .api_key
                .clone()
                .unwrap_or_else(|| defaults::MEALDB_API_KEY.to_owned()),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{path}", self.base_url, self.api_key)
    }

    /// Meals containing the given comma-separated ingredients
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be decoded
    #[instrument(skip(self))]
    pub async fn filter_by_ingredients(&self, ingredients: &str) -> AppResult<Vec<RecipeCard>> {
        let request = self
            .http_client
            .get(self.endpoint("filter.php"))
            .query(&[("i", ingredients)]);
        let envelope: MealsEnvelope<MealSummary> = fetch_json(MEALDB, request).await?;
        debug!(count = envelope.meals.len(), "TheMealDB ingredient filter");
        Ok(envelope.meals.into_iter().map(card_from_summary).collect())
    }

    /// Full recipe by id, `None` when TheMealDB has no such meal
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be decoded
    #[instrument(skip(self))]
    pub async fn lookup(&self, id: &str) -> AppResult<Option<RecipeDetail>> {
        let request = self
            .http_client
            .get(self.endpoint("lookup.php"))
            .query(&[("i", id)]);
        let envelope: MealsEnvelope<MealRecord> = fetch_json(MEALDB, request).await?;
        Ok(envelope.meals.into_iter().next().map(detail_from_record))
    }

    /// One random meal
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be decoded
    #[instrument(skip(self))]
    pub async fn random(&self) -> AppResult<Option<RecipeCard>> {
        let request = self.http_client.get(self.endpoint("random.php"));
        let envelope: MealsEnvelope<MealRecord> = fetch_json(MEALDB, request).await?;
        Ok(envelope.meals.first().map(card_from_record))
    }

    /// All cuisine areas known to TheMealDB
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be decoded
    #[instrument(skip(self))]
    pub async fn list_areas(&self) -> AppResult<Vec<String>> {
        let request = self
            .http_client
            .get(self.endpoint("list.php"))
            .query(&[("a", "list")]);
        let envelope: MealsEnvelope<AreaEntry> = fetch_json(MEALDB, request).await?;
        Ok(envelope.meals.into_iter().map(|entry| entry.area).collect())
    }

    /// Meals from one cuisine area
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be decoded
    #[instrument(skip(self))]
    pub async fn filter_by_area(&self, area: &str) -> AppResult<Vec<RecipeCard>> {
        let request = self
            .http_client
            .get(self.endpoint("filter.php"))
            .query(&[("a", area)]);
        let envelope: MealsEnvelope<MealSummary> = fetch_json(MEALDB, request).await?;
        Ok(envelope.meals.into_iter().map(card_from_summary).collect())
    }

    /// Meals whose name matches the query
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be decoded
    #[instrument(skip(self))]
    pub async fn search_by_name(&self, query: &str) -> AppResult<Vec<RecipeCard>> {
        let request = self
            .http_client
            .get(self.endpoint("search.php"))
            .query(&[("s", query)]);
        let envelope: MealsEnvelope<MealRecord> = fetch_json(MEALDB, request).await?;
        Ok(envelope.meals.iter().map(card_from_record).collect())
    }
}

fn meal_page_url(id: &str) -> String {
    format!("{}/{id}", upstream::MEALDB_MEAL_PAGE)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Card from a filter endpoint entry
pub(crate) fn card_from_summary(summary: MealSummary) -> RecipeCard {
    RecipeCard {
        source_url: meal_page_url(&summary.id),
        id: summary.id,
        title: summary.name,
        image: summary.thumb.unwrap_or_default(),
        source: RecipeSource::Mealdb,
        ready_in_minutes: None,
        servings: None,
        used_ingredients: Vec::new(),
        missed_ingredients: Vec::new(),
        unused_ingredients: Vec::new(),
    }
}

/// Card from a full meal record
pub(crate) fn card_from_record(record: &MealRecord) -> RecipeCard {
    RecipeCard {
        id: record.id.clone(),
        title: record.name.clone(),
        image: record.thumb.clone().unwrap_or_default(),
        source: RecipeSource::Mealdb,
        source_url: non_blank(record.source.as_deref())
            .unwrap_or_else(|| meal_page_url(&record.id)),
        ready_in_minutes: None,
        servings: None,
        used_ingredients: Vec::new(),
        missed_ingredients: Vec::new(),
        unused_ingredients: Vec::new(),
    }
}

/// Collect the non-blank `strIngredientN` / `strMeasureN` pairs in slot order
pub(crate) fn ingredient_lines(extra: &HashMap<String, Value>) -> Vec<IngredientLine> {
    (1..=MAX_INGREDIENT_SLOTS)
        .filter_map(|slot| {
            let name = non_blank(
                extra
                    .get(&format!("strIngredient{slot}"))
                    .and_then(Value::as_str),
            )?;
            let measure = non_blank(
                extra
                    .get(&format!("strMeasure{slot}"))
                    .and_then(Value::as_str),
            )
            .unwrap_or_default();
            Some(IngredientLine { name, measure })
        })
        .collect()
}

/// Detail from a full meal record
pub(crate) fn detail_from_record(record: MealRecord) -> RecipeDetail {
    let card = card_from_record(&record);
    let instructions = record.instructions.unwrap_or_default();
    let tags = record
        .tags
        .as_deref()
        .map(|tags| {
            tags.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();

    RecipeDetail {
        id: card.id,
        title: card.title,
        image: card.image,
        source: RecipeSource::Mealdb,
        source_url: card.source_url,
        ready_in_minutes: None,
        servings: None,
        category: non_blank(record.category.as_deref()),
        area: non_blank(record.area.as_deref()),
        steps: split_steps(&instructions),
        instructions: instructions.trim().to_owned(),
        ingredients: ingredient_lines(&record.extra),
        tags,
        youtube_url: non_blank(record.youtube.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn teriyaki_record() -> MealRecord {
        serde_json::from_value(json!({
            "idMeal": "52772",
            "strMeal": "Teriyaki Chicken Casserole",
            "strMealThumb": "https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
            "strCategory": "Chicken",
            "strArea": "Japanese",
            "strInstructions": "Preheat oven to 350.\r\n\r\nCombine soy sauce and water.",
            "strTags": "Meat,Casserole, ",
            "strYoutube": "https://www.youtube.com/watch?v=4aZr5hZXP_s",
            "strSource": "",
            "strIngredient1": "soy sauce",
            "strMeasure1": "3/4 cup",
            "strIngredient2": "water",
            "strMeasure2": " ",
            "strIngredient3": "",
            "strMeasure3": "",
            "strIngredient4": null,
            "strMeasure4": null
        }))
        .unwrap()
    }

    #[test]
    fn test_null_meals_decode_as_empty() {
        let envelope: MealsEnvelope<MealSummary> =
            serde_json::from_value(json!({"meals": null})).unwrap();
        assert!(envelope.meals.is_empty());

        let envelope: MealsEnvelope<MealSummary> =
            serde_json::from_value(json!({"meals": "no data found"})).unwrap();
        assert!(envelope.meals.is_empty());
    }

    #[test]
    fn test_detail_from_record_collects_ingredient_slots() {
        let detail = detail_from_record(teriyaki_record());

        assert_eq!(detail.source, RecipeSource::Mealdb);
        assert_eq!(detail.source_url, "https://www.themealdb.com/meal/52772");
        assert_eq!(detail.area.as_deref(), Some("Japanese"));
        assert_eq!(detail.tags, vec!["Meat", "Casserole"]);
        assert_eq!(
            detail.ingredients,
            vec![
                IngredientLine {
                    name: "soy sauce".to_owned(),
                    measure: "3/4 cup".to_owned(),
                },
                IngredientLine {
                    name: "water".to_owned(),
                    measure: String::new(),
                },
            ]
        );
        assert_eq!(
            detail.steps,
            vec!["Preheat oven to 350.", "Combine soy sauce and water."]
        );
    }

    #[test]
    fn test_card_from_summary() {
        let card = card_from_summary(MealSummary {
            id: "52940".to_owned(),
            name: "Brown Stew Chicken".to_owned(),
            thumb: None,
        });
        assert_eq!(card.key(), "mealdb:52940");
        assert!(card.image.is_empty());
        assert!(card.used_ingredients.is_empty());
    }
}
