// ABOUTME: Provider-neutral data model shared by the proxy and the client state store
// ABOUTME: Recipe cards, details, favorites, nutrition summaries and merged search payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! Common data models
//!
//! Both providers are mapped into these records by `providers::mealdb` and
//! `providers::spoonacular`; nothing outside those modules sees a provider's
//! wire format. JSON field names are camelCase to match what the web client reads.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Upstream recipe catalog a card came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeSource {
    /// TheMealDB
    Mealdb,
    /// Spoonacular
    Spoonacular,
}

impl RecipeSource {
    /// Wire name used in URLs, JSON and composite keys
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mealdb => "mealdb",
            Self::Spoonacular => "spoonacular",
        }
    }
}

impl fmt::Display for RecipeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecipeSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mealdb" | "themealdb" => Ok(Self::Mealdb),
            "spoonacular" => Ok(Self::Spoonacular),
            other => Err(format!("Unknown recipe source '{other}'")),
        }
    }
}

/// Normalized recipe summary used by list views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCard {
    /// Provider-scoped id (numeric ids are rendered as strings)
    pub id: String,
    pub title: String,
    pub image: String,
    pub source: RecipeSource,
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_in_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default)]
    pub used_ingredients: Vec<String>,
    #[serde(default)]
    pub missed_ingredients: Vec<String>,
    #[serde(default)]
    pub unused_ingredients: Vec<String>,
}

impl RecipeCard {
    /// Composite `source:id` key
    #[must_use]
    pub fn key(&self) -> String {
        composite_key(self.source, &self.id)
    }
}

/// One ingredient line of a recipe detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    /// Quantity and unit as written by the provider, may be empty
    pub measure: String,
}

/// Full recipe used by the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub id: String,
    pub title: String,
    pub image: String,
    pub source: RecipeSource,
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_in_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    pub instructions: String,
    pub steps: Vec<String>,
    pub ingredients: Vec<IngredientLine>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
}

/// Saved recipe, keyed by `source:id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: String,
    pub title: String,
    pub image: String,
    pub source: RecipeSource,
    pub source_url: String,
}

impl Favorite {
    /// Composite `source:id` key, unique per storage scope
    #[must_use]
    pub fn key(&self) -> String {
        composite_key(self.source, &self.id)
    }
}

impl From<&RecipeCard> for Favorite {
    fn from(card: &RecipeCard) -> Self {
        Self {
            id: card.id.clone(),
            title: card.title.clone(),
            image: card.image.clone(),
            source: card.source,
            source_url: card.source_url.clone(),
        }
    }
}

impl From<&RecipeDetail> for Favorite {
    fn from(detail: &RecipeDetail) -> Self {
        Self {
            id: detail.id.clone(),
            title: detail.title.clone(),
            image: detail.image.clone(),
            source: detail.source,
            source_url: detail.source_url.clone(),
        }
    }
}

/// Build the composite favorite key
#[must_use]
pub fn composite_key(source: RecipeSource, id: &str) -> String {
    format!("{source}:{id}")
}

/// Case-insensitive identity of a pantry item
#[must_use]
pub fn pantry_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Merged result of an ingredient search across both providers
///
/// Empty provider arrays are omitted so a present array is always non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    /// Sanitized ingredient list that was queried
    pub ingredients: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mealdb: Vec<RecipeCard>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spoonacular: Vec<RecipeCard>,
    /// Per-provider failure messages keyed by source name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}

impl SearchResults {
    /// Both providers returned nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mealdb.is_empty() && self.spoonacular.is_empty()
    }
}

/// One random recipe per provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RandomRecipes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mealdb: Option<RecipeCard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spoonacular: Option<RecipeCard>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}

impl RandomRecipes {
    /// Neither provider produced a recipe
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.mealdb.is_none() && self.spoonacular.is_none()
    }
}

/// A single nutrient amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientAmount {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

/// Nutrient subset for the best USDA match of a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionSummary {
    pub query: String,
    pub fdc_id: u64,
    pub description: String,
    pub data_type: String,
    pub nutrients: Vec<NutrientAmount>,
}

/// Autocomplete suggestion passed through from Spoonacular
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSuggestion {
    pub id: u64,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(source: RecipeSource, id: &str) -> RecipeCard {
        RecipeCard {
            id: id.to_owned(),
            title: "Teriyaki Chicken".to_owned(),
            image: String::new(),
            source,
            source_url: String::new(),
            ready_in_minutes: None,
            servings: None,
            used_ingredients: Vec::new(),
            missed_ingredients: Vec::new(),
            unused_ingredients: Vec::new(),
        }
    }

    #[test]
    fn test_source_parsing() {
        assert_eq!("mealdb".parse::<RecipeSource>(), Ok(RecipeSource::Mealdb));
        assert_eq!(
            " Spoonacular ".parse::<RecipeSource>(),
            Ok(RecipeSource::Spoonacular)
        );
        assert!("allrecipes".parse::<RecipeSource>().is_err());
    }

    #[test]
    fn test_favorite_key_matches_card_key() {
        let card = card(RecipeSource::Mealdb, "52772");
        let favorite = Favorite::from(&card);
        assert_eq!(favorite.key(), "mealdb:52772");
        assert_eq!(card.key(), favorite.key());
    }

    #[test]
    fn test_search_results_omit_empty_arrays() {
        let mut results = SearchResults {
            ingredients: "chicken".to_owned(),
            ..SearchResults::default()
        };
        results.spoonacular.push(card(RecipeSource::Spoonacular, "715538"));
        results
            .errors
            .insert("mealdb".to_owned(), "TheMealDB: HTTP 500".to_owned());

        let json = serde_json::to_value(&results).unwrap();
        assert!(json.get("mealdb").is_none());
        assert_eq!(json["spoonacular"][0]["sourceUrl"], "");
        assert_eq!(json["errors"]["mealdb"], "TheMealDB: HTTP 500");
    }

    #[test]
    fn test_pantry_key_is_case_insensitive() {
        assert_eq!(pantry_key("  Garlic "), pantry_key("garlic"));
    }
}
