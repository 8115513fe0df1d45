// ABOUTME: Spoonacular client for ingredient search, recipe information, random and autocomplete
// ABOUTME: Maps Spoonacular's camelCase schema into the common card and detail records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! Spoonacular API client
//!
//! Plain ingredient searches use `findByIngredients`, which reports
//! used/missed/unused ingredients per recipe. When a diet or cuisine filter is
//! supplied the client switches to `complexSearch`, the only endpoint that
//! accepts those filters, and asks it to fill the same ingredient breakdown.
//!
//! API reference: <https://spoonacular.com/food-api/docs>

use super::{decode_entities, fetch_json, html_to_text, split_steps};
use crate::config::environment::UpstreamConfig;
use crate::constants::{env_vars, provider_names::SPOONACULAR, upstream};
use crate::errors::{AppError, AppResult};
use crate::models::{IngredientLine, RecipeCard, RecipeDetail, RecipeSource, RecipeSuggestion};
use serde::Deserialize;
use tracing::{debug, instrument};

/// Optional search filters accepted by `complexSearch`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// e.g. `vegetarian`, `gluten free`
    pub diet: Option<String>,
    /// e.g. `italian`, `thai`
    pub cuisine: Option<String>,
}

impl SearchFilters {
    /// No filter is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.diet.is_none() && self.cuisine.is_none()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct IngredientRef {
    pub name: String,
}

/// Shared shape of `findByIngredients` items and `complexSearch` results
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecipeSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub used_ingredients: Vec<IngredientRef>,
    #[serde(default)]
    pub missed_ingredients: Vec<IngredientRef>,
    #[serde(default)]
    pub unused_ingredients: Vec<IngredientRef>,
}

#[derive(Debug, Deserialize)]
struct ComplexSearchResponse {
    #[serde(default)]
    results: Vec<RecipeSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct InstructionStep {
    pub step: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AnalyzedInstruction {
    #[serde(default)]
    pub steps: Vec<InstructionStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ExtendedIngredient {
    pub name: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// `/recipes/{id}/information` payload, also the item type of `/recipes/random`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecipeInformation {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub analyzed_instructions: Vec<AnalyzedInstruction>,
    #[serde(default)]
    pub extended_ingredients: Vec<ExtendedIngredient>,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub dish_types: Vec<String>,
    #[serde(default)]
    pub diets: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RandomResponse {
    #[serde(default)]
    recipes: Vec<RecipeInformation>,
}

/// Spoonacular API client
#[derive(Clone)]
pub struct SpoonacularClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl SpoonacularClient {
    /// Create a client; a missing key is reported per call, not at construction
    #[must_use]
    pub fn new(http_client: reqwest::Client, config: &UpstreamConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Whether an API key is configured
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::missing_credential(SPOONACULAR, env_vars::SPOONACULAR_API_KEY))
    }

    fn get(&self, path: &str) -> AppResult<reqwest::RequestBuilder> {
        let api_key = self.api_key()?;
        Ok(self
            .http_client
            .get(format!("{}{path}", self.base_url))
            .query(&[("apiKey", api_key)]))
    }

    /// Recipes using the given comma-separated ingredients
    ///
    /// # Errors
    ///
    /// Returns an error if no key is configured, the request fails, or the
    /// payload cannot be decoded
    #[instrument(skip(self))]
    pub async fn search_by_ingredients(
        &self,
        ingredients: &str,
        filters: &SearchFilters,
        number: u32,
    ) -> AppResult<Vec<RecipeCard>> {
        let number = number.to_string();
        let summaries: Vec<RecipeSummary> = if filters.is_empty() {
            let request = self.get("/recipes/findByIngredients")?.query(&[
                ("ingredients", ingredients),
                ("number", number.as_str()),
                ("ranking", "1"),
                ("ignorePantry", "true"),
            ]);
            fetch_json(SPOONACULAR, request).await?
        } else {
            let mut request = self.get("/recipes/complexSearch")?.query(&[
                ("includeIngredients", ingredients),
                ("number", number.as_str()),
                ("fillIngredients", "true"),
                ("addRecipeInformation", "true"),
            ]);
            if let Some(diet) = filters.diet.as_deref() {
                request = request.query(&[("diet", diet)]);
            }
            if let Some(cuisine) = filters.cuisine.as_deref() {
                request = request.query(&[("cuisine", cuisine)]);
            }
            let response: ComplexSearchResponse = fetch_json(SPOONACULAR, request).await?;
            response.results
        };

        debug!(count = summaries.len(), "Spoonacular ingredient search");
        Ok(summaries.into_iter().map(card_from_summary).collect())
    }

    /// Full recipe by id, `None` when the id is not numeric or unknown upstream
    ///
    /// # Errors
    ///
    /// Returns an error if no key is configured, the request fails, or the
    /// payload cannot be decoded
    #[instrument(skip(self))]
    pub async fn information(&self, id: &str) -> AppResult<Option<RecipeDetail>> {
        let Ok(id) = id.trim().parse::<u64>() else {
            return Ok(None);
        };
        let request = self
            .get(&format!("/recipes/{id}/information"))?
            .query(&[("includeNutrition", "false")]);

        match fetch_json::<RecipeInformation>(SPOONACULAR, request).await {
            Ok(information) => Ok(Some(detail_from_information(information))),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// One random recipe
    ///
    /// # Errors
    ///
    /// Returns an error if no key is configured, the request fails, or the
    /// payload cannot be decoded
    #[instrument(skip(self))]
    pub async fn random(&self) -> AppResult<Option<RecipeCard>> {
        let request = self.get("/recipes/random")?.query(&[("number", "1")]);
        let response: RandomResponse = fetch_json(SPOONACULAR, request).await?;
        Ok(response.recipes.first().map(card_from_information))
    }

    /// Recipe title suggestions for a partial query
    ///
    /// # Errors
    ///
    /// Returns an error if no key is configured, the request fails, or the
    /// payload cannot be decoded
    #[instrument(skip(self))]
    pub async fn autocomplete(&self, query: &str, number: u32) -> AppResult<Vec<RecipeSuggestion>> {
        let number = number.to_string();
        let request = self
            .get("/recipes/autocomplete")?
            .query(&[("query", query), ("number", number.as_str())]);
        fetch_json(SPOONACULAR, request).await
    }
}

/// Public recipe page for recipes without a `sourceUrl`
fn recipe_page_url(id: u64, title: &str) -> String {
    let slug = title
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    format!("{}/{slug}-{id}", upstream::SPOONACULAR_RECIPE_PAGE)
}

fn source_url_or_page(source_url: Option<&str>, id: u64, title: &str) -> String {
    source_url
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map_or_else(|| recipe_page_url(id, title), str::to_owned)
}

fn names(ingredients: Vec<IngredientRef>) -> Vec<String> {
    ingredients.into_iter().map(|i| i.name).collect()
}

/// Card from a search result
pub(crate) fn card_from_summary(summary: RecipeSummary) -> RecipeCard {
    RecipeCard {
        source_url: source_url_or_page(summary.source_url.as_deref(), summary.id, &summary.title),
        id: summary.id.to_string(),
        title: summary.title,
        image: summary.image.unwrap_or_default(),
        source: RecipeSource::Spoonacular,
        ready_in_minutes: summary.ready_in_minutes,
        servings: summary.servings,
        used_ingredients: names(summary.used_ingredients),
        missed_ingredients: names(summary.missed_ingredients),
        unused_ingredients: names(summary.unused_ingredients),
    }
}

/// Card from a recipe information payload
pub(crate) fn card_from_information(information: &RecipeInformation) -> RecipeCard {
    RecipeCard {
        id: information.id.to_string(),
        title: information.title.clone(),
        image: information.image.clone().unwrap_or_default(),
        source: RecipeSource::Spoonacular,
        source_url: source_url_or_page(
            information.source_url.as_deref(),
            information.id,
            &information.title,
        ),
        ready_in_minutes: information.ready_in_minutes,
        servings: information.servings,
        used_ingredients: Vec::new(),
        missed_ingredients: Vec::new(),
        unused_ingredients: Vec::new(),
    }
}

/// Render `2.0` as `2` and `0.5` as `0.5`
fn format_amount(amount: f64) -> String {
    if (amount - amount.round()).abs() < f64::EPSILON {
        format!("{}", amount.round() as i64)
    } else {
        let text = format!("{amount:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    }
}

fn measure(ingredient: &ExtendedIngredient) -> String {
    let amount = ingredient.amount.filter(|a| *a > 0.0).map(format_amount);
    let unit = ingredient
        .unit
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty());
    match (amount, unit) {
        (Some(amount), Some(unit)) => format!("{amount} {unit}"),
        (Some(amount), None) => amount,
        (None, Some(unit)) => unit.to_owned(),
        (None, None) => String::new(),
    }
}

/// Detail from a recipe information payload
pub(crate) fn detail_from_information(information: RecipeInformation) -> RecipeDetail {
    let card = card_from_information(&information);

    let mut steps: Vec<String> = information
        .analyzed_instructions
        .iter()
        .flat_map(|block| block.steps.iter())
        .map(|step| decode_entities(step.step.trim()))
        .filter(|step| !step.is_empty())
        .collect();

    let plain_instructions = information
        .instructions
        .as_deref()
        .map(html_to_text)
        .unwrap_or_default();
    if steps.is_empty() {
        steps = split_steps(&plain_instructions);
    }
    let instructions = if plain_instructions.trim().is_empty() {
        steps.join("\n")
    } else {
        split_steps(&plain_instructions).join("\n")
    };

    RecipeDetail {
        id: card.id,
        title: card.title,
        image: card.image,
        source: RecipeSource::Spoonacular,
        source_url: card.source_url,
        ready_in_minutes: card.ready_in_minutes,
        servings: card.servings,
        category: information.dish_types.first().cloned(),
        area: information.cuisines.first().cloned(),
        instructions,
        steps,
        ingredients: information
            .extended_ingredients
            .iter()
            .map(|ingredient| IngredientLine {
                name: ingredient.name.clone(),
                measure: measure(ingredient),
            })
            .collect(),
        tags: information.diets,
        youtube_url: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_card_from_find_by_ingredients_item() {
        let summary: RecipeSummary = serde_json::from_value(json!({
            "id": 73420,
            "title": "Apple Or Peach Strudel",
            "image": "https://img.spoonacular.com/recipes/73420-312x231.jpg",
            "usedIngredientCount": 1,
            "missedIngredientCount": 2,
            "usedIngredients": [{"id": 9003, "name": "apples", "amount": 6.0}],
            "missedIngredients": [{"name": "baking powder"}, {"name": "cinnamon"}],
            "unusedIngredients": []
        }))
        .unwrap();

        let card = card_from_summary(summary);
        assert_eq!(card.id, "73420");
        assert_eq!(card.source, RecipeSource::Spoonacular);
        assert_eq!(
            card.source_url,
            "https://spoonacular.com/recipes/apple-or-peach-strudel-73420"
        );
        assert_eq!(card.used_ingredients, vec!["apples"]);
        assert_eq!(card.missed_ingredients, vec!["baking powder", "cinnamon"]);
        assert!(card.ready_in_minutes.is_none());
    }

    #[test]
    fn test_detail_prefers_analyzed_steps() {
        let information: RecipeInformation = serde_json::from_value(json!({
            "id": 716429,
            "title": "Pasta with Garlic",
            "readyInMinutes": 45,
            "servings": 2,
            "sourceUrl": "https://fullbellysisters.blogspot.com/2012/06/pasta.html",
            "instructions": "<ol><li>Boil pasta.</li><li>Add garlic.</li></ol>",
            "analyzedInstructions": [{"name": "", "steps": [
                {"number": 1, "step": "Boil the pasta."},
                {"number": 2, "step": "Fry the garlic."}
            ]}],
            "extendedIngredients": [
                {"name": "garlic", "amount": 2.0, "unit": "cloves"},
                {"name": "salt", "amount": 0.5, "unit": "tsp"},
                {"name": "pepper"}
            ],
            "cuisines": ["Italian"],
            "dishTypes": ["main course"],
            "diets": ["dairy free"]
        }))
        .unwrap();

        let detail = detail_from_information(information);
        assert_eq!(detail.steps, vec!["Boil the pasta.", "Fry the garlic."]);
        assert_eq!(detail.instructions, "Boil pasta.\nAdd garlic.");
        assert_eq!(detail.ingredients[0].measure, "2 cloves");
        assert_eq!(detail.ingredients[1].measure, "0.5 tsp");
        assert_eq!(detail.ingredients[2].measure, "");
        assert_eq!(detail.area.as_deref(), Some("Italian"));
        assert_eq!(detail.category.as_deref(), Some("main course"));
        assert_eq!(detail.ready_in_minutes, Some(45));
    }

    #[test]
    fn test_detail_falls_back_to_plain_instructions() {
        let information: RecipeInformation = serde_json::from_value(json!({
            "id": 1,
            "title": "Toast",
            "instructions": "Slice bread.<br>Toast it."
        }))
        .unwrap();

        let detail = detail_from_information(information);
        assert_eq!(detail.steps, vec!["Slice bread.", "Toast it."]);
    }

    #[test]
    fn test_detail_decodes_entities_in_instructions() {
        let information: RecipeInformation = serde_json::from_value(json!({
            "id": 2,
            "title": "Roast Potatoes",
            "instructions": "<p>Mix salt &amp; pepper.</p><p>Heat to 350&deg;F&nbsp;now.</p>",
            "analyzedInstructions": []
        }))
        .unwrap();

        let detail = detail_from_information(information);
        assert_eq!(
            detail.steps,
            vec!["Mix salt & pepper.", "Heat to 350\u{b0}F now."]
        );
        assert_eq!(
            detail.instructions,
            "Mix salt & pepper.\nHeat to 350\u{b0}F now."
        );
        assert!(detail.steps.iter().all(|step| !step.contains('&')));
    }

    #[test]
    fn test_analyzed_steps_are_decoded() {
        let information: RecipeInformation = serde_json::from_value(json!({
            "id": 3,
            "title": "Fish and Chips",
            "analyzedInstructions": [{"name": "", "steps": [
                {"number": 1, "step": "Fry fish &amp; chips."}
            ]}]
        }))
        .unwrap();

        let detail = detail_from_information(information);
        assert_eq!(detail.steps, vec!["Fry fish & chips."]);
        assert_eq!(detail.instructions, "Fry fish & chips.");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(2.0), "2");
        assert_eq!(format_amount(0.25), "0.25");
        assert_eq!(format_amount(1.5), "1.5");
    }
}
