// ABOUTME: Cooking video prompt builder and the client for the video generation API
// ABOUTME: Falls back to preview mode (prompt only) when no video API key is configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! # Video Prompts
//!
//! [`build_video_prompt`] renders a fixed text template from a recipe's name,
//! ingredients and steps. [`VideoClient::generate`] submits the prompt to the
//! configured generation endpoint, or returns it unsent in preview mode.

use crate::config::environment::VideoApiConfig;
use crate::constants::{defaults, provider_names::VIDEO};
use crate::errors::{AppError, AppResult};
use crate::providers::fetch_json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Write as _;
use tracing::{debug, info, instrument};

/// Closing line of every prompt
const STYLE_DIRECTIONS: &str = "Style: bright overhead kitchen shots with natural lighting, \
close-ups of each step, smooth transitions and no text overlays.";

/// Body of `POST /api/video`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
}

/// Response of `POST /api/video`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoPromptResponse {
    pub prompt: String,
    /// `true` when the prompt was not submitted
    pub preview: bool,
    /// Generation provider response, present when submitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<Value>,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    prompt: &'a str,
    model: &'a str,
    aspect_ratio: &'a str,
}

/// Render the video prompt for a recipe
///
/// Blank ingredients and steps are skipped and steps are numbered from 1.
#[must_use]
pub fn build_video_prompt(name: &str, ingredients: &[String], steps: &[String]) -> String {
    let mut prompt = format!(
        "Create a short, appetizing cooking video that shows how to make {}.",
        name.trim()
    );

    let ingredients: Vec<&str> = non_blank(ingredients).collect();
    if !ingredients.is_empty() {
        prompt.push_str("\n\nIngredients:");
        for ingredient in ingredients {
            let _ = write!(prompt, "\n- {ingredient}");
        }
    }

    let steps: Vec<&str> = non_blank(steps).collect();
    if !steps.is_empty() {
        prompt.push_str("\n\nSteps:");
        for (index, step) in steps.iter().enumerate() {
            let _ = write!(prompt, "\n{}. {step}", index + 1);
        }
    }

    prompt.push_str("\n\n");
    prompt.push_str(STYLE_DIRECTIONS);
    prompt
}

fn non_blank(items: &[String]) -> impl Iterator<Item = &str> {
    items.iter().map(|item| item.trim()).filter(|item| !item.is_empty())
}

/// Video generation API client
#[derive(Clone)]
pub struct VideoClient {
    http_client: reqwest::Client,
    url: String,
    model: String,
    api_key: Option<String>,
}

impl VideoClient {
    #[must_use]
    pub fn new(http_client: reqwest::Client, config: &VideoApiConfig) -> Self {
        Self {
            http_client,
            url: config.url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Whether prompts are submitted (otherwise preview mode)
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build the prompt for `request` and submit it when a key is configured
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` for a blank name, or an upstream error
    /// when the generation request fails
    #[instrument(skip_all, fields(recipe = %request.name))]
    pub async fn generate(&self, request: &VideoRequest) -> AppResult<VideoPromptResponse> {
        if request.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }

        let prompt = build_video_prompt(&request.name, &request.ingredients, &request.steps);

        let Some(api_key) = self.api_key.as_deref() else {
            debug!("No video API key configured, returning preview");
            return Ok(VideoPromptResponse {
                prompt,
                preview: true,
                generation: None,
            });
        };

        let generation = self.submit(api_key, &prompt).await?;
        info!(model = %self.model, "Video generation requested");
        Ok(VideoPromptResponse {
            prompt,
            preview: false,
            generation: Some(generation),
        })
    }

    async fn submit(&self, api_key: &str, prompt: &str) -> AppResult<Value> {
        let request = self
            .http_client
            .post(&self.url)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&GenerationRequest {
                prompt,
                model: &self.model,
                aspect_ratio: defaults::VIDEO_ASPECT_RATIO,
            });
        fetch_json(VIDEO, request).await
    }
}
