// ABOUTME: Recipe provider clients and the shared upstream HTTP plumbing they use
// ABOUTME: Each provider maps its own wire schema into the common card and detail records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! # Recipe Providers
//!
//! - [`mealdb::MealDbClient`] talks to TheMealDB
//! - [`spoonacular::SpoonacularClient`] talks to Spoonacular
//!
//! Every upstream call is a single attempt. Failures are converted into
//! [`AppError`] here so callers can decide whether to isolate them (search,
//! random) or surface them directly (detail, passthroughs).

/// TheMealDB client and schema mapping
pub mod mealdb;
/// Spoonacular client and schema mapping
pub mod spoonacular;

pub use mealdb::MealDbClient;
pub use spoonacular::SpoonacularClient;

use crate::errors::{AppError, AppResult, ErrorCode};
use reqwest::{RequestBuilder, StatusCode};
use scraper::{ElementRef, Html, Node};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Longest upstream error body echoed back to the client
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Build the pooled HTTP client shared by all upstream calls
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized
pub fn build_http_client(timeout: Duration) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("recipe-finder/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))
}

/// Send a request and decode a JSON body
///
/// An upstream 404 becomes `ResourceNotFound`; any other non-success status,
/// transport failure or decode failure becomes an external service error.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    service: &str,
    request: RequestBuilder,
) -> AppResult<T> {
    let response = request.send().await.map_err(|e| {
        let e = e.without_url();
        warn!(service, "Upstream request failed: {}", e);
        upstream_transport_error(service, e)
    })?;

    let status = response.status();
    debug!(service, status = %status, "Upstream response received");

    if status == StatusCode::NOT_FOUND {
        return Err(AppError::new(
            ErrorCode::ResourceNotFound,
            format!("{service}: HTTP 404"),
        ));
    }

    let body = response
        .text()
        .await
        .map_err(|e| upstream_transport_error(service, e))?;

    if !status.is_success() {
        return Err(AppError::external_service(
            service,
            format!("HTTP {status}: {}", truncate(&body)),
        ));
    }

    serde_json::from_str(&body).map_err(|e| {
        warn!(service, "Failed to decode upstream payload: {}", e);
        AppError::external_service(service, format!("JSON parse error: {e}")).with_source(e)
    })
}

/// Send a request whose response body is not needed
///
/// Status handling matches [`fetch_json`].
pub(crate) async fn send_checked(service: &str, request: RequestBuilder) -> AppResult<()> {
    let response = request.send().await.map_err(|e| {
        let e = e.without_url();
        warn!(service, "Upstream request failed: {}", e);
        upstream_transport_error(service, e)
    })?;

    let status = response.status();
    debug!(service, status = %status, "Upstream response received");
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::NOT_FOUND {
        return Err(AppError::new(
            ErrorCode::ResourceNotFound,
            format!("{service}: HTTP 404"),
        ));
    }
    let body = response.text().await.unwrap_or_default();
    Err(AppError::external_service(
        service,
        format!("HTTP {status}: {}", truncate(&body)),
    ))
}

fn upstream_transport_error(service: &str, error: reqwest::Error) -> AppError {
    let error = error.without_url();
    let code = if error.is_connect() || error.is_timeout() {
        ErrorCode::ExternalServiceUnavailable
    } else {
        ErrorCode::ExternalServiceError
    };
    AppError::new(code, format!("{service}: {error}")).with_source(error)
}

fn truncate(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        trimmed.to_owned()
    } else {
        let mut cut: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
        cut.push_str("...");
        cut
    }
}

/// Split free-form instructions into one step per line
///
/// Blank lines and bare `STEP n` headings are dropped.
pub(crate) fn split_steps(instructions: &str) -> Vec<String> {
    instructions
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_step_heading(line))
        .map(str::to_owned)
        .collect()
}

/// Elements whose boundaries start a new line of text
const LINE_BREAKING_ELEMENTS: &[&str] = &[
    "br", "p", "li", "ol", "ul", "div", "h1", "h2", "h3", "h4", "h5", "h6", "tr",
];

/// Text content of an HTML fragment, one line per block element
///
/// Entities are decoded, including the double-encoded `&amp;deg;` some
/// recipe sites produce, and non-breaking spaces become plain spaces.
pub(crate) fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut text = String::with_capacity(html.len());
    collect_text(fragment.root_element(), &mut text);
    decode_entities(&text).replace('\u{a0}', " ")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            let breaks = LINE_BREAKING_ELEMENTS.contains(&child_element.value().name());
            if breaks {
                out.push('\n');
            }
            collect_text(child_element, out);
            if breaks {
                out.push('\n');
            }
        } else if let Node::Text(chunk) = child.value() {
            out.push_str(chunk);
        }
    }
}

/// Decode HTML entities left in plain-text upstream fields
pub(crate) fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

fn is_step_heading(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower
        .strip_prefix("step")
        .map(|rest| rest.trim().trim_end_matches(['.', ':']))
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}
