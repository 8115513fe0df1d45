// ABOUTME: CORS middleware configuration for HTTP API endpoints
// ABOUTME: Lets the browser front end call the proxy from its own origin
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use crate::config::environment::ServerConfig;
use http::{header::HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Configure CORS settings for the proxy
///
/// Reads the origin list from `CORS_ALLOWED_ORIGINS`. An empty value or `*`
/// allows any origin, otherwise only the listed origins are allowed.
///
/// ```bash
/// export CORS_ALLOWED_ORIGINS="https://recipes.example.com,http://localhost:5173"
/// ```
#[must_use]
pub fn setup_cors(config: &ServerConfig) -> CorsLayer {
    let allowed = config.cors.allowed_origins.trim();
    let allow_origin = if allowed.is_empty() || allowed == "*" {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();

        if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("x-request-id"),
        ])
        .expose_headers([HeaderName::from_static("x-request-id")])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}
