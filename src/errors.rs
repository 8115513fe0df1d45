// ABOUTME: Unified error type with stable error codes and HTTP status mapping
// ABOUTME: Renders every failure as a structured `{error, code}` JSON body for the UI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! # Unified Error Handling
//!
//! Every handler returns [`AppResult`]. Errors are never thrown to a generic
//! handler: [`AppError`] implements [`IntoResponse`] and always produces a JSON
//! body of the form `{"error": "<message>", "code": "<CODE>", ...details}` so the
//! client can render partial results when only one provider failed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Stable machine-readable error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Generic bad input
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A required parameter was absent or blank
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,

    // Resource Management (4000-4999)
    /// Requested recipe, area or food does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // External Services (5000-5999)
    /// Upstream provider returned an error or an undecodable payload
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// Upstream provider cannot be reached or is not configured
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Client state could not be read or written
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
    /// Client state could not be (de)serialized
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Status the code maps to
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput | Self::MissingRequiredField => 400,
            Self::ResourceNotFound => 404,
            Self::ExternalServiceError | Self::ExternalServiceUnavailable => 502,
            Self::InternalError | Self::StorageError | Self::SerializationError => 500,
        }
    }

    /// Short label used as the `Display` prefix
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing from the request",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::InternalError => "An internal server error occurred",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Error returned by services, route handlers and the client store
#[derive(Debug, Error)]
pub struct AppError {
    pub code: ErrorCode,
    /// Human-readable error message, returned verbatim as the `error` field
    pub message: String,
    /// Extra top-level fields merged into the JSON body (e.g. per-provider `errors`)
    pub details: Value,
    /// Underlying cause, kept for logs and never serialized
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Value::Null,
            source: None,
        }
    }

    /// Attach extra fields to be merged into the response body
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Attach the underlying cause
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Status for the response
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Whether this error means "the thing does not exist" rather than "something broke"
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.code == ErrorCode::ResourceNotFound
    }

    /// `<resource> not found`
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Missing required parameter
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required parameter: {field}"),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Upstream failure, prefixed with the service name
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Credential for an external service is not configured
    pub fn missing_credential(service: &str, env_var: &str) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{service} API key not configured. Set {env_var} environment variable."),
        )
    }

    /// JSON body rendered for this error
    #[must_use]
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("error".to_owned(), Value::String(self.message.clone()));
        body.insert(
            "code".to_owned(),
            serde_json::to_value(self.code).unwrap_or(Value::Null),
        );
        if let Value::Object(extra) = &self.details {
            for (key, value) in extra {
                body.entry(key.clone()).or_insert_with(|| value.clone());
            }
        }
        Value::Object(body)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::warn!(code = ?self.code, status = %status, "{}", self.message);
        }
        (status, Json(self.to_body())).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        let code = if error.is_connect() || error.is_timeout() {
            ErrorCode::ExternalServiceUnavailable
        } else {
            ErrorCode::ExternalServiceError
        };
        Self::new(code, error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::storage(error.to_string())
    }
}

/// Result carrying an [`AppError`]
pub type AppResult<T> = Result<T, AppError>;
