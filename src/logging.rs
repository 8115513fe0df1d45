// ABOUTME: Tracing subscriber setup for the server and the CLI
// ABOUTME: Chooses the output format from the environment and quiets chatty HTTP dependencies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! Structured logging
//!
//! The server logs to stdout in `pretty` (default) or `json` format; the CLI
//! logs compactly to stderr so command output stays clean.

use crate::config::environment::Environment;
use crate::constants::service_names;
use anyhow::Result;
use std::env;
use std::io;
use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Directives appended to every filter
const QUIET_DEPENDENCIES: [&str; 5] = [
    "hyper=warn",
    "hyper_util=warn",
    "reqwest=warn",
    "rustls=warn",
    "tower_http=info",
];

/// Where and how log lines are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line on stdout
    Json,
    /// Multi-field human output on stdout
    Pretty,
    /// Single-line output on stderr
    Compact,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value, falling back to pretty
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
            Self::Compact => "compact",
        }
    }
}

/// Subscriber settings
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string, e.g. `info` or `recipe_finder=debug`
    pub filter: String,
    pub format: LogFormat,
    /// Emit source file and line
    pub with_location: bool,
    /// Emit span enter/close events
    pub with_spans: bool,
    pub service: String,
    pub environment: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
            format: LogFormat::Pretty,
            with_location: false,
            with_spans: false,
            service: service_names::RECIPE_FINDER_SERVER.to_owned(),
            environment: "development".to_owned(),
        }
    }
}

impl LoggingConfig {
    /// Read `RUST_LOG`, `LOG_FORMAT`, `LOG_INCLUDE_LOCATION`, `LOG_INCLUDE_SPANS`,
    /// `SERVICE_NAME` and `ENVIRONMENT`
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);
        let production = Environment::from_str_or_default(&environment).is_production();

        Self {
            filter: env::var("RUST_LOG").unwrap_or(defaults.filter),
            format: env::var("LOG_FORMAT")
                .map_or(defaults.format, |value| LogFormat::from_str_or_default(&value)),
            with_location: production || env::var_os("LOG_INCLUDE_LOCATION").is_some(),
            with_spans: env::var_os("LOG_INCLUDE_SPANS").is_some(),
            service: env::var("SERVICE_NAME").unwrap_or(defaults.service),
            environment,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        QUIET_DEPENDENCIES
            .iter()
            .filter_map(|directive| directive.parse().ok())
            .fold(EnvFilter::new(&self.filter), EnvFilter::add_directive)
    }

    fn span_events(&self) -> FmtSpan {
        if self.with_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());

        match self.format {
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(io::stdout)
                        .with_file(self.with_location)
                        .with_line_number(self.with_location)
                        .with_span_events(self.span_events()),
                )
                .try_init()?,
            LogFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .with_writer(io::stdout)
                        .with_file(self.with_location)
                        .with_line_number(self.with_location)
                        .with_span_events(self.span_events()),
                )
                .try_init()?,
            LogFormat::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(io::stderr),
                )
                .try_init()?,
        }

        info!(
            service = %self.service,
            version = env!("CARGO_PKG_VERSION"),
            environment = %self.environment,
            filter = %self.filter,
            format = self.format.label(),
            "Logging initialized"
        );
        Ok(())
    }
}

/// Initialize logging for the server from the environment
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Compact stderr logging for the CLI, `debug` when verbose and `warn` otherwise
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_for_cli(verbose: bool) -> Result<()> {
    LoggingConfig {
        filter: if verbose { "debug" } else { "warn" }.to_owned(),
        format: LogFormat::Compact,
        ..LoggingConfig::default()
    }
    .init()
}
