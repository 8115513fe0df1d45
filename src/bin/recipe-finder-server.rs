// ABOUTME: HTTP proxy server binary for ingredient-driven recipe discovery
// ABOUTME: Loads configuration from the environment, initializes logging and serves the API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! # Recipe Finder Server Binary
//!
//! Starts the REST proxy in front of TheMealDB, Spoonacular, USDA and the
//! video generation API.

use anyhow::Result;
use clap::Parser;
use recipe_finder::{
    config::environment::ServerConfig,
    logging,
    server::{RecipeFinderServer, ServerResources},
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "recipe-finder-server")]
#[command(about = "Recipe Finder API - recipe discovery proxy for TheMealDB and Spoonacular")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind address
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    logging::init_from_env()?;

    info!("Starting Recipe Finder API");
    info!("{}", config.summary());

    display_available_endpoints(&config);

    let resources = Arc::new(ServerResources::new(config)?);
    let server = RecipeFinderServer::new(resources);

    if let Err(e) = server.run().await {
        error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}

/// Display all available API endpoints
fn display_available_endpoints(config: &ServerConfig) {
    let host = if config.host == "0.0.0.0" {
        "127.0.0.1"
    } else {
        config.host.as_str()
    };
    let port = config.http_port;

    info!("=== Available API Endpoints ===");
    display_health_endpoints(host, port);
    display_recipe_endpoints(host, port);
    display_enrichment_endpoints(host, port);
    info!("=== End of Endpoint List ===");
}

fn display_health_endpoints(host: &str, port: u16) {
    info!("Health:");
    info!("   Liveness:          GET  http://{host}:{port}/health");
    info!("   Readiness:         GET  http://{host}:{port}/ready");
}

#[allow(clippy::cognitive_complexity)]
fn display_recipe_endpoints(host: &str, port: u16) {
    info!("Recipes:");
    info!("   Search:            GET  http://{host}:{port}/api/search?ingredients=chicken,rice");
    info!("   Detail:            GET  http://{host}:{port}/api/recipes/{{source}}/{{id}}");
    info!("   Cuisines:          GET  http://{host}:{port}/api/cuisines");
    info!("   Cuisine Recipes:   GET  http://{host}:{port}/api/cuisines/{{area}}");
    info!("   Random:            GET  http://{host}:{port}/api/random");
    info!("   MealDB Search:     GET  http://{host}:{port}/api/mealdb/search?q=");
    info!("   Autocomplete:      GET  http://{host}:{port}/api/spoonacular/autocomplete?query=");
}

fn display_enrichment_endpoints(host: &str, port: u16) {
    info!("Enrichment:");
    info!("   Nutrition:         GET  http://{host}:{port}/api/nutrition?query=");
    info!("   Video Prompt:      POST http://{host}:{port}/api/video");
}
