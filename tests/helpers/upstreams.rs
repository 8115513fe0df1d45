// ABOUTME: Mock upstream setup for route integration tests
// ABOUTME: Points every provider at one mockito server and builds the real router around it

use axum::Router;
use recipe_finder::config::environment::{ServerConfig, UpstreamConfig};
use recipe_finder::server::{build_router, ServerResources};
use std::sync::Arc;

/// Spoonacular/USDA key used by the mocks
pub const TEST_API_KEY: &str = "test-key";

/// Configuration with every upstream pointed at `base_url`
pub fn config_for(base_url: &str) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.mealdb.base_url = base_url.to_owned();
    config.spoonacular = UpstreamConfig {
        api_key: Some(TEST_API_KEY.to_owned()),
        base_url: base_url.to_owned(),
    };
    config.usda = UpstreamConfig {
        api_key: Some(TEST_API_KEY.to_owned()),
        base_url: base_url.to_owned(),
    };
    config.video.url = format!("{base_url}/generations");
    config.http_client_timeout_secs = 5;
    config
}

/// Router over the given configuration
pub fn router_with(config: ServerConfig) -> Router {
    let resources = Arc::new(ServerResources::new(config).expect("Failed to build resources"));
    build_router(&resources)
}

/// Router with every upstream pointed at `base_url`
pub fn router_for(base_url: &str) -> Router {
    router_with(config_for(base_url))
}
