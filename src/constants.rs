// ABOUTME: Application constants grouped by domain
// ABOUTME: Upstream endpoints, environment variable names, storage keys and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! Constants module
//!
//! Constants are grouped into small domain modules rather than a single flat list.

/// Service identity used in structured logs
pub mod service_names {
    /// Name of the HTTP proxy service
    pub const RECIPE_FINDER_SERVER: &str = "recipe-finder-server";
}

/// Environment variable names
pub mod env_vars {
    pub const HTTP_PORT: &str = "HTTP_PORT";
    pub const HOST: &str = "HOST";
    pub const MEALDB_API_KEY: &str = "MEALDB_API_KEY";
    pub const MEALDB_BASE_URL: &str = "MEALDB_BASE_URL";
    pub const SPOONACULAR_API_KEY: &str = "SPOONACULAR_API_KEY";
    pub const SPOONACULAR_BASE_URL: &str = "SPOONACULAR_BASE_URL";
    pub const USDA_API_KEY: &str = "USDA_API_KEY";
    pub const USDA_BASE_URL: &str = "USDA_BASE_URL";
    pub const VIDEO_API_KEY: &str = "VIDEO_API_KEY";
    pub const VIDEO_API_URL: &str = "VIDEO_API_URL";
    pub const VIDEO_MODEL: &str = "VIDEO_MODEL";
    pub const HTTP_CLIENT_TIMEOUT_SECS: &str = "HTTP_CLIENT_TIMEOUT_SECS";
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    pub const SUPABASE_URL: &str = "SUPABASE_URL";
    pub const SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";
    pub const SUPABASE_ACCESS_TOKEN: &str = "SUPABASE_ACCESS_TOKEN";
    pub const SUPABASE_USER_ID: &str = "SUPABASE_USER_ID";
    pub const STATE_PATH: &str = "RECIPE_FINDER_STATE_PATH";
}

/// Defaults applied when the environment is silent
pub mod defaults {
    pub const HTTP_PORT: u16 = 5000;
    pub const HOST: &str = "0.0.0.0";
    /// TheMealDB public test key
    pub const MEALDB_API_KEY: &str = "1";
    pub const HTTP_CLIENT_TIMEOUT_SECS: u64 = 30;
    pub const VIDEO_MODEL: &str = "ray-2";
    pub const VIDEO_ASPECT_RATIO: &str = "16:9";
    /// Spoonacular results requested per search
    pub const SEARCH_RESULT_COUNT: u32 = 12;
    /// Upper bound accepted for the `number` query parameter
    pub const MAX_SEARCH_RESULT_COUNT: u32 = 100;
    pub const AUTOCOMPLETE_COUNT: u32 = 10;
    pub const STATE_FILE_NAME: &str = "state.json";
    pub const STATE_DIR_NAME: &str = "recipe-finder";
}

/// Upstream base URLs
pub mod upstream {
    pub const MEALDB_BASE_URL: &str = "https://www.themealdb.com/api/json/v1";
    pub const SPOONACULAR_BASE_URL: &str = "https://api.spoonacular.com";
    pub const USDA_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
    pub const VIDEO_API_URL: &str = "https://api.lumalabs.ai/dream-machine/v1/generations";
    /// Public recipe page prefix used to build MealDB `sourceUrl` values
    pub const MEALDB_MEAL_PAGE: &str = "https://www.themealdb.com/meal";
    /// Public recipe page prefix used to build Spoonacular `sourceUrl` values
    pub const SPOONACULAR_RECIPE_PAGE: &str = "https://spoonacular.com/recipes";
}

/// Provider display names used in error messages
pub mod provider_names {
    pub const MEALDB: &str = "TheMealDB";
    pub const SPOONACULAR: &str = "Spoonacular";
    pub const USDA: &str = "USDA";
    pub const VIDEO: &str = "Video API";
    pub const SUPABASE: &str = "Supabase";
}

/// Local storage keys, one per collection
pub mod storage_keys {
    pub const FAVORITES: &str = "recipe-finder:favorites";
    pub const PANTRY: &str = "recipe-finder:pantry";
    pub const SHOPPING_LIST: &str = "recipe-finder:shopping-list";
}

/// Remote table names
pub mod remote_tables {
    pub const FAVORITES: &str = "favorites";
    pub const PANTRY: &str = "pantry_items";
    pub const SHOPPING_LIST: &str = "shopping_list";
}

/// USDA nutrient ids kept in the nutrition summary, in display order
pub mod nutrients {
    pub const ENERGY: u32 = 1008;
    /// Foundation foods report energy with Atwater factors instead
    pub const ENERGY_ATWATER_GENERAL: u32 = 2047;
    pub const ENERGY_ATWATER_SPECIFIC: u32 = 2048;
    pub const PROTEIN: u32 = 1003;
    pub const TOTAL_FAT: u32 = 1004;
    pub const CARBOHYDRATE: u32 = 1005;
    pub const CARBOHYDRATE_BY_SUMMATION: u32 = 1050;
    pub const FIBER: u32 = 1079;
    pub const SUGARS: u32 = 2000;
    pub const SUGARS_TOTAL: u32 = 1063;

    /// Nutrient subset returned by the nutrition endpoint, each slot listing
    /// the ids that can carry it in order of preference
    pub const SUMMARY_IDS: [&[u32]; 6] = [
        &[ENERGY, ENERGY_ATWATER_GENERAL, ENERGY_ATWATER_SPECIFIC],
        &[PROTEIN],
        &[TOTAL_FAT],
        &[CARBOHYDRATE, CARBOHYDRATE_BY_SUMMATION],
        &[FIBER],
        &[SUGARS, SUGARS_TOTAL],
    ];
}

/// User-facing error messages that clients match on
pub mod messages {
    pub const RECIPE_NOT_FOUND: &str = "Recipe not found";
    pub const NO_RECIPES_FOUND: &str = "No recipes found";
    pub const ALL_PROVIDERS_FAILED: &str = "All recipe providers failed";
    pub const NO_NUTRITION_DATA: &str = "No nutrition data found";
}
