// ABOUTME: External API client modules (USDA FoodData Central)
// ABOUTME: Provides nutritional data integration for recipe ingredients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! External API Clients
//!
//! Clients for data sources that enrich recipes but are not recipe catalogs.

pub mod usda_client;

pub use usda_client::{FoodNutrient, FoodSearchResult, UsdaClient};
