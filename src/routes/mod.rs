// ABOUTME: Route module organization for the Recipe Finder HTTP endpoints
// ABOUTME: Provides route definitions organized by domain, each delegating to the service layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! Route module for the Recipe Finder proxy
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to [`crate::services`].

/// Health check and readiness routes
pub mod health;
/// USDA nutrition lookup routes
pub mod nutrition;
/// Recipe search, detail, cuisine, random and passthrough routes
pub mod recipes;
/// Video prompt routes
pub mod video;

pub use health::HealthRoutes;
pub use nutrition::NutritionRoutes;
pub use recipes::RecipeRoutes;
pub use video::VideoRoutes;
