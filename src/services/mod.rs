// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Keeps HTTP handlers thin and the proxy rules testable without a router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! Domain service layer
//!
//! Route handlers parse the request and delegate here; services own the
//! provider fan-out, error isolation and not-found rules.

/// Recipe search, detail, cuisine, random, nutrition and video operations
pub mod recipes;

pub use recipes::{sanitize_ingredients, RecipeService};
