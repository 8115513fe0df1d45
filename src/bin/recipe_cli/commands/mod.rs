// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors
// ABOUTME: Re-exports command modules for recipe-finder-cli
// ABOUTME: Provides access to search, favorites, pantry and shopping list commands

pub mod favorites;
pub mod pantry;
pub mod search;
pub mod shopping;
