// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors
// ABOUTME: Re-exports helper modules for recipe-finder-cli
// ABOUTME: Provides access to display formatting utilities

pub mod display;
