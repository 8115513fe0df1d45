// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports environment-driven server and client store configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! Configuration module
//!
//! - **Environment**: server, provider and store configuration from environment variables

/// Environment and server configuration
pub mod environment;

pub use environment::{ServerConfig, StoreConfig};
