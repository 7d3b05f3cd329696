// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports the environment-driven ServerConfig and its sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Portfolio API

/// Environment and server configuration
pub mod environment;

pub use environment::{
    token_ttl_from_minutes, AuthConfig, CorsConfig, DatabaseConfig, Environment, HttpConfig,
    ServerConfig, UploadConfig,
};
