// ABOUTME: Configuration management for the Secure Stride client
// ABOUTME: Re-exports the environment-based configuration loader
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Secure Stride

//! Configuration management.
//!
//! Configuration is environment-only: a network endpoint and a deployed
//! contract address are externally supplied, everything else has defaults.

/// Environment-based configuration loading
pub mod environment;

pub use environment::{ClientConfig, Environment, LogLevel};
