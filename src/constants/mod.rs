// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Groups validation limits, payload sizes, env var names, and polling defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Secure Stride

//! Constants module
//!
//! Application constants grouped by domain: record validation limits,
//! confidential payload sizes, environment variable names, and receipt
//! polling defaults.

use std::env;

/// Field validation limits for fitness records
pub mod limits {
    /// Minimum workout duration in minutes
    pub const MIN_DURATION_MINUTES: u32 = 1;

    /// Minimum calories burned
    pub const MIN_CALORIES: u32 = 1;

    /// Lowest plausible heart rate in BPM
    pub const HEART_RATE_MIN_BPM: u32 = 40;

    /// Highest plausible heart rate in BPM
    pub const HEART_RATE_MAX_BPM: u32 = 220;

    /// Minimum goal target for steps, calories, and duration
    pub const MIN_GOAL_TARGET: u64 = 1;

    /// Minimum goal horizon in days
    pub const MIN_GOAL_DURATION_DAYS: u64 = 1;
}

/// Confidential payload sizes fixed by the contract's input format
pub mod payload {
    /// Size of one opaque encrypted-value buffer in bytes
    pub const ENCRYPTED_INPUT_LEN: usize = 32;

    /// Size of the accompanying input proof in bytes
    pub const INPUT_PROOF_LEN: usize = 64;
}

/// Receipt polling defaults, overridable via environment
pub mod defaults {
    /// Interval between receipt polls in milliseconds
    pub const RECEIPT_POLL_INTERVAL_MS: u64 = 4_000;

    /// Bounded wait for a transaction receipt in seconds
    pub const CONFIRMATION_TIMEOUT_SECS: u64 = 180;

    /// Default JSON-RPC endpoint for local development nodes
    pub const RPC_URL: &str = "http://localhost:8545";
}

/// Environment-based configuration
pub mod env_config {
    use super::env;

    /// Env var naming the JSON-RPC endpoint
    pub const RPC_URL: &str = "STRIDE_RPC_URL";

    /// Env var naming the deployed contract address (required)
    pub const CONTRACT_ADDRESS: &str = "STRIDE_CONTRACT_ADDRESS";

    /// Env var pinning the expected chain id (optional)
    pub const CHAIN_ID: &str = "STRIDE_CHAIN_ID";

    /// Env var overriding the receipt poll interval in milliseconds
    pub const RECEIPT_POLL_INTERVAL_MS: &str = "STRIDE_RECEIPT_POLL_INTERVAL_MS";

    /// Env var overriding the confirmation timeout in seconds
    pub const CONFIRMATION_TIMEOUT_SECS: &str = "STRIDE_CONFIRMATION_TIMEOUT_SECS";

    /// Get the JSON-RPC endpoint from environment or default
    #[must_use]
    pub fn rpc_url() -> String {
        env::var(RPC_URL).unwrap_or_else(|_| super::defaults::RPC_URL.to_string())
    }

    /// Get the receipt poll interval from environment or default
    #[must_use]
    pub fn receipt_poll_interval_ms() -> u64 {
        env::var(RECEIPT_POLL_INTERVAL_MS)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(super::defaults::RECEIPT_POLL_INTERVAL_MS)
    }

    /// Get the confirmation timeout from environment or default
    #[must_use]
    pub fn confirmation_timeout_secs() -> u64 {
        env::var(CONFIRMATION_TIMEOUT_SECS)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(super::defaults::CONFIRMATION_TIMEOUT_SECS)
    }
}

/// Service names for structured logging
pub mod service_names {
    /// Library and CLI service name
    pub const SECURE_STRIDE: &str = "secure-stride";
}
