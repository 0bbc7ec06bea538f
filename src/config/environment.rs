// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses env vars into a typed ClientConfig with validated endpoint and contract address
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Secure Stride

//! Environment-based configuration management.
//!
//! The client needs exactly two pieces of external configuration — the
//! JSON-RPC endpoint and the deployed contract address — plus optional
//! overrides for the chain id, receipt polling policy, log level, and
//! environment. Everything is read from environment variables; there is no
//! configuration file.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::Address;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::env_config;
use crate::submitter::ReceiptPolicy;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Errors and warnings
    Warn,
    /// Standard operational logging
    #[default]
    Info,
    /// Verbose diagnostics
    Debug,
    /// Everything, including per-poll output
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development against a dev node
    #[default]
    Development,
    /// Live deployment
    Production,
    /// Automated test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Complete client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// JSON-RPC endpoint of the node or signer sidecar
    pub rpc_url: Url,
    /// Address of the deployed SecureStride contract
    pub contract_address: Address,
    /// Expected chain id; submissions proceed unchecked when unset
    pub chain_id: Option<u64>,
    /// Receipt polling policy
    pub receipt_policy: ReceiptPolicy,
    /// Deployment environment
    pub environment: Environment,
    /// Log verbosity
    pub log_level: LogLevel,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// `STRIDE_CONTRACT_ADDRESS` is required — the contract is an external
    /// collaborator and there is no meaningful default address. Everything
    /// else falls back to development defaults.
    pub fn from_env() -> Result<Self> {
        let rpc_url = Url::parse(&env_config::rpc_url())
            .with_context(|| format!("{} is not a valid URL", env_config::RPC_URL))?;

        let contract_raw = env::var(env_config::CONTRACT_ADDRESS).with_context(|| {
            format!(
                "{} is required (address of the deployed contract)",
                env_config::CONTRACT_ADDRESS
            )
        })?;
        let contract_address = Address::from_str(contract_raw.trim()).with_context(|| {
            format!(
                "{} is not a valid 20-byte hex address",
                env_config::CONTRACT_ADDRESS
            )
        })?;

        let chain_id = match env::var(env_config::CHAIN_ID) {
            Ok(raw) => Some(
                raw.parse::<u64>()
                    .with_context(|| format!("{} must be a decimal chain id", env_config::CHAIN_ID))?,
            ),
            Err(_) => None,
        };

        let receipt_policy = ReceiptPolicy {
            poll_interval: Duration::from_millis(env_config::receipt_poll_interval_ms()),
            timeout: Duration::from_secs(env_config::confirmation_timeout_secs()),
        };

        let environment = Environment::from_str_or_default(
            &env::var("ENVIRONMENT").unwrap_or_default(),
        );
        let log_level =
            LogLevel::from_str_or_default(&env::var("LOG_LEVEL").unwrap_or_default());

        Ok(Self {
            rpc_url,
            contract_address,
            chain_id,
            receipt_policy,
            environment,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_parses_with_fallback() {
        assert_eq!(LogLevel::from_str_or_default("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("nonsense"), LogLevel::Info);
    }

    #[test]
    fn environment_accepts_short_forms() {
        assert_eq!(
            Environment::from_str_or_default("prod"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("test"),
            Environment::Testing
        );
        assert!(!Environment::from_str_or_default("dev").is_production());
    }
}
