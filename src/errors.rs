// ABOUTME: Unified error handling system with stable error codes for all client operations
// ABOUTME: Defines the ValidationFailed/WalletNotConnected/TransactionFailed taxonomy and AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Secure Stride

//! # Unified Error Handling System
//!
//! This module provides the centralized error handling system for the Secure
//! Stride client. It defines standard error codes and the [`AppError`] type
//! used across all modules, so every failure surfaces to the caller through
//! one taxonomy:
//!
//! - **Validation** errors are recoverable: the user corrects the input.
//! - **Wallet** errors are recoverable: the user connects or unlocks a wallet.
//! - **Transaction** errors are surfaced and never retried automatically.
//! - **Internal** errors are the logged catch-all.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (1000-1999)
    /// One or more record fields violated their declared ranges
    #[serde(rename = "VALIDATION_FAILED")]
    ValidationFailed = 1000,

    // Wallet (2000-2999)
    /// The wallet capability reports no connected account
    #[serde(rename = "WALLET_NOT_CONNECTED")]
    WalletNotConnected = 2000,
    /// The wallet endpoint could not be reached
    #[serde(rename = "WALLET_UNAVAILABLE")]
    WalletUnavailable = 2001,
    /// The wallet refused to sign or dispatch the request
    #[serde(rename = "WALLET_REJECTED")]
    WalletRejected = 2002,

    // Transaction lifecycle (3000-3999)
    /// The transaction was included but reverted on-chain
    #[serde(rename = "TRANSACTION_FAILED")]
    TransactionFailed = 3000,
    /// No receipt arrived within the configured bounded wait
    #[serde(rename = "CONFIRMATION_TIMEOUT")]
    ConfirmationTimeout = 3001,
    /// The chain returned a receipt or call result we could not decode
    #[serde(rename = "RECEIPT_MALFORMED")]
    ReceiptMalformed = 3002,

    // Configuration (4000-4999)
    /// Required configuration is missing
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 4000,
    /// Configuration is present but invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 4001,

    // Internal (9000-9999)
    /// Catch-all for unexpected failures
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9001,
}

impl ErrorCode {
    /// Whether the user can recover by changing input or wallet state.
    ///
    /// Recoverable errors are rendered as actionable prompts at the CLI
    /// boundary; everything else is surfaced as a generic failure.
    #[must_use]
    pub const fn is_recoverable(self) -> bool {
        matches!(
            self,
            Self::ValidationFailed | Self::WalletNotConnected | Self::WalletUnavailable
        )
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ValidationFailed => "The provided record failed field validation",
            Self::WalletNotConnected => "No wallet is connected",
            Self::WalletUnavailable => "The wallet endpoint is unreachable",
            Self::WalletRejected => "The wallet rejected the request",
            Self::TransactionFailed => "The transaction reverted on-chain",
            Self::ConfirmationTimeout => "The transaction was not confirmed in time",
            Self::ReceiptMalformed => "The chain returned an undecodable response",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// A single violated field constraint, reported by record validation.
///
/// Field names follow the contract's parameter vocabulary (`duration`,
/// `calories`, `steps`, `heartRate`, `type`, `date`) so a violation maps
/// directly onto the input that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Field name in the contract's vocabulary
    pub field: &'static str,
    /// Human-readable constraint description
    pub message: String,
}

impl FieldViolation {
    /// Create a new violation for `field`
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Default, Serialize)]
pub struct ErrorContext {
    /// Transaction hash, session id, or other resource identifier
    pub resource_id: Option<String>,
    /// Every violated field, for `ValidationFailed` errors
    pub violations: Vec<FieldViolation>,
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Validation failure carrying every violated field
    #[must_use]
    pub fn validation_failed(violations: Vec<FieldViolation>) -> Self {
        let fields: Vec<&str> = violations.iter().map(|v| v.field).collect();
        let mut err = Self::new(
            ErrorCode::ValidationFailed,
            format!("invalid fields: {}", fields.join(", ")),
        );
        err.context.violations = violations;
        err
    }

    /// The wallet capability reports disconnected
    #[must_use]
    pub fn wallet_not_connected() -> Self {
        Self::new(
            ErrorCode::WalletNotConnected,
            "connect a wallet before submitting",
        )
    }

    /// The transaction reverted on-chain
    #[must_use]
    pub fn transaction_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TransactionFailed, message)
    }

    /// No receipt within the bounded wait
    #[must_use]
    pub fn confirmation_timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfirmationTimeout, message)
    }

    /// Generic internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Invalid configuration value
    #[must_use]
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Attach a resource identifier (transaction hash, session id)
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.context.resource_id = Some(resource_id.into());
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Every violated field, empty for non-validation errors
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.context.violations
    }

    /// Whether the user can recover by changing input or wallet state
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        self.code.is_recoverable()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, err.to_string()).with_source(err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(
            ErrorCode::WalletUnavailable,
            format!("wallet endpoint request failed: {err}"),
        )
        .with_source(err)
    }
}

/// Result type alias using `AppError`
pub type AppResult<T> = Result<T, AppError>;
