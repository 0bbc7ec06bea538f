// ABOUTME: Main library entry point for the Secure Stride confidential fitness client
// ABOUTME: Validates fitness records and drives contract submissions through a wallet capability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Secure Stride

#![deny(unsafe_code)]

//! # Secure Stride
//!
//! A client for the SecureStride fitness-logging contract: workouts,
//! goals, and health metrics are validated locally, packed into the
//! contract's confidential input format, submitted through an injected
//! wallet capability, and confirmed by bounded receipt polling.
//!
//! ## Architecture
//!
//! - **Models**: typed fitness records with declarative field validation
//! - **ABI**: hand-written descriptors for the fixed contract interface
//! - **Encoding**: the confidential-input seam (placeholder buffers today,
//!   a real encryption backend tomorrow)
//! - **Wallet**: the injected signing capability — JSON-RPC or synthetic
//! - **Submitter**: the submit → confirm pipeline tying it all together
//!
//! The chain is the system of record; this crate stores nothing locally.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use alloy_primitives::Address;
//! use secure_stride::encoding::PlaceholderEncryptor;
//! use secure_stride::errors::AppResult;
//! use secure_stride::models::WorkoutRecord;
//! use secure_stride::submitter::TransactionSubmitter;
//! use secure_stride::wallet::synthetic::SyntheticWallet;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let submitter = TransactionSubmitter::new(
//!         Arc::new(SyntheticWallet::connected()),
//!         Arc::new(PlaceholderEncryptor::new()),
//!         Address::repeat_byte(0x42),
//!     );
//!
//!     let record = WorkoutRecord::builder("Running")
//!         .duration_minutes(30)
//!         .calories(200)
//!         .steps(1_000)
//!         .heart_rate_bpm(120)
//!         .build();
//!
//!     let handle = submitter.log_workout(&record).await?;
//!     let receipt = submitter.await_confirmation(&handle).await?;
//!     println!("confirmed in block {:?}", receipt.block_number);
//!     Ok(())
//! }
//! ```

/// Hand-written descriptors for the deployed contract ABI
pub mod abi;

/// Configuration management and environment parsing
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Confidential input encoding seam (placeholder, not cryptography)
pub mod encoding;

/// Unified error handling system with standard error codes
pub mod errors;

/// Structured logging configuration
pub mod logging;

/// Core data models for fitness records
pub mod models;

/// Transaction submission and confirmation pipeline
pub mod submitter;

/// Wallet capability abstraction and implementations
pub mod wallet;
