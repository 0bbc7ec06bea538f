// ABOUTME: Transaction submission pipeline from validated fitness records to confirmed receipts
// ABOUTME: Drives connected-check, validation, confidential encoding, dispatch, and bounded receipt polling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Secure Stride

//! # Transaction Submitter
//!
//! [`TransactionSubmitter`] packages typed records into the contract's
//! call shape and drives one transaction through submit → confirm. The
//! pipeline order is fixed:
//!
//! 1. the wallet capability must report connected — checked before any
//!    validation or encoding work
//! 2. the record is validated against its declared field ranges
//! 3. confidential fields are encoded through the [`InputEncryptor`] seam
//! 4. calldata is assembled and dispatched via the wallet
//!
//! Confirmation is a separate step: [`TransactionSubmitter::await_confirmation`]
//! polls the wallet's receipt primitive at the configured interval until a
//! receipt arrives or the bounded wait is exceeded. Failures are terminal:
//! nothing is retried, and there is no backoff.
//!
//! ## Concurrency
//!
//! The submitter imposes no mutual exclusion. Two back-to-back submissions
//! produce two independent in-flight transactions with independent
//! lifecycles; a caller that needs serialization must await confirmation
//! of the first before dispatching the second. Once dispatched, a
//! transaction cannot be cancelled from this side.

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::abi::{self, Token};
use crate::constants::defaults;
use crate::encoding::InputEncryptor;
use crate::errors::{AppError, AppResult};
use crate::models::{FitnessGoal, HealthMetrics, WorkoutRecord, WorkoutSession};
use crate::wallet::{ContractRequest, ReceiptStatus, TransactionReceipt, TxHash, WalletProvider};

/// Bounded-wait policy for receipt polling
#[derive(Debug, Clone, Copy)]
pub struct ReceiptPolicy {
    /// Interval between receipt polls
    pub poll_interval: Duration,
    /// Total wait before giving up with a timeout error
    pub timeout: Duration,
}

impl Default for ReceiptPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(defaults::RECEIPT_POLL_INTERVAL_MS),
            timeout: Duration::from_secs(defaults::CONFIRMATION_TIMEOUT_SECS),
        }
    }
}

/// Handle to one dispatched transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionHandle {
    /// Hash assigned by the wallet capability
    pub hash: TxHash,
    /// Contract function the transaction invokes
    pub function: &'static str,
    /// Dispatch timestamp
    pub submitted_at: DateTime<Utc>,
}

/// Validates, encodes, and submits fitness records to the contract
pub struct TransactionSubmitter {
    wallet: Arc<dyn WalletProvider>,
    encryptor: Arc<dyn InputEncryptor>,
    contract: Address,
    policy: ReceiptPolicy,
}

impl TransactionSubmitter {
    /// Create a submitter against `contract` with the default receipt policy
    #[must_use]
    pub fn new(
        wallet: Arc<dyn WalletProvider>,
        encryptor: Arc<dyn InputEncryptor>,
        contract: Address,
    ) -> Self {
        Self {
            wallet,
            encryptor,
            contract,
            policy: ReceiptPolicy::default(),
        }
    }

    /// Override the receipt polling policy
    #[must_use]
    pub const fn with_policy(mut self, policy: ReceiptPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The configured receipt policy
    #[must_use]
    pub const fn policy(&self) -> ReceiptPolicy {
        self.policy
    }

    /// Submit a workout record via `logWorkout`.
    ///
    /// Rejects with `WalletNotConnected` before any encoding work when the
    /// wallet reports disconnected, and with `ValidationFailed` listing
    /// every violated field when the record is out of range.
    pub async fn log_workout(&self, record: &WorkoutRecord) -> AppResult<TransactionHandle> {
        self.ensure_connected().await?;
        record.validate().map_err(AppError::validation_failed)?;

        let steps = self.encryptor.encrypt_u64(record.steps)?;
        let calories = self.encryptor.encrypt_u64(u64::from(record.calories))?;
        let duration = self.encryptor.encrypt_u64(u64::from(record.duration_minutes))?;
        let heart_rate = self.encryptor.encrypt_u64(u64::from(record.heart_rate_bpm))?;
        let proof = self.encryptor.proof(&[
            steps.clone(),
            calories.clone(),
            duration.clone(),
            heart_rate.clone(),
        ])?;

        let calldata = abi::LOG_WORKOUT.encode_call(&[
            Token::Bytes(steps.into_vec()),
            Token::Bytes(calories.into_vec()),
            Token::Bytes(duration.into_vec()),
            Token::Bytes(heart_rate.into_vec()),
            Token::Str(record.workout_type.clone()),
            Token::Bytes(proof.into_vec()),
        ])?;
        self.dispatch(abi::LOG_WORKOUT.name, calldata).await
    }

    /// Submit a fitness goal via `createFitnessGoal`
    pub async fn create_fitness_goal(&self, goal: &FitnessGoal) -> AppResult<TransactionHandle> {
        self.ensure_connected().await?;
        goal.validate().map_err(AppError::validation_failed)?;

        let target_steps = self.encryptor.encrypt_u64(goal.target_steps)?;
        let target_calories = self.encryptor.encrypt_u64(goal.target_calories)?;
        let target_duration = self.encryptor.encrypt_u64(goal.target_duration_minutes)?;
        let proof = self.encryptor.proof(&[
            target_steps.clone(),
            target_calories.clone(),
            target_duration.clone(),
        ])?;

        let calldata = abi::CREATE_FITNESS_GOAL.encode_call(&[
            Token::Bytes(target_steps.into_vec()),
            Token::Bytes(target_calories.into_vec()),
            Token::Bytes(target_duration.into_vec()),
            Token::Str(goal.goal_type.clone()),
            Token::Uint(U256::from(goal.duration_days)),
            Token::Bytes(proof.into_vec()),
        ])?;
        self.dispatch(abi::CREATE_FITNESS_GOAL.name, calldata).await
    }

    /// Submit body metrics via `updateHealthMetrics`
    pub async fn update_health_metrics(
        &self,
        metrics: &HealthMetrics,
    ) -> AppResult<TransactionHandle> {
        self.ensure_connected().await?;
        metrics.validate().map_err(AppError::validation_failed)?;

        let weight = self.encryptor.encrypt_u64(metrics.weight_kg)?;
        let height = self.encryptor.encrypt_u64(metrics.height_cm)?;
        let age = self.encryptor.encrypt_u64(metrics.age_years)?;
        let proof = self
            .encryptor
            .proof(&[weight.clone(), height.clone(), age.clone()])?;

        let calldata = abi::UPDATE_HEALTH_METRICS.encode_call(&[
            Token::Bytes(weight.into_vec()),
            Token::Bytes(height.into_vec()),
            Token::Bytes(age.into_vec()),
            Token::Bytes(proof.into_vec()),
        ])?;
        self.dispatch(abi::UPDATE_HEALTH_METRICS.name, calldata)
            .await
    }

    /// Poll for the receipt of a dispatched transaction.
    ///
    /// Resolves once the wallet reports an included transaction: a success
    /// receipt is returned, a revert rejects with `TransactionFailed`, and
    /// exceeding the policy's bounded wait rejects with
    /// `ConfirmationTimeout`. The transaction may still confirm on-chain
    /// after a timeout; only the wait is abandoned.
    pub async fn await_confirmation(
        &self,
        handle: &TransactionHandle,
    ) -> AppResult<TransactionReceipt> {
        let deadline = Instant::now() + self.policy.timeout;
        debug!(tx = %handle.hash, timeout_secs = self.policy.timeout.as_secs(), "confirming");

        loop {
            if let Some(receipt) = self.wallet.transaction_receipt(&handle.hash).await? {
                return match receipt.status {
                    ReceiptStatus::Success => {
                        info!(
                            tx = %handle.hash,
                            function = handle.function,
                            block = receipt.block_number,
                            "transaction confirmed"
                        );
                        Ok(receipt)
                    }
                    ReceiptStatus::Reverted => {
                        warn!(tx = %handle.hash, function = handle.function, "transaction reverted");
                        Err(AppError::transaction_failed(format!(
                            "{} reverted on-chain",
                            handle.function
                        ))
                        .with_resource_id(handle.hash.to_string()))
                    }
                };
            }

            if Instant::now() >= deadline {
                return Err(AppError::confirmation_timeout(format!(
                    "no receipt for {} within {}s",
                    handle.hash,
                    self.policy.timeout.as_secs()
                ))
                .with_resource_id(handle.hash.to_string()));
            }
            tokio::time::sleep(self.policy.poll_interval).await;
        }
    }

    /// Submit a workout and wait for its confirmation in one call
    pub async fn log_workout_confirmed(
        &self,
        record: &WorkoutRecord,
    ) -> AppResult<TransactionReceipt> {
        let handle = self.log_workout(record).await?;
        self.await_confirmation(&handle).await
    }

    /// Submit a goal and wait for its confirmation in one call
    pub async fn create_fitness_goal_confirmed(
        &self,
        goal: &FitnessGoal,
    ) -> AppResult<TransactionReceipt> {
        let handle = self.create_fitness_goal(goal).await?;
        self.await_confirmation(&handle).await
    }

    /// Submit metrics and wait for their confirmation in one call
    pub async fn update_health_metrics_confirmed(
        &self,
        metrics: &HealthMetrics,
    ) -> AppResult<TransactionReceipt> {
        let handle = self.update_health_metrics(metrics).await?;
        self.await_confirmation(&handle).await
    }

    /// Read a logged session through the contract's view function.
    ///
    /// Read-only: no connected account is required and no transaction is
    /// produced.
    pub async fn workout_session(&self, session_id: u64) -> AppResult<WorkoutSession> {
        let calldata =
            abi::GET_WORKOUT_SESSION_INFO.encode_call(&[Token::Uint(U256::from(session_id))])?;
        let request = ContractRequest {
            contract: self.contract,
            function: abi::GET_WORKOUT_SESSION_INFO.name,
            calldata,
        };
        let data = self.wallet.call_contract(&request).await?;
        abi::decode_session_info(&data)
    }

    async fn ensure_connected(&self) -> AppResult<()> {
        let account = self.wallet.account().await?;
        if account.connected {
            Ok(())
        } else {
            Err(AppError::wallet_not_connected())
        }
    }

    async fn dispatch(
        &self,
        function: &'static str,
        calldata: Vec<u8>,
    ) -> AppResult<TransactionHandle> {
        let request = ContractRequest {
            contract: self.contract,
            function,
            calldata,
        };
        let hash = self.wallet.write_contract(&request).await?;
        info!(function, tx = %hash, wallet = self.wallet.name(), "submission dispatched");
        Ok(TransactionHandle {
            hash,
            function,
            submitted_at: Utc::now(),
        })
    }
}
