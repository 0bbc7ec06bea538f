// ABOUTME: Integration tests for the submit-and-confirm transaction pipeline
// ABOUTME: Drives the submitter against the synthetic wallet through success, revert, and timeout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Secure Stride

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, U256};
use chrono::NaiveDate;
use secure_stride::abi::LOG_WORKOUT;
use secure_stride::encoding::{
    EncryptedInput, InputEncryptor, InputProof, PlaceholderEncryptor,
};
use secure_stride::errors::{AppResult, ErrorCode};
use secure_stride::models::{FitnessGoal, HealthMetrics, Intensity, WorkoutRecord};
use secure_stride::submitter::{ReceiptPolicy, TransactionSubmitter};
use secure_stride::wallet::synthetic::{ScriptedOutcome, SyntheticWallet};
use secure_stride::wallet::ReceiptStatus;

const CONTRACT: Address = Address::repeat_byte(0x42);
const WORD: usize = 32;

/// Placeholder encryptor that counts how often it is invoked
#[derive(Default)]
struct CountingEncryptor {
    calls: AtomicU32,
    inner: PlaceholderEncryptor,
}

impl InputEncryptor for CountingEncryptor {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn encrypt_u64(&self, value: u64) -> AppResult<EncryptedInput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.encrypt_u64(value)
    }

    fn proof(&self, inputs: &[EncryptedInput]) -> AppResult<InputProof> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.proof(inputs)
    }
}

fn sample_record() -> WorkoutRecord {
    WorkoutRecord::builder("Running")
        .duration_minutes(30)
        .calories(200)
        .steps(1_000)
        .heart_rate_bpm(120)
        .intensity(Intensity::Medium)
        .date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        .build()
}

fn submitter_with(wallet: &Arc<SyntheticWallet>) -> TransactionSubmitter {
    TransactionSubmitter::new(
        Arc::clone(wallet) as Arc<dyn secure_stride::wallet::WalletProvider>,
        Arc::new(PlaceholderEncryptor::new()),
        CONTRACT,
    )
    .with_policy(fast_policy())
}

/// Millisecond-scale policy so timeout paths finish quickly
fn fast_policy() -> ReceiptPolicy {
    ReceiptPolicy {
        poll_interval: Duration::from_millis(5),
        timeout: Duration::from_millis(50),
    }
}

#[tokio::test]
async fn disconnected_wallet_rejects_before_any_encoding() {
    let wallet = Arc::new(SyntheticWallet::disconnected());
    let encryptor = Arc::new(CountingEncryptor::default());
    let submitter = TransactionSubmitter::new(
        Arc::clone(&wallet) as Arc<dyn secure_stride::wallet::WalletProvider>,
        Arc::clone(&encryptor) as Arc<dyn InputEncryptor>,
        CONTRACT,
    );

    let err = submitter.log_workout(&sample_record()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::WalletNotConnected);
    assert_eq!(encryptor.calls.load(Ordering::SeqCst), 0);
    assert!(wallet.submitted_requests().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_record_rejects_with_named_fields() {
    let wallet = Arc::new(SyntheticWallet::connected());
    let submitter = submitter_with(&wallet);

    let mut record = sample_record();
    record.duration_minutes = 0;
    record.heart_rate_bpm = 250;
    let err = submitter.log_workout(&record).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ValidationFailed);
    let fields: Vec<&str> = err.violations().iter().map(|v| v.field).collect();
    assert_eq!(fields, vec!["duration", "heartRate"]);
    assert!(wallet.submitted_requests().unwrap().is_empty());
}

#[tokio::test]
async fn valid_workout_dispatches_the_contract_call_shape() {
    let wallet = Arc::new(SyntheticWallet::connected());
    let submitter = submitter_with(&wallet);

    let handle = submitter.log_workout(&sample_record()).await.unwrap();
    assert_eq!(handle.function, "logWorkout");

    let requests = wallet.submitted_requests().unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.contract, CONTRACT);
    assert_eq!(&request.calldata[..4], &LOG_WORKOUT.selector());

    // Four 32-byte zeroed value buffers, the plaintext type, one 64-byte proof.
    let args = &request.calldata[4..];
    for index in 0..4 {
        assert_eq!(dynamic_arg(args, index), vec![0u8; 32]);
    }
    assert_eq!(dynamic_arg(args, 4), b"Running");
    assert_eq!(dynamic_arg(args, 5), vec![0u8; 64]);
}

#[tokio::test]
async fn confirmation_resolves_on_success_receipt() {
    let wallet = Arc::new(SyntheticWallet::connected());
    wallet
        .script_outcome(ScriptedOutcome::ConfirmedAfter(2))
        .unwrap();
    let submitter = submitter_with(&wallet);

    let handle = submitter.log_workout(&sample_record()).await.unwrap();
    let receipt = submitter.await_confirmation(&handle).await.unwrap();
    assert_eq!(receipt.status, ReceiptStatus::Success);
    assert_eq!(receipt.transaction_hash, handle.hash);
    assert!(receipt.block_number.is_some());
}

#[tokio::test]
async fn confirmation_rejects_on_revert() {
    let wallet = Arc::new(SyntheticWallet::connected());
    wallet
        .script_outcome(ScriptedOutcome::RevertedAfter(0))
        .unwrap();
    let submitter = submitter_with(&wallet);

    let handle = submitter.log_workout(&sample_record()).await.unwrap();
    let err = submitter.await_confirmation(&handle).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::TransactionFailed);
    assert_eq!(
        err.context.resource_id.as_deref(),
        Some(handle.hash.to_string().as_str())
    );
}

#[tokio::test]
async fn confirmation_times_out_when_never_mined() {
    let wallet = Arc::new(SyntheticWallet::connected());
    wallet.script_outcome(ScriptedOutcome::NeverMined).unwrap();
    let submitter = submitter_with(&wallet);

    let handle = submitter.log_workout(&sample_record()).await.unwrap();
    let err = submitter.await_confirmation(&handle).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfirmationTimeout);
}

#[tokio::test]
async fn back_to_back_submissions_are_independent() {
    let wallet = Arc::new(SyntheticWallet::connected());
    let submitter = submitter_with(&wallet);

    // No mutual exclusion: both dispatch without waiting for the first
    // confirmation, producing two independent in-flight transactions.
    let first = submitter.log_workout(&sample_record()).await.unwrap();
    let second = submitter.log_workout(&sample_record()).await.unwrap();
    assert_ne!(first.hash, second.hash);
    assert_eq!(wallet.submitted_requests().unwrap().len(), 2);

    let first_receipt = submitter.await_confirmation(&first).await.unwrap();
    let second_receipt = submitter.await_confirmation(&second).await.unwrap();
    assert_eq!(first_receipt.status, ReceiptStatus::Success);
    assert_eq!(second_receipt.status, ReceiptStatus::Success);
}

#[tokio::test]
async fn submit_and_confirm_wrapper_runs_the_full_lifecycle() {
    let wallet = Arc::new(SyntheticWallet::connected());
    wallet
        .script_outcome(ScriptedOutcome::ConfirmedAfter(1))
        .unwrap();
    let submitter = submitter_with(&wallet);

    let receipt = submitter
        .log_workout_confirmed(&sample_record())
        .await
        .unwrap();
    assert_eq!(receipt.status, ReceiptStatus::Success);
}

#[tokio::test]
async fn goal_submission_encodes_the_plain_horizon() {
    let wallet = Arc::new(SyntheticWallet::connected());
    let submitter = submitter_with(&wallet);

    let goal = FitnessGoal {
        goal_type: "Weekly Steps".into(),
        target_steps: 70_000,
        target_calories: 3_500,
        target_duration_minutes: 300,
        duration_days: 7,
    };
    let handle = submitter.create_fitness_goal(&goal).await.unwrap();
    assert_eq!(handle.function, "createFitnessGoal");

    let request = &wallet.submitted_requests().unwrap()[0];
    let args = &request.calldata[4..];
    // Targets are opaque buffers; the horizon stays a plain uint256.
    assert_eq!(dynamic_arg(args, 0), vec![0u8; 32]);
    assert_eq!(dynamic_arg(args, 3), b"Weekly Steps");
    let horizon = U256::from_be_slice(&args[4 * WORD..5 * WORD]);
    assert_eq!(horizon, U256::from(7u64));
}

#[tokio::test]
async fn metrics_submission_dispatches_update_health_metrics() {
    let wallet = Arc::new(SyntheticWallet::connected());
    let submitter = submitter_with(&wallet);

    let metrics = HealthMetrics {
        weight_kg: 72,
        height_cm: 181,
        age_years: 34,
    };
    let handle = submitter.update_health_metrics(&metrics).await.unwrap();
    assert_eq!(handle.function, "updateHealthMetrics");

    let request = &wallet.submitted_requests().unwrap()[0];
    let args = &request.calldata[4..];
    assert_eq!(dynamic_arg(args, 0), vec![0u8; 32]);
    assert_eq!(dynamic_arg(args, 3), vec![0u8; 64]);
}

#[tokio::test]
async fn workout_session_decodes_the_view_call() {
    let wallet = Arc::new(SyntheticWallet::connected());
    wallet
        .script_call_result(session_return_data("Running", 45, true))
        .unwrap();
    let submitter = submitter_with(&wallet);

    let session = submitter.workout_session(1).await.unwrap();
    assert_eq!(session.workout_type, "Running");
    assert_eq!(session.duration, 45);
    assert!(session.is_completed);
}

/// Read the dynamic payload for head slot `index` out of encoded arguments
fn dynamic_arg(args: &[u8], index: usize) -> Vec<u8> {
    let head = &args[index * WORD..(index + 1) * WORD];
    let offset = U256::from_be_slice(head).to::<usize>();
    let len = U256::from_be_slice(&args[offset..offset + WORD]).to::<usize>();
    args[offset + WORD..offset + WORD + len].to_vec()
}

/// Assemble `getWorkoutSessionInfo` return data the way the node would
fn session_return_data(workout_type: &str, duration: u8, completed: bool) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&U256::from(8 * WORD).to_be_bytes::<32>());
    for value in [10u8, 20, duration, 130] {
        data.extend_from_slice(&U256::from(value).to_be_bytes::<32>());
    }
    data.extend_from_slice(&U256::from(u8::from(completed)).to_be_bytes::<32>());
    let mut addr_word = [0u8; 32];
    addr_word[12..].copy_from_slice(Address::repeat_byte(0x55).as_slice());
    data.extend_from_slice(&addr_word);
    data.extend_from_slice(&U256::from(1_700_000_000u64).to_be_bytes::<32>());

    let bytes = workout_type.as_bytes();
    data.extend_from_slice(&U256::from(bytes.len()).to_be_bytes::<32>());
    data.extend_from_slice(bytes);
    data.extend(std::iter::repeat_n(
        0u8,
        bytes.len().div_ceil(WORD) * WORD - bytes.len(),
    ));
    data
}
