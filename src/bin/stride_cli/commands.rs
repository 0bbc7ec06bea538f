// ABOUTME: Command implementations for stride-cli submission and inspection flows
// ABOUTME: Renders the SubmissionStatus lifecycle while driving the TransactionSubmitter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Secure Stride

use secure_stride::config::ClientConfig;
use secure_stride::errors::{AppResult, ErrorCode};
use secure_stride::models::{FitnessGoal, HealthMetrics, SubmissionStatus, WorkoutRecord};
use secure_stride::submitter::{TransactionHandle, TransactionSubmitter};
use secure_stride::wallet::WalletProvider;

type Result<T> = AppResult<T>;

/// Log a workout, rendering each lifecycle transition
pub async fn log_workout(
    submitter: &TransactionSubmitter,
    record: &WorkoutRecord,
    wait: bool,
) -> Result<()> {
    println!(
        "Logging {} workout ({} min, {} kcal, {} steps, {} BPM, {})",
        record.workout_type,
        record.duration_minutes,
        record.calories,
        record.steps,
        record.heart_rate_bpm,
        record.intensity
    );
    let handle = submitter.log_workout(record).await?;
    finish_submission(submitter, &handle, wait).await
}

/// Create a fitness goal, rendering each lifecycle transition
pub async fn create_goal(
    submitter: &TransactionSubmitter,
    goal: &FitnessGoal,
    wait: bool,
) -> Result<()> {
    println!(
        "Creating goal '{}' ({} steps / {} kcal / {} min over {} days)",
        goal.goal_type,
        goal.target_steps,
        goal.target_calories,
        goal.target_duration_minutes,
        goal.duration_days
    );
    let handle = submitter.create_fitness_goal(goal).await?;
    finish_submission(submitter, &handle, wait).await
}

/// Update health metrics, rendering each lifecycle transition
pub async fn update_metrics(
    submitter: &TransactionSubmitter,
    metrics: &HealthMetrics,
    wait: bool,
) -> Result<()> {
    println!(
        "Updating health metrics ({} kg, {} cm, {} years)",
        metrics.weight_kg, metrics.height_cm, metrics.age_years
    );
    let handle = submitter.update_health_metrics(metrics).await?;
    finish_submission(submitter, &handle, wait).await
}

/// Decode and print a logged session
pub async fn session_info(submitter: &TransactionSubmitter, session_id: u64) -> Result<()> {
    let session = submitter.workout_session(session_id).await?;
    println!("Session {session_id}");
    println!("  type:       {}", session.workout_type);
    println!("  steps:      {}", session.steps);
    println!("  calories:   {}", session.calories);
    println!("  duration:   {} min", session.duration);
    println!("  heart rate: {} BPM", session.heart_rate);
    println!("  completed:  {}", session.is_completed);
    println!("  user:       {}", session.user);
    println!("  timestamp:  {}", session.timestamp);
    Ok(())
}

/// Report wallet connection state without failing on a disconnected wallet
pub async fn wallet_status(wallet: &dyn WalletProvider, config: &ClientConfig) -> Result<()> {
    println!("wallet:   {}", wallet.name());
    println!("endpoint: {}", config.rpc_url);
    println!("contract: {}", config.contract_address);

    let account = match wallet.connect().await {
        Ok(account) => account,
        Err(err) if err.code == ErrorCode::WalletNotConnected => {
            println!("account:  none (disconnected)");
            return Ok(());
        }
        Err(err) => return Err(err),
    };
    match account.address {
        Some(address) => println!("account:  {address} (connected)"),
        None => println!("account:  none (disconnected)"),
    }
    Ok(())
}

async fn finish_submission(
    submitter: &TransactionSubmitter,
    handle: &TransactionHandle,
    wait: bool,
) -> Result<()> {
    println!("[{}] {}", SubmissionStatus::Pending, handle.hash);
    if !wait {
        println!("not waiting for the receipt (--no-wait); the transaction remains in flight");
        return Ok(());
    }

    println!("[{}] polling for receipt", SubmissionStatus::Confirming);
    let receipt = submitter.await_confirmation(handle).await?;
    match receipt.block_number {
        Some(block) => println!("[{}] included in block {block}", SubmissionStatus::Confirmed),
        None => println!("[{}]", SubmissionStatus::Confirmed),
    }
    Ok(())
}
