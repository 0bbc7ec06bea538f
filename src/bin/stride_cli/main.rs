// ABOUTME: Stride CLI - command-line front-end for the Secure Stride fitness contract
// ABOUTME: Logs workouts, creates goals, updates metrics, and inspects sessions and wallet state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Secure Stride
//!
//! Usage:
//! ```bash
//! # Log a workout and wait for on-chain confirmation
//! stride-cli workout log --type Running --duration 45 --calories 420 --steps 6200 --heart-rate 142 --intensity High
//!
//! # Create a fitness goal without waiting for the receipt
//! stride-cli goal create --type "Weekly Steps" --target-steps 70000 --target-calories 3500 --target-duration 300 --duration-days 7 --no-wait
//!
//! # Update confidential health metrics
//! stride-cli metrics update --weight 72 --height 181 --age 34
//!
//! # Inspect a logged session
//! stride-cli session info 3
//!
//! # Show wallet connection state
//! stride-cli wallet status
//! ```
//!
//! All commands honor `STRIDE_RPC_URL` / `STRIDE_CONTRACT_ADDRESS`;
//! `--rpc-url` and `--contract` override them, and `--synthetic` swaps in
//! the in-memory wallet for dry runs with no node at all.

mod commands;

use std::env;
use std::str::FromStr;
use std::sync::Arc;

use alloy_primitives::Address;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use url::Url;

use secure_stride::config::{ClientConfig, Environment, LogLevel};
use secure_stride::constants::{defaults, env_config};
use secure_stride::encoding::PlaceholderEncryptor;
use secure_stride::errors::{AppError, AppResult};
use secure_stride::logging::{init_logging, LoggingConfig};
use secure_stride::models::{FitnessGoal, HealthMetrics, Intensity, WorkoutRecord};
use secure_stride::submitter::{ReceiptPolicy, TransactionSubmitter};
use secure_stride::wallet::rpc::{RpcWallet, RpcWalletConfig};
use secure_stride::wallet::synthetic::SyntheticWallet;
use secure_stride::wallet::WalletProvider;

type Result<T> = AppResult<T>;

/// Contract address used for synthetic dry runs
const SYNTHETIC_CONTRACT: Address = Address::repeat_byte(0x42);

#[derive(Parser)]
#[command(
    name = "stride-cli",
    about = "Secure Stride fitness contract CLI",
    long_about = "Command-line front-end for the SecureStride contract: log workouts, create goals, update health metrics, and inspect sessions."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON-RPC endpoint override
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Contract address override
    #[arg(long, global = true)]
    contract: Option<String>,

    /// Use the in-memory synthetic wallet instead of a node
    #[arg(long, global = true)]
    synthetic: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Workout logging commands
    Workout {
        #[command(subcommand)]
        action: WorkoutCommand,
    },

    /// Fitness goal commands
    Goal {
        #[command(subcommand)]
        action: GoalCommand,
    },

    /// Health metrics commands
    Metrics {
        #[command(subcommand)]
        action: MetricsCommand,
    },

    /// Logged session inspection
    Session {
        #[command(subcommand)]
        action: SessionCommand,
    },

    /// Wallet state commands
    Wallet {
        #[command(subcommand)]
        action: WalletCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum WorkoutCommand {
    /// Log a workout on-chain
    Log {
        /// Workout type (e.g. Running, Yoga)
        #[arg(long = "type")]
        workout_type: String,

        /// Duration in minutes
        #[arg(long, default_value_t = 30)]
        duration: u32,

        /// Calories burned
        #[arg(long, default_value_t = 200)]
        calories: u32,

        /// Step count
        #[arg(long, default_value_t = 0)]
        steps: u64,

        /// Average heart rate in BPM
        #[arg(long, default_value_t = 120)]
        heart_rate: u32,

        /// Perceived intensity (Low, Medium, High)
        #[arg(long, default_value = "Medium")]
        intensity: Intensity,

        /// Workout date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Dispatch without waiting for the receipt
        #[arg(long)]
        no_wait: bool,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum GoalCommand {
    /// Create a fitness goal on-chain
    Create {
        /// Goal type (e.g. "Weekly Steps")
        #[arg(long = "type")]
        goal_type: String,

        /// Target step count
        #[arg(long)]
        target_steps: u64,

        /// Target calories burned
        #[arg(long)]
        target_calories: u64,

        /// Target active minutes
        #[arg(long)]
        target_duration: u64,

        /// Goal horizon in days
        #[arg(long)]
        duration_days: u64,

        /// Dispatch without waiting for the receipt
        #[arg(long)]
        no_wait: bool,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum MetricsCommand {
    /// Update confidential health metrics on-chain
    Update {
        /// Body weight in kilograms
        #[arg(long)]
        weight: u64,

        /// Height in centimeters
        #[arg(long)]
        height: u64,

        /// Age in years
        #[arg(long)]
        age: u64,

        /// Dispatch without waiting for the receipt
        #[arg(long)]
        no_wait: bool,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum SessionCommand {
    /// Decode a logged session through the contract's view function
    Info {
        /// Session id assigned by the contract
        session_id: u64,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum WalletCommand {
    /// Show connection state and chain id
    Status,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        // Submission boundary: every failure becomes a user-visible
        // notification; nothing escapes as an unhandled error.
        eprintln!("error: {err}");
        for violation in err.violations() {
            eprintln!("  - {violation}");
        }
        if err.is_recoverable() {
            eprintln!("hint: correct the input or connect a wallet, then try again");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level(LogLevel::Debug);
    } else if logging.level == LogLevel::Info {
        logging = logging.with_level(config.log_level);
    }
    init_logging(&logging).map_err(|err| AppError::internal(err.to_string()))?;

    // Read-only commands work against public endpoints with no unlocked
    // accounts; only submissions need a connected account up front.
    let needs_account = matches!(
        cli.command,
        Command::Workout { .. } | Command::Goal { .. } | Command::Metrics { .. }
    );
    let wallet = build_wallet(&cli, &config, needs_account).await?;
    let submitter = TransactionSubmitter::new(
        Arc::clone(&wallet),
        Arc::new(PlaceholderEncryptor::new()),
        config.contract_address,
    )
    .with_policy(config.receipt_policy);

    match cli.command {
        Command::Workout {
            action:
                WorkoutCommand::Log {
                    workout_type,
                    duration,
                    calories,
                    steps,
                    heart_rate,
                    intensity,
                    date,
                    no_wait,
                },
        } => {
            let mut builder = WorkoutRecord::builder(workout_type)
                .duration_minutes(duration)
                .calories(calories)
                .steps(steps)
                .heart_rate_bpm(heart_rate)
                .intensity(intensity);
            if let Some(date) = date {
                builder = builder.date(date);
            }
            commands::log_workout(&submitter, &builder.build(), !no_wait).await
        }
        Command::Goal {
            action:
                GoalCommand::Create {
                    goal_type,
                    target_steps,
                    target_calories,
                    target_duration,
                    duration_days,
                    no_wait,
                },
        } => {
            let goal = FitnessGoal {
                goal_type,
                target_steps,
                target_calories,
                target_duration_minutes: target_duration,
                duration_days,
            };
            commands::create_goal(&submitter, &goal, !no_wait).await
        }
        Command::Metrics {
            action:
                MetricsCommand::Update {
                    weight,
                    height,
                    age,
                    no_wait,
                },
        } => {
            let metrics = HealthMetrics {
                weight_kg: weight,
                height_cm: height,
                age_years: age,
            };
            commands::update_metrics(&submitter, &metrics, !no_wait).await
        }
        Command::Session {
            action: SessionCommand::Info { session_id },
        } => commands::session_info(&submitter, session_id).await,
        Command::Wallet {
            action: WalletCommand::Status,
        } => commands::wallet_status(wallet.as_ref(), &config).await,
    }
}

/// Resolve configuration: environment first, CLI flags override.
///
/// Synthetic dry runs need no deployment, so a missing contract address is
/// filled with a fixed development address instead of failing.
fn build_config(cli: &Cli) -> Result<ClientConfig> {
    let env_has_contract = env::var(env_config::CONTRACT_ADDRESS).is_ok();
    let mut config = if cli.synthetic && !env_has_contract && cli.contract.is_none() {
        ClientConfig {
            rpc_url: Url::parse(defaults::RPC_URL)
                .map_err(|err| AppError::internal(err.to_string()))?,
            contract_address: SYNTHETIC_CONTRACT,
            chain_id: None,
            receipt_policy: ReceiptPolicy::default(),
            environment: Environment::Development,
            log_level: LogLevel::Info,
        }
    } else {
        ClientConfig::from_env().map_err(|err| AppError::config_invalid(err.to_string()))?
    };

    if let Some(rpc_url) = &cli.rpc_url {
        config.rpc_url = Url::parse(rpc_url)
            .map_err(|err| AppError::config_invalid(format!("--rpc-url: {err}")))?;
    }
    if let Some(contract) = &cli.contract {
        config.contract_address = Address::from_str(contract.trim())
            .map_err(|err| AppError::config_invalid(format!("--contract: {err}")))?;
    }
    Ok(config)
}

async fn build_wallet(
    cli: &Cli,
    config: &ClientConfig,
    needs_account: bool,
) -> Result<Arc<dyn WalletProvider>> {
    if cli.synthetic {
        return Ok(Arc::new(SyntheticWallet::connected()));
    }

    let wallet = RpcWallet::new(RpcWalletConfig {
        endpoint: config.rpc_url.clone(),
    })?;
    if let Some(expected) = config.chain_id {
        let actual = wallet.chain_id().await?;
        if actual != expected {
            return Err(AppError::config_invalid(format!(
                "node reports chain id {actual}, expected {expected}"
            )));
        }
    }
    if needs_account {
        wallet.connect().await?;
    }
    Ok(Arc::new(wallet))
}
