// ABOUTME: Tests for environment-based configuration loading
// ABOUTME: Covers required contract address, endpoint parsing, and policy overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Secure Stride

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::time::Duration;

use secure_stride::config::{ClientConfig, Environment};
use secure_stride::constants::env_config;
use serial_test::serial;

const CONTRACT: &str = "0x742d35Cc6632C0532925a3b844Bc454e4438f44e";

fn clear_stride_env() {
    for var in [
        env_config::RPC_URL,
        env_config::CONTRACT_ADDRESS,
        env_config::CHAIN_ID,
        env_config::RECEIPT_POLL_INTERVAL_MS,
        env_config::CONFIRMATION_TIMEOUT_SECS,
        "ENVIRONMENT",
        "LOG_LEVEL",
    ] {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn missing_contract_address_is_an_error() {
    clear_stride_env();
    let err = ClientConfig::from_env().unwrap_err();
    assert!(err.to_string().contains(env_config::CONTRACT_ADDRESS));
}

#[test]
#[serial]
fn malformed_contract_address_is_rejected() {
    clear_stride_env();
    // The dApp prototype shipped a 31-hex-digit placeholder; a 20-byte
    // address type cannot represent it and the config must say so.
    env::set_var(env_config::CONTRACT_ADDRESS, "0x742d35Cc6634C0532925a3b8D001C2f");
    let err = ClientConfig::from_env().unwrap_err();
    assert!(err.to_string().contains("20-byte hex address"));
}

#[test]
#[serial]
fn minimal_environment_uses_development_defaults() {
    clear_stride_env();
    env::set_var(env_config::CONTRACT_ADDRESS, CONTRACT);

    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.rpc_url.as_str(), "http://localhost:8545/");
    assert_eq!(config.chain_id, None);
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(
        config.receipt_policy.poll_interval,
        Duration::from_millis(4_000)
    );
    assert_eq!(config.receipt_policy.timeout, Duration::from_secs(180));
}

#[test]
#[serial]
fn overrides_are_applied() {
    clear_stride_env();
    env::set_var(env_config::CONTRACT_ADDRESS, CONTRACT);
    env::set_var(env_config::RPC_URL, "https://sepolia.example.org/rpc");
    env::set_var(env_config::CHAIN_ID, "11155111");
    env::set_var(env_config::RECEIPT_POLL_INTERVAL_MS, "500");
    env::set_var(env_config::CONFIRMATION_TIMEOUT_SECS, "30");
    env::set_var("ENVIRONMENT", "production");

    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.rpc_url.host_str(), Some("sepolia.example.org"));
    assert_eq!(config.chain_id, Some(11_155_111));
    assert_eq!(
        config.receipt_policy.poll_interval,
        Duration::from_millis(500)
    );
    assert_eq!(config.receipt_policy.timeout, Duration::from_secs(30));
    assert!(config.environment.is_production());

    clear_stride_env();
}

#[test]
#[serial]
fn invalid_chain_id_is_rejected() {
    clear_stride_env();
    env::set_var(env_config::CONTRACT_ADDRESS, CONTRACT);
    env::set_var(env_config::CHAIN_ID, "sepolia");

    let err = ClientConfig::from_env().unwrap_err();
    assert!(err.to_string().contains("chain id"));

    clear_stride_env();
}
