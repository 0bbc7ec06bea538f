// ABOUTME: Wallet capability abstraction for signing, dispatching, and observing transactions
// ABOUTME: Defines the WalletProvider trait plus shared account, request, and receipt types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Secure Stride

//! # Wallet Capability
//!
//! All chain interaction goes through the [`WalletProvider`] trait: an
//! injected capability supplying account state, contract writes, view
//! calls, and receipt lookups. The submitter never touches a transport
//! directly and there is no module-level wallet singleton — each submitter
//! owns the `Arc<dyn WalletProvider>` it was constructed with.
//!
//! Two implementations ship with the crate:
//!
//! - [`rpc::RpcWallet`]: JSON-RPC against a node holding unlocked accounts
//! - [`synthetic::SyntheticWallet`]: scripted in-memory wallet for tests
//!   and development
//!
//! The receipt primitive is a single poll ([`WalletProvider::transaction_receipt`]);
//! the bounded-wait policy lives with the submitter so it stays
//! configurable without touching wallet implementations.

/// JSON-RPC wallet backed by a node with unlocked accounts
pub mod rpc;
/// Scripted in-memory wallet for tests and development
pub mod synthetic;

use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;

/// Transaction hash newtype alias
pub type TxHash = B256;

/// Account state owned by the wallet capability; this crate only reads it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WalletAccount {
    /// Active account address, if any
    pub address: Option<Address>,
    /// Whether the wallet reports a usable connection
    pub connected: bool,
}

impl WalletAccount {
    /// A connected account at `address`
    #[must_use]
    pub const fn connected(address: Address) -> Self {
        Self {
            address: Some(address),
            connected: true,
        }
    }

    /// The disconnected state
    #[must_use]
    pub const fn disconnected() -> Self {
        Self {
            address: None,
            connected: false,
        }
    }
}

/// A fully encoded contract interaction, ready for the wallet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractRequest {
    /// Deployed contract address
    pub contract: Address,
    /// Contract function name, for logging and inspection
    pub function: &'static str,
    /// ABI-encoded calldata including the selector
    pub calldata: Vec<u8>,
}

/// Terminal status recorded in a transaction receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    /// The transaction executed successfully
    Success,
    /// The transaction was included but reverted
    Reverted,
}

/// Confirmation record returned once a transaction is included in a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// Hash of the confirmed transaction
    pub transaction_hash: TxHash,
    /// Block the transaction was included in, when the node reports it
    pub block_number: Option<u64>,
    /// Execution outcome
    pub status: ReceiptStatus,
}

/// Injected wallet-signing capability.
///
/// Implementations own connection state and transport; callers treat the
/// wallet as an external collaborator and observe its asynchronous
/// lifecycle through these methods only.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Short implementation name for logging
    fn name(&self) -> &'static str;

    /// Current account state
    async fn account(&self) -> AppResult<WalletAccount>;

    /// Establish a connection and select an account
    async fn connect(&self) -> AppResult<WalletAccount>;

    /// Drop the active connection
    async fn disconnect(&self) -> AppResult<()>;

    /// Sign and dispatch a state-changing contract call, returning its hash
    async fn write_contract(&self, request: &ContractRequest) -> AppResult<TxHash>;

    /// Execute a read-only contract call and return the raw return data
    async fn call_contract(&self, request: &ContractRequest) -> AppResult<Vec<u8>>;

    /// Poll once for a transaction receipt; `None` until the transaction
    /// is included in a block
    async fn transaction_receipt(&self, hash: &TxHash) -> AppResult<Option<TransactionReceipt>>;
}
