// ABOUTME: Scripted in-memory wallet capability for tests, development, and demonstrations
// ABOUTME: Records dispatched requests and serves pre-programmed receipts without a node
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Secure Stride

// RwLock poisoning is converted to an internal AppError so a panicked
// test thread cannot wedge the wallet silently.

//! # Synthetic Wallet
//!
//! An in-memory [`WalletProvider`] that needs no node and no keys. Unlike
//! the JSON-RPC wallet it:
//!
//! - toggles connection state on demand
//! - records every dispatched [`ContractRequest`] for inspection
//! - serves scripted transaction outcomes and view-call results
//!
//! Transaction hashes are derived deterministically from the calldata and
//! a dispatch counter, so back-to-back submissions of identical records
//! still produce distinct, stable hashes.

use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

use alloy_primitives::{keccak256, Address};
use async_trait::async_trait;

use super::{ContractRequest, ReceiptStatus, TransactionReceipt, TxHash, WalletAccount, WalletProvider};
use crate::errors::{AppError, AppResult};

/// Default account used when none is configured
const DEFAULT_ADDRESS: Address = Address::repeat_byte(0xAA);

/// Pre-programmed outcome for the next dispatched transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedOutcome {
    /// Receipt with success status after the given number of empty polls
    ConfirmedAfter(u32),
    /// Receipt with revert status after the given number of empty polls
    RevertedAfter(u32),
    /// Never produces a receipt; polls return `None` forever
    NeverMined,
}

#[derive(Debug)]
struct PendingReceipt {
    polls_remaining: u32,
    status: Option<ReceiptStatus>,
    block_number: u64,
}

#[derive(Debug, Default)]
struct SyntheticState {
    connected: bool,
    address: Option<Address>,
    writes: Vec<ContractRequest>,
    outcomes: VecDeque<ScriptedOutcome>,
    receipts: HashMap<TxHash, PendingReceipt>,
    call_results: VecDeque<Vec<u8>>,
    dispatch_count: u64,
}

/// Scripted wallet capability for tests and development
#[derive(Debug, Default)]
pub struct SyntheticWallet {
    state: RwLock<SyntheticState>,
}

impl SyntheticWallet {
    /// A connected wallet with the default development account
    #[must_use]
    pub fn connected() -> Self {
        Self::with_account(DEFAULT_ADDRESS)
    }

    /// A connected wallet with a specific account address
    #[must_use]
    pub fn with_account(address: Address) -> Self {
        let wallet = Self::default();
        if let Ok(mut state) = wallet.state.write() {
            state.connected = true;
            state.address = Some(address);
        }
        wallet
    }

    /// A wallet in the disconnected state
    #[must_use]
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Queue the outcome for the next dispatched transaction.
    ///
    /// Outcomes are consumed in dispatch order; transactions dispatched
    /// past the end of the queue confirm immediately.
    pub fn script_outcome(&self, outcome: ScriptedOutcome) -> AppResult<()> {
        self.write_state()?.outcomes.push_back(outcome);
        Ok(())
    }

    /// Queue raw return data for the next view call
    pub fn script_call_result(&self, data: Vec<u8>) -> AppResult<()> {
        self.write_state()?.call_results.push_back(data);
        Ok(())
    }

    /// Every request dispatched through `write_contract`, in order
    pub fn submitted_requests(&self) -> AppResult<Vec<ContractRequest>> {
        Ok(self.read_state()?.writes.clone())
    }

    fn read_state(&self) -> AppResult<std::sync::RwLockReadGuard<'_, SyntheticState>> {
        self.state
            .read()
            .map_err(|_| AppError::internal("synthetic wallet state poisoned"))
    }

    fn write_state(&self) -> AppResult<std::sync::RwLockWriteGuard<'_, SyntheticState>> {
        self.state
            .write()
            .map_err(|_| AppError::internal("synthetic wallet state poisoned"))
    }
}

#[async_trait]
impl WalletProvider for SyntheticWallet {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    async fn account(&self) -> AppResult<WalletAccount> {
        let state = self.read_state()?;
        Ok(if state.connected {
            WalletAccount {
                address: state.address,
                connected: true,
            }
        } else {
            WalletAccount::disconnected()
        })
    }

    async fn connect(&self) -> AppResult<WalletAccount> {
        let mut state = self.write_state()?;
        state.connected = true;
        let address = *state.address.get_or_insert(DEFAULT_ADDRESS);
        Ok(WalletAccount::connected(address))
    }

    async fn disconnect(&self) -> AppResult<()> {
        let mut state = self.write_state()?;
        state.connected = false;
        state.address = None;
        Ok(())
    }

    async fn write_contract(&self, request: &ContractRequest) -> AppResult<TxHash> {
        let mut state = self.write_state()?;
        if !state.connected {
            return Err(AppError::wallet_not_connected());
        }

        state.dispatch_count += 1;
        let mut preimage = request.calldata.clone();
        preimage.extend_from_slice(&state.dispatch_count.to_be_bytes());
        let hash = keccak256(&preimage);

        let outcome = state
            .outcomes
            .pop_front()
            .unwrap_or(ScriptedOutcome::ConfirmedAfter(0));
        let pending = match outcome {
            ScriptedOutcome::ConfirmedAfter(polls) => PendingReceipt {
                polls_remaining: polls,
                status: Some(ReceiptStatus::Success),
                block_number: state.dispatch_count,
            },
            ScriptedOutcome::RevertedAfter(polls) => PendingReceipt {
                polls_remaining: polls,
                status: Some(ReceiptStatus::Reverted),
                block_number: state.dispatch_count,
            },
            ScriptedOutcome::NeverMined => PendingReceipt {
                polls_remaining: 0,
                status: None,
                block_number: 0,
            },
        };
        state.receipts.insert(hash, pending);
        state.writes.push(request.clone());
        Ok(hash)
    }

    async fn call_contract(&self, _request: &ContractRequest) -> AppResult<Vec<u8>> {
        self.write_state()?
            .call_results
            .pop_front()
            .ok_or_else(|| AppError::internal("no scripted call result queued"))
    }

    async fn transaction_receipt(&self, hash: &TxHash) -> AppResult<Option<TransactionReceipt>> {
        let mut state = self.write_state()?;
        let Some(pending) = state.receipts.get_mut(hash) else {
            return Ok(None);
        };
        let Some(status) = pending.status else {
            return Ok(None);
        };
        if pending.polls_remaining > 0 {
            pending.polls_remaining -= 1;
            return Ok(None);
        }
        Ok(Some(TransactionReceipt {
            transaction_hash: *hash,
            block_number: Some(pending.block_number),
            status,
        }))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn request() -> ContractRequest {
        ContractRequest {
            contract: Address::repeat_byte(0x01),
            function: "logWorkout",
            calldata: vec![1, 2, 3],
        }
    }

    #[tokio::test]
    async fn identical_requests_get_distinct_hashes() {
        let wallet = SyntheticWallet::connected();
        let first = wallet.write_contract(&request()).await.unwrap();
        let second = wallet.write_contract(&request()).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(wallet.submitted_requests().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn scripted_polls_delay_the_receipt() {
        let wallet = SyntheticWallet::connected();
        wallet
            .script_outcome(ScriptedOutcome::ConfirmedAfter(2))
            .unwrap();
        let hash = wallet.write_contract(&request()).await.unwrap();

        assert!(wallet.transaction_receipt(&hash).await.unwrap().is_none());
        assert!(wallet.transaction_receipt(&hash).await.unwrap().is_none());
        let receipt = wallet.transaction_receipt(&hash).await.unwrap().unwrap();
        assert_eq!(receipt.status, ReceiptStatus::Success);
    }

    #[tokio::test]
    async fn disconnected_wallet_rejects_writes() {
        let wallet = SyntheticWallet::disconnected();
        let err = wallet.write_contract(&request()).await.unwrap_err();
        assert!(err.is_recoverable());
    }
}
