// ABOUTME: JSON-RPC wallet implementation backed by a node holding unlocked accounts
// ABOUTME: Covers eth_accounts, eth_sendTransaction, eth_call, eth_getTransactionReceipt, eth_chainId
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Secure Stride

//! JSON-RPC wallet capability.
//!
//! Speaks the Ethereum JSON-RPC surface of a node that manages its own
//! accounts (a development node or a signer sidecar): `eth_accounts` for
//! discovery, `eth_sendTransaction` for signing and broadcast, `eth_call`
//! for view reads, and `eth_getTransactionReceipt` for confirmation polls.
//! Browser-extension signing flows are out of scope — this is the CLI's
//! counterpart to the dApp's injected wallet.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

use super::{ContractRequest, ReceiptStatus, TransactionReceipt, TxHash, WalletAccount, WalletProvider};
use crate::errors::{AppError, AppResult, ErrorCode};

/// HTTP timeout for individual RPC requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON-RPC wallet configuration
#[derive(Debug, Clone)]
pub struct RpcWalletConfig {
    /// Node endpoint URL
    pub endpoint: Url,
}

/// Wallet capability backed by an Ethereum JSON-RPC node
pub struct RpcWallet {
    http: reqwest::Client,
    endpoint: Url,
    /// Selected account, populated by `connect`
    account: RwLock<Option<Address>>,
    next_id: AtomicU64,
}

impl RpcWallet {
    /// Create a wallet client against `config.endpoint`
    pub fn new(config: RpcWalletConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint,
            account: RwLock::new(None),
            next_id: AtomicU64::new(1),
        })
    }

    /// The chain id reported by the node
    pub async fn chain_id(&self) -> AppResult<u64> {
        let raw: String = self.rpc("eth_chainId", json!([])).await?;
        parse_hex_u64(&raw)
    }

    async fn rpc<T: DeserializeOwned>(&self, method: &str, params: Value) -> AppResult<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(method, id, "dispatching JSON-RPC request");

        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        let response: JsonRpcResponse = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(AppError::new(
                ErrorCode::WalletRejected,
                format!("{method} failed: {} (code {})", error.message, error.code),
            ));
        }
        // `result` may legitimately be JSON null (pending receipt lookups);
        // let the caller's type decide whether null is acceptable.
        serde_json::from_value(response.result.unwrap_or(Value::Null)).map_err(|err| {
            AppError::new(
                ErrorCode::ReceiptMalformed,
                format!("{method} returned an undecodable result"),
            )
            .with_source(err)
        })
    }
}

#[async_trait]
impl WalletProvider for RpcWallet {
    fn name(&self) -> &'static str {
        "json-rpc"
    }

    async fn account(&self) -> AppResult<WalletAccount> {
        Ok(self.account.read().await.map_or_else(
            WalletAccount::disconnected,
            WalletAccount::connected,
        ))
    }

    async fn connect(&self) -> AppResult<WalletAccount> {
        let accounts: Vec<Address> = self.rpc("eth_accounts", json!([])).await?;
        let Some(address) = accounts.first().copied() else {
            return Err(AppError::new(
                ErrorCode::WalletNotConnected,
                "node exposes no unlocked accounts",
            ));
        };
        *self.account.write().await = Some(address);
        info!(%address, "wallet connected");
        Ok(WalletAccount::connected(address))
    }

    async fn disconnect(&self) -> AppResult<()> {
        *self.account.write().await = None;
        info!("wallet disconnected");
        Ok(())
    }

    async fn write_contract(&self, request: &ContractRequest) -> AppResult<TxHash> {
        let Some(from) = *self.account.read().await else {
            return Err(AppError::wallet_not_connected());
        };
        let params = json!([{
            "from": from,
            "to": request.contract,
            "data": to_hex(&request.calldata),
        }]);
        let hash: B256 = self.rpc("eth_sendTransaction", params).await?;
        info!(function = request.function, tx = %hash, "transaction dispatched");
        Ok(hash)
    }

    async fn call_contract(&self, request: &ContractRequest) -> AppResult<Vec<u8>> {
        let params = json!([
            { "to": request.contract, "data": to_hex(&request.calldata) },
            "latest",
        ]);
        let raw: String = self.rpc("eth_call", params).await?;
        parse_hex_bytes(&raw)
    }

    async fn transaction_receipt(&self, hash: &TxHash) -> AppResult<Option<TransactionReceipt>> {
        let receipt: Option<RpcReceipt> = self
            .rpc("eth_getTransactionReceipt", json!([hash]))
            .await?;
        receipt.map(RpcReceipt::into_receipt).transpose()
    }
}

/// JSON-RPC envelope
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

/// JSON-RPC error object
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Receipt shape returned by `eth_getTransactionReceipt`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    transaction_hash: B256,
    block_number: Option<String>,
    status: Option<String>,
}

impl RpcReceipt {
    fn into_receipt(self) -> AppResult<TransactionReceipt> {
        let status = match self.status.as_deref() {
            Some("0x1") => ReceiptStatus::Success,
            Some("0x0") => ReceiptStatus::Reverted,
            other => {
                return Err(AppError::new(
                    ErrorCode::ReceiptMalformed,
                    format!("unexpected receipt status {other:?}"),
                ))
            }
        };
        let block_number = self
            .block_number
            .as_deref()
            .map(parse_hex_u64)
            .transpose()?;
        Ok(TransactionReceipt {
            transaction_hash: self.transaction_hash,
            block_number,
            status,
        })
    }
}

fn to_hex(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

fn parse_hex_bytes(raw: &str) -> AppResult<Vec<u8>> {
    let stripped = raw.strip_prefix("0x").unwrap_or(raw);
    hex::decode(stripped).map_err(|err| {
        AppError::new(ErrorCode::ReceiptMalformed, "return data is not valid hex").with_source(err)
    })
}

fn parse_hex_u64(raw: &str) -> AppResult<u64> {
    let stripped = raw.strip_prefix("0x").unwrap_or(raw);
    u64::from_str_radix(stripped, 16).map_err(|err| {
        AppError::new(
            ErrorCode::ReceiptMalformed,
            format!("'{raw}' is not a hex quantity"),
        )
        .with_source(err)
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn hex_quantities_parse_with_and_without_prefix() {
        assert_eq!(parse_hex_u64("0x1").unwrap(), 1);
        assert_eq!(parse_hex_u64("aa36a7").unwrap(), 11_155_111);
        assert!(parse_hex_u64("0xzz").is_err());
    }

    #[test]
    fn receipt_status_maps_to_outcome() {
        let receipt = RpcReceipt {
            transaction_hash: B256::repeat_byte(1),
            block_number: Some("0x10".into()),
            status: Some("0x0".into()),
        };
        let decoded = receipt.into_receipt().unwrap();
        assert_eq!(decoded.status, ReceiptStatus::Reverted);
        assert_eq!(decoded.block_number, Some(16));
    }

    #[test]
    fn unknown_receipt_status_is_rejected() {
        let receipt = RpcReceipt {
            transaction_hash: B256::repeat_byte(1),
            block_number: None,
            status: Some("0x2".into()),
        };
        assert_eq!(
            receipt.into_receipt().unwrap_err().code,
            ErrorCode::ReceiptMalformed
        );
    }

    #[test]
    fn calldata_serializes_with_prefix() {
        assert_eq!(to_hex(&[0xde, 0xad]), "0xdead");
        assert_eq!(parse_hex_bytes("0xdead").unwrap(), vec![0xde, 0xad]);
    }
}
