//! [`ChainClient`] over Ethereum JSON-RPC.
//!
//! Signing is left to the endpoint: writes go out as `eth_sendTransaction`
//! from the connected account, the way a browser wallet provider handles them.

use std::{
    future::Future,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use alloy_primitives::U64;
use metanode_api::{abi::narrow, prelude::*};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::{
    chain::{ChainClient, ChainError, ReceiptStatus},
    config::ClientConfig,
};

pub struct RpcChain {
    http: reqwest::Client,
    url: String,
    contract: Address,
    signer: Option<Address>,
    receipt_poll_interval: Duration,
    confirm_timeout: Duration,
    next_id: AtomicU64,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Value,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

impl RpcResponse {
    /// An error object wins over any result.
    fn into_result<T: DeserializeOwned>(self, method: &str) -> Result<T, ChainError> {
        if let Some(error) = self.error {
            return Err(ChainError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        serde_json::from_value(self.result)
            .map_err(|e| ChainError::Malformed(format!("{method}: {e}")))
    }
}

#[derive(Debug, Deserialize)]
struct Receipt {
    status: Option<U64>,
}

impl Receipt {
    fn status(&self) -> Result<ReceiptStatus, ChainError> {
        let status = self
            .status
            .ok_or_else(|| ChainError::Malformed("receipt carries no status".to_string()))?;
        match status.to::<u64>() {
            1 => Ok(ReceiptStatus::Success),
            0 => Ok(ReceiptStatus::Reverted),
            other => Err(ChainError::Malformed(format!("unknown receipt status {other}"))),
        }
    }
}

impl RpcChain {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: config.rpc_url.clone(),
            contract: config.contract,
            signer: config.account,
            receipt_poll_interval: config.receipt_poll_interval,
            confirm_timeout: config.confirm_timeout,
            next_id: AtomicU64::new(1),
        }
    }

    async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(method, id, "rpc request");
        let response: RpcResponse = self
            .http
            .post(&self.url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": method,
                "params": params,
            }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        response.into_result(method)
    }

    /// The transaction object shared by `eth_call` and `eth_sendTransaction`.
    fn call_object(&self, call: &Call) -> Value {
        let mut object = json!({
            "to": self.contract,
            "data": call.data,
        });
        if call.value > 0 {
            object["value"] = json!(U256::from(call.value));
        }
        object
    }
}

impl ChainClient for RpcChain {
    async fn read_contract(&self, call: &Call) -> Result<Bytes, ChainError> {
        debug!(function = call.instruction.signature(), "eth_call");
        self.request("eth_call", json!([self.call_object(call), "latest"]))
            .await
    }

    async fn write_contract(&self, call: &Call) -> Result<TxHash, ChainError> {
        let signer = self.signer.ok_or(ChainError::NoSigner)?;
        let mut transaction = self.call_object(call);
        transaction["from"] = json!(signer);
        self.request("eth_sendTransaction", json!([transaction]))
            .await
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<ReceiptStatus, ChainError> {
        poll_receipt(hash, self.receipt_poll_interval, self.confirm_timeout, move || {
            self.request("eth_getTransactionReceipt", json!([hash]))
        })
        .await
    }

    async fn native_balance(&self, account: Address) -> Result<u128, ChainError> {
        let balance: U256 = self
            .request("eth_getBalance", json!([account, "latest"]))
            .await?;
        Ok(narrow(balance, "balance")?)
    }
}

/// Looks the receipt up every `poll_interval` until one exists or `timeout`
/// has passed. A node that does not know the hash yet answers `null`.
async fn poll_receipt<F, Fut>(
    hash: TxHash,
    poll_interval: Duration,
    timeout: Duration,
    mut fetch: F,
) -> Result<ReceiptStatus, ChainError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<Receipt>, ChainError>>,
{
    let started = Instant::now();
    loop {
        if let Some(receipt) = fetch().await? {
            return receipt.status();
        }
        let waited = started.elapsed();
        if waited >= timeout {
            return Err(ChainError::Timeout { hash, waited });
        }
        debug!(%hash, ?waited, "receipt not available yet");
        sleep(poll_interval).await;
    }
}
