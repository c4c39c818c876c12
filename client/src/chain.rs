use std::time::Duration;

use metanode_api::prelude::*;
use thiserror::Error;

/// Failure talking to the chain.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("malformed rpc response: {0}")]
    Malformed(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("no account is connected to sign with")]
    NoSigner,

    #[error("no receipt for {hash} after {waited:?}")]
    Timeout { hash: TxHash, waited: Duration },
}

/// How a mined transaction ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReceiptStatus {
    Success,
    Reverted,
}

/// The read/write surface of the chain the staking contract lives on.
///
/// Everything that touches the chain takes one of these as a parameter, so
/// views and controllers run unchanged against a live node or a test double.
#[allow(async_fn_in_trait)]
pub trait ChainClient {
    /// Executes a read-only call and returns the raw ABI encoded return data.
    async fn read_contract(&self, call: &Call) -> Result<Bytes, ChainError>;

    /// Submits a state-changing call and returns its hash once the node accepted it.
    async fn write_contract(&self, call: &Call) -> Result<TxHash, ChainError>;

    /// Resolves once the transaction is mined.
    async fn wait_for_receipt(&self, hash: TxHash) -> Result<ReceiptStatus, ChainError>;

    /// The native balance of `account`, in base units.
    async fn native_balance(&self, account: Address) -> Result<u128, ChainError>;
}
