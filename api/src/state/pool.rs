use serde::{Deserialize, Serialize};

use alloy_sol_types::SolCall;

use crate::{
    abi::{narrow, IMetaNodeStake},
    error::DecodeError,
};

/// Read-only projection of the pool configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// The total amount of the native asset staked in the pool, in base units.
    pub total_staked: u128,
}

impl PoolSnapshot {
    /// Decodes the `pool(uint256)` return tuple.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let pool = IMetaNodeStake::poolCall::abi_decode_returns(data, true)?;
        Ok(Self {
            total_staked: narrow(pool.stTokenAmount, "stTokenAmount")?,
        })
    }
}
