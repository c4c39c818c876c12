use serde::{Deserialize, Serialize};

use alloy_sol_types::SolCall;

use crate::{
    abi::{narrow, IMetaNodeStake},
    error::DecodeError,
};

/// Outstanding unstake requests of one account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawRequest {
    /// The total amount requested for unstake and not yet withdrawn.
    pub requested: u128,

    /// The part of `requested` that has cleared the cooldown and can be withdrawn now.
    pub pending_available: u128,
}

impl WithdrawRequest {
    /// Decodes the `withdrawAmount(uint256,address)` pair.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let amounts = IMetaNodeStake::withdrawAmountCall::abi_decode_returns(data, true)?;
        Ok(Self {
            requested: narrow(amounts.requestAmount, "requestAmount")?,
            pending_available: narrow(amounts.pendingWithdrawAmount, "pendingWithdrawAmount")?,
        })
    }

    /// Released funds can never exceed what was requested.
    pub fn is_consistent(&self) -> bool {
        self.pending_available <= self.requested
    }

    /// The amount still waiting out the cooldown, clamped at zero.
    pub fn pending_withdraw(&self) -> u128 {
        self.requested.saturating_sub(self.pending_available)
    }

    pub fn can_withdraw(&self) -> bool {
        self.pending_available > 0
    }
}

/// Read-only projection of one account's position in the pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountPosition {
    /// The amount currently staked, in base units.
    pub staked_balance: u128,

    /// The reward claimable right now, in base units.
    pub pending_reward: u128,

    /// Unstake requests waiting for or past their cooldown.
    pub withdraw_request: WithdrawRequest,
}

impl AccountPosition {
    pub fn can_claim(&self) -> bool {
        self.pending_reward > 0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use alloy_primitives::U256;

    use crate::consts::ONE_TOKEN;

    #[test]
    fn fully_released_request_has_nothing_pending() {
        let three = U256::from(3 * ONE_TOKEN);
        let data = IMetaNodeStake::withdrawAmountCall::abi_encode_returns(&(three, three));
        let request = WithdrawRequest::decode(&data).unwrap();
        assert_eq!(request.pending_withdraw(), 0);
        assert!(request.can_withdraw());
        assert!(request.is_consistent());
    }

    #[test]
    fn clamps_inconsistent_request() {
        let request = WithdrawRequest {
            requested: ONE_TOKEN,
            pending_available: 2 * ONE_TOKEN,
        };
        assert!(!request.is_consistent());
        assert_eq!(request.pending_withdraw(), 0);
    }

    #[test]
    fn partially_released_request() {
        let request = WithdrawRequest {
            requested: 5 * ONE_TOKEN,
            pending_available: 2 * ONE_TOKEN,
        };
        assert_eq!(request.pending_withdraw(), 3 * ONE_TOKEN);
    }
}
