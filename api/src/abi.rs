//! The staking contract's ABI and decoders for its read results.

use alloy_primitives::U256;
use alloy_sol_types::{sol, SolCall};

use crate::error::DecodeError;

sol! {
    /// The functions of the MetaNode staking contract this client calls.
    interface IMetaNodeStake {
        function stakingBalance(uint256 pid, address user) external view returns (uint256);
        function pendingMetaNode(uint256 pid, address user) external view returns (uint256);
        function pool(uint256 pid) external view returns (
            address stTokenAddress,
            uint256 poolWeight,
            uint256 lastRewardBlock,
            uint256 accMetaNodePerST,
            uint256 stTokenAmount,
            uint256 minDepositAmount,
            uint256 unstakeLockedBlocks
        );
        function withdrawAmount(uint256 pid, address user) external view returns (
            uint256 requestAmount,
            uint256 pendingWithdrawAmount
        );

        function depositETH() external payable;
        function claim(uint256 pid) external;
        function unstake(uint256 pid, uint256 amount) external;
        function withdraw(uint256 pid) external;
    }
}

/// Narrows a `uint256` amount to base units. Amounts wider than 128 bits are
/// rejected rather than truncated.
pub fn narrow(value: U256, field: &'static str) -> Result<u128, DecodeError> {
    u128::try_from(value).map_err(|_| DecodeError::Overflow(field))
}

pub fn decode_staking_balance(data: &[u8]) -> Result<u128, DecodeError> {
    let balance = IMetaNodeStake::stakingBalanceCall::abi_decode_returns(data, true)?;
    narrow(balance._0, "stakingBalance")
}

pub fn decode_pending_reward(data: &[u8]) -> Result<u128, DecodeError> {
    let reward = IMetaNodeStake::pendingMetaNodeCall::abi_decode_returns(data, true)?;
    narrow(reward._0, "pendingMetaNode")
}
