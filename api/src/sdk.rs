use alloy_primitives::{Address, U256};

use crate::{
    abi::IMetaNodeStake,
    instruction::{Call, StakeInstruction},
};

/// Read the amount `account` has staked in the pool.
pub fn staking_balance(pool_id: u64, account: Address) -> Call {
    Call::new(
        StakeInstruction::StakingBalance,
        IMetaNodeStake::stakingBalanceCall {
            pid: U256::from(pool_id),
            user: account,
        },
    )
}

/// Read the reward `account` can claim right now.
pub fn pending_reward(pool_id: u64, account: Address) -> Call {
    Call::new(
        StakeInstruction::PendingReward,
        IMetaNodeStake::pendingMetaNodeCall {
            pid: U256::from(pool_id),
            user: account,
        },
    )
}

/// Read the pool configuration tuple.
pub fn pool(pool_id: u64) -> Call {
    Call::new(
        StakeInstruction::Pool,
        IMetaNodeStake::poolCall {
            pid: U256::from(pool_id),
        },
    )
}

/// Read `(requested, available)` for the account's outstanding unstake requests.
pub fn withdraw_request_info(pool_id: u64, account: Address) -> Call {
    Call::new(
        StakeInstruction::WithdrawRequestInfo,
        IMetaNodeStake::withdrawAmountCall {
            pid: U256::from(pool_id),
            user: account,
        },
    )
}

/// Stake `amount` of the native asset. The amount travels as call value, not as an argument.
pub fn deposit_stake(amount: u128) -> Call {
    Call::new(StakeInstruction::DepositStake, IMetaNodeStake::depositETHCall {}).with_value(amount)
}

/// Claim all pending reward.
pub fn claim_reward(pool_id: u64) -> Call {
    Call::new(
        StakeInstruction::ClaimReward,
        IMetaNodeStake::claimCall {
            pid: U256::from(pool_id),
        },
    )
}

/// Request to unstake `amount`. Funds unlock after the cooldown.
pub fn request_unstake(pool_id: u64, amount: u128) -> Call {
    Call::new(
        StakeInstruction::RequestUnstake,
        IMetaNodeStake::unstakeCall {
            pid: U256::from(pool_id),
            amount: U256::from(amount),
        },
    )
}

/// Withdraw whatever part of earlier unstake requests has cleared the cooldown.
pub fn withdraw(pool_id: u64) -> Call {
    Call::new(
        StakeInstruction::Withdraw,
        IMetaNodeStake::withdrawCall {
            pid: U256::from(pool_id),
        },
    )
}
