use alloy_primitives::Bytes;
use alloy_sol_types::SolCall;
use serde::Serialize;

use crate::abi::IMetaNodeStake;

/// Functions of the staking contract this client calls.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum StakeInstruction {
    // Reads
    StakingBalance,
    PendingReward,
    Pool,
    WithdrawRequestInfo,

    // Writes
    DepositStake,
    ClaimReward,
    RequestUnstake,
    Withdraw,
}

impl StakeInstruction {
    /// Canonical ABI signature of the deployed function.
    pub fn signature(self) -> &'static str {
        use IMetaNodeStake::*;
        match self {
            StakeInstruction::StakingBalance => stakingBalanceCall::SIGNATURE,
            StakeInstruction::PendingReward => pendingMetaNodeCall::SIGNATURE,
            StakeInstruction::Pool => poolCall::SIGNATURE,
            StakeInstruction::WithdrawRequestInfo => withdrawAmountCall::SIGNATURE,
            StakeInstruction::DepositStake => depositETHCall::SIGNATURE,
            StakeInstruction::ClaimReward => claimCall::SIGNATURE,
            StakeInstruction::RequestUnstake => unstakeCall::SIGNATURE,
            StakeInstruction::Withdraw => withdrawCall::SIGNATURE,
        }
    }
}

/// A fully encoded call against the staking contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub instruction: StakeInstruction,
    /// Selector followed by the ABI encoded arguments.
    pub data: Bytes,
    /// Native value attached, in base units. Zero unless the function is payable.
    pub value: u128,
}

impl Call {
    pub fn new<C: SolCall>(instruction: StakeInstruction, call: C) -> Self {
        Self {
            instruction,
            data: call.abi_encode().into(),
            value: 0,
        }
    }

    pub fn with_value(mut self, value: u128) -> Self {
        self.value = value;
        self
    }
}
