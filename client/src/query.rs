use metanode_api::{
    abi::{decode_pending_reward, decode_staking_balance},
    prelude::*,
    sdk,
};
use tracing::warn;

use crate::chain::{ChainClient, ChainError};

pub async fn get_pool<C: ChainClient>(chain: &C, pool_id: u64) -> Result<PoolSnapshot, ChainError> {
    let data = chain.read_contract(&sdk::pool(pool_id)).await?;
    Ok(PoolSnapshot::decode(&data)?)
}

pub async fn get_staking_balance<C: ChainClient>(
    chain: &C,
    pool_id: u64,
    account: Address,
) -> Result<u128, ChainError> {
    let data = chain
        .read_contract(&sdk::staking_balance(pool_id, account))
        .await?;
    Ok(decode_staking_balance(&data)?)
}

pub async fn get_pending_reward<C: ChainClient>(
    chain: &C,
    pool_id: u64,
    account: Address,
) -> Result<u128, ChainError> {
    let data = chain
        .read_contract(&sdk::pending_reward(pool_id, account))
        .await?;
    Ok(decode_pending_reward(&data)?)
}

/// Reads the account's unstake requests. A request reporting more released
/// than requested is passed through, but logged as a data inconsistency.
pub async fn get_withdraw_request<C: ChainClient>(
    chain: &C,
    pool_id: u64,
    account: Address,
) -> Result<WithdrawRequest, ChainError> {
    let data = chain
        .read_contract(&sdk::withdraw_request_info(pool_id, account))
        .await?;
    let request = WithdrawRequest::decode(&data)?;
    if !request.is_consistent() {
        warn!(
            %account,
            requested = request.requested,
            available = request.pending_available,
            "withdraw request reports more available than requested"
        );
    }
    Ok(request)
}

/// Reads everything the views show about one account, concurrently.
pub async fn get_position<C: ChainClient>(
    chain: &C,
    pool_id: u64,
    account: Address,
) -> Result<AccountPosition, ChainError> {
    let (staked_balance, pending_reward, withdraw_request) = tokio::try_join!(
        get_staking_balance(chain, pool_id, account),
        get_pending_reward(chain, pool_id, account),
        get_withdraw_request(chain, pool_id, account),
    )?;
    Ok(AccountPosition {
        staked_balance,
        pending_reward,
        withdraw_request,
    })
}
