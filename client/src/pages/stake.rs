use metanode_api::{prelude::*, sdk};
use serde::Serialize;

use super::{can_claim, claim_rewards, display_or_zero, refresh_position, refuse, AmountInput, ButtonView, Context};
use crate::{
    chain::ChainClient,
    error::ActionError,
    lifecycle::{ActionKind, TxController, TxOutcome},
    notify::Notifier,
    poll::Polled,
    query::get_pool,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StakeView {
    pub connected: bool,
    pub total_staked: String,
    pub staked_amount: String,
    pub pending_reward: String,
    pub wallet_balance: String,
    pub amount: String,
    pub stake_button: ButtonView,
    pub claim_button: ButtonView,
}

/// The landing page: stake the native asset and claim rewards in one place.
pub struct StakePage<'a, C, N: ?Sized> {
    ctx: Context<'a, C, N>,
    amount: AmountInput,
    pool: Polled<PoolSnapshot>,
    position: Polled<AccountPosition>,
    wallet_balance: Polled<u128>,
    stake: TxController,
    claim: TxController,
}

impl<'a, C, N> StakePage<'a, C, N>
where
    C: ChainClient,
    N: Notifier + ?Sized,
{
    pub fn new(ctx: Context<'a, C, N>) -> Self {
        Self {
            ctx,
            amount: AmountInput::default(),
            pool: Polled::new("pool"),
            position: Polled::new("position"),
            wallet_balance: Polled::new("wallet balance"),
            stake: TxController::new(ActionKind::Stake),
            claim: TxController::new(ActionKind::Claim),
        }
    }

    pub fn amount(&self) -> &AmountInput {
        &self.amount
    }

    pub fn stake_controller(&self) -> &TxController {
        &self.stake
    }

    pub fn claim_controller(&self) -> &TxController {
        &self.claim
    }

    pub fn pool(&self) -> &Polled<PoolSnapshot> {
        &self.pool
    }

    pub fn position(&self) -> &Polled<AccountPosition> {
        &self.position
    }

    pub fn wallet_balance(&self) -> &Polled<u128> {
        &self.wallet_balance
    }

    /// One poll tick. Pool totals are read regardless of the wallet.
    pub async fn refresh(&self) {
        self.pool
            .apply(get_pool(self.ctx.chain, self.ctx.pool_id).await);
        refresh_position(self.ctx, &self.position).await;
        match self.ctx.session.account() {
            Some(account) => {
                self.wallet_balance
                    .apply(self.ctx.chain.native_balance(account).await);
            }
            None => self.wallet_balance.clear(),
        }
    }

    /// Stakes the typed amount. The input is cleared once the deposit confirms.
    pub async fn stake(&self) -> Result<TxOutcome, ActionError> {
        self.try_stake()
            .await
            .map_err(|e| refuse(self.ctx.notifier, ActionKind::Stake, e))
    }

    pub async fn claim(&self) -> Result<TxOutcome, ActionError> {
        claim_rewards(self.ctx, &self.claim, &self.position)
            .await
            .map_err(|e| refuse(self.ctx.notifier, ActionKind::Claim, e))
    }

    pub fn view(&self) -> StakeView {
        let position = self.position.latest();
        StakeView {
            connected: self.ctx.session.is_connected(),
            total_staked: display_or_zero(self.pool.latest().map(|p| p.total_staked)),
            staked_amount: display_or_zero(position.map(|p| p.staked_balance)),
            pending_reward: display_or_zero(position.map(|p| p.pending_reward)),
            wallet_balance: display_or_zero(self.wallet_balance.latest()),
            amount: self.amount.raw(),
            stake_button: ButtonView::new(
                &self.stake,
                self.ctx.session.is_connected() && self.amount.is_valid(),
            ),
            claim_button: ButtonView::new(
                &self.claim,
                can_claim(self.ctx.session, &self.position),
            ),
        }
    }

    async fn try_stake(&self) -> Result<TxOutcome, ActionError> {
        self.ctx.session.require()?;
        let amount = self.amount.parse()?;
        let available = self.wallet_balance.latest().unwrap_or_default();
        if !self.amount.fits(available) {
            return Err(ActionError::InsufficientBalance);
        }

        let outcome = self
            .stake
            .execute(self.ctx.chain, sdk::deposit_stake(amount), self.ctx.notifier)
            .await?;
        if outcome.is_confirmed() {
            self.amount.clear();
        }
        Ok(outcome)
    }
}
