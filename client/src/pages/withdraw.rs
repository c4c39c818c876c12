use metanode_api::{prelude::*, sdk};
use serde::Serialize;

use super::{display_or_zero, refresh_position, refuse, AmountInput, ButtonView, Context};
use crate::{
    chain::ChainClient,
    error::ActionError,
    lifecycle::{ActionKind, TxController, TxOutcome},
    notify::Notifier,
    poll::Polled,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WithdrawView {
    pub connected: bool,
    pub staked_amount: String,
    pub available_to_withdraw: String,
    pub pending_withdraw: String,
    /// False when the contract reported more released than requested.
    pub request_consistent: bool,
    pub cooldown_minutes: u64,
    pub amount: String,
    pub unstake_button: ButtonView,
    pub withdraw_button: ButtonView,
}

/// Unstake requests and withdrawals. The two actions run on independent
/// controllers and may be in flight at the same time.
pub struct WithdrawPage<'a, C, N: ?Sized> {
    ctx: Context<'a, C, N>,
    amount: AmountInput,
    position: Polled<AccountPosition>,
    unstake: TxController,
    withdraw: TxController,
}

impl<'a, C, N> WithdrawPage<'a, C, N>
where
    C: ChainClient,
    N: Notifier + ?Sized,
{
    pub fn new(ctx: Context<'a, C, N>) -> Self {
        Self {
            ctx,
            amount: AmountInput::default(),
            position: Polled::new("position"),
            unstake: TxController::new(ActionKind::Unstake),
            withdraw: TxController::new(ActionKind::Withdraw),
        }
    }

    pub fn amount(&self) -> &AmountInput {
        &self.amount
    }

    pub fn unstake_controller(&self) -> &TxController {
        &self.unstake
    }

    pub fn withdraw_controller(&self) -> &TxController {
        &self.withdraw
    }

    pub fn position(&self) -> &Polled<AccountPosition> {
        &self.position
    }

    pub async fn refresh(&self) {
        refresh_position(self.ctx, &self.position).await;
    }

    /// Requests an unstake of the typed amount. The input is cleared once it confirms.
    pub async fn unstake(&self) -> Result<TxOutcome, ActionError> {
        self.try_unstake()
            .await
            .map_err(|e| refuse(self.ctx.notifier, ActionKind::Unstake, e))
    }

    /// Withdraws everything that has cleared the cooldown.
    pub async fn withdraw(&self) -> Result<TxOutcome, ActionError> {
        self.try_withdraw()
            .await
            .map_err(|e| refuse(self.ctx.notifier, ActionKind::Withdraw, e))
    }

    pub fn can_withdraw(&self) -> bool {
        self.ctx.session.is_connected()
            && self
                .position
                .latest()
                .is_some_and(|p| p.withdraw_request.can_withdraw())
    }

    pub fn view(&self) -> WithdrawView {
        let position = self.position.latest();
        let request = position.map(|p| p.withdraw_request);
        WithdrawView {
            connected: self.ctx.session.is_connected(),
            staked_amount: display_or_zero(position.map(|p| p.staked_balance)),
            available_to_withdraw: display_or_zero(request.map(|r| r.pending_available)),
            pending_withdraw: display_or_zero(request.map(|r| r.pending_withdraw())),
            request_consistent: request.map_or(true, |r| r.is_consistent()),
            cooldown_minutes: COOLDOWN_MINUTES,
            amount: self.amount.raw(),
            unstake_button: ButtonView::new(
                &self.unstake,
                self.ctx.session.is_connected() && self.amount.is_valid(),
            ),
            withdraw_button: ButtonView::new(&self.withdraw, self.can_withdraw()),
        }
    }

    async fn try_unstake(&self) -> Result<TxOutcome, ActionError> {
        self.ctx.session.require()?;
        let amount = self.amount.parse()?;
        let staked = self
            .position
            .latest()
            .map(|p| p.staked_balance)
            .unwrap_or_default();
        if !self.amount.fits(staked) {
            return Err(ActionError::InsufficientStaked);
        }

        let outcome = self
            .unstake
            .execute(
                self.ctx.chain,
                sdk::request_unstake(self.ctx.pool_id, amount),
                self.ctx.notifier,
            )
            .await?;
        if outcome.is_confirmed() {
            self.amount.clear();
        }
        Ok(outcome)
    }

    async fn try_withdraw(&self) -> Result<TxOutcome, ActionError> {
        self.ctx.session.require()?;
        if !self.can_withdraw() {
            return Err(ActionError::NothingToWithdraw);
        }
        self.withdraw
            .execute(self.ctx.chain, sdk::withdraw(self.ctx.pool_id), self.ctx.notifier)
            .await
    }
}
