use metanode_api::prelude::*;
use serde::Serialize;

use super::{can_claim, claim_rewards, display_or_zero, refresh_position, refuse, ButtonView, Context};
use crate::{
    chain::ChainClient,
    error::ActionError,
    lifecycle::{ActionKind, TxController, TxOutcome},
    notify::Notifier,
    poll::Polled,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClaimView {
    pub connected: bool,
    pub pending_reward: String,
    pub staked_amount: String,
    pub can_claim: bool,
    pub claim_button: ButtonView,
}

/// Reward overview with a single claim action.
pub struct ClaimPage<'a, C, N: ?Sized> {
    ctx: Context<'a, C, N>,
    position: Polled<AccountPosition>,
    claim: TxController,
}

impl<'a, C, N> ClaimPage<'a, C, N>
where
    C: ChainClient,
    N: Notifier + ?Sized,
{
    pub fn new(ctx: Context<'a, C, N>) -> Self {
        Self {
            ctx,
            position: Polled::new("position"),
            claim: TxController::new(ActionKind::Claim),
        }
    }

    pub fn claim_controller(&self) -> &TxController {
        &self.claim
    }

    pub fn position(&self) -> &Polled<AccountPosition> {
        &self.position
    }

    pub async fn refresh(&self) {
        refresh_position(self.ctx, &self.position).await;
    }

    /// Claims all pending reward. Refused without a call while nothing is pending.
    pub async fn claim(&self) -> Result<TxOutcome, ActionError> {
        claim_rewards(self.ctx, &self.claim, &self.position)
            .await
            .map_err(|e| refuse(self.ctx.notifier, ActionKind::Claim, e))
    }

    pub fn view(&self) -> ClaimView {
        let position = self.position.latest();
        let can_claim = can_claim(self.ctx.session, &self.position);
        ClaimView {
            connected: self.ctx.session.is_connected(),
            pending_reward: display_or_zero(position.map(|p| p.pending_reward)),
            staked_amount: display_or_zero(position.map(|p| p.staked_balance)),
            can_claim,
            claim_button: ButtonView::new(&self.claim, can_claim),
        }
    }
}
