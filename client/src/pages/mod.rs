//! The three views of the staking client: Stake, Claim and Withdraw.
//!
//! A page owns its polled reads, its amount input and one controller per
//! action it offers. Pages check an action's preconditions against the last
//! polled figures and only then hand the call to the controller.

mod claim;
mod stake;
mod withdraw;

pub use claim::*;
pub use stake::*;
pub use withdraw::*;

use std::cell::RefCell;

use metanode_api::{prelude::*, sdk};
use serde::Serialize;
use tracing::debug;

use crate::{
    chain::ChainClient,
    error::ActionError,
    lifecycle::{ActionKind, TxController, TxOutcome},
    notify::{Notification, Notifier},
    poll::Polled,
    query::get_position,
    session::WalletSession,
};

/// What every page needs from its surroundings.
pub struct Context<'a, C, N: ?Sized> {
    pub chain: &'a C,
    pub notifier: &'a N,
    pub session: &'a WalletSession,
    pub pool_id: u64,
}

impl<'a, C, N: ?Sized> Context<'a, C, N> {
    pub fn new(chain: &'a C, notifier: &'a N, session: &'a WalletSession, pool_id: u64) -> Self {
        Self {
            chain,
            notifier,
            session,
            pool_id,
        }
    }
}

impl<C, N: ?Sized> Clone for Context<'_, C, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, N: ?Sized> Copy for Context<'_, C, N> {}

/// The text of an amount field.
///
/// Edits that could not lead to a valid amount are dropped, so the field only
/// ever holds digits and at most one decimal point.
#[derive(Debug, Default)]
pub struct AmountInput {
    raw: RefCell<String>,
}

impl AmountInput {
    /// Replaces the text. Returns false, leaving the text unchanged, if `raw`
    /// is not amount shaped.
    pub fn set(&self, raw: &str) -> bool {
        if !is_amount_shape(raw) {
            return false;
        }
        *self.raw.borrow_mut() = raw.to_string();
        true
    }

    pub fn raw(&self) -> String {
        self.raw.borrow().clone()
    }

    /// Whether the text is a positive amount, which enables the action button.
    pub fn is_valid(&self) -> bool {
        is_positive_amount(&self.raw.borrow())
    }

    pub fn fits(&self, available: u128) -> bool {
        is_within_balance(&self.raw.borrow(), available)
    }

    pub fn clear(&self) {
        self.raw.borrow_mut().clear();
    }

    /// The amount in base units. Zero is rejected.
    pub fn parse(&self) -> Result<u128, AmountError> {
        parse_positive(&self.raw.borrow())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ButtonView {
    pub label: String,
    pub enabled: bool,
    pub busy: bool,
}

impl ButtonView {
    fn new(controller: &TxController, ready: bool) -> Self {
        let busy = controller.is_busy();
        Self {
            label: controller.button_label(),
            enabled: ready && !busy,
            busy,
        }
    }
}

fn display_or_zero(value: Option<u128>) -> String {
    display_amount(value.unwrap_or_default())
}

/// Tells the user why an action did not start and hands the error back.
fn refuse<N: Notifier + ?Sized>(notifier: &N, kind: ActionKind, error: ActionError) -> ActionError {
    debug!(%kind, %error, "action refused");
    notifier.notify(Notification::failure(error.to_string()));
    error
}

/// Refreshes the account position, or forgets it while no wallet is connected.
async fn refresh_position<C, N>(ctx: Context<'_, C, N>, position: &Polled<AccountPosition>)
where
    C: ChainClient,
    N: Notifier + ?Sized,
{
    match ctx.session.account() {
        Some(account) => {
            position.apply(get_position(ctx.chain, ctx.pool_id, account).await);
        }
        None => position.clear(),
    }
}

/// Claim shared by the Stake and Claim pages.
async fn claim_rewards<C, N>(
    ctx: Context<'_, C, N>,
    controller: &TxController,
    position: &Polled<AccountPosition>,
) -> Result<TxOutcome, ActionError>
where
    C: ChainClient,
    N: Notifier + ?Sized,
{
    ctx.session.require()?;
    if !position.latest().is_some_and(|p| p.can_claim()) {
        return Err(ActionError::NothingToClaim);
    }
    controller
        .execute(ctx.chain, sdk::claim_reward(ctx.pool_id), ctx.notifier)
        .await
}

fn can_claim(session: &WalletSession, position: &Polled<AccountPosition>) -> bool {
    session.is_connected() && position.latest().is_some_and(|p| p.can_claim())
}
