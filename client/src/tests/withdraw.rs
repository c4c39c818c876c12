use metanode_api::{prelude::*, sdk};
use pretty_assertions::assert_eq;
use test_case::test_case;

use super::setup::{context, MockChain, RecordingNotifier, ALICE};
use crate::{
    error::ActionError,
    lifecycle::TxState,
    notify::{Level, Notification},
    pages::WithdrawPage,
    session::WalletSession,
};

#[test_case(3, 3, "0.0000", "3.0000", true ; "fully released")]
#[test_case(3, 1, "2.0000", "1.0000", true ; "partly released")]
#[test_case(3, 0, "3.0000", "0.0000", false ; "still cooling down")]
#[test_case(0, 0, "0.0000", "0.0000", false ; "no request")]
#[tokio::test]
async fn splits_requests_into_pending_and_available(
    requested: u128,
    available: u128,
    pending: &str,
    ready: &str,
    can_withdraw: bool,
) {
    let chain = MockChain::with_position(
        5 * ONE_TOKEN,
        0,
        requested * ONE_TOKEN,
        available * ONE_TOKEN,
    );
    let notifier = RecordingNotifier::default();
    let session = WalletSession::connected(ALICE);
    let page = WithdrawPage::new(context(&chain, &notifier, &session));
    page.refresh().await;

    let view = page.view();
    assert_eq!(view.pending_withdraw, pending);
    assert_eq!(view.available_to_withdraw, ready);
    assert!(view.request_consistent);
    assert_eq!(view.cooldown_minutes, COOLDOWN_MINUTES);
    assert_eq!(view.withdraw_button.enabled, can_withdraw);
}

#[tokio::test]
async fn inconsistent_request_clamps_pending_to_zero() {
    let chain = MockChain::with_position(0, 0, ONE_TOKEN, 2 * ONE_TOKEN);
    let notifier = RecordingNotifier::default();
    let session = WalletSession::connected(ALICE);
    let page = WithdrawPage::new(context(&chain, &notifier, &session));
    page.refresh().await;

    let view = page.view();
    assert_eq!(view.pending_withdraw, "0.0000");
    assert_eq!(view.available_to_withdraw, "2.0000");
    assert!(!view.request_consistent);
}

#[tokio::test]
async fn unstake_sends_the_amount_and_clears_the_input() {
    let chain = MockChain::with_position(5 * ONE_TOKEN, 0, 0, 0);
    let notifier = RecordingNotifier::default();
    let session = WalletSession::connected(ALICE);
    let page = WithdrawPage::new(context(&chain, &notifier, &session));
    page.refresh().await;
    page.amount().set("2.25");
    assert!(page.view().unstake_button.enabled);

    assert!(page.unstake().await.unwrap().is_confirmed());
    assert_eq!(
        chain.sent(),
        vec![sdk::request_unstake(
            DEFAULT_POOL_ID,
            2_250_000_000_000_000_000
        )]
    );
    assert!(page.amount().raw().is_empty());
    assert_eq!(notifier.all(), vec![Notification::success("Unstake successful!")]);
}

#[tokio::test]
async fn unstake_above_staked_is_refused_without_a_call() {
    let chain = MockChain::with_position(ONE_TOKEN, 0, 0, 0);
    let notifier = RecordingNotifier::default();
    let session = WalletSession::connected(ALICE);
    let page = WithdrawPage::new(context(&chain, &notifier, &session));
    page.refresh().await;
    page.amount().set("1.5");

    assert_eq!(page.unstake().await, Err(ActionError::InsufficientStaked));
    assert!(chain.untouched());
    assert_eq!(page.amount().raw(), "1.5");
    assert_eq!(
        notifier.all(),
        vec![Notification::failure(
            "Amount cannot be greater than staked amount"
        )]
    );
}

#[tokio::test]
async fn withdraw_needs_released_funds() {
    let chain = MockChain::with_position(0, 0, ONE_TOKEN, 0);
    let notifier = RecordingNotifier::default();
    let session = WalletSession::connected(ALICE);
    let page = WithdrawPage::new(context(&chain, &notifier, &session));
    page.refresh().await;

    assert_eq!(page.withdraw().await, Err(ActionError::NothingToWithdraw));
    assert!(chain.untouched());
}

#[tokio::test]
async fn withdraw_rejected_by_the_wallet_fails_once() {
    let chain = MockChain::with_position(0, 0, ONE_TOKEN, ONE_TOKEN);
    chain.script_write_error("user rejected the request");
    let notifier = RecordingNotifier::default();
    let session = WalletSession::connected(ALICE);
    let page = WithdrawPage::new(context(&chain, &notifier, &session));
    page.refresh().await;

    assert!(!page.withdraw().await.unwrap().is_confirmed());
    assert_eq!(page.withdraw_controller().state(), TxState::Failed);
    assert_eq!(chain.receipt_waits(), 0);
    assert_eq!(notifier.count(Level::Failure), 1);
}

#[tokio::test]
async fn disconnected_wallet_is_refused() {
    let chain = MockChain::with_position(ONE_TOKEN, 0, ONE_TOKEN, ONE_TOKEN);
    let notifier = RecordingNotifier::default();
    let session = WalletSession::disconnected();
    let page = WithdrawPage::new(context(&chain, &notifier, &session));
    page.refresh().await;
    page.amount().set("1");

    let view = page.view();
    assert!(!view.unstake_button.enabled);
    assert!(!view.withdraw_button.enabled);
    assert_eq!(page.unstake().await, Err(ActionError::WalletNotConnected));
    assert_eq!(page.withdraw().await, Err(ActionError::WalletNotConnected));
    assert!(chain.untouched());
}

#[tokio::test]
async fn unstake_and_withdraw_run_side_by_side() {
    let chain = MockChain::with_position(5 * ONE_TOKEN, 0, ONE_TOKEN, ONE_TOKEN);
    let notifier = RecordingNotifier::default();
    let session = WalletSession::connected(ALICE);
    let page = WithdrawPage::new(context(&chain, &notifier, &session));
    page.refresh().await;
    page.amount().set("1");

    let (unstaked, withdrawn) = tokio::join!(page.unstake(), page.withdraw());

    assert!(unstaked.unwrap().is_confirmed());
    assert!(withdrawn.unwrap().is_confirmed());
    assert_eq!(page.unstake_controller().state(), TxState::Confirmed);
    assert_eq!(page.withdraw_controller().state(), TxState::Confirmed);
    assert_eq!(notifier.count(Level::Success), 2);
    assert_eq!(chain.sent().len(), 2);
}
