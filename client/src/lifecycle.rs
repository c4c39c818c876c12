//! Transaction lifecycle: the state machine every write goes through.
//!
//! `Idle -> Submitting -> AwaitingConfirmation -> Confirmed | Failed`
//!
//! One [`TxController`] exists per action kind and page. Its state is published
//! on a watch channel so views can follow it without polling.

use std::fmt;

use metanode_api::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::{
    chain::{ChainClient, ReceiptStatus},
    error::ActionError,
    notify::{Notification, Notifier},
};

/// Message shown for any failed submission or confirmation.
pub const FAILURE_MESSAGE: &str = "Transaction failed. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ActionKind {
    Stake,
    Claim,
    Unstake,
    Withdraw,
}

impl ActionKind {
    /// Label of the idle action button.
    pub fn button_label(self) -> String {
        match self {
            ActionKind::Stake => format!("Stake {NATIVE_SYMBOL}"),
            ActionKind::Claim => "Claim Rewards".to_string(),
            ActionKind::Unstake => format!("Unstake {NATIVE_SYMBOL}"),
            ActionKind::Withdraw => format!("Withdraw {NATIVE_SYMBOL}"),
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            ActionKind::Stake => "Stake successful!",
            ActionKind::Claim => "Claim successful!",
            ActionKind::Unstake => "Unstake successful!",
            ActionKind::Withdraw => "Withdraw successful!",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Stake => "stake",
            ActionKind::Claim => "claim",
            ActionKind::Unstake => "unstake",
            ActionKind::Withdraw => "withdraw",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum TxState {
    #[default]
    Idle,
    Submitting,
    AwaitingConfirmation,
    Confirmed,
    Failed,
}

impl TxState {
    /// An attempt is outstanding; the action button shows a spinner.
    pub fn is_busy(self) -> bool {
        matches!(self, TxState::Submitting | TxState::AwaitingConfirmation)
    }
}

/// The attempt a controller is tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PendingTransaction {
    pub kind: ActionKind,
    pub hash: Option<TxHash>,
    pub state: TxState,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TxFailure {
    /// The wallet declined, the node rejected the transaction, or it reverted in pre-flight.
    #[error("submission rejected: {0}")]
    SubmissionRejected(String),

    /// The transaction reverted on chain, or waiting for its receipt failed.
    #[error("confirmation failed: {0}")]
    ConfirmationFailed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TxOutcome {
    Confirmed(TxHash),
    Failed(TxFailure),
}

impl TxOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, TxOutcome::Confirmed(_))
    }
}

/// Drives one action kind through submission and confirmation.
///
/// A new attempt may start from `Idle`, `Confirmed` or `Failed`; while one is
/// busy further submissions are refused. Each attempt fires exactly one
/// notification when it ends. There is no retry.
pub struct TxController {
    tx: watch::Sender<PendingTransaction>,
}

impl TxController {
    pub fn new(kind: ActionKind) -> Self {
        let (tx, _) = watch::channel(PendingTransaction {
            kind,
            hash: None,
            state: TxState::Idle,
        });
        Self { tx }
    }

    pub fn kind(&self) -> ActionKind {
        self.tx.borrow().kind
    }

    pub fn state(&self) -> TxState {
        self.tx.borrow().state
    }

    pub fn snapshot(&self) -> PendingTransaction {
        self.tx.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state().is_busy()
    }

    pub fn subscribe(&self) -> watch::Receiver<PendingTransaction> {
        self.tx.subscribe()
    }

    /// Label of the action button in the current state.
    pub fn button_label(&self) -> String {
        match self.state() {
            TxState::Submitting => "Confirming...".to_string(),
            TxState::AwaitingConfirmation => "Processing...".to_string(),
            _ => self.kind().button_label(),
        }
    }

    /// Submits `call` and follows it to a terminal state.
    ///
    /// Chain failures end up in the returned outcome, never as an error. The
    /// only error is a refused start because an attempt is already busy.
    pub async fn execute<C, N>(
        &self,
        chain: &C,
        call: Call,
        notifier: &N,
    ) -> Result<TxOutcome, ActionError>
    where
        C: ChainClient,
        N: Notifier + ?Sized,
    {
        self.begin()?;
        let kind = self.kind();

        let outcome = match chain.write_contract(&call).await {
            Err(error) => TxOutcome::Failed(TxFailure::SubmissionRejected(error.to_string())),
            Ok(hash) => {
                info!(%kind, %hash, "transaction submitted");
                self.submitted(hash);
                match chain.wait_for_receipt(hash).await {
                    Ok(ReceiptStatus::Success) => TxOutcome::Confirmed(hash),
                    Ok(ReceiptStatus::Reverted) => TxOutcome::Failed(
                        TxFailure::ConfirmationFailed(format!("{hash} reverted")),
                    ),
                    Err(error) => {
                        TxOutcome::Failed(TxFailure::ConfirmationFailed(error.to_string()))
                    }
                }
            }
        };

        self.finish(&outcome, notifier);
        Ok(outcome)
    }

    fn begin(&self) -> Result<(), ActionError> {
        let started = self.tx.send_if_modified(|tx| {
            if tx.state.is_busy() {
                return false;
            }
            tx.state = TxState::Submitting;
            tx.hash = None;
            true
        });
        if started {
            Ok(())
        } else {
            Err(ActionError::AlreadyInFlight(self.kind()))
        }
    }

    fn submitted(&self, hash: TxHash) {
        self.tx.send_modify(|tx| {
            tx.state = TxState::AwaitingConfirmation;
            tx.hash = Some(hash);
        });
    }

    /// Enters the terminal state for `outcome` and fires its notification.
    /// Does nothing unless an attempt is busy.
    fn finish<N: Notifier + ?Sized>(&self, outcome: &TxOutcome, notifier: &N) {
        let terminal = match outcome {
            TxOutcome::Confirmed(_) => TxState::Confirmed,
            TxOutcome::Failed(_) => TxState::Failed,
        };
        let entered = self.tx.send_if_modified(|tx| {
            if !tx.state.is_busy() {
                return false;
            }
            tx.state = terminal;
            true
        });
        if !entered {
            return;
        }

        let kind = self.kind();
        match outcome {
            TxOutcome::Confirmed(hash) => {
                info!(%kind, %hash, "transaction confirmed");
                notifier.notify(Notification::success(kind.success_message()));
            }
            TxOutcome::Failed(failure) => {
                warn!(%kind, error = %failure, "transaction failed");
                notifier.notify(Notification::failure(FAILURE_MESSAGE));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use metanode_api::sdk;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        notify::Level,
        tests::setup::{MockChain, RecordingNotifier},
    };

    #[tokio::test]
    async fn walks_through_each_state_in_order() {
        let chain = MockChain::default().gated();
        let notifier = RecordingNotifier::default();
        let controller = TxController::new(ActionKind::Claim);
        let mut updates = controller.subscribe();
        assert_eq!(controller.state(), TxState::Idle);

        let drive = async {
            updates
                .wait_for(|tx| tx.state == TxState::Submitting)
                .await
                .unwrap();
            assert!(controller.is_busy());
            assert_eq!(controller.snapshot().hash, None);
            assert_eq!(controller.button_label(), "Confirming...");
            chain.release_write();

            updates
                .wait_for(|tx| tx.state == TxState::AwaitingConfirmation)
                .await
                .unwrap();
            assert!(controller.snapshot().hash.is_some());
            assert_eq!(controller.button_label(), "Processing...");
            assert!(notifier.all().is_empty());
            chain.release_receipt();
        };
        let (outcome, ()) = tokio::join!(
            controller.execute(&chain, sdk::claim_reward(0), &notifier),
            drive
        );

        let hash = controller.snapshot().hash.unwrap();
        assert_eq!(outcome, Ok(TxOutcome::Confirmed(hash)));
        assert_eq!(controller.state(), TxState::Confirmed);
        assert_eq!(
            notifier.all(),
            vec![Notification::success("Claim successful!")]
        );
    }

    #[tokio::test]
    async fn reverted_receipt_fails_once() {
        let chain = MockChain::default();
        chain.script_receipt(Ok(ReceiptStatus::Reverted));
        let notifier = RecordingNotifier::default();
        let controller = TxController::new(ActionKind::Withdraw);

        let outcome = controller
            .execute(&chain, sdk::withdraw(0), &notifier)
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            TxOutcome::Failed(TxFailure::ConfirmationFailed(_))
        ));
        assert_eq!(controller.state(), TxState::Failed);
        assert_eq!(notifier.all(), vec![Notification::failure(FAILURE_MESSAGE)]);
    }

    #[tokio::test]
    async fn rejected_submission_never_waits_for_a_receipt() {
        let chain = MockChain::default();
        chain.script_write_error("user rejected the request");
        let notifier = RecordingNotifier::default();
        let controller = TxController::new(ActionKind::Stake);

        let outcome = controller
            .execute(&chain, sdk::deposit_stake(ONE_TOKEN), &notifier)
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            TxOutcome::Failed(TxFailure::SubmissionRejected(_))
        ));
        assert_eq!(controller.snapshot().hash, None);
        assert_eq!(chain.receipt_waits(), 0);
        assert_eq!(notifier.count(Level::Failure), 1);
    }

    #[tokio::test]
    async fn restarts_from_either_terminal_state() {
        let chain = MockChain::default();
        chain.script_receipt(Err("connection reset".to_string()));
        let notifier = RecordingNotifier::default();
        let controller = TxController::new(ActionKind::Unstake);

        let first = controller
            .execute(&chain, sdk::request_unstake(0, ONE_TOKEN), &notifier)
            .await
            .unwrap();
        assert!(!first.is_confirmed());
        assert_eq!(controller.state(), TxState::Failed);

        let second = controller
            .execute(&chain, sdk::request_unstake(0, ONE_TOKEN), &notifier)
            .await
            .unwrap();
        assert!(second.is_confirmed());
        assert_eq!(controller.state(), TxState::Confirmed);

        let third = controller
            .execute(&chain, sdk::request_unstake(0, ONE_TOKEN), &notifier)
            .await
            .unwrap();
        assert!(third.is_confirmed());
        assert_eq!(chain.sent().len(), 3);
        assert_eq!(notifier.count(Level::Failure), 1);
        assert_eq!(notifier.count(Level::Success), 2);
    }

    #[tokio::test]
    async fn refuses_a_second_submission_while_busy() {
        let chain = MockChain::default().gated();
        let notifier = RecordingNotifier::default();
        let controller = TxController::new(ActionKind::Claim);
        let mut updates = controller.subscribe();

        let second = async {
            updates.wait_for(|tx| tx.state.is_busy()).await.unwrap();
            let refused = controller
                .execute(&chain, sdk::claim_reward(0), &notifier)
                .await;
            chain.release_write();
            chain.release_receipt();
            refused
        };
        let (first, refused) = tokio::join!(
            controller.execute(&chain, sdk::claim_reward(0), &notifier),
            second
        );

        assert_eq!(refused, Err(ActionError::AlreadyInFlight(ActionKind::Claim)));
        assert!(first.unwrap().is_confirmed());
        assert_eq!(chain.sent().len(), 1);
        assert_eq!(notifier.all().len(), 1);
    }

    #[tokio::test]
    async fn controllers_transition_independently() {
        let chain = MockChain::default().gated();
        let notifier = RecordingNotifier::default();
        let unstake = TxController::new(ActionKind::Unstake);
        let withdraw = TxController::new(ActionKind::Withdraw);
        let mut updates = unstake.subscribe();

        let observe = async {
            updates
                .wait_for(|tx| tx.state == TxState::Submitting)
                .await
                .unwrap();
            assert_eq!(withdraw.state(), TxState::Idle);
            assert!(!withdraw.is_busy());
            chain.release_write();
            chain.release_receipt();
        };
        let (outcome, ()) = tokio::join!(
            unstake.execute(&chain, sdk::request_unstake(0, 1), &notifier),
            observe
        );

        assert!(outcome.unwrap().is_confirmed());
        assert_eq!(withdraw.snapshot().state, TxState::Idle);
        assert_eq!(withdraw.snapshot().hash, None);
    }

    #[test]
    fn finishing_twice_notifies_once() {
        let notifier = RecordingNotifier::default();
        let controller = TxController::new(ActionKind::Stake);
        controller.begin().unwrap();
        let outcome = TxOutcome::Failed(TxFailure::SubmissionRejected("no".into()));

        controller.finish(&outcome, &notifier);
        controller.finish(&outcome, &notifier);

        assert_eq!(notifier.all().len(), 1);
        assert_eq!(controller.state(), TxState::Failed);
    }
}
