use metanode_api::prelude::*;
use thiserror::Error;

use crate::lifecycle::ActionKind;

/// An action was refused before anything was sent to the chain.
///
/// Messages are user facing; pages show them verbatim as failure notifications.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Please enter a valid amount")]
    InvalidAmount(#[source] AmountError),

    #[error("Amount cannot be greater than current balance")]
    InsufficientBalance,

    #[error("Amount cannot be greater than staked amount")]
    InsufficientStaked,

    #[error("No rewards to claim")]
    NothingToClaim,

    #[error("Nothing is ready to withdraw yet")]
    NothingToWithdraw,

    #[error("Connect a wallet to continue")]
    WalletNotConnected,

    #[error("A {0} transaction is already in progress")]
    AlreadyInFlight(ActionKind),
}

impl From<AmountError> for ActionError {
    fn from(error: AmountError) -> Self {
        ActionError::InvalidAmount(error)
    }
}
