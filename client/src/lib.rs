pub mod chain;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod notify;
pub mod pages;
pub mod poll;
pub mod query;
pub mod rpc;
pub mod session;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use crate::chain::{ChainClient, ChainError, ReceiptStatus};
    pub use crate::config::{ClientConfig, ConfigError};
    pub use crate::error::ActionError;
    pub use crate::lifecycle::{
        ActionKind, PendingTransaction, TxController, TxFailure, TxOutcome, TxState,
    };
    pub use crate::notify::{Level, Notification, Notifier};
    pub use crate::pages::{
        ButtonView, ClaimPage, ClaimView, Context, StakePage, StakeView, WithdrawPage,
        WithdrawView,
    };
    pub use crate::poll::{Polled, RefreshSchedule};
    pub use crate::query::*;
    pub use crate::rpc::RpcChain;
    pub use crate::session::WalletSession;
}
