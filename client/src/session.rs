use metanode_api::prelude::*;

use crate::error::ActionError;

/// The wallet connection state shared by every page.
///
/// Reads tied to an account are skipped and every action is refused while no
/// account is connected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalletSession {
    account: Option<Address>,
}

impl WalletSession {
    pub fn new(account: Option<Address>) -> Self {
        Self { account }
    }

    pub fn connected(account: Address) -> Self {
        Self::new(Some(account))
    }

    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn account(&self) -> Option<Address> {
        self.account
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    /// The connected account, or the error an action reports without one.
    pub fn require(&self) -> Result<Address, ActionError> {
        self.account.ok_or(ActionError::WalletNotConnected)
    }
}
