use std::time::Duration;

use metanode_api::prelude::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing {0} env var")]
    Missing(&'static str),

    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Client settings, read from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// JSON-RPC endpoint of the node or wallet provider.
    pub rpc_url: String,

    /// Address of the staking contract.
    pub contract: Address,

    /// The connected wallet, if any.
    pub account: Option<Address>,

    pub pool_id: u64,
    pub poll_interval: Duration,
    pub receipt_poll_interval: Duration,
    pub confirm_timeout: Duration,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |var: &'static str| lookup(var).ok_or(ConfigError::Missing(var));
        let parsed = |var: &'static str, default: u64| -> Result<u64, ConfigError> {
            match lookup(var) {
                None => Ok(default),
                Some(value) => value.parse().map_err(|e: std::num::ParseIntError| {
                    ConfigError::Invalid {
                        var,
                        reason: e.to_string(),
                        value,
                    }
                }),
            }
        };

        let rpc_url = required("RPC")?;
        let contract = parse_address("CONTRACT", required("CONTRACT")?)?;
        let account = lookup("ACCOUNT")
            .filter(|value| !value.is_empty())
            .map(|value| parse_address("ACCOUNT", value))
            .transpose()?;

        // Periods and budgets of zero would spin or fail every wait.
        let positive = |var: &'static str, default: u64| -> Result<u64, ConfigError> {
            match parsed(var, default)? {
                0 => Err(ConfigError::Invalid {
                    var,
                    value: "0".to_string(),
                    reason: "must be positive".to_string(),
                }),
                value => Ok(value),
            }
        };

        Ok(Self {
            rpc_url,
            contract,
            account,
            pool_id: parsed("POOL_ID", DEFAULT_POOL_ID)?,
            poll_interval: Duration::from_millis(positive("POLL_INTERVAL_MS", POLL_INTERVAL_MS)?),
            receipt_poll_interval: Duration::from_millis(positive("RECEIPT_POLL_MS", RECEIPT_POLL_MS)?),
            confirm_timeout: Duration::from_secs(positive("CONFIRM_TIMEOUT_SECS", CONFIRM_TIMEOUT_SECS)?),
        })
    }
}

fn parse_address(var: &'static str, value: String) -> Result<Address, ConfigError> {
    value.parse::<Address>().map_err(|e| ConfigError::Invalid {
        var,
        reason: e.to_string(),
        value,
    })
}
