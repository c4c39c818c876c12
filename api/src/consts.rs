/// The decimal precision of the staked native asset (and of the reward token).
/// There are 10^18 indivisible base units per whole token.
pub const TOKEN_DECIMALS: u8 = 18;

/// One whole token, denominated in base units.
pub const ONE_TOKEN: u128 = 10u128.pow(TOKEN_DECIMALS as u32);

/// The largest precision a `u128` base-unit amount can carry.
pub const MAX_DECIMALS: u8 = 38;

/// Fractional places shown for balances in views.
pub const DISPLAY_PLACES: u8 = 4;

/// Symbol of the native asset that is staked.
pub const NATIVE_SYMBOL: &str = "ETH";

/// Symbol of the reward token paid out by the pool.
pub const REWARD_SYMBOL: &str = "MetaNode";

/// The pool this client addresses unless configured otherwise.
pub const DEFAULT_POOL_ID: u64 = 0;

/// Period between contract state refreshes, in milliseconds.
pub const POLL_INTERVAL_MS: u64 = 10_000;

/// Period between receipt lookups while a transaction is pending, in milliseconds.
pub const RECEIPT_POLL_MS: u64 = 2_000;

/// How long a receipt wait may run before it counts as failed, in seconds.
pub const CONFIRM_TIMEOUT_SECS: u64 = 600;

/// The unstake cooldown enforced by the contract, in minutes. Display only.
pub const COOLDOWN_MINUTES: u64 = 20;
