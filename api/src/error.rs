use thiserror::Error;

/// A decimal amount the user typed could not be turned into base units.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("amount {0:?} is not a plain decimal number")]
    Malformed(String),

    #[error("amount has more than {max} fractional digits")]
    TooManyDecimals { max: u8 },

    #[error("amount does not fit in base units")]
    Overflow,

    #[error("amount must be greater than zero")]
    NotPositive,
}

/// Contract return data did not have the expected shape.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Abi(#[from] alloy_sol_types::Error),

    #[error("{0} does not fit in 128 bits")]
    Overflow(&'static str),
}
