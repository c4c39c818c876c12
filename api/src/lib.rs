pub mod abi;
pub mod consts;
pub mod error;
pub mod instruction;
pub mod sdk;
pub mod state;
pub mod utils;

pub mod prelude {
    pub use alloy_primitives::{Address, Bytes, TxHash, U256};
    pub use crate::consts::*;
    pub use crate::error::*;
    pub use crate::instruction::*;
    pub use crate::state::{AccountPosition, PoolSnapshot, WithdrawRequest};
    pub use crate::utils::*;
}
