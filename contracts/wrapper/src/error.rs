use cosmwasm_std::{OverflowError, StdError, Uint128};
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error(transparent)]
    OverflowError(#[from] OverflowError),

    #[error(transparent)]
    PaymentError(#[from] PaymentError),

    #[error("Unknown asset: {asset}")]
    UnknownAsset { asset: String },

    #[error("Insufficient authorization: required {required}, authorized {authorized}")]
    InsufficientAuthorization {
        required: Uint128,
        authorized: Uint128,
    },

    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        required: Uint128,
        available: Uint128,
    },

    #[error("Invalid funds: expected {expected}, received {received}")]
    InvalidFunds {
        expected: Uint128,
        received: Uint128,
    },

    #[error("Zero amount not allowed")]
    ZeroAmount {},

    #[error("Recipient is not a contract: {address}")]
    NotAContract { address: String },
}
