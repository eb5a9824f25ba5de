use cosmwasm_std::{CheckedMultiplyRatioError, OverflowError, StdError};
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error(transparent)]
    OverflowError(#[from] OverflowError),

    #[error(transparent)]
    CheckedMultiplyRatioError(#[from] CheckedMultiplyRatioError),

    #[error(transparent)]
    PaymentError(#[from] PaymentError),

    #[error("Unknown asset: {asset}")]
    UnknownAsset { asset: String },

    #[error("Conversion aborted: {reason}")]
    AbortedConversion { reason: String },

    #[error("Settlement failed: {reason}")]
    SettlementFailure { reason: String },
}

pub fn aborted(reason: impl Into<String>) -> ContractError {
    ContractError::AbortedConversion {
        reason: reason.into(),
    }
}
