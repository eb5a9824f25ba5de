use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error("Exchange for {target_wrapper} already exists at {address}")]
    AlreadyExists {
        target_wrapper: String,
        address: String,
    },

    #[error("Unknown asset: {asset}")]
    UnknownAsset { asset: String },
}

pub fn new_generic_error(msg: impl Into<String>) -> ContractError {
    ContractError::Std(StdError::generic_err(msg))
}
