use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error("Wrapper for {asset} already exists at {address}")]
    AlreadyExists { asset: String, address: String },

    #[error("Unknown asset: {asset}")]
    UnknownAsset { asset: String },
}
