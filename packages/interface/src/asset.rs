use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Api, StdError, StdResult};

/// A fungible unit of value that can be wrapped and converted.
#[cw_serde]
#[derive(Eq, Hash)]
pub enum Asset {
    /// The chain's native coin (or any bank denom).
    Native { denom: String },
    /// An external CW20 token that the synth ledger does not price.
    Token { address: String },
    /// A synthetic asset priced and issued by the synth ledger.
    Synth { symbol: String },
}

impl Asset {
    pub fn native(denom: impl Into<String>) -> Self {
        Asset::Native {
            denom: denom.into(),
        }
    }

    pub fn token(address: impl Into<String>) -> Self {
        Asset::Token {
            address: address.into(),
        }
    }

    pub fn synth(symbol: impl Into<String>) -> Self {
        Asset::Synth {
            symbol: symbol.into(),
        }
    }

    /// Canonical identifier of the asset. Two assets are the same unit of value
    /// if and only if their keys are equal.
    pub fn key(&self) -> String {
        match self {
            Asset::Native { denom } => format!("native:{denom}"),
            Asset::Token { address } => format!("token:{address}"),
            Asset::Synth { symbol } => format!("synth:{symbol}"),
        }
    }

    pub fn is_synth(&self) -> bool {
        matches!(self, Asset::Synth { .. })
    }

    /// Validates the asset and normalizes token addresses, so that the
    /// same token can not be registered under two spellings.
    pub fn validate(&self, api: &dyn Api) -> StdResult<Asset> {
        match self {
            Asset::Native { denom } => {
                if denom.trim().is_empty() {
                    return Err(StdError::generic_err("native denom must not be empty"));
                }

                Ok(self.clone())
            }
            Asset::Token { address } => Ok(Asset::Token {
                address: api.addr_validate(address)?.to_string(),
            }),
            Asset::Synth { symbol } => {
                if symbol.trim().is_empty() {
                    return Err(StdError::generic_err("synth symbol must not be empty"));
                }

                Ok(self.clone())
            }
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
