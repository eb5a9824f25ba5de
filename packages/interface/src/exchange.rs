use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

use crate::{
    asset::Asset,
    wrapper::{WrappedReceiveMsg, WrappedReceiverResponse},
};

#[cw_serde]
pub struct InstantiateMsg {
    pub target_wrapper: String,
    pub synth_ledger: String,
    pub amm: Option<String>,
    pub native_denom: String,
    pub native_reference_synth: String,
    pub token_reference_synth: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Pushed by a wrapper after wrapped tokens were transferred to the exchange.
    TokensReceived(WrappedReceiveMsg),
    /// Converts the attached native coin.
    Deposit {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    /// Amount of the target asset `amount` of `asset` converts into at current prices.
    #[returns(QuoteResponse)]
    Quote { asset: Asset, amount: Uint128 },

    #[returns(WrappedReceiverResponse)]
    WrappedReceiver {},
}

#[cw_serde]
pub struct Config {
    pub target_symbol: String,
    pub target_wrapper: Addr,
    pub target_token: Addr,
    pub wrapper_factory: Addr,
    pub synth_ledger: Addr,
    pub amm: Option<Addr>,
    pub native_denom: String,
    pub native_reference_synth: String,
    pub token_reference_synth: String,
}

#[cw_serde]
pub struct ConfigResponse {
    pub config: Config,
}

#[cw_serde]
pub struct QuoteResponse {
    pub amount_out: Uint128,
}
