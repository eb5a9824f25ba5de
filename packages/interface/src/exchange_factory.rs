use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

pub use crate::wrapper_factory::AddressResponse;

#[cw_serde]
pub struct InstantiateMsg {
    pub exchange_code_id: u64,
    pub synth_ledger: String,
    // Without an AMM, exchanges only convert between synths
    pub amm: Option<String>,
    pub native_denom: String,
    pub native_reference_synth: String,
    pub token_reference_synth: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Deploys the exchange converting into the asset of `target_wrapper`.
    /// Fails if it already exists.
    CreateExchange { target_wrapper: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    /// Address of the exchange for `target_wrapper`, whether or not it has been created yet.
    #[returns(AddressResponse)]
    ExchangeAddress { target_wrapper: String },
}

#[cw_serde]
pub struct Config {
    pub exchange_code_id: u64,
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
