use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, QuerierWrapper, StdResult};

use crate::asset::Asset;

#[cw_serde]
pub struct InstantiateMsg {
    pub wrapper_code_id: u64,
    pub synth_ledger: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Deploys the wrapper of `asset`. Fails if it already exists.
    CreateWrapper { asset: Asset },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    /// Address of the wrapper of `asset`, whether or not it has been created yet.
    #[returns(AddressResponse)]
    WrapperAddress { asset: Asset },
}

#[cw_serde]
pub struct Config {
    pub wrapper_code_id: u64,
    pub synth_ledger: Option<Addr>,
}

#[cw_serde]
pub struct ConfigResponse {
    pub config: Config,
}

#[cw_serde]
pub struct AddressResponse {
    pub address: Addr,
    pub exists: bool,
}

pub fn query_wrapper_address(
    querier: &QuerierWrapper,
    factory: impl Into<String>,
    asset: &Asset,
) -> StdResult<Addr> {
    let response: AddressResponse = querier.query_wasm_smart(
        factory,
        &QueryMsg::WrapperAddress {
            asset: asset.clone(),
        },
    )?;

    Ok(response.address)
}
