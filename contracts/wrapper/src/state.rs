use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};
use interface::asset::Asset;

#[cw_serde]
pub struct Config {
    pub underlying: Asset,
    // CW20 contract holding the reserve; None when the underlying is a bank denom
    pub underlying_token: Option<Addr>,
    pub factory: Addr,
}

#[cw_serde]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

pub const CONFIG: Item<Config> = Item::new("config");

pub const TOKEN_INFO: Item<TokenInfo> = Item::new("token_info");

// Equals the reserve of the underlying held by the contract
pub const TOTAL_WRAPPED: Item<Uint128> = Item::new("total_wrapped");

pub const BALANCES: Map<&Addr, Uint128> = Map::new("balances");

pub fn load_config(storage: &dyn Storage) -> StdResult<Config> {
    CONFIG.load(storage)
}

pub fn load_balance(storage: &dyn Storage, address: &Addr) -> StdResult<Uint128> {
    Ok(BALANCES.may_load(storage, address)?.unwrap_or_default())
}
