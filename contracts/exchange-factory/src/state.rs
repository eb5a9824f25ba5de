use cosmwasm_std::{StdResult, Storage};
use cw_storage_plus::Item;
pub use interface::exchange_factory::Config;

// Fixed at instantiation; every exchange deployed by this factory shares it.
pub const CONFIG: Item<Config> = Item::new("config");

pub fn load_config(storage: &dyn Storage) -> StdResult<Config> {
    CONFIG.load(storage)
}
