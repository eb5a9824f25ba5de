use cosmwasm_std::{StdResult, Storage};
use cw_storage_plus::Item;
pub use interface::wrapper_factory::Config;

// Wrapper addresses are derived, never stored.
pub const CONFIG: Item<Config> = Item::new("config");

pub fn load_config(storage: &dyn Storage) -> StdResult<Config> {
    CONFIG.load(storage)
}
