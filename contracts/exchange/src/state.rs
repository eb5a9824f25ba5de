use cosmwasm_std::{StdResult, Storage};
use cw_storage_plus::Item;

use crate::msg::Config;

pub const CONFIG: Item<Config> = Item::new("config");

pub fn load_config(storage: &dyn Storage) -> StdResult<Config> {
    CONFIG.load(storage)
}
