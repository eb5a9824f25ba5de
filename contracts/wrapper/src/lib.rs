pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::contract::{execute, instantiate, query};
pub use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};

#[cfg(test)]
mod testing;
