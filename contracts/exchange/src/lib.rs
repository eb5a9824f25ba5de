pub mod contract;
pub mod conversion;
pub mod error;
pub mod msg;
pub mod settlement;
pub mod state;

pub use crate::contract::{execute, instantiate, query, reply};
pub use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
