use cosmwasm_schema::write_api;
use wrapper_factory::msg::InstantiateMsg;
use wrapper_factory::{ExecuteMsg, QueryMsg};

fn main() {
    write_api! {
        instantiate: InstantiateMsg,
        execute: ExecuteMsg,
        query: QueryMsg,
    };
}
