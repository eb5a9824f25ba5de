use cosmwasm_schema::write_api;
use exchange_factory::msg::InstantiateMsg;
use exchange_factory::{ExecuteMsg, QueryMsg};

fn main() {
    write_api! {
        instantiate: InstantiateMsg,
        execute: ExecuteMsg,
        query: QueryMsg,
    };
}
