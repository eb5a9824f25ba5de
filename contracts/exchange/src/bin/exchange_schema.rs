use cosmwasm_schema::write_api;
use exchange::msg::InstantiateMsg;
use exchange::{ExecuteMsg, QueryMsg};

fn main() {
    write_api! {
        instantiate: InstantiateMsg,
        execute: ExecuteMsg,
        query: QueryMsg,
    };
}
