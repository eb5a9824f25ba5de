use cosmwasm_schema::write_api;
use wrapper::msg::InstantiateMsg;
use wrapper::{ExecuteMsg, QueryMsg};

fn main() {
    write_api! {
        instantiate: InstantiateMsg,
        execute: ExecuteMsg,
        query: QueryMsg,
    };
}
