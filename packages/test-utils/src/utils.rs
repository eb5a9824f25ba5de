use cosmwasm_std::{testing::MockApi, Coin, MessageInfo};

pub fn get_message_info(api: &MockApi, sender: &str, funds: &[Coin]) -> MessageInfo {
    MessageInfo {
        sender: api.addr_make(sender),
        funds: funds.to_vec(),
    }
}

pub fn get_address_as_str(api: &MockApi, addr: &str) -> String {
    api.addr_make(addr).to_string()
}
