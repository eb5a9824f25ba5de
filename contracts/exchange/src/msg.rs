use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;

pub use interface::exchange::{
    Config, ConfigResponse, ExecuteMsg, InstantiateMsg, QueryMsg, QuoteResponse,
};
pub use interface::wrapper::{WrappedReceiveMsg, WrappedReceiverResponse};

#[cw_serde]
pub enum ReplyPayload {
    Settle {
        recipient: String,
        amount_out: Uint128,
    },
}
