use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    to_json_binary, Addr, Binary, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg,
};
pub use cw20::{BalanceResponse, TokenInfoResponse};

use crate::asset::Asset;

#[cw_serde]
pub struct InstantiateMsg {
    pub underlying: Asset,
    // Required to resolve the CW20 token behind a Synth underlying
    pub synth_ledger: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Locks `amount` of the underlying and mints the same amount of wrapped
    /// tokens to `recipient` (defaults to the sender). CW20 underlyings must
    /// be approved for the wrapper beforehand; native coin must be attached.
    Wrap {
        amount: Uint128,
        recipient: Option<String>,
    },
    /// Burns `amount` of the sender's wrapped tokens and releases the same
    /// amount of the underlying to the sender.
    Unwrap { amount: Uint128 },
    /// Moves wrapped tokens. If the recipient is a contract that declares
    /// support for wrapped token notifications, it is notified in the same
    /// transaction.
    Transfer { recipient: String, amount: Uint128 },
    /// Moves wrapped tokens to a contract and always notifies it, forwarding `msg`.
    Send {
        contract: String,
        amount: Uint128,
        msg: Binary,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(WrapperInfoResponse)]
    WrapperInfo {},

    #[returns(BalanceResponse)]
    Balance { address: String },

    #[returns(TokenInfoResponse)]
    TokenInfo {},

    #[returns(ReserveResponse)]
    Reserve {},
}

#[cw_serde]
pub struct WrapperInfoResponse {
    pub underlying: Asset,
    // CW20 contract holding the reserve, None for native coin
    pub underlying_token: Option<Addr>,
    pub factory: Addr,
    pub total_wrapped: Uint128,
}

#[cw_serde]
pub struct ReserveResponse {
    pub reserve: Uint128,
}

/// Notification pushed by a wrapper to the recipient of a transfer.
#[cw_serde]
pub struct WrappedReceiveMsg {
    /// Account the wrapped tokens were transferred from
    pub sender: String,
    pub amount: Uint128,
    pub msg: Binary,
}

impl WrappedReceiveMsg {
    pub fn into_json_binary(self) -> StdResult<Binary> {
        to_json_binary(&ReceiverExecuteMsg::TokensReceived(self))
    }

    pub fn into_cosmos_msg(self, contract: impl Into<String>) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: contract.into(),
            msg: self.into_json_binary()?,
            funds: vec![],
        }
        .into())
    }
}

/// Execute message every notification receiver must accept.
#[cw_serde]
pub enum ReceiverExecuteMsg {
    TokensReceived(WrappedReceiveMsg),
}

/// Query every notification receiver must answer to be notified on plain transfers.
#[cw_serde]
#[derive(QueryResponses)]
pub enum ReceiverQueryMsg {
    #[returns(WrappedReceiverResponse)]
    WrappedReceiver {},
}

#[cw_serde]
pub struct WrappedReceiverResponse {
    pub accepts: bool,
}

pub fn query_wrapper_info(
    querier: &QuerierWrapper,
    wrapper: impl Into<String>,
) -> StdResult<WrapperInfoResponse> {
    querier.query_wasm_smart(wrapper, &QueryMsg::WrapperInfo {})
}

/// Returns true only if `contract` explicitly declares that it accepts notifications.
/// Contracts that do not understand the query are treated as not accepting.
pub fn accepts_notifications(querier: &QuerierWrapper, contract: &Addr) -> bool {
    querier
        .query_wasm_smart::<WrappedReceiverResponse>(
            contract,
            &ReceiverQueryMsg::WrappedReceiver {},
        )
        .map(|response| response.accepts)
        .unwrap_or(false)
}
