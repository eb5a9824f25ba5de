//! Fixed-price swap router used in multi-contract tests. Output is paid from
//! the router's own balances, so tests have to fund it first.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    from_json, to_json_binary, Addr, BankMsg, Binary, Coin, CosmosMsg, Decimal, Deps, DepsMut,
    Env, MessageInfo, Response, StdError, StdResult, Uint128, WasmMsg,
};
use cw20::{Cw20ExecuteMsg, Cw20ReceiveMsg};
use cw_multi_test::{Contract, ContractWrapper};
use cw_storage_plus::Map;
use interface::{
    amm::{AmmHookMsg, AmmQueryMsg, AmmQuoteResponse},
    asset::Asset,
};

#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    SetPrice {
        asset_in: Asset,
        asset_out: Asset,
        price: Decimal,
    },
    Swap {
        asset_out: Asset,
        min_amount_out: Uint128,
        recipient: Option<String>,
    },
    Receive(Cw20ReceiveMsg),
}

// (asset in key, asset out key) -> units of asset out per unit of asset in
const PRICES: Map<(String, String), Decimal> = Map::new("prices");

pub fn instantiate(
    _deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: InstantiateMsg,
) -> StdResult<Response> {
    Ok(Response::new().add_attribute("action", "initialization"))
}

pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> StdResult<Response> {
    match msg {
        ExecuteMsg::SetPrice {
            asset_in,
            asset_out,
            price,
        } => {
            PRICES.save(deps.storage, (asset_in.key(), asset_out.key()), &price)?;

            Ok(Response::new().add_attribute("action", "set_price"))
        }
        ExecuteMsg::Swap {
            asset_out,
            min_amount_out,
            recipient,
        } => {
            let coin = cw_utils::one_coin(&info).map_err(|e| StdError::generic_err(e.to_string()))?;
            let recipient = recipient.unwrap_or_else(|| info.sender.to_string());

            swap(
                deps.as_ref(),
                Asset::native(coin.denom),
                coin.amount,
                asset_out,
                min_amount_out,
                recipient,
            )
        }
        ExecuteMsg::Receive(cw20_msg) => match from_json::<AmmHookMsg>(&cw20_msg.msg)? {
            AmmHookMsg::Swap {
                asset_out,
                min_amount_out,
                recipient,
            } => swap(
                deps.as_ref(),
                Asset::token(info.sender.to_string()),
                cw20_msg.amount,
                asset_out,
                min_amount_out,
                recipient.unwrap_or(cw20_msg.sender),
            ),
        },
    }
}

pub fn query(deps: Deps, _env: Env, msg: AmmQueryMsg) -> StdResult<Binary> {
    match msg {
        AmmQueryMsg::Quote {
            amount_in,
            asset_in,
            asset_out,
        } => to_json_binary(&AmmQuoteResponse {
            amount_out: quote(deps, amount_in, &asset_in, &asset_out)?,
        }),
    }
}

pub fn contract() -> Box<dyn Contract<cosmwasm_std::Empty>> {
    Box::new(ContractWrapper::new(execute, instantiate, query))
}

fn quote(
    deps: Deps,
    amount_in: Uint128,
    asset_in: &Asset,
    asset_out: &Asset,
) -> StdResult<Uint128> {
    let price = PRICES
        .may_load(deps.storage, (asset_in.key(), asset_out.key()))?
        .ok_or_else(|| {
            StdError::generic_err(format!("no liquidity path from {asset_in} to {asset_out}"))
        })?;

    Ok(amount_in.mul_floor(price))
}

fn swap(
    deps: Deps,
    asset_in: Asset,
    amount_in: Uint128,
    asset_out: Asset,
    min_amount_out: Uint128,
    recipient: String,
) -> StdResult<Response> {
    let amount_out = quote(deps, amount_in, &asset_in, &asset_out)?;

    if amount_out < min_amount_out {
        return Err(StdError::generic_err(format!(
            "swap output {amount_out} is below minimum {min_amount_out}"
        )));
    }

    let recipient = deps.api.addr_validate(&recipient)?;
    let payout: CosmosMsg = match &asset_out {
        Asset::Native { denom } => BankMsg::Send {
            to_address: recipient.to_string(),
            amount: vec![Coin::new(amount_out, denom)],
        }
        .into(),
        Asset::Token { address } => token_transfer(address, &recipient, amount_out)?.into(),
        Asset::Synth { .. } => {
            return Err(StdError::generic_err(
                "synths must be addressed by their token",
            ))
        }
    };

    Ok(Response::new()
        .add_message(payout)
        .add_attribute("action", "swap")
        .add_attribute("asset_in", asset_in.key())
        .add_attribute("asset_out", asset_out.key())
        .add_attribute("amount_in", amount_in)
        .add_attribute("amount_out", amount_out))
}

fn token_transfer(token: &str, recipient: &Addr, amount: Uint128) -> StdResult<WasmMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    })
}
