#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    from_json, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdError, StdResult, SubMsgResult, Uint128,
};
use cw2::set_contract_version;

use interface::{
    asset::Asset,
    wrapper::{query_wrapper_info, WrappedReceiveMsg},
    wrapper_factory::query_wrapper_address,
};

use crate::{
    conversion::plan_conversion,
    error::ContractError,
    msg::{
        Config, ConfigResponse, ExecuteMsg, InstantiateMsg, QueryMsg, QuoteResponse,
        ReplyPayload, WrappedReceiverResponse,
    },
    settlement::{refund_msg, settlement_msgs, unwrap_msg},
    state::{load_config, CONFIG},
};

const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let target_wrapper = deps.api.addr_validate(&msg.target_wrapper)?;
    let synth_ledger = deps.api.addr_validate(&msg.synth_ledger)?;
    let amm = msg
        .amm
        .map(|amm| deps.api.addr_validate(&amm))
        .transpose()?;

    let unknown_target = || ContractError::UnknownAsset {
        asset: target_wrapper.to_string(),
    };

    let wrapper_info =
        query_wrapper_info(&deps.querier, &target_wrapper).map_err(|_| unknown_target())?;

    let target_symbol = match wrapper_info.underlying {
        Asset::Synth { symbol } => symbol,
        underlying => {
            return Err(ContractError::UnknownAsset {
                asset: underlying.key(),
            })
        }
    };

    let target_token = wrapper_info.underlying_token.ok_or_else(unknown_target)?;

    let config = Config {
        target_symbol,
        target_wrapper,
        target_token,
        wrapper_factory: wrapper_info.factory,
        synth_ledger,
        amm,
        native_denom: msg.native_denom,
        native_reference_synth: msg.native_reference_synth,
        token_reference_synth: msg.token_reference_synth,
    };
    CONFIG.save(deps.storage, &config)?;

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "initialization")
        .add_attribute("target_symbol", config.target_symbol)
        .add_attribute("target_wrapper", config.target_wrapper))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let config = load_config(deps.storage)?;

    match msg {
        ExecuteMsg::TokensReceived(receive_msg) => {
            receive_wrapped(deps, info, &config, receive_msg)
        }
        ExecuteMsg::Deposit {} => deposit(deps, info, &config),
    }
}

// Called by a wrapper after `receive_msg.amount` of its tokens were credited to the exchange.
fn receive_wrapped(
    deps: DepsMut,
    info: MessageInfo,
    config: &Config,
    receive_msg: WrappedReceiveMsg,
) -> Result<Response, ContractError> {
    let wrapper = info.sender;
    let sender = deps.api.addr_validate(&receive_msg.sender)?;
    let amount_in = receive_msg.amount;

    let source = if wrapper == config.target_wrapper {
        None
    } else {
        Some(authenticate_wrapper(deps.as_ref(), config, &wrapper)?)
    };

    let response = Response::new()
        .add_attribute("action", "convert")
        .add_attribute("wrapper", wrapper.clone())
        .add_attribute("sender", sender.clone())
        .add_attribute("amount_in", amount_in);

    if amount_in.is_zero() {
        return Ok(response.add_attribute("amount_out", Uint128::zero()));
    }

    let Some(source) = source else {
        deps.api.debug(&format!(
            "Refunding {} {} to {}",
            amount_in, config.target_symbol, sender
        ));

        return Ok(response
            .add_message(refund_msg(config, &sender, amount_in)?)
            .add_attribute("route", "refund")
            .add_attribute("amount_out", amount_in));
    };

    let conversion = plan_conversion(deps.as_ref(), config, &source, amount_in)?;
    let (msgs, wrap) = settlement_msgs(config, &conversion, &sender)?;

    Ok(response
        .add_message(unwrap_msg(&wrapper, amount_in)?)
        .add_messages(msgs)
        .add_submessage(wrap)
        .add_attribute("source", source.key())
        .add_attribute("amount_out", conversion.amount_out))
}

fn deposit(
    deps: DepsMut,
    info: MessageInfo,
    config: &Config,
) -> Result<Response, ContractError> {
    let amount_in = cw_utils::may_pay(&info, &config.native_denom)?;

    let response = Response::new()
        .add_attribute("action", "deposit")
        .add_attribute("sender", info.sender.clone())
        .add_attribute("amount_in", amount_in);

    if amount_in.is_zero() {
        return Ok(response.add_attribute("amount_out", Uint128::zero()));
    }

    let source = Asset::native(&config.native_denom);
    let conversion = plan_conversion(deps.as_ref(), config, &source, amount_in)?;
    let (msgs, wrap) = settlement_msgs(config, &conversion, &info.sender)?;

    Ok(response
        .add_messages(msgs)
        .add_submessage(wrap)
        .add_attribute("amount_out", conversion.amount_out))
}

// A wrapper is trusted only if the target wrapper's factory derives its address
// for the underlying it reports.
fn authenticate_wrapper(
    deps: Deps,
    config: &Config,
    wrapper: &Addr,
) -> Result<Asset, ContractError> {
    let unknown = || ContractError::UnknownAsset {
        asset: wrapper.to_string(),
    };

    let wrapper_info = query_wrapper_info(&deps.querier, wrapper).map_err(|_| unknown())?;

    if wrapper_info.factory != config.wrapper_factory {
        return Err(unknown());
    }

    let expected = query_wrapper_address(
        &deps.querier,
        &config.wrapper_factory,
        &wrapper_info.underlying,
    )
    .map_err(|_| unknown())?;

    if expected != *wrapper {
        deps.api.debug(&format!(
            "Wrapper {} claims {} which the factory derives at {}",
            wrapper, wrapper_info.underlying, expected
        ));
        return Err(unknown());
    }

    Ok(wrapper_info.underlying)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match from_json::<ReplyPayload>(&msg.payload)? {
        ReplyPayload::Settle {
            recipient,
            amount_out,
        } => match msg.result {
            SubMsgResult::Ok(_) => Ok(Response::new()),
            SubMsgResult::Err(err) => Err(ContractError::SettlementFailure {
                reason: format!("wrapping {amount_out} for {recipient} failed: {err}"),
            }),
        },
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&ConfigResponse {
            config: load_config(deps.storage)?,
        }),
        QueryMsg::Quote { asset, amount } => to_json_binary(
            &query_quote(deps, asset, amount).map_err(|e| StdError::generic_err(e.to_string()))?,
        ),
        QueryMsg::WrappedReceiver {} => to_json_binary(&WrappedReceiverResponse { accepts: true }),
    }
}

fn query_quote(deps: Deps, asset: Asset, amount: Uint128) -> Result<QuoteResponse, ContractError> {
    let config = load_config(deps.storage)?;
    let asset = asset.validate(deps.api)?;

    if amount.is_zero() {
        return Ok(QuoteResponse {
            amount_out: Uint128::zero(),
        });
    }

    let conversion = plan_conversion(deps, &config, &asset, amount)?;

    Ok(QuoteResponse {
        amount_out: conversion.amount_out,
    })
}
