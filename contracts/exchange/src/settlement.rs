use cosmwasm_std::{
    to_json_binary, to_json_vec, Addr, Coin, CosmosMsg, StdResult, SubMsg, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use interface::{
    amm::{AmmExecuteMsg, AmmHookMsg},
    asset::Asset,
    synth_ledger::SynthLedgerHookMsg,
    wrapper::ExecuteMsg as WrapperExecuteMsg,
};

use crate::{
    conversion::{Conversion, Route},
    error::{aborted, ContractError},
    msg::{Config, ReplyPayload},
};

// Replies are told apart by their payload
pub const UNUSED_MSG_ID: u64 = 0;

/// Builds the messages that turn `conversion.amount_in` of the source asset, held by
/// the exchange, into `conversion.amount_out` wrapped target tokens owned by `recipient`.
/// The messages run in order, and any failure reverts the whole conversion.
pub fn settlement_msgs(
    config: &Config,
    conversion: &Conversion,
    recipient: &Addr,
) -> Result<(Vec<CosmosMsg>, SubMsg), ContractError> {
    let mut msgs = vec![];

    match &conversion.route {
        Route::Identity => {}
        Route::Oracle { token, .. } => {
            msgs.push(ledger_exchange_msg(config, token, conversion.amount_in)?);
        }
        Route::Swap {
            amm,
            reference_symbol,
            reference_token,
            swap_out,
        } => {
            msgs.push(swap_msg(
                amm,
                &conversion.source,
                conversion.amount_in,
                reference_token,
                *swap_out,
            )?);

            if *reference_symbol != config.target_symbol {
                msgs.push(ledger_exchange_msg(config, reference_token, *swap_out)?);
            }
        }
    }

    msgs.push(
        WasmMsg::Execute {
            contract_addr: config.target_token.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::IncreaseAllowance {
                spender: config.target_wrapper.to_string(),
                amount: conversion.amount_out,
                expires: None,
            })?,
            funds: vec![],
        }
        .into(),
    );

    let wrap = wrap_submsg(config, conversion.amount_out, recipient)?;

    Ok((msgs, wrap))
}

/// Releases the underlying of `amount` wrapped tokens of `wrapper` to the exchange.
pub fn unwrap_msg(wrapper: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: wrapper.to_string(),
        msg: to_json_binary(&WrapperExecuteMsg::Unwrap { amount })?,
        funds: vec![],
    }
    .into())
}

/// Hands `amount` wrapped target tokens held by the exchange back to `recipient`.
pub fn refund_msg(config: &Config, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: config.target_wrapper.to_string(),
        msg: to_json_binary(&WrapperExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    }
    .into())
}

// The ledger burns the synth it receives and issues the target synth to the exchange
fn ledger_exchange_msg(config: &Config, token: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Send {
            contract: config.synth_ledger.to_string(),
            amount,
            msg: to_json_binary(&SynthLedgerHookMsg::Exchange {
                target_symbol: config.target_symbol.clone(),
            })?,
        })?,
        funds: vec![],
    }
    .into())
}

fn swap_msg(
    amm: &Addr,
    source: &Asset,
    amount_in: Uint128,
    reference_token: &Addr,
    min_amount_out: Uint128,
) -> Result<CosmosMsg, ContractError> {
    let asset_out = Asset::token(reference_token.as_str());

    let msg = match source {
        Asset::Native { denom } => WasmMsg::Execute {
            contract_addr: amm.to_string(),
            msg: to_json_binary(&AmmExecuteMsg::Swap {
                asset_out,
                min_amount_out,
                recipient: None,
            })?,
            funds: vec![Coin::new(amount_in, denom)],
        },
        Asset::Token { address } => WasmMsg::Execute {
            contract_addr: address.clone(),
            msg: to_json_binary(&Cw20ExecuteMsg::Send {
                contract: amm.to_string(),
                amount: amount_in,
                msg: to_json_binary(&AmmHookMsg::Swap {
                    asset_out,
                    min_amount_out,
                    recipient: None,
                })?,
            })?,
            funds: vec![],
        },
        Asset::Synth { .. } => {
            return Err(aborted(format!("{source} is not swapped on the AMM")));
        }
    };

    Ok(msg.into())
}

// Errors of the final wrap are surfaced as settlement failures by the reply handler
fn wrap_submsg(config: &Config, amount: Uint128, recipient: &Addr) -> StdResult<SubMsg> {
    let wrap = WasmMsg::Execute {
        contract_addr: config.target_wrapper.to_string(),
        msg: to_json_binary(&WrapperExecuteMsg::Wrap {
            amount,
            recipient: Some(recipient.to_string()),
        })?,
        funds: vec![],
    };

    Ok(SubMsg::reply_on_error(wrap, UNUSED_MSG_ID).with_payload(to_json_vec(
        &ReplyPayload::Settle {
            recipient: recipient.to_string(),
            amount_out: amount,
        },
    )?))
}
