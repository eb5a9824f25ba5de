//! Minimal synth ledger used in multi-contract tests: keeps a rate table,
//! mints synth CW20 tokens it is the minter of, and exchanges synths that
//! are sent to it at the current rates.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    from_json, to_json_binary, Addr, Binary, Decimal, Deps, DepsMut, Env, MessageInfo, Response,
    StdError, StdResult, Uint128, WasmMsg,
};
use cw20::{Cw20ExecuteMsg, Cw20ReceiveMsg};
use cw_multi_test::{Contract, ContractWrapper};
use cw_storage_plus::Map;
use interface::synth_ledger::{
    RateResponse, SynthLedgerHookMsg, SynthLedgerQueryMsg, SynthTokenResponse,
    TokenSymbolResponse,
};

#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    RegisterSynth {
        symbol: String,
        token: String,
        rate: Decimal,
    },
    SetRate {
        symbol: String,
        rate: Decimal,
    },
    Issue {
        symbol: String,
        recipient: String,
        amount: Uint128,
    },
    Receive(Cw20ReceiveMsg),
}

#[cw_serde]
pub struct Synth {
    pub token: Addr,
    pub rate: Decimal,
}

const SYNTHS: Map<&str, Synth> = Map::new("synths");
const TOKEN_SYMBOLS: Map<&Addr, String> = Map::new("token_symbols");

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
        ExecuteMsg::RegisterSynth {
            symbol,
            token,
            rate,
        } => {
            let token = deps.api.addr_validate(&token)?;
            SYNTHS.save(
                deps.storage,
                &symbol,
                &Synth {
                    token: token.clone(),
                    rate,
                },
            )?;
            TOKEN_SYMBOLS.save(deps.storage, &token, &symbol)?;

            Ok(Response::new()
                .add_attribute("action", "register_synth")
                .add_attribute("symbol", symbol))
        }
        ExecuteMsg::SetRate { symbol, rate } => {
            SYNTHS.update(deps.storage, &symbol, |synth| match synth {
                Some(synth) => Ok(Synth { rate, ..synth }),
                None => Err(StdError::generic_err(format!("unknown synth {symbol}"))),
            })?;

            Ok(Response::new().add_attribute("action", "set_rate"))
        }
        ExecuteMsg::Issue {
            symbol,
            recipient,
            amount,
        } => {
            let synth = load_synth(deps.as_ref(), &symbol)?;

            Ok(Response::new()
                .add_message(mint_msg(&synth.token, recipient, amount)?)
                .add_attribute("action", "issue"))
        }
        ExecuteMsg::Receive(cw20_msg) => {
            let source_symbol = TOKEN_SYMBOLS
                .may_load(deps.storage, &info.sender)?
                .ok_or_else(|| StdError::generic_err("received token is not a synth"))?;

            match from_json::<SynthLedgerHookMsg>(&cw20_msg.msg)? {
                SynthLedgerHookMsg::Exchange { target_symbol } => {
                    let source = load_synth(deps.as_ref(), &source_symbol)?;
                    let target = load_synth(deps.as_ref(), &target_symbol)?;

                    if source.rate.is_zero() || target.rate.is_zero() {
                        return Err(StdError::generic_err("synth is not priced"));
                    }

                    let amount_out = cw20_msg
                        .amount
                        .checked_multiply_ratio(source.rate.atomics(), target.rate.atomics())
                        .map_err(|e| StdError::generic_err(e.to_string()))?;

                    let burn = WasmMsg::Execute {
                        contract_addr: source.token.to_string(),
                        msg: to_json_binary(&Cw20ExecuteMsg::Burn {
                            amount: cw20_msg.amount,
                        })?,
                        funds: vec![],
                    };

                    Ok(Response::new()
                        .add_message(burn)
                        .add_message(mint_msg(&target.token, cw20_msg.sender, amount_out)?)
                        .add_attribute("action", "exchange")
                        .add_attribute("source", source_symbol)
                        .add_attribute("target", target_symbol)
                        .add_attribute("amount_in", cw20_msg.amount)
                        .add_attribute("amount_out", amount_out))
                }
            }
        }
    }
}

pub fn query(deps: Deps, _env: Env, msg: SynthLedgerQueryMsg) -> StdResult<Binary> {
    match msg {
        SynthLedgerQueryMsg::Rate { symbol } => to_json_binary(&RateResponse {
            rate: load_synth(deps, &symbol)?.rate,
        }),
        SynthLedgerQueryMsg::SynthToken { symbol } => to_json_binary(&SynthTokenResponse {
            token: load_synth(deps, &symbol)?.token,
        }),
        SynthLedgerQueryMsg::TokenSymbol { token } => {
            let token = deps.api.addr_validate(&token)?;
            to_json_binary(&TokenSymbolResponse {
                symbol: TOKEN_SYMBOLS.may_load(deps.storage, &token)?,
            })
        }
    }
}

pub fn contract() -> Box<dyn Contract<cosmwasm_std::Empty>> {
    Box::new(ContractWrapper::new(execute, instantiate, query))
}

fn load_synth(deps: Deps, symbol: &str) -> StdResult<Synth> {
    SYNTHS
        .may_load(deps.storage, symbol)?
        .ok_or_else(|| StdError::generic_err(format!("unknown synth {symbol}")))
}

fn mint_msg(token: &Addr, recipient: String, amount: Uint128) -> StdResult<WasmMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Mint { recipient, amount })?,
        funds: vec![],
    })
}
