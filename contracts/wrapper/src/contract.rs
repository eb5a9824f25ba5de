#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Binary, Coin, CosmosMsg, Deps, DepsMut, Env, MessageInfo,
    QuerierWrapper, Response, StdResult, Storage, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw20::{AllowanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};

use interface::{
    address::contract_exists,
    asset::Asset,
    synth_ledger::query_synth_token,
    wrapper::{accepts_notifications, WrappedReceiveMsg},
};

use crate::{
    error::ContractError,
    msg::{
        BalanceResponse, ExecuteMsg, InstantiateMsg, QueryMsg, ReserveResponse,
        TokenInfoResponse, WrapperInfoResponse,
    },
    state::{
        load_balance, load_config, Config, TokenInfo, BALANCES, CONFIG, TOKEN_INFO, TOTAL_WRAPPED,
    },
};

const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const NATIVE_DECIMALS: u8 = 6;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let underlying = msg.underlying.validate(deps.api)?;

    let (underlying_token, underlying_symbol, decimals) = match &underlying {
        Asset::Native { denom } => (None, denom.clone(), NATIVE_DECIMALS),
        Asset::Token { address } => {
            let token = deps.api.addr_validate(address)?;
            let token_info = query_cw20_token_info(deps.as_ref(), &token)?;

            (Some(token), token_info.symbol, token_info.decimals)
        }
        Asset::Synth { symbol } => {
            let synth_ledger = match msg.synth_ledger.as_deref() {
                Some(synth_ledger) => deps.api.addr_validate(synth_ledger)?,
                None => {
                    return Err(ContractError::UnknownAsset {
                        asset: underlying.key(),
                    })
                }
            };

            let token = query_synth_token(&deps.querier, &synth_ledger, symbol).map_err(|_| {
                ContractError::UnknownAsset {
                    asset: underlying.key(),
                }
            })?;
            let token_info = query_cw20_token_info(deps.as_ref(), &token)?;

            (Some(token), symbol.clone(), token_info.decimals)
        }
    };

    CONFIG.save(
        deps.storage,
        &Config {
            underlying: underlying.clone(),
            underlying_token,
            factory: info.sender.clone(),
        },
    )?;

    TOKEN_INFO.save(
        deps.storage,
        &TokenInfo {
            name: format!("Wrapped {underlying_symbol}"),
            symbol: format!("w{underlying_symbol}"),
            decimals,
        },
    )?;

    TOTAL_WRAPPED.save(deps.storage, &Uint128::zero())?;

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "initialization")
        .add_attribute("underlying", underlying.key())
        .add_attribute("factory", info.sender))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let config = load_config(deps.storage)?;

    match msg {
        ExecuteMsg::Wrap { amount, recipient } => {
            wrap(deps, env, info, &config, amount, recipient)
        }
        ExecuteMsg::Unwrap { amount } => unwrap(deps, info, &config, amount),
        ExecuteMsg::Transfer { recipient, amount } => transfer(deps, info, recipient, amount),
        ExecuteMsg::Send {
            contract,
            amount,
            msg,
        } => send(deps, info, contract, amount, msg),
    }
}

// Pulls `amount` of the underlying into the reserve and mints the same amount of wrapped tokens.
fn wrap(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    config: &Config,
    amount: Uint128,
    recipient: Option<String>,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }

    let recipient = match recipient {
        Some(recipient) => deps.api.addr_validate(&recipient)?,
        None => info.sender.clone(),
    };

    let mut response = Response::new();

    match (&config.underlying, &config.underlying_token) {
        (Asset::Native { denom }, _) => {
            let paid = cw_utils::may_pay(&info, denom)?;

            if paid < amount {
                return Err(ContractError::InsufficientAuthorization {
                    required: amount,
                    authorized: paid,
                });
            }

            if paid > amount {
                return Err(ContractError::InvalidFunds {
                    expected: amount,
                    received: paid,
                });
            }
        }
        (_, Some(token)) => {
            cw_utils::nonpayable(&info)?;

            let allowance: AllowanceResponse = deps.querier.query_wasm_smart(
                token,
                &Cw20QueryMsg::Allowance {
                    owner: info.sender.to_string(),
                    spender: env.contract.address.to_string(),
                },
            )?;

            if allowance.allowance < amount {
                return Err(ContractError::InsufficientAuthorization {
                    required: amount,
                    authorized: allowance.allowance,
                });
            }

            response = response.add_message(WasmMsg::Execute {
                contract_addr: token.to_string(),
                msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                    owner: info.sender.to_string(),
                    recipient: env.contract.address.to_string(),
                    amount,
                })?,
                funds: vec![],
            });
        }
        (asset, None) => {
            return Err(ContractError::UnknownAsset { asset: asset.key() });
        }
    }

    credit(deps.storage, &recipient, amount)?;
    TOTAL_WRAPPED.update(deps.storage, |total| -> Result<_, ContractError> {
        Ok(total.checked_add(amount)?)
    })?;

    // Minting to a receiver contract pushes the same notification a transfer does
    if let Some(notify) = notification(&deps.querier, &info.sender, &recipient, amount)? {
        response = response
            .add_message(notify)
            .add_attribute("notified", "true");
    }

    Ok(response
        .add_attribute("action", "wrap")
        .add_attribute("sender", info.sender)
        .add_attribute("recipient", recipient)
        .add_attribute("amount", amount))
}

// Burns `amount` of the sender's wrapped tokens and releases the same amount of the underlying.
fn unwrap(
    deps: DepsMut,
    info: MessageInfo,
    config: &Config,
    amount: Uint128,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }

    debit(deps.storage, &info.sender, amount)?;
    TOTAL_WRAPPED.update(deps.storage, |total| -> Result<_, ContractError> {
        Ok(total.checked_sub(amount)?)
    })?;

    let release: CosmosMsg = match (&config.underlying, &config.underlying_token) {
        (Asset::Native { denom }, _) => BankMsg::Send {
            to_address: info.sender.to_string(),
            amount: vec![Coin::new(amount, denom)],
        }
        .into(),
        (_, Some(token)) => WasmMsg::Execute {
            contract_addr: token.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                recipient: info.sender.to_string(),
                amount,
            })?,
            funds: vec![],
        }
        .into(),
        (asset, None) => {
            return Err(ContractError::UnknownAsset { asset: asset.key() });
        }
    };

    Ok(Response::new()
        .add_message(release)
        .add_attribute("action", "unwrap")
        .add_attribute("sender", info.sender)
        .add_attribute("amount", amount))
}

/// Moves wrapped tokens. Contracts that declare support for notifications are
/// notified after being credited; the notification runs in the same transaction,
/// so a failing recipient reverts the transfer as well.
fn transfer(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let recipient = deps.api.addr_validate(&recipient)?;

    move_balance(deps.storage, &info.sender, &recipient, amount)?;

    let mut response = Response::new()
        .add_attribute("action", "transfer")
        .add_attribute("from", info.sender.clone())
        .add_attribute("to", recipient.clone())
        .add_attribute("amount", amount);

    if let Some(notify) = notification(&deps.querier, &info.sender, &recipient, amount)? {
        response = response
            .add_message(notify)
            .add_attribute("notified", "true");
    }

    Ok(response)
}

// Notification for `recipient`, if it is a contract that declares support for notifications
fn notification(
    querier: &QuerierWrapper,
    sender: &Addr,
    recipient: &Addr,
    amount: Uint128,
) -> StdResult<Option<CosmosMsg>> {
    let notify = contract_exists(querier, recipient)? && accepts_notifications(querier, recipient);

    if !notify {
        return Ok(None);
    }

    let receive_msg = WrappedReceiveMsg {
        sender: sender.to_string(),
        amount,
        msg: Binary::default(),
    };

    receive_msg.into_cosmos_msg(recipient).map(Some)
}

fn send(
    deps: DepsMut,
    info: MessageInfo,
    contract: String,
    amount: Uint128,
    msg: Binary,
) -> Result<Response, ContractError> {
    let contract = deps.api.addr_validate(&contract)?;

    if !contract_exists(&deps.querier, &contract)? {
        return Err(ContractError::NotAContract {
            address: contract.to_string(),
        });
    }

    move_balance(deps.storage, &info.sender, &contract, amount)?;

    let receive_msg = WrappedReceiveMsg {
        sender: info.sender.to_string(),
        amount,
        msg,
    };

    Ok(Response::new()
        .add_message(receive_msg.into_cosmos_msg(contract.clone())?)
        .add_attribute("action", "send")
        .add_attribute("from", info.sender)
        .add_attribute("to", contract)
        .add_attribute("amount", amount))
}

fn move_balance(
    storage: &mut dyn Storage,
    from: &Addr,
    to: &Addr,
    amount: Uint128,
) -> Result<(), ContractError> {
    debit(storage, from, amount)?;
    credit(storage, to, amount)
}

fn debit(
    storage: &mut dyn Storage,
    address: &Addr,
    amount: Uint128,
) -> Result<(), ContractError> {
    let available = load_balance(storage, address)?;

    if available < amount {
        return Err(ContractError::InsufficientBalance {
            required: amount,
            available,
        });
    }

    BALANCES.save(storage, address, &(available - amount))?;

    Ok(())
}

fn credit(
    storage: &mut dyn Storage,
    address: &Addr,
    amount: Uint128,
) -> Result<(), ContractError> {
    let balance = load_balance(storage, address)?.checked_add(amount)?;
    BALANCES.save(storage, address, &balance)?;

    Ok(())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::WrapperInfo {} => to_json_binary(&query_wrapper_info(deps)?),
        QueryMsg::Balance { address } => {
            let address = deps.api.addr_validate(&address)?;
            to_json_binary(&BalanceResponse {
                balance: load_balance(deps.storage, &address)?,
            })
        }
        QueryMsg::TokenInfo {} => {
            let token_info = TOKEN_INFO.load(deps.storage)?;
            to_json_binary(&TokenInfoResponse {
                name: token_info.name,
                symbol: token_info.symbol,
                decimals: token_info.decimals,
                total_supply: TOTAL_WRAPPED.load(deps.storage)?,
            })
        }
        QueryMsg::Reserve {} => to_json_binary(&query_reserve(deps, env)?),
    }
}

fn query_wrapper_info(deps: Deps) -> StdResult<WrapperInfoResponse> {
    let config = load_config(deps.storage)?;

    Ok(WrapperInfoResponse {
        underlying: config.underlying,
        underlying_token: config.underlying_token,
        factory: config.factory,
        total_wrapped: TOTAL_WRAPPED.load(deps.storage)?,
    })
}

// Live balance of the underlying held by this contract
fn query_reserve(deps: Deps, env: Env) -> StdResult<ReserveResponse> {
    let config = load_config(deps.storage)?;

    let reserve = match (&config.underlying, &config.underlying_token) {
        (Asset::Native { denom }, _) => {
            deps.querier
                .query_balance(&env.contract.address, denom)?
                .amount
        }
        (_, Some(token)) => {
            let response: BalanceResponse = deps.querier.query_wasm_smart(
                token,
                &Cw20QueryMsg::Balance {
                    address: env.contract.address.to_string(),
                },
            )?;
            response.balance
        }
        (_, None) => Uint128::zero(),
    };

    Ok(ReserveResponse { reserve })
}

fn query_cw20_token_info(deps: Deps, token: &Addr) -> StdResult<TokenInfoResponse> {
    deps.querier
        .query_wasm_smart(token, &Cw20QueryMsg::TokenInfo {})
}
