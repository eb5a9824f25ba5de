#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, WasmMsg,
};
use cw2::set_contract_version;

use interface::{
    address::{contract_exists, exchange_salt, predict_address},
    asset::Asset,
    exchange::InstantiateMsg as ExchangeInstantiateMsg,
    synth_ledger::query_synth_token,
    wrapper::query_wrapper_info,
};

use crate::{
    error::{new_generic_error, ContractError},
    msg::{AddressResponse, ConfigResponse, ExecuteMsg, InstantiateMsg, QueryMsg},
    state::{load_config, Config, CONFIG},
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
    deps.querier.query_wasm_code_info(msg.exchange_code_id)?;

    for (field, symbol) in [
        ("native_reference_synth", &msg.native_reference_synth),
        ("token_reference_synth", &msg.token_reference_synth),
        ("native_denom", &msg.native_denom),
    ] {
        if symbol.trim().is_empty() {
            return Err(new_generic_error(format!("{field} must not be empty")));
        }
    }

    let config = Config {
        exchange_code_id: msg.exchange_code_id,
        synth_ledger: deps.api.addr_validate(&msg.synth_ledger)?,
        amm: msg
            .amm
            .map(|amm| deps.api.addr_validate(&amm))
            .transpose()?,
        native_denom: msg.native_denom,
        native_reference_synth: msg.native_reference_synth,
        token_reference_synth: msg.token_reference_synth,
    };
    CONFIG.save(deps.storage, &config)?;

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "initialization")
        .add_attribute("exchange_code_id", msg.exchange_code_id.to_string())
        .add_attribute("synth_ledger", config.synth_ledger)
        .add_attribute(
            "amm",
            config
                .amm
                .as_ref()
                .map(Addr::to_string)
                .unwrap_or_else(|| "none".to_string()),
        ))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let config = load_config(deps.storage)?;

    match msg {
        ExecuteMsg::CreateExchange { target_wrapper } => {
            create_exchange(deps, env, &config, target_wrapper)
        }
    }
}

fn create_exchange(
    deps: DepsMut,
    env: Env,
    config: &Config,
    target_wrapper: String,
) -> Result<Response, ContractError> {
    let target_wrapper = deps
        .api
        .addr_validate(&target_wrapper)
        .map_err(|_| ContractError::UnknownAsset {
            asset: target_wrapper.clone(),
        })?;

    let target_symbol = resolve_target_symbol(deps.as_ref(), config, &target_wrapper)?;

    let salt = exchange_salt(&target_wrapper, &config.synth_ledger, config.amm.as_ref());
    let address = predict_address(
        deps.as_ref(),
        &env.contract.address,
        config.exchange_code_id,
        &salt,
    )?;

    if contract_exists(&deps.querier, &address)? {
        return Err(ContractError::AlreadyExists {
            target_wrapper: target_wrapper.to_string(),
            address: address.to_string(),
        });
    }

    let instantiate_msg = ExchangeInstantiateMsg {
        target_wrapper: target_wrapper.to_string(),
        synth_ledger: config.synth_ledger.to_string(),
        amm: config.amm.as_ref().map(Addr::to_string),
        native_denom: config.native_denom.clone(),
        native_reference_synth: config.native_reference_synth.clone(),
        token_reference_synth: config.token_reference_synth.clone(),
    };

    let instantiate_exchange = WasmMsg::Instantiate2 {
        admin: None,
        code_id: config.exchange_code_id,
        label: format!("exchange {target_symbol}"),
        msg: to_json_binary(&instantiate_msg)?,
        funds: vec![],
        salt,
    };

    Ok(Response::new()
        .add_message(instantiate_exchange)
        .add_attribute("action", "create_exchange")
        .add_attribute("target_wrapper", target_wrapper)
        .add_attribute("target_symbol", target_symbol)
        .add_attribute("exchange", address))
}

// Exchanges only convert into synths the ledger issues.
fn resolve_target_symbol(
    deps: Deps,
    config: &Config,
    target_wrapper: &Addr,
) -> Result<String, ContractError> {
    let unknown = || ContractError::UnknownAsset {
        asset: target_wrapper.to_string(),
    };

    let wrapper_info = query_wrapper_info(&deps.querier, target_wrapper).map_err(|_| unknown())?;

    let symbol = match wrapper_info.underlying {
        Asset::Synth { symbol } => symbol,
        underlying => {
            return Err(ContractError::UnknownAsset {
                asset: underlying.key(),
            })
        }
    };

    query_synth_token(&deps.querier, &config.synth_ledger, &symbol).map_err(|_| {
        ContractError::UnknownAsset {
            asset: Asset::synth(&symbol).key(),
        }
    })?;

    Ok(symbol)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&ConfigResponse {
            config: load_config(deps.storage)?,
        }),
        QueryMsg::ExchangeAddress { target_wrapper } => {
            to_json_binary(&query_exchange_address(deps, env, target_wrapper)?)
        }
    }
}

fn query_exchange_address(
    deps: Deps,
    env: Env,
    target_wrapper: String,
) -> StdResult<AddressResponse> {
    let config = load_config(deps.storage)?;
    let target_wrapper = deps.api.addr_validate(&target_wrapper)?;

    let address = predict_address(
        deps,
        &env.contract.address,
        config.exchange_code_id,
        &exchange_salt(&target_wrapper, &config.synth_ledger, config.amm.as_ref()),
    )?;

    Ok(AddressResponse {
        exists: contract_exists(&deps.querier, &address)?,
        address,
    })
}
