#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, WasmMsg,
};
use cw2::set_contract_version;

use interface::{
    address::{contract_exists, predict_address, wrapper_salt},
    asset::Asset,
    synth_ledger::query_token_symbol,
    wrapper::InstantiateMsg as WrapperInstantiateMsg,
};

use crate::{
    error::ContractError,
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
    // Fails early if the wrapper code is not stored on chain
    deps.querier.query_wasm_code_info(msg.wrapper_code_id)?;

    let synth_ledger = msg
        .synth_ledger
        .map(|synth_ledger| deps.api.addr_validate(&synth_ledger))
        .transpose()?;

    let config = Config {
        wrapper_code_id: msg.wrapper_code_id,
        synth_ledger,
    };
    CONFIG.save(deps.storage, &config)?;

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "initialization")
        .add_attribute("wrapper_code_id", msg.wrapper_code_id.to_string()))
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
        ExecuteMsg::CreateWrapper { asset } => create_wrapper(deps, env, &config, asset),
    }
}

// Deploys the wrapper of `asset` at its derived address. Creation is fail-fast:
// if a contract already lives at that address the whole transaction is rejected.
fn create_wrapper(
    deps: DepsMut,
    env: Env,
    config: &Config,
    asset: Asset,
) -> Result<Response, ContractError> {
    let asset = asset
        .validate(deps.api)
        .map_err(|_| ContractError::UnknownAsset { asset: asset.key() })?;

    if asset.is_synth() && config.synth_ledger.is_none() {
        return Err(ContractError::UnknownAsset { asset: asset.key() });
    }

    let asset = canonical_asset(deps.as_ref(), config, asset)?;

    let salt = wrapper_salt(&asset);
    let address = predict_address(
        deps.as_ref(),
        &env.contract.address,
        config.wrapper_code_id,
        &salt,
    )?;

    if contract_exists(&deps.querier, &address)? {
        return Err(ContractError::AlreadyExists {
            asset: asset.key(),
            address: address.to_string(),
        });
    }

    let instantiate_msg = WrapperInstantiateMsg {
        underlying: asset.clone(),
        synth_ledger: config.synth_ledger.as_ref().map(Addr::to_string),
    };

    let instantiate_wrapper = WasmMsg::Instantiate2 {
        admin: None,
        code_id: config.wrapper_code_id,
        label: format!("wrapper {}", asset.key()),
        msg: to_json_binary(&instantiate_msg)?,
        funds: vec![],
        salt,
    };

    Ok(Response::new()
        .add_message(instantiate_wrapper)
        .add_attribute("action", "create_wrapper")
        .add_attribute("asset", asset.key())
        .add_attribute("wrapper", address))
}

// A CW20 issued by the ledger is the synth itself, so both spellings share one wrapper.
fn canonical_asset(deps: Deps, config: &Config, asset: Asset) -> StdResult<Asset> {
    let symbol = match (&asset, &config.synth_ledger) {
        (Asset::Token { address }, Some(synth_ledger)) => {
            query_token_symbol(&deps.querier, synth_ledger, address)?
        }
        _ => None,
    };

    Ok(symbol.map(Asset::synth).unwrap_or(asset))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&ConfigResponse {
            config: load_config(deps.storage)?,
        }),
        QueryMsg::WrapperAddress { asset } => {
            to_json_binary(&query_wrapper_address(deps, env, asset)?)
        }
    }
}

fn query_wrapper_address(deps: Deps, env: Env, asset: Asset) -> StdResult<AddressResponse> {
    let config = load_config(deps.storage)?;
    let asset = canonical_asset(deps, &config, asset.validate(deps.api)?)?;

    let address = predict_address(
        deps,
        &env.contract.address,
        config.wrapper_code_id,
        &wrapper_salt(&asset),
    )?;

    Ok(AddressResponse {
        exists: contract_exists(&deps.querier, &address)?,
        address,
    })
}
