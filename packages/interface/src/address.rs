use cosmwasm_std::{
    instantiate2_address, to_json_vec, Addr, Binary, ContractResult, Deps, Empty, QuerierWrapper,
    QueryRequest, StdError, StdResult, SystemError, SystemResult, WasmQuery,
};
use sha2::{Digest, Sha256};

use crate::asset::Asset;

const WRAPPER_SALT_DOMAIN: &[u8] = b"wrapper";
const EXCHANGE_SALT_DOMAIN: &[u8] = b"exchange";

/// Salt used by the wrapper factory when deploying the wrapper of `asset`.
pub fn wrapper_salt(asset: &Asset) -> Binary {
    salt(WRAPPER_SALT_DOMAIN, &[asset.key().as_bytes()])
}

/// Salt used by the exchange factory when deploying the exchange of `target_wrapper`.
/// The factory's price sources are part of the salt, so two factories configured
/// with different sources never derive the same exchange.
pub fn exchange_salt(target_wrapper: &Addr, synth_ledger: &Addr, amm: Option<&Addr>) -> Binary {
    let amm = amm.map(|amm| amm.as_bytes()).unwrap_or_default();

    salt(
        EXCHANGE_SALT_DOMAIN,
        &[target_wrapper.as_bytes(), synth_ledger.as_bytes(), amm],
    )
}

// Each part is length-prefixed so that ("ab", "c") and ("a", "bc") hash differently.
fn salt(domain: &[u8], parts: &[&[u8]]) -> Binary {
    let mut hasher = Sha256::new();
    hasher.update(domain);

    for part in parts {
        hasher.update((part.len() as u64).to_be_bytes());
        hasher.update(part);
    }

    Binary::from(hasher.finalize().to_vec())
}

/// Computes the address that `instantiate2` assigns to an instance of `code_id`
/// created by `creator` with `salt`. The result does not depend on whether the
/// instance has been deployed yet.
pub fn predict_address(deps: Deps, creator: &Addr, code_id: u64, salt: &Binary) -> StdResult<Addr> {
    let checksum = deps.querier.query_wasm_code_info(code_id)?.checksum;
    let canonical_creator = deps.api.addr_canonicalize(creator.as_str())?;

    let canonical_address = instantiate2_address(checksum.as_slice(), &canonical_creator, salt)
        .map_err(|e| StdError::generic_err(format!("failed to derive instance address: {e}")))?;

    deps.api.addr_humanize(&canonical_address)
}

/// Returns true if a contract is instantiated at `address`. Only an answer that the
/// address holds no contract counts as absence; any other querier failure is returned.
pub fn contract_exists(querier: &QuerierWrapper, address: &Addr) -> StdResult<bool> {
    let request: QueryRequest<Empty> = WasmQuery::ContractInfo {
        contract_addr: address.to_string(),
    }
    .into();

    match querier.raw_query(&to_json_vec(&request)?) {
        SystemResult::Ok(ContractResult::Ok(_)) => Ok(true),
        // The chain reports a missing contract as a system error, cw-multi-test as a failed lookup
        SystemResult::Err(SystemError::NoSuchContract { .. })
        | SystemResult::Ok(ContractResult::Err(_)) => Ok(false),
        SystemResult::Err(err) => Err(StdError::generic_err(format!(
            "querying contract info of {address} failed: {err}"
        ))),
    }
}
