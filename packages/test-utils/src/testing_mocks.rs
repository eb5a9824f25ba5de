use std::{cell::RefCell, collections::HashMap, rc::Rc};

use cosmwasm_std::{
    testing::{MockApi, MockQuerier, MockStorage},
    to_json_binary, Addr, Binary, Checksum, ContractResult, CustomQuery, OwnedDeps,
    QuerierResult, StdResult, SystemError, SystemResult, WasmQuery,
};
use serde::Serialize;

pub type WasmQueryFunc = Box<dyn Fn(&WasmQuery) -> QuerierResult>;

#[derive(Clone)]
pub struct MockWasmQuerier {
    contract_mocks: Rc<RefCell<HashMap<String, WasmQueryFunc>>>,
    code_checksums: Rc<RefCell<HashMap<u64, Checksum>>>,
}

impl MockWasmQuerier {
    pub fn new(contract_mocks: HashMap<String, WasmQueryFunc>) -> Self {
        Self {
            contract_mocks: Rc::new(RefCell::new(contract_mocks)),
            code_checksums: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn insert_mock(&self, mock: (String, WasmQueryFunc)) {
        self.contract_mocks.borrow_mut().insert(mock.0, mock.1);
    }

    /// Registers a stored code so that code info queries for `code_id` succeed.
    pub fn insert_code(&self, code_id: u64) -> Checksum {
        let checksum = mock_checksum(code_id);
        self.code_checksums.borrow_mut().insert(code_id, checksum);
        checksum
    }

    pub fn handler(&self, query: &WasmQuery) -> QuerierResult {
        let contract_addr = match query {
            WasmQuery::Smart {
                contract_addr,
                msg: _,
            } => contract_addr.clone(),
            WasmQuery::Raw {
                contract_addr,
                key: _,
            } => contract_addr.clone(),
            WasmQuery::ContractInfo { contract_addr } => contract_addr.clone(),
            WasmQuery::CodeInfo { code_id } => return self.code_info(*code_id),
            _ => panic!("unsupported query type"),
        };

        let contract_mocks = self.contract_mocks.borrow();
        match contract_mocks.get(&contract_addr) {
            Some(handler) => (handler)(query),
            // Unknown addresses behave like accounts without a contract
            None => SystemResult::Err(SystemError::NoSuchContract {
                addr: contract_addr,
            }),
        }
    }

    fn code_info(&self, code_id: u64) -> QuerierResult {
        let code_checksums = self.code_checksums.borrow();
        let Some(checksum) = code_checksums.get(&code_id) else {
            return SystemResult::Err(SystemError::NoSuchCode { code_id });
        };

        json_querier_result(&CodeInfoJson {
            code_id,
            creator: "creator".to_string(),
            checksum: checksum.to_hex(),
        })
    }
}

pub fn update_contract_mock<C: CustomQuery>(
    deps: &mut OwnedDeps<MockStorage, MockApi, MockQuerier, C>,
    wasm_querier: &MockWasmQuerier,
    mock: (String, WasmQueryFunc),
) {
    // Cloning allows us to have a single instance of the `contract_mocks` referenced by multiple MockWasmQueriers.
    // Since `contract_mocks` is Rc struct, this way we can update only those mocks that we need to change, without
    // needing to re-instantiate the ones that didn't change.
    let querier_for_deps = wasm_querier.clone();
    querier_for_deps.insert_mock(mock);
    deps.querier
        .update_wasm(move |q| querier_for_deps.handler(q));
}

/// Installs `wasm_querier` as the wasm query handler of `deps`.
pub fn install_wasm_querier<C: CustomQuery>(
    deps: &mut OwnedDeps<MockStorage, MockApi, MockQuerier, C>,
    wasm_querier: &MockWasmQuerier,
) {
    let querier_for_deps = wasm_querier.clone();
    deps.querier
        .update_wasm(move |q| querier_for_deps.handler(q));
}

/// Mocks a contract that answers smart queries with `smart_query_handler`.
/// Contract info queries for the same address succeed, so the mocked contract
/// is also visible to existence checks.
pub fn setup_contract_smart_query_mock<T>(
    contract: Addr,
    smart_query_handler: T,
) -> (String, WasmQueryFunc)
where
    T: Fn(&Binary) -> StdResult<Binary> + 'static,
{
    let contract_addr = contract.to_string();

    let response = Box::new(move |query: &WasmQuery| match query {
        WasmQuery::Smart { contract_addr, msg } => {
            if contract_addr != &contract.to_string() {
                return SystemResult::Err(SystemError::UnsupportedRequest {
                    kind: "unexpected contract address in smart query contract mock".to_string(),
                });
            }

            let response = match smart_query_handler(msg) {
                Ok(response) => response,
                Err(e) => {
                    return SystemResult::Ok(ContractResult::Err(format!(
                        "error returned by contract mock: {e}"
                    )));
                }
            };

            SystemResult::Ok(ContractResult::Ok(response))
        }
        WasmQuery::ContractInfo { contract_addr } => json_querier_result(&ContractInfoJson {
            code_id: 1,
            creator: contract_addr.clone(),
            admin: None,
            pinned: false,
            ibc_port: None,
        }),
        _ => SystemResult::Err(SystemError::UnsupportedRequest {
            kind: "only smart and contract info queries are supported in this mock".to_string(),
        }),
    });

    (contract_addr, response)
}

/// Mocks a contract that exists but does not answer any smart query.
pub fn setup_contract_info_mock(contract: Addr) -> (String, WasmQueryFunc) {
    setup_contract_smart_query_mock(contract, |_| {
        Err(cosmwasm_std::StdError::generic_err("unknown query"))
    })
}

/// Deterministic checksum standing in for the hash of the wasm blob stored as `code_id`.
pub fn mock_checksum(code_id: u64) -> Checksum {
    Checksum::generate(format!("mock code {code_id}").as_bytes())
}

fn json_querier_result<T: Serialize>(response: &T) -> QuerierResult {
    match to_json_binary(response) {
        Ok(binary) => SystemResult::Ok(ContractResult::Ok(binary)),
        Err(e) => SystemResult::Err(SystemError::InvalidResponse {
            error: e.to_string(),
            response: Binary::default(),
        }),
    }
}

// Serialized forms of the non-exhaustive wasm query responses
#[derive(Serialize)]
struct ContractInfoJson {
    code_id: u64,
    creator: String,
    admin: Option<String>,
    pinned: bool,
    ibc_port: Option<String>,
}

#[derive(Serialize)]
struct CodeInfoJson {
    code_id: u64,
    creator: String,
    checksum: String,
}
