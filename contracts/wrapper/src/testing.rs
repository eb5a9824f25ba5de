use std::collections::HashMap;

use cosmwasm_std::{
    coin, from_json,
    testing::{mock_dependencies, mock_env, MockApi, MockQuerier, MockStorage},
    to_json_binary, Addr, BankMsg, Binary, CosmosMsg, Empty, Env, OwnedDeps, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;
use interface::{asset::Asset, wrapper::ReceiverExecuteMsg};
use test_utils::{
    testing_mocks::{
        install_wasm_querier, setup_contract_info_mock, setup_contract_smart_query_mock,
        MockWasmQuerier,
    },
    utils::get_message_info,
};

use crate::{
    error::ContractError,
    execute, instantiate,
    msg::{BalanceResponse, TokenInfoResponse, WrapperInfoResponse},
    query,
    testing_mocks::{cw20_mock, receiver_mock, synth_ledger_mock},
    ExecuteMsg, InstantiateMsg, QueryMsg,
};

const FACTORY: &str = "factory";
const USER: &str = "user";
const OTHER_USER: &str = "other_user";
const TOKEN: &str = "token";
const SYNTH_LEDGER: &str = "synth_ledger";
const RECEIVER: &str = "receiver";
const NATIVE_DENOM: &str = "uatom";

type MockDeps = OwnedDeps<MockStorage, MockApi, MockQuerier, Empty>;

fn setup_native_wrapper() -> (MockDeps, Env) {
    let (mut deps, env) = (mock_dependencies(), mock_env());

    let info = get_message_info(&deps.api, FACTORY, &[]);
    instantiate(
        deps.as_mut(),
        env.clone(),
        info,
        InstantiateMsg {
            underlying: Asset::native(NATIVE_DENOM),
            synth_ledger: None,
        },
    )
    .unwrap();

    (deps, env)
}

fn setup_token_wrapper(allowance: u128) -> (MockDeps, Env, Addr) {
    let (mut deps, env) = (mock_dependencies(), mock_env());
    let token = deps.api.addr_make(TOKEN);

    let wasm_querier = MockWasmQuerier::new(HashMap::from_iter([
        setup_contract_smart_query_mock(
            token.clone(),
            cw20_mock("TKN", Uint128::new(allowance), Uint128::zero()),
        ),
    ]));
    install_wasm_querier(&mut deps, &wasm_querier);

    let info = get_message_info(&deps.api, FACTORY, &[]);
    instantiate(
        deps.as_mut(),
        env.clone(),
        info,
        InstantiateMsg {
            underlying: Asset::token(token.to_string()),
            synth_ledger: None,
        },
    )
    .unwrap();

    (deps, env, token)
}

fn wrap_native(deps: &mut MockDeps, env: &Env, sender: &str, amount: u128) {
    let info = get_message_info(&deps.api, sender, &[coin(amount, NATIVE_DENOM)]);
    execute(
        deps.as_mut(),
        env.clone(),
        info,
        ExecuteMsg::Wrap {
            amount: Uint128::new(amount),
            recipient: None,
        },
    )
    .unwrap();
}

fn query_balance(deps: &MockDeps, env: &Env, address: &Addr) -> Uint128 {
    let response: BalanceResponse = from_json(
        query(
            deps.as_ref(),
            env.clone(),
            QueryMsg::Balance {
                address: address.to_string(),
            },
        )
        .unwrap(),
    )
    .unwrap();

    response.balance
}

fn query_total_wrapped(deps: &MockDeps, env: &Env) -> Uint128 {
    let response: WrapperInfoResponse =
        from_json(query(deps.as_ref(), env.clone(), QueryMsg::WrapperInfo {}).unwrap()).unwrap();

    response.total_wrapped
}

#[test]
fn instantiate_native_wrapper_test() {
    let (deps, env) = setup_native_wrapper();

    let info: WrapperInfoResponse =
        from_json(query(deps.as_ref(), env.clone(), QueryMsg::WrapperInfo {}).unwrap()).unwrap();
    assert_eq!(info.underlying, Asset::native(NATIVE_DENOM));
    assert_eq!(info.underlying_token, None);
    assert_eq!(info.factory, deps.api.addr_make(FACTORY));
    assert_eq!(info.total_wrapped, Uint128::zero());

    let token_info: TokenInfoResponse =
        from_json(query(deps.as_ref(), env, QueryMsg::TokenInfo {}).unwrap()).unwrap();
    assert_eq!(token_info.symbol, "wuatom");
    assert_eq!(token_info.decimals, 6);
}

#[test]
fn instantiate_synth_wrapper_test() {
    let (mut deps, env) = (mock_dependencies(), mock_env());
    let info = get_message_info(&deps.api, FACTORY, &[]);

    let err = instantiate(
        deps.as_mut(),
        env.clone(),
        info.clone(),
        InstantiateMsg {
            underlying: Asset::synth("sUSD"),
            synth_ledger: None,
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::UnknownAsset {
            asset: "synth:sUSD".to_string()
        }
    );

    let synth_ledger = deps.api.addr_make(SYNTH_LEDGER);
    let susd_token = deps.api.addr_make("susd_token");

    let wasm_querier = MockWasmQuerier::new(HashMap::from_iter([
        setup_contract_smart_query_mock(
            synth_ledger.clone(),
            synth_ledger_mock("sUSD", susd_token.clone()),
        ),
        setup_contract_smart_query_mock(
            susd_token.clone(),
            cw20_mock("sUSD", Uint128::zero(), Uint128::zero()),
        ),
    ]));
    install_wasm_querier(&mut deps, &wasm_querier);

    let err = instantiate(
        deps.as_mut(),
        env.clone(),
        info.clone(),
        InstantiateMsg {
            underlying: Asset::synth("sBTC"),
            synth_ledger: Some(synth_ledger.to_string()),
        },
    )
    .unwrap_err();
    assert!(matches!(err, ContractError::UnknownAsset { .. }));

    instantiate(
        deps.as_mut(),
        env.clone(),
        info,
        InstantiateMsg {
            underlying: Asset::synth("sUSD"),
            synth_ledger: Some(synth_ledger.to_string()),
        },
    )
    .unwrap();

    let wrapper_info: WrapperInfoResponse =
        from_json(query(deps.as_ref(), env.clone(), QueryMsg::WrapperInfo {}).unwrap()).unwrap();
    assert_eq!(wrapper_info.underlying_token, Some(susd_token));

    let token_info: TokenInfoResponse =
        from_json(query(deps.as_ref(), env, QueryMsg::TokenInfo {}).unwrap()).unwrap();
    assert_eq!(token_info.name, "Wrapped sUSD");
    assert_eq!(token_info.symbol, "wsUSD");
    assert_eq!(token_info.decimals, 18);
}

#[test]
fn wrap_native_test() {
    let (mut deps, env) = setup_native_wrapper();
    let user = deps.api.addr_make(USER);

    let info = get_message_info(&deps.api, USER, &[coin(50, NATIVE_DENOM)]);
    let err = execute(
        deps.as_mut(),
        env.clone(),
        info,
        ExecuteMsg::Wrap {
            amount: Uint128::new(100),
            recipient: None,
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::InsufficientAuthorization {
            required: Uint128::new(100),
            authorized: Uint128::new(50),
        }
    );

    let info = get_message_info(&deps.api, USER, &[coin(150, NATIVE_DENOM)]);
    let err = execute(
        deps.as_mut(),
        env.clone(),
        info,
        ExecuteMsg::Wrap {
            amount: Uint128::new(100),
            recipient: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ContractError::InvalidFunds { .. }));

    let info = get_message_info(&deps.api, USER, &[]);
    let err = execute(
        deps.as_mut(),
        env.clone(),
        info,
        ExecuteMsg::Wrap {
            amount: Uint128::zero(),
            recipient: None,
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::ZeroAmount {});

    wrap_native(&mut deps, &env, USER, 100);

    assert_eq!(query_balance(&deps, &env, &user), Uint128::new(100));
    assert_eq!(query_total_wrapped(&deps, &env), Uint128::new(100));
}

#[test]
fn wrap_for_recipient_test() {
    let (mut deps, env) = setup_native_wrapper();
    let user = deps.api.addr_make(USER);
    let other_user = deps.api.addr_make(OTHER_USER);

    let info = get_message_info(&deps.api, USER, &[coin(40, NATIVE_DENOM)]);
    execute(
        deps.as_mut(),
        env.clone(),
        info,
        ExecuteMsg::Wrap {
            amount: Uint128::new(40),
            recipient: Some(other_user.to_string()),
        },
    )
    .unwrap();

    assert_eq!(query_balance(&deps, &env, &user), Uint128::zero());
    assert_eq!(query_balance(&deps, &env, &other_user), Uint128::new(40));
}

#[test]
fn wrap_token_test() {
    let (mut deps, env, token) = setup_token_wrapper(70);
    let user = deps.api.addr_make(USER);

    let info = get_message_info(&deps.api, USER, &[]);
    let err = execute(
        deps.as_mut(),
        env.clone(),
        info,
        ExecuteMsg::Wrap {
            amount: Uint128::new(100),
            recipient: None,
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::InsufficientAuthorization {
            required: Uint128::new(100),
            authorized: Uint128::new(70),
        }
    );
    assert_eq!(query_total_wrapped(&deps, &env), Uint128::zero());

    let info = get_message_info(&deps.api, USER, &[]);
    let res = execute(
        deps.as_mut(),
        env.clone(),
        info,
        ExecuteMsg::Wrap {
            amount: Uint128::new(70),
            recipient: None,
        },
    )
    .unwrap();

    assert_eq!(res.messages.len(), 1);
    assert_eq!(
        res.messages[0].msg,
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: token.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                owner: user.to_string(),
                recipient: env.contract.address.to_string(),
                amount: Uint128::new(70),
            })
            .unwrap(),
            funds: vec![],
        })
    );

    assert_eq!(query_balance(&deps, &env, &user), Uint128::new(70));
    assert_eq!(query_total_wrapped(&deps, &env), Uint128::new(70));
}

#[test]
fn unwrap_test() {
    let (mut deps, env) = setup_native_wrapper();
    let user = deps.api.addr_make(USER);

    wrap_native(&mut deps, &env, USER, 100);

    let info = get_message_info(&deps.api, USER, &[]);
    let err = execute(
        deps.as_mut(),
        env.clone(),
        info,
        ExecuteMsg::Unwrap {
            amount: Uint128::new(101),
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::InsufficientBalance {
            required: Uint128::new(101),
            available: Uint128::new(100),
        }
    );

    let info = get_message_info(&deps.api, USER, &[]);
    let res = execute(
        deps.as_mut(),
        env.clone(),
        info,
        ExecuteMsg::Unwrap {
            amount: Uint128::new(60),
        },
    )
    .unwrap();

    assert_eq!(
        res.messages[0].msg,
        CosmosMsg::Bank(BankMsg::Send {
            to_address: user.to_string(),
            amount: vec![coin(60, NATIVE_DENOM)],
        })
    );
    assert_eq!(query_balance(&deps, &env, &user), Uint128::new(40));
    assert_eq!(query_total_wrapped(&deps, &env), Uint128::new(40));
}

#[test]
fn unwrap_token_test() {
    let (mut deps, env, token) = setup_token_wrapper(100);
    let user = deps.api.addr_make(USER);

    let info = get_message_info(&deps.api, USER, &[]);
    execute(
        deps.as_mut(),
        env.clone(),
        info,
        ExecuteMsg::Wrap {
            amount: Uint128::new(100),
            recipient: None,
        },
    )
    .unwrap();

    let info = get_message_info(&deps.api, USER, &[]);
    let res = execute(
        deps.as_mut(),
        env.clone(),
        info,
        ExecuteMsg::Unwrap {
            amount: Uint128::new(100),
        },
    )
    .unwrap();

    assert_eq!(
        res.messages[0].msg,
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: token.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                recipient: user.to_string(),
                amount: Uint128::new(100),
            })
            .unwrap(),
            funds: vec![],
        })
    );
    assert_eq!(query_total_wrapped(&deps, &env), Uint128::zero());
}

#[test]
fn transfer_test() {
    let (mut deps, env) = setup_native_wrapper();
    let user = deps.api.addr_make(USER);
    let other_user = deps.api.addr_make(OTHER_USER);

    wrap_native(&mut deps, &env, USER, 100);

    let info = get_message_info(&deps.api, USER, &[]);
    let err = execute(
        deps.as_mut(),
        env.clone(),
        info,
        ExecuteMsg::Transfer {
            recipient: other_user.to_string(),
            amount: Uint128::new(101),
        },
    )
    .unwrap_err();
    assert!(matches!(err, ContractError::InsufficientBalance { .. }));

    // Accounts without a contract are never notified
    let info = get_message_info(&deps.api, USER, &[]);
    let res = execute(
        deps.as_mut(),
        env.clone(),
        info,
        ExecuteMsg::Transfer {
            recipient: other_user.to_string(),
            amount: Uint128::new(30),
        },
    )
    .unwrap();
    assert!(res.messages.is_empty());

    assert_eq!(query_balance(&deps, &env, &user), Uint128::new(70));
    assert_eq!(query_balance(&deps, &env, &other_user), Uint128::new(30));
    assert_eq!(query_total_wrapped(&deps, &env), Uint128::new(100));

    // Zero transfers are allowed
    let info = get_message_info(&deps.api, USER, &[]);
    execute(
        deps.as_mut(),
        env.clone(),
        info,
        ExecuteMsg::Transfer {
            recipient: other_user.to_string(),
            amount: Uint128::zero(),
        },
    )
    .unwrap();
}

#[test]
fn transfer_notifies_accepting_contract_test() {
    let (mut deps, env) = setup_native_wrapper();
    let user = deps.api.addr_make(USER);
    let receiver = deps.api.addr_make(RECEIVER);
    let silent_contract = deps.api.addr_make("silent_contract");
    let refusing_contract = deps.api.addr_make("refusing_contract");

    let wasm_querier = MockWasmQuerier::new(HashMap::from_iter([
        setup_contract_smart_query_mock(receiver.clone(), receiver_mock(true)),
        setup_contract_smart_query_mock(refusing_contract.clone(), receiver_mock(false)),
        setup_contract_info_mock(silent_contract.clone()),
    ]));
    install_wasm_querier(&mut deps, &wasm_querier);

    wrap_native(&mut deps, &env, USER, 100);

    let info = get_message_info(&deps.api, USER, &[]);
    let res = execute(
        deps.as_mut(),
        env.clone(),
        info,
        ExecuteMsg::Transfer {
            recipient: receiver.to_string(),
            amount: Uint128::new(25),
        },
    )
    .unwrap();

    assert_eq!(res.messages.len(), 1);
    match &res.messages[0].msg {
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr,
            msg,
            funds,
        }) => {
            assert_eq!(contract_addr, &receiver.to_string());
            assert!(funds.is_empty());

            let ReceiverExecuteMsg::TokensReceived(receive_msg) = from_json(msg).unwrap();
            assert_eq!(receive_msg.sender, user.to_string());
            assert_eq!(receive_msg.amount, Uint128::new(25));
            assert_eq!(receive_msg.msg, Binary::default());
        }
        msg => panic!("unexpected message: {msg:?}"),
    }

    // The receiver is credited before it is notified
    assert_eq!(query_balance(&deps, &env, &receiver), Uint128::new(25));

    for contract in [silent_contract, refusing_contract] {
        let info = get_message_info(&deps.api, USER, &[]);
        let res = execute(
            deps.as_mut(),
            env.clone(),
            info,
            ExecuteMsg::Transfer {
                recipient: contract.to_string(),
                amount: Uint128::new(5),
            },
        )
        .unwrap();
        assert!(res.messages.is_empty());
    }
}

#[test]
fn wrap_notifies_accepting_recipient_test() {
    let (mut deps, env) = setup_native_wrapper();
    let user = deps.api.addr_make(USER);
    let receiver = deps.api.addr_make(RECEIVER);

    let wasm_querier = MockWasmQuerier::new(HashMap::from_iter([
        setup_contract_smart_query_mock(receiver.clone(), receiver_mock(true)),
    ]));
    install_wasm_querier(&mut deps, &wasm_querier);

    let info = get_message_info(&deps.api, USER, &[coin(40, NATIVE_DENOM)]);
    let res = execute(
        deps.as_mut(),
        env.clone(),
        info,
        ExecuteMsg::Wrap {
            amount: Uint128::new(40),
            recipient: Some(receiver.to_string()),
        },
    )
    .unwrap();

    assert_eq!(res.messages.len(), 1);
    match &res.messages[0].msg {
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr, msg, ..
        }) => {
            assert_eq!(contract_addr, &receiver.to_string());

            let ReceiverExecuteMsg::TokensReceived(receive_msg) = from_json(msg).unwrap();
            assert_eq!(receive_msg.sender, user.to_string());
            assert_eq!(receive_msg.amount, Uint128::new(40));
        }
        msg => panic!("unexpected message: {msg:?}"),
    }

    assert_eq!(query_balance(&deps, &env, &receiver), Uint128::new(40));
    assert_eq!(query_balance(&deps, &env, &user), Uint128::zero());
}

#[test]
fn token_wrap_notifies_after_pulling_reserve_test() {
    let (mut deps, env, token) = setup_token_wrapper(100);
    let receiver = deps.api.addr_make(RECEIVER);

    let wasm_querier = MockWasmQuerier::new(HashMap::from_iter([
        setup_contract_smart_query_mock(
            token.clone(),
            cw20_mock("TKN", Uint128::new(100), Uint128::zero()),
        ),
        setup_contract_smart_query_mock(receiver.clone(), receiver_mock(true)),
    ]));
    install_wasm_querier(&mut deps, &wasm_querier);

    let info = get_message_info(&deps.api, USER, &[]);
    let res = execute(
        deps.as_mut(),
        env.clone(),
        info,
        ExecuteMsg::Wrap {
            amount: Uint128::new(60),
            recipient: Some(receiver.to_string()),
        },
    )
    .unwrap();

    let targets: Vec<String> = res
        .messages
        .iter()
        .map(|sub_msg| match &sub_msg.msg {
            CosmosMsg::Wasm(WasmMsg::Execute { contract_addr, .. }) => contract_addr.clone(),
            msg => panic!("unexpected message: {msg:?}"),
        })
        .collect();
    assert_eq!(targets, vec![token.to_string(), receiver.to_string()]);
}

#[test]
fn send_test() {
    let (mut deps, env) = setup_native_wrapper();
    let receiver = deps.api.addr_make(RECEIVER);
    let other_user = deps.api.addr_make(OTHER_USER);

    let wasm_querier = MockWasmQuerier::new(HashMap::from_iter([
        setup_contract_info_mock(receiver.clone()),
    ]));
    install_wasm_querier(&mut deps, &wasm_querier);

    wrap_native(&mut deps, &env, USER, 100);

    let info = get_message_info(&deps.api, USER, &[]);
    let err = execute(
        deps.as_mut(),
        env.clone(),
        info,
        ExecuteMsg::Send {
            contract: other_user.to_string(),
            amount: Uint128::new(10),
            msg: Binary::default(),
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::NotAContract {
            address: other_user.to_string()
        }
    );

    // Send notifies even contracts that do not declare support for plain transfers
    let payload = Binary::from(b"payload".to_vec());
    let info = get_message_info(&deps.api, USER, &[]);
    let res = execute(
        deps.as_mut(),
        env.clone(),
        info,
        ExecuteMsg::Send {
            contract: receiver.to_string(),
            amount: Uint128::new(10),
            msg: payload.clone(),
        },
    )
    .unwrap();

    match &res.messages[0].msg {
        CosmosMsg::Wasm(WasmMsg::Execute { msg, .. }) => {
            let ReceiverExecuteMsg::TokensReceived(receive_msg) = from_json(msg).unwrap();
            assert_eq!(receive_msg.msg, payload);
            assert_eq!(receive_msg.amount, Uint128::new(10));
        }
        msg => panic!("unexpected message: {msg:?}"),
    }
}
