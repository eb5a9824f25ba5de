use cosmwasm_std::{Addr, Empty, StdResult, Uint128};
use cw20::{BalanceResponse, Cw20Coin, Cw20QueryMsg, MinterResponse};
use cw_multi_test::{App, Contract, ContractWrapper, Executor};

pub fn cw20_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    ))
}

/// Instantiates a CW20 token. `minter` is the only account allowed to mint.
pub fn instantiate_cw20(
    app: &mut App,
    code_id: u64,
    creator: &Addr,
    symbol: &str,
    minter: Option<&Addr>,
    initial_balances: Vec<(Addr, Uint128)>,
) -> Addr {
    let msg = cw20_base::msg::InstantiateMsg {
        name: format!("{symbol} token"),
        symbol: symbol.to_string(),
        decimals: 18,
        initial_balances: initial_balances
            .into_iter()
            .map(|(address, amount)| Cw20Coin {
                address: address.to_string(),
                amount,
            })
            .collect(),
        mint: minter.map(|minter| MinterResponse {
            minter: minter.to_string(),
            cap: None,
        }),
        marketing: None,
    };

    app.instantiate_contract(code_id, creator.clone(), &msg, &[], symbol, None)
        .expect("cw20 instantiation failed")
}

pub fn query_cw20_balance(app: &App, token: &Addr, address: &Addr) -> StdResult<Uint128> {
    let response: BalanceResponse = app.wrap().query_wasm_smart(
        token,
        &Cw20QueryMsg::Balance {
            address: address.to_string(),
        },
    )?;

    Ok(response.balance)
}
