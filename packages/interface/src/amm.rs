use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, QuerierWrapper, StdResult, Uint128};

use crate::asset::Asset;

// The router only knows bank denoms and CW20 tokens. Synths are addressed
// through their CW20 token, i.e. as `Asset::Token`.

#[cw_serde]
pub enum AmmExecuteMsg {
    /// Swaps the attached native coin.
    Swap {
        asset_out: Asset,
        min_amount_out: Uint128,
        recipient: Option<String>,
    },
}

/// Message attached to a CW20 `Send` to the router.
#[cw_serde]
pub enum AmmHookMsg {
    Swap {
        asset_out: Asset,
        min_amount_out: Uint128,
        recipient: Option<String>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum AmmQueryMsg {
    /// Fails if no liquidity path exists between the assets.
    #[returns(AmmQuoteResponse)]
    Quote {
        amount_in: Uint128,
        asset_in: Asset,
        asset_out: Asset,
    },
}

#[cw_serde]
pub struct AmmQuoteResponse {
    pub amount_out: Uint128,
}

pub fn query_quote(
    querier: &QuerierWrapper,
    amm: &Addr,
    amount_in: Uint128,
    asset_in: &Asset,
    asset_out: &Asset,
) -> StdResult<Uint128> {
    let response: AmmQuoteResponse = querier.query_wasm_smart(
        amm,
        &AmmQueryMsg::Quote {
            amount_in,
            asset_in: asset_in.clone(),
            asset_out: asset_out.clone(),
        },
    )?;

    Ok(response.amount_out)
}
