use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Decimal, QuerierWrapper, StdResult};

/// Queries the synth ledger answers. The ledger is the price oracle for synths.
#[cw_serde]
#[derive(QueryResponses)]
pub enum SynthLedgerQueryMsg {
    /// Current rate of `symbol` expressed in the ledger's base unit.
    #[returns(RateResponse)]
    Rate { symbol: String },

    /// CW20 token issued by the ledger for `symbol`.
    #[returns(SynthTokenResponse)]
    SynthToken { symbol: String },

    /// Symbol of the synth issued as the CW20 `token`, if any.
    #[returns(TokenSymbolResponse)]
    TokenSymbol { token: String },
}

#[cw_serde]
pub struct RateResponse {
    // A zero rate means the synth is not priced
    pub rate: Decimal,
}

#[cw_serde]
pub struct SynthTokenResponse {
    pub token: Addr,
}

#[cw_serde]
pub struct TokenSymbolResponse {
    pub symbol: Option<String>,
}

/// Message attached to a CW20 `Send` of a synth token to the ledger.
#[cw_serde]
pub enum SynthLedgerHookMsg {
    /// Burns the received synth and issues `target_symbol` to the CW20 sender
    /// at `amount * rate(source) / rate(target)`.
    Exchange { target_symbol: String },
}

pub fn query_rate(
    querier: &QuerierWrapper,
    ledger: &Addr,
    symbol: impl Into<String>,
) -> StdResult<Decimal> {
    let response: RateResponse = querier.query_wasm_smart(
        ledger,
        &SynthLedgerQueryMsg::Rate {
            symbol: symbol.into(),
        },
    )?;

    Ok(response.rate)
}

pub fn query_synth_token(
    querier: &QuerierWrapper,
    ledger: &Addr,
    symbol: impl Into<String>,
) -> StdResult<Addr> {
    let response: SynthTokenResponse = querier.query_wasm_smart(
        ledger,
        &SynthLedgerQueryMsg::SynthToken {
            symbol: symbol.into(),
        },
    )?;

    Ok(response.token)
}

pub fn query_token_symbol(
    querier: &QuerierWrapper,
    ledger: &Addr,
    token: impl Into<String>,
) -> StdResult<Option<String>> {
    let response: TokenSymbolResponse = querier.query_wasm_smart(
        ledger,
        &SynthLedgerQueryMsg::TokenSymbol {
            token: token.into(),
        },
    )?;

    Ok(response.symbol)
}
