use cosmwasm_std::{Addr, Decimal, Deps, Uint128};

use interface::{
    amm::query_quote,
    asset::Asset,
    synth_ledger::{query_rate, query_synth_token},
};

use crate::{
    error::{aborted, ContractError},
    msg::Config,
};

/// Path taken by a source asset to reach the target synth.
#[derive(Clone, Debug, PartialEq)]
pub enum Route {
    /// The source already is the target synth.
    Identity,
    /// Ledger conversion of a source synth held as `token`.
    Oracle { symbol: String, token: Addr },
    /// AMM swap into the reference synth, followed by a ledger conversion
    /// unless the reference synth is the target.
    Swap {
        amm: Addr,
        reference_symbol: String,
        reference_token: Addr,
        swap_out: Uint128,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Conversion {
    pub source: Asset,
    pub amount_in: Uint128,
    pub route: Route,
    pub amount_out: Uint128,
}

/// Prices `amount_in` of `source` in the target synth and selects the route
/// settlement will follow. `amount_in` must not be zero; zero amounts never
/// reach the price sources.
pub fn plan_conversion(
    deps: Deps,
    config: &Config,
    source: &Asset,
    amount_in: Uint128,
) -> Result<Conversion, ContractError> {
    let route = match source {
        Asset::Synth { symbol } if *symbol == config.target_symbol => Route::Identity,
        Asset::Synth { symbol } => Route::Oracle {
            symbol: symbol.clone(),
            token: synth_token(deps, config, symbol)?,
        },
        Asset::Native { .. } => swap_route(
            deps,
            config,
            source,
            &config.native_reference_synth,
            amount_in,
        )?,
        Asset::Token { .. } => swap_route(
            deps,
            config,
            source,
            &config.token_reference_synth,
            amount_in,
        )?,
    };

    let amount_out = match &route {
        Route::Identity => amount_in,
        Route::Oracle { symbol, .. } => synth_quote(deps, config, symbol, amount_in)?,
        Route::Swap {
            reference_symbol,
            swap_out,
            ..
        } => synth_quote(deps, config, reference_symbol, *swap_out)?,
    };

    // A non-zero input must never be silently burned
    if amount_out.is_zero() {
        return Err(aborted(format!(
            "{amount_in} {source} converts to zero {}",
            config.target_symbol
        )));
    }

    deps.api.debug(&format!(
        "Conversion planned: {} {} -> {} {}",
        amount_in, source, amount_out, config.target_symbol
    ));

    Ok(Conversion {
        source: source.clone(),
        amount_in,
        route,
        amount_out,
    })
}

fn swap_route(
    deps: Deps,
    config: &Config,
    source: &Asset,
    reference_symbol: &str,
    amount_in: Uint128,
) -> Result<Route, ContractError> {
    let Some(amm) = config.amm.clone() else {
        return Err(aborted(format!("no AMM configured to price {source}")));
    };

    let reference_token = synth_token(deps, config, reference_symbol)?;

    let swap_out = query_quote(
        &deps.querier,
        &amm,
        amount_in,
        source,
        &Asset::token(reference_token.as_str()),
    )
    .map_err(|e| aborted(format!("no AMM quote for {source} -> {reference_symbol}: {e}")))?;

    deps.api.debug(&format!(
        "AMM quote: {} {} = {} {}",
        amount_in, source, swap_out, reference_symbol
    ));

    Ok(Route::Swap {
        amm,
        reference_symbol: reference_symbol.to_string(),
        reference_token,
        swap_out,
    })
}

/// Converts `amount` of the `from` synth into the target synth at ledger rates.
pub fn synth_quote(
    deps: Deps,
    config: &Config,
    from: &str,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    if from == config.target_symbol {
        return Ok(amount);
    }

    let rate_from = synth_rate(deps, config, from)?;
    let rate_to = synth_rate(deps, config, &config.target_symbol)?;

    let amount_out = convert_at_rates(amount, rate_from, rate_to)?;

    deps.api.debug(&format!(
        "Oracle calculation: {} {} * ({} / {}) = {} {}",
        amount, from, rate_from, rate_to, amount_out, config.target_symbol
    ));

    Ok(amount_out)
}

/// `amount * rate_from / rate_to`, multiplying before dividing so that no
/// precision beyond the ledger's own is lost. Rounds down.
pub fn convert_at_rates(
    amount: Uint128,
    rate_from: Decimal,
    rate_to: Decimal,
) -> Result<Uint128, ContractError> {
    if rate_to.is_zero() {
        return Err(aborted("target synth is not priced"));
    }

    Ok(amount.checked_multiply_ratio(rate_from.atomics(), rate_to.atomics())?)
}

fn synth_rate(deps: Deps, config: &Config, symbol: &str) -> Result<Decimal, ContractError> {
    let rate = query_rate(&deps.querier, &config.synth_ledger, symbol).map_err(|e| {
        deps.api
            .debug(&format!("Rate query failed for {}: {}", symbol, e));
        aborted(format!("no rate for {symbol}"))
    })?;

    if rate.is_zero() {
        return Err(aborted(format!("{symbol} is not priced")));
    }

    Ok(rate)
}

fn synth_token(deps: Deps, config: &Config, symbol: &str) -> Result<Addr, ContractError> {
    query_synth_token(&deps.querier, &config.synth_ledger, symbol)
        .map_err(|_| aborted(format!("synth {symbol} is not issued by the ledger")))
}
