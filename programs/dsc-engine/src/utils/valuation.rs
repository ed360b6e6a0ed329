use anchor_lang::prelude::*;

use crate::{error::EngineError, to_u64, Config, Position, SafeMath, PRICE_FEED_DECIMAL_ADJUSTMENT};

fn unit_precision(decimals: u8) -> Result<u128> {
    10u128.safe_pow(decimals as u32)
}

/// USD value, scaled by `PRECISION`, of `amount` base units of a token with
/// `decimals` decimals priced at `price` (feed decimals).
pub fn get_usd_value(amount: u64, price: u128, decimals: u8) -> Result<u128> {
    let price_in_usd = price.safe_mul(PRICE_FEED_DECIMAL_ADJUSTMENT)?;

    (amount as u128)
        .safe_mul(price_in_usd)?
        .safe_div(unit_precision(decimals)?)
}

/// Token base units worth `usd_amount` (scaled by `PRECISION`), rounded down.
pub fn get_token_amount_from_usd(usd_amount: u128, price: u128, decimals: u8) -> Result<u64> {
    require_gt!(price, 0, EngineError::InvalidPrice);

    let price_in_usd = price.safe_mul(PRICE_FEED_DECIMAL_ADJUSTMENT)?;
    let amount = usd_amount
        .safe_mul(unit_precision(decimals)?)?
        .safe_div(price_in_usd)?;

    to_u64(amount)
}

/// Sum of the USD value of every registered asset held by `position`.
/// `prices` is indexed like the registry.
pub fn get_account_collateral_value(
    position: &Position,
    config: &Config,
    prices: &[u128],
) -> Result<u128> {
    require_gte!(
        prices.len(),
        config.collateral_assets.len(),
        EngineError::MissingPriceFeed
    );

    config
        .collateral_assets
        .iter()
        .zip(prices)
        .enumerate()
        .try_fold(0u128, |total, (index, (asset, &price))| {
            let value = get_usd_value(position.collateral_of(index), price, asset.decimals)?;
            total.safe_add(value)
        })
}
