use anchor_lang::prelude::*;

#[constant]
pub const CONFIG_SEED: &[u8] = b"config";
#[constant]
pub const POSITION_SEED: &[u8] = b"position";
#[constant]
pub const MINT_SEED: &[u8] = b"mint";

/// Decimals of the stablecoin mint. USD values share this scale.
pub const MINT_DECIMALS: u8 = 9;
/// Fixed-point scale of USD values and health factors, `10^MINT_DECIMALS`.
pub const PRECISION: u128 = 1_000_000_000;
/// Pyth USD feeds report prices with 8 decimals.
pub const FEED_DECIMALS: u32 = 8;
pub const PRICE_FEED_DECIMAL_ADJUSTMENT: u128 = 10; // 1e8 feed price * 10 = 1e9 PRECISION

pub const MAX_BASIS_POINTS: u128 = 10_000;
/// Share of collateral value counted toward solvency (50%, i.e. 200% overcollateralized).
pub const LIQUIDATION_THRESHOLD_BPS: u128 = 5_000;
/// Extra collateral paid to a liquidator on top of the debt it covers.
pub const LIQUIDATION_BONUS_BPS: u128 = 1_000;
pub const MIN_HEALTH_FACTOR: u128 = PRECISION;

/// Maximum age of a price quote, in seconds.
pub const MAXIMUM_AGE: u64 = 3 * 60 * 60;

pub const MAX_COLLATERAL_ASSETS: usize = 8;
