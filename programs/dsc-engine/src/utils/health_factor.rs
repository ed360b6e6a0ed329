use anchor_lang::prelude::*;

use crate::{
    apply_bps, error::EngineError, get_account_collateral_value, Config, Position, SafeMath,
    LIQUIDATION_THRESHOLD_BPS, MIN_HEALTH_FACTOR, PRECISION,
};

/// Calculates the health factor given the minted amount and the USD value of
/// the collateral backing it.
///
/// Only `LIQUIDATION_THRESHOLD_BPS` of the collateral value counts, so a
/// health factor of 1.0 (`PRECISION`) means the collateral is worth exactly
/// twice the debt. A position without debt can never be liquidated.
pub fn calculate_health_factor(amount_minted: u64, collateral_value_in_usd: u128) -> Result<u128> {
    if amount_minted == 0 {
        return Ok(u128::MAX);
    }

    let adjusted_collateral = apply_bps(collateral_value_in_usd, LIQUIDATION_THRESHOLD_BPS)?;

    adjusted_collateral
        .safe_mul(PRECISION)?
        .safe_div(amount_minted as u128)
}

pub fn validate_above_min_health_factor(health_factor: u128) -> Result<()> {
    require_gte!(
        health_factor,
        MIN_HEALTH_FACTOR,
        EngineError::BreaksHealthFactor
    );

    Ok(())
}

pub fn is_liquidatable(health_factor: u128) -> bool {
    health_factor < MIN_HEALTH_FACTOR
}

impl Position {
    pub fn health_factor(&self, config: &Config, prices: &[u128]) -> Result<u128> {
        let collateral_value = get_account_collateral_value(self, config, prices)?;

        calculate_health_factor(self.amount_minted, collateral_value)
    }

    /// Fails with `BreaksHealthFactor` if the position is below the minimum.
    pub fn assert_solvent(&self, config: &Config, prices: &[u128]) -> Result<()> {
        let health_factor = self.health_factor(config, prices)?;
        if is_liquidatable(health_factor) {
            msg!("Health factor {} of {}", health_factor, self.depositor);
        }

        validate_above_min_health_factor(health_factor)
    }
}
