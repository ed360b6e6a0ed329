//! Ledger transitions behind the position instructions.
//!
//! Each transition validates its inputs, mutates a scratch copy of the
//! position and commits it only after the solvency check passes. Token
//! movement is left to the instruction handlers, which run in the same
//! transaction.

use anchor_lang::prelude::*;

use crate::{error::EngineError, Config, Position};

/// Records a deposit and returns the registry index of `mint`. Never checks
/// the health factor: adding collateral cannot break solvency.
pub fn apply_deposit(
    position: &mut Position,
    config: &Config,
    mint: &Pubkey,
    amount: u64,
) -> Result<usize> {
    require_gt!(amount, 0, EngineError::ZeroAmount);
    let index = config.collateral_index(mint)?;

    position.try_update(|next| next.record_deposit(index, amount))?;

    Ok(index)
}

pub fn apply_mint(
    position: &mut Position,
    config: &Config,
    prices: &[u128],
    amount: u64,
) -> Result<()> {
    require_gt!(amount, 0, EngineError::ZeroAmount);

    position.try_update(|next| {
        next.add_debt(amount)?;
        next.assert_solvent(config, prices)
    })
}

/// Records a withdrawal of `amount` of `mint`, checked against the resulting
/// state, and returns the registry index of `mint`.
pub fn apply_redeem(
    position: &mut Position,
    config: &Config,
    prices: &[u128],
    mint: &Pubkey,
    amount: u64,
) -> Result<usize> {
    require_gt!(amount, 0, EngineError::ZeroAmount);
    let index = config.collateral_index(mint)?;

    position.try_update(|next| {
        next.record_withdraw(index, amount)?;
        next.assert_solvent(config, prices)
    })?;

    Ok(index)
}

pub fn apply_burn(
    position: &mut Position,
    config: &Config,
    prices: &[u128],
    amount: u64,
) -> Result<()> {
    require_gt!(amount, 0, EngineError::ZeroAmount);

    position.try_update(|next| {
        next.repay_debt(amount)?;
        next.assert_solvent(config, prices)
    })
}

pub fn apply_deposit_and_mint(
    position: &mut Position,
    config: &Config,
    prices: &[u128],
    mint: &Pubkey,
    amount_collateral: u64,
    amount_to_mint: u64,
) -> Result<usize> {
    position.try_update(|next| {
        let index = apply_deposit(next, config, mint, amount_collateral)?;
        apply_mint(next, config, prices, amount_to_mint)?;

        Ok(index)
    })
}

/// Burns first so the withdrawal is checked against the reduced debt.
pub fn apply_redeem_and_burn(
    position: &mut Position,
    config: &Config,
    prices: &[u128],
    mint: &Pubkey,
    amount_collateral: u64,
    amount_to_burn: u64,
) -> Result<usize> {
    position.try_update(|next| {
        apply_burn(next, config, prices, amount_to_burn)?;
        apply_redeem(next, config, prices, mint, amount_collateral)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        get_usd_value, CollateralAsset, PriceQuote, MAXIMUM_AGE, MIN_HEALTH_FACTOR, PRECISION,
    };
    use anchor_lang::error::Error;

    const ETH_PRICE: u128 = 2_000_00000000;
    const ONE_ETH: u64 = 1_000_000_000;
    const USD: u64 = PRECISION as u64;

    fn eth() -> Pubkey {
        Pubkey::new_from_array([1; 32])
    }

    fn config() -> Config {
        Config {
            authority: Pubkey::default(),
            mint: Pubkey::default(),
            collateral_assets: vec![CollateralAsset {
                mint: eth(),
                price_feed_id: [1; 32],
                decimals: 9,
            }],
            locked: false,
            bump: 0,
            mint_bump: 0,
        }
    }

    fn position() -> Position {
        Position::new(Pubkey::new_from_array([5; 32]), 1)
    }

    fn err(kind: EngineError) -> Error {
        Error::from(kind)
    }

    #[test]
    fn deposit_rejects_zero_and_unknown_assets() {
        let config = config();
        let mut position = position();

        assert_eq!(
            apply_deposit(&mut position, &config, &eth(), 0).unwrap_err(),
            err(EngineError::ZeroAmount)
        );
        assert_eq!(
            apply_deposit(&mut position, &config, &Pubkey::new_from_array([3; 32]), 10)
                .unwrap_err(),
            err(EngineError::NotAllowedAsset)
        );
        assert_eq!(apply_deposit(&mut position, &config, &eth(), 10).unwrap(), 0);
        assert_eq!(position.collateral_of(0), 10);
    }

    #[test]
    fn deposit_is_allowed_while_liquidatable() {
        let config = config();
        let mut position = position();
        apply_deposit_and_mint(&mut position, &config, &[ETH_PRICE], &eth(), ONE_ETH, 1_000 * USD)
            .unwrap();

        // ETH halves, position is now at 0.5
        let crashed = [ETH_PRICE / 2];
        assert!(position.assert_solvent(&config, &crashed).is_err());

        apply_deposit(&mut position, &config, &eth(), ONE_ETH / 2).unwrap();
        assert_eq!(position.collateral_of(0), ONE_ETH + ONE_ETH / 2);
    }

    #[test]
    fn mint_up_to_the_boundary() {
        let config = config();
        let mut position = position();
        // 0.05 ETH = $100
        apply_deposit(&mut position, &config, &eth(), ONE_ETH / 20).unwrap();

        assert_eq!(
            apply_mint(&mut position, &config, &[ETH_PRICE], 51 * USD).unwrap_err(),
            err(EngineError::BreaksHealthFactor)
        );
        assert_eq!(position.amount_minted, 0);

        apply_mint(&mut position, &config, &[ETH_PRICE], 50 * USD).unwrap();
        assert_eq!(position.amount_minted, 50 * USD);
        assert_eq!(
            position.health_factor(&config, &[ETH_PRICE]).unwrap(),
            MIN_HEALTH_FACTOR
        );
    }

    #[test]
    fn zero_amounts_fail_on_every_entry_point() {
        let config = config();
        let mut position = position();
        let prices = [ETH_PRICE];

        assert_eq!(
            apply_mint(&mut position, &config, &prices, 0).unwrap_err(),
            err(EngineError::ZeroAmount)
        );
        assert_eq!(
            apply_burn(&mut position, &config, &prices, 0).unwrap_err(),
            err(EngineError::ZeroAmount)
        );
        assert_eq!(
            apply_redeem(&mut position, &config, &prices, &eth(), 0).unwrap_err(),
            err(EngineError::ZeroAmount)
        );
    }

    #[test]
    fn redeem_more_than_deposited_fails() {
        let config = config();
        let mut position = position();
        apply_deposit(&mut position, &config, &eth(), ONE_ETH).unwrap();

        assert_eq!(
            apply_redeem(&mut position, &config, &[ETH_PRICE], &eth(), ONE_ETH + 1).unwrap_err(),
            err(EngineError::InsufficientCollateral)
        );
        assert_eq!(position.collateral_of(0), ONE_ETH);

        apply_redeem(&mut position, &config, &[ETH_PRICE], &eth(), ONE_ETH).unwrap();
        assert_eq!(position.collateral_of(0), 0);
    }

    #[test]
    fn redeem_down_to_exactly_minimum_health_factor() {
        let config = config();
        let mut position = position();
        // $2000 of collateral, $500 of debt; $1000 must stay
        apply_deposit_and_mint(&mut position, &config, &[ETH_PRICE], &eth(), ONE_ETH, 500 * USD)
            .unwrap();

        // one base unit past half an ETH breaks the position
        assert_eq!(
            apply_redeem(&mut position, &config, &[ETH_PRICE], &eth(), ONE_ETH / 2 + 1)
                .unwrap_err(),
            err(EngineError::BreaksHealthFactor)
        );
        assert_eq!(position.collateral_of(0), ONE_ETH);

        apply_redeem(&mut position, &config, &[ETH_PRICE], &eth(), ONE_ETH / 2).unwrap();
        assert_eq!(
            position.health_factor(&config, &[ETH_PRICE]).unwrap(),
            MIN_HEALTH_FACTOR
        );
    }

    #[test]
    fn burn_reduces_debt_and_rejects_overpayment() {
        let config = config();
        let mut position = position();
        apply_deposit_and_mint(&mut position, &config, &[ETH_PRICE], &eth(), ONE_ETH, 100 * USD)
            .unwrap();

        assert_eq!(
            apply_burn(&mut position, &config, &[ETH_PRICE], 101 * USD).unwrap_err(),
            err(EngineError::InsufficientDebt)
        );

        apply_burn(&mut position, &config, &[ETH_PRICE], 40 * USD).unwrap();
        assert_eq!(position.amount_minted, 60 * USD);
    }

    #[test]
    fn deposit_and_mint_is_all_or_nothing() {
        let config = config();
        let mut position = position();
        let before = position.clone();

        // $100 of collateral cannot back $60
        let result = apply_deposit_and_mint(
            &mut position,
            &config,
            &[ETH_PRICE],
            &eth(),
            ONE_ETH / 20,
            60 * USD,
        );

        assert_eq!(result.unwrap_err(), err(EngineError::BreaksHealthFactor));
        assert_eq!(position, before);
    }

    #[test]
    fn redeem_and_burn_checks_against_reduced_debt() {
        let config = config();
        let mut position = position();
        apply_deposit_and_mint(&mut position, &config, &[ETH_PRICE], &eth(), ONE_ETH, 1_000 * USD)
            .unwrap();

        // redeeming alone would break the position
        assert!(apply_redeem(&mut position, &config, &[ETH_PRICE], &eth(), ONE_ETH / 2).is_err());

        apply_redeem_and_burn(
            &mut position,
            &config,
            &[ETH_PRICE],
            &eth(),
            ONE_ETH / 2,
            500 * USD,
        )
        .unwrap();
        assert_eq!(position.amount_minted, 500 * USD);
        assert_eq!(position.collateral_of(0), ONE_ETH / 2);

        let before = position.clone();
        assert_eq!(
            apply_redeem_and_burn(&mut position, &config, &[ETH_PRICE], &eth(), ONE_ETH, 1)
                .unwrap_err(),
            err(EngineError::InsufficientCollateral)
        );
        assert_eq!(position, before);
    }

    #[test]
    fn stale_price_blocks_mint() {
        let config = config();
        let mut position = position();
        apply_deposit(&mut position, &config, &eth(), ONE_ETH).unwrap();

        let now = 1_700_000_000;
        let stale = PriceQuote {
            price: ETH_PRICE as i64,
            exponent: -8,
            updated_at: now - MAXIMUM_AGE as i64 - 1,
        };

        let result = stale
            .fresh_price(now)
            .and_then(|price| apply_mint(&mut position, &config, &[price], USD));

        assert_eq!(result.unwrap_err(), err(EngineError::StalePrice));
        assert_eq!(position.amount_minted, 0);
        assert_eq!(
            get_usd_value(ONE_ETH, ETH_PRICE, 9).unwrap(),
            2_000 * PRECISION
        );
    }
}
