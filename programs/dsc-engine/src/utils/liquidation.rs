use anchor_lang::prelude::*;

use crate::{
    apply_bps, error::EngineError, get_token_amount_from_usd, is_liquidatable, to_u64, Config,
    Position, SafeMath, LIQUIDATION_BONUS_BPS,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiquidationOutcome {
    /// Registry index of the seized collateral.
    pub collateral_index: usize,
    /// Collateral moved from the target to the liquidator, bonus included.
    pub collateral_seized: u64,
    pub starting_health_factor: u128,
    pub ending_health_factor: u128,
}

/// Collateral owed to a liquidator covering `debt_to_cover`: the equivalent
/// amount of the asset plus the liquidation bonus.
pub fn calculate_collateral_to_seize(debt_to_cover: u64, price: u128, decimals: u8) -> Result<u64> {
    let token_amount = get_token_amount_from_usd(debt_to_cover as u128, price, decimals)?;
    let bonus = apply_bps(token_amount as u128, LIQUIDATION_BONUS_BPS)?;

    to_u64((token_amount as u128).safe_add(bonus)?)
}

/// Repays `debt_to_cover` of an undercollateralized position in exchange for
/// its `mint` collateral plus bonus.
///
/// Only the requested asset is seized. A target holding too little of it
/// fails with `InsufficientCollateral` even if its other assets would cover
/// the debt.
pub fn apply_liquidation(
    position: &mut Position,
    config: &Config,
    prices: &[u128],
    mint: &Pubkey,
    debt_to_cover: u64,
) -> Result<LiquidationOutcome> {
    require_gt!(debt_to_cover, 0, EngineError::ZeroAmount);

    let collateral_index = config.collateral_index(mint)?;
    let asset = &config.collateral_assets[collateral_index];
    let price = *prices
        .get(collateral_index)
        .ok_or(error!(EngineError::MissingPriceFeed))?;

    let starting_health_factor = position.health_factor(config, prices)?;
    require!(
        is_liquidatable(starting_health_factor),
        EngineError::HealthFactorOk
    );

    let collateral_seized = calculate_collateral_to_seize(debt_to_cover, price, asset.decimals)?;

    let outcome = position.try_update(|next| {
        next.record_withdraw(collateral_index, collateral_seized)?;
        next.repay_debt(debt_to_cover)?;

        let ending_health_factor = next.health_factor(config, prices)?;
        require_gt!(
            ending_health_factor,
            starting_health_factor,
            EngineError::HealthFactorNotImproved
        );

        Ok(LiquidationOutcome {
            collateral_index,
            collateral_seized,
            starting_health_factor,
            ending_health_factor,
        })
    })?;

    // re-read from the committed position
    require_gte!(
        position.health_factor(config, prices)?,
        outcome.starting_health_factor,
        EngineError::HealthFactorNotImproved
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        get_usd_value, load_fresh_prices, utils::oracle::fixtures::PriceAccount,
        CollateralAsset, MAXIMUM_AGE, MIN_HEALTH_FACTOR, PRECISION,
    };
    use anchor_lang::error::Error;

    const ETH_PRICE: u128 = 2_000_00000000;
    const USD: u64 = PRECISION as u64;

    fn eth() -> Pubkey {
        Pubkey::new_from_array([1; 32])
    }

    fn btc() -> Pubkey {
        Pubkey::new_from_array([2; 32])
    }

    fn config() -> Config {
        Config {
            authority: Pubkey::default(),
            mint: Pubkey::default(),
            collateral_assets: vec![
                CollateralAsset {
                    mint: eth(),
                    price_feed_id: [1; 32],
                    decimals: 9,
                },
                CollateralAsset {
                    mint: btc(),
                    price_feed_id: [2; 32],
                    decimals: 8,
                },
            ],
            locked: false,
            bump: 0,
            mint_bump: 0,
        }
    }

    /// Debt $100 against $140 of ETH: health factor 0.7.
    fn underwater() -> Position {
        let mut position = Position::new(Pubkey::new_from_array([4; 32]), 1);
        // 0.07 ETH = $140
        position.record_deposit(0, 70_000_000).unwrap();
        position.add_debt(100 * USD).unwrap();
        position
    }

    #[test]
    fn seizes_converted_amount_plus_bonus() {
        let config = config();
        let prices = [ETH_PRICE, 30_000_00000000];
        let mut position = underwater();

        let outcome = apply_liquidation(&mut position, &config, &prices, &eth(), 50 * USD).unwrap();

        // $50 = 0.025 ETH, plus 10% = 0.0275 ETH
        assert_eq!(outcome.collateral_seized, 27_500_000);
        assert_eq!(
            get_usd_value(outcome.collateral_seized, ETH_PRICE, 9).unwrap(),
            55 * PRECISION
        );
        assert_eq!(outcome.starting_health_factor, 700_000_000);
        assert_eq!(outcome.ending_health_factor, 850_000_000);
        assert_eq!(position.amount_minted, 50 * USD);
        assert_eq!(position.collateral_of(0), 42_500_000);
    }

    #[test]
    fn healthy_positions_cannot_be_liquidated() {
        let config = config();
        let prices = [ETH_PRICE, 30_000_00000000];
        let mut position = Position::new(Pubkey::new_from_array([4; 32]), 1);
        position.record_deposit(0, 100_000_000).unwrap();
        position.add_debt(100 * USD).unwrap();
        assert_eq!(
            position.health_factor(&config, &prices).unwrap(),
            MIN_HEALTH_FACTOR
        );

        let before = position.clone();
        assert_eq!(
            apply_liquidation(&mut position, &config, &prices, &eth(), 10 * USD).unwrap_err(),
            Error::from(EngineError::HealthFactorOk)
        );
        assert_eq!(position, before);
    }

    #[test]
    fn zero_cover_is_rejected() {
        let mut position = underwater();

        assert_eq!(
            apply_liquidation(&mut position, &config(), &[ETH_PRICE, 1], &eth(), 0).unwrap_err(),
            Error::from(EngineError::ZeroAmount)
        );
    }

    #[test]
    fn only_the_requested_asset_is_seized() {
        let config = config();
        let prices = [ETH_PRICE, 30_000_00000000];
        let mut position = underwater();
        // $3000 of BTC would cover everything, but the target holds no BTC
        let before = position.clone();

        assert_eq!(
            apply_liquidation(&mut position, &config, &prices, &btc(), 50 * USD).unwrap_err(),
            Error::from(EngineError::InsufficientCollateral)
        );
        assert_eq!(position, before);
    }

    #[test]
    fn liquidation_that_does_not_improve_health_is_rejected() {
        let config = config();
        let mut position = underwater();
        // ETH crashes to $1000: $70 of collateral against $100 of debt, 0.35.
        // Covering $50 seizes $55 and leaves $15 against $50, 0.15.
        let prices = [ETH_PRICE / 2, 30_000_00000000];
        let before = position.clone();

        assert_eq!(
            apply_liquidation(&mut position, &config, &prices, &eth(), 50 * USD).unwrap_err(),
            Error::from(EngineError::HealthFactorNotImproved)
        );
        assert_eq!(position, before);
    }

    #[test]
    fn cover_beyond_debt_is_rejected() {
        let config = config();
        let prices = [ETH_PRICE, 30_000_00000000];
        let mut position = Position::new(Pubkey::new_from_array([4; 32]), 1);
        position.record_deposit(0, 1_000_000_000).unwrap();
        position.add_debt(60 * USD).unwrap();
        // ETH at $100: $100 of collateral against $60 of debt
        let prices = [prices[0] / 20, prices[1]];

        assert_eq!(
            apply_liquidation(&mut position, &config, &prices, &eth(), 61 * USD).unwrap_err(),
            Error::from(EngineError::InsufficientDebt)
        );
    }

    #[test]
    fn unknown_asset_is_rejected() {
        let mut position = underwater();

        assert_eq!(
            apply_liquidation(
                &mut position,
                &config(),
                &[ETH_PRICE, 1],
                &Pubkey::new_from_array([8; 32]),
                USD
            )
            .unwrap_err(),
            Error::from(EngineError::NotAllowedAsset)
        );
    }

    #[test]
    fn partial_liquidation_may_leave_target_below_minimum() {
        let config = config();
        let prices = [ETH_PRICE, 30_000_00000000];
        let mut position = underwater();

        let outcome = apply_liquidation(&mut position, &config, &prices, &eth(), 10 * USD).unwrap();

        assert!(outcome.ending_health_factor > outcome.starting_health_factor);
        assert!(outcome.ending_health_factor < MIN_HEALTH_FACTOR);
        assert_eq!(
            position.health_factor(&config, &prices).unwrap(),
            outcome.ending_health_factor
        );
    }

    #[test]
    fn stale_price_blocks_liquidation() {
        let config = config();
        let now = 1_700_000_000;
        let mut accounts = [
            PriceAccount::new([1; 32], ETH_PRICE as i64, now - MAXIMUM_AGE as i64 - 1),
            PriceAccount::new([2; 32], 30_000_00000000, now),
        ];
        let infos: Vec<AccountInfo> = accounts.iter_mut().map(PriceAccount::info).collect();
        let mut position = underwater();
        let before = position.clone();

        let result = load_fresh_prices(&config, &infos, now).and_then(|prices| {
            apply_liquidation(&mut position, &config, &prices, &eth(), 50 * USD)
        });

        assert_eq!(result.unwrap_err(), Error::from(EngineError::StalePrice));
        assert_eq!(position, before);
    }
}
