use anchor_lang::prelude::*;

use crate::{
    calculate_health_factor, get_account_collateral_value, get_token_amount_from_usd,
    get_usd_value, load_fresh_price, load_fresh_prices, CollateralAsset, Config, Position,
    CONFIG_SEED, POSITION_SEED,
};

/// Debt and collateral summary of a position.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountInformation {
    pub total_minted: u64,
    pub collateral_value_in_usd: u128,
    pub health_factor: u128,
}

pub fn position_summary(
    position: &Position,
    config: &Config,
    prices: &[u128],
) -> Result<AccountInformation> {
    let collateral_value_in_usd = get_account_collateral_value(position, config, prices)?;

    Ok(AccountInformation {
        total_minted: position.amount_minted,
        collateral_value_in_usd,
        health_factor: calculate_health_factor(position.amount_minted, collateral_value_in_usd)?,
    })
}

/// Remaining accounts: one price update per registered collateral, in
/// registry order.
#[derive(Accounts)]
pub struct PositionQuery<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,
    /// CHECK: only its address is used, to derive the position
    pub user: UncheckedAccount<'info>,
    /// CHECK: the user's position PDA, empty until their first deposit
    #[account(
        seeds = [POSITION_SEED, user.key().as_ref()],
        bump,
    )]
    pub position: UncheckedAccount<'info>,
}

impl PositionQuery<'_> {
    /// A user that never deposited reads as an empty position.
    fn load_position(&self, bump: u8) -> Result<Position> {
        if self.position.data_is_empty() {
            return Ok(Position::new(self.user.key(), bump));
        }

        require_keys_eq!(
            *self.position.owner,
            crate::ID,
            ErrorCode::AccountOwnedByWrongProgram
        );
        let data = self.position.try_borrow_data()?;

        Position::try_deserialize(&mut &data[..])
    }

    pub fn account_information(ctx: Context<PositionQuery>) -> Result<AccountInformation> {
        let position = ctx.accounts.load_position(ctx.bumps.position)?;
        let config = &ctx.accounts.config;

        let prices =
            load_fresh_prices(config, ctx.remaining_accounts, Clock::get()?.unix_timestamp)?;

        position_summary(&position, config, &prices)
    }

    pub fn health_factor(ctx: Context<PositionQuery>) -> Result<u128> {
        let position = ctx.accounts.load_position(ctx.bumps.position)?;
        let config = &ctx.accounts.config;

        let prices =
            load_fresh_prices(config, ctx.remaining_accounts, Clock::get()?.unix_timestamp)?;

        position.health_factor(config, &prices)
    }

    pub fn collateral_balance(ctx: Context<PositionQuery>, collateral_mint: Pubkey) -> Result<u64> {
        let position = ctx.accounts.load_position(ctx.bumps.position)?;
        let index = ctx.accounts.config.collateral_index(&collateral_mint)?;

        Ok(position.collateral_of(index))
    }
}

#[derive(Accounts)]
pub struct PriceQuery<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,
    /// CHECK: owner and feed id are validated against the registry when read
    pub price_update: UncheckedAccount<'info>,
}

impl PriceQuery<'_> {
    fn fresh_price(&self, collateral_mint: &Pubkey) -> Result<(u128, &CollateralAsset)> {
        let asset = self.config.collateral_asset(collateral_mint)?;
        let price = load_fresh_price(asset, &self.price_update, Clock::get()?.unix_timestamp)?;

        Ok((price, asset))
    }

    pub fn usd_value(
        ctx: Context<PriceQuery>,
        collateral_mint: Pubkey,
        amount: u64,
    ) -> Result<u128> {
        let (price, asset) = ctx.accounts.fresh_price(&collateral_mint)?;

        get_usd_value(amount, price, asset.decimals)
    }

    pub fn token_amount_from_usd(
        ctx: Context<PriceQuery>,
        collateral_mint: Pubkey,
        usd_amount: u128,
    ) -> Result<u64> {
        let (price, asset) = ctx.accounts.fresh_price(&collateral_mint)?;

        get_token_amount_from_usd(usd_amount, price, asset.decimals)
    }
}

#[derive(Accounts)]
pub struct ConfigQuery<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,
}

impl ConfigQuery<'_> {
    pub fn collateral_assets(ctx: Context<ConfigQuery>) -> Result<Vec<CollateralAsset>> {
        Ok(ctx.accounts.config.collateral_assets.clone())
    }

    pub fn price_feed(ctx: Context<ConfigQuery>, collateral_mint: Pubkey) -> Result<[u8; 32]> {
        Ok(ctx.accounts.config.collateral_asset(&collateral_mint)?.price_feed_id)
    }
}
