pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

use anchor_lang::prelude::*;

pub use constants::*;
pub use instructions::*;
pub use state::*;
pub use utils::*;

declare_id!("DSCEng1ne1111111111111111111111111111111111");

#[program]
pub mod dsc_engine {
    use super::*;

    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        args: InitializeConfigArgs,
    ) -> Result<()> {
        InitializeConfig::handler(ctx, args)
    }

    pub fn deposit_collateral(
        ctx: Context<DepositCollateral>,
        amount_collateral: u64,
    ) -> Result<()> {
        DepositCollateral::handler(ctx, amount_collateral)
    }

    pub fn mint_stablecoin(ctx: Context<MintStablecoin>, amount_to_mint: u64) -> Result<()> {
        MintStablecoin::handler(ctx, amount_to_mint)
    }

    pub fn deposit_collateral_and_mint(
        ctx: Context<DepositCollateralAndMint>,
        amount_collateral: u64,
        amount_to_mint: u64,
    ) -> Result<()> {
        DepositCollateralAndMint::handler(ctx, amount_collateral, amount_to_mint)
    }

    pub fn redeem_collateral(ctx: Context<RedeemCollateral>, amount_collateral: u64) -> Result<()> {
        RedeemCollateral::handler(ctx, amount_collateral)
    }

    pub fn burn_stablecoin(ctx: Context<BurnStablecoin>, amount_to_burn: u64) -> Result<()> {
        BurnStablecoin::handler(ctx, amount_to_burn)
    }

    pub fn redeem_collateral_for_stablecoin(
        ctx: Context<RedeemCollateralForStablecoin>,
        amount_collateral: u64,
        amount_to_burn: u64,
    ) -> Result<()> {
        RedeemCollateralForStablecoin::handler(ctx, amount_collateral, amount_to_burn)
    }

    pub fn liquidate(ctx: Context<Liquidate>, debt_to_cover: u64) -> Result<()> {
        Liquidate::handler(ctx, debt_to_cover)
    }

    pub fn get_account_information(ctx: Context<PositionQuery>) -> Result<AccountInformation> {
        PositionQuery::account_information(ctx)
    }

    pub fn get_health_factor(ctx: Context<PositionQuery>) -> Result<u128> {
        PositionQuery::health_factor(ctx)
    }

    pub fn get_collateral_balance(
        ctx: Context<PositionQuery>,
        collateral_mint: Pubkey,
    ) -> Result<u64> {
        PositionQuery::collateral_balance(ctx, collateral_mint)
    }

    pub fn usd_value(
        ctx: Context<PriceQuery>,
        collateral_mint: Pubkey,
        amount: u64,
    ) -> Result<u128> {
        PriceQuery::usd_value(ctx, collateral_mint, amount)
    }

    pub fn token_amount_from_usd(
        ctx: Context<PriceQuery>,
        collateral_mint: Pubkey,
        usd_amount: u128,
    ) -> Result<u64> {
        PriceQuery::token_amount_from_usd(ctx, collateral_mint, usd_amount)
    }

    pub fn get_collateral_assets(ctx: Context<ConfigQuery>) -> Result<Vec<CollateralAsset>> {
        ConfigQuery::collateral_assets(ctx)
    }

    pub fn get_price_feed(ctx: Context<ConfigQuery>, collateral_mint: Pubkey) -> Result<[u8; 32]> {
        ConfigQuery::price_feed(ctx, collateral_mint)
    }
}
