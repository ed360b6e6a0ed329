use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::{
    acquire_lock, apply_liquidation, burn_stablecoin_from, config_signer,
    events::{CollateralRedeemed, PositionLiquidated},
    load_fresh_prices, release_lock, transfer_collateral, Config, Position, CONFIG_SEED,
    MINT_SEED, POSITION_SEED,
};

/// Remaining accounts: one price update per registered collateral, in
/// registry order.
#[derive(Accounts)]
pub struct Liquidate<'info> {
    #[account(mut)]
    pub liquidator: Signer<'info>,
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = mint,
    )]
    pub config: Account<'info, Config>,
    #[account(
        mut,
        seeds = [POSITION_SEED, position.depositor.as_ref()],
        bump = position.bump,
    )]
    pub position: Account<'info, Position>,
    #[account(mint::token_program = collateral_token_program)]
    pub collateral_mint: InterfaceAccount<'info, Mint>,
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = config,
        associated_token::token_program = collateral_token_program
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,
    #[account(
        init_if_needed,
        payer = liquidator,
        associated_token::mint = collateral_mint,
        associated_token::authority = liquidator,
        associated_token::token_program = collateral_token_program
    )]
    pub liquidator_collateral_account: InterfaceAccount<'info, TokenAccount>,
    #[account(
        mut,
        seeds = [MINT_SEED],
        bump = config.mint_bump,
    )]
    pub mint: InterfaceAccount<'info, Mint>,
    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = liquidator,
        associated_token::token_program = token_program
    )]
    pub liquidator_token_account: InterfaceAccount<'info, TokenAccount>,
    pub token_program: Interface<'info, TokenInterface>,
    pub collateral_token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl Liquidate<'_> {
    pub fn handler(ctx: Context<Liquidate>, debt_to_cover: u64) -> Result<()> {
        let Liquidate {
            liquidator,
            config,
            position,
            collateral_mint,
            vault,
            liquidator_collateral_account,
            mint,
            liquidator_token_account,
            token_program,
            collateral_token_program,
            ..
        } = ctx.accounts;

        acquire_lock(config)?;

        let prices =
            load_fresh_prices(config, ctx.remaining_accounts, Clock::get()?.unix_timestamp)?;

        let outcome = apply_liquidation(
            position,
            config,
            &prices,
            &collateral_mint.key(),
            debt_to_cover,
        )?;

        let config_bump = config.bump;
        let config_signer: &[&[u8]] = config_signer!(config_bump);

        transfer_collateral(
            collateral_token_program,
            collateral_mint,
            vault.to_account_info(),
            liquidator_collateral_account.to_account_info(),
            config.to_account_info(),
            &[config_signer],
            outcome.collateral_seized,
        )?;

        burn_stablecoin_from(
            token_program,
            mint,
            liquidator_token_account.to_account_info(),
            liquidator.to_account_info(),
            debt_to_cover,
        )?;

        msg!(
            "Liquidated {}: health factor {} -> {}",
            position.depositor,
            outcome.starting_health_factor,
            outcome.ending_health_factor
        );

        emit!(CollateralRedeemed {
            from: position.depositor,
            to: liquidator.key(),
            mint: collateral_mint.key(),
            amount: outcome.collateral_seized,
        });
        emit!(PositionLiquidated {
            user: position.depositor,
            liquidator: liquidator.key(),
            mint: collateral_mint.key(),
            debt_covered: debt_to_cover,
            collateral_seized: outcome.collateral_seized,
            starting_health_factor: outcome.starting_health_factor,
            ending_health_factor: outcome.ending_health_factor,
        });

        release_lock(config);

        Ok(())
    }
}
