use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::{
    acquire_lock, apply_redeem, config_signer, events::CollateralRedeemed, load_fresh_prices,
    release_lock, transfer_collateral, Config, Position, CONFIG_SEED, POSITION_SEED,
};

/// Remaining accounts: one price update per registered collateral, in
/// registry order.
#[derive(Accounts)]
pub struct RedeemCollateral<'info> {
    #[account(mut)]
    pub depositor: Signer<'info>,
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,
    #[account(
        mut,
        seeds = [POSITION_SEED, depositor.key().as_ref()],
        bump = position.bump,
        has_one = depositor,
    )]
    pub position: Account<'info, Position>,
    #[account(mint::token_program = token_program)]
    pub collateral_mint: InterfaceAccount<'info, Mint>,
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = config,
        associated_token::token_program = token_program
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,
    #[account(
        init_if_needed,
        payer = depositor,
        associated_token::mint = collateral_mint,
        associated_token::authority = depositor,
        associated_token::token_program = token_program
    )]
    pub depositor_collateral_account: InterfaceAccount<'info, TokenAccount>,
    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl RedeemCollateral<'_> {
    pub fn handler(ctx: Context<RedeemCollateral>, amount_collateral: u64) -> Result<()> {
        let RedeemCollateral {
            depositor,
            config,
            position,
            collateral_mint,
            vault,
            depositor_collateral_account,
            token_program,
            ..
        } = ctx.accounts;

        acquire_lock(config)?;

        let prices =
            load_fresh_prices(config, ctx.remaining_accounts, Clock::get()?.unix_timestamp)?;

        apply_redeem(
            position,
            config,
            &prices,
            &collateral_mint.key(),
            amount_collateral,
        )?;

        let config_bump = config.bump;
        let config_signer: &[&[u8]] = config_signer!(config_bump);

        transfer_collateral(
            token_program,
            collateral_mint,
            vault.to_account_info(),
            depositor_collateral_account.to_account_info(),
            config.to_account_info(),
            &[config_signer],
            amount_collateral,
        )?;

        emit!(CollateralRedeemed {
            from: depositor.key(),
            to: depositor.key(),
            mint: collateral_mint.key(),
            amount: amount_collateral,
        });

        release_lock(config);

        Ok(())
    }
}
