use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::{
    acquire_lock, apply_mint, events::StablecoinMinted, load_fresh_prices, mint_stablecoin_to,
    release_lock, Config, Position, CONFIG_SEED, MINT_SEED, POSITION_SEED,
};

/// Remaining accounts: one price update per registered collateral, in
/// registry order.
#[derive(Accounts)]
pub struct MintStablecoin<'info> {
    #[account(mut)]
    pub depositor: Signer<'info>,
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = mint,
    )]
    pub config: Account<'info, Config>,
    #[account(
        mut,
        seeds = [POSITION_SEED, depositor.key().as_ref()],
        bump = position.bump,
        has_one = depositor,
    )]
    pub position: Account<'info, Position>,
    #[account(
        mut,
        seeds = [MINT_SEED],
        bump = config.mint_bump,
    )]
    pub mint: InterfaceAccount<'info, Mint>,
    #[account(
        init_if_needed,
        payer = depositor,
        associated_token::mint = mint,
        associated_token::authority = depositor,
        associated_token::token_program = token_program
    )]
    pub depositor_token_account: InterfaceAccount<'info, TokenAccount>,
    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl MintStablecoin<'_> {
    pub fn handler(ctx: Context<MintStablecoin>, amount_to_mint: u64) -> Result<()> {
        let MintStablecoin {
            depositor,
            config,
            position,
            mint,
            depositor_token_account,
            token_program,
            ..
        } = ctx.accounts;

        acquire_lock(config)?;

        let prices =
            load_fresh_prices(config, ctx.remaining_accounts, Clock::get()?.unix_timestamp)?;

        apply_mint(position, config, &prices, amount_to_mint)?;

        mint_stablecoin_to(
            token_program,
            mint,
            depositor_token_account.to_account_info(),
            config.mint_bump,
            amount_to_mint,
        )?;

        emit!(StablecoinMinted {
            user: depositor.key(),
            amount: amount_to_mint,
            amount_minted: position.amount_minted,
        });

        release_lock(config);

        Ok(())
    }
}
