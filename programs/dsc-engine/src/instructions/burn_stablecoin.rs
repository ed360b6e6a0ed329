use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{
    acquire_lock, apply_burn, burn_stablecoin_from, events::StablecoinBurned, load_fresh_prices,
    release_lock, Config, Position, CONFIG_SEED, MINT_SEED, POSITION_SEED,
};

/// Remaining accounts: one price update per registered collateral, in
/// registry order.
#[derive(Accounts)]
pub struct BurnStablecoin<'info> {
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
        mut,
        associated_token::mint = mint,
        associated_token::authority = depositor,
        associated_token::token_program = token_program
    )]
    pub depositor_token_account: InterfaceAccount<'info, TokenAccount>,
    pub token_program: Interface<'info, TokenInterface>,
}

impl BurnStablecoin<'_> {
    pub fn handler(ctx: Context<BurnStablecoin>, amount_to_burn: u64) -> Result<()> {
        let BurnStablecoin {
            depositor,
            config,
            position,
            mint,
            depositor_token_account,
            token_program,
        } = ctx.accounts;

        acquire_lock(config)?;

        let prices =
            load_fresh_prices(config, ctx.remaining_accounts, Clock::get()?.unix_timestamp)?;

        apply_burn(position, config, &prices, amount_to_burn)?;

        burn_stablecoin_from(
            token_program,
            mint,
            depositor_token_account.to_account_info(),
            depositor.to_account_info(),
            amount_to_burn,
        )?;

        emit!(StablecoinBurned {
            on_behalf_of: depositor.key(),
            payer: depositor.key(),
            amount: amount_to_burn,
            amount_minted: position.amount_minted,
        });

        release_lock(config);

        Ok(())
    }
}
