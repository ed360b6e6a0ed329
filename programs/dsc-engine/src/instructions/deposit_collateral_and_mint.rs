use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::{
    acquire_lock, apply_deposit_and_mint,
    events::{CollateralDeposited, StablecoinMinted},
    load_fresh_prices, mint_stablecoin_to, release_lock, transfer_collateral, Config, Position,
    CONFIG_SEED, MINT_SEED, POSITION_SEED,
};

/// Remaining accounts: one price update per registered collateral, in
/// registry order.
#[derive(Accounts)]
pub struct DepositCollateralAndMint<'info> {
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
        init_if_needed,
        payer = depositor,
        space = Position::DISCRIMINATOR.len() + Position::INIT_SPACE,
        seeds = [POSITION_SEED, depositor.key().as_ref()],
        bump,
    )]
    pub position: Account<'info, Position>,
    #[account(mint::token_program = collateral_token_program)]
    pub collateral_mint: InterfaceAccount<'info, Mint>,
    #[account(
        mut,
        token::mint = collateral_mint,
        token::authority = depositor,
        token::token_program = collateral_token_program,
    )]
    pub depositor_collateral_account: InterfaceAccount<'info, TokenAccount>,
    #[account(
        init_if_needed,
        payer = depositor,
        associated_token::mint = collateral_mint,
        associated_token::authority = config,
        associated_token::token_program = collateral_token_program
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,
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
    pub collateral_token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl DepositCollateralAndMint<'_> {
    pub fn handler(
        ctx: Context<DepositCollateralAndMint>,
        amount_collateral: u64,
        amount_to_mint: u64,
    ) -> Result<()> {
        let DepositCollateralAndMint {
            depositor,
            config,
            position,
            collateral_mint,
            depositor_collateral_account,
            vault,
            mint,
            depositor_token_account,
            token_program,
            collateral_token_program,
            ..
        } = ctx.accounts;

        acquire_lock(config)?;

        if !position.is_initialized() {
            **position = Position::new(depositor.key(), ctx.bumps.position);
        }

        let prices =
            load_fresh_prices(config, ctx.remaining_accounts, Clock::get()?.unix_timestamp)?;

        apply_deposit_and_mint(
            position,
            config,
            &prices,
            &collateral_mint.key(),
            amount_collateral,
            amount_to_mint,
        )?;

        transfer_collateral(
            collateral_token_program,
            collateral_mint,
            depositor_collateral_account.to_account_info(),
            vault.to_account_info(),
            depositor.to_account_info(),
            &[],
            amount_collateral,
        )?;

        mint_stablecoin_to(
            token_program,
            mint,
            depositor_token_account.to_account_info(),
            config.mint_bump,
            amount_to_mint,
        )?;

        emit!(CollateralDeposited {
            user: depositor.key(),
            mint: collateral_mint.key(),
            amount: amount_collateral,
        });
        emit!(StablecoinMinted {
            user: depositor.key(),
            amount: amount_to_mint,
            amount_minted: position.amount_minted,
        });

        release_lock(config);

        Ok(())
    }
}
