use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::{
    acquire_lock, apply_deposit, events::CollateralDeposited, release_lock, transfer_collateral,
    Config, Position, CONFIG_SEED, POSITION_SEED,
};

#[derive(Accounts)]
pub struct DepositCollateral<'info> {
    #[account(mut)]
    pub depositor: Signer<'info>,
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
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
    #[account(mint::token_program = token_program)]
    pub collateral_mint: InterfaceAccount<'info, Mint>,
    #[account(
        mut,
        token::mint = collateral_mint,
        token::authority = depositor,
        token::token_program = token_program,
    )]
    pub depositor_collateral_account: InterfaceAccount<'info, TokenAccount>,
    #[account(
        init_if_needed,
        payer = depositor,
        associated_token::mint = collateral_mint,
        associated_token::authority = config,
        associated_token::token_program = token_program
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,
    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl DepositCollateral<'_> {
    pub fn handler(ctx: Context<DepositCollateral>, amount_collateral: u64) -> Result<()> {
        let DepositCollateral {
            depositor,
            config,
            position,
            collateral_mint,
            depositor_collateral_account,
            vault,
            token_program,
            ..
        } = ctx.accounts;

        acquire_lock(config)?;

        if !position.is_initialized() {
            **position = Position::new(depositor.key(), ctx.bumps.position);
        }

        apply_deposit(position, config, &collateral_mint.key(), amount_collateral)?;

        transfer_collateral(
            token_program,
            collateral_mint,
            depositor_collateral_account.to_account_info(),
            vault.to_account_info(),
            depositor.to_account_info(),
            &[],
            amount_collateral,
        )?;

        emit!(CollateralDeposited {
            user: depositor.key(),
            mint: collateral_mint.key(),
            amount: amount_collateral,
        });

        release_lock(config);

        Ok(())
    }
}
