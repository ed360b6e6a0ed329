use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenInterface};

use crate::{error::EngineError, Config, CONFIG_SEED, MINT_DECIMALS, MINT_SEED};

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeConfigArgs {
    /// Hex Pyth feed ids, one per collateral mint passed as remaining accounts.
    pub price_feed_ids: Vec<String>,
}

#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,
    #[account(
        init,
        payer = authority,
        space = Config::DISCRIMINATOR.len() + Config::INIT_SPACE,
        seeds = [CONFIG_SEED],
        bump,
    )]
    pub config: Account<'info, Config>,
    #[account(
        init,
        payer = authority,
        seeds = [MINT_SEED],
        bump,
        mint::authority = mint,
        mint::decimals = MINT_DECIMALS,
        mint::freeze_authority = mint,
        mint::token_program = token_program
    )]
    pub mint: InterfaceAccount<'info, Mint>,
    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

fn read_collateral_mint(info: &AccountInfo) -> Result<(Pubkey, u8)> {
    require!(
        *info.owner == anchor_spl::token::ID || *info.owner == anchor_spl::token_2022::ID,
        EngineError::NotAllowedAsset
    );

    let data = info.try_borrow_data()?;
    let mint = Mint::try_deserialize(&mut &data[..])?;

    Ok((info.key(), mint.decimals))
}

impl InitializeConfig<'_> {
    pub fn handler(ctx: Context<InitializeConfig>, args: InitializeConfigArgs) -> Result<()> {
        let mints = ctx
            .remaining_accounts
            .iter()
            .map(read_collateral_mint)
            .collect::<Result<Vec<_>>>()?;

        let collateral_assets = Config::build_registry(&mints, &args.price_feed_ids)?;

        ctx.accounts.config.set_inner(Config {
            authority: ctx.accounts.authority.key(),
            mint: ctx.accounts.mint.key(),
            collateral_assets,
            locked: false,
            bump: ctx.bumps.config,
            mint_bump: ctx.bumps.mint,
        });

        msg!("Registered {} collateral assets", mints.len());

        Ok(())
    }
}
