use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    burn_checked, mint_to, transfer_checked, BurnChecked, Mint, MintTo, TokenInterface,
    TransferChecked,
};

use crate::{error::EngineError, mint_signer, MINT_SEED};

/// Moves collateral between token accounts. `signer_seeds` is empty when
/// `authority` signed the transaction.
#[allow(clippy::too_many_arguments)]
pub fn transfer_collateral<'info>(
    token_program: &Interface<'info, TokenInterface>,
    mint: &InterfaceAccount<'info, Mint>,
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    transfer_checked(
        CpiContext::new(
            token_program.to_account_info(),
            TransferChecked {
                from,
                mint: mint.to_account_info(),
                to,
                authority,
            },
        )
        .with_signer(signer_seeds),
        amount,
        mint.decimals,
    )
    .map_err(|err| {
        msg!("Collateral transfer failed: {}", err);
        error!(EngineError::TransferFailed)
    })
}

pub fn mint_stablecoin_to<'info>(
    token_program: &Interface<'info, TokenInterface>,
    mint: &InterfaceAccount<'info, Mint>,
    to: AccountInfo<'info>,
    mint_bump: u8,
    amount: u64,
) -> Result<()> {
    let mint_signer: &[&[u8]] = mint_signer!(mint_bump);

    mint_to(
        CpiContext::new(
            token_program.to_account_info(),
            MintTo {
                authority: mint.to_account_info(),
                mint: mint.to_account_info(),
                to,
            },
        )
        .with_signer(&[mint_signer]),
        amount,
    )
    .map_err(|err| {
        msg!("Stablecoin mint failed: {}", err);
        error!(EngineError::MintFailed)
    })
}

/// Burns stablecoin held by `authority`, which must sign.
pub fn burn_stablecoin_from<'info>(
    token_program: &Interface<'info, TokenInterface>,
    mint: &InterfaceAccount<'info, Mint>,
    from: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    burn_checked(
        CpiContext::new(
            token_program.to_account_info(),
            BurnChecked {
                authority,
                from,
                mint: mint.to_account_info(),
            },
        ),
        amount,
        mint.decimals,
    )
    .map_err(|err| {
        msg!("Stablecoin burn failed: {}", err);
        error!(EngineError::TransferFailed)
    })
}
