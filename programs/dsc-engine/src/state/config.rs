use anchor_lang::prelude::*;
use pyth_solana_receiver_sdk::price_update::get_feed_id_from_hex;

use crate::{error::EngineError, MAX_COLLATERAL_ASSETS};

/// An approved collateral mint and the price feed that values it.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollateralAsset {
    pub mint: Pubkey,
    /// Pyth feed id quoting the asset in USD.
    pub price_feed_id: [u8; 32],
    pub decimals: u8,
}

/// Config account storing protocol-wide settings.
#[account]
#[derive(InitSpace)]
pub struct Config {
    /// Address that initialized the engine.
    pub authority: Pubkey,
    /// Stablecoin mint, minted and burned only through the engine.
    pub mint: Pubkey,
    /// Registered collateral, in the order price updates are expected.
    #[max_len(8)]
    pub collateral_assets: Vec<CollateralAsset>,
    /// Set while a state-mutating instruction is in progress.
    pub locked: bool,
    /// Bump used for seed derivation.
    pub bump: u8,
    /// Bump used for mint seed derivation.
    pub mint_bump: u8,
}

impl Config {
    /// Builds the collateral registry from parallel lists of `(mint, decimals)`
    /// and hex feed ids.
    pub fn build_registry(
        mints: &[(Pubkey, u8)],
        price_feed_ids: &[String],
    ) -> Result<Vec<CollateralAsset>> {
        require!(
            !mints.is_empty() && mints.len() == price_feed_ids.len(),
            EngineError::MismatchedConfigLength
        );
        require_gte!(
            MAX_COLLATERAL_ASSETS,
            mints.len(),
            EngineError::TooManyCollateralAssets
        );

        let mut registry: Vec<CollateralAsset> = Vec::with_capacity(mints.len());

        for (&(mint, decimals), feed_id) in mints.iter().zip(price_feed_ids) {
            require!(
                registry.iter().all(|asset| asset.mint != mint),
                EngineError::DuplicateCollateralAsset
            );

            registry.push(CollateralAsset {
                mint,
                price_feed_id: get_feed_id_from_hex(feed_id)?,
                decimals,
            });
        }

        Ok(registry)
    }

    /// Registry index of `mint`, which is also its slot in every position.
    pub fn collateral_index(&self, mint: &Pubkey) -> Result<usize> {
        self.collateral_assets
            .iter()
            .position(|asset| asset.mint == *mint)
            .ok_or(error!(EngineError::NotAllowedAsset))
    }

    pub fn collateral_asset(&self, mint: &Pubkey) -> Result<&CollateralAsset> {
        let index = self.collateral_index(mint)?;
        Ok(&self.collateral_assets[index])
    }

    pub fn lock(&mut self) -> Result<()> {
        require!(!self.locked, EngineError::Reentrancy);
        self.locked = true;

        Ok(())
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }
}
