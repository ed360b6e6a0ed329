use anchor_lang::prelude::*;

use crate::{error::EngineError, SafeMathAssign, MAX_COLLATERAL_ASSETS};

/// Represents a collateral debt position of a depositor.
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct Position {
    /// Address of the depositor.
    pub depositor: Pubkey,
    /// Stablecoin minted against this position and not yet burned.
    pub amount_minted: u64,
    /// Deposited amount per collateral asset, indexed like `Config::collateral_assets`.
    pub collateral_deposited: [u64; MAX_COLLATERAL_ASSETS],
    /// Bump used for seed derivation.
    pub bump: u8,
}

impl Position {
    pub fn new(depositor: Pubkey, bump: u8) -> Self {
        Self {
            depositor,
            amount_minted: 0,
            collateral_deposited: [0; MAX_COLLATERAL_ASSETS],
            bump,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.depositor != Pubkey::default()
    }

    pub fn collateral_of(&self, index: usize) -> u64 {
        self.collateral_deposited.get(index).copied().unwrap_or_default()
    }

    pub fn record_deposit(&mut self, index: usize, amount: u64) -> Result<()> {
        require_gt!(amount, 0, EngineError::ZeroAmount);

        let balance = self
            .collateral_deposited
            .get_mut(index)
            .ok_or(error!(EngineError::NotAllowedAsset))?;
        balance.safe_add_assign(amount)
    }

    pub fn record_withdraw(&mut self, index: usize, amount: u64) -> Result<()> {
        require_gt!(amount, 0, EngineError::ZeroAmount);

        let balance = self
            .collateral_deposited
            .get_mut(index)
            .ok_or(error!(EngineError::NotAllowedAsset))?;
        require_gte!(*balance, amount, EngineError::InsufficientCollateral);

        balance.safe_sub_assign(amount)
    }

    pub fn add_debt(&mut self, amount: u64) -> Result<()> {
        require_gt!(amount, 0, EngineError::ZeroAmount);

        self.amount_minted.safe_add_assign(amount)
    }

    pub fn repay_debt(&mut self, amount: u64) -> Result<()> {
        require_gt!(amount, 0, EngineError::ZeroAmount);
        require_gte!(self.amount_minted, amount, EngineError::InsufficientDebt);

        self.amount_minted.safe_sub_assign(amount)
    }

    /// Runs `update` against a copy of the position and commits the copy only
    /// if `update` succeeds.
    pub fn try_update<T>(&mut self, update: impl FnOnce(&mut Position) -> Result<T>) -> Result<T> {
        let mut next = self.clone();
        let output = update(&mut next)?;
        *self = next;

        Ok(output)
    }
}
