use anchor_lang::prelude::*;

#[event]
pub struct CollateralDeposited {
    pub user: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

#[event]
pub struct CollateralRedeemed {
    pub from: Pubkey,
    pub to: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

#[event]
pub struct StablecoinMinted {
    pub user: Pubkey,
    pub amount: u64,
    pub amount_minted: u64,
}

#[event]
pub struct StablecoinBurned {
    pub on_behalf_of: Pubkey,
    pub payer: Pubkey,
    pub amount: u64,
    pub amount_minted: u64,
}

#[event]
pub struct PositionLiquidated {
    pub user: Pubkey,
    pub liquidator: Pubkey,
    pub mint: Pubkey,
    pub debt_covered: u64,
    pub collateral_seized: u64,
    pub starting_health_factor: u128,
    pub ending_health_factor: u128,
}
