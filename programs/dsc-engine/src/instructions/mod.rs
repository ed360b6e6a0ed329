pub mod burn_stablecoin;
pub use burn_stablecoin::*;

pub mod deposit_collateral;
pub use deposit_collateral::*;

pub mod deposit_collateral_and_mint;
pub use deposit_collateral_and_mint::*;

pub mod initialize_config;
pub use initialize_config::*;

pub mod liquidate;
pub use liquidate::*;

pub mod mint_stablecoin;
pub use mint_stablecoin::*;

pub mod queries;
pub use queries::*;

pub mod redeem_collateral;
pub use redeem_collateral::*;

pub mod redeem_collateral_for_stablecoin;
pub use redeem_collateral_for_stablecoin::*;
