use anchor_lang::prelude::*;

#[error_code]
pub enum EngineError {
    #[msg("Amount must be greater than 0")]
    ZeroAmount,
    #[msg("Collateral asset is not registered")]
    NotAllowedAsset,
    #[msg("Collateral mints and price feeds must be non-empty and of equal length")]
    MismatchedConfigLength,
    #[msg("Collateral asset registered more than once")]
    DuplicateCollateralAsset,
    #[msg("Too many collateral assets")]
    TooManyCollateralAssets,
    #[msg("Insufficient collateral")]
    InsufficientCollateral,
    #[msg("Amount exceeds outstanding debt")]
    InsufficientDebt,
    #[msg("Health factor below minimum")]
    BreaksHealthFactor,
    #[msg("Health factor is above minimum, position cannot be liquidated")]
    HealthFactorOk,
    #[msg("Liquidation did not improve health factor")]
    HealthFactorNotImproved,
    #[msg("Price quote is older than maximum age")]
    StalePrice,
    #[msg("Price update is not fully verified")]
    UnverifiedPrice,
    #[msg("Price must be greater than 0")]
    InvalidPrice,
    #[msg("Unexpected price exponent")]
    InvalidPriceExponent,
    #[msg("Account is not a price update")]
    InvalidPriceAccount,
    #[msg("Price update does not match registered feed")]
    PriceFeedMismatch,
    #[msg("Missing price update for registered collateral")]
    MissingPriceFeed,
    #[msg("Token transfer failed")]
    TransferFailed,
    #[msg("Stablecoin mint failed")]
    MintFailed,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Conversion to u64 failed")]
    ConversionFailed,
    #[msg("Engine is already processing an operation")]
    Reentrancy,
}
