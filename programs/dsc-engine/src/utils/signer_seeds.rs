#[macro_export]
macro_rules! config_signer {
    ($bump: expr) => {
        &[CONFIG_SEED, &[$bump]]
    };
}

#[macro_export]
macro_rules! mint_signer {
    ($bump: expr) => {
        &[MINT_SEED, &[$bump]]
    };
}
