use anchor_lang::prelude::*;
use pyth_solana_receiver_sdk::{error::GetPriceError, price_update::PriceUpdateV2};

use crate::{error::EngineError, CollateralAsset, Config, FEED_DECIMALS, MAXIMUM_AGE};

/// A single read of a price feed. Never stored across instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceQuote {
    /// Price scaled by `10^-exponent`.
    pub price: i64,
    pub exponent: i32,
    /// Unix timestamp of the last feed update.
    pub updated_at: i64,
}

impl PriceQuote {
    /// Returns the price in feed decimals if the quote is usable at `now`.
    pub fn fresh_price(&self, now: i64) -> Result<u128> {
        let age = now.saturating_sub(self.updated_at);
        require_gte!(MAXIMUM_AGE as i64, age, EngineError::StalePrice);
        require_eq!(
            self.exponent,
            -(FEED_DECIMALS as i32),
            EngineError::InvalidPriceExponent
        );
        require_gt!(self.price, 0, EngineError::InvalidPrice);

        Ok(self.price as u128)
    }
}

fn read_price_update(info: &AccountInfo) -> Result<PriceUpdateV2> {
    require_keys_eq!(
        *info.owner,
        pyth_solana_receiver_sdk::ID,
        EngineError::InvalidPriceAccount
    );

    let data = info.try_borrow_data()?;
    PriceUpdateV2::try_deserialize(&mut &data[..])
}

/// Reads the quote for `asset` from a Pyth price update account. Only fully
/// verified updates no older than `MAXIMUM_AGE` at `now` are accepted.
pub fn load_price_quote(
    price_update: &AccountInfo,
    asset: &CollateralAsset,
    now: i64,
) -> Result<PriceQuote> {
    let price_update = read_price_update(price_update)?;
    let clock = Clock {
        unix_timestamp: now,
        ..Clock::default()
    };

    let price = price_update
        .get_price_no_older_than(&clock, MAXIMUM_AGE, &asset.price_feed_id)
        .map_err(|err| {
            msg!("Price update for {} rejected: {}", asset.mint, err);
            match err {
                GetPriceError::PriceTooOld => error!(EngineError::StalePrice),
                GetPriceError::MismatchedFeedId => error!(EngineError::PriceFeedMismatch),
                GetPriceError::InsufficientVerificationLevel => {
                    error!(EngineError::UnverifiedPrice)
                }
                other => other.into(),
            }
        })?;

    Ok(PriceQuote {
        price: price.price,
        exponent: price.exponent,
        updated_at: price.publish_time,
    })
}

/// Loads one fresh price per registered asset. `price_updates` must hold a
/// price update account for every asset, in registry order.
pub fn load_fresh_prices(
    config: &Config,
    price_updates: &[AccountInfo],
    now: i64,
) -> Result<Vec<u128>> {
    require_gte!(
        price_updates.len(),
        config.collateral_assets.len(),
        EngineError::MissingPriceFeed
    );

    config
        .collateral_assets
        .iter()
        .zip(price_updates)
        .map(|(asset, price_update)| load_fresh_price(asset, price_update, now))
        .collect()
}

/// Fresh price of a single registered asset.
pub fn load_fresh_price(
    asset: &CollateralAsset,
    price_update: &AccountInfo,
    now: i64,
) -> Result<u128> {
    load_price_quote(price_update, asset, now)?.fresh_price(now)
}

/// Owned Pyth price update accounts for host tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use pyth_solana_receiver_sdk::price_update::{PriceFeedMessage, VerificationLevel};

    pub struct PriceAccount {
        key: Pubkey,
        owner: Pubkey,
        lamports: u64,
        data: Vec<u8>,
    }

    impl PriceAccount {
        pub fn new(feed_id: [u8; 32], price: i64, publish_time: i64) -> Self {
            Self::with_verification(feed_id, price, publish_time, VerificationLevel::Full)
        }

        pub fn with_verification(
            feed_id: [u8; 32],
            price: i64,
            publish_time: i64,
            verification_level: VerificationLevel,
        ) -> Self {
            let update = PriceUpdateV2 {
                write_authority: Pubkey::new_from_array([42; 32]),
                verification_level,
                price_message: PriceFeedMessage {
                    feed_id,
                    price,
                    conf: 0,
                    exponent: -(FEED_DECIMALS as i32),
                    publish_time,
                    prev_publish_time: publish_time - 1,
                    ema_price: price,
                    ema_conf: 0,
                },
                posted_slot: 1,
            };

            let mut data = Vec::new();
            update.try_serialize(&mut data).unwrap();

            Self {
                key: Pubkey::new_from_array(feed_id),
                owner: pyth_solana_receiver_sdk::ID,
                lamports: 1_000_000,
                data,
            }
        }

        pub fn owned_by(mut self, owner: Pubkey) -> Self {
            self.owner = owner;
            self
        }

        pub fn info(&mut self) -> AccountInfo<'_> {
            AccountInfo::new(
                &self.key,
                false,
                false,
                &mut self.lamports,
                &mut self.data,
                &self.owner,
                false,
                0,
            )
        }
    }
}
