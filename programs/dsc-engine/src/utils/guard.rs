use anchor_lang::prelude::*;

use crate::Config;

/// Marks the engine busy and writes the flag to the account right away, so a
/// nested invocation within the same transaction sees it.
pub fn acquire_lock(config: &mut Account<Config>) -> Result<()> {
    config.lock()?;
    config.exit(&crate::ID)
}

/// Cleared in memory only; the handler's account write-back persists it.
pub fn release_lock(config: &mut Account<Config>) {
    config.unlock();
}
