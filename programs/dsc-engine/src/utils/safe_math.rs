use anchor_lang::prelude::*;
use std::panic::Location;

use crate::error::EngineError;

/// Checked arithmetic that reports the calling line before failing with
/// `MathOverflow`.
pub trait SafeMath: Sized {
    fn safe_add(self, rhs: Self) -> Result<Self>;
    fn safe_sub(self, rhs: Self) -> Result<Self>;
    fn safe_mul(self, rhs: Self) -> Result<Self>;
    fn safe_div(self, rhs: Self) -> Result<Self>;
    fn safe_pow(self, exp: u32) -> Result<Self>;
}

#[track_caller]
#[inline(never)]
fn math_error(what: &str) -> Error {
    let caller = Location::caller();
    msg!("{} at {}:{}", what, caller.file(), caller.line());
    error!(EngineError::MathOverflow)
}

macro_rules! checked_op {
    ($name:ident, $checked:ident, $rhs:ty, $what:literal) => {
        #[track_caller]
        #[inline(always)]
        fn $name(self, rhs: $rhs) -> Result<Self> {
            match self.$checked(rhs) {
                Some(result) => Ok(result),
                None => Err(math_error($what)),
            }
        }
    };
}

macro_rules! safe_math_impl {
    ($($t:ty),+) => {
        $(
            impl SafeMath for $t {
                checked_op!(safe_add, checked_add, $t, "Math overflow");
                checked_op!(safe_sub, checked_sub, $t, "Math underflow");
                checked_op!(safe_mul, checked_mul, $t, "Math overflow");
                checked_op!(safe_div, checked_div, $t, "Division error");
                checked_op!(safe_pow, checked_pow, u32, "Exponentiation overflow");
            }
        )+
    };
}

safe_math_impl!(u64, u128);

/// In-place variants used by ledger balances.
pub trait SafeMathAssign {
    fn safe_add_assign(&mut self, rhs: Self) -> Result<()>;
    fn safe_sub_assign(&mut self, rhs: Self) -> Result<()>;
}

impl<T: SafeMath + Copy> SafeMathAssign for T {
    #[track_caller]
    fn safe_add_assign(&mut self, rhs: T) -> Result<()> {
        *self = (*self).safe_add(rhs)?;
        Ok(())
    }

    #[track_caller]
    fn safe_sub_assign(&mut self, rhs: T) -> Result<()> {
        *self = (*self).safe_sub(rhs)?;
        Ok(())
    }
}

/// Narrows a `u128` intermediate back to a token amount.
pub fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(EngineError::ConversionFailed))
}

/// Applies a basis-point share to `value`, truncating.
pub fn apply_bps(value: u128, bps: u128) -> Result<u128> {
    value.safe_mul(bps)?.safe_div(crate::MAX_BASIS_POINTS)
}
