pub mod guard;
pub use guard::*;

pub mod health_factor;
pub use health_factor::*;

pub mod liquidation;
pub use liquidation::*;

pub mod oracle;
pub use oracle::*;

pub mod positions;
pub use positions::*;

pub mod safe_math;
pub use safe_math::*;

pub mod signer_seeds;

pub mod token;
pub use token::*;

pub mod valuation;
pub use valuation::*;
