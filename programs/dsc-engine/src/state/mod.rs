pub mod config;
pub use config::*;

pub mod position;
pub use position::*;
