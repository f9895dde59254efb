#![no_std]

pub mod engine;
pub mod error;
pub mod types;

pub use engine::{execute_swap, validate_price_limit};
pub use error::SwapError;
pub use types::{SwapComputation, SwapConfig, SwapParams, SwapState};
