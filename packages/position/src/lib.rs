#![no_std]

pub mod error;
pub mod fees;
pub mod manager;
pub mod types;

pub use error::PositionError;
pub use fees::{calculate_pending_fees, fees_earned};
pub use manager::{update_position, validate_position_params};
pub use types::{Position, PositionInfo};
