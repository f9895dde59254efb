// TidePool Oracle Package
//
// Fixed-capacity ring buffer of cumulative observations. Capacity grows on
// request but slots only come into use once the write cursor wraps onto
// them.

#![no_std]

pub mod error;
pub mod observation;
pub mod types;

pub use error::OracleError;
pub use observation::{grow, initialize, observe_single, transform, write};
pub use types::{Observation, ObservationAccess};
