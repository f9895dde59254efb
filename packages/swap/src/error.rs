use tidepool_math::MathError;
use tidepool_tick::TickError;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SwapError {
    /// Amount specified was zero
    ZeroAmount,
    /// Limit is on the wrong side of the current price or outside bounds
    InvalidPriceLimit,
    Math(MathError),
    Tick(TickError),
}

impl From<MathError> for SwapError {
    fn from(err: MathError) -> Self {
        SwapError::Math(err)
    }
}

impl From<TickError> for SwapError {
    fn from(err: TickError) -> Self {
        SwapError::Tick(err)
    }
}
