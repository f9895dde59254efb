use tidepool_math::MathError;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TickError {
    /// Gross liquidity at a tick would exceed the per-tick ceiling
    LiquidityCapExceeded,
    LiquidityOverflow,
    LiquidityUnderflow,
    /// Tick is not a multiple of the pool's spacing
    TickNotAligned,
    InvalidTickSpacing,
}

impl From<MathError> for TickError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::LiquidityUnderflow => TickError::LiquidityUnderflow,
            _ => TickError::LiquidityOverflow,
        }
    }
}
