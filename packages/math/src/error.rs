/// Failures of the fixed-point primitives.
///
/// Every arithmetic path that could wrap or lose precision reports one of
/// these instead of producing a silently wrong value.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MathError {
    /// Result does not fit the destination type
    Overflow,
    /// Denominator was zero
    DivisionByZero,
    /// Tick outside `[MIN_TICK, MAX_TICK]`
    TickOutOfBounds,
    /// Sqrt price outside `[MIN_SQRT_PRICE_X96, MAX_SQRT_PRICE_X96)`
    SqrtPriceOutOfBounds,
    /// Price movement requested against zero liquidity
    ZeroLiquidity,
    /// Liquidity addition exceeded `u128::MAX`
    LiquidityOverflow,
    /// Liquidity removal went below zero
    LiquidityUnderflow,
}
