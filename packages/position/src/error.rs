#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PositionError {
    /// Zero-delta refresh of a position with no liquidity
    NoPosition,
    /// Removal larger than the position's liquidity
    InsufficientLiquidity,
    LiquidityOverflow,
    InvalidTickRange,
    TickLowerOutOfBounds,
    TickUpperOutOfBounds,
    TickNotAligned,
    /// Owed fees no longer fit `u128`
    FeeOverflow,
}
