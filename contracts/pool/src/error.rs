// Error handling for the pool contract
//
// Entry points return `Result<_, PoolError>`; the package crates report their
// own small enums which are folded in here through `From`.

use soroban_sdk::{contracterror, symbol_short, Symbol};
use tidepool_math::MathError;
use tidepool_oracle::OracleError;
use tidepool_position::PositionError;
use tidepool_swap::SwapError;
use tidepool_tick::TickError;

// ============================================================
// CONTRACT ERRORS
// ============================================================

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PoolError {
    // Initialization errors (100-199)
    /// Price has already been set
    AlreadyInitialized = 100,
    /// Price has not been set yet
    NotInitialized = 101,

    // Configuration errors (200-299)
    /// Fee must be below 1_000_000 pips
    InvalidFee = 200,
    /// Spacing must be in 1..=16384
    InvalidTickSpacing = 201,
    /// Protocol share must be 0 or 4..=10
    InvalidFeeProtocol = 202,
    /// Both pool tokens are the same asset
    IdenticalTokens = 203,

    // Tick and range errors (300-399)
    InvalidTickRange = 300,
    TickLowerOutOfBounds = 301,
    TickUpperOutOfBounds = 302,
    TickNotAligned = 303,

    // Price errors (400-499)
    SqrtPriceOutOfBounds = 400,
    InvalidPriceLimit = 401,

    // Liquidity errors (500-599)
    ZeroLiquidity = 500,
    NoPosition = 501,
    InsufficientLiquidity = 502,
    /// Gross liquidity at a tick above the per-tick ceiling
    LiquidityCapExceeded = 503,
    LiquidityOverflow = 504,
    LiquidityUnderflow = 505,
    /// Flash requires in-range liquidity to earn the fee
    NoActiveLiquidity = 506,
    /// Position still holds liquidity or owed tokens
    PositionNotEmpty = 507,

    // Swap errors (600-699)
    ZeroAmount = 600,
    /// Swap callback paid less than the computed input
    InsufficientInputAmount = 601,
    /// Fee hook returned more than the nominal fee
    FeeHookMisbehaved = 602,

    // Flash errors (700-799)
    FlashNotRepaid0 = 700,
    FlashNotRepaid1 = 701,

    // Mint payment errors (800-899)
    InsufficientPayment0 = 800,
    InsufficientPayment1 = 801,

    // Oracle errors (900-999)
    /// Requested time predates the oldest observation
    OracleTooOld = 900,
    OracleUninitialized = 901,

    // Concurrency errors (1000-1099)
    /// A mutating call is already in progress
    Locked = 1000,

    // Math errors (1100-1199)
    MathOverflow = 1100,
    DivisionByZero = 1101,
    /// Token amount does not fit the token interface's i128
    AmountOverflow = 1102,
}

// ============================================================
// PACKAGE ERROR CONVERSION
// ============================================================

impl From<MathError> for PoolError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::Overflow => PoolError::MathOverflow,
            MathError::DivisionByZero => PoolError::DivisionByZero,
            MathError::TickOutOfBounds => PoolError::InvalidTickRange,
            MathError::SqrtPriceOutOfBounds => PoolError::SqrtPriceOutOfBounds,
            MathError::ZeroLiquidity => PoolError::ZeroLiquidity,
            MathError::LiquidityOverflow => PoolError::LiquidityOverflow,
            MathError::LiquidityUnderflow => PoolError::LiquidityUnderflow,
        }
    }
}

impl From<TickError> for PoolError {
    fn from(err: TickError) -> Self {
        match err {
            TickError::LiquidityCapExceeded => PoolError::LiquidityCapExceeded,
            TickError::LiquidityOverflow => PoolError::LiquidityOverflow,
            TickError::LiquidityUnderflow => PoolError::LiquidityUnderflow,
            TickError::TickNotAligned => PoolError::TickNotAligned,
            TickError::InvalidTickSpacing => PoolError::InvalidTickSpacing,
        }
    }
}

impl From<PositionError> for PoolError {
    fn from(err: PositionError) -> Self {
        match err {
            PositionError::NoPosition => PoolError::NoPosition,
            PositionError::InsufficientLiquidity => PoolError::InsufficientLiquidity,
            PositionError::LiquidityOverflow => PoolError::LiquidityOverflow,
            PositionError::InvalidTickRange => PoolError::InvalidTickRange,
            PositionError::TickLowerOutOfBounds => PoolError::TickLowerOutOfBounds,
            PositionError::TickUpperOutOfBounds => PoolError::TickUpperOutOfBounds,
            PositionError::TickNotAligned => PoolError::TickNotAligned,
            PositionError::FeeOverflow => PoolError::MathOverflow,
        }
    }
}

impl From<OracleError> for PoolError {
    fn from(err: OracleError) -> Self {
        match err {
            OracleError::OracleTooOld => PoolError::OracleTooOld,
            OracleError::Uninitialized => PoolError::OracleUninitialized,
        }
    }
}

impl From<SwapError> for PoolError {
    fn from(err: SwapError) -> Self {
        match err {
            SwapError::ZeroAmount => PoolError::ZeroAmount,
            SwapError::InvalidPriceLimit => PoolError::InvalidPriceLimit,
            SwapError::Math(e) => e.into(),
            SwapError::Tick(e) => e.into(),
        }
    }
}

// ============================================================
// ERROR SYMBOLS (for SwapQuote)
// ============================================================

impl PoolError {
    /// Short symbol carried by an invalid quote
    pub fn to_symbol(&self) -> Symbol {
        match self {
            PoolError::NotInitialized => symbol_short!("NOT_INIT"),
            PoolError::ZeroAmount => symbol_short!("AMT_ZERO"),
            PoolError::InvalidPriceLimit => symbol_short!("BAD_LIM"),
            PoolError::FeeHookMisbehaved => symbol_short!("BAD_HOOK"),
            PoolError::LiquidityOverflow | PoolError::LiquidityUnderflow => symbol_short!("LIQ_OVF"),
            PoolError::MathOverflow | PoolError::AmountOverflow => symbol_short!("OVERFLOW"),
            _ => symbol_short!("ERROR"),
        }
    }
}
