use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("Math error - overflow")]
    Overflow,
    #[error("Math error - division by zero")]
    DivisionByZero,
}

/// A violated precondition of one of the sqrt-price formulas.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PriceError {
    #[error("Price error - sqrtPrice is 0")]
    SqrtPriceIsZero,
    #[error("Price error - liquidity is 0")]
    LiquidityIsZero,
    #[error("Price error - requested amount exceeds virtual reserves")]
    InsufficientReserves,
    #[error("Price error - lower and upper sqrtPrice are equal")]
    EmptyRange,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StrategyError {
    #[error("Strategy error - range half width must be in (0, 10000) bps")]
    InvalidRangeWidth,
    #[error("Strategy error - a position is already open")]
    PositionAlreadyOpen,
    #[error("Strategy error - no open position")]
    NoOpenPosition,
    #[error("Strategy error - deposit exceeds idle balance")]
    InsufficientBalance,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    MathError(#[from] crate::error::MathError),

    #[error("Invalid price range: {0}")]
    InvalidPriceRange(#[from] crate::error::PriceError),

    #[error(transparent)]
    StrategyError(#[from] crate::error::StrategyError),
}
