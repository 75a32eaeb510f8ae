//! Position management on top of the price formulas.
//!
//! A [`Strategy`] owns an idle token budget and at most one concentrated
//! liquidity [`Position`]. It never touches pool state: every call is
//! evaluated against a [`PoolState`] snapshot supplied by the caller, and
//! all token amounts come from [`math::liquidity_math`](crate::math::liquidity_math).
//!
//! Deposits are rounded up and withdrawals rounded down, so a mint followed
//! by a burn at the same price never returns more than was put in.

mod centered_range;
mod static_range;

pub use centered_range::CenteredRangeStrategy;
pub use static_range::StaticRangeStrategy;

use crate::U160_MAX;
use crate::error::{Error, MathError, PriceError, StrategyError};
use crate::math::liquidity_math::{get_amounts_for_liquidity, get_liquidity_for_amounts};
use crate::math::math_helpers::{mul_div, mul_div_rounding_up};
use alloy_primitives::U256;
use tracing::debug;

const BPS: u32 = 10_000;

/// Read-only snapshot of the pool price a strategy is evaluated against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolState {
    sqrt_price_x96: U256,
}

impl PoolState {
    /// Fails for a zero price or one that is not a Q64.96 value.
    pub fn new(sqrt_price_x96: U256) -> Result<Self, Error> {
        if sqrt_price_x96.is_zero() {
            return Err(PriceError::SqrtPriceIsZero.into());
        }
        if sqrt_price_x96 > U160_MAX {
            return Err(MathError::Overflow.into());
        }
        Ok(Self { sqrt_price_x96 })
    }

    #[inline]
    pub fn sqrt_price_x96(&self) -> U256 {
        self.sqrt_price_x96
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenAmounts {
    pub amount0: U256,
    pub amount1: U256,
}

impl TokenAmounts {
    pub const ZERO: Self = Self {
        amount0: U256::ZERO,
        amount1: U256::ZERO,
    };

    #[inline]
    pub fn new(amount0: U256, amount1: U256) -> Self {
        Self { amount0, amount1 }
    }

    fn checked_add(&self, other: &Self) -> Result<Self, MathError> {
        Ok(Self {
            amount0: self
                .amount0
                .checked_add(other.amount0)
                .ok_or(MathError::Overflow)?,
            amount1: self
                .amount1
                .checked_add(other.amount1)
                .ok_or(MathError::Overflow)?,
        })
    }

    fn checked_sub(&self, other: &Self) -> Result<Self, StrategyError> {
        Ok(Self {
            amount0: self
                .amount0
                .checked_sub(other.amount0)
                .ok_or(StrategyError::InsufficientBalance)?,
            amount1: self
                .amount1
                .checked_sub(other.amount1)
                .ok_or(StrategyError::InsufficientBalance)?,
        })
    }
}

impl From<(U256, U256)> for TokenAmounts {
    fn from((amount0, amount1): (U256, U256)) -> Self {
        Self { amount0, amount1 }
    }
}

/// Width of a range centred on the current price, as a fraction of the
/// sqrt price in basis points on either side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeConfig {
    half_width_bps: u32,
}

impl RangeConfig {
    pub fn new(half_width_bps: u32) -> Result<Self, StrategyError> {
        if half_width_bps == 0 || half_width_bps >= BPS {
            return Err(StrategyError::InvalidRangeWidth);
        }
        Ok(Self { half_width_bps })
    }

    #[inline]
    pub fn half_width_bps(&self) -> u32 {
        self.half_width_bps
    }

    /// `(p * (1 - w), p * (1 + w))`, the lower bound rounded down and the
    /// upper bound rounded up so the range always contains `p`.
    pub fn range_around(&self, sqrt_price_x96: U256) -> Result<(U256, U256), Error> {
        let bps = U256::from(BPS);
        let lower = mul_div(sqrt_price_x96, U256::from(BPS - self.half_width_bps), bps)?;
        let upper = mul_div_rounding_up(sqrt_price_x96, U256::from(BPS + self.half_width_bps), bps)?;
        Ok((lower, upper))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub sqrt_lower_x96: U256,
    pub sqrt_upper_x96: U256,
    pub liquidity: U256,
}

impl Position {
    /// Token amounts backing the position at the pool price.
    pub fn amounts(&self, pool: &PoolState, round_up: bool) -> Result<TokenAmounts, Error> {
        get_amounts_for_liquidity(
            pool.sqrt_price_x96(),
            self.sqrt_lower_x96,
            self.sqrt_upper_x96,
            self.liquidity,
            round_up,
        )
        .map(TokenAmounts::from)
    }

    /// Strictly inside the range, i.e. both tokens are held.
    pub fn is_in_range(&self, pool: &PoolState) -> bool {
        let p = pool.sqrt_price_x96();
        self.sqrt_lower_x96 < p && p < self.sqrt_upper_x96
    }
}

/// A liquidity management policy driven by pool price snapshots.
pub trait Strategy {
    /// Opens the first position from the idle budget and returns what was
    /// deposited.
    fn initialize(&mut self, pool: &PoolState) -> Result<TokenAmounts, Error>;

    /// Applies the variant's rebalancing rule and returns what was deposited
    /// into the resulting position (zero if nothing changed).
    ///
    /// The old position is burned before the new one is minted. If the mint
    /// fails, the error is returned with no position open and every token
    /// left in the idle balances; a later `rebalance` or `initialize` can
    /// mint again.
    fn rebalance(&mut self, pool: &PoolState) -> Result<TokenAmounts, Error>;

    /// Closes the open position into the idle balances and returns what
    /// was withdrawn.
    fn burn_all(&mut self, pool: &PoolState) -> Result<TokenAmounts, Error>;

    /// Idle balances plus the value of the open position at the pool price.
    fn current_amounts(&self, pool: &PoolState) -> Result<TokenAmounts, Error>;
}

/// Idle balances and the open position, shared by the strategy variants.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Book {
    idle: TokenAmounts,
    position: Option<Position>,
}

impl Book {
    fn new(budget: TokenAmounts) -> Self {
        Self {
            idle: budget,
            position: None,
        }
    }

    fn mint(
        &mut self,
        pool: &PoolState,
        sqrt_lower_x96: U256,
        sqrt_upper_x96: U256,
    ) -> Result<TokenAmounts, Error> {
        if self.position.is_some() {
            return Err(StrategyError::PositionAlreadyOpen.into());
        }

        let liquidity = get_liquidity_for_amounts(
            pool.sqrt_price_x96(),
            sqrt_lower_x96,
            sqrt_upper_x96,
            self.idle.amount0,
            self.idle.amount1,
        )?;
        let position = Position {
            sqrt_lower_x96,
            sqrt_upper_x96,
            liquidity,
        };
        let deposited = position.amounts(pool, true)?;
        self.idle = self.idle.checked_sub(&deposited)?;
        self.position = Some(position);

        debug!(
            %sqrt_lower_x96,
            %sqrt_upper_x96,
            %liquidity,
            amount0 = %deposited.amount0,
            amount1 = %deposited.amount1,
            "position minted"
        );
        Ok(deposited)
    }

    fn burn(&mut self, pool: &PoolState) -> Result<TokenAmounts, Error> {
        let position = self.position.ok_or(StrategyError::NoOpenPosition)?;
        let withdrawn = position.amounts(pool, false)?;
        self.idle = self.idle.checked_add(&withdrawn)?;
        self.position = None;

        debug!(
            liquidity = %position.liquidity,
            amount0 = %withdrawn.amount0,
            amount1 = %withdrawn.amount1,
            "position burned"
        );
        Ok(withdrawn)
    }

    fn total(&self, pool: &PoolState) -> Result<TokenAmounts, Error> {
        match &self.position {
            Some(position) => Ok(self.idle.checked_add(&position.amounts(pool, false)?)?),
            None => Ok(self.idle),
        }
    }
}
