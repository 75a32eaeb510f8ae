use super::{Book, PoolState, Position, Strategy, TokenAmounts};
use crate::error::{Error, PriceError};
use alloy_primitives::U256;
use tracing::debug;

/// Provides liquidity in one fixed price range for its whole life.
///
/// Rebalancing never moves the range; it burns the position and mints it
/// again with every idle token, compounding whatever the burn returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticRangeStrategy {
    sqrt_lower_x96: U256,
    sqrt_upper_x96: U256,
    book: Book,
}

impl StaticRangeStrategy {
    pub fn new(
        sqrt_ratio_a_x96: U256,
        sqrt_ratio_b_x96: U256,
        budget: TokenAmounts,
    ) -> Result<Self, Error> {
        let (sqrt_lower_x96, sqrt_upper_x96) = if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
            (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
        } else {
            (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
        };
        if sqrt_lower_x96.is_zero() {
            return Err(PriceError::SqrtPriceIsZero.into());
        }
        if sqrt_lower_x96 == sqrt_upper_x96 {
            return Err(PriceError::EmptyRange.into());
        }
        Ok(Self {
            sqrt_lower_x96,
            sqrt_upper_x96,
            book: Book::new(budget),
        })
    }

    pub fn position(&self) -> Option<&Position> {
        self.book.position.as_ref()
    }

    pub fn idle(&self) -> TokenAmounts {
        self.book.idle
    }
}

impl Strategy for StaticRangeStrategy {
    fn initialize(&mut self, pool: &PoolState) -> Result<TokenAmounts, Error> {
        self.book.mint(pool, self.sqrt_lower_x96, self.sqrt_upper_x96)
    }

    fn rebalance(&mut self, pool: &PoolState) -> Result<TokenAmounts, Error> {
        if self.book.position.is_some() {
            self.book.burn(pool)?;
        }
        debug!(sqrt_price_x96 = %pool.sqrt_price_x96(), "re-minting static range");
        self.book.mint(pool, self.sqrt_lower_x96, self.sqrt_upper_x96)
    }

    fn burn_all(&mut self, pool: &PoolState) -> Result<TokenAmounts, Error> {
        self.book.burn(pool)
    }

    fn current_amounts(&self, pool: &PoolState) -> Result<TokenAmounts, Error> {
        self.book.total(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Q96;
    use crate::error::{MathError, StrategyError};
    use crate::strategy::RangeConfig;

    fn e18() -> U256 {
        U256::from(1_000_000_000_000_000_000u128)
    }

    fn strategy() -> StaticRangeStrategy {
        let (lower, upper) = RangeConfig::new(1000).unwrap().range_around(Q96).unwrap();
        StaticRangeStrategy::new(upper, lower, TokenAmounts::new(e18(), e18())).unwrap()
    }

    #[test]
    fn new_rejects_degenerate_ranges() {
        assert!(matches!(
            StaticRangeStrategy::new(Q96, Q96, TokenAmounts::ZERO),
            Err(Error::InvalidPriceRange(PriceError::EmptyRange))
        ));
        assert!(matches!(
            StaticRangeStrategy::new(U256::ZERO, Q96, TokenAmounts::ZERO),
            Err(Error::InvalidPriceRange(PriceError::SqrtPriceIsZero))
        ));
    }

    #[test]
    fn initialize_opens_position_in_given_range() {
        let pool = PoolState::new(Q96).unwrap();
        let mut s = strategy();
        let deposited = s.initialize(&pool).unwrap();

        let position = s.position().unwrap();
        assert!(position.sqrt_lower_x96 < position.sqrt_upper_x96);
        assert!(position.is_in_range(&pool));
        assert_eq!(s.idle().amount0, e18() - deposited.amount0);
        assert_eq!(s.idle().amount1, e18() - deposited.amount1);
    }

    #[test]
    fn initialize_twice_fails() {
        let pool = PoolState::new(Q96).unwrap();
        let mut s = strategy();
        s.initialize(&pool).unwrap();
        assert!(matches!(
            s.initialize(&pool),
            Err(Error::StrategyError(StrategyError::PositionAlreadyOpen))
        ));
    }

    #[test]
    fn rebalance_keeps_the_range() {
        let pool = PoolState::new(Q96).unwrap();
        let mut s = strategy();
        s.initialize(&pool).unwrap();
        let before = *s.position().unwrap();

        let moved = PoolState::new(Q96 + (Q96 >> 4)).unwrap();
        s.rebalance(&moved).unwrap();
        let after = *s.position().unwrap();

        assert_eq!(after.sqrt_lower_x96, before.sqrt_lower_x96);
        assert_eq!(after.sqrt_upper_x96, before.sqrt_upper_x96);
    }

    #[test]
    fn rebalance_without_position_mints() {
        let pool = PoolState::new(Q96).unwrap();
        let mut s = strategy();
        s.rebalance(&pool).unwrap();
        assert!(s.position().is_some());
        s.burn_all(&pool).unwrap();
        assert!(matches!(
            s.burn_all(&pool),
            Err(Error::StrategyError(StrategyError::NoOpenPosition))
        ));
    }

    #[test]
    fn failed_remint_leaves_funds_idle() {
        let (lower, upper) = RangeConfig::new(1000).unwrap().range_around(Q96).unwrap();
        let budget = TokenAmounts::new(e18(), U256::MAX >> 1);
        let mut s = StaticRangeStrategy::new(lower, upper, budget).unwrap();

        // below the range only token0 is deposited
        let below = PoolState::new(Q96 >> 1).unwrap();
        let deposited = s.initialize(&below).unwrap();
        assert_eq!(deposited, TokenAmounts::new(e18(), U256::ZERO));

        // above it the whole token1 balance backs more liquidity than fits
        let above = PoolState::new(Q96 << 1).unwrap();
        assert!(matches!(
            s.rebalance(&above),
            Err(Error::MathError(MathError::Overflow))
        ));
        assert!(s.position().is_none());
        assert_eq!(
            s.idle(),
            TokenAmounts::new(
                U256::ZERO,
                (U256::MAX >> 1) + U256::from(989999999999999999u128),
            )
        );
        assert_eq!(s.current_amounts(&above).unwrap(), s.idle());
    }

    #[test]
    fn price_above_range_leaves_only_token1() {
        let pool = PoolState::new(Q96).unwrap();
        let mut s = strategy();
        s.initialize(&pool).unwrap();

        let above = PoolState::new(Q96 << 1).unwrap();
        let withdrawn = s.burn_all(&above).unwrap();
        assert_eq!(withdrawn.amount0, U256::ZERO);
        assert_eq!(withdrawn.amount1, U256::from(1999999999999999999u128));
        assert!(s.position().is_none());
        assert_eq!(s.current_amounts(&above).unwrap(), s.idle());
    }
}
