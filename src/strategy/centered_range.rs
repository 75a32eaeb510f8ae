use super::{Book, PoolState, Position, RangeConfig, Strategy, TokenAmounts};
use crate::error::Error;
use tracing::debug;

/// Keeps liquidity in a range centred on the pool price.
///
/// While the price stays strictly inside the range rebalancing is a no-op.
/// Once it reaches a bound, the position is burned and a new range is
/// centred on the current price using all idle tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CenteredRangeStrategy {
    config: RangeConfig,
    book: Book,
}

impl CenteredRangeStrategy {
    pub fn new(config: RangeConfig, budget: TokenAmounts) -> Self {
        Self {
            config,
            book: Book::new(budget),
        }
    }

    pub fn position(&self) -> Option<&Position> {
        self.book.position.as_ref()
    }

    pub fn idle(&self) -> TokenAmounts {
        self.book.idle
    }

    fn mint_centered(&mut self, pool: &PoolState) -> Result<TokenAmounts, Error> {
        let (lower, upper) = self.config.range_around(pool.sqrt_price_x96())?;
        self.book.mint(pool, lower, upper)
    }
}

impl Strategy for CenteredRangeStrategy {
    fn initialize(&mut self, pool: &PoolState) -> Result<TokenAmounts, Error> {
        self.mint_centered(pool)
    }

    fn rebalance(&mut self, pool: &PoolState) -> Result<TokenAmounts, Error> {
        match self.book.position {
            Some(position) if position.is_in_range(pool) => return Ok(TokenAmounts::ZERO),
            Some(_) => {
                self.book.burn(pool)?;
            }
            None => {}
        }
        debug!(
            sqrt_price_x96 = %pool.sqrt_price_x96(),
            half_width_bps = self.config.half_width_bps(),
            "recentering range"
        );
        self.mint_centered(pool)
    }

    fn burn_all(&mut self, pool: &PoolState) -> Result<TokenAmounts, Error> {
        self.book.burn(pool)
    }

    fn current_amounts(&self, pool: &PoolState) -> Result<TokenAmounts, Error> {
        self.book.total(pool)
    }
}
