use crate::Q96;
use crate::error::{Error, PriceError};
use crate::math::math_helpers::mul_div;
use crate::math::sqrt_price_math::{get_amount_0_delta_base, get_amount_1_delta_base};
use alloy_primitives::U256;

fn ordered_range(sqrt_ratio_a_x96: U256, sqrt_ratio_b_x96: U256) -> Result<(U256, U256), PriceError> {
    if sqrt_ratio_a_x96 == sqrt_ratio_b_x96 {
        return Err(PriceError::EmptyRange);
    }
    if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        Ok((sqrt_ratio_b_x96, sqrt_ratio_a_x96))
    } else {
        Ok((sqrt_ratio_a_x96, sqrt_ratio_b_x96))
    }
}

/// Computes the liquidity received for a given amount of token0 and price
/// range: `amount0 * (sqrt_a * sqrt_b / 2^96) / (sqrt_b - sqrt_a)`, rounded down.
pub fn get_liquidity_for_amount_0(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount_0: U256,
) -> Result<U256, Error> {
    let (lower, upper) = ordered_range(sqrt_ratio_a_x96, sqrt_ratio_b_x96)?;
    let intermediate = mul_div(lower, upper, Q96)?;
    Ok(mul_div(amount_0, intermediate, upper - lower)?)
}

/// Computes the liquidity received for a given amount of token1 and price
/// range: `amount1 * 2^96 / (sqrt_b - sqrt_a)`, rounded down.
pub fn get_liquidity_for_amount_1(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount_1: U256,
) -> Result<U256, Error> {
    let (lower, upper) = ordered_range(sqrt_ratio_a_x96, sqrt_ratio_b_x96)?;
    Ok(mul_div(amount_1, Q96, upper - lower)?)
}

/// Computes the largest liquidity that both amounts can back for the range
/// at the current pool price.
///
/// Below the range only token0 counts, above it only token1, and inside
/// it the smaller of the two single-token liquidities.
pub fn get_liquidity_for_amounts(
    sqrt_ratio_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount_0: U256,
    amount_1: U256,
) -> Result<U256, Error> {
    let (lower, upper) = ordered_range(sqrt_ratio_a_x96, sqrt_ratio_b_x96)?;

    if sqrt_ratio_x96 <= lower {
        get_liquidity_for_amount_0(lower, upper, amount_0)
    } else if sqrt_ratio_x96 < upper {
        let liquidity_0 = get_liquidity_for_amount_0(sqrt_ratio_x96, upper, amount_0)?;
        let liquidity_1 = get_liquidity_for_amount_1(lower, sqrt_ratio_x96, amount_1)?;
        Ok(liquidity_0.min(liquidity_1))
    } else {
        get_liquidity_for_amount_1(lower, upper, amount_1)
    }
}

/// Token amounts `(amount0, amount1)` backing `liquidity` in the range at
/// the current pool price. Deposits should round up, withdrawals down.
pub fn get_amounts_for_liquidity(
    sqrt_ratio_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: U256,
    round_up: bool,
) -> Result<(U256, U256), Error> {
    let (lower, upper) = ordered_range(sqrt_ratio_a_x96, sqrt_ratio_b_x96)?;

    if sqrt_ratio_x96 <= lower {
        Ok((
            get_amount_0_delta_base(lower, upper, liquidity, round_up)?,
            U256::ZERO,
        ))
    } else if sqrt_ratio_x96 < upper {
        Ok((
            get_amount_0_delta_base(sqrt_ratio_x96, upper, liquidity, round_up)?,
            get_amount_1_delta_base(lower, sqrt_ratio_x96, liquidity, round_up)?,
        ))
    } else {
        Ok((
            U256::ZERO,
            get_amount_1_delta_base(lower, upper, liquidity, round_up)?,
        ))
    }
}
