use crate::error::{Error, MathError, PriceError};
use crate::math::math_helpers::{div_rounding_up, mul_div, mul_div_rounding_up};
use crate::{Q96, RESOLUTION, U160_MAX};
use alloy_primitives::{I256, U256};
use tracing::debug;

/// `liquidity << 96`, or `MathError::Overflow` if that loses bits.
#[inline(always)]
fn liquidity_x96(liquidity: U256) -> Result<U256, MathError> {
    if liquidity.leading_zeros() < usize::from(RESOLUTION) {
        return Err(MathError::Overflow);
    }
    Ok(liquidity << RESOLUTION)
}

/// A computed sqrt price must still be a Q64.96 value.
#[inline(always)]
fn checked_sqrt_price(sqrt_p_x96: U256) -> Result<U256, Error> {
    if sqrt_p_x96 > U160_MAX {
        debug!(%sqrt_p_x96, "next sqrt price exceeds 160 bits");
        return Err(MathError::Overflow.into());
    }
    Ok(sqrt_p_x96)
}

/// Rejects a zero price or liquidity, and a starting price that is not a
/// Q64.96 value, before either swap direction is taken.
fn validate_pool_state(sqrt_p_x96: U256, liquidity: U256) -> Result<(), Error> {
    if sqrt_p_x96.is_zero() {
        return Err(PriceError::SqrtPriceIsZero.into());
    }
    if liquidity.is_zero() {
        return Err(PriceError::LiquidityIsZero.into());
    }
    checked_sqrt_price(sqrt_p_x96)?;
    Ok(())
}

#[inline(always)]
fn ordered(sqrt_ratio_a_x96: U256, sqrt_ratio_b_x96: U256) -> (U256, U256) {
    if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    }
}

/// Computes the next sqrt price after swapping token0, rounding the
/// resulting price up, given current price, liquidity, amount, and
/// whether the amount is added or removed.
///
/// This is the low-level primitive used by higher-level swap math.
pub fn get_next_sqrt_price_from_amount_0_rounding_up(
    sqrt_p_x96: U256,
    liquidity: U256,
    amount: U256,
    add: bool,
) -> Result<U256, Error> {
    validate_pool_state(sqrt_p_x96, liquidity)?;
    if amount.is_zero() {
        return Ok(sqrt_p_x96);
    }

    let numerator1 = liquidity_x96(liquidity)?;

    if add {
        if let Some(product) = amount.checked_mul(sqrt_p_x96) {
            if let Some(denominator) = numerator1.checked_add(product) {
                return Ok(mul_div_rounding_up(numerator1, sqrt_p_x96, denominator)?);
            }
        }
        // L / (L / P + x), less precise but free of the amount * price product
        let denominator = (numerator1 / sqrt_p_x96)
            .checked_add(amount)
            .ok_or(MathError::Overflow)?;
        Ok(div_rounding_up(numerator1, denominator)?)
    } else {
        let product = amount
            .checked_mul(sqrt_p_x96)
            .filter(|product| numerator1 > *product)
            .ok_or(PriceError::InsufficientReserves)?;
        let next = mul_div_rounding_up(numerator1, sqrt_p_x96, numerator1 - product)?;
        checked_sqrt_price(next)
    }
}

/// Computes the next sqrt price after swapping token1, rounding the
/// resulting price down, given current price, liquidity, amount, and
/// direction (add/remove).
pub fn get_next_sqrt_price_from_amount_1_rounding_down(
    sqrt_p_x96: U256,
    liquidity: U256,
    amount: U256,
    add: bool,
) -> Result<U256, Error> {
    validate_pool_state(sqrt_p_x96, liquidity)?;

    if add {
        let quotient = if amount <= U160_MAX {
            (amount << RESOLUTION) / liquidity
        } else {
            mul_div(amount, Q96, liquidity)?
        };

        let next = sqrt_p_x96
            .checked_add(quotient)
            .ok_or(MathError::Overflow)?;
        checked_sqrt_price(next)
    } else {
        let quotient = if amount <= U160_MAX {
            div_rounding_up(amount << RESOLUTION, liquidity)?
        } else {
            mul_div_rounding_up(amount, Q96, liquidity)?
        };

        if sqrt_p_x96 <= quotient {
            debug!(%sqrt_p_x96, %quotient, "token1 output exceeds virtual reserves");
            return Err(PriceError::InsufficientReserves.into());
        }
        checked_sqrt_price(sqrt_p_x96 - quotient)
    }
}

/// Returns the two factors of the token0 delta numerator,
/// `(liquidity << 96, sqrt_upper - sqrt_lower)`, after ordering the bounds.
///
/// Their product can need up to 512 bits, which is why the division in
/// [`get_amount_0_delta_base`] goes through `mul_div` instead of
/// multiplying them out.
pub fn get_amount_0_delta_numerator(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: U256,
) -> Result<(U256, U256), MathError> {
    let (lower, upper) = ordered(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    Ok((liquidity_x96(liquidity)?, upper - lower))
}

/// Core helper for computing the token0 amount delta between two
/// sqrt prices for a given liquidity, optionally rounding up.
///
/// The bounds may be given in either order. Division by `lower * upper`
/// is done in two steps, first by `upper` then by `lower`, which rounds
/// exactly like a single division would.
pub fn get_amount_0_delta_base(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: U256,
    round_up: bool,
) -> Result<U256, Error> {
    let (lower, upper) = ordered(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    if lower.is_zero() {
        return Err(PriceError::SqrtPriceIsZero.into());
    }

    let (numerator1, numerator2) = get_amount_0_delta_numerator(lower, upper, liquidity)?;

    if round_up {
        Ok(div_rounding_up(
            mul_div_rounding_up(numerator1, numerator2, upper)?,
            lower,
        )?)
    } else {
        Ok(mul_div(numerator1, numerator2, upper)? / lower)
    }
}

/// Core helper for computing the token1 amount delta between two
/// sqrt prices for a given liquidity, optionally rounding up.
pub fn get_amount_1_delta_base(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: U256,
    round_up: bool,
) -> Result<U256, Error> {
    let (lower, upper) = ordered(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    if round_up {
        Ok(mul_div_rounding_up(liquidity, upper - lower, Q96)?)
    } else {
        Ok(mul_div(liquidity, upper - lower, Q96)?)
    }
}

/// Applies the sign convention of the signed wrappers: a negative
/// liquidity is removed, so its magnitude is rounded down and the amount
/// comes back negative; anything else is rounded up and stays positive.
///
/// A negative result is the two's-complement `I256`, so its raw `U256`
/// encoding is `2^256 - magnitude`.
fn signed_delta<F>(liquidity: I256, delta: F) -> Result<I256, Error>
where
    F: FnOnce(U256, bool) -> Result<U256, Error>,
{
    if liquidity.is_negative() {
        let magnitude = delta(liquidity.unsigned_abs(), false)?;
        if magnitude > I256::MIN.unsigned_abs() {
            return Err(MathError::Overflow.into());
        }
        Ok(I256::from_raw(magnitude.wrapping_neg()))
    } else {
        let magnitude = delta(liquidity.into_raw(), true)?;
        if magnitude > I256::MAX.into_raw() {
            return Err(MathError::Overflow.into());
        }
        Ok(I256::from_raw(magnitude))
    }
}

/// Public wrapper for computing the signed token0 amount delta between
/// two sqrt prices for a signed liquidity amount.
pub fn get_amount_0_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: I256,
) -> Result<I256, Error> {
    signed_delta(liquidity, |magnitude, round_up| {
        get_amount_0_delta_base(sqrt_ratio_a_x96, sqrt_ratio_b_x96, magnitude, round_up)
    })
}

/// Public wrapper for computing the signed token1 amount delta between
/// two sqrt prices for a signed liquidity amount.
pub fn get_amount_1_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: I256,
) -> Result<I256, Error> {
    signed_delta(liquidity, |magnitude, round_up| {
        get_amount_1_delta_base(sqrt_ratio_a_x96, sqrt_ratio_b_x96, magnitude, round_up)
    })
}

/// Computes the next sqrt price when swapping *into* the pool
/// (`amount_in`), choosing the correct branch for token0/token1
/// depending on `zero_for_one`.
pub fn get_next_sqrt_price_from_input(
    sqrt_p_x96: U256,
    liquidity: U256,
    amount_in: U256,
    zero_for_one: bool,
) -> Result<U256, Error> {
    validate_pool_state(sqrt_p_x96, liquidity)?;

    if zero_for_one {
        get_next_sqrt_price_from_amount_0_rounding_up(sqrt_p_x96, liquidity, amount_in, true)
    } else {
        get_next_sqrt_price_from_amount_1_rounding_down(sqrt_p_x96, liquidity, amount_in, true)
    }
}

/// Computes the next sqrt price when swapping *out of* the pool
/// (`amount_out`), choosing the correct branch for token0/token1
/// depending on `zero_for_one`.
pub fn get_next_sqrt_price_from_output(
    sqrt_p_x96: U256,
    liquidity: U256,
    amount_out: U256,
    zero_for_one: bool,
) -> Result<U256, Error> {
    validate_pool_state(sqrt_p_x96, liquidity)?;

    if zero_for_one {
        get_next_sqrt_price_from_amount_1_rounding_down(sqrt_p_x96, liquidity, amount_out, false)
    } else {
        get_next_sqrt_price_from_amount_0_rounding_up(sqrt_p_x96, liquidity, amount_out, false)
    }
}
