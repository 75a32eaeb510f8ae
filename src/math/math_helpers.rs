use crate::U256_1;
use crate::error::MathError;
use crate::math::wide_math::{div_rem, full_mul};
use alloy_primitives::U256;
use tracing::debug;

/// Computes `a * b / denominator` and the remainder of that division,
/// both exact.
pub(crate) fn mul_div_rem(a: U256, b: U256, denominator: U256) -> Result<(U256, U256), MathError> {
    if a.is_zero() || b.is_zero() {
        return Ok((U256::ZERO, U256::ZERO));
    }

    div_rem(&full_mul(a, b), denominator).inspect_err(|err| {
        debug!(%a, %b, %denominator, ?err, "mul_div rejected");
    })
}

/// Computes `floor(a * b / denominator)` with a full 512-bit intermediate,
/// returning a `MathError` on overflow or division by zero.
///
/// A zero factor short-circuits to `0` before the denominator is looked at,
/// so `mul_div(0, b, 0)` is `Ok(0)`.
///
/// This mirrors the Solidity `FullMath.mulDiv` behavior and underpins
/// many of the higher-level swap and liquidity calculations.
#[inline]
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    mul_div_rem(a, b, denominator).map(|(quotient, _)| quotient)
}

/// Like [`mul_div`], but rounds the result up when there is a
/// non-zero remainder, returning an overflow error if the result
/// would exceed `U256::MAX`.
#[inline]
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    let (quotient, remainder) = mul_div_rem(a, b, denominator)?;

    if remainder.is_zero() {
        Ok(quotient)
    } else {
        quotient.checked_add(U256_1).ok_or(MathError::Overflow)
    }
}

/// Divides `x` by `y`, rounding the result up to the next integer
/// when there is a non-zero remainder.
///
/// No widening is involved, so the quotient always fits; the only failure
/// is `MathError::DivisionByZero`.
#[inline]
pub fn div_rounding_up(x: U256, y: U256) -> Result<U256, MathError> {
    if y.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let (quotient, remainder) = x.div_rem(y);
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        Ok(quotient + U256_1)
    }
}
