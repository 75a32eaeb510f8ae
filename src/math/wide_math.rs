//! Full-width 256×256→512-bit multiplication and 512-by-256-bit long
//! division, the building blocks of [`mul_div`](super::math_helpers::mul_div).
//!
//! Nothing here wraps: the product is exact, and a quotient that does not fit
//! back into 256 bits is reported as [`MathError::Overflow`] instead of being
//! truncated to its low limbs.

use crate::error::MathError;
use crate::math::bit_math::digit_layout;
use alloy_primitives::U256;

const WIDE_LIMBS: usize = 8;
const NARROW_LIMBS: usize = 4;
const DIGIT_MASK: u128 = u64::MAX as u128;
const DIGIT_BASE: u128 = 1 << 64;

/// Exact product of two `U256` values as eight little-endian 64-bit limbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct WideProduct {
    limbs: [u64; WIDE_LIMBS],
}

impl WideProduct {
    #[cfg(test)]
    pub(crate) fn limbs(&self) -> &[u64; WIDE_LIMBS] {
        &self.limbs
    }

    fn significant_digits(&self) -> usize {
        WIDE_LIMBS - self.limbs.iter().rev().take_while(|&&l| l == 0).count()
    }
}

/// Splits a `U256` into its low and high 128-bit halves.
#[inline(always)]
fn halves(x: U256) -> (u128, u128) {
    let l = x.as_limbs();
    (
        u128::from(l[0]) | (u128::from(l[1]) << 64),
        u128::from(l[2]) | (u128::from(l[3]) << 64),
    )
}

/// 128×128→256-bit product as `(high, low)`.
#[inline(always)]
fn mul_128(x: u128, y: u128) -> (u128, u128) {
    let (x0, x1) = (x & DIGIT_MASK, x >> 64);
    let (y0, y1) = (y & DIGIT_MASK, y >> 64);

    let p00 = x0 * y0;
    let p01 = x0 * y1;
    let p10 = x1 * y0;
    let p11 = x1 * y1;

    let mid = (p00 >> 64) + (p01 & DIGIT_MASK) + (p10 & DIGIT_MASK);
    let low = (p00 & DIGIT_MASK) | (mid << 64);
    let high = p11 + (p01 >> 64) + (p10 >> 64) + (mid >> 64);
    (high, low)
}

/// Computes the exact 512-bit product `a * b`.
pub(crate) fn full_mul(a: U256, b: U256) -> WideProduct {
    let (a_lo, a_hi) = halves(a);
    let (b_lo, b_hi) = halves(b);

    let (ll_hi, ll_lo) = mul_128(a_lo, b_lo);
    let (lh_hi, lh_lo) = mul_128(a_lo, b_hi);
    let (hl_hi, hl_lo) = mul_128(a_hi, b_lo);
    let (hh_hi, hh_lo) = mul_128(a_hi, b_hi);

    let w0 = ll_lo;

    let (w1, c1) = ll_hi.overflowing_add(lh_lo);
    let (w1, c2) = w1.overflowing_add(hl_lo);
    let carry = u128::from(c1) + u128::from(c2);

    let (w2, c1) = hh_lo.overflowing_add(lh_hi);
    let (w2, c2) = w2.overflowing_add(hl_hi);
    let (w2, c3) = w2.overflowing_add(carry);
    let carry = u128::from(c1) + u128::from(c2) + u128::from(c3);

    // a * b < 2^512, so the top word never carries out
    let w3 = hh_hi + carry;

    let mut limbs = [0u64; WIDE_LIMBS];
    for (i, word) in [w0, w1, w2, w3].into_iter().enumerate() {
        limbs[2 * i] = word as u64;
        limbs[2 * i + 1] = (word >> 64) as u64;
    }
    WideProduct { limbs }
}

/// Narrows a limb buffer to `U256`, failing if any limb above the fourth is set.
fn narrow(limbs: &[u64; WIDE_LIMBS]) -> Result<U256, MathError> {
    if limbs[NARROW_LIMBS..].iter().any(|&l| l != 0) {
        return Err(MathError::Overflow);
    }
    let mut low = [0u64; NARROW_LIMBS];
    low.copy_from_slice(&limbs[..NARROW_LIMBS]);
    Ok(U256::from_limbs(low))
}

#[inline(always)]
fn shl_digit(high: u64, low: u64, shift: u32) -> u64 {
    if shift == 0 {
        high
    } else {
        (high << shift) | (low >> (64 - shift))
    }
}

/// Divides a wide dividend by `divisor`, returning `(quotient, remainder)`
/// with `dividend = quotient * divisor + remainder` and `remainder < divisor`.
///
/// Returns `MathError::DivisionByZero` for a zero divisor and
/// `MathError::Overflow` when the quotient needs more than 256 bits.
pub(crate) fn div_rem(dividend: &WideProduct, divisor: U256) -> Result<(U256, U256), MathError> {
    let (n, shift) = digit_layout(divisor)?;
    let m = dividend.significant_digits();

    if m < n {
        return Ok((U256::ZERO, narrow(&dividend.limbs)?));
    }

    let mut quotient = [0u64; WIDE_LIMBS];
    let v = divisor.as_limbs();
    let remainder = if n == 1 {
        short_division(&dividend.limbs[..m], v[0], &mut quotient)
    } else {
        long_division(&dividend.limbs[..m], &v[..n], shift, &mut quotient)
    };

    Ok((narrow(&quotient)?, remainder))
}

/// Division by a single 64-bit digit.
fn short_division(u: &[u64], d: u64, quotient: &mut [u64; WIDE_LIMBS]) -> U256 {
    let d = u128::from(d);
    let mut rem = 0u128;
    for i in (0..u.len()).rev() {
        let cur = (rem << 64) | u128::from(u[i]);
        quotient[i] = (cur / d) as u64;
        rem = cur % d;
    }
    U256::from(rem as u64)
}

/// Knuth's algorithm D with 64-bit digits. Requires `v.len() >= 2`,
/// `u.len() >= v.len()` and a nonzero top digit in both.
fn long_division(u: &[u64], v: &[u64], shift: u32, quotient: &mut [u64; WIDE_LIMBS]) -> U256 {
    let (m, n) = (u.len(), v.len());

    let mut vn = [0u64; NARROW_LIMBS];
    for i in (1..n).rev() {
        vn[i] = shl_digit(v[i], v[i - 1], shift);
    }
    vn[0] = v[0] << shift;

    let mut un = [0u64; WIDE_LIMBS + 1];
    un[m] = shl_digit(0, u[m - 1], shift);
    for i in (1..m).rev() {
        un[i] = shl_digit(u[i], u[i - 1], shift);
    }
    un[0] = u[0] << shift;

    let top = u128::from(vn[n - 1]);
    let next = u128::from(vn[n - 2]);

    for j in (0..=m - n).rev() {
        // estimate from the top two digits, then correct by at most two
        let num = (u128::from(un[j + n]) << 64) | u128::from(un[j + n - 1]);
        let mut qhat = num / top;
        let mut rhat = num % top;
        while qhat >= DIGIT_BASE || qhat * next > ((rhat << 64) | u128::from(un[j + n - 2])) {
            qhat -= 1;
            rhat += top;
            if rhat >= DIGIT_BASE {
                break;
            }
        }

        let mut mul_carry = 0u64;
        let mut borrow = false;
        for i in 0..n {
            let p = qhat * u128::from(vn[i]) + u128::from(mul_carry);
            mul_carry = (p >> 64) as u64;
            let (d1, b1) = un[i + j].overflowing_sub(p as u64);
            let (d2, b2) = d1.overflowing_sub(u64::from(borrow));
            un[i + j] = d2;
            borrow = b1 || b2;
        }
        let (d1, b1) = un[j + n].overflowing_sub(mul_carry);
        let (d2, b2) = d1.overflowing_sub(u64::from(borrow));
        un[j + n] = d2;

        let mut digit = qhat as u64;
        if b1 || b2 {
            // qhat was one too large: add the divisor back
            digit -= 1;
            let mut carry = 0u128;
            for i in 0..n {
                let s = u128::from(un[i + j]) + u128::from(vn[i]) + carry;
                un[i + j] = s as u64;
                carry = s >> 64;
            }
            un[j + n] = un[j + n].wrapping_add(carry as u64);
        }
        quotient[j] = digit;
    }

    let mut rem = [0u64; NARROW_LIMBS];
    for i in 0..n {
        rem[i] = if shift == 0 {
            un[i]
        } else {
            (un[i] >> shift) | (un[i + 1] << (64 - shift))
        };
    }
    U256::from_limbs(rem)
}
