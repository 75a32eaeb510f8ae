use crate::error::MathError;
use alloy_primitives::U256;

/// Returns the index (0 to 255) of the most significant set bit in a `U256`,
/// or `MathError::DivisionByZero` if the input is zero.
///
/// The long division uses this to size a divisor (how many 64-bit digits
/// it occupies) and to find the shift that normalises its top digit, so a
/// zero input is reported the same way a zero divisor is.
pub fn most_significant_bit(x: U256) -> Result<u8, MathError> {
    if x.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    Ok(255 - x.leading_zeros() as u8)
}

/// Number of significant 64-bit digits in a nonzero value and the left shift
/// that sets the top bit of its highest digit.
pub(crate) fn digit_layout(x: U256) -> Result<(usize, u32), MathError> {
    let msb = most_significant_bit(x)?;
    let digits = usize::from(msb / 64) + 1;
    let shift = 63 - u32::from(msb % 64);
    Ok((digits, shift))
}
