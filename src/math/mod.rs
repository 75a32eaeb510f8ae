pub mod bit_math;
pub mod math_helpers;
pub mod sqrt_price_math;

pub mod liquidity_math;

mod wide_math;
