//! Exact 256-bit `mulDiv` arithmetic and Uniswap V3 style sqrt-price formulas.
//!
//! This crate exposes:
//! - A full-width arithmetic kernel (`math::math_helpers`): `mul_div`,
//!   `mul_div_rounding_up` and `div_rounding_up`, built on an exact
//!   256×256→512-bit multiply and 512-by-256-bit long division.
//! - Q64.96 price/liquidity formulas (`math::sqrt_price_math`): token amount
//!   deltas for a price range and the next sqrt price after a swap.
//! - Liquidity sizing helpers (`math::liquidity_math`) and a small
//!   position-management `strategy` layer that consumes the formulas.
//!
//! No operation ever wraps or truncates silently. Every failure is reported
//! as an [`error::Error`].
//!
//! # Examples
//!
//! ```
//! use clmm_full_math::{math::math_helpers::mul_div_rounding_up, U256};
//!
//! let r = mul_div_rounding_up(U256::from(7u8), U256::from(3u8), U256::from(2u8)).unwrap();
//! assert_eq!(r, U256::from(11u8));
//! ```
//!
//! ```
//! use clmm_full_math::{math::sqrt_price_math::get_next_sqrt_price_from_input, Q96, U256};
//!
//! let liquidity = U256::from(1_000_000_000_000_000_000u128);
//! let next = get_next_sqrt_price_from_input(Q96, liquidity, U256::from(1_000_000u32), true).unwrap();
//! assert!(next < Q96);
//! ```

pub use alloy_primitives::{I256, U256};

pub mod error;
pub mod math;
pub mod strategy;

pub const U256_1: U256 = U256::from_limbs([1, 0, 0, 0]);

/// Largest value a Q64.96 sqrt price may take (`2^160 - 1`).
pub const U160_MAX: U256 = U256::from_limbs([u64::MAX, u64::MAX, 4294967295, 0]);

pub const RESOLUTION: u8 = 96;
pub const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);
