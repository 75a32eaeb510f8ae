#![allow(dead_code)]

use clmm_full_math::math::bit_math::most_significant_bit;
use clmm_full_math::math::liquidity_math::{get_amounts_for_liquidity, get_liquidity_for_amounts};
use clmm_full_math::math::math_helpers::{div_rounding_up, mul_div, mul_div_rounding_up};
use clmm_full_math::math::sqrt_price_math::{
    get_amount_0_delta, get_amount_1_delta, get_next_sqrt_price_from_input,
    get_next_sqrt_price_from_output,
};
use clmm_full_math::strategy::{
    CenteredRangeStrategy, PoolState, RangeConfig, Strategy, TokenAmounts,
};
use clmm_full_math::{I256, Q96, U256};
use criterion::{BenchmarkId, Criterion};
use std::hint::black_box;

fn e18() -> U256 {
    U256::from(1_000_000_000_000_000_000u128)
}

pub fn bench_math_helpers(c: &mut Criterion) {
    let mut group = c.benchmark_group("math_helpers");

    // (a, b, denominator), from a product that fits one limb up to one that
    // needs the full 512-bit path
    let cases = [
        ("small", U256::from(7u8), U256::from(3u8), U256::from(2u8)),
        ("q96", Q96, e18(), Q96 + U256::from(1u8)),
        ("wide", U256::MAX - U256::from(1u8), U256::MAX - U256::from(1u8), U256::MAX - U256::from(2u8)),
    ];

    for (name, a, b, d) in cases {
        group.bench_with_input(BenchmarkId::new("mul_div", name), &(a, b, d), |bench, &(a, b, d)| {
            bench.iter(|| mul_div(black_box(a), black_box(b), black_box(d)))
        });
        group.bench_with_input(
            BenchmarkId::new("mul_div_rounding_up", name),
            &(a, b, d),
            |bench, &(a, b, d)| bench.iter(|| mul_div_rounding_up(black_box(a), black_box(b), black_box(d))),
        );
    }

    group.bench_function("div_rounding_up", |bench| {
        bench.iter(|| div_rounding_up(black_box(U256::MAX), black_box(Q96)))
    });
    group.finish();
}

pub fn bench_bit_math(c: &mut Criterion) {
    c.bench_function("most_significant_bit", |bench| {
        bench.iter(|| most_significant_bit(black_box(Q96)))
    });
}

pub fn bench_sqrt_price_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("sqrt_price_math");
    let liquidity = e18();
    let amount = U256::from(1_000_000_000_000_000u128);

    for zero_for_one in [true, false] {
        group.bench_with_input(
            BenchmarkId::new("next_sqrt_price_from_input", zero_for_one),
            &zero_for_one,
            |bench, &zero_for_one| {
                bench.iter(|| {
                    get_next_sqrt_price_from_input(
                        black_box(Q96),
                        black_box(liquidity),
                        black_box(amount),
                        zero_for_one,
                    )
                })
            },
        );
        group.bench_with_input(
            BenchmarkId::new("next_sqrt_price_from_output", zero_for_one),
            &zero_for_one,
            |bench, &zero_for_one| {
                bench.iter(|| {
                    get_next_sqrt_price_from_output(
                        black_box(Q96),
                        black_box(liquidity),
                        black_box(amount),
                        zero_for_one,
                    )
                })
            },
        );
    }

    let upper = Q96 << 1;
    let minted = I256::from_raw(e18());
    for (name, liquidity) in [("mint", minted), ("burn", -minted)] {
        group.bench_with_input(BenchmarkId::new("amount_0_delta", name), &liquidity, |bench, &l| {
            bench.iter(|| get_amount_0_delta(black_box(Q96), black_box(upper), l))
        });
        group.bench_with_input(BenchmarkId::new("amount_1_delta", name), &liquidity, |bench, &l| {
            bench.iter(|| get_amount_1_delta(black_box(Q96), black_box(upper), l))
        });
    }
    group.finish();
}

pub fn bench_liquidity_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("liquidity_math");
    let lower = Q96 >> 1;
    let upper = Q96 << 1;

    group.bench_function("liquidity_for_amounts", |bench| {
        bench.iter(|| {
            get_liquidity_for_amounts(black_box(Q96), lower, upper, black_box(e18()), black_box(e18()))
        })
    });
    group.bench_function("amounts_for_liquidity", |bench| {
        bench.iter(|| get_amounts_for_liquidity(black_box(Q96), lower, upper, black_box(e18()), true))
    });
    group.finish();
}

pub fn bench_strategy(c: &mut Criterion) {
    let config = RangeConfig::new(1000).unwrap();
    let start = PoolState::new(Q96).unwrap();
    let moved = PoolState::new(Q96 << 1).unwrap();

    c.bench_function("centered_range_recenter", |bench| {
        bench.iter(|| {
            let mut strategy = CenteredRangeStrategy::new(config, TokenAmounts::new(e18(), e18()));
            let _ = strategy.initialize(&start);
            let _ = strategy.rebalance(black_box(&moved));
            strategy.current_amounts(&moved)
        })
    });
}
