//! Tests for the W×W block sort across element types and widths

use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use vecsort::utils::{aligned_sequence, runs_sorted};
use vecsort::{
    aligned_copy, block_len, sort_block, F32x16, F32x8, F64x4, F64x8, I32x16, I32x8, I64x4, I64x8,
    SimdRegister, SortElement, SortError,
};

/// Output run `k` must be the sorted input column `k`
fn check_block<R: SimdRegister>(input: &[R::Elem]) {
    let lanes = R::LANES;
    let mut buf = aligned_copy(input);
    sort_block::<R>(&mut buf).unwrap();

    for k in 0..lanes {
        let mut column: Vec<R::Elem> = input.iter().skip(k).step_by(lanes).copied().collect();
        column.sort_by(SortElement::total_order);
        let run = &buf[k * lanes..(k + 1) * lanes];
        for (got, want) in run.iter().zip(&column) {
            assert_eq!(
                got.total_order(want),
                std::cmp::Ordering::Equal,
                "run {}: got {:?}, expected {:?}",
                k,
                run,
                column
            );
        }
    }
    assert!(runs_sorted(&buf, lanes));
}

#[test]
fn test_block_0_to_255() {
    let mut buf = aligned_sequence::<i32>(0, 256, 1).unwrap();
    sort_block::<I32x16>(&mut buf).unwrap();
    for (i, v) in buf.iter().enumerate() {
        assert_eq!(*v, ((i % 16) * 16 + i / 16) as i32, "position {}", i);
    }
}

#[test]
fn test_block_lengths() {
    assert_eq!(block_len::<I32x16>(), 256);
    assert_eq!(block_len::<F32x8>(), 64);
    assert_eq!(block_len::<I64x8>(), 64);
    assert_eq!(block_len::<F64x4>(), 16);
}

#[test]
fn test_block_rejects_bad_input() {
    let mut short = aligned_copy(&[0.0f64; 63]);
    assert_eq!(
        sort_block::<F64x8>(&mut short),
        Err(SortError::BlockLength {
            expected: 64,
            actual: 63
        })
    );

    let mut shifted = aligned_copy(&[0i32; 257]);
    assert_eq!(
        sort_block::<I32x16>(&mut shifted[1..]),
        Err(SortError::Misaligned { required: 64 })
    );
}

#[test]
fn test_random_blocks_every_register() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..20 {
        check_block::<I32x8>(&(0..64).map(|_| rng.gen_range(-50..50)).collect::<Vec<i32>>());
        check_block::<I32x16>(&(0..256).map(|_| rng.gen::<i32>()).collect::<Vec<i32>>());
        check_block::<I64x4>(&(0..16).map(|_| rng.gen::<i64>()).collect::<Vec<i64>>());
        check_block::<I64x8>(&(0..64).map(|_| rng.gen_range(-5..5)).collect::<Vec<i64>>());
        check_block::<F32x8>(&(0..64).map(|_| rng.gen_range(-1.0..1.0)).collect::<Vec<f32>>());
        check_block::<F32x16>(&(0..256).map(|_| rng.gen::<f32>() * 1e6).collect::<Vec<f32>>());
        check_block::<F64x4>(&(0..16).map(|_| rng.gen_range(-1e9..1e9)).collect::<Vec<f64>>());
        check_block::<F64x8>(&(0..64).map(|_| rng.gen::<f64>() - 0.5).collect::<Vec<f64>>());
    }
}

#[test]
fn test_block_float_specials() {
    let specials = [
        f64::from_bits(0x7ff8_0000_0000_0000),
        f64::from_bits(0xfff8_0000_0000_0000),
        f64::INFINITY,
        f64::NEG_INFINITY,
        0.0,
        -0.0,
        f64::MIN_POSITIVE,
        f64::MAX,
    ];
    let input: Vec<f64> = (0..64).map(|i| specials[(i * 5 + i / 8) % 8]).collect();
    check_block::<F64x8>(&input);
}

proptest! {
    #[test]
    fn prop_block_sorts_columns_i32(values in prop::collection::vec(any::<i32>(), 64)) {
        check_block::<I32x8>(&values);
    }

    #[test]
    fn prop_block_sorts_columns_f32(bits in prop::collection::vec(any::<u32>(), 256)) {
        let values: Vec<f32> = bits.into_iter().map(f32::from_bits).collect();
        check_block::<F32x16>(&values);
    }
}
