//! Tests for the in-register and two-register bitonic networks

use proptest::prelude::*;
use vecsort::network::{bitonic_merge, masked_sort_pair, sort_columns, sort_pair, sort_register};
use vecsort::network::tables::{self, MAX_SORT_STAGES};
use vecsort::{F32x16, F64x4, I32x16, I32x8, I64x8};

fn sorted_vec<T: Copy + PartialOrd>(mut v: Vec<T>) -> Vec<T> {
    v.sort_by(|a, b| a.partial_cmp(b).unwrap());
    v
}

#[test]
fn test_stage_counts() {
    // log2(W) * (log2(W) + 1) / 2
    assert_eq!(tables::sort_stage_count(4), 3);
    assert_eq!(tables::sort_stages(8).stages().len(), 6);
    assert_eq!(tables::sort_stages(16).stages().len(), MAX_SORT_STAGES);
    assert_eq!(tables::merge_stages(16).stages().len(), 4);
    assert_eq!(tables::column_comparators(4).pairs().len(), 6);
}

#[test]
fn test_bitonic_merge_two_runs_of_16() {
    let a = I32x16::from_array([-9, -4, -4, 0, 1, 3, 5, 8, 8, 12, 20, 21, 30, 31, 40, 99]);
    let b = I32x16::from_array([-10, -4, 2, 3, 3, 6, 7, 9, 15, 16, 22, 23, 24, 50, 60, 70]);
    let (lo, hi) = bitonic_merge(a, b);

    let expected = sorted_vec(a.to_array().into_iter().chain(b.to_array()).collect());
    let got: Vec<i32> = lo.to_array().into_iter().chain(hi.to_array()).collect();
    assert_eq!(got, expected);
}

#[test]
fn test_bitonic_merge_disjoint_ranges() {
    let a = F64x4::from_array([10.0, 11.0, 12.0, 13.0]);
    let b = F64x4::from_array([0.0, 1.0, 2.0, 3.0]);
    let (lo, hi) = bitonic_merge(a, b);
    assert_eq!(lo.to_array(), [0.0, 1.0, 2.0, 3.0]);
    assert_eq!(hi.to_array(), [10.0, 11.0, 12.0, 13.0]);
}

#[test]
fn test_masked_sort_pair_matches_bitonic_merge() {
    let a = I64x8::from_array([-5, -1, 0, 0, 4, 9, 9, 30]);
    let b = I64x8::from_array([-7, -1, 2, 3, 8, 9, 12, 13]);
    assert_eq!(masked_sort_pair(a, b), bitonic_merge(a, b));
}

#[test]
fn test_sort_register_float_specials() {
    let nan = f32::from_bits(0x7fc0_0000);
    let neg_nan = f32::from_bits(0xffc0_0000);
    let r = F32x16::from_array([
        3.0, nan, -0.0, 0.0, f32::INFINITY, -1.0, neg_nan, 2.0, f32::NEG_INFINITY, 0.5, -2.0, 1.0,
        7.0, -7.0, 0.25, 5.0,
    ]);
    let got = sort_register(r).to_array();
    let mut expected = r.to_array();
    expected.sort_by(f32::total_cmp);

    let got_bits: Vec<u32> = got.iter().map(|v| v.to_bits()).collect();
    let expected_bits: Vec<u32> = expected.iter().map(|v| v.to_bits()).collect();
    assert_eq!(got_bits, expected_bits);
}

#[test]
fn test_sort_columns_reverse_rows() {
    let mut rows: Vec<I32x8> = (0..8).rev().map(|i| I32x8::from_array([i; 8])).collect();
    sort_columns(&mut rows);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.to_array(), [i as i32; 8]);
    }
}

#[test]
#[should_panic(expected = "one register per lane")]
fn test_sort_columns_wrong_row_count() {
    let mut rows = vec![I32x8::from_array([0; 8]); 4];
    sort_columns(&mut rows);
}

proptest! {
    #[test]
    fn prop_sort_register_sorts(lanes in prop::array::uniform16(any::<i32>())) {
        let got = sort_register(I32x16::from_array(lanes)).to_array();
        let mut expected = lanes;
        expected.sort();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_sort_pair_sorts_union(
        a in prop::array::uniform8(any::<i32>()),
        b in prop::array::uniform8(any::<i32>()),
    ) {
        let (lo, hi) = sort_pair(I32x8::from_array(a), I32x8::from_array(b));
        let got: Vec<i32> = lo.to_array().into_iter().chain(hi.to_array()).collect();
        let expected = sorted_vec(a.iter().chain(b.iter()).copied().collect());
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_merges_of_sorted_inputs(
        a in prop::array::uniform8(-1000i64..1000),
        b in prop::array::uniform8(-1000i64..1000),
    ) {
        let (mut a, mut b) = (a, b);
        a.sort();
        b.sort();
        let expected = sorted_vec(a.iter().chain(b.iter()).copied().collect());

        let (lo, hi) = bitonic_merge(I64x8::from_array(a), I64x8::from_array(b));
        let merged: Vec<i64> = lo.to_array().into_iter().chain(hi.to_array()).collect();
        prop_assert_eq!(&merged, &expected);

        let (lo, hi) = masked_sort_pair(I64x8::from_array(a), I64x8::from_array(b));
        let merged: Vec<i64> = lo.to_array().into_iter().chain(hi.to_array()).collect();
        prop_assert_eq!(&merged, &expected);
    }

    #[test]
    fn prop_sort_columns_orders_every_column(values in prop::collection::vec(any::<i32>(), 256)) {
        let mut rows: Vec<I32x16> = values
            .chunks(16)
            .map(|c| I32x16::from_array(std::array::from_fn(|i| c[i])))
            .collect();
        sort_columns(&mut rows);

        for c in 0..16 {
            let column: Vec<i32> = rows.iter().map(|r| r.lane(c)).collect();
            let expected = sorted_vec(values.iter().skip(c).step_by(16).copied().collect());
            prop_assert_eq!(column, expected);
        }
    }
}
