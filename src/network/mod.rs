//! Bitonic sorting and merging networks
//!
//! Networks inside one register sort its lanes; networks across registers
//! sort lane-columns or merge two sorted registers into one sorted sequence.
//! Stage counts, lane patterns and masks depend only on the lane count, so
//! every input of a given register type runs the same instruction sequence.

pub mod tables;

use crate::ops;
use crate::register::SimdRegister;
use tables::{LaneStage, StageTable};

/// Run the half-cleaners at distances `W / 2, …, 1`: sorts a bitonic register
#[inline(always)]
fn clean_bitonic<R: SimdRegister>(reg: R) -> R {
    let table: StageTable = const { tables::merge_stages(R::LANES) };
    table
        .stages()
        .iter()
        .fold(reg, |r, stage| ops::compare_exchange_lanes(r, stage))
}

/// Sort the lanes of one register ascending
#[inline(always)]
pub fn sort_register<R: SimdRegister>(reg: R) -> R {
    let table: StageTable = const { tables::sort_stages(R::LANES) };
    table
        .stages()
        .iter()
        .fold(reg, |r, stage| ops::compare_exchange_lanes(r, stage))
}

/// Merge two ascending registers into one ascending sequence of 2W lanes
///
/// Reversing `b` turns `a ++ b` into a bitonic sequence; a full min/max
/// splits it into a lower and an upper bitonic half, and the half-cleaners
/// sort each half. Read as `a'` then `b'` the result is ascending.
#[inline(always)]
pub fn bitonic_merge<R: SimdRegister>(a: R, b: R) -> (R, R) {
    let (lo, hi) = ops::min_max(a, ops::reverse(b));
    (clean_bitonic(lo), clean_bitonic(hi))
}

/// Merge two ascending registers through a masked flip stage
///
/// Lane `i` of `a` meets lane `W - 1 - i` of `b` without reversing `b`
/// first; the two halves left behind are bitonic and the half-cleaners
/// finish them.
#[inline(always)]
pub fn masked_sort_pair<R: SimdRegister>(a: R, b: R) -> (R, R) {
    let flip: LaneStage = const { LaneStage::flip(R::LANES) };
    let (lo, hi) = ops::masked_min_max(a, b, &flip);
    (clean_bitonic(lo), clean_bitonic(hi))
}

/// Sort all 2W lanes of two registers; read as `a'` then `b'` they ascend
///
/// Each register is sorted on its own first, so already ascending inputs
/// pass through that step unchanged.
#[inline(always)]
pub fn sort_pair<R: SimdRegister>(a: R, b: R) -> (R, R) {
    masked_sort_pair(sort_register(a), sort_register(b))
}

/// Sort every lane-column across `rows`
///
/// The bitonic network runs over registers instead of lanes, so one pass
/// sorts all W columns at once: afterwards `rows[i][c] <= rows[i + 1][c]`
/// for every column `c`.
///
/// # Panics
///
/// Panics if `rows.len()` is not `R::LANES`.
#[inline]
pub fn sort_columns<R: SimdRegister>(rows: &mut [R]) {
    assert_eq!(rows.len(), R::LANES, "sort_columns needs one register per lane");
    let table = const { tables::column_comparators(R::LANES) };
    for &[lo, hi] in table.pairs() {
        let (lo, hi) = (lo as usize, hi as usize);
        let (min, max) = ops::min_max(rows[lo], rows[hi]);
        rows[lo] = min;
        rows[hi] = max;
    }
}
