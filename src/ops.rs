//! Register-level primitives
//!
//! Load/store between memory and a register, lane-wise and masked min/max,
//! lane reversal and the W×W transpose. Everything here is a pure function of
//! its register arguments; the only memory touched is the buffer passed to
//! `load`/`store`.

use crate::network::tables::{self, LanePattern, LaneStage};
use crate::register::SimdRegister;

/// Check if `ptr` satisfies the alignment `R::load_aligned` requires
#[inline]
pub fn is_aligned<R: SimdRegister>(ptr: *const R::Elem) -> bool {
    (ptr as usize) % R::BYTES == 0
}

/// Read the first `R::LANES` elements of `src`; lane `i` is `src[i]`
///
/// # Panics
///
/// Panics if `src` is shorter than one register, is not aligned to the
/// register width, or the register's backend is not supported by this CPU.
pub fn load<R: SimdRegister>(src: &[R::Elem]) -> R {
    assert!(
        src.len() >= R::LANES,
        "load needs {} elements, got {}",
        R::LANES,
        src.len()
    );
    assert!(
        is_aligned::<R>(src.as_ptr()),
        "load needs a buffer aligned to {} bytes",
        R::BYTES
    );
    assert!(
        R::available(),
        "the {} backend is not available on this CPU",
        R::BACKEND
    );
    unsafe { R::load_aligned(src.as_ptr()) }
}

/// Read one register without checks
///
/// # Safety
///
/// Same contract as [`SimdRegister::load_aligned`].
#[inline(always)]
pub unsafe fn load_unchecked<R: SimdRegister>(src: *const R::Elem) -> R {
    unsafe { R::load_aligned(src) }
}

/// Write `reg` to the first `R::LANES` elements of `dst`
///
/// # Panics
///
/// Panics if `dst` is shorter than one register or not aligned to the
/// register width.
pub fn store<R: SimdRegister>(reg: R, dst: &mut [R::Elem]) {
    assert!(
        dst.len() >= R::LANES,
        "store needs {} elements, got {}",
        R::LANES,
        dst.len()
    );
    assert!(
        is_aligned::<R>(dst.as_ptr()),
        "store needs a buffer aligned to {} bytes",
        R::BYTES
    );
    unsafe { reg.store_aligned(dst.as_mut_ptr()) }
}

/// Write one register without checks
///
/// # Safety
///
/// Same contract as [`SimdRegister::store_aligned`].
#[inline(always)]
pub unsafe fn store_unchecked<R: SimdRegister>(reg: R, dst: *mut R::Elem) {
    unsafe { reg.store_aligned(dst) }
}

/// Lane-wise compare-exchange: `(min(a, b), max(a, b))` in every lane
#[inline(always)]
pub fn min_max<R: SimdRegister>(a: R, b: R) -> (R, R) {
    a.min_max(b)
}

/// Compare-exchange between lane `i` of `a` and lane `stage.pattern[i]` of `b`
///
/// Only lanes named by `stage.mask` take part: for those, `a` keeps the
/// minimum and `b` receives the maximum at the paired position. Every other
/// lane of both registers is passed through.
#[inline(always)]
pub fn masked_min_max<R: SimdRegister>(a: R, b: R, stage: &LaneStage) -> (R, R) {
    let paired = b.permute(&stage.pattern);
    let (lo, hi) = a.min_max(paired);
    let a = a.blend(lo, stage.mask);
    let paired = paired.blend(hi, stage.mask);
    (a, paired.permute(&stage.inverse))
}

/// Compare-exchange inside one register
///
/// Lane `i` meets lane `stage.pattern[i]`; lanes set in `stage.mask` keep the
/// larger value of their pair, the others the smaller.
#[inline(always)]
pub fn compare_exchange_lanes<R: SimdRegister>(reg: R, stage: &LaneStage) -> R {
    let (lo, hi) = reg.min_max(reg.permute(&stage.pattern));
    lo.blend(hi, stage.mask)
}

/// Lane `i` of the result is lane `W - 1 - i` of `reg`
#[inline(always)]
pub fn reverse<R: SimdRegister>(reg: R) -> R {
    let pattern: LanePattern = const { LanePattern::reversed(R::LANES) };
    reg.permute(&pattern)
}

/// Transpose `rows` in place as a W×W row-major matrix
///
/// Register `i`, lane `j` moves to register `j`, lane `i`. Each step swaps
/// one bit of the row index with the same bit of the lane index, so log2(W)
/// steps of permute-and-blend finish the transpose.
///
/// # Panics
///
/// Panics if `rows.len()` is not `R::LANES`.
#[inline]
pub fn transpose<R: SimdRegister>(rows: &mut [R]) {
    assert_eq!(rows.len(), R::LANES, "transpose needs one register per lane");
    let table = const { tables::merge_stages(R::LANES) };
    for (distance, stage) in table.with_distances() {
        for upper in 0..R::LANES {
            if upper & distance == 0 {
                continue;
            }
            let lower = upper - distance;
            let (top, bottom) = (rows[lower], rows[upper]);
            rows[lower] = top.blend(bottom.permute(&stage.pattern), stage.mask);
            rows[upper] = top.permute(&stage.pattern).blend(bottom, stage.mask);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::{I32x16, I32x8, I64x4};

    #[test]
    fn test_reverse_lanes() {
        let r = I64x4::from_array([1, 2, 3, 4]);
        assert_eq!(reverse(r).to_array(), [4, 3, 2, 1]);
    }

    #[test]
    fn test_compare_exchange_half_cleaner() {
        let r = I32x8::from_array([5, 1, 7, 3, 4, 8, 0, 6]);
        let r = compare_exchange_lanes(r, &LaneStage::half_cleaner(4));
        assert_eq!(r.to_array(), [4, 1, 0, 3, 5, 8, 7, 6]);
    }

    #[test]
    fn test_transpose_4x4() {
        let mut rows: Vec<I64x4> = (0..4)
            .map(|i| I64x4::from_array([4 * i, 4 * i + 1, 4 * i + 2, 4 * i + 3]))
            .collect();
        transpose(&mut rows);
        assert_eq!(rows[0].to_array(), [0, 4, 8, 12]);
        assert_eq!(rows[1].to_array(), [1, 5, 9, 13]);
        assert_eq!(rows[3].to_array(), [3, 7, 11, 15]);
    }

    #[test]
    #[should_panic(expected = "one register per lane")]
    fn test_transpose_wrong_row_count() {
        let mut rows = vec![I32x16::from_array([0; 16]); 8];
        transpose(&mut rows);
    }

    #[test]
    #[should_panic(expected = "aligned")]
    fn test_load_rejects_misaligned() {
        let buf = crate::utils::aligned_copy(&[0i32; 16]);
        let _: I32x8 = load(&buf[1..9]);
    }
}
