//! Block sort followed by a bottom-up merge tree
//!
//! Full blocks are sorted with the register networks, the tail with the
//! scalar sort. Runs then double in length every pass, ping-ponging between
//! two aligned buffers. A merge of two runs whose lengths are multiples of W
//! streams registers through `bitonic_merge`; any other merge is scalar.

use crate::block::{block_len, sort_block_unchecked};
use crate::element::SortElement;
use crate::network;
use crate::ops;
use crate::register::SimdRegister;
use crate::utils::aligned_copy;

/// Unstable scalar sort under the element total order
#[inline]
pub fn scalar_sort<T: SortElement>(data: &mut [T]) {
    data.sort_unstable_by(T::total_order);
}

/// Sort `data` with register type `R`
///
/// # Panics
///
/// Panics if `R::available()` is false.
#[inline]
pub fn sort_slice<R: SimdRegister>(data: &mut [R::Elem]) {
    assert!(
        R::available(),
        "the {} backend is not available on this CPU",
        R::BACKEND
    );

    let len = data.len();
    let lanes = R::LANES;
    let block = block_len::<R>();
    let full = len - len % block;

    let mut src = aligned_copy(data);
    let mut dst = aligned_copy(data);

    for chunk in src[..full].chunks_exact_mut(block) {
        // chunk starts at a multiple of the block size in a 64-byte aligned buffer
        unsafe { sort_block_unchecked::<R>(chunk.as_mut_ptr()) };
    }
    scalar_sort(&mut src[full..]);

    let mut run = lanes;
    while run < len {
        log::trace!("merge pass: {} elements, run length {}", len, run);
        merge_pass::<R>(&src, &mut dst, run);
        std::mem::swap(&mut src, &mut dst);
        run *= 2;
    }

    data.copy_from_slice(&src);
}

/// [`sort_slice`] compiled with AVX2 enabled
///
/// # Safety
///
/// The CPU must support AVX2.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
pub unsafe fn sort_slice_avx2<R: SimdRegister>(data: &mut [R::Elem]) {
    sort_slice::<R>(data)
}

/// [`sort_slice`] compiled with AVX-512F enabled
///
/// # Safety
///
/// The CPU must support AVX-512F.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx512f")]
pub unsafe fn sort_slice_avx512<R: SimdRegister>(data: &mut [R::Elem]) {
    sort_slice::<R>(data)
}

/// Merge adjacent runs of length `run` from `src` into runs of `2 * run` in `dst`
#[inline]
fn merge_pass<R: SimdRegister>(src: &[R::Elem], dst: &mut [R::Elem], run: usize) {
    let len = src.len();
    let lanes = R::LANES;

    for lo in (0..len).step_by(2 * run) {
        let mid = (lo + run).min(len);
        let hi = (lo + 2 * run).min(len);

        if mid == hi {
            dst[lo..hi].copy_from_slice(&src[lo..hi]);
        } else if (mid - lo) % lanes == 0 && (hi - mid) % lanes == 0 {
            // lo and mid are multiples of W, so every register access is aligned
            unsafe { merge_runs_vectorized::<R>(&src[lo..mid], &src[mid..hi], &mut dst[lo..hi]) };
        } else {
            merge_runs_scalar(&src[lo..mid], &src[mid..hi], &mut dst[lo..hi]);
        }
    }
}

/// Merge two ascending runs one register at a time
///
/// The upper half of every `bitonic_merge` is carried into the next one; the
/// register loaded next comes from the run whose head is smaller.
///
/// # Safety
///
/// `R::available()` must be true. All three slices must start aligned to
/// `R::BYTES`, both runs must be non-empty, and their lengths multiples of
/// `R::LANES` adding up to `out.len()`.
#[inline]
unsafe fn merge_runs_vectorized<R: SimdRegister>(left: &[R::Elem], right: &[R::Elem], out: &mut [R::Elem]) {
    let lanes = R::LANES;
    debug_assert!(!left.is_empty() && !right.is_empty());
    debug_assert_eq!(left.len() % lanes, 0);
    debug_assert_eq!(right.len() % lanes, 0);
    debug_assert_eq!(left.len() + right.len(), out.len());

    let (mut l, mut r) = (lanes, lanes);
    let (low, mut carry) = unsafe {
        network::bitonic_merge(
            ops::load_unchecked::<R>(left.as_ptr()),
            ops::load_unchecked::<R>(right.as_ptr()),
        )
    };
    unsafe { ops::store_unchecked(low, out.as_mut_ptr()) };
    let mut written = lanes;

    while l < left.len() || r < right.len() {
        let take_left = r == right.len() || (l < left.len() && !left[l].is_greater(right[r]));
        let next = if take_left {
            let reg = unsafe { ops::load_unchecked::<R>(left.as_ptr().add(l)) };
            l += lanes;
            reg
        } else {
            let reg = unsafe { ops::load_unchecked::<R>(right.as_ptr().add(r)) };
            r += lanes;
            reg
        };

        let (low, high) = network::bitonic_merge(carry, next);
        unsafe { ops::store_unchecked(low, out.as_mut_ptr().add(written)) };
        written += lanes;
        carry = high;
    }

    unsafe { ops::store_unchecked(carry, out.as_mut_ptr().add(written)) };
}

/// Merge two ascending runs element by element; ties take from `left`
fn merge_runs_scalar<T: SortElement>(left: &[T], right: &[T], out: &mut [T]) {
    let (mut l, mut r) = (0, 0);
    for slot in out.iter_mut() {
        if r == right.len() || (l < left.len() && !left[l].is_greater(right[r])) {
            *slot = left[l];
            l += 1;
        } else {
            *slot = right[r];
            r += 1;
        }
    }
}
