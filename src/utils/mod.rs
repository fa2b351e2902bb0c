//! Aligned buffers and order checks

use aligned_vec::{AVec, ConstAlign};
use num_traits::NumCast;

use crate::element::SortElement;

/// Alignment of every buffer the sorter loads registers from (one wide register)
pub const REGISTER_ALIGN: usize = 64;

/// Heap buffer aligned for both register widths
pub type AlignedBuffer<T> = AVec<T, ConstAlign<REGISTER_ALIGN>>;

/// Copy `src` into a fresh register-aligned buffer
pub fn aligned_copy<T: Copy>(src: &[T]) -> AlignedBuffer<T> {
    AVec::from_slice(REGISTER_ALIGN, src)
}

/// `start, start + step, …` as `len` elements of `T`
///
/// Returns `None` if some value does not fit in `T`.
pub fn aligned_sequence<T: NumCast + Copy>(start: i64, len: usize, step: i64) -> Option<AlignedBuffer<T>> {
    let values = (0..len as i64)
        .map(|i| <T as NumCast>::from(start + i * step))
        .collect::<Option<Vec<T>>>()?;
    Some(aligned_copy(&values))
}

/// Check that `data` ascends under the element total order
pub fn is_sorted_by_total_order<T: SortElement>(data: &[T]) -> bool {
    data.windows(2).all(|w| !w[0].is_greater(w[1]))
}

/// Check that every run of `run_len` elements ascends (the last may be shorter)
pub fn runs_sorted<T: SortElement>(data: &[T], run_len: usize) -> bool {
    run_len > 0 && data.chunks(run_len).all(is_sorted_by_total_order)
}
