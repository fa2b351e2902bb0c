//! Block sort
//!
//! A block is W rows of W contiguous elements. Sorting the lane-columns
//! across the W row registers and transposing turns every input column into
//! one ascending output row, so a block leaves as W sorted runs of W elements.
//! The runs are not merged with each other here.

use crate::error::SortError;
use crate::network;
use crate::ops;
use crate::register::{RegisterRows, SimdRegister};

/// Number of elements in one block of `R` (lanes squared)
pub const fn block_len<R: SimdRegister>() -> usize {
    R::LANES * R::LANES
}

/// Sort one block in place into W ascending runs of W elements
///
/// Output run `k` (elements `k*W .. k*W + W`) is the ascending sort of input
/// column `k` (elements `k, W + k, 2W + k, …`).
///
/// # Errors
///
/// Returns an error if `block` does not hold exactly W² elements, is not
/// aligned to the register width, or the register backend is unavailable.
pub fn sort_block<R: SimdRegister>(block: &mut [R::Elem]) -> Result<(), SortError> {
    let expected = block_len::<R>();
    if block.len() != expected {
        return Err(SortError::BlockLength {
            expected,
            actual: block.len(),
        });
    }
    if !ops::is_aligned::<R>(block.as_ptr()) {
        return Err(SortError::Misaligned { required: R::BYTES });
    }
    if !R::available() {
        return Err(SortError::BackendUnavailable(R::BACKEND));
    }

    unsafe { sort_block_unchecked::<R>(block.as_mut_ptr()) };
    Ok(())
}

/// Sort one block in place without validating the buffer
///
/// # Safety
///
/// `block` must be valid for reads and writes of W² elements, aligned to
/// `R::BYTES`, and `R::available()` must be true.
#[inline]
pub unsafe fn sort_block_unchecked<R: SimdRegister>(block: *mut R::Elem) {
    let lanes = R::LANES;
    let mut rows =
        R::Rows::from_fn(|i| unsafe { ops::load_unchecked::<R>(block.add(i * lanes)) });

    network::sort_columns(rows.as_mut());
    ops::transpose(rows.as_mut());

    for (i, row) in rows.as_ref().iter().enumerate() {
        unsafe { ops::store_unchecked(*row, block.add(i * lanes)) };
    }
}
