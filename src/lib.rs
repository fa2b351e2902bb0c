//! # vecsort: in-place bitonic sorting on SIMD registers
//!
//! Sorts `i32`, `i64`, `f32` and `f64` buffers with bitonic sorting networks
//! that run on whole registers at a time.
//!
//! ## Layers
//!
//! 1. **Register primitives** ([`ops`]): aligned load/store, lane-wise and
//!    masked min/max, lane reversal and the W×W transpose.
//!
//! 2. **Sorting networks** ([`network`]): sort the lanes of one register, sort
//!    or merge two registers, sort lane-columns across W registers.
//!
//! 3. **Block sort** ([`block`]): W×W elements become W ascending runs of W.
//!
//! 4. **Array sort** ([`sort()`], [`sort_with`]): blocks plus a bottom-up
//!    merge tree for slices of any length.
//!
//! Every layer is generic over [`SimdRegister`]. Registers exist for two
//! widths (256-bit: 8×32 / 4×64 lanes, 512-bit: 16×32 / 8×64 lanes) on the
//! portable backend, for 256-bit on AVX2 and for 512-bit on AVX-512F.
//!
//! ## Ordering
//!
//! Integers sort by value. Floats sort by IEEE 754 `totalOrder`, the order of
//! `f64::total_cmp`, so the output is always a permutation of the input and
//! identical on every backend.
//!
//! ## Usage
//!
//! ```
//! use vecsort::{sort_with, Backend, RegisterWidth, SortConfig};
//!
//! let mut data: Vec<i32> = (0..1000).rev().collect();
//! let config = SortConfig::for_backend(Backend::Portable).with_width(RegisterWidth::Narrow);
//! sort_with(&mut data, &config).unwrap();
//! assert!(data.windows(2).all(|w| w[0] <= w[1]));
//! ```
//!
//! Register-level networks:
//!
//! ```
//! use vecsort::{bitonic_merge, I32x8};
//!
//! let a = I32x8::from_array([0, 2, 4, 6, 8, 10, 12, 14]);
//! let b = I32x8::from_array([1, 3, 5, 7, 9, 11, 13, 15]);
//! let (lo, hi) = bitonic_merge(a, b);
//! assert_eq!(lo.to_array(), [0, 1, 2, 3, 4, 5, 6, 7]);
//! assert_eq!(hi.to_array(), [8, 9, 10, 11, 12, 13, 14, 15]);
//! ```

pub mod block;
pub mod element;
pub mod error;
pub mod network;
pub mod ops;
pub mod register;
pub mod sort;
pub mod utils;

pub use block::{block_len, sort_block, sort_block_unchecked};
pub use element::SortElement;
pub use error::SortError;
pub use network::{bitonic_merge, masked_sort_pair, sort_columns, sort_pair, sort_register};
pub use ops::{masked_min_max, min_max, reverse, transpose};
pub use register::{
    Backend, F32x16, F32x8, F64x4, F64x8, I32x16, I32x8, I64x4, I64x8, Lanes, RegisterWidth,
    SimdRegister,
};
pub use sort::{sort, sort_with, SortConfig};
pub use utils::{aligned_copy, AlignedBuffer};

/// Version of the vecsort library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
