//! SIMD register abstraction
//!
//! The sorting networks are written once against [`SimdRegister`] and
//! monomorphized for every backend, element type and width. A backend only
//! has to provide aligned load/store, a lane-wise compare-exchange, a lane
//! permutation and a lane blend; every network stage is built from those.

use std::fmt;

use crate::element::SortElement;
use crate::network::tables::{LaneMask, LanePattern};

#[cfg(target_arch = "x86_64")]
pub mod avx2;
#[cfg(target_arch = "x86_64")]
pub mod avx512;
pub mod portable;

pub use portable::{F32x16, F32x8, F64x4, F64x8, I32x16, I32x8, I64x4, I64x8, Lanes};

/// Instruction set a register type is implemented with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Lane arrays with per-lane loops; available everywhere
    Portable,
    /// x86_64 AVX2 intrinsics (256-bit registers)
    Avx2,
    /// x86_64 AVX-512F intrinsics (512-bit registers)
    Avx512,
}

impl Backend {
    /// Check if this backend can run on the current CPU
    pub fn is_available(&self) -> bool {
        match self {
            Backend::Portable => true,
            Backend::Avx2 => {
                #[cfg(target_arch = "x86_64")]
                {
                    is_x86_feature_detected!("avx2")
                }
                #[cfg(not(target_arch = "x86_64"))]
                {
                    false
                }
            }
            Backend::Avx512 => {
                #[cfg(target_arch = "x86_64")]
                {
                    is_x86_feature_detected!("avx512f")
                }
                #[cfg(not(target_arch = "x86_64"))]
                {
                    false
                }
            }
        }
    }

    /// Check if this backend has registers of the given width
    pub fn supports(&self, width: RegisterWidth) -> bool {
        match self {
            Backend::Portable => true,
            Backend::Avx2 => width == RegisterWidth::Narrow,
            Backend::Avx512 => width == RegisterWidth::Wide,
        }
    }

    /// Widest register this backend implements
    pub fn widest(&self) -> RegisterWidth {
        match self {
            Backend::Portable | Backend::Avx512 => RegisterWidth::Wide,
            Backend::Avx2 => RegisterWidth::Narrow,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Portable => "portable",
            Backend::Avx2 => "avx2",
            Backend::Avx512 => "avx512",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Register width in bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterWidth {
    /// 256-bit: 8 lanes of 32-bit or 4 lanes of 64-bit elements
    Narrow,
    /// 512-bit: 16 lanes of 32-bit or 8 lanes of 64-bit elements
    Wide,
}

impl RegisterWidth {
    /// Get the register width in bytes
    pub fn bytes(&self) -> usize {
        match self {
            RegisterWidth::Narrow => 32,
            RegisterWidth::Wide => 64,
        }
    }

    /// Lane count for elements of `element_size` bytes
    pub fn lanes(&self, element_size: usize) -> usize {
        self.bytes() / element_size
    }

    /// Elements in one block (lanes squared)
    pub fn block_len(&self, element_size: usize) -> usize {
        let lanes = self.lanes(element_size);
        lanes * lanes
    }

    pub fn name(&self) -> &'static str {
        match self {
            RegisterWidth::Narrow => "narrow",
            RegisterWidth::Wide => "wide",
        }
    }
}

impl fmt::Display for RegisterWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fixed group of registers, one per row of a block
pub trait RegisterRows<R>: AsRef<[R]> + AsMut<[R]> + Copy {
    fn from_fn<F: FnMut(usize) -> R>(f: F) -> Self;
}

impl<R: Copy, const N: usize> RegisterRows<R> for [R; N] {
    #[inline(always)]
    fn from_fn<F: FnMut(usize) -> R>(f: F) -> Self {
        std::array::from_fn(f)
    }
}

/// A SIMD register holding `LANES` elements of one type
///
/// # Safety
///
/// Implementations must read and write exactly `LANES` elements in
/// `load_aligned`/`store_aligned`, and `min_max` must be a compare-exchange
/// under [`SortElement::total_order`]: the pair of outputs is a permutation
/// of the pair of inputs in every lane. Values of a type whose `available()`
/// can be false must only be created through `load_aligned`.
pub unsafe trait SimdRegister: Copy + fmt::Debug {
    type Elem: SortElement;

    /// `[Self; LANES]`
    type Rows: RegisterRows<Self>;

    const LANES: usize;

    const BACKEND: Backend;

    /// Register width in bytes; also the alignment `load_aligned` requires
    const BYTES: usize = Self::LANES * std::mem::size_of::<Self::Elem>();

    /// Check if the instructions behind this register exist on this CPU
    fn available() -> bool;

    /// Read `LANES` elements starting at `src`
    ///
    /// # Safety
    ///
    /// `src` must be valid for `LANES` reads and aligned to `BYTES`, and
    /// `available()` must be true.
    unsafe fn load_aligned(src: *const Self::Elem) -> Self;

    /// Write `LANES` elements starting at `dst`
    ///
    /// # Safety
    ///
    /// `dst` must be valid for `LANES` writes and aligned to `BYTES`.
    unsafe fn store_aligned(self, dst: *mut Self::Elem);

    /// Lane-wise `(min, max)` of `self` and `other`
    fn min_max(self, other: Self) -> (Self, Self);

    /// Lane `i` of the result is lane `pattern.source(i)` of `self`
    fn permute(self, pattern: &LanePattern) -> Self;

    /// Lanes set in `mask` come from `other`, the rest from `self`
    fn blend(self, other: Self, mask: LaneMask) -> Self;
}
