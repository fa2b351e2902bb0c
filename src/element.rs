//! Element types the sorting networks operate on
//!
//! Every element type carries a total order and names the register type used
//! for each width and backend. Integers use their natural order. Floats use
//! IEEE 754 `totalOrder` (`f32::total_cmp`): negative NaNs first, then
//! `-inf`, negatives, `-0.0`, `+0.0`, positives, `+inf`, positive NaNs. With
//! a total order a compare-exchange can never duplicate or drop a value.

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::register::{portable, SimdRegister};

/// Scalar element of a sortable buffer
pub trait SortElement: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// 256-bit portable register of this element
    type Narrow: SimdRegister<Elem = Self>;

    /// 512-bit portable register of this element
    type Wide: SimdRegister<Elem = Self>;

    /// 256-bit AVX2 register of this element
    #[cfg(target_arch = "x86_64")]
    type Avx2: SimdRegister<Elem = Self>;

    /// 512-bit AVX-512 register of this element
    #[cfg(target_arch = "x86_64")]
    type Avx512: SimdRegister<Elem = Self>;

    /// Total order used by every backend
    fn total_order(&self, other: &Self) -> Ordering;

    /// `self` sorts strictly after `other`
    #[inline(always)]
    fn is_greater(self, other: Self) -> bool {
        self.total_order(&other) == Ordering::Greater
    }
}

macro_rules! impl_integer_element {
    ($t:ty, $narrow:ty, $wide:ty, $avx2:ty, $avx512:ty) => {
        impl SortElement for $t {
            type Narrow = $narrow;
            type Wide = $wide;
            #[cfg(target_arch = "x86_64")]
            type Avx2 = $avx2;
            #[cfg(target_arch = "x86_64")]
            type Avx512 = $avx512;

            #[inline(always)]
            fn total_order(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }

            #[inline(always)]
            fn is_greater(self, other: Self) -> bool {
                self > other
            }
        }
    };
}

macro_rules! impl_float_element {
    ($t:ty, $narrow:ty, $wide:ty, $avx2:ty, $avx512:ty) => {
        impl SortElement for $t {
            type Narrow = $narrow;
            type Wide = $wide;
            #[cfg(target_arch = "x86_64")]
            type Avx2 = $avx2;
            #[cfg(target_arch = "x86_64")]
            type Avx512 = $avx512;

            #[inline(always)]
            fn total_order(&self, other: &Self) -> Ordering {
                self.total_cmp(other)
            }
        }
    };
}

impl_integer_element!(
    i32,
    portable::I32x8,
    portable::I32x16,
    crate::register::avx2::Avx2I32x8,
    crate::register::avx512::Avx512I32x16
);
impl_integer_element!(
    i64,
    portable::I64x4,
    portable::I64x8,
    crate::register::avx2::Avx2I64x4,
    crate::register::avx512::Avx512I64x8
);
impl_float_element!(
    f32,
    portable::F32x8,
    portable::F32x16,
    crate::register::avx2::Avx2F32x8,
    crate::register::avx512::Avx512F32x16
);
impl_float_element!(
    f64,
    portable::F64x4,
    portable::F64x8,
    crate::register::avx2::Avx2F64x4,
    crate::register::avx512::Avx512F64x8
);
