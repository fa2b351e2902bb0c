//! AVX-512 registers for the wide width
//!
//! Each type wraps one 512-bit register. Lane permutations use
//! `vpermd`/`vpermq`/`vpermps`/`vpermpd` with the pattern widened from bytes,
//! and blends take the lane bits directly as a `k` mask.
//!
//! Floats are compared through the same signed-integer keys as the AVX2
//! registers, so both backends implement IEEE 754 `totalOrder`.
//!
//! Values of these types are only produced by `load_aligned`, whose callers
//! must have checked `available()`.

use std::arch::x86_64::*;

use super::{Backend, SimdRegister};
use crate::network::tables::{LaneMask, LanePattern};

#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct Avx512I32x16(__m512i);

#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct Avx512I64x8(__m512i);

#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct Avx512F32x16(__m512);

#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct Avx512F64x8(__m512d);

#[inline]
fn avx512_detected() -> bool {
    is_x86_feature_detected!("avx512f")
}

/// Permute indices for 16 lanes of 32 bits
#[inline(always)]
unsafe fn lane_index_32(pattern: &LanePattern) -> __m512i {
    let bytes = _mm_loadu_si128(pattern.as_array().as_ptr() as *const __m128i);
    _mm512_cvtepu8_epi32(bytes)
}

/// Permute indices for 8 lanes of 64 bits
#[inline(always)]
unsafe fn lane_index_64(pattern: &LanePattern) -> __m512i {
    let bytes = _mm_loadl_epi64(pattern.as_array().as_ptr() as *const __m128i);
    _mm512_cvtepu8_epi64(bytes)
}

#[inline(always)]
fn mask_16(mask: LaneMask) -> __mmask16 {
    mask.bits()
}

#[inline(always)]
fn mask_8(mask: LaneMask) -> __mmask8 {
    (mask.bits() & 0xff) as u8
}

/// Signed-integer key of `f32` bits: flips the magnitude of negatives
#[inline(always)]
unsafe fn order_key_32(bits: __m512i) -> __m512i {
    _mm512_xor_si512(bits, _mm512_srli_epi32::<1>(_mm512_srai_epi32::<31>(bits)))
}

/// Signed-integer key of `f64` bits
#[inline(always)]
unsafe fn order_key_64(bits: __m512i) -> __m512i {
    _mm512_xor_si512(bits, _mm512_srli_epi64::<1>(_mm512_srai_epi64::<63>(bits)))
}

unsafe impl SimdRegister for Avx512I32x16 {
    type Elem = i32;
    type Rows = [Self; 16];

    const LANES: usize = 16;
    const BACKEND: Backend = Backend::Avx512;

    #[inline]
    fn available() -> bool {
        avx512_detected()
    }

    #[inline(always)]
    unsafe fn load_aligned(src: *const i32) -> Self {
        unsafe { Avx512I32x16(_mm512_load_epi32(src)) }
    }

    #[inline(always)]
    unsafe fn store_aligned(self, dst: *mut i32) {
        unsafe { _mm512_store_epi32(dst, self.0) }
    }

    #[inline(always)]
    fn min_max(self, other: Self) -> (Self, Self) {
        unsafe {
            (
                Avx512I32x16(_mm512_min_epi32(self.0, other.0)),
                Avx512I32x16(_mm512_max_epi32(self.0, other.0)),
            )
        }
    }

    #[inline(always)]
    fn permute(self, pattern: &LanePattern) -> Self {
        unsafe { Avx512I32x16(_mm512_permutexvar_epi32(lane_index_32(pattern), self.0)) }
    }

    #[inline(always)]
    fn blend(self, other: Self, mask: LaneMask) -> Self {
        unsafe { Avx512I32x16(_mm512_mask_blend_epi32(mask_16(mask), self.0, other.0)) }
    }
}

unsafe impl SimdRegister for Avx512I64x8 {
    type Elem = i64;
    type Rows = [Self; 8];

    const LANES: usize = 8;
    const BACKEND: Backend = Backend::Avx512;

    #[inline]
    fn available() -> bool {
        avx512_detected()
    }

    #[inline(always)]
    unsafe fn load_aligned(src: *const i64) -> Self {
        unsafe { Avx512I64x8(_mm512_load_epi64(src)) }
    }

    #[inline(always)]
    unsafe fn store_aligned(self, dst: *mut i64) {
        unsafe { _mm512_store_epi64(dst, self.0) }
    }

    #[inline(always)]
    fn min_max(self, other: Self) -> (Self, Self) {
        unsafe {
            (
                Avx512I64x8(_mm512_min_epi64(self.0, other.0)),
                Avx512I64x8(_mm512_max_epi64(self.0, other.0)),
            )
        }
    }

    #[inline(always)]
    fn permute(self, pattern: &LanePattern) -> Self {
        unsafe { Avx512I64x8(_mm512_permutexvar_epi64(lane_index_64(pattern), self.0)) }
    }

    #[inline(always)]
    fn blend(self, other: Self, mask: LaneMask) -> Self {
        unsafe { Avx512I64x8(_mm512_mask_blend_epi64(mask_8(mask), self.0, other.0)) }
    }
}

unsafe impl SimdRegister for Avx512F32x16 {
    type Elem = f32;
    type Rows = [Self; 16];

    const LANES: usize = 16;
    const BACKEND: Backend = Backend::Avx512;

    #[inline]
    fn available() -> bool {
        avx512_detected()
    }

    #[inline(always)]
    unsafe fn load_aligned(src: *const f32) -> Self {
        unsafe { Avx512F32x16(_mm512_load_ps(src)) }
    }

    #[inline(always)]
    unsafe fn store_aligned(self, dst: *mut f32) {
        unsafe { _mm512_store_ps(dst, self.0) }
    }

    #[inline(always)]
    fn min_max(self, other: Self) -> (Self, Self) {
        unsafe {
            let a = _mm512_castps_si512(self.0);
            let b = _mm512_castps_si512(other.0);
            let greater = _mm512_cmpgt_epi32_mask(order_key_32(a), order_key_32(b));
            (
                Avx512F32x16(_mm512_mask_blend_ps(greater, self.0, other.0)),
                Avx512F32x16(_mm512_mask_blend_ps(greater, other.0, self.0)),
            )
        }
    }

    #[inline(always)]
    fn permute(self, pattern: &LanePattern) -> Self {
        unsafe { Avx512F32x16(_mm512_permutexvar_ps(lane_index_32(pattern), self.0)) }
    }

    #[inline(always)]
    fn blend(self, other: Self, mask: LaneMask) -> Self {
        unsafe { Avx512F32x16(_mm512_mask_blend_ps(mask_16(mask), self.0, other.0)) }
    }
}

unsafe impl SimdRegister for Avx512F64x8 {
    type Elem = f64;
    type Rows = [Self; 8];

    const LANES: usize = 8;
    const BACKEND: Backend = Backend::Avx512;

    #[inline]
    fn available() -> bool {
        avx512_detected()
    }

    #[inline(always)]
    unsafe fn load_aligned(src: *const f64) -> Self {
        unsafe { Avx512F64x8(_mm512_load_pd(src)) }
    }

    #[inline(always)]
    unsafe fn store_aligned(self, dst: *mut f64) {
        unsafe { _mm512_store_pd(dst, self.0) }
    }

    #[inline(always)]
    fn min_max(self, other: Self) -> (Self, Self) {
        unsafe {
            let a = _mm512_castpd_si512(self.0);
            let b = _mm512_castpd_si512(other.0);
            let greater = _mm512_cmpgt_epi64_mask(order_key_64(a), order_key_64(b));
            (
                Avx512F64x8(_mm512_mask_blend_pd(greater, self.0, other.0)),
                Avx512F64x8(_mm512_mask_blend_pd(greater, other.0, self.0)),
            )
        }
    }

    #[inline(always)]
    fn permute(self, pattern: &LanePattern) -> Self {
        unsafe { Avx512F64x8(_mm512_permutexvar_pd(lane_index_64(pattern), self.0)) }
    }

    #[inline(always)]
    fn blend(self, other: Self, mask: LaneMask) -> Self {
        unsafe { Avx512F64x8(_mm512_mask_blend_pd(mask_8(mask), self.0, other.0)) }
    }
}
