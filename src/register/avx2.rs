//! AVX2 registers for the narrow width
//!
//! Each type wraps one 256-bit register. Lane permutations go through
//! `vpermd`/`vpermps` (64-bit lanes are moved as pairs of 32-bit lanes) and
//! blends through `vpblendvb`/`vblendvps`/`vblendvpd` with a mask vector
//! expanded from the lane bits.
//!
//! Float compare-exchange orders lanes by IEEE 754 `totalOrder`, the same
//! order as `f32::total_cmp`: the bit pattern is mapped to a signed integer
//! key and the keys are compared with `vpcmpgt`.
//!
//! Values of these types are only produced by `load_aligned`, whose callers
//! must have checked `available()`. That is what makes the safe methods
//! below sound.

use std::arch::x86_64::*;

use super::{Backend, SimdRegister};
use crate::network::tables::{LaneMask, LanePattern};

#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct Avx2I32x8(__m256i);

#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct Avx2I64x4(__m256i);

#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct Avx2F32x8(__m256);

#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct Avx2F64x4(__m256d);

#[inline]
fn avx2_detected() -> bool {
    is_x86_feature_detected!("avx2")
}

/// `vpermd` indices for 8 lanes of 32 bits
#[inline(always)]
unsafe fn lane_index_32(pattern: &LanePattern) -> __m256i {
    let p = pattern.as_array();
    _mm256_setr_epi32(
        p[0] as i32,
        p[1] as i32,
        p[2] as i32,
        p[3] as i32,
        p[4] as i32,
        p[5] as i32,
        p[6] as i32,
        p[7] as i32,
    )
}

/// `vpermd` indices moving 4 lanes of 64 bits as 32-bit halves
#[inline(always)]
unsafe fn lane_index_64(pattern: &LanePattern) -> __m256i {
    let p = pattern.as_array();
    let (a, b, c, d) = (
        p[0] as i32 * 2,
        p[1] as i32 * 2,
        p[2] as i32 * 2,
        p[3] as i32 * 2,
    );
    _mm256_setr_epi32(a, a + 1, b, b + 1, c, c + 1, d, d + 1)
}

/// All-ones in every 32-bit lane whose mask bit is set
#[inline(always)]
unsafe fn lane_mask_32(mask: LaneMask) -> __m256i {
    let select = _mm256_setr_epi32(1, 2, 4, 8, 16, 32, 64, 128);
    let bits = _mm256_set1_epi32(i32::from(mask.bits()));
    _mm256_cmpeq_epi32(_mm256_and_si256(bits, select), select)
}

/// All-ones in every 64-bit lane whose mask bit is set
#[inline(always)]
unsafe fn lane_mask_64(mask: LaneMask) -> __m256i {
    let select = _mm256_setr_epi64x(1, 2, 4, 8);
    let bits = _mm256_set1_epi64x(i64::from(mask.bits()));
    _mm256_cmpeq_epi64(_mm256_and_si256(bits, select), select)
}

/// Signed-integer key of `f32` bits: flips the magnitude of negatives
#[inline(always)]
unsafe fn order_key_32(bits: __m256i) -> __m256i {
    _mm256_xor_si256(bits, _mm256_srli_epi32::<1>(_mm256_srai_epi32::<31>(bits)))
}

/// Signed-integer key of `f64` bits
#[inline(always)]
unsafe fn order_key_64(bits: __m256i) -> __m256i {
    let negative = _mm256_cmpgt_epi64(_mm256_setzero_si256(), bits);
    _mm256_xor_si256(bits, _mm256_srli_epi64::<1>(negative))
}

/// Compare-exchange of integer lanes given the lanes where `a > b`
#[inline(always)]
unsafe fn exchange(a: __m256i, b: __m256i, greater: __m256i) -> (__m256i, __m256i) {
    (
        _mm256_blendv_epi8(a, b, greater),
        _mm256_blendv_epi8(b, a, greater),
    )
}

unsafe impl SimdRegister for Avx2I32x8 {
    type Elem = i32;
    type Rows = [Self; 8];

    const LANES: usize = 8;
    const BACKEND: Backend = Backend::Avx2;

    #[inline]
    fn available() -> bool {
        avx2_detected()
    }

    #[inline(always)]
    unsafe fn load_aligned(src: *const i32) -> Self {
        unsafe { Avx2I32x8(_mm256_load_si256(src as *const __m256i)) }
    }

    #[inline(always)]
    unsafe fn store_aligned(self, dst: *mut i32) {
        unsafe { _mm256_store_si256(dst as *mut __m256i, self.0) }
    }

    #[inline(always)]
    fn min_max(self, other: Self) -> (Self, Self) {
        unsafe {
            (
                Avx2I32x8(_mm256_min_epi32(self.0, other.0)),
                Avx2I32x8(_mm256_max_epi32(self.0, other.0)),
            )
        }
    }

    #[inline(always)]
    fn permute(self, pattern: &LanePattern) -> Self {
        unsafe { Avx2I32x8(_mm256_permutevar8x32_epi32(self.0, lane_index_32(pattern))) }
    }

    #[inline(always)]
    fn blend(self, other: Self, mask: LaneMask) -> Self {
        unsafe { Avx2I32x8(_mm256_blendv_epi8(self.0, other.0, lane_mask_32(mask))) }
    }
}

unsafe impl SimdRegister for Avx2I64x4 {
    type Elem = i64;
    type Rows = [Self; 4];

    const LANES: usize = 4;
    const BACKEND: Backend = Backend::Avx2;

    #[inline]
    fn available() -> bool {
        avx2_detected()
    }

    #[inline(always)]
    unsafe fn load_aligned(src: *const i64) -> Self {
        unsafe { Avx2I64x4(_mm256_load_si256(src as *const __m256i)) }
    }

    #[inline(always)]
    unsafe fn store_aligned(self, dst: *mut i64) {
        unsafe { _mm256_store_si256(dst as *mut __m256i, self.0) }
    }

    #[inline(always)]
    fn min_max(self, other: Self) -> (Self, Self) {
        unsafe {
            let greater = _mm256_cmpgt_epi64(self.0, other.0);
            let (lo, hi) = exchange(self.0, other.0, greater);
            (Avx2I64x4(lo), Avx2I64x4(hi))
        }
    }

    #[inline(always)]
    fn permute(self, pattern: &LanePattern) -> Self {
        unsafe { Avx2I64x4(_mm256_permutevar8x32_epi32(self.0, lane_index_64(pattern))) }
    }

    #[inline(always)]
    fn blend(self, other: Self, mask: LaneMask) -> Self {
        unsafe { Avx2I64x4(_mm256_blendv_epi8(self.0, other.0, lane_mask_64(mask))) }
    }
}

unsafe impl SimdRegister for Avx2F32x8 {
    type Elem = f32;
    type Rows = [Self; 8];

    const LANES: usize = 8;
    const BACKEND: Backend = Backend::Avx2;

    #[inline]
    fn available() -> bool {
        avx2_detected()
    }

    #[inline(always)]
    unsafe fn load_aligned(src: *const f32) -> Self {
        unsafe { Avx2F32x8(_mm256_load_ps(src)) }
    }

    #[inline(always)]
    unsafe fn store_aligned(self, dst: *mut f32) {
        unsafe { _mm256_store_ps(dst, self.0) }
    }

    #[inline(always)]
    fn min_max(self, other: Self) -> (Self, Self) {
        unsafe {
            let a = _mm256_castps_si256(self.0);
            let b = _mm256_castps_si256(other.0);
            let greater = _mm256_cmpgt_epi32(order_key_32(a), order_key_32(b));
            let (lo, hi) = exchange(a, b, greater);
            (
                Avx2F32x8(_mm256_castsi256_ps(lo)),
                Avx2F32x8(_mm256_castsi256_ps(hi)),
            )
        }
    }

    #[inline(always)]
    fn permute(self, pattern: &LanePattern) -> Self {
        unsafe { Avx2F32x8(_mm256_permutevar8x32_ps(self.0, lane_index_32(pattern))) }
    }

    #[inline(always)]
    fn blend(self, other: Self, mask: LaneMask) -> Self {
        unsafe {
            let mask = _mm256_castsi256_ps(lane_mask_32(mask));
            Avx2F32x8(_mm256_blendv_ps(self.0, other.0, mask))
        }
    }
}

unsafe impl SimdRegister for Avx2F64x4 {
    type Elem = f64;
    type Rows = [Self; 4];

    const LANES: usize = 4;
    const BACKEND: Backend = Backend::Avx2;

    #[inline]
    fn available() -> bool {
        avx2_detected()
    }

    #[inline(always)]
    unsafe fn load_aligned(src: *const f64) -> Self {
        unsafe { Avx2F64x4(_mm256_load_pd(src)) }
    }

    #[inline(always)]
    unsafe fn store_aligned(self, dst: *mut f64) {
        unsafe { _mm256_store_pd(dst, self.0) }
    }

    #[inline(always)]
    fn min_max(self, other: Self) -> (Self, Self) {
        unsafe {
            let a = _mm256_castpd_si256(self.0);
            let b = _mm256_castpd_si256(other.0);
            let greater = _mm256_cmpgt_epi64(order_key_64(a), order_key_64(b));
            let (lo, hi) = exchange(a, b, greater);
            (
                Avx2F64x4(_mm256_castsi256_pd(lo)),
                Avx2F64x4(_mm256_castsi256_pd(hi)),
            )
        }
    }

    #[inline(always)]
    fn permute(self, pattern: &LanePattern) -> Self {
        unsafe {
            let bits = _mm256_castpd_si256(self.0);
            let moved = _mm256_permutevar8x32_epi32(bits, lane_index_64(pattern));
            Avx2F64x4(_mm256_castsi256_pd(moved))
        }
    }

    #[inline(always)]
    fn blend(self, other: Self, mask: LaneMask) -> Self {
        unsafe {
            let mask = _mm256_castsi256_pd(lane_mask_64(mask));
            Avx2F64x4(_mm256_blendv_pd(self.0, other.0, mask))
        }
    }
}
