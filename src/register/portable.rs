//! Portable registers
//!
//! `Lanes<T, W>` is a register-aligned lane array. Each primitive is a
//! straight-line loop over the lanes with a select instead of a branch, which
//! the compiler lowers to whatever vector instructions the target offers.

use super::{Backend, SimdRegister};
use crate::element::SortElement;
use crate::network::tables::{LaneMask, LanePattern};

/// `W` lanes of `T`, aligned like a 512-bit register
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, align(64))]
pub struct Lanes<T, const W: usize>([T; W]);

pub type I32x8 = Lanes<i32, 8>;
pub type I32x16 = Lanes<i32, 16>;
pub type I64x4 = Lanes<i64, 4>;
pub type I64x8 = Lanes<i64, 8>;
pub type F32x8 = Lanes<f32, 8>;
pub type F32x16 = Lanes<f32, 16>;
pub type F64x4 = Lanes<f64, 4>;
pub type F64x8 = Lanes<f64, 8>;

impl<T: Copy, const W: usize> Lanes<T, W> {
    pub const fn from_array(lanes: [T; W]) -> Self {
        Lanes(lanes)
    }

    pub const fn to_array(self) -> [T; W] {
        self.0
    }

    pub fn lane(&self, index: usize) -> T {
        self.0[index]
    }
}

impl<T: Copy, const W: usize> From<[T; W]> for Lanes<T, W> {
    fn from(lanes: [T; W]) -> Self {
        Lanes(lanes)
    }
}

unsafe impl<T: SortElement, const W: usize> SimdRegister for Lanes<T, W> {
    type Elem = T;
    type Rows = [Self; W];

    const LANES: usize = W;
    const BACKEND: Backend = Backend::Portable;

    #[inline(always)]
    fn available() -> bool {
        true
    }

    #[inline(always)]
    unsafe fn load_aligned(src: *const T) -> Self {
        Lanes(unsafe { std::ptr::read(src as *const [T; W]) })
    }

    #[inline(always)]
    unsafe fn store_aligned(self, dst: *mut T) {
        unsafe { std::ptr::write(dst as *mut [T; W], self.0) }
    }

    #[inline(always)]
    fn min_max(self, other: Self) -> (Self, Self) {
        let mut lo = self.0;
        let mut hi = other.0;
        for i in 0..W {
            let (a, b) = (self.0[i], other.0[i]);
            let swap = a.is_greater(b);
            lo[i] = if swap { b } else { a };
            hi[i] = if swap { a } else { b };
        }
        (Lanes(lo), Lanes(hi))
    }

    #[inline(always)]
    fn permute(self, pattern: &LanePattern) -> Self {
        Lanes(std::array::from_fn(|i| self.0[pattern.source(i)]))
    }

    #[inline(always)]
    fn blend(self, other: Self, mask: LaneMask) -> Self {
        Lanes(std::array::from_fn(|i| {
            if mask.contains(i) {
                other.0[i]
            } else {
                self.0[i]
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment() {
        assert_eq!(std::mem::align_of::<I32x8>(), 64);
        assert_eq!(std::mem::size_of::<I32x16>(), 64);
        assert_eq!(std::mem::size_of::<F64x8>(), 64);
    }

    #[test]
    fn test_min_max_lanes() {
        let a = I32x8::from_array([3, 0, 2, 2, 5, 9, 1, -1]);
        let b = I32x8::from_array([1, 1, 2, 2, 7, 7, 0, 0]);
        let (lo, hi) = a.min_max(b);
        assert_eq!(lo.to_array(), [1, 0, 2, 2, 5, 7, 0, -1]);
        assert_eq!(hi.to_array(), [3, 1, 2, 2, 7, 9, 1, 0]);
    }

    #[test]
    fn test_min_max_orders_signed_zero_and_nan() {
        let nan = f32::from_bits(0x7fc0_0000);
        let neg_nan = f32::from_bits(0xffc0_0000);
        let a = F32x8::from_array([0.0, -0.0, nan, 1.0, neg_nan, 2.0, f32::INFINITY, 0.0]);
        let b = F32x8::from_array([-0.0, 0.0, 1.0, nan, 1.0, neg_nan, nan, 0.0]);
        let (lo, hi) = a.min_max(b);
        let lo = lo.to_array();
        let hi = hi.to_array();

        assert!(lo[0].is_sign_negative() && hi[0].is_sign_positive());
        assert!(lo[1].is_sign_negative() && hi[1].is_sign_positive());
        assert_eq!(lo[2], 1.0);
        assert!(hi[2].is_nan());
        assert_eq!(lo[3], 1.0);
        assert!(hi[3].is_nan());
        // Negative NaN sorts below everything
        assert!(lo[4].is_nan() && lo[4].is_sign_negative());
        assert_eq!(hi[4], 1.0);
        assert!(lo[5].is_nan());
        assert_eq!(hi[5], 2.0);
        assert_eq!(lo[6], f32::INFINITY);
        assert!(hi[6].is_nan());
    }

    #[test]
    fn test_permute_and_blend() {
        let r = I32x8::from_array([10, 11, 12, 13, 14, 15, 16, 17]);
        let reversed = r.permute(&LanePattern::reversed(8));
        assert_eq!(reversed.to_array(), [17, 16, 15, 14, 13, 12, 11, 10]);

        let mixed = r.blend(reversed, LaneMask::new(0b1000_0001));
        assert_eq!(mixed.to_array(), [17, 11, 12, 13, 14, 15, 16, 10]);
    }

    #[test]
    fn test_load_store_round_trip() {
        let src = crate::utils::aligned_copy(&[1i64, 2, 3, 4]);
        let mut dst = crate::utils::aligned_copy(&[0i64; 4]);
        unsafe {
            let r = I64x4::load_aligned(src.as_ptr());
            r.store_aligned(dst.as_mut_ptr());
        }
        assert_eq!(&dst[..], &[1, 2, 3, 4]);
    }
}
