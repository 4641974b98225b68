//! SSE2 lane pair for `f64`.

use std::arch::x86_64::*;

use super::LaneVector;

/// Two `f64` lanes in one `__m128d` register.
///
/// SSE2 is part of the x86_64 baseline, so no runtime detection is needed.
/// The product and the sum are issued as separate `mulpd` / `addpd` so the
/// rounding matches the scalar kernel.
#[derive(Clone, Copy, Debug)]
pub struct Sse2F64(__m128d);

#[allow(unused_unsafe)]
impl LaneVector<f64> for Sse2F64 {
    #[inline(always)]
    fn zero() -> Self {
        Sse2F64(unsafe { _mm_setzero_pd() })
    }

    #[inline(always)]
    fn load_pair(src: &[f64]) -> Self {
        let pair = &src[..2];
        // `pair` is bounds-checked above, unaligned load is fine
        Sse2F64(unsafe { _mm_loadu_pd(pair.as_ptr()) })
    }

    #[inline(always)]
    fn broadcast(src: &f64) -> Self {
        Sse2F64(unsafe { _mm_load1_pd(src) })
    }

    #[inline(always)]
    fn fma(self, x: Self, y: Self) -> Self {
        Sse2F64(unsafe { _mm_add_pd(self.0, _mm_mul_pd(x.0, y.0)) })
    }

    #[inline(always)]
    fn to_array(self) -> [f64; 2] {
        let mut out = [0.0; 2];
        unsafe { _mm_storeu_pd(out.as_mut_ptr(), self.0) };
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lanes::Lane2;

    #[test]
    fn matches_portable_lanes() {
        let vals = [0.1, -7.25, 1e-300, 3.5e12, f64::MIN_POSITIVE, 2.0 / 3.0];
        for &a in &vals {
            for &b in &vals {
                for &s in &vals {
                    let hw = Sse2F64::load_pair(&[a, b]).fma(
                        Sse2F64::load_pair(&[b, a]),
                        Sse2F64::broadcast(&s),
                    );
                    let sw = Lane2::load_pair(&[a, b])
                        .fma(Lane2::load_pair(&[b, a]), Lane2::broadcast(&s));
                    assert_eq!(hw.to_array(), sw.to_array());
                }
            }
        }
    }

    #[test]
    fn zero_is_zero() {
        assert_eq!(Sse2F64::zero().to_array(), [0.0, 0.0]);
    }
}
