//! Two-wide vector lanes for the vectorized micro-kernel.
//!
//! The micro-kernel is written once against [`LaneVector`]. [`Lane2`] is the
//! portable version and works for every [`Element`]; on x86_64, `f64` uses
//! [`sse2::Sse2F64`] instead, which keeps the values in an SSE register.
//!
//! `fma` is "accumulate a product", not a fused instruction: every
//! implementation must round exactly like `acc.add(x.mul(y))` on each lane so
//! both micro-kernels agree bit for bit.

use crate::element::Element;

#[cfg(target_arch = "x86_64")]
pub mod sse2;

/// A pair of `T` values operated on together.
pub trait LaneVector<T>: Copy {
    /// Both lanes set to zero.
    fn zero() -> Self;

    /// Lanes `[src[0], src[1]]`.
    ///
    /// # Panics
    ///
    /// Panics if `src` holds fewer than two elements.
    fn load_pair(src: &[T]) -> Self;

    /// Both lanes set to `*src`.
    fn broadcast(src: &T) -> Self;

    /// Per lane: `self + x * y`.
    fn fma(self, x: Self, y: Self) -> Self;

    fn to_array(self) -> [T; 2];
}

/// Portable lane pair backed by a plain array.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lane2<T>(pub [T; 2]);

impl<T: Element> LaneVector<T> for Lane2<T> {
    #[inline(always)]
    fn zero() -> Self {
        Lane2([T::zero(); 2])
    }

    #[inline(always)]
    fn load_pair(src: &[T]) -> Self {
        Lane2([src[0], src[1]])
    }

    #[inline(always)]
    fn broadcast(src: &T) -> Self {
        Lane2([*src; 2])
    }

    #[inline(always)]
    fn fma(self, x: Self, y: Self) -> Self {
        let [a0, a1] = self.0;
        Lane2([a0.add(x.0[0].mul(y.0[0])), a1.add(x.0[1].mul(y.0[1]))])
    }

    #[inline(always)]
    fn to_array(self) -> [T; 2] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Fixed;

    #[test]
    fn lane2_fma_accumulates_per_lane() {
        let acc = Lane2::<f64>::load_pair(&[1.0, 2.0]);
        let x = Lane2::load_pair(&[3.0, 4.0]);
        let y = Lane2::broadcast(&10.0);
        assert_eq!(acc.fma(x, y).to_array(), [31.0, 42.0]);
    }

    #[test]
    fn lane2_zero_and_fixed_point() {
        let acc = Lane2::<Fixed>::zero();
        let x = Lane2::load_pair(&[Fixed::from_int(2), Fixed::from_int(-3)]);
        let y = Lane2::broadcast(&Fixed::from_int(5));
        assert_eq!(
            acc.fma(x, y).to_array(),
            [Fixed::from_int(10), Fixed::from_int(-15)]
        );
    }

    #[test]
    #[should_panic]
    fn load_pair_rejects_short_source() {
        let _ = Lane2::<f32>::load_pair(&[1.0]);
    }
}
