//! Q24.8 fixed-point element.

use std::fmt;
use std::ops::{Add, Mul};

use super::Element;
use crate::lanes::Lane2;

/// Signed fixed-point number with 24 integer bits and 8 fraction bits.
///
/// ```
/// use blocked_gemm::Fixed;
///
/// let x = Fixed::from_int(3);
/// let half = Fixed::from_raw(128);
///
/// assert_eq!((x * half).to_f64(), 1.5);
/// assert_eq!((x + half).raw(), 3 * 256 + 128);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Fixed(i32);

impl Fixed {
    pub const FRAC_BITS: u32 = 8;
    pub const ONE: Fixed = Fixed(1 << Self::FRAC_BITS);
    pub const ZERO: Fixed = Fixed(0);

    pub const fn from_raw(raw: i32) -> Self {
        Fixed(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Integer part wraps if it does not fit in 24 bits.
    pub const fn from_int(v: i32) -> Self {
        Fixed(v.wrapping_shl(Self::FRAC_BITS))
    }

    /// Truncates toward zero; saturates outside the representable range.
    pub fn from_f64(v: f64) -> Self {
        Fixed((v * f64::from(1u32 << Self::FRAC_BITS)) as i32)
    }

    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / f64::from(1u32 << Self::FRAC_BITS)
    }
}

impl Add for Fixed {
    type Output = Fixed;

    #[inline(always)]
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_add(rhs.0))
    }
}

impl Mul for Fixed {
    type Output = Fixed;

    #[inline(always)]
    fn mul(self, rhs: Fixed) -> Fixed {
        let wide = i64::from(self.0) * i64::from(rhs.0);
        Fixed((wide >> Self::FRAC_BITS) as i32)
    }
}

impl Element for Fixed {
    type Lanes = Lane2<Fixed>;

    #[inline(always)]
    fn zero() -> Self {
        Fixed::ZERO
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self * rhs
    }

    #[inline(always)]
    fn from_i32(v: i32) -> Self {
        Fixed::from_int(v)
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.to_f64())
    }
}
