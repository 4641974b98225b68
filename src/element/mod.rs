//! Numeric element types the GEMM pipeline runs over.
//!
//! Everything above this module only ever calls `zero`, `add` and `mul`, so
//! the rounding and overflow behaviour of a product is entirely decided here:
//!
//! - `f32` / `f64`: IEEE 754, round-to-nearest-even. `mul` and `add` are two
//!   separately rounded operations, never a fused multiply-add.
//! - [`Fixed`]: signed Q24.8 on `i32`. Addition wraps, multiplication
//!   truncates toward negative infinity and wraps.

use std::fmt::Debug;

use crate::lanes::{Lane2, LaneVector};

pub mod fixed;

pub use fixed::Fixed;

/// Scalar consumed by the packing routines and micro-kernels.
pub trait Element: Copy + PartialEq + Debug + Send + Sync + 'static {
    /// Two-wide lane type used by the vectorized micro-kernel.
    type Lanes: LaneVector<Self>;

    fn zero() -> Self;

    fn add(self, rhs: Self) -> Self;

    fn mul(self, rhs: Self) -> Self;

    /// Integer conversion used by the fill helpers.
    fn from_i32(v: i32) -> Self;
}

impl Element for f32 {
    type Lanes = Lane2<f32>;

    #[inline(always)]
    fn zero() -> Self {
        0.0
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
        v as f32
    }
}

impl Element for f64 {
    #[cfg(target_arch = "x86_64")]
    type Lanes = crate::lanes::sse2::Sse2F64;
    #[cfg(not(target_arch = "x86_64"))]
    type Lanes = Lane2<f64>;

    #[inline(always)]
    fn zero() -> Self {
        0.0
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
        v as f64
    }
}
