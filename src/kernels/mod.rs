//! 4×4 micro-kernels for the inner loop of the blocked GEMM.
//!
//! A micro-kernel computes one tile `C[0:4, 0:4] += A_strip × B_strip` over
//! the whole reduction depth of the current block, reading A and B from the
//! packed panels built by [`crate::blocked::pack`].
//!
//! Available kernels:
//! - `add_dot_4x4_scalar`: 16 scalar accumulators
//! - `add_dot_4x4_lanes`: 8 lane-pair accumulators through [`crate::lanes`]

pub mod kernel_4x4;

/// Tile height (rows of C per micro-kernel call).
pub const MR: usize = 4;
/// Tile width (columns of C per micro-kernel call).
pub const NR: usize = 4;
