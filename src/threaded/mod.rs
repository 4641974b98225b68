//! Multi-threaded GEMM.
//!
//! Wraps the blocked driver with parallel execution across column ranges of
//! C. Thread count adapts to matrix size - small problems stay on one thread
//! because the overhead isn't worth it.

pub mod gemm_4x4_mt;
