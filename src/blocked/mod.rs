//! Cache-blocked GEMM.
//!
//! The driver splits the reduction dimension into `kc`-deep blocks and the
//! rows into `mc`-tall blocks, packs A and B strips for unit-stride access,
//! then calls the 4×4 micro-kernel for every tile of C.
//!
//! - `gemm_4x4`: blocking driver and inner kernel
//! - `pack`: A and B strip packing

pub mod gemm_4x4;
pub mod pack;
