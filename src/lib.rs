//! Cache-blocked, packed matrix multiplication with a 4×4 micro-kernel.
//!
//! Computes `C ← A·B + C` the way optimized BLAS libraries do, without
//! depending on one: cache blocking over the reduction and row dimensions,
//! packing of A and B strips into unit-stride panels, and a fixed 4×4
//! micro-kernel that accumulates a whole tile in registers before touching C.
//!
//! ## Usage
//!
//! ```
//! use blocked_gemm::matmul;
//!
//! // column-major, m = n = k = 64
//! let a = vec![1.0f64; 64 * 64];
//! let b = vec![2.0f64; 64 * 64];
//! let mut c = vec![0.0f64; 64 * 64];
//!
//! matmul(64, 64, 64, &a, 64, &b, 64, &mut c, 64).unwrap();
//! assert!(c.iter().all(|v| *v == 128.0));
//! ```
//!
//! Block sizes and the micro-kernel variant are picked through
//! [`GemmConfig`]:
//!
//! ```
//! use blocked_gemm::{BlockSizes, Fixed, GemmConfig, KernelKind, matmul_with};
//!
//! let config = GemmConfig::new(BlockSizes::new(8, 16, 64).unwrap(), KernelKind::Scalar);
//!
//! let a = vec![Fixed::from_int(2); 8 * 8];
//! let b = vec![Fixed::from_int(3); 8 * 8];
//! let mut c = vec![Fixed::ZERO; 8 * 8];
//!
//! matmul_with(&config, 8, 8, 8, &a, 8, &b, 8, &mut c, 8).unwrap();
//! assert_eq!(c[0], Fixed::from_int(48));
//! ```
//!
//! ## What's inside
//!
//! - Generic element type: `f32`, `f64` and Q24.8 fixed point ([`Fixed`])
//! - Scalar and lane-pair 4×4 micro-kernels (SSE2 lanes for `f64` on x86_64)
//! - Ragged shapes handled with zero-padded panels and clipped tile stores
//! - Column-split multi-threading that matches the single-threaded result

pub mod blocked;
pub mod config;
pub mod element;
pub mod error;
pub mod kernels;
pub mod lanes;
pub mod matrix;
pub mod threaded;

pub use blocked::gemm_4x4::{gemm, matmul, matmul_raw, matmul_with};
pub use config::{BlockSizes, GemmConfig, KernelKind};
pub use element::{Element, Fixed};
pub use error::{GemmError, Operand, Result};
pub use matrix::naive::matmul_naive;
pub use matrix::{Layout, MatMut, MatRef};
pub use threaded::gemm_4x4_mt::{matmul_parallel, matmul_parallel_with};
