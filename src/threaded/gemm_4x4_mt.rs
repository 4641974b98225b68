//! Multi-threaded 4×4 blocked GEMM.

use std::thread;

use crate::blocked::gemm_4x4::{check_args, matmul_with};
use crate::config::GemmConfig;
use crate::element::Element;
use crate::error::Result;
use crate::kernels::NR;

/// Multi-threaded C += A * B, column-major, default blocking.
///
/// Splits the columns of B and C across scoped threads, each running the
/// blocked driver on its own range with its own packed panels. Every tile of
/// C belongs to exactly one thread, so the result is bit-identical to
/// [`crate::matmul`]. Thread count adapts based on problem size:
/// - < 100M FLOPs: 1 thread
/// - < 300M FLOPs: 2 threads
/// - Otherwise: up to `num_threads`, at most one per 64 columns
#[allow(clippy::too_many_arguments)]
pub fn matmul_parallel<T: Element>(
    m: usize,
    n: usize,
    k: usize,
    a: &[T],
    lda: usize,
    b: &[T],
    ldb: usize,
    c: &mut [T],
    ldc: usize,
    num_threads: usize,
) -> Result<()> {
    matmul_parallel_with(
        &GemmConfig::default(),
        m,
        n,
        k,
        a,
        lda,
        b,
        ldb,
        c,
        ldc,
        num_threads,
    )
}

/// Same as [`matmul_parallel`] with explicit block sizes and micro-kernel.
#[allow(clippy::too_many_arguments)]
pub fn matmul_parallel_with<T: Element>(
    config: &GemmConfig,
    m: usize,
    n: usize,
    k: usize,
    a: &[T],
    lda: usize,
    b: &[T],
    ldb: usize,
    c: &mut [T],
    ldc: usize,
    num_threads: usize,
) -> Result<()> {
    check_args(config, m, n, k, a.len(), lda, b.len(), ldb, c.len(), ldc)
        .inspect_err(|e| log::error!("matmul_parallel rejected: {e}"))?;

    let effective_threads = choose_thread_count(m, n, k, num_threads);
    if effective_threads <= 1 {
        return matmul_with(config, m, n, k, a, lda, b, ldb, c, ldc);
    }

    // Column ranges are whole 4-wide tiles so no tile straddles two threads
    let cols_per_thread = n.div_ceil(effective_threads).div_ceil(NR) * NR;
    log::debug!(
        "matmul_parallel: {} threads, {} columns each",
        effective_threads,
        cols_per_thread
    );

    let config = *config;
    thread::scope(|s| {
        let mut c_rest = c;
        let mut handles = Vec::with_capacity(effective_threads);

        for j0 in (0..n).step_by(cols_per_thread) {
            let cols = cols_per_thread.min(n - j0);

            let take = (cols * ldc).min(c_rest.len());
            let (c_part, tail) = std::mem::take(&mut c_rest).split_at_mut(take);
            c_rest = tail;
            let b_part = &b[(j0 * ldb).min(b.len())..];

            handles.push(s.spawn(move || {
                matmul_with(&config, m, cols, k, a, lda, b_part, ldb, c_part, ldc)
            }));
        }

        handles.into_iter().try_for_each(|handle| match handle.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        })
    })
}

fn choose_thread_count(m: usize, n: usize, k: usize, max_threads: usize) -> usize {
    let flops = 2.0 * (m * n * k) as f64;

    const SINGLE_THREAD_THRESHOLD: f64 = 100_000_000.0;
    const TWO_THREAD_THRESHOLD: f64 = 300_000_000.0;

    let optimal_threads = if flops < SINGLE_THREAD_THRESHOLD {
        1
    } else if flops < TWO_THREAD_THRESHOLD {
        2
    } else {
        max_threads
    };

    let threads_by_cols = (n / 64).max(1);

    optimal_threads.min(threads_by_cols).min(max_threads).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_problems_stay_single_threaded() {
        assert_eq!(choose_thread_count(64, 64, 64, 8), 1);
        assert_eq!(choose_thread_count(4, 4, 4, 0), 1);
    }

    #[test]
    fn thread_count_scales_with_flops_and_columns() {
        // 2 * 400^3 = 128M flops -> two threads
        assert_eq!(choose_thread_count(400, 400, 400, 8), 2);
        // 2 * 512^3 = 268M -> still two
        assert_eq!(choose_thread_count(512, 512, 512, 8), 2);
        // 2 * 1024 * 256 * 1024 = 537M, but only 4 column slabs of 64
        assert_eq!(choose_thread_count(1024, 256, 1024, 8), 4);
        assert_eq!(choose_thread_count(1024, 1024, 1024, 3), 3);
    }
}
