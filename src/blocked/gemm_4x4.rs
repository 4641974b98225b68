//! Blocked GEMM driver and inner kernel around the 4×4 micro-kernel.

use crate::blocked::pack::{pack_a, pack_b};
use crate::config::{GemmConfig, KernelKind};
use crate::element::Element;
use crate::error::{GemmError, Operand, Result};
use crate::kernels::kernel_4x4::add_dot_4x4;
use crate::kernels::{MR, NR};
use crate::matrix::view::check_operand;
use crate::matrix::{Layout, MatMut, MatRef};

/// Matrix multiply: C += A * B, column-major, default blocking.
///
/// A is m×k with leading dimension `lda`, B is k×n with `ldb`, C is m×n with
/// `ldc`. C is accumulated into, never cleared: zero it first for a plain
/// product. Runs with [`GemmConfig::default`] and never reads the
/// environment; pass [`GemmConfig::from_env`] to [`matmul_with`] for that.
///
/// ```
/// use blocked_gemm::matmul;
///
/// // 4x4 identity times B leaves B in C
/// let mut a = vec![0.0f64; 16];
/// for i in 0..4 {
///     a[i * 4 + i] = 1.0;
/// }
/// let b: Vec<f64> = (1..=16).map(|v| v as f64).collect();
/// let mut c = vec![0.0; 16];
///
/// matmul(4, 4, 4, &a, 4, &b, 4, &mut c, 4).unwrap();
/// assert_eq!(c, b);
/// ```
///
/// # Errors
///
/// Rejects the call without touching C when a leading dimension or buffer is
/// too small, when a leading dimension addresses past `usize::MAX`, or when
/// `n` exceeds the packed-B capacity `nb`.
#[allow(clippy::too_many_arguments)]
pub fn matmul<T: Element>(
    m: usize,
    n: usize,
    k: usize,
    a: &[T],
    lda: usize,
    b: &[T],
    ldb: usize,
    c: &mut [T],
    ldc: usize,
) -> Result<()> {
    matmul_with(&GemmConfig::default(), m, n, k, a, lda, b, ldb, c, ldc)
}

/// Same as [`matmul`] with explicit block sizes and micro-kernel.
#[allow(clippy::too_many_arguments)]
pub fn matmul_with<T: Element>(
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
) -> Result<()> {
    check_args(config, m, n, k, a.len(), lda, b.len(), ldb, c.len(), ldc)
        .inspect_err(|e| log::error!("matmul rejected: {e}"))?;

    let a = MatRef::new(a, m, k, lda, Layout::ColMajor);
    let b = MatRef::new(b, k, n, ldb, Layout::ColMajor);
    let mut c = MatMut::new(c, m, n, ldc, Layout::ColMajor);
    run_blocked(config, a, b, &mut c);
    Ok(())
}

/// Blocked multiply over views: C += A * B, any mix of layouts.
///
/// # Errors
///
/// Rejects mismatched shapes, invalid block sizes and `n > nb` before any
/// write to C.
pub fn gemm<T: Element>(
    config: &GemmConfig,
    a: MatRef<'_, T>,
    b: MatRef<'_, T>,
    c: &mut MatMut<'_, T>,
) -> Result<()> {
    let check = || -> Result<()> {
        if a.cols() != b.rows() || a.rows() != c.rows() || b.cols() != c.cols() {
            return Err(GemmError::ShapeMismatch {
                a: (a.rows(), a.cols()),
                b: (b.rows(), b.cols()),
                c: (c.rows(), c.cols()),
            });
        }
        check_blocking(config, b.cols())
    };
    check().inspect_err(|e| log::error!("gemm rejected: {e}"))?;

    run_blocked(config, a, b, c);
    Ok(())
}

/// Pointer-based entry point: C += A * B, column-major.
///
/// Null operands are reported before anything is read or written.
///
/// # Safety
///
/// For every non-null operand the caller must ensure the pointer is valid
/// for reads (writes, for `c`) of the column-major range its dimensions and
/// leading dimension address, and that `c` does not overlap `a` or `b`.
#[allow(clippy::too_many_arguments)]
pub unsafe fn matmul_raw<T: Element>(
    m: usize,
    n: usize,
    k: usize,
    a: *const T,
    lda: usize,
    b: *const T,
    ldb: usize,
    c: *mut T,
    ldc: usize,
) -> Result<()> {
    let nulls = [
        (Operand::A, a.is_null()),
        (Operand::B, b.is_null()),
        (Operand::C, c.is_null()),
    ];
    if let Some(&(operand, _)) = nulls.iter().find(|(_, null)| *null) {
        let err = GemmError::NullOperand { operand };
        log::error!("matmul rejected: {err}");
        return Err(err);
    }

    let layout = Layout::ColMajor;
    let span = |operand: Operand, rows: usize, cols: usize, ld: usize| -> Result<usize> {
        let min = layout.min_ld(rows, cols);
        if ld < min {
            return Err(GemmError::LeadingDimension { operand, ld, min });
        }
        layout
            .required_len(rows, cols, ld)
            .ok_or(GemmError::AddressOverflow { operand, ld })
    };
    let lens = span(Operand::A, m, k, lda).and_then(|a_len| {
        Ok((
            a_len,
            span(Operand::B, k, n, ldb)?,
            span(Operand::C, m, n, ldc)?,
        ))
    });
    let (a_len, b_len, c_len) = lens.inspect_err(|e| log::error!("matmul rejected: {e}"))?;

    // SAFETY: non-null, and the caller guarantees each addressed range is
    // valid and that C is disjoint from A and B.
    let (a, b, c) = unsafe {
        (
            std::slice::from_raw_parts(a, a_len),
            std::slice::from_raw_parts(b, b_len),
            std::slice::from_raw_parts_mut(c, c_len),
        )
    };
    matmul(m, n, k, a, lda, b, ldb, c, ldc)
}

/// All precondition checks for the column-major slice entry points.
#[allow(clippy::too_many_arguments)]
pub(crate) fn check_args(
    config: &GemmConfig,
    m: usize,
    n: usize,
    k: usize,
    a_len: usize,
    lda: usize,
    b_len: usize,
    ldb: usize,
    c_len: usize,
    ldc: usize,
) -> Result<()> {
    let layout = Layout::ColMajor;
    check_operand(Operand::A, a_len, m, k, lda, layout)?;
    check_operand(Operand::B, b_len, k, n, ldb, layout)?;
    check_operand(Operand::C, c_len, m, n, ldc, layout)?;
    check_blocking(config, n)
}

fn check_blocking(config: &GemmConfig, n: usize) -> Result<()> {
    let blocks = config.blocks;
    blocks.validate()?;
    if n > blocks.nb {
        return Err(GemmError::CapacityExceeded { n, nb: blocks.nb });
    }
    Ok(())
}

// Shapes and block sizes are validated by the callers.
fn run_blocked<T: Element>(
    config: &GemmConfig,
    a: MatRef<'_, T>,
    b: MatRef<'_, T>,
    c: &mut MatMut<'_, T>,
) {
    let (m, k) = (a.rows(), a.cols());
    let n = b.cols();
    if m == 0 || n == 0 || k == 0 {
        return;
    }

    let blocks = config.blocks;
    log::debug!(
        "gemm m={} n={} k={} mc={} kc={} nb={} kernel={:?}",
        m,
        n,
        k,
        blocks.mc,
        blocks.kc,
        blocks.nb,
        config.kernel
    );
    if m % MR != 0 || n % NR != 0 {
        log::debug!(
            "ragged edge tiles: {} rows, {} cols padded in the panels",
            m % MR,
            n % NR
        );
    }

    // B panel for one k-block, built on the first row-block and reused by
    // the rest. Bounded by kc * nb since n <= nb.
    let n_padded = n.div_ceil(NR) * NR;
    let mut packed_b = vec![T::zero(); blocks.kc.min(k) * n_padded];

    // Outer: K dimension (reduction blocks)
    for p in (0..k).step_by(blocks.kc) {
        let pb = blocks.kc.min(k - p);
        log::trace!("k-block p={} pb={}", p, pb);

        // Middle: M dimension (row blocks)
        for i in (0..m).step_by(blocks.mc) {
            let ib = blocks.mc.min(m - i);
            inner_kernel(
                config.kernel,
                a.sub(i, p, ib, pb),
                b.sub(p, 0, pb, n),
                &mut c.sub_mut(i, 0, ib, n),
                &mut packed_b[..pb * n_padded],
                i == 0,
            );
        }
    }
}

/// One `ib × n × pb` block: pack on demand, then sweep 4×4 tiles.
///
/// The B strip for columns `j..j+4` lives at `packed_b[j * k..]` and is only
/// written when `first_time` is set; the A strip for rows `i..i+4` lives at
/// `packed_a[i * k..]` and is packed while sweeping the first column of tiles.
fn inner_kernel<T: Element>(
    kernel: KernelKind,
    a: MatRef<'_, T>,
    b: MatRef<'_, T>,
    c: &mut MatMut<'_, T>,
    packed_b: &mut [T],
    first_time: bool,
) {
    let (m, k) = (a.rows(), a.cols());
    let n = b.cols();
    let mut packed_a = vec![T::zero(); m.div_ceil(MR) * MR * k];

    for j in (0..n).step_by(NR) {
        let nr = NR.min(n - j);
        let b_strip = &mut packed_b[j * k..(j + NR) * k];
        if first_time {
            pack_b(b.sub(0, j, k, nr), b_strip);
        }

        for i in (0..m).step_by(MR) {
            let mr = MR.min(m - i);
            let a_strip = &mut packed_a[i * k..(i + MR) * k];
            if j == 0 {
                pack_a(a.sub(i, 0, mr, k), a_strip);
            }

            add_dot_4x4(kernel, k, a_strip, b_strip, &mut c.sub_mut(i, j, mr, nr));
        }
    }
}
