//! Packing of A and B strips into micro-kernel order.
//!
//! Both routines are pure copies. Strips narrower than the tile (ragged
//! edges) are padded with zeros so the micro-kernel always reads full groups
//! of 4.

use crate::element::Element;
use crate::kernels::{MR, NR};
use crate::matrix::MatRef;

/// Pack a strip of up to 4 rows of A (all `k` columns of the block).
///
/// Original: strided, row `r` of step `p` at `a(r, p)`.
/// Packed: `k` groups of 4, `dest[p * 4 + r] = a(r, p)`, so the 4 row values
/// the micro-kernel needs at step `p` sit next to each other.
///
/// # Panics
///
/// Panics if the strip has more than 4 rows or `dest` holds fewer than
/// `4 * k` elements.
pub fn pack_a<T: Element>(a: MatRef<'_, T>, dest: &mut [T]) {
    let (rows, k) = (a.rows(), a.cols());
    assert!(rows <= MR, "A strip has {} rows, max {}", rows, MR);
    let dest = &mut dest[..k * MR];

    for (p, group) in dest.chunks_exact_mut(MR).enumerate() {
        match a.col_slice(p) {
            // column-major full strip: the 4 rows are already contiguous
            Some(col) if rows == MR => group.copy_from_slice(col),
            _ => {
                for (r, slot) in group.iter_mut().enumerate() {
                    *slot = if r < rows { a.at(r, p) } else { T::zero() };
                }
            }
        }
    }
}

/// Pack a strip of up to 4 columns of B (all `k` rows of the block).
///
/// Original: 4 column streams, each strided by `ldb` in column-major storage.
/// Packed: `k` groups of 4, `dest[p * 4 + c] = b(p, c)`, interleaving the
/// four streams into one unit-stride stream.
///
/// # Panics
///
/// Panics if the strip has more than 4 columns or `dest` holds fewer than
/// `4 * k` elements.
pub fn pack_b<T: Element>(b: MatRef<'_, T>, dest: &mut [T]) {
    let (k, cols) = (b.rows(), b.cols());
    assert!(cols <= NR, "B strip has {} columns, max {}", cols, NR);
    let dest = &mut dest[..k * NR];

    let mut streams: [Option<&[T]>; NR] = [None; NR];
    for (c, stream) in streams.iter_mut().enumerate().take(cols) {
        *stream = b.col_slice(c);
    }

    for (p, group) in dest.chunks_exact_mut(NR).enumerate() {
        for (c, slot) in group.iter_mut().enumerate() {
            *slot = if c >= cols {
                T::zero()
            } else if let Some(stream) = streams[c] {
                stream[p]
            } else {
                b.at(p, c)
            };
        }
    }
}
