//! 4×4 micro-kernel, scalar and lane-pair variants.

use super::{MR, NR};
use crate::config::KernelKind;
use crate::element::Element;
use crate::lanes::LaneVector;
use crate::matrix::MatMut;

/// Computes a 4×4 tile: `C += A_packed × B_packed` with the chosen variant.
///
/// `a_pack` holds `k` groups of 4 row values (see `pack_a`), `b_pack` holds
/// `k` groups of 4 column values (see `pack_b`). `c` may be smaller than 4×4
/// on ragged edges; only the cells inside `c` are written, so the zero padding
/// of the packed strips never reaches C.
///
/// # Panics
///
/// Panics if either packed strip is shorter than `4 * k` or `c` is larger
/// than 4×4.
#[inline]
pub fn add_dot_4x4<T: Element>(
    kind: KernelKind,
    k: usize,
    a_pack: &[T],
    b_pack: &[T],
    c: &mut MatMut<'_, T>,
) {
    match kind {
        KernelKind::Scalar => add_dot_4x4_scalar(k, a_pack, b_pack, c),
        KernelKind::Lanes => add_dot_4x4_lanes(k, a_pack, b_pack, c),
    }
}

/// Scalar variant: 16 accumulators, one per output cell.
pub fn add_dot_4x4_scalar<T: Element>(k: usize, a_pack: &[T], b_pack: &[T], c: &mut MatMut<'_, T>) {
    if k == 0 {
        return;
    }
    let a_pack = &a_pack[..k * MR];
    let b_pack = &b_pack[..k * NR];

    let mut acc = [[T::zero(); NR]; MR];

    for (a_p, b_p) in a_pack.chunks_exact(MR).zip(b_pack.chunks_exact(NR)) {
        for col in 0..NR {
            let b_val = b_p[col];
            for row in 0..MR {
                acc[row][col] = acc[row][col].add(a_p[row].mul(b_val));
            }
        }
    }

    store_tile(&acc, c);
}

/// Lane-pair variant using the element's own lane type.
#[inline]
pub fn add_dot_4x4_lanes<T: Element>(k: usize, a_pack: &[T], b_pack: &[T], c: &mut MatMut<'_, T>) {
    add_dot_4x4_with::<T, T::Lanes>(k, a_pack, b_pack, c);
}

/// Lane-pair variant over an explicit lane type `V`.
///
/// Rows {0, 1} and {2, 3} share a lane pair, giving 8 accumulators
/// `c_01[col]` / `c_23[col]`. Each step loads the two row pairs of A,
/// broadcasts each B value and accumulates; the lanes are unpacked into the
/// 4×4 tile once the reduction is done.
pub fn add_dot_4x4_with<T: Element, V: LaneVector<T>>(
    k: usize,
    a_pack: &[T],
    b_pack: &[T],
    c: &mut MatMut<'_, T>,
) {
    if k == 0 {
        return;
    }
    let a_pack = &a_pack[..k * MR];
    let b_pack = &b_pack[..k * NR];

    let mut c_01 = [V::zero(); NR];
    let mut c_23 = [V::zero(); NR];

    for (a_p, b_p) in a_pack.chunks_exact(MR).zip(b_pack.chunks_exact(NR)) {
        let a_01 = V::load_pair(&a_p[0..2]);
        let a_23 = V::load_pair(&a_p[2..4]);

        for col in 0..NR {
            let b_col = V::broadcast(&b_p[col]);
            c_01[col] = c_01[col].fma(a_01, b_col);
            c_23[col] = c_23[col].fma(a_23, b_col);
        }
    }

    let mut acc = [[T::zero(); NR]; MR];
    for col in 0..NR {
        let [r0, r1] = c_01[col].to_array();
        let [r2, r3] = c_23[col].to_array();
        acc[0][col] = r0;
        acc[1][col] = r1;
        acc[2][col] = r2;
        acc[3][col] = r3;
    }

    store_tile(&acc, c);
}

// Accumulate into C (never overwrite), clipped to the view's extent.
#[inline(always)]
fn store_tile<T: Element>(acc: &[[T; NR]; MR], c: &mut MatMut<'_, T>) {
    assert!(c.rows() <= MR && c.cols() <= NR, "tile larger than 4x4");
    for col in 0..c.cols() {
        for row in 0..c.rows() {
            let cell = c.at_mut(row, col);
            *cell = cell.add(acc[row][col]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Fixed;
    use crate::lanes::Lane2;

    // packed strips for k = 2: A rows (1,2,3,4),(5,6,7,8); B cols (1,0,0,1),(2,2,2,2)
    fn strips() -> (Vec<f64>, Vec<f64>) {
        (
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
            vec![1.0, 0.0, 0.0, 1.0, 2.0, 2.0, 2.0, 2.0],
        )
    }

    fn expected_tile() -> [[f64; 4]; 4] {
        let (a, b) = strips();
        let mut out = [[0.0; 4]; 4];
        for p in 0..2 {
            for row in 0..4 {
                for col in 0..4 {
                    out[row][col] += a[p * 4 + row] * b[p * 4 + col];
                }
            }
        }
        out
    }

    #[test]
    fn scalar_tile_matches_hand_product() {
        let (a, b) = strips();
        let mut c = vec![0.0; 16];
        add_dot_4x4_scalar(2, &a, &b, &mut MatMut::col_major(&mut c, 4, 4));

        let want = expected_tile();
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(c[col * 4 + row], want[row][col]);
            }
        }
    }

    #[test]
    fn lanes_match_scalar() {
        let (a, b) = strips();
        let mut scalar = vec![0.5; 16];
        let mut lanes = vec![0.5; 16];
        let mut portable = vec![0.5; 16];

        add_dot_4x4_scalar(2, &a, &b, &mut MatMut::col_major(&mut scalar, 4, 4));
        add_dot_4x4_lanes(2, &a, &b, &mut MatMut::col_major(&mut lanes, 4, 4));
        add_dot_4x4_with::<f64, Lane2<f64>>(2, &a, &b, &mut MatMut::col_major(&mut portable, 4, 4));

        assert_eq!(scalar, lanes);
        assert_eq!(scalar, portable);
    }

    #[test]
    fn accumulates_into_existing_values() {
        let a: Vec<Fixed> = (1..=4).map(Fixed::from_int).collect();
        let b = vec![Fixed::ONE; 4];
        let mut c = vec![Fixed::from_int(10); 16];
        add_dot_4x4(KernelKind::Lanes, 1, &a, &b, &mut MatMut::col_major(&mut c, 4, 4));

        for col in 0..4 {
            for row in 0..4 {
                assert_eq!(c[col * 4 + row], Fixed::from_int(10 + row as i32 + 1));
            }
        }
    }

    #[test]
    fn zero_depth_leaves_c_untouched() {
        let mut c = vec![-0.0f64; 16];
        add_dot_4x4_scalar(0, &[], &[], &mut MatMut::col_major(&mut c, 4, 4));
        add_dot_4x4_lanes(0, &[], &[], &mut MatMut::col_major(&mut c, 4, 4));
        assert!(c.iter().all(|v| *v == 0.0 && v.is_sign_negative()));
    }

    #[test]
    fn partial_tile_only_writes_inside_view() {
        let (a, b) = strips();
        // 6x6 column-major C, tile is the 3x2 block at (1, 1)
        let mut c = vec![0.0; 36];
        {
            let mut full = MatMut::col_major(&mut c, 6, 6);
            add_dot_4x4_scalar(2, &a, &b, &mut full.sub_mut(1, 1, 3, 2));
        }

        let want = expected_tile();
        for col in 0..6 {
            for row in 0..6 {
                let v = c[col * 6 + row];
                if (1..4).contains(&row) && (1..3).contains(&col) {
                    assert_eq!(v, want[row - 1][col - 1]);
                } else {
                    assert_eq!(v, 0.0, "({}, {}) written outside the tile", row, col);
                }
            }
        }
    }

    #[test]
    fn tile_on_row_major_c() {
        let (a, b) = strips();
        let mut c = vec![0.0; 16];
        add_dot_4x4_lanes(2, &a, &b, &mut MatMut::row_major(&mut c, 4, 4));

        let want = expected_tile();
        for row in 0..4 {
            assert_eq!(c[row * 4..row * 4 + 4], want[row]);
        }
    }
}
