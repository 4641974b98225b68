use crate::element::Element;
use crate::matrix::view::{MatMut, MatRef};

/// Naive matrix multiplication using i-j-p loop order: C += A * B
///
/// This is the textbook triple loop and the correctness oracle for the
/// blocked GEMM. For every `(i, j)` it folds the reduction into C in
/// ascending `p`: `C[i][j] = C[i][j] + A[i][p] * B[p][j]`.
///
/// Works on any mix of row-major and column-major views.
///
/// # Panics
///
/// Panics if the shapes don't line up (`A` m×k, `B` k×n, `C` m×n).
pub fn matmul_naive<T: Element>(a: MatRef<'_, T>, b: MatRef<'_, T>, c: &mut MatMut<'_, T>) {
    let (m, k) = (a.rows(), a.cols());
    let n = b.cols();
    assert_eq!(b.rows(), k, "B: expected {} rows, got {}", k, b.rows());
    assert_eq!(c.rows(), m, "C: expected {} rows, got {}", m, c.rows());
    assert_eq!(c.cols(), n, "C: expected {} cols, got {}", n, c.cols());

    for i in 0..m {
        for j in 0..n {
            for p in 0..k {
                let cell = c.at_mut(i, j);
                *cell = cell.add(a.at(i, p).mul(b.at(p, j)));
            }
        }
    }
}
