//! Fill helpers for test inputs.

use rand::Rng;

use crate::element::Element;
use crate::matrix::view::MatMut;

/// Fills with `1, 2, 3, ...`, walking down each column before moving right.
///
/// The counter follows logical `(i, j)` order, so a row-major view ends up
/// holding the same matrix as a column-major one.
///
/// ```
/// use blocked_gemm::matrix::{MatMut, init::serial_init};
///
/// let mut data = vec![0.0f64; 6];
/// serial_init(&mut MatMut::col_major(&mut data, 2, 3));
/// assert_eq!(data, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// ```
pub fn serial_init<T: Element>(m: &mut MatMut<'_, T>) {
    let mut count = 1;
    for j in 0..m.cols() {
        for i in 0..m.rows() {
            *m.at_mut(i, j) = T::from_i32(count);
            count += 1;
        }
    }
}

/// Fills with integers drawn uniformly from `[-bound, bound]`.
pub fn random_init<T: Element, R: Rng + ?Sized>(m: &mut MatMut<'_, T>, rng: &mut R, bound: u16) {
    let bound = i32::from(bound);
    for j in 0..m.cols() {
        for i in 0..m.rows() {
            *m.at_mut(i, j) = T::from_i32(rng.gen_range(-bound..=bound));
        }
    }
}
