//! Strided matrix views over caller-owned buffers.

use crate::error::{GemmError, Operand, Result};

/// Storage order of a matrix inside its linear buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layout {
    /// `(i, j)` lives at `j * ld + i`.
    #[default]
    ColMajor,
    /// `(i, j)` lives at `i * ld + j`.
    RowMajor,
}

impl Layout {
    #[inline(always)]
    pub fn index(self, i: usize, j: usize, ld: usize) -> usize {
        match self {
            Layout::ColMajor => j * ld + i,
            Layout::RowMajor => i * ld + j,
        }
    }

    /// Smallest legal leading dimension for a `rows × cols` matrix.
    pub fn min_ld(self, rows: usize, cols: usize) -> usize {
        match self {
            Layout::ColMajor => rows,
            Layout::RowMajor => cols,
        }
    }

    /// Number of buffer elements a `rows × cols` matrix with stride `ld` spans,
    /// or `None` if that span does not fit in `usize`.
    pub fn required_len(self, rows: usize, cols: usize, ld: usize) -> Option<usize> {
        if rows == 0 || cols == 0 {
            return Some(0);
        }
        let (i, j) = (rows - 1, cols - 1);
        let last = match self {
            Layout::ColMajor => j.checked_mul(ld)?.checked_add(i)?,
            Layout::RowMajor => i.checked_mul(ld)?.checked_add(j)?,
        };
        last.checked_add(1)
    }
}

/// Checks that `len` elements with stride `ld` can hold a `rows × cols` operand.
pub(crate) fn check_operand(
    operand: Operand,
    len: usize,
    rows: usize,
    cols: usize,
    ld: usize,
    layout: Layout,
) -> Result<()> {
    let min = layout.min_ld(rows, cols);
    if ld < min {
        return Err(GemmError::LeadingDimension { operand, ld, min });
    }
    let required = layout
        .required_len(rows, cols, ld)
        .ok_or(GemmError::AddressOverflow { operand, ld })?;
    if len < required {
        return Err(GemmError::BufferTooSmall {
            operand,
            len,
            required,
        });
    }
    Ok(())
}

/// Read-only `rows × cols` view.
#[derive(Clone, Copy, Debug)]
pub struct MatRef<'a, T> {
    data: &'a [T],
    rows: usize,
    cols: usize,
    ld: usize,
    layout: Layout,
}

impl<'a, T: Copy> MatRef<'a, T> {
    /// # Panics
    ///
    /// Panics if `ld` or `data.len()` is too small for the shape.
    pub fn new(data: &'a [T], rows: usize, cols: usize, ld: usize, layout: Layout) -> Self {
        assert!(
            ld >= layout.min_ld(rows, cols),
            "leading dimension {} too small for {}x{} {:?}",
            ld,
            rows,
            cols,
            layout
        );
        assert!(
            layout
                .required_len(rows, cols, ld)
                .is_some_and(|required| data.len() >= required),
            "buffer of {} elements too small for {}x{} with ld {}",
            data.len(),
            rows,
            cols,
            ld
        );
        MatRef {
            data,
            rows,
            cols,
            ld,
            layout,
        }
    }

    /// Dense column-major view (`ld == rows`).
    pub fn col_major(data: &'a [T], rows: usize, cols: usize) -> Self {
        Self::new(data, rows, cols, rows, Layout::ColMajor)
    }

    /// Dense row-major view (`ld == cols`).
    pub fn row_major(data: &'a [T], rows: usize, cols: usize) -> Self {
        Self::new(data, rows, cols, cols, Layout::RowMajor)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn ld(&self) -> usize {
        self.ld
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[inline(always)]
    pub fn at(&self, i: usize, j: usize) -> T {
        debug_assert!(i < self.rows && j < self.cols);
        self.data[self.layout.index(i, j, self.ld)]
    }

    /// Column `j` as one contiguous run, if the layout stores it that way.
    pub fn col_slice(&self, j: usize) -> Option<&'a [T]> {
        assert!(j < self.cols);
        let full: &'a [T] = self.data;
        match self.layout {
            Layout::ColMajor if self.rows == 0 => Some(&full[..0]),
            Layout::ColMajor => Some(&full[j * self.ld..j * self.ld + self.rows]),
            Layout::RowMajor => None,
        }
    }

    /// View of the `rows × cols` block whose top-left corner is `(i, j)`.
    pub fn sub(&self, i: usize, j: usize, rows: usize, cols: usize) -> MatRef<'a, T> {
        assert!(i + rows <= self.rows && j + cols <= self.cols);
        let full: &'a [T] = self.data;
        let data = if rows == 0 || cols == 0 {
            &full[..0]
        } else {
            &full[self.layout.index(i, j, self.ld)..]
        };
        MatRef {
            data,
            rows,
            cols,
            ld: self.ld,
            layout: self.layout,
        }
    }
}

/// Mutable `rows × cols` view.
#[derive(Debug)]
pub struct MatMut<'a, T> {
    data: &'a mut [T],
    rows: usize,
    cols: usize,
    ld: usize,
    layout: Layout,
}

impl<'a, T: Copy> MatMut<'a, T> {
    /// # Panics
    ///
    /// Panics if `ld` or `data.len()` is too small for the shape.
    pub fn new(data: &'a mut [T], rows: usize, cols: usize, ld: usize, layout: Layout) -> Self {
        assert!(
            ld >= layout.min_ld(rows, cols),
            "leading dimension {} too small for {}x{} {:?}",
            ld,
            rows,
            cols,
            layout
        );
        assert!(
            layout
                .required_len(rows, cols, ld)
                .is_some_and(|required| data.len() >= required),
            "buffer of {} elements too small for {}x{} with ld {}",
            data.len(),
            rows,
            cols,
            ld
        );
        MatMut {
            data,
            rows,
            cols,
            ld,
            layout,
        }
    }

    pub fn col_major(data: &'a mut [T], rows: usize, cols: usize) -> Self {
        Self::new(data, rows, cols, rows, Layout::ColMajor)
    }

    pub fn row_major(data: &'a mut [T], rows: usize, cols: usize) -> Self {
        Self::new(data, rows, cols, cols, Layout::RowMajor)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn ld(&self) -> usize {
        self.ld
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[inline(always)]
    pub fn at(&self, i: usize, j: usize) -> T {
        debug_assert!(i < self.rows && j < self.cols);
        self.data[self.layout.index(i, j, self.ld)]
    }

    #[inline(always)]
    pub fn at_mut(&mut self, i: usize, j: usize) -> &mut T {
        debug_assert!(i < self.rows && j < self.cols);
        &mut self.data[self.layout.index(i, j, self.ld)]
    }

    /// Mutable view of the `rows × cols` block whose top-left corner is `(i, j)`.
    pub fn sub_mut(&mut self, i: usize, j: usize, rows: usize, cols: usize) -> MatMut<'_, T> {
        assert!(i + rows <= self.rows && j + cols <= self.cols);
        let data = if rows == 0 || cols == 0 {
            &mut self.data[..0]
        } else {
            &mut self.data[self.layout.index(i, j, self.ld)..]
        };
        MatMut {
            data,
            rows,
            cols,
            ld: self.ld,
            layout: self.layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn col_and_row_major_index_the_same_matrix() {
        // [[1, 2, 3],
        //  [4, 5, 6]]
        let col = [1, 4, 2, 5, 3, 6];
        let row = [1, 2, 3, 4, 5, 6];
        let a = MatRef::col_major(&col, 2, 3);
        let b = MatRef::row_major(&row, 2, 3);
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(a.at(i, j), b.at(i, j));
            }
        }
    }

    #[test]
    fn sub_view_keeps_leading_dimension() {
        // 4x4 column-major in a buffer with ld = 5
        let data: Vec<i32> = (0..20).collect();
        let m = MatRef::new(&data, 4, 4, 5, Layout::ColMajor);
        let s = m.sub(1, 2, 2, 2);
        assert_eq!(s.at(0, 0), 11);
        assert_eq!(s.at(1, 1), 17);
        assert_eq!(s.ld(), 5);
    }

    #[test]
    fn sub_mut_writes_through() {
        let mut data = vec![0; 9];
        let mut m = MatMut::row_major(&mut data, 3, 3);
        *m.sub_mut(1, 1, 2, 2).at_mut(1, 0) = 7;
        assert_eq!(data[7], 7);
    }

    #[test]
    fn check_operand_reports_the_failing_bound() {
        assert_eq!(
            check_operand(Operand::B, 100, 4, 4, 3, Layout::ColMajor),
            Err(GemmError::LeadingDimension {
                operand: Operand::B,
                ld: 3,
                min: 4
            })
        );
        assert_eq!(
            check_operand(Operand::C, 15, 4, 4, 4, Layout::ColMajor),
            Err(GemmError::BufferTooSmall {
                operand: Operand::C,
                len: 15,
                required: 16
            })
        );
        // last column only needs `rows` elements, not `ld`
        assert!(check_operand(Operand::A, 3 * 10 + 4, 4, 4, 10, Layout::ColMajor).is_ok());
        assert!(check_operand(Operand::A, 0, 0, 4, 0, Layout::ColMajor).is_ok());
    }

    #[test]
    fn required_len_reports_overflow() {
        let huge = usize::MAX / 2 + 1;
        assert_eq!(Layout::ColMajor.required_len(2, 3, huge), None);
        assert_eq!(Layout::RowMajor.required_len(3, 2, huge), None);
        assert_eq!(Layout::ColMajor.required_len(2, 1, huge), Some(2));
        assert_eq!(Layout::RowMajor.required_len(0, 5, huge), Some(0));

        assert_eq!(
            check_operand(Operand::C, 16, 2, 3, huge, Layout::ColMajor),
            Err(GemmError::AddressOverflow {
                operand: Operand::C,
                ld: huge
            })
        );
    }

    #[test]
    fn views_report_stride_and_layout() {
        let mut data = vec![0.0f32; 12];
        let m = MatMut::new(&mut data, 2, 3, 4, Layout::RowMajor);
        assert_eq!((m.rows(), m.cols(), m.ld(), m.layout()), (2, 3, 4, Layout::RowMajor));

        let r = MatRef::row_major(&data, 3, 4).sub(1, 1, 2, 2);
        assert_eq!((r.ld(), r.layout()), (4, Layout::RowMajor));
    }

    #[test]
    #[should_panic]
    fn new_rejects_overflowing_stride() {
        let mut data = [0.0f64; 16];
        let _ = MatMut::new(&mut data, 2, 3, usize::MAX / 2 + 1, Layout::ColMajor);
    }

    #[test]
    #[should_panic]
    fn new_rejects_short_buffer() {
        let data = [0.0f64; 5];
        let _ = MatRef::col_major(&data, 2, 3);
    }
}
