use alloc::vec::Vec;

use rand::Rng;
use rand::distr::{Distribution, StandardUniform};

use crate::strided::{StridedMatrixView, StridedMatrixViewMut};
use crate::{Matrix, MatrixRowSlices};

/// A dense matrix stored in row-major form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowMajorMatrix<T> {
    /// All values, stored in row-major order.
    pub values: Vec<T>,
    pub width: usize,
}

impl<T> RowMajorMatrix<T> {
    #[must_use]
    pub fn new(values: Vec<T>, width: usize) -> Self {
        debug_assert!(width > 0);
        debug_assert_eq!(values.len() % width, 0);
        Self { values, width }
    }

    #[must_use]
    pub fn new_row(values: Vec<T>) -> Self {
        let width = values.len();
        Self { values, width }
    }

    /// A `rows x cols` matrix filled with `T::default()`.
    #[must_use]
    pub fn with_default(rows: usize, cols: usize) -> Self
    where
        T: Default + Clone,
    {
        Self::new(alloc::vec![T::default(); rows * cols], cols)
    }

    /// Builds a matrix from nested rows. All rows must have the same length.
    #[must_use]
    pub fn from_rows<const W: usize>(rows: &[[T; W]]) -> Self
    where
        T: Clone,
    {
        Self::new(rows.iter().flat_map(|row| row.iter().cloned()).collect(), W)
    }

    pub fn row_mut(&mut self, r: usize) -> &mut [T] {
        debug_assert!(r < self.height());
        &mut self.values[r * self.width..(r + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.values.chunks_exact(self.width)
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [T]> {
        self.values.chunks_exact_mut(self.width)
    }

    #[must_use]
    pub fn as_view(&self) -> StridedMatrixView<'_, T> {
        StridedMatrixView::new(&self.values, self.height(), self.width, self.width)
    }

    pub fn as_view_mut(&mut self) -> StridedMatrixViewMut<'_, T> {
        let height = self.height();
        StridedMatrixViewMut::new(&mut self.values, height, self.width, self.width)
    }

    /// Reverses the order of the columns of every row.
    pub fn reverse_columns(&mut self) {
        self.rows_mut().for_each(<[T]>::reverse);
    }

    pub fn rand<R: Rng>(rng: &mut R, rows: usize, cols: usize) -> Self
    where
        StandardUniform: Distribution<T>,
    {
        let values = rng.sample_iter(StandardUniform).take(rows * cols).collect();
        Self::new(values, cols)
    }
}

impl<T> Matrix<T> for RowMajorMatrix<T> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.values.len() / self.width
    }
}

impl<T> MatrixRowSlices<T> for RowMajorMatrix<T> {
    fn row_slice(&self, r: usize) -> &[T] {
        debug_assert!(r < self.height());
        &self.values[r * self.width..(r + 1) * self.width]
    }
}
