use core::ops::Range;

use alloc::vec::Vec;

use crate::dense::RowMajorMatrix;
use crate::{Matrix, MatrixRowSlices};

/// Number of elements spanned by `height` rows of `width` values placed `stride` apart.
#[inline]
const fn span(height: usize, width: usize, stride: usize) -> usize {
    if height == 0 {
        0
    } else {
        (height - 1) * stride + width
    }
}

#[inline]
const fn is_valid_geometry(len: usize, height: usize, width: usize, stride: usize) -> bool {
    width <= stride && span(height, width, stride) <= len
}

/// A borrowed, non-owning view of `height` rows of `width` values, with consecutive rows
/// starting `stride` elements apart.
///
/// Slicing and splitting re-borrow the underlying buffer and never copy.
#[derive(Copy, Clone, Debug)]
pub struct StridedMatrixView<'a, T> {
    values: &'a [T],
    height: usize,
    width: usize,
    stride: usize,
}

impl<'a, T> StridedMatrixView<'a, T> {
    #[must_use]
    pub fn new(values: &'a [T], height: usize, width: usize, stride: usize) -> Self {
        debug_assert!(
            is_valid_geometry(values.len(), height, width, stride),
            "invalid geometry: len = {}, height = {height}, width = {width}, stride = {stride}",
            values.len()
        );
        Self {
            values,
            height,
            width,
            stride,
        }
    }

    /// Like `new`, but returns `None` when the geometry does not fit `values`.
    #[must_use]
    pub fn try_new(values: &'a [T], height: usize, width: usize, stride: usize) -> Option<Self> {
        is_valid_geometry(values.len(), height, width, stride)
            .then(|| Self::new(values, height, width, stride))
    }

    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    #[must_use]
    pub fn row(&self, r: usize) -> &'a [T] {
        debug_assert!(r < self.height);
        let values: &'a [T] = self.values;
        let start = r * self.stride;
        &values[start..start + self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        (0..self.height).map(move |r| self.row(r))
    }

    /// The rows `range.start..range.end` as a new view.
    #[must_use]
    pub fn slice_rows(&self, range: Range<usize>) -> Self {
        debug_assert!(range.start <= range.end && range.end <= self.height);
        let height = range.end - range.start;
        let start = (range.start * self.stride).min(self.values.len());
        let end = start + span(height, self.width, self.stride);
        let values: &'a [T] = self.values;
        Self::new(&values[start..end], height, self.width, self.stride)
    }

    #[must_use]
    pub fn to_row_major_matrix(&self) -> RowMajorMatrix<T>
    where
        T: Clone,
    {
        let values: Vec<T> = self.rows().flat_map(|row| row.iter().cloned()).collect();
        RowMajorMatrix::new(values, self.width)
    }
}

impl<T> Matrix<T> for StridedMatrixView<'_, T> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }
}

impl<T> MatrixRowSlices<T> for StridedMatrixView<'_, T> {
    fn row_slice(&self, r: usize) -> &[T] {
        self.row(r)
    }
}

/// The mutable counterpart of [`StridedMatrixView`].
#[derive(Debug)]
pub struct StridedMatrixViewMut<'a, T> {
    values: &'a mut [T],
    height: usize,
    width: usize,
    stride: usize,
}

impl<'a, T> StridedMatrixViewMut<'a, T> {
    #[must_use]
    pub fn new(values: &'a mut [T], height: usize, width: usize, stride: usize) -> Self {
        debug_assert!(
            is_valid_geometry(values.len(), height, width, stride),
            "invalid geometry: len = {}, height = {height}, width = {width}, stride = {stride}",
            values.len()
        );
        Self {
            values,
            height,
            width,
            stride,
        }
    }

    /// Like `new`, but returns `None` when the geometry does not fit `values`.
    #[must_use]
    pub fn try_new(
        values: &'a mut [T],
        height: usize,
        width: usize,
        stride: usize,
    ) -> Option<Self> {
        if is_valid_geometry(values.len(), height, width, stride) {
            Some(Self::new(values, height, width, stride))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    #[must_use]
    pub fn row(&self, r: usize) -> &[T] {
        debug_assert!(r < self.height);
        let start = r * self.stride;
        &self.values[start..start + self.width]
    }

    pub fn row_mut(&mut self, r: usize) -> &mut [T] {
        debug_assert!(r < self.height);
        let start = r * self.stride;
        &mut self.values[start..start + self.width]
    }

    #[must_use]
    pub fn as_view(&self) -> StridedMatrixView<'_, T> {
        StridedMatrixView::new(&*self.values, self.height, self.width, self.stride)
    }

    /// The rows `range.start..range.end` as a new mutable view.
    pub fn slice_rows_mut(&mut self, range: Range<usize>) -> StridedMatrixViewMut<'_, T> {
        debug_assert!(range.start <= range.end && range.end <= self.height);
        let height = range.end - range.start;
        let start = (range.start * self.stride).min(self.values.len());
        let end = start + span(height, self.width, self.stride);
        StridedMatrixViewMut::new(&mut self.values[start..end], height, self.width, self.stride)
    }

    /// Splits into the rows `[0, mid)` and `[mid, height)`, both mutable.
    pub fn split_rows_mut(self, mid: usize) -> (Self, Self) {
        debug_assert!(mid <= self.height);
        let Self {
            values,
            height,
            width,
            stride,
        } = self;
        let at = (mid * stride).min(values.len());
        let (upper_values, lower_values) = values.split_at_mut(at);
        let upper = Self::new(upper_values, mid, width, stride);
        let lower = Self::new(lower_values, height - mid, width, stride);
        (upper, lower)
    }

    /// Copies `src` row by row into `self`. Shapes must match.
    pub fn copy_from(&mut self, src: &StridedMatrixView<'_, T>)
    where
        T: Copy,
    {
        debug_assert_eq!(self.dimensions(), src.dimensions());
        for r in 0..self.height {
            self.row_mut(r).copy_from_slice(src.row(r));
        }
    }

    #[must_use]
    pub fn to_row_major_matrix(&self) -> RowMajorMatrix<T>
    where
        T: Clone,
    {
        self.as_view().to_row_major_matrix()
    }
}

impl<T> Matrix<T> for StridedMatrixViewMut<'_, T> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }
}

impl<T> MatrixRowSlices<T> for StridedMatrixViewMut<'_, T> {
    fn row_slice(&self, r: usize) -> &[T] {
        self.row(r)
    }
}
