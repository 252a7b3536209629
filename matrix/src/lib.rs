//! Matrix library.

#![no_std]

extern crate alloc;

use core::fmt;

pub mod dense;
pub mod strided;

/// The shape of a matrix.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

pub trait Matrix<T> {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width(),
            height: self.height(),
        }
    }
}

/// A `Matrix` whose rows can be accessed as contiguous slices.
pub trait MatrixRowSlices<T>: Matrix<T> {
    fn row_slice(&self, r: usize) -> &[T];
}
