//! Utilities for testing the dyadic transforms.

#![no_std]

extern crate alloc;

mod transform_testing;

use adrt_fht::Scalar;
use adrt_matrix::dense::RowMajorMatrix;
use rand::Rng;
#[doc(hidden)]
pub use paste;
pub use transform_testing::*;

/// A `height x width` image of small non-negative samples.
///
/// Samples stay below 1000 so that every line sum of a few hundred rows is exact, even in `f32`.
pub fn random_image<T: Scalar, R: Rng>(
    rng: &mut R,
    height: usize,
    width: usize,
) -> RowMajorMatrix<T> {
    let values = (0..height * width)
        .map(|_| T::from_u16(rng.random_range(0..1000)))
        .collect();
    RowMajorMatrix::new(values, width)
}
