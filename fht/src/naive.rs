use alloc::vec;
use alloc::vec::Vec;

use adrt_matrix::dense::RowMajorMatrix;
use adrt_matrix::MatrixRowSlices;

use crate::degree::SlopeMapping;
use crate::{Scalar, Sign, SplitPolicy};

/// The digital lines summed by the fast transforms.
///
/// Entry `[t][i]` is the column offset, before applying the sign, at which the line for slope `t`
/// crosses row `i`. The lines of a node are built from the lines of its halves the same way the
/// composer builds its rows.
#[must_use]
pub fn dyadic_patterns(height: usize, split: SplitPolicy) -> Vec<Vec<usize>> {
    match height {
        0 => Vec::new(),
        1 => vec![vec![0]],
        _ => {
            let top_height = split.top_height(height);
            let top = dyadic_patterns(top_height, split);
            let bottom = dyadic_patterns(height - top_height, split);
            let mapping = SlopeMapping::new(height, top_height);
            (0..height)
                .map(|t| {
                    let t_top = mapping.top(t);
                    let t_bottom = mapping.bottom(t);
                    let offset = t - t_bottom;
                    top[t_top]
                        .iter()
                        .copied()
                        .chain(bottom[t_bottom].iter().map(|&p| p + offset))
                        .collect()
                })
                .collect()
        }
    }
}

/// Brute-force line sums over [`dyadic_patterns`].
///
/// `O(h^2 w)` work; only meant as a reference for testing.
#[derive(Default, Clone, Debug)]
pub struct NaiveFht;

impl NaiveFht {
    #[must_use]
    pub fn transform<T: Scalar, M: MatrixRowSlices<T>>(
        &self,
        src: &M,
        sign: Sign,
        split: SplitPolicy,
    ) -> RowMajorMatrix<T> {
        let height = src.height();
        let width = src.width();
        let mut out: RowMajorMatrix<T> = RowMajorMatrix::with_default(height, width);
        for (pattern, row) in dyadic_patterns(height, split).iter().zip(out.rows_mut()) {
            for (i, &offset) in pattern.iter().enumerate() {
                let shift = sign.apply(offset, width);
                let line = src.row_slice(i);
                for (x, acc) in row.iter_mut().enumerate() {
                    *acc = acc.add(line[(x + width - shift) % width]);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_start_flat_and_end_diagonal() {
        for split in [SplitPolicy::Balanced, SplitPolicy::PowerOfTwo] {
            for height in 1..40 {
                let patterns = dyadic_patterns(height, split);
                assert_eq!(patterns.len(), height);
                assert!(patterns[0].iter().all(|&p| p == 0));
                let last: Vec<usize> = (0..height).collect();
                assert_eq!(patterns[height - 1], last, "{split:?} height = {height}");
                for pattern in &patterns {
                    assert_eq!(pattern.len(), height);
                    assert_eq!(pattern[0], 0);
                    assert!(pattern.windows(2).all(|w| w[1] == w[0] || w[1] == w[0] + 1));
                }
            }
        }
    }

    #[test]
    fn each_line_ends_at_its_slope() {
        for split in [SplitPolicy::Balanced, SplitPolicy::PowerOfTwo] {
            let patterns = dyadic_patterns(23, split);
            for (t, pattern) in patterns.iter().enumerate() {
                assert_eq!(pattern[22], t);
            }
        }
    }

    #[test]
    fn naive_five_by_five() {
        let src = RowMajorMatrix::from_rows(&[
            [8u32, 2, 6, 16, 20],
            [13, 9, 1, 24, 7],
            [23, 3, 4, 11, 18],
            [15, 25, 5, 22, 21],
            [12, 19, 10, 17, 14],
        ]);
        let out = NaiveFht.transform(&src, Sign::Positive, SplitPolicy::PowerOfTwo);
        assert_eq!(out.row_slice(0), &[71, 58, 26, 90, 80]);
        assert_eq!(out.row_slice(2), &[72, 73, 45, 65, 70]);
        assert_eq!(out.row_slice(4), &[50, 65, 76, 49, 85]);
    }
}
