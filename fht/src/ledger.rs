use alloc::vec;
use alloc::vec::Vec;
use core::ops::Index;

use adrt_matrix::dense::RowMajorMatrix;
use adrt_matrix::strided::StridedMatrixViewMut;
use adrt_matrix::{Matrix, MatrixRowSlices};

/// Where each output slope ended up after an in-place transform.
///
/// Entry `t` is the physical row holding the line sums for slope `t`, so the canonical output is
/// `canonical[t] = physical[ledger[t]]`. The entries always form a permutation of `0..height`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Permutation {
    rows: Vec<usize>,
}

impl Permutation {
    #[must_use]
    pub fn identity(len: usize) -> Self {
        Self {
            rows: (0..len).collect(),
        }
    }

    /// All zeros: the ledger of `len` independent single-row subtrees before any merge.
    #[must_use]
    pub(crate) fn zeroed(len: usize) -> Self {
        Self {
            rows: vec![0; len],
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.rows
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [usize] {
        &mut self.rows
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<usize> {
        self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether every index in `0..len` appears exactly once.
    #[must_use]
    pub fn is_bijection(&self) -> bool {
        let mut seen = vec![false; self.rows.len()];
        for &r in &self.rows {
            match seen.get_mut(r) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    /// The slope held by each physical row.
    #[must_use]
    pub fn inverse(&self) -> Self {
        debug_assert!(self.is_bijection());
        let mut rows = vec![0; self.rows.len()];
        for (t, &r) in self.rows.iter().enumerate() {
            rows[r] = t;
        }
        Self { rows }
    }

    /// Gathers the rows of `physical` into canonical slope order.
    #[must_use]
    pub fn apply<T, M>(&self, physical: &M) -> RowMajorMatrix<T>
    where
        T: Copy,
        M: MatrixRowSlices<T>,
    {
        debug_assert_eq!(physical.height(), self.len());
        let values = self
            .rows
            .iter()
            .flat_map(|&r| physical.row_slice(r).iter().copied())
            .collect();
        RowMajorMatrix::new(values, physical.width())
    }

    /// Like [`Self::apply`], writing into an existing destination of the same shape.
    pub fn apply_to<T, M>(&self, dst: &mut StridedMatrixViewMut<'_, T>, physical: &M)
    where
        T: Copy,
        M: MatrixRowSlices<T>,
    {
        debug_assert_eq!(dst.dimensions(), physical.dimensions());
        debug_assert_eq!(physical.height(), self.len());
        for (t, &r) in self.rows.iter().enumerate() {
            dst.row_mut(t).copy_from_slice(physical.row_slice(r));
        }
    }
}

impl Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, t: usize) -> &usize {
        &self.rows[t]
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(ledger: Permutation) -> Self {
        ledger.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijection_check() {
        assert!(Permutation::identity(0).is_bijection());
        assert!(Permutation::identity(7).is_bijection());
        assert!(Permutation { rows: vec![0, 2, 1, 4, 3] }.is_bijection());
        assert!(!Permutation { rows: vec![0, 2, 2] }.is_bijection());
        assert!(!Permutation { rows: vec![0, 3, 1] }.is_bijection());
        assert!(!Permutation::zeroed(2).is_bijection());
        assert!(Permutation::zeroed(1).is_bijection());
    }

    #[test]
    fn inverse_composes_to_identity() {
        let p = Permutation {
            rows: vec![0, 2, 3, 1, 4],
        };
        let inv = p.inverse();
        assert_eq!(inv.as_slice(), &[0, 3, 1, 2, 4]);
        for t in 0..p.len() {
            assert_eq!(inv[p[t]], t);
        }
    }

    #[test]
    fn apply_gathers_rows() {
        let physical = RowMajorMatrix::from_rows(&[[10, 11], [20, 21], [30, 31]]);
        let p = Permutation {
            rows: vec![2, 0, 1],
        };
        let canonical = p.apply(&physical);
        assert_eq!(canonical.values, vec![30, 31, 10, 11, 20, 21]);

        let mut dst = RowMajorMatrix::with_default(3, 2);
        p.apply_to(&mut dst.as_view_mut(), &physical.as_view());
        assert_eq!(dst, canonical);
    }
}
