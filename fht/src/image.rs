use alloc::vec::Vec;

use adrt_matrix::dense::RowMajorMatrix;
use adrt_matrix::strided::{StridedMatrixView, StridedMatrixViewMut};
use adrt_matrix::{Matrix, MatrixRowSlices};
use tracing::instrument;

use crate::butterflies::add_with_shift;
use crate::degree::SlopeMapping;
use crate::traversal::{PlanCache, Task, Traversal, for_each_task_recursive};
use crate::{Scalar, Sign, SplitPolicy};

/// An out-of-place transform executor producing slopes in canonical order.
///
/// The source is copied into both the destination and a scratch image. Nodes at even depth then
/// read the scratch image and write the destination, nodes at odd depth do the reverse, so the
/// root leaves its result in the destination.
#[derive(Debug)]
pub struct ImageFht<T> {
    buffer: RowMajorMatrix<T>,
    plans: PlanCache,
}

impl<T: Scalar> ImageFht<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: RowMajorMatrix::new_row(Vec::new()),
            plans: PlanCache::default(),
        }
    }

    /// Writes the transform of `src` into `dst`, which must have the same shape.
    #[instrument(
        level = "debug",
        skip_all,
        fields(height = src.height(), width = src.width(), sign = ?sign, split = ?split)
    )]
    pub fn transform(
        &mut self,
        dst: &mut StridedMatrixViewMut<'_, T>,
        src: &StridedMatrixView<'_, T>,
        sign: Sign,
        split: SplitPolicy,
        traversal: Traversal,
    ) {
        let height = src.height();
        let width = src.width();
        debug_assert!(height > 0 && width > 0, "empty image");
        debug_assert_eq!(dst.dimensions(), src.dimensions());

        dst.copy_from(src);
        if self.buffer.width != width || self.buffer.values.len() != height * width {
            self.buffer = RowMajorMatrix::with_default(height, width);
        }
        self.buffer.as_view_mut().copy_from(src);

        let Self { buffer, plans } = self;
        let merge = |task: &Task, level: usize| {
            if level % 2 == 0 {
                merge_rows(dst, &buffer.as_view(), task, sign);
            } else {
                merge_rows(&mut buffer.as_view_mut(), &dst.as_view(), task, sign);
            }
        };

        match traversal {
            Traversal::Recursive => for_each_task_recursive(height, split, merge),
            Traversal::Iterative => plans.get_or_build(height, split).replay(merge),
        }
    }
}

impl<T: Scalar> Default for ImageFht<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes every output slope of `task` from the transformed halves held in `src`.
fn merge_rows<T: Scalar, M: MatrixRowSlices<T>>(
    dst: &mut StridedMatrixViewMut<'_, T>,
    src: &M,
    task: &Task,
    sign: Sign,
) {
    let width = src.width();
    let mapping = SlopeMapping::new(task.size, task.top_height());
    for t in 0..task.size {
        let t_top = mapping.top(t);
        let t_bottom = mapping.bottom(t);
        add_with_shift(
            dst.row_mut(task.start + t),
            src.row_slice(task.start + t_top),
            src.row_slice(task.mid + t_bottom),
            sign.apply(t - t_bottom, width),
        );
    }
}

/// Writes the transform of `src` into `dst` with a one-shot executor.
pub fn fht2_to_image<T: Scalar>(
    dst: &mut StridedMatrixViewMut<'_, T>,
    src: &StridedMatrixView<'_, T>,
    sign: Sign,
    split: SplitPolicy,
    traversal: Traversal,
) {
    ImageFht::new().transform(dst, src, sign, split, traversal);
}
