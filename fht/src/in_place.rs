use alloc::vec::Vec;

use adrt_matrix::Matrix;
use adrt_matrix::strided::StridedMatrixViewMut;
use tracing::instrument;

use crate::degree::DegreeScheduler;
use crate::ids::combine_balanced;
use crate::idt::combine_power_of_two;
use crate::ledger::Permutation;
use crate::traversal::{PlanCache, Task, Traversal, for_each_task_recursive};
use crate::{Scalar, Sign, SplitPolicy};

/// An in-place transform executor.
///
/// Rows are summed where they lie and never moved; the returned [`Permutation`] says which physical
/// row ended up holding which slope. Scratch space and task plans are kept between calls, so
/// repeated transforms of images with the same height allocate nothing.
#[derive(Debug, Default)]
pub struct InPlaceFht<T> {
    swaps_buffer: Vec<usize>,
    line_buffer: Vec<T>,
    scheduler: DegreeScheduler,
    plans: PlanCache,
}

impl<T: Scalar> InPlaceFht<T> {
    /// An executor with its line buffer sized for rows of `width` samples.
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            line_buffer: alloc::vec![T::default(); width],
            ..Default::default()
        }
    }

    /// Transforms `image` in place and returns the slope ledger.
    #[instrument(
        level = "debug",
        skip_all,
        fields(height = image.height(), width = image.width(), sign = ?sign, split = ?split)
    )]
    pub fn transform(
        &mut self,
        image: &mut StridedMatrixViewMut<'_, T>,
        sign: Sign,
        split: SplitPolicy,
        traversal: Traversal,
    ) -> Permutation {
        let height = image.height();
        let width = image.width();
        debug_assert!(height > 0 && width > 0, "empty image");

        self.line_buffer.resize(width, T::default());
        self.swaps_buffer.resize(height, 0);
        let mut ledger = Permutation::zeroed(height);

        let Self {
            swaps_buffer,
            line_buffer,
            scheduler,
            plans,
        } = self;
        let combine = |task: &Task, _level: usize| {
            combine_node(
                image,
                task,
                sign,
                split,
                ledger.as_mut_slice(),
                swaps_buffer,
                line_buffer,
                scheduler,
            );
        };

        match traversal {
            Traversal::Recursive => for_each_task_recursive(height, split, combine),
            Traversal::Iterative => plans.get_or_build(height, split).replay(combine),
        }
        ledger
    }

    /// Number of cached task plans.
    #[must_use]
    pub fn cached_plans(&self) -> usize {
        self.plans.len()
    }
}

/// Merges the halves of `task` and rewrites its slice of the ledger.
#[allow(clippy::too_many_arguments)]
fn combine_node<T: Scalar>(
    image: &mut StridedMatrixViewMut<'_, T>,
    task: &Task,
    sign: Sign,
    split: SplitPolicy,
    ledger: &mut [usize],
    swaps_buffer: &mut [usize],
    line_buffer: &mut [T],
    scheduler: &mut DegreeScheduler,
) {
    let Task {
        start, stop, mid, ..
    } = *task;
    let top_height = mid - start;

    let saved = &mut swaps_buffer[start..stop];
    saved.copy_from_slice(&ledger[start..stop]);
    let (top_ledger, bottom_ledger) = saved.split_at(top_height);
    let ledger = &mut ledger[start..stop];

    let (mut top, mut bottom) = image
        .slice_rows_mut(start..stop)
        .split_rows_mut(top_height);
    match split {
        SplitPolicy::Balanced => combine_balanced(
            &mut top,
            &mut bottom,
            sign,
            ledger,
            top_ledger,
            bottom_ledger,
            line_buffer,
        ),
        SplitPolicy::PowerOfTwo => combine_power_of_two(
            &mut top,
            &mut bottom,
            sign,
            ledger,
            top_ledger,
            bottom_ledger,
            line_buffer,
            scheduler,
        ),
    }
}

/// Transforms `image` in place with a one-shot executor.
pub fn fht2_in_place<T: Scalar>(
    image: &mut StridedMatrixViewMut<'_, T>,
    sign: Sign,
    split: SplitPolicy,
    traversal: Traversal,
) -> Permutation {
    InPlaceFht::new(image.width()).transform(image, sign, split, traversal)
}
