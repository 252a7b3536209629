//! Node combiner for the power-of-two split.

use adrt_matrix::Matrix;
use adrt_matrix::strided::StridedMatrixViewMut;

use crate::butterflies::{combine_into_bottom, combine_into_top, combine_pair};
use crate::degree::{DegreeScheduler, Step};
use crate::{Scalar, Sign};

/// Merges two transformed halves of a node in place, following the order chosen by `scheduler`.
///
/// The ledgers have the same meaning as for [`crate::ids::combine_balanced`].
#[allow(clippy::too_many_arguments)]
pub fn combine_power_of_two<T: Scalar>(
    top: &mut StridedMatrixViewMut<'_, T>,
    bottom: &mut StridedMatrixViewMut<'_, T>,
    sign: Sign,
    ledger: &mut [usize],
    top_ledger: &[usize],
    bottom_ledger: &[usize],
    line_buffer: &mut [T],
    scheduler: &mut DegreeScheduler,
) {
    let top_height = top.height();
    let height = top_height + bottom.height();
    let width = top.width();
    debug_assert_eq!(ledger.len(), height);
    debug_assert_eq!(top_ledger.len(), top_height);
    debug_assert_eq!(bottom_ledger.len(), bottom.height());
    debug_assert_eq!(line_buffer.len(), width);

    scheduler.schedule(height, top_height, |step| match step {
        Step::SaveTop { t, top: t_top, bottom: t_bottom } => {
            let k_top = top_ledger[t_top];
            let k_bottom = bottom_ledger[t_bottom];
            let shift = sign.apply(t - t_bottom, width);
            combine_into_top(top.row_mut(k_top), bottom.row(k_bottom), shift);
            ledger[t] = k_top;
        }
        Step::KeepBottom { t, top: t_top, bottom: t_bottom } => {
            let k_top = top_ledger[t_top];
            let k_bottom = bottom_ledger[t_bottom];
            let shift = sign.apply(t - t_bottom, width);
            combine_into_bottom(top.row(k_top), bottom.row_mut(k_bottom), line_buffer, shift);
            ledger[t] = top_height + k_bottom;
        }
        Step::Pair { t, top: t_top, bottom: t_bottom } => {
            let k_top = top_ledger[t_top];
            let k_bottom = bottom_ledger[t_bottom];
            let shift = sign.apply(t - t_bottom + 1, width);
            combine_pair(
                top.row_mut(k_top),
                bottom.row_mut(k_bottom),
                line_buffer,
                sign,
                shift,
            );
            ledger[t] = k_top;
            ledger[t + 1] = top_height + k_bottom;
        }
    });
}
