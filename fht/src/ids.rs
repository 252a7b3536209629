//! Node combiner for the balanced split (`h_T = floor(h / 2)`).

use adrt_matrix::Matrix;
use adrt_matrix::strided::StridedMatrixViewMut;

use crate::butterflies::{combine_into_bottom, combine_into_top, combine_pair};
use crate::{Scalar, Sign};

/// Merges two transformed halves of a node in place.
///
/// `top_ledger` and `bottom_ledger` locate each slope of the halves among their own rows; on return
/// `ledger[t]` is the node-local row holding slope `t`, with bottom rows offset by `h_T`.
///
/// For even heights every output pair `(2i, 2i + 1)` comes from one butterfly over slope `i` of
/// both halves. For odd heights the trailing slopes are produced one at a time, each overwriting
/// the half whose slope is no longer needed, before the leading slopes are paired up.
pub fn combine_balanced<T: Scalar>(
    top: &mut StridedMatrixViewMut<'_, T>,
    bottom: &mut StridedMatrixViewMut<'_, T>,
    sign: Sign,
    ledger: &mut [usize],
    top_ledger: &[usize],
    bottom_ledger: &[usize],
    line_buffer: &mut [T],
) {
    let top_height = top.height();
    let height = top_height + bottom.height();
    let width = top.width();
    debug_assert_eq!(top_height, height / 2);
    debug_assert_eq!(ledger.len(), height);
    debug_assert_eq!(top_ledger.len(), top_height);
    debug_assert_eq!(bottom_ledger.len(), bottom.height());
    debug_assert_eq!(line_buffer.len(), width);

    let paired = if height % 2 == 0 {
        height
    } else {
        // The paired head covers `2 * round(h / 4)` slopes.
        let paired = 2 * ((height + 2) / 4);
        let mut t_top = height / 2 - 1;
        let mut t_bottom = height - height / 2 - 1;
        for t in (paired..height).rev() {
            let k_top = top_ledger[t_top];
            let k_bottom = bottom_ledger[t_bottom];
            let shift = sign.apply(t - t_bottom, width);
            if t % 2 == 0 {
                combine_into_bottom(top.row(k_top), bottom.row_mut(k_bottom), line_buffer, shift);
                ledger[t] = top_height + k_bottom;
                t_bottom -= 1;
            } else {
                combine_into_top(top.row_mut(k_top), bottom.row(k_bottom), shift);
                ledger[t] = k_top;
                t_top -= 1;
            }
        }
        paired
    };

    for t in (0..paired).step_by(2) {
        let i = t / 2;
        let k_top = top_ledger[i];
        let k_bottom = bottom_ledger[i];
        combine_pair(
            top.row_mut(k_top),
            bottom.row_mut(k_bottom),
            line_buffer,
            sign,
            sign.apply(i + 1, width),
        );
        ledger[t] = k_top;
        ledger[t + 1] = top_height + k_bottom;
    }
}
