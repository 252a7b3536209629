//! Line-level arithmetic: elementwise sums, cyclic rotations and the two-line butterfly.
//!
//! All rotations are to the right: rotating `src` by `r` places `src[width - r..]` first.

use itertools::izip;

use crate::{Scalar, Sign};

/// `dst[i] = lhs[i] + rhs[i]`.
#[inline]
pub fn add<T: Scalar>(dst: &mut [T], lhs: &[T], rhs: &[T]) {
    debug_assert_eq!(dst.len(), lhs.len());
    debug_assert_eq!(dst.len(), rhs.len());
    for (d, &a, &b) in izip!(dst, lhs, rhs) {
        *d = a.add(b);
    }
}

/// `acc[i] = acc[i] + rhs[i]`.
#[inline]
pub fn add_assign<T: Scalar>(acc: &mut [T], rhs: &[T]) {
    debug_assert_eq!(acc.len(), rhs.len());
    for (a, &b) in acc.iter_mut().zip(rhs) {
        *a = a.add(b);
    }
}

/// Writes `src` cyclically rotated right by `rotation` into `dst`.
///
/// Requires `rotation < width`. `dst` and `src` must not overlap, which the borrow rules
/// already guarantee.
#[inline]
pub fn rotate<T: Scalar>(dst: &mut [T], src: &[T], rotation: usize) {
    let width = src.len();
    debug_assert_eq!(dst.len(), width);
    debug_assert!(rotation < width || (width == 0 && rotation == 0));
    let split = width - rotation;
    dst[..rotation].copy_from_slice(&src[split..]);
    dst[rotation..].copy_from_slice(&src[..split]);
}

/// `dst = lhs + (rhs rotated right by shift)`, without materializing the rotation.
///
/// Requires `shift <= width`.
#[inline]
pub fn add_with_shift<T: Scalar>(dst: &mut [T], lhs: &[T], rhs: &[T], shift: usize) {
    let width = dst.len();
    debug_assert!(shift <= width);
    let split = width - shift;
    let (dst_head, dst_tail) = dst.split_at_mut(shift);
    let (lhs_head, lhs_tail) = lhs.split_at(shift);
    add(dst_head, lhs_head, &rhs[split..]);
    add(dst_tail, lhs_tail, &rhs[..split]);
}

/// `acc = acc + (rhs rotated right by shift)`.
#[inline]
pub fn add_assign_with_shift<T: Scalar>(acc: &mut [T], rhs: &[T], shift: usize) {
    let width = acc.len();
    debug_assert!(shift <= width);
    let split = width - shift;
    let (acc_head, acc_tail) = acc.split_at_mut(shift);
    add_assign(acc_head, &rhs[split..]);
    add_assign(acc_tail, &rhs[..split]);
}

/// The two-line butterfly.
///
/// With `b` the bottom line rotated by `shift`, the bottom line becomes `top + b` and the top line
/// becomes `top + b` rotated one step back (`Positive`) or forward (`Negative`), i.e. the sum for
/// the neighbouring slope. `buffer` is scratch of the line's width.
#[inline]
pub fn combine_pair<T: Scalar>(
    top: &mut [T],
    bottom: &mut [T],
    buffer: &mut [T],
    sign: Sign,
    shift: usize,
) {
    let width = top.len();
    debug_assert!(width > 0);
    rotate(buffer, bottom, shift);
    add(bottom, top, buffer);

    match sign {
        Sign::Positive => {
            add_assign(&mut top[..width - 1], &buffer[1..]);
            top[width - 1] = top[width - 1].add(buffer[0]);
        }
        Sign::Negative => {
            top[0] = top[0].add(buffer[width - 1]);
            add_assign(&mut top[1..], &buffer[..width - 1]);
        }
    }
}

/// Single-line update keeping the result in the top line: `top += bottom rotated by shift`.
#[inline]
pub fn combine_into_top<T: Scalar>(top: &mut [T], bottom: &[T], shift: usize) {
    add_assign_with_shift(top, bottom, shift);
}

/// Single-line update keeping the result in the bottom line: `bottom = top + bottom rotated by
/// shift`. The top line is left untouched for later reuse.
#[inline]
pub fn combine_into_bottom<T: Scalar>(top: &[T], bottom: &mut [T], buffer: &mut [T], shift: usize) {
    rotate(buffer, bottom, shift);
    add(bottom, top, buffer);
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    fn rotated<T: Scalar>(src: &[T], shift: usize) -> Vec<T> {
        let w = src.len();
        (0..w).map(|i| src[(i + w - shift) % w]).collect()
    }

    #[test]
    fn rotate_moves_the_tail_to_the_front() {
        let src = [0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut dst = [-1.0f32; 7];
        rotate(&mut dst[1..6], &src[1..6], 2);
        assert_eq!(dst, [-1.0, 4.0, 5.0, 1.0, 2.0, 3.0, -1.0]);
    }

    #[test]
    fn rotate_by_zero_copies() {
        let src = [3u32, 1, 4];
        let mut dst = [0u32; 3];
        rotate(&mut dst, &src, 0);
        assert_eq!(dst, src);
    }

    #[test]
    fn add_with_shift_matches_explicit_rotation() {
        let lhs: Vec<i64> = (0..9).map(|x| x * 10).collect();
        let rhs: Vec<i64> = (0..9).collect();
        for shift in 0..=9 {
            let mut dst = vec![0i64; 9];
            add_with_shift(&mut dst, &lhs, &rhs, shift);
            let expected: Vec<i64> = lhs
                .iter()
                .zip(rotated(&rhs, shift % 9))
                .map(|(a, b)| a + b)
                .collect();
            assert_eq!(dst, expected, "shift = {shift}");

            let mut acc = lhs.clone();
            add_assign_with_shift(&mut acc, &rhs, shift);
            assert_eq!(acc, expected, "shift = {shift}");
        }
    }

    #[test]
    fn combine_pair_2x2() {
        let mut top = [1.0f32, 3.0];
        let mut bottom = [5.0f32, 40.0];
        let mut buffer = [-1.0f32; 2];
        combine_pair(&mut top, &mut bottom, &mut buffer, Sign::Positive, 1);
        assert_eq!(top, [6.0, 43.0]);
        assert_eq!(bottom, [41.0, 8.0]);
    }

    #[test]
    fn combine_pair_2x4_positive() {
        let mut top = [1.0f32, 3.0, 2.0, 4.0];
        let mut bottom = [5.0f32, 0.0, 1.0, 7.0];
        let mut buffer = [-1.0f32; 4];
        combine_pair(&mut top, &mut bottom, &mut buffer, Sign::Positive, 1);
        assert_eq!(top, [6.0, 3.0, 3.0, 11.0]);
        assert_eq!(bottom, [8.0, 8.0, 2.0, 5.0]);
    }

    #[test]
    fn combine_pair_yields_adjacent_slopes() {
        let top0: Vec<u64> = vec![2, 7, 1, 8, 2, 8];
        let bottom0: Vec<u64> = vec![3, 1, 4, 1, 5, 9];
        let w = top0.len();
        for sign in [Sign::Positive, Sign::Negative] {
            for nominal in 1..=w {
                let (mut top, mut bottom) = (top0.clone(), bottom0.clone());
                let mut buffer = vec![0u64; w];
                combine_pair(&mut top, &mut bottom, &mut buffer, sign, sign.apply(nominal, w));

                let sum = |shift: usize| -> Vec<u64> {
                    let r = rotated(&bottom0, sign.apply(shift, w));
                    top0.iter().zip(r).map(|(a, b)| a + b).collect()
                };
                assert_eq!(bottom, sum(nominal), "{sign:?} nominal = {nominal}");
                assert_eq!(top, sum(nominal - 1), "{sign:?} nominal = {nominal}");
            }
        }
    }

    #[test]
    fn single_line_updates() {
        let top0 = [1i32, 2, 3, 4];
        let bottom0 = [10i32, 20, 30, 40];

        let mut top = top0;
        combine_into_top(&mut top, &bottom0, 1);
        assert_eq!(top, [41, 12, 23, 34]);

        let mut bottom = bottom0;
        let mut buffer = [0i32; 4];
        combine_into_bottom(&top0, &mut bottom, &mut buffer, 3);
        assert_eq!(bottom, [21, 32, 43, 14]);
    }
}
