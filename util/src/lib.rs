//! Various simple utilities.

#![no_std]

/// Computes `ceil(log_2(n))`.
#[must_use]
pub const fn log2_ceil_usize(n: usize) -> usize {
    (usize::BITS - n.saturating_sub(1).leading_zeros()) as usize
}

/// Rounds a non-negative `x` to the nearest integer, with ties going up.
///
/// The row index mappings of the combiners depend on `k + 0.5` mapping to `k + 1`.
#[must_use]
#[inline]
pub fn round05(x: f64) -> usize {
    debug_assert!(x >= 0.0, "round05 expects a non-negative input, got {x}");
    // Truncation of a non-negative value is `floor`.
    (x + 0.5) as usize
}

/// Height of the top half when a range of `n` rows is split at a power of two.
///
/// Returns `n / 2` when `n` is itself a power of two, otherwise the largest power of two below `n`.
/// Both halves are non-empty for every `n >= 2`.
#[must_use]
#[inline]
pub const fn div_by_pow2(n: usize) -> usize {
    debug_assert!(n >= 2);
    if n.is_power_of_two() {
        n >> 1
    } else {
        1 << (usize::BITS - 1 - n.leading_zeros())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn test_log2_ceil_usize() {
        assert_eq!(log2_ceil_usize(0), 0);
        assert_eq!(log2_ceil_usize(1), 0);
        assert_eq!(log2_ceil_usize(2), 1);
        assert_eq!(log2_ceil_usize(3), 2);
        assert_eq!(log2_ceil_usize(4), 2);
        assert_eq!(log2_ceil_usize(5), 3);
        assert_eq!(log2_ceil_usize(1 << 31), 31);
    }

    #[test]
    fn round05_ties_go_up() {
        assert_eq!(round05(0.0), 0);
        assert_eq!(round05(0.49), 0);
        assert_eq!(round05(0.5), 1);
        assert_eq!(round05(1.5), 2);
        assert_eq!(round05(2.5), 3);
        assert_eq!(round05(2.51), 3);
        assert_eq!(round05(16_777_215.0), 16_777_215);
    }

    #[test]
    fn round05_matches_floor_of_shifted_value() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..1000 {
            let x: f64 = rng.random_range(0.0..1.0e6);
            let floor = x as usize;
            let expected = if x - floor as f64 >= 0.5 { floor + 1 } else { floor };
            assert_eq!(round05(x), expected, "x = {x}");
        }
    }

    #[test]
    fn test_div_by_pow2() {
        assert_eq!(div_by_pow2(2), 1);
        assert_eq!(div_by_pow2(3), 2);
        assert_eq!(div_by_pow2(4), 2);
        assert_eq!(div_by_pow2(5), 4);
        assert_eq!(div_by_pow2(7), 4);
        assert_eq!(div_by_pow2(8), 4);
        assert_eq!(div_by_pow2(9), 8);
        assert_eq!(div_by_pow2(1000), 512);
        assert_eq!(div_by_pow2(1024), 512);
    }

    #[test]
    fn div_by_pow2_leaves_both_halves_non_empty() {
        for n in 2..2000 {
            let top = div_by_pow2(n);
            assert!(top.is_power_of_two());
            assert!(top >= 1 && top < n, "n = {n}, top = {top}");
        }
    }
}
