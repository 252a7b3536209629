use crate::error::FhtError;

/// Direction of the slope family being summed.
///
/// With `Positive`, output `t` shifts lower rows towards higher column indices; `Negative`
/// reflects every shift (`width - shift`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// The cyclic shift to apply for a nominal shift of `value` in a row of `width` samples.
    ///
    /// The result is always in `[0, width)`.
    #[inline]
    #[must_use]
    pub fn apply(self, value: usize, width: usize) -> usize {
        debug_assert!(width > 0);
        let value = value % width;
        match self {
            Self::Negative if value != 0 => width - value,
            _ => value,
        }
    }
}

impl TryFrom<i32> for Sign {
    type Error = FhtError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Positive),
            -1 => Ok(Self::Negative),
            other => Err(FhtError::InvalidSign(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_keeps_the_shift() {
        assert_eq!(Sign::Positive.apply(0, 4), 0);
        assert_eq!(Sign::Positive.apply(3, 4), 3);
        assert_eq!(Sign::Positive.apply(4, 4), 0);
        assert_eq!(Sign::Positive.apply(6, 4), 2);
    }

    #[test]
    fn negative_reflects_the_shift() {
        assert_eq!(Sign::Negative.apply(0, 4), 0);
        assert_eq!(Sign::Negative.apply(1, 4), 3);
        assert_eq!(Sign::Negative.apply(3, 4), 1);
        assert_eq!(Sign::Negative.apply(4, 4), 0);
        assert_eq!(Sign::Negative.apply(5, 4), 3);
    }

    #[test]
    fn single_column_never_shifts() {
        for value in 0..5 {
            assert_eq!(Sign::Positive.apply(value, 1), 0);
            assert_eq!(Sign::Negative.apply(value, 1), 0);
        }
    }

    #[test]
    fn try_from_accepts_only_unit_values() {
        assert_eq!(Sign::try_from(1), Ok(Sign::Positive));
        assert_eq!(Sign::try_from(-1), Ok(Sign::Negative));
        assert_eq!(Sign::try_from(0), Err(FhtError::InvalidSign(0)));
        assert_eq!(Sign::try_from(2), Err(FhtError::InvalidSign(2)));
    }
}
