use adrt_util::div_by_pow2;

/// How a range of rows is divided into a top and a bottom subtree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SplitPolicy {
    /// `h_T = floor(h / 2)`.
    Balanced,
    /// `h_T` is the largest power of two below `h` (`h / 2` when `h` is a power of two).
    PowerOfTwo,
}

impl SplitPolicy {
    /// Height of the top subtree of a node with `height >= 2` rows.
    #[inline]
    #[must_use]
    pub fn top_height(self, height: usize) -> usize {
        debug_assert!(height >= 2);
        match self {
            Self::Balanced => height / 2,
            Self::PowerOfTwo => div_by_pow2(height),
        }
    }
}
