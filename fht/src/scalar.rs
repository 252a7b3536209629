use core::fmt::Debug;

/// An element type the transforms can sum.
///
/// Integer sums wrap on overflow, so every line sum is exact modulo `2^bits` and the transform
/// never panics on large integer images.
pub trait Scalar: Copy + Default + PartialEq + Debug + Send + Sync + 'static {
    /// The sum used by every butterfly.
    #[must_use]
    fn add(self, rhs: Self) -> Self;

    /// Converts a small non-negative integer exactly.
    fn from_u16(value: u16) -> Self;
}

macro_rules! impl_scalar_integer {
    ($($type:ty),* $(,)?) => {
        $(
            impl Scalar for $type {
                #[inline(always)]
                fn add(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }

                #[inline]
                fn from_u16(value: u16) -> Self {
                    value.into()
                }
            }
        )*
    };
}

macro_rules! impl_scalar_float {
    ($($type:ty),* $(,)?) => {
        $(
            impl Scalar for $type {
                #[inline(always)]
                fn add(self, rhs: Self) -> Self {
                    self + rhs
                }

                #[inline]
                fn from_u16(value: u16) -> Self {
                    value.into()
                }
            }
        )*
    };
}

impl_scalar_integer!(u32, i32, u64, i64);
impl_scalar_float!(f32, f64);
