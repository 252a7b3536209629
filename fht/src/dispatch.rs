//! Runtime-typed entry points.
//!
//! Callers holding images whose element type is only known at runtime wrap their views in
//! [`AnyImage`] / [`AnyImageMut`]. Arguments are validated once, then the variant is matched and
//! the generic transform for that element type runs.

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use adrt_matrix::strided::{StridedMatrixView, StridedMatrixViewMut};
use adrt_matrix::{Dimensions, Matrix};
use adrt_util::round05;

use crate::error::{FhtError, FhtResult};
use crate::ledger::Permutation;
use crate::{Sign, SplitPolicy, Traversal, fht2_in_place, fht2_to_image};

/// Largest input accepted by [`checked_round05`].
pub const MAX_ROUND_INPUT: f64 = 16_777_215.0;

/// The element types the transforms are instantiated for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScalarType {
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
}

impl ScalarType {
    pub const ALL: [Self; 6] = [
        Self::U32,
        Self::I32,
        Self::U64,
        Self::I64,
        Self::F32,
        Self::F64,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::U32 => "uint32",
            Self::I32 => "int32",
            Self::U64 => "uint64",
            Self::I64 => "int64",
            Self::F32 => "float32",
            Self::F64 => "float64",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalarType {
    type Err = FhtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.name() == s)
            .ok_or_else(|| FhtError::UnsupportedScalarType(s.to_string()))
    }
}

/// A read-only image of any supported element type.
#[derive(Copy, Clone, Debug)]
pub enum AnyImage<'a> {
    U32(StridedMatrixView<'a, u32>),
    I32(StridedMatrixView<'a, i32>),
    U64(StridedMatrixView<'a, u64>),
    I64(StridedMatrixView<'a, i64>),
    F32(StridedMatrixView<'a, f32>),
    F64(StridedMatrixView<'a, f64>),
}

/// A mutable image of any supported element type.
#[derive(Debug)]
pub enum AnyImageMut<'a> {
    U32(StridedMatrixViewMut<'a, u32>),
    I32(StridedMatrixViewMut<'a, i32>),
    U64(StridedMatrixViewMut<'a, u64>),
    I64(StridedMatrixViewMut<'a, i64>),
    F32(StridedMatrixViewMut<'a, f32>),
    F64(StridedMatrixViewMut<'a, f64>),
}

macro_rules! impl_any_image {
    ($($variant:ident => $type:ty),* $(,)?) => {
        impl AnyImage<'_> {
            #[must_use]
            pub const fn scalar_type(&self) -> ScalarType {
                match self {
                    $(Self::$variant(_) => ScalarType::$variant,)*
                }
            }

            #[must_use]
            pub fn dimensions(&self) -> Dimensions {
                match self {
                    $(Self::$variant(view) => view.dimensions(),)*
                }
            }
        }

        impl AnyImageMut<'_> {
            #[must_use]
            pub const fn scalar_type(&self) -> ScalarType {
                match self {
                    $(Self::$variant(_) => ScalarType::$variant,)*
                }
            }

            #[must_use]
            pub fn dimensions(&self) -> Dimensions {
                match self {
                    $(Self::$variant(view) => view.dimensions(),)*
                }
            }
        }

        $(
            impl<'a> From<StridedMatrixView<'a, $type>> for AnyImage<'a> {
                fn from(view: StridedMatrixView<'a, $type>) -> Self {
                    Self::$variant(view)
                }
            }

            impl<'a> From<StridedMatrixViewMut<'a, $type>> for AnyImageMut<'a> {
                fn from(view: StridedMatrixViewMut<'a, $type>) -> Self {
                    Self::$variant(view)
                }
            }
        )*

        /// Transforms `image` in place. `sign` must be `1` or `-1`.
        pub fn fht2_in_place_any(
            image: &mut AnyImageMut<'_>,
            sign: i32,
            split: SplitPolicy,
            traversal: Traversal,
        ) -> FhtResult<Permutation> {
            let sign = Sign::try_from(sign)?;
            check_non_empty(image.dimensions())?;
            let ledger = match image {
                $(AnyImageMut::$variant(view) => fht2_in_place(view, sign, split, traversal),)*
            };
            Ok(ledger)
        }

        /// Writes the transform of `src` into `dst`. Both must share shape and element type.
        pub fn fht2_to_image_any(
            dst: &mut AnyImageMut<'_>,
            src: &AnyImage<'_>,
            sign: i32,
            split: SplitPolicy,
            traversal: Traversal,
        ) -> FhtResult<()> {
            let sign = Sign::try_from(sign)?;
            check_non_empty(src.dimensions())?;
            if dst.dimensions() != src.dimensions() {
                return Err(FhtError::ShapeMismatch {
                    dst: dst.dimensions(),
                    src: src.dimensions(),
                });
            }
            match (dst, src) {
                $(
                    (AnyImageMut::$variant(dst), AnyImage::$variant(src)) => {
                        fht2_to_image(dst, src, sign, split, traversal);
                        Ok(())
                    }
                )*
                (dst, src) => Err(FhtError::ScalarTypeMismatch {
                    dst: dst.scalar_type(),
                    src: src.scalar_type(),
                }),
            }
        }
    };
}

impl_any_image!(U32 => u32, I32 => i32, U64 => u64, I64 => i64, F32 => f32, F64 => f64);

fn check_non_empty(dimensions: Dimensions) -> FhtResult<()> {
    if dimensions.height == 0 || dimensions.width == 0 {
        Err(FhtError::EmptyImage(dimensions))
    } else {
        Ok(())
    }
}

/// [`round05`] with its input validated: `x` must lie in `[0, MAX_ROUND_INPUT]`.
pub fn checked_round05(x: f64) -> FhtResult<usize> {
    if x.is_nan() || x < 0.0 {
        return Err(FhtError::NegativeRoundInput(x));
    }
    if x > MAX_ROUND_INPUT {
        return Err(FhtError::RoundInputTooLarge {
            value: x,
            max: MAX_ROUND_INPUT,
        });
    }
    Ok(round05(x))
}
