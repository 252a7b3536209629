//! Errors reported at the typed dispatch boundary.
//!
//! The transforms themselves do not fail: geometry and configuration are validated here, before
//! any kernel runs, and kernels only `debug_assert!` their preconditions.

use alloc::string::String;

use adrt_matrix::Dimensions;
use thiserror::Error;

use crate::dispatch::ScalarType;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FhtError {
    #[error("sign must be 1 or -1, got {0}")]
    InvalidSign(i32),

    #[error("unsupported scalar type `{0}`")]
    UnsupportedScalarType(String),

    /// The image has no rows or no columns.
    #[error("image must have at least one row and one column, got {0}")]
    EmptyImage(Dimensions),

    #[error("destination is {dst} but source is {src}")]
    ShapeMismatch { dst: Dimensions, src: Dimensions },

    #[error("destination holds {dst} samples but source holds {src} samples")]
    ScalarTypeMismatch { dst: ScalarType, src: ScalarType },

    #[error("negative values are not supported, got {0}")]
    NegativeRoundInput(f64),

    #[error("values larger than {max} are not supported, got {value}")]
    RoundInputTooLarge { value: f64, max: f64 },
}

/// Result type alias for boundary operations.
pub type FhtResult<T> = core::result::Result<T, FhtError>;
