//! Error types for inpainting operations.

use thiserror::Error;

/// Error type for inpainting operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InpaintError {
    /// A buffer precondition failed (extents, channel count, buffer size).
    #[error(transparent)]
    Core(#[from] hair_core::Error),

    /// The working image has no interior pixel for the solver to update.
    #[error("image {width}x{height} too small: need at least 3x3 for an interior")]
    TooSmall {
        /// Working width
        width: usize,
        /// Working height
        height: usize,
    },

    /// Inputs disagree with the parameter block.
    #[error("parameter mismatch: {0}")]
    ParamsMismatch(String),
}

impl InpaintError {
    /// Returns `true` for any dimension-related failure.
    pub fn is_dimension_error(&self) -> bool {
        match self {
            Self::Core(e) => e.is_dimension_error(),
            Self::TooSmall { .. } => true,
            Self::ParamsMismatch(_) => false,
        }
    }
}

/// Result type for inpainting operations.
pub type InpaintResult<T> = Result<T, InpaintError>;
