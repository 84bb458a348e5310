//! Error types for hair-core operations.
//!
//! Every failure this crate reports is a precondition violation that can be
//! detected before any pixel buffer is allocated.
//!
//! # Usage
//!
//! ```rust
//! use hair_core::{Error, Result};
//!
//! fn check_same_size(a: (usize, usize), b: (usize, usize)) -> Result<()> {
//!     if a != b {
//!         return Err(Error::dimension_mismatch(a, b));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_same_size((4, 4), (4, 5)).is_err());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing or validating hair-removal buffers.
///
/// # Categories
///
/// - **Dimension errors**: [`DimensionMismatch`](Error::DimensionMismatch),
///   [`InvalidDimensions`](Error::InvalidDimensions), [`BufferSize`](Error::BufferSize)
/// - **Format errors**: [`UnsupportedChannels`](Error::UnsupportedChannels)
/// - **Parameter errors**: [`InvalidParameter`](Error::InvalidParameter)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Two buffers that must share an extent do not.
    ///
    /// Returned when a hair mask does not have the same width/height as the
    /// image it annotates.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First buffer width
        a_width: usize,
        /// First buffer height
        a_height: usize,
        /// Second buffer width
        b_width: usize,
        /// Second buffer height
        b_height: usize,
    },

    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero, or the element count would
    /// overflow `usize`.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Buffer length does not match `width * height * channels`.
    #[error("buffer size mismatch: expected {expected} elements, got {got}")]
    BufferSize {
        /// Expected element count
        expected: usize,
        /// Actual element count
        got: usize,
    },

    /// Channel count outside the supported range.
    #[error("unsupported channel count {channels} (supported: {min}..={max})")]
    UnsupportedChannels {
        /// Requested channel count
        channels: usize,
        /// Smallest supported count
        min: usize,
        /// Largest supported count
        max: usize,
    },

    /// A numeric parameter is out of range.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value, formatted
        value: String,
        /// Why the value is rejected
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: (usize, usize), b: (usize, usize)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: usize, height: usize, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::BufferSize`] error.
    #[inline]
    pub fn buffer_size(expected: usize, got: usize) -> Self {
        Self::BufferSize { expected, got }
    }

    /// Creates an [`Error::UnsupportedChannels`] error for the crate-wide
    /// channel limits.
    #[inline]
    pub fn unsupported_channels(channels: usize) -> Self {
        Self::UnsupportedChannels {
            channels,
            min: crate::MIN_CHANNELS,
            max: crate::MAX_CHANNELS,
        }
    }

    /// Creates an [`Error::InvalidParameter`] error.
    #[inline]
    pub fn invalid_parameter(
        name: &'static str,
        value: impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a dimension-related error.
    #[inline]
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            Self::DimensionMismatch { .. } | Self::InvalidDimensions { .. } | Self::BufferSize { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch() {
        let err = Error::dimension_mismatch((100, 80), (100, 81));
        let msg = err.to_string();
        assert!(msg.contains("100x80"));
        assert!(msg.contains("100x81"));
        assert!(err.is_dimension_error());
    }

    #[test]
    fn test_unsupported_channels() {
        let err = Error::unsupported_channels(7);
        assert!(err.to_string().contains('7'));
        assert!(!err.is_dimension_error());
    }

    #[test]
    fn test_invalid_parameter() {
        let err = Error::invalid_parameter("dt", f32::NAN, "must be finite");
        let msg = err.to_string();
        assert!(msg.contains("dt"));
        assert!(msg.contains("NaN"));
    }
}
