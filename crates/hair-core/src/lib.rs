//! # hair-core
//!
//! Core types for dermoscopic hair removal.
//!
//! This crate provides the buffers shared by the rest of the workspace:
//!
//! - [`ByteImage`] - Interleaved 8-bit source/result image
//! - [`HairMask`] - Binary hair mask produced by the detection stage
//! - [`PlanarImage`] - Channel-major `f32` buffer used by the solver
//! - [`ChannelRange`] - Observed per-channel intensity interval
//! - [`Error`] / [`Result`] - Precondition failures
//!
//! ## Crate Structure
//!
//! ```text
//! hair-core (this crate)     hair-math (lane groups, row kernels)
//!    ^                          ^
//!    |                          |
//!    +------- hair-inpaint -----+
//!             (normalizer, solver, denormalizer, pipeline)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod planar;
pub mod range;

pub use error::{Error, Result};
pub use image::{element_count, ByteImage, HairMask};
pub use planar::PlanarImage;
pub use range::ChannelRange;

/// Smallest supported channel count.
pub const MIN_CHANNELS: usize = 1;

/// Largest supported channel count.
pub const MAX_CHANNELS: usize = 4;
