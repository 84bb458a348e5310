//! # hair-math
//!
//! Numerical kernels for diffusion-based hair inpainting.
//!
//! - [`lanes`] - Fixed-width lane groups with per-group validity masks
//! - [`diffuse`] - The explicit heat-diffusion update, scalar and `f32x8`
//!
//! # Design
//!
//! The vector kernel is written against portable SIMD from the [`wide`]
//! crate. Group tails are handled with [`lanes::LaneMask`] rather than a
//! separate remainder loop.
//!
//! # Usage
//!
//! ```rust
//! use hair_math::diffuse::{diffuse_row_x8, DiffusionCoeffs, RowInputs};
//!
//! let up = [1.0f32; 10];
//! let down = [1.0f32; 10];
//! let mask = [1.0f32; 10];
//! let source = [1.0f32; 10];
//! let mut row = [1.0f32; 10];
//! row[4] = 0.0;
//!
//! let inputs = RowInputs { up: &up, down: &down, mask: &mask, source: &source };
//! diffuse_row_x8(&mut row, inputs, DiffusionCoeffs::new(0.1, 4.0));
//! assert!(row[4] > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod diffuse;
pub mod lanes;

pub use diffuse::{
    diffuse_row, diffuse_row_x8, finish, step, step_terms_x8, DiffusionCoeffs, RowInputs, StepTerms,
};
pub use lanes::{LaneGroups, LaneMask, LANES};
