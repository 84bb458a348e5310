//! # hair-inpaint
//!
//! Removes hair strands from dermoscopic images by diffusion inpainting.
//!
//! Given an interleaved RGB image and a binary hair mask (from an external
//! detection stage), the engine fills hair pixels by iterating an explicit
//! heat equation seeded from the surrounding skin.
//!
//! # Modules
//!
//! - [`normalize`] - Bytes to planar `[0, 1]` floats, mask inversion, borders
//! - [`solver`] - Iterative diffusion with scalar or 8-wide row kernels
//! - [`denormalize`] - Planar floats back to interleaved bytes
//! - [`rescale`] - Working-resolution downscale/upsample helpers
//! - [`pipeline`] - The stages chained behind [`inpaint_hair`]
//!
//! # Example
//!
//! ```rust
//! use hair_core::{ByteImage, HairMask};
//! use hair_inpaint::{inpaint_hair, InpaintParams, Kernel, Sweep};
//!
//! let image = ByteImage::filled(32, 32, &[190, 140, 120]).unwrap();
//! let mut mask = HairMask::new(32, 32).unwrap();
//! for i in 4..28 {
//!     mask.set_hair(i, i, true);
//! }
//!
//! let mut params = InpaintParams::new(32, 32, 3, 1)
//!     .unwrap()
//!     .with_iters(100)
//!     .with_sweep(Sweep::Sequential)
//!     .with_kernel(Kernel::Vectorized);
//! let cleaned = inpaint_hair(&image, &mask, &mut params).unwrap();
//! assert_eq!(cleaned.dimensions(), (32, 32));
//! ```
//!
//! # Logging
//!
//! Stages emit `tracing` events: `trace!` on entry with their dimensions,
//! `debug!` with observed ranges and convergence. Install a subscriber in
//! the application to see them.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod params;

pub mod denormalize;
pub mod normalize;
pub mod pipeline;
pub mod rescale;
pub mod solver;

pub use error::{InpaintError, InpaintResult};
pub use normalize::NormalizedPlanes;
pub use params::{InpaintParams, Kernel, Sweep, DEFAULT_CW, DEFAULT_DT, DEFAULT_ITERS};
pub use pipeline::{inpaint_hair, inpaint_hair_with_stats, HairInpainter};
pub use solver::SolveStats;
