//! Inpainting parameter block.
//!
//! [`InpaintParams`] carries everything the three stages need: source and
//! working dimensions, the solver's iteration count and coefficients, the
//! sweep/kernel selection, and the per-channel intensity ranges.
//!
//! # Channel ranges
//!
//! [`InpaintParams::ranges`] is an in/out accumulator. The normalizer widens
//! it with every pixel it scans and the denormalizer reads it back, so both
//! ends always agree. Ranges start at [`ChannelRange::EMPTY`]; a block that
//! is reused for a different image must call
//! [`reset_ranges`](InpaintParams::reset_ranges) first or the earlier
//! image's extremes carry over.
//!
//! # Example
//!
//! ```rust
//! use hair_inpaint::{InpaintParams, Kernel, Sweep};
//!
//! let params = InpaintParams::new(1024, 768, 3, 2)
//!     .unwrap()
//!     .with_iters(300)
//!     .with_sweep(Sweep::RowParallel)
//!     .with_kernel(Kernel::Vectorized);
//!
//! assert_eq!(params.width(), 512);
//! assert_eq!(params.height(), 384);
//! assert_eq!(params.c1_elements(), 512 * 384);
//! assert_eq!(params.cn_elements(), 512 * 384 * 3);
//! ```

use hair_core::{element_count, ChannelRange, Error};
use hair_math::{diffuse_row, diffuse_row_x8, DiffusionCoeffs, RowInputs};

use crate::{InpaintError, InpaintResult};

/// Default iteration count.
pub const DEFAULT_ITERS: usize = 500;

/// Default explicit time step.
pub const DEFAULT_DT: f32 = 0.1;

/// Default decay coefficient (the 4-neighbor Laplacian weight).
pub const DEFAULT_CW: f32 = 4.0;

/// Row-sweep order of the diffusion solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sweep {
    /// Rows top to bottom, updated in place: each row sees the rows above it
    /// after this iteration's update and the rows below before it.
    #[default]
    Sequential,
    /// Rows updated concurrently, one task per row. Every row reads its up
    /// and down neighbors as they were at the start of the iteration.
    RowParallel,
}

impl Sweep {
    /// Short name, used in logs and benchmark ids.
    pub fn name(self) -> &'static str {
        match self {
            Sweep::Sequential => "sequential",
            Sweep::RowParallel => "row-parallel",
        }
    }
}

/// Inner-loop implementation of a row update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kernel {
    /// One sample at a time; the reference kernel.
    #[default]
    Scalar,
    /// Eight samples per group with per-group lane masks.
    Vectorized,
}

/// Signature shared by the row kernels.
pub(crate) type RowKernel = fn(&mut [f32], RowInputs<'_>, DiffusionCoeffs) -> f32;

impl Kernel {
    /// Short name, used in logs and benchmark ids.
    pub fn name(self) -> &'static str {
        match self {
            Kernel::Scalar => "scalar",
            Kernel::Vectorized => "vectorized",
        }
    }

    pub(crate) fn row_kernel(self) -> RowKernel {
        match self {
            Kernel::Scalar => diffuse_row,
            Kernel::Vectorized => diffuse_row_x8,
        }
    }
}

/// Parameter block for one inpainting run.
#[derive(Debug, Clone, PartialEq)]
pub struct InpaintParams {
    source_width: usize,
    source_height: usize,
    width: usize,
    height: usize,
    channels: usize,
    rescale: usize,
    c1_elements: usize,
    cn_elements: usize,
    /// Number of explicit time steps.
    pub iters: usize,
    /// Time step.
    pub dt: f32,
    /// Diffusion/decay coefficient.
    pub cw: f32,
    /// Row-sweep order.
    pub sweep: Sweep,
    /// Row kernel.
    pub kernel: Kernel,
    /// Per-channel observed intensity ranges (in/out).
    pub ranges: Vec<ChannelRange>,
}

impl InpaintParams {
    /// Creates a parameter block for a `width` x `height` source image with
    /// `channels` channels, inpainted at `1 / rescale` resolution.
    ///
    /// Working dimensions are `width / rescale` and `height / rescale`
    /// (integer division).
    ///
    /// # Errors
    ///
    /// Fails for `rescale == 0`, unsupported channel counts, and working
    /// dimensions that are zero or overflow.
    pub fn new(width: usize, height: usize, channels: usize, rescale: usize) -> InpaintResult<Self> {
        if rescale == 0 {
            return Err(Error::invalid_parameter("rescale", rescale, "must be >= 1").into());
        }
        element_count(width, height, channels)?;
        let w = width / rescale;
        let h = height / rescale;
        let cn_elements = element_count(w, h, channels)?;

        Ok(Self {
            source_width: width,
            source_height: height,
            width: w,
            height: h,
            channels,
            rescale,
            c1_elements: w * h,
            cn_elements,
            iters: DEFAULT_ITERS,
            dt: DEFAULT_DT,
            cw: DEFAULT_CW,
            sweep: Sweep::default(),
            kernel: Kernel::default(),
            ranges: vec![ChannelRange::EMPTY; channels],
        })
    }

    /// Sets the iteration count.
    pub fn with_iters(mut self, iters: usize) -> Self {
        self.iters = iters;
        self
    }

    /// Sets the time step.
    pub fn with_dt(mut self, dt: f32) -> Self {
        self.dt = dt;
        self
    }

    /// Sets the decay coefficient.
    pub fn with_cw(mut self, cw: f32) -> Self {
        self.cw = cw;
        self
    }

    /// Selects the row-sweep order.
    pub fn with_sweep(mut self, sweep: Sweep) -> Self {
        self.sweep = sweep;
        self
    }

    /// Selects the row kernel.
    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Resets every channel range to [`ChannelRange::EMPTY`].
    pub fn reset_ranges(&mut self) {
        self.ranges.clear();
        self.ranges.resize(self.channels, ChannelRange::EMPTY);
    }

    /// Source image width.
    #[inline]
    pub fn source_width(&self) -> usize {
        self.source_width
    }

    /// Source image height.
    #[inline]
    pub fn source_height(&self) -> usize {
        self.source_height
    }

    /// Working (possibly downscaled) width.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Working (possibly downscaled) height.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Channels per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Downscale factor.
    #[inline]
    pub fn rescale(&self) -> usize {
        self.rescale
    }

    /// Samples per working plane.
    #[inline]
    pub fn c1_elements(&self) -> usize {
        self.c1_elements
    }

    /// Samples across all working planes.
    #[inline]
    pub fn cn_elements(&self) -> usize {
        self.cn_elements
    }

    /// `true` if the working image has at least one interior pixel.
    #[inline]
    pub fn has_interior(&self) -> bool {
        self.width >= 3 && self.height >= 3
    }

    /// Solver coefficients.
    #[inline]
    pub fn coeffs(&self) -> DiffusionCoeffs {
        DiffusionCoeffs::new(self.dt, self.cw)
    }

    /// Checks the user-editable fields.
    ///
    /// # Errors
    ///
    /// Fails when `dt` or `cw` is not finite or `ranges` does not hold one
    /// entry per channel.
    pub fn validate(&self) -> InpaintResult<()> {
        if !self.dt.is_finite() {
            return Err(Error::invalid_parameter("dt", self.dt, "must be finite").into());
        }
        if !self.cw.is_finite() {
            return Err(Error::invalid_parameter("cw", self.cw, "must be finite").into());
        }
        if self.ranges.len() != self.channels {
            return Err(InpaintError::ParamsMismatch(format!(
                "{} channel ranges for {} channels",
                self.ranges.len(),
                self.channels
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = InpaintParams::new(64, 48, 3, 1).unwrap();
        assert_eq!(p.iters, DEFAULT_ITERS);
        assert_eq!(p.dt, DEFAULT_DT);
        assert_eq!(p.cw, DEFAULT_CW);
        assert_eq!(p.sweep, Sweep::Sequential);
        assert_eq!(p.kernel, Kernel::Scalar);
        assert_eq!(p.ranges, vec![ChannelRange::EMPTY; 3]);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_rescale_derivation() {
        let p = InpaintParams::new(101, 75, 3, 4).unwrap();
        assert_eq!((p.width(), p.height()), (25, 18));
        assert_eq!((p.source_width(), p.source_height()), (101, 75));
        assert_eq!(p.c1_elements(), 25 * 18);
        assert_eq!(p.cn_elements(), 25 * 18 * 3);
    }

    #[test]
    fn test_invalid_construction() {
        assert!(InpaintParams::new(64, 48, 3, 0).is_err());
        assert!(InpaintParams::new(64, 48, 0, 1).is_err());
        assert!(InpaintParams::new(64, 48, 5, 1).is_err());
        assert!(InpaintParams::new(0, 48, 3, 1).is_err());
        // Working size rounds down to zero
        assert!(InpaintParams::new(3, 48, 3, 4).is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let p = InpaintParams::new(8, 8, 1, 1).unwrap().with_dt(f32::NAN);
        assert!(p.validate().is_err());
        let p = InpaintParams::new(8, 8, 1, 1).unwrap().with_cw(f32::INFINITY);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_reset_ranges() {
        let mut p = InpaintParams::new(8, 8, 3, 1).unwrap();
        p.ranges[1] = ChannelRange::new(10, 20);
        p.ranges.pop();
        assert!(p.validate().is_err());
        p.reset_ranges();
        assert_eq!(p.ranges, vec![ChannelRange::EMPTY; 3]);
    }

    #[test]
    fn test_has_interior() {
        assert!(InpaintParams::new(3, 3, 1, 1).unwrap().has_interior());
        assert!(!InpaintParams::new(2, 9, 1, 1).unwrap().has_interior());
        assert!(!InpaintParams::new(9, 2, 1, 1).unwrap().has_interior());
    }
}
