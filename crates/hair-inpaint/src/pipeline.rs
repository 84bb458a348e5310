//! End-to-end hair inpainting.
//!
//! [`inpaint_hair`] chains the stages:
//!
//! ```text
//! image + mask
//!   -> validate
//!   -> downscale (rescale > 1)
//!   -> normalize -> solve -> denormalize
//!   -> upsample + composite into hair pixels (rescale > 1)
//! ```
//!
//! At `rescale == 1` the denormalized solution is returned as is. At larger
//! factors only hair pixels of the source are replaced, so the untouched
//! skin keeps its full resolution.

use hair_core::{ByteImage, HairMask};
use tracing::debug;

use crate::denormalize::denormalize;
use crate::normalize::normalize;
use crate::rescale::{composite_hair, downscale_image, downscale_mask, upsample_to_source};
use crate::solver::{solve_with_stats, SolveStats};
use crate::{InpaintError, InpaintParams, InpaintResult};

/// Removes hair from `image` using `mask`.
///
/// `params.ranges` is updated with the observed channel ranges (seeded from
/// its current contents).
///
/// # Errors
///
/// - [`hair_core::Error::DimensionMismatch`] if the mask does not cover the
///   image or the image is not `params`' source size
/// - [`InpaintError::ParamsMismatch`] on a channel count mismatch
/// - [`InpaintError::TooSmall`] if the working image has no interior pixel
///
/// All checks run before any buffer is allocated.
///
/// # Example
///
/// ```rust
/// use hair_core::{ByteImage, HairMask};
/// use hair_inpaint::{inpaint_hair, InpaintParams};
///
/// let img = ByteImage::filled(16, 16, &[180, 120, 100]).unwrap();
/// let mut mask = HairMask::new(16, 16).unwrap();
/// for x in 2..14 {
///     mask.set_hair(x, 8, true);
/// }
/// let mut params = InpaintParams::new(16, 16, 3, 1).unwrap().with_iters(50);
/// let out = inpaint_hair(&img, &mask, &mut params).unwrap();
/// assert_eq!(out.dimensions(), (16, 16));
/// ```
pub fn inpaint_hair(
    image: &ByteImage,
    mask: &HairMask,
    params: &mut InpaintParams,
) -> InpaintResult<ByteImage> {
    inpaint_hair_with_stats(image, mask, params).map(|(img, _)| img)
}

/// Like [`inpaint_hair`], also returning the solver's [`SolveStats`].
pub fn inpaint_hair_with_stats(
    image: &ByteImage,
    mask: &HairMask,
    params: &mut InpaintParams,
) -> InpaintResult<(ByteImage, SolveStats)> {
    check_inputs(image, mask, params)?;

    let factor = params.rescale();
    let (work_image, work_mask) = if factor > 1 {
        (downscale_image(image, factor)?, downscale_mask(mask, factor)?)
    } else {
        (image.clone(), mask.clone())
    };

    let planes = normalize(&work_image, &work_mask, params)?;
    let (solution, stats) = solve_with_stats(&planes.mask, &planes.masked_source, params)?;
    let result = denormalize(&solution, &params.ranges)?;

    debug!(
        width = params.width(),
        height = params.height(),
        rescale = factor,
        hair_pixels = work_mask.hair_count(),
        max_delta = stats.max_delta,
        "Inpainting finished"
    );

    if factor > 1 {
        let full = upsample_to_source(&result, factor, image.width(), image.height())?;
        return Ok((composite_hair(image, &full, mask)?, stats));
    }
    Ok((result, stats))
}

fn check_inputs(image: &ByteImage, mask: &HairMask, params: &InpaintParams) -> InpaintResult<()> {
    mask.ensure_matches(image)?;
    let expected = (params.source_width(), params.source_height());
    if image.dimensions() != expected {
        return Err(hair_core::Error::dimension_mismatch(expected, image.dimensions()).into());
    }
    if image.channels() != params.channels() {
        return Err(InpaintError::ParamsMismatch(format!(
            "image has {} channels, parameters expect {}",
            image.channels(),
            params.channels()
        )));
    }
    if !params.has_interior() {
        return Err(InpaintError::TooSmall {
            width: params.width(),
            height: params.height(),
        });
    }
    params.validate()
}

/// Reusable inpainting front end that owns its parameter block.
///
/// Unlike calling [`inpaint_hair`] repeatedly with the same block,
/// [`run`](Self::run) resets the channel ranges before every image.
#[derive(Debug, Clone)]
pub struct HairInpainter {
    params: InpaintParams,
}

impl HairInpainter {
    /// Wraps a parameter block.
    pub fn new(params: InpaintParams) -> Self {
        Self { params }
    }

    /// Parameters, including the ranges of the last run.
    pub fn params(&self) -> &InpaintParams {
        &self.params
    }

    /// Inpaints one image with fresh channel ranges.
    pub fn run(&mut self, image: &ByteImage, mask: &HairMask) -> InpaintResult<ByteImage> {
        self.params.reset_ranges();
        inpaint_hair(image, mask, &mut self.params)
    }
}
