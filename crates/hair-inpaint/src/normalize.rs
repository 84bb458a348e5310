//! Interleaved bytes to planar floats.
//!
//! [`normalize`] turns a source image and its hair mask into the three
//! buffers the solver consumes:
//!
//! - **mask** - one plane, `0.0` on hair pixels and `1.0` elsewhere. The
//!   solver uses it as the weight of the fidelity term, so trusted pixels
//!   are held at their known value and hair pixels diffuse freely.
//! - **source** - every pixel scaled into `[0, 1]` by its channel range.
//! - **masked_source** - like `source`, but hair pixels hold the sentinel
//!   [`HAIR_SENTINEL`]. The outer ring of pixels always keeps its
//!   normalized value so the solver has a fixed boundary on all four edges.
//!
//! The per-channel ranges in [`InpaintParams::ranges`] are widened with the
//! observed extremes before scaling.

use hair_core::{ByteImage, ChannelRange, HairMask, PlanarImage};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{InpaintError, InpaintParams, InpaintResult};

/// Value written to hair pixels of the masked-source plane.
pub const HAIR_SENTINEL: f32 = 1.0;

/// Solver inputs produced by [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPlanes {
    /// Single-plane fidelity weight: 0 on hair, 1 elsewhere.
    pub mask: PlanarImage,
    /// Fully normalized image.
    pub source: PlanarImage,
    /// Normalized image with hair replaced by [`HAIR_SENTINEL`], borders
    /// excepted.
    pub masked_source: PlanarImage,
}

/// Scans `image` for per-channel extremes, seeded with `seed`.
///
/// # Example
///
/// ```rust
/// use hair_core::{ByteImage, ChannelRange};
/// use hair_inpaint::normalize::observe_ranges;
///
/// let img = ByteImage::from_data(2, 1, 3, vec![10, 20, 30, 40, 50, 60]).unwrap();
/// let r = observe_ranges(&img, &[ChannelRange::EMPTY; 3]);
/// assert_eq!(r[0], ChannelRange::new(10, 40));
/// assert_eq!(r[2], ChannelRange::new(30, 60));
/// ```
pub fn observe_ranges(image: &ByteImage, seed: &[ChannelRange]) -> Vec<ChannelRange> {
    let channels = image.channels();
    let observed = image
        .data()
        .par_chunks(channels)
        .fold(
            || vec![ChannelRange::EMPTY; channels],
            |mut acc, px| {
                for (r, &v) in acc.iter_mut().zip(px) {
                    r.observe(v);
                }
                acc
            },
        )
        .reduce(
            || vec![ChannelRange::EMPTY; channels],
            |a, b| a.iter().zip(&b).map(|(x, y)| x.merge(*y)).collect(),
        );

    seed.iter()
        .zip(&observed)
        .map(|(s, o)| s.merge(*o))
        .collect()
}

/// Builds the solver's input planes and updates `params.ranges`.
///
/// # Errors
///
/// - [`hair_core::Error::DimensionMismatch`] if the mask does not cover the
///   image, or the image is not the working size of `params`
/// - [`InpaintError::ParamsMismatch`] if the channel count differs from
///   `params`
pub fn normalize(
    image: &ByteImage,
    mask: &HairMask,
    params: &mut InpaintParams,
) -> InpaintResult<NormalizedPlanes> {
    mask.ensure_matches(image)?;
    if image.dimensions() != (params.width(), params.height()) {
        return Err(hair_core::Error::dimension_mismatch(
            (params.width(), params.height()),
            image.dimensions(),
        )
        .into());
    }
    if image.channels() != params.channels() {
        return Err(InpaintError::ParamsMismatch(format!(
            "image has {} channels, parameters expect {}",
            image.channels(),
            params.channels()
        )));
    }
    params.validate()?;

    let (width, height) = image.dimensions();
    let channels = image.channels();
    trace!(width, height, channels, "normalize");

    let mask_plane: Vec<f32> = mask
        .data()
        .par_iter()
        .map(|&b| if b != 0 { 0.0 } else { 1.0 })
        .collect();

    params.ranges = observe_ranges(image, &params.ranges);
    debug!(ranges = ?params.ranges, "Observed channel ranges");

    let plane_len = width * height;
    let mut source = vec![0.0f32; plane_len * channels];
    let mut masked = vec![0.0f32; plane_len * channels];
    let pixels = image.data();
    let ranges = &params.ranges;

    source
        .par_chunks_mut(plane_len)
        .zip(masked.par_chunks_mut(plane_len))
        .enumerate()
        .for_each(|(k, (src_plane, masked_plane))| {
            let range = ranges[k];
            src_plane
                .par_chunks_mut(width)
                .zip(masked_plane.par_chunks_mut(width))
                .enumerate()
                .for_each(|(y, (src_row, masked_row))| {
                    for x in 0..width {
                        let i = y * width + x;
                        let value = range.normalize(pixels[i * channels + k]);
                        src_row[x] = value;
                        masked_row[x] = if mask_plane[i] > 0.0 { value } else { HAIR_SENTINEL };
                    }
                });
            restore_border(masked_plane, src_plane, width, height);
        });

    Ok(NormalizedPlanes {
        mask: PlanarImage::from_data(width, height, 1, mask_plane)?,
        source: PlanarImage::from_data(width, height, channels, source)?,
        masked_source: PlanarImage::from_data(width, height, channels, masked)?,
    })
}

/// Copies the outer ring of `src` into `dst`.
fn restore_border(dst: &mut [f32], src: &[f32], width: usize, height: usize) {
    let last_row = (height - 1) * width;
    dst[..width].copy_from_slice(&src[..width]);
    dst[last_row..last_row + width].copy_from_slice(&src[last_row..last_row + width]);
    for y in 0..height {
        let row = y * width;
        dst[row] = src[row];
        dst[row + width - 1] = src[row + width - 1];
    }
}
