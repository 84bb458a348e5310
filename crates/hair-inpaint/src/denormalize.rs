//! Planar floats back to interleaved bytes.

use hair_core::{ByteImage, ChannelRange, PlanarImage};
use rayon::prelude::*;
use tracing::trace;

use crate::{InpaintError, InpaintResult};

/// Converts a planar solution to an interleaved byte image.
///
/// Each sample becomes `trunc((max - min) * value + min)` using the same
/// [`ChannelRange`] the normalizer recorded. Channels with a zero range
/// come out as their constant `min`.
///
/// # Errors
///
/// Returns [`InpaintError::ParamsMismatch`] if `ranges` does not hold one
/// entry per plane.
///
/// # Example
///
/// ```rust
/// use hair_core::{ChannelRange, PlanarImage};
/// use hair_inpaint::denormalize::denormalize;
///
/// let planes = PlanarImage::from_data(2, 1, 1, vec![0.0, 1.0]).unwrap();
/// let img = denormalize(&planes, &[ChannelRange::new(40, 240)]).unwrap();
/// assert_eq!(img.data(), &[40, 240]);
/// ```
pub fn denormalize(solution: &PlanarImage, ranges: &[ChannelRange]) -> InpaintResult<ByteImage> {
    let width = solution.width();
    let height = solution.height();
    let channels = solution.channels();
    if ranges.len() != channels {
        return Err(InpaintError::ParamsMismatch(format!(
            "{} channel ranges for {} planes",
            ranges.len(),
            channels
        )));
    }
    trace!(width, height, channels, "denormalize");

    let mut out = ByteImage::new(width, height, channels)?;
    out.data_mut()
        .par_chunks_mut(width * channels)
        .enumerate()
        .for_each(|(y, row)| {
            for (k, range) in ranges.iter().enumerate() {
                let plane = solution.plane(k);
                let src_row = &plane[y * width..(y + 1) * width];
                for (x, &v) in src_row.iter().enumerate() {
                    row[x * channels + k] = range.denormalize(v);
                }
            }
        });
    Ok(out)
}
