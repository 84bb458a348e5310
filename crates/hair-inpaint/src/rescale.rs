//! Working-resolution conversions.
//!
//! Inpainting at a reduced resolution cuts solver cost by `rescale^2`. The
//! pipeline uses these helpers to move between source and working size:
//!
//! - [`downscale_image`] - box average over `factor x factor` blocks
//! - [`downscale_mask`] - a block is hair if any of its pixels is hair
//! - [`upsample`] - separable bilinear resampling
//! - [`upsample_to_source`] - upsample by `factor`, then clamp to the edge
//! - [`composite_hair`] - copy inpainted pixels into hair pixels only
//!
//! Source pixels past the last full block (when the extent is not a
//! multiple of `factor`) do not contribute to the working image. On the way
//! back they take the value of the nearest covered pixel.

use hair_core::{ByteImage, HairMask};
use rayon::prelude::*;
use tracing::trace;

use crate::InpaintResult;

/// Box-averages `image` by an integer `factor`.
///
/// # Errors
///
/// Fails if the reduced size is empty.
///
/// # Example
///
/// ```rust
/// use hair_core::ByteImage;
/// use hair_inpaint::rescale::downscale_image;
///
/// let img = ByteImage::from_data(2, 2, 1, vec![10, 20, 30, 40]).unwrap();
/// let small = downscale_image(&img, 2).unwrap();
/// assert_eq!(small.data(), &[25]);
/// ```
pub fn downscale_image(image: &ByteImage, factor: usize) -> InpaintResult<ByteImage> {
    let channels = image.channels();
    let dst_w = image.width() / factor.max(1);
    let dst_h = image.height() / factor.max(1);
    let mut out = ByteImage::new(dst_w, dst_h, channels)?;
    if factor <= 1 {
        out.data_mut().copy_from_slice(image.data());
        return Ok(out);
    }
    trace!(factor, dst_w, dst_h, "downscale_image");

    let src_w = image.width();
    let src = image.data();
    let area = (factor * factor) as u32;

    out.data_mut()
        .par_chunks_mut(dst_w * channels)
        .enumerate()
        .for_each(|(y, row)| {
            let mut sum = vec![0u32; channels];
            for x in 0..dst_w {
                sum.iter_mut().for_each(|s| *s = 0);
                for sy in y * factor..(y + 1) * factor {
                    for sx in x * factor..(x + 1) * factor {
                        let idx = (sy * src_w + sx) * channels;
                        for c in 0..channels {
                            sum[c] += src[idx + c] as u32;
                        }
                    }
                }
                for c in 0..channels {
                    row[x * channels + c] = ((sum[c] + area / 2) / area) as u8;
                }
            }
        });
    Ok(out)
}

/// Reduces `mask` by `factor`, keeping any block that touches hair.
pub fn downscale_mask(mask: &HairMask, factor: usize) -> InpaintResult<HairMask> {
    let dst_w = mask.width() / factor.max(1);
    let dst_h = mask.height() / factor.max(1);
    if factor <= 1 {
        return Ok(HairMask::from_data(dst_w, dst_h, mask.data().to_vec())?);
    }

    let src_w = mask.width();
    let src = mask.data();
    let mut data = vec![0u8; dst_w * dst_h];
    data.par_chunks_mut(dst_w).enumerate().for_each(|(y, row)| {
        for (x, out) in row.iter_mut().enumerate() {
            let hair = (y * factor..(y + 1) * factor).any(|sy| {
                src[sy * src_w + x * factor..sy * src_w + (x + 1) * factor]
                    .iter()
                    .any(|&b| b != 0)
            });
            *out = if hair { HairMask::HAIR } else { 0 };
        }
    });
    Ok(HairMask::from_data(dst_w, dst_h, data)?)
}

/// Bilinear (triangle) weight function.
#[inline]
fn bilinear_weight(x: f32) -> f32 {
    let ax = x.abs();
    if ax < 1.0 { 1.0 - ax } else { 0.0 }
}

/// Resamples `image` to `dst_w` x `dst_h` with a separable bilinear filter.
///
/// # Errors
///
/// Fails if the destination size is empty.
pub fn upsample(image: &ByteImage, dst_w: usize, dst_h: usize) -> InpaintResult<ByteImage> {
    let mut out = ByteImage::new(dst_w, dst_h, image.channels())?;
    trace!(src_w = image.width(), src_h = image.height(), dst_w, dst_h, "upsample");

    let src: Vec<f32> = image.data().iter().map(|&v| v as f32).collect();
    let channels = image.channels();
    let temp = resample_horizontal(&src, image.width(), image.height(), channels, dst_w);
    let result = resample_vertical(&temp, dst_w, image.height(), channels, dst_h);

    out.data_mut()
        .par_iter_mut()
        .zip(result.par_iter())
        .for_each(|(o, &v)| *o = v.round().clamp(0.0, 255.0) as u8);
    Ok(out)
}

/// Brings a working-resolution image back to `src_w` x `src_h`.
///
/// The working image covers `width * factor` by `height * factor` source
/// pixels. It is upsampled to exactly that extent so every working pixel
/// lands over the block it was averaged from; rows and columns beyond it
/// repeat the last covered one.
///
/// # Errors
///
/// Fails if `factor` is zero or the working image is larger than the
/// source.
pub fn upsample_to_source(
    image: &ByteImage,
    factor: usize,
    src_w: usize,
    src_h: usize,
) -> InpaintResult<ByteImage> {
    let cover_w = image.width() * factor;
    let cover_h = image.height() * factor;
    if factor == 0 || cover_w > src_w || cover_h > src_h {
        return Err(hair_core::Error::dimension_mismatch((src_w, src_h), (cover_w, cover_h)).into());
    }
    let covered = upsample(image, cover_w, cover_h)?;
    if (cover_w, cover_h) == (src_w, src_h) {
        return Ok(covered);
    }
    trace!(cover_w, cover_h, src_w, src_h, "extend edges");

    let channels = image.channels();
    let mut out = ByteImage::new(src_w, src_h, channels)?;
    out.data_mut()
        .par_chunks_mut(src_w * channels)
        .enumerate()
        .for_each(|(y, row)| {
            let sy = y.min(cover_h - 1);
            for (x, px) in row.chunks_exact_mut(channels).enumerate() {
                px.copy_from_slice(covered.pixel(x.min(cover_w - 1), sy));
            }
        });
    Ok(out)
}

/// Horizontal resample pass.
fn resample_horizontal(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
) -> Vec<f32> {
    let scale = src_w as f32 / dst_w as f32;
    let support = scale.max(1.0);
    let mut dst = vec![0.0f32; dst_w * src_h * channels];

    dst.par_chunks_mut(dst_w * channels)
        .enumerate()
        .for_each(|(y, row)| {
            let mut sum = vec![0.0f32; channels];
            for x in 0..dst_w {
                // Map destination x to source x
                let center = (x as f32 + 0.5) * scale - 0.5;
                let left = ((center - support).floor() as isize).max(0) as usize;
                let right = ((center + support).ceil().max(0.0) as usize).min(src_w - 1);

                sum.iter_mut().for_each(|s| *s = 0.0);
                let mut weight_sum = 0.0f32;
                for sx in left..=right {
                    let w = bilinear_weight((sx as f32 - center) / support);
                    weight_sum += w;
                    let src_idx = (y * src_w + sx) * channels;
                    for c in 0..channels {
                        sum[c] += src[src_idx + c] * w;
                    }
                }

                if weight_sum > 0.0 {
                    for c in 0..channels {
                        row[x * channels + c] = sum[c] / weight_sum;
                    }
                } else {
                    // Left of the first source center: clamp to the edge
                    let src_idx = (y * src_w + left.min(src_w - 1)) * channels;
                    row[x * channels..(x + 1) * channels]
                        .copy_from_slice(&src[src_idx..src_idx + channels]);
                }
            }
        });

    dst
}

/// Vertical resample pass.
fn resample_vertical(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_h: usize,
) -> Vec<f32> {
    let scale = src_h as f32 / dst_h as f32;
    let support = scale.max(1.0);
    let mut dst = vec![0.0f32; src_w * dst_h * channels];

    dst.par_chunks_mut(src_w * channels)
        .enumerate()
        .for_each(|(y, row)| {
            let center = (y as f32 + 0.5) * scale - 0.5;
            let top = ((center - support).floor() as isize).max(0) as usize;
            let bottom = ((center + support).ceil().max(0.0) as usize).min(src_h - 1);

            let mut sum = vec![0.0f32; channels];
            for x in 0..src_w {
                sum.iter_mut().for_each(|s| *s = 0.0);
                let mut weight_sum = 0.0f32;
                for sy in top..=bottom {
                    let w = bilinear_weight((sy as f32 - center) / support);
                    weight_sum += w;
                    let src_idx = (sy * src_w + x) * channels;
                    for c in 0..channels {
                        sum[c] += src[src_idx + c] * w;
                    }
                }

                if weight_sum > 0.0 {
                    for c in 0..channels {
                        row[x * channels + c] = sum[c] / weight_sum;
                    }
                } else {
                    let src_idx = (top.min(src_h - 1) * src_w + x) * channels;
                    row[x * channels..(x + 1) * channels]
                        .copy_from_slice(&src[src_idx..src_idx + channels]);
                }
            }
        });

    dst
}

/// Copies `inpainted` into `original` wherever `mask` marks hair.
///
/// All three inputs must share the same extent; the pipeline guarantees it.
pub fn composite_hair(
    original: &ByteImage,
    inpainted: &ByteImage,
    mask: &HairMask,
) -> InpaintResult<ByteImage> {
    mask.ensure_matches(original)?;
    mask.ensure_matches(inpainted)?;
    let channels = original.channels();
    let mut out = original.clone();
    out.data_mut()
        .par_chunks_mut(channels)
        .zip(inpainted.data().par_chunks(channels))
        .zip(mask.data().par_iter())
        .for_each(|((dst, src), &m)| {
            if m != 0 {
                dst.copy_from_slice(src);
            }
        });
    Ok(out)
}
