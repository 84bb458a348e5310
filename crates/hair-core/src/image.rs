//! Interleaved byte images and binary hair masks.
//!
//! These are the two buffers exchanged with the outside world:
//! - [`ByteImage`] - 8-bit, channel-interleaved source and result images
//! - [`HairMask`] - one byte per pixel, nonzero marks a hair pixel
//!
//! # Memory Layout
//!
//! Both store pixels in **row-major** order, top-to-bottom. Image channels are
//! interleaved per pixel:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! # Usage
//!
//! ```rust
//! use hair_core::{ByteImage, HairMask};
//!
//! let mut img = ByteImage::new(64, 48, 3).unwrap();
//! img.set_pixel(10, 10, &[200, 120, 90]);
//! assert_eq!(img.pixel(10, 10), &[200, 120, 90]);
//!
//! let mut mask = HairMask::new(64, 48).unwrap();
//! mask.set_hair(10, 10, true);
//! assert!(mask.is_hair(10, 10));
//! ```

use crate::{Error, Result, MAX_CHANNELS, MIN_CHANNELS};

/// Validates image dimensions and returns the total element count.
///
/// Fails for zero extents, channel counts outside
/// [`MIN_CHANNELS`]`..=`[`MAX_CHANNELS`], and element counts that overflow.
pub fn element_count(width: usize, height: usize, channels: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            "width and height must be > 0",
        ));
    }
    if !(MIN_CHANNELS..=MAX_CHANNELS).contains(&channels) {
        return Err(Error::unsupported_channels(channels));
    }
    width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "image dimensions overflow"))
}

/// Owned 8-bit image with interleaved channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
    channels: usize,
}

impl ByteImage {
    /// Creates a zero-filled image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for empty or overflowing extents
    /// and [`Error::UnsupportedChannels`] for unsupported channel counts.
    pub fn new(width: usize, height: usize, channels: usize) -> Result<Self> {
        let len = element_count(width, height, channels)?;
        Ok(Self {
            data: vec![0; len],
            width,
            height,
            channels,
        })
    }

    /// Wraps existing interleaved pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSize`] if `data.len()` is not
    /// `width * height * channels`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hair_core::ByteImage;
    ///
    /// let img = ByteImage::from_data(2, 1, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(img.pixel(1, 0), &[4, 5, 6]);
    /// assert!(ByteImage::from_data(2, 1, 3, vec![0; 5]).is_err());
    /// ```
    pub fn from_data(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        let expected = element_count(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::buffer_size(expected, data.len()));
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Creates an image with every pixel set to `value`.
    pub fn filled(width: usize, height: usize, value: &[u8]) -> Result<Self> {
        let mut img = Self::new(width, height, value.len())?;
        for px in img.data.chunks_exact_mut(value.len()) {
            px.copy_from_slice(value);
        }
        Ok(img)
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Channels per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// `(width, height)` pair.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw interleaved samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Returns the channel values of pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let idx = (y * self.width + x) * self.channels;
        &self.data[idx..idx + self.channels]
    }

    /// Overwrites pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image or `value` has the wrong
    /// channel count.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, value: &[u8]) {
        let idx = (y * self.width + x) * self.channels;
        self.data[idx..idx + self.channels].copy_from_slice(value);
    }
}

/// Binary hair mask, one byte per pixel.
///
/// Nonzero bytes mark hair. The mask is produced by the detection stage and
/// only read by the inpainting engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HairMask {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl HairMask {
    /// Byte written by [`set_hair`](Self::set_hair) for hair pixels.
    pub const HAIR: u8 = 255;

    /// Creates an empty (hair-free) mask.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = element_count(width, height, 1)?;
        Ok(Self {
            data: vec![0; len],
            width,
            height,
        })
    }

    /// Wraps an existing single-channel mask buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSize`] if `data.len() != width * height`.
    pub fn from_data(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = element_count(width, height, 1)?;
        if data.len() != expected {
            return Err(Error::buffer_size(expected, data.len()));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Mask width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mask height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)` pair.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Raw mask bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns `true` when pixel `(x, y)` is marked as hair.
    #[inline]
    pub fn is_hair(&self, x: usize, y: usize) -> bool {
        self.data[y * self.width + x] != 0
    }

    /// Marks or clears pixel `(x, y)`.
    #[inline]
    pub fn set_hair(&mut self, x: usize, y: usize, hair: bool) {
        self.data[y * self.width + x] = if hair { Self::HAIR } else { 0 };
    }

    /// Number of hair pixels.
    pub fn hair_count(&self) -> usize {
        self.data.iter().filter(|&&b| b != 0).count()
    }

    /// Fails with [`Error::DimensionMismatch`] unless the mask covers `image`
    /// exactly.
    pub fn ensure_matches(&self, image: &ByteImage) -> Result<()> {
        if self.dimensions() != image.dimensions() {
            return Err(Error::dimension_mismatch(
                image.dimensions(),
                self.dimensions(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_count() {
        assert_eq!(element_count(4, 3, 3).unwrap(), 36);
        assert!(element_count(0, 3, 3).is_err());
        assert!(element_count(4, 3, 0).is_err());
        assert!(element_count(4, 3, 5).is_err());
        assert!(element_count(usize::MAX, 2, 3).is_err());
    }

    #[test]
    fn test_pixel_access() {
        let mut img = ByteImage::new(3, 2, 3).unwrap();
        img.set_pixel(2, 1, &[7, 8, 9]);
        assert_eq!(img.pixel(2, 1), &[7, 8, 9]);
        assert_eq!(&img.data()[15..18], &[7, 8, 9]);
    }

    #[test]
    fn test_filled() {
        let img = ByteImage::filled(2, 2, &[10, 20, 30]).unwrap();
        assert_eq!(img.data(), &[10, 20, 30, 10, 20, 30, 10, 20, 30, 10, 20, 30]);
    }

    #[test]
    fn test_from_data_size_check() {
        let err = ByteImage::from_data(2, 2, 3, vec![0; 11]).unwrap_err();
        assert_eq!(err, Error::buffer_size(12, 11));
    }

    #[test]
    fn test_mask_matches_image() {
        let img = ByteImage::new(8, 6, 3).unwrap();
        let mut mask = HairMask::new(8, 6).unwrap();
        assert!(mask.ensure_matches(&img).is_ok());

        mask.set_hair(3, 4, true);
        assert!(mask.is_hair(3, 4));
        assert_eq!(mask.hair_count(), 1);

        let other = HairMask::new(6, 8).unwrap();
        assert!(other.ensure_matches(&img).unwrap_err().is_dimension_error());
    }

    #[test]
    fn test_mask_nonzero_is_hair() {
        let mask = HairMask::from_data(3, 1, vec![0, 1, 200]).unwrap();
        assert!(!mask.is_hair(0, 0));
        assert!(mask.is_hair(1, 0));
        assert!(mask.is_hair(2, 0));
    }
}
