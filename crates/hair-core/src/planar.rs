//! Channel-major float buffers.
//!
//! The diffusion solver works on one channel at a time, so its buffers keep
//! all samples of channel 0 first, then channel 1, and so on:
//!
//! ```text
//! Memory: [R R R ... R][G G G ... G][B B B ... B]
//!          <- plane 0 -><- plane 1 -><- plane 2 ->
//! ```
//!
//! Each plane is itself row-major, so `plane[y * width + x]` addresses
//! pixel `(x, y)`.

use rayon::prelude::*;

use crate::image::element_count;
use crate::{Error, Result};

/// Owned planar (channel-major) `f32` image.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarImage {
    data: Vec<f32>,
    width: usize,
    height: usize,
    channels: usize,
}

impl PlanarImage {
    /// Creates a buffer with every sample set to `value`.
    pub fn filled(width: usize, height: usize, channels: usize, value: f32) -> Result<Self> {
        let len = element_count(width, height, channels)?;
        Ok(Self {
            data: vec![value; len],
            width,
            height,
            channels,
        })
    }

    /// Creates a zero-filled buffer.
    pub fn new(width: usize, height: usize, channels: usize) -> Result<Self> {
        Self::filled(width, height, channels, 0.0)
    }

    /// Wraps existing channel-major data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSize`] if `data.len()` is not
    /// `width * height * channels`.
    pub fn from_data(width: usize, height: usize, channels: usize, data: Vec<f32>) -> Result<Self> {
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

    /// Plane width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Plane height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of planes.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Samples per plane (`width * height`).
    #[inline]
    pub fn plane_len(&self) -> usize {
        self.width * self.height
    }

    /// All samples, plane after plane.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable access to all samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Returns plane `k`.
    #[inline]
    pub fn plane(&self, k: usize) -> &[f32] {
        let len = self.plane_len();
        &self.data[k * len..(k + 1) * len]
    }

    /// Sample of channel `k` at `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, k: usize) -> f32 {
        self.data[k * self.plane_len() + y * self.width + x]
    }

    /// Writes the sample of channel `k` at `(x, y)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, k: usize, value: f32) {
        let len = self.plane_len();
        self.data[k * len + y * self.width + x] = value;
    }

    /// Largest absolute per-sample difference between two buffers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSize`] when the buffers differ in length.
    pub fn max_abs_diff(&self, other: &PlanarImage) -> Result<f32> {
        if self.data.len() != other.data.len() {
            return Err(Error::buffer_size(self.data.len(), other.data.len()));
        }
        Ok(self
            .data
            .par_iter()
            .zip(other.data.par_iter())
            .map(|(a, b)| (a - b).abs())
            .reduce(|| 0.0, f32::max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_plane_addressing() {
        let mut img = PlanarImage::new(4, 3, 3).unwrap();
        img.set(1, 2, 2, 0.75);
        assert_eq!(img.plane_len(), 12);
        assert_eq!(img.plane(2)[2 * 4 + 1], 0.75);
        assert_eq!(img.data()[24 + 9], 0.75);
        assert_eq!(img.get(1, 2, 2), 0.75);
        assert_eq!(img.get(1, 2, 1), 0.0);
    }

    #[test]
    fn test_from_data_size_check() {
        assert!(PlanarImage::from_data(2, 2, 1, vec![0.0; 4]).is_ok());
        assert!(PlanarImage::from_data(2, 2, 1, vec![0.0; 5]).is_err());
    }

    #[test]
    fn test_max_abs_diff() {
        let a = PlanarImage::from_data(2, 1, 1, vec![0.25, 0.5]).unwrap();
        let b = PlanarImage::from_data(2, 1, 1, vec![0.5, 0.375]).unwrap();
        assert_abs_diff_eq!(a.max_abs_diff(&b).unwrap(), 0.25);

        let c = PlanarImage::new(3, 1, 1).unwrap();
        assert!(a.max_abs_diff(&c).is_err());
    }
}
