//! Benchmark fixtures for the hair inpainting crates.
//!
//! The benchmarks live in `benches/`; this library only builds inputs.

use hair_core::{ByteImage, HairMask, PlanarImage, Result};

/// Skin-toned image with a light gradient.
pub fn skin(width: usize, height: usize) -> Result<ByteImage> {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let v = ((x * 7 + y * 3) % 32) as u8;
            data.extend_from_slice(&[170 + v, 120 + v / 2, 100 + v / 3]);
        }
    }
    ByteImage::from_data(width, height, 3, data)
}

/// Mask with a diagonal strand every 16 columns, three pixels wide.
pub fn strands(width: usize, height: usize) -> Result<HairMask> {
    let data = (0..height)
        .flat_map(|y| (0..width).map(move |x| if (x + y) % 16 < 3 { HairMask::HAIR } else { 0 }))
        .collect();
    HairMask::from_data(width, height, data)
}

/// Mask plane and three-plane masked source matching [`strands`].
pub fn planes(width: usize, height: usize) -> Result<(PlanarImage, PlanarImage)> {
    let hair = strands(width, height)?;
    let mut mask = PlanarImage::filled(width, height, 1, 1.0)?;
    let mut source = PlanarImage::filled(width, height, 3, 0.5)?;
    for y in 0..height {
        for x in 0..width {
            if hair.is_hair(x, y) {
                mask.set(x, y, 0, 0.0);
                for k in 0..3 {
                    source.set(x, y, k, 1.0);
                }
            }
        }
    }
    Ok((mask, source))
}
