//! Shared fixtures for hair-inpaint integration tests.

#![allow(dead_code)]

use hair_core::{ByteImage, HairMask};
use tracing_subscriber::EnvFilter;

/// Installs a `RUST_LOG`-driven subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Deterministic per-pixel hash in `0..256`.
fn hash(x: usize, y: usize, salt: usize) -> u8 {
    let mut h = (x as u32).wrapping_mul(0x9E37_79B1)
        ^ (y as u32).wrapping_mul(0x85EB_CA77)
        ^ (salt as u32).wrapping_mul(0xC2B2_AE3D);
    h ^= h >> 15;
    h = h.wrapping_mul(0x2C1B_3C6D);
    h ^= h >> 12;
    (h & 0xFF) as u8
}

/// Skin-like texture: a warm base with mild per-pixel noise.
pub fn skin_image(width: usize, height: usize) -> ByteImage {
    let mut img = ByteImage::new(width, height, 3).unwrap();
    for y in 0..height {
        for x in 0..width {
            let n = hash(x, y, 1) / 8;
            img.set_pixel(x, y, &[170 + n, 120 + n / 2, 100 + n / 3]);
        }
    }
    img
}

/// Noise image covering the full byte range in every channel.
pub fn noise_image(width: usize, height: usize, channels: usize) -> ByteImage {
    let mut data = Vec::with_capacity(width * height * channels);
    for y in 0..height {
        for x in 0..width {
            for k in 0..channels {
                data.push(hash(x, y, k + 7));
            }
        }
    }
    ByteImage::from_data(width, height, channels, data).unwrap()
}

/// Random-looking mask with roughly `percent`% hair, borders included.
pub fn noise_mask(width: usize, height: usize, percent: u8) -> HairMask {
    let threshold = percent as u32 * 256 / 100;
    let data = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| if (hash(x, y, 99) as u32) < threshold { 255 } else { 0 })
        })
        .collect();
    HairMask::from_data(width, height, data).unwrap()
}

/// Dark diagonal strand, two pixels thick, painted into `img` and marked in
/// the returned mask.
pub fn paint_strand(img: &mut ByteImage) -> HairMask {
    let (w, h) = img.dimensions();
    let mut mask = HairMask::new(w, h).unwrap();
    let dark = vec![30u8; img.channels()];
    for i in 2..w.min(h) - 2 {
        for (x, y) in [(i, i), (i + 1, i)] {
            if x < w - 1 {
                img.set_pixel(x, y, &dark);
                mask.set_hair(x, y, true);
            }
        }
    }
    mask
}

/// `true` for the outer ring of a `width` x `height` grid.
pub fn is_border(x: usize, y: usize, width: usize, height: usize) -> bool {
    x == 0 || y == 0 || x == width - 1 || y == height - 1
}
