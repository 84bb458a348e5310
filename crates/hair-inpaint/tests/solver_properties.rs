//! Solver-level behavior on hand-built planes.

mod common;

use approx::assert_abs_diff_eq;
use hair_core::PlanarImage;
use hair_inpaint::solver::{solve, solve_with_stats};
use hair_inpaint::{InpaintParams, Kernel, Sweep};

use common::{init_tracing, is_border};

const ALL_VARIANTS: [(Sweep, Kernel); 4] = [
    (Sweep::Sequential, Kernel::Scalar),
    (Sweep::Sequential, Kernel::Vectorized),
    (Sweep::RowParallel, Kernel::Scalar),
    (Sweep::RowParallel, Kernel::Vectorized),
];

/// Planes with a constant background and a hair strip filled with the
/// sentinel `1.0`.
fn strip_planes(width: usize, height: usize, background: f32) -> (PlanarImage, PlanarImage) {
    let mut mask = PlanarImage::filled(width, height, 1, 1.0).unwrap();
    let mut source = PlanarImage::filled(width, height, 1, background).unwrap();
    for y in [2, 3] {
        for x in 1..width - 1 {
            mask.set(x, y, 0, 0.0);
            source.set(x, y, 0, 1.0);
        }
    }
    (mask, source)
}

/// Textured three-plane source with a horizontal hair band.
fn textured_planes(width: usize, height: usize) -> (PlanarImage, PlanarImage) {
    let mut mask = PlanarImage::filled(width, height, 1, 1.0).unwrap();
    let mut source = PlanarImage::new(width, height, 3).unwrap();
    for k in 0..3 {
        for y in 0..height {
            for x in 0..width {
                let v = ((x * 31 + y * 17 + k * 5) % 23) as f32 / 22.0;
                source.set(x, y, k, v);
            }
        }
    }
    let band = height / 2;
    for y in [band - 1, band] {
        for x in 5..width - 5 {
            mask.set(x, y, 0, 0.0);
            for k in 0..3 {
                source.set(x, y, k, 1.0);
            }
        }
    }
    (mask, source)
}

fn params_for(src: &PlanarImage, iters: usize) -> InpaintParams {
    InpaintParams::new(src.width(), src.height(), src.channels(), 1)
        .unwrap()
        .with_iters(iters)
}

#[test]
fn test_center_hair_pixel_fills_monotonically() {
    init_tracing();
    let mut mask = PlanarImage::filled(5, 5, 1, 1.0).unwrap();
    let mut source = PlanarImage::filled(5, 5, 1, 1.0).unwrap();
    mask.set(2, 2, 0, 0.0);
    source.set(2, 2, 0, 0.0);

    let mut prev = 0.0f32;
    for iters in 1..=50 {
        let out = solve(&mask, &source, &params_for(&source, iters)).unwrap();
        let center = out.get(2, 2, 0);
        assert!(center >= prev, "iteration {iters}: {center} < {prev}");
        assert!(center <= 1.0 + 1e-6);
        assert!(out.data().iter().all(|&v| (0.0..=1.0 + 1e-6).contains(&v)));
        prev = center;
    }
    assert_abs_diff_eq!(prev, 1.0, epsilon = 1e-3);
    assert_eq!(hair_core::ChannelRange::new(0, 100).denormalize(prev), 100);
}

#[test]
fn test_trusted_pixel_moves_less_than_hair_pixel() {
    init_tracing();
    for iters in [2, 3, 5, 10, 50] {
        let (mut mask, source) = strip_planes(9, 9, 0.2);
        let params = params_for(&source, iters);

        let trusted = solve(&mask, &source, &params).unwrap().get(4, 4, 0);
        mask.set(4, 4, 0, 0.0);
        let untrusted = solve(&mask, &source, &params).unwrap().get(4, 4, 0);

        let start = source.get(4, 4, 0);
        assert!(
            (trusted - start).abs() < (untrusted - start).abs(),
            "iters {iters}: trusted moved {} vs hair {}",
            (trusted - start).abs(),
            (untrusted - start).abs()
        );
    }
}

#[test]
fn test_border_ring_never_changes() {
    init_tracing();
    let (mask, source) = textured_planes(24, 16);
    for (sweep, kernel) in ALL_VARIANTS {
        let params = params_for(&source, 40).with_sweep(sweep).with_kernel(kernel);
        let out = solve(&mask, &source, &params).unwrap();
        for k in 0..3 {
            for y in 0..16 {
                for x in 0..24 {
                    if is_border(x, y, 24, 16) {
                        assert_eq!(
                            out.get(x, y, k).to_bits(),
                            source.get(x, y, k).to_bits(),
                            "{sweep:?}/{kernel:?} moved border ({x}, {y}, {k})"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_zero_iterations_return_source() {
    let (mask, source) = textured_planes(20, 12);
    for (sweep, kernel) in ALL_VARIANTS {
        let params = params_for(&source, 0).with_sweep(sweep).with_kernel(kernel);
        let (out, stats) = solve_with_stats(&mask, &source, &params).unwrap();
        assert_eq!(out, source);
        assert_eq!(stats.iters, 0);
    }
}

#[test]
fn test_degenerate_plane_is_fixed_point() {
    // Uniform planes with no hair: every update is exactly zero.
    let mask = PlanarImage::filled(13, 9, 1, 1.0).unwrap();
    let source = PlanarImage::filled(13, 9, 3, 0.0).unwrap();
    for (sweep, kernel) in ALL_VARIANTS {
        let params = params_for(&source, 25).with_sweep(sweep).with_kernel(kernel);
        let (out, stats) = solve_with_stats(&mask, &source, &params).unwrap();
        assert_eq!(out, source);
        assert_eq!(stats.max_delta, 0.0);
    }
}

#[test]
fn test_variants_agree_after_many_iterations() {
    init_tracing();
    let (mask, source) = textured_planes(40, 30);
    let reference = solve(&mask, &source, &params_for(&source, 500)).unwrap();
    for (sweep, kernel) in ALL_VARIANTS {
        let params = params_for(&source, 500).with_sweep(sweep).with_kernel(kernel);
        let (out, stats) = solve_with_stats(&mask, &source, &params).unwrap();
        let diff = out.max_abs_diff(&reference).unwrap();
        assert!(diff < 1e-4, "{}/{} differs by {diff}", sweep.name(), kernel.name());
        assert!(stats.max_delta < 1e-4);
    }
}

#[test]
fn test_vectorized_kernel_matches_scalar_bitwise() {
    let (mask, source) = textured_planes(40, 30);
    for sweep in [Sweep::Sequential, Sweep::RowParallel] {
        let scalar = solve(&mask, &source, &params_for(&source, 60).with_sweep(sweep)).unwrap();
        let params = params_for(&source, 60)
            .with_sweep(sweep)
            .with_kernel(Kernel::Vectorized);
        let vector = solve(&mask, &source, &params).unwrap();
        let differing = scalar
            .data()
            .iter()
            .zip(vector.data())
            .filter(|(a, b)| a.to_bits() != b.to_bits())
            .count();
        assert_eq!(differing, 0, "{}", sweep.name());
    }
}

#[test]
fn test_too_narrow_is_noop() {
    let mask = PlanarImage::filled(2, 6, 1, 0.0).unwrap();
    let source = PlanarImage::filled(2, 6, 3, 0.25).unwrap();
    let out = solve(&mask, &source, &params_for(&source, 100)).unwrap();
    assert_eq!(out, source);
}
