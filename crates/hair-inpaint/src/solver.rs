//! Explicit anisotropic heat-diffusion solver.
//!
//! Every iteration updates each interior pixel of each channel plane with
//!
//! ```text
//! u' = u + dt * (up + down + left + right - cw * u) - dt * m * (u - o)
//! ```
//!
//! where `m` is the float mask (1 on trusted pixels, 0 on hair) and `o` the
//! masked-source value. The outer ring of every plane is never written and
//! acts as a fixed Dirichlet boundary.
//!
//! # Update order
//!
//! With [`Sweep::Sequential`] rows are swept top to bottom in place, so a
//! pixel sees this iteration's values for the row above and its left
//! neighbor, and last iteration's values for the row below and its right
//! neighbor. This order is the reference behavior. Both
//! [`Kernel`](crate::Kernel) variants follow it exactly and give
//! bit-identical results.
//!
//! [`Sweep::RowParallel`] hands each row to its own rayon task. To keep the
//! result deterministic the up/down neighbor rows are read from a snapshot
//! taken at the start of the iteration; within a row the update is still in
//! place. The result converges to the same fixed point but differs
//! numerically from the sequential sweep along the way.
//!
//! Channel planes are independent and are always solved concurrently.
//!
//! # Example
//!
//! ```rust
//! use hair_core::{ByteImage, HairMask};
//! use hair_inpaint::{normalize::normalize, solver::solve, InpaintParams};
//!
//! let img = ByteImage::filled(8, 8, &[120, 80, 60]).unwrap();
//! let mut mask = HairMask::new(8, 8).unwrap();
//! mask.set_hair(4, 4, true);
//!
//! let mut params = InpaintParams::new(8, 8, 3, 1).unwrap().with_iters(20);
//! let planes = normalize(&img, &mask, &mut params).unwrap();
//! let solution = solve(&planes.mask, &planes.masked_source, &params).unwrap();
//! assert_eq!(solution.data().len(), params.cn_elements());
//! ```

use hair_core::PlanarImage;
use hair_math::{DiffusionCoeffs, RowInputs};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::params::RowKernel;
use crate::{InpaintError, InpaintParams, InpaintResult, Sweep};

/// Convergence summary of a solver run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SolveStats {
    /// Iterations actually performed (0 when there is no interior).
    pub iters: usize,
    /// Largest absolute change of any sample during the last iteration.
    pub max_delta: f32,
}

/// Runs the solver and returns the new solution buffer.
///
/// `masked_source` is left untouched; the returned buffer is a fresh copy
/// that received all updates and is owned by the caller.
///
/// Images narrower or shorter than three pixels have no interior. They,
/// like `params.iters == 0`, yield an unchanged copy of `masked_source`.
///
/// # Errors
///
/// Fails when the planes disagree with each other or with `params`.
pub fn solve(
    mask: &PlanarImage,
    masked_source: &PlanarImage,
    params: &InpaintParams,
) -> InpaintResult<PlanarImage> {
    solve_with_stats(mask, masked_source, params).map(|(solution, _)| solution)
}

/// Like [`solve`], also reporting [`SolveStats`].
pub fn solve_with_stats(
    mask: &PlanarImage,
    masked_source: &PlanarImage,
    params: &InpaintParams,
) -> InpaintResult<(PlanarImage, SolveStats)> {
    check_inputs(mask, masked_source, params)?;

    let width = masked_source.width();
    let height = masked_source.height();
    let mut solution = masked_source.clone();

    trace!(
        width,
        height,
        channels = masked_source.channels(),
        iters = params.iters,
        sweep = ?params.sweep,
        kernel = ?params.kernel,
        "solve"
    );

    if params.iters == 0 || width < 3 || height < 3 {
        return Ok((solution, SolveStats::default()));
    }

    let plane_len = width * height;
    let grid = Grid {
        width,
        height,
        mask: mask.data(),
        coeffs: params.coeffs(),
        kernel: params.kernel.row_kernel(),
    };
    let iters = params.iters;
    let sweep = params.sweep;

    let max_delta = solution
        .data_mut()
        .par_chunks_mut(plane_len)
        .zip(masked_source.data().par_chunks(plane_len))
        .map(|(plane, source)| grid.run(plane, source, iters, sweep))
        .reduce(|| 0.0, f32::max);

    debug!(iters, max_delta, "Diffusion finished");
    Ok((solution, SolveStats { iters, max_delta }))
}

fn check_inputs(
    mask: &PlanarImage,
    masked_source: &PlanarImage,
    params: &InpaintParams,
) -> InpaintResult<()> {
    params.validate()?;
    if mask.channels() != 1 {
        return Err(InpaintError::ParamsMismatch(format!(
            "mask must have 1 plane, got {}",
            mask.channels()
        )));
    }
    let dims = (masked_source.width(), masked_source.height());
    if (mask.width(), mask.height()) != dims {
        return Err(hair_core::Error::dimension_mismatch(dims, (mask.width(), mask.height())).into());
    }
    if dims != (params.width(), params.height()) {
        return Err(hair_core::Error::dimension_mismatch((params.width(), params.height()), dims).into());
    }
    if masked_source.channels() != params.channels() {
        return Err(InpaintError::ParamsMismatch(format!(
            "source has {} planes, parameters expect {}",
            masked_source.channels(),
            params.channels()
        )));
    }
    Ok(())
}

/// Shared, read-only state of one solver run.
struct Grid<'a> {
    width: usize,
    height: usize,
    mask: &'a [f32],
    coeffs: DiffusionCoeffs,
    kernel: RowKernel,
}

impl Grid<'_> {
    /// Iterates one channel plane; returns the last iteration's max delta.
    fn run(&self, plane: &mut [f32], source: &[f32], iters: usize, sweep: Sweep) -> f32 {
        let mut last = 0.0;
        match sweep {
            Sweep::Sequential => {
                for _ in 0..iters {
                    last = self.sweep_sequential(plane, source);
                }
            }
            Sweep::RowParallel => {
                let mut snapshot = vec![0.0f32; plane.len()];
                for _ in 0..iters {
                    snapshot.copy_from_slice(plane);
                    last = self.sweep_rows_parallel(plane, &snapshot, source);
                }
            }
        }
        last
    }

    fn sweep_sequential(&self, plane: &mut [f32], source: &[f32]) -> f32 {
        let w = self.width;
        let mut max_delta = 0.0f32;
        for y in 1..self.height - 1 {
            let (above, rest) = plane.split_at_mut(y * w);
            let (row, below) = rest.split_at_mut(w);
            let inputs = RowInputs {
                up: &above[(y - 1) * w..],
                down: &below[..w],
                mask: &self.mask[y * w..(y + 1) * w],
                source: &source[y * w..(y + 1) * w],
            };
            max_delta = max_delta.max((self.kernel)(row, inputs, self.coeffs));
        }
        max_delta
    }

    fn sweep_rows_parallel(&self, plane: &mut [f32], snapshot: &[f32], source: &[f32]) -> f32 {
        let w = self.width;
        plane[w..(self.height - 1) * w]
            .par_chunks_mut(w)
            .enumerate()
            .map(|(i, row)| {
                let y = i + 1;
                let inputs = RowInputs {
                    up: &snapshot[(y - 1) * w..y * w],
                    down: &snapshot[(y + 1) * w..(y + 2) * w],
                    mask: &self.mask[y * w..(y + 1) * w],
                    source: &source[y * w..(y + 1) * w],
                };
                (self.kernel)(row, inputs, self.coeffs)
            })
            .reduce(|| 0.0, f32::max)
    }
}
