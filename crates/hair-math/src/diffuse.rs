//! Explicit heat-diffusion update, scalar and 8-wide.
//!
//! One update of a sample `c` with axis neighbors `u`, `d`, `l`, `r`, float
//! mask `m` and masked-source value `o`:
//!
//! ```text
//! c' = c + dt * (u + d + l + r - cw * c) - dt * m * (c - o)
//! ```
//!
//! The first term spreads values from the neighborhood, the second pulls
//! the sample back toward `o` in proportion to `m`.
//!
//! Both kernels evaluate the expression in the same operation order,
//! `c + dt*((l + (r + (u + d))) - cw*c) - dt*(m*(c - o))`, with no fused
//! multiply-add. The left neighbor enters last, so [`step_terms_x8`] can
//! compute everything else for eight lanes at once and [`finish`] adds the
//! freshly updated left value lane by lane.
//!
//! # Row kernels
//!
//! [`diffuse_row`] and [`diffuse_row_x8`] update the interior columns
//! `1..width-1` of one row in place, walking left to right. Columns `0` and
//! `width-1` are never read as centers nor written. Every sample sees its
//! already-updated left neighbor and the not-yet-updated right neighbor, so
//! the two kernels produce bit-identical rows.

use wide::f32x8;

use crate::lanes::{LaneGroups, LANES};

/// Time step and decay coefficient of the update rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffusionCoeffs {
    /// Explicit time step.
    pub dt: f32,
    /// Diffusion/decay coefficient applied to the center sample.
    pub cw: f32,
}

impl DiffusionCoeffs {
    /// Creates a coefficient pair.
    #[inline]
    pub const fn new(dt: f32, cw: f32) -> Self {
        Self { dt, cw }
    }
}

/// Borrowed rows feeding one row update.
///
/// `up` and `down` are the neighbor rows of the working plane, `mask` the
/// float mask row and `source` the masked-source row. All must be at least
/// as long as the row being updated.
#[derive(Debug, Clone, Copy)]
pub struct RowInputs<'a> {
    /// Row above.
    pub up: &'a [f32],
    /// Row below.
    pub down: &'a [f32],
    /// Fidelity weight row (0 on hair, 1 on trusted skin).
    pub mask: &'a [f32],
    /// Masked-source row.
    pub source: &'a [f32],
}

/// Left-independent terms of the update for eight lanes.
#[derive(Debug, Clone, Copy)]
pub struct StepTerms {
    /// `r + (u + d)`
    pub neighbors: [f32; LANES],
    /// `cw * c`
    pub decay: [f32; LANES],
    /// `dt * (m * (c - o))`
    pub fidelity: [f32; LANES],
}

/// Completes one update once the left neighbor is known.
#[inline(always)]
pub fn finish(c: f32, l: f32, neighbors: f32, decay: f32, fidelity: f32, dt: f32) -> f32 {
    c + dt * ((l + neighbors) - decay) - fidelity
}

/// Scalar update of one sample.
#[inline(always)]
#[allow(clippy::too_many_arguments)]
pub fn step(c: f32, u: f32, d: f32, l: f32, r: f32, m: f32, o: f32, k: DiffusionCoeffs) -> f32 {
    finish(c, l, r + (u + d), k.cw * c, k.dt * (m * (c - o)), k.dt)
}

/// Eight-lane evaluation of every term that does not depend on `l`.
#[inline(always)]
pub fn step_terms_x8(
    c: f32x8,
    u: f32x8,
    d: f32x8,
    r: f32x8,
    m: f32x8,
    o: f32x8,
    k: DiffusionCoeffs,
) -> StepTerms {
    let dt = f32x8::splat(k.dt);
    let cw = f32x8::splat(k.cw);
    StepTerms {
        neighbors: (r + (u + d)).to_array(),
        decay: (cw * c).to_array(),
        fidelity: (dt * (m * (c - o))).to_array(),
    }
}

/// Updates the interior of `row` in place, one sample at a time.
///
/// Returns the largest absolute change applied to any sample. Rows shorter
/// than three samples have no interior and are left untouched.
pub fn diffuse_row(row: &mut [f32], inputs: RowInputs<'_>, k: DiffusionCoeffs) -> f32 {
    let width = row.len();
    if width < 3 {
        return 0.0;
    }
    let mut max_delta = 0.0f32;
    for x in 1..width - 1 {
        let c = row[x];
        let next = step(
            c,
            inputs.up[x],
            inputs.down[x],
            row[x - 1],
            row[x + 1],
            inputs.mask[x],
            inputs.source[x],
            k,
        );
        row[x] = next;
        max_delta = max_delta.max((next - c).abs());
    }
    max_delta
}

/// Updates the interior of `row` in place, [`LANES`] samples per group.
///
/// Each group's lane mask is recomputed against the last interior column,
/// so lanes that would spill onto column `width-1` or past the row neither
/// read nor write. The left-independent terms are computed on the whole
/// group, then the lanes are finished in order, each taking the previous
/// lane's new value as its left neighbor. Returns the largest absolute
/// change over valid lanes.
pub fn diffuse_row_x8(row: &mut [f32], inputs: RowInputs<'_>, k: DiffusionCoeffs) -> f32 {
    let width = row.len();
    if width < 3 {
        return 0.0;
    }
    let mut max_delta = 0.0f32;
    for (x, lanes) in LaneGroups::new(1, width - 1) {
        let c = lanes.load(row, x);
        let terms = step_terms_x8(
            f32x8::from(c),
            f32x8::from(lanes.load(inputs.up, x)),
            f32x8::from(lanes.load(inputs.down, x)),
            f32x8::from(lanes.load(row, x + 1)),
            f32x8::from(lanes.load(inputs.mask, x)),
            f32x8::from(lanes.load(inputs.source, x)),
            k,
        );

        let mut out = c;
        let mut left = row[x - 1];
        // Valid lanes form a prefix of the group
        for i in (0..LANES).take_while(|&i| lanes.is_valid(i)) {
            let next = finish(c[i], left, terms.neighbors[i], terms.decay[i], terms.fidelity[i], k.dt);
            max_delta = max_delta.max((next - c[i]).abs());
            out[i] = next;
            left = next;
        }
        lanes.store(row, x, &out);
    }
    max_delta
}
