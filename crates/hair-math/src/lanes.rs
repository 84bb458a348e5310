//! Fixed-width lane groups over an index range.
//!
//! A row of `n` samples is walked in groups of [`LANES`] consecutive
//! indices. The last group usually straddles the end of the range, so every
//! group carries its own [`LaneMask`] computed from the group start and the
//! exclusive end bound. Lanes outside the range must neither be read nor
//! written; [`LaneMask::load`] fills them with zero and [`LaneMask::store`]
//! skips them.
//!
//! # Example
//!
//! ```rust
//! use hair_math::lanes::{LaneGroups, LANES};
//!
//! // Interior columns of a 12-wide row: 1..11
//! let groups: Vec<_> = LaneGroups::new(1, 11).collect();
//! assert_eq!(groups.len(), 2);
//! assert_eq!(groups[0].0, 1);
//! assert!(groups[0].1.is_full());
//! assert_eq!(groups[1].0, 1 + LANES);
//! assert_eq!(groups[1].1.count(), 2);
//! ```

/// Number of lanes per group (`f32x8`).
pub const LANES: usize = 8;

/// Per-lane validity of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneMask {
    valid: [bool; LANES],
}

impl LaneMask {
    /// Mask with every lane enabled.
    pub const FULL: LaneMask = LaneMask { valid: [true; LANES] };

    /// Computes the mask for a group starting at `start` against the
    /// exclusive bound `end`: lane `i` is valid iff `start + i < end`.
    #[inline]
    pub fn from_bounds(start: usize, end: usize) -> Self {
        let mut valid = [false; LANES];
        for (i, v) in valid.iter_mut().enumerate() {
            *v = start + i < end;
        }
        Self { valid }
    }

    /// `true` if lane `lane` may be read and written.
    #[inline]
    pub fn is_valid(&self, lane: usize) -> bool {
        self.valid[lane]
    }

    /// Number of valid lanes.
    #[inline]
    pub fn count(&self) -> usize {
        self.valid.iter().filter(|&&v| v).count()
    }

    /// All lanes valid.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.valid.iter().all(|&v| v)
    }

    /// Gathers `src[offset + i]` for valid lanes, zero elsewhere.
    ///
    /// Invalid lanes never index `src`, so `offset + LANES` may run past the
    /// end of the slice.
    #[inline]
    pub fn load(&self, src: &[f32], offset: usize) -> [f32; LANES] {
        if self.is_full() {
            let mut out = [0.0; LANES];
            out.copy_from_slice(&src[offset..offset + LANES]);
            return out;
        }
        let mut out = [0.0; LANES];
        for (i, o) in out.iter_mut().enumerate() {
            if self.valid[i] {
                *o = src[offset + i];
            }
        }
        out
    }

    /// Writes valid lanes of `values` to `dst[offset + i]`.
    #[inline]
    pub fn store(&self, dst: &mut [f32], offset: usize, values: &[f32; LANES]) {
        if self.is_full() {
            dst[offset..offset + LANES].copy_from_slice(values);
            return;
        }
        for (i, &v) in values.iter().enumerate() {
            if self.valid[i] {
                dst[offset + i] = v;
            }
        }
    }
}

/// Iterator over `(group_start, mask)` pairs covering `start..end`.
#[derive(Debug, Clone)]
pub struct LaneGroups {
    next: usize,
    end: usize,
}

impl LaneGroups {
    /// Groups covering the half-open range `start..end`. Empty when
    /// `start >= end`.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Self { next: start, end }
    }
}

impl Iterator for LaneGroups {
    type Item = (usize, LaneMask);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let start = self.next;
        self.next += LANES;
        Some((start, LaneMask::from_bounds(start, self.end)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end.saturating_sub(self.next).div_ceil(LANES);
        (n, Some(n))
    }
}

impl ExactSizeIterator for LaneGroups {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_from_bounds() {
        let m = LaneMask::from_bounds(5, 8);
        assert_eq!(m.count(), 3);
        assert!(m.is_valid(0) && m.is_valid(2));
        assert!(!m.is_valid(3));
        assert!(LaneMask::from_bounds(0, 8).is_full());
        assert_eq!(LaneMask::from_bounds(9, 8).count(), 0);
    }

    #[test]
    fn test_groups_recompute_mask() {
        // Interior of a 20-wide row: columns 1..19 (18 columns)
        let groups: Vec<_> = LaneGroups::new(1, 19).collect();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0], (1, LaneMask::FULL));
        assert_eq!(groups[1], (9, LaneMask::FULL));
        assert_eq!(groups[2].0, 17);
        assert_eq!(groups[2].1.count(), 2);
        assert_eq!(LaneGroups::new(1, 19).len(), 3);
    }

    #[test]
    fn test_groups_empty() {
        assert_eq!(LaneGroups::new(1, 1).count(), 0);
        assert_eq!(LaneGroups::new(3, 1).count(), 0);
    }

    #[test]
    fn test_partial_load_store_stays_in_bounds() {
        let src = [1.0, 2.0, 3.0];
        let m = LaneMask::from_bounds(1, 3);
        let v = m.load(&src, 1);
        assert_eq!(v, [2.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);

        let mut dst = [0.0f32; 3];
        m.store(&mut dst, 1, &[9.0; LANES]);
        assert_eq!(dst, [0.0, 9.0, 9.0]);
    }

    #[test]
    fn test_full_load_store() {
        let src: Vec<f32> = (0..10).map(|i| i as f32).collect();
        let v = LaneMask::FULL.load(&src, 2);
        assert_eq!(v[0], 2.0);
        assert_eq!(v[7], 9.0);

        let mut dst = vec![0.0f32; 10];
        LaneMask::FULL.store(&mut dst, 1, &v);
        assert_eq!(dst[1], 2.0);
        assert_eq!(dst[8], 9.0);
        assert_eq!(dst[9], 0.0);
    }
}
