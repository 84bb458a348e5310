//! Per-channel intensity ranges.
//!
//! Normalization maps a channel's observed `[min, max]` byte interval onto
//! `[0, 1]`, and denormalization maps it back. Both directions must use the
//! very same [`ChannelRange`] or colors shift, so the conversion math lives
//! here next to the range itself.
//!
//! A range starts out as [`ChannelRange::EMPTY`] (min 255, max 0) and grows
//! as samples are observed. Once anything has been observed `min <= max`
//! holds.
//!
//! # Example
//!
//! ```rust
//! use hair_core::ChannelRange;
//!
//! let mut r = ChannelRange::EMPTY;
//! for v in [40u8, 90, 140] {
//!     r.observe(v);
//! }
//! assert_eq!((r.min, r.max), (40, 140));
//! assert_eq!(r.normalize(90), 0.5);
//! assert_eq!(r.denormalize(0.5), 90);
//! ```

/// Added before truncating a denormalized value so that exact byte levels
/// reconstructed through `f32` never land one step low.
const TRUNCATION_BIAS: f32 = 1.0e-3;

/// Observed `[min, max]` byte interval of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelRange {
    /// Smallest observed value.
    pub min: u8,
    /// Largest observed value.
    pub max: u8,
}

impl Default for ChannelRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl ChannelRange {
    /// Sentinel extremes: nothing observed yet.
    pub const EMPTY: ChannelRange = ChannelRange { min: u8::MAX, max: u8::MIN };

    /// Creates a range from explicit bounds.
    #[inline]
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// `true` until at least one sample has been observed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Widens the range to include `value`.
    #[inline]
    pub fn observe(&mut self, value: u8) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Merges another accumulator into this one.
    #[inline]
    pub fn merge(self, other: ChannelRange) -> ChannelRange {
        ChannelRange {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// `max - min`, or 0 for an empty range.
    #[inline]
    pub fn span(&self) -> u8 {
        self.max.saturating_sub(self.min)
    }

    /// Zero dynamic range: every observed sample had the same value.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.span() == 0
    }

    /// Maps a byte into `[0, 1]` relative to this range.
    ///
    /// A degenerate range maps every value to `0.0` instead of dividing by
    /// zero.
    #[inline]
    pub fn normalize(&self, value: u8) -> f32 {
        let span = self.span();
        if span == 0 {
            return 0.0;
        }
        (value as f32 - self.min as f32) / span as f32
    }

    /// Maps a normalized value back to a byte, truncating toward zero.
    ///
    /// Results outside the byte range saturate. A degenerate range returns
    /// its constant `min` whatever the input, so float noise is never
    /// amplified.
    #[inline]
    pub fn denormalize(&self, value: f32) -> u8 {
        let span = self.span();
        if span == 0 {
            return self.min;
        }
        let v = span as f32 * value + self.min as f32;
        // `as` saturates and maps NaN to 0
        (v + TRUNCATION_BIAS).trunc() as u8
    }
}
