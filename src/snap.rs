//! Beat-snap quantization state.
//!
//! The editor keeps a single current snap fraction, steps it through the
//! common values with its keyboard shortcuts, and uses it to quantize
//! scroll-by-snap movement and to classify gridlines.

use crate::timeline::{BEATS_PER_MEASURE, Beat};
use crate::{ChartError, Result};

/// Snap fractions of a measure commonly offered by editors, coarse to fine.
pub const COMMON_SNAPS: [f64; 10] = [
    1.0 / 4.0,
    1.0 / 8.0,
    1.0 / 12.0,
    1.0 / 16.0,
    1.0 / 24.0,
    1.0 / 32.0,
    1.0 / 48.0,
    1.0 / 64.0,
    1.0 / 96.0,
    1.0 / 192.0,
];

/// The current snap fraction of a measure.
///
/// The value is usually one of [`COMMON_SNAPS`] but any positive fraction can
/// be set directly; stepping then re-enters the common list at the nearest
/// value's neighbor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeatSnap {
    fraction: f64,
}

impl Default for BeatSnap {
    fn default() -> Self {
        Self {
            fraction: COMMON_SNAPS[0],
        }
    }
}

impl BeatSnap {
    /// Create a snap state with the given fraction.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvalidArgument`] when `fraction` is zero,
    /// negative or not finite.
    pub fn new(fraction: f64) -> Result<Self> {
        let mut snap = Self::default();
        snap.set(fraction)?;
        Ok(snap)
    }

    /// Replace the current fraction.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvalidArgument`] when `fraction` is zero,
    /// negative or not finite.
    pub fn set(&mut self, fraction: f64) -> Result<()> {
        if !(fraction.is_finite() && fraction > 0.0) {
            return Err(ChartError::InvalidArgument(format!(
                "snap fraction must be a positive finite number, got {fraction}"
            )));
        }
        self.fraction = fraction;
        Ok(())
    }

    /// The current fraction of a measure.
    #[must_use]
    pub fn fraction(self) -> f64 {
        self.fraction
    }

    /// Index of the common snap value closest to the current fraction, ties
    /// going to the earlier (coarser) entry.
    #[must_use]
    pub fn nearest_common_index(self) -> usize {
        COMMON_SNAPS
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let da = (*a - self.fraction).abs();
                let db = (*b - self.fraction).abs();
                da.partial_cmp(&db).expect("snap distances are finite")
            })
            .map(|(index, _)| index)
            .expect("COMMON_SNAPS is non-empty")
    }

    /// Step to the next (finer) common snap value; a no-op at the finest.
    pub fn next_snap(&mut self) {
        let reference = self
            .exact_common_index()
            .unwrap_or_else(|| self.nearest_common_index());
        let index = (reference + 1).min(COMMON_SNAPS.len() - 1);
        self.fraction = COMMON_SNAPS[index];
    }

    /// Step to the previous (coarser) common snap value; a no-op at the
    /// coarsest.
    pub fn prev_snap(&mut self) {
        let reference = self
            .exact_common_index()
            .unwrap_or_else(|| self.nearest_common_index());
        let index = reference.saturating_sub(1);
        self.fraction = COMMON_SNAPS[index];
    }

    /// The snap expressed as a beat delta: fraction of a measure times the
    /// measure length.
    #[must_use]
    pub fn to_beat(self) -> Beat {
        Beat::new(self.fraction * BEATS_PER_MEASURE)
            .expect("positive fraction times the measure length is positive")
    }

    /// The nearest beat on the snap grid.
    #[must_use]
    pub fn quantize(self, beat: Beat) -> Beat {
        let step = self.to_beat().as_f64();
        Beat::new((beat.as_f64() / step).round() * step)
            .expect("rounded multiple of a positive step is non-negative")
    }

    fn exact_common_index(self) -> Option<usize> {
        COMMON_SNAPS.iter().position(|&snap| snap == self.fraction)
    }
}
