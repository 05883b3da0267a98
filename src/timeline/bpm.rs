//! BPM breakpoints and the authoritative beat-to-time conversion map.

use itertools::Itertools;
use strict_num_extended::PositiveF64;

use super::time::{Beat, Time};
use crate::{ChartError, Result};

/// A tempo in beats per minute. Always strictly positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bpm(PositiveF64);

impl Bpm {
    /// The conventional 120 BPM default tempo.
    pub const DEFAULT: Self = Self(PositiveF64::new_const(120.0));

    /// Create a new `Bpm`.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvalidArgument`] when `value` is zero, negative
    /// or not finite.
    pub fn new(value: f64) -> Result<Self> {
        PositiveF64::new(value).map(Self).map_err(|_| {
            ChartError::InvalidArgument(format!(
                "tempo must be a positive finite number of beats per minute, got {value}"
            ))
        })
    }

    /// Returns the contained tempo value.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.0.as_f64()
    }

    /// How many beats elapse per second at this tempo.
    #[must_use]
    pub fn beats_per_second(self) -> f64 {
        self.as_f64() / 60.0
    }

    /// How many seconds one beat lasts at this tempo.
    #[must_use]
    pub fn seconds_per_beat(self) -> f64 {
        60.0 / self.as_f64()
    }
}

impl Default for Bpm {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for Bpm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} BPM", self.as_f64())
    }
}

/// A tempo breakpoint: from `beat` onward the chart runs at `bpm`, until the
/// next breakpoint takes over.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BpmPoint {
    /// The beat this tempo takes effect at.
    pub beat: Beat,
    /// The tempo in effect from [`Self::beat`] onward.
    pub bpm: Bpm,
}

impl BpmPoint {
    /// Create a new breakpoint.
    #[must_use]
    pub const fn new(beat: Beat, bpm: Bpm) -> Self {
        Self { beat, bpm }
    }
}

/// The ordered sequence of tempo breakpoints owned by a chart.
///
/// Invariants: the list is never empty, the first breakpoint sits at beat 0,
/// and beats are strictly ascending. Both conversion directions walk the list
/// linearly; breakpoints number in the tens, so no cached index is kept and
/// tempo edits can never leave a stale acceleration structure behind.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BpmMap {
    points: Vec<BpmPoint>,
}

impl Default for BpmMap {
    fn default() -> Self {
        Self {
            points: vec![BpmPoint::new(Beat::ZERO, Bpm::DEFAULT)],
        }
    }
}

impl BpmMap {
    /// Create a map from a breakpoint list.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvalidArgument`] when the list is empty, the
    /// first breakpoint is not at beat 0, or beats are not strictly ascending.
    pub fn new(points: Vec<BpmPoint>) -> Result<Self> {
        Self::validate(&points)?;
        Ok(Self { points })
    }

    /// Replace the entire breakpoint list.
    ///
    /// # Errors
    ///
    /// Same validation as [`BpmMap::new`]; on error the previous list is kept.
    pub fn set_points(&mut self, points: Vec<BpmPoint>) -> Result<()> {
        Self::validate(&points)?;
        self.points = points;
        Ok(())
    }

    /// Insert a breakpoint, keeping the list ordered by beat.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvalidArgument`] when a breakpoint already
    /// exists at the same beat.
    pub fn push(&mut self, point: BpmPoint) -> Result<()> {
        match self
            .points
            .binary_search_by(|existing| existing.beat.cmp(&point.beat))
        {
            Ok(_) => Err(ChartError::InvalidArgument(format!(
                "a BPM breakpoint already exists at beat {}",
                point.beat
            ))),
            Err(slot) => {
                self.points.insert(slot, point);
                Ok(())
            }
        }
    }

    /// Replace the breakpoint at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::OutOfRange`] when `index` is out of bounds, and
    /// [`ChartError::InvalidArgument`] when the replacement would break the
    /// ordering invariants; in both cases the map is left unchanged.
    pub fn update(&mut self, index: usize, point: BpmPoint) -> Result<()> {
        let len = self.points.len();
        let Some(slot) = self.points.get_mut(index) else {
            return Err(ChartError::OutOfRange { index, len });
        };
        let previous = std::mem::replace(slot, point);
        if let Err(err) = Self::validate(&self.points) {
            if let Some(slot) = self.points.get_mut(index) {
                *slot = previous;
            }
            return Err(err);
        }
        Ok(())
    }

    /// The current breakpoint list, ascending by beat.
    #[must_use]
    pub fn points(&self) -> &[BpmPoint] {
        &self.points
    }

    /// The wall-clock time at which `beat` is reached.
    ///
    /// Walks the breakpoints in order, accumulating the span of every fully
    /// traversed segment; the final open-ended segment extends the last tempo
    /// to all beats beyond it. Monotonically non-decreasing in `beat`.
    #[must_use]
    pub fn time_at(&self, beat: Beat) -> Time {
        let mut seconds = 0.0;
        for (point, next) in self.points.iter().tuple_windows() {
            if beat <= next.beat {
                seconds += (beat.as_f64() - point.beat.as_f64()) * point.bpm.seconds_per_beat();
                return Time::new(seconds).expect("sum of non-negative segment spans");
            }
            seconds += (next.beat.as_f64() - point.beat.as_f64()) * point.bpm.seconds_per_beat();
        }
        let last = self.last_point();
        seconds += (beat.as_f64() - last.beat.as_f64()).max(0.0) * last.bpm.seconds_per_beat();
        Time::new(seconds).expect("sum of non-negative segment spans")
    }

    /// The beat reached at wall-clock time `time`. Exact algebraic inverse of
    /// [`BpmMap::time_at`] up to floating-point tolerance.
    #[must_use]
    pub fn beat_at(&self, time: Time) -> Beat {
        let target = time.as_f64();
        let mut elapsed = 0.0;
        for (point, next) in self.points.iter().tuple_windows() {
            let span = (next.beat.as_f64() - point.beat.as_f64()) * point.bpm.seconds_per_beat();
            if target <= elapsed + span {
                // Clamp the residue: `target` may undershoot `elapsed` by a few ulps.
                let offset = (target - elapsed).max(0.0);
                let beat = point.beat.as_f64() + offset * point.bpm.beats_per_second();
                return Beat::new(beat).expect("beat solved within a non-negative segment");
            }
            elapsed += span;
        }
        let last = self.last_point();
        let offset = (target - elapsed).max(0.0);
        Beat::new(last.beat.as_f64() + offset * last.bpm.beats_per_second())
            .expect("beat solved beyond the last breakpoint")
    }

    /// The tempo in effect at `beat`.
    #[must_use]
    pub fn bpm_at(&self, beat: Beat) -> Bpm {
        self.points
            .iter()
            .take_while(|point| point.beat <= beat)
            .last()
            .expect("first breakpoint sits at beat 0")
            .bpm
    }

    fn last_point(&self) -> &BpmPoint {
        self.points.last().expect("map is never empty")
    }

    fn validate(points: &[BpmPoint]) -> Result<()> {
        let Some(first) = points.first() else {
            return Err(ChartError::InvalidArgument(
                "a BPM map needs at least one breakpoint".into(),
            ));
        };
        if first.beat != Beat::ZERO {
            return Err(ChartError::InvalidArgument(format!(
                "the first BPM breakpoint must sit at beat 0, got beat {}",
                first.beat
            )));
        }
        if !points
            .iter()
            .tuple_windows()
            .all(|(earlier, later)| earlier.beat < later.beat)
        {
            return Err(ChartError::InvalidArgument(
                "BPM breakpoints must be strictly ascending by beat".into(),
            ));
        }
        Ok(())
    }
}
