//! Gridline generation for the visible time window.
//!
//! The notefield redraws its gridlines from scratch every frame: the sequence
//! is cheap to regenerate (one conversion per visible line) and recomputing it
//! keeps the lines correct under tempo edits and zoom changes without any
//! cache to invalidate.

use super::bpm::BpmMap;
use super::time::{Beat, Time};
use crate::snap::BeatSnap;
use crate::{ChartError, Result};

/// Beats in one measure. The notefield assumes 4/4 time.
pub const BEATS_PER_MEASURE: f64 = 4.0;

/// Tolerance for deciding whether a beat lands on a grid boundary.
const GRID_EPSILON: f64 = 1e-9;

/// How a gridline should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BeatLineKind {
    /// The line opens a measure.
    Measure,
    /// The line sits on a whole beat inside a measure.
    Whole,
    /// The line sits on a snap subdivision between whole beats.
    Fraction,
}

impl BeatLineKind {
    /// Classify a gridline beat against the measure length and whole beats.
    #[must_use]
    pub fn classify(beat: Beat) -> Self {
        let value = beat.as_f64();
        if is_near_multiple(value, BEATS_PER_MEASURE) {
            Self::Measure
        } else if is_near_multiple(value, 1.0) {
            Self::Whole
        } else {
            Self::Fraction
        }
    }
}

fn is_near_multiple(value: f64, unit: f64) -> bool {
    let scaled = value / unit;
    (scaled - scaled.round()).abs() < GRID_EPSILON
}

/// A single gridline: the beat it sits on, the wall-clock time of that beat,
/// and how it should be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeatLine {
    /// The beat of this gridline.
    pub beat: Beat,
    /// The wall-clock time of [`Self::beat`] under the chart's BPM map.
    pub time: Time,
    /// Draw classification.
    pub kind: BeatLineKind,
}

/// Lazy iterator over the gridlines of a time window. Created by
/// [`beat_lines`].
#[derive(Debug, Clone)]
pub struct BeatLines<'a> {
    map: &'a BpmMap,
    /// Grid pitch in beats.
    step: f64,
    /// Next grid index to emit; the beat is `index * step`.
    index: u64,
    end: Time,
}

impl Iterator for BeatLines<'_> {
    type Item = BeatLine;

    fn next(&mut self) -> Option<Self::Item> {
        let beat = Beat::new(self.index as f64 * self.step)
            .expect("grid index times a positive step is non-negative");
        let time = self.map.time_at(beat);
        if time > self.end {
            return None;
        }
        self.index += 1;
        Some(BeatLine {
            beat,
            time,
            kind: BeatLineKind::classify(beat),
        })
    }
}

/// Produce the gridlines falling inside `[start, end]`, both bounds
/// inclusive.
///
/// The first line is the earliest grid position at or after
/// `map.beat_at(start)`; subsequent lines step by the snap's beat delta,
/// never coarser than one whole beat. At the default quarter snap this emits
/// exactly the whole beats of the window; finer snaps interleave
/// [`BeatLineKind::Fraction`] subdivision lines.
///
/// # Errors
///
/// Returns [`ChartError::InvalidArgument`] when `start >= end`.
pub fn beat_lines<'a>(
    map: &'a BpmMap,
    snap: BeatSnap,
    start: Time,
    end: Time,
) -> Result<BeatLines<'a>> {
    if start >= end {
        return Err(ChartError::InvalidArgument(format!(
            "beat line window start {start} must come before end {end}"
        )));
    }
    let step = snap.to_beat().as_f64().min(1.0);
    let first_beat = map.beat_at(start).as_f64();
    // Back off by the grid tolerance so a start sitting on a line keeps it.
    let index = ((first_beat / step) - GRID_EPSILON).ceil().max(0.0) as u64;
    Ok(BeatLines {
        map,
        step,
        index,
        end,
    })
}
