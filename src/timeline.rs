//! The beat/time timeline model.
//!
//! `time` module defines the [`Beat`] and [`Time`] scalar value types.
//!
//! `bpm` module defines the [`BpmMap`], an ordered sequence of
//! (beat, tempo) breakpoints providing the piecewise-linear beat-to-time
//! conversion. The map is the sole authority for that conversion: dependents
//! query it and never duplicate its state.
//!
//! `beat_lines` module generates the gridline sequence drawn behind the
//! notefield for a visible time window.

pub mod beat_lines;
pub mod bpm;
pub mod time;

pub use beat_lines::{BEATS_PER_MEASURE, BeatLine, BeatLineKind, BeatLines, beat_lines};
pub use bpm::{Bpm, BpmMap, BpmPoint};
pub use time::{Beat, Time};
